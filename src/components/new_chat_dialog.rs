//! New Chat Dialog
//!
//! Looks up an email in the user directory. Registered users get "Start
//! Chat"; unknown emails branch into a minimal add-contact form whose created
//! contact is handed back to the parent to open the conversation.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, EmailVerification};

#[component]
pub fn NewChatDialog(
    open: RwSignal<bool>,
    #[prop(into)] on_chat_created: Callback<String>,
) -> impl IntoView {
    let (email, set_email) = signal(String::new());
    let (name, set_name) = signal(String::new());
    let (phone, set_phone) = signal(String::new());
    let (verifying, set_verifying) = signal(false);
    let (creating, set_creating) = signal(false);
    let (verification, set_verification) = signal(None::<EmailVerification>);
    let (error, set_error) = signal(String::new());

    let reset = move || {
        set_email.set(String::new());
        set_name.set(String::new());
        set_phone.set(String::new());
        set_verifying.set(false);
        set_creating.set(false);
        set_verification.set(None);
        set_error.set(String::new());
    };

    let close = move || {
        reset();
        open.set(false);
    };

    let verify = move || {
        let address = email.get().trim().to_string();
        if address.is_empty() {
            set_error.set("Please enter an email address".to_string());
            return;
        }
        set_verifying.set(true);
        set_error.set(String::new());
        set_verification.set(None);

        spawn_local(async move {
            match api::verify_email(&address).await {
                Ok(result) => {
                    if result.registered {
                        set_name.set(result.name.clone().unwrap_or_default());
                    }
                    set_verification.set(Some(result));
                }
                Err(err) => set_error.set(err.user_message("Failed to verify email")),
            }
            set_verifying.set(false);
        });
    };

    let create_contact = move || {
        if name.get().trim().is_empty() || phone.get().trim().is_empty() {
            set_error.set("Name and phone are required".to_string());
            return;
        }
        set_creating.set(true);
        set_error.set(String::new());

        let payload = api::CreateContactPayload {
            name: name.get().trim().to_string(),
            phone: phone.get().trim().to_string(),
            email: Some(email.get().trim().to_string()).filter(|e| !e.is_empty()),
            tags: vec!["chat".to_string()],
            source: "manual".to_string(),
        };
        spawn_local(async move {
            match api::create_contact(&payload).await {
                Ok(contact) => {
                    on_chat_created.run(contact.id);
                    reset();
                    open.set(false);
                }
                Err(err) => {
                    set_error.set(err.user_message("Failed to create contact"));
                    set_creating.set(false);
                }
            }
        });
    };

    let start_chat = move || {
        if let Some(user_id) = verification.get().and_then(|v| v.user_id) {
            on_chat_created.run(user_id);
            reset();
            open.set(false);
        }
    };

    let registered = move || verification.get().map(|v| v.registered).unwrap_or(false);
    let needs_contact = move || verification.get().map(|v| !v.registered).unwrap_or(false);

    view! {
        <Show when=move || open.get()>
            <div class="dialog-overlay">
                <div class="dialog">
                    <header class="dialog-header">
                        <h2>"Start New Chat"</h2>
                        <p>"Search for a registered user by email or add a new contact."</p>
                    </header>

                    <div class="form-field">
                        <label for="chat-email">"Email Address"</label>
                        <div class="verify-row">
                            <input
                                id="chat-email"
                                type="email"
                                placeholder="user@example.com"
                                prop:value=move || email.get()
                                disabled=move || verifying.get() || verification.get().is_some()
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                on:keydown=move |ev: web_sys::KeyboardEvent| {
                                    if ev.key() == "Enter" {
                                        ev.prevent_default();
                                        verify();
                                    }
                                }
                            />
                            <Show when=move || verification.get().is_none()>
                                <button
                                    type="button"
                                    disabled=move || verifying.get() || email.get().trim().is_empty()
                                    on:click=move |_| verify()
                                >
                                    {move || if verifying.get() { "..." } else { "Search" }}
                                </button>
                            </Show>
                        </div>
                    </div>

                    {move || {
                        verification
                            .get()
                            .map(|v| {
                                if v.registered {
                                    view! {
                                        <div class="verify-result verify-ok">
                                            "User found: "
                                            <strong>{v.name.unwrap_or_default()}</strong>
                                        </div>
                                    }
                                        .into_any()
                                } else {
                                    view! {
                                        <div class="verify-result verify-missing">
                                            "User not registered. Add as contact to start chatting."
                                        </div>
                                    }
                                        .into_any()
                                }
                            })
                    }}

                    <Show when=needs_contact>
                        <div class="add-contact-inline">
                            <h3>"Add New Contact"</h3>
                            <div class="form-field">
                                <label for="chat-name">"Name"</label>
                                <input
                                    id="chat-name"
                                    placeholder="Contact name"
                                    prop:value=move || name.get()
                                    on:input=move |ev| set_name.set(event_target_value(&ev))
                                />
                            </div>
                            <div class="form-field">
                                <label for="chat-phone">"Phone Number"</label>
                                <input
                                    id="chat-phone"
                                    placeholder="+1234567890"
                                    prop:value=move || phone.get()
                                    on:input=move |ev| set_phone.set(event_target_value(&ev))
                                />
                            </div>
                        </div>
                    </Show>

                    <Show when=move || !error.get().is_empty()>
                        <div class="dialog-error">{move || error.get()}</div>
                    </Show>

                    <footer class="dialog-footer">
                        <button type="button" on:click=move |_| close()>
                            "Cancel"
                        </button>
                        <Show when=registered>
                            <button type="button" class="primary" on:click=move |_| start_chat()>
                                "Start Chat"
                            </button>
                        </Show>
                        <Show when=needs_contact>
                            <button
                                type="button"
                                class="primary"
                                disabled=move || {
                                    creating.get() || name.get().trim().is_empty()
                                        || phone.get().trim().is_empty()
                                }
                                on:click=move |_| create_contact()
                            >
                                {move || if creating.get() { "Creating..." } else { "Add Contact & Chat" }}
                            </button>
                        </Show>
                    </footer>
                </div>
            </div>
        </Show>
    }
}
