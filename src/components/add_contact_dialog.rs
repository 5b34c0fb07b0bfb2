//! Add Contact Dialog
//!
//! Manual contact creation form. Posts with `source: "manual"`, then closes
//! and asks the parent to refresh its list.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::context::use_app_context;

#[component]
pub fn AddContactDialog(
    open: RwSignal<bool>,
    #[prop(into)] on_success: Callback<()>,
) -> impl IntoView {
    let ctx = use_app_context();

    let (name, set_name) = signal(String::new());
    let (phone, set_phone) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (tags, set_tags) = signal(Vec::<String>::new());
    let (tag_input, set_tag_input) = signal(String::new());
    let (saving, set_saving) = signal(false);

    let reset = move || {
        set_name.set(String::new());
        set_phone.set(String::new());
        set_email.set(String::new());
        set_tags.set(Vec::new());
        set_tag_input.set(String::new());
        set_saving.set(false);
    };

    let close = move |_| {
        reset();
        open.set(false);
    };

    let add_tag = move || {
        let tag = tag_input.get().trim().to_string();
        if !tag.is_empty() && !tags.get().contains(&tag) {
            set_tags.update(|t| t.push(tag));
            set_tag_input.set(String::new());
        }
    };

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if name.get().trim().is_empty() || phone.get().trim().is_empty() {
            return;
        }
        set_saving.set(true);

        let payload = api::CreateContactPayload {
            name: name.get().trim().to_string(),
            phone: phone.get().trim().to_string(),
            email: Some(email.get().trim().to_string()).filter(|e| !e.is_empty()),
            tags: tags.get(),
            source: "manual".to_string(),
        };
        spawn_local(async move {
            match api::create_contact(&payload).await {
                Ok(_) => {
                    ctx.toast_success("Contact created successfully");
                    on_success.run(());
                    reset();
                    open.set(false);
                }
                Err(err) => {
                    ctx.toast_error(err.user_message("Failed to create contact"));
                    set_saving.set(false);
                }
            }
        });
    };

    view! {
        <Show when=move || open.get()>
            <div class="dialog-overlay">
                <div class="dialog">
                    <header class="dialog-header">
                        <h2>"Add New Contact"</h2>
                        <p>"Create a new contact manually. Fill in the details below."</p>
                    </header>
                    <form on:submit=submit>
                        <div class="form-field">
                            <label for="contact-name">"Name *"</label>
                            <input
                                id="contact-name"
                                placeholder="Arjun Singh"
                                prop:value=move || name.get()
                                on:input=move |ev| set_name.set(event_target_value(&ev))
                            />
                        </div>
                        <div class="form-field">
                            <label for="contact-phone">"Phone *"</label>
                            <input
                                id="contact-phone"
                                placeholder="+91 98765 43210"
                                prop:value=move || phone.get()
                                on:input=move |ev| set_phone.set(event_target_value(&ev))
                            />
                        </div>
                        <div class="form-field">
                            <label for="contact-email">"Email"</label>
                            <input
                                id="contact-email"
                                type="email"
                                placeholder="arjun@example.com"
                                prop:value=move || email.get()
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                            />
                        </div>
                        <div class="form-field">
                            <label for="contact-tags">"Tags"</label>
                            <div class="tag-input-row">
                                <input
                                    id="contact-tags"
                                    placeholder="Add a tag..."
                                    prop:value=move || tag_input.get()
                                    on:input=move |ev| set_tag_input.set(event_target_value(&ev))
                                    on:keydown=move |ev: web_sys::KeyboardEvent| {
                                        if ev.key() == "Enter" {
                                            ev.prevent_default();
                                            add_tag();
                                        }
                                    }
                                />
                                <button type="button" on:click=move |_| add_tag()>
                                    "Add"
                                </button>
                            </div>
                            <div class="tag-list">
                                <For
                                    each=move || tags.get()
                                    key=|tag| tag.clone()
                                    children=move |tag| {
                                        let remove_tag = tag.clone();
                                        view! {
                                            <span class="tag-badge">
                                                {tag.clone()}
                                                <button
                                                    type="button"
                                                    on:click=move |_| {
                                                        let remove = remove_tag.clone();
                                                        set_tags.update(|t| t.retain(|x| *x != remove));
                                                    }
                                                >
                                                    "×"
                                                </button>
                                            </span>
                                        }
                                    }
                                />
                            </div>
                        </div>
                        <footer class="dialog-footer">
                            <button type="button" on:click=close>
                                "Cancel"
                            </button>
                            <button type="submit" class="primary" disabled=move || saving.get()>
                                {move || if saving.get() { "Creating..." } else { "Create Contact" }}
                            </button>
                        </footer>
                    </form>
                </div>
            </div>
        </Show>
    }
}
