//! Chat Page
//!
//! Threads list on the left, conversation on the right. Selecting a contact
//! that has no server-side thread yet opens a local `Pending` conversation;
//! the first send (or a refetch that surfaces the thread) promotes it to
//! `Confirmed`.

use std::collections::HashMap;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, SendMessagePayload, SendTemplatePayload};
use crate::components::{ContactsPanel, NewChatDialog};
use crate::context::use_app_context;
use crate::models::{initials, matches_query, ActiveThread, ChatThread, Message, Template};
use crate::remote::{FetchSlot, RemoteCollection};

const THREAD_LIMIT: u32 = 100;
const MESSAGE_LIMIT: u32 = 100;

#[component]
pub fn ChatPage() -> impl IntoView {
    let ctx = use_app_context();

    let threads = RemoteCollection::<ChatThread>::new();
    let (query, set_query) = signal(String::new());
    let (unread_only, set_unread_only) = signal(false);

    let (active, set_active) = signal(None::<ActiveThread>);
    let (messages, set_messages) = signal(Vec::<Message>::new());
    let (messages_loading, set_messages_loading) = signal(false);
    let (draft, set_draft) = signal(String::new());
    let (sending, set_sending) = signal(false);
    let (templates, set_templates) = signal(Vec::<Template>::new());
    let (template_picker, set_template_picker) = signal(false);

    // One slot guards the conversation panel: a slow response for a
    // previously selected contact must not overwrite the current one.
    let slot = FetchSlot::new();

    let load_messages = move |contact_id: String| {
        let token = slot.begin();
        set_messages_loading.set(true);
        spawn_local(async move {
            let result = api::thread_messages(&contact_id, MESSAGE_LIMIT).await;
            if !slot.is_current(token) {
                return;
            }
            match result {
                Ok(list) => set_messages.set(list),
                Err(err) => {
                    web_sys::console::error_1(&format!("load messages: {err}").into());
                    set_messages.set(Vec::new());
                }
            }
            set_messages_loading.set(false);
        });
    };

    let refetch_threads = move || {
        spawn_local(async move {
            threads.load(api::chat_threads(THREAD_LIMIT)).await;
            let items = threads.items.get_untracked();
            // Promote a pending conversation if the server now knows the
            // thread; drop a confirmed one whose thread disappeared.
            set_active.update(|current| match current.take() {
                Some(ActiveThread::Pending(contact)) => {
                    *current = match items.iter().find(|t| t.contact_id == contact.id) {
                        Some(thread) => Some(ActiveThread::Confirmed(thread.clone())),
                        None => Some(ActiveThread::Pending(contact)),
                    };
                }
                Some(ActiveThread::Confirmed(thread)) => {
                    *current = items
                        .iter()
                        .find(|t| t.id == thread.id)
                        .map(|t| ActiveThread::Confirmed(t.clone()));
                }
                None => {}
            });
        });
    };

    Effect::new(move |_| {
        refetch_threads();
        spawn_local(async move {
            match api::templates().await {
                Ok(list) => {
                    set_templates.set(list.into_iter().filter(|t| t.status == "approved").collect())
                }
                Err(err) => {
                    web_sys::console::error_1(&format!("load templates: {err}").into());
                }
            }
        });
    });

    let select_thread = move |thread: ChatThread| {
        let contact_id = thread.contact_id.clone();
        set_active.set(Some(ActiveThread::Confirmed(thread)));
        load_messages(contact_id);
    };

    // Entry point for the contacts panel and the New Chat dialog: we only
    // have a contact id. Reuse an existing thread when there is one;
    // otherwise ask the server (fetching messages creates the thread
    // backend-side) and fall back to a local pending conversation.
    let open_conversation = move |contact_id: String| {
        if let Some(thread) = threads
            .items
            .get_untracked()
            .into_iter()
            .find(|t| t.contact_id == contact_id)
        {
            select_thread(thread);
            return;
        }
        spawn_local(async move {
            load_messages(contact_id.clone());
            threads.load(api::chat_threads(THREAD_LIMIT)).await;
            if let Some(thread) = threads
                .items
                .get_untracked()
                .into_iter()
                .find(|t| t.contact_id == contact_id)
            {
                set_active.set(Some(ActiveThread::Confirmed(thread)));
                return;
            }
            match api::contact(&contact_id).await {
                Ok(contact) => set_active.set(Some(ActiveThread::Pending(contact))),
                Err(err) => ctx.toast_error(err.user_message("Failed to open conversation")),
            }
        });
    };

    let send = move || {
        let content = draft.get().trim().to_string();
        let Some(thread) = active.get() else {
            return;
        };
        if content.is_empty() || sending.get() {
            return;
        }
        set_sending.set(true);
        let contact_id = thread.contact_id().to_string();
        let was_pending = thread.thread_id().is_none();
        spawn_local(async move {
            let result = api::send_message(&SendMessagePayload {
                contact_id: &contact_id,
                content: &content,
                kind: "text",
            })
            .await;
            match result {
                Ok(_) => {
                    set_draft.set(String::new());
                    load_messages(contact_id);
                    if was_pending {
                        refetch_threads();
                    }
                }
                Err(err) => ctx.toast_error(err.user_message("Failed to send message")),
            }
            set_sending.set(false);
        });
    };

    // Template sends use each parameter's example value; tailored values go
    // through the campaign flow, not 1:1 chat.
    let send_template = move |template: Template| {
        let Some(thread) = active.get_untracked() else {
            return;
        };
        if sending.get_untracked() {
            return;
        }
        set_sending.set(true);
        set_template_picker.set(false);
        let contact_id = thread.contact_id().to_string();
        let was_pending = thread.thread_id().is_none();
        spawn_local(async move {
            let parameters: HashMap<String, String> = template
                .parameters
                .iter()
                .map(|p| (p.name.clone(), p.example.clone()))
                .collect();
            let result = api::send_template(&SendTemplatePayload {
                contact_id: &contact_id,
                template_id: &template.id,
                parameters: &parameters,
            })
            .await;
            match result {
                Ok(_) => {
                    load_messages(contact_id);
                    if was_pending {
                        refetch_threads();
                    }
                }
                Err(err) => ctx.toast_error(err.user_message("Failed to send template")),
            }
            set_sending.set(false);
        });
    };

    let filtered_threads = move || {
        let q = query.get();
        let unread = unread_only.get();
        threads
            .items
            .get()
            .into_iter()
            .filter(|t| matches_query(&t.contact_name, &t.contact_phone, &q))
            .filter(|t| !unread || t.unread_count > 0)
            .collect::<Vec<_>>()
    };

    let panel_open = RwSignal::new(false);
    let new_chat_open = RwSignal::new(false);

    view! {
        <section class="page chat-layout">
            <aside class="thread-list">
                <header class="panel-header">
                    <h2>"Chats"</h2>
                    <div class="header-actions">
                        <button type="button" on:click=move |_| panel_open.set(true)>
                            "Contacts"
                        </button>
                        <button type="button" class="primary" on:click=move |_| new_chat_open.set(true)>
                            "New Chat"
                        </button>
                    </div>
                </header>

                <input
                    class="search-input"
                    placeholder="Search chats..."
                    prop:value=move || query.get()
                    on:input=move |ev| set_query.set(event_target_value(&ev))
                />

                <div class="tab-row">
                    <button
                        type="button"
                        class:active=move || !unread_only.get()
                        on:click=move |_| set_unread_only.set(false)
                    >
                        "All"
                    </button>
                    <button
                        type="button"
                        class:active=move || unread_only.get()
                        on:click=move |_| set_unread_only.set(true)
                    >
                        "Unread"
                    </button>
                </div>

                <Show
                    when=move || !threads.loading.get()
                    fallback=|| view! { <p class="hint">"Loading chats..."</p> }
                >
                    <Show
                        when=move || !filtered_threads().is_empty()
                        fallback=|| view! { <p class="hint">"No conversations"</p> }
                    >
                        <For
                            each=filtered_threads
                            key=|t| t.id.clone()
                            children=move |thread| {
                                let id = thread.id.clone();
                                let pick = thread.clone();
                                view! {
                                    <button
                                        type="button"
                                        class="thread-row"
                                        class:selected=move || {
                                            active.get().and_then(|a| a.thread_id().map(String::from))
                                                == Some(id.clone())
                                        }
                                        on:click=move |_| select_thread(pick.clone())
                                    >
                                        <span class="avatar">{initials(&thread.contact_name)}</span>
                                        <span class="thread-meta">
                                            <span class="thread-name">{thread.contact_name.clone()}</span>
                                            <span class="thread-preview">
                                                {thread.last_message.clone().unwrap_or_default()}
                                            </span>
                                        </span>
                                        <Show when={
                                            let count = thread.unread_count;
                                            move || count > 0
                                        }>
                                            <span class="unread-badge">{thread.unread_count}</span>
                                        </Show>
                                    </button>
                                }
                            }
                        />
                    </Show>
                </Show>
            </aside>

            <div class="conversation">
                {move || match active.get() {
                    None => {
                        view! {
                            <div class="conversation-empty">
                                <p>"Select a chat or start a new one"</p>
                            </div>
                        }
                            .into_any()
                    }
                    Some(thread) => {
                        let name = thread.contact_name().to_string();
                        let phone = thread.contact_phone().to_string();
                        let pending = thread.thread_id().is_none();
                        view! {
                            <div class="conversation-open">
                                <header class="conversation-header">
                                    <span class="avatar">{initials(&name)}</span>
                                    <div>
                                        <h3>{name.clone()}</h3>
                                        <p>{phone.clone()}</p>
                                    </div>
                                    <Show when=move || pending>
                                        <span class="pending-badge">"New conversation"</span>
                                    </Show>
                                </header>

                                <div class="message-scroll">
                                    <Show
                                        when=move || !messages_loading.get()
                                        fallback=|| view! { <p class="hint">"Loading messages..."</p> }
                                    >
                                        <Show
                                            when=move || !messages.get().is_empty()
                                            fallback=|| {
                                                view! { <p class="hint">"No messages yet. Say hello!"</p> }
                                            }
                                        >
                                            <For
                                                each=move || messages.get()
                                                key=|m| m.id.clone()
                                                children=move |message| {
                                                    let outbound = message.direction == "outbound";
                                                    view! {
                                                        <div
                                                            class="message-bubble"
                                                            class:outbound=move || outbound
                                                        >
                                                            <p>{message.content.clone()}</p>
                                                            <span class="message-status">
                                                                {message.status.clone()}
                                                            </span>
                                                        </div>
                                                    }
                                                }
                                            />
                                        </Show>
                                    </Show>
                                </div>

                                <Show when=move || template_picker.get()>
                                    <div class="template-tray">
                                        <Show
                                            when=move || !templates.get().is_empty()
                                            fallback=|| {
                                                view! { <p class="hint">"No approved templates"</p> }
                                            }
                                        >
                                            <For
                                                each=move || templates.get()
                                                key=|t| t.id.clone()
                                                children=move |template| {
                                                    let pick = template.clone();
                                                    view! {
                                                        <button
                                                            type="button"
                                                            class="template-tray-item"
                                                            on:click=move |_| send_template(pick.clone())
                                                        >
                                                            <span class="contact-name">
                                                                {template.name.clone()}
                                                            </span>
                                                            <span class="hint">{template.content.clone()}</span>
                                                        </button>
                                                    }
                                                }
                                            />
                                        </Show>
                                    </div>
                                </Show>

                                <form
                                    class="composer"
                                    on:submit=move |ev| {
                                        ev.prevent_default();
                                        send();
                                    }
                                >
                                    <button
                                        type="button"
                                        on:click=move |_| set_template_picker.update(|v| *v = !*v)
                                    >
                                        "Template"
                                    </button>
                                    <input
                                        placeholder="Type a message..."
                                        prop:value=move || draft.get()
                                        on:input=move |ev| set_draft.set(event_target_value(&ev))
                                    />
                                    <button
                                        type="submit"
                                        class="primary"
                                        disabled=move || sending.get() || draft.get().trim().is_empty()
                                    >
                                        "Send"
                                    </button>
                                </form>
                            </div>
                        }
                            .into_any()
                    }
                }}
            </div>

            <ContactsPanel
                open=panel_open
                on_select=move |contact: crate::models::Contact| open_conversation(contact.id)
            />
            <NewChatDialog
                open=new_chat_open
                on_chat_created=move |contact_id: String| open_conversation(contact_id)
            />
        </section>
    }
}
