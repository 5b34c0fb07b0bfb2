//! Contacts Panel
//!
//! Slide-over contact picker used from the chat page to start a
//! conversation with an existing contact.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::models::{initials, matches_query, Contact};

#[component]
pub fn ContactsPanel(
    open: RwSignal<bool>,
    #[prop(into)] on_select: Callback<Contact>,
) -> impl IntoView {
    let (contacts, set_contacts) = signal(Vec::<Contact>::new());
    let (loading, set_loading) = signal(false);
    let (query, set_query) = signal(String::new());

    // Refresh the list each time the panel opens.
    Effect::new(move |_| {
        if !open.get() {
            return;
        }
        set_loading.set(true);
        spawn_local(async move {
            match api::contacts("", 200).await {
                Ok(list) => set_contacts.set(list),
                Err(err) => {
                    web_sys::console::error_1(&format!("load contacts: {err}").into());
                    set_contacts.set(Vec::new());
                }
            }
            set_loading.set(false);
        });
    });

    let filtered = move || {
        let q = query.get();
        contacts
            .get()
            .into_iter()
            .filter(|c| matches_query(&c.name, &c.phone, &q))
            .collect::<Vec<_>>()
    };

    view! {
        <Show when=move || open.get()>
            <aside class="contacts-panel">
                <header class="panel-header">
                    <h3>"Select Contact"</h3>
                    <button type="button" class="icon-button" on:click=move |_| open.set(false)>
                        "✕"
                    </button>
                </header>
                <input
                    class="search-input"
                    placeholder="Search contacts..."
                    prop:value=move || query.get()
                    on:input=move |ev| set_query.set(event_target_value(&ev))
                />
                <div class="panel-list">
                    <Show
                        when=move || !loading.get()
                        fallback=|| view! { <p class="hint">"Loading contacts..."</p> }
                    >
                        <Show
                            when=move || !filtered().is_empty()
                            fallback=|| view! { <p class="hint">"No contacts found"</p> }
                        >
                            <For
                                each=filtered
                                key=|c| c.id.clone()
                                children=move |contact| {
                                    let pick = contact.clone();
                                    view! {
                                        <button
                                            type="button"
                                            class="contact-row"
                                            on:click=move |_| {
                                                on_select.run(pick.clone());
                                                open.set(false);
                                            }
                                        >
                                            <span class="avatar">{initials(&contact.name)}</span>
                                            <span class="contact-meta">
                                                <span class="contact-name">{contact.name.clone()}</span>
                                                <span class="contact-phone">{contact.phone.clone()}</span>
                                            </span>
                                        </button>
                                    }
                                }
                            />
                        </Show>
                    </Show>
                </div>
            </aside>
        </Show>
    }
}
