//! Contacts Page
//!
//! Searchable, filterable contact table with bulk selection, a detail side
//! panel, and the Add Contact / Import Sheets dialogs.

use std::collections::HashSet;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{AddContactDialog, ImportSheetsDialog};
use crate::context::use_app_context;
use crate::models::{initials, matches_query, Contact};
use crate::remote::{reconcile_selection, RemoteCollection};

#[component]
pub fn ContactsPage() -> impl IntoView {
    let ctx = use_app_context();

    let contacts = RemoteCollection::<Contact>::new();
    let (tags, set_tags) = signal(Vec::<String>::new());
    let (query, set_query) = signal(String::new());
    let (tag_filter, set_tag_filter) = signal(String::new());
    let (source_filter, set_source_filter) = signal(String::new());
    let (selected_id, set_selected_id) = signal(None::<String>);
    let (checked, set_checked) = signal(HashSet::<String>::new());
    let (editing, set_editing) = signal(false);
    let (edit_name, set_edit_name) = signal(String::new());
    let (edit_phone, set_edit_phone) = signal(String::new());

    let add_open = RwSignal::new(false);
    let import_open = RwSignal::new(false);

    let refetch = move || {
        spawn_local(async move {
            contacts.load(api::contacts("", 500)).await;
            let items = contacts.items.get_untracked();
            // A refetch may have removed the row the panel points at.
            set_selected_id.update(|sel| {
                *sel = reconcile_selection(sel.take(), &items, |c: &Contact| &c.id);
            });
            set_checked.update(|set| set.retain(|id| items.iter().any(|c| &c.id == id)));
            match api::all_tags().await {
                Ok(list) => set_tags.set(list),
                Err(err) => {
                    web_sys::console::error_1(&format!("load tags: {err}").into());
                }
            }
        });
    };

    Effect::new(move |_| refetch());

    let filtered = move || {
        let q = query.get();
        let tag = tag_filter.get();
        let source = source_filter.get();
        contacts
            .items
            .get()
            .into_iter()
            .filter(|c| matches_query(&c.name, &c.phone, &q))
            .filter(|c| tag.is_empty() || c.tags.contains(&tag))
            .filter(|c| source.is_empty() || c.source == source)
            .collect::<Vec<_>>()
    };

    let selected_contact = move || {
        selected_id
            .get()
            .and_then(|id| contacts.items.get().into_iter().find(|c| c.id == id))
    };

    let all_visible_checked = move || {
        let visible = filtered();
        !visible.is_empty() && visible.iter().all(|c| checked.get().contains(&c.id))
    };

    let toggle_all = move || {
        let visible: Vec<String> = filtered().into_iter().map(|c| c.id).collect();
        set_checked.update(|set| {
            if visible.iter().all(|id| set.contains(id)) {
                for id in &visible {
                    set.remove(id);
                }
            } else {
                set.extend(visible);
            }
        });
    };

    let delete_checked = move || {
        let ids: Vec<String> = checked.get().into_iter().collect();
        if ids.is_empty() {
            return;
        }
        spawn_local(async move {
            let mut failed = 0usize;
            for id in &ids {
                if api::delete_contact(id).await.is_err() {
                    failed += 1;
                }
            }
            if failed == 0 {
                ctx.toast_success(format!("Deleted {} contacts", ids.len()));
            } else {
                ctx.toast_error(format!("Failed to delete {failed} contacts"));
            }
            set_checked.set(HashSet::new());
            refetch();
        });
    };

    let save_edit = move |id: String| {
        let name = edit_name.get().trim().to_string();
        let phone = edit_phone.get().trim().to_string();
        if name.is_empty() || phone.is_empty() {
            return;
        }
        spawn_local(async move {
            let payload = api::UpdateContactPayload {
                name: Some(name),
                phone: Some(phone),
                ..Default::default()
            };
            match api::update_contact(&id, &payload).await {
                Ok(_) => {
                    ctx.toast_success("Contact updated");
                    set_editing.set(false);
                    refetch();
                }
                Err(err) => ctx.toast_error(err.user_message("Failed to update contact")),
            }
        });
    };

    let delete_one = move |id: String| {
        spawn_local(async move {
            match api::delete_contact(&id).await {
                Ok(()) => {
                    ctx.toast_success("Contact deleted");
                    refetch();
                }
                Err(err) => ctx.toast_error(err.user_message("Failed to delete contact")),
            }
        });
    };

    view! {
        <section class="page page-with-panel">
            <div class="page-main">
                <header class="page-header">
                    <div>
                        <h1>"Contacts"</h1>
                        <p>{move || format!("{} contacts", contacts.items.get().len())}</p>
                    </div>
                    <div class="header-actions">
                        <button type="button" on:click=move |_| import_open.set(true)>
                            "Import Sheets"
                        </button>
                        <button type="button" class="primary" on:click=move |_| add_open.set(true)>
                            "Add Contact"
                        </button>
                    </div>
                </header>

                <div class="filter-bar">
                    <input
                        class="search-input"
                        placeholder="Search by name or phone..."
                        prop:value=move || query.get()
                        on:input=move |ev| set_query.set(event_target_value(&ev))
                    />
                    <select on:change=move |ev| set_tag_filter.set(event_target_value(&ev))>
                        <option value="">"All tags"</option>
                        <For
                            each=move || tags.get()
                            key=|t| t.clone()
                            children=move |tag| {
                                view! { <option value=tag.clone()>{tag.clone()}</option> }
                            }
                        />
                    </select>
                    <select on:change=move |ev| set_source_filter.set(event_target_value(&ev))>
                        <option value="">"All sources"</option>
                        <option value="manual">"Manual"</option>
                        <option value="sheet">"Sheet import"</option>
                        <option value="chat">"Chat"</option>
                    </select>
                    <Show when=move || !checked.get().is_empty()>
                        <button type="button" class="danger" on:click=move |_| delete_checked()>
                            {move || format!("Delete ({})", checked.get().len())}
                        </button>
                    </Show>
                </div>

                <Show
                    when=move || !contacts.loading.get()
                    fallback=|| view! { <p class="hint">"Loading contacts..."</p> }
                >
                    <table class="data-table">
                        <thead>
                            <tr>
                                <th>
                                    <input
                                        type="checkbox"
                                        prop:checked=all_visible_checked
                                        on:change=move |_| toggle_all()
                                    />
                                </th>
                                <th>"Name"</th>
                                <th>"Phone"</th>
                                <th>"Tags"</th>
                                <th>"Source"</th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=filtered
                                key=|c| c.id.clone()
                                children=move |contact| {
                                    let id = contact.id.clone();
                                    let row_id = id.clone();
                                    let check_id = id.clone();
                                    view! {
                                        <tr
                                            class:selected=move || selected_id.get().as_deref() == Some(id.as_str())
                                            on:click=move |_| {
                                                set_editing.set(false);
                                                set_selected_id.set(Some(row_id.clone()));
                                            }
                                        >
                                            <td on:click=move |ev| ev.stop_propagation()>
                                                <input
                                                    type="checkbox"
                                                    prop:checked={
                                                        let id = check_id.clone();
                                                        move || checked.get().contains(&id)
                                                    }
                                                    on:change={
                                                        let id = check_id.clone();
                                                        move |_| {
                                                            let id = id.clone();
                                                            set_checked.update(|set| {
                                                                if !set.remove(&id) {
                                                                    set.insert(id);
                                                                }
                                                            });
                                                        }
                                                    }
                                                />
                                            </td>
                                            <td>
                                                <span class="avatar">{initials(&contact.name)}</span>
                                                {contact.name.clone()}
                                            </td>
                                            <td>{contact.phone.clone()}</td>
                                            <td>
                                                {contact
                                                    .tags
                                                    .iter()
                                                    .map(|t| view! { <span class="tag">{t.clone()}</span> })
                                                    .collect_view()}
                                            </td>
                                            <td>{contact.source.clone()}</td>
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                    </table>
                    <Show when=move || filtered().is_empty()>
                        <p class="hint">"No contacts match the current filters"</p>
                    </Show>
                </Show>
            </div>

            {move || {
                selected_contact()
                    .map(|contact| {
                        let delete_id = contact.id.clone();
                        let edit_id = contact.id.clone();
                        let base_name = contact.name.clone();
                        let base_phone = contact.phone.clone();
                        view! {
                            <aside class="detail-panel">
                                <header class="panel-header">
                                    <h3>"Contact Details"</h3>
                                    <button
                                        type="button"
                                        class="icon-button"
                                        on:click=move |_| set_selected_id.set(None)
                                    >
                                        "✕"
                                    </button>
                                </header>
                                <div class="detail-avatar">{initials(&contact.name)}</div>
                                <h2>{contact.name.clone()}</h2>

                                <Show when=move || editing.get()>
                                    <div class="form-field">
                                        <label for="edit-name">"Name"</label>
                                        <input
                                            id="edit-name"
                                            prop:value=move || edit_name.get()
                                            on:input=move |ev| set_edit_name.set(event_target_value(&ev))
                                        />
                                    </div>
                                    <div class="form-field">
                                        <label for="edit-phone">"Phone"</label>
                                        <input
                                            id="edit-phone"
                                            prop:value=move || edit_phone.get()
                                            on:input=move |ev| set_edit_phone.set(event_target_value(&ev))
                                        />
                                    </div>
                                    <div class="header-actions">
                                        <button type="button" on:click=move |_| set_editing.set(false)>
                                            "Cancel"
                                        </button>
                                        <button
                                            type="button"
                                            class="primary"
                                            on:click={
                                                let id = edit_id.clone();
                                                move |_| save_edit(id.clone())
                                            }
                                        >
                                            "Save"
                                        </button>
                                    </div>
                                </Show>

                                <Show when=move || !editing.get()>
                                    <button
                                        type="button"
                                        on:click={
                                            let name = base_name.clone();
                                            let phone = base_phone.clone();
                                            move |_| {
                                                set_edit_name.set(name.clone());
                                                set_edit_phone.set(phone.clone());
                                                set_editing.set(true);
                                            }
                                        }
                                    >
                                        "Edit"
                                    </button>
                                </Show>

                                <dl>
                                    <dt>"Phone"</dt>
                                    <dd>{contact.phone.clone()}</dd>
                                    <dt>"Email"</dt>
                                    <dd>{contact.email.clone().unwrap_or_else(|| "—".into())}</dd>
                                    <dt>"Source"</dt>
                                    <dd>{contact.source.clone()}</dd>
                                    <dt>"Tags"</dt>
                                    <dd>
                                        {contact
                                            .tags
                                            .iter()
                                            .map(|t| view! { <span class="tag">{t.clone()}</span> })
                                            .collect_view()}
                                    </dd>
                                </dl>
                                <button
                                    type="button"
                                    class="danger full-width"
                                    on:click=move |_| delete_one(delete_id.clone())
                                >
                                    "Delete Contact"
                                </button>
                            </aside>
                        }
                    })
            }}

            <AddContactDialog open=add_open on_success=move |_| refetch() />
            <ImportSheetsDialog open=import_open on_success=move |_| refetch() />
        </section>
    }
}
