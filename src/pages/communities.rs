//! Communities Page
//!
//! Communities with nested groups. Joining a group opens its message feed.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, CreateCommunityPayload, CreateGroupPayload, PostMessagePayload};
use crate::context::use_app_context;
use crate::models::{initials, Community, Group, GroupMessage};
use crate::remote::{FetchSlot, RemoteCollection};

#[component]
pub fn CommunitiesPage() -> impl IntoView {
    let ctx = use_app_context();

    let communities = RemoteCollection::<Community>::new();
    let (selected_group, set_selected_group) = signal(None::<Group>);
    let (messages, set_messages) = signal(Vec::<GroupMessage>::new());
    let (draft, set_draft) = signal(String::new());
    let (posting, set_posting) = signal(false);
    let slot = FetchSlot::new();

    let (creating, set_creating) = signal(false);
    let (new_name, set_new_name) = signal(String::new());
    let (new_description, set_new_description) = signal(String::new());
    let (saving, set_saving) = signal(false);

    // Per-community "new group" form target; None when no form is open.
    let (group_form_for, set_group_form_for) = signal(None::<String>);
    let (group_name, set_group_name) = signal(String::new());

    let refetch = move || {
        spawn_local(async move {
            communities.load(api::communities()).await;
            let items = communities.items.get_untracked();
            // The selected group may be gone after a refetch.
            set_selected_group.update(|sel| {
                if let Some(group) = sel.take() {
                    *sel = items
                        .iter()
                        .flat_map(|c| c.groups.iter())
                        .find(|g| g.id == group.id)
                        .cloned();
                }
            });
        });
    };

    Effect::new(move |_| refetch());

    let load_messages = move |group_id: String| {
        let token = slot.begin();
        spawn_local(async move {
            let result = api::group_messages(&group_id).await;
            if !slot.is_current(token) {
                return;
            }
            match result {
                Ok(list) => set_messages.set(list),
                Err(err) => {
                    web_sys::console::error_1(&format!("load group messages: {err}").into());
                    set_messages.set(Vec::new());
                }
            }
        });
    };

    let open_group = move |group: Group| {
        let id = group.id.clone();
        set_selected_group.set(Some(group));
        load_messages(id);
    };

    let join = move |group: Group| {
        spawn_local(async move {
            match api::join_group(&group.id).await {
                Ok(()) => {
                    ctx.toast_success(format!("Joined {}", group.name));
                    refetch();
                    open_group(group);
                }
                Err(err) => ctx.toast_error(err.user_message("Failed to join group")),
            }
        });
    };

    let create_community = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if saving.get() {
            return;
        }
        set_saving.set(true);
        let payload = CreateCommunityPayload {
            name: new_name.get().trim().to_string(),
            description: new_description.get().trim().to_string(),
        };
        spawn_local(async move {
            match api::create_community(&payload).await {
                Ok(_) => {
                    ctx.toast_success("Community created");
                    set_new_name.set(String::new());
                    set_new_description.set(String::new());
                    set_creating.set(false);
                    refetch();
                }
                Err(err) => ctx.toast_error(err.user_message("Failed to create community")),
            }
            set_saving.set(false);
        });
    };

    let create_group = move |community_id: String| {
        let name = group_name.get().trim().to_string();
        if name.is_empty() {
            return;
        }
        spawn_local(async move {
            let payload = CreateGroupPayload {
                name,
                description: String::new(),
            };
            match api::create_group(&community_id, &payload).await {
                Ok(_) => {
                    ctx.toast_success("Group created");
                    set_group_name.set(String::new());
                    set_group_form_for.set(None);
                    refetch();
                }
                Err(err) => ctx.toast_error(err.user_message("Failed to create group")),
            }
        });
    };

    let post = move || {
        let content = draft.get().trim().to_string();
        let Some(group) = selected_group.get() else {
            return;
        };
        if content.is_empty() || posting.get() {
            return;
        }
        set_posting.set(true);
        spawn_local(async move {
            let result =
                api::post_group_message(&group.id, &PostMessagePayload { content: &content }).await;
            match result {
                Ok(_) => {
                    set_draft.set(String::new());
                    load_messages(group.id.clone());
                }
                Err(err) => ctx.toast_error(err.user_message("Failed to send message")),
            }
            set_posting.set(false);
        });
    };

    view! {
        <section class="page page-with-panel">
            <div class="page-main">
                <header class="page-header">
                    <div>
                        <h1>"Communities"</h1>
                        <p>"Groups organized under a shared umbrella"</p>
                    </div>
                    <button type="button" class="primary" on:click=move |_| set_creating.set(true)>
                        "Create Community"
                    </button>
                </header>

                <Show when=move || creating.get()>
                    <form class="panel" on:submit=create_community>
                        <div class="form-field">
                            <label for="comm-name">"Name *"</label>
                            <input
                                id="comm-name"
                                required
                                placeholder="Customer success"
                                prop:value=move || new_name.get()
                                on:input=move |ev| set_new_name.set(event_target_value(&ev))
                            />
                        </div>
                        <div class="form-field">
                            <label for="comm-desc">"Description"</label>
                            <input
                                id="comm-desc"
                                prop:value=move || new_description.get()
                                on:input=move |ev| set_new_description.set(event_target_value(&ev))
                            />
                        </div>
                        <footer class="dialog-footer">
                            <button type="button" on:click=move |_| set_creating.set(false)>
                                "Cancel"
                            </button>
                            <button type="submit" class="primary" disabled=move || saving.get()>
                                {move || if saving.get() { "Creating..." } else { "Create" }}
                            </button>
                        </footer>
                    </form>
                </Show>

                <Show
                    when=move || !communities.loading.get()
                    fallback=|| view! { <p class="hint">"Loading communities..."</p> }
                >
                    <Show
                        when=move || !communities.items.get().is_empty()
                        fallback=|| view! { <p class="hint">"No communities yet"</p> }
                    >
                        <For
                            each=move || communities.items.get()
                            key=|c| c.id.clone()
                            children=move |community| {
                                let community_id = community.id.clone();
                                let form_id = community.id.clone();
                                let submit_id = community.id.clone();
                                view! {
                                    <div class="community-card">
                                        <header>
                                            <span class="avatar">{initials(&community.name)}</span>
                                            <div>
                                                <h3>{community.name.clone()}</h3>
                                                <p class="hint">
                                                    {format!("{} members", community.members_count)}
                                                </p>
                                            </div>
                                            <Show when={
                                                let is_admin = community.is_admin;
                                                move || is_admin
                                            }>
                                                <button
                                                    type="button"
                                                    on:click={
                                                        let id = form_id.clone();
                                                        move |_| set_group_form_for.set(Some(id.clone()))
                                                    }
                                                >
                                                    "Add Group"
                                                </button>
                                            </Show>
                                        </header>

                                        <Show when=move || {
                                            group_form_for.get().as_deref() == Some(community_id.as_str())
                                        }>
                                            <div class="verify-row">
                                                <input
                                                    placeholder="Group name"
                                                    prop:value=move || group_name.get()
                                                    on:input=move |ev| {
                                                        set_group_name.set(event_target_value(&ev))
                                                    }
                                                />
                                                <button
                                                    type="button"
                                                    class="primary"
                                                    on:click={
                                                        let id = submit_id.clone();
                                                        move |_| create_group(id.clone())
                                                    }
                                                >
                                                    "Create"
                                                </button>
                                            </div>
                                        </Show>

                                        <div class="group-list">
                                            <For
                                                each={
                                                    let groups = community.groups.clone();
                                                    move || groups.clone()
                                                }
                                                key=|g| g.id.clone()
                                                children=move |group| {
                                                    let open = group.clone();
                                                    let joinable = group.clone();
                                                    let is_member = community.is_member;
                                                    view! {
                                                        <div class="group-row">
                                                            <span class="group-name">{group.name.clone()}</span>
                                                            <span class="hint">
                                                                {format!("{} members", group.members_count)}
                                                            </span>
                                                            {if is_member {
                                                                view! {
                                                                    <button
                                                                        type="button"
                                                                        on:click=move |_| open_group(open.clone())
                                                                    >
                                                                        "Open"
                                                                    </button>
                                                                }
                                                                    .into_any()
                                                            } else {
                                                                view! {
                                                                    <button
                                                                        type="button"
                                                                        class="primary"
                                                                        on:click=move |_| join(joinable.clone())
                                                                    >
                                                                        "Join"
                                                                    </button>
                                                                }
                                                                    .into_any()
                                                            }}
                                                        </div>
                                                    }
                                                }
                                            />
                                        </div>
                                    </div>
                                }
                            }
                        />
                    </Show>
                </Show>
            </div>

            {move || {
                selected_group
                    .get()
                    .map(|group| {
                        view! {
                            <aside class="detail-panel">
                                <header class="panel-header">
                                    <h3>{group.name.clone()}</h3>
                                    <button
                                        type="button"
                                        class="icon-button"
                                        on:click=move |_| set_selected_group.set(None)
                                    >
                                        "✕"
                                    </button>
                                </header>

                                <div class="message-scroll">
                                    <Show
                                        when=move || !messages.get().is_empty()
                                        fallback=|| view! { <p class="hint">"No messages yet"</p> }
                                    >
                                        <For
                                            each=move || messages.get()
                                            key=|m| m.id.clone()
                                            children=move |message| {
                                                view! {
                                                    <div class="feed-item">
                                                        <span class="feed-author">
                                                            {message.user_name.clone()}
                                                        </span>
                                                        <p>{message.content.clone()}</p>
                                                        <span class="feed-time">
                                                            {message.created_at.clone()}
                                                        </span>
                                                    </div>
                                                }
                                            }
                                        />
                                    </Show>
                                </div>

                                <form
                                    class="composer"
                                    on:submit=move |ev| {
                                        ev.prevent_default();
                                        post();
                                    }
                                >
                                    <input
                                        placeholder="Message the group..."
                                        prop:value=move || draft.get()
                                        on:input=move |ev| set_draft.set(event_target_value(&ev))
                                    />
                                    <button
                                        type="submit"
                                        class="primary"
                                        disabled=move || posting.get() || draft.get().trim().is_empty()
                                    >
                                        "Send"
                                    </button>
                                </form>
                            </aside>
                        }
                    })
            }}
        </section>
    }
}
