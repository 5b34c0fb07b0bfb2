//! Channels Page
//!
//! Broadcast channels: discover and follow, plus a one-way message feed
//! that only the channel creator can post to.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, CreateChannelPayload, PostMessagePayload};
use crate::context::use_app_context;
use crate::models::{initials, Channel, ChannelMessage};
use crate::remote::{reconcile_selection, FetchSlot, RemoteCollection};

#[derive(Clone, Copy, PartialEq)]
enum ChannelTab {
    Discover,
    Following,
}

#[component]
pub fn ChannelsPage() -> impl IntoView {
    let ctx = use_app_context();

    let discover = RemoteCollection::<Channel>::new();
    let following = RemoteCollection::<Channel>::new();
    let (tab, set_tab) = signal(ChannelTab::Discover);
    let (query, set_query) = signal(String::new());
    let (selected_id, set_selected_id) = signal(None::<String>);

    let (messages, set_messages) = signal(Vec::<ChannelMessage>::new());
    let (draft, set_draft) = signal(String::new());
    let (posting, set_posting) = signal(false);
    let slot = FetchSlot::new();

    let (creating, set_creating) = signal(false);
    let (new_name, set_new_name) = signal(String::new());
    let (new_description, set_new_description) = signal(String::new());
    let (saving, set_saving) = signal(false);

    // Follow state lives in both lists, so mutations refetch both.
    let refetch = move || {
        spawn_local(async move {
            let search = query.get_untracked();
            discover.load(api::channels(&search)).await;
            following.load(api::following_channels()).await;
            let mut all = discover.items.get_untracked();
            all.extend(following.items.get_untracked());
            set_selected_id.update(|sel| {
                *sel = reconcile_selection(sel.take(), &all, |c: &Channel| &c.id);
            });
        });
    };

    Effect::new(move |_| refetch());

    let load_messages = move |channel_id: String| {
        let token = slot.begin();
        spawn_local(async move {
            let result = api::channel_messages(&channel_id).await;
            if !slot.is_current(token) {
                return;
            }
            match result {
                Ok(list) => set_messages.set(list),
                Err(err) => {
                    web_sys::console::error_1(&format!("load channel messages: {err}").into());
                    set_messages.set(Vec::new());
                }
            }
        });
    };

    let select = move |channel: &Channel| {
        set_selected_id.set(Some(channel.id.clone()));
        load_messages(channel.id.clone());
    };

    let set_follow = move |channel_id: String, follow: bool| {
        spawn_local(async move {
            let result = if follow {
                api::follow_channel(&channel_id).await
            } else {
                api::unfollow_channel(&channel_id).await
            };
            match result {
                Ok(()) => refetch(),
                Err(err) => ctx.toast_error(err.user_message("Failed to update channel")),
            }
        });
    };

    let create = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if saving.get() {
            return;
        }
        set_saving.set(true);
        let payload = CreateChannelPayload {
            name: new_name.get().trim().to_string(),
            description: new_description.get().trim().to_string(),
        };
        spawn_local(async move {
            match api::create_channel(&payload).await {
                Ok(_) => {
                    ctx.toast_success("Channel created");
                    set_new_name.set(String::new());
                    set_new_description.set(String::new());
                    set_creating.set(false);
                    refetch();
                }
                Err(err) => ctx.toast_error(err.user_message("Failed to create channel")),
            }
            set_saving.set(false);
        });
    };

    let selected_channel = move || {
        let id = selected_id.get()?;
        following
            .items
            .get()
            .into_iter()
            .chain(discover.items.get())
            .find(|c| c.id == id)
    };

    let post = move || {
        let content = draft.get().trim().to_string();
        let Some(channel) = selected_channel() else {
            return;
        };
        if content.is_empty() || posting.get() {
            return;
        }
        set_posting.set(true);
        spawn_local(async move {
            let result =
                api::post_channel_message(&channel.id, &PostMessagePayload { content: &content })
                    .await;
            match result {
                Ok(_) => {
                    set_draft.set(String::new());
                    load_messages(channel.id.clone());
                }
                Err(err) => ctx.toast_error(err.user_message("Failed to post update")),
            }
            set_posting.set(false);
        });
    };

    let visible = move || match tab.get() {
        ChannelTab::Discover => discover.items.get(),
        ChannelTab::Following => following.items.get(),
    };

    view! {
        <section class="page page-with-panel">
            <div class="page-main">
                <header class="page-header">
                    <div>
                        <h1>"Channels"</h1>
                        <p>"Broadcast updates to followers"</p>
                    </div>
                    <button type="button" class="primary" on:click=move |_| set_creating.set(true)>
                        "Create Channel"
                    </button>
                </header>

                <Show when=move || creating.get()>
                    <form class="panel" on:submit=create>
                        <div class="form-field">
                            <label for="ch-name">"Name *"</label>
                            <input
                                id="ch-name"
                                required
                                placeholder="Product updates"
                                prop:value=move || new_name.get()
                                on:input=move |ev| set_new_name.set(event_target_value(&ev))
                            />
                        </div>
                        <div class="form-field">
                            <label for="ch-desc">"Description"</label>
                            <input
                                id="ch-desc"
                                placeholder="What is this channel about?"
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

                <div class="tab-row">
                    <button
                        type="button"
                        class:active=move || tab.get() == ChannelTab::Discover
                        on:click=move |_| set_tab.set(ChannelTab::Discover)
                    >
                        "Discover"
                    </button>
                    <button
                        type="button"
                        class:active=move || tab.get() == ChannelTab::Following
                        on:click=move |_| set_tab.set(ChannelTab::Following)
                    >
                        {move || format!("Following ({})", following.items.get().len())}
                    </button>
                </div>

                <Show when=move || tab.get() == ChannelTab::Discover>
                    <input
                        class="search-input"
                        placeholder="Search channels..."
                        prop:value=move || query.get()
                        on:input=move |ev| {
                            set_query.set(event_target_value(&ev));
                            refetch();
                        }
                    />
                </Show>

                <Show
                    when=move || !discover.loading.get()
                    fallback=|| view! { <p class="hint">"Loading channels..."</p> }
                >
                    <Show
                        when=move || !visible().is_empty()
                        fallback=|| view! { <p class="hint">"No channels found"</p> }
                    >
                        <For
                            each=visible
                            key=|c| (c.id.clone(), c.is_following)
                            children=move |channel| {
                                let row = channel.clone();
                                let follow_id = channel.id.clone();
                                let is_following = channel.is_following;
                                view! {
                                    <div class="channel-row" on:click=move |_| select(&row)>
                                        <span class="avatar">{initials(&channel.name)}</span>
                                        <div class="channel-meta">
                                            <span class="channel-name">
                                                {channel.name.clone()}
                                                <Show when={
                                                    let verified = channel.verified;
                                                    move || verified
                                                }>
                                                    <span class="verified-mark">"✓"</span>
                                                </Show>
                                            </span>
                                            <span class="channel-followers">
                                                {format!("{} followers", channel.followers_count)}
                                            </span>
                                        </div>
                                        <button
                                            type="button"
                                            class:primary=move || !is_following
                                            on:click=move |ev| {
                                                ev.stop_propagation();
                                                set_follow(follow_id.clone(), !is_following);
                                            }
                                        >
                                            {if is_following { "Unfollow" } else { "Follow" }}
                                        </button>
                                    </div>
                                }
                            }
                        />
                    </Show>
                </Show>
            </div>

            {move || {
                selected_channel()
                    .map(|channel| {
                        let is_creator = channel.is_creator;
                        view! {
                            <aside class="detail-panel">
                                <header class="panel-header">
                                    <h3>{channel.name.clone()}</h3>
                                    <button
                                        type="button"
                                        class="icon-button"
                                        on:click=move |_| set_selected_id.set(None)
                                    >
                                        "✕"
                                    </button>
                                </header>
                                <p class="hint">{channel.description.clone()}</p>

                                <div class="message-scroll">
                                    <Show
                                        when=move || !messages.get().is_empty()
                                        fallback=|| view! { <p class="hint">"No updates yet"</p> }
                                    >
                                        <For
                                            each=move || messages.get()
                                            key=|m| m.id.clone()
                                            children=move |message| {
                                                view! {
                                                    <div class="feed-item">
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

                                <Show when=move || is_creator>
                                    <form
                                        class="composer"
                                        on:submit=move |ev| {
                                            ev.prevent_default();
                                            post();
                                        }
                                    >
                                        <input
                                            placeholder="Post an update..."
                                            prop:value=move || draft.get()
                                            on:input=move |ev| set_draft.set(event_target_value(&ev))
                                        />
                                        <button
                                            type="submit"
                                            class="primary"
                                            disabled=move || {
                                                posting.get() || draft.get().trim().is_empty()
                                            }
                                        >
                                            "Post"
                                        </button>
                                    </form>
                                </Show>
                            </aside>
                        }
                    })
            }}
        </section>
    }
}
