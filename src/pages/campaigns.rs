//! Campaigns Page
//!
//! Campaign cards with delivery/read progress, a detail panel with live
//! stats and per-contact delivery status, plus the launch wizard.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::CampaignWizard;
use crate::models::{progress_pct, Campaign, CampaignContact, CampaignStats};
use crate::remote::{reconcile_selection, FetchSlot, RemoteCollection};

#[component]
pub fn CampaignsPage() -> impl IntoView {
    let campaigns = RemoteCollection::<Campaign>::new();
    let wizard_open = RwSignal::new(false);

    let (selected_id, set_selected_id) = signal(None::<String>);
    let (stats, set_stats) = signal(None::<CampaignStats>);
    let (recipients, set_recipients) = signal(Vec::<CampaignContact>::new());
    let slot = FetchSlot::new();

    let refetch = move || {
        spawn_local(async move {
            campaigns.load(api::campaigns()).await;
            let items = campaigns.items.get_untracked();
            set_selected_id.update(|sel| {
                *sel = reconcile_selection(sel.take(), &items, |c: &Campaign| &c.id);
            });
        });
    };

    Effect::new(move |_| refetch());

    let load_detail = move |campaign_id: String| {
        let token = slot.begin();
        set_stats.set(None);
        set_recipients.set(Vec::new());
        spawn_local(async move {
            let fetched_stats = api::campaign_stats(&campaign_id).await;
            let fetched_contacts = api::campaign_contacts(&campaign_id).await;
            if !slot.is_current(token) {
                return;
            }
            match fetched_stats {
                Ok(s) => set_stats.set(Some(s)),
                Err(err) => {
                    web_sys::console::error_1(&format!("load campaign stats: {err}").into());
                }
            }
            match fetched_contacts {
                Ok(list) => set_recipients.set(list),
                Err(err) => {
                    web_sys::console::error_1(&format!("load campaign contacts: {err}").into());
                }
            }
        });
    };

    let select = move |campaign_id: String| {
        set_selected_id.set(Some(campaign_id.clone()));
        load_detail(campaign_id);
    };

    let selected_campaign = move || {
        selected_id
            .get()
            .and_then(|id| campaigns.items.get().into_iter().find(|c| c.id == id))
    };

    let sorted = move || {
        let mut list = campaigns.items.get();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        list
    };

    view! {
        <section class="page page-with-panel">
            <div class="page-main">
                <header class="page-header">
                    <div>
                        <h1>"Campaigns"</h1>
                        <p>"Bulk messaging to your audience"</p>
                    </div>
                    <button type="button" class="primary" on:click=move |_| wizard_open.set(true)>
                        "New Campaign"
                    </button>
                </header>

                <Show
                    when=move || !campaigns.loading.get()
                    fallback=|| view! { <p class="hint">"Loading campaigns..."</p> }
                >
                    <Show
                        when=move || !sorted().is_empty()
                        fallback=move || {
                            view! {
                                <div class="empty-state">
                                    <p>"No campaigns yet"</p>
                                    <button
                                        type="button"
                                        class="primary"
                                        on:click=move |_| wizard_open.set(true)
                                    >
                                        "Launch your first campaign"
                                    </button>
                                </div>
                            }
                        }
                    >
                        <div class="card-grid">
                            <For
                                each=sorted
                                key=|c| c.id.clone()
                                children=move |campaign| {
                                    let id = campaign.id.clone();
                                    let delivered_pct =
                                        progress_pct(campaign.delivered_count, campaign.total_contacts);
                                    let read_pct =
                                        progress_pct(campaign.read_count, campaign.delivered_count);
                                    view! {
                                        <div
                                            class="campaign-card"
                                            on:click=move |_| select(id.clone())
                                        >
                                            <header>
                                                <h3>{campaign.name.clone()}</h3>
                                                <span class=format!("status-badge status-{}", campaign.status)>
                                                    {campaign.status.clone()}
                                                </span>
                                            </header>

                                            <p class="campaign-total">
                                                {format!("{} contacts", campaign.total_contacts)}
                                            </p>

                                            <div class="metric">
                                                <span>"Delivered"</span>
                                                <div class="progress-track">
                                                    <div
                                                        class="progress-fill"
                                                        style=format!("width: {delivered_pct}%")
                                                    ></div>
                                                </div>
                                                <span>{format!("{delivered_pct}%")}</span>
                                            </div>

                                            <div class="metric">
                                                <span>"Read"</span>
                                                <div class="progress-track">
                                                    <div
                                                        class="progress-fill progress-read"
                                                        style=format!("width: {read_pct}%")
                                                    ></div>
                                                </div>
                                                <span>{format!("{read_pct}%")}</span>
                                            </div>
                                        </div>
                                    }
                                }
                            />
                        </div>
                    </Show>
                </Show>
            </div>

            {move || {
                selected_campaign()
                    .map(|campaign| {
                        view! {
                            <aside class="detail-panel">
                                <header class="panel-header">
                                    <h3>{campaign.name.clone()}</h3>
                                    <button
                                        type="button"
                                        class="icon-button"
                                        on:click=move |_| set_selected_id.set(None)
                                    >
                                        "✕"
                                    </button>
                                </header>

                                {move || {
                                    stats
                                        .get()
                                        .map(|s| {
                                            view! {
                                                <div class="stat-grid stat-grid-compact">
                                                    <div class="stat-card">
                                                        <span class="stat-label">"Sent"</span>
                                                        <span class="stat-value">{s.sent_count}</span>
                                                    </div>
                                                    <div class="stat-card">
                                                        <span class="stat-label">"Delivered"</span>
                                                        <span class="stat-value">{s.delivered_count}</span>
                                                    </div>
                                                    <div class="stat-card">
                                                        <span class="stat-label">"Read"</span>
                                                        <span class="stat-value">{s.read_count}</span>
                                                    </div>
                                                    <div class="stat-card">
                                                        <span class="stat-label">"Failed"</span>
                                                        <span class="stat-value">{s.failed_count}</span>
                                                    </div>
                                                </div>
                                            }
                                        })
                                }}

                                <h4>"Recipients"</h4>
                                <div class="panel-list">
                                    <Show
                                        when=move || !recipients.get().is_empty()
                                        fallback=|| view! { <p class="hint">"No recipients yet"</p> }
                                    >
                                        <For
                                            each=move || recipients.get()
                                            key=|r| r.contact_id.clone()
                                            children=move |recipient| {
                                                view! {
                                                    <div class="recipient-row">
                                                        <span class="contact-name">
                                                            {recipient.name.clone()}
                                                        </span>
                                                        <span class="hint">{recipient.phone.clone()}</span>
                                                        <span class=format!(
                                                            "status-badge status-{}",
                                                            recipient.message_status,
                                                        )>
                                                            {recipient.message_status.clone()}
                                                        </span>
                                                    </div>
                                                }
                                            }
                                        />
                                    </Show>
                                </div>
                            </aside>
                        }
                    })
            }}

            <CampaignWizard open=wizard_open on_success=move |_| refetch() />
        </section>
    }
}
