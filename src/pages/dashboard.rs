//! Dashboard Page
//!
//! Overview cards aggregated from the campaigns and contacts collections,
//! plus a recent-campaigns list.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::models::{progress_pct, Campaign, Contact};
use crate::remote::RemoteCollection;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let campaigns = RemoteCollection::<Campaign>::new();
    let contacts = RemoteCollection::<Contact>::new();

    Effect::new(move |_| {
        spawn_local(async move { campaigns.load(api::campaigns()).await });
        spawn_local(async move { contacts.load(api::contacts("", 500)).await });
    });

    let total_contacts = move || contacts.items.get().len();
    let active_campaigns = move || {
        campaigns
            .items
            .get()
            .iter()
            .filter(|c| c.status == "active")
            .count()
    };
    let messages_delivered = move || {
        campaigns
            .items
            .get()
            .iter()
            .map(|c| c.delivered_count)
            .sum::<u32>()
    };
    let messages_read = move || {
        campaigns
            .items
            .get()
            .iter()
            .map(|c| c.read_count)
            .sum::<u32>()
    };

    let recent = move || {
        let mut list = campaigns.items.get();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        list.truncate(5);
        list
    };

    view! {
        <section class="page">
            <header class="page-header">
                <h1>"Dashboard"</h1>
                <p>"Your messaging at a glance"</p>
            </header>

            <div class="stat-grid">
                <div class="stat-card">
                    <span class="stat-label">"Total Contacts"</span>
                    <span class="stat-value">{total_contacts}</span>
                </div>
                <div class="stat-card">
                    <span class="stat-label">"Active Campaigns"</span>
                    <span class="stat-value">{active_campaigns}</span>
                </div>
                <div class="stat-card">
                    <span class="stat-label">"Messages Delivered"</span>
                    <span class="stat-value">{messages_delivered}</span>
                </div>
                <div class="stat-card">
                    <span class="stat-label">"Messages Read"</span>
                    <span class="stat-value">{messages_read}</span>
                </div>
            </div>

            <div class="panel">
                <h2>"Recent Campaigns"</h2>
                <Show
                    when=move || !campaigns.loading.get()
                    fallback=|| view! { <p class="hint">"Loading..."</p> }
                >
                    <Show
                        when=move || !recent().is_empty()
                        fallback=|| view! { <p class="hint">"No campaigns yet"</p> }
                    >
                        <For
                            each=recent
                            key=|c| c.id.clone()
                            children=move |campaign| {
                                let pct = progress_pct(campaign.delivered_count, campaign.total_contacts);
                                view! {
                                    <div class="campaign-row">
                                        <div class="campaign-meta">
                                            <span class="campaign-name">{campaign.name.clone()}</span>
                                            <span class=format!("status-badge status-{}", campaign.status)>
                                                {campaign.status.clone()}
                                            </span>
                                        </div>
                                        <div class="progress-track">
                                            <div
                                                class="progress-fill"
                                                style=format!("width: {pct}%")
                                            ></div>
                                        </div>
                                        <span class="campaign-counts">
                                            {format!(
                                                "{} / {} delivered",
                                                campaign.delivered_count,
                                                campaign.total_contacts,
                                            )}
                                        </span>
                                    </div>
                                }
                            }
                        />
                    </Show>
                </Show>
            </div>
        </section>
    }
}
