//! Status Page
//!
//! Status updates from contacts, split into recent and viewed. The backend
//! has no status feed yet, so the page keeps the fetch-render lifecycle and
//! shows the empty states.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::models::Contact;
use crate::remote::RemoteCollection;

#[component]
pub fn StatusPage() -> impl IntoView {
    let contacts = RemoteCollection::<Contact>::new();

    Effect::new(move |_| {
        spawn_local(async move { contacts.load(api::contacts("", 500)).await });
    });

    view! {
        <section class="page">
            <header class="page-header">
                <h1>"Status"</h1>
                <p>"24-hour updates from your contacts"</p>
            </header>

            <Show
                when=move || !contacts.loading.get()
                fallback=|| view! { <p class="hint">"Loading..."</p> }
            >
                <div class="panel">
                    <h2>"Recent updates"</h2>
                    <p class="hint">"No recent updates"</p>
                </div>

                <div class="panel">
                    <h2>"Viewed updates"</h2>
                    <p class="hint">"No viewed updates"</p>
                </div>

                <p class="hint">
                    {move || {
                        format!(
                            "{} contacts can share status updates with you",
                            contacts.items.get().len(),
                        )
                    }}
                </p>
            </Show>
        </section>
    }
}
