//! Navigation Sidebar
//!
//! Fixed left rail with the product mark, page links, and the user section.

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::components::ThemeToggle;
use crate::models::initials;
use crate::store::{store_logout, use_auth_store};

const NAVIGATION: &[(&str, &str, &str)] = &[
    ("Dashboard", "/dashboard", "📊"),
    ("Contacts", "/contacts", "👥"),
    ("Chat", "/chat", "💬"),
    ("Campaigns", "/campaigns", "📣"),
    ("Templates", "/templates", "📄"),
    ("Channels", "/channels", "📢"),
    ("Communities", "/communities", "🏘"),
    ("Status", "/status", "◯"),
    ("Settings", "/settings", "⚙"),
];

#[component]
pub fn Sidebar() -> impl IntoView {
    let auth = use_auth_store();
    let navigate = use_navigate();

    let user_name = move || auth.read().user.as_ref().map(|u| u.name.clone()).unwrap_or_default();
    let user_email = move || auth.read().user.as_ref().map(|u| u.email.clone()).unwrap_or_default();

    let on_logout = move |_| {
        store_logout(&auth);
        navigate("/login", Default::default());
    };

    view! {
        <aside class="sidebar">
            <div class="sidebar-logo">
                <span class="logo-mark">"W"</span>
                <div>
                    <h1>"WhatsHub"</h1>
                    <p>"Enterprise"</p>
                </div>
            </div>

            <nav class="sidebar-nav">
                {NAVIGATION
                    .iter()
                    .map(|(name, href, icon)| {
                        view! {
                            <A href=*href attr:class="nav-link">
                                <span class="nav-icon">{*icon}</span>
                                {*name}
                            </A>
                        }
                    })
                    .collect_view()}
            </nav>

            <div class="sidebar-user">
                <div class="user-avatar">{move || initials(&user_name())}</div>
                <div class="user-meta">
                    <p class="user-name">{user_name}</p>
                    <p class="user-email">{user_email}</p>
                </div>
                <ThemeToggle />
                <button class="logout-btn" on:click=on_logout>
                    "Logout"
                </button>
            </div>
        </aside>
    }
}
