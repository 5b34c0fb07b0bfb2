//! Application Shell
//!
//! Router, route guard, and the sidebar layout around authenticated pages.

use leptos::prelude::*;
use leptos_router::{
    components::{Route, Router, Routes},
    hooks::use_navigate,
    path,
};
use reactive_stores::Store;

use crate::components::{Sidebar, ToastHost};
use crate::context::AppContext;
use crate::pages::{
    CampaignsPage, ChannelsPage, ChatPage, CommunitiesPage, ContactsPage, DashboardPage, LoginPage,
    SettingsPage, StatusPage, TemplatesPage,
};
use crate::store::{self, AuthStore};

#[component]
pub fn App() -> impl IntoView {
    provide_context::<AuthStore>(Store::new(store::load_session()));
    provide_context(AppContext::new());

    view! {
        <Router>
            <ToastHost />
            <Routes fallback=|| view! { <NotFound /> }>
                <Route path=path!("/") view=Home />
                <Route path=path!("/login") view=LoginPage />
                <Route path=path!("/dashboard") view=|| protected(DashboardPage) />
                <Route path=path!("/contacts") view=|| protected(ContactsPage) />
                <Route path=path!("/chat") view=|| protected(ChatPage) />
                <Route path=path!("/campaigns") view=|| protected(CampaignsPage) />
                <Route path=path!("/templates") view=|| protected(TemplatesPage) />
                <Route path=path!("/channels") view=|| protected(ChannelsPage) />
                <Route path=path!("/communities") view=|| protected(CommunitiesPage) />
                <Route path=path!("/status") view=|| protected(StatusPage) />
                <Route path=path!("/settings") view=|| protected(SettingsPage) />
            </Routes>
        </Router>
    }
}

fn protected<F, V>(page: F) -> impl IntoView
where
    F: Fn() -> V + Send + Sync + 'static,
    V: IntoView + 'static,
{
    view! {
        <RequireAuth>
            <div class="app-shell">
                <Sidebar />
                <main class="app-main">{page()}</main>
            </div>
        </RequireAuth>
    }
}

/// Route guard: anonymous visitors are sent to the login page.
#[component]
fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let auth = store::use_auth_store();
    let navigate = use_navigate();

    Effect::new(move |_| {
        if !auth.read().is_authenticated() {
            navigate("/login", Default::default());
        }
    });

    view! {
        <Show when=move || auth.read().is_authenticated()>
            {children()}
        </Show>
    }
}

/// `/` routes to the dashboard for signed-in users, login otherwise.
#[component]
fn Home() -> impl IntoView {
    let auth = store::use_auth_store();
    let navigate = use_navigate();

    Effect::new(move |_| {
        if auth.read().is_authenticated() {
            navigate("/dashboard", Default::default());
        } else {
            navigate("/login", Default::default());
        }
    });

    view! { <div class="redirecting"></div> }
}

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="not-found">
            <h1>"404"</h1>
            <p>"Page not found"</p>
            <a href="/">"Go home"</a>
        </div>
    }
}
