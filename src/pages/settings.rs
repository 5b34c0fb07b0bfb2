//! Settings Page
//!
//! Business profile editor, appearance preferences, and logout.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use crate::api::{self, UpdateProfilePayload};
use crate::components::ThemeToggle;
use crate::context::use_app_context;
use crate::models::{initials, Profile, User};
use crate::store::{store_logout, store_set_user, use_auth_store};

#[component]
pub fn SettingsPage() -> impl IntoView {
    let ctx = use_app_context();
    let auth = use_auth_store();
    let navigate = use_navigate();

    let (profile, set_profile) = signal(None::<Profile>);
    let (editing, set_editing) = signal(false);
    let (saving, set_saving) = signal(false);
    let (edit_name, set_edit_name) = signal(String::new());
    let (edit_phone, set_edit_phone) = signal(String::new());
    let (edit_business, set_edit_business) = signal(String::new());
    let (edit_about, set_edit_about) = signal(String::new());

    Effect::new(move |_| {
        spawn_local(async move {
            match api::profile().await {
                Ok(p) => set_profile.set(Some(p)),
                Err(err) => {
                    web_sys::console::error_1(&format!("load profile: {err}").into());
                }
            }
        });
    });

    let start_edit = move || {
        let Some(p) = profile.get_untracked() else {
            return;
        };
        set_edit_name.set(p.name);
        set_edit_phone.set(p.phone.unwrap_or_default());
        set_edit_business.set(p.business_name.unwrap_or_default());
        set_edit_about.set(p.about.unwrap_or_else(|| "Available".into()));
        set_editing.set(true);
    };

    let save = move || {
        let name = edit_name.get().trim().to_string();
        if name.is_empty() || saving.get() {
            return;
        }
        set_saving.set(true);
        let phone = edit_phone.get().trim().to_string();
        let business = edit_business.get().trim().to_string();
        let about = edit_about.get().trim().to_string();
        spawn_local(async move {
            let payload = UpdateProfilePayload {
                name: Some(name),
                phone: (!phone.is_empty()).then_some(phone),
                business_name: (!business.is_empty()).then_some(business),
                about: (!about.is_empty()).then_some(about),
            };
            match api::update_profile(&payload).await {
                Ok(updated) => {
                    // Keep the sidebar and session snapshot in sync.
                    store_set_user(
                        &auth,
                        Some(User {
                            id: updated.id.clone(),
                            email: updated.email.clone(),
                            name: updated.name.clone(),
                            created_at: updated.created_at.clone(),
                        }),
                    );
                    set_profile.set(Some(updated));
                    set_editing.set(false);
                    ctx.toast_success("Profile updated");
                }
                Err(err) => ctx.toast_error(err.user_message("Failed to update profile")),
            }
            set_saving.set(false);
        });
    };

    let display_name = move || {
        profile
            .get()
            .map(|p| p.name)
            .or_else(|| auth.read().user.as_ref().map(|u| u.name.clone()))
            .unwrap_or_default()
    };
    let display_email = move || {
        profile
            .get()
            .map(|p| p.email)
            .or_else(|| auth.read().user.as_ref().map(|u| u.email.clone()))
            .unwrap_or_default()
    };

    let on_logout = move |_| {
        store_logout(&auth);
        navigate("/login", Default::default());
    };

    view! {
        <section class="page">
            <header class="page-header">
                <h1>"Settings"</h1>
                <p>"Account and preferences"</p>
            </header>

            <div class="panel">
                <h2>"Profile"</h2>
                <div class="profile-row">
                    <span class="avatar avatar-lg">{move || initials(&display_name())}</span>
                    <div>
                        <p class="user-name">{display_name}</p>
                        <p class="user-email">{display_email}</p>
                    </div>
                </div>

                <Show when=move || !editing.get()>
                    {move || {
                        profile
                            .get()
                            .map(|p| {
                                view! {
                                    <dl>
                                        <dt>"Phone"</dt>
                                        <dd>{p.phone.clone().unwrap_or_else(|| "—".into())}</dd>
                                        <dt>"Business"</dt>
                                        <dd>
                                            {p.business_name.clone().unwrap_or_else(|| "—".into())}
                                        </dd>
                                        <dt>"About"</dt>
                                        <dd>{p.about.clone().unwrap_or_else(|| "Available".into())}</dd>
                                    </dl>
                                }
                            })
                    }}
                    <button type="button" on:click=move |_| start_edit()>
                        "Edit Profile"
                    </button>
                </Show>

                <Show when=move || editing.get()>
                    <div class="form-field">
                        <label for="profile-name">"Name"</label>
                        <input
                            id="profile-name"
                            prop:value=move || edit_name.get()
                            on:input=move |ev| set_edit_name.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="form-field">
                        <label for="profile-phone">"Phone"</label>
                        <input
                            id="profile-phone"
                            prop:value=move || edit_phone.get()
                            on:input=move |ev| set_edit_phone.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="form-field">
                        <label for="profile-business">"Business name"</label>
                        <input
                            id="profile-business"
                            prop:value=move || edit_business.get()
                            on:input=move |ev| set_edit_business.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="form-field">
                        <label for="profile-about">"About"</label>
                        <input
                            id="profile-about"
                            prop:value=move || edit_about.get()
                            on:input=move |ev| set_edit_about.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="header-actions">
                        <button type="button" on:click=move |_| set_editing.set(false)>
                            "Cancel"
                        </button>
                        <button
                            type="button"
                            class="primary"
                            disabled=move || saving.get() || edit_name.get().trim().is_empty()
                            on:click=move |_| save()
                        >
                            {move || if saving.get() { "Saving..." } else { "Save" }}
                        </button>
                    </div>
                </Show>
            </div>

            <div class="panel">
                <h2>"Appearance"</h2>
                <div class="setting-row">
                    <span>"Dark mode"</span>
                    <ThemeToggle />
                </div>
            </div>

            <div class="panel">
                <h2>"Session"</h2>
                <button type="button" class="danger" on:click=on_logout>
                    "Logout"
                </button>
            </div>
        </section>
    }
}
