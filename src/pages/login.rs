//! Login / Register Page

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use crate::api::{self, LoginPayload, RegisterPayload};
use crate::context::use_app_context;
use crate::store::{store_set_token, store_set_user, use_auth_store};

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth_store();
    let ctx = use_app_context();
    let navigate = use_navigate();

    let (is_register, set_is_register) = signal(false);
    let (name, set_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (submitting, set_submitting) = signal(false);

    // Already signed in: nothing to do here.
    {
        let navigate = navigate.clone();
        Effect::new(move |_| {
            if auth.read().is_authenticated() {
                navigate("/dashboard", Default::default());
            }
        });
    }

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if submitting.get() {
            return;
        }
        set_submitting.set(true);

        let navigate = navigate.clone();
        spawn_local(async move {
            if is_register.get_untracked() {
                let result = api::register(&RegisterPayload {
                    email: &email.get_untracked(),
                    name: &name.get_untracked(),
                    password: &password.get_untracked(),
                })
                .await;
                match result {
                    Ok(_) => {
                        ctx.toast_success("Account created! Please sign in.");
                        set_is_register.set(false);
                        set_password.set(String::new());
                    }
                    Err(err) => ctx.toast_error(err.user_message("Registration failed")),
                }
            } else {
                let result = api::login(&LoginPayload {
                    email: &email.get_untracked(),
                    password: &password.get_untracked(),
                })
                .await;
                match result {
                    Ok(token) => {
                        store_set_token(&auth, Some(token.access_token));
                        match api::current_user().await {
                            Ok(user) => {
                                store_set_user(&auth, Some(user));
                                navigate("/dashboard", Default::default());
                            }
                            Err(err) => {
                                store_set_token(&auth, None);
                                ctx.toast_error(err.user_message("Failed to load profile"));
                            }
                        }
                    }
                    Err(err) => ctx.toast_error(err.user_message("Invalid email or password")),
                }
            }
            set_submitting.set(false);
        });
    };

    view! {
        <div class="login-screen">
            <div class="login-card">
                <div class="login-brand">
                    <span class="logo-mark">"W"</span>
                    <h1>"WhatsHub Enterprise"</h1>
                    <p>"Business messaging dashboard"</p>
                </div>

                <form on:submit=submit>
                    <Show when=move || is_register.get()>
                        <div class="form-field">
                            <label for="name">"Name"</label>
                            <input
                                id="name"
                                required
                                placeholder="Your name"
                                prop:value=move || name.get()
                                on:input=move |ev| set_name.set(event_target_value(&ev))
                            />
                        </div>
                    </Show>

                    <div class="form-field">
                        <label for="email">"Email"</label>
                        <input
                            id="email"
                            type="email"
                            required
                            placeholder="you@company.com"
                            prop:value=move || email.get()
                            on:input=move |ev| set_email.set(event_target_value(&ev))
                        />
                    </div>

                    <div class="form-field">
                        <label for="password">"Password"</label>
                        <input
                            id="password"
                            type="password"
                            required
                            placeholder="••••••••"
                            prop:value=move || password.get()
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                        />
                    </div>

                    <button type="submit" class="primary full-width" disabled=move || submitting.get()>
                        {move || match (submitting.get(), is_register.get()) {
                            (true, _) => "Please wait...",
                            (false, true) => "Create Account",
                            (false, false) => "Sign In",
                        }}
                    </button>
                </form>

                <button
                    type="button"
                    class="link-button"
                    on:click=move |_| set_is_register.update(|v| *v = !*v)
                >
                    {move || {
                        if is_register.get() {
                            "Already have an account? Sign in"
                        } else {
                            "Don't have an account? Register"
                        }
                    }}
                </button>
            </div>
        </div>
    }
}
