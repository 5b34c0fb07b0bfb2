//! Theme Toggle Component
//!
//! Light/dark switch. The choice is persisted and applied as a `dark` class
//! on the document element.

use gloo_storage::{LocalStorage, Storage};
use leptos::prelude::*;

const THEME_KEY: &str = "theme";

fn stored_theme() -> String {
    LocalStorage::raw()
        .get_item(THEME_KEY)
        .ok()
        .flatten()
        .unwrap_or_else(|| "light".to_string())
}

fn apply_theme(theme: &str) {
    if let Some(root) = document().document_element() {
        root.set_class_name(if theme == "dark" { "dark" } else { "" });
    }
}

#[component]
pub fn ThemeToggle() -> impl IntoView {
    let (theme, set_theme) = signal(stored_theme());

    Effect::new(move |_| {
        apply_theme(&theme.get());
    });

    let toggle = move |_| {
        let next = if theme.get() == "dark" { "light" } else { "dark" };
        let _ = LocalStorage::raw().set_item(THEME_KEY, next);
        set_theme.set(next.to_string());
    };

    view! {
        <button class="theme-toggle" on:click=toggle aria-label="Toggle theme">
            {move || if theme.get() == "dark" { "🌙" } else { "☀️" }}
        </button>
    }
}
