mod api;
mod app;
mod components;
mod context;
mod models;
mod pages;
mod remote;
mod store;
mod template;
mod wizard;

use app::App;

fn main() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(App);
}
