//! Business Directory Frontend Entry Point

mod api;
mod app;
mod comments;
mod components;
mod config;
mod context;
mod error;
mod follow;
mod geo;
mod maps;
mod models;
mod nav;
mod pages;
mod profile_view;
mod routes;
mod store;

use app::App;
use config::AppConfig;
use context::AppContext;
use leptos::prelude::*;
use routes::Page;

fn main() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) { log::Level::Debug } else { log::Level::Info };
    if console_log::init_with_level(level).is_err() {
        web_sys::console::warn_1(&"[MAIN] logger already initialised".into());
    }

    let config = AppConfig::load();
    let page = web_sys::window()
        .map(|w| {
            let location = w.location();
            let pathname = location.pathname().unwrap_or_default();
            let search = location.search().unwrap_or_default();
            Page::resolve(&pathname, &search)
        })
        .unwrap_or(Page::NotFound);
    log::info!("[MAIN] mounting {:?}", page);

    let ctx = AppContext::browser(config);
    mount_to_body(move || view! { <App page=page ctx=ctx /> });
}
