//! Auth Nav Component
//!
//! Login/logout link and, for known users, a link to their own page. Also
//! publishes the login state to the page store for other widgets.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::InlineError;
use crate::context::use_app_context;
use crate::nav::NavLinks;
use crate::store::{auth_error, auth_state, store_set_auth, store_set_auth_error, use_page_store};

#[component]
pub fn AuthNav() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_page_store();

    // One check per page load
    Effect::new(move |_| {
        let api = ctx.api.clone();
        let auth_path = ctx.config.auth_path.clone();
        spawn_local(async move {
            match api.auth_state(&auth_path).await {
                Ok(auth) => {
                    log::debug!("[NAV] logged in: {}", auth.is_logged_in);
                    store_set_auth(&store, auth);
                }
                Err(e) => {
                    log::error!("[NAV] login check failed: {}", e);
                    store_set_auth_error(&store, "Could not check login status.".to_string());
                }
            }
        });
    });

    let links = move || auth_state(&store).map(|auth| NavLinks::from_auth(&auth));

    view! {
        <nav class="navbar">
            <a class="navbar-brand" href="/index.html">"Home"</a>
            <ul class="navbar-nav">
                {move || links().map(|links| view! {
                    {links.profile.map(|profile| view! {
                        <li class="nav-item" id="profile-button">
                            <a class="nav-link" href=profile.href>{profile.label}</a>
                        </li>
                    })}
                    <li class="nav-item" id="auth-button">
                        <a class="nav-link" href=links.auth.href>{links.auth.label}</a>
                    </li>
                })}
            </ul>
            <InlineError message=Signal::derive(move || auth_error(&store)) />
        </nav>
    }
}
