//! Index Page
//!
//! Directory of businesses with a search box and the viewport map.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::{BusinessCard, InlineError, MapView};
use crate::context::use_app_context;
use crate::error::FailurePolicy;
use crate::models::Business;

#[component]
pub fn IndexPage() -> impl IntoView {
    let ctx = use_app_context();

    let businesses = RwSignal::new(Vec::<Business>::new());
    // Only search hits move the map; the full listing leaves it where it is
    let search_hits = RwSignal::new(Vec::<Business>::new());
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal::<Option<String>>(None);
    let (term, set_term) = signal(String::new());
    // Last query sent; responses for older queries are dropped
    let (query, set_query) = signal(String::new());

    let api = ctx.api.clone();
    Effect::new(move |_| {
        let q = query.get();
        let api = api.clone();
        set_loading.set(true);
        spawn_local(async move {
            let result = if q.is_empty() {
                api.list_businesses().await
            } else {
                api.search(&q).await
            };
            if query.get_untracked() != q {
                return;
            }
            match result {
                Ok(list) => {
                    log::debug!("[INDEX] {} business(es) for {:?}", list.len(), q);
                    search_hits.set(if q.is_empty() { Vec::new() } else { list.clone() });
                    businesses.set(list);
                    set_error.set(None);
                }
                Err(e) => {
                    log::error!("[INDEX] listing failed: {}", e);
                    set_error.set(Some(FailurePolicy::widget_message("businesses", &e)));
                }
            }
            set_loading.set(false);
        });
    });

    let on_search = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_query.set(term.get_untracked().trim().to_string());
    };

    view! {
        <main class="container index-page">
            <form class="search-form form-inline" on:submit=on_search>
                <input
                    type="search"
                    class="form-control"
                    name="searchItem"
                    placeholder="Search businesses"
                    prop:value=move || term.get()
                    on:input=move |ev| set_term.set(event_target_value(&ev))
                />
                <button type="submit" class="btn btn-primary">"Search"</button>
            </form>
            <InlineError message=error />
            <p class="loading" hidden=move || !loading.get()>"Loading..."</p>
            <p
                class="empty"
                hidden=move || loading.get() || !businesses.with(|b| b.is_empty())
            >
                "No businesses found."
            </p>
            <div id="businesses" class="business-list">
                <For
                    each=move || businesses.get()
                    key=|b| b.id.clone()
                    children=|business| view! { <BusinessCard business=business /> }
                />
            </div>
            <MapView focus=search_hits />
        </main>
    }
}
