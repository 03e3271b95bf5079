//! Business Card Component
//!
//! One entry in the index listing: linked name, bio and a "Show More"
//! control that lifts the card's height cap.

use leptos::prelude::*;

use crate::api::encode;
use crate::models::Business;

#[component]
pub fn BusinessCard(business: Business) -> impl IntoView {
    let (expanded, set_expanded) = signal(false);
    let href = format!("/business.html?id={}", encode(&business.id));

    view! {
        <div
            class="business-card"
            class:expanded=move || expanded.get()
            id=format!("business-{}", business.id)
        >
            <a href=href>
                <h2>{business.name}</h2>
            </a>
            <p class="business-info">{business.bio}</p>
            <p class="show-more" hidden=move || expanded.get() on:click=move |_| set_expanded.set(true)>
                <span>"Show More"</span>
            </p>
        </div>
    }
}
