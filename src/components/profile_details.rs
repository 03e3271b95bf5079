//! Profile Details Component
//!
//! Read-only view of a business or user: header, text sections and, for
//! businesses with a public calendar, the embedded calendar.

use leptos::prelude::*;

use crate::profile_view::ProfileView;

#[component]
pub fn ProfileDetails(view: ProfileView) -> impl IntoView {
    let sections = view
        .sections
        .into_iter()
        .map(|section| {
            let id = format!("section-{}", section.title.to_lowercase().replace(' ', "-"));
            view! {
                <div class="profile-section" id=id>
                    <h4>{section.title}</h4>
                    <p>{section.text}</p>
                </div>
            }
        })
        .collect_view();

    let calendar = view.calendar_url.map(|src| {
        view! {
            <div id="business-calendar" class="business-calendar">
                <iframe src=src height="500px" width="700px"></iframe>
            </div>
        }
    });

    view! {
        <div id="view-section" class="profile-view">
            <h1 id="profile-name">{view.name}</h1>
            <p id="profile-location" class="text-muted">{view.location}</p>
            {sections}
            {calendar}
        </div>
    }
}
