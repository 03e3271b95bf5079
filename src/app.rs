//! Business Directory App
//!
//! Root component: shared services, the page store, the nav bar and the page
//! picked from the location.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::components::AuthNav;
use crate::context::AppContext;
use crate::pages::{IndexPage, NotFoundPage, SubjectView};
use crate::routes::Page;
use crate::store::PageState;

#[component]
pub fn App(page: Page, ctx: AppContext) -> impl IntoView {
    provide_context(ctx);
    provide_context(Store::new(PageState::default()));

    let body = match page {
        Page::Index => view! { <IndexPage /> }.into_any(),
        Page::Subject(subject) => view! { <SubjectView page=subject /> }.into_any(),
        Page::NotFound => view! { <NotFoundPage /> }.into_any(),
    };

    view! {
        <AuthNav />
        {body}
    }
}
