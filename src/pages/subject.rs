//! Business / Profile Page
//!
//! One component for both: loads the subject, renders view or edit mode, the
//! follow button for other people's businesses, the mini map and comments.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::{
    CommentSection, FollowButton, InlineError, ProfileDetails, ProfileEditor, ProfileMap,
};
use crate::context::use_app_context;
use crate::error::{FailureAction, FailurePolicy, FailureSite};
use crate::models::Subject;
use crate::profile_view::{EditMode, ProfileView};
use crate::routes::{go_to, SubjectPage};
use crate::store::{use_page_store, viewer_logged_in};

#[component]
pub fn SubjectView(page: SubjectPage) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_page_store();

    let profile = RwSignal::new(None::<ProfileView>);
    let (error, set_error) = signal::<Option<String>>(None);
    let mode = RwSignal::new(EditMode::default());

    let subject = page.subject.clone();
    Effect::new(move |_| {
        let api = ctx.api.clone();
        let config = ctx.config.clone();
        let subject = subject.clone();
        spawn_local(async move {
            let (loaded, site) = match &subject {
                Subject::Business(id) => (
                    api.business(id).await.map(|b| ProfileView::from_business(&b, &config)),
                    FailureSite::BusinessPage(id.clone()),
                ),
                Subject::User(id) => (
                    api.profile(id).await.map(|p| ProfileView::from_user(&p)),
                    FailureSite::ProfilePage(id.clone()),
                ),
            };
            match loaded {
                Ok(view) => profile.set(Some(view)),
                Err(e) => {
                    log::error!("[PAGE] loading {:?} failed: {}", subject, e);
                    match FailurePolicy::resolve(&e, &site) {
                        FailureAction::Redirect(url) => go_to(&url),
                        FailureAction::Inline(msg) => set_error.set(Some(msg)),
                    }
                }
            }
        });
    });

    let allow_edit = page.allow_edit;
    let can_edit = Memo::new(move |_| allow_edit && profile.with(|p| p.as_ref().is_some_and(|p| p.can_edit)));

    // Only on someone else's business, for a logged-in viewer
    let is_business_page = matches!(page.subject, Subject::Business(_));
    let show_follow = Memo::new(move |_| is_business_page && viewer_logged_in(&store) && !can_edit.get());
    let follow_id = page.subject.id().to_string();

    let on_cancel = Callback::new(move |_| mode.set(EditMode::Viewing));

    view! {
        <main class="container subject-page">
            <InlineError message=error />
            <div class="page-actions">
                <button
                    id="edit-button"
                    class="btn btn-outline-primary"
                    hidden=move || !can_edit.get() || mode.get() == EditMode::Editing
                    on:click=move |_| mode.update(|m| *m = m.toggled())
                >
                    "Edit"
                </button>
                {move || show_follow.get().then(|| view! { <FollowButton business_id=follow_id.clone() /> })}
            </div>
            {move || {
                profile.get().map(|view| match mode.get() {
                    EditMode::Viewing => {
                        let address = view.location.clone();
                        view! {
                            <ProfileDetails view=view />
                            <ProfileMap address=address />
                        }
                        .into_any()
                    }
                    EditMode::Editing => view! { <ProfileEditor view=view on_cancel=on_cancel /> }.into_any(),
                })
            }}
            <CommentSection subject=page.subject allow_reply=page.allow_reply />
        </main>
    }
}

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <main class="container not-found">
            <h1>"Page not found"</h1>
            <p>"Nothing lives at this address. " <a href="/index.html">"Back to the directory"</a></p>
        </main>
    }
}
