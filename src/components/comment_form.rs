//! Comment Form Component
//!
//! Textarea + submit, for a new top-level comment or a reply to `parent_id`.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::comments::{self, CommentThread, SubmitRejected};
use crate::context::use_app_context;

#[component]
pub fn CommentForm(thread: RwSignal<CommentThread>, parent_id: Option<String>) -> impl IntoView {
    let ctx = use_app_context();
    let (content, set_content) = signal(String::new());
    let (hint, set_hint) = signal::<Option<&'static str>>(None);

    let is_reply = parent_id.is_some();

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let api = ctx.api.clone();
        let parent = parent_id.clone();
        let text = content.get_untracked();
        spawn_local(async move {
            match comments::submit(&api, &thread, &text, parent.as_deref()).await {
                Ok(()) => {
                    if thread.with_untracked(|t| t.error().is_none()) {
                        set_content.set(String::new());
                    }
                    set_hint.set(None);
                }
                Err(SubmitRejected::Empty) => set_hint.set(Some("Write something first.")),
                Err(SubmitRejected::InFlight) => {}
                Err(SubmitRejected::NotAllowed) => set_hint.set(Some("Log in to comment.")),
            }
        });
    };

    view! {
        <form class=if is_reply { "comment-form reply-form" } else { "comment-form" } on:submit=on_submit>
            <textarea
                class="form-control"
                name="content"
                placeholder=if is_reply { "Write a reply..." } else { "Leave a comment..." }
                prop:value=move || content.get()
                on:input=move |ev| set_content.set(event_target_value(&ev))
            />
            <small class="form-hint" hidden=move || hint.get().is_none()>
                {move || hint.get().unwrap_or_default()}
            </small>
            <div class="comment-form-actions">
                <button type="submit" class="btn btn-primary" disabled=move || thread.with(|t| t.is_submitting())>
                    {if is_reply { "Reply" } else { "Post" }}
                </button>
                {is_reply.then(|| view! {
                    <button type="button" class="btn btn-light" on:click=move |_| thread.update(|t| t.close_reply())>
                        "Cancel"
                    </button>
                })}
            </div>
        </form>
    }
}
