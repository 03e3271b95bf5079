//! Comment Item Component
//!
//! One top-level comment: header, body, Reply and Show replies controls, the
//! inline reply form and the replies subtree.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::comments::{self, CommentThread, Replies};
use crate::components::CommentForm;
use crate::context::use_app_context;
use crate::models::Comment;

/// Author, time and text of a single comment
#[component]
pub fn CommentBody(comment: Comment) -> impl IntoView {
    view! {
        <div class="comment-header">
            <span class="comment-author">{comment.name.clone()}</span>
            <small class="comment-time">{comment.display_time()}</small>
        </div>
        <p class="comment-content">{comment.content}</p>
    }
}

#[component]
pub fn CommentItem(thread: RwSignal<CommentThread>, id: String) -> impl IntoView {
    let ctx = use_app_context();

    let node = {
        let id = id.clone();
        move || thread.with(|t| t.node(&id).cloned())
    };
    let replies = {
        let node = node.clone();
        move || node().map(|n| n.replies).unwrap_or(Replies::Hidden)
    };
    // Memos so the controls are only rebuilt when their visibility flips
    let has_replies = {
        let node = node.clone();
        Memo::new(move |_| node().map(|n| n.shows_replies_control()).unwrap_or(false))
    };
    let can_reply = Memo::new(move |_| thread.with(|t| t.can_reply()));
    let is_replying = {
        let id = id.clone();
        move || thread.with(|t| t.replying_to() == Some(id.as_str()))
    };
    let shown = {
        let replies = replies.clone();
        move || matches!(replies(), Replies::Shown(_) | Replies::Loading)
    };

    let toggle_replies = {
        let id = id.clone();
        let shown = shown.clone();
        move |_| {
            if shown() {
                thread.update(|t| t.hide_replies(&id));
                return;
            }
            let api = ctx.api.clone();
            let id = id.clone();
            spawn_local(async move {
                comments::show_replies(&api, &thread, &id).await;
            });
        }
    };

    let open_reply = {
        let id = id.clone();
        move |_| {
            let id = id.clone();
            thread.update(move |t| {
                if t.replying_to() == Some(id.as_str()) {
                    t.close_reply();
                } else {
                    t.open_reply(&id);
                }
            });
        }
    };

    let header = {
        let node = node.clone();
        move || node().map(|n| view! { <CommentBody comment=n.comment /> })
    };

    let replies_loading = {
        let replies = replies.clone();
        move || matches!(replies(), Replies::Loading)
    };

    let reply_form = {
        let id = id.clone();
        move || is_replying().then(|| view! { <CommentForm thread=thread parent_id=Some(id.clone()) /> })
    };

    view! {
        <div class="comment" id=format!("comment-{}", id)>
            {header}
            <div class="comment-actions">
                {move || can_reply.get().then(|| {
                    let on_click = open_reply.clone();
                    view! {
                        <button class="btn btn-link reply-button" on:click=on_click>
                            "Reply"
                        </button>
                    }
                })}
                {move || has_replies.get().then(|| {
                    let on_click = toggle_replies.clone();
                    let shown = shown.clone();
                    let loading = replies_loading.clone();
                    view! {
                        <button
                            class="btn btn-link show-replies-button"
                            disabled=loading
                            on:click=on_click
                        >
                            {move || if shown() { "Hide replies" } else { "Show replies" }}
                        </button>
                    }
                })}
            </div>
            {reply_form}
            <div class="replies">
                {move || match replies() {
                    Replies::Shown(list) => Some(
                        list.into_iter()
                            .map(|c| view! { <div class="comment reply"><CommentBody comment=c /></div> })
                            .collect_view()
                            .into_any(),
                    ),
                    Replies::Loading => Some(view! { <p class="loading">"Loading replies..."</p> }.into_any()),
                    Replies::Failed(msg) => Some(view! { <p class="inline-error">{msg}</p> }.into_any()),
                    Replies::Hidden => None,
                }}
            </div>
        </div>
    }
}
