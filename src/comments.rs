//! Comment Threads
//!
//! State behind a comment section: top-level comments in server order, a
//! lazily fetched replies list per comment, at most one open reply form, and
//! guards that drop repeated triggers while a request is in flight.
//!
//! The async drivers at the bottom take any [`ThreadCell`], so the same code
//! runs against a Leptos signal in the browser and a `RefCell` in tests.

use std::cell::RefCell;

use crate::api::{Api, CommentFilter, NewComment};
use crate::error::{ApiError, FailurePolicy};
use crate::models::{Comment, Subject};

#[derive(Debug, Clone, PartialEq)]
pub enum Replies {
    Hidden,
    Loading,
    Shown(Vec<Comment>),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommentNode {
    pub comment: Comment,
    pub replies: Replies,
}

impl CommentNode {
    fn new(comment: Comment) -> Self {
        Self { comment, replies: Replies::Hidden }
    }

    pub fn shows_replies_control(&self) -> bool {
        self.comment.has_replies
    }
}

/// Why a submit never left the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitRejected {
    Empty,
    NotAllowed,
    InFlight,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommentThread {
    subject: Subject,
    viewer_logged_in: bool,
    allow_reply: bool,
    nodes: Vec<CommentNode>,
    loaded: bool,
    loading: bool,
    /// Bumped by every load; only the newest response is applied
    load_generation: u64,
    submitting: bool,
    replying_to: Option<String>,
    error: Option<String>,
}

fn inline_message(err: &ApiError) -> String {
    FailurePolicy::widget_message("comments", err)
}

impl CommentThread {
    pub fn new(subject: Subject, viewer_logged_in: bool, allow_reply: bool) -> Self {
        Self {
            subject,
            viewer_logged_in,
            allow_reply,
            nodes: Vec::new(),
            loaded: false,
            loading: false,
            load_generation: 0,
            submitting: false,
            replying_to: None,
            error: None,
        }
    }

    pub fn nodes(&self) -> &[CommentNode] {
        &self.nodes
    }

    pub fn node(&self, id: &str) -> Option<&CommentNode> {
        self.nodes.iter().find(|n| n.comment.id == id)
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn replying_to(&self) -> Option<&str> {
        self.replying_to.as_deref()
    }

    /// Logged-out viewers never get reply or comment controls
    pub fn can_reply(&self) -> bool {
        self.viewer_logged_in && self.allow_reply
    }

    pub fn set_viewer_logged_in(&mut self, logged_in: bool) {
        self.viewer_logged_in = logged_in;
        if !self.can_reply() {
            self.replying_to = None;
        }
    }

    // ========================
    // Loading
    // ========================

    /// Starts a load that supersedes any still in flight. Returns the
    /// generation to hand back to [`finish_load`](Self::finish_load).
    pub fn begin_load(&mut self) -> (u64, CommentFilter) {
        self.load_generation += 1;
        self.loading = true;
        (self.load_generation, CommentFilter::Subject(self.subject.clone()))
    }

    /// Applies a load response; responses from superseded loads are dropped.
    /// Replies are only reachable through their parent, so a user's thread
    /// keeps top-level comments only.
    pub fn finish_load(&mut self, generation: u64, result: Result<Vec<Comment>, ApiError>) {
        if generation != self.load_generation {
            log::debug!("[COMMENTS] dropping stale load {} (current {})", generation, self.load_generation);
            return;
        }
        self.loading = false;
        match result {
            Ok(comments) => {
                self.nodes = comments
                    .into_iter()
                    .filter(Comment::is_top_level)
                    .map(CommentNode::new)
                    .collect();
                self.loaded = true;
                self.error = None;
            }
            Err(e) => self.error = Some(inline_message(&e)),
        }
    }

    // ========================
    // Replies
    // ========================

    /// Returns the parent filter to fetch, or `None` when the comment is
    /// unknown, has no replies, or its replies are already loading/shown
    pub fn begin_show_replies(&mut self, parent_id: &str) -> Option<CommentFilter> {
        let node = self.nodes.iter_mut().find(|n| n.comment.id == parent_id)?;
        if !node.shows_replies_control() {
            return None;
        }
        match node.replies {
            Replies::Hidden | Replies::Failed(_) => {
                node.replies = Replies::Loading;
                Some(CommentFilter::Parent(parent_id.to_string()))
            }
            Replies::Loading | Replies::Shown(_) => None,
        }
    }

    /// Replaces the replies subtree; replies of replies are not expanded
    pub fn finish_show_replies(&mut self, parent_id: &str, result: Result<Vec<Comment>, ApiError>) {
        let Some(node) = self.nodes.iter_mut().find(|n| n.comment.id == parent_id) else {
            return;
        };
        // A reload may have replaced the node while the fetch was out
        if node.replies != Replies::Loading {
            return;
        }
        node.replies = match result {
            Ok(replies) => Replies::Shown(replies),
            Err(e) => Replies::Failed(inline_message(&e)),
        };
    }

    pub fn hide_replies(&mut self, parent_id: &str) {
        if let Some(node) = self.nodes.iter_mut().find(|n| n.comment.id == parent_id) {
            if matches!(node.replies, Replies::Shown(_) | Replies::Failed(_)) {
                node.replies = Replies::Hidden;
            }
        }
    }

    // ========================
    // Reply form / submit
    // ========================

    pub fn open_reply(&mut self, parent_id: &str) {
        if self.can_reply() && self.node(parent_id).is_some() {
            self.replying_to = Some(parent_id.to_string());
        }
    }

    pub fn close_reply(&mut self) {
        self.replying_to = None;
    }

    pub fn begin_submit(&mut self, content: &str, parent_id: Option<&str>) -> Result<NewComment, SubmitRejected> {
        if !self.can_reply() {
            return Err(SubmitRejected::NotAllowed);
        }
        let content = content.trim();
        if content.is_empty() {
            return Err(SubmitRejected::Empty);
        }
        if self.submitting {
            return Err(SubmitRejected::InFlight);
        }
        self.submitting = true;
        Ok(NewComment {
            content: content.to_string(),
            subject: self.subject.clone(),
            parent_id: parent_id.map(str::to_string),
        })
    }

    /// `true` when the thread should be reloaded
    pub fn finish_submit(&mut self, result: Result<(), ApiError>) -> bool {
        self.submitting = false;
        match result {
            Ok(()) => {
                self.replying_to = None;
                self.error = None;
                true
            }
            Err(e) => {
                self.error = Some(inline_message(&e));
                false
            }
        }
    }
}

// ========================
// Async Drivers
// ========================

/// Somewhere a thread lives between awaits
pub trait ThreadCell {
    /// `None` if the thread is gone (e.g. its owner was disposed)
    fn with_thread<R>(&self, f: impl FnOnce(&mut CommentThread) -> R) -> Option<R>;
}

impl ThreadCell for RefCell<CommentThread> {
    fn with_thread<R>(&self, f: impl FnOnce(&mut CommentThread) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }
}

/// Fetch the top-level comments and replace the whole thread. Always sends
/// a fresh request; an older load still in flight is superseded.
pub async fn reload<C: ThreadCell>(api: &Api, cell: &C) {
    let Some((generation, filter)) = cell.with_thread(|t| t.begin_load()) else {
        return;
    };
    let result = api.comments(&filter).await;
    if let Ok(comments) = &result {
        log::debug!("[COMMENTS] loaded {} comments", comments.len());
    }
    cell.with_thread(|t| t.finish_load(generation, result));
}

pub async fn show_replies<C: ThreadCell>(api: &Api, cell: &C, parent_id: &str) {
    let Some(Some(filter)) = cell.with_thread(|t| t.begin_show_replies(parent_id)) else {
        log::debug!("[COMMENTS] ignoring replies request for {}", parent_id);
        return;
    };
    let result = api.comments(&filter).await;
    cell.with_thread(|t| t.finish_show_replies(parent_id, result));
}

/// Post a comment (or a reply when `parent_id` is set), then reload
pub async fn submit<C: ThreadCell>(
    api: &Api,
    cell: &C,
    content: &str,
    parent_id: Option<&str>,
) -> Result<(), SubmitRejected> {
    let comment = cell
        .with_thread(|t| t.begin_submit(content, parent_id))
        .unwrap_or(Err(SubmitRejected::NotAllowed))?;
    let result = api.post_comment(&comment).await;
    if let Err(e) = &result {
        log::warn!("[COMMENTS] posting failed: {}", e);
    }
    if cell.with_thread(|t| t.finish_submit(result)) == Some(true) {
        reload(api, cell).await;
    }
    Ok(())
}
