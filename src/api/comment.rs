//! Comment Endpoints

use super::{Api, ApiRequest};
use crate::error::ApiError;
use crate::models::{Comment, Subject};

/// Exactly one filter per `/comments` request
#[derive(Debug, Clone, PartialEq)]
pub enum CommentFilter {
    /// Top-level comments on a business page, or everything by a user
    Subject(Subject),
    /// Direct replies to one comment
    Parent(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewComment {
    pub content: String,
    pub subject: Subject,
    /// `None` posts a top-level comment
    pub parent_id: Option<String>,
}

impl Api {
    pub async fn comments(&self, filter: &CommentFilter) -> Result<Vec<Comment>, ApiError> {
        let request = match filter {
            CommentFilter::Subject(subject) => {
                ApiRequest::get("/comments").param(subject.filter_key(), subject.id())
            }
            CommentFilter::Parent(parent_id) => {
                ApiRequest::get("/comments").param("parentId", parent_id.as_str())
            }
        };
        self.fetch_json(request).await
    }

    pub async fn post_comment(&self, comment: &NewComment) -> Result<(), ApiError> {
        let mut request = ApiRequest::post("/comment")
            .param("content", comment.content.as_str())
            .param(comment.subject.filter_key(), comment.subject.id());
        if let Some(parent) = &comment.parent_id {
            request = request.param("parentId", parent.as_str());
        }
        self.send(request).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::mock::MockTransport;
    use super::super::Method;
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn test_post_top_level_comment_omits_parent() {
        let mock = MockTransport::new();
        mock.respond(Method::Post, "/comment", 200, "");
        let api = Api::new(mock.clone());

        let comment = NewComment {
            content: "Great coffee".into(),
            subject: Subject::Business("b1".into()),
            parent_id: None,
        };
        block_on(api.post_comment(&comment)).unwrap();

        let sent = mock.requests_to("/comment");
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].param_value("content"), Some("Great coffee"));
        assert_eq!(sent[0].param_value("businessId"), Some("b1"));
        assert_eq!(sent[0].param_value("parentId"), None);
    }

    #[test]
    fn test_user_subject_filter() {
        let mock = MockTransport::new();
        mock.respond(Method::Get, "/comments?userId=u5", 200, "[]");
        let api = Api::new(mock.clone());

        let got = block_on(api.comments(&CommentFilter::Subject(Subject::User("u5".into())))).unwrap();
        assert!(got.is_empty());
    }
}
