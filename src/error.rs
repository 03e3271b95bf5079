//! Error Types
//!
//! One taxonomy for every failure the pages can hit, plus the policy that
//! decides whether a failure redirects or is shown inline.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request to {url} failed with status {status}")]
    Status { status: u16, url: String },
    #[error("malformed response: {0}")]
    Decode(String),
    #[error("could not resolve address: {0}")]
    Geocode(String),
    #[error("{0} is not available")]
    Unavailable(&'static str),
}

impl ApiError {
    pub fn decode(e: impl std::fmt::Display) -> Self {
        ApiError::Decode(e.to_string())
    }
}

/// Where a failure happened; drives [`FailurePolicy::resolve`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureSite {
    /// Loading the business a page is about
    BusinessPage(String),
    /// Loading the user profile a page is about
    ProfilePage(String),
    /// Any other widget (comments, follow, nav, map, search)
    Widget(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureAction {
    /// Leave the page for the server-rendered error page
    Redirect(String),
    /// Show a message next to the affected region
    Inline(String),
}

pub struct FailurePolicy;

impl FailurePolicy {
    pub fn resolve(err: &ApiError, site: &FailureSite) -> FailureAction {
        match (err, site) {
            (ApiError::Status { .. }, FailureSite::BusinessPage(id)) => {
                FailureAction::Redirect(format!("/business/{}", id))
            }
            (ApiError::Status { .. }, FailureSite::ProfilePage(id)) => {
                FailureAction::Redirect(format!("/profile/{}", id))
            }
            (err, FailureSite::Widget(what)) => FailureAction::Inline(Self::widget_message(what, err)),
            (err, _) => FailureAction::Inline(err.to_string()),
        }
    }

    /// Inline text for a widget that failed; widgets never redirect
    pub fn widget_message(what: &str, err: &ApiError) -> String {
        format!("Could not load {}: {}", what, err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(code: u16, url: &str) -> ApiError {
        ApiError::Status { status: code, url: url.to_string() }
    }

    #[test]
    fn test_business_status_redirects() {
        let action = FailurePolicy::resolve(&status(404, "/business/7"), &FailureSite::BusinessPage("7".into()));
        assert_eq!(action, FailureAction::Redirect("/business/7".into()));
    }

    #[test]
    fn test_profile_status_redirects() {
        let action = FailurePolicy::resolve(&status(500, "/profile/3"), &FailureSite::ProfilePage("3".into()));
        assert_eq!(action, FailureAction::Redirect("/profile/3".into()));
    }

    #[test]
    fn test_network_failure_on_page_is_inline() {
        let action = FailurePolicy::resolve(
            &ApiError::Network("offline".into()),
            &FailureSite::BusinessPage("7".into()),
        );
        assert!(matches!(action, FailureAction::Inline(_)));
    }

    #[test]
    fn test_widget_failure_is_inline() {
        let action = FailurePolicy::resolve(&status(500, "/comments"), &FailureSite::Widget("comments"));
        match action {
            FailureAction::Inline(msg) => assert!(msg.starts_with("Could not load comments")),
            other => panic!("unexpected {:?}", other),
        }
    }
}
