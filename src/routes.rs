//! Page Resolution
//!
//! The server still serves `index.html`, `business.html` and `profile.html`;
//! each loads this same bundle, which picks the page from the location.

use crate::models::Subject;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Index,
    Subject(SubjectPage),
    NotFound,
}

/// Options for a business or user page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectPage {
    pub subject: Subject,
    /// Viewers may post comments and replies
    pub allow_reply: bool,
    /// Owners may switch to the edit form
    pub allow_edit: bool,
}

impl SubjectPage {
    pub fn business(id: String) -> Self {
        Self { subject: Subject::Business(id), allow_reply: true, allow_edit: true }
    }

    /// Comments on a user page are that user's history; no replying there
    pub fn user(id: String) -> Self {
        Self { subject: Subject::User(id), allow_reply: false, allow_edit: true }
    }
}

impl Page {
    /// `pathname` as in `location.pathname`, `search` as in `location.search`
    pub fn resolve(pathname: &str, search: &str) -> Self {
        let id = query_param(search, "id").filter(|id| !id.is_empty());
        match (pathname.trim_end_matches('/'), id) {
            ("" | "/index.html", _) => Page::Index,
            ("/business.html", Some(id)) => Page::Subject(SubjectPage::business(id)),
            ("/profile.html", Some(id)) => Page::Subject(SubjectPage::user(id)),
            _ => Page::NotFound,
        }
    }
}

/// Decoded value of `key` in a `?a=b&c=d` query string
pub fn query_param(search: &str, key: &str) -> Option<String> {
    search
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('=').or(Some((pair, ""))))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| {
            let v = v.replace('+', " ");
            percent_encoding::percent_decode_str(&v).decode_utf8_lossy().into_owned()
        })
}

/// Full-page navigation; each page is its own document
pub fn go_to(url: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    log::info!("[ROUTES] navigating to {}", url);
    if let Err(e) = window.location().set_href(url) {
        log::error!("[ROUTES] navigation to {} failed: {:?}", url, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index() {
        assert_eq!(Page::resolve("/", ""), Page::Index);
        assert_eq!(Page::resolve("/index.html", "?x=1"), Page::Index);
    }

    #[test]
    fn test_business_page() {
        match Page::resolve("/business.html", "?id=7") {
            Page::Subject(page) => {
                assert_eq!(page.subject, Subject::Business("7".into()));
                assert!(page.allow_reply);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_profile_page() {
        match Page::resolve("/profile.html", "?foo=bar&id=abc%20d") {
            Page::Subject(page) => {
                assert_eq!(page.subject, Subject::User("abc d".into()));
                assert!(!page.allow_reply);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_missing_id_is_not_found() {
        assert_eq!(Page::resolve("/business.html", ""), Page::NotFound);
        assert_eq!(Page::resolve("/business.html", "?id="), Page::NotFound);
        assert_eq!(Page::resolve("/nowhere.html", "?id=1"), Page::NotFound);
    }
}
