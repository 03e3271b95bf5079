//! Nav Links
//!
//! What the nav bar shows for a given login state.

use crate::models::AuthState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub label: &'static str,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLinks {
    pub auth: Link,
    /// Only for logged-in viewers with a known id
    pub profile: Option<Link>,
}

impl NavLinks {
    pub fn from_auth(auth: &AuthState) -> Self {
        let auth_link = Link {
            label: if auth.is_logged_in { "Logout" } else { "Login" },
            href: auth.url.clone(),
        };
        let profile = auth.user_id.as_ref().map(|id| Link {
            label: "Profile",
            href: profile_href(id, auth.is_business.unwrap_or(false)),
        });
        Self { auth: auth_link, profile }
    }
}

/// Business owners land on their business page, everyone else on a profile
pub fn profile_href(user_id: &str, is_business: bool) -> String {
    let page = if is_business { "business.html" } else { "profile.html" };
    format!("/{}?id={}", page, crate::api::encode(user_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logged_out() {
        let auth = AuthState { url: "/_ah/login".into(), ..Default::default() };
        let links = NavLinks::from_auth(&auth);
        assert_eq!(links.auth.label, "Login");
        assert_eq!(links.auth.href, "/_ah/login");
        assert_eq!(links.profile, None);
    }

    #[test]
    fn test_business_owner_profile_link() {
        let auth = AuthState {
            url: "/_ah/logout".into(),
            is_logged_in: true,
            user_id: Some("42".into()),
            is_business: Some(true),
        };
        let links = NavLinks::from_auth(&auth);
        assert_eq!(links.auth.label, "Logout");
        assert_eq!(links.profile.unwrap().href, "/business.html?id=42");
    }

    #[test]
    fn test_regular_user_profile_link() {
        let auth = AuthState {
            url: "/_ah/logout".into(),
            is_logged_in: true,
            user_id: Some("42".into()),
            is_business: None,
        };
        assert_eq!(NavLinks::from_auth(&auth).profile.unwrap().href, "/profile.html?id=42");
    }
}
