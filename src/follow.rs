//! Follow State
//!
//! Two-state machine behind the follow button. State is always re-read from
//! the server on page load and only flips after the server acknowledges.

use crate::api::{Api, Method};
use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowState {
    Following,
    NotFollowing,
}

impl FollowState {
    pub fn from_server(is_following: bool) -> Self {
        if is_following { FollowState::Following } else { FollowState::NotFollowing }
    }

    /// Button text: the action a click performs
    pub fn label(self) -> &'static str {
        match self {
            FollowState::NotFollowing => "Follow",
            FollowState::Following => "Unfollow",
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            FollowState::NotFollowing => "btn btn-light float-right",
            FollowState::Following => "btn btn-dark float-right",
        }
    }

    /// Request a click sends
    pub fn toggle_method(self) -> Method {
        match self {
            FollowState::NotFollowing => Method::Post,
            FollowState::Following => Method::Delete,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            FollowState::Following => FollowState::NotFollowing,
            FollowState::NotFollowing => FollowState::Following,
        }
    }
}

pub async fn load(api: &Api, business_id: &str) -> Result<FollowState, ApiError> {
    api.is_following(business_id).await.map(FollowState::from_server)
}

/// Send the follow/unfollow request for `current`; returns the new state
pub async fn toggle(api: &Api, business_id: &str, current: FollowState) -> Result<FollowState, ApiError> {
    match current.toggle_method() {
        Method::Delete => api.unfollow(business_id).await?,
        _ => api.follow(business_id).await?,
    }
    log::info!("[FOLLOW] business {} is now {:?}", business_id, current.flipped());
    Ok(current.flipped())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockTransport;
    use futures::executor::block_on;

    fn api_with_follow() -> (std::sync::Arc<MockTransport>, Api) {
        let mock = MockTransport::new();
        mock.respond(Method::Post, "/follow", 200, "");
        mock.respond(Method::Delete, "/follow?businessId=b1", 200, "");
        let api = Api::new(mock.clone());
        (mock, api)
    }

    #[test]
    fn test_load_from_server() {
        let mock = MockTransport::new();
        mock.respond(Method::Get, "/follow?businessId=b1", 200, "true");
        let api = Api::new(mock.clone());

        let state = block_on(load(&api, "b1")).unwrap();
        assert_eq!(state, FollowState::Following);
        assert_eq!(state.label(), "Unfollow");
    }

    #[test]
    fn test_unfollow_then_follow() {
        let (mock, api) = api_with_follow();

        let state = FollowState::Following;
        let state = block_on(toggle(&api, "b1", state)).unwrap();
        assert_eq!(state.label(), "Follow");
        let state = block_on(toggle(&api, "b1", state)).unwrap();
        assert_eq!(state, FollowState::Following);

        let methods: Vec<_> = mock.requests_to("/follow").iter().map(|r| r.method).collect();
        assert_eq!(methods, [Method::Delete, Method::Post]);
        assert!(mock.requests_to("/follow").iter().all(|r| r.param_value("businessId") == Some("b1")));
    }

    #[test]
    fn test_follow_then_unfollow_ends_on_follow_label() {
        let (mock, api) = api_with_follow();

        let state = FollowState::NotFollowing;
        assert_eq!(state.label(), "Follow");
        let state = block_on(toggle(&api, "b1", state)).unwrap();
        assert_eq!(state.label(), "Unfollow");
        assert_eq!(state.class(), "btn btn-dark float-right");
        let state = block_on(toggle(&api, "b1", state)).unwrap();
        assert_eq!(state.label(), "Follow");
        assert_eq!(state.class(), "btn btn-light float-right");

        let methods: Vec<_> = mock.requests_to("/follow").iter().map(|r| r.method).collect();
        assert_eq!(methods, [Method::Post, Method::Delete]);
    }

    #[test]
    fn test_failed_toggle_keeps_state() {
        let mock = MockTransport::new();
        mock.respond(Method::Post, "/follow", 401, "");
        let api = Api::new(mock.clone());

        let result = block_on(toggle(&api, "b1", FollowState::NotFollowing));
        assert!(matches!(result, Err(ApiError::Status { status: 401, .. })));
    }
}
