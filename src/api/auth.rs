//! Auth Endpoints

use super::{Api, ApiRequest};
use crate::error::ApiError;
use crate::models::AuthState;

impl Api {
    /// Login state plus the login or logout URL
    pub async fn auth_state(&self, auth_path: &str) -> Result<AuthState, ApiError> {
        self.fetch_json(ApiRequest::get(auth_path)).await
    }
}

#[cfg(test)]
mod tests {
    use super::super::mock::MockTransport;
    use super::super::Method;
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn test_auth_state() {
        let mock = MockTransport::new();
        mock.respond(
            Method::Get,
            "/login",
            200,
            r#"{"url":"/_ah/logout","isLoggedin":true,"userId":"9","isBusiness":"No"}"#,
        );
        let api = Api::new(mock.clone());

        let auth = block_on(api.auth_state("/login")).unwrap();
        assert!(auth.is_logged_in);
        assert_eq!(auth.user_id.as_deref(), Some("9"));
        assert_eq!(auth.is_business, Some(false));
    }
}
