//! Profile Endpoints

use super::{encode, Api, ApiRequest};
use crate::error::ApiError;
use crate::models::UserProfile;

impl Api {
    pub async fn profile(&self, id: &str) -> Result<UserProfile, ApiError> {
        self.fetch_json(ApiRequest::get(format!("/profile/{}", encode(id)))).await
    }
}
