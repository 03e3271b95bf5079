//! Follow Endpoints
//!
//! `/follow` keyed by business id: GET answers a bare JSON boolean, POST
//! follows, DELETE unfollows.

use super::{Api, ApiRequest};
use crate::error::ApiError;

const FOLLOW_PATH: &str = "/follow";
const BUSINESS_ID: &str = "businessId";

impl Api {
    pub async fn is_following(&self, business_id: &str) -> Result<bool, ApiError> {
        self.fetch_json(ApiRequest::get(FOLLOW_PATH).param(BUSINESS_ID, business_id)).await
    }

    pub async fn follow(&self, business_id: &str) -> Result<(), ApiError> {
        self.send(ApiRequest::post(FOLLOW_PATH).param(BUSINESS_ID, business_id)).await?;
        Ok(())
    }

    pub async fn unfollow(&self, business_id: &str) -> Result<(), ApiError> {
        self.send(ApiRequest::delete(FOLLOW_PATH).param(BUSINESS_ID, business_id)).await?;
        Ok(())
    }
}
