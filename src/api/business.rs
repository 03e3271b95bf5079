//! Business Endpoints
//!
//! Listing, single business, search, map viewport and the shared edit form.

use super::{encode, Api, ApiRequest};
use crate::error::ApiError;
use crate::geo::Bounds;
use crate::models::{Business, MapPin};

/// Fields of the edit-profile form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileForm {
    /// Answer to "are you a business?"; picks `/business` or `/profile`
    pub is_business: bool,
    pub name: String,
    pub location: String,
    pub bio: String,
    pub story: String,
    pub about: String,
    pub support: String,
    pub calendar_email: String,
    pub lat: Option<f64>,
    pub long: Option<f64>,
}

impl ProfileForm {
    pub fn target(&self) -> &'static str {
        if self.is_business { "/business" } else { "/profile" }
    }

    fn into_request(self) -> ApiRequest {
        let mut request = ApiRequest::post(self.target())
            .param("isBusiness", if self.is_business { "Yes" } else { "No" })
            .param("name", self.name)
            .param("location", self.location)
            .param("bio", self.bio);
        if self.is_business {
            request = request
                .param("story", self.story)
                .param("about", self.about)
                .param("support", self.support)
                .param("calendarEmail", self.calendar_email);
        }
        if let (Some(lat), Some(long)) = (self.lat, self.long) {
            request = request.param("lat", lat.to_string()).param("long", long.to_string());
        }
        request
    }
}

impl Api {
    pub async fn list_businesses(&self) -> Result<Vec<Business>, ApiError> {
        self.fetch_json(ApiRequest::get("/businesses")).await
    }

    pub async fn business(&self, id: &str) -> Result<Business, ApiError> {
        self.fetch_json(ApiRequest::get(format!("/business/{}", encode(id)))).await
    }

    pub async fn search(&self, term: &str) -> Result<Vec<Business>, ApiError> {
        self.fetch_json(ApiRequest::get("/search").param("searchItem", term)).await
    }

    pub async fn businesses_in_bounds(&self, bounds: &Bounds) -> Result<Vec<MapPin>, ApiError> {
        self.fetch_json(ApiRequest::get(bounds.map_path())).await
    }

    /// Save the edit form; returns where the server redirected to
    pub async fn save_profile(&self, form: ProfileForm) -> Result<String, ApiError> {
        let response = self.send(form.into_request()).await?;
        Ok(response.url)
    }
}

#[cfg(test)]
mod tests {
    use super::super::mock::MockTransport;
    use super::super::Method;
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn test_business_decodes() {
        let mock = MockTransport::new();
        mock.respond(
            Method::Get,
            "/business/7",
            200,
            r#"{"id":"7","name":"Bakery","location":"Main St","bio":"b","story":"s",
               "about":"a","support":"p","calendarEmail":"","isCurrentUser":false}"#,
        );
        let api = Api::new(mock.clone());

        let b = block_on(api.business("7")).unwrap();
        assert_eq!(b.name, "Bakery");
        assert!(!b.is_current_user);
    }

    #[test]
    fn test_search_sends_term() {
        let mock = MockTransport::new();
        mock.respond(Method::Get, "/search?searchItem=tea", 200, r#"[{"id":"1","name":"Tea House"}]"#);
        let api = Api::new(mock.clone());

        let found = block_on(api.search("tea")).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Tea House");
    }

    #[test]
    fn test_user_form_skips_business_fields() {
        let form = ProfileForm {
            is_business: false,
            name: "Ann".into(),
            story: "ignored".into(),
            ..Default::default()
        };
        let request = form.into_request();
        assert_eq!(request.path, "/profile");
        assert_eq!(request.param_value("isBusiness"), Some("No"));
        assert_eq!(request.param_value("story"), None);
        assert_eq!(request.param_value("lat"), None);
    }

    #[test]
    fn test_business_form_with_coordinates() {
        let form = ProfileForm {
            is_business: true,
            name: "Cafe".into(),
            lat: Some(37.5),
            long: Some(-122.25),
            ..Default::default()
        };
        let request = form.into_request();
        assert_eq!(request.path, "/business");
        assert_eq!(request.param_value("isBusiness"), Some("Yes"));
        assert_eq!(request.param_value("lat"), Some("37.5"));
        assert_eq!(request.param_value("long"), Some("-122.25"));
    }

    #[test]
    fn test_missing_business_redirects_to_server_page() {
        use crate::error::{FailureAction, FailurePolicy, FailureSite};

        let mock = MockTransport::new();
        mock.respond(Method::Get, "/business/7", 404, "");
        let api = Api::new(mock.clone());

        let err = block_on(api.business("7")).unwrap_err();
        let action = FailurePolicy::resolve(&err, &FailureSite::BusinessPage("7".into()));
        assert_eq!(action, FailureAction::Redirect("/business/7".into()));
    }
}
