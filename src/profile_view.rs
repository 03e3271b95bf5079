//! Profile View Models
//!
//! Business and user pages share one shape: a header, a handful of text
//! sections, a view/edit toggle and an edit form that may need an address
//! resolved before it can be saved.

use thiserror::Error;

use crate::api::{Api, ProfileForm};
use crate::config::AppConfig;
use crate::error::ApiError;
use crate::geo::Geocoder;
use crate::models::{Business, UserProfile};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditMode {
    #[default]
    Viewing,
    Editing,
}

impl EditMode {
    pub fn toggled(self) -> Self {
        match self {
            EditMode::Viewing => EditMode::Editing,
            EditMode::Editing => EditMode::Viewing,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: &'static str,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileView {
    pub id: String,
    pub name: String,
    pub location: String,
    pub sections: Vec<Section>,
    pub is_business: bool,
    /// Edit control visibility
    pub can_edit: bool,
    pub calendar_email: String,
    pub calendar_url: Option<String>,
}

/// Embed URL for a calendar address; blank hides the preview
pub fn calendar_preview(config: &AppConfig, email: &str) -> Option<String> {
    let email = email.trim();
    (!email.is_empty()).then(|| config.calendar_url(email))
}

impl ProfileView {
    pub fn from_business(b: &Business, config: &AppConfig) -> Self {
        Self {
            id: b.id.clone(),
            name: b.name.clone(),
            location: b.location.clone(),
            sections: vec![
                Section { title: "Bio", text: b.bio.clone() },
                Section { title: "Our Story", text: b.story.clone() },
                Section { title: "About", text: b.about.clone() },
                Section { title: "How to Support", text: b.support.clone() },
            ],
            is_business: true,
            can_edit: b.is_current_user,
            calendar_email: b.calendar_email.clone(),
            calendar_url: calendar_preview(config, &b.calendar_email),
        }
    }

    pub fn from_user(p: &UserProfile) -> Self {
        Self {
            id: p.id.clone(),
            name: p.name.clone(),
            location: p.location.clone(),
            sections: vec![Section { title: "Bio", text: p.bio.clone() }],
            is_business: p.is_business.unwrap_or(false),
            can_edit: p.is_current_user,
            calendar_email: String::new(),
            calendar_url: None,
        }
    }

    pub fn section(&self, title: &str) -> Option<&str> {
        self.sections.iter().find(|s| s.title == title).map(|s| s.text.as_str())
    }

    /// Edit form prefilled with what is on screen
    pub fn to_form(&self) -> ProfileForm {
        let text = |title: &str| self.section(title).unwrap_or_default().to_string();
        ProfileForm {
            is_business: self.is_business,
            name: self.name.clone(),
            location: self.location.clone(),
            bio: text("Bio"),
            story: text("Our Story"),
            about: text("About"),
            support: text("How to Support"),
            calendar_email: self.calendar_email.clone(),
            lat: None,
            long: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditError {
    #[error("Name is required.")]
    MissingName,
    #[error("We couldn't find that address. Please check it and try again.")]
    Address(ApiError),
    #[error("Saving failed: {0}")]
    Save(ApiError),
}

/// Resolve the address to coordinates. A blank location skips geocoding;
/// an address that cannot be resolved blocks the save.
pub async fn prepare_submission(mut form: ProfileForm, geocoder: &dyn Geocoder) -> Result<ProfileForm, EditError> {
    if form.name.trim().is_empty() {
        return Err(EditError::MissingName);
    }
    form.lat = None;
    form.long = None;
    if form.location.trim().is_empty() {
        return Ok(form);
    }
    let results = geocoder.geocode(form.location.trim()).await.map_err(EditError::Address)?;
    let best = results
        .first()
        .ok_or_else(|| EditError::Address(ApiError::Geocode(form.location.clone())))?;
    form.lat = Some(best.latitude);
    form.long = Some(best.longitude);
    Ok(form)
}

/// Validate, geocode and post the edit form; returns the page to go to
pub async fn save(api: &Api, geocoder: &dyn Geocoder, form: ProfileForm) -> Result<String, EditError> {
    let form = prepare_submission(form, geocoder).await?;
    let target = form.target();
    let next = api.save_profile(form).await.map_err(EditError::Save)?;
    log::info!("[PROFILE] saved via {}", target);
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockTransport;
    use crate::api::Method;
    use crate::geo::testing::FixedGeocoder;
    use crate::geo::GeoPoint;
    use futures::executor::block_on;

    #[test]
    fn test_profile_42_shows_text_and_edit_control() {
        let mock = MockTransport::new();
        mock.respond(
            Method::Get,
            "/profile/42",
            200,
            r#"{"name":"A","location":"B","bio":"C","isCurrentUser":true}"#,
        );
        let api = Api::new(mock.clone());

        let profile = block_on(api.profile("42")).unwrap();
        let view = ProfileView::from_user(&profile);
        assert_eq!(view.name, "A");
        assert_eq!(view.location, "B");
        assert_eq!(view.section("Bio"), Some("C"));
        assert!(view.can_edit);
    }

    #[test]
    fn test_business_view_calendar() {
        let config = AppConfig::default();
        let mut b = Business { name: "Bakery".into(), calendar_email: "cal@x.com".into(), ..Default::default() };
        let view = ProfileView::from_business(&b, &config);
        assert_eq!(view.calendar_url.as_deref(), Some("https://calendar.google.com/calendar/embed?src=cal@x.com"));
        assert!(!view.can_edit);

        b.calendar_email.clear();
        assert_eq!(ProfileView::from_business(&b, &config).calendar_url, None);
    }

    #[test]
    fn test_edit_mode_toggles() {
        let mode = EditMode::default();
        assert_eq!(mode, EditMode::Viewing);
        assert_eq!(mode.toggled(), EditMode::Editing);
        assert_eq!(mode.toggled().toggled(), EditMode::Viewing);
    }

    #[test]
    fn test_blank_location_skips_geocoding() {
        let geocoder = FixedGeocoder(Err(ApiError::Geocode("should not be called".into())));
        let form = ProfileForm { name: "Ann".into(), ..Default::default() };

        let prepared = block_on(prepare_submission(form, &geocoder)).unwrap();
        assert_eq!(prepared.lat, None);
    }

    #[test]
    fn test_geocoded_coordinates_are_attached() {
        let geocoder = FixedGeocoder(Ok(vec![GeoPoint::new(37.4, -122.1), GeoPoint::new(0.0, 0.0)]));
        let form = ProfileForm { name: "Cafe".into(), location: "1 Main St".into(), ..Default::default() };

        let prepared = block_on(prepare_submission(form, &geocoder)).unwrap();
        assert_eq!(prepared.lat, Some(37.4));
        assert_eq!(prepared.long, Some(-122.1));
    }

    #[test]
    fn test_unresolvable_address_blocks_save() {
        let mock = MockTransport::new();
        let api = Api::new(mock.clone());
        let geocoder = FixedGeocoder(Ok(vec![]));
        let form = ProfileForm { name: "Cafe".into(), location: "nowhere".into(), ..Default::default() };

        let err = block_on(save(&api, &geocoder, form)).unwrap_err();
        assert!(matches!(err, EditError::Address(_)));
        assert!(mock.requests().is_empty());
    }

    #[test]
    fn test_save_posts_to_target() {
        let mock = MockTransport::new();
        mock.respond(Method::Post, "/business", 200, "");
        let api = Api::new(mock.clone());
        let geocoder = FixedGeocoder(Ok(vec![GeoPoint::new(1.0, 2.0)]));
        let form = ProfileForm {
            is_business: true,
            name: "Cafe".into(),
            location: "1 Main St".into(),
            ..Default::default()
        };

        let next = block_on(save(&api, &geocoder, form)).unwrap();
        assert_eq!(next, "/business");
        let posts = mock.requests_to("/business");
        assert_eq!(posts[0].param_value("lat"), Some("1"));
    }

    #[test]
    fn test_missing_name_blocks_save() {
        let geocoder = FixedGeocoder(Ok(vec![]));
        let err = block_on(prepare_submission(ProfileForm::default(), &geocoder)).unwrap_err();
        assert_eq!(err, EditError::MissingName);
    }
}
