//! Frontend Models
//!
//! Data structures matching the JSON the servlets emit.

use chrono::DateTime;
use serde::{Deserialize, Deserializer, Serialize};

use crate::geo::GeoPoint;

/// Comment data structure (matches `/comments` output)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub business_id: Option<String>,
    /// Server stores "" for top-level comments
    #[serde(default, deserialize_with = "empty_as_none")]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub has_replies: bool,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub timestamp_str: Option<String>,
}

impl Comment {
    pub fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Header timestamp, `MM/DD/YY HH:MM` in UTC like the server's own formatting
    pub fn display_time(&self) -> String {
        if let Some(s) = &self.timestamp_str {
            return s.clone();
        }
        DateTime::from_timestamp_millis(self.timestamp)
            .map(|t| t.format("%m/%d/%y %H:%M").to_string())
            .unwrap_or_default()
    }
}

/// The business or user a comment thread hangs off
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Subject {
    Business(String),
    User(String),
}

impl Subject {
    /// Query parameter name used to filter `/comments`
    pub fn filter_key(&self) -> &'static str {
        match self {
            Subject::Business(_) => "businessId",
            Subject::User(_) => "userId",
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Subject::Business(id) | Subject::User(id) => id,
        }
    }
}

/// Business profile (matches `/business/{id}`, `/businesses`, `/search`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Business {
    pub id: String,
    pub name: String,
    pub location: String,
    pub bio: String,
    pub story: String,
    pub about: String,
    pub support: String,
    pub calendar_email: String,
    pub is_current_user: bool,
}

/// Non-business user profile (matches `/profile/{id}`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub location: String,
    pub bio: String,
    #[serde(deserialize_with = "yes_no")]
    pub is_business: Option<bool>,
    pub is_current_user: bool,
}

/// Login state of the viewer (matches `/login`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthState {
    #[serde(default)]
    pub url: String,
    #[serde(rename = "isLoggedin", default)]
    pub is_logged_in: bool,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub user_id: Option<String>,
    #[serde(default, deserialize_with = "yes_no")]
    pub is_business: Option<bool>,
}

/// Business pin inside a map viewport (matches `/map/...`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapPin {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub geo_pt: Option<GeoPoint>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl MapPin {
    /// Coordinates if the server sent any; otherwise the location needs geocoding
    pub fn point(&self) -> Option<GeoPoint> {
        self.geo_pt.or(match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some(GeoPoint::new(lat, lng)),
            _ => None,
        })
    }
}

fn empty_as_none<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<String>::deserialize(d)?;
    Ok(v.filter(|s| !s.is_empty()))
}

/// Accepts `"Yes"`/`"No"` strings as well as plain booleans
fn yes_no<'de, D>(d: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Flag(bool),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(d)? {
        Some(Raw::Flag(b)) => Some(b),
        Some(Raw::Text(s)) if s.eq_ignore_ascii_case("yes") => Some(true),
        Some(Raw::Text(s)) if s.eq_ignore_ascii_case("no") => Some(false),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_empty_parent_is_top_level() {
        let json = r#"{"id":"c1","content":"hi","timestamp":0,"userId":"u1","name":"ann",
            "businessId":"b1","parentId":"","hasReplies":true}"#;
        let c: Comment = serde_json::from_str(json).unwrap();
        assert!(c.is_top_level());
        assert!(c.has_replies);
        assert_eq!(c.business_id.as_deref(), Some("b1"));
    }

    #[test]
    fn test_comment_display_time_falls_back_to_timestamp() {
        let json = r#"{"id":"c1","timestamp":1593561600000}"#;
        let c: Comment = serde_json::from_str(json).unwrap();
        assert_eq!(c.display_time(), "07/01/20 00:00");

        let json = r#"{"id":"c2","timestamp":0,"timestampStr":"01/02/20 03:04"}"#;
        let c: Comment = serde_json::from_str(json).unwrap();
        assert_eq!(c.display_time(), "01/02/20 03:04");
    }

    #[test]
    fn test_auth_state_yes_no() {
        let json = r#"{"url":"/logout","isLoggedin":true,"userId":"42","isBusiness":"Yes"}"#;
        let a: AuthState = serde_json::from_str(json).unwrap();
        assert!(a.is_logged_in);
        assert_eq!(a.is_business, Some(true));

        let json = r#"{"url":"/login","isLoggedin":false,"userId":null,"isBusiness":null}"#;
        let a: AuthState = serde_json::from_str(json).unwrap();
        assert_eq!(a.user_id, None);
        assert_eq!(a.is_business, None);
    }

    #[test]
    fn test_map_pin_point() {
        let pin: MapPin = serde_json::from_str(
            r#"{"id":"1","name":"Cafe","location":"x","geoPt":{"latitude":1.0,"longitude":2.0}}"#,
        )
        .unwrap();
        assert_eq!(pin.point(), Some(GeoPoint::new(1.0, 2.0)));

        let pin: MapPin = serde_json::from_str(r#"{"id":"2","latitude":3.0,"longitude":4.0}"#).unwrap();
        assert_eq!(pin.point(), Some(GeoPoint::new(3.0, 4.0)));

        let pin: MapPin = serde_json::from_str(r#"{"id":"3","location":"Main St"}"#).unwrap();
        assert_eq!(pin.point(), None);
    }

    #[test]
    fn test_subject_filter_key() {
        assert_eq!(Subject::Business("7".into()).filter_key(), "businessId");
        assert_eq!(Subject::User("7".into()).filter_key(), "userId");
    }
}
