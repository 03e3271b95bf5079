//! Application Config
//!
//! Deployment knobs, optionally overridden by a `window.__BIZDIR_CONFIG__`
//! object set in the hosting HTML page.

use serde::Deserialize;

pub const CONFIG_GLOBAL: &str = "__BIZDIR_CONFIG__";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Prefix for every API path; empty means same origin
    pub api_base: String,
    /// Endpoint returning the viewer's login state
    pub auth_path: String,
    /// Embed URL prefix for public calendars
    pub calendar_base: String,
    pub map_center: (f64, f64),
    pub map_zoom: u8,
    pub profile_map_zoom: u8,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            auth_path: "/login".to_string(),
            calendar_base: "https://calendar.google.com/calendar/embed?src=".to_string(),
            // Mountain View, CA
            map_center: (37.3861, -122.0839),
            map_zoom: 8,
            profile_map_zoom: 8,
        }
    }
}

impl AppConfig {
    /// Read overrides from the page, falling back to defaults
    pub fn load() -> Self {
        let Some(window) = web_sys::window() else {
            return Self::default();
        };
        let raw = match js_sys::Reflect::get(&window, &CONFIG_GLOBAL.into()) {
            Ok(v) if !v.is_undefined() && !v.is_null() => v,
            _ => return Self::default(),
        };
        match serde_wasm_bindgen::from_value::<AppConfig>(raw) {
            Ok(mut cfg) => {
                cfg.api_base = cfg.api_base.trim_end_matches('/').to_string();
                log::debug!("[CONFIG] loaded overrides: {:?}", cfg);
                cfg
            }
            Err(e) => {
                log::warn!("[CONFIG] ignoring malformed {}: {}", CONFIG_GLOBAL, e);
                Self::default()
            }
        }
    }

    pub fn calendar_url(&self, email: &str) -> String {
        format!("{}{}", self.calendar_base, email)
    }
}
