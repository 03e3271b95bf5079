//! Application Context
//!
//! Services shared by every component on a page, provided via Leptos Context API.

use std::sync::Arc;

use leptos::prelude::*;

use crate::api::{Api, HttpTransport};
use crate::config::AppConfig;
use crate::geo::Geocoder;
use crate::maps::GoogleGeocoder;

/// Server client, geocoder and config, cloned into whatever needs them
#[derive(Clone)]
pub struct AppContext {
    pub api: Api,
    pub geocoder: Arc<dyn Geocoder>,
    pub config: Arc<AppConfig>,
}

impl AppContext {
    pub fn new(api: Api, geocoder: Arc<dyn Geocoder>, config: AppConfig) -> Self {
        Self { api, geocoder, config: Arc::new(config) }
    }

    /// Same-origin fetch plus the maps provider's geocoder
    pub fn browser(config: AppConfig) -> Self {
        let api = Api::new(Arc::new(HttpTransport::new(config.api_base.clone())));
        Self::new(api, Arc::new(GoogleGeocoder), config)
    }
}

/// Get the app context from context
pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
