//! Profile Map Component
//!
//! Mini map with a single marker at the business address. Hidden whenever
//! the address cannot be placed.

use leptos::html::Div;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app_context;
use crate::geo::{Framing, GeoPoint};
use crate::maps::MapWidget;

#[component]
pub fn ProfileMap(#[prop(into)] address: String) -> impl IntoView {
    let ctx = use_app_context();
    let map_ref = NodeRef::<Div>::new();
    let (visible, set_visible) = signal(false);

    Effect::new(move |created: Option<bool>| {
        if created == Some(true) {
            return true;
        }
        let Some(el) = map_ref.get() else {
            return false;
        };
        if address.trim().is_empty() {
            return true;
        }
        let (lat, lng) = ctx.config.map_center;
        let map = match MapWidget::create(&el, GeoPoint::new(lat, lng), ctx.config.profile_map_zoom) {
            Ok(map) => map,
            Err(e) => {
                log::warn!("[MAP] profile map unavailable: {}", e);
                return true;
            }
        };
        let zoom = ctx.config.profile_map_zoom;
        let geocoder = ctx.geocoder.clone();
        let address = address.clone();
        spawn_local(async move {
            let point = match geocoder.geocode(&address).await {
                Ok(points) => points.into_iter().next(),
                Err(e) => {
                    log::warn!("[MAP] {}", e);
                    None
                }
            };
            let Some(point) = point else {
                set_visible.set(false);
                return;
            };
            set_visible.set(true);
            let placed = map.place_marker(point, &address).and_then(|_| map.frame(Framing::Center(point), zoom));
            if let Err(e) = placed {
                log::warn!("[MAP] {}", e);
            }
        });
        true
    });

    view! {
        <div id="map" class="profile-map" node_ref=map_ref hidden=move || !visible.get()></div>
    }
}
