//! Map View Component
//!
//! Index page map. Each time the map settles, businesses inside the visible
//! bounds are fetched and pinned; search results are geocoded, pinned and
//! framed. A business is pinned at most once.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use leptos::html::Div;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::InlineError;
use crate::context::{use_app_context, AppContext};
use crate::error::{ApiError, FailurePolicy};
use crate::geo::{Framing, GeoPoint};
use crate::maps::MapWidget;
use crate::models::{Business, MapPin};

fn viewport_failure(err: &ApiError) -> String {
    FailurePolicy::widget_message("nearby businesses", err)
}

async fn pin_location(ctx: &AppContext, pin: &MapPin) -> Option<GeoPoint> {
    if let Some(point) = pin.point() {
        return Some(point);
    }
    match ctx.geocoder.geocode(&pin.location).await {
        Ok(points) => points.first().copied(),
        Err(e) => {
            log::warn!("[MAP] no position for {}: {}", pin.id, e);
            None
        }
    }
}

#[component]
pub fn MapView(#[prop(into)] focus: Signal<Vec<Business>>) -> impl IntoView {
    let ctx = use_app_context();
    let map_ref = NodeRef::<Div>::new();
    let (error, set_error) = signal::<Option<String>>(None);
    let (ready, set_ready) = signal(false);

    let slot: Rc<RefCell<Option<Rc<MapWidget>>>> = Rc::default();
    let placed: Rc<RefCell<HashSet<String>>> = Rc::default();

    let create_ctx = ctx.clone();
    let create_slot = slot.clone();
    let create_placed = placed.clone();
    Effect::new(move |created: Option<bool>| {
        if created == Some(true) {
            return true;
        }
        let Some(el) = map_ref.get() else {
            return false;
        };
        let ctx = create_ctx.clone();
        let (lat, lng) = ctx.config.map_center;
        let map = match MapWidget::create(&el, GeoPoint::new(lat, lng), ctx.config.map_zoom) {
            Ok(map) => Rc::new(map),
            Err(e) => {
                log::warn!("[MAP] {}", e);
                set_error.set(Some(FailurePolicy::widget_message("the map", &e)));
                return true;
            }
        };
        *create_slot.borrow_mut() = Some(map.clone());
        set_ready.set(true);

        let placed = create_placed.clone();
        let idle_map = map.clone();
        map.on_idle(move || {
            let Some(bounds) = idle_map.viewport() else {
                return;
            };
            let map = idle_map.clone();
            let placed = placed.clone();
            let ctx = ctx.clone();
            spawn_local(async move {
                let pins = match ctx.api.businesses_in_bounds(&bounds).await {
                    Ok(pins) => {
                        set_error.set(None);
                        pins
                    }
                    Err(e) => {
                        log::error!("[MAP] viewport fetch failed: {}", e);
                        set_error.set(Some(viewport_failure(&e)));
                        return;
                    }
                };
                for pin in pins {
                    if placed.borrow().contains(&pin.id) {
                        continue;
                    }
                    let Some(point) = pin_location(&ctx, &pin).await else {
                        continue;
                    };
                    // another pass may have pinned it during the await
                    if !placed.borrow_mut().insert(pin.id.clone()) {
                        continue;
                    }
                    if let Err(e) = map.place_marker(point, &pin.name) {
                        log::warn!("[MAP] marker for {} failed: {}", pin.id, e);
                    }
                }
            });
        });
        true
    });

    // Search results: pin each and frame them all
    Effect::new(move |_| {
        let businesses = focus.get();
        if !ready.get() || businesses.is_empty() {
            return;
        }
        let Some(map) = slot.borrow().clone() else {
            return;
        };
        let ctx = ctx.clone();
        let placed = placed.clone();
        spawn_local(async move {
            let mut points = Vec::new();
            for business in businesses.iter().filter(|b| !b.location.trim().is_empty()) {
                let point = match ctx.geocoder.geocode(&business.location).await {
                    Ok(found) => match found.first() {
                        Some(point) => *point,
                        None => continue,
                    },
                    Err(e) => {
                        log::warn!("[MAP] no position for {}: {}", business.id, e);
                        continue;
                    }
                };
                points.push(point);
                if placed.borrow_mut().insert(business.id.clone()) {
                    if let Err(e) = map.place_marker(point, &business.name) {
                        log::warn!("[MAP] marker for {} failed: {}", business.id, e);
                    }
                }
            }
            if let Some(framing) = Framing::for_points(&points) {
                if let Err(e) = map.frame(framing, ctx.config.profile_map_zoom) {
                    log::warn!("[MAP] {}", e);
                }
            }
        });
    });

    view! {
        <section class="map-section">
            <div id="map" class="map" node_ref=map_ref></div>
            <InlineError message=error />
        </section>
    }
}
