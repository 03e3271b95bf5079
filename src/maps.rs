//! Maps Bindings
//!
//! Thin wrapper over the Google Maps JavaScript client loaded by the host page.
//! Only the handful of calls the pages need: map creation, markers, centring,
//! the idle event, geocoding and address autocomplete.

use futures::future::{FutureExt, LocalBoxFuture};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use crate::error::ApiError;
use crate::geo::{Bounds, Framing, GeoPoint, Geocoder};

#[wasm_bindgen(js_namespace = ["google", "maps"])]
extern "C" {
    #[wasm_bindgen(js_name = Map)]
    type GoogleMap;

    #[wasm_bindgen(constructor, js_class = "Map", catch)]
    fn new(el: &web_sys::HtmlElement, opts: &JsValue) -> Result<GoogleMap, JsValue>;

    #[wasm_bindgen(method, js_name = fitBounds)]
    fn fit_bounds(this: &GoogleMap, bounds: &JsValue);

    #[wasm_bindgen(method, js_name = setCenter)]
    fn set_center(this: &GoogleMap, center: &JsValue);

    #[wasm_bindgen(method, js_name = setZoom)]
    fn set_zoom(this: &GoogleMap, zoom: u8);

    #[wasm_bindgen(method, js_name = getBounds)]
    fn get_bounds(this: &GoogleMap) -> JsValue;

    #[wasm_bindgen(method, js_name = addListener)]
    fn add_listener(this: &GoogleMap, event: &str, handler: &js_sys::Function);

    #[wasm_bindgen(js_name = Marker)]
    type GoogleMarker;

    #[wasm_bindgen(constructor, js_class = "Marker", catch)]
    fn new(opts: &JsValue) -> Result<GoogleMarker, JsValue>;

    #[wasm_bindgen(js_name = Geocoder)]
    type GoogleGeocoderJs;

    #[wasm_bindgen(constructor, js_class = "Geocoder", catch)]
    fn new() -> Result<GoogleGeocoderJs, JsValue>;

    #[wasm_bindgen(method, catch)]
    fn geocode(this: &GoogleGeocoderJs, request: &JsValue) -> Result<js_sys::Promise, JsValue>;

    #[wasm_bindgen(js_name = Circle)]
    type GoogleCircle;

    #[wasm_bindgen(constructor, js_class = "Circle", catch)]
    fn new(opts: &JsValue) -> Result<GoogleCircle, JsValue>;

    #[wasm_bindgen(method, js_name = getBounds)]
    fn get_bounds(this: &GoogleCircle) -> JsValue;
}

#[wasm_bindgen(js_namespace = ["google", "maps", "places"])]
extern "C" {
    #[wasm_bindgen(js_name = Autocomplete)]
    #[derive(Clone)]
    type PlacesAutocomplete;

    #[wasm_bindgen(constructor, js_class = "Autocomplete", catch)]
    fn new(input: &web_sys::HtmlInputElement, opts: &JsValue) -> Result<PlacesAutocomplete, JsValue>;

    #[wasm_bindgen(method, js_name = setBounds)]
    fn set_bounds(this: &PlacesAutocomplete, bounds: &JsValue);

    #[wasm_bindgen(method, js_name = addListener)]
    fn add_listener(this: &PlacesAutocomplete, event: &str, handler: &js_sys::Function);
}

#[derive(Serialize, Deserialize)]
struct LatLngLiteral {
    lat: f64,
    lng: f64,
}

impl From<GeoPoint> for LatLngLiteral {
    fn from(p: GeoPoint) -> Self {
        Self { lat: p.latitude, lng: p.longitude }
    }
}

#[derive(Serialize, Deserialize)]
struct BoundsLiteral {
    south: f64,
    west: f64,
    north: f64,
    east: f64,
}

#[derive(Serialize)]
struct MapOptions {
    zoom: u8,
    center: LatLngLiteral,
}

#[derive(Serialize)]
struct AutocompleteOptions {
    types: [&'static str; 1],
}

#[derive(Serialize)]
struct CircleOptions {
    center: LatLngLiteral,
    radius: f64,
}

fn js_err(what: &str, e: JsValue) -> ApiError {
    ApiError::Network(format!("{}: {:?}", what, e))
}

/// The provider script is loaded by the page; it may be blocked or missing
pub fn available() -> bool {
    web_sys::window()
        .and_then(|w| js_sys::Reflect::get(&w, &"google".into()).ok())
        .map(|g| !g.is_undefined())
        .unwrap_or(false)
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, ApiError> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(ApiError::decode)
}

/// Calls `value.toJSON()` and decodes the plain object
fn from_to_json<T: for<'de> Deserialize<'de>>(value: &JsValue) -> Option<T> {
    let to_json = js_sys::Reflect::get(value, &"toJSON".into()).ok()?;
    let to_json: &js_sys::Function = to_json.dyn_ref()?;
    let plain = to_json.call0(value).ok()?;
    serde_wasm_bindgen::from_value(plain).ok()
}

pub struct MapWidget {
    map: GoogleMap,
}

impl MapWidget {
    pub fn create(el: &web_sys::HtmlElement, center: GeoPoint, zoom: u8) -> Result<Self, ApiError> {
        if !available() {
            return Err(ApiError::Unavailable("maps"));
        }
        let opts = to_js(&MapOptions { zoom, center: center.into() })?;
        let map = GoogleMap::new(el, &opts).map_err(|e| js_err("map", e))?;
        Ok(Self { map })
    }

    pub fn place_marker(&self, at: GeoPoint, title: &str) -> Result<(), ApiError> {
        let opts = js_sys::Object::new();
        let position = to_js(&LatLngLiteral::from(at))?;
        let set = |k: &str, v: &JsValue| js_sys::Reflect::set(&opts, &k.into(), v).map(|_| ());
        set("map", self.map.as_ref())
            .and_then(|_| set("position", &position))
            .and_then(|_| set("title", &title.into()))
            .map_err(|e| js_err("marker", e))?;
        GoogleMarker::new(&opts).map_err(|e| js_err("marker", e))?;
        Ok(())
    }

    /// Centre on one spot at `zoom`, or fit several
    pub fn frame(&self, framing: Framing, zoom: u8) -> Result<(), ApiError> {
        match framing {
            Framing::Center(at) => {
                self.map.set_center(&to_js(&LatLngLiteral::from(at))?);
                self.map.set_zoom(zoom);
            }
            Framing::Fit(bounds) => {
                let literal = BoundsLiteral {
                    south: bounds.south_west.latitude,
                    west: bounds.south_west.longitude,
                    north: bounds.north_east.latitude,
                    east: bounds.north_east.longitude,
                };
                self.map.fit_bounds(&to_js(&literal)?);
            }
        }
        Ok(())
    }

    /// Current viewport, once the map has laid itself out
    pub fn viewport(&self) -> Option<Bounds> {
        let b: BoundsLiteral = from_to_json(&self.map.get_bounds())?;
        Some(Bounds {
            south_west: GeoPoint::new(b.south, b.west),
            north_east: GeoPoint::new(b.north, b.east),
        })
    }

    /// Runs `f` every time the map settles after a pan or zoom
    pub fn on_idle(&self, f: impl FnMut() + 'static) {
        let cb = Closure::<dyn FnMut()>::new(f);
        self.map.add_listener("idle", cb.as_ref().unchecked_ref());
        // lives as long as the map, which lives as long as the page
        cb.forget();
    }
}

/// `google.maps.places.Autocomplete` on an address input
pub struct AddressAutocomplete {
    inner: PlacesAutocomplete,
}

impl AddressAutocomplete {
    /// Suggest addresses as the user types; `on_pick` gets the input's text
    /// once a suggestion is chosen
    pub fn attach(
        input: &web_sys::HtmlInputElement,
        mut on_pick: impl FnMut(String) + 'static,
    ) -> Result<Self, ApiError> {
        if !available() {
            return Err(ApiError::Unavailable("places"));
        }
        let opts = to_js(&AutocompleteOptions { types: ["geocode"] })?;
        let inner = PlacesAutocomplete::new(input, &opts).map_err(|e| js_err("autocomplete", e))?;

        let picked = input.clone();
        let cb = Closure::<dyn FnMut()>::new(move || on_pick(picked.value()));
        inner.add_listener("place_changed", cb.as_ref().unchecked_ref());
        cb.forget();
        Ok(Self { inner })
    }

    /// Prefer suggestions near the browser's position, when it shares one
    pub fn bias_to_browser_location(&self) {
        let Some(geolocation) = web_sys::window().and_then(|w| w.navigator().geolocation().ok()) else {
            return;
        };
        let inner = self.inner.clone();
        let on_position = Closure::once_into_js(move |position: JsValue| {
            let Some((at, accuracy)) = position_coords(&position) else {
                return;
            };
            let circle = to_js(&CircleOptions { center: at.into(), radius: accuracy })
                .and_then(|opts| GoogleCircle::new(&opts).map_err(|e| js_err("circle", e)));
            match circle {
                Ok(circle) => inner.set_bounds(&circle.get_bounds()),
                Err(e) => log::warn!("[MAPS] autocomplete bias skipped: {}", e),
            }
        });
        if let Err(e) = geolocation.get_current_position(on_position.unchecked_ref()) {
            log::debug!("[MAPS] geolocation unavailable: {:?}", e);
        }
    }
}

/// `position.coords` as a point plus its accuracy radius in metres
fn position_coords(position: &JsValue) -> Option<(GeoPoint, f64)> {
    let coords = js_sys::Reflect::get(position, &"coords".into()).ok()?;
    let field = |name: &str| js_sys::Reflect::get(&coords, &name.into()).ok()?.as_f64();
    Some((GeoPoint::new(field("latitude")?, field("longitude")?), field("accuracy")?))
}

/// [`Geocoder`] backed by `google.maps.Geocoder`
pub struct GoogleGeocoder;

impl Geocoder for GoogleGeocoder {
    fn geocode(&self, address: &str) -> LocalBoxFuture<'_, Result<Vec<GeoPoint>, ApiError>> {
        let address = address.to_string();
        async move {
            if !available() {
                return Err(ApiError::Unavailable("geocoding"));
            }
            let geocoder = GoogleGeocoderJs::new().map_err(|e| js_err("geocoder", e))?;
            let request = js_sys::Object::new();
            js_sys::Reflect::set(&request, &"address".into(), &address.as_str().into())
                .map_err(|e| js_err("geocoder", e))?;
            let promise = geocoder.geocode(&request).map_err(|e| js_err("geocoder", e))?;
            // The promise rejects on ZERO_RESULTS and provider errors alike
            let raw = JsFuture::from(promise)
                .await
                .map_err(|_| ApiError::Geocode(address.clone()))?;

            let results = js_sys::Reflect::get(&raw, &"results".into()).unwrap_or(JsValue::UNDEFINED);
            let points: Vec<GeoPoint> = js_sys::Array::from(&results)
                .iter()
                .filter_map(|r| {
                    let geometry = js_sys::Reflect::get(&r, &"geometry".into()).ok()?;
                    let location = js_sys::Reflect::get(&geometry, &"location".into()).ok()?;
                    let ll: LatLngLiteral = from_to_json(&location)?;
                    Some(GeoPoint::new(ll.lat, ll.lng))
                })
                .collect();

            if points.is_empty() {
                return Err(ApiError::Geocode(address));
            }
            log::debug!("[MAPS] {} resolved to {} result(s)", address, points.len());
            Ok(points)
        }
        .boxed_local()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_autocomplete_options_ask_for_addresses() {
        let opts = serde_json::to_value(AutocompleteOptions { types: ["geocode"] }).unwrap();
        assert_eq!(opts, serde_json::json!({ "types": ["geocode"] }));
    }

    #[test]
    fn test_bias_circle_uses_position_and_accuracy() {
        let opts = CircleOptions { center: GeoPoint::new(37.4, -122.1).into(), radius: 150.0 };
        assert_eq!(
            serde_json::to_value(opts).unwrap(),
            serde_json::json!({ "center": { "lat": 37.4, "lng": -122.1 }, "radius": 150.0 })
        );
    }
}
