//! Geo Utilities
//!
//! Coordinates, viewport bounds and the geocoding seam. The actual geocoder
//! lives behind [`Geocoder`] so edit forms can be driven without a browser.

use futures::future::LocalBoxFuture;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// Rectangular viewport, south-west and north-east corners
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub south_west: GeoPoint,
    pub north_east: GeoPoint,
}

impl Bounds {
    /// Smallest box holding every point; `None` for no points
    pub fn around(points: &[GeoPoint]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut bounds = Bounds { south_west: *first, north_east: *first };
        for p in rest {
            bounds.extend(*p);
        }
        Some(bounds)
    }

    fn extend(&mut self, p: GeoPoint) {
        self.south_west.latitude = self.south_west.latitude.min(p.latitude);
        self.south_west.longitude = self.south_west.longitude.min(p.longitude);
        self.north_east.latitude = self.north_east.latitude.max(p.latitude);
        self.north_east.longitude = self.north_east.longitude.max(p.longitude);
    }

    fn is_point(&self) -> bool {
        self.south_west == self.north_east
    }

    /// `/map/{swLat}/{swLng}/{neLat}/{neLng}`
    pub fn map_path(&self) -> String {
        format!(
            "/map/{}/{}/{}/{}",
            self.south_west.latitude,
            self.south_west.longitude,
            self.north_east.latitude,
            self.north_east.longitude
        )
    }
}

/// How to frame a set of results on a map
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Framing {
    /// One spot: centre on it at the configured zoom
    Center(GeoPoint),
    /// Several spots: fit their bounding box
    Fit(Bounds),
}

impl Framing {
    /// `None` when there is nothing to show. A zero-area box is framed as a
    /// centre, since fitting it zooms the map all the way in.
    pub fn for_points(points: &[GeoPoint]) -> Option<Self> {
        let bounds = Bounds::around(points)?;
        Some(if bounds.is_point() { Framing::Center(bounds.south_west) } else { Framing::Fit(bounds) })
    }
}

/// Resolves free-text addresses to coordinates
pub trait Geocoder: Send + Sync {
    /// Every match, best first; zero matches is an error
    fn geocode(&self, address: &str) -> LocalBoxFuture<'_, Result<Vec<GeoPoint>, ApiError>>;
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use futures::future::FutureExt;

    /// Geocoder with one fixed answer
    pub struct FixedGeocoder(pub Result<Vec<GeoPoint>, ApiError>);

    impl Geocoder for FixedGeocoder {
        fn geocode(&self, _address: &str) -> LocalBoxFuture<'_, Result<Vec<GeoPoint>, ApiError>> {
            let answer = self.0.clone();
            async move { answer }.boxed_local()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_around() {
        let pts = [
            GeoPoint::new(37.0, -122.0),
            GeoPoint::new(38.5, -121.0),
            GeoPoint::new(36.5, -123.5),
        ];
        let b = Bounds::around(&pts).unwrap();
        assert_eq!(b.south_west, GeoPoint::new(36.5, -123.5));
        assert_eq!(b.north_east, GeoPoint::new(38.5, -121.0));
        assert_eq!(Bounds::around(&[]), None);
    }

    #[test]
    fn test_single_result_is_centred_not_fitted() {
        let here = GeoPoint::new(37.4, -122.1);
        assert_eq!(Framing::for_points(&[here]), Some(Framing::Center(here)));
        assert_eq!(Framing::for_points(&[here, here]), Some(Framing::Center(here)));
        assert_eq!(Framing::for_points(&[]), None);
    }

    #[test]
    fn test_several_results_are_fitted() {
        let pts = [GeoPoint::new(1.0, 2.0), GeoPoint::new(3.0, 4.0)];
        match Framing::for_points(&pts) {
            Some(Framing::Fit(b)) => assert_eq!(b.north_east, GeoPoint::new(3.0, 4.0)),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_map_path() {
        let b = Bounds {
            south_west: GeoPoint::new(1.5, -2.0),
            north_east: GeoPoint::new(3.0, 4.25),
        };
        assert_eq!(b.map_path(), "/map/1.5/-2/3/4.25");
    }
}
