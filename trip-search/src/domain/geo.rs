//! Coordinates, bounding boxes and great-circle distance.

use serde::{Deserialize, Serialize};

/// Kilometres per degree of latitude, used for bounding-box approximations.
const KM_PER_DEGREE: f64 = 111.0;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Haversine distance to `other` in kilometres.
    pub fn distance_km(&self, other: &Coordinates) -> f64 {
        haversine::distance(
            haversine::Location {
                latitude: self.latitude,
                longitude: self.longitude,
            },
            haversine::Location {
                latitude: other.latitude,
                longitude: other.longitude,
            },
            haversine::Units::Kilometers,
        )
    }

    /// Whether `other` lies within `radius_km` of this point.
    pub fn within(&self, other: &Coordinates, radius_km: f64) -> bool {
        self.distance_km(other) <= radius_km
    }
}

/// A lat/lon rectangle, in the `top_left` / `bottom_right` shape that
/// bounding-box APIs expect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub top_left: Coordinates,
    pub bottom_right: Coordinates,
}

impl BoundingBox {
    /// Build a box from its north/west/south/east edges.
    pub const fn from_edges(north: f64, west: f64, south: f64, east: f64) -> Self {
        Self {
            top_left: Coordinates {
                latitude: north,
                longitude: west,
            },
            bottom_right: Coordinates {
                latitude: south,
                longitude: east,
            },
        }
    }

    /// A box enclosing the circle of `radius_km` around `center`.
    ///
    /// Longitude span widens with latitude (`r / (111 * cos(lat))`).
    pub fn around(center: Coordinates, radius_km: f64) -> Self {
        let delta_lat = radius_km / KM_PER_DEGREE;
        let cos_lat = center.latitude.to_radians().cos().abs().max(1e-6);
        let delta_lon = radius_km / (KM_PER_DEGREE * cos_lat);

        Self::from_edges(
            center.latitude + delta_lat,
            center.longitude - delta_lon,
            center.latitude - delta_lat,
            center.longitude + delta_lon,
        )
    }

    /// Whether a point falls inside the box (edges inclusive).
    #[cfg(test)]
    fn contains(&self, point: &Coordinates) -> bool {
        point.latitude <= self.top_left.latitude
            && point.latitude >= self.bottom_right.latitude
            && point.longitude >= self.top_left.longitude
            && point.longitude <= self.bottom_right.longitude
    }
}
