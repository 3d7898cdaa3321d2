use crate::constants::EARTH_RADIUS_METERS;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Haversine of an angle in radians.
fn hav(theta: f64) -> f64 {
    let half = (theta / 2.0).sin();
    half * half
}

impl Coordinates {
    /// Checked construction for coordinates read from data files.
    pub fn new(lat: f64, lng: f64) -> Result<Self, String> {
        let point = Coordinates { lat, lng };
        if point.is_valid() {
            Ok(point)
        } else {
            Err(format!("Coordinates out of range: {}", point))
        }
    }

    /// Latitude within ±90° and longitude within ±180°.
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }

    /// Great-circle distance in meters on a sphere of radius
    /// [`EARTH_RADIUS_METERS`].
    pub fn distance_to(&self, other: &Coordinates) -> f64 {
        let (phi1, phi2) = (self.lat.to_radians(), other.lat.to_radians());
        let h = hav(phi2 - phi1)
            + phi1.cos() * phi2.cos() * hav((other.lng - self.lng).to_radians());

        2.0 * EARTH_RADIUS_METERS * h.sqrt().min(1.0).asin()
    }

    /// Shift by raw degree deltas. Longitude steps shrink in meters away from
    /// the equator; that is accepted for simulated movement.
    pub fn offset(&self, delta_lat: f64, delta_lng: f64) -> Self {
        Coordinates {
            lat: self.lat + delta_lat,
            lng: self.lng + delta_lng,
        }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.lat, self.lng)
    }
}

/// Distance in meters between two coordinates.
pub fn distance(a: &Coordinates, b: &Coordinates) -> f64 {
    a.distance_to(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_validation() {
        assert!(Coordinates::new(10.2929, 123.9013).is_ok());
        assert!(Coordinates::new(91.0, 0.0).is_err());
        assert!(Coordinates::new(0.0, 181.0).is_err());
        assert!(!Coordinates { lat: f64::NAN, lng: 0.0 }.is_valid());
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        let points = [
            Coordinates { lat: 10.2929, lng: 123.9013 },
            Coordinates { lat: -33.8688, lng: 151.2093 },
            Coordinates { lat: 0.0, lng: 0.0 },
            Coordinates { lat: 89.9, lng: -179.9 },
        ];
        for p in points {
            assert_eq!(distance(&p, &p), 0.0);
        }
    }

    #[test]
    fn test_distance_is_symmetric() {
        let cross = Coordinates { lat: 10.2929, lng: 123.9013 };
        let fort = Coordinates { lat: 10.2925, lng: 123.9058 };
        let leah = Coordinates { lat: 10.3703, lng: 123.8714 };

        assert_eq!(distance(&cross, &fort), distance(&fort, &cross));
        assert_eq!(distance(&cross, &leah), distance(&leah, &cross));
    }

    #[test]
    fn test_distance_calculation() {
        let paris = Coordinates::new(48.8566, 2.3522).unwrap();
        let london = Coordinates::new(51.5074, -0.1278).unwrap();

        let meters = paris.distance_to(&london);
        // Paris to London is approximately 344 km
        assert!((meters - 344_000.0).abs() < 10_000.0);
    }

    #[test]
    fn test_small_step_distance() {
        // 0.0001 degrees of latitude is ~11.1m everywhere
        let a = Coordinates { lat: 10.2929, lng: 123.9013 };
        let b = a.offset(0.0001, 0.0);
        let d = a.distance_to(&b);
        assert!((d - 11.12).abs() < 0.05, "got {}", d);
    }

    #[test]
    fn test_antipodes_are_half_the_circumference() {
        let a = Coordinates { lat: 0.0, lng: 0.0 };
        let b = Coordinates { lat: 0.0, lng: 180.0 };
        let half = std::f64::consts::PI * EARTH_RADIUS_METERS;
        assert!((a.distance_to(&b) - half).abs() < 1e-6);
    }

    #[test]
    fn test_display_six_decimals() {
        let c = Coordinates { lat: 10.2929, lng: 123.9013 };
        assert_eq!(c.to_string(), "10.292900, 123.901300");
    }
}
