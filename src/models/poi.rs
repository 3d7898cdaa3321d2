use crate::models::Coordinates;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PoiCategory {
    Historic,
    Religious,
    Monument,
    Museum,
    Landmark,
    Nature,
    Shopping,
}

impl fmt::Display for PoiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PoiCategory::Historic => "historic",
            PoiCategory::Religious => "religious",
            PoiCategory::Monument => "monument",
            PoiCategory::Museum => "museum",
            PoiCategory::Landmark => "landmark",
            PoiCategory::Nature => "nature",
            PoiCategory::Shopping => "shopping",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for PoiCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "historic" => Ok(PoiCategory::Historic),
            "religious" => Ok(PoiCategory::Religious),
            "monument" => Ok(PoiCategory::Monument),
            "museum" => Ok(PoiCategory::Museum),
            "landmark" => Ok(PoiCategory::Landmark),
            "nature" => Ok(PoiCategory::Nature),
            "shopping" => Ok(PoiCategory::Shopping),
            _ => Err(format!("Invalid POI category: {}", s)),
        }
    }
}

impl PoiCategory {
    /// Stroke colour of the radius circle drawn around POIs of this category.
    pub fn circle_color(&self) -> &'static str {
        match self {
            PoiCategory::Historic | PoiCategory::Monument => "#b45309",
            PoiCategory::Religious => "#7c3aed",
            PoiCategory::Museum => "#0369a1",
            PoiCategory::Landmark => "#dc2626",
            PoiCategory::Nature => "#15803d",
            PoiCategory::Shopping => "#db2777",
        }
    }
}

/// A famous place. Immutable once the registry is loaded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Poi {
    pub id: u32,
    pub name: String,
    pub location: Coordinates,
    pub description: String,
    pub category: PoiCategory,
    pub notification_radius_m: f64,
}

impl Poi {
    /// Whether `point` lies within this POI's notification radius.
    /// Returns the distance alongside so callers can report it.
    pub fn range_check(&self, point: &Coordinates) -> (bool, f64) {
        let d = self.location.distance_to(point);
        (d <= self.notification_radius_m, d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cross() -> Poi {
        Poi {
            id: 1,
            name: "Magellan's Cross".to_string(),
            location: Coordinates { lat: 10.2929, lng: 123.9013 },
            description: "Cross planted in 1521".to_string(),
            category: PoiCategory::Historic,
            notification_radius_m: 50.0,
        }
    }

    #[test]
    fn test_poi_category_parsing() {
        assert_eq!("historic".parse::<PoiCategory>().unwrap(), PoiCategory::Historic);
        assert_eq!("NATURE".parse::<PoiCategory>().unwrap(), PoiCategory::Nature);
        assert!("volcano".parse::<PoiCategory>().is_err());
    }

    #[test]
    fn test_range_check_boundary() {
        let poi = cross();
        let (inside, d) = poi.range_check(&poi.location);
        assert!(inside);
        assert_eq!(d, 0.0);

        // ~44m north: inside a 50m radius
        let (inside, _) = poi.range_check(&poi.location.offset(0.0004, 0.0));
        assert!(inside);

        // ~56m north: outside
        let (inside, d) = poi.range_check(&poi.location.offset(0.0005, 0.0));
        assert!(!inside);
        assert!(d > 50.0);
    }

    #[test]
    fn test_category_serde_lowercase() {
        let json = serde_json::to_string(&PoiCategory::Religious).unwrap();
        assert_eq!(json, "\"religious\"");
    }
}
