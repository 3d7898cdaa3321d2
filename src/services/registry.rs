use crate::error::{GuideError, Result};
use crate::models::Poi;
use std::collections::HashSet;
use std::path::Path;

/// Built-in famous places, embedded at compile time.
const BUILTIN_PLACES: &str = include_str!("../../data/famous_places.json");

/// Fixed, ordered list of points of interest. Read-only after load.
#[derive(Debug, Clone)]
pub struct PoiRegistry {
    pois: Vec<Poi>,
}

impl PoiRegistry {
    /// The embedded famous-places dataset.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_PLACES)
    }

    /// Load a replacement dataset from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let registry = Self::from_json(&raw)?;
        tracing::info!(
            "Loaded {} places from {}",
            registry.len(),
            path.display()
        );
        Ok(registry)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let pois: Vec<Poi> = serde_json::from_str(raw)?;
        Self::new(pois)
    }

    pub fn new(pois: Vec<Poi>) -> Result<Self> {
        if pois.is_empty() {
            return Err(GuideError::Registry(
                "at least one place is required".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for poi in &pois {
            if !seen.insert(poi.id) {
                return Err(GuideError::Registry(format!(
                    "duplicate place id {} ({})",
                    poi.id, poi.name
                )));
            }
            if !poi.location.is_valid() {
                return Err(GuideError::Registry(format!(
                    "place {} has invalid location {}",
                    poi.name, poi.location
                )));
            }
            if !(poi.notification_radius_m.is_finite() && poi.notification_radius_m > 0.0) {
                return Err(GuideError::Registry(format!(
                    "place {} has invalid radius {}",
                    poi.name, poi.notification_radius_m
                )));
            }
        }

        Ok(PoiRegistry { pois })
    }

    pub fn pois(&self) -> &[Poi] {
        &self.pois
    }

    pub fn iter(&self) -> impl Iterator<Item = &Poi> {
        self.pois.iter()
    }

    pub fn get(&self, id: u32) -> Option<&Poi> {
        self.pois.iter().find(|p| p.id == id)
    }

    /// First entry; the simulated source starts here.
    pub fn first(&self) -> &Poi {
        // `new` rejects empty lists
        &self.pois[0]
    }

    pub fn len(&self) -> usize {
        self.pois.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pois.is_empty()
    }
}
