//! Map view boundary.
//!
//! The renderer itself is external; this module builds the scene it draws
//! (tile layer, user marker, place markers and radius circles) and defines
//! the [`MapView`] trait the session drives.

use crate::constants::{OSM_ATTRIBUTION, OSM_TILE_URL};
use crate::models::{Coordinates, PoiCategory, PositionSample};
use crate::services::registry::PoiRegistry;
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject, Value};
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconKind {
    User,
    Place(PoiCategory),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub position: Coordinates,
    pub icon: IconKind,
    pub popup: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CircleStyle {
    pub color: String,
    pub fill_opacity: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub center: Coordinates,
    pub radius_m: f64,
    pub style: CircleStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TileLayer {
    pub url: String,
    pub attribution: String,
}

impl Default for TileLayer {
    fn default() -> Self {
        TileLayer {
            url: OSM_TILE_URL.to_string(),
            attribution: OSM_ATTRIBUTION.to_string(),
        }
    }
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct MapScene {
    pub center: Coordinates,
    pub zoom: u8,
    pub tile_layer: TileLayer,
    pub markers: Vec<Marker>,
    pub circles: Vec<Circle>,
}

impl MapScene {
    /// Scene for the current position. Without a fix the map centres on the
    /// first place and shows no user marker.
    pub fn build(registry: &PoiRegistry, position: Option<&PositionSample>, zoom: u8) -> Self {
        let center = position
            .map(|p| p.location)
            .unwrap_or(registry.first().location);

        let mut markers = Vec::with_capacity(registry.len() + 1);
        let mut circles = Vec::with_capacity(registry.len());

        for poi in registry.iter() {
            markers.push(Marker {
                position: poi.location,
                icon: IconKind::Place(poi.category),
                popup: format!("{}: {}", poi.name, poi.description),
            });
            circles.push(Circle {
                center: poi.location,
                radius_m: poi.notification_radius_m,
                style: CircleStyle {
                    color: poi.category.circle_color().to_string(),
                    fill_opacity: 0.15,
                },
            });
        }

        if let Some(sample) = position {
            markers.push(Marker {
                position: sample.location,
                icon: IconKind::User,
                popup: sample.popup_text(),
            });
        }

        MapScene {
            center,
            zoom,
            tile_layer: TileLayer::default(),
            markers,
            circles,
        }
    }

    pub fn user_marker(&self) -> Option<&Marker> {
        self.markers.iter().find(|m| m.icon == IconKind::User)
    }

    /// Markers and circles as a GeoJSON feature collection. Circles are
    /// points carrying a `radius_m` property.
    pub fn to_geojson(&self) -> GeoJson {
        let mut features = Vec::with_capacity(self.markers.len() + self.circles.len());

        for marker in &self.markers {
            let (kind, category) = match marker.icon {
                IconKind::User => ("user", None),
                IconKind::Place(category) => ("place", Some(category.to_string())),
            };
            let mut properties = JsonObject::new();
            properties.insert("kind".to_string(), json!(kind));
            properties.insert("popup".to_string(), json!(marker.popup));
            if let Some(category) = category {
                properties.insert("category".to_string(), json!(category));
            }
            features.push(point_feature(&marker.position, properties));
        }

        for circle in &self.circles {
            let mut properties = JsonObject::new();
            properties.insert("kind".to_string(), json!("radius"));
            properties.insert("radius_m".to_string(), json!(circle.radius_m));
            properties.insert("color".to_string(), json!(circle.style.color));
            properties.insert("fill_opacity".to_string(), json!(circle.style.fill_opacity));
            features.push(point_feature(&circle.center, properties));
        }

        let mut foreign_members = JsonObject::new();
        foreign_members.insert(
            "center".to_string(),
            json!([self.center.lng, self.center.lat]),
        );
        foreign_members.insert("zoom".to_string(), json!(self.zoom));

        GeoJson::FeatureCollection(FeatureCollection {
            bbox: None,
            features,
            foreign_members: Some(foreign_members),
        })
    }
}

fn point_feature(at: &Coordinates, properties: JsonObject) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Point(vec![at.lng, at.lat]))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

/// External map renderer.
pub trait MapView: Send {
    /// Called on every position update.
    fn recenter(&mut self, center: Coordinates, zoom: u8);

    fn render(&mut self, scene: &MapScene);
}
