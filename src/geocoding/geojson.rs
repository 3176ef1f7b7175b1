//! Offline country lookup against GeoJSON boundaries
//!
//! Accepts a `FeatureCollection` whose features carry `Polygon` or
//! `MultiPolygon` geometries. Coordinates are `[longitude, latitude]` as
//! GeoJSON prescribes; the first ring of a polygon is its outline and any
//! further rings are holes.

use super::CountryResolver;
use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::Path;
use tracing::{debug, info, warn};

#[derive(Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct Feature {
    #[serde(default)]
    properties: Option<Map<String, Value>>,
    #[serde(default)]
    geometry: Option<Geometry>,
}

type Position = Vec<f64>;

#[derive(Deserialize)]
#[serde(tag = "type")]
enum Geometry {
    Polygon { coordinates: Vec<Vec<Position>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Position>>> },
    #[serde(other)]
    Unsupported,
}

/// Ring of `(longitude, latitude)` vertices
type Ring = Vec<(f64, f64)>;

#[derive(Debug, Clone)]
struct Polygon {
    outline: Ring,
    holes: Vec<Ring>,
}

impl Polygon {
    fn from_rings(rings: Vec<Vec<Position>>) -> Option<Self> {
        let mut rings = rings.into_iter().map(|ring| {
            ring.into_iter()
                .filter(|position| position.len() >= 2)
                .map(|position| (position[0], position[1]))
                .collect::<Ring>()
        });
        let outline = rings.next().filter(|ring| ring.len() >= 3)?;
        Some(Self {
            outline,
            holes: rings.filter(|ring| ring.len() >= 3).collect(),
        })
    }

    fn contains(&self, lon: f64, lat: f64) -> bool {
        ring_contains(&self.outline, lon, lat)
            && !self.holes.iter().any(|hole| ring_contains(hole, lon, lat))
    }
}

/// Even-odd ray casting test
fn ring_contains(ring: &[(f64, f64)], lon: f64, lat: f64) -> bool {
    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let (xi, yi) = ring[i];
        let (xj, yj) = ring[j];
        if (yi > lat) != (yj > lat) && lon < (xj - xi) * (lat - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

#[derive(Debug, Clone)]
struct CountryShape {
    name: String,
    polygons: Vec<Polygon>,
    // min_lon, min_lat, max_lon, max_lat
    bbox: (f64, f64, f64, f64),
}

impl CountryShape {
    fn new(name: String, polygons: Vec<Polygon>) -> Self {
        let bbox = polygons
            .iter()
            .flat_map(|polygon| polygon.outline.iter())
            .fold(
                (f64::MAX, f64::MAX, f64::MIN, f64::MIN),
                |(min_x, min_y, max_x, max_y), &(x, y)| {
                    (min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y))
                },
            );
        Self {
            name,
            polygons,
            bbox,
        }
    }

    fn contains(&self, lon: f64, lat: f64) -> bool {
        let (min_x, min_y, max_x, max_y) = self.bbox;
        (min_x..=max_x).contains(&lon)
            && (min_y..=max_y).contains(&lat)
            && self.polygons.iter().any(|polygon| polygon.contains(lon, lat))
    }
}

/// Point-in-polygon resolver over a preloaded boundary dataset
#[derive(Debug, Clone, Default)]
pub struct GeoJsonResolver {
    countries: Vec<CountryShape>,
}

impl GeoJsonResolver {
    /// Load boundaries from a GeoJSON file
    pub fn from_path(path: impl AsRef<Path>, name_property: &str) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read country boundaries: {}", path.display()))?;
        let resolver = Self::from_geojson(&data, name_property)
            .with_context(|| format!("Invalid country boundaries in {}", path.display()))?;
        info!(
            "Loaded {} country boundaries from {}",
            resolver.len(),
            path.display()
        );
        Ok(resolver)
    }

    /// Parse boundaries from GeoJSON text
    pub fn from_geojson(data: &str, name_property: &str) -> Result<Self> {
        let collection: FeatureCollection =
            serde_json::from_str(data).with_context(|| "Failed to parse GeoJSON")?;

        let mut countries = Vec::new();
        for (index, feature) in collection.features.into_iter().enumerate() {
            let name = feature
                .properties
                .as_ref()
                .and_then(|properties| properties.get(name_property))
                .and_then(Value::as_str)
                .map(str::to_string);
            let Some(name) = name else {
                warn!("Skipping feature {index}: no '{name_property}' property");
                continue;
            };

            let polygons: Vec<Polygon> = match feature.geometry {
                Some(Geometry::Polygon { coordinates }) => {
                    Polygon::from_rings(coordinates).into_iter().collect()
                }
                Some(Geometry::MultiPolygon { coordinates }) => coordinates
                    .into_iter()
                    .filter_map(Polygon::from_rings)
                    .collect(),
                Some(Geometry::Unsupported) | None => Vec::new(),
            };
            if polygons.is_empty() {
                debug!("Skipping feature '{name}': no usable polygon geometry");
                continue;
            }

            countries.push(CountryShape::new(name, polygons));
        }

        Ok(Self { countries })
    }

    /// Number of countries with usable boundaries
    #[must_use]
    pub fn len(&self) -> usize {
        self.countries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }
}

impl CountryResolver for GeoJsonResolver {
    fn resolve_country(&self, latitude: f64, longitude: f64) -> Result<Option<String>> {
        Ok(self
            .countries
            .iter()
            .find(|country| country.contains(longitude, latitude))
            .map(|country| country.name.clone()))
    }
}
