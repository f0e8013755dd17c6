//! Admin1 boundary features loaded from the prepared GeoJSON collection.

use geo_types::{Coord, Rect};
use serde_json::Map;
use std::fs;
use std::path::Path;
use tracing::info;

use super::geometry::{rect_covers, Boundary};
use crate::error::{LocusError, Result};
use crate::models::{AdminProperties, Feature, FeatureCollection, LocationProperties, PropertyMap};

/// Path of the admin1 collection inside a data directory.
pub const ADMIN1_FILE: &str = "states/admin1.json";

/// A single admin1 boundary: the feature as loaded, its typed properties
/// and the geometry used for containment.
#[derive(Debug, Clone)]
pub struct AdminBoundary {
    pub properties: AdminProperties,
    /// Feature exactly as it appears in the dataset
    pub feature: Feature<PropertyMap>,
    geometry: Boundary,
    bbox: Option<Rect<f64>>,
}

impl AdminBoundary {
    /// Validate a GeoJSON feature into a boundary. `index` is only used in errors.
    pub fn from_feature(index: usize, feature: Feature<PropertyMap>) -> Result<Self> {
        let properties =
            AdminProperties::from_raw(&feature.properties).map_err(|e| {
                LocusError::InvalidFeature {
                    index,
                    reason: e.to_string(),
                }
            })?;
        let geometry = Boundary::from(&feature.geometry);
        let bbox = geometry.bounding_rect();

        Ok(Self {
            properties,
            feature,
            geometry,
            bbox,
        })
    }

    /// Crossing-number containment, skipped when the point is outside the bounding box.
    pub fn contains(&self, point: Coord<f64>) -> bool {
        match &self.bbox {
            Some(rect) if rect_covers(rect, point) => self.geometry.contains(point),
            _ => false,
        }
    }

    /// Copy of the feature as stored.
    pub fn to_raw_feature(&self) -> Feature<PropertyMap> {
        self.feature.clone()
    }

    /// The stored geometry with the flat location property set.
    pub fn to_location_feature(&self) -> Feature<LocationProperties> {
        Feature::new(self.properties.location(), self.feature.geometry.clone())
    }

    /// The feature as a state boundary: `{country_a2, region_code, state_code}`.
    pub fn to_state_feature(&self, state_code: &str) -> Feature<PropertyMap> {
        let mut properties = Map::new();
        properties.insert("country_a2".into(), self.properties.country_a2.clone().into());
        properties.insert("region_code".into(), self.properties.region_code.clone().into());
        properties.insert("state_code".into(), state_code.into());
        Feature::new(properties, self.feature.geometry.clone())
    }
}

/// Parse and validate an admin1 feature collection.
pub fn parse_admin_boundaries(collection: FeatureCollection<PropertyMap>) -> Result<Vec<AdminBoundary>> {
    collection
        .features
        .into_iter()
        .enumerate()
        .map(|(index, feature)| AdminBoundary::from_feature(index, feature))
        .collect()
}

/// Load the admin1 collection from a data directory, keeping dataset order.
pub fn load_admin_boundaries(root: &Path) -> Result<Vec<AdminBoundary>> {
    let path = root.join(ADMIN1_FILE);
    info!("Loading admin boundaries from {}", path.display());

    let content = fs::read_to_string(&path).map_err(|source| LocusError::Io {
        path: path.clone(),
        source,
    })?;
    let collection: FeatureCollection<PropertyMap> =
        serde_json::from_str(&content).map_err(|source| LocusError::Parse {
            path: path.clone(),
            source,
        })?;

    let boundaries = parse_admin_boundaries(collection)?;
    info!("Found {} admin boundaries", boundaries.len());
    Ok(boundaries)
}
