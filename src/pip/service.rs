//! Reverse geocoding: which admin1 unit contains a coordinate.

use serde::Serialize;
use serde_json::Value;
use std::str::FromStr;
use tracing::debug;

use super::{AdminBoundary, AdminBoundaryIndex};
use crate::error::{LocusError, Result};
use crate::models::{FeatureCollection, LocationProperties, PropertyMap};

/// Shape of a reverse lookup result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// Flat property set
    #[default]
    Default,
    /// Single-feature collection with the dataset's own properties
    Raw,
    /// Single-feature collection with the flat property set
    GeoJson,
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "default" => Ok(OutputMode::Default),
            "raw" => Ok(OutputMode::Raw),
            "geojson" => Ok(OutputMode::GeoJson),
            other => Err(format!("unknown output format: {}", other)),
        }
    }
}

/// A reverse lookup match.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Location {
    Properties(LocationProperties),
    Raw(FeatureCollection<PropertyMap>),
    GeoJson(FeatureCollection<LocationProperties>),
}

impl Location {
    fn render(boundary: &AdminBoundary, mode: OutputMode) -> Self {
        match mode {
            OutputMode::Default => Location::Properties(boundary.properties.location()),
            OutputMode::Raw => Location::Raw(FeatureCollection::single(boundary.to_raw_feature())),
            OutputMode::GeoJson => {
                Location::GeoJson(FeatureCollection::single(boundary.to_location_feature()))
            }
        }
    }

    /// The flat property set, for the modes that carry it.
    pub fn properties(&self) -> Option<&LocationProperties> {
        match self {
            Location::Properties(props) => Some(props),
            Location::GeoJson(collection) => collection.features.first().map(|f| &f.properties),
            Location::Raw(_) => None,
        }
    }
}

/// Point-in-polygon reverse geocoder over the admin1 collection.
pub struct ReverseGeocoder {
    index: AdminBoundaryIndex,
}

impl ReverseGeocoder {
    pub fn new(index: AdminBoundaryIndex) -> Self {
        Self { index }
    }

    /// Find the admin1 unit containing `(lat, lng)`.
    ///
    /// `Ok(None)` means the point is outside every boundary (open ocean).
    /// Non-finite coordinates are an error.
    pub fn locate(&self, lat: f64, lng: f64, mode: OutputMode) -> Result<Option<Location>> {
        if !lat.is_finite() || !lng.is_finite() {
            return Err(LocusError::invalid_coordinates(lat, lng));
        }

        let found = self.index.first_containing(lng, lat);

        debug!(
            "PIP lookup at ({}, {}): {}",
            lng,
            lat,
            found
                .map(|b| b.properties.region_code.as_str())
                .unwrap_or("no match")
        );

        Ok(found.map(|boundary| Location::render(boundary, mode)))
    }

    /// Like [`locate`](Self::locate) for untyped input; anything that is not
    /// a JSON number is rejected.
    pub fn locate_json(&self, lat: &Value, lng: &Value, mode: OutputMode) -> Result<Option<Location>> {
        match (lat.as_f64(), lng.as_f64()) {
            (Some(lat), Some(lng)) => self.locate(lat, lng, mode),
            _ => Err(LocusError::invalid_coordinates(lat, lng)),
        }
    }

    /// Get the boundary index (for stats and state boundaries)
    pub fn index(&self) -> &AdminBoundaryIndex {
        &self.index
    }
}
