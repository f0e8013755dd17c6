//! GeoJSON wire types for boundary features.
//!
//! Only the geometry kinds the boundary data uses are modelled; any other
//! geometry type fails to deserialize.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `[longitude, latitude]`
pub type Position = [f64; 2];

/// Closed sequence of positions.
pub type Ring = Vec<Position>;

/// Untyped GeoJSON property object, kept verbatim.
pub type PropertyMap = Map<String, Value>;

/// Polygon or multi-polygon geometry.
///
/// Ring 0 of each polygon is the outer boundary, later rings are holes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    Polygon(Vec<Ring>),
    MultiPolygon(Vec<Vec<Ring>>),
}

impl Geometry {
    pub fn type_name(&self) -> &'static str {
        match self {
            Geometry::Polygon(_) => "Polygon",
            Geometry::MultiPolygon(_) => "MultiPolygon",
        }
    }
}

/// A GeoJSON feature with typed or untyped properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature<P> {
    #[serde(rename = "type")]
    pub feature_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<Vec<f64>>,
    pub properties: P,
    pub geometry: Geometry,
}

impl<P> Feature<P> {
    pub fn new(properties: P, geometry: Geometry) -> Self {
        Self {
            feature_type: "Feature".to_string(),
            id: None,
            bbox: None,
            properties,
            geometry,
        }
    }
}

/// A GeoJSON feature collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection<P> {
    #[serde(rename = "type")]
    pub collection_type: String,
    pub features: Vec<Feature<P>>,
}

impl<P> FeatureCollection<P> {
    pub fn new(features: Vec<Feature<P>>) -> Self {
        Self {
            collection_type: "FeatureCollection".to_string(),
            features,
        }
    }

    /// Collection holding exactly one feature.
    pub fn single(feature: Feature<P>) -> Self {
        Self::new(vec![feature])
    }
}
