//! Core data models for the atlas.

pub mod admin;
pub mod catalog;
pub mod geojson;

pub use admin::{AdminProperties, LocationProperties, NO_SUBDIVISION};
pub use catalog::{
    Continent, ContinentRecord, Country, CountryGrouping, CountryGroupingRecord, CountryRecord,
    EntityKind, Region, RegionRecord, State, StateRecord,
};
pub use geojson::{Feature, FeatureCollection, Geometry, PropertyMap};
