//! Locus - reverse geocoding to admin1 units and an administrative catalog
//!
//! This library provides the point-in-polygon lookup, the continent →
//! country → region → state catalog with localized names, and access to
//! precomputed boundary files. The `query` binary serves it over HTTP.

pub mod artifacts;
pub mod atlas;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod pip;

pub use atlas::Atlas;
pub use catalog::{Catalog, Locale};
pub use error::{LocusError, Result};
pub use models::EntityKind;
pub use pip::{Location, OutputMode};
