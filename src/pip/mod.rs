//! Point-in-Polygon (PIP) reverse geocoding.
//!
//! Loads the prepared admin1 boundary collection and answers which unit
//! contains a coordinate, using a crossing-number test over every
//! boundary in dataset order.

mod boundary;
pub mod geometry;
mod index;
mod service;

pub use boundary::{load_admin_boundaries, parse_admin_boundaries, AdminBoundary, ADMIN1_FILE};
pub use geometry::Boundary;
pub use index::AdminBoundaryIndex;
pub use service::{Location, OutputMode, ReverseGeocoder};
