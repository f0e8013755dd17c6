//! Ordered admin boundary collection.
//!
//! There is no spatial tree: lookups scan every boundary in dataset order
//! and the first containing one wins. Dataset order is the tie-break for
//! features that overlap along shared borders.

use geo_types::Coord;
use std::collections::BTreeMap;
use tracing::info;

use super::AdminBoundary;

/// Admin boundaries in dataset order.
#[derive(Debug, Clone, Default)]
pub struct AdminBoundaryIndex {
    boundaries: Vec<AdminBoundary>,
}

impl AdminBoundaryIndex {
    pub fn build(boundaries: Vec<AdminBoundary>) -> Self {
        let mut by_continent: BTreeMap<&str, usize> = BTreeMap::new();
        for boundary in &boundaries {
            *by_continent
                .entry(boundary.properties.continent_code.as_str())
                .or_default() += 1;
        }

        info!("Boundary index built with {} entries", boundaries.len());
        for (continent, count) in &by_continent {
            info!("  {}: {} boundaries", continent, count);
        }

        Self { boundaries }
    }

    /// First boundary, in dataset order, containing the point.
    pub fn first_containing(&self, lon: f64, lat: f64) -> Option<&AdminBoundary> {
        let point = Coord { x: lon, y: lat };
        self.boundaries.iter().find(|b| b.contains(point))
    }

    /// First boundary whose state code, sentinel stripped, equals `code`.
    pub fn find_state(&self, code: &str) -> Option<&AdminBoundary> {
        self.boundaries
            .iter()
            .find(|b| b.properties.matchable_state_code() == Some(code))
    }

    pub fn len(&self) -> usize {
        self.boundaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boundaries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pip::boundary::tests::{feature, square};
    use serde_json::json;

    fn boundary(state: &str, region: &str, coordinates: serde_json::Value) -> AdminBoundary {
        AdminBoundary::from_feature(
            0,
            feature(
                json!({
                    "cont_code": "EU", "iso_a2": "IT", "adm0_a3": "ITA",
                    "region_code": region, "iso_3166_2": state
                }),
                json!({ "type": "Polygon", "coordinates": coordinates }),
            ),
        )
        .unwrap()
    }

    #[test]
    fn test_first_match_wins_on_overlap() {
        let index = AdminBoundaryIndex::build(vec![
            boundary("IT-AA", "IT-A", square(0.0, 0.0, 10.0, 10.0)),
            boundary("IT-BB", "IT-B", square(5.0, 5.0, 15.0, 15.0)),
        ]);
        let hit = index.first_containing(7.0, 7.0).unwrap();
        assert_eq!(hit.properties.state_code.as_deref(), Some("IT-AA"));
        let hit = index.first_containing(12.0, 12.0).unwrap();
        assert_eq!(hit.properties.state_code.as_deref(), Some("IT-BB"));
        assert!(index.first_containing(20.0, 20.0).is_none());
    }

    #[test]
    fn test_find_state_strips_sentinel() {
        let index = AdminBoundaryIndex::build(vec![
            boundary("IT-X01~", "IT-X", square(0.0, 0.0, 1.0, 1.0)),
            boundary("IT-RN", "IT-45", square(2.0, 2.0, 3.0, 3.0)),
        ]);
        assert_eq!(index.len(), 2);
        assert!(index.find_state("IT-X01").is_some());
        assert!(index.find_state("IT-X01~").is_none());
        assert!(index.find_state("IT-RN").is_some());
        assert!(index.find_state("").is_none());
    }

    #[test]
    fn test_empty_index() {
        let index = AdminBoundaryIndex::build(vec![]);
        assert!(index.is_empty());
        assert!(index.first_containing(8.5, 47.4).is_none());
    }
}
