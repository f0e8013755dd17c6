//! Precomputed per-entity boundary files.
//!
//! Files live at `<root>/<dir>/<code>[-simplified].json`. Reads are lazy
//! and independent; a missing or unreadable file is reported as `None`.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{LocusError, Result};
use crate::models::{EntityKind, Feature, PropertyMap};

/// Directory holding the boundary files of a kind. States have none: their
/// boundaries come from the admin1 collection.
pub fn artifact_dir(kind: EntityKind) -> Option<&'static str> {
    match kind {
        EntityKind::Continent => Some("continents"),
        EntityKind::Country => Some("countries"),
        EntityKind::CountryGrouping => Some("country-groupings"),
        EntityKind::Region => Some("regions"),
        EntityKind::State => None,
    }
}

/// Whether a kind ships a simplified geometry variant.
pub fn has_simplified(kind: EntityKind) -> bool {
    matches!(kind, EntityKind::Continent | EntityKind::CountryGrouping)
}

/// Reader for boundary files under a data directory.
#[derive(Debug, Clone)]
pub struct BoundaryStore {
    root: PathBuf,
}

impl BoundaryStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// File path for an entity. `simplified` is ignored for kinds without a
    /// simplified variant.
    pub fn path(&self, kind: EntityKind, code: &str, simplified: bool) -> Option<PathBuf> {
        let dir = artifact_dir(kind)?;
        let suffix = if simplified && has_simplified(kind) {
            "-simplified"
        } else {
            ""
        };
        Some(self.root.join(dir).join(format!("{}{}.json", code, suffix)))
    }

    /// Read a boundary feature. `code` must already be a known catalog code.
    pub fn get(&self, kind: EntityKind, code: &str, simplified: bool) -> Option<Feature<PropertyMap>> {
        let path = self.path(kind, code, simplified)?;
        match read_feature(&path) {
            Ok(feature) => {
                debug!("Read {} boundary {} from {}", kind, code, path.display());
                Some(feature)
            }
            Err(e) => {
                warn!("{} boundary {} unavailable: {}", kind, code, e);
                None
            }
        }
    }
}

fn read_feature(path: &Path) -> Result<Feature<PropertyMap>> {
    let content = fs::read_to_string(path).map_err(|source| LocusError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| LocusError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn store_with(files: &[(&str, String)]) -> (TempDir, BoundaryStore) {
        let dir = tempfile::Builder::new().prefix("locus-artifacts-").tempdir().unwrap();
        for (name, content) in files {
            let path = dir.path().join(name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
        let store = BoundaryStore::new(dir.path());
        (dir, store)
    }

    fn continent_feature(code: &str) -> String {
        json!({
            "type": "Feature",
            "properties": { "continent_code": code },
            "geometry": {
                "type": "MultiPolygon",
                "coordinates": [[[[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [0.0, 0.0]]]]
            }
        })
        .to_string()
    }

    #[test]
    fn test_paths() {
        let store = BoundaryStore::new("/data");
        assert_eq!(
            store.path(EntityKind::Continent, "EU", true).unwrap(),
            Path::new("/data/continents/EU-simplified.json")
        );
        assert_eq!(
            store.path(EntityKind::Region, "ES-CL", true).unwrap(),
            Path::new("/data/regions/ES-CL.json")
        );
        assert_eq!(
            store.path(EntityKind::CountryGrouping, "EMEA", false).unwrap(),
            Path::new("/data/country-groupings/EMEA.json")
        );
        assert!(store.path(EntityKind::State, "ES-VA", false).is_none());
    }

    #[test]
    fn test_reads_plain_and_simplified() {
        let (_dir, store) = store_with(&[
            ("continents/EU.json", continent_feature("EU")),
            ("continents/EU-simplified.json", continent_feature("EU")),
        ]);
        let full = store.get(EntityKind::Continent, "EU", false).unwrap();
        assert_eq!(full.properties["continent_code"], "EU");
        assert!(store.get(EntityKind::Continent, "EU", true).is_some());
    }

    #[test]
    fn test_missing_file_is_none() {
        let (_dir, store) = store_with(&[]);
        assert!(store.get(EntityKind::Country, "ES", false).is_none());
    }

    #[test]
    fn test_malformed_file_is_none() {
        let (_dir, store) = store_with(&[
            ("countries/IT.json", "{ not json".to_string()),
            ("countries/FR.json", json!({ "type": "Feature" }).to_string()),
        ]);
        assert!(store.get(EntityKind::Country, "IT", false).is_none());
        assert!(store.get(EntityKind::Country, "FR", false).is_none());
    }
}
