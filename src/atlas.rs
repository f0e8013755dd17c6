//! The loaded dataset: catalog, admin1 boundaries and boundary files.
//!
//! Built once at startup and shared read-only (`Arc<Atlas>`) by every query.

use serde_json::Value;
use std::path::Path;
use tracing::{debug, info};

use crate::artifacts::BoundaryStore;
use crate::catalog::Catalog;
use crate::error::Result;
use crate::models::{EntityKind, Feature, PropertyMap};
use crate::pip::{load_admin_boundaries, AdminBoundaryIndex, Location, OutputMode, ReverseGeocoder};

pub struct Atlas {
    catalog: Catalog,
    geocoder: ReverseGeocoder,
    store: BoundaryStore,
}

impl Atlas {
    /// Load everything from a data directory.
    pub fn load(root: &Path) -> Result<Self> {
        info!("Loading atlas from {}", root.display());
        let catalog = Catalog::load(root)?;
        let index = AdminBoundaryIndex::build(load_admin_boundaries(root)?);
        Ok(Self::new(catalog, index, BoundaryStore::new(root)))
    }

    pub fn new(catalog: Catalog, index: AdminBoundaryIndex, store: BoundaryStore) -> Self {
        Self {
            catalog,
            geocoder: ReverseGeocoder::new(index),
            store,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn geocoder(&self) -> &ReverseGeocoder {
        &self.geocoder
    }

    pub fn locate(&self, lat: f64, lng: f64, mode: OutputMode) -> Result<Option<Location>> {
        self.geocoder.locate(lat, lng, mode)
    }

    pub fn locate_json(&self, lat: &Value, lng: &Value, mode: OutputMode) -> Result<Option<Location>> {
        self.geocoder.locate_json(lat, lng, mode)
    }

    /// Boundary feature of a catalog entity.
    ///
    /// Unknown codes give `None` without touching the filesystem. Countries
    /// accept alpha-2 or alpha-3. `simplified` only applies to continents
    /// and country groupings.
    pub fn boundary(
        &self,
        kind: EntityKind,
        code: &str,
        simplified: bool,
    ) -> Option<Feature<PropertyMap>> {
        match kind {
            EntityKind::State => self.state_boundary(code),
            EntityKind::Country => {
                let alpha2 = self.catalog.resolve_alpha2(code)?;
                self.store.get(kind, &alpha2, simplified)
            }
            _ if self.catalog.is_valid(kind, code) => self.store.get(kind, code, simplified),
            _ => {
                debug!("Unknown {} code {}", kind, code);
                None
            }
        }
    }

    pub fn continent_boundary(&self, code: &str, simplified: bool) -> Option<Feature<PropertyMap>> {
        self.boundary(EntityKind::Continent, code, simplified)
    }

    pub fn country_boundary_by_alpha2(&self, alpha2: &str) -> Option<Feature<PropertyMap>> {
        if !self.catalog.is_valid_alpha2(alpha2) {
            return None;
        }
        self.store.get(EntityKind::Country, alpha2, false)
    }

    pub fn country_boundary_by_alpha3(&self, alpha3: &str) -> Option<Feature<PropertyMap>> {
        let alpha2 = self.catalog.alpha3_to_alpha2(alpha3)?;
        self.store.get(EntityKind::Country, &alpha2, false)
    }

    pub fn country_grouping_boundary(
        &self,
        code: &str,
        simplified: bool,
    ) -> Option<Feature<PropertyMap>> {
        self.boundary(EntityKind::CountryGrouping, code, simplified)
    }

    pub fn region_boundary(&self, code: &str) -> Option<Feature<PropertyMap>> {
        self.boundary(EntityKind::Region, code, false)
    }

    /// State geometry comes from the admin1 collection, with its properties
    /// reduced to `{country_a2, region_code, state_code}`.
    pub fn state_boundary(&self, code: &str) -> Option<Feature<PropertyMap>> {
        if !self.catalog.is_valid_state(code) {
            return None;
        }
        self.geocoder
            .index()
            .find_state(code)
            .map(|boundary| boundary.to_state_feature(code))
    }
}
