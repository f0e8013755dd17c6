//! In-memory catalog of continents, countries, groupings, regions and states.
//!
//! Tables are small (low hundreds of rows), so every lookup is a linear
//! scan. All query methods return owned, translated copies.

use hashbrown::HashSet;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

use super::locale::{sort_by_name, translate_all, Locale, Translatable};
use crate::error::{LocusError, Result};
use crate::models::admin::{is_subdivision_code, strip_sentinel};
use crate::models::{
    Continent, ContinentRecord, Country, CountryGrouping, CountryGroupingRecord, CountryRecord,
    EntityKind, Region, RegionRecord, State, StateRecord,
};

pub const CONTINENTS_FILE: &str = "continents/continents.json";
pub const COUNTRIES_FILE: &str = "countries/countries.json";
pub const COUNTRY_GROUPINGS_FILE: &str = "country-groupings/country-groupings.json";
pub const REGIONS_FILE: &str = "regions/regions.json";

/// Immutable hierarchical catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    continents: Vec<ContinentRecord>,
    countries: Vec<CountryRecord>,
    groupings: Vec<CountryGroupingRecord>,
    regions: Vec<RegionRecord>,
}

impl Catalog {
    /// Load all catalog tables from a data directory.
    pub fn load(root: &Path) -> Result<Self> {
        info!("Loading catalog from {}", root.display());

        let catalog = Self::from_records(
            read_json(&root.join(CONTINENTS_FILE))?,
            read_json(&root.join(COUNTRIES_FILE))?,
            read_json(&root.join(COUNTRY_GROUPINGS_FILE))?,
            read_json(&root.join(REGIONS_FILE))?,
        )?;

        info!(
            "Catalog loaded: {} continents, {} countries, {} groupings, {} regions, {} states",
            catalog.continents.len(),
            catalog.countries.len(),
            catalog.groupings.len(),
            catalog.regions.len(),
            catalog.states().count()
        );

        Ok(catalog)
    }

    /// Build a catalog from already-parsed records.
    ///
    /// Checks code uniqueness, strips the no-subdivision marker from state
    /// codes, drops states left without a code and links states to their
    /// region.
    pub fn from_records(
        continents: Vec<ContinentRecord>,
        countries: Vec<CountryRecord>,
        groupings: Vec<CountryGroupingRecord>,
        mut regions: Vec<RegionRecord>,
    ) -> Result<Self> {
        ensure_unique("continent", continents.iter().map(|c| c.continent_code.as_str()))?;
        ensure_unique("country alpha-2", countries.iter().map(|c| c.country_a2.as_str()))?;
        ensure_unique("country alpha-3", countries.iter().map(|c| c.country_a3.as_str()))?;
        ensure_unique("country grouping", groupings.iter().map(|g| g.grouping_code.as_str()))?;
        ensure_unique("region", regions.iter().map(|r| r.region_code.as_str()))?;

        let mut seen_states = HashSet::new();
        for region in &mut regions {
            let region_code = region.region_code.clone();
            region.states.retain_mut(|state| {
                let code = strip_sentinel(&state.state_code).to_string();
                if code.is_empty() {
                    debug!("Dropping state without subdivision in {}", region_code);
                    return false;
                }
                if !seen_states.insert(code.clone()) {
                    warn!("Duplicate state code {} in {}, keeping first", code, region_code);
                    return false;
                }
                state.state_code = code;
                state.region_code = region_code.clone();
                true
            });
        }

        Ok(Self {
            continents,
            countries,
            groupings,
            regions,
        })
    }

    fn states(&self) -> impl Iterator<Item = &StateRecord> {
        self.regions.iter().flat_map(|r| r.states.iter())
    }

    /// Uniform validity check. `Country` accepts alpha-2 or alpha-3.
    pub fn is_valid(&self, kind: EntityKind, code: &str) -> bool {
        match kind {
            EntityKind::Continent => self.is_valid_continent(code),
            EntityKind::Country => self.is_valid_alpha2(code) || self.is_valid_alpha3(code),
            EntityKind::CountryGrouping => self.is_valid_country_grouping(code),
            EntityKind::Region => self.is_valid_region(code),
            EntityKind::State => self.is_valid_state(code),
        }
    }

    // -- continents ---------------------------------------------------------

    fn find_continent(&self, code: &str) -> Option<&ContinentRecord> {
        self.continents.iter().find(|c| c.continent_code == code)
    }

    pub fn continents(&self, locale: &Locale) -> Vec<Continent> {
        translate_all(&self.continents, locale)
    }

    pub fn continent(&self, code: &str, locale: &Locale) -> Option<Continent> {
        self.find_continent(code).map(|c| c.translate(locale))
    }

    pub fn is_valid_continent(&self, code: &str) -> bool {
        self.find_continent(code).is_some()
    }

    /// Countries of a continent; `None` when the continent is unknown.
    pub fn countries_by_continent(&self, code: &str, locale: &Locale) -> Option<Vec<Country>> {
        let continent = self.find_continent(code)?;
        Some(self.countries_in(&continent.countries, locale))
    }

    // -- countries ----------------------------------------------------------

    fn find_alpha2(&self, alpha2: &str) -> Option<&CountryRecord> {
        self.countries.iter().find(|c| c.country_a2 == alpha2)
    }

    fn find_alpha3(&self, alpha3: &str) -> Option<&CountryRecord> {
        self.countries.iter().find(|c| c.country_a3 == alpha3)
    }

    fn countries_in(&self, members: &[String], locale: &Locale) -> Vec<Country> {
        translate_all(
            self.countries
                .iter()
                .filter(|c| members.contains(&c.country_a2)),
            locale,
        )
    }

    pub fn countries(&self, locale: &Locale) -> Vec<Country> {
        translate_all(&self.countries, locale)
    }

    pub fn country_by_alpha2(&self, alpha2: &str, locale: &Locale) -> Option<Country> {
        self.find_alpha2(alpha2).map(|c| c.translate(locale))
    }

    pub fn country_by_alpha3(&self, alpha3: &str, locale: &Locale) -> Option<Country> {
        self.find_alpha3(alpha3).map(|c| c.translate(locale))
    }

    /// Look a country up by either code form.
    pub fn country(&self, code: &str, locale: &Locale) -> Option<Country> {
        self.country_by_alpha2(code, locale)
            .or_else(|| self.country_by_alpha3(code, locale))
    }

    pub fn alpha2_to_alpha3(&self, alpha2: &str) -> Option<String> {
        self.find_alpha2(alpha2).map(|c| c.country_a3.clone())
    }

    pub fn alpha3_to_alpha2(&self, alpha3: &str) -> Option<String> {
        self.find_alpha3(alpha3).map(|c| c.country_a2.clone())
    }

    /// Resolve either code form to alpha-2.
    pub fn resolve_alpha2(&self, code: &str) -> Option<String> {
        self.find_alpha2(code)
            .or_else(|| self.find_alpha3(code))
            .map(|c| c.country_a2.clone())
    }

    pub fn is_valid_alpha2(&self, alpha2: &str) -> bool {
        self.find_alpha2(alpha2).is_some()
    }

    pub fn is_valid_alpha3(&self, alpha3: &str) -> bool {
        self.find_alpha3(alpha3).is_some()
    }

    // -- country groupings --------------------------------------------------

    fn find_grouping(&self, code: &str) -> Option<&CountryGroupingRecord> {
        self.groupings.iter().find(|g| g.grouping_code == code)
    }

    pub fn country_groupings(&self, locale: &Locale) -> Vec<CountryGrouping> {
        translate_all(&self.groupings, locale)
    }

    pub fn country_grouping(&self, code: &str, locale: &Locale) -> Option<CountryGrouping> {
        self.find_grouping(code).map(|g| g.translate(locale))
    }

    pub fn is_valid_country_grouping(&self, code: &str) -> bool {
        self.find_grouping(code).is_some()
    }

    /// Member countries of a grouping; `None` when the grouping is unknown.
    pub fn countries_by_country_grouping(
        &self,
        code: &str,
        locale: &Locale,
    ) -> Option<Vec<Country>> {
        let grouping = self.find_grouping(code)?;
        Some(self.countries_in(&grouping.countries, locale))
    }

    // -- regions ------------------------------------------------------------

    fn find_region(&self, code: &str) -> Option<&RegionRecord> {
        self.regions.iter().find(|r| r.region_code == code)
    }

    fn with_states(record: &RegionRecord, locale: &Locale) -> Region {
        Region {
            states: Some(translate_all(&record.states, locale)),
            ..record.translate(locale)
        }
    }

    /// All regions, without states.
    pub fn regions(&self, locale: &Locale) -> Vec<Region> {
        translate_all(&self.regions, locale)
    }

    /// All regions, each with its translated and sorted states.
    pub fn regions_with_states(&self, locale: &Locale) -> Vec<Region> {
        let mut regions: Vec<Region> = self
            .regions
            .iter()
            .map(|r| Self::with_states(r, locale))
            .collect();
        sort_by_name(&mut regions);
        regions
    }

    /// A region with its states.
    pub fn region(&self, code: &str, locale: &Locale) -> Option<Region> {
        self.find_region(code).map(|r| Self::with_states(r, locale))
    }

    pub fn is_valid_region(&self, code: &str) -> bool {
        self.find_region(code).is_some()
    }

    /// Regions of a country, without states. Unknown country gives an empty list.
    pub fn regions_by_country_alpha2(&self, alpha2: &str, locale: &Locale) -> Vec<Region> {
        translate_all(
            self.regions.iter().filter(|r| r.country_a2 == alpha2),
            locale,
        )
    }

    pub fn regions_by_country_alpha3(&self, alpha3: &str, locale: &Locale) -> Vec<Region> {
        match self.alpha3_to_alpha2(alpha3) {
            Some(alpha2) => self.regions_by_country_alpha2(&alpha2, locale),
            None => Vec::new(),
        }
    }

    // -- states -------------------------------------------------------------

    fn find_state(&self, code: &str) -> Option<&StateRecord> {
        if !is_subdivision_code(code) {
            return None;
        }
        self.states().find(|s| s.state_code == code)
    }

    /// States of a region; `None` when the region is unknown.
    pub fn states_by_region(&self, code: &str, locale: &Locale) -> Option<Vec<State>> {
        self.find_region(code)
            .map(|r| translate_all(&r.states, locale))
    }

    pub fn state(&self, code: &str, locale: &Locale) -> Option<State> {
        self.find_state(code).map(|s| s.translate(locale))
    }

    pub fn is_valid_state(&self, code: &str) -> bool {
        self.find_state(code).is_some()
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|source| LocusError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| LocusError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn ensure_unique<'a>(kind: &'static str, codes: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for code in codes {
        if !seen.insert(code) {
            return Err(LocusError::DuplicateCode {
                kind,
                code: code.to_string(),
            });
        }
    }
    Ok(())
}
