//! Catalog records (as loaded) and the entries handed out to callers.
//!
//! Records keep their `i18n` translation map. Entries are produced by
//! translating a record for a locale and never carry that map.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::catalog::locale::{Locale, Named, Translatable};
use crate::error::LocusError;

/// Kinds of entity the catalog and the boundary store know about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntityKind {
    Continent,
    /// Addressed by alpha-2 or alpha-3 code
    Country,
    CountryGrouping,
    Region,
    State,
}

impl EntityKind {
    pub fn all() -> &'static [EntityKind] {
        &[
            EntityKind::Continent,
            EntityKind::Country,
            EntityKind::CountryGrouping,
            EntityKind::Region,
            EntityKind::State,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Continent => "continent",
            EntityKind::Country => "country",
            EntityKind::CountryGrouping => "country-grouping",
            EntityKind::Region => "region",
            EntityKind::State => "state",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = LocusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityKind::all()
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| LocusError::UnknownKind(s.to_string()))
    }
}

/// Translation maps may hold non-string values in the source data; those are dropped.
fn deserialize_i18n<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: BTreeMap<String, Value> = BTreeMap::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|(locale, value)| match value {
            Value::String(name) => Some((locale, name)),
            _ => None,
        })
        .collect())
}

// ---------------------------------------------------------------------------
// Continents
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct ContinentRecord {
    pub continent_code: String,
    pub continent_name: String,
    /// Member country alpha-2 codes
    #[serde(default)]
    pub countries: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_i18n")]
    pub i18n: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Continent {
    pub continent_code: String,
    pub continent_name: String,
    pub countries: Vec<String>,
}

impl Named for Continent {
    fn display_name(&self) -> &str {
        &self.continent_name
    }

    fn code(&self) -> &str {
        &self.continent_code
    }
}

impl Translatable for ContinentRecord {
    type Entry = Continent;

    fn translate(&self, locale: &Locale) -> Continent {
        Continent {
            continent_code: self.continent_code.clone(),
            continent_name: locale.pick(&self.continent_name, &self.i18n).to_string(),
            countries: self.countries.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Countries
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct CountryRecord {
    pub country_a2: String,
    pub country_a3: String,
    pub country_name: String,
    #[serde(default, deserialize_with = "deserialize_i18n")]
    pub i18n: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub country_a2: String,
    pub country_a3: String,
    pub country_name: String,
}

impl Named for Country {
    fn display_name(&self) -> &str {
        &self.country_name
    }

    fn code(&self) -> &str {
        &self.country_a2
    }
}

impl Translatable for CountryRecord {
    type Entry = Country;

    fn translate(&self, locale: &Locale) -> Country {
        Country {
            country_a2: self.country_a2.clone(),
            country_a3: self.country_a3.clone(),
            country_name: locale.pick(&self.country_name, &self.i18n).to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Country groupings
// ---------------------------------------------------------------------------

/// A named set of countries (trade blocs, unions, sales territories).
///
/// The grouping code lives in its own namespace: `AU` here is the African
/// Union, not Australia.
#[derive(Debug, Clone, Deserialize)]
pub struct CountryGroupingRecord {
    pub grouping_code: String,
    pub grouping_name: String,
    #[serde(default)]
    pub countries: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_i18n")]
    pub i18n: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryGrouping {
    pub grouping_code: String,
    pub grouping_name: String,
    pub countries: Vec<String>,
}

impl Named for CountryGrouping {
    fn display_name(&self) -> &str {
        &self.grouping_name
    }

    fn code(&self) -> &str {
        &self.grouping_code
    }
}

impl Translatable for CountryGroupingRecord {
    type Entry = CountryGrouping;

    fn translate(&self, locale: &Locale) -> CountryGrouping {
        CountryGrouping {
            grouping_code: self.grouping_code.clone(),
            grouping_name: locale.pick(&self.grouping_name, &self.i18n).to_string(),
            countries: self.countries.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Regions and states
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct StateRecord {
    pub state_code: String,
    pub state_name: String,
    /// Owning region, filled in when the catalog is built
    #[serde(skip)]
    pub region_code: String,
    #[serde(default, deserialize_with = "deserialize_i18n")]
    pub i18n: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    pub state_code: String,
    pub region_code: String,
    pub state_name: String,
}

impl Named for State {
    fn display_name(&self) -> &str {
        &self.state_name
    }

    fn code(&self) -> &str {
        &self.state_code
    }
}

impl Translatable for StateRecord {
    type Entry = State;

    fn translate(&self, locale: &Locale) -> State {
        State {
            state_code: self.state_code.clone(),
            region_code: self.region_code.clone(),
            state_name: locale.pick(&self.state_name, &self.i18n).to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegionRecord {
    pub country_a2: String,
    pub region_code: String,
    pub region_name: String,
    #[serde(default)]
    pub states: Vec<StateRecord>,
    #[serde(default, deserialize_with = "deserialize_i18n")]
    pub i18n: BTreeMap<String, String>,
}

/// A region, optionally with its states.
///
/// Listing operations leave `states` empty (`None`); lookups of a single
/// region fill it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub country_a2: String,
    pub region_code: String,
    pub region_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub states: Option<Vec<State>>,
}

impl Named for Region {
    fn display_name(&self) -> &str {
        &self.region_name
    }

    fn code(&self) -> &str {
        &self.region_code
    }
}

impl Translatable for RegionRecord {
    type Entry = Region;

    fn translate(&self, locale: &Locale) -> Region {
        Region {
            country_a2: self.country_a2.clone(),
            region_code: self.region_code.clone(),
            region_name: locale.pick(&self.region_name, &self.i18n).to_string(),
            states: None,
        }
    }
}
