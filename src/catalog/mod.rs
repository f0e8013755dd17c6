//! Hierarchical catalog (continent → country → region → state) with
//! localized names.

mod index;
pub mod locale;

pub use index::{Catalog, CONTINENTS_FILE, COUNTRIES_FILE, COUNTRY_GROUPINGS_FILE, REGIONS_FILE};
pub use locale::{Locale, Named, Translatable};

#[cfg(test)]
pub(crate) use index::tests::sample_catalog;
