//! Locale normalization and translated-name overlay for catalog entries.

use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Normalized locale: the primary language subtag, lower-cased.
///
/// An empty locale means "no translation requested".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Locale(String);

impl Locale {
    /// Normalize a locale tag. `en-US`, `en_US` and `EN` all become `en`.
    pub fn normalize(tag: Option<&str>) -> Self {
        let primary = tag
            .and_then(|t| t.split(['-', '_']).next())
            .unwrap_or_default();
        Locale(primary.to_lowercase())
    }

    /// The locale that keeps canonical names.
    pub fn none() -> Self {
        Locale::default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Pick the translated name for this locale, or the canonical one.
    pub fn pick<'a>(&self, canonical: &'a str, i18n: &'a BTreeMap<String, String>) -> &'a str {
        if self.is_empty() {
            return canonical;
        }
        match i18n.get(&self.0) {
            Some(name) if !name.is_empty() => name.as_str(),
            _ => canonical,
        }
    }
}

impl From<&str> for Locale {
    fn from(tag: &str) -> Self {
        Locale::normalize(Some(tag))
    }
}

/// A public catalog entry with a display name to sort by.
pub trait Named {
    fn display_name(&self) -> &str;

    /// Code used for ordering when the display name is empty.
    fn code(&self) -> &str;
}

/// An internal catalog record that can be rendered for a locale.
///
/// The rendered entry never carries the translation map.
pub trait Translatable {
    type Entry: Named;

    fn translate(&self, locale: &Locale) -> Self::Entry;
}

/// Translate every record and sort the result by display name.
pub fn translate_all<'a, T, I>(records: I, locale: &Locale) -> Vec<T::Entry>
where
    T: Translatable + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut entries: Vec<T::Entry> = records.into_iter().map(|r| r.translate(locale)).collect();
    sort_by_name(&mut entries);
    entries
}

/// Stable, case-insensitive ascending sort on display name.
pub fn sort_by_name<E: Named>(entries: &mut [E]) {
    entries.sort_by(compare_names);
}

fn compare_names<E: Named>(a: &E, b: &E) -> Ordering {
    sort_key(a).cmp(&sort_key(b))
}

fn sort_key<E: Named>(entry: &E) -> String {
    let name = entry.display_name();
    if name.is_empty() {
        entry.code().to_lowercase()
    } else {
        name.to_lowercase()
    }
}
