//! Admin1 feature properties and the flat location record built from them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::geojson::PropertyMap;

/// Trailing marker on state codes of units without a formal subdivision.
pub const NO_SUBDIVISION: char = '~';

/// Strip the no-subdivision marker from a state code.
pub fn strip_sentinel(code: &str) -> &str {
    code.trim_end_matches(NO_SUBDIVISION)
}

/// True for a state code that names a real subdivision.
pub fn is_subdivision_code(code: &str) -> bool {
    !code.is_empty() && !code.ends_with(NO_SUBDIVISION)
}

/// Typed view of the keys a lookup needs from an admin1 feature.
///
/// Names (`cont_name`, `admin`, `name`, `name_<locale>`, ...) are not
/// typed here; they stay in the feature's property map and reach callers
/// through raw output.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AdminProperties {
    #[serde(rename = "cont_code")]
    pub continent_code: String,

    #[serde(rename = "iso_a2")]
    pub country_a2: String,

    #[serde(rename = "adm0_a3")]
    pub country_a3: String,

    pub region_code: String,

    /// Raw ISO-3166-2-like code, possibly ending in [`NO_SUBDIVISION`]
    #[serde(rename = "iso_3166_2", default)]
    pub state_code: Option<String>,
}

impl AdminProperties {
    /// Parse the typed record out of a raw property map.
    pub fn from_raw(raw: &PropertyMap) -> Result<Self, serde_json::Error> {
        serde_json::from_value(Value::Object(raw.clone()))
    }

    /// State code to expose to callers, if this unit is a formal subdivision.
    pub fn subdivision_code(&self) -> Option<&str> {
        self.state_code
            .as_deref()
            .filter(|code| is_subdivision_code(code))
    }

    /// State code with the sentinel removed, for matching by code.
    pub fn matchable_state_code(&self) -> Option<&str> {
        self.state_code
            .as_deref()
            .map(strip_sentinel)
            .filter(|code| !code.is_empty())
    }

    /// Flat property set returned by a reverse lookup.
    pub fn location(&self) -> LocationProperties {
        LocationProperties {
            continent_code: self.continent_code.clone(),
            country_a2: self.country_a2.clone(),
            country_a3: self.country_a3.clone(),
            region_code: self.region_code.clone(),
            state_code: self.subdivision_code().map(str::to_string),
        }
    }
}

/// Result of a reverse lookup in the default output mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationProperties {
    pub continent_code: String,
    pub country_a2: String,
    pub country_a3: String,
    pub region_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> PropertyMap {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_from_raw() {
        let map = raw(json!({
            "cont_code": "EU",
            "cont_name": "Europe",
            "iso_a2": "ES",
            "adm0_a3": "ESP",
            "admin": "Spain",
            "region_code": "ES-MD",
            "region_name": "Comunidad de Madrid",
            "iso_3166_2": "ES-M",
            "name": "Madrid",
            "name_fr": "Madrid",
            "name_alt": "Madrit",
            "name_len": 6,
            "adm1_code": "ESP-5833"
        }));
        let props = AdminProperties::from_raw(&map).unwrap();
        assert_eq!(props.country_a3, "ESP");
        assert_eq!(props.subdivision_code(), Some("ES-M"));
        assert_eq!(props.location().region_code, "ES-MD");
    }

    #[test]
    fn test_missing_required_key() {
        let map = raw(json!({ "iso_a2": "ES", "adm0_a3": "ESP", "region_code": "ES-MD" }));
        assert!(AdminProperties::from_raw(&map).is_err());
    }

    #[test]
    fn test_sentinel_code_not_exposed() {
        let map = raw(json!({
            "cont_code": "AS",
            "iso_a2": "AE",
            "adm0_a3": "ARE",
            "region_code": "AE-FU-SH",
            "iso_3166_2": "AE-X01~"
        }));
        let props = AdminProperties::from_raw(&map).unwrap();
        assert_eq!(props.subdivision_code(), None);
        assert_eq!(props.matchable_state_code(), Some("AE-X01"));
        assert_eq!(props.location().state_code, None);

        let json = serde_json::to_value(props.location()).unwrap();
        assert!(json.get("state_code").is_none());
    }

    #[test]
    fn test_absent_state_code() {
        let map = raw(json!({
            "cont_code": "EU",
            "iso_a2": "SM",
            "adm0_a3": "SMR",
            "region_code": "SM"
        }));
        let props = AdminProperties::from_raw(&map).unwrap();
        assert_eq!(props.subdivision_code(), None);
        assert_eq!(props.matchable_state_code(), None);
    }

    #[test]
    fn test_strip_sentinel() {
        assert_eq!(strip_sentinel("NZ-X01~"), "NZ-X01");
        assert_eq!(strip_sentinel("~"), "");
        assert!(!is_subdivision_code(""));
        assert!(is_subdivision_code("ES-VA"));
    }
}
