//! HTTP handlers. Each one maps to a single atlas operation.

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::error;

use locus::models::{Continent, Country, CountryGrouping, Feature, PropertyMap, Region};
use locus::{EntityKind, Locale, Location, LocusError, OutputMode};

use crate::AppState;

type ApiResult<T> = Result<Json<T>, (StatusCode, String)>;

fn not_found(what: &str, code: &str) -> (StatusCode, String) {
    (StatusCode::NOT_FOUND, format!("Unknown {}: {}", what, code))
}

fn found<T>(value: Option<T>, what: &str, code: &str) -> ApiResult<T> {
    value.map(Json).ok_or_else(|| not_found(what, code))
}

fn parse_kind(kind: &str) -> Result<EntityKind, (StatusCode, String)> {
    EntityKind::from_str(kind).map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))
}

#[derive(Deserialize)]
pub struct LocaleParams {
    /// Locale tag, e.g. `es` or `pt-BR`
    locale: Option<String>,
}

impl LocaleParams {
    fn locale(&self) -> Locale {
        Locale::normalize(self.locale.as_deref())
    }
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    boundaries: usize,
    countries: usize,
}

/// Health check endpoint
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        boundaries: state.atlas.geocoder().index().len(),
        countries: state.atlas.catalog().countries(&Locale::none()).len(),
    })
}

#[derive(Deserialize)]
pub struct LocateParams {
    lat: Option<String>,
    lng: Option<String>,
    /// `default`, `raw` or `geojson`
    format: Option<String>,
}

/// Query-string coordinates become JSON numbers when they parse, and stay
/// strings otherwise so the lookup rejects them.
fn coordinate(raw: &Option<String>) -> Value {
    match raw {
        Some(s) => s
            .trim()
            .parse::<f64>()
            .map(Value::from)
            .unwrap_or_else(|_| Value::String(s.clone())),
        None => Value::Null,
    }
}

/// Reverse geocoding. A point outside every boundary answers `null`.
pub async fn locate(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LocateParams>,
) -> ApiResult<Option<Location>> {
    let mode = match params.format.as_deref() {
        Some(format) => OutputMode::from_str(format).map_err(|e| (StatusCode::BAD_REQUEST, e))?,
        None => OutputMode::default(),
    };

    state
        .atlas
        .locate_json(&coordinate(&params.lat), &coordinate(&params.lng), mode)
        .map(Json)
        .map_err(|e| match e {
            LocusError::InvalidCoordinates { .. } => (StatusCode::BAD_REQUEST, e.to_string()),
            other => {
                error!("Reverse geocoding failed: {}", other);
                (StatusCode::INTERNAL_SERVER_ERROR, other.to_string())
            }
        })
}

#[derive(Deserialize)]
pub struct BoundaryParams {
    #[serde(default)]
    simplified: bool,
}

pub async fn boundary(
    State(state): State<Arc<AppState>>,
    Path((kind, code)): Path<(String, String)>,
    Query(params): Query<BoundaryParams>,
) -> ApiResult<Feature<PropertyMap>> {
    let kind = parse_kind(&kind)?;
    found(
        state.atlas.boundary(kind, &code, params.simplified),
        kind.as_str(),
        &code,
    )
}

pub async fn is_valid(
    State(state): State<Arc<AppState>>,
    Path((kind, code)): Path<(String, String)>,
) -> ApiResult<bool> {
    let kind = parse_kind(&kind)?;
    Ok(Json(state.atlas.catalog().is_valid(kind, &code)))
}

// -- continents -------------------------------------------------------------

pub async fn continents(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LocaleParams>,
) -> Json<Vec<Continent>> {
    Json(state.atlas.catalog().continents(&params.locale()))
}

pub async fn continent(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
    Query(params): Query<LocaleParams>,
) -> ApiResult<Continent> {
    found(
        state.atlas.catalog().continent(&code, &params.locale()),
        "continent",
        &code,
    )
}

pub async fn continent_countries(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
    Query(params): Query<LocaleParams>,
) -> ApiResult<Vec<Country>> {
    found(
        state.atlas.catalog().countries_by_continent(&code, &params.locale()),
        "continent",
        &code,
    )
}

// -- countries --------------------------------------------------------------

pub async fn countries(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LocaleParams>,
) -> Json<Vec<Country>> {
    Json(state.atlas.catalog().countries(&params.locale()))
}

/// Accepts alpha-2 or alpha-3.
pub async fn country(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
    Query(params): Query<LocaleParams>,
) -> ApiResult<Country> {
    found(
        state.atlas.catalog().country(&code, &params.locale()),
        "country",
        &code,
    )
}

pub async fn country_regions(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
    Query(params): Query<LocaleParams>,
) -> ApiResult<Vec<Region>> {
    let catalog = state.atlas.catalog();
    let alpha2 = catalog
        .resolve_alpha2(&code)
        .ok_or_else(|| not_found("country", &code))?;
    Ok(Json(catalog.regions_by_country_alpha2(&alpha2, &params.locale())))
}

#[derive(Serialize)]
pub struct CountryCodes {
    country_a2: String,
    country_a3: String,
}

pub async fn country_codes(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> ApiResult<CountryCodes> {
    let catalog = state.atlas.catalog();
    let codes = catalog.resolve_alpha2(&code).and_then(|alpha2| {
        catalog.alpha2_to_alpha3(&alpha2).map(|alpha3| CountryCodes {
            country_a2: alpha2,
            country_a3: alpha3,
        })
    });
    found(codes, "country", &code)
}

// -- country groupings ------------------------------------------------------

pub async fn country_groupings(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LocaleParams>,
) -> Json<Vec<CountryGrouping>> {
    Json(state.atlas.catalog().country_groupings(&params.locale()))
}

pub async fn country_grouping(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
    Query(params): Query<LocaleParams>,
) -> ApiResult<CountryGrouping> {
    found(
        state.atlas.catalog().country_grouping(&code, &params.locale()),
        "country grouping",
        &code,
    )
}

pub async fn country_grouping_countries(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
    Query(params): Query<LocaleParams>,
) -> ApiResult<Vec<Country>> {
    found(
        state
            .atlas
            .catalog()
            .countries_by_country_grouping(&code, &params.locale()),
        "country grouping",
        &code,
    )
}

// -- regions and states -----------------------------------------------------

#[derive(Deserialize)]
pub struct RegionsParams {
    locale: Option<String>,
    /// Embed each region's states
    #[serde(default)]
    states: bool,
}

pub async fn regions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RegionsParams>,
) -> Json<Vec<Region>> {
    let locale = Locale::normalize(params.locale.as_deref());
    let catalog = state.atlas.catalog();
    if params.states {
        Json(catalog.regions_with_states(&locale))
    } else {
        Json(catalog.regions(&locale))
    }
}

pub async fn region(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
    Query(params): Query<LocaleParams>,
) -> ApiResult<Region> {
    found(
        state.atlas.catalog().region(&code, &params.locale()),
        "region",
        &code,
    )
}

pub async fn region_states(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
    Query(params): Query<LocaleParams>,
) -> ApiResult<Vec<locus::models::State>> {
    found(
        state.atlas.catalog().states_by_region(&code, &params.locale()),
        "region",
        &code,
    )
}

pub async fn state(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
    Query(params): Query<LocaleParams>,
) -> ApiResult<locus::models::State> {
    found(
        state.atlas.catalog().state(&code, &params.locale()),
        "state",
        &code,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_parsing() {
        assert_eq!(coordinate(&Some("40.4".to_string())), Value::from(40.4));
        assert_eq!(coordinate(&Some(" -3.7 ".to_string())), Value::from(-3.7));
        assert_eq!(coordinate(&Some("x".to_string())), Value::from("x"));
        assert_eq!(coordinate(&None), Value::Null);
        // NaN is not representable as a JSON number
        assert_eq!(coordinate(&Some("NaN".to_string())), Value::Null);
    }
}
