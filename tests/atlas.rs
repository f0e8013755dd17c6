use std::path::PathBuf;

use serde_json::{json, Value};

use locus::models::{Geometry, LocationProperties};
use locus::{Atlas, EntityKind, Locale, Location, LocusError, OutputMode};

fn fixture_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/data")
}

fn atlas() -> Atlas {
    Atlas::load(&fixture_root()).unwrap()
}

fn locate(atlas: &Atlas, lat: f64, lng: f64) -> Option<LocationProperties> {
    atlas
        .locate(lat, lng, OutputMode::Default)
        .unwrap()
        .and_then(|location| location.properties().cloned())
}

#[test]
fn test_locate_madrid() {
    let atlas = atlas();
    let madrid = locate(&atlas, 40.4167047, -3.7035825).unwrap();
    assert_eq!(
        madrid,
        LocationProperties {
            continent_code: "EU".to_string(),
            country_a2: "ES".to_string(),
            country_a3: "ESP".to_string(),
            region_code: "ES-MD".to_string(),
            state_code: Some("ES-M".to_string()),
        }
    );
}

#[test]
fn test_locate_second_polygon_of_multipolygon() {
    let atlas = atlas();
    let valladolid = locate(&atlas, 41.652349, -4.728602).unwrap();
    assert_eq!(valladolid.region_code, "ES-CL");
    assert_eq!(valladolid.state_code.as_deref(), Some("ES-VA"));
}

#[test]
fn test_locate_enclave_in_hole() {
    let atlas = atlas();
    assert_eq!(
        locate(&atlas, 43.94, 12.45).unwrap().state_code.as_deref(),
        Some("SM-07")
    );
    assert_eq!(
        locate(&atlas, 44.05, 12.6).unwrap().state_code.as_deref(),
        Some("IT-RN")
    );
}

#[test]
fn test_locate_without_subdivision() {
    let atlas = atlas();
    let joint = locate(&atlas, 25.1, 56.1).unwrap();
    assert_eq!(joint.region_code, "AE-FU-SH");
    assert_eq!(joint.state_code, None);

    let body = serde_json::to_value(&joint).unwrap();
    assert!(body.get("state_code").is_none());
}

#[test]
fn test_locate_open_ocean() {
    let atlas = atlas();
    assert!(atlas.locate(0.0, 0.0, OutputMode::Default).unwrap().is_none());
    assert!(atlas.locate(0.0, 0.0, OutputMode::Raw).unwrap().is_none());
}

#[test]
fn test_locate_rejects_non_numbers() {
    let atlas = atlas();
    let err = atlas
        .locate_json(&json!("x"), &json!(-3.7), OutputMode::Default)
        .unwrap_err();
    assert!(matches!(err, LocusError::InvalidCoordinates { .. }));

    assert!(atlas.locate(f64::NAN, 1.0, OutputMode::Default).is_err());
    assert!(atlas
        .locate_json(&json!(40.4), &json!(-3.7), OutputMode::Default)
        .unwrap()
        .is_some());
}

#[test]
fn test_locate_raw_and_geojson_modes() {
    let atlas = atlas();

    let raw = atlas
        .locate(40.4167047, -3.7035825, OutputMode::Raw)
        .unwrap()
        .unwrap();
    let body = serde_json::to_value(&raw).unwrap();
    assert_eq!(body["type"], "FeatureCollection");
    assert_eq!(body["features"][0]["properties"]["iso_3166_2"], "ES-M");
    assert_eq!(body["features"][0]["properties"]["name_len"], 6);
    assert_eq!(body["features"][0]["geometry"]["type"], "Polygon");

    let geojson = atlas
        .locate(40.4167047, -3.7035825, OutputMode::GeoJson)
        .unwrap()
        .unwrap();
    match &geojson {
        Location::GeoJson(collection) => {
            assert_eq!(collection.features.len(), 1);
            assert_eq!(collection.features[0].properties.region_code, "ES-MD");
        }
        other => panic!("unexpected location shape: {:?}", other),
    }
}

#[test]
fn test_catalog_from_files() {
    let atlas = atlas();
    let catalog = atlas.catalog();

    let spanish: Vec<String> = catalog
        .countries(&Locale::normalize(Some("es-ES")))
        .into_iter()
        .map(|c| c.country_name)
        .collect();
    assert_eq!(
        spanish,
        [
            "Australia",
            "Emiratos Árabes Unidos",
            "España",
            "Francia",
            "Italia",
            "San Marino"
        ]
    );

    assert_eq!(catalog.alpha2_to_alpha3("ES").as_deref(), Some("ESP"));
    assert_eq!(catalog.alpha3_to_alpha2("SMR").as_deref(), Some("SM"));
    assert!(catalog.alpha2_to_alpha3("XX").is_none());

    let regions = catalog.regions_by_country_alpha3("ESP", &Locale::from("en"));
    let names: Vec<&str> = regions.iter().map(|r| r.region_name.as_str()).collect();
    assert_eq!(names, ["Castile and León", "Community of Madrid"]);

    assert!(catalog.state("AE-X01", &Locale::none()).is_some());
    assert!(!catalog.is_valid_state("AE-X01~"));
    assert!(catalog.is_valid(EntityKind::CountryGrouping, "AU"));
    assert!(catalog.is_valid(EntityKind::Country, "AU"));
    assert!(!catalog.is_valid(EntityKind::Region, "ES-M"));
}

#[test]
fn test_boundaries_from_files() {
    let atlas = atlas();

    let full = atlas.continent_boundary("EU", false).unwrap();
    let simplified = atlas.continent_boundary("EU", true).unwrap();
    assert!(full.properties.get("simplified").is_none());
    assert_eq!(simplified.properties["simplified"], Value::Bool(true));
    match (&full.geometry, &simplified.geometry) {
        (Geometry::MultiPolygon(full), Geometry::MultiPolygon(simplified)) => {
            assert_eq!(full.len(), 2);
            assert_eq!(simplified.len(), 1);
        }
        other => panic!("unexpected geometries: {:?}", other),
    }

    let spain = atlas.country_boundary_by_alpha3("ESP").unwrap();
    assert_eq!(spain.properties["country_a2"], "ES");
    assert_eq!(
        atlas.boundary(EntityKind::Country, "ES", true).unwrap(),
        spain
    );

    assert!(atlas.country_grouping_boundary("EMEA", false).is_some());
    assert!(atlas.region_boundary("ES-CL").is_some());

    // known code, missing file
    assert!(atlas.region_boundary("ES-MD").is_none());
    // known code, malformed file
    assert!(atlas.country_boundary_by_alpha2("IT").is_none());
    // unknown codes never reach the filesystem
    assert!(atlas.continent_boundary("OC", false).is_none());
}

#[test]
fn test_state_boundaries_from_admin1() {
    let atlas = atlas();

    let madrid = atlas.boundary(EntityKind::State, "ES-M", false).unwrap();
    assert_eq!(
        serde_json::to_value(&madrid.properties).unwrap(),
        json!({ "country_a2": "ES", "region_code": "ES-MD", "state_code": "ES-M" })
    );

    let joint = atlas.state_boundary("AE-X01").unwrap();
    assert_eq!(joint.properties["region_code"], "AE-FU-SH");

    assert!(atlas.state_boundary("AE-X01~").is_none());
    // in the catalog but absent from the admin1 collection
    assert!(atlas.state_boundary("ES-BU").is_none());
}

#[test]
fn test_load_missing_directory() {
    let err = Atlas::load(&fixture_root().join("missing")).err().unwrap();
    assert!(matches!(err, LocusError::Io { .. }));
}
