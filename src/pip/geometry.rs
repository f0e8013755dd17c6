//! Crossing-number point-in-polygon tests.
//!
//! Based on the classic even-odd ray casting test
//! (http://www.ecse.rpi.edu/Homepages/wrf/Research/Short_Notes/pnpoly.html).
//! Points exactly on an edge follow its asymmetric convention: for an
//! axis-aligned square, the bottom and left edges are inside and the top
//! and right edges are outside.

use geo::BoundingRect;
use geo_types::{Coord, LineString, MultiPolygon, Polygon, Rect};

use crate::models::geojson::{Geometry, Ring};

/// Whether `point` lies inside the closed `ring`.
///
/// Rings with fewer than three points contain nothing. Horizontal and
/// zero-length edges never straddle the ray, so they are skipped without
/// dividing by zero.
pub fn ring_contains(ring: &[Coord<f64>], point: Coord<f64>) -> bool {
    if ring.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let pi = ring[i];
        let pj = ring[j];
        if ((pi.y > point.y) != (pj.y > point.y))
            && (point.x < (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x)
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Inside the exterior ring and outside every hole.
pub fn polygon_contains(polygon: &Polygon<f64>, point: Coord<f64>) -> bool {
    ring_contains(&polygon.exterior().0, point)
        && !polygon
            .interiors()
            .iter()
            .any(|hole| ring_contains(&hole.0, point))
}

/// Index of the first sub-polygon containing `point`.
pub fn first_containing_polygon(polygons: &MultiPolygon<f64>, point: Coord<f64>) -> Option<usize> {
    polygons
        .0
        .iter()
        .position(|polygon| polygon_contains(polygon, point))
}

pub fn multi_polygon_contains(polygons: &MultiPolygon<f64>, point: Coord<f64>) -> bool {
    first_containing_polygon(polygons, point).is_some()
}

/// Geometry of an admin boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum Boundary {
    Polygon(Polygon<f64>),
    MultiPolygon(MultiPolygon<f64>),
}

impl Boundary {
    pub fn contains(&self, point: Coord<f64>) -> bool {
        match self {
            Boundary::Polygon(polygon) => polygon_contains(polygon, point),
            Boundary::MultiPolygon(polygons) => multi_polygon_contains(polygons, point),
        }
    }

    pub fn bounding_rect(&self) -> Option<Rect<f64>> {
        match self {
            Boundary::Polygon(polygon) => polygon.bounding_rect(),
            Boundary::MultiPolygon(polygons) => polygons.bounding_rect(),
        }
    }
}

impl From<&Geometry> for Boundary {
    fn from(geometry: &Geometry) -> Self {
        match geometry {
            Geometry::Polygon(rings) => Boundary::Polygon(polygon_from_rings(rings)),
            Geometry::MultiPolygon(polygons) => Boundary::MultiPolygon(MultiPolygon::new(
                polygons.iter().map(|rings| polygon_from_rings(rings)).collect(),
            )),
        }
    }
}

/// Inclusive bounding-rectangle test.
pub fn rect_covers(rect: &Rect<f64>, point: Coord<f64>) -> bool {
    let (min, max) = (rect.min(), rect.max());
    point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
}

fn line_string_from(ring: &Ring) -> LineString<f64> {
    LineString::new(ring.iter().map(|&[x, y]| Coord { x, y }).collect())
}

fn polygon_from_rings(rings: &[Ring]) -> Polygon<f64> {
    match rings.split_first() {
        Some((exterior, holes)) => Polygon::new(
            line_string_from(exterior),
            holes.iter().map(line_string_from).collect(),
        ),
        None => Polygon::new(LineString::new(vec![]), vec![]),
    }
}
