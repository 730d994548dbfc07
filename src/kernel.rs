//! Seam to the external 2D geometry kernel.
//!
//! The splitter consumes polygons as [`geo::Polygon`] values and relies on
//! the kernel for area, boolean operations, containment, and validity. Only
//! this module touches `geo` directly; the analyzer works on plain points.

use geo::{Area, BooleanOps, Contains, Coord, LineString, MultiPolygon, Point, Polygon, Validation};

use crate::error::{Result, SplitError};
use crate::math::{Point2, TOLERANCE};

/// Relative area below which a boolean result piece is treated as noise.
const SLIVER_RATIO: f64 = 1e-9;

/// Exterior ring of a polygon as a vertex list, closing vertex dropped.
#[must_use]
pub fn ring_points(polygon: &Polygon<f64>) -> Vec<Point2> {
    let mut pts: Vec<Point2> = polygon
        .exterior()
        .coords()
        .map(|c| Point2::new(c.x, c.y))
        .collect();
    if pts.len() > 1 && (pts[0] - pts[pts.len() - 1]).norm() < TOLERANCE {
        pts.pop();
    }
    pts
}

/// Builds a polygon from a vertex list; the ring is closed automatically.
#[must_use]
pub fn to_polygon(points: &[Point2]) -> Polygon<f64> {
    let coords: Vec<Coord<f64>> = points.iter().map(|p| Coord { x: p.x, y: p.y }).collect();
    Polygon::new(LineString::new(coords), vec![])
}

/// Unsigned area of a polygon.
#[must_use]
pub fn area(polygon: &Polygon<f64>) -> f64 {
    polygon.unsigned_area()
}

/// True if the point lies strictly inside the polygon.
#[must_use]
pub fn contains_point(polygon: &Polygon<f64>, point: &Point2) -> bool {
    polygon.contains(&Point::new(point.x, point.y))
}

/// Boolean difference `a - b`, required to leave a single polygon.
///
/// # Errors
///
/// Returns `NumericalFailure` if the result is empty or disconnected.
pub fn difference(a: &Polygon<f64>, b: &Polygon<f64>) -> Result<Polygon<f64>> {
    single_piece(a.difference(b), "difference")
}

/// Boolean union `a + b`, required to produce a single polygon.
///
/// # Errors
///
/// Returns `NumericalFailure` if the result is empty or disconnected.
pub fn union(a: &Polygon<f64>, b: &Polygon<f64>) -> Result<Polygon<f64>> {
    single_piece(a.union(b), "union")
}

/// Validates a splitter input polygon: simple, positive area.
///
/// # Errors
///
/// Returns `InvalidArgument` if the polygon is degenerate, self-intersecting,
/// or has zero area.
pub fn validate_input(polygon: &Polygon<f64>) -> Result<()> {
    if ring_points(polygon).len() < 3 {
        return Err(SplitError::InvalidArgument(
            "polygon ring has fewer than 3 vertices".into(),
        ));
    }
    if !polygon.is_valid() {
        return Err(SplitError::InvalidArgument(
            "polygon is not simple".into(),
        ));
    }
    if polygon.unsigned_area() < TOLERANCE {
        return Err(SplitError::InvalidArgument("polygon has zero area".into()));
    }
    Ok(())
}

/// Extracts the one significant polygon from a boolean result, discarding
/// slivers at the noise floor.
fn single_piece(pieces: MultiPolygon<f64>, op: &str) -> Result<Polygon<f64>> {
    let total = pieces.unsigned_area();
    if total < TOLERANCE {
        return Err(SplitError::NumericalFailure(format!(
            "{op} produced an empty result"
        )));
    }
    let mut significant: Vec<Polygon<f64>> = pieces
        .into_iter()
        .filter(|p| p.unsigned_area() > total * SLIVER_RATIO)
        .collect();
    match significant.len() {
        1 => Ok(significant.swap_remove(0)),
        n => Err(SplitError::NumericalFailure(format!(
            "{op} produced {n} disjoint pieces"
        ))),
    }
}
