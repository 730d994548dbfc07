use geo::Polygon;

use crate::math::Point2;

/// A candidate straight cut through the current remainder.
///
/// The cut runs between two points on the exterior ring and separates
/// `removed` from the rest of the polygon.
#[derive(Debug, Clone)]
pub struct CutCandidate {
    /// Length of the cut chord.
    pub length: f64,
    /// Endpoints of the cut chord on the boundary.
    pub line: (Point2, Point2),
    /// The piece the cut separates; its area matches the requested target.
    pub removed: Polygon<f64>,
}
