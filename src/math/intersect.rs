use super::{Point2, Vector2, TOLERANCE};

/// Intersection point of two infinite lines `p1 + t * d1` and `p2 + u * d2`.
///
/// Returns `None` if the lines are parallel.
#[must_use]
pub fn line_line_intersect(p1: &Point2, d1: &Vector2, p2: &Point2, d2: &Vector2) -> Option<Point2> {
    let cross = d1.x * d2.y - d1.y * d2.x;
    if cross.abs() < TOLERANCE {
        return None;
    }
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    let t = (dx * d2.y - dy * d2.x) / cross;
    Some(p1 + d1 * t)
}

/// Parametric intersection of the lines supporting two segments.
///
/// Returns `(t, u)` such that the intersection is `a0 + t * (a1 - a0)` and
/// `b0 + u * (b1 - b0)`; the parameters are unbounded. `None` if parallel.
#[must_use]
pub fn segment_segment_params(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
) -> Option<(f64, f64)> {
    let da = a1 - a0;
    let db = b1 - b0;
    let cross = da.x * db.y - da.y * db.x;
    if cross.abs() < TOLERANCE {
        return None;
    }
    let dx = b0.x - a0.x;
    let dy = b0.y - a0.y;
    let t = (dx * db.y - dy * db.x) / cross;
    let u = (dx * da.y - dy * da.x) / cross;
    Some((t, u))
}

/// Linear interpolation from `a` to `b` at parameter `t`.
#[must_use]
pub fn lerp(a: &Point2, b: &Point2, t: f64) -> Point2 {
    a + (b - a) * t
}

/// Transfers a point across a pivot onto the line supporting a segment.
///
/// The image lies on the segment's supporting line at the same distance from
/// `pivot` as `point`, on the side of the pivot where the segment lies.
/// Returns the parameter of the image on the segment if it falls in `[0, 1]`.
///
/// Both the segment and the point's own edge are assumed to pass through the
/// pivot (it is the intersection of their supporting lines).
#[must_use]
pub fn project_by_distance(
    point: &Point2,
    edge_start: &Point2,
    edge_end: &Point2,
    pivot: &Point2,
) -> Option<f64> {
    let delta = edge_end - edge_start;
    let len = delta.norm();
    if len < TOLERANCE {
        return None;
    }
    let dir = delta / len;

    // Signed coordinates of the segment's endpoints along the line, origin at the pivot.
    let s0 = dir.dot(&(edge_start - pivot));
    let s1 = dir.dot(&(edge_end - pivot));
    let side = if s0 + s1 >= 0.0 { 1.0 } else { -1.0 };

    let s = side * (point - pivot).norm();
    let t = (s - s0) / len;

    let eps = TOLERANCE;
    if (-eps..=1.0 + eps).contains(&t) {
        Some(t.clamp(0.0, 1.0))
    } else {
        None
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn line_line_perpendicular() {
        let p1 = Point2::new(0.0, 0.0);
        let d1 = Vector2::new(1.0, 0.0);
        let p2 = Point2::new(0.5, -1.0);
        let d2 = Vector2::new(0.0, 1.0);
        let pt = line_line_intersect(&p1, &d1, &p2, &d2).unwrap();
        assert!((pt.x - 0.5).abs() < TOLERANCE);
        assert!(pt.y.abs() < TOLERANCE);
    }

    #[test]
    fn line_line_parallel_returns_none() {
        let p1 = Point2::new(0.0, 0.0);
        let d1 = Vector2::new(1.0, 0.0);
        let p2 = Point2::new(0.0, 1.0);
        let d2 = Vector2::new(1.0, 0.0);
        assert!(line_line_intersect(&p1, &d1, &p2, &d2).is_none());
    }

    #[test]
    fn segment_params_crossing() {
        let a0 = Point2::new(0.0, 0.0);
        let a1 = Point2::new(2.0, 2.0);
        let b0 = Point2::new(0.0, 2.0);
        let b1 = Point2::new(2.0, 0.0);
        let (t, u) = segment_segment_params(&a0, &a1, &b0, &b1).unwrap();
        assert!((t - 0.5).abs() < TOLERANCE);
        assert!((u - 0.5).abs() < TOLERANCE);
    }

    #[test]
    fn segment_params_beyond_segments() {
        // The supporting lines cross, but outside both segments.
        let a0 = Point2::new(0.0, 0.0);
        let a1 = Point2::new(1.0, 0.0);
        let b0 = Point2::new(3.0, 1.0);
        let b1 = Point2::new(3.0, 2.0);
        let (t, u) = segment_segment_params(&a0, &a1, &b0, &b1).unwrap();
        assert!(t > 1.0);
        assert!(u < 0.0);
    }

    #[test]
    fn lerp_midpoint() {
        let a = Point2::new(1.0, 2.0);
        let b = Point2::new(5.0, 8.0);
        let m = lerp(&a, &b, 0.5);
        assert!((m.x - 3.0).abs() < TOLERANCE);
        assert!((m.y - 5.0).abs() < TOLERANCE);
    }

    #[test]
    fn project_square_corner() {
        // Unit square corner pivot at (1, 0): the image of (0, 0) on the
        // right wall sits at distance 1 from the pivot, i.e. at (1, 1).
        let pivot = Point2::new(1.0, 0.0);
        let t = project_by_distance(
            &Point2::new(0.0, 0.0),
            &Point2::new(1.0, 0.0),
            &Point2::new(1.0, 1.0),
            &pivot,
        )
        .unwrap();
        assert!((t - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn project_outside_edge_is_invalid() {
        // Image falls at distance 2 along an edge of length 1.
        let pivot = Point2::new(1.0, 0.0);
        let t = project_by_distance(
            &Point2::new(-1.0, 0.0),
            &Point2::new(1.0, 0.0),
            &Point2::new(1.0, 1.0),
            &pivot,
        );
        assert!(t.is_none());
    }

    #[test]
    fn project_onto_offset_edge() {
        // Edge from (2, 0) to (4, 0), pivot at the origin: the image of a
        // point at distance 3 lands in the middle of the edge.
        let pivot = Point2::new(0.0, 0.0);
        let t = project_by_distance(
            &Point2::new(0.0, 3.0),
            &Point2::new(2.0, 0.0),
            &Point2::new(4.0, 0.0),
            &pivot,
        )
        .unwrap();
        assert!((t - 0.5).abs() < TOLERANCE);
    }
}
