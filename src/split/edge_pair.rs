use tracing::trace;

use crate::kernel;
use crate::math::intersect::{
    lerp, line_line_intersect, project_by_distance, segment_segment_params,
};
use crate::math::{ring, Point2, Vector2, AREA_TOLERANCE, TOLERANCE};

use super::cut::CutCandidate;

/// Directed edge of an exterior ring; direction is ring traversal order.
#[derive(Debug, Clone, Copy)]
pub struct Edge {
    pub start: Point2,
    pub end: Point2,
}

impl Edge {
    #[must_use]
    pub fn new(start: Point2, end: Point2) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn delta(&self) -> Vector2 {
        self.end - self.start
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.delta().norm()
    }

    #[must_use]
    pub fn point_at(&self, t: f64) -> Point2 {
        self.start + self.delta() * t
    }
}

/// Which edge of the pair a projected point lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Host {
    EdgeA,
    EdgeB,
}

/// Image of one edge's endpoint on the opposite edge, found by distance
/// transfer about the pivot. Absence of a valid projection is expressed as
/// `Option<Projection>`.
#[derive(Debug, Clone, Copy)]
struct Projection {
    point: Point2,
    host: Host,
}

/// A triangle region of the decomposition. The apex is the fixed corner on
/// the edge opposite the projection's host; a cut pivots about it while the
/// moving endpoint sweeps from `outer` (chord side) to `inner` (the
/// projected point, on the trapezoid wall).
#[derive(Debug, Clone, Copy)]
struct TriangleRegion {
    apex: Point2,
    outer: Point2,
    inner: Point2,
    apex_on_a: bool,
}

/// Decomposition of the span between an edge pair: an optional triangle on
/// each side and the always-present central quadrilateral.
struct Regions {
    leading: Option<TriangleRegion>,
    /// Trapezoid corners in ring order: trailing-A, leading-A, leading-B,
    /// trailing-B.
    corners: [Point2; 4],
    trailing: Option<TriangleRegion>,
}

/// A pair of edges on a polygon's exterior ring.
///
/// Possible cut lines between the pair are located in up to three regions:
///
/// ```text
///              edgeA
///     .__________________________.
///    /|                          |\
///   / |                          | \
///  /T2|        trapezoid         |T1\
/// .___|__________________________|___.
///        <--------- edgeB
///      ^                          ^
///  trailing                    leading
/// projection                 projection
/// ```
///
/// The leading projection pairs `edgeA.end` with `edgeB.start`, the trailing
/// projection `edgeA.start` with `edgeB.end`. When the supporting lines are
/// parallel there is no pivot, no triangle is valid, and only the trapezoid
/// remains.
pub struct EdgePair {
    edge_a: Edge,
    edge_b: Edge,
    leading: Option<Projection>,
    trailing: Option<Projection>,
}

impl EdgePair {
    #[must_use]
    pub fn new(edge_a: Edge, edge_b: Edge) -> Self {
        let pivot = line_line_intersect(
            &edge_a.start,
            &edge_a.delta(),
            &edge_b.start,
            &edge_b.delta(),
        );
        let (leading, trailing) = match pivot {
            Some(pivot) => (
                project_either(&edge_a.end, &edge_b, &edge_b.start, &edge_a, &pivot),
                project_either(&edge_a.start, &edge_b, &edge_b.end, &edge_a, &pivot),
            ),
            None => (None, None),
        };
        Self {
            edge_a,
            edge_b,
            leading,
            trailing,
        }
    }

    fn regions(&self) -> Regions {
        let a = self.edge_a;
        let b = self.edge_b;
        let leading = self.leading.map(|p| match p.host {
            Host::EdgeB => TriangleRegion {
                apex: a.end,
                outer: b.start,
                inner: p.point,
                apex_on_a: true,
            },
            Host::EdgeA => TriangleRegion {
                apex: b.start,
                outer: a.end,
                inner: p.point,
                apex_on_a: false,
            },
        });
        let trailing = self.trailing.map(|p| match p.host {
            Host::EdgeB => TriangleRegion {
                apex: a.start,
                outer: b.end,
                inner: p.point,
                apex_on_a: true,
            },
            Host::EdgeA => TriangleRegion {
                apex: b.end,
                outer: a.start,
                inner: p.point,
                apex_on_a: false,
            },
        });
        // Trapezoid corners: the projected point if it lies on that edge,
        // otherwise the edge's own corner, taken in ring order.
        let corners = [
            corner_on(self.trailing, Host::EdgeA, a.start),
            corner_on(self.leading, Host::EdgeA, a.end),
            corner_on(self.leading, Host::EdgeB, b.start),
            corner_on(self.trailing, Host::EdgeB, b.end),
        ];
        Regions {
            leading,
            corners,
            trailing,
        }
    }

    /// Locates up to two candidate cuts (one per sweep direction) that
    /// separate `target_area` from the polygon.
    ///
    /// `ring_pts` is the cleaned exterior ring, `index_a`/`index_b` the
    /// indices of this pair's edges on it. A direction yields no candidate
    /// when its reachable area cannot fit the target, when the cut would
    /// cross the ring, or when the separated piece misses the target area.
    #[must_use]
    pub fn cuts(
        &self,
        ring_pts: &[Point2],
        index_a: usize,
        index_b: usize,
        polygon: &geo::Polygon<f64>,
        target_area: f64,
    ) -> Vec<CutCandidate> {
        let regions = self.regions();
        let [c1, c2, c3, c4] = regions.corners;
        let n = ring_pts.len();
        let mut cuts = Vec::with_capacity(2);

        for forward in [true, false] {
            // Ring vertices the removed piece absorbs in this direction;
            // their slice bounds the "outside" area beyond the pair.
            let (arc_from, arc_to) = if forward {
                ((index_a + 1) % n, index_b)
            } else {
                ((index_b + 1) % n, index_a)
            };
            let arc = ring::slice(ring_pts, arc_from, arc_to);
            let outside_area = ring::area(&arc);
            if outside_area >= target_area {
                // A cut of this size sits in the outside slice; it belongs
                // to a pair closer to it.
                continue;
            }

            let order: [Option<Region>; 3] = if forward {
                [
                    regions.leading.map(TriangleRegion::entered_from_chord),
                    Some(Region::Quad {
                        a_from: c2,
                        a_to: c1,
                        b_from: c3,
                        b_to: c4,
                    }),
                    regions.trailing.map(TriangleRegion::entered_from_wall),
                ]
            } else {
                [
                    regions.trailing.map(TriangleRegion::entered_from_chord),
                    Some(Region::Quad {
                        a_from: c1,
                        a_to: c2,
                        b_from: c4,
                        b_to: c3,
                    }),
                    regions.leading.map(TriangleRegion::entered_from_wall),
                ]
            };

            let region_total: f64 = order.iter().flatten().map(Region::area).sum();
            if outside_area + region_total < target_area * (1.0 - 1e-9) {
                continue;
            }

            let mut remaining = target_area - outside_area;
            let slack = target_area * 1e-9 + TOLERANCE;
            let mut located = None;
            for region in order.iter().flatten() {
                let region_area = region.area();
                if region_area <= TOLERANCE {
                    continue;
                }
                if remaining <= region_area + slack {
                    located = Some((region, remaining.min(region_area)));
                    break;
                }
                remaining -= region_area;
            }
            let Some((region, needed)) = located else {
                continue;
            };

            let (on_a, on_b) = region.cut_at(needed);
            let length = (on_b - on_a).norm();
            if length < TOLERANCE {
                continue;
            }
            if crosses_ring(&on_a, &on_b, ring_pts, index_a, index_b) {
                trace!(length, "discarding cut crossing the ring");
                continue;
            }
            let midpoint = lerp(&on_a, &on_b, 0.5);
            if !kernel::contains_point(polygon, &midpoint) {
                trace!(length, "discarding cut outside the polygon");
                continue;
            }

            // The removed piece is the ring walk between the cut endpoints:
            // the outside slice, the fully swept regions, and the partial
            // region up to the cut, assembled in one pass.
            let mut piece: Vec<Point2> = Vec::with_capacity(arc.len() + 2);
            let (first, last) = if forward { (on_a, on_b) } else { (on_b, on_a) };
            push_unique(&mut piece, first);
            for &v in &arc {
                push_unique(&mut piece, v);
            }
            push_unique(&mut piece, last);
            if piece.len() > 1 && (piece[0] - piece[piece.len() - 1]).norm() < TOLERANCE {
                piece.pop();
            }
            if piece.len() < 3 {
                continue;
            }
            let piece_area = ring::area(&piece);
            if (piece_area - target_area).abs() > target_area * AREA_TOLERANCE {
                // The decomposition mis-modeled this span (a slice chord
                // left the polygon); the piece does not match the target.
                trace!(piece_area, target_area, "discarding off-target cut");
                continue;
            }

            cuts.push(CutCandidate {
                length,
                line: (on_a, on_b),
                removed: kernel::to_polygon(&piece),
            });
        }
        cuts
    }
}

/// Region of the decomposition prepared for one sweep direction.
enum Region {
    /// Cut pivots about the apex; the moving endpoint goes from `from` to
    /// `to`. Swept area is exactly linear in the sweep parameter.
    Triangle {
        apex: Point2,
        from: Point2,
        to: Point2,
        apex_on_a: bool,
    },
    /// Cut endpoints interpolate along the edges between opposite walls of
    /// the trapezoid. Swept area is quadratic in the sweep parameter.
    Quad {
        a_from: Point2,
        a_to: Point2,
        b_from: Point2,
        b_to: Point2,
    },
}

impl Region {
    fn area(&self) -> f64 {
        match self {
            Region::Triangle { apex, from, to, .. } => ring::area(&[*apex, *from, *to]),
            Region::Quad {
                a_from,
                a_to,
                b_from,
                b_to,
            } => ring::area(&[*a_from, *a_to, *b_to, *b_from]),
        }
    }

    /// Cut endpoints separating `needed` area, as `(point on edge A, point
    /// on edge B)`. `needed` must not exceed the region area.
    fn cut_at(&self, needed: f64) -> (Point2, Point2) {
        match self {
            Region::Triangle {
                apex,
                from,
                to,
                apex_on_a,
            } => {
                let t = (needed / self.area()).clamp(0.0, 1.0);
                let moving = lerp(from, to, t);
                if *apex_on_a {
                    (*apex, moving)
                } else {
                    (moving, *apex)
                }
            }
            Region::Quad {
                a_from,
                a_to,
                b_from,
                b_to,
            } => {
                let t = quad_param(a_from, a_to, b_from, b_to, needed);
                (lerp(a_from, a_to, t), lerp(b_from, b_to, t))
            }
        }
    }
}

impl TriangleRegion {
    /// Sweep for a direction entering this triangle across the outside
    /// chord.
    fn entered_from_chord(self) -> Region {
        Region::Triangle {
            apex: self.apex,
            from: self.outer,
            to: self.inner,
            apex_on_a: self.apex_on_a,
        }
    }

    /// Sweep for a direction entering this triangle across the trapezoid
    /// wall.
    fn entered_from_wall(self) -> Region {
        Region::Triangle {
            apex: self.apex,
            from: self.inner,
            to: self.outer,
            apex_on_a: self.apex_on_a,
        }
    }
}

/// Projects `point_a` onto edge B; if the image parameter falls outside the
/// edge, projects the corresponding `point_b` onto edge A instead.
fn project_either(
    point_a: &Point2,
    edge_b: &Edge,
    point_b: &Point2,
    edge_a: &Edge,
    pivot: &Point2,
) -> Option<Projection> {
    if let Some(t) = project_by_distance(point_a, &edge_b.start, &edge_b.end, pivot) {
        return Some(Projection {
            point: edge_b.point_at(t),
            host: Host::EdgeB,
        });
    }
    project_by_distance(point_b, &edge_a.start, &edge_a.end, pivot).map(|t| Projection {
        point: edge_a.point_at(t),
        host: Host::EdgeA,
    })
}

fn corner_on(projection: Option<Projection>, host: Host, fallback: Point2) -> Point2 {
    match projection {
        Some(p) if p.host == host => p.point,
        _ => fallback,
    }
}

/// Sweep parameter at which the quadrilateral swept between the walls
/// reaches `needed` area.
///
/// The swept area is `q t^2 + l t` (zero at the start wall); the
/// coefficients are recovered from two samples and the increasing root is
/// taken. Falls back to the linear term when the walls are parallel and the
/// quadratic term vanishes.
fn quad_param(a_from: &Point2, a_to: &Point2, b_from: &Point2, b_to: &Point2, needed: f64) -> f64 {
    let swept = |t: f64| {
        let pa = lerp(a_from, a_to, t);
        let pb = lerp(b_from, b_to, t);
        ring::signed_area(&[*a_from, pa, pb, *b_from])
    };
    let mut s_half = swept(0.5);
    let mut s_full = swept(1.0);
    if s_full < 0.0 {
        s_half = -s_half;
        s_full = -s_full;
    }
    let quad = 2.0 * s_full - 4.0 * s_half;
    let lin = 4.0 * s_half - s_full;
    if quad.abs() < TOLERANCE.max(s_full * 1e-12) {
        return (needed / lin).clamp(0.0, 1.0);
    }
    let disc = lin * lin + 4.0 * quad * needed;
    let root = disc.max(0.0).sqrt();
    let t1 = (-lin + root) / (2.0 * quad);
    let t2 = (-lin - root) / (2.0 * quad);
    let eps = 1e-9;
    let picked = if (-eps..=1.0 + eps).contains(&t1) { t1 } else { t2 };
    picked.clamp(0.0, 1.0)
}

/// True if the cut properly crosses any ring edge other than the pair's own
/// two host edges. Touches at shared vertices do not count.
fn crosses_ring(
    cut_start: &Point2,
    cut_end: &Point2,
    ring_pts: &[Point2],
    skip_a: usize,
    skip_b: usize,
) -> bool {
    let n = ring_pts.len();
    let eps = 1e-9;
    for k in 0..n {
        if k == skip_a || k == skip_b {
            continue;
        }
        let b0 = ring_pts[k];
        let b1 = ring_pts[(k + 1) % n];
        if let Some((t, u)) = segment_segment_params(cut_start, cut_end, &b0, &b1) {
            if t > eps && t < 1.0 - eps && u > eps && u < 1.0 - eps {
                return true;
            }
        }
    }
    false
}

fn push_unique(points: &mut Vec<Point2>, p: Point2) {
    if points.last().is_none_or(|q| (p - q).norm() >= TOLERANCE) {
        points.push(p);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use crate::kernel;

    use super::*;

    fn pair_at(ring_pts: &[Point2], i: usize, j: usize) -> EdgePair {
        let n = ring_pts.len();
        EdgePair::new(
            Edge::new(ring_pts[i], ring_pts[(i + 1) % n]),
            Edge::new(ring_pts[j], ring_pts[(j + 1) % n]),
        )
    }

    #[test]
    fn parallel_edges_trapezoid_only() {
        let ring_pts = vec![
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(4.0, 2.0),
            Point2::new(0.0, 2.0),
        ];
        let polygon = kernel::to_polygon(&ring_pts);
        let pair = pair_at(&ring_pts, 0, 2);
        let cuts = pair.cuts(&ring_pts, 0, 2, &polygon, 4.0);
        assert_eq!(cuts.len(), 2);
        for cut in &cuts {
            assert_relative_eq!(cut.length, 2.0, max_relative = 1e-9);
            assert_relative_eq!(kernel::area(&cut.removed), 4.0, max_relative = 1e-9);
        }
    }

    #[test]
    fn trapezoid_scenario_pair_cuts_at_half_area() {
        let ring_pts = vec![
            Point2::new(0.0, 0.0),
            Point2::new(100.0, 0.0),
            Point2::new(90.0, 50.0),
            Point2::new(10.0, 50.0),
        ];
        let polygon = kernel::to_polygon(&ring_pts);
        let pair = pair_at(&ring_pts, 0, 2);
        let cuts = pair.cuts(&ring_pts, 0, 2, &polygon, 2250.0);
        assert_eq!(cuts.len(), 2);
        for cut in &cuts {
            assert_relative_eq!(cut.length, 50.0, max_relative = 1e-9);
            assert_relative_eq!(kernel::area(&cut.removed), 2250.0, max_relative = 1e-6);
        }
    }

    #[test]
    fn adjacent_pair_solves_quadratic_sweep() {
        // Unit square, bottom and right edges: the swept region is the
        // corner triangle, whose area grows quadratically. A quarter of the
        // square needs the sweep at sqrt(1/2), not at the linear guess.
        let ring_pts = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ];
        let polygon = kernel::to_polygon(&ring_pts);
        let pair = pair_at(&ring_pts, 0, 1);
        let cuts = pair.cuts(&ring_pts, 0, 1, &polygon, 0.25);
        assert_eq!(cuts.len(), 1);
        assert_relative_eq!(kernel::area(&cuts[0].removed), 0.25, max_relative = 1e-9);
        assert_relative_eq!(cuts[0].length, 1.0, max_relative = 1e-9);
    }

    #[test]
    fn unreachable_target_yields_no_cuts() {
        let ring_pts = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ];
        let polygon = kernel::to_polygon(&ring_pts);
        let pair = pair_at(&ring_pts, 0, 1);
        assert!(pair.cuts(&ring_pts, 0, 1, &polygon, 1.5).is_empty());
    }

    #[test]
    fn crossing_cuts_are_discarded() {
        // U-shaped polygon; a cut between the outer walls above the notch
        // floor would cross the prongs and must be rejected.
        let ring_pts = vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(6.0, 10.0),
            Point2::new(6.0, 2.0),
            Point2::new(4.0, 2.0),
            Point2::new(4.0, 10.0),
            Point2::new(0.0, 10.0),
        ];
        let polygon = kernel::to_polygon(&ring_pts);
        let pair = pair_at(&ring_pts, 1, 7);
        assert!(pair.cuts(&ring_pts, 1, 7, &polygon, 30.0).is_empty());

        // Below the notch floor the cut is a clean interior chord.
        let cuts = pair.cuts(&ring_pts, 1, 7, &polygon, 15.0);
        assert_eq!(cuts.len(), 1);
        assert_relative_eq!(kernel::area(&cuts[0].removed), 15.0, max_relative = 1e-9);
        assert_relative_eq!(cuts[0].length, 10.0, max_relative = 1e-9);
    }

    #[test]
    fn edge_helpers() {
        let edge = Edge::new(Point2::new(1.0, 1.0), Point2::new(4.0, 5.0));
        assert_relative_eq!(edge.length(), 5.0);
        let mid = edge.point_at(0.5);
        assert_relative_eq!(mid.x, 2.5);
        assert_relative_eq!(mid.y, 3.0);
    }
}
