mod cut;
mod edge_pair;

pub use cut::CutCandidate;
pub use edge_pair::{Edge, EdgePair};

use geo::Polygon;
use tracing::debug;

use crate::error::{Result, SplitError};
use crate::kernel;
use crate::math::{ring, AREA_TOLERANCE};

/// Partitions a polygon into a requested number of equal-area pieces.
pub trait PolygonSplitter {
    /// Splits `polygon` into `parts` polygons of equal area.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if `parts` is zero or the polygon is degenerate,
    ///   self-intersecting, or has zero area.
    /// - `Infeasible` if no candidate cut reaches the target area at some
    ///   step.
    /// - `NumericalFailure` if area conservation drifts beyond tolerance or
    ///   a boolean operation degenerates.
    fn split(&self, polygon: &Polygon<f64>, parts: usize) -> Result<Vec<Polygon<f64>>>;
}

/// Greedy splitter: at every step, applies the shortest cut that separates
/// one equal share from the remainder.
///
/// Each step enumerates all edge pairs of the current remainder, asks
/// [`EdgePair`] for candidate cuts, and keeps the globally shortest one;
/// ties resolve to the first candidate in enumeration order. Minimizing cut
/// length per step minimizes new boundary greedily, not globally.
#[derive(Debug, Default, Clone, Copy)]
pub struct GreedySplitter;

impl GreedySplitter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl PolygonSplitter for GreedySplitter {
    #[allow(clippy::cast_precision_loss)]
    fn split(&self, polygon: &Polygon<f64>, parts: usize) -> Result<Vec<Polygon<f64>>> {
        if parts < 1 {
            return Err(SplitError::InvalidArgument(
                "parts must be at least 1".into(),
            ));
        }
        kernel::validate_input(polygon)?;
        if parts == 1 {
            return Ok(vec![polygon.clone()]);
        }

        let original_area = kernel::area(polygon);
        let mut remainder = polygon.clone();
        let mut pieces: Vec<Polygon<f64>> = Vec::with_capacity(parts);

        for k in (2..=parts).rev() {
            let verts = ring::cleaned(&kernel::ring_points(&remainder));
            let n = verts.len();
            if n < 3 {
                return Err(SplitError::NumericalFailure(
                    "remainder ring degenerated".into(),
                ));
            }
            remainder = kernel::to_polygon(&verts);
            let target = kernel::area(&remainder) / k as f64;
            debug!(parts_left = k, target, edges = n, "searching for cut");

            let mut best: Option<CutCandidate> = None;
            for i in 0..n {
                for j in (i + 1)..n {
                    let pair = EdgePair::new(
                        Edge::new(verts[i], verts[(i + 1) % n]),
                        Edge::new(verts[j], verts[(j + 1) % n]),
                    );
                    for candidate in pair.cuts(&verts, i, j, &remainder, target) {
                        let better = best
                            .as_ref()
                            .is_none_or(|b| candidate.length < b.length);
                        if better {
                            best = Some(candidate);
                        }
                    }
                }
            }

            let Some(winner) = best else {
                return Err(SplitError::Infeasible(format!(
                    "no cut separates area {target} with {k} parts remaining"
                )));
            };
            debug!(cut_length = winner.length, "applying shortest cut");

            remainder = kernel::difference(&remainder, &winner.removed)?;
            pieces.push(winner.removed);

            let accounted: f64 =
                pieces.iter().map(kernel::area).sum::<f64>() + kernel::area(&remainder);
            let drift = (accounted - original_area).abs() / original_area;
            if drift > AREA_TOLERANCE {
                return Err(SplitError::NumericalFailure(format!(
                    "area conservation drifted by {drift:.3e}"
                )));
            }
        }

        pieces.push(remainder);
        Ok(pieces)
    }
}

/// Splits `polygon` into `parts` equal-area pieces with [`GreedySplitter`].
///
/// # Errors
///
/// See [`PolygonSplitter::split`].
pub fn split(polygon: &Polygon<f64>, parts: usize) -> Result<Vec<Polygon<f64>>> {
    GreedySplitter::new().split(polygon, parts)
}
