use super::{Point2, TOLERANCE};

/// Signed area of a closed ring (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise. The closing
/// vertex must not be repeated.
#[must_use]
pub fn signed_area(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Absolute area of a closed ring.
#[must_use]
pub fn area(points: &[Point2]) -> f64 {
    signed_area(points).abs()
}

/// Removes consecutive duplicate and collinear vertices from a ring.
///
/// Boolean operations tend to leave both behind; without this pass the edge
/// enumeration accumulates spurious pairs across split iterations.
#[must_use]
pub fn cleaned(points: &[Point2]) -> Vec<Point2> {
    let mut out: Vec<Point2> = Vec::with_capacity(points.len());
    for &p in points {
        if out.last().is_some_and(|q| (p - q).norm() < TOLERANCE) {
            continue;
        }
        out.push(p);
    }
    while out.len() > 1 && (out[0] - out[out.len() - 1]).norm() < TOLERANCE {
        out.pop();
    }
    if out.len() < 3 {
        return out;
    }

    let mut result: Vec<Point2> = Vec::with_capacity(out.len());
    let n = out.len();
    for i in 0..n {
        let prev = out[(i + n - 1) % n];
        let cur = out[i];
        let next = out[(i + 1) % n];
        let a = cur - prev;
        let b = next - cur;
        let cross = a.x * b.y - a.y * b.x;
        let scale = a.norm() * b.norm();
        if scale < TOLERANCE || cross.abs() < 1e-9 * scale {
            continue;
        }
        result.push(cur);
    }
    result
}

/// Vertices of a ring from index `from` to index `to`, inclusive, wrapping
/// around as needed. Closing the result with the chord `to -> from` yields
/// the slice of the polygon bounded by that arc.
#[must_use]
pub fn slice(ring: &[Point2], from: usize, to: usize) -> Vec<Point2> {
    let n = ring.len();
    let mut out = Vec::new();
    let mut k = from;
    loop {
        out.push(ring[k]);
        if k == to {
            break;
        }
        k = (k + 1) % n;
    }
    out
}
