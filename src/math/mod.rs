pub mod intersect;
pub mod ring;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Relative tolerance for area bookkeeping checks.
pub const AREA_TOLERANCE: f64 = 1e-5;
