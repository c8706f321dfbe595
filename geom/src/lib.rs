//! Planar geometry primitives: points, segments, polygons, and the handful of operations that
//! procedural road generation needs on top of them (envelopes and a segment-level union).

mod angle;
mod bounds;
mod distance;
mod envelope;
mod line;
mod polygon;
mod pt;

pub use crate::angle::Angle;
pub use crate::bounds::Bounds;
pub use crate::distance::Distance;
pub use crate::envelope::Envelope;
pub use crate::line::{line_intersection, Crossing, Line, Projection};
pub use crate::polygon::Polygon;
pub use crate::pt::{HashablePt2D, Pt2D};

/// Offsets closer than this to 0 or 1 are treated as landing on an existing vertex.
pub const EPSILON_OFFSET: f64 = 1e-9;
/// Points closer than this to a polygon's boundary count as lying on it.
pub const EPSILON_DIST: Distance = Distance::const_meters(1e-6);

pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

pub fn lerp_2d(a: Pt2D, b: Pt2D, t: f64) -> Pt2D {
    Pt2D::new(lerp(a.x(), b.x(), t), lerp(a.y(), b.y(), t))
}
