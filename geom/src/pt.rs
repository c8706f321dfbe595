use std::fmt;
use std::ops::{Add, Sub};

use ordered_float::NotNan;
use serde::{Deserialize, Serialize};

use crate::{Angle, Distance};

/// A point in world-space. Doubles as a 2D vector for the handful of operations that treat it as
/// one (dot products, normalizing, scaling).
///
/// Equality is exact coordinate equality; there's no epsilon. Graph topology relies on points
/// that were copied from one another comparing equal.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pt2D {
    x: f64,
    y: f64,
}

impl Pt2D {
    pub fn new(x: f64, y: f64) -> Pt2D {
        Pt2D { x, y }
    }

    pub fn zero() -> Pt2D {
        Pt2D::new(0.0, 0.0)
    }

    pub fn x(self) -> f64 {
        self.x
    }

    pub fn y(self) -> f64 {
        self.y
    }

    pub fn dist_to(self, to: Pt2D) -> Distance {
        Distance::meters(((self.x - to.x).powi(2) + (self.y - to.y).powi(2)).sqrt())
    }

    pub fn midpoint(self, other: Pt2D) -> Pt2D {
        Pt2D::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    pub fn project_away(self, dist: Distance, theta: Angle) -> Pt2D {
        let (sin, cos) = theta.normalized_radians().sin_cos();
        Pt2D::new(
            self.x + dist.inner_meters() * cos,
            self.y + dist.inner_meters() * sin,
        )
    }

    pub fn angle_to(self, to: Pt2D) -> Angle {
        (to - self).angle()
    }

    pub fn offset(self, dx: f64, dy: f64) -> Pt2D {
        Pt2D::new(self.x + dx, self.y + dy)
    }

    // The rest treat the point as a vector from the origin.

    pub fn dot(self, other: Pt2D) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn magnitude(self) -> f64 {
        (self.x.powi(2) + self.y.powi(2)).sqrt()
    }

    pub fn scale(self, factor: f64) -> Pt2D {
        Pt2D::new(self.x * factor, self.y * factor)
    }

    /// Unit vector with the same direction. The zero vector normalizes to itself instead of
    /// producing NaNs.
    pub fn normalize(self) -> Pt2D {
        let len = self.magnitude();
        if len == 0.0 {
            return Pt2D::zero();
        }
        self.scale(1.0 / len)
    }

    /// Rotates by 90 degrees, from the x axis towards the y axis.
    pub fn rotate_90(self) -> Pt2D {
        Pt2D::new(-self.y, self.x)
    }

    pub fn angle(self) -> Angle {
        Angle::new_rads(self.y.atan2(self.x))
    }

    pub fn to_hashable(self) -> HashablePt2D {
        HashablePt2D::from(self)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Pt2D {
    type Output = Pt2D;

    fn add(self, other: Pt2D) -> Pt2D {
        Pt2D::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Pt2D {
    type Output = Pt2D;

    fn sub(self, other: Pt2D) -> Pt2D {
        Pt2D::new(self.x - other.x, self.y - other.y)
    }
}

impl fmt::Display for Pt2D {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Pt2D({0}, {1})", self.x, self.y)
    }
}

/// Pt2D can't be hashed or totally ordered because of the floats. Convert to this when a point
/// needs to be a key.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct HashablePt2D {
    x_nan: NotNan<f64>,
    y_nan: NotNan<f64>,
}

impl HashablePt2D {
    pub fn to_pt2d(self) -> Pt2D {
        Pt2D::new(self.x_nan.into_inner(), self.y_nan.into_inner())
    }
}

impl From<Pt2D> for HashablePt2D {
    fn from(pt: Pt2D) -> Self {
        // NaN coordinates only show up from arithmetic on degenerate input; collapse them so a
        // bad point can't poison a map.
        HashablePt2D {
            x_nan: NotNan::new(pt.x()).unwrap_or_default(),
            y_nan: NotNan::new(pt.y()).unwrap_or_default(),
        }
    }
}
