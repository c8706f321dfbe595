use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};

/// An angle, stored in radians.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Angle(f64);

impl Angle {
    pub const ZERO: Angle = Angle(0.0);

    pub fn new_rads(rads: f64) -> Angle {
        Angle(rads)
    }

    pub fn degrees(degs: f64) -> Angle {
        Angle::new_rads(degs.to_radians())
    }

    pub fn opposite(self) -> Angle {
        Angle(self.0 + PI)
    }

    pub fn rotate_degs(self, degrees: f64) -> Angle {
        Angle(self.0 + degrees.to_radians())
    }

    pub fn rotate_rads(self, rads: f64) -> Angle {
        Angle(self.0 + rads)
    }

    /// Raw value, not wrapped into any range.
    pub fn radians(self) -> f64 {
        self.0
    }

    /// In [0, 2pi)
    pub fn normalized_radians(self) -> f64 {
        let rads = self.0.rem_euclid(2.0 * PI);
        // rem_euclid can round up to exactly 2pi for tiny negative inputs
        if rads >= 2.0 * PI {
            0.0
        } else {
            rads
        }
    }

    /// In [0, 360)
    pub fn normalized_degrees(self) -> f64 {
        self.normalized_radians().to_degrees()
    }

    /// The unsigned difference between two directions, in [0, 180] degrees.
    pub fn abs_diff_degrees(self, other: Angle) -> f64 {
        let diff = (self.normalized_degrees() - other.normalized_degrees()).abs();
        if diff > 180.0 {
            360.0 - diff
        } else {
            diff
        }
    }

    pub fn approx_eq(self, other: Angle, within_degrees: f64) -> bool {
        self.abs_diff_degrees(other) < within_degrees
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Angle({} degrees)", self.normalized_degrees())
    }
}
