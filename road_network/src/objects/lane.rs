use serde::{Deserialize, Serialize};

use geom::{Distance, Line};

use crate::RoadID;

pub const DEFAULT_SPEED_LIMIT: usize = 50;

/// The centerline of one lane, pointing in its direction of travel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Lane {
    pub road: RoadID,
    /// Counting from the left edge of the road.
    pub index: usize,
    pub line: Line,
    pub width: Distance,
    pub is_leftmost: bool,
    pub is_rightmost: bool,
    pub speed_limit: usize,
    pub elevation: isize,
}

impl Lane {
    /// Only the leftmost lane of a direction draws its left edge; otherwise the neighbor's right
    /// edge is already there.
    pub fn left_edge(&self) -> Option<Line> {
        if self.is_leftmost {
            Some(self.line.shift_left(self.width / 2.0))
        } else {
            None
        }
    }

    pub fn right_edge(&self) -> Line {
        self.line.shift_right(self.width / 2.0)
    }

    pub fn length(&self) -> Distance {
        self.line.length()
    }
}
