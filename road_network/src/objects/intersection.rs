use std::fmt;

use serde::{Deserialize, Serialize};

use geom::Pt2D;

use crate::RoadID;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IntersectionID(pub usize);

impl fmt::Display for IntersectionID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Intersection #{}", self.0)
    }
}

/// A graph point where at least one road ends.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Intersection {
    pub id: IntersectionID,
    pub location: Pt2D,
    /// Every road with `location` as one of its endpoints.
    pub roads: Vec<RoadID>,
    /// Set from outside; survives regeneration as long as the junction stays put.
    pub has_signal: bool,
}

impl Intersection {
    /// Only one road ends here.
    pub fn is_dead_end(&self) -> bool {
        self.roads.len() == 1
    }
}
