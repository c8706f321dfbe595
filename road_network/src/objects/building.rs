use serde::{Deserialize, Serialize};

use geom::{Distance, Polygon};

pub const DEFAULT_BUILDING_HEIGHT: Distance = Distance::const_meters(200.0);

/// A rectangular footprint along a road.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub base: Polygon,
    pub height: Distance,
}

impl Building {
    pub fn new(base: Polygon) -> Building {
        Building {
            base,
            height: DEFAULT_BUILDING_HEIGHT,
        }
    }
}
