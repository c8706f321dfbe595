//! The persisted form of a network: just the graph and each road's configuration. Lanes,
//! envelopes and intersections are rebuilt on load.

use serde::{Deserialize, Serialize};

use geom::{Distance, Line};

use crate::{Graph, Road, RoadSpec};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RawNetwork {
    pub graph: Graph,
    pub roads: Vec<RawRoad>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawRoad {
    pub segment: Line,
    pub number_of_lanes_in_left_side: usize,
    pub number_of_lanes_in_right_side: usize,
    pub priority: isize,
    pub elevation: isize,
    pub is_oneway: bool,
    /// Informational; recalculated on load.
    pub is_start_connected: bool,
    pub is_end_connected: bool,
    /// Whole units.
    pub lane_width: usize,
    pub name: String,
}

impl RawRoad {
    pub fn from_road(road: &Road) -> RawRoad {
        let spec = &road.spec;
        RawRoad {
            segment: road.segment,
            number_of_lanes_in_left_side: spec.left_lanes,
            number_of_lanes_in_right_side: spec.right_lanes,
            priority: spec.priority,
            elevation: spec.elevation,
            is_oneway: spec.oneway,
            is_start_connected: road.is_start_connected,
            is_end_connected: road.is_end_connected,
            lane_width: spec.lane_width.inner_meters().round().max(0.0) as usize,
            name: spec.name.clone(),
        }
    }

    pub fn into_spec(self) -> RoadSpec {
        RoadSpec {
            left_lanes: self.number_of_lanes_in_left_side,
            right_lanes: self.number_of_lanes_in_right_side,
            oneway: self.is_oneway,
            lane_width: Distance::meters(self.lane_width as f64),
            name: self.name,
            priority: self.priority,
            elevation: self.elevation,
        }
    }
}
