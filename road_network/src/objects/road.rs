use std::fmt;

use serde::{Deserialize, Serialize};

use geom::{Distance, Envelope, Line, Polygon};

use crate::make::lanes::make_lanes;
use crate::Lane;

pub const DEFAULT_LANE_WIDTH: Distance = Distance::const_meters(50.0);

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoadID(pub usize);

impl fmt::Display for RoadID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Road #{}", self.0)
    }
}

/// Everything about a road except where it is. Halves of a split road inherit this unchanged.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoadSpec {
    /// Lanes running from the end of the segment back to the start.
    pub left_lanes: usize,
    /// Lanes running from the start to the end.
    pub right_lanes: usize,
    pub oneway: bool,
    pub lane_width: Distance,
    pub name: String,
    pub priority: isize,
    pub elevation: isize,
}

impl RoadSpec {
    pub fn new(left_lanes: usize, right_lanes: usize, oneway: bool) -> RoadSpec {
        RoadSpec {
            left_lanes,
            right_lanes,
            oneway,
            lane_width: DEFAULT_LANE_WIDTH,
            name: String::new(),
            priority: 0,
            elevation: 0,
        }
    }

    pub fn total_lanes(&self) -> usize {
        self.left_lanes + self.right_lanes
    }

    pub fn width(&self) -> Distance {
        self.lane_width * (self.total_lanes() as f64)
    }

    /// No lanes, or lanes with no width. Lane widths are persisted as whole units, so a
    /// fractional width is refused too.
    pub fn is_degenerate(&self) -> bool {
        self.total_lanes() == 0 || !is_whole_width(self.lane_width)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DividerStyle {
    /// Separates the two directions of travel.
    Solid,
    Dashed,
}

/// A painted line between two adjacent lanes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Divider {
    pub line: Line,
    pub style: DividerStyle,
}

/// A graph segment dressed up with lanes. Entirely derived from the segment and its `RoadSpec`.
#[derive(Clone, Debug, Serialize)]
pub struct Road {
    pub id: RoadID,
    pub segment: Line,
    pub spec: RoadSpec,
    /// The rounded envelope covering the whole width of the road.
    pub polygon: Polygon,
    /// Numbered from the left edge of the road. The left ones run backwards.
    pub lanes: Vec<Lane>,
    pub dividers: Vec<Divider>,

    /// Another road also ends at this endpoint.
    pub is_start_connected: bool,
    pub is_end_connected: bool,
}

impl Road {
    /// The `RoadSpec` must not be degenerate.
    pub fn new(id: RoadID, segment: Line, spec: RoadSpec) -> Road {
        let width = spec.width();
        let polygon = Envelope::new(segment, width, roundness(width)).into_polygon();
        let (lanes, dividers) = make_lanes(id, segment, &spec);
        Road {
            id,
            segment,
            spec,
            polygon,
            lanes,
            dividers,
            is_start_connected: false,
            is_end_connected: false,
        }
    }

    pub fn width(&self) -> Distance {
        self.spec.width()
    }

    pub fn length(&self) -> Distance {
        self.segment.length()
    }

    pub(crate) fn set_id(&mut self, id: RoadID) {
        self.id = id;
        for lane in &mut self.lanes {
            lane.road = id;
        }
    }
}

/// Finite, positive, and a whole number of units.
pub fn is_whole_width(width: Distance) -> bool {
    let value = width.inner_meters();
    value.is_finite() && value >= 1.0 && value.fract() == 0.0
}

/// How many steps each cap of a road envelope is cut into: one for every 10 units of width.
pub fn roundness(width: Distance) -> usize {
    (width.inner_meters() / 10.0).floor().max(0.0) as usize
}
