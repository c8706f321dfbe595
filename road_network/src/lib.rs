//! A planar road network built up from a freehand graph of points and segments.
//!
//! The `Graph` is the only thing edited directly. Roads, lanes and intersections are derived from
//! it and rebuilt whenever it changes; `RoadNetwork::add_road` is the one operation that also
//! reshapes the graph, splitting roads wherever a new one crosses them so that no two segments
//! ever cross without sharing a point.

#[macro_use]
extern crate log;

mod edit;
mod graph;
mod make;
mod network;
mod objects;
pub mod raw;
mod world;

pub use crate::edit::{GraphEditor, MarkingEditor};
pub use crate::graph::Graph;
pub use crate::make::{Rejection, RoadInsertion};
pub use crate::network::{NetworkConfig, RoadNetwork};
pub use crate::objects::building::Building;
pub use crate::objects::intersection::{Intersection, IntersectionID};
pub use crate::objects::lane::{Lane, DEFAULT_SPEED_LIMIT};
pub use crate::objects::marking::{Marking, MarkingKind, MarkingTarget};
pub use crate::objects::road::{Divider, DividerStyle, Road, RoadID, RoadSpec, DEFAULT_LANE_WIDTH};
pub use crate::objects::tree::Tree;
pub use crate::world::{World, WorldConfig};
