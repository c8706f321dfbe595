use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use geom::{Distance, Line, Pt2D};

use crate::make::intersections::make_intersections;
use crate::raw::{RawNetwork, RawRoad};
use crate::objects::road::is_whole_width;
use crate::{Graph, Intersection, IntersectionID, Road, RoadID, RoadSpec, DEFAULT_LANE_WIDTH};

/// Thresholds used when deciding whether a road fits.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Used for roads created without an explicit lane width.
    pub lane_width: Distance,
    /// A road must be longer than its width plus this, and crossings must be at least this far
    /// past the width of a road from its ends.
    pub road_margin: Distance,
    /// Extra space required between a road and the endpoints of its neighbors.
    pub clearance: Distance,
    /// The smallest angle allowed between two roads leaving the same junction.
    pub min_junction_angle_degrees: f64,
    /// How many times one road insertion may recursively split.
    pub max_split_depth: usize,
}

impl Default for NetworkConfig {
    fn default() -> NetworkConfig {
        NetworkConfig {
            lane_width: DEFAULT_LANE_WIDTH,
            road_margin: Distance::const_meters(50.0),
            clearance: Distance::const_meters(20.0),
            min_junction_angle_degrees: 30.0,
            max_split_depth: 32,
        }
    }
}

impl NetworkConfig {
    /// Catches settings that would make every road degenerate or the checks meaningless.
    pub fn validate(&self) -> Result<()> {
        if !is_whole_width(self.lane_width) {
            bail!(
                "lane_width must be a positive whole number, not {}",
                self.lane_width
            );
        }
        for (name, value) in [
            ("road_margin", self.road_margin),
            ("clearance", self.clearance),
        ] {
            if !value.is_finite() || value < Distance::ZERO {
                bail!("{} can't be negative, but it's {}", name, value);
            }
        }
        if !(0.0..=180.0).contains(&self.min_junction_angle_degrees) {
            bail!(
                "min_junction_angle_degrees must be between 0 and 180, not {}",
                self.min_junction_angle_degrees
            );
        }
        Ok(())
    }

    /// A spec using the configured lane width.
    pub fn road_spec(&self, left_lanes: usize, right_lanes: usize, oneway: bool) -> RoadSpec {
        let mut spec = RoadSpec::new(left_lanes, right_lanes, oneway);
        spec.lane_width = self.lane_width;
        spec
    }
}

/// The graph plus everything derived from it. Roads and intersections are indexed by their IDs;
/// both get renumbered whenever the network changes, so don't hold onto IDs across edits.
#[derive(Clone, Debug)]
pub struct RoadNetwork {
    pub(crate) config: NetworkConfig,
    pub(crate) graph: Graph,
    pub(crate) roads: Vec<Road>,
    intersections: Vec<Intersection>,
}

impl RoadNetwork {
    pub fn new(config: NetworkConfig) -> RoadNetwork {
        RoadNetwork {
            config,
            graph: Graph::new(),
            roads: Vec::new(),
            intersections: Vec::new(),
        }
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn all_roads(&self) -> &Vec<Road> {
        &self.roads
    }

    pub fn all_intersections(&self) -> &Vec<Intersection> {
        &self.intersections
    }

    pub fn get_r(&self, id: RoadID) -> &Road {
        &self.roads[id.0]
    }

    pub fn maybe_get_r(&self, id: RoadID) -> Option<&Road> {
        self.roads.get(id.0)
    }

    pub fn get_i(&self, id: IntersectionID) -> &Intersection {
        &self.intersections[id.0]
    }

    /// The road on this segment, in either direction.
    pub fn find_road(&self, segment: &Line) -> Option<&Road> {
        self.roads.iter().find(|r| r.segment == *segment)
    }

    pub fn intersection_at(&self, pt: Pt2D) -> Option<&Intersection> {
        self.intersections.iter().find(|i| i.location == pt)
    }

    /// Returns false if there's no junction at the point.
    pub fn set_signal(&mut self, pt: Pt2D, has_signal: bool) -> bool {
        match self.intersections.iter_mut().find(|i| i.location == pt) {
            Some(i) => {
                i.has_signal = has_signal;
                true
            }
            None => false,
        }
    }

    /// A lone point, not connected to anything yet.
    pub fn add_point(&mut self, pt: Pt2D) -> bool {
        self.graph.add_point(pt)
    }

    /// Removes the point, every segment ending there, and their roads.
    pub fn remove_point(&mut self, pt: Pt2D) -> bool {
        if !self.graph.contains_point(pt) {
            return false;
        }
        let removed = self.graph.remove_point(pt);
        self.roads.retain(|r| !removed.contains(&r.segment));
        self.recalculate();
        true
    }

    /// Removes the segment and its road, leaving the endpoints.
    pub fn remove_segment(&mut self, segment: &Line) -> bool {
        if !self.graph.remove_segment(segment) {
            return false;
        }
        self.roads.retain(|r| r.segment != *segment);
        self.recalculate();
        true
    }

    /// Drags a point around, rebuilding the roads ending there. No checks happen; the caller is
    /// responsible for not dragging roads across each other.
    pub fn move_point(&mut self, from: Pt2D, to: Pt2D) -> bool {
        if from == to {
            return self.graph.contains_point(from);
        }
        if !self.graph.move_point(from, to) {
            return false;
        }
        for road in &mut self.roads {
            let segment = if road.segment.pt1() == from {
                Line::new(to, road.segment.pt2())
            } else if road.segment.pt2() == from {
                Line::new(road.segment.pt1(), to)
            } else {
                continue;
            };
            *road = Road::new(road.id, segment, road.spec.clone());
        }
        self.recalculate();
        true
    }

    pub fn clear(&mut self) {
        self.graph.clear();
        self.roads.clear();
        self.intersections.clear();
    }

    /// Adds a segment and its road without any checks. The caller promises the segment doesn't
    /// cross anything and that the `RoadSpec` isn't degenerate. Doesn't recalculate.
    pub(crate) fn insert_unchecked(&mut self, segment: Line, spec: Option<RoadSpec>) {
        if !self.graph.add_segment(segment) {
            return;
        }
        if let Some(spec) = spec {
            self.roads
                .push(Road::new(RoadID(self.roads.len()), segment, spec));
        }
    }

    /// Removes a graph segment and its road, if there is one, returning the road's spec.
    /// Doesn't recalculate.
    pub(crate) fn take_segment(&mut self, segment: &Line) -> Option<RoadSpec> {
        self.graph.remove_segment(segment);
        let idx = self.roads.iter().position(|r| r.segment == *segment)?;
        Some(self.roads.remove(idx).spec)
    }

    /// Renumbers roads and regenerates every intersection.
    pub(crate) fn recalculate(&mut self) {
        for (idx, road) in self.roads.iter_mut().enumerate() {
            road.set_id(RoadID(idx));
        }
        self.intersections = make_intersections(&self.graph, &mut self.roads, &self.intersections);
    }

    pub fn to_raw(&self) -> RawNetwork {
        RawNetwork {
            graph: self.graph.clone(),
            roads: self.roads.iter().map(RawRoad::from_road).collect(),
        }
    }

    /// Rebuilds the network from persisted state. The graph is re-added point by point, so
    /// duplicates collapse. Every road must sit on a graph segment.
    pub fn from_raw(raw: RawNetwork, config: NetworkConfig) -> Result<RoadNetwork> {
        config.validate()?;
        let mut network = RoadNetwork::new(config);
        for pt in raw.graph.points() {
            if !pt.is_finite() {
                bail!("Graph has a bad point {}", pt);
            }
            network.graph.add_point(*pt);
        }
        for segment in raw.graph.segments() {
            if segment.is_degenerate() {
                bail!("Graph has a degenerate segment {}", segment);
            }
            network.graph.add_segment(*segment);
        }

        for (idx, raw_road) in raw.roads.into_iter().enumerate() {
            let segment = raw_road.segment;
            if !network.graph.contains_segment(&segment) {
                bail!("Road {} is on {}, which isn't in the graph", idx, segment);
            }
            if network.find_road(&segment).is_some() {
                bail!("Road {} duplicates another road on {}", idx, segment);
            }
            let spec = raw_road.into_spec();
            if spec.is_degenerate() {
                bail!("Road {} has no usable lanes: {:?}", idx, spec);
            }
            network
                .roads
                .push(Road::new(RoadID(network.roads.len()), segment, spec));
        }
        network.recalculate();
        Ok(network)
    }

    pub fn load(path: &str, config: NetworkConfig) -> Result<RoadNetwork> {
        let raw: RawNetwork = abstutil::read_json(path)?;
        RoadNetwork::from_raw(raw, config).with_context(|| format!("loading {}", path))
    }

    pub fn save(&self, path: &str) -> Result<()> {
        abstutil::write_json(path, &self.to_raw())
    }
}
