use std::collections::{BTreeMap, BTreeSet};

use geom::{HashablePt2D, Pt2D};

use crate::{Graph, Intersection, IntersectionID, Road, RoadID};

/// Finds every graph point where roads end, and marks the road endpoints shared with another
/// road as connected. Signals from `previous` carry over to junctions at the same location.
pub fn make_intersections(
    graph: &Graph,
    roads: &mut [Road],
    previous: &[Intersection],
) -> Vec<Intersection> {
    let mut roads_per_pt: BTreeMap<HashablePt2D, Vec<RoadID>> = BTreeMap::new();
    for road in roads.iter() {
        for pt in road.segment.points() {
            roads_per_pt.entry(pt.to_hashable()).or_default().push(road.id);
        }
    }
    let signals: BTreeSet<HashablePt2D> = previous
        .iter()
        .filter(|i| i.has_signal)
        .map(|i| i.location.to_hashable())
        .collect();

    // Numbered in the order of the graph's points
    let mut intersections = Vec::new();
    for pt in graph.points() {
        let key = pt.to_hashable();
        if let Some(connected) = roads_per_pt.get(&key) {
            intersections.push(Intersection {
                id: IntersectionID(intersections.len()),
                location: *pt,
                roads: connected.clone(),
                has_signal: signals.contains(&key),
            });
        }
    }

    for road in roads.iter_mut() {
        let shared = |pt: Pt2D| roads_per_pt.get(&pt.to_hashable()).map_or(0, |r| r.len()) > 1;
        road.is_start_connected = shared(road.segment.pt1());
        road.is_end_connected = shared(road.segment.pt2());
    }

    intersections
}
