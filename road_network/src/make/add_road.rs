use geom::{Distance, Line, Pt2D};

use crate::make::{Rejection, RoadInsertion};
use crate::{RoadNetwork, RoadSpec};

impl RoadNetwork {
    /// Tries to add a road along `segment`. Checks happen in order, and the first one to fail
    /// rejects the road without touching the network:
    ///
    /// 1. The road must be longer than its width plus the margin.
    /// 2. Where it starts or ends at an existing junction, it can't leave at too sharp an angle
    ///    from a road already there.
    /// 3. No endpoint of it may come near another road, and no endpoint of another road may come
    ///    near it. Endpoints the two roads share don't count.
    /// 4. If it crosses another segment, the crossing can't be close to the ends of either. The
    ///    crossed road is cut in two at the crossing, and then each half of the candidate is added
    ///    recursively. If either half is rejected, the whole network is restored.
    ///
    /// Otherwise the road goes in as-is. Either way, the graph stays planar.
    pub fn add_road(&mut self, segment: Line, spec: RoadSpec) -> RoadInsertion {
        let result = self.add_road_at_depth(segment, spec, 0);
        match &result {
            RoadInsertion::Inserted => debug!("Added road {}", segment),
            RoadInsertion::Split { at } => debug!("Added road {}, splitting at {}", segment, at),
            RoadInsertion::Rejected(reason) => debug!("Rejected road {}: {}", segment, reason),
        }
        result
    }

    fn add_road_at_depth(&mut self, segment: Line, spec: RoadSpec, depth: usize) -> RoadInsertion {
        if let Err(reason) = self.check_road(&segment, &spec) {
            return RoadInsertion::Rejected(reason);
        }

        let (crossed, at) = match self.find_crossing(&segment) {
            Some(crossing) => crossing,
            None => {
                self.insert_unchecked(segment, Some(spec));
                self.recalculate();
                return RoadInsertion::Inserted;
            }
        };

        let crossed_width = self
            .find_road(&crossed)
            .map(|r| r.width())
            .unwrap_or(Distance::ZERO);
        let margin = self.config.road_margin;
        if too_close_to_ends(&crossed, at, crossed_width + margin)
            || too_close_to_ends(&segment, at, spec.width() + margin)
        {
            return RoadInsertion::Rejected(Rejection::CrossingNearJunction);
        }
        if depth >= self.config.max_split_depth {
            return RoadInsertion::Rejected(Rejection::TooManySplits);
        }

        let snapshot = self.clone();
        let crossed_spec = self.take_segment(&crossed);
        self.graph.add_point(at);
        // The halves of an accepted road only lose length, so they're re-added without checks.
        self.insert_unchecked(Line::new(crossed.pt1(), at), crossed_spec.clone());
        self.insert_unchecked(Line::new(at, crossed.pt2()), crossed_spec);
        self.recalculate();

        for half in [Line::new(segment.pt1(), at), Line::new(at, segment.pt2())] {
            if let RoadInsertion::Rejected(reason) =
                self.add_road_at_depth(half, spec.clone(), depth + 1)
            {
                *self = snapshot;
                return RoadInsertion::Rejected(reason);
            }
        }
        RoadInsertion::Split { at }
    }

    /// Everything short of looking for crossings.
    fn check_road(&self, segment: &Line, spec: &RoadSpec) -> Result<(), Rejection> {
        if segment.is_degenerate()
            || !segment.pt1().is_finite()
            || !segment.pt2().is_finite()
            || spec.is_degenerate()
        {
            return Err(Rejection::Degenerate);
        }
        if self.graph.contains_segment(segment) {
            return Err(Rejection::AlreadyExists);
        }

        let width = spec.width();
        if segment.length() <= width + self.config.road_margin {
            return Err(Rejection::TooShort);
        }

        for endpoint in segment.points() {
            let intersection = match self.intersection_at(endpoint) {
                Some(i) => i,
                None => continue,
            };
            let outwards = segment.other_endpoint(endpoint).unwrap_or(endpoint);
            let angle = endpoint.angle_to(outwards);
            for id in &intersection.roads {
                let existing = &self.get_r(*id).segment;
                let other = existing.other_endpoint(endpoint).unwrap_or(endpoint);
                if angle.abs_diff_degrees(endpoint.angle_to(other))
                    < self.config.min_junction_angle_degrees
                {
                    return Err(Rejection::SharpAngle);
                }
            }
        }

        for road in &self.roads {
            let threshold = self.config.clearance + road.width() / 2.0 + width / 2.0;
            if endpoints_too_close(&road.segment, segment, threshold)
                || endpoints_too_close(segment, &road.segment, threshold)
            {
                return Err(Rejection::TooClose);
            }
        }

        Ok(())
    }

    /// The first graph segment crossing the candidate strictly inside both, along with where.
    /// Segments sharing an endpoint with the candidate can only touch it there, so they're
    /// skipped.
    fn find_crossing(&self, segment: &Line) -> Option<(Line, Pt2D)> {
        self.graph
            .segments()
            .iter()
            .filter(|s| !s.shares_endpoint(segment))
            .find_map(|s| {
                let crossing = segment.crossing(s)?;
                if crossing.is_interior() {
                    Some((*s, crossing.pt))
                } else {
                    None
                }
            })
    }
}

/// Does any endpoint of `from` come within `threshold` of `to`? Endpoints shared with `to` are
/// junctions, not near misses.
fn endpoints_too_close(from: &Line, to: &Line, threshold: Distance) -> bool {
    from.points()
        .into_iter()
        .filter(|pt| !to.contains_endpoint(*pt))
        .any(|pt| to.dist_to_pt(pt) < threshold)
}

fn too_close_to_ends(segment: &Line, pt: Pt2D, threshold: Distance) -> bool {
    segment.points().into_iter().any(|end| end.dist_to(pt) < threshold)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NetworkConfig;

    fn pt(x: f64, y: f64) -> Pt2D {
        Pt2D::new(x, y)
    }

    fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Line {
        Line::new(pt(x1, y1), pt(x2, y2))
    }

    #[test]
    fn too_close_ignores_shared_endpoints() {
        let a = line(0.0, 0.0, 100.0, 0.0);
        let b = line(100.0, 0.0, 200.0, 0.0);
        assert!(!endpoints_too_close(&a, &b, Distance::meters(50.0)));
        let c = line(0.0, 10.0, 100.0, 10.0);
        assert!(endpoints_too_close(&a, &c, Distance::meters(50.0)));
        assert!(!endpoints_too_close(&a, &c, Distance::meters(5.0)));
    }

    #[test]
    fn crossing_search_skips_neighbors() {
        let mut network = RoadNetwork::new(NetworkConfig::default());
        network.insert_unchecked(line(0.0, 0.0, 1000.0, 0.0), None);
        network.insert_unchecked(line(1000.0, 0.0, 1000.0, 1000.0), None);

        // Touches at an endpoint only
        assert!(network.find_crossing(&line(1000.0, 0.0, 0.0, 1000.0)).is_none());
        let (crossed, at) = network
            .find_crossing(&line(500.0, -500.0, 500.0, 500.0))
            .unwrap();
        assert_eq!(crossed, line(0.0, 0.0, 1000.0, 0.0));
        assert_eq!(at, pt(500.0, 0.0));
    }

    #[test]
    fn too_many_splits() {
        let mut config = NetworkConfig::default();
        config.max_split_depth = 0;
        let mut network = RoadNetwork::new(config);
        let spec = RoadSpec::new(1, 1, false);
        assert_eq!(
            network.add_road(line(0.0, 0.0, 1000.0, 0.0), spec.clone()),
            RoadInsertion::Inserted
        );
        assert_eq!(
            network.add_road(line(500.0, -500.0, 500.0, 500.0), spec),
            RoadInsertion::Rejected(Rejection::TooManySplits)
        );
        assert_eq!(network.all_roads().len(), 1);
    }
}
