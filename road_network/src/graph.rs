use serde::{Deserialize, Serialize};

use geom::{Line, Pt2D};

/// The points and segments a user draws. Both are sets: adding something already present does
/// nothing, and segments compare without caring about direction. Every segment's endpoints are
/// always points of the graph.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Graph {
    points: Vec<Pt2D>,
    segments: Vec<Line>,
}

impl Graph {
    pub fn new() -> Graph {
        Graph::default()
    }

    pub fn points(&self) -> &Vec<Pt2D> {
        &self.points
    }

    pub fn segments(&self) -> &Vec<Line> {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty() && self.segments.is_empty()
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.segments.clear();
    }

    pub fn contains_point(&self, pt: Pt2D) -> bool {
        self.points.contains(&pt)
    }

    pub fn contains_segment(&self, segment: &Line) -> bool {
        self.segments.contains(segment)
    }

    /// Returns false if the point was already there.
    pub fn add_point(&mut self, pt: Pt2D) -> bool {
        if self.contains_point(pt) {
            return false;
        }
        self.points.push(pt);
        true
    }

    /// Also adds any missing endpoints. Returns false if the segment was already there in either
    /// direction, or if both endpoints are the same.
    pub fn add_segment(&mut self, segment: Line) -> bool {
        if segment.is_degenerate() || self.contains_segment(&segment) {
            return false;
        }
        self.add_point(segment.pt1());
        self.add_point(segment.pt2());
        self.segments.push(segment);
        true
    }

    /// Leaves the endpoints alone.
    pub fn remove_segment(&mut self, segment: &Line) -> bool {
        let before = self.segments.len();
        self.segments.retain(|s| s != segment);
        self.segments.len() != before
    }

    /// Removes the point along with every segment ending there, returning those segments. Does
    /// nothing if the point isn't in the graph.
    pub fn remove_point(&mut self, pt: Pt2D) -> Vec<Line> {
        if !self.contains_point(pt) {
            return Vec::new();
        }
        let removed = self.segments_touching(pt);
        self.segments.retain(|s| !s.contains_endpoint(pt));
        self.points.retain(|p| *p != pt);
        removed
    }

    /// Every segment with the point as one of its endpoints.
    pub fn segments_touching(&self, pt: Pt2D) -> Vec<Line> {
        self.segments
            .iter()
            .filter(|s| s.contains_endpoint(pt))
            .cloned()
            .collect()
    }

    /// The stored orientation of a segment, if it's in the graph in either direction.
    pub fn find_segment(&self, segment: &Line) -> Option<Line> {
        self.segments.iter().find(|s| *s == segment).cloned()
    }

    /// Relocates a point, dragging along every segment that ends there. Refuses if `to` is
    /// already a different point of the graph. Since `to` is new, no segment can collapse or
    /// turn into a duplicate.
    pub fn move_point(&mut self, from: Pt2D, to: Pt2D) -> bool {
        if !self.contains_point(from) {
            return false;
        }
        if from == to {
            return true;
        }
        if self.contains_point(to) {
            return false;
        }

        for pt in &mut self.points {
            if *pt == from {
                *pt = to;
            }
        }
        for s in &mut self.segments {
            if s.pt1() == from {
                *s = Line::new(to, s.pt2());
            } else if s.pt2() == from {
                *s = Line::new(s.pt1(), to);
            }
        }
        true
    }
}

/// Membership equality; the order things were added doesn't matter.
impl PartialEq for Graph {
    fn eq(&self, other: &Graph) -> bool {
        self.points.len() == other.points.len()
            && self.segments.len() == other.segments.len()
            && self.points.iter().all(|pt| other.contains_point(*pt))
            && self.segments.iter().all(|s| other.contains_segment(s))
    }
}
