use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{lerp, lerp_2d, Angle, Distance, Pt2D};

/// Segment, technically. The endpoints are ordered (`pt1` is the start), but equality ignores
/// the order: road topology is undirected, so `A->B` and `B->A` name the same edge.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Line {
    #[serde(rename = "start")]
    pt1: Pt2D,
    #[serde(rename = "end")]
    pt2: Pt2D,
}

/// The closest point on the infinite line through a segment, and where that lands relative to
/// the segment: 0 at the start, 1 at the end.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub pt: Pt2D,
    pub offset: f64,
}

/// Where two segments meet, along with the parametric position on each.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Crossing {
    pub pt: Pt2D,
    pub offset: f64,
    pub other_offset: f64,
}

impl Crossing {
    /// Strictly inside both segments, not touching an endpoint of either.
    pub fn is_interior(&self) -> bool {
        self.offset > 0.0 && self.offset < 1.0 && self.other_offset > 0.0 && self.other_offset < 1.0
    }
}

impl Line {
    pub fn new(pt1: Pt2D, pt2: Pt2D) -> Line {
        Line { pt1, pt2 }
    }

    pub fn pt1(&self) -> Pt2D {
        self.pt1
    }

    pub fn pt2(&self) -> Pt2D {
        self.pt2
    }

    pub fn points(&self) -> [Pt2D; 2] {
        [self.pt1, self.pt2]
    }

    /// Both endpoints are the same point.
    pub fn is_degenerate(&self) -> bool {
        self.pt1 == self.pt2
    }

    pub fn length(&self) -> Distance {
        self.pt1.dist_to(self.pt2)
    }

    pub fn reversed(&self) -> Line {
        Line::new(self.pt2, self.pt1)
    }

    pub fn midpoint(&self) -> Pt2D {
        self.pt1.midpoint(self.pt2)
    }

    pub fn angle(&self) -> Angle {
        self.pt1.angle_to(self.pt2)
    }

    /// Unit vector from start to end; the zero vector for a degenerate line.
    pub fn direction(&self) -> Pt2D {
        (self.pt2 - self.pt1).normalize()
    }

    pub fn contains_endpoint(&self, pt: Pt2D) -> bool {
        self.pt1 == pt || self.pt2 == pt
    }

    pub fn shares_endpoint(&self, other: &Line) -> bool {
        self.contains_endpoint(other.pt1) || self.contains_endpoint(other.pt2)
    }

    /// If `pt` is an endpoint, returns the other one.
    pub fn other_endpoint(&self, pt: Pt2D) -> Option<Pt2D> {
        if self.pt1 == pt {
            Some(self.pt2)
        } else if self.pt2 == pt {
            Some(self.pt1)
        } else {
            None
        }
    }

    pub fn percent_along(&self, percent: f64) -> Pt2D {
        lerp_2d(self.pt1, self.pt2, percent)
    }

    /// Not clamped to the segment; negative or too-long distances extrapolate.
    pub fn unbounded_dist_along(&self, dist: Distance) -> Pt2D {
        let len = self.length();
        if len == Distance::ZERO {
            return self.pt1;
        }
        self.percent_along(dist / len)
    }

    /// Projects onto the infinite line through this segment. A degenerate segment has no
    /// direction, so the projection is the origin with offset 0.
    pub fn project_pt(&self, pt: Pt2D) -> Projection {
        let a = pt - self.pt1;
        let b = self.pt2 - self.pt1;
        let magnitude = b.magnitude();
        if magnitude == 0.0 {
            return Projection {
                pt: Pt2D::zero(),
                offset: 0.0,
            };
        }
        let normalized = b.normalize();
        let scaler = a.dot(normalized);
        Projection {
            pt: self.pt1 + normalized.scale(scaler),
            offset: scaler / magnitude,
        }
    }

    /// The shortest distance from the point to the segment.
    pub fn dist_to_pt(&self, pt: Pt2D) -> Distance {
        let projection = self.project_pt(pt);
        if projection.offset > 0.0 && projection.offset < 1.0 {
            return pt.dist_to(projection.pt);
        }
        pt.dist_to(self.pt1).min(pt.dist_to(self.pt2))
    }

    /// Where this segment meets another, including touching at endpoints. Parallel and
    /// collinear segments never meet.
    pub fn crossing(&self, other: &Line) -> Option<Crossing> {
        let (t, u) = intersection_params(self.pt1, self.pt2, other.pt1, other.pt2)?;
        Some(Crossing {
            pt: Pt2D::new(
                lerp(self.pt1.x(), self.pt2.x(), t),
                lerp(self.pt1.y(), self.pt2.y(), t),
            ),
            offset: t,
            other_offset: u,
        })
    }

    /// The intersection point and the offset along this segment.
    pub fn intersection(&self, other: &Line) -> Option<(Pt2D, f64)> {
        self.crossing(other).map(|c| (c.pt, c.offset))
    }

    pub fn intersects(&self, other: &Line) -> bool {
        self.crossing(other).is_some()
    }

    /// Shifts to the right of the direction of travel. Right is +90 degrees from the direction,
    /// so with y growing downwards (screen coordinates), this is the driver's right.
    pub fn shift_right(&self, width: Distance) -> Line {
        let angle = self.angle().rotate_degs(90.0);
        Line::new(
            self.pt1.project_away(width, angle),
            self.pt2.project_away(width, angle),
        )
    }

    pub fn shift_left(&self, width: Distance) -> Line {
        let angle = self.angle().rotate_degs(-90.0);
        Line::new(
            self.pt1.project_away(width, angle),
            self.pt2.project_away(width, angle),
        )
    }
}

impl PartialEq for Line {
    fn eq(&self, other: &Line) -> bool {
        (self.pt1 == other.pt1 && self.pt2 == other.pt2)
            || (self.pt1 == other.pt2 && self.pt2 == other.pt1)
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Line({} -> {})", self.pt1, self.pt2)
    }
}

/// Solves for the intersection of segments `a1-a2` and `b1-b2`, returning the point and the
/// offset along `a`. Returns None when the determinant is exactly zero (parallel or collinear)
/// or when the lines meet outside either segment.
pub fn line_intersection(a1: Pt2D, a2: Pt2D, b1: Pt2D, b2: Pt2D) -> Option<(Pt2D, f64)> {
    Line::new(a1, a2).intersection(&Line::new(b1, b2))
}

fn intersection_params(a1: Pt2D, a2: Pt2D, b1: Pt2D, b2: Pt2D) -> Option<(f64, f64)> {
    let t_top = (b2.x() - b1.x()) * (a1.y() - b1.y()) - (b2.y() - b1.y()) * (a1.x() - b1.x());
    let u_top = (b1.y() - a1.y()) * (a1.x() - a2.x()) - (b1.x() - a1.x()) * (a1.y() - a2.y());
    let bottom = (b2.y() - b1.y()) * (a2.x() - a1.x()) - (b2.x() - b1.x()) * (a2.y() - a1.y());
    if bottom == 0.0 {
        return None;
    }
    let t = t_top / bottom;
    let u = u_top / bottom;
    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some((t, u))
    } else {
        None
    }
}
