use std::f64::consts::PI;

use crate::{Distance, Line, Polygon};

/// A segment thickened into a capsule: two parallel sides joined by a cap around each endpoint.
#[derive(Clone, Debug, PartialEq)]
pub struct Envelope {
    pub line: Line,
    pub polygon: Polygon,
}

impl Envelope {
    /// `width` is the full width; each side sits `width / 2` from the segment. `roundness` is how
    /// many steps each half-circle cap is cut into. 0 and 1 both give flat caps, so the envelope
    /// is a rectangle with exactly 4 points.
    ///
    /// The caps are walked in the same angular direction: around the start from 90 degrees to
    /// one side of the segment to 90 degrees to the other, then the same sweep rotated by 180
    /// degrees around the end.
    pub fn new(line: Line, width: Distance, roundness: usize) -> Envelope {
        let radius = width / 2.0;
        let steps = roundness.max(1);
        let step = PI / (steps as f64);
        // Pointing backwards, from the end to the start
        let alpha = (line.pt1() - line.pt2()).angle();
        let first = alpha.rotate_rads(-PI / 2.0);

        let mut points = Vec::with_capacity(2 * (steps + 1));
        for i in 0..=steps {
            let angle = first.rotate_rads(step * (i as f64));
            points.push(line.pt1().project_away(radius, angle));
        }
        for i in 0..=steps {
            let angle = first.rotate_rads(PI + step * (i as f64));
            points.push(line.pt2().project_away(radius, angle));
        }

        Envelope {
            line,
            polygon: Polygon::must_new(points),
        }
    }

    pub fn into_polygon(self) -> Polygon {
        self.polygon
    }
}
