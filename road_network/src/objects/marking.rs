use serde::{Deserialize, Serialize};

use geom::{Distance, Envelope, Line, Polygon, Pt2D};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarkingKind {
    Start,
    Stop,
    Crossing,
    Parking,
    Target,
    Yield,
    TrafficLight,
}

/// Which segments a kind of marking gets placed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkingTarget {
    /// Across a whole road
    GraphSegments,
    /// Inside a single lane
    LaneGuides,
}

impl MarkingKind {
    pub fn all() -> Vec<MarkingKind> {
        vec![
            MarkingKind::Start,
            MarkingKind::Stop,
            MarkingKind::Crossing,
            MarkingKind::Parking,
            MarkingKind::Target,
            MarkingKind::Yield,
            MarkingKind::TrafficLight,
        ]
    }

    pub fn target(self) -> MarkingTarget {
        match self {
            MarkingKind::Crossing => MarkingTarget::GraphSegments,
            _ => MarkingTarget::LaneGuides,
        }
    }

    /// The width across the direction of travel and the height along it.
    pub fn size(self, lane_width: Distance) -> (Distance, Distance) {
        let half = lane_width / 2.0;
        match self {
            MarkingKind::Crossing => (lane_width, half),
            MarkingKind::Target => (half, Distance::meters(5.0)),
            MarkingKind::TrafficLight => (half, Distance::meters(20.0)),
            MarkingKind::Start | MarkingKind::Stop | MarkingKind::Parking | MarkingKind::Yield => {
                (half, half)
            }
        }
    }

    /// Which edges of the marking's polygon get painted. Edges 0 and 2 run across the lane.
    pub fn border_edges(self) -> &'static [usize] {
        match self {
            MarkingKind::Crossing | MarkingKind::Parking => &[0, 2],
            MarkingKind::Stop | MarkingKind::Target | MarkingKind::TrafficLight => &[0],
            MarkingKind::Yield => &[2],
            MarkingKind::Start => &[],
        }
    }

    pub fn create(self, center: Pt2D, direction: Pt2D, lane_width: Distance) -> Marking {
        let (width, height) = self.size(lane_width);
        Marking::new(self, center, direction, width, height)
    }
}

/// A painted shape on a road or lane.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Marking {
    pub kind: MarkingKind,
    pub center: Pt2D,
    pub direction: Pt2D,
    pub width: Distance,
    pub height: Distance,
    /// Runs along `direction` through `center`, `height` long.
    pub support: Line,
    pub polygon: Polygon,
}

impl Marking {
    pub fn new(
        kind: MarkingKind,
        center: Pt2D,
        direction: Pt2D,
        width: Distance,
        height: Distance,
    ) -> Marking {
        let angle = direction.angle();
        let support = Line::new(
            center.project_away(height / 2.0, angle),
            center.project_away(-height / 2.0, angle),
        );
        let polygon = Envelope::new(support, width, 0).into_polygon();
        Marking {
            kind,
            center,
            direction,
            width,
            height,
            support,
            polygon,
        }
    }

    pub fn borders(&self) -> Vec<Line> {
        let segments = self.polygon.segments();
        self.kind
            .border_edges()
            .iter()
            .filter_map(|idx| segments.get(*idx).cloned())
            .collect()
    }
}
