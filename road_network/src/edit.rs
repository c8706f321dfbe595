//! State machines turning pointer events into network and world edits. They know nothing about
//! windows or rendering; the caller translates screen positions into world positions first.

use geom::{Distance, Line, Pt2D};

use crate::{Marking, MarkingKind, MarkingTarget, RoadInsertion, RoadNetwork, RoadSpec, World};

/// Draws the graph: click empty space to add a point, click two points in a row to connect them
/// with a road, drag points around, right click to deselect or delete.
pub struct GraphEditor {
    /// Used for every road drawn.
    pub spec: RoadSpec,
    /// How close the pointer must be to snap onto an existing point.
    pub snap_radius: Distance,

    selected: Option<Pt2D>,
    hovered: Option<Pt2D>,
    cursor: Option<Pt2D>,
    dragging: bool,
}

impl GraphEditor {
    pub fn new(spec: RoadSpec) -> GraphEditor {
        GraphEditor {
            spec,
            snap_radius: Distance::meters(10.0),
            selected: None,
            hovered: None,
            cursor: None,
            dragging: false,
        }
    }

    pub fn selected(&self) -> Option<Pt2D> {
        self.selected
    }

    pub fn hovered(&self) -> Option<Pt2D> {
        self.hovered
    }

    pub fn disable(&mut self) {
        self.selected = None;
        self.hovered = None;
        self.dragging = false;
    }

    /// While dragging, this moves the selected point. Returns true if the network changed.
    pub fn on_mouse_move(&mut self, network: &mut RoadNetwork, pos: Pt2D) -> bool {
        self.cursor = Some(pos);
        if self.dragging {
            if let Some(selected) = self.selected {
                if network.move_point(selected, pos) {
                    self.selected = Some(pos);
                    self.hovered = Some(pos);
                    return selected != pos;
                }
            }
        }
        self.hovered = nearest_point(network, pos, self.snap_radius);
        false
    }

    /// Selects the hovered point and starts dragging it, or adds a new point under the cursor.
    /// If another point was selected before, the two get connected, which may or may not work.
    pub fn on_left_click(&mut self, network: &mut RoadNetwork) -> Option<RoadInsertion> {
        if let Some(pt) = self.hovered {
            self.dragging = true;
            return self.select(network, pt);
        }
        let pt = self.cursor?;
        network.add_point(pt);
        self.hovered = Some(pt);
        self.select(network, pt)
    }

    /// Deselects, or if nothing is selected, deletes the hovered point. Returns true if the
    /// network changed.
    pub fn on_right_click(&mut self, network: &mut RoadNetwork) -> bool {
        if self.selected.is_some() {
            self.selected = None;
            return false;
        }
        match self.hovered.take() {
            Some(pt) => network.remove_point(pt),
            None => false,
        }
    }

    pub fn on_left_release(&mut self) {
        self.dragging = false;
    }

    fn select(&mut self, network: &mut RoadNetwork, pt: Pt2D) -> Option<RoadInsertion> {
        let previous = self.selected.replace(pt)?;
        if previous == pt {
            return None;
        }
        let segment = Line::new(previous, pt);
        if network.graph().contains_segment(&segment) {
            return None;
        }
        Some(network.add_road(segment, self.spec.clone()))
    }
}

fn nearest_point(network: &RoadNetwork, pos: Pt2D, radius: Distance) -> Option<Pt2D> {
    network
        .graph()
        .points()
        .iter()
        .map(|pt| (*pt, pt.dist_to(pos)))
        .filter(|(_, dist)| *dist < radius)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(pt, _)| pt)
}

/// Places one kind of marking. Hovering proposes a marking on the closest target segment, and
/// committing keeps it.
pub struct MarkingEditor {
    pub kind: MarkingKind,
    lane_width: Distance,
    intent: Option<Marking>,
}

impl MarkingEditor {
    pub fn new(kind: MarkingKind, lane_width: Distance) -> MarkingEditor {
        MarkingEditor {
            kind,
            lane_width,
            intent: None,
        }
    }

    /// The marking that would be placed right now.
    pub fn intent(&self) -> Option<&Marking> {
        self.intent.as_ref()
    }

    pub fn disable(&mut self) {
        self.intent = None;
    }

    /// Proposes a marking on the closest target segment, as long as the position is alongside
    /// it rather than past one of its ends.
    pub fn hover(&mut self, network: &RoadNetwork, world: &World, pos: Pt2D) {
        let targets = match self.kind.target() {
            MarkingTarget::GraphSegments => network.graph().segments(),
            MarkingTarget::LaneGuides => &world.lane_guides,
        };
        self.intent = targets
            .iter()
            .min_by(|a, b| a.dist_to_pt(pos).total_cmp(&b.dist_to_pt(pos)))
            .and_then(|segment| {
                let projection = segment.project_pt(pos);
                if (0.0..=1.0).contains(&projection.offset) {
                    Some(self.kind.create(projection.pt, segment.direction(), self.lane_width))
                } else {
                    None
                }
            });
    }

    /// Returns false if there was nothing to place.
    pub fn commit(&mut self, world: &mut World) -> bool {
        match self.intent.take() {
            Some(marking) => {
                world.markings.push(marking);
                true
            }
            None => false,
        }
    }

    /// Deletes every marking covering the position, returning how many there were.
    pub fn remove_at(&self, world: &mut World, pos: Pt2D) -> usize {
        let before = world.markings.len();
        world.markings.retain(|m| !m.polygon.contains_pt(pos));
        before - world.markings.len()
    }
}
