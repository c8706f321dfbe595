use abstutil::Timer;
use geom::{Distance, Envelope, Line, Polygon};

use crate::objects::road::roundness;
use crate::{Building, Road, WorldConfig};

/// Lines the roads with buildings. The outer boundary of some wide envelopes around the roads
/// gives guides running parallel to the roads, set back from them. Each guide long enough gets
/// evenly sized buildings along it, dropping any that bump into one already placed.
pub fn make_buildings(roads: &[Road], config: &WorldConfig, timer: &mut Timer) -> Vec<Building> {
    let space = config.space_between_objects;
    let step = config.building_min_length + space;
    if !(step > Distance::ZERO) {
        timer.warn(format!(
            "No room to lay out buildings {} long with {} between them",
            config.building_min_length, space
        ));
        return Vec::new();
    }

    timer.start("find building guides");
    let envelopes: Vec<Polygon> = roads
        .iter()
        .map(|r| {
            let width = r.width() + config.building_width + config.space_between_objects * 2.0;
            Envelope::new(r.segment, width, roundness(r.width())).into_polygon()
        })
        .collect();
    let guides: Vec<Line> = Polygon::union(&envelopes)
        .into_iter()
        .filter(|l| l.length() >= config.building_min_length)
        .collect();
    timer.stop("find building guides");

    timer.start_iter("lay out buildings", guides.len());
    let mut bases: Vec<Polygon> = Vec::new();
    for guide in guides {
        timer.next();
        let length = guide.length() + space;
        let count = (length / step).floor().max(1.0);
        let building_length = length / count - space;
        let direction = guide.direction();

        let mut start = guide.pt1();
        for _ in 0..(count as usize) {
            let end = start + direction.scale(building_length.inner_meters());
            let base = Envelope::new(Line::new(start, end), config.building_width, 1).into_polygon();
            let blocked = bases
                .iter()
                .any(|b| b.intersects_polygon(&base) || b.dist_to_polygon(&base) < space);
            if !blocked {
                bases.push(base);
            }
            start = end + direction.scale(space.inner_meters());
        }
    }

    let buildings: Vec<Building> = bases
        .into_iter()
        .filter(|b| b.points().len() == 4)
        .map(Building::new)
        .collect();
    timer.note(format!(
        "{} buildings along {} roads",
        abstutil::prettyprint_usize(buildings.len()),
        abstutil::prettyprint_usize(roads.len())
    ));
    buildings
}
