use rand::Rng;
use rand_xorshift::XorShiftRng;

use geom::{lerp, Bounds, Line, Polygon, Pt2D};

use crate::{Building, Tree, WorldConfig};

/// Scatters trees near, but not on, roads and buildings. Random points inside the bounds of
/// everything are tried until `tree_attempts` in a row fail.
pub fn make_trees(
    road_polygons: &[Polygon],
    road_borders: &[Line],
    buildings: &[Building],
    config: &WorldConfig,
    rng: &mut XorShiftRng,
) -> Vec<Tree> {
    let mut bounds = Bounds::new();
    for l in road_borders {
        bounds.update(l.pt1());
        bounds.update(l.pt2());
    }
    for b in buildings {
        for pt in b.base.points() {
            bounds.update(*pt);
        }
    }
    if bounds.is_empty() {
        return Vec::new();
    }

    let obstacles: Vec<&Polygon> = road_polygons
        .iter()
        .chain(buildings.iter().map(|b| &b.base))
        .collect();
    let size = config.tree_size;

    let mut trees: Vec<Tree> = Vec::new();
    let mut failures = 0;
    while failures < config.tree_attempts {
        let pt = Pt2D::new(
            lerp(bounds.min_x, bounds.max_x, rng.gen::<f64>()),
            lerp(bounds.min_y, bounds.max_y, rng.gen::<f64>()),
        );
        let clear_of_obstacles = obstacles
            .iter()
            .all(|p| !p.contains_pt(pt) && p.dist_to_pt(pt) >= size / 2.0);
        let clear_of_trees = || trees.iter().all(|t| t.center.dist_to(pt) >= size);
        let near_something = || obstacles.iter().any(|p| p.dist_to_pt(pt) < size * 2.2);

        if clear_of_obstacles && clear_of_trees() && near_something() {
            trees.push(Tree::new(pt, size));
            failures = 0;
        } else {
            failures += 1;
        }
    }
    trees
}
