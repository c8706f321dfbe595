use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use geom::{lerp, Angle, Distance, Polygon, Pt2D};

const BASE_POINTS: usize = 32;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub center: Pt2D,
    /// The diameter of the circle the base fits in.
    pub size: Distance,
    pub base: Polygon,
}

impl Tree {
    pub fn new(center: Pt2D, size: Distance) -> Tree {
        Tree {
            center,
            size,
            base: noisy_circle(center, size),
        }
    }
}

/// A lumpy circle. The lumps are a deterministic function of the center and size, so the same
/// tree always looks the same.
fn noisy_circle(center: Pt2D, size: Distance) -> Polygon {
    let radius = size / 2.0;
    let mut points = Vec::with_capacity(BASE_POINTS);
    for i in 0..BASE_POINTS {
        let a = (i as f64) * 2.0 * PI / (BASE_POINTS as f64);
        let noise = (((a + center.x()) * size.inner_meters()) % 17.0).cos().powi(2);
        let noisy_radius = radius * lerp(0.5, 1.0, noise);
        points.push(Pt2D::zero().project_away(noisy_radius, Angle::new_rads(a)));
    }
    Polygon::must_new(points).translate(center.x(), center.y())
}
