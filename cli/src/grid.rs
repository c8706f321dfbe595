use anyhow::{bail, Result};

use abstutil::Timer;
use geom::{Line, Pt2D};
use road_network::{NetworkConfig, RoadInsertion, RoadNetwork};

pub fn run(
    rows: usize,
    cols: usize,
    spacing: f64,
    output: String,
    config: NetworkConfig,
) -> Result<()> {
    let mut timer = Timer::new(format!("build a {}x{} grid", rows, cols));
    let network = build(rows, cols, spacing, config, &mut timer)?;
    network.save(&output)
}

/// One road between every pair of neighboring grid nodes, so every junction is a shared
/// endpoint.
fn build(
    rows: usize,
    cols: usize,
    spacing: f64,
    config: NetworkConfig,
    timer: &mut Timer,
) -> Result<RoadNetwork> {
    if rows == 0 || cols == 0 || rows * cols < 2 || !(spacing > 0.0) {
        bail!("A grid needs at least two nodes and a positive spacing");
    }
    let spec = config.road_spec(1, 1, false);
    let mut network = RoadNetwork::new(config);
    let node = |row: usize, col: usize| Pt2D::new(spacing * col as f64, spacing * row as f64);

    let mut edges = Vec::new();
    for row in 0..rows {
        for col in 0..cols {
            if col + 1 < cols {
                edges.push(Line::new(node(row, col), node(row, col + 1)));
            }
            if row + 1 < rows {
                edges.push(Line::new(node(row, col), node(row + 1, col)));
            }
        }
    }

    let mut rejected = 0;
    timer.start_iter("add roads", edges.len());
    for segment in edges {
        timer.next();
        if let RoadInsertion::Rejected(reason) = network.add_road(segment, spec.clone()) {
            timer.warn(format!("Couldn't add {}: {}", segment, reason));
            rejected += 1;
        }
    }

    timer.note(format!(
        "{} roads and {} intersections, {} rejected",
        abstutil::prettyprint_usize(network.all_roads().len()),
        abstutil::prettyprint_usize(network.all_intersections().len()),
        rejected
    ));
    Ok(network)
}
