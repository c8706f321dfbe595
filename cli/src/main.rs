//! Command-line tools for building road networks and generating the world around them, without
//! the editor.

#[macro_use]
extern crate log;

mod grid;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use structopt::StructOpt;

use abstutil::Timer;
use geom::{Line, Pt2D};
use road_network::{NetworkConfig, RoadInsertion, RoadNetwork, RoadSpec, World, WorldConfig};

#[derive(StructOpt)]
#[structopt(name = "rncli", about = "Build road networks and the world around them")]
enum Command {
    /// Loads a network and generates buildings, trees and road borders around it
    Generate {
        /// The path to a JSON network
        #[structopt(long)]
        input: String,
        /// The path to a JSON config, holding `network` and `world` settings. Anything missing
        /// uses the defaults.
        #[structopt(long)]
        config: Option<String>,
        /// Where to write the generated world as JSON. If omitted, only a summary is printed.
        #[structopt(long)]
        output: Option<String>,
    },
    /// Tries to add one road to a network, splitting any road it crosses
    AddRoad {
        /// The path to a JSON network. If it doesn't exist, start from an empty network.
        #[structopt(long)]
        input: String,
        /// Where to write the network. Defaults to overwriting the input.
        #[structopt(long)]
        output: Option<String>,
        #[structopt(long)]
        x1: f64,
        #[structopt(long)]
        y1: f64,
        #[structopt(long)]
        x2: f64,
        #[structopt(long)]
        y2: f64,
        /// Lanes on the left side, going from the end to the start
        #[structopt(long, default_value = "1")]
        left: usize,
        /// Lanes on the right side, going from the start to the end
        #[structopt(long, default_value = "1")]
        right: usize,
        #[structopt(long)]
        oneway: bool,
        #[structopt(long)]
        config: Option<String>,
    },
    /// Builds a synthetic grid, with one road along each side of every block
    Grid {
        #[structopt(long, default_value = "5")]
        rows: usize,
        #[structopt(long, default_value = "5")]
        cols: usize,
        /// The distance between parallel roads
        #[structopt(long, default_value = "500")]
        spacing: f64,
        /// The JSON network to write
        #[structopt(long)]
        output: String,
        #[structopt(long)]
        config: Option<String>,
    },
}

#[derive(Default, Serialize, Deserialize)]
#[serde(default)]
struct Config {
    network: NetworkConfig,
    world: WorldConfig,
}

impl Config {
    fn load(path: Option<String>) -> Result<Config> {
        let path = match path {
            Some(path) => path,
            None => return Ok(Config::default()),
        };
        let config: Config = abstutil::read_json(&path)?;
        config
            .network
            .validate()
            .and_then(|_| config.world.validate())
            .with_context(|| format!("checking {}", path))?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    abstutil::logger::setup();

    match Command::from_args() {
        Command::Generate {
            input,
            config,
            output,
        } => generate(input, Config::load(config)?, output),
        Command::AddRoad {
            input,
            output,
            x1,
            y1,
            x2,
            y2,
            left,
            right,
            oneway,
            config,
        } => {
            let config = Config::load(config)?;
            let spec = config.network.road_spec(left, right, oneway);
            let segment = Line::new(Pt2D::new(x1, y1), Pt2D::new(x2, y2));
            add_road(input, output, segment, spec, config)
        }
        Command::Grid {
            rows,
            cols,
            spacing,
            output,
            config,
        } => grid::run(rows, cols, spacing, output, Config::load(config)?.network),
    }
}

fn generate(input: String, config: Config, output: Option<String>) -> Result<()> {
    let mut timer = Timer::new(format!("generate the world for {}", abstutil::basename(&input)));
    timer.start("load network");
    let network = RoadNetwork::load(&input, config.network)?;
    timer.stop("load network");

    let world = World::generate(&network, &config.world, &mut timer);
    println!(
        "{} roads, {} intersections, {} buildings, {} trees",
        abstutil::prettyprint_usize(network.all_roads().len()),
        abstutil::prettyprint_usize(network.all_intersections().len()),
        abstutil::prettyprint_usize(world.buildings.len()),
        abstutil::prettyprint_usize(world.trees.len())
    );
    if let Some(path) = output {
        abstutil::write_json(&path, &world)?;
    }
    Ok(())
}

fn add_road(
    input: String,
    output: Option<String>,
    segment: Line,
    spec: RoadSpec,
    config: Config,
) -> Result<()> {
    let mut network = if std::path::Path::new(&input).exists() {
        RoadNetwork::load(&input, config.network)?
    } else {
        warn!("{} doesn't exist, starting from an empty network", input);
        RoadNetwork::new(config.network)
    };

    match network.add_road(segment, spec) {
        RoadInsertion::Inserted => println!("Added {}", segment),
        RoadInsertion::Split { at } => {
            println!("Added {}, splitting the road crossed at {}", segment, at)
        }
        RoadInsertion::Rejected(reason) => {
            // Nothing changed, so don't bother writing anything
            println!("Rejected {}: {}", segment, reason);
            return Ok(());
        }
    }
    network.save(&output.unwrap_or(input))
}
