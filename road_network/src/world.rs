use anyhow::{bail, Result};
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;
use serde::{Deserialize, Serialize};

use abstutil::Timer;
use geom::{Distance, Envelope, Line, Polygon};

use crate::make::buildings::make_buildings;
use crate::make::trees::make_trees;
use crate::objects::road::roundness;
use crate::{Building, Marking, RoadNetwork, Tree};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub building_width: Distance,
    /// Guides shorter than this get no buildings.
    pub building_min_length: Distance,
    /// Between buildings, and between buildings and roads.
    pub space_between_objects: Distance,
    pub tree_size: Distance,
    /// How many random spots in a row can fail before giving up on placing more trees.
    pub tree_attempts: usize,
    pub rng_seed: u64,
}

impl Default for WorldConfig {
    fn default() -> WorldConfig {
        WorldConfig {
            building_width: Distance::const_meters(200.0),
            building_min_length: Distance::const_meters(150.0),
            space_between_objects: Distance::const_meters(50.0),
            tree_size: Distance::const_meters(160.0),
            tree_attempts: 100,
            rng_seed: 42,
        }
    }
}

impl WorldConfig {
    /// Buildings and trees need room to be laid out.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("building_width", self.building_width),
            ("building_min_length", self.building_min_length),
            ("tree_size", self.tree_size),
        ] {
            if !value.is_finite() || value <= Distance::ZERO {
                bail!("{} must be positive, but it's {}", name, value);
            }
        }
        if !self.space_between_objects.is_finite() || self.space_between_objects < Distance::ZERO {
            bail!(
                "space_between_objects can't be negative, but it's {}",
                self.space_between_objects
            );
        }
        Ok(())
    }
}

/// Everything placed around the roads. Only markings are user-edited; the rest is regenerated
/// from the network.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct World {
    /// The outline of all roads merged together.
    pub road_borders: Vec<Line>,
    /// The outline of half-width envelopes around each road, running down the middle of each
    /// side. Lane markings are placed on these.
    pub lane_guides: Vec<Line>,
    pub buildings: Vec<Building>,
    pub trees: Vec<Tree>,
    pub markings: Vec<Marking>,
}

impl World {
    pub fn new() -> World {
        World::default()
    }

    pub fn generate(network: &RoadNetwork, config: &WorldConfig, timer: &mut Timer) -> World {
        let mut world = World::new();
        world.regenerate(network, config, timer);
        world
    }

    /// Rebuilds everything except the markings.
    pub fn regenerate(&mut self, network: &RoadNetwork, config: &WorldConfig, timer: &mut Timer) {
        let roads = network.all_roads();
        let road_polygons: Vec<Polygon> = roads.iter().map(|r| r.polygon.clone()).collect();

        timer.start("merge road borders");
        self.road_borders = Polygon::union(&road_polygons);
        timer.stop("merge road borders");

        timer.start("find lane guides");
        let half_envelopes: Vec<Polygon> = roads
            .iter()
            .map(|r| Envelope::new(r.segment, r.width() / 2.0, roundness(r.width())).into_polygon())
            .collect();
        self.lane_guides = Polygon::union(&half_envelopes);
        timer.stop("find lane guides");

        timer.start("make buildings");
        self.buildings = make_buildings(roads, config, timer);
        timer.stop("make buildings");

        timer.start("plant trees");
        let mut rng = XorShiftRng::seed_from_u64(config.rng_seed);
        self.trees = make_trees(
            &road_polygons,
            &self.road_borders,
            &self.buildings,
            config,
            &mut rng,
        );
        timer.stop("plant trees");

        info!(
            "World has {} border segments, {} lane guides, {} buildings, {} trees",
            self.road_borders.len(),
            self.lane_guides.len(),
            self.buildings.len(),
            self.trees.len()
        );
    }
}
