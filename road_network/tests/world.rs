use abstutil::Timer;
use geom::{Line, Pt2D};
use road_network::{
    MarkingKind, NetworkConfig, RoadNetwork, RoadSpec, World, WorldConfig,
};

fn pt(x: f64, y: f64) -> Pt2D {
    Pt2D::new(x, y)
}

/// Two long roads crossing in the middle.
fn plus() -> RoadNetwork {
    let mut network = RoadNetwork::new(NetworkConfig::default());
    network.add_road(Line::new(pt(0.0, 1000.0), pt(2000.0, 1000.0)), RoadSpec::new(1, 1, false));
    network.add_road(Line::new(pt(1000.0, 0.0), pt(1000.0, 2000.0)), RoadSpec::new(1, 1, false));
    assert_eq!(network.all_roads().len(), 4);
    network
}

#[test]
fn empty_world() {
    let network = RoadNetwork::new(NetworkConfig::default());
    let world = World::generate(&network, &WorldConfig::default(), &mut Timer::throwaway());
    assert!(world.road_borders.is_empty());
    assert!(world.lane_guides.is_empty());
    assert!(world.buildings.is_empty());
    assert!(world.trees.is_empty());
}

#[test]
fn generate() {
    let network = plus();
    let config = WorldConfig::default();
    let world = World::generate(&network, &config, &mut Timer::new("generate a world"));

    assert!(!world.road_borders.is_empty());
    assert!(!world.lane_guides.is_empty());
    // The borders of the merged roads don't pass through the middle of the junction
    let center = pt(1000.0, 1000.0);
    for l in &world.road_borders {
        assert!(l.dist_to_pt(center).inner_meters() > 49.0);
    }

    assert!(!world.buildings.is_empty());
    for b in &world.buildings {
        assert_eq!(b.base.points().len(), 4);
        for road in network.all_roads() {
            assert!(!b.base.intersects_polygon(&road.polygon));
            assert!(!road.polygon.contains_pt(b.base.center()));
        }
    }
    for (idx, b1) in world.buildings.iter().enumerate() {
        for b2 in &world.buildings[idx + 1..] {
            assert!(!b1.base.intersects_polygon(&b2.base));
        }
    }

    assert!(!world.trees.is_empty());
    for (idx, t1) in world.trees.iter().enumerate() {
        for road in network.all_roads() {
            assert!(!road.polygon.contains_pt(t1.center));
        }
        for b in &world.buildings {
            assert!(!b.base.contains_pt(t1.center));
        }
        for t2 in &world.trees[idx + 1..] {
            assert!(t1.center.dist_to(t2.center) >= config.tree_size);
        }
    }
}

#[test]
fn same_seed_same_trees() {
    let network = plus();
    let config = WorldConfig::default();
    let w1 = World::generate(&network, &config, &mut Timer::throwaway());
    let w2 = World::generate(&network, &config, &mut Timer::throwaway());
    assert_eq!(w1.trees, w2.trees);
    assert_eq!(w1.road_borders, w2.road_borders);

    let mut other_seed = config.clone();
    other_seed.rng_seed = 1234;
    let w3 = World::generate(&network, &other_seed, &mut Timer::throwaway());
    assert_ne!(w1.trees, w3.trees);
}

#[test]
fn regenerating_keeps_markings() {
    let mut network = plus();
    let config = WorldConfig::default();
    let mut world = World::generate(&network, &config, &mut Timer::throwaway());
    world.markings.push(MarkingKind::Crossing.create(
        pt(500.0, 1000.0),
        pt(1.0, 0.0),
        network.config().lane_width,
    ));
    let buildings_before = world.buildings.len();

    network.remove_point(pt(2000.0, 1000.0));
    world.regenerate(&network, &config, &mut Timer::throwaway());
    assert_eq!(world.markings.len(), 1);
    assert!(world.buildings.len() < buildings_before);
}

#[test]
fn no_room_for_buildings() {
    let mut config = WorldConfig::default();
    config.building_min_length = geom::Distance::ZERO;
    config.space_between_objects = geom::Distance::ZERO;
    assert!(config.validate().is_err());

    // Generating anyway doesn't blow up, it just skips the buildings
    let world = World::generate(&plus(), &config, &mut Timer::throwaway());
    assert!(world.buildings.is_empty());
    assert!(!world.road_borders.is_empty());
}

#[test]
fn config_validation() {
    assert!(WorldConfig::default().validate().is_ok());
    let mut config = WorldConfig::default();
    config.tree_size = geom::Distance::meters(-1.0);
    assert!(config.validate().is_err());
    let mut config = WorldConfig::default();
    config.space_between_objects = geom::Distance::meters(f64::NAN);
    assert!(config.validate().is_err());
}

#[test]
fn config_defaults() {
    let config: WorldConfig = serde_json::from_str(r#"{"tree_size": 80.0}"#).unwrap();
    assert_eq!(config.tree_size, geom::Distance::meters(80.0));
    assert_eq!(config.rng_seed, WorldConfig::default().rng_seed);
}
