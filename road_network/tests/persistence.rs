use geom::{Line, Pt2D};
use road_network::raw::RawNetwork;
use road_network::{NetworkConfig, Rejection, RoadInsertion, RoadNetwork, RoadSpec};

fn pt(x: f64, y: f64) -> Pt2D {
    Pt2D::new(x, y)
}

fn temp_path(name: &str) -> String {
    std::env::temp_dir()
        .join(format!("road_network_{}_{}", std::process::id(), name))
        .to_string_lossy()
        .to_string()
}

fn sample_network() -> RoadNetwork {
    let mut network = RoadNetwork::new(NetworkConfig::default());
    let mut main = RoadSpec::new(2, 2, false);
    main.name = "Main Street".to_string();
    main.priority = 2;
    network.add_road(Line::new(pt(0.0, 0.0), pt(1200.0, 0.0)), main);

    let mut side = RoadSpec::new(0, 1, true);
    side.name = "Side Street".to_string();
    side.elevation = 1;
    assert!(matches!(
        network.add_road(Line::new(pt(600.0, -600.0), pt(600.0, 600.0)), side),
        RoadInsertion::Split { .. }
    ));
    network.add_point(pt(2000.0, 2000.0));
    network
}

fn assert_same(a: &RoadNetwork, b: &RoadNetwork) {
    assert_eq!(a.graph(), b.graph());
    assert_eq!(a.all_roads().len(), b.all_roads().len());
    for road in a.all_roads() {
        let other = b.find_road(&road.segment).unwrap();
        assert_eq!(road.spec, other.spec);
        assert_eq!(road.is_start_connected, other.is_start_connected);
        assert_eq!(road.is_end_connected, other.is_end_connected);
        assert_eq!(road.lanes.len(), other.lanes.len());
    }
    assert_eq!(a.all_intersections().len(), b.all_intersections().len());
}

#[test]
fn save_and_load() {
    let network = sample_network();
    let path = temp_path("save_and_load.json");
    network.save(&path).unwrap();
    let loaded = RoadNetwork::load(&path, NetworkConfig::default()).unwrap();
    assert_same(&network, &loaded);

    // Loading and saving again produces the same file
    let path2 = temp_path("save_and_load_again.json");
    loaded.save(&path2).unwrap();
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        std::fs::read_to_string(&path2).unwrap()
    );
    std::fs::remove_file(path).unwrap();
    std::fs::remove_file(path2).unwrap();
}

#[test]
fn raw_round_trip() {
    let network = sample_network();
    let raw = network.to_raw();
    assert_eq!(raw.roads.len(), 4);
    let rebuilt = RoadNetwork::from_raw(raw, NetworkConfig::default()).unwrap();
    assert_same(&network, &rebuilt);
}

#[test]
fn json_layout() {
    let network = sample_network();
    let value = serde_json::to_value(network.to_raw()).unwrap();
    assert_eq!(value["graph"]["points"].as_array().unwrap().len(), 6);
    assert_eq!(value["graph"]["segments"].as_array().unwrap().len(), 4);

    let road = &value["roads"][0];
    for key in [
        "segment",
        "number_of_lanes_in_left_side",
        "number_of_lanes_in_right_side",
        "priority",
        "elevation",
        "is_oneway",
        "is_start_connected",
        "is_end_connected",
        "lane_width",
        "name",
    ] {
        assert!(road.get(key).is_some(), "missing {}", key);
    }
    assert_eq!(road["lane_width"], 50);
    assert!(road["segment"]["start"]["x"].is_number());
}

#[test]
fn connection_flags_are_recalculated() {
    let network = sample_network();
    let mut raw = network.to_raw();
    for road in &mut raw.roads {
        road.is_start_connected = false;
        road.is_end_connected = false;
    }
    let rebuilt = RoadNetwork::from_raw(raw, NetworkConfig::default()).unwrap();
    // Every half meets the others in the middle
    for road in rebuilt.all_roads() {
        assert!(road.is_start_connected || road.is_end_connected);
    }
}

#[test]
fn bad_files() {
    let path = temp_path("bad_file.json");
    std::fs::write(&path, "{\"graph\": {\"points\": []}}").unwrap();
    let err = RoadNetwork::load(&path, NetworkConfig::default()).unwrap_err();
    assert!(format!("{:#}", err).contains(&path));
    std::fs::remove_file(&path).unwrap();

    assert!(RoadNetwork::load(&temp_path("does_not_exist.json"), NetworkConfig::default()).is_err());

    // A road off the graph
    let mut raw = sample_network().to_raw();
    raw.roads[0].segment = Line::new(pt(5.0, 5.0), pt(500.0, 5.0));
    assert!(RoadNetwork::from_raw(raw, NetworkConfig::default()).is_err());

    // No lanes at all
    let mut raw = sample_network().to_raw();
    raw.roads[1].number_of_lanes_in_left_side = 0;
    raw.roads[1].number_of_lanes_in_right_side = 0;
    assert!(RoadNetwork::from_raw(raw, NetworkConfig::default()).is_err());

    // Two roads on one segment
    let mut raw = sample_network().to_raw();
    let duplicate = raw.roads[0].clone();
    raw.roads.push(duplicate);
    assert!(RoadNetwork::from_raw(raw, NetworkConfig::default()).is_err());
}

#[test]
fn lane_widths_survive_saving() {
    let mut config = NetworkConfig::default();
    config.lane_width = geom::Distance::meters(0.4);
    assert!(config.validate().is_err());
    // Fractional widths can't be persisted, so they never get in
    let spec = config.road_spec(1, 1, false);
    let mut network = RoadNetwork::new(config);
    assert_eq!(
        network.add_road(Line::new(pt(0.0, 0.0), pt(500.0, 0.0)), spec),
        RoadInsertion::Rejected(Rejection::Degenerate)
    );
    let mut spec = RoadSpec::new(1, 1, false);
    spec.lane_width = geom::Distance::meters(37.5);
    assert!(network
        .add_road(Line::new(pt(0.0, 0.0), pt(500.0, 0.0)), spec)
        .is_rejected());

    let mut config = NetworkConfig::default();
    config.lane_width = geom::Distance::meters(37.0);
    let spec = config.road_spec(2, 1, false);
    let mut network = RoadNetwork::new(config.clone());
    network.add_road(Line::new(pt(0.0, 0.0), pt(500.0, 0.0)), spec.clone());
    let rebuilt = RoadNetwork::from_raw(network.to_raw(), config).unwrap();
    assert_eq!(rebuilt.all_roads()[0].spec, spec);
    assert_eq!(rebuilt.all_roads()[0].width(), geom::Distance::meters(111.0));
}

#[test]
fn empty_network() {
    let raw: RawNetwork =
        serde_json::from_str(r#"{"graph": {"points": [], "segments": []}, "roads": []}"#).unwrap();
    let network = RoadNetwork::from_raw(raw, NetworkConfig::default()).unwrap();
    assert!(network.graph().is_empty());
    assert!(network.all_roads().is_empty());
    assert!(network.all_intersections().is_empty());
}
