use city_map_generator::{
    ErosionConfig, GameMap, MapParameters, MapType, Overlay, generate_map,
};

fn parameters(map_type: MapType, seed: u64) -> MapParameters {
    MapParameters {
        map_type,
        size: 0,
        seed,
        min_playable_island_size: Some(20),
        erosion: ErosionConfig {
            base_iterations: 400,
            ..Default::default()
        },
        ..Default::default()
    }
}

fn assert_playable(game_map: &GameMap) {
    let tile_grid = &game_map.tile_grid;
    let [x, y] = game_map.start_site.anchor.to_array();

    assert_eq!(tile_grid.get(x, y).unwrap().overlay, Overlay::TownHall);
    for dx in -1..=1 {
        assert_eq!(tile_grid.get(x + dx, y + 1).unwrap().overlay, Overlay::Road);
    }
    for dy in -1..=1 {
        for dx in -2..=2 {
            let state = tile_grid.get(x + dx, y + dy).unwrap();
            assert!(!state.terrain.is_impassable());
            assert_ne!(state.overlay, Overlay::River);
        }
    }

    let size = tile_grid.size();
    for y in 0..size.height as i32 {
        for x in 0..size.width as i32 {
            let state = tile_grid.get(x, y).unwrap();
            if matches!(
                state.overlay,
                Overlay::River | Overlay::Road | Overlay::TownHall | Overlay::Building(_)
            ) {
                assert!(
                    !state.terrain.is_impassable(),
                    "{:?} on {:?}",
                    state.overlay,
                    state.terrain
                );
            }
            if state.overlay == Overlay::Trees {
                assert_eq!(state.terrain.base(), city_map_generator::Terrain::Grass);
            }
        }
    }

    // The camera only scrolls along axes where the map is larger than the viewport.
    let viewport = MapParameters::default().viewport;
    let [camera_x, camera_y] = game_map.start_site.camera_offset.to_array();
    assert!((0..=(size.width as i32 - viewport.width as i32).max(0)).contains(&camera_x));
    assert!((0..=(size.height as i32 - viewport.height as i32).max(0)).contains(&camera_y));
}

#[test]
fn every_map_type_is_playable() {
    for map_type in [
        MapType::Island,
        MapType::Continents,
        MapType::Highlands,
        MapType::Deserts,
    ] {
        let game_map = generate_map(&parameters(map_type, 1234)).unwrap();
        assert_eq!(game_map.tile_grid.size().width, 32);
        assert_playable(&game_map);
    }
}

#[test]
fn a_seed_reproduces_its_map() {
    let first = generate_map(&parameters(MapType::Island, 99)).unwrap();
    let second = generate_map(&parameters(MapType::Island, 99)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn deserts_have_no_forests_or_grass() {
    let game_map = generate_map(&parameters(MapType::Deserts, 7)).unwrap();
    let histogram = game_map.tile_grid.terrain_histogram();
    assert_eq!(histogram[city_map_generator::Terrain::Grass], 0);
    let size = game_map.tile_grid.size();
    for y in 0..size.height as i32 {
        for x in 0..size.width as i32 {
            assert_ne!(game_map.tile_grid.get(x, y).unwrap().overlay, Overlay::Trees);
        }
    }
}

#[test]
fn maps_survive_a_json_round_trip() {
    let game_map = generate_map(&parameters(MapType::Continents, 5)).unwrap();
    let json = serde_json::to_string(&game_map).unwrap();
    let restored: GameMap = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, game_map);
}
