use std::collections::HashSet;

use city_map_generator::{
    Building, Layer, MapParameters, Overlay, Size, Terrain, TileGrid, TileValue,
    tile_map::TileMap,
};
use proptest::prelude::*;

fn terrain() -> impl Strategy<Value = Terrain> {
    prop_oneof![
        Just(Terrain::Ocean),
        Just(Terrain::Shore),
        Just(Terrain::Sand),
        Just(Terrain::Grass),
        Just(Terrain::GroundCoal),
        Just(Terrain::WaterOil),
    ]
}

fn overlay() -> impl Strategy<Value = Overlay> {
    prop_oneof![
        Just(Overlay::Empty),
        Just(Overlay::River),
        Just(Overlay::Road),
        Just(Overlay::Trees),
        Just(Overlay::TownHall),
        Just(Overlay::Building(Building::House)),
    ]
}

fn tile_grid() -> impl Strategy<Value = TileGrid> {
    (1u32..=10, 1u32..=10).prop_flat_map(|(width, height)| {
        let area = (width * height) as usize;
        (
            prop::collection::vec(terrain(), area),
            prop::collection::vec(overlay(), area),
        )
            .prop_map(move |(terrain_list, overlay_list)| {
                let mut tile_grid = TileGrid::new(Size::new(width, height));
                for (index, (terrain, overlay)) in terrain_list.into_iter().zip(overlay_list).enumerate() {
                    let (x, y) = ((index as u32 % width) as i32, (index as u32 / width) as i32);
                    tile_grid.set(x, y, Layer::Terrain, TileValue::Terrain(terrain));
                    tile_grid.set(x, y, Layer::Overlay, TileValue::Overlay(overlay));
                }
                tile_grid
            })
    })
}

proptest! {
    // Writing the same value twice equals writing it once
    #[test]
    fn set_is_idempotent(mut tile_grid in tile_grid(), x in -2i32..12, y in -2i32..12, terrain in terrain()) {
        tile_grid.set(x, y, Layer::Terrain, TileValue::Terrain(terrain));
        let once = tile_grid.clone();
        tile_grid.set(x, y, Layer::Terrain, TileValue::Terrain(terrain));
        prop_assert_eq!(&tile_grid, &once);
        match tile_grid.get(x, y) {
            Some(state) => prop_assert_eq!(state.terrain, terrain),
            None => prop_assert!(x < 0 || y < 0 || x >= tile_grid.size().width as i32 || y >= tile_grid.size().height as i32),
        }
    }

    // Rivers and the town hall survive the bulldozer
    #[test]
    fn bulldozer_spares_fixed_overlays(mut tile_grid in tile_grid(), x in 0i32..10, y in 0i32..10) {
        let Some(before) = tile_grid.get(x, y) else {
            return Ok(());
        };
        let changed = tile_grid.bulldoze(x, y);
        let after = tile_grid.get(x, y).unwrap();
        match before.overlay {
            Overlay::Empty | Overlay::River | Overlay::TownHall => {
                prop_assert!(!changed);
                prop_assert_eq!(after, before);
            }
            _ => {
                prop_assert!(changed);
                prop_assert_eq!(after.overlay, Overlay::Empty);
            }
        }
        prop_assert_eq!(after.terrain, before.terrain);
    }

    // Buildings never land on water or on top of something else
    #[test]
    fn buildings_need_free_land(mut tile_grid in tile_grid(), x in 0i32..10, y in 0i32..10) {
        let Some(before) = tile_grid.get(x, y) else {
            return Ok(());
        };
        if tile_grid.place_building(x, y, Building::Store) {
            prop_assert!(!before.terrain.is_impassable());
            prop_assert_eq!(before.overlay, Overlay::Empty);
            prop_assert_eq!(tile_grid.get(x, y).unwrap().overlay, Overlay::Building(Building::Store));
        } else {
            prop_assert_eq!(tile_grid.get(x, y).unwrap(), before);
        }
    }

    // Islands partition the passable tiles into edge-connected, mutually separated sets
    #[test]
    fn islands_partition_the_land(tile_grid in tile_grid()) {
        let mut tile_map = TileMap::new(&MapParameters::default(), 0);
        tile_map.elevation_list = vec![0; tile_grid.size().area()];
        tile_map.tile_grid = tile_grid;
        tile_map.find_islands();

        let grid = tile_map.grid();
        let passable: HashSet<_> = tile_map
            .all_tiles()
            .filter(|tile| !tile.is_impassable(&tile_map.tile_grid))
            .collect();

        let mut owner = std::collections::HashMap::new();
        for island in &tile_map.island_list {
            prop_assert!(!island.tile_list.is_empty());
            for &tile in &island.tile_list {
                prop_assert!(owner.insert(tile, island.id).is_none());
            }
        }
        prop_assert_eq!(owner.keys().copied().collect::<HashSet<_>>(), passable);

        for (&tile, &id) in &owner {
            for neighbor in tile.neighbor_tiles(grid) {
                if let Some(&neighbor_id) = owner.get(&neighbor) {
                    prop_assert_eq!(neighbor_id, id);
                }
            }
        }

        let sizes: Vec<usize> = tile_map.island_list.iter().map(|island| island.size()).collect();
        prop_assert!(sizes.windows(2).all(|pair| pair[0] >= pair[1]));
    }
}
