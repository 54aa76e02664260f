use glam::IVec2;
use log::debug;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::{
    grid::{OffsetCoordinate, Size},
    tile::Tile,
    tile_component::{Overlay, Terrain},
    tile_map::TileMap,
};

/// Half extent of the cleared area around the town hall, it spans 5 columns and 3 rows.
const FOOTPRINT_HALF_EXTENT: IVec2 = IVec2::new(2, 1);

/// Where the player's settlement begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StartSite {
    /// The tile holding the town hall.
    pub anchor: OffsetCoordinate,
    /// Top-left tile of the initial camera view, centred on the anchor as far as the map allows.
    pub camera_offset: OffsetCoordinate,
}

impl TileMap {
    /// Looks for a place to found the player's settlement and builds its first tiles.
    ///
    /// Playable islands are tried from the largest down. Within an island, rows and columns of
    /// its bounding box are scanned in random order and the first suitable tile wins, see
    /// [`TileMap::is_suitable_start`]. The footprint is cleared of trees and other overlays, the
    /// town hall goes on the anchor and a 3 tile road runs right below it.
    ///
    /// Returns `None` if no island has room. Nothing is written to the map in that case.
    pub fn select_start_site(&mut self, viewport: Size, desert: bool) -> Option<StartSite> {
        let grid = self.grid();
        let playable_islands: Vec<_> = self
            .playable_islands()
            .filter_map(|island| Some((island.clone(), island.bounding_box(grid)?)))
            .collect();

        for (island, (min, max)) in playable_islands {
            let mut row_list: Vec<i32> = (min.y()..=max.y()).collect();
            let mut column_list: Vec<i32> = (min.x()..=max.x()).collect();
            row_list.shuffle(&mut self.random_number_generator);
            column_list.shuffle(&mut self.random_number_generator);

            let anchor = row_list.iter().find_map(|&y| {
                column_list
                    .iter()
                    .map(|&x| OffsetCoordinate::new(x, y))
                    // The bounding box may overlap other islands.
                    .filter(|&anchor| {
                        Tile::from_offset(anchor, grid).is_some_and(|tile| island.contains(tile))
                    })
                    .find(|&anchor| self.is_suitable_start(anchor, desert))
            });

            if let Some(anchor) = anchor {
                self.found_settlement(anchor);
                let start_site = StartSite {
                    anchor,
                    camera_offset: camera_offset(anchor, self.size(), viewport),
                };
                debug!(
                    "start site at ({}, {}), camera at ({}, {})",
                    anchor.x(),
                    anchor.y(),
                    start_site.camera_offset.x(),
                    start_site.camera_offset.y()
                );
                self.start_site = Some(start_site);
                return self.start_site;
            }
        }

        debug!("no island has room for a start site");
        None
    }

    /// Checks whether a settlement can be founded at `anchor`.
    ///
    /// Every tile of the 5×3 footprint must lie on the map, be passable and carry no river. The
    /// anchor itself can not be sand or snow unless `desert` is set.
    pub fn is_suitable_start(&self, anchor: OffsetCoordinate, desert: bool) -> bool {
        let grid = self.grid();
        let Some(anchor_tile) = Tile::from_offset(anchor, grid) else {
            return false;
        };
        if !desert
            && matches!(
                anchor_tile.terrain(&self.tile_grid).base(),
                Terrain::Sand | Terrain::Snow
            )
        {
            return false;
        }

        footprint(anchor).all(|offset_coordinate| {
            Tile::from_offset(offset_coordinate, grid).is_some_and(|tile| {
                !tile.is_impassable(&self.tile_grid) && !tile.has_river(&self.tile_grid)
            })
        })
    }

    fn found_settlement(&mut self, anchor: OffsetCoordinate) {
        let grid = self.grid();
        for offset_coordinate in footprint(anchor) {
            if let Some(tile) = Tile::from_offset(offset_coordinate, grid) {
                tile.set_overlay(&mut self.tile_grid, Overlay::Empty);
            }
        }

        let [x, y] = anchor.to_array();
        let stamps = [
            ((x, y), Overlay::TownHall),
            ((x - 1, y + 1), Overlay::Road),
            ((x, y + 1), Overlay::Road),
            ((x + 1, y + 1), Overlay::Road),
        ];
        for ((x, y), overlay) in stamps {
            if let Some(tile) = Tile::from_offset(OffsetCoordinate::new(x, y), grid) {
                tile.set_overlay(&mut self.tile_grid, overlay);
            }
        }
    }
}

/// Offsets of the tiles around `anchor` that the settlement needs, row by row.
fn footprint(anchor: OffsetCoordinate) -> impl Iterator<Item = OffsetCoordinate> {
    let center = anchor.into_inner();
    (-FOOTPRINT_HALF_EXTENT.y..=FOOTPRINT_HALF_EXTENT.y).flat_map(move |dy| {
        (-FOOTPRINT_HALF_EXTENT.x..=FOOTPRINT_HALF_EXTENT.x)
            .map(move |dx| OffsetCoordinate(center + IVec2::new(dx, dy)))
    })
}

/// Scroll position that puts `anchor` in the middle of the `viewport`, clamped so the view
/// never leaves the map.
fn camera_offset(anchor: OffsetCoordinate, map_size: Size, viewport: Size) -> OffsetCoordinate {
    let anchor = anchor.into_inner();
    let map_size = IVec2::new(map_size.width as i32, map_size.height as i32);
    let viewport = IVec2::new(viewport.width as i32, viewport.height as i32);
    let max_offset = (map_size - viewport).max(IVec2::ZERO);
    OffsetCoordinate((anchor - viewport / 2).clamp(IVec2::ZERO, max_offset))
}
