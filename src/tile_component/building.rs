use enum_map::Enum;
use serde::{Deserialize, Serialize};

use super::{Mineral, Overlay, Terrain};

/// Structures the player can place on the map after generation.
#[derive(Enum, PartialEq, Eq, Clone, Copy, Serialize, Deserialize, Debug, Hash)]
pub enum Building {
    House,
    BigHouse,
    Apartments,
    Store,
    PoliceStation,
    FireStation,
    CoalMine,
    OilRig,
}

impl Building {
    pub fn name(&self) -> &str {
        match self {
            Building::House => "House",
            Building::BigHouse => "Big House",
            Building::Apartments => "Apartments",
            Building::Store => "Store",
            Building::PoliceStation => "Police Station",
            Building::FireStation => "Fire Station",
            Building::CoalMine => "Coal Mine",
            Building::OilRig => "Oil Rig",
        }
    }

    /// The mineral the building has to sit on, if any.
    pub const fn required_mineral(&self) -> Option<Mineral> {
        match self {
            Building::CoalMine => Some(Mineral::Coal),
            Building::OilRig => Some(Mineral::Oil),
            Building::House
            | Building::BigHouse
            | Building::Apartments
            | Building::Store
            | Building::PoliceStation
            | Building::FireStation => None,
        }
    }

    /// Checks if the building can be placed on a tile.
    ///
    /// The tile must have no overlay. Oil rigs may stand offshore on [`Terrain::WaterOil`],
    /// every other building needs passable terrain.
    pub fn can_place(&self, terrain: Terrain, overlay: Overlay) -> bool {
        if !overlay.is_empty() {
            return false;
        }
        match self.required_mineral() {
            Some(mineral) => terrain.mineral() == Some(mineral),
            None => !terrain.is_impassable(),
        }
    }
}
