use serde::{Deserialize, Serialize};

use super::building::Building;

/// Features and structures stacked on top of the [`Terrain`](super::Terrain) layer.
#[derive(PartialEq, Eq, Clone, Copy, Serialize, Deserialize, Debug, Hash, Default)]
pub enum Overlay {
    #[default]
    Empty,
    River,
    Road,
    Trees,
    Mountain,
    PalmTree,
    /// The player's first settlement.
    TownHall,
    Building(Building),
}

impl Overlay {
    pub fn name(&self) -> &str {
        match self {
            Overlay::Empty => "Empty",
            Overlay::River => "River",
            Overlay::Road => "Road",
            Overlay::Trees => "Trees",
            Overlay::Mountain => "Mountain",
            Overlay::PalmTree => "Palm Tree",
            Overlay::TownHall => "Town Hall",
            Overlay::Building(building) => building.name(),
        }
    }

    pub const fn is_empty(&self) -> bool {
        matches!(self, Overlay::Empty)
    }

    /// Whether the bulldozer may clear this overlay.
    pub const fn is_removable(&self) -> bool {
        !matches!(self, Overlay::Empty | Overlay::River | Overlay::TownHall)
    }

    /// Colour used by map previews, `None` lets the terrain show through.
    pub const fn preview_color(&self) -> Option<[u8; 3]> {
        match self {
            Overlay::Empty => None,
            Overlay::River => Some([70, 150, 230]),
            Overlay::Road => Some([110, 110, 110]),
            Overlay::Trees => Some([30, 100, 40]),
            Overlay::Mountain => Some([90, 80, 75]),
            Overlay::PalmTree => Some([140, 170, 60]),
            Overlay::TownHall => Some([220, 40, 40]),
            Overlay::Building(_) => Some([200, 120, 60]),
        }
    }
}
