use enum_map::Enum;
use serde::{Deserialize, Serialize};

/// The substrate of a tile, stored on the ground layer.
#[derive(Enum, PartialEq, Eq, Clone, Copy, Serialize, Deserialize, Debug, Hash)]
pub enum Terrain {
    Ocean,
    Shore,
    Ice,
    Sand,
    Grass,
    Ground,
    Snow,
    GrassCoal,
    SandCoal,
    GroundCoal,
    GrassOil,
    SandOil,
    GroundOil,
    /// Shore with an offshore oil deposit.
    WaterOil,
}

#[derive(Enum, PartialEq, Eq, Clone, Copy, Serialize, Deserialize, Debug, Hash)]
pub enum Mineral {
    Coal,
    Oil,
}

impl Terrain {
    pub fn name(&self) -> &str {
        match self {
            Terrain::Ocean => "Ocean",
            Terrain::Shore => "Shore",
            Terrain::Ice => "Ice",
            Terrain::Sand => "Sand",
            Terrain::Grass => "Grass",
            Terrain::Ground => "Ground",
            Terrain::Snow => "Snow",
            Terrain::GrassCoal => "Grass Coal",
            Terrain::SandCoal => "Sand Coal",
            Terrain::GroundCoal => "Ground Coal",
            Terrain::GrassOil => "Grass Oil",
            Terrain::SandOil => "Sand Oil",
            Terrain::GroundOil => "Ground Oil",
            Terrain::WaterOil => "Water Oil",
        }
    }

    /// Impassable tiles split landmasses and can not carry roads or buildings.
    pub const fn is_impassable(&self) -> bool {
        matches!(
            self,
            Terrain::Ocean | Terrain::Shore | Terrain::Ice | Terrain::WaterOil
        )
    }

    /// Whether a river reaching this tile has found its mouth.
    pub const fn is_water(&self) -> bool {
        matches!(self, Terrain::Ocean | Terrain::Shore | Terrain::WaterOil)
    }

    /// The substrate without its mineral deposit.
    pub const fn base(&self) -> Terrain {
        match self {
            Terrain::GrassCoal | Terrain::GrassOil => Terrain::Grass,
            Terrain::SandCoal | Terrain::SandOil => Terrain::Sand,
            Terrain::GroundCoal | Terrain::GroundOil => Terrain::Ground,
            Terrain::WaterOil => Terrain::Shore,
            other => *other,
        }
    }

    pub const fn mineral(&self) -> Option<Mineral> {
        match self {
            Terrain::GrassCoal | Terrain::SandCoal | Terrain::GroundCoal => Some(Mineral::Coal),
            Terrain::GrassOil | Terrain::SandOil | Terrain::GroundOil | Terrain::WaterOil => {
                Some(Mineral::Oil)
            }
            Terrain::Ocean
            | Terrain::Shore
            | Terrain::Ice
            | Terrain::Sand
            | Terrain::Grass
            | Terrain::Ground
            | Terrain::Snow => None,
        }
    }

    /// The mineral-bearing variant of this substrate, or `None` when `mineral` can not be
    /// seeded here. Tiles that already carry a mineral can not take another one.
    pub const fn with_mineral(&self, mineral: Mineral) -> Option<Terrain> {
        match (self, mineral) {
            (Terrain::Grass, Mineral::Coal) => Some(Terrain::GrassCoal),
            (Terrain::Sand, Mineral::Coal) => Some(Terrain::SandCoal),
            (Terrain::Ground, Mineral::Coal) => Some(Terrain::GroundCoal),
            (Terrain::Grass, Mineral::Oil) => Some(Terrain::GrassOil),
            (Terrain::Sand, Mineral::Oil) => Some(Terrain::SandOil),
            (Terrain::Ground, Mineral::Oil) => Some(Terrain::GroundOil),
            (Terrain::Shore, Mineral::Oil) => Some(Terrain::WaterOil),
            _ => None,
        }
    }

    /// Rank of the substrate from the lowest (ocean) to the harshest (snow).
    pub const fn harshness_rank(&self) -> u8 {
        match self {
            Terrain::Ocean => 0,
            Terrain::Shore | Terrain::WaterOil => 1,
            Terrain::Sand | Terrain::SandCoal | Terrain::SandOil => 2,
            Terrain::Grass | Terrain::GrassCoal | Terrain::GrassOil => 3,
            Terrain::Ground | Terrain::GroundCoal | Terrain::GroundOil => 4,
            Terrain::Snow | Terrain::Ice => 5,
        }
    }

    /// Colour used by map previews.
    pub const fn preview_color(&self) -> [u8; 3] {
        match self {
            Terrain::Ocean => [24, 64, 140],
            Terrain::Shore => [58, 120, 196],
            Terrain::Ice => [200, 230, 245],
            Terrain::Sand => [222, 206, 140],
            Terrain::Grass => [92, 160, 64],
            Terrain::Ground => [136, 112, 80],
            Terrain::Snow => [240, 240, 240],
            Terrain::GrassCoal | Terrain::SandCoal | Terrain::GroundCoal => [48, 48, 48],
            Terrain::GrassOil | Terrain::SandOil | Terrain::GroundOil => [96, 40, 96],
            Terrain::WaterOil => [60, 40, 110],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Mineral, Terrain};

    #[test]
    fn minerals_keep_their_base_substrate() {
        for terrain in [Terrain::Grass, Terrain::Sand, Terrain::Ground] {
            for mineral in [Mineral::Coal, Mineral::Oil] {
                let seeded = terrain.with_mineral(mineral).unwrap();
                assert_eq!(seeded.base(), terrain);
                assert_eq!(seeded.mineral(), Some(mineral));
                assert_eq!(seeded.with_mineral(mineral), None);
            }
        }
        assert_eq!(Terrain::Shore.with_mineral(Mineral::Oil), Some(Terrain::WaterOil));
        assert_eq!(Terrain::Shore.with_mineral(Mineral::Coal), None);
        assert_eq!(Terrain::Snow.with_mineral(Mineral::Coal), None);
    }

    #[test]
    fn water_oil_stays_impassable() {
        assert!(Terrain::WaterOil.is_impassable());
        assert!(Terrain::WaterOil.is_water());
        assert!(!Terrain::GrassOil.is_impassable());
        assert!(Terrain::Ice.is_impassable());
        assert!(!Terrain::Ice.is_water());
    }
}
