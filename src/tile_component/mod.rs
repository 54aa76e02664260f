//! This module contains the components of a tile in the map.
//! A tile stacks an [`Overlay`] on top of a [`Terrain`] substrate.

pub mod building;
pub mod connection;
pub mod overlay;
pub mod terrain;

pub use building::Building;
pub use connection::ConnectionMask;
pub use overlay::Overlay;
pub use terrain::{Mineral, Terrain};
