mod add_forests;
mod add_ore_veins;
mod add_rivers;
mod classify_tiles;
mod find_islands;
mod select_start_site;
mod smooth_coasts;

pub use add_rivers::RiverPath;
pub use find_islands::Island;
pub use select_start_site::StartSite;
