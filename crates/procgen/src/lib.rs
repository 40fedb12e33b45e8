//! Seed-driven generation of planets, moons, asteroid fields and their textures.

pub mod cache;
pub mod classification;
pub mod config;
pub mod factory;
pub mod layout;
pub mod naming;
pub mod sector;
pub mod streams;
pub mod textures;

pub use cache::*;
pub use classification::*;
pub use config::*;
pub use factory::*;
pub use layout::*;
pub use naming::*;
pub use sector::*;
pub use textures::*;
