//! Simulation core of a tile-grid raycasting engine: grid collision, DDA
//! raycasting, player movement and sprite lifecycle.

pub mod config;
pub mod error;
pub mod grid;
pub mod player;
pub mod raycast;
pub mod sprite;
pub mod vector;
pub mod world;

pub use config::SimConfig;
pub use error::SimError;
pub use grid::GridMap;
pub use player::Player;
pub use raycast::{RayHit, Raycaster};
pub use sprite::{Sprite, SpriteKind, SpriteRegistry};
pub use vector::Vector;
pub use world::World;
