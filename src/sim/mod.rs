//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Seeded RNG only, simulated clocks only
//! - Every collection rebuilt into a fresh grid each tick
//! - No rendering, audio or platform dependencies

pub mod bounds;
pub mod collision;
pub mod difficulty;
pub mod enemy;
pub mod entities;
pub mod factory;
pub mod grid;
pub mod shared;
pub mod ship;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use bounds::{Bounded, Bounds, Size, intersects};
pub use collision::{CollisionReport, detect_collisions};
pub use difficulty::Difficulty;
pub use enemy::{Enemy, EnemyKind, Weapon};
pub use entities::{Body, Bonus, BonusKind, Collider, Color, Shot, ShotSpec, Star};
pub use factory::EntityFactory;
pub use grid::{Handle, SpatialGrid};
pub use shared::SharedSimulation;
pub use ship::{Armament, Ship, ShotPattern};
pub use snapshot::{EntityView, ShipView, Sprite, WorldSnapshot};
pub use state::{GameMode, Simulation};
