//! Simulation module
//!
//! All gameplay logic lives here:
//! - Per-tick constants only (no wall-clock scaling)
//! - Seeded RNG only
//! - Stable iteration order (by creation)
//! - No rendering or platform dependencies

pub mod collision;
pub mod piece;
pub mod session;
pub mod spawner;
pub mod tier;
pub mod world;

pub use collision::{Contact, bounce, circles_overlap, piece_contact};
pub use piece::{Piece, PieceId};
pub use session::{PieceView, Session, Snapshot, TickReport};
pub use spawner::Spawner;
pub use tier::{Tier, TierCatalog, TierId};
pub use world::{MergeEvent, World, WorldStep};
