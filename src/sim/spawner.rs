//! Spawner: announces the next tier, then drops it on request
//!
//! Two-phase protocol. `announced` is what the preview shows; `drop` always
//! spawns exactly that tier and only then rolls the next announcement.
//! Callers must never roll between a preview and its drop.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::piece::PieceId;
use super::tier::TierId;
use super::world::World;

#[derive(Debug, Clone)]
pub struct Spawner {
    rng: Pcg32,
    /// Tier the next `drop` will spawn
    announced: TierId,
    /// Spawns are drawn from tiers `0..tier_count`
    tier_count: usize,
    /// Vertical drop position
    height: f32,
}

impl Spawner {
    /// Create a spawner with a seeded RNG and an initial announcement.
    /// `tier_count` must be at least 1 and within the catalog.
    pub fn new(seed: u64, tier_count: usize, height: f32) -> Self {
        debug_assert!(tier_count > 0, "spawner needs at least one tier");
        let mut spawner = Self {
            rng: Pcg32::seed_from_u64(seed),
            announced: TierId(0),
            tier_count: tier_count.max(1),
            height,
        };
        spawner.roll();
        spawner
    }

    /// Currently announced tier (read-only)
    pub fn announced(&self) -> TierId {
        self.announced
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Draw a fresh announcement uniformly from the lowest tiers
    pub fn roll(&mut self) -> TierId {
        self.announced = TierId(self.rng.random_range(0..self.tier_count));
        self.announced
    }

    /// Spawn the announced tier at `(x, height)`, then roll the next one
    pub fn drop(&mut self, world: &mut World, x: f32) -> PieceId {
        let tier = self.announced;
        let id = world.insert_piece(Vec2::new(x, self.height), tier);
        log::debug!("Dropped {:?} as {:?} at x={:.1}", tier, id, x);
        self.roll();
        id
    }
}
