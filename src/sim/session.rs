//! Session controller: world + spawner + score
//!
//! This is the surface hosts talk to. It never schedules itself; the host
//! calls [`Session::tick`] at whatever cadence it chooses and reads state
//! between ticks.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::piece::{Piece, PieceId};
use super::spawner::Spawner;
use super::tier::{TierCatalog, TierId};
use super::world::{MergeEvent, World};
use crate::config::{ConfigError, GameConfig, Well};

/// Outcome of one [`Session::tick`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    pub merges: Vec<MergeEvent>,
    /// Stray pieces cleaned up below the floor
    #[serde(default)]
    pub discarded: Vec<PieceId>,
    pub game_over: bool,
}

impl TickReport {
    /// Points earned this tick
    pub fn score_delta(&self) -> u64 {
        self.merges.iter().map(|m| m.score_delta).sum()
    }
}

/// Read-only view of one piece, for renderers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PieceView {
    pub pos: Vec2,
    pub radius: f32,
    pub tier: TierId,
    pub rotation: f32,
}

impl From<&Piece> for PieceView {
    fn from(piece: &Piece) -> Self {
        Self {
            pos: piece.pos,
            radius: piece.radius,
            tier: piece.tier,
            rotation: piece.rotation,
        }
    }
}

/// Serializable picture of a session between ticks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub score: u64,
    pub game_over: bool,
    pub next_tier: TierId,
    pub pieces: Vec<PieceView>,
}

/// One game, from first drop to game over (and again after each reset)
#[derive(Debug, Clone)]
pub struct Session {
    config: GameConfig,
    world: World,
    spawner: Spawner,
    score: u64,
    tick_count: u64,
}

impl Session {
    /// Validate `config` and start an empty session. The seed drives spawns.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;

        let world = World::new(&config);
        let spawner = Spawner::new(seed, config.effective_spawn_tiers(), config.spawn.height);
        log::info!(
            "Session started: well {}x{}, {} tiers, seed {}",
            config.well.width,
            config.well.height,
            config.catalog.len(),
            seed
        );

        Ok(Self {
            config,
            world,
            spawner,
            score: 0,
            tick_count: 0,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn catalog(&self) -> &TierCatalog {
        self.world.catalog()
    }

    pub fn well(&self) -> &Well {
        self.world.well()
    }

    /// Tier the next drop will spawn
    pub fn spawn_preview(&self) -> TierId {
        self.spawner.announced()
    }

    /// Drop the announced tier at horizontal offset `x`.
    /// Refused once the game is over.
    pub fn drop(&mut self, x: f32) -> Option<PieceId> {
        if self.world.is_game_over() {
            return None;
        }
        Some(self.spawner.drop(&mut self.world, x))
    }

    /// Advance the simulation one step
    pub fn tick(&mut self) -> TickReport {
        if self.world.is_game_over() {
            return TickReport {
                game_over: true,
                ..Default::default()
            };
        }

        self.tick_count += 1;
        let step = self.world.advance();

        let report = TickReport {
            merges: step.merges,
            discarded: step.discarded,
            game_over: step.game_over,
        };
        self.score += report.score_delta();

        if report.game_over {
            log::info!(
                "Game over after {} ticks with score {}",
                self.tick_count,
                self.score
            );
        }
        report
    }

    pub fn pieces(&self) -> &[Piece] {
        self.world.pieces()
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn is_game_over(&self) -> bool {
        self.world.is_game_over()
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Clear pieces, score and terminal state; announce a fresh next tier
    pub fn reset(&mut self) {
        self.world.reset();
        self.score = 0;
        self.tick_count = 0;
        self.spawner.roll();
        log::info!("Session reset");
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tick: self.tick_count,
            score: self.score,
            game_over: self.is_game_over(),
            next_tier: self.spawn_preview(),
            pieces: self.pieces().iter().map(PieceView::from).collect(),
        }
    }
}
