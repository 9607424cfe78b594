//! Simulation world: owns the live pieces and advances them one tick at a time
//!
//! Resolution runs over a snapshot of the piece list taken at the start of
//! the tick. Removals are recorded in a tombstone mask and merge results are
//! buffered, then both are applied once the pass is over. Positions in the
//! list therefore never shift mid-pass, and a consumed piece is skipped by
//! every later pair check.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{bounce, merge_point, piece_contact};
use super::piece::{Piece, PieceId};
use super::tier::{TierCatalog, TierId};
use crate::config::{GameConfig, PhysicsParams, Well};

/// Two same-tier pieces became one piece of the next tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeEvent {
    /// Tier of both consumed pieces
    pub consumed: TierId,
    /// Tier of the piece that replaced them
    pub produced: TierId,
    pub consumed_ids: [PieceId; 2],
    pub produced_id: PieceId,
    /// Where the new piece was created
    pub position: Vec2,
    /// Points awarded for this merge
    pub score_delta: u64,
}

/// Everything that happened during one [`World::advance`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorldStep {
    pub merges: Vec<MergeEvent>,
    /// Stray pieces discarded below the floor
    pub discarded: Vec<PieceId>,
    /// World is (or just became) terminal
    pub game_over: bool,
}

/// The well and everything in it
#[derive(Debug, Clone)]
pub struct World {
    well: Well,
    physics: PhysicsParams,
    catalog: TierCatalog,
    cleanup_margin: f32,
    /// Live pieces in creation order
    pieces: Vec<Piece>,
    game_over: bool,
    next_id: u32,
}

impl World {
    /// Build an empty world. The config is expected to be validated already.
    pub fn new(config: &GameConfig) -> Self {
        Self {
            well: config.well,
            physics: config.physics,
            catalog: config.catalog.clone(),
            cleanup_margin: config.cleanup_margin,
            pieces: Vec::new(),
            game_over: false,
            next_id: 1,
        }
    }

    pub fn well(&self) -> &Well {
        &self.well
    }

    pub fn catalog(&self) -> &TierCatalog {
        &self.catalog
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    fn next_piece_id(&mut self) -> PieceId {
        let id = PieceId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add a resting piece of `tier` centered at `pos`
    pub fn insert_piece(&mut self, pos: Vec2, tier: TierId) -> PieceId {
        debug_assert!(self.catalog.contains(tier), "tier {tier:?} not in catalog");
        let id = self.next_piece_id();
        let radius = self.catalog.get(tier).radius;
        self.pieces.push(Piece::new(id, pos, radius, tier));
        id
    }

    /// Drop all pieces and leave the terminal state
    pub fn reset(&mut self) {
        self.pieces.clear();
        self.game_over = false;
    }

    /// Advance the world by one tick.
    ///
    /// Pieces are visited newest first. Each is integrated, checked against the
    /// top and bottom bounds, then tested against the pieces after it in the
    /// list. The first overlap found either merges the pair or bounces it, and
    /// ends that piece's scan. A piece above the top ends the whole pass and
    /// makes the world terminal; merges resolved before that point still stand.
    pub fn advance(&mut self) -> WorldStep {
        let mut step = WorldStep::default();
        if self.game_over {
            step.game_over = true;
            return step;
        }

        let count = self.pieces.len();
        let mut removed = vec![false; count];
        let mut created: Vec<Piece> = Vec::new();

        for i in (0..count).rev() {
            if removed[i] {
                continue;
            }

            if self.pieces[i].out_of_bounds(&self.well, self.cleanup_margin) {
                log::trace!("Discarding stray piece {:?}", self.pieces[i].id);
                removed[i] = true;
                step.discarded.push(self.pieces[i].id);
                continue;
            }

            self.pieces[i].advance(&self.physics, &self.well);

            if self.pieces[i].above_top() {
                log::info!(
                    "Piece {:?} settled above the well at y={:.1}",
                    self.pieces[i].id,
                    self.pieces[i].pos.y
                );
                self.game_over = true;
                break;
            }

            for j in (i + 1)..count {
                if removed[j] {
                    continue;
                }

                let (head, tail) = self.pieces.split_at_mut(j);
                let a = &mut head[i];
                let b = &mut tail[0];

                if piece_contact(a, b).is_none() {
                    continue;
                }

                let successor = if a.tier == b.tier {
                    self.catalog.successor(a.tier)
                } else {
                    None
                };

                match successor {
                    Some(next) => {
                        removed[i] = true;
                        removed[j] = true;

                        let midpoint = merge_point(a, b);
                        let consumed_ids = [a.id, b.id];
                        let consumed = a.tier;
                        let score_delta = u64::from(self.catalog.get(a.tier).score)
                            + u64::from(self.catalog.get(b.tier).score);

                        // `a` and `b` are done with, so `self` is free again
                        let id = self.next_piece_id();
                        let mut merged =
                            Piece::new(id, midpoint, self.catalog.get(next).radius, next);
                        // The bigger radius may poke through a wall or the floor
                        merged.contain(&self.well);
                        let position = merged.pos;
                        created.push(merged);

                        log::debug!(
                            "Merged {:?}+{:?} ({}) into {:?} ({}) at ({:.1}, {:.1}) for {} points",
                            consumed_ids[0],
                            consumed_ids[1],
                            self.catalog.get(consumed).name,
                            id,
                            self.catalog.get(next).name,
                            position.x,
                            position.y,
                            score_delta
                        );

                        step.merges.push(MergeEvent {
                            consumed,
                            produced: next,
                            consumed_ids,
                            produced_id: id,
                            position,
                            score_delta,
                        });
                    }
                    // Different tiers, or two terminal pieces
                    None => {
                        bounce(a, b, self.physics.restitution);
                        a.contain(&self.well);
                        b.contain(&self.well);
                    }
                }
                break;
            }
        }

        let mut index = 0;
        self.pieces.retain(|_| {
            let keep = !removed[index];
            index += 1;
            keep
        });
        self.pieces.extend(created);

        step.game_over = self.game_over;
        step
    }
}
