//! Piece entity and per-tick kinematics

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::tier::TierId;
use crate::config::{PhysicsParams, Well};

/// Opaque, never-reused identity of a live piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PieceId(pub(crate) u32);

impl PieceId {
    pub fn raw(self) -> u32 {
        self.0
    }
}

/// A fruit in the well
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub tier: TierId,
    /// Cosmetic only
    pub rotation: f32,
}

impl Piece {
    /// Create a piece at rest
    pub fn new(id: PieceId, pos: Vec2, radius: f32, tier: TierId) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            radius,
            tier,
            rotation: 0.0,
        }
    }

    /// Integrate one tick and resolve wall/floor containment.
    ///
    /// Order matters: gravity, position, air friction, side walls, floor, spin.
    /// Floor contact damps `vel.x` a second time. There is no ceiling.
    pub fn advance(&mut self, physics: &PhysicsParams, well: &Well) {
        self.vel.y += physics.gravity;
        self.pos += self.vel;
        self.vel.x *= physics.friction;

        if self.pos.x - self.radius < 0.0 {
            self.pos.x = self.radius;
            self.vel.x *= -physics.restitution;
        }
        if self.pos.x + self.radius > well.width {
            self.pos.x = well.width - self.radius;
            self.vel.x *= -physics.restitution;
        }

        if self.pos.y + self.radius > well.height {
            self.pos.y = well.height - self.radius;
            self.vel.y *= -physics.restitution;
            self.vel.x *= physics.friction;
        }

        self.rotation += physics.rotation_step;
    }

    /// Clamp position back inside the side walls and above the floor.
    /// Velocity is left alone; this only undoes a push from collision response.
    pub fn contain(&mut self, well: &Well) {
        let right = (well.width - self.radius).max(self.radius);
        self.pos.x = self.pos.x.clamp(self.radius, right);
        if self.pos.y + self.radius > well.height {
            self.pos.y = well.height - self.radius;
        }
    }

    /// Center has risen above the top of the well
    #[inline]
    pub fn above_top(&self) -> bool {
        self.pos.y < 0.0
    }

    /// Center has fallen further than `margin` below the floor
    #[inline]
    pub fn out_of_bounds(&self, well: &Well, margin: f32) -> bool {
        self.pos.y > well.height + margin
    }
}
