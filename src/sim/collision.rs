//! Piece-to-piece collision detection and response
//!
//! Pieces are plain circles. Detection is a strict overlap test on center
//! distance; response is a positional push-apart followed by a damped
//! velocity swap. The swap is intentionally not momentum-conserving.

use glam::Vec2;

use super::piece::Piece;

/// Separation direction used when two centers coincide exactly
pub const FALLBACK_NORMAL: Vec2 = Vec2::X;

/// Result of a collision check between two circles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit vector pointing from the second piece's center toward the first's
    pub normal: Vec2,
    /// Sum of radii minus center distance (always > 0 for a contact)
    pub penetration: f32,
}

/// Overlap test for two circles: touching exactly does not count
#[inline]
pub fn circles_overlap(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> bool {
    a_pos.distance(b_pos) < a_radius + b_radius
}

/// Contact between two pieces, if they overlap
pub fn piece_contact(a: &Piece, b: &Piece) -> Option<Contact> {
    let delta = a.pos - b.pos;
    let distance = delta.length();
    let reach = a.radius + b.radius;

    if distance >= reach {
        return None;
    }

    let normal = if distance > 0.0 {
        delta / distance
    } else {
        FALLBACK_NORMAL
    };

    Some(Contact {
        normal,
        penetration: reach - distance,
    })
}

/// Push two overlapping pieces apart and exchange their damped velocities.
///
/// Each piece moves half the penetration along the contact normal. Returns
/// `false` (and leaves both untouched) if they do not actually overlap.
pub fn bounce(a: &mut Piece, b: &mut Piece, restitution: f32) -> bool {
    let Some(contact) = piece_contact(a, b) else {
        return false;
    };

    let push = contact.normal * (contact.penetration / 2.0);
    a.pos += push;
    b.pos -= push;

    let a_vel = a.vel;
    a.vel = b.vel * restitution;
    b.vel = a_vel * restitution;

    true
}

/// Midpoint of two piece centers, where a merge result appears
#[inline]
pub fn merge_point(a: &Piece, b: &Piece) -> Vec2 {
    (a.pos + b.pos) * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::piece::PieceId;
    use crate::sim::tier::TierId;

    fn piece(id: u32, x: f32, y: f32, radius: f32) -> Piece {
        Piece::new(PieceId(id), Vec2::new(x, y), radius, TierId(0))
    }

    #[test]
    fn test_overlap_is_strict() {
        assert!(circles_overlap(Vec2::ZERO, 10.0, Vec2::new(19.9, 0.0), 10.0));
        assert!(!circles_overlap(Vec2::ZERO, 10.0, Vec2::new(20.0, 0.0), 10.0));
        assert!(!circles_overlap(Vec2::ZERO, 10.0, Vec2::new(30.0, 0.0), 10.0));
    }

    #[test]
    fn test_contact_normal_points_from_b_to_a() {
        let a = piece(1, 10.0, 0.0, 10.0);
        let b = piece(2, 0.0, 0.0, 10.0);
        let contact = piece_contact(&a, &b).unwrap();
        assert_eq!(contact.normal, Vec2::X);
        assert!((contact.penetration - 10.0).abs() < 1e-5);

        assert!(piece_contact(&piece(1, 0.0, 0.0, 5.0), &piece(2, 50.0, 0.0, 5.0)).is_none());
    }

    #[test]
    fn test_bounce_separates_symmetrically() {
        let mut a = piece(1, 10.0, 0.0, 10.0);
        let mut b = piece(2, 0.0, 0.0, 10.0);

        assert!(bounce(&mut a, &mut b, 0.7));
        assert!((a.pos.x - 15.0).abs() < 1e-5);
        assert!((b.pos.x + 5.0).abs() < 1e-5);
        assert!((a.pos.distance(b.pos) - 20.0).abs() < 1e-4);
    }

    #[test]
    fn test_bounce_swaps_damped_velocities() {
        let mut a = piece(1, 0.0, 0.0, 10.0);
        let mut b = piece(2, 0.0, 15.0, 10.0);
        a.vel = Vec2::new(0.0, 4.0);
        b.vel = Vec2::new(1.0, -2.0);

        bounce(&mut a, &mut b, 0.5);
        assert_eq!(a.vel, Vec2::new(0.5, -1.0));
        assert_eq!(b.vel, Vec2::new(0.0, 2.0));
    }

    #[test]
    fn test_coincident_centers_use_fallback_direction() {
        let mut a = piece(1, 50.0, 50.0, 10.0);
        let mut b = piece(2, 50.0, 50.0, 10.0);

        assert!(bounce(&mut a, &mut b, 0.7));
        assert!(a.pos.is_finite() && b.pos.is_finite());
        assert_eq!(a.pos, Vec2::new(60.0, 50.0));
        assert_eq!(b.pos, Vec2::new(40.0, 50.0));
    }

    #[test]
    fn test_bounce_ignores_separated_pieces() {
        let mut a = piece(1, 0.0, 0.0, 10.0);
        let mut b = piece(2, 100.0, 0.0, 10.0);
        a.vel = Vec2::X;

        assert!(!bounce(&mut a, &mut b, 0.7));
        assert_eq!(a.vel, Vec2::X);
        assert_eq!(b.pos, Vec2::new(100.0, 0.0));
    }

    #[test]
    fn test_merge_point_is_midpoint() {
        let a = piece(1, 100.0, 200.0, 10.0);
        let b = piece(2, 110.0, 200.0, 10.0);
        assert_eq!(merge_point(&a, &b), Vec2::new(105.0, 200.0));
    }
}
