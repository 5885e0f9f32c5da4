//! Collision detection and response for circles against rectangles
//!
//! Both the paddle and the bricks use the same closest-point test: clamp the
//! ball center onto the rectangle and compare the distance with the radius.

use glam::Vec2;

use super::rect::Rect;

/// Which part of a rectangle the contact point landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Exactly on the left or right x-edge
    Side,
    /// Anywhere else (top, bottom, or the interior)
    Face,
}

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Closest point on the rectangle to the ball center
    pub point: Vec2,
    /// Edge classification of `point` (x-edge wins ties at corners)
    pub edge: Edge,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            point: Vec2::ZERO,
            edge: Edge::Face,
        }
    }
}

/// Check collision between a ball and an axis-aligned rectangle
///
/// Collides when the distance from the ball center to the closest point on
/// the rectangle is at most `ball_radius`.
pub fn ball_rect_collision(ball_pos: Vec2, ball_radius: f32, rect: &Rect) -> CollisionResult {
    let point = rect.closest_point(ball_pos);
    if ball_pos.distance(point) > ball_radius {
        return CollisionResult::miss();
    }

    let edge = if point.x == rect.left() || point.x == rect.right() {
        Edge::Side
    } else {
        Edge::Face
    };

    CollisionResult {
        hit: true,
        point,
        edge,
    }
}

/// Flip the horizontal component
#[inline]
pub fn reflect_x(velocity: Vec2) -> Vec2 {
    Vec2::new(-velocity.x, velocity.y)
}

/// Flip the vertical component
#[inline]
pub fn reflect_y(velocity: Vec2) -> Vec2 {
    Vec2::new(velocity.x, -velocity.y)
}

/// Bounce off a brick: side hits flip dx, everything else flips dy
pub fn brick_bounce(velocity: Vec2, edge: Edge) -> Vec2 {
    match edge {
        Edge::Side => reflect_x(velocity),
        Edge::Face => reflect_y(velocity),
    }
}

/// Bounce off the paddle
///
/// Side hits flip dx. Otherwise the outgoing angle depends on where along the
/// paddle the ball landed: the left end sends it left, the right end sends it
/// right. The ball always leaves upward and the result is renormalized to
/// `speed`.
pub fn paddle_bounce(velocity: Vec2, speed: f32, contact: &CollisionResult, paddle: &Rect) -> Vec2 {
    match contact.edge {
        Edge::Side => reflect_x(velocity),
        Edge::Face => {
            let hit_pos = (contact.point.x - paddle.left()) / paddle.width;
            let angle = hit_pos * 2.0 - 1.0; // -1 (left) to 1 (right)
            let bounced = Vec2::new(angle * speed, -velocity.y.abs());
            bounced.normalize_or(Vec2::NEG_Y) * speed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn paddle() -> Rect {
        Rect::new(350.0, 550.0, 100.0, 20.0)
    }

    #[test]
    fn test_ball_above_paddle_hits_face() {
        let result = ball_rect_collision(Vec2::new(400.0, 541.0), 10.0, &paddle());
        assert!(result.hit);
        assert_eq!(result.edge, Edge::Face);
        assert_eq!(result.point, Vec2::new(400.0, 550.0));
    }

    #[test]
    fn test_ball_out_of_reach_misses() {
        let result = ball_rect_collision(Vec2::new(400.0, 530.0), 10.0, &paddle());
        assert!(!result.hit);
    }

    #[test]
    fn test_distance_equal_to_radius_is_a_hit() {
        let result = ball_rect_collision(Vec2::new(400.0, 540.0), 10.0, &paddle());
        assert!(result.hit);
    }

    #[test]
    fn test_side_hit_detected() {
        let result = ball_rect_collision(Vec2::new(345.0, 560.0), 10.0, &paddle());
        assert!(result.hit);
        assert_eq!(result.edge, Edge::Side);
    }

    #[test]
    fn test_corner_prefers_x_edge() {
        // Diagonally off the top-left corner: closest point is the corner itself
        let result = ball_rect_collision(Vec2::new(345.0, 545.0), 10.0, &paddle());
        assert!(result.hit);
        assert_eq!(result.point, Vec2::new(350.0, 550.0));
        assert_eq!(result.edge, Edge::Side);
    }

    #[test]
    fn test_brick_bounce() {
        let v = Vec2::new(3.0, -4.0);
        assert_eq!(brick_bounce(v, Edge::Side), Vec2::new(-3.0, -4.0));
        assert_eq!(brick_bounce(v, Edge::Face), Vec2::new(3.0, 4.0));
    }

    #[test]
    fn test_paddle_center_hit_goes_straight_up() {
        let p = paddle();
        let contact = ball_rect_collision(Vec2::new(400.0, 545.0), 10.0, &p);
        let v = paddle_bounce(Vec2::new(3.0, 4.0), 5.0, &contact, &p);
        assert!(v.x.abs() < 1e-5);
        assert!((v.y + 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_paddle_left_half_sends_ball_left() {
        let p = paddle();
        let contact = ball_rect_collision(Vec2::new(360.0, 545.0), 10.0, &p);
        let v = paddle_bounce(Vec2::new(3.0, 4.0), 5.0, &contact, &p);
        assert!(v.x < 0.0);
        assert!(v.y < 0.0);
    }

    #[test]
    fn test_paddle_side_hit_flips_dx_only() {
        let p = paddle();
        let contact = ball_rect_collision(Vec2::new(455.0, 560.0), 10.0, &p);
        let v = paddle_bounce(Vec2::new(-3.0, 4.0), 5.0, &contact, &p);
        assert_eq!(v, Vec2::new(3.0, 4.0));
    }

    proptest! {
        #[test]
        fn prop_brick_bounce_preserves_speed(
            dx in -10.0f32..10.0,
            dy in -10.0f32..10.0,
            side in any::<bool>(),
        ) {
            let v = Vec2::new(dx, dy);
            let edge = if side { Edge::Side } else { Edge::Face };
            let bounced = brick_bounce(v, edge);
            prop_assert!((bounced.length() - v.length()).abs() < 1e-4);
        }

        #[test]
        fn prop_paddle_face_bounce_has_ball_speed_and_goes_up(
            x in 350.5f32..449.5,
            dx in -8.0f32..8.0,
            dy in 0.5f32..8.0,
            speed in 1.0f32..12.0,
        ) {
            let p = paddle();
            let contact = ball_rect_collision(Vec2::new(x, 545.0), 10.0, &p);
            prop_assume!(contact.hit && contact.edge == Edge::Face);
            let v = paddle_bounce(Vec2::new(dx, dy), speed, &contact, &p);
            prop_assert!((v.length() - speed).abs() < 1e-3);
            prop_assert!(v.y < 0.0);
        }
    }
}
