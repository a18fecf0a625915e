//! Per-frame physics
//!
//! Advances every ball by its velocity and reflects at the container walls.
//! Reflection is exact: the position clamps to the wall and the velocity
//! component flips sign with its magnitude preserved. No damping.

use super::state::{Ball, Bounds, GamePhase, GameState};

/// Advance all balls by one animation frame. Gated on the Running phase so a
/// paused or ended round freezes in place.
pub fn step(state: &mut GameState, bounds: Bounds) {
    if state.phase != GamePhase::Running {
        return;
    }
    for ball in &mut state.balls {
        advance(ball, bounds);
    }
}

/// Move one ball and bounce it off the walls
fn advance(ball: &mut Ball, bounds: Bounds) {
    ball.pos += ball.vel;

    let max_x = Ball::max_coord(bounds.width, ball.size);
    let max_y = Ball::max_coord(bounds.height, ball.size);

    let (x, dx) = reflect_axis(ball.pos.x, ball.vel.x, max_x);
    let (y, dy) = reflect_axis(ball.pos.y, ball.vel.y, max_y);
    ball.pos.x = x;
    ball.vel.x = dx;
    ball.pos.y = y;
    ball.vel.y = dy;
}

/// Reflect one axis against [0, max]
fn reflect_axis(pos: f32, vel: f32, max: f32) -> (f32, f32) {
    if pos < 0.0 {
        (0.0, -vel)
    } else if pos > max {
        (max, -vel)
    } else {
        (pos, vel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::difficulty::ViewportClass;
    use glam::Vec2;
    use proptest::prelude::*;

    const BOUNDS: Bounds = Bounds {
        width: 400.0,
        height: 300.0,
    };

    fn ball(pos: Vec2, vel: Vec2, size: f32) -> Ball {
        Ball {
            id: 0,
            pos,
            vel,
            size,
            point_value: 1,
        }
    }

    #[test]
    fn test_free_movement() {
        let mut b = ball(Vec2::new(100.0, 100.0), Vec2::new(3.0, -2.0), 80.0);
        advance(&mut b, BOUNDS);
        assert_eq!(b.pos, Vec2::new(103.0, 98.0));
        assert_eq!(b.vel, Vec2::new(3.0, -2.0));
    }

    #[test]
    fn test_reflect_left_wall() {
        let mut b = ball(Vec2::new(2.0, 100.0), Vec2::new(-5.0, 0.0), 80.0);
        advance(&mut b, BOUNDS);
        assert_eq!(b.pos.x, 0.0);
        assert_eq!(b.vel.x, 5.0);
    }

    #[test]
    fn test_reflect_right_wall_clamps_to_extent() {
        // Right bound is width - size = 320
        let mut b = ball(Vec2::new(318.0, 100.0), Vec2::new(5.0, 0.0), 80.0);
        advance(&mut b, BOUNDS);
        assert_eq!(b.pos.x, 320.0);
        assert_eq!(b.vel.x, -5.0);
    }

    #[test]
    fn test_reflect_bottom_wall() {
        // Bottom bound is height - size = 220
        let mut b = ball(Vec2::new(100.0, 219.0), Vec2::new(0.0, 4.0), 80.0);
        advance(&mut b, BOUNDS);
        assert_eq!(b.pos.y, 220.0);
        assert_eq!(b.vel.y, -4.0);
    }

    #[test]
    fn test_container_smaller_than_ball_pins_to_origin() {
        let tiny = Bounds::new(50.0, 50.0);
        let mut b = ball(Vec2::new(10.0, 10.0), Vec2::new(8.0, 8.0), 80.0);
        advance(&mut b, tiny);
        assert_eq!(b.pos, Vec2::ZERO);
        assert_eq!(b.vel, Vec2::new(-8.0, -8.0));
    }

    #[test]
    fn test_step_gated_on_running() {
        let mut state = GameState::new(7, 2, ViewportClass::Regular, 0, BOUNDS);
        let before: Vec<_> = state.balls.iter().map(|b| b.pos).collect();

        // Ready: frozen
        step(&mut state, BOUNDS);
        let after: Vec<_> = state.balls.iter().map(|b| b.pos).collect();
        assert_eq!(before, after);

        // Running: moves (all balls in this seed have nonzero velocity)
        state.start_or_resume(BOUNDS);
        step(&mut state, BOUNDS);
        let moved: Vec<_> = state.balls.iter().map(|b| b.pos).collect();
        assert_ne!(before, moved);

        // Paused: frozen again
        state.pause();
        step(&mut state, BOUNDS);
        let frozen: Vec<_> = state.balls.iter().map(|b| b.pos).collect();
        assert_eq!(moved, frozen);
    }

    proptest! {
        #[test]
        fn step_keeps_balls_in_bounds(
            x in 0.0f32..320.0,
            y in 0.0f32..220.0,
            dx in -20.0f32..20.0,
            dy in -20.0f32..20.0,
        ) {
            let mut b = ball(Vec2::new(x, y), Vec2::new(dx, dy), 80.0);
            advance(&mut b, BOUNDS);
            prop_assert!(b.pos.x >= 0.0 && b.pos.x <= 320.0);
            prop_assert!(b.pos.y >= 0.0 && b.pos.y <= 220.0);
            // Reflection never changes speed, only sign
            prop_assert_eq!(b.vel.x.abs(), dx.abs());
            prop_assert_eq!(b.vel.y.abs(), dy.abs());
        }
    }
}
