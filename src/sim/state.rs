//! Round state machine and ball entities
//!
//! `GameState` owns everything mutable about a session. Its transition
//! methods are the only mutation entry points. A transition attempted from an
//! incompatible phase is silently ignored: stale button input is expected,
//! not an error.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::{BOOST_FACTOR, DEFAULT_POINT_VALUE};
use crate::difficulty::{Difficulty, DifficultyProfile, ViewportClass, profile_for};

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Waiting for the first start
    Ready,
    /// Round in progress
    Running,
    /// Round frozen mid-flight
    Paused,
    /// Timer ran out
    Ended,
}

/// Container dimensions in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Something the harness should react to (sound, persistence, overlay)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A target was clicked while running
    BallPopped { points: u32 },
    /// The session high score increased
    NewHighScore { score: u32 },
    /// The round timer expired
    RoundEnded { score: u32, difficulty: Difficulty },
}

/// A bouncing target
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub id: u32,
    /// Top-left corner, container-local px
    pub pos: Vec2,
    /// px per animation frame
    pub vel: Vec2,
    /// Diameter in px
    pub size: f32,
    /// Score awarded per click
    pub point_value: u32,
}

impl Ball {
    fn new(id: u32) -> Self {
        Self {
            id,
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            size: 0.0,
            point_value: DEFAULT_POINT_VALUE,
        }
    }

    /// Largest legal coordinate on one axis. Containers smaller than the
    /// ball clamp to 0 so positions never go negative.
    pub fn max_coord(extent: f32, size: f32) -> f32 {
        (extent - size).max(0.0)
    }

    /// Resample position and velocity for a fresh round
    fn respawn(
        &mut self,
        bounds: Bounds,
        profile: &DifficultyProfile,
        viewport: ViewportClass,
        rng: &mut Pcg32,
    ) {
        self.size = profile.size(viewport);
        let max_x = Self::max_coord(bounds.width, self.size);
        let max_y = Self::max_coord(bounds.height, self.size);
        self.pos = Vec2::new(sample_coord(max_x, rng), sample_coord(max_y, rng));
        self.vel = sample_velocity(profile.speed, rng);
    }

    /// One-shot velocity resample at boosted speed, rewarding a click
    fn boost(&mut self, speed: f32, rng: &mut Pcg32) {
        self.vel = sample_velocity(speed * BOOST_FACTOR, rng);
    }
}

/// Uniform coordinate in [0, max). Degenerate ranges pin to 0.
fn sample_coord(max: f32, rng: &mut Pcg32) -> f32 {
    if max > 0.0 { rng.random_range(0.0..max) } else { 0.0 }
}

/// Uniform per-axis velocity in [-speed, speed). Zero velocity is a legal,
/// if inert, outcome.
fn sample_velocity(speed: f32, rng: &mut Pcg32) -> Vec2 {
    if speed <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(
        rng.random_range(-speed..speed),
        rng.random_range(-speed..speed),
    )
}

/// Everything mutable about a session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub balls: Vec<Ball>,
    pub score: u32,
    /// Authoritative for the session even when persistence fails
    pub high_score: u32,
    pub difficulty: Difficulty,
    pub viewport: ViewportClass,
    /// Seconds remaining in the round
    pub time_left: u32,
    pub phase: GamePhase,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a session with `ball_count` targets spawned into `bounds`
    pub fn new(
        seed: u64,
        ball_count: usize,
        viewport: ViewportClass,
        high_score: u32,
        bounds: Bounds,
    ) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            balls: (0..ball_count).map(|i| Ball::new(i as u32)).collect(),
            score: 0,
            high_score,
            difficulty: Difficulty::default(),
            viewport,
            time_left: 0,
            phase: GamePhase::Ready,
            events: Vec::new(),
        };
        state.time_left = state.profile().duration_secs;
        state.respawn_balls(bounds);
        state
    }

    /// Profile for the active difficulty
    pub fn profile(&self) -> DifficultyProfile {
        profile_for(self.difficulty)
    }

    fn respawn_balls(&mut self, bounds: Bounds) {
        let profile = self.profile();
        for ball in &mut self.balls {
            ball.respawn(bounds, &profile, self.viewport, &mut self.rng);
        }
    }

    /// Reset score, clock and targets without leaving the current phase
    fn reset_round(&mut self, bounds: Bounds) {
        self.score = 0;
        self.time_left = self.profile().duration_secs;
        self.respawn_balls(bounds);
    }

    /// Start a new round or resume a paused one. From Ended the previous
    /// round's score and clock are discarded first. No-op while Running.
    pub fn start_or_resume(&mut self, bounds: Bounds) {
        match self.phase {
            GamePhase::Ready | GamePhase::Paused => self.phase = GamePhase::Running,
            GamePhase::Ended => {
                self.reset_round(bounds);
                self.phase = GamePhase::Running;
            }
            GamePhase::Running => {}
        }
    }

    /// Freeze a running round. No-op in any other phase.
    pub fn pause(&mut self) {
        if self.phase == GamePhase::Running {
            self.phase = GamePhase::Paused;
        }
    }

    /// Abandon the current round and return to Ready. Valid from any phase.
    pub fn new_game(&mut self, bounds: Bounds) {
        self.reset_round(bounds);
        self.phase = GamePhase::Ready;
    }

    /// Switch difficulty. Always resets score, clock and targets; a running
    /// round is invalidated and drops back to Ready.
    pub fn change_difficulty(&mut self, difficulty: Difficulty, bounds: Bounds) {
        self.difficulty = difficulty;
        self.reset_round(bounds);
        if self.phase == GamePhase::Running {
            self.phase = GamePhase::Ready;
        }
    }

    /// One second elapsed. Returns true when this tick ended the round so
    /// the caller can drop its interval handle. Ignored unless Running.
    pub fn on_timer_tick(&mut self) -> bool {
        if self.phase != GamePhase::Running {
            return false;
        }
        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left == 0 {
            self.phase = GamePhase::Ended;
            self.events.push(GameEvent::RoundEnded {
                score: self.score,
                difficulty: self.difficulty,
            });
            return true;
        }
        false
    }

    /// A target was clicked: score it, track the high score, boost the ball.
    /// Ignored unless Running or when the index is stale.
    pub fn on_ball_clicked(&mut self, index: usize) {
        if self.phase != GamePhase::Running {
            return;
        }
        let speed = self.profile().speed;
        let Some(ball) = self.balls.get_mut(index) else {
            return;
        };
        let points = ball.point_value;
        ball.boost(speed, &mut self.rng);

        self.score += points;
        self.events.push(GameEvent::BallPopped { points });
        if self.score > self.high_score {
            self.high_score = self.score;
            self.events.push(GameEvent::NewHighScore { score: self.score });
        }
    }

    /// Reclassify the viewport and re-derive target sizes in place.
    /// Positions are left alone; the next step re-clamps against the new
    /// extents.
    pub fn set_viewport(&mut self, viewport: ViewportClass) {
        if self.viewport == viewport {
            return;
        }
        self.viewport = viewport;
        let profile = self.profile();
        for ball in &mut self.balls {
            ball.size = profile.size(viewport);
        }
    }

    /// Drop the session high score floor after the persisted value is wiped.
    /// The current round still counts.
    pub fn reset_high_score(&mut self) {
        self.high_score = self.score;
    }

    /// Drain queued events for the harness
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
