//! World state and core simulation types
//!
//! One `GameState` is one run. It is built fresh at every start and replaced
//! wholesale on the next, never patched back into shape.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::level::Level;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first start input
    Menu,
    /// Run active (man in the cannon or airborne, see `Man::flying`)
    Flying,
    /// Man came to rest, score is final
    Finished,
}

/// Something that happened during a tick or a session action
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    RunStarted { obstacles: usize, boost_pads: usize },
    Launched { vel: Vec2 },
    GroundBounce { vy: f32 },
    ObstacleHit { index: usize },
    BoostPadUsed { index: usize },
    CameToRest,
    RunFinished { score: u64, distance: u32, new_best: bool },
    MenuRevealed,
}

/// Axis-aligned rectangle, top-left origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Point inside (or on the edge of) the rectangle closest to `p`
    #[inline]
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        Vec2::new(p.x.clamp(self.x, self.right()), p.y.clamp(self.y, self.bottom()))
    }
}

/// The cannon. Fixed for the whole run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cannon {
    /// Barrel pivot
    pub pos: Vec2,
    /// Radians above horizontal
    pub angle: f32,
    /// Launch speed in pixels per tick
    pub power: f32,
}

impl Cannon {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(CANNON_X, CANNON_Y),
            angle: tuning.cannon_angle,
            power: tuning.cannon_power,
        }
    }

    /// Where the man waits before launch
    pub fn muzzle(&self) -> Vec2 {
        self.pos + Vec2::new(self.angle.cos(), -self.angle.sin()) * MUZZLE_LENGTH
    }

    /// Initial velocity handed to the man (screen y grows downward)
    pub fn launch_velocity(&self) -> Vec2 {
        Vec2::new(self.angle.cos(), -self.angle.sin()) * self.power
    }
}

/// The projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Man {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// False while still sitting in the cannon
    pub flying: bool,
    /// Visual spin only, no physical effect
    pub rotation: f32,
    /// Best horizontal progress from the cannon, never decreases
    pub distance: u32,
    pub color: u32,
}

impl Man {
    /// A man loaded into the cannon
    pub fn in_cannon(cannon: &Cannon) -> Self {
        let pos = cannon.muzzle();
        Self {
            pos,
            vel: Vec2::ZERO,
            radius: MAN_RADIUS,
            flying: false,
            rotation: 0.0,
            distance: progress(pos.x, cannon.pos.x),
            color: MAN_COLOR,
        }
    }

    /// Fire from the cannon. Returns false if already airborne.
    pub fn launch(&mut self, cannon: &Cannon) -> bool {
        if self.flying {
            return false;
        }
        self.flying = true;
        self.vel = cannon.launch_velocity();
        true
    }

    /// Raise `distance` to the current progress if it is further
    pub fn record_progress(&mut self, cannon_x: f32) {
        self.distance = self.distance.max(progress(self.pos.x, cannon_x));
    }
}

/// Whole pixels travelled past the cannon, saturating at zero
fn progress(x: f32, cannon_x: f32) -> u32 {
    (x - cannon_x).floor().max(0.0) as u32
}

/// Score for a horizontal position (one point per 10 px), saturating at zero
pub fn score_for(x: f32) -> u64 {
    (x / 10.0).floor().max(0.0) as u64
}

/// A solid block that knocks the man upward
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub rect: Rect,
    pub color: u32,
}

/// A one-shot speed boost
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoostPad {
    pub rect: Rect,
    pub color: u32,
    /// Set on first contact; a used pad never fires again this run
    pub used: bool,
}

/// Complete state of one run (serializable snapshot)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    pub tuning: Tuning,
    pub cannon: Cannon,
    pub man: Man,
    /// Sorted by x
    pub obstacles: Vec<Obstacle>,
    /// Sorted by x
    pub boost_pads: Vec<BoostPad>,
    /// Camera offset, never negative
    pub scroll_x: f32,
    pub score: u64,
    pub ground_y: f32,
    /// Ticks simulated this run
    pub time_ticks: u64,
    /// Events since the last drain (not part of the snapshot)
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Build a run around a generated level. Starts in `Menu`; the session
    /// moves it to `Flying` when the player starts.
    pub fn new(tuning: Tuning, level: Level) -> Self {
        let cannon = Cannon::new(&tuning);
        let man = Man::in_cannon(&cannon);
        Self {
            phase: GamePhase::Menu,
            tuning,
            cannon,
            man,
            obstacles: level.obstacles,
            boost_pads: level.boost_pads,
            scroll_x: 0.0,
            score: 0,
            ground_y: GROUND_Y,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    /// True while the man is loaded and waiting for the launch input
    pub fn awaiting_launch(&self) -> bool {
        self.phase == GamePhase::Flying && !self.man.flying
    }

    /// Take the events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launch_velocity_45_degrees() {
        let cannon = Cannon {
            pos: Vec2::new(CANNON_X, CANNON_Y),
            angle: std::f32::consts::FRAC_PI_4,
            power: 16.0,
        };
        let mut man = Man::in_cannon(&cannon);
        assert!(man.launch(&cannon));
        assert!((man.vel.x - 11.3137).abs() < 0.01);
        assert!((man.vel.y + 11.3137).abs() < 0.01);
    }

    #[test]
    fn test_launch_is_one_shot() {
        let cannon = Cannon::new(&Tuning::default());
        let mut man = Man::in_cannon(&cannon);
        assert!(man.launch(&cannon));
        man.vel = Vec2::new(1.0, 1.0);
        assert!(!man.launch(&cannon));
        assert_eq!(man.vel, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_man_starts_at_muzzle() {
        let cannon = Cannon::new(&Tuning::default());
        let man = Man::in_cannon(&cannon);
        assert!((man.pos.x - (80.0 + 41.012)).abs() < 0.01);
        assert!((man.pos.y - (400.0 - 41.012)).abs() < 0.01);
        assert!(!man.flying);
        assert_eq!(man.distance, 41);
    }

    #[test]
    fn test_progress_never_decreases() {
        let cannon = Cannon::new(&Tuning::default());
        let mut man = Man::in_cannon(&cannon);
        man.pos.x = 500.0;
        man.record_progress(cannon.pos.x);
        assert_eq!(man.distance, 420);
        man.pos.x = 300.0;
        man.record_progress(cannon.pos.x);
        assert_eq!(man.distance, 420);
    }

    #[test]
    fn test_score_saturates() {
        assert_eq!(score_for(123.9), 12);
        assert_eq!(score_for(-50.0), 0);
    }

    #[test]
    fn test_rect_closest_point() {
        let rect = Rect::new(0.0, 0.0, 8.0, 8.0);
        assert_eq!(rect.closest_point(Vec2::new(10.0, 10.0)), Vec2::new(8.0, 8.0));
        assert_eq!(rect.closest_point(Vec2::new(4.0, 4.0)), Vec2::new(4.0, 4.0));
    }
}
