//! Data-driven game balance
//!
//! Every physics constant and level generation knob lives here so a page can
//! override them with a JSON block. Missing fields fall back to the defaults.

use serde::{Deserialize, Serialize};

/// Level generation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelTuning {
    /// First x position considered for a feature
    pub start_x: f32,
    /// Generation stops once x reaches this
    pub end_x: f32,
    /// Gap between consecutive positions (inclusive integer range)
    pub step_min: i32,
    pub step_max: i32,
    /// Chance of an obstacle at a position
    pub obstacle_chance: f64,
    /// Chance of a boost pad, rolled only when no obstacle was placed
    pub boost_chance: f64,
    /// Obstacle size ranges (inclusive integers)
    pub obstacle_w_min: i32,
    pub obstacle_w_max: i32,
    pub obstacle_h_min: i32,
    pub obstacle_h_max: i32,
    /// Obstacle top sits at `obstacle_base_y - randint(0, obstacle_lift_max)`
    pub obstacle_base_y: f32,
    pub obstacle_lift_max: i32,
    /// Boost pad geometry
    pub boost_y: f32,
    pub boost_w: f32,
    pub boost_h: f32,
}

impl Default for LevelTuning {
    fn default() -> Self {
        use crate::consts::VIEW_HEIGHT;
        Self {
            start_x: 600.0,
            end_x: 4000.0,
            step_min: 90,
            step_max: 170,
            obstacle_chance: 0.21,
            boost_chance: 0.18,
            obstacle_w_min: 28,
            obstacle_w_max: 42,
            obstacle_h_min: 32,
            obstacle_h_max: 44,
            obstacle_base_y: VIEW_HEIGHT - 60.0,
            obstacle_lift_max: 80,
            boost_y: VIEW_HEIGHT - 43.0,
            boost_w: 48.0,
            boost_h: 14.0,
        }
    }
}

/// Per-tick physics and cannon parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Cannon launch angle (radians above horizontal)
    pub cannon_angle: f32,
    /// Launch speed (pixels per tick)
    pub cannon_power: f32,

    /// Added to vy every tick
    pub gravity: f32,
    /// vx multiplier every tick
    pub air_drag: f32,

    /// Downward speed above which a ground hit bounces instead of sliding
    pub bounce_threshold: f32,
    /// vy multiplier on bounce (sign flipped)
    pub bounce_restitution: f32,
    /// vx multiplier on bounce
    pub bounce_friction: f32,
    /// vx multiplier per tick while sliding
    pub ground_friction: f32,
    /// Sliding slower than this ends the run
    pub rest_speed: f32,

    /// vx multiplier on obstacle hit
    pub obstacle_damping: f32,
    /// Obstacle hits always kick upward at least this hard
    pub obstacle_min_kick: f32,
    /// vy retained (sign flipped) on obstacle hit
    pub obstacle_bounce: f32,
    /// Gap left between the man and the obstacle top after a hit
    pub obstacle_clearance: f32,

    /// vx multiplier when a boost pad fires
    pub boost_factor: f32,
    /// vy retained (upward) when a boost pad fires
    pub boost_lift_keep: f32,
    /// Extra random lift (inclusive integers)
    pub boost_lift_min: i32,
    pub boost_lift_max: i32,

    /// Visual spin per unit of vx
    pub spin_factor: f32,
    /// Camera keeps the man this far from the left edge
    pub camera_lead: f32,

    pub level: LevelTuning,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            cannon_angle: std::f32::consts::FRAC_PI_4,
            cannon_power: 16.0,

            gravity: 0.44,
            air_drag: 0.995,

            bounce_threshold: 4.0,
            bounce_restitution: 0.43,
            bounce_friction: 0.84,
            ground_friction: 0.92,
            rest_speed: 0.8,

            obstacle_damping: 0.45,
            obstacle_min_kick: 4.0,
            obstacle_bounce: 0.45,
            obstacle_clearance: 2.0,

            boost_factor: 1.35,
            boost_lift_keep: 0.7,
            boost_lift_min: 6,
            boost_lift_max: 12,

            spin_factor: 0.04,
            camera_lead: 180.0,

            level: LevelTuning::default(),
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse an override, logging and falling back to defaults on error
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => {
                log::info!("Loaded tuning override");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring invalid tuning ({}), using defaults", e);
                Self::default()
            }
        }
    }
}

/// Inclusive integer range with the bounds in order, so a swapped override can't panic
pub(crate) fn ordered(a: i32, b: i32) -> std::ops::RangeInclusive<i32> {
    if a <= b { a..=b } else { b..=a }
}
