//! Procedural level generation
//!
//! Walks right from the start position in random strides, dropping at most one
//! feature per stride. Features may overlap each other; physics sorts that out.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{BoostPad, Obstacle, Rect};
use crate::consts::{BOOST_PAD_COLOR, OBSTACLE_COLOR};
use crate::tuning::{LevelTuning, ordered};

/// Features generated for one run, each list ascending in x
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Level {
    pub obstacles: Vec<Obstacle>,
    pub boost_pads: Vec<BoostPad>,
}

impl Level {
    /// A level with nothing in it
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Generate obstacles and boost pads over `[start_x, end_x)`
pub fn generate_level<R: Rng + ?Sized>(rng: &mut R, tuning: &LevelTuning) -> Level {
    let mut level = Level::empty();
    let obstacle_chance = tuning.obstacle_chance.clamp(0.0, 1.0);
    let boost_chance = tuning.boost_chance.clamp(0.0, 1.0);
    // A zero stride would never leave the loop
    let steps = ordered(tuning.step_min.max(1), tuning.step_max.max(1));

    let mut x = tuning.start_x;
    while x < tuning.end_x {
        if rng.random_bool(obstacle_chance) {
            let lift = rng.random_range(ordered(0, tuning.obstacle_lift_max)) as f32;
            let w = rng.random_range(ordered(tuning.obstacle_w_min, tuning.obstacle_w_max)) as f32;
            let h = rng.random_range(ordered(tuning.obstacle_h_min, tuning.obstacle_h_max)) as f32;
            level.obstacles.push(Obstacle {
                rect: Rect::new(x, tuning.obstacle_base_y - lift, w, h),
                color: OBSTACLE_COLOR,
            });
        } else if rng.random_bool(boost_chance) {
            level.boost_pads.push(BoostPad {
                rect: Rect::new(x, tuning.boost_y, tuning.boost_w, tuning.boost_h),
                color: BOOST_PAD_COLOR,
                used: false,
            });
        }
        x += rng.random_range(steps.clone()) as f32;
    }

    log::debug!(
        "Generated level: {} obstacles, {} boost pads over [{}, {})",
        level.obstacles.len(),
        level.boost_pads.len(),
        tuning.start_x,
        tuning.end_x
    );
    level
}
