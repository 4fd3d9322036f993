//! Cannon Man - shoot the man as far as you can
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, level generation, session)
//! - `renderer`: WebGPU rendering pipeline and scene building
//! - `ui`: HUD and menu text derived from the session
//! - `tuning`: Data-driven game balance
//! - `highscores`: In-memory best distance tracking

pub mod highscores;
pub mod renderer;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use highscores::HighScore;
pub use tuning::{LevelTuning, Tuning};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep. Physics constants are per-tick and tuned for 60 Hz.
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta fed to the accumulator (tab switches, breakpoints)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// View dimensions (pixels, y grows downward)
    pub const VIEW_WIDTH: f32 = 800.0;
    pub const VIEW_HEIGHT: f32 = 480.0;
    /// Top of the ground band
    pub const GROUND_Y: f32 = VIEW_HEIGHT - 36.0;

    /// Cannon pivot
    pub const CANNON_X: f32 = 80.0;
    pub const CANNON_Y: f32 = VIEW_HEIGHT - 80.0;
    /// Distance from the pivot to where the man sits before launch
    pub const MUZZLE_LENGTH: f32 = 58.0;

    /// Man defaults
    pub const MAN_RADIUS: f32 = 18.0;
    pub const MAN_COLOR: u32 = 0xda6f2b;

    /// Level feature colors
    pub const OBSTACLE_COLOR: u32 = 0x455a64;
    pub const BOOST_PAD_COLOR: u32 = 0x33c6ff;

    /// Delay between the end of a run and the restart menu (1.1 s at 60 Hz)
    pub const MENU_REVEAL_DELAY_TICKS: u64 = 66;
}
