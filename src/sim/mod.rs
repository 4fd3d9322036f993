//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (features sorted by x)
//! - No rendering or platform dependencies

pub mod collision;
pub mod level;
pub mod session;
pub mod state;
pub mod tick;

pub use collision::{GroundContact, circle_rect_overlap};
pub use level::{Level, generate_level};
pub use session::{RevealToken, Session};
pub use state::{BoostPad, Cannon, GameEvent, GamePhase, GameState, Man, Obstacle, Rect};
pub use tick::{TickInput, tick};
