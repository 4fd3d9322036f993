//! HUD and menu text
//!
//! Pure view of the session; the web host copies these strings and flags
//! into the DOM every frame.

use crate::sim::Session;

pub const TITLE: &str = "Cannon Man";
pub const INSTRUCTIONS: &str = "Shoot the man as far as you can! \
    Avoid obstacles and hit boost pads to go further.";
pub const LAUNCH_PROMPT: &str = "Click or press SPACE to launch!";

/// Everything the overlay needs for one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudView {
    /// "Distance: N m"
    pub distance: String,
    /// "High Score: N m", once there is one
    pub high_score: Option<String>,
    /// Show the launch hint (man still in the cannon)
    pub show_launch_prompt: bool,
    /// Show the start menu overlay
    pub show_menu: bool,
}

impl HudView {
    pub fn from_session(session: &Session) -> Self {
        let best = session.high_score().best();
        Self {
            distance: format!("Distance: {} m", session.world().score),
            high_score: (best > 0).then(|| high_score_text(best)),
            show_launch_prompt: session.world().awaiting_launch(),
            show_menu: session.menu_visible(),
        }
    }
}

pub fn high_score_text(best: u64) -> String {
    format!("High Score: {} m", best)
}
