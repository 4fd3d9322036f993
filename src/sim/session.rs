//! Session lifecycle: runs, high score, and the delayed restart menu
//!
//! The session owns the only mutable world and the seeded RNG. Hosts feed it
//! frame deltas through `advance` and deliver the two player actions through
//! `request_start` / `request_launch`.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::level::{Level, generate_level};
use super::state::{GameEvent, GamePhase, GameState};
use super::tick::{TickInput, tick};
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, MENU_REVEAL_DELAY_TICKS, SIM_DT};
use crate::highscores::HighScore;
use crate::tuning::Tuning;

/// Identifies one scheduled menu reveal so it can be cancelled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RevealToken(u64);

#[derive(Debug, Clone, Copy)]
struct PendingReveal {
    token: RevealToken,
    due_tick: u64,
}

/// One player's play session
pub struct Session {
    seed: u64,
    rng: Pcg32,
    tuning: Tuning,
    world: GameState,
    high_score: HighScore,
    /// One-shot input applied on the next tick
    input: TickInput,
    accumulator: f32,
    /// Ticks since the session was created
    time_ticks: u64,
    pending_reveal: Option<PendingReveal>,
    next_token: u64,
    menu_visible: bool,
    events: Vec<GameEvent>,
}

impl Session {
    /// Create a session sitting at the start menu
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let level = generate_level(&mut rng, &tuning.level);
        let world = GameState::new(tuning.clone(), level);
        Self {
            seed,
            rng,
            tuning,
            world,
            high_score: HighScore::new(),
            input: TickInput::default(),
            accumulator: 0.0,
            time_ticks: 0,
            pending_reveal: None,
            next_token: 1,
            menu_visible: true,
            events: Vec::new(),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Current run (read-only snapshot for renderers)
    pub fn world(&self) -> &GameState {
        &self.world
    }

    /// Direct access for hosts and tests that stage scenarios
    pub fn world_mut(&mut self) -> &mut GameState {
        &mut self.world
    }

    pub fn phase(&self) -> GamePhase {
        self.world.phase
    }

    pub fn high_score(&self) -> &HighScore {
        &self.high_score
    }

    pub fn menu_visible(&self) -> bool {
        self.menu_visible
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    /// Token of the menu reveal waiting to fire, if any
    pub fn pending_reveal(&self) -> Option<RevealToken> {
        self.pending_reveal.map(|p| p.token)
    }

    /// Whether a start request would be accepted right now
    pub fn can_start(&self) -> bool {
        match self.world.phase {
            GamePhase::Menu => true,
            GamePhase::Finished => self.pending_reveal.is_none(),
            GamePhase::Flying => false,
        }
    }

    /// Start a fresh run. Ignored mid-run and while the end-of-run delay is
    /// still pending. Returns true if a run started.
    pub fn request_start(&mut self) -> bool {
        if !self.can_start() {
            log::debug!("Start ignored in {:?}", self.world.phase);
            return false;
        }
        self.reset_run();
        true
    }

    /// Queue a launch for the next tick. Only valid while the man is still
    /// in the cannon. Returns true if queued.
    pub fn request_launch(&mut self) -> bool {
        if !self.world.awaiting_launch() {
            log::debug!("Launch ignored in {:?}", self.world.phase);
            return false;
        }
        self.input.launch = true;
        true
    }

    /// Cancel the scheduled menu reveal and show the menu now, so the session
    /// can't be left waiting on a timer that will never fire
    pub fn cancel_pending_reveal(&mut self) -> Option<RevealToken> {
        let pending = self.pending_reveal.take()?;
        log::debug!("Menu reveal {:?} cancelled", pending.token);
        self.reveal_menu();
        Some(pending.token)
    }

    /// Feed a frame delta; runs as many fixed ticks as it covers.
    /// Returns the number of ticks run.
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.step();
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        // Drop backlog we refused to simulate
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        substeps
    }

    /// Run exactly one tick
    pub fn step(&mut self) {
        self.time_ticks += 1;

        let input = std::mem::take(&mut self.input);
        let was_flying = self.world.phase == GamePhase::Flying;
        tick(&mut self.world, &input, &mut self.rng);
        self.events.append(&mut self.world.events);

        if was_flying && self.world.phase == GamePhase::Finished {
            self.finish_run();
        }

        if let Some(pending) = self.pending_reveal {
            if self.time_ticks >= pending.due_tick {
                self.pending_reveal = None;
                self.reveal_menu();
            }
        }
    }

    /// Take the events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn reset_run(&mut self) {
        let level = generate_level(&mut self.rng, &self.tuning.level);
        let obstacles = level.obstacles.len();
        let boost_pads = level.boost_pads.len();

        self.world = GameState::new(self.tuning.clone(), level);
        self.world.phase = GamePhase::Flying;
        self.input = TickInput::default();
        self.accumulator = 0.0;
        self.pending_reveal = None;
        self.menu_visible = false;

        log::info!(
            "Run {} started: {} obstacles, {} boost pads",
            self.high_score.runs() + 1,
            obstacles,
            boost_pads
        );
        self.events.push(GameEvent::RunStarted {
            obstacles,
            boost_pads,
        });
    }

    fn finish_run(&mut self) {
        let score = self.world.score;
        let distance = self.world.man.distance;
        let new_best = self.high_score.record(score);

        let token = RevealToken(self.next_token);
        self.next_token += 1;
        self.pending_reveal = Some(PendingReveal {
            token,
            due_tick: self.time_ticks + MENU_REVEAL_DELAY_TICKS,
        });

        log::info!(
            "Run finished: {} m (distance {}), best {} m{}",
            score,
            distance,
            self.high_score.best(),
            if new_best { " - new high score!" } else { "" }
        );
        self.events.push(GameEvent::RunFinished {
            score,
            distance,
            new_best,
        });
    }

    fn reveal_menu(&mut self) {
        self.menu_visible = true;
        self.events.push(GameEvent::MenuRevealed);
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(0, Tuning::default())
    }
}
