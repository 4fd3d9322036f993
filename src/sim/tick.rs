//! Fixed timestep simulation tick
//!
//! One call advances one run by one tick. Constants are per tick, so the
//! caller must run this at a steady 60 Hz (see `Session::advance`).

use rand::Rng;

use super::collision::{GroundContact, resolve_boost_pad, resolve_ground, resolve_obstacle};
use super::state::{GameEvent, GamePhase, GameState, score_for};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Fire the cannon (click/tap/key)
    pub launch: bool,
}

/// Advance the run by one tick
pub fn tick<R: Rng + ?Sized>(state: &mut GameState, input: &TickInput, rng: &mut R) {
    if state.phase != GamePhase::Flying {
        return;
    }

    state.time_ticks += 1;

    if input.launch && state.man.launch(&state.cannon) {
        log::debug!("Launched with velocity {:?}", state.man.vel);
        state.events.push(GameEvent::Launched { vel: state.man.vel });
    }

    if !state.man.flying {
        // Sitting in the cannon
        state.man.pos = state.cannon.muzzle();
        return;
    }

    let tuning = &state.tuning;
    let man = &mut state.man;

    // Gravity and air drag
    man.vel.y += tuning.gravity;
    man.vel.x *= tuning.air_drag;

    man.pos += man.vel;
    man.record_progress(state.cannon.pos.x);
    state.score = score_for(man.pos.x);

    // Camera follows, never behind the cannon
    state.scroll_x = (man.pos.x - tuning.camera_lead).max(0.0);

    let mut came_to_rest = false;
    match resolve_ground(man, state.ground_y, tuning) {
        GroundContact::Airborne => {}
        GroundContact::Bounce => {
            state.events.push(GameEvent::GroundBounce { vy: man.vel.y });
        }
        GroundContact::Slide { at_rest } => came_to_rest = at_rest,
    }

    // Every overlapping obstacle applies; the last one decides the position
    for (index, obstacle) in state.obstacles.iter().enumerate() {
        if resolve_obstacle(man, obstacle, tuning) {
            log::debug!("Obstacle {} hit at x={:.0}", index, man.pos.x);
            state.events.push(GameEvent::ObstacleHit { index });
        }
    }

    for (index, pad) in state.boost_pads.iter_mut().enumerate() {
        if resolve_boost_pad(man, pad, tuning, rng) {
            log::debug!("Boost pad {} used, velocity now {:?}", index, man.vel);
            state.events.push(GameEvent::BoostPadUsed { index });
        }
    }

    man.rotation += man.vel.x * tuning.spin_factor;

    if came_to_rest {
        state.phase = GamePhase::Finished;
        state.events.push(GameEvent::CameToRest);
    }
}
