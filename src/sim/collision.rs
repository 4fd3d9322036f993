//! Collision detection and response
//!
//! The man is a circle; everything he can hit is an axis-aligned rectangle
//! or the flat ground line.

use glam::Vec2;
use rand::Rng;

use super::state::{BoostPad, Man, Obstacle, Rect};
use crate::tuning::{Tuning, ordered};

/// Circle vs rectangle overlap: squared distance from the centre to the
/// nearest point of the rectangle is within the radius squared
#[inline]
pub fn circle_rect_overlap(center: Vec2, radius: f32, rect: &Rect) -> bool {
    let closest = rect.closest_point(center);
    center.distance_squared(closest) <= radius * radius
}

/// What happened when the man met the ground this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GroundContact {
    /// Still above the ground
    Airborne,
    /// Came down fast and bounced
    Bounce,
    /// Sliding along the ground; `at_rest` once too slow to keep going
    Slide { at_rest: bool },
}

/// Keep the man above the ground, bouncing or sliding depending on speed
pub fn resolve_ground(man: &mut Man, ground_y: f32, tuning: &Tuning) -> GroundContact {
    if man.pos.y + man.radius <= ground_y {
        return GroundContact::Airborne;
    }

    man.pos.y = ground_y - man.radius;
    if man.vel.y > tuning.bounce_threshold {
        man.vel.y = -man.vel.y * tuning.bounce_restitution;
        man.vel.x *= tuning.bounce_friction;
        GroundContact::Bounce
    } else {
        man.vel.y = 0.0;
        man.vel.x *= tuning.ground_friction;
        GroundContact::Slide {
            at_rest: man.vel.x.abs() < tuning.rest_speed,
        }
    }
}

/// Knock the man up and over an obstacle he overlaps. Returns true on hit.
pub fn resolve_obstacle(man: &mut Man, obstacle: &Obstacle, tuning: &Tuning) -> bool {
    if !circle_rect_overlap(man.pos, man.radius, &obstacle.rect) {
        return false;
    }

    man.vel.x *= tuning.obstacle_damping;
    man.vel.y = (-man.vel.y.abs() * tuning.obstacle_bounce).min(-tuning.obstacle_min_kick);
    man.pos.y = obstacle.rect.y - man.radius - tuning.obstacle_clearance;
    true
}

/// Fire an unused boost pad the man overlaps. Returns true if it fired.
pub fn resolve_boost_pad<R: Rng + ?Sized>(
    man: &mut Man,
    pad: &mut BoostPad,
    tuning: &Tuning,
    rng: &mut R,
) -> bool {
    if pad.used || !circle_rect_overlap(man.pos, man.radius, &pad.rect) {
        return false;
    }

    let lift = rng.random_range(ordered(tuning.boost_lift_min, tuning.boost_lift_max)) as f32;
    man.vel.x *= tuning.boost_factor;
    man.vel.y = -man.vel.y.abs() * tuning.boost_lift_keep - lift;
    pad.used = true;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Cannon;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn flying_man(pos: Vec2, vel: Vec2) -> Man {
        let mut man = Man::in_cannon(&Cannon::new(&Tuning::default()));
        man.pos = pos;
        man.vel = vel;
        man.flying = true;
        man
    }

    #[test]
    fn test_circle_rect_overlap() {
        let rect = Rect::new(0.0, 0.0, 8.0, 8.0);
        // Closest point (8, 8), distance² = 8 <= 25
        assert!(circle_rect_overlap(Vec2::new(10.0, 10.0), 5.0, &rect));
        assert!(!circle_rect_overlap(Vec2::new(100.0, 100.0), 5.0, &rect));
        // Centre inside the rectangle
        assert!(circle_rect_overlap(Vec2::new(4.0, 4.0), 1.0, &rect));
        // Exactly touching counts
        assert!(circle_rect_overlap(Vec2::new(13.0, 4.0), 5.0, &rect));
    }

    #[test]
    fn test_ground_bounce() {
        let tuning = Tuning::default();
        let mut man = flying_man(Vec2::new(300.0, 430.0), Vec2::new(10.0, 5.0));

        let contact = resolve_ground(&mut man, 444.0, &tuning);
        assert_eq!(contact, GroundContact::Bounce);
        assert!((man.vel.y - (-2.15)).abs() < 1e-5);
        assert!((man.vel.x - 8.4).abs() < 1e-5);
        assert_eq!(man.pos.y, 444.0 - man.radius);
    }

    #[test]
    fn test_ground_slide_and_rest() {
        let tuning = Tuning::default();
        let mut man = flying_man(Vec2::new(300.0, 430.0), Vec2::new(5.0, 0.44));
        assert_eq!(
            resolve_ground(&mut man, 444.0, &tuning),
            GroundContact::Slide { at_rest: false }
        );
        assert_eq!(man.vel.y, 0.0);
        assert!((man.vel.x - 4.6).abs() < 1e-5);

        let mut man = flying_man(Vec2::new(300.0, 430.0), Vec2::new(0.85, 1.0));
        assert_eq!(
            resolve_ground(&mut man, 444.0, &tuning),
            GroundContact::Slide { at_rest: true }
        );
    }

    #[test]
    fn test_airborne_untouched() {
        let tuning = Tuning::default();
        let mut man = flying_man(Vec2::new(300.0, 200.0), Vec2::new(3.0, 6.0));
        assert_eq!(resolve_ground(&mut man, 444.0, &tuning), GroundContact::Airborne);
        assert_eq!(man.vel, Vec2::new(3.0, 6.0));
    }

    #[test]
    fn test_obstacle_kicks_upward() {
        let tuning = Tuning::default();
        let obstacle = Obstacle {
            rect: Rect::new(300.0, 400.0, 30.0, 40.0),
            color: 0,
        };

        // Slow hit still gets the minimum kick
        let mut man = flying_man(Vec2::new(290.0, 395.0), Vec2::new(10.0, 2.0));
        assert!(resolve_obstacle(&mut man, &obstacle, &tuning));
        assert!((man.vel.x - 4.5).abs() < 1e-5);
        assert_eq!(man.vel.y, -4.0);
        assert_eq!(man.pos.y, 400.0 - 18.0 - 2.0);

        // Fast hit keeps 45% of the vertical speed, upward
        let mut man = flying_man(Vec2::new(290.0, 395.0), Vec2::new(10.0, 20.0));
        assert!(resolve_obstacle(&mut man, &obstacle, &tuning));
        assert!((man.vel.y - (-9.0)).abs() < 1e-5);

        let mut man = flying_man(Vec2::new(100.0, 100.0), Vec2::new(10.0, 2.0));
        assert!(!resolve_obstacle(&mut man, &obstacle, &tuning));
        assert_eq!(man.vel, Vec2::new(10.0, 2.0));
    }

    #[test]
    fn test_boost_pad_fires_once() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(5);
        let mut pad = BoostPad {
            rect: Rect::new(300.0, 437.0, 48.0, 14.0),
            color: 0,
            used: false,
        };

        let mut man = flying_man(Vec2::new(310.0, 425.0), Vec2::new(8.0, 3.0));
        assert!(resolve_boost_pad(&mut man, &mut pad, &tuning, &mut rng));
        assert!(pad.used);
        assert!((man.vel.x - 10.8).abs() < 1e-4);
        // -3 * 0.7 - [6, 12]
        assert!(man.vel.y <= -8.1 + 1e-4 && man.vel.y >= -14.1 - 1e-4);

        // Same spot again: no effect
        let before = man.vel;
        man.pos = Vec2::new(310.0, 425.0);
        assert!(!resolve_boost_pad(&mut man, &mut pad, &tuning, &mut rng));
        assert_eq!(man.vel, before);
    }
}
