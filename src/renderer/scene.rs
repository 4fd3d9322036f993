//! Scene building: world state to triangles
//!
//! Read-only view of a run. Builds everything in view pixels with the camera
//! already applied; the pipeline only has to letterbox it.

use glam::{Affine2, Vec2};
use std::f32::consts::{FRAC_PI_2, PI};

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::consts::{VIEW_HEIGHT, VIEW_WIDTH};
use crate::sim::{BoostPad, Cannon, GameState, Man, Obstacle};

/// Features this far outside the view are skipped
const CULL_MARGIN: f32 = 48.0;
const CIRCLE_SEGMENTS: u32 = 32;

/// Build all vertices for one frame
pub fn build_scene(world: &GameState) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(1024);

    vertices.extend(shapes::rect(
        0.0,
        world.ground_y,
        VIEW_WIDTH,
        VIEW_HEIGHT - world.ground_y,
        colors::GROUND,
    ));

    for obstacle in &world.obstacles {
        let rx = obstacle.rect.x - world.scroll_x;
        if on_screen(rx) {
            vertices.extend(obstacle_shape(obstacle, rx));
        }
    }

    for pad in &world.boost_pads {
        let rx = pad.rect.x - world.scroll_x;
        if on_screen(rx) {
            vertices.extend(boost_pad_shape(pad, rx));
        }
    }

    vertices.extend(cannon_shape(&world.cannon, world.scroll_x));
    vertices.extend(man_shape(&world.man, world.scroll_x));

    vertices
}

#[inline]
fn on_screen(rx: f32) -> bool {
    rx > -CULL_MARGIN && rx < VIEW_WIDTH + CULL_MARGIN
}

fn obstacle_shape(obstacle: &Obstacle, rx: f32) -> Vec<Vertex> {
    let r = obstacle.rect;
    let mut v = shapes::rect(rx, r.y, r.w, r.h, colors::hex(obstacle.color));
    v.extend(shapes::rect(rx, r.bottom(), r.w, 8.0, colors::SHADOW));
    v
}

fn boost_pad_shape(pad: &BoostPad, rx: f32) -> Vec<Vertex> {
    let r = pad.rect;
    let fill = if pad.used {
        colors::BOOST_PAD_USED
    } else {
        colors::hex(pad.color)
    };
    let mut v = shapes::rect(rx, r.y, r.w, r.h, fill);

    let bolt = [
        Vec2::new(rx + 12.0, r.y + 3.0),
        Vec2::new(rx + 24.0, r.y + r.h - 2.0),
        Vec2::new(rx + 30.0, r.y + 7.0),
    ];
    v.extend(shapes::polyline(&bolt, 2.0, colors::BOLT));
    v
}

fn cannon_shape(cannon: &Cannon, scroll_x: f32) -> Vec<Vertex> {
    let pivot = Vec2::new(cannon.pos.x - scroll_x, cannon.pos.y);

    // Barrel points up-right: negative angle with y down
    let barrel = Affine2::from_angle_translation(-cannon.angle, pivot);
    let mut v = shapes::transformed_rect(&barrel, -14.0, -14.0, 68.0, 28.0, colors::BARREL);

    let base = pivot + Vec2::new(0.0, 18.0);
    v.extend(shapes::sector(base, 36.0, 0.0, -PI, colors::CANNON_BASE, CIRCLE_SEGMENTS));
    v.extend(shapes::arc_stroke(base, 36.0, 0.0, -PI, 4.0, colors::OUTLINE, CIRCLE_SEGMENTS));
    v
}

fn man_shape(man: &Man, scroll_x: f32) -> Vec<Vertex> {
    let center = Vec2::new(man.pos.x - scroll_x, man.pos.y);
    let spun = Affine2::from_angle_translation(man.rotation, center);
    let upright = Affine2::from_translation(center);

    let mut v = shapes::circle(center, man.radius, colors::hex(man.color), CIRCLE_SEGMENTS);

    // Face stays upright while the body spins
    let mut face = shapes::circle(Vec2::new(4.0, -4.0), 7.0, colors::FACE, 16);
    face.extend(shapes::circle(Vec2::new(7.0, -6.0), 1.4, colors::EYES, 8));
    face.extend(shapes::circle(Vec2::new(3.0, -7.0), 1.1, colors::EYES, 8));
    face.extend(shapes::arc_stroke(
        Vec2::new(5.0, -2.0),
        2.5,
        0.0,
        FRAC_PI_2,
        1.2,
        colors::SMILE,
        6,
    ));
    v.extend(shapes::transform(face, &upright));

    let limbs = [
        (Vec2::new(-7.0, 12.0), Vec2::new(-17.0, 28.0)),
        (Vec2::new(7.0, 12.0), Vec2::new(17.0, 28.0)),
        (Vec2::new(-8.0, -8.0), Vec2::new(-18.0, -18.0)),
        (Vec2::new(8.0, -8.0), Vec2::new(18.0, -18.0)),
    ];
    let limbs: Vec<Vertex> = limbs
        .iter()
        .flat_map(|&(a, b)| shapes::line(a, b, 3.0, colors::LIMBS))
        .collect();
    v.extend(shapes::transform(limbs, &spun));

    v
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Level, Rect};
    use crate::tuning::Tuning;

    fn bare_world() -> GameState {
        GameState::new(Tuning::default(), Level::empty())
    }

    fn obstacle_at(x: f32) -> Obstacle {
        Obstacle {
            rect: Rect::new(x, 400.0, 30.0, 40.0),
            color: 0x455a64,
        }
    }

    #[test]
    fn test_empty_level_renders() {
        let v = build_scene(&bare_world());
        assert!(!v.is_empty());
        assert_eq!(v.len() % 3, 0);
    }

    #[test]
    fn test_offscreen_obstacles_culled() {
        let base = build_scene(&bare_world()).len();

        let mut world = bare_world();
        world.obstacles.push(obstacle_at(300.0));
        let one = build_scene(&world).len();
        assert_eq!(one - base, 12);

        world.obstacles.push(obstacle_at(3000.0));
        assert_eq!(build_scene(&world).len(), one);

        // Scrolling brings the far one into view and pushes the near one out
        world.scroll_x = 2800.0;
        assert_eq!(build_scene(&world).len(), one);
    }

    #[test]
    fn test_used_pad_changes_color() {
        let mut world = bare_world();
        world.boost_pads.push(BoostPad {
            rect: Rect::new(300.0, 437.0, 48.0, 14.0),
            color: 0x33c6ff,
            used: false,
        });
        let fresh = build_scene(&world);
        assert!(fresh.iter().any(|v| v.color == colors::hex(0x33c6ff)));

        world.boost_pads[0].used = true;
        let used = build_scene(&world);
        assert!(used.iter().any(|v| v.color == colors::BOOST_PAD_USED));
        assert!(!used.iter().any(|v| v.color == colors::hex(0x33c6ff)));
    }

    #[test]
    fn test_camera_offsets_man() {
        let mut world = bare_world();
        world.man.pos = Vec2::new(1000.0, 200.0);
        world.scroll_x = 820.0;
        let v = build_scene(&world);
        let body = colors::hex(world.man.color);
        let xs: Vec<f32> = v.iter().filter(|v| v.color == body).map(|v| v.position[0]).collect();
        assert!(xs.iter().all(|&x| (x - 180.0).abs() <= world.man.radius + 1e-3));
    }
}
