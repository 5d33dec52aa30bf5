//! Attract/demo mode - steers the player without a human at the keys

use glam::Vec2;

use super::actor::Actor;
use crate::platform::KeySnapshot;

/// How far ahead (px) a threat is considered at all
const THREAT_RADIUS: f32 = 160.0;
/// Dead zone so the player doesn't jitter on an axis
const AXIS_DEAD_ZONE: f32 = 0.25;

/// Pick arrow keys for this frame: run from the closest bigger enemy if one
/// is near, otherwise chase the closest edible one, otherwise drift home.
pub fn steer(player: &Actor, enemies: &[Actor], arena: Vec2) -> KeySnapshot {
    let pos = player.position();
    let dist_to = |e: &&Actor| e.position().distance(pos) - e.size();

    let threat = enemies
        .iter()
        .filter(|e| e.size() >= player.size())
        .filter(|e| dist_to(e) < THREAT_RADIUS)
        .min_by(|a, b| dist_to(a).total_cmp(&dist_to(b)));

    let heading = if let Some(threat) = threat {
        // Flee, with a bias back toward the middle so we don't get pinned
        let away = (pos - threat.position()).normalize_or_zero();
        let home = (arena / 2.0 - pos).normalize_or_zero() * 0.4;
        away + home
    } else if let Some(food) = enemies
        .iter()
        .filter(|e| e.size() < player.size())
        .filter(|e| in_arena(e.position(), arena))
        .min_by(|a, b| dist_to(a).total_cmp(&dist_to(b)))
    {
        food.position() - pos
    } else {
        arena / 2.0 - pos
    };

    keys_toward(heading.normalize_or_zero())
}

fn in_arena(p: Vec2, arena: Vec2) -> bool {
    p.x >= 0.0 && p.y >= 0.0 && p.x <= arena.x && p.y <= arena.y
}

/// Map a unit heading onto the four arrow keys
fn keys_toward(dir: Vec2) -> KeySnapshot {
    KeySnapshot {
        left: dir.x < -AXIS_DEAD_ZONE,
        right: dir.x > AXIS_DEAD_ZONE,
        up: dir.y < -AXIS_DEAD_ZONE,
        down: dir.y > AXIS_DEAD_ZONE,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::actor::ActorKind;
    use crate::sim::kinematics::KinematicState;
    use crate::sim::polygon::{Rgb, ShapeState};

    fn enemy(pos: Vec2, size: f32) -> Actor {
        Actor {
            id: 9,
            kind: ActorKind::Enemy { target: 1 },
            body: KinematicState::new(pos, Vec2::ZERO, 1.0),
            shape: ShapeState::new(size, 5, Rgb::WHITE),
        }
    }

    #[test]
    fn test_flees_bigger_enemy() {
        let arena = Vec2::new(800.0, 600.0);
        let player = Actor::player(1, arena);
        let keys = steer(&player, &[enemy(Vec2::new(450.0, 300.0), 30.0)], arena);
        assert!(keys.left);
        assert!(!keys.right);
    }

    #[test]
    fn test_chases_food() {
        let arena = Vec2::new(800.0, 600.0);
        let player = Actor::player(1, arena);
        let keys = steer(&player, &[enemy(Vec2::new(400.0, 500.0), 4.0)], arena);
        assert!(keys.down);
        assert!(!keys.up && !keys.left && !keys.right);
    }

    #[test]
    fn test_idle_at_home() {
        let arena = Vec2::new(800.0, 600.0);
        let player = Actor::player(1, arena);
        assert_eq!(steer(&player, &[], arena), KeySnapshot::default());
    }
}
