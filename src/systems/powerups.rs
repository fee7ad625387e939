//! Dash and attack powerups.
//!
//! A blue player can dash once, a red player can swing once. Both start on
//! the powerup key with a direction held, freeze that direction, and hand
//! the color back to the base color.

use log::debug;
use raylib::prelude::Vector2;

use crate::components::direction::Facing;
use crate::components::player::{Player, PowerColor};
use crate::resources::animationstore::AnimationStore;
use crate::resources::input::InputSnapshot;
use crate::rooms::Room;

/// Vector along `axes` with length `magnitude`. Diagonals are normalized, so
/// each component of a diagonal is `magnitude / sqrt(2)`.
pub fn scale_to(axes: (i8, i8), magnitude: f32) -> Vector2 {
    let v = Vector2::new(axes.0 as f32, axes.1 as f32);
    if axes == (0, 0) {
        Vector2::zero()
    } else {
        v.normalized() * magnitude
    }
}

/// Start or continue a dash. Returns the displacement that replaces normal
/// movement this tick, or `None` when not dashing.
///
/// A dash starts at twice the walking speed and decays linearly back to the
/// walking speed. While dashing, velocity along gravity is held at zero.
pub fn dash(player: &mut Player, input: &InputSnapshot) -> Option<Vector2> {
    let axes = input.axes();
    let can_start = player.color == PowerColor::Blue
        && input.powerup
        && axes != (0, 0)
        && !player.dash.is_active()
        && !player.attack.active;

    if can_start {
        player.set_color(PowerColor::Base);
        player.dash.direction = axes;
        player.dash.timer = player.dash_duration;
        player.dash.vector = scale_to(axes, player.dash_speed);
        player.platform.velocity = 0.0;
        debug!("dash started toward {:?}", axes);
        return Some(player.dash.vector);
    }

    if player.dash.is_active() {
        player.dash.timer -= 1;
        let decay = player.dash_speed * player.dash.timer as f32 / player.dash_duration as f32;
        player.dash.vector = scale_to(player.dash.direction, decay.max(player.speed));
        player.platform.velocity = 0.0;
        return Some(player.dash.vector);
    }

    None
}

/// Start a swing if possible, then break every breakable object under the
/// attack box. The box is applied on every tick of the swing.
pub fn attack(player: &mut Player, input: &InputSnapshot, room: &mut Room) {
    if !player.attack.active
        && player.color == PowerColor::Red
        && input.powerup
        && !player.dash.is_active()
    {
        let (dx, dy) = input.axes();
        if let Some(direction) = Facing::from_axes(dx, dy) {
            player.attack.active = true;
            player.attack.direction = direction;
            player.attack.swing.rewind();
            debug!("attack started toward {:?}", direction);
        }
    }

    if player.attack.active {
        let reach = player.attack_hitbox();
        room.objects
            .retain(|obj| !(obj.is_breakable() && obj.hitbox.overlaps(&reach)));
    }
}

/// Advance the swing animation. The swing ends when the animation wraps,
/// returning the player to the base color.
pub fn advance_swing(player: &mut Player, store: &AnimationStore) {
    if !player.attack.active {
        return;
    }
    if player.attack.swing.advance(store) {
        player.attack.active = false;
        player.set_color(PowerColor::Base);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::gameobject::GameObject;
    use crate::components::hitbox::Hitbox;
    use crate::rooms::MovementMode;
    use crate::testing::approx_eq;

    fn right_and_power() -> InputSnapshot {
        InputSnapshot {
            right: true,
            powerup: true,
            ..InputSnapshot::default()
        }
    }

    #[test]
    fn diagonal_speed_matches_axial_speed() {
        let v = scale_to((1, 1), 5.0);
        assert!(approx_eq(v.length(), 5.0));
        assert!(approx_eq(v.x, 5.0 / 2f32.sqrt()));
        assert_eq!(scale_to((0, 0), 5.0), Vector2::zero());
    }

    #[test]
    fn dash_needs_blue_and_direction() {
        let store = AnimationStore::builtin();
        let mut player = Player::new(&store, Vector2::zero(), 5.0);
        assert!(dash(&mut player, &right_and_power()).is_none());

        player.set_color(PowerColor::Blue);
        let idle = InputSnapshot {
            powerup: true,
            ..InputSnapshot::default()
        };
        assert!(dash(&mut player, &idle).is_none());
        assert_eq!(player.color, PowerColor::Blue);

        let v = dash(&mut player, &right_and_power()).unwrap();
        assert!(approx_eq(v.x, 10.0));
        assert_eq!(player.color, PowerColor::Base);
        assert_eq!(player.dash.timer, 20);
    }

    #[test]
    fn dash_decays_to_walking_speed_and_keeps_direction() {
        let store = AnimationStore::builtin();
        let mut player = Player::new(&store, Vector2::zero(), 5.0);
        player.set_color(PowerColor::Blue);
        dash(&mut player, &right_and_power());

        let steer = InputSnapshot {
            up: true,
            ..InputSnapshot::default()
        };
        let mut last_timer = player.dash.timer;
        let mut last_speed = f32::MAX;
        while player.dash.is_active() {
            let v = dash(&mut player, &steer).unwrap();
            assert!(player.dash.timer < last_timer);
            assert!(v.length() <= last_speed + 1e-4);
            assert!(v.length() >= 5.0 - 1e-4);
            assert_eq!(v.y, 0.0);
            last_timer = player.dash.timer;
            last_speed = v.length();
        }
        assert!(dash(&mut player, &steer).is_none());
    }

    #[test]
    fn dash_holds_gravity_velocity_at_zero() {
        let store = AnimationStore::builtin();
        let mut player = Player::new(&store, Vector2::zero(), 5.0);
        player.set_color(PowerColor::Blue);
        player.platform.velocity = 12.0;
        dash(&mut player, &right_and_power());
        assert_eq!(player.platform.velocity, 0.0);
    }

    #[test]
    fn attack_breaks_breakables_every_tick_of_the_swing() {
        let store = AnimationStore::builtin();
        let mut room = Room::new(5, 0, Hitbox::new(0.0, 0.0, 400.0, 400.0), None, MovementMode::FreeRoam);
        let mut player = Player::new(&store, Vector2::new(100.0, 100.0), 5.0);
        player.set_color(PowerColor::Red);

        attack(&mut player, &right_and_power(), &mut room);
        assert!(player.attack.active);
        assert_eq!(player.attack.direction, Facing::Right);

        // arrives after the swing started, with no key held
        room.objects.push(GameObject::arrow(1, 120.0, 96.0, Facing::Left, 0.0));
        room.objects.push(GameObject::spike(2, 120.0, 96.0));
        attack(&mut player, &InputSnapshot::default(), &mut room);
        assert!(room.get(1).is_none());
        assert!(room.get(2).is_some());
    }

    #[test]
    fn swing_ends_and_restores_base_color() {
        let store = AnimationStore::builtin();
        let mut room = Room::new(5, 0, Hitbox::new(0.0, 0.0, 400.0, 400.0), None, MovementMode::FreeRoam);
        let mut player = Player::new(&store, Vector2::new(100.0, 100.0), 5.0);
        player.set_color(PowerColor::Red);
        attack(&mut player, &right_and_power(), &mut room);

        for _ in 0..4 {
            advance_swing(&mut player, &store);
            assert!(player.attack.active);
        }
        advance_swing(&mut player, &store);
        assert!(!player.attack.active);
        assert_eq!(player.color, PowerColor::Base);
    }

    #[test]
    fn attack_direction_is_frozen() {
        let store = AnimationStore::builtin();
        let mut room = Room::new(5, 0, Hitbox::new(0.0, 0.0, 400.0, 400.0), None, MovementMode::FreeRoam);
        let mut player = Player::new(&store, Vector2::new(100.0, 100.0), 5.0);
        player.set_color(PowerColor::Red);
        attack(&mut player, &right_and_power(), &mut room);
        let up = InputSnapshot {
            up: true,
            powerup: true,
            ..InputSnapshot::default()
        };
        attack(&mut player, &up, &mut room);
        assert_eq!(player.attack.direction, Facing::Right);
    }
}
