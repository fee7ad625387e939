//! Keys trail behind the player in a chain.
//!
//! Each held key follows either the player or the key picked up just before
//! it. The link is a lookup by id, never a position in the key list, so
//! consuming a key only has to re-point whoever followed it.

use raylib::prelude::Vector2;

use super::direction::Facing;
use super::gameobject::{GameObject, ObjectId, ObjectKind};
use crate::resources::animationstore::{AnimationStore, KEY_SHEET, PLAYER_SHEET};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowTarget {
    Player,
    Key(ObjectId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Key {
    pub follow: Option<FollowTarget>,
    pub speed: f32,
    /// Inside this distance the key rests.
    pub min_distance: f32,
    /// Beyond this distance (plus one step) the key jumps back to the band.
    pub max_distance: f32,
}

impl Key {
    pub fn new(speed: f32, min_distance: f32, max_distance: f32) -> Self {
        Self {
            follow: None,
            speed,
            min_distance,
            max_distance,
        }
    }

    /// Displacement that moves a key centered at `from` toward `target`.
    pub fn step_toward(&self, from: Vector2, target: Vector2) -> Vector2 {
        let to = target - from;
        let dist = to.length();
        if dist <= self.min_distance {
            Vector2::zero()
        } else if dist > self.max_distance + self.speed {
            to.normalized() * (dist - self.max_distance)
        } else {
            to.normalized() * self.speed
        }
    }
}

impl GameObject {
    /// Key whose homing speed is three quarters of `move_speed`, trailing in a
    /// band of one to one and a half player widths.
    pub fn key_at(id: ObjectId, store: &AnimationStore, x: f32, y: f32, move_speed: f32) -> Self {
        let (player_w, _) = store.frame_size(PLAYER_SHEET);
        let key = Key::new(move_speed * 0.75, player_w, player_w * 1.5);
        GameObject::animated(id, store, KEY_SHEET, x, y, Facing::Right, ObjectKind::Key(key))
    }
}

/// Move every held key one step along its follow link.
pub fn trail_keys(keys: &mut [GameObject], player_center: Vector2) {
    for i in 0..keys.len() {
        let Some(key) = keys[i].key() else {
            continue;
        };
        let target = match key.follow {
            Some(FollowTarget::Player) => player_center,
            Some(FollowTarget::Key(id)) => keys
                .iter()
                .find(|k| k.id == id)
                .map(|k| k.hitbox.center())
                .unwrap_or(player_center),
            None => continue,
        };
        let step = key.step_toward(keys[i].hitbox.center(), target);
        keys[i].hitbox.translate(step);
    }
}

/// Re-point keys that followed `consumed` to whatever `consumed` followed.
pub fn relink_followers(keys: &mut [GameObject], consumed: &GameObject) {
    let Some(inherited) = consumed.key().and_then(|k| k.follow) else {
        return;
    };
    for key in keys.iter_mut().filter_map(|k| k.key_mut()) {
        if key.follow == Some(FollowTarget::Key(consumed.id)) {
            key.follow = Some(inherited);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::approx_eq;

    #[test]
    fn key_rests_inside_band() {
        let key = Key::new(3.75, 32.0, 48.0);
        let step = key.step_toward(Vector2::new(0.0, 0.0), Vector2::new(20.0, 0.0));
        assert_eq!(step, Vector2::zero());
    }

    #[test]
    fn key_walks_at_speed_near_band() {
        let key = Key::new(3.75, 32.0, 48.0);
        let step = key.step_toward(Vector2::new(0.0, 0.0), Vector2::new(40.0, 0.0));
        assert!(approx_eq(step.x, 3.75));
        assert!(approx_eq(step.y, 0.0));
    }

    #[test]
    fn key_catches_up_to_band_edge_when_far() {
        let key = Key::new(3.75, 32.0, 48.0);
        let step = key.step_toward(Vector2::new(0.0, 0.0), Vector2::new(0.0, 100.0));
        assert!(approx_eq(step.y, 52.0));
    }

    #[test]
    fn consumed_key_hands_its_target_to_follower() {
        let store = AnimationStore::builtin();
        let mut first = GameObject::key_at(1, &store, 0.0, 0.0, 5.0);
        first.key_mut().unwrap().follow = Some(FollowTarget::Player);
        let mut second = GameObject::key_at(2, &store, 0.0, 0.0, 5.0);
        second.key_mut().unwrap().follow = Some(FollowTarget::Key(1));

        let mut remaining = vec![second];
        relink_followers(&mut remaining, &first);
        assert_eq!(remaining[0].key().unwrap().follow, Some(FollowTarget::Player));
    }

    #[test]
    fn chain_trails_toward_player() {
        let store = AnimationStore::builtin();
        let mut key = GameObject::key_at(1, &store, 0.0, 0.0, 5.0);
        key.key_mut().unwrap().follow = Some(FollowTarget::Player);
        let mut keys = vec![key];
        let before = keys[0].hitbox.center();
        trail_keys(&mut keys, Vector2::new(before.x + 45.0, before.y));
        assert!(approx_eq(keys[0].hitbox.center().x - before.x, 3.75));
    }
}
