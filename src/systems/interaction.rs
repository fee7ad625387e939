//! Interaction protocol: unlocking, crumbling and pickups.

use log::debug;

use crate::components::direction::Side;
use crate::components::door::DoorState;
use crate::components::gameobject::{GameObject, ObjectId, ObjectKind};
use crate::components::key::{FollowTarget, relink_followers};
use crate::components::player::Player;
use crate::events::cue::{Cue, SoundCue};
use crate::rooms::Room;

/// What a tick of player interactions asks the session to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerSignal {
    Died,
    /// The player walked through the open door on this wall.
    EnteredDoor(Side),
}

/// Unlock every touched locked door or crate while keys last.
pub fn unlock_on_contact(
    keys: &mut Vec<GameObject>,
    touched: &[ObjectId],
    room: &mut Room,
    cues: &mut Vec<Cue>,
) {
    for &id in touched {
        if keys.is_empty() {
            break;
        }
        let eligible = room.get(id).is_some_and(|obj| match &obj.kind {
            ObjectKind::Door(door) => door.state == DoorState::Locked,
            ObjectKind::Crate(_) => true,
            _ => false,
        });
        if eligible {
            unlock(keys, id, room, cues);
        }
    }
}

/// Spend the most recent key on `target`.
///
/// A door opens; a crate disappears and drops its contents where it stood.
/// Open doors, other kinds and an empty key ring leave everything untouched.
/// Returns whether a key was spent.
pub fn unlock(
    keys: &mut Vec<GameObject>,
    target: ObjectId,
    room: &mut Room,
    cues: &mut Vec<Cue>,
) -> bool {
    let Some(idx) = room.index_of(target) else {
        return false;
    };
    let is_crate = match &room.objects[idx].kind {
        ObjectKind::Door(door) if door.state != DoorState::Open => false,
        ObjectKind::Crate(_) => true,
        _ => return false,
    };
    let Some(key) = keys.pop() else {
        return false;
    };
    relink_followers(keys, &key);

    if is_crate {
        let crate_obj = room.objects.remove(idx);
        let center = crate_obj.hitbox.center();
        if let ObjectKind::Crate(contents) = crate_obj.kind {
            let released = contents.release(center);
            debug!("crate {} unlocked, released object {}", target, released.id);
            room.objects.push(released);
        }
        cues.push(Cue::Sound(SoundCue::CrateUnlock));
    } else {
        room.objects[idx].set_door_state(DoorState::Open);
        debug!("door {} unlocked with key {}", target, key.id);
        cues.push(Cue::Sound(SoundCue::Unlock));
    }
    true
}

/// Start crumbling every touched crumble platform not already crumbling.
pub fn crumble_on_contact(touched: &[ObjectId], room: &mut Room) {
    for &id in touched {
        if let Some(obj) = room.get_mut(id)
            && obj.crumble()
        {
            debug!("platform {} starts crumbling", id);
        }
    }
}

/// Resolve non-solid overlaps between the player and the room, in room order.
///
/// Deadly objects and crossed door thresholds end processing and are handed
/// back as a signal. Keys join the player's chain, powerups recolor the
/// player; both leave the room.
pub fn touch_interactables(
    player: &mut Player,
    room: &mut Room,
    cues: &mut Vec<Cue>,
) -> Option<PlayerSignal> {
    let mut i = 0;
    while i < room.objects.len() {
        let obj = &room.objects[i];
        if !obj.hitbox.overlaps(&player.hitbox) {
            i += 1;
            continue;
        }
        if obj.is_deadly() {
            debug!("player touched deadly object {}", obj.id);
            return Some(PlayerSignal::Died);
        }
        match &obj.kind {
            ObjectKind::Door(door) if door.in_transition_zone(&obj.hitbox, &player.hitbox) => {
                return Some(PlayerSignal::EnteredDoor(door.side));
            }
            ObjectKind::Key(_) => {
                let mut key = room.objects.remove(i);
                let follow = match player.keys.last() {
                    Some(last) => FollowTarget::Key(last.id),
                    None => FollowTarget::Player,
                };
                if let Some(k) = key.key_mut() {
                    k.follow = Some(follow);
                }
                debug!("picked up key {}", key.id);
                player.keys.push(key);
                cues.push(Cue::Sound(SoundCue::Key));
            }
            ObjectKind::Powerup(powerup) => {
                let color = powerup.color;
                room.objects.remove(i);
                debug!("picked up {:?} powerup", color);
                player.set_color(color);
            }
            _ => i += 1,
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use raylib::prelude::Vector2;

    use crate::components::hitbox::Hitbox;
    use crate::components::player::PowerColor;
    use crate::resources::animationstore::AnimationStore;
    use crate::rooms::{MovementMode, Room};

    fn room() -> Room {
        Room::new(1, 0, Hitbox::new(0.0, 0.0, 640.0, 640.0), None, MovementMode::FreeRoam)
    }

    fn keyed_player(store: &AnimationStore, n: u32) -> Player {
        let mut player = Player::new(store, Vector2::new(320.0, 320.0), 5.0);
        for id in 0..n {
            let mut key = GameObject::key_at(100 + id, store, 0.0, 0.0, 5.0);
            key.key_mut().unwrap().follow = Some(match id {
                0 => FollowTarget::Player,
                _ => FollowTarget::Key(100 + id - 1),
            });
            player.keys.push(key);
        }
        player
    }

    #[test]
    fn locked_door_opens_and_spends_one_key() {
        let store = AnimationStore::builtin();
        let mut room = room();
        room.objects.push(GameObject::door_on(7, &store, Side::Right, DoorState::Locked));
        let mut player = keyed_player(&store, 2);
        let mut cues = Vec::new();

        unlock_on_contact(&mut player.keys, &[7], &mut room, &mut cues);

        assert_eq!(room.get(7).unwrap().door().unwrap().state, DoorState::Open);
        assert_eq!(player.keys.len(), 1);
        assert_eq!(player.keys[0].id, 100);
        assert_eq!(cues, vec![Cue::Sound(SoundCue::Unlock)]);
    }

    #[test]
    fn unlocking_an_open_door_is_a_noop() {
        let store = AnimationStore::builtin();
        let mut room = room();
        room.objects.push(GameObject::door_on(7, &store, Side::Left, DoorState::Open));
        let mut player = keyed_player(&store, 1);
        let mut cues = Vec::new();

        assert!(!unlock(&mut player.keys, 7, &mut room, &mut cues));
        assert_eq!(player.keys.len(), 1);
        assert!(cues.is_empty());
        assert_eq!(room.get(7).unwrap().door().unwrap().state, DoorState::Open);
    }

    #[test]
    fn closed_door_only_opens_through_explicit_unlock() {
        let store = AnimationStore::builtin();
        let mut room = room();
        room.objects.push(GameObject::door_on(7, &store, Side::Top, DoorState::Closed));
        let mut player = keyed_player(&store, 1);
        let mut cues = Vec::new();

        unlock_on_contact(&mut player.keys, &[7], &mut room, &mut cues);
        assert_eq!(player.keys.len(), 1);
        assert!(unlock(&mut player.keys, 7, &mut room, &mut cues));
        assert_eq!(room.get(7).unwrap().door().unwrap().state, DoorState::Open);
    }

    #[test]
    fn crate_releases_contents_at_its_center() {
        let store = AnimationStore::builtin();
        let mut room = room();
        let powerup = GameObject::powerup_at(9, &store, 0.0, 0.0, PowerColor::Blue);
        room.objects
            .push(GameObject::crate_at(8, &store, 200.0, 200.0, powerup));
        let mut player = keyed_player(&store, 1);
        let mut cues = Vec::new();

        unlock_on_contact(&mut player.keys, &[8], &mut room, &mut cues);

        assert!(room.get(8).is_none());
        let released = room.get(9).unwrap();
        assert_eq!(released.hitbox.center(), Vector2::new(224.0, 224.0));
        assert!(player.keys.is_empty());
        assert_eq!(cues, vec![Cue::Sound(SoundCue::CrateUnlock)]);
    }

    #[test]
    fn no_keys_no_unlock() {
        let store = AnimationStore::builtin();
        let mut room = room();
        room.objects.push(GameObject::door_on(7, &store, Side::Right, DoorState::Locked));
        let mut cues = Vec::new();
        let mut keys = Vec::new();
        unlock_on_contact(&mut keys, &[7], &mut room, &mut cues);
        assert_eq!(room.get(7).unwrap().door().unwrap().state, DoorState::Locked);
        assert!(cues.is_empty());
    }

    #[test]
    fn key_pickup_chains_behind_last_key() {
        let store = AnimationStore::builtin();
        let mut room = room();
        let mut player = keyed_player(&store, 1);
        let c = player.hitbox.center();
        room.objects
            .push(GameObject::key_at(50, &store, c.x - 10.0, c.y - 10.0, 5.0));
        let mut cues = Vec::new();

        assert_eq!(touch_interactables(&mut player, &mut room, &mut cues), None);
        assert!(room.get(50).is_none());
        assert_eq!(player.keys.len(), 2);
        assert_eq!(
            player.keys[1].key().unwrap().follow,
            Some(FollowTarget::Key(100))
        );
        assert_eq!(cues, vec![Cue::Sound(SoundCue::Key)]);
    }

    #[test]
    fn deadly_overlap_stops_processing() {
        let store = AnimationStore::builtin();
        let mut room = room();
        let mut player = Player::new(&store, Vector2::new(320.0, 320.0), 5.0);
        room.objects.push(GameObject::spike(1, 310.0, 310.0));
        room.objects
            .push(GameObject::powerup_at(2, &store, 310.0, 310.0, PowerColor::Red));
        let mut cues = Vec::new();

        let signal = touch_interactables(&mut player, &mut room, &mut cues);
        assert_eq!(signal, Some(PlayerSignal::Died));
        assert!(room.get(2).is_some());
        assert_eq!(player.color, PowerColor::Base);
    }

    #[test]
    fn powerup_recolors_player() {
        let store = AnimationStore::builtin();
        let mut room = room();
        let mut player = Player::new(&store, Vector2::new(320.0, 320.0), 5.0);
        room.objects
            .push(GameObject::powerup_at(2, &store, 310.0, 310.0, PowerColor::Blue));
        let mut cues = Vec::new();

        touch_interactables(&mut player, &mut room, &mut cues);
        assert_eq!(player.color, PowerColor::Blue);
        assert!(room.objects.is_empty());
    }
}
