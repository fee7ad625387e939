//! Platforms that break a moment after being touched.

use super::direction::Facing;
use super::gameobject::{GameObject, ObjectFlags, ObjectId, ObjectKind, ObjectUpdate};
use super::hitbox::Hitbox;
use crate::components::animation::Animation;
use crate::resources::animationstore::{AnimationStore, CRUMBLE_SHEET};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrumblePlatform {
    pub crumbling: bool,
    /// Ticks left once crumbling.
    pub countdown: u32,
}

impl CrumblePlatform {
    pub fn new(countdown: u32) -> Self {
        Self {
            crumbling: false,
            countdown,
        }
    }

    /// Start crumbling. Returns `false` if it already was.
    pub fn crumble(&mut self) -> bool {
        if self.crumbling {
            return false;
        }
        self.crumbling = true;
        true
    }

    pub fn tick(&mut self) -> ObjectUpdate {
        if !self.crumbling {
            return ObjectUpdate::Keep;
        }
        self.countdown = self.countdown.saturating_sub(1);
        if self.countdown == 0 {
            ObjectUpdate::Remove
        } else {
            ObjectUpdate::Keep
        }
    }
}

impl GameObject {
    /// Crumbling platform stretched over the given rectangle. The countdown
    /// lasts one `crumble` animation cycle; `facing` only rotates the tiles.
    pub fn crumble_platform(
        id: ObjectId,
        store: &AnimationStore,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        facing: Facing,
    ) -> Self {
        let countdown = store.cycle_ticks(CRUMBLE_SHEET, "crumble");
        Self {
            id,
            hitbox: Hitbox::new(x, y, width, height),
            facing,
            flags: ObjectFlags::SOLID,
            animation: Some(Animation::new(CRUMBLE_SHEET)),
            kind: ObjectKind::Crumble(CrumblePlatform::new(countdown)),
        }
    }

    /// Trigger a crumble platform. Other kinds and platforms already
    /// crumbling are left alone.
    pub fn crumble(&mut self) -> bool {
        let started = match &mut self.kind {
            ObjectKind::Crumble(platform) => platform.crumble(),
            _ => false,
        };
        if started {
            self.set_animation_state("crumble");
        }
        started
    }
}
