//! Loaded textures keyed by logical image name.
//!
//! Sprite sheets are stored under their sheet name (`player-sheet`, ...),
//! still images under their image name (`platform`, `spike`, `arrow`).
//! Missing textures are not an error: the renderer draws flat rectangles
//! instead.

use bevy_ecs::prelude::Resource;
use log::warn;
use raylib::prelude::*;
use rustc_hash::FxHashMap;

#[derive(Resource, Default)]
pub struct TextureStore {
    map: FxHashMap<&'static str, Texture2D>,
}

impl TextureStore {
    pub fn insert(&mut self, name: &'static str, texture: Texture2D) {
        self.map.insert(name, texture);
    }

    pub fn get(&self, name: &str) -> Option<&Texture2D> {
        self.map.get(name)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Load `{dir}/{name}.png` for every name. Failures are logged and
    /// skipped.
    pub fn load_all(
        &mut self,
        rl: &mut RaylibHandle,
        th: &RaylibThread,
        dir: &str,
        names: &[&'static str],
    ) {
        for &name in names {
            let path = format!("{}/{}.png", dir, name);
            match rl.load_texture(th, &path) {
                Ok(texture) => self.insert(name, texture),
                Err(e) => warn!("Texture '{}' not loaded from {}: {}", name, path, e),
            }
        }
    }
}
