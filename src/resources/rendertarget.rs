//! Fixed-resolution render target.
//!
//! The game draws into a texture at its logical resolution, which the render
//! system then scales into the window with letterboxing. Pixel art is scaled
//! with nearest-neighbor filtering.
//!
//! This is a NonSend resource: the texture lives on the GPU and must only be
//! touched from the main thread.

use raylib::ffi::{self, TextureFilter};
use raylib::prelude::*;

pub struct RenderTarget {
    pub texture: RenderTexture2D,
    pub game_width: u32,
    pub game_height: u32,
}

impl RenderTarget {
    pub fn new(
        rl: &mut RaylibHandle,
        th: &RaylibThread,
        width: u32,
        height: u32,
    ) -> Result<Self, String> {
        let texture = rl
            .load_render_texture(th, width, height)
            .map_err(|e| format!("Failed to create render texture: {}", e))?;
        unsafe {
            ffi::SetTextureFilter(
                texture.texture,
                TextureFilter::TEXTURE_FILTER_POINT as i32,
            );
        }
        Ok(Self {
            texture,
            game_width: width,
            game_height: height,
        })
    }

    /// Source rectangle of the whole texture. The height is negative to undo
    /// OpenGL's flipped texture coordinates.
    pub fn source_rect(&self) -> Rectangle {
        Rectangle {
            x: 0.0,
            y: 0.0,
            width: self.game_width as f32,
            height: -(self.game_height as f32),
        }
    }
}
