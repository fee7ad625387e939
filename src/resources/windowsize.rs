//! Window size resource.
//!
//! Tracks the OS window dimensions, which may differ from the logical render
//! resolution. Updated every frame to follow resizes.

use bevy_ecs::prelude::Resource;
use raylib::prelude::*;

#[derive(Resource, Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowSize {
    pub w: i32,
    pub h: i32,
}

impl WindowSize {
    /// Largest rectangle with the game's aspect ratio that fits the window,
    /// centered. Bars go on the sides of wide windows and above and below
    /// tall ones.
    pub fn calculate_letterbox(&self, game_width: u32, game_height: u32) -> Rectangle {
        let game_w = game_width as f32;
        let game_h = game_height as f32;
        let window_w = self.w as f32;
        let window_h = self.h as f32;

        if window_w / window_h > game_w / game_h {
            let scaled_w = game_w * window_h / game_h;
            Rectangle {
                x: (window_w - scaled_w) / 2.0,
                y: 0.0,
                width: scaled_w,
                height: window_h,
            }
        } else {
            let scaled_h = game_h * window_w / game_w;
            Rectangle {
                x: 0.0,
                y: (window_h - scaled_h) / 2.0,
                width: window_w,
                height: scaled_h,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_aspect_fills_the_window() {
        let ws = WindowSize { w: 1920, h: 1080 };
        let r = ws.calculate_letterbox(1280, 720);
        assert_eq!((r.x, r.y, r.width, r.height), (0.0, 0.0, 1920.0, 1080.0));
    }

    #[test]
    fn wide_window_is_pillarboxed() {
        let ws = WindowSize { w: 2000, h: 720 };
        let r = ws.calculate_letterbox(1280, 720);
        assert_eq!(r.width, 1280.0);
        assert_eq!(r.x, 360.0);
        assert_eq!(r.y, 0.0);
    }

    #[test]
    fn tall_window_is_letterboxed() {
        let ws = WindowSize { w: 1280, h: 1000 };
        let r = ws.calculate_letterbox(1280, 720);
        assert_eq!(r.height, 720.0);
        assert_eq!(r.y, 140.0);
    }
}
