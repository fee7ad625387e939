//! Axis-aligned rectangle used for collision and placement.
//!
//! The hitbox stores its top-left corner and size in pixels. Edge setters move
//! the box without resizing it, mirroring how room layouts are authored
//! ("put this spike's bottom on the floor").

use raylib::prelude::{Rectangle, Vector2};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hitbox {
    /// Top-left corner.
    pub pos: Vector2,
    /// Width and height.
    pub size: Vector2,
}

impl Hitbox {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vector2::new(x, y),
            size: Vector2::new(width, height),
        }
    }

    pub fn left(&self) -> f32 {
        self.pos.x
    }
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }
    pub fn top(&self) -> f32 {
        self.pos.y
    }
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
    pub fn width(&self) -> f32 {
        self.size.x
    }
    pub fn height(&self) -> f32 {
        self.size.y
    }

    pub fn center(&self) -> Vector2 {
        Vector2::new(self.pos.x + self.size.x / 2.0, self.pos.y + self.size.y / 2.0)
    }

    pub fn set_left(&mut self, x: f32) {
        self.pos.x = x;
    }
    pub fn set_right(&mut self, x: f32) {
        self.pos.x = x - self.size.x;
    }
    pub fn set_top(&mut self, y: f32) {
        self.pos.y = y;
    }
    pub fn set_bottom(&mut self, y: f32) {
        self.pos.y = y - self.size.y;
    }

    pub fn set_center(&mut self, center: Vector2) {
        self.pos = Vector2::new(center.x - self.size.x / 2.0, center.y - self.size.y / 2.0);
    }

    pub fn translate(&mut self, delta: Vector2) {
        self.pos = self.pos + delta;
    }

    /// Copy of this box displaced by `(dx, dy)`.
    pub fn shifted(&self, dx: f32, dy: f32) -> Hitbox {
        Hitbox {
            pos: Vector2::new(self.pos.x + dx, self.pos.y + dy),
            size: self.size,
        }
    }

    /// Swap width and height in place, keeping the top-left corner.
    pub fn swap_dims(&mut self) {
        self.size = Vector2::new(self.size.y, self.size.x);
    }

    /// Strict overlap: boxes that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Hitbox) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// `other` lies completely inside `self` (edges included).
    pub fn contains(&self, other: &Hitbox) -> bool {
        other.left() >= self.left()
            && other.right() <= self.right()
            && other.top() >= self.top()
            && other.bottom() <= self.bottom()
    }

    pub fn to_rectangle(&self) -> Rectangle {
        Rectangle {
            x: self.pos.x,
            y: self.pos.y,
            width: self.size.x,
            height: self.size.y,
        }
    }
}
