//! Rendering.
//!
//! The frame is drawn into the fixed-resolution [`RenderTarget`] and then
//! scaled into the window with letterboxing. Draw order: walls and floor, the
//! run's room number, room objects, held keys, the player and the attack
//! swing, then the room's clear/death counters.
//!
//! Objects without a loaded texture are drawn as flat rectangles so a
//! missing asset never hides a hazard.

use bevy_ecs::prelude::*;
use raylib::prelude::*;

use crate::components::direction::Facing;
use crate::components::door::DoorState;
use crate::components::gameobject::{GameObject, ObjectKind};
use crate::components::hitbox::Hitbox;
use crate::components::player::{Player, PowerColor};
use crate::resources::animationstore::{ATTACK_SHEET, AnimationStore};
use crate::resources::debugmode::DebugMode;
use crate::resources::rendertarget::RenderTarget;
use crate::resources::screensize::ScreenSize;
use crate::resources::session::Session;
use crate::resources::texturestore::TextureStore;
use crate::resources::windowsize::WindowSize;

const WALL_COLOR: Color = Color::new(0, 0, 0, 255);
const FLOOR_COLOR: Color = Color::new(60, 60, 60, 255);
const ROOM_NUMBER_COLOR: Color = Color::new(50, 50, 50, 255);
const DEBUG_TEXT_COLOR: Color = Color::new(100, 100, 100, 255);
const ROOM_NUMBER_SIZE: i32 = 200;
const COUNTER_SIZE: i32 = 20;

/// How a sprite is turned before drawing: mirrored horizontally, then
/// rotated clockwise by `rotation` degrees around its center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orientation {
    pub flip_x: bool,
    pub rotation: f32,
}

impl Orientation {
    pub const NONE: Orientation = Orientation {
        flip_x: false,
        rotation: 0.0,
    };

    fn rotated(rotation: f32) -> Self {
        Orientation {
            flip_x: false,
            rotation,
        }
    }

    fn mirrored(rotation: f32) -> Self {
        Orientation {
            flip_x: true,
            rotation,
        }
    }
}

/// Room objects are drawn facing right; other facings mirror or turn the
/// sprite a quarter.
pub fn object_orientation(facing: Facing) -> Orientation {
    match facing {
        Facing::Left => Orientation::mirrored(0.0),
        Facing::Up => Orientation::rotated(-90.0),
        Facing::Down => Orientation::rotated(90.0),
        _ => Orientation::NONE,
    }
}

/// The player sprite stands on the floor of its gravity; free-roam players
/// face down.
pub fn player_orientation(facing: Facing) -> Orientation {
    match facing {
        Facing::Up => Orientation::rotated(180.0),
        Facing::Right => Orientation::rotated(-90.0),
        Facing::Left => Orientation::rotated(90.0),
        _ => Orientation::NONE,
    }
}

/// The swing sprite points right; every direction turns it, diagonals by an
/// eighth.
pub fn attack_orientation(direction: Facing) -> Orientation {
    match direction {
        Facing::Right => Orientation::NONE,
        Facing::Left => Orientation::mirrored(0.0),
        Facing::Down => Orientation::rotated(90.0),
        Facing::Up => Orientation::rotated(-90.0),
        Facing::DownRight => Orientation::rotated(45.0),
        Facing::UpRight => Orientation::rotated(-45.0),
        Facing::DownLeft => Orientation::mirrored(-45.0),
        Facing::UpLeft => Orientation::mirrored(45.0),
    }
}

/// Draw `src` of `tex` centered on `center`. `src` keeps the unturned frame
/// size; the orientation is applied to the drawn image only.
fn draw_oriented<D: RaylibDraw>(
    d: &mut D,
    tex: &Texture2D,
    mut src: Rectangle,
    center: Vector2,
    orientation: Orientation,
) {
    let (w, h) = (src.width, src.height);
    if orientation.flip_x {
        src.width = -src.width;
    }
    let dest = Rectangle::new(center.x, center.y, w, h);
    d.draw_texture_pro(
        tex,
        src,
        dest,
        Vector2::new(w / 2.0, h / 2.0),
        orientation.rotation,
        Color::WHITE,
    );
}

/// Repeat one frame over `area`, cropping the last row and column.
fn draw_tiled<D: RaylibDraw>(d: &mut D, tex: &Texture2D, src: Rectangle, area: &Hitbox) {
    let mut y = area.top();
    while y < area.bottom() {
        let h = src.height.min(area.bottom() - y);
        let mut x = area.left();
        while x < area.right() {
            let w = src.width.min(area.right() - x);
            let part = Rectangle::new(src.x, src.y, w, h);
            d.draw_texture_pro(
                tex,
                part,
                Rectangle::new(x, y, w, h),
                Vector2::zero(),
                0.0,
                Color::WHITE,
            );
            x += src.width;
        }
        y += src.height;
    }
}

fn power_color(color: PowerColor) -> Color {
    match color {
        PowerColor::Base => Color::LIGHTGRAY,
        PowerColor::Yellow => Color::GOLD,
        PowerColor::Blue => Color::SKYBLUE,
        PowerColor::Red => Color::RED,
    }
}

fn fallback_color(obj: &GameObject) -> Color {
    match &obj.kind {
        ObjectKind::Platform => Color::GRAY,
        ObjectKind::Spike => Color::MAROON,
        ObjectKind::Door(door) => match door.state {
            DoorState::Locked => Color::DARKBROWN,
            DoorState::Closed => Color::BROWN,
            DoorState::Open => Color::DARKGRAY,
        },
        ObjectKind::Key(_) => Color::YELLOW,
        ObjectKind::Crate(_) => Color::BEIGE,
        ObjectKind::Powerup(powerup) => power_color(powerup.color),
        ObjectKind::Crumble(_) => Color::LIGHTGRAY,
        ObjectKind::Projectile(_) => Color::WHITE,
    }
}

fn draw_object<D: RaylibDraw>(
    d: &mut D,
    obj: &GameObject,
    store: &AnimationStore,
    textures: &TextureStore,
) {
    let Some(tex) = textures.get(obj.sprite()) else {
        d.draw_rectangle_rec(obj.hitbox.to_rectangle(), fallback_color(obj));
        return;
    };
    match (&obj.kind, &obj.animation) {
        (ObjectKind::Crumble(_), Some(anim)) => {
            draw_tiled(d, tex, anim.source(store), &obj.hitbox);
        }
        (_, Some(anim)) => {
            let orientation = object_orientation(obj.facing);
            draw_oriented(d, tex, anim.source(store), obj.hitbox.center(), orientation);
        }
        (ObjectKind::Platform, None) => {
            let src = Rectangle::new(0.0, 0.0, tex.width as f32, tex.height as f32);
            d.draw_texture_pro(
                tex,
                src,
                obj.hitbox.to_rectangle(),
                Vector2::zero(),
                0.0,
                Color::WHITE,
            );
        }
        (_, None) => {
            let src = Rectangle::new(0.0, 0.0, tex.width as f32, tex.height as f32);
            let orientation = object_orientation(obj.facing);
            draw_oriented(d, tex, src, obj.hitbox.center(), orientation);
        }
    }
}

fn draw_player<D: RaylibDraw>(
    d: &mut D,
    player: &Player,
    store: &AnimationStore,
    textures: &TextureStore,
) {
    match textures.get(player.animation.sheet) {
        Some(tex) => draw_oriented(
            d,
            tex,
            player.animation.source(store),
            player.hitbox.center(),
            player_orientation(player.facing),
        ),
        None => d.draw_rectangle_rec(player.hitbox.to_rectangle(), power_color(player.color)),
    }

    if player.attack.active {
        let reach = player.attack_hitbox();
        match textures.get(ATTACK_SHEET) {
            Some(tex) => draw_oriented(
                d,
                tex,
                player.attack.swing.source(store),
                reach.center(),
                attack_orientation(player.attack.direction),
            ),
            None => d.draw_rectangle_lines_ex(reach.to_rectangle(), 2.0, Color::ORANGE),
        }
    }
}

/// A line of HUD text with its measured width in the default font.
struct HudText {
    text: String,
    width: i32,
}

impl HudText {
    fn measure(rl: &RaylibHandle, text: String, size: i32) -> Self {
        let width = rl.measure_text(&text, size);
        HudText { text, width }
    }
}

/// Run number behind the arena, and the current room's counters.
struct Hud {
    number: HudText,
    clears: HudText,
    deaths: HudText,
}

impl Hud {
    fn new(rl: &RaylibHandle, session: &Session) -> Self {
        let [number, clears, deaths] =
            hud_lines(session).map(|(text, size)| HudText::measure(rl, text, size));
        Hud {
            number,
            clears,
            deaths,
        }
    }
}

/// HUD strings and their font sizes, in [`Hud`] field order.
fn hud_lines(session: &Session) -> [(String, i32); 3] {
    let id = session.room.id;
    [
        ((session.run_clears() + 1).to_string(), ROOM_NUMBER_SIZE),
        (format!("clears: {}", session.room_clears(id)), COUNTER_SIZE),
        (format!("deaths: {}", session.room_deaths(id)), COUNTER_SIZE),
    ]
}

fn draw_world<D: RaylibDraw>(
    d: &mut D,
    session: &Session,
    textures: &TextureStore,
    hud: &Hud,
    area: (i32, i32),
    fps: u32,
    debug: bool,
) {
    let room = &session.room;
    let store = session.store();
    let b = room.bounds;

    d.clear_background(WALL_COLOR);
    d.draw_rectangle_rec(
        Rectangle::new(b.left() - 2.0, b.top() - 2.0, b.width() + 4.0, b.height() + 4.0),
        FLOOR_COLOR,
    );

    d.draw_text(
        &hud.number.text,
        area.0 / 2 - hud.number.width / 2,
        area.1 / 2 - ROOM_NUMBER_SIZE / 2,
        ROOM_NUMBER_SIZE,
        ROOM_NUMBER_COLOR,
    );

    for obj in &room.objects {
        draw_object(d, obj, store, textures);
    }
    for key in &session.player.keys {
        draw_object(d, key, store, textures);
    }
    draw_player(d, &session.player, store, textures);

    let x = b.left() as i32 - 10;
    let y = b.top() as i32;
    d.draw_text(
        &hud.clears.text,
        x - hud.clears.width,
        y,
        COUNTER_SIZE,
        ROOM_NUMBER_COLOR,
    );
    d.draw_text(
        &hud.deaths.text,
        x - hud.deaths.width,
        y + COUNTER_SIZE + 10,
        COUNTER_SIZE,
        ROOM_NUMBER_COLOR,
    );

    if debug {
        for obj in room.objects.iter().chain(&session.player.keys) {
            d.draw_rectangle_lines_ex(obj.hitbox.to_rectangle(), 1.0, Color::RED);
        }
        d.draw_rectangle_lines_ex(session.player.hitbox.to_rectangle(), 1.0, Color::RED);
        if session.player.attack.active {
            d.draw_rectangle_lines_ex(
                session.player.attack_hitbox().to_rectangle(),
                1.0,
                Color::RED,
            );
        }
        let text = format!(
            "DEBUG (F11 to toggle) | FPS: {} | room {} tier {} age {}",
            fps, room.id, room.difficulty, room.age
        );
        d.draw_text(&text, 10, 10, 10, DEBUG_TEXT_COLOR);
    }
}

/// Draw the session into the render target, then the target into the
/// window.
pub fn render_system(
    mut rl: NonSendMut<RaylibHandle>,
    th: NonSend<RaylibThread>,
    mut target: NonSendMut<RenderTarget>,
    session: Res<Session>,
    textures: Res<TextureStore>,
    screen: Res<ScreenSize>,
    window: Res<WindowSize>,
    debug: Option<Res<DebugMode>>,
) {
    let area = (screen.w, screen.h);
    let src = target.source_rect();
    let dest = window.calculate_letterbox(target.game_width, target.game_height);
    let fps = rl.get_fps();
    let hud = Hud::new(&rl, &session);

    let mut d = rl.begin_drawing(&th);
    {
        let mut t = d.begin_texture_mode(&th, &mut target.texture);
        draw_world(&mut t, &session, &textures, &hud, area, fps, debug.is_some());
    }
    d.clear_background(Color::BLACK);
    d.draw_texture_pro(
        target.texture.texture(),
        src,
        dest,
        Vector2::zero(),
        0.0,
        Color::WHITE,
    );
}
