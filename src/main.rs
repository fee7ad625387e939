//! Rooms main entry point.
//!
//! A room-by-room action game written in Rust using:
//! - **raylib** for windowing, graphics, and audio
//! - **bevy_ecs** for resources, observers and the frame schedule
//!
//! The simulation itself lives in the [`Session`](rooms::resources::session::Session)
//! resource; the schedule feeds it input once per frame and carries its
//! cues to the audio thread.
//!
//! # Main Loop
//!
//! 1. Initialize the raylib window, the ECS world and its resources
//! 2. Run the setup system: textures, audio loads, room table, session
//! 3. Register observers and systems
//! 4. Run the main game loop:
//!    - Advance world time
//!    - Tick the session, forward its cues to audio
//!    - Render into the fixed-resolution target, letterboxed into the window
//!    - Poll input for the next frame
//! 5. Clean up the audio thread on exit
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --seed 42 --debug
//! ```

use std::path::PathBuf;

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use clap::Parser;
use log::{error, info, warn};

use rooms::events::pause::toggle_pause_observer;
use rooms::events::quit::quit_observer;
use rooms::events::switchdebug::switch_debug_observer;
use rooms::events::switchfullscreen::{SwitchFullScreenEvent, switch_fullscreen_observer};
use rooms::game::{self, LaunchOptions};
use rooms::resources::audio::{setup_audio, shutdown_audio};
use rooms::resources::debugmode::DebugMode;
use rooms::resources::gameconfig::GameConfig;
use rooms::resources::input::InputState;
use rooms::resources::quitgame::QuitGame;
use rooms::resources::rendertarget::RenderTarget;
use rooms::resources::screensize::ScreenSize;
use rooms::resources::windowsize::WindowSize;
use rooms::resources::worldtime::WorldTime;
use rooms::rooms::RoomId;
use rooms::systems::audio::{
    forward_audio_cmds, log_audio_messages, poll_audio_messages, update_bevy_audio_cmds,
    update_bevy_audio_messages,
};
use rooms::systems::input::update_input_state;
use rooms::systems::render::render_system;
use rooms::systems::session::{forward_session_cues, session_tick};
use rooms::systems::time::update_world_time;

/// Rooms, a 2D room-by-room action game
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// INI configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// JSON room table, overriding the one named in the config.
    #[arg(long, value_name = "PATH")]
    rooms: Option<PathBuf>,

    /// Start every run in this room.
    #[arg(long, value_name = "ID")]
    room: Option<RoomId>,

    /// Seed the session's random choices.
    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    /// Start with the hitbox overlay enabled.
    #[arg(long)]
    debug: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // --------------- Raylib window & assets ---------------
    let mut config = GameConfig::with_path(&cli.config);
    match config.load_from_file() {
        Ok(()) => info!("Loaded config from {}", cli.config.display()),
        Err(e) => warn!("{}; using default config", e),
    }

    let (window_width, window_height) = config.window_size();
    let mut builder = raylib::init();
    builder
        .size(window_width as i32, window_height as i32)
        .resizable()
        .title("Rooms");
    if config.vsync {
        builder.vsync();
    }
    let (mut rl, thread) = builder.build();
    rl.set_target_fps(config.target_fps);
    // Esc is bound to the quit event instead
    rl.set_exit_key(None);

    // --------------- Render target for fixed-resolution rendering ---------------
    let render_target =
        match RenderTarget::new(&mut rl, &thread, config.render_width, config.render_height) {
            Ok(target) => target,
            Err(e) => {
                error!("{}", e);
                return;
            }
        };

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    // ScreenSize is the game's internal render resolution
    world.insert_resource(ScreenSize {
        w: config.render_width as i32,
        h: config.render_height as i32,
    });
    // WindowSize is the actual window dimensions (updated each frame)
    world.insert_resource(WindowSize {
        w: rl.get_screen_width(),
        h: rl.get_screen_height(),
    });
    let start_fullscreen = config.fullscreen;
    world.insert_resource(config);
    world.insert_resource(InputState::default());
    world.insert_resource(LaunchOptions {
        rooms_file: cli.rooms,
        forced_room: cli.room,
        seed: cli.seed,
    });
    if cli.debug {
        world.insert_resource(DebugMode {});
    }
    world.insert_non_send_resource(render_target);

    // Init audio, before the setup system writes its load commands
    setup_audio(&mut world);

    world.insert_non_send_resource(rl);
    world.insert_non_send_resource(thread);

    world.spawn(Observer::new(switch_debug_observer));
    world.spawn(Observer::new(switch_fullscreen_observer));
    world.spawn(Observer::new(toggle_pause_observer));
    world.spawn(Observer::new(quit_observer));
    // Ensure the observers are registered before we run any systems that may trigger events.
    world.flush();

    let setup_system_id = world.register_system(game::setup);
    if let Err(e) = world.run_system(setup_system_id) {
        error!("Game setup failed: {}", e);
        shutdown_audio(&mut world);
        return;
    }

    if start_fullscreen {
        world.trigger(SwitchFullScreenEvent {});
    }

    let mut update = Schedule::default();
    update.add_systems(
        (
            session_tick,
            forward_session_cues,
            update_bevy_audio_cmds,
            forward_audio_cmds,
            poll_audio_messages,
            update_bevy_audio_messages,
            log_audio_messages,
            render_system,
            update_input_state,
        )
            .chain(),
    );

    if let Err(e) = update.initialize(&mut world) {
        error!("Failed to initialize schedule: {}", e);
        shutdown_audio(&mut world);
        return;
    }

    // --------------- Main loop ---------------
    while !world
        .non_send_resource::<raylib::RaylibHandle>()
        .window_should_close()
        && !world.contains_resource::<QuitGame>()
    {
        let dt = world
            .non_send_resource::<raylib::RaylibHandle>()
            .get_frame_time();
        update_world_time(&mut world, dt);

        update.run(&mut world);

        world.clear_trackers();

        // Update window size each frame (may change due to resize)
        let (new_w, new_h) = {
            let rl = world.non_send_resource::<raylib::RaylibHandle>();
            (rl.get_screen_width(), rl.get_screen_height())
        };
        {
            let mut window_size = world.resource_mut::<WindowSize>();
            window_size.w = new_w;
            window_size.h = new_h;
        }
    }
    shutdown_audio(&mut world);
}
