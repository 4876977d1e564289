//! Tile raycaster: first-person view of a tile map, in a window or dumped
//! to a PPM image.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use raylib::prelude::*;
use tracing::{debug, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use tile_raycaster::config::{RenderConfig, DEFAULT_FOV_DEG, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use tile_raycaster::core::player::Player;
use tile_raycaster::core::process_events::process_events;
use tile_raycaster::core::tilemap::{TileMap, TilePalette};
use tile_raycaster::error::{RaycastError, Result};
use tile_raycaster::render::casters::{DEFAULT_MAX_DISTANCE, DEFAULT_STEP};
use tile_raycaster::render::color;
use tile_raycaster::render::framebuffer::{Framebuffer, TileLayer};
use tile_raycaster::render::minimap::{draw_view_cone, draw_viewer_marker, map_image};
use tile_raycaster::render::ppm::{gradient, save_ppm, PpmFormat};
use tile_raycaster::render::render3d::{render_3d, DEFAULT_WALL_SCALE};

#[derive(Parser)]
#[command(name = "raycaster")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Map file: one row of tile ids per line
    #[arg(short, long, global = true, default_value = "map.txt")]
    map: PathBuf,

    /// Screen width in pixels
    #[arg(long, global = true, default_value_t = DEFAULT_WIDTH)]
    width: u32,

    /// Screen height in pixels
    #[arg(long, global = true, default_value_t = DEFAULT_HEIGHT)]
    height: u32,

    /// Field of view in degrees
    #[arg(long, global = true, default_value_t = DEFAULT_FOV_DEG)]
    fov: f32,

    /// Ray marching step in pixels
    #[arg(long, global = true, default_value_t = DEFAULT_STEP)]
    step: f32,

    /// Give up on a ray after this many pixels
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_DISTANCE)]
    max_distance: f32,

    /// Wall height scale; larger values give shorter walls
    #[arg(long, global = true, default_value_t = DEFAULT_WALL_SCALE)]
    wall_scale: f32,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open a window and walk around (WASD/arrows, mouse to turn, M toggles the map)
    Play {
        /// Start in the top-down map view
        #[arg(long)]
        map_only: bool,
    },

    /// Render a single frame to a PPM file
    Dump {
        /// What to render
        #[arg(value_enum, long, default_value = "scene")]
        view: DumpView,

        /// PPM type tag, P3 or P6
        #[arg(short, long, default_value = "P6", value_parser = parse_format)]
        format: PpmFormat,

        /// Output file
        #[arg(short, long, default_value = "out.ppm")]
        output: PathBuf,

        /// Viewer x in pixels (defaults to the first empty cell)
        #[arg(long)]
        x: Option<f32>,

        /// Viewer y in pixels (defaults to the first empty cell)
        #[arg(long)]
        y: Option<f32>,

        /// Viewer heading in degrees
        #[arg(long, default_value_t = 0.0)]
        heading: f32,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DumpView {
    /// First-person frame
    Scene,
    /// Top-down map with the viewer overlay
    Map,
    /// Channel-order test pattern
    Gradient,
}

fn parse_format(s: &str) -> Result<PpmFormat> {
    s.parse()
}

/// Map, palette and rasterized tile ids for one session.
struct World {
    map: TileMap,
    palette: TilePalette,
    layer: TileLayer,
}

impl World {
    fn load(cfg: &RenderConfig, path: &Path) -> Result<Self> {
        let map = TileMap::load(path)?;
        let palette = TilePalette::default();
        map.validate_against(&palette)?;
        let layer = TileLayer::rasterize(&map, cfg.width, cfg.height);
        Ok(Self { map, palette, layer })
    }

    fn spawn(&self, cfg: &RenderConfig, x: Option<f32>, y: Option<f32>, heading: f32) -> Player {
        let (sx, sy) = Player::spawn_point(&self.map, cfg.width, cfg.height).unwrap_or_else(|| {
            warn!("Map has no empty cell, placing viewer at screen center");
            (cfg.width as f32 * 0.5, cfg.height as f32 * 0.5)
        });
        let mut player = Player::new(x.unwrap_or(sx), y.unwrap_or(sy), heading).with_fov(cfg.fov);
        player.clamp_to(&self.layer);
        debug!(x = player.pos.x, y = player.pos.y, heading, "Viewer placed");
        player
    }
}

fn draw_map_view(fb: &mut Framebuffer, map_fb: &Framebuffer, world: &World, cfg: &RenderConfig, player: &Player) {
    fb.color_buffer.copy_from_slice(&map_fb.color_buffer);
    draw_view_cone(fb, &world.layer, &cfg.caster, player, color::WHITE);
    draw_viewer_marker(fb, player, color::BLACK);
}

fn run_window(cfg: &RenderConfig, world: &World, map_only: bool) -> Result<()> {
    let (mut window, raylib_thread) = raylib::init()
        .size(cfg.width as i32, cfg.height as i32)
        .title("Tile Raycaster")
        .build();
    window.disable_cursor();
    window.set_target_fps(60);

    let blank = Image::gen_image_color(cfg.width as i32, cfg.height as i32, Color::BLACK);
    let mut texture = window
        .load_texture_from_image(&raylib_thread, &blank)
        .map_err(|e| RaycastError::Window(format!("{e:?}")))?;

    let map_fb = map_image(&world.map, &world.palette, cfg.width, cfg.height);
    let mut framebuffer = Framebuffer::new(cfg.width, cfg.height);
    let mut scratch = Vec::new();
    let mut player = world.spawn(cfg, None, None, 0.0);
    let mut mode_3d = !map_only;

    info!(width = cfg.width, height = cfg.height, "Window opened");

    while !window.window_should_close() {
        if window.is_key_pressed(KeyboardKey::KEY_M) {
            mode_3d = !mode_3d;
            debug!(mode_3d, "Toggled view");
        }

        process_events(&window, &mut player, &world.layer);

        if mode_3d {
            render_3d(&mut framebuffer, &world.layer, &cfg.caster, &player, &cfg.shading, cfg.wall_scale);
        } else {
            draw_map_view(&mut framebuffer, &map_fb, world, cfg, &player);
        }
        framebuffer.upload_to_texture(&mut texture, &mut scratch);

        let fps_now = window.get_fps();
        let mut d = window.begin_drawing(&raylib_thread);
        d.clear_background(Color::BLACK);
        d.draw_texture(&texture, 0, 0, Color::WHITE);
        d.draw_text(&format!("FPS: {}", fps_now), 10, 10, 20, Color::WHITE);
        if player.sprinting {
            d.draw_text("SPRINT", 10, 40, 20, Color::RED);
        }
    }

    info!("Window closed");
    Ok(())
}

fn run_dump(
    cfg: &RenderConfig,
    map_path: &Path,
    view: DumpView,
    format: PpmFormat,
    output: &Path,
    pose: (Option<f32>, Option<f32>, f32),
) -> Result<()> {
    let fb = match view {
        DumpView::Gradient => gradient(cfg.width, cfg.height),
        DumpView::Scene | DumpView::Map => {
            let world = World::load(cfg, map_path)?;
            let (x, y, heading) = pose;
            let player = world.spawn(cfg, x, y, heading.to_radians());
            let mut fb = Framebuffer::new(cfg.width, cfg.height);
            if view == DumpView::Scene {
                render_3d(&mut fb, &world.layer, &cfg.caster, &player, &cfg.shading, cfg.wall_scale);
            } else {
                let map_fb = map_image(&world.map, &world.palette, cfg.width, cfg.height);
                draw_map_view(&mut fb, &map_fb, &world, cfg, &player);
            }
            fb
        }
    };
    save_ppm(output, &fb, format)
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cfg = RenderConfig::new(cli.width, cli.height, cli.fov, cli.step, cli.max_distance, cli.wall_scale)?;

    match cli.command.unwrap_or(Commands::Play { map_only: false }) {
        Commands::Play { map_only } => {
            let world = World::load(&cfg, &cli.map)?;
            run_window(&cfg, &world, map_only)?;
        }
        Commands::Dump { view, format, output, x, y, heading } => {
            run_dump(&cfg, &cli.map, view, format, &output, (x, y, heading))?;
        }
    }

    Ok(())
}
