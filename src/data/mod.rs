#[macro_use]
mod logger;

pub mod config;
pub mod delta;

use std::time::Duration;

use crate::graphics::{Canvas, Surface};
use crate::math::rng::{scene_rng, SceneRng};
use crate::modes::Mode;
use crate::scene::{Scene, Spawner};

pub use config::{Args, Config};
pub use logger::{init as init_logger, set_log_enabled};

pub const DEFAULT_WIDTH: u16 = 800;
pub const DEFAULT_HEIGHT: u16 = 600;
pub const DEFAULT_SCALE: u8 = 1;
pub const DEFAULT_FPS: u32 = 60;
pub const DEFAULT_FRAMES: u32 = 600;

pub const MAX_SCALE_FACTOR: u8 = 16;
pub const MAX_FPS: u32 = 240;

/// Window pixel count past which drawing on the CPU gets sluggish.
pub const LARGE_CANVAS: usize = 1920 * 1080;

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Command {
    TogglePause,
    Reset,
    SwitchConMode,
    Blank,
    Close,
}

impl Command {
    pub fn is_close_requested(&self) -> bool {
        *self == Command::Close
    }
}

/// Main program struct
///
/// Owns the canvas and everything drawn on it. The front ends feed it
/// frame times and key commands; it never touches a window or terminal.
pub struct Program {
    pub pix: Canvas,

    scene: Scene,
    spawner: Spawner,
    rng: SceneRng,
    seed: Option<u64>,

    mode: Mode,
    scale: u8,
    fps: u32,
    refresh_rate: Duration,
    frames: u32,
    quiet: bool,

    paused: bool,

    // Simulation clock; stands still while paused.
    sim_time: Duration,
    frame: u64,
}

impl Program {
    pub fn new(config: &Config) -> Self {
        let (w, h) = (config.width, config.height);

        Self {
            pix: Canvas::new(w as usize, h as usize),

            scene: Scene::new(w as f32, h as f32, config.policy),
            spawner: Spawner::new(
                config.rocket_interval,
                config.firework_interval,
                config.balloon_interval,
            ),
            rng: scene_rng(config.seed),
            seed: config.seed,

            mode: config.mode,
            scale: config.scale,
            fps: config.fps,
            refresh_rate: Duration::from_secs(1) / config.fps.max(1),
            frames: config.frames,
            quiet: config.quiet,

            paused: false,

            sim_time: Duration::ZERO,
            frame: 0,
        }
    }

    /// Advances the simulation clock by `dt`, lets the spawner catch up,
    /// then ticks the scene onto the canvas. Returns false when paused.
    pub fn render(&mut self, dt: Duration) -> bool {
        if self.paused {
            return false;
        }

        self.sim_time += dt;
        self.spawner.poll(self.sim_time, &mut self.scene, &mut self.rng);
        self.scene.tick(&mut self.pix, &mut self.rng);
        self.frame += 1;

        true
    }

    /// Returns true when the canvas should be shown again even if the
    /// simulation is paused.
    pub fn eval_command(&mut self, cmd: Command) -> bool {
        match cmd {
            Command::TogglePause => {
                self.toggle_pause();
                false
            }

            Command::Reset => {
                self.reset();
                true
            }

            Command::SwitchConMode => {
                self.set_mode(self.mode.next());
                true
            }

            Command::Blank | Command::Close => false,
        }
    }

    pub fn toggle_pause(&mut self) {
        self.paused ^= true;

        log::info!("{}", if self.paused { "Paused" } else { "Resumed" });
    }

    /// Empties the sky. Spawn timers restart from the current
    /// simulation time.
    pub fn reset(&mut self) {
        self.scene.clear();
        self.spawner.reset(self.sim_time);
        self.pix.clear();

        log::info!("Scene cleared");
    }

    pub fn set_mode(&mut self, mode: Mode) {
        if mode != self.mode {
            log::info!("Switching to {} renderer", mode.get_name());
        }

        self.mode = mode;
    }

    pub fn print_startup_info(&self) {
        log::info!(
            "skyshow {}: {}x{} canvas at {} fps",
            env!("CARGO_PKG_VERSION"),
            self.pix.width(),
            self.pix.height(),
            self.fps,
        );

        if self.mode.is_con() {
            log::info!("Running in terminal, renderer: {}", self.mode.get_name());
        } else {
            log::info!("Running {}", self.mode.get_name());
        }

        match self.seed {
            Some(seed) => log::info!("Seed: {}", seed),
            None => log::debug!("Seeded from entropy"),
        }

        log::debug!("Particles: {:?}", self.scene.policy());

        let scale = self.scale as usize;
        if self.mode == Mode::Win && self.pix.width() * self.pix.height() * scale * scale > LARGE_CANVAS
        {
            log::warn!(
                "A {}x{} window is large for a CPU renderer; expect dropped frames.",
                self.pix.width() * scale,
                self.pix.height() * scale,
            );
        }
    }

    pub fn print_summary(&self) {
        log::info!(
            "{} frames, {:.1}s simulated: {} rockets, {} fireworks ({} particles), {} balloons",
            self.frame,
            self.sim_time.as_secs_f32(),
            self.scene.rockets().len(),
            self.scene.fireworks().len(),
            self.scene.particle_count(),
            self.scene.balloons().len(),
        );
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn scale(&self) -> u8 {
        self.scale
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn refresh_rate(&self) -> Duration {
        self.refresh_rate
    }

    pub fn frames(&self) -> u32 {
        self.frames
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn sim_time(&self) -> Duration {
        self.sim_time
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }
}
