use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use clap::Parser;
use serde::Deserialize;

use super::*;
use crate::error::{Error, Result};
use crate::modes::Mode;
use crate::scene::{spawner, ParticlePolicy};

/// Fireworks, rockets and balloons on a software canvas.
#[derive(Parser, Debug, Default)]
#[clap(name = "skyshow", version)]
pub struct Args {
    /// Canvas size in pixels.
    #[clap(long, value_name = "WxH")]
    pub size: Option<String>,

    /// Integer upscaling of the canvas in the window (1 to 16).
    #[clap(long)]
    pub scale: Option<u8>,

    /// Frames per second (1 to 240).
    #[clap(long)]
    pub fps: Option<u32>,

    /// Seed for the random generator. Runs with the same seed are identical.
    #[clap(long)]
    pub seed: Option<u64>,

    /// win, ascii, block, braille or headless.
    #[clap(long)]
    pub mode: Option<String>,

    /// Number of frames to simulate in headless mode.
    #[clap(long)]
    pub frames: Option<u32>,

    /// Keep faded particles, so exploded fireworks never leave the scene.
    #[clap(long)]
    pub keep_dead_particles: bool,

    /// TOML file with default settings.
    #[clap(long, value_name = "PATH", value_parser)]
    pub config: Option<PathBuf>,

    /// Do not log anything.
    #[clap(long)]
    pub quiet: bool,
}

/// Settings read from the TOML file. Every key is optional.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub width: Option<u16>,
    pub height: Option<u16>,
    pub scale: Option<u8>,
    pub fps: Option<u32>,
    pub seed: Option<u64>,
    pub mode: Option<String>,
    pub frames: Option<u32>,
    pub particles: Option<ParticlePolicy>,
    pub quiet: Option<bool>,

    pub rocket_interval_ms: Option<u64>,
    pub firework_interval_ms: Option<u64>,
    pub balloon_interval_ms: Option<u64>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&text, path)
    }

    pub fn parse(text: &str, path: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Resolved settings: command line over config file over defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub width: u16,
    pub height: u16,
    pub scale: u8,
    pub fps: u32,
    pub seed: Option<u64>,
    pub mode: Mode,
    pub frames: u32,
    pub policy: ParticlePolicy,
    pub quiet: bool,

    pub rocket_interval: Duration,
    pub firework_interval: Duration,
    pub balloon_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            scale: DEFAULT_SCALE,
            fps: DEFAULT_FPS,
            seed: None,
            mode: Mode::default(),
            frames: DEFAULT_FRAMES,
            policy: ParticlePolicy::default(),
            quiet: false,

            rocket_interval: spawner::ROCKET_INTERVAL,
            firework_interval: spawner::FIREWORK_INTERVAL,
            balloon_interval: spawner::BALLOON_INTERVAL,
        }
    }
}

impl Config {
    pub fn from_args(args: &Args) -> Result<Self> {
        let file = match &args.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };

        Self::resolve(args, file)
    }

    pub fn resolve(args: &Args, file: FileConfig) -> Result<Self> {
        let mut config = Config::default();

        // File first, then the command line on top.
        if let Some(w) = file.width {
            config.width = w;
        }
        if let Some(h) = file.height {
            config.height = h;
        }
        if let Some(size) = &args.size {
            (config.width, config.height) = parse_size(size)?;
        }
        if config.width == 0 || config.height == 0 {
            return Err(Error::InvalidSize(format!("{}x{}", config.width, config.height)));
        }

        config.scale = args.scale.or(file.scale).unwrap_or(config.scale);
        if !(1..=MAX_SCALE_FACTOR).contains(&config.scale) {
            return Err(Error::InvalidScale(config.scale));
        }

        config.fps = args.fps.or(file.fps).unwrap_or(config.fps);
        if !(1..=MAX_FPS).contains(&config.fps) {
            return Err(Error::InvalidFps(config.fps));
        }

        config.seed = args.seed.or(file.seed);

        if let Some(name) = args.mode.as_deref().or(file.mode.as_deref()) {
            config.mode = Mode::from_name(name)?;
        }

        config.frames = args.frames.or(file.frames).unwrap_or(config.frames);

        config.policy = if args.keep_dead_particles {
            ParticlePolicy::Retain
        } else {
            file.particles.unwrap_or(config.policy)
        };

        config.quiet = args.quiet || file.quiet.unwrap_or(false);

        let ms = |v: Option<u64>, default: Duration| v.map(Duration::from_millis).unwrap_or(default);

        config.rocket_interval = ms(file.rocket_interval_ms, config.rocket_interval);
        config.firework_interval = ms(file.firework_interval_ms, config.firework_interval);
        config.balloon_interval = ms(file.balloon_interval_ms, config.balloon_interval);

        Ok(config)
    }
}

/// Parses `WIDTHxHEIGHT`, both above zero.
pub fn parse_size(input: &str) -> Result<(u16, u16)> {
    let invalid = || Error::InvalidSize(input.to_string());

    let mut parts = input.split('x');

    let w = parts.next().and_then(|w| w.trim().parse::<u16>().ok());
    let h = parts.next().and_then(|h| h.trim().parse::<u16>().ok());

    match (w, h, parts.next()) {
        (Some(w), Some(h), None) if w > 0 && h > 0 => Ok((w, h)),
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Args {
        let mut full = vec!["skyshow"];
        full.extend_from_slice(list);
        Args::try_parse_from(full).unwrap()
    }

    fn file(text: &str) -> FileConfig {
        FileConfig::parse(text, Path::new("test.toml")).unwrap()
    }

    #[test]
    fn defaults() {
        let config = Config::resolve(&args(&[]), FileConfig::default()).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!((config.width, config.height), (800, 600));
        assert_eq!(config.mode, Mode::Win);
        assert_eq!(config.policy, ParticlePolicy::Prune);
        assert_eq!(config.rocket_interval, Duration::from_millis(500));
        assert_eq!(config.balloon_interval, Duration::from_millis(700));
    }

    #[test]
    fn file_overrides_defaults() {
        let file = file(
            r#"
            width = 320
            height = 200
            fps = 30
            mode = "braille"
            particles = "retain"
            balloon_interval_ms = 250
            "#,
        );

        let config = Config::resolve(&args(&[]), file).unwrap();

        assert_eq!((config.width, config.height), (320, 200));
        assert_eq!(config.fps, 30);
        assert_eq!(config.mode, Mode::ConBrail);
        assert_eq!(config.policy, ParticlePolicy::Retain);
        assert_eq!(config.balloon_interval, Duration::from_millis(250));
        assert_eq!(config.rocket_interval, Duration::from_millis(500));
    }

    #[test]
    fn command_line_overrides_file() {
        let file = file("width = 320\nheight = 200\nfps = 30\nseed = 1\nmode = \"ascii\"");
        let config = Config::resolve(
            &args(&["--size", "640x480", "--fps", "50", "--seed", "9", "--mode", "headless"]),
            file,
        )
        .unwrap();

        assert_eq!((config.width, config.height), (640, 480));
        assert_eq!(config.fps, 50);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.mode, Mode::Headless);
    }

    #[test]
    fn keep_dead_particles_flag() {
        let file = file("particles = \"prune\"");
        let config = Config::resolve(&args(&["--keep-dead-particles"]), file).unwrap();
        assert_eq!(config.policy, ParticlePolicy::Retain);
    }

    #[test]
    fn unknown_file_key_is_rejected() {
        let result = FileConfig::parse("colour = \"red\"", Path::new("bad.toml"));
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn missing_file_is_reported() {
        let result = FileConfig::load(Path::new("/nonexistent/skyshow.toml"));
        assert!(matches!(result, Err(Error::ReadConfig { .. })));
    }

    #[test]
    fn size_parsing() {
        assert_eq!(parse_size("800x600").unwrap(), (800, 600));
        assert_eq!(parse_size("1x1").unwrap(), (1, 1));

        for bad in ["", "800", "800x", "x600", "0x600", "800x0", "1x2x3", "-1x5", "axb"] {
            assert!(matches!(parse_size(bad), Err(Error::InvalidSize(_))), "{bad}");
        }
    }

    #[test]
    fn zero_size_from_file_is_rejected() {
        let result = Config::resolve(&args(&[]), file("width = 0"));
        assert!(matches!(result, Err(Error::InvalidSize(_))));
    }

    #[test]
    fn scale_and_fps_bounds() {
        let scale = Config::resolve(&args(&["--scale", "0"]), FileConfig::default());
        assert!(matches!(scale, Err(Error::InvalidScale(0))));

        let scale = Config::resolve(&args(&["--scale", "17"]), FileConfig::default());
        assert!(matches!(scale, Err(Error::InvalidScale(17))));

        let fps = Config::resolve(&args(&["--fps", "0"]), FileConfig::default());
        assert!(matches!(fps, Err(Error::InvalidFps(0))));

        let fps = Config::resolve(&args(&["--fps", "240"]), FileConfig::default());
        assert_eq!(fps.unwrap().fps, 240);
    }

    #[test]
    fn bad_mode_is_rejected() {
        let result = Config::resolve(&args(&["--mode", "canvas"]), FileConfig::default());
        assert!(matches!(result, Err(Error::InvalidMode(_))));
    }
}
