use std::path::PathBuf;

/// Everything that can stop the program before or while it shows
/// the animation. The scene itself cannot fail.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot read config file {path}: {source}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid size {0:?}: expected WIDTHxHEIGHT, both above zero")]
    InvalidSize(String),

    #[error("invalid scale {0}: expected 1 to 16")]
    InvalidScale(u8),

    #[error("invalid refresh rate {0}: expected 1 to 240")]
    InvalidFps(u32),

    #[error("unknown mode {0:?}: expected win, ascii, block, braille or headless")]
    InvalidMode(String),

    #[error("{0} mode is not available in this build")]
    ModeUnavailable(&'static str),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("cannot create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("cannot present to window: {0}")]
    Surface(#[from] softbuffer::SoftBufferError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
