#[cfg(feature = "terminal")]
pub mod console_mode;

pub mod headless_mode;
pub mod windowed_mode;

use crate::error::{Error, Result};

#[derive(Debug, PartialEq, Eq, Copy, Clone, Default)]
pub enum Mode {
    #[default]
    Win,
    ConAscii,
    ConBlock,
    ConBrail,
    Headless,
}

impl Mode {
    pub fn from_name(name: &str) -> Result<Mode> {
        match name {
            "win" | "window" => Ok(Mode::Win),
            "ascii" => Ok(Mode::ConAscii),
            "block" => Ok(Mode::ConBlock),
            "braille" => Ok(Mode::ConBrail),
            "headless" => Ok(Mode::Headless),
            other => Err(Error::InvalidMode(other.to_string())),
        }
    }

    pub fn get_name(&self) -> &'static str {
        match self {
            Mode::Win => "window",
            Mode::ConAscii => "ascii",
            Mode::ConBlock => "block",
            Mode::ConBrail => "braille",
            Mode::Headless => "headless",
        }
    }

    /// Cycles through the terminal renderers; other modes stay put.
    pub fn next(self) -> Self {
        match self {
            Mode::ConAscii => Mode::ConBlock,
            Mode::ConBlock => Mode::ConBrail,
            Mode::ConBrail => Mode::ConAscii,
            _ => self,
        }
    }

    pub fn is_con(&self) -> bool {
        matches!(self, Mode::ConAscii | Mode::ConBlock | Mode::ConBrail)
    }
}
