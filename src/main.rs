#[macro_use]
mod data;

mod error;
mod graphics;
mod math;
mod modes;
mod scene;

use clap::Parser;

use data::{Args, Config, Program};
use error::Result;
use modes::Mode;

fn run(args: &Args) -> Result<()> {
    let config = Config::from_args(args)?;

    data::init_logger(config.quiet);

    let prog = Program::new(&config);

    match config.mode {
        Mode::Win => modes::windowed_mode::winit_main(prog),

        Mode::Headless => {
            modes::headless_mode::headless_main(prog);
            Ok(())
        }

        #[cfg(feature = "terminal")]
        Mode::ConAscii | Mode::ConBlock | Mode::ConBrail => modes::console_mode::con_main(prog),

        #[cfg(not(feature = "terminal"))]
        mode => Err(error::Error::ModeUnavailable(mode.get_name())),
    }
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(&args) {
        log::error!("{}", e);

        // Configuration errors happen before the logger is installed,
        // and --quiet silences it.
        if !log::log_enabled!(log::Level::Error) {
            eprintln_red!("Error: {}", e);
        }

        std::process::exit(1);
    }
}
