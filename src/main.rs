//! # kiln CLI Entry Point
//!
//! `kiln [MODE]` where MODE is one of:
//! - `debug` (default): incremental debug build
//! - `release`: incremental optimized build in its own object tree
//! - `watch`: debug build, then rebuild whenever `src/` changes
//! - `clean`: remove object trees, the executable and log files
//!
//! Any other mode is treated as `debug`.

use anyhow::Result;
use clap::Parser;
use std::path::Path;
use std::process::ExitCode;

use kiln::build::{self, BuildProfile, Settings};
use kiln::error::BuildError;
use kiln::ui;

#[derive(Parser)]
#[command(name = "kiln")]
#[command(about = "Incremental build driver for C projects", version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
struct Cli {
    /// debug, release, watch or clean
    #[arg(default_value = "debug")]
    mode: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Debug,
    Release,
    Watch,
    Clean,
}

impl Mode {
    fn from_arg(arg: &str) -> Self {
        match arg {
            "clean" => Mode::Clean,
            "release" => Mode::Release,
            "watch" => Mode::Watch,
            _ => Mode::Debug,
        }
    }

    fn profile(self) -> BuildProfile {
        match self {
            Mode::Release => BuildProfile::Release,
            _ => BuildProfile::Debug,
        }
    }
}

fn run(mode: Mode) -> Result<()> {
    let root = Path::new(".");
    let config = build::load_config(root)?;
    let settings = Settings::from_config(root, &config, mode.profile())?;

    match mode {
        Mode::Clean => build::clean(&settings),
        Mode::Watch => build::watch(&settings.with_discovered_flags()?),
        Mode::Debug | Mode::Release => {
            build::build_project(&settings.with_discovered_flags()?)?;
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(Mode::from_arg(&cli.mode)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ui::error(format!("{:#}", e));
            let code = e
                .downcast_ref::<BuildError>()
                .map(BuildError::exit_code)
                .unwrap_or(1);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}
