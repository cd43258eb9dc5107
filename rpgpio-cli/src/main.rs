//! rpgpio - Raspberry Pi GPIO header tool
//!
//! Lists the 40-pin header with the GPIO number behind each position,
//! shows which pins are already in use, and drives individual pins.
//!
//! # Usage
//!
//! ```bash
//! # List the header, probing every pin for other users
//! rpgpio list --probe
//!
//! # Show one pin (physical position 12)
//! rpgpio show 12
//!
//! # Read BCM 17 with pull-up
//! rpgpio read --bcm 17 --pull up
//!
//! # Drive physical pin 11 high for two seconds
//! rpgpio write 11 1 --hold 2
//!
//! # 50 Hz PWM at 7.5 % on physical pin 12 for five seconds
//! rpgpio pwm 12 --frequency 50 --duty 7.5 --seconds 5
//! ```
//!
//! Without the `rppal` feature (or with `--sim`) commands run against a
//! simulated controller.

mod commands;
mod config;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::info;
use rpgpio_core::{config::init, PinTable};
use rpgpio_hal::{GpioDriver, PullMode};
use rpgpio_hal_sim::SimDriver;

use commands::{Board, PinSelector};
use config::AppConfig;

/// Raspberry Pi GPIO header tool
#[derive(Parser)]
#[command(name = "rpgpio")]
#[command(version)]
#[command(about = "Inspect and drive the pins of a Raspberry Pi 40-pin GPIO header")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (default: ./rpgpio.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Use the simulated GPIO controller
    #[arg(long, global = true)]
    sim: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Pin argument shared by per-pin commands
#[derive(Args)]
struct PinArg {
    /// Physical header position (1-40), or BCM number with --bcm
    pin: u32,

    /// Interpret PIN as a BCM GPIO number
    #[arg(long)]
    bcm: bool,
}

impl PinArg {
    fn selector(&self) -> PinSelector {
        PinSelector::new(self.pin, self.bcm)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List the header pins
    List {
        /// Check each pin for other users (briefly claims free pins)
        #[arg(short, long)]
        probe: bool,
    },

    /// Show details for one pin
    Show {
        #[command(flatten)]
        pin: PinArg,
    },

    /// Read a pin as input
    Read {
        #[command(flatten)]
        pin: PinArg,

        /// Input bias
        #[arg(long, value_enum, default_value_t = PullArg::Off)]
        pull: PullArg,
    },

    /// Drive a pin as output
    Write {
        #[command(flatten)]
        pin: PinArg,

        /// Level to drive (0 = low, anything else = high)
        level: i32,

        /// Seconds to hold the level before releasing the pin
        #[arg(long, default_value_t = 0.0)]
        hold: f32,
    },

    /// Run PWM on a pin
    Pwm {
        #[command(flatten)]
        pin: PinArg,

        /// Frequency in Hz (default from config, else 1000)
        #[arg(short, long)]
        frequency: Option<f32>,

        /// Duty cycle in percent (default from config, else 50)
        #[arg(short, long)]
        duty: Option<f32>,

        /// How long to run
        #[arg(short, long, default_value_t = 5.0)]
        seconds: f32,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PullArg {
    Off,
    Up,
    Down,
}

impl From<PullArg> for PullMode {
    fn from(arg: PullArg) -> Self {
        match arg {
            PullArg::Off => PullMode::Off,
            PullArg::Up => PullMode::Up,
            PullArg::Down => PullMode::Down,
        }
    }
}

fn seconds(value: f32) -> Result<Duration> {
    Duration::try_from_secs_f32(value).with_context(|| format!("invalid duration: {}", value))
}

fn run<D: GpioDriver>(driver: &D, cli: Cli, app: &AppConfig) -> Result<()> {
    init(driver, &app.driver).context("initializing GPIO driver")?;

    let board = Board {
        driver,
        table: PinTable::reference(),
        numbering: app.driver.numbering,
    };

    match cli.command {
        Commands::List { probe } => commands::list(&board, probe),
        Commands::Show { pin } => commands::show(&board, pin.selector()),
        Commands::Read { pin, pull } => {
            commands::read(&board, pin.selector(), pull.into()).map(|_| ())
        }
        Commands::Write { pin, level, hold } => {
            commands::write(&board, pin.selector(), level, seconds(hold)?)
        }
        Commands::Pwm {
            pin,
            frequency,
            duty,
            seconds: secs,
        } => commands::pwm(
            &board,
            pin.selector(),
            frequency.unwrap_or(app.pwm.frequency_hz),
            duty.unwrap_or(app.pwm.duty_percent),
            seconds(secs)?,
        ),
    }
}

#[cfg(feature = "rppal")]
fn run_hardware(cli: Cli, app: &AppConfig) -> Result<()> {
    let driver = rpgpio_hal_rppal::RppalDriver::new().context("opening GPIO")?;
    info!("Using rppal GPIO driver");
    run(&driver, cli, app)
}

#[cfg(not(feature = "rppal"))]
fn run_hardware(cli: Cli, app: &AppConfig) -> Result<()> {
    log::warn!("Built without the rppal feature, falling back to the simulator");
    run_simulated(cli, app)
}

fn run_simulated(cli: Cli, app: &AppConfig) -> Result<()> {
    info!("Using simulated GPIO driver");
    run(&SimDriver::new(), cli, app)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let app = AppConfig::load(cli.config.as_deref())?;

    if cli.sim {
        run_simulated(cli, &app)
    } else {
        run_hardware(cli, &app)
    }
}
