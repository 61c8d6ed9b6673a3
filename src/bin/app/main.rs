//! Command line front end for the zone light engine

mod logger;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;

use clap::{ArgAction, Parser, Subcommand};
use myrtio_zone_light::config::ConfigError;
use myrtio_zone_light::sink::{LogSink, PrivilegedWriter, ZoneFile};
use myrtio_zone_light::store::StoreError;
use myrtio_zone_light::{
    ColorSink, Config, Duration, LightError, ModeCoordinator, ModeId, ModeStore,
    PersistedMode, Rgb, WriteMethod, decode_hex, encode_hex,
};

#[derive(Parser, Debug)]
#[command(name = "myrtio-zone-light", version, about)]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, short, env = "MYRTIO_ZONE_LIGHT_CONFIG")]
    config: Option<PathBuf>,

    /// Override the zone file
    #[arg(long)]
    device: Option<PathBuf>,

    /// Write to the zone file directly instead of through the privilege helper
    #[arg(long)]
    direct: bool,

    /// Log colors instead of writing them
    #[arg(long)]
    dry_run: bool,

    /// Do not remember the selected mode
    #[arg(long)]
    no_save: bool,

    /// More logging (repeatable)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crossfade to a static color (preset name or hex)
    Static {
        color: String,
        /// Transition duration, 0 snaps
        #[arg(long)]
        duration_ms: Option<u64>,
    },
    /// Fade the zone to black
    Off {
        #[arg(long)]
        duration_ms: Option<u64>,
    },
    /// Cycle through the hue circle until Enter is pressed
    Rainbow {
        /// Delay between frames
        #[arg(long)]
        tick_ms: Option<u64>,
        /// Stop after this many seconds instead of waiting for Enter
        #[arg(long)]
        seconds: Option<u64>,
    },
    /// Re-apply the last selected mode
    Restore {
        /// For a stored rainbow: stop after this many seconds
        #[arg(long)]
        seconds: Option<u64>,
    },
    /// List known presets
    Presets,
}

#[derive(thiserror::Error, Debug)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Light(#[from] LightError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("refusing to run as root; use a udev rule or the privilege helper")]
    Root,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init(logger::level_from_flags(cli.verbose, cli.quiet));

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    reject_root()?;

    let config_path = cli.config.clone().or_else(Config::default_path);
    let mut config = match &config_path {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(device) = &cli.device {
        config.device_path.clone_from(device);
    }
    if cli.direct {
        config.write_method = WriteMethod::Direct;
    }

    if matches!(cli.command, Command::Presets) {
        return list_presets(&config);
    }

    let store = if cli.no_save {
        None
    } else {
        ModeStore::default_location()
    };
    let previous = match &store {
        Some(store) => store.load().unwrap_or_else(|err| {
            log::warn!("ignoring stored mode: {err}");
            None
        }),
        None => None,
    };

    let coordinator = ModeCoordinator::with_last_color(
        open_sink(&cli, &config),
        previous_color(previous.as_ref()),
    );
    let timings = config.timings();
    let remember = |mode: PersistedMode| {
        if let Some(store) = &store {
            if let Err(err) = store.save(&mode) {
                log::warn!("failed to remember mode: {err}");
            }
        }
    };

    match cli.command {
        Command::Static { color, duration_ms } => {
            let color = config.resolve_color(&color)?;
            let duration = duration_ms.map_or(timings.color_change, Duration::from_millis);
            coordinator.request_static(color, duration)?;
            remember(PersistedMode::static_color(color));
        }
        Command::Off { duration_ms } => {
            let duration = duration_ms.map_or(timings.color_change, Duration::from_millis);
            coordinator.request_static(Rgb::default(), duration)?;
            remember(PersistedMode::static_color(Rgb::default()));
        }
        Command::Rainbow { tick_ms, seconds } => {
            let tick = tick_ms.map_or(timings.rainbow_tick, Duration::from_millis);
            coordinator.request_rainbow(tick)?;
            remember(PersistedMode::rainbow(tick.as_millis()));
            hold(seconds)?;
            coordinator.request_stop();
        }
        Command::Restore { seconds } => {
            let Some(mode) = previous else {
                log::warn!("no stored mode to restore");
                return Ok(());
            };
            coordinator.apply(&mode, &timings)?;
            if mode.mode == ModeId::Rainbow {
                hold(seconds)?;
                coordinator.request_stop();
            }
        }
        Command::Presets => {}
    }

    if let Some(color) = coordinator.last_color() {
        log::info!("zone shows {}", encode_hex(color));
    }
    Ok(())
}

fn open_sink(cli: &Cli, config: &Config) -> Box<dyn ColorSink> {
    if cli.dry_run {
        return Box::new(LogSink);
    }
    match config.write_method {
        WriteMethod::Direct => Box::new(ZoneFile::new(&config.device_path)),
        WriteMethod::Privileged => Box::new(PrivilegedWriter::new(
            config.privilege_command.iter().cloned(),
            &config.device_path,
        )),
    }
}

fn previous_color(previous: Option<&PersistedMode>) -> Option<Rgb> {
    let previous = previous?;
    if previous.mode != ModeId::Static {
        return None;
    }
    decode_hex(previous.color.as_deref()?).ok()
}

/// Keep the rainbow running for `seconds`, or until Enter / end of input
fn hold(seconds: Option<u64>) -> Result<(), AppError> {
    match seconds {
        Some(seconds) => thread::sleep(std::time::Duration::from_secs(seconds)),
        None => {
            log::warn!("rainbow running, press Enter to stop");
            let mut line = String::new();
            io::stdin().lock().read_line(&mut line)?;
        }
    }
    Ok(())
}

fn list_presets(config: &Config) -> Result<(), AppError> {
    let mut stdout = io::stdout().lock();
    for (name, color) in config.presets()? {
        writeln!(stdout, "{name:<12} {}", encode_hex(color))?;
    }
    Ok(())
}

#[cfg(unix)]
fn reject_root() -> Result<(), AppError> {
    // SAFETY: geteuid has no preconditions and cannot fail
    if unsafe { libc::geteuid() } == 0 {
        return Err(AppError::Root);
    }
    Ok(())
}

#[cfg(not(unix))]
fn reject_root() -> Result<(), AppError> {
    Ok(())
}
