use kbdump::event_codes::KEY_F10;
use kbdump::{dump, find_keyboards, is_keyboard, Config, KbdumpResult, OutputMode, TimeZone};
use clap::{Parser, ValueEnum};
use log::{error, info, warn};
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::os::unix::fs::{FileTypeExt, OpenOptionsExt};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// The key that ends a dump started with `--stop`.
const STOP_KEY: u16 = KEY_F10;

const OUTPUT_MODE: u32 = 0o644;

#[derive(Parser, Debug)]
#[command(name = "kbdump", about = "Dump keys from keyboard devices")]
struct Args {
    /// Stop the dump when F10 is pressed
    #[arg(short, long)]
    stop: bool,

    /// Dump to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Print timestamps on ascii dumps after SECS seconds of idleness
    #[arg(short, long, value_name = "SECS")]
    timestamps: Option<u32>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Raw)]
    format: Format,

    /// Render timestamps in UTC instead of local time
    #[arg(long)]
    utc: bool,

    /// List the detected keyboard devices and exit
    #[arg(short, long)]
    list: bool,

    /// The input device to read, stdin if omitted
    device: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    Raw,
    Ascii,
    Log,
}

impl From<Format> for OutputMode {
    fn from(format: Format) -> Self {
        match format {
            Format::Raw => OutputMode::Raw,
            Format::Ascii => OutputMode::Ascii,
            Format::Log => OutputMode::Log,
        }
    }
}

impl From<&Args> for Config {
    fn from(args: &Args) -> Self {
        Config {
            mode: args.format.into(),
            terminate_on_code: args.stop.then_some(STOP_KEY),
            idle_timestamp_seconds: args.timestamps,
            time_zone: if args.utc { TimeZone::Utc } else { TimeZone::Local },
        }
    }
}

fn main() -> ExitCode {
    env_logger::builder()
        .filter_level(log::LevelFilter::Warn)
        .format_module_path(false)
        .format_target(false)
        .parse_default_env()
        .init();

    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> KbdumpResult<()> {
    if args.list {
        for keyboard in find_keyboards()? {
            println!("{}\t{}", keyboard.path.display(), keyboard.name);
        }

        return Ok(());
    }

    if args.timestamps.is_some() && !matches!(args.format, Format::Ascii) {
        warn!("--timestamps only applies to the ascii format");
    }

    let config = Config::from(args);
    let input = open_input(args.device.as_deref())?;

    let n = match &args.output {
        Some(path) => dump(&config, input, &mut open_output(path)?)?,
        None => dump(&config, input, &mut io::stdout().lock())?,
    };

    info!("read {n} events");

    Ok(())
}

fn open_input(device: Option<&Path>) -> KbdumpResult<Box<dyn Read>> {
    let Some(path) = device else {
        return Ok(Box::new(io::stdin().lock()));
    };

    let file = File::open(path)?;

    // Regular files (recorded raw dumps) are fine to replay.
    if file.metadata()?.file_type().is_char_device() && !is_keyboard(path).unwrap_or(false) {
        warn!("{} does not look like a keyboard", path.display());
    }

    Ok(Box::new(file))
}

fn open_output(path: &Path) -> KbdumpResult<impl Write> {
    Ok(OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .mode(OUTPUT_MODE)
        .open(path)?)
}
