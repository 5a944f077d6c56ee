use crate::format::ascii::Ascii;
use crate::format::log::Log;
use crate::format::raw::Raw;
use crate::format::{Formatter, TimeZone};
use crate::input::EventSource;
use crate::KbdumpResult;
use std::io::{Read, Write};

/// The representation keystrokes are dumped in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// The undecoded `input_event` records of presses, repeats and shift releases.
    #[default]
    Raw,
    /// The typed characters.
    Ascii,
    /// One timestamped line per typed character.
    Log,
}

/// How a dump runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Config {
    pub mode: OutputMode,
    /// Stop after a record with this key code.
    pub terminate_on_code: Option<u16>,
    /// In [`OutputMode::Ascii`], print a timestamp banner before a character typed at least this
    /// many seconds after the previous one.
    pub idle_timestamp_seconds: Option<u32>,
    /// The time zone banners are rendered in.
    pub time_zone: TimeZone,
}

/// Read records from `input` and write them to `output` in the configured representation.
///
/// Returns the number of records read once the input ends or the terminator code shows up. A
/// failure to write to `output` aborts the dump.
pub fn dump<R: Read, W: Write>(config: &Config, input: R, output: &mut W) -> KbdumpResult<usize> {
    let mut events = EventSource::new(input, config.terminate_on_code);

    match config.mode {
        OutputMode::Raw => drive(Raw, &mut events, output)?,
        OutputMode::Ascii => drive(
            Ascii::new(config.idle_timestamp_seconds, config.time_zone),
            &mut events,
            output,
        )?,
        OutputMode::Log => drive(Log::new(config.time_zone), &mut events, output)?,
    }

    Ok(events.records_read())
}

fn drive<F: Formatter, R: Read, W: Write>(
    mut formatter: F,
    events: &mut EventSource<R>,
    output: &mut W,
) -> KbdumpResult<()> {
    // Each record's output is flushed before the next record is read.
    for record in events {
        formatter.format(&record, output)?;
        output.flush()?;
    }

    Ok(())
}
