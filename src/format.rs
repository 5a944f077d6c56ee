pub(crate) mod ascii;
pub(crate) mod log;
pub(crate) mod raw;

use crate::input::{InputEvent, Record};
use crate::keymap;
use crate::modifiers::ModifierState;
use chrono::{DateTime, Local, Utc};
use std::io::{self, Write};

const BANNER_FMT: &str = "[%d/%m/%Y, %H:%M:%S]";

/// The time zone timestamp banners are rendered in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeZone {
    #[default]
    Local,
    Utc,
}

/// Turns records into output bytes, one record at a time.
pub(crate) trait Formatter {
    fn format<W: Write>(&mut self, record: &Record, out: &mut W) -> io::Result<()>;
}

/// Track the modifiers and resolve the character typed by `ev`, if any.
///
/// Non-key events are skipped without touching `modifiers`.
pub(crate) fn translate(modifiers: &mut ModifierState, ev: &InputEvent) -> Option<char> {
    if !ev.is_key() {
        return None;
    }

    modifiers.update(ev);

    if ev.is_released() {
        return None;
    }

    keymap::resolve(ev.code, modifiers)
}

/// Render the timestamp embedded in `ev` as `[DD/MM/YYYY, HH:MM:SS]`.
pub(crate) fn banner(ev: &InputEvent, time_zone: TimeZone) -> String {
    let ts = ev.datetime().unwrap_or_else(|e| {
        ::log::debug!("{e}, using the epoch");
        DateTime::<Utc>::default()
    });

    match time_zone {
        TimeZone::Utc => ts.format(BANNER_FMT).to_string(),
        TimeZone::Local => ts.with_timezone(&Local).format(BANNER_FMT).to_string(),
    }
}
