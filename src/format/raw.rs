use super::Formatter;
use crate::input::Record;
use crate::modifiers::is_shift;
use std::io::{self, Write};

/// Passes key records through undecoded.
///
/// Releases are dropped, except for the shift keys so consumers can follow the shift state.
#[derive(Debug, Default)]
pub(crate) struct Raw;

impl Formatter for Raw {
    fn format<W: Write>(&mut self, record: &Record, out: &mut W) -> io::Result<()> {
        let ev = &record.event;

        if !ev.is_key() || (ev.is_released() && !is_shift(ev.code)) {
            return Ok(());
        }

        out.write_all(&record.bytes)
    }
}
