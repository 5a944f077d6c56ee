use super::{banner, translate, Formatter, TimeZone};
use crate::input::{InputEvent, Record};
use crate::modifiers::ModifierState;
use std::io::{self, Write};

/// The maximum length of a log line, including the trailing newline.
pub(crate) const MAX_LINE: usize = 128;

/// Writes one timestamped line per typed character.
#[derive(Debug)]
pub(crate) struct Log {
    modifiers: ModifierState,
    time_zone: TimeZone,
}

impl Log {
    pub(crate) fn new(time_zone: TimeZone) -> Self {
        Self {
            modifiers: ModifierState::new(),
            time_zone,
        }
    }
}

impl Formatter for Log {
    fn format<W: Write>(&mut self, record: &Record, out: &mut W) -> io::Result<()> {
        let ev = &record.event;

        match translate(&mut self.modifiers, ev) {
            Some(chr) => out.write_all(line(ev, chr, self.time_zone).as_bytes()),
            None => Ok(()),
        }
    }
}

fn line(ev: &InputEvent, chr: char, time_zone: TimeZone) -> String {
    let rendered = match chr {
        '\t' => "<Tab>".to_string(),
        '\n' => "<LF>".to_string(),
        '\r' => "<CR>".to_string(),
        '\x08' => "<BS>".to_string(),
        c => format!("'{c}'"),
    };

    let mut line = format!(
        "{} type 0x{:02x}, value 0x{:02x}, code 0x{:02x}, ascii 0x{:02x}: {rendered}\n",
        banner(ev, time_zone),
        ev.kind,
        ev.value,
        ev.code,
        u32::from(chr),
    );

    if line.len() > MAX_LINE {
        let mut end = MAX_LINE - 1;
        while !line.is_char_boundary(end) {
            end -= 1;
        }
        line.truncate(end);
        line.push('\n');
    }

    line
}
