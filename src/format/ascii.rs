use super::{banner, translate, Formatter, TimeZone};
use crate::input::Record;
use crate::modifiers::ModifierState;
use std::io::{self, Write};

/// Writes each typed character, with a timestamp banner after a period of inactivity.
#[derive(Debug)]
pub(crate) struct Ascii {
    modifiers: ModifierState,
    idle_interval: Option<u64>,
    /// Seconds timestamp of the last written character. Starts at zero.
    last_emitted: u64,
    time_zone: TimeZone,
}

impl Ascii {
    pub(crate) fn new(idle_interval: Option<u32>, time_zone: TimeZone) -> Self {
        Self {
            modifiers: ModifierState::new(),
            idle_interval: idle_interval.map(u64::from),
            last_emitted: 0,
            time_zone,
        }
    }
}

impl Formatter for Ascii {
    fn format<W: Write>(&mut self, record: &Record, out: &mut W) -> io::Result<()> {
        let ev = &record.event;

        let Some(chr) = translate(&mut self.modifiers, ev) else {
            return Ok(());
        };

        if let Some(interval) = self.idle_interval {
            if ev.secs.saturating_sub(self.last_emitted) >= interval {
                write!(out, "\n{}\n", banner(ev, self.time_zone))?;
            }

            self.last_emitted = ev.secs;
        }

        write_char(out, chr)
    }
}

fn write_char<W: Write>(out: &mut W, chr: char) -> io::Result<()> {
    match chr {
        '\x08' => out.write_all(b"<BS>"),
        '\r' => out.write_all(b"<CR>"),
        c => out.write_all(c.encode_utf8(&mut [0; 4]).as_bytes()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::tests::{key, run};
    use crate::input::event_codes::*;

    #[test]
    fn types_characters_on_press() {
        let records = [
            key(1, KEY_H, 1),
            key(1, KEY_H, 0),
            key(1, KEY_I, 1),
            key(1, KEY_I, 0),
            key(1, KEY_TAB, 1),
            key(1, KEY_ENTER, 1),
        ];

        assert_eq!(run(Ascii::new(None, TimeZone::Utc), &records), "hi\t\n");
    }

    #[test]
    fn marks_backspace() {
        let records = [key(1, KEY_A, 1), key(1, KEY_BACKSPACE, 1)];

        assert_eq!(run(Ascii::new(None, TimeZone::Utc), &records), "a<BS>");
    }

    #[test]
    fn control_characters() {
        let mut out = Vec::new();

        for chr in ['\r', '\x08', '\n', '\t', 'q'] {
            write_char(&mut out, chr).unwrap();
        }

        assert_eq!(out, b"<CR><BS>\n\tq");
    }

    #[test]
    fn banner_after_idle_interval() {
        let records = [
            key(100, KEY_A, 1),
            key(102, KEY_B, 1),
            key(107, KEY_C, 1),
            // A release does not reset the idle clock.
            key(111, KEY_C, 0),
            key(112, KEY_D, 1),
        ];

        assert_eq!(
            run(Ascii::new(Some(5), TimeZone::Utc), &records),
            "\n[01/01/1970, 00:01:40]\nab\n[01/01/1970, 00:01:47]\nc\n[01/01/1970, 00:01:52]\nd"
        );
    }

    #[test]
    fn no_banners_without_interval() {
        let records = [key(100, KEY_A, 1), key(1_000, KEY_B, 1)];

        assert_eq!(run(Ascii::new(None, TimeZone::Utc), &records), "ab");
    }

    #[test]
    fn zero_interval_stamps_every_character() {
        let records = [key(0, KEY_A, 1), key(0, KEY_B, 1)];

        assert_eq!(
            run(Ascii::new(Some(0), TimeZone::Utc), &records),
            "\n[01/01/1970, 00:00:00]\na\n[01/01/1970, 00:00:00]\nb"
        );
    }
}
