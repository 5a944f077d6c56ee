pub(crate) mod device;
pub mod event_codes;

use crate::error::KbdumpError;
use crate::KbdumpResult;
use chrono::{DateTime, Utc};
use event_codes::{EV_KEY, EV_KEY_PRESS, EV_KEY_RELEASE, EV_KEY_REPEAT};
use log::{debug, trace, warn};
use std::io::{self, Read};

pub use device::{find_keyboards, is_keyboard, KeyboardInfo};

/// The size of one `struct input_event` record on the wire.
pub const RECORD_SIZE: usize = 24;

#[cfg(target_pointer_width = "64")]
const _: () = assert!(std::mem::size_of::<libc::input_event>() == RECORD_SIZE);

/// A single decoded input record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    /// Seconds part of the kernel timestamp.
    pub secs: u64,
    /// Microseconds part of the kernel timestamp.
    pub micros: u64,
    /// The event type (`EV_KEY`, `EV_SYN`, ...).
    pub kind: u16,
    /// The key code of the key that triggered the event.
    pub code: u16,
    /// The raw event value. For `EV_KEY` this is a [`KeyState`].
    pub value: i32,
}

/// The reason an `EV_KEY` event fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyState {
    /// The key was released.
    Released,
    /// The key was pressed.
    Pressed,
    /// The key is held down and autorepeat kicked in.
    Repeated,
}

impl TryFrom<i32> for KeyState {
    type Error = KbdumpError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            EV_KEY_RELEASE => Ok(KeyState::Released),
            EV_KEY_PRESS => Ok(KeyState::Pressed),
            EV_KEY_REPEAT => Ok(KeyState::Repeated),
            n => Err(KbdumpError::InvalidKeyState(n)),
        }
    }
}

impl InputEvent {
    /// Decode a record laid out in the host's byte order.
    pub fn decode(bytes: &[u8; RECORD_SIZE]) -> Self {
        let u64_at = |at: usize| {
            let mut buf = [0u8; 8];
            buf.copy_from_slice(&bytes[at..at + 8]);
            u64::from_ne_bytes(buf)
        };

        Self {
            secs: u64_at(0),
            micros: u64_at(8),
            kind: u16::from_ne_bytes([bytes[16], bytes[17]]),
            code: u16::from_ne_bytes([bytes[18], bytes[19]]),
            value: i32::from_ne_bytes([bytes[20], bytes[21], bytes[22], bytes[23]]),
        }
    }

    /// Encode the event in the host's byte order, the inverse of [`InputEvent::decode`].
    pub fn encode(&self) -> [u8; RECORD_SIZE] {
        let mut bytes = [0u8; RECORD_SIZE];

        bytes[0..8].copy_from_slice(&self.secs.to_ne_bytes());
        bytes[8..16].copy_from_slice(&self.micros.to_ne_bytes());
        bytes[16..18].copy_from_slice(&self.kind.to_ne_bytes());
        bytes[18..20].copy_from_slice(&self.code.to_ne_bytes());
        bytes[20..24].copy_from_slice(&self.value.to_ne_bytes());

        bytes
    }

    pub fn is_key(&self) -> bool {
        self.kind == EV_KEY
    }

    /// The key state, if this is a well-formed `EV_KEY` value.
    pub fn state(&self) -> Option<KeyState> {
        KeyState::try_from(self.value).ok()
    }

    pub fn is_released(&self) -> bool {
        self.value == EV_KEY_RELEASE
    }

    /// The embedded timestamp as a UTC date.
    pub fn datetime(&self) -> KbdumpResult<DateTime<Utc>> {
        let invalid = || KbdumpError::InvalidTimestamp(self.secs, self.micros);

        let secs = i64::try_from(self.secs).map_err(|_| invalid())?;
        let nsecs = self
            .micros
            .checked_mul(1000)
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(invalid)?;

        DateTime::from_timestamp(secs, nsecs).ok_or_else(invalid)
    }
}

/// A record as read from the device: the undecoded bytes and their decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record {
    pub bytes: [u8; RECORD_SIZE],
    pub event: InputEvent,
}

impl From<InputEvent> for Record {
    fn from(event: InputEvent) -> Self {
        Self {
            bytes: event.encode(),
            event,
        }
    }
}

/// A lazy sequence of [`Record`]s read from a byte stream.
///
/// The sequence ends when the stream cannot produce a whole record, or right after the record
/// whose code equals the terminator (if one is set).
#[derive(Debug)]
pub struct EventSource<R> {
    reader: R,
    terminator: Option<u16>,
    records_read: usize,
    done: bool,
}

impl<R: Read> EventSource<R> {
    pub fn new(reader: R, terminator: Option<u16>) -> Self {
        Self {
            reader,
            terminator,
            records_read: 0,
            done: false,
        }
    }

    /// The number of records yielded so far.
    pub fn records_read(&self) -> usize {
        self.records_read
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    fn read_record(&mut self) -> Option<[u8; RECORD_SIZE]> {
        let mut bytes = [0u8; RECORD_SIZE];

        match self.reader.read_exact(&mut bytes) {
            Ok(()) => Some(bytes),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                debug!("end of stream after {} records", self.records_read);
                None
            }
            Err(e) => {
                warn!("read failed after {} records: {e}", self.records_read);
                None
            }
        }
    }
}

impl<R: Read> Iterator for EventSource<R> {
    type Item = Record;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let Some(bytes) = self.read_record() else {
            self.done = true;
            return None;
        };

        let event = InputEvent::decode(&bytes);
        self.records_read += 1;
        trace!("record {}: {event:?}", self.records_read);

        if self.terminator == Some(event.code) {
            debug!("terminator code {:#04x} received, stopping", event.code);
            self.done = true;
        }

        Some(Record { bytes, event })
    }
}
