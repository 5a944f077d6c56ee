//! This crate decodes the keystrokes read from a Linux input device (`/dev/input/event*`).
//!
//! A [`dump`] reads `struct input_event` records from any [`Read`](std::io::Read) source, tracks
//! the shift and caps lock state, and writes the keystrokes in one of three [`OutputMode`]s: the
//! raw records, the typed characters, or one timestamped log line per character.
//!
//! # Example
//!
//! Print the characters typed on a keyboard until F10 is pressed. Reading input devices usually
//! requires root privileges.
//!
//! ```no_run
//! use kbdump::event_codes::KEY_F10;
//! use kbdump::{dump, find_keyboards, Config, KbdumpError, OutputMode};
//! use std::fs::File;
//!
//! fn main() -> Result<(), KbdumpError> {
//!     let keyboard = find_keyboards()?.remove(0);
//!     let config = Config {
//!         mode: OutputMode::Ascii,
//!         terminate_on_code: Some(KEY_F10),
//!         ..Config::default()
//!     };
//!
//!     let n = dump(&config, File::open(&keyboard.path)?, &mut std::io::stdout())?;
//!     eprintln!("read {n} events from {}", keyboard.name);
//!
//!     Ok(())
//! }
//! ```

#[cfg(not(target_os = "linux"))]
compile_error!("This crate only works on Linux");

mod dump;
mod error;
mod format;
mod input;
pub mod keymap;
mod modifiers;

pub use dump::{dump, Config, OutputMode};
pub use error::KbdumpError;
pub use format::TimeZone;
pub use input::event_codes;
pub use input::{
    find_keyboards, is_keyboard, EventSource, InputEvent, KeyState, KeyboardInfo, Record,
    RECORD_SIZE,
};
pub use modifiers::ModifierState;

pub type KbdumpResult<T> = Result<T, KbdumpError>;
