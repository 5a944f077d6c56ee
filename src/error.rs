use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KbdumpError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("no keyboard devices found")]
    NoDevicesFound,
    #[error("not a keyboard: {0}")]
    NotAKeyboard(PathBuf),
    #[error("invalid value for EV_KEY: {0}")]
    InvalidKeyState(i32),
    #[error("invalid timestamp: {0}s {1}us")]
    InvalidTimestamp(u64, u64),
}
