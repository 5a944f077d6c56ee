use super::event_codes::{EV_KEY, EV_MSC, EV_REP, EV_SYN};
use crate::error::KbdumpError;
use crate::KbdumpResult;
use std::fs::{self, File};
use std::io;
use std::mem;
use std::os::fd::{AsRawFd, RawFd};
use std::os::unix::fs::FileTypeExt;
use std::path::{Path, PathBuf};

const IOC_NRBITS: libc::c_ulong = 8;
const IOC_TYPEBITS: libc::c_ulong = 8;
const IOC_SIZEBITS: libc::c_ulong = 14;
const IOC_NRSHIFT: libc::c_ulong = 0;
const IOC_TYPESHIFT: libc::c_ulong = IOC_NRSHIFT + IOC_NRBITS;
const IOC_SIZESHIFT: libc::c_ulong = IOC_TYPESHIFT + IOC_TYPEBITS;
const IOC_DIRSHIFT: libc::c_ulong = IOC_SIZESHIFT + IOC_SIZEBITS;
const IOC_READ: libc::c_ulong = 2;

const INPUT_DIR: &str = "/dev/input";

/// A keyboard device found under `/dev/input`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardInfo {
    /// The name the driver reports for the device.
    pub name: String,
    /// The path of the input device (e.g. `/dev/input/event0`).
    pub path: PathBuf,
}

impl TryFrom<&Path> for KeyboardInfo {
    type Error = KbdumpError;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let file = File::open(path)?;

        if !has_keyboard_flags(read_event_flags(&file)?) {
            return Err(KbdumpError::NotAKeyboard(path.to_path_buf()));
        }

        Ok(KeyboardInfo {
            name: read_name(&file)?,
            path: path.to_path_buf(),
        })
    }
}

/// Auto-detect the keyboard devices under `/dev/input`.
///
/// Devices that cannot be opened (usually for lack of privileges) are skipped.
pub fn find_keyboards() -> KbdumpResult<Vec<KeyboardInfo>> {
    let mut keyboards = find_char_devices()?
        .filter_map(|path| KeyboardInfo::try_from(path.as_path()).ok())
        .collect::<Vec<_>>();

    if keyboards.is_empty() {
        return Err(KbdumpError::NoDevicesFound);
    }

    keyboards.sort_by(|a, b| a.path.cmp(&b.path));

    Ok(keyboards)
}

/// Check whether the device at `path` advertises the event types of a keyboard.
pub fn is_keyboard(path: &Path) -> KbdumpResult<bool> {
    let file = File::open(path)?;

    Ok(has_keyboard_flags(read_event_flags(&file)?))
}

/// Read the name of the specified device using the `EVIOCGNAME` ioctl.
fn read_name(f: &File) -> KbdumpResult<String> {
    const DEVICE_NAME_MAX_LEN: usize = 512;

    let mut device_name = [0u8; DEVICE_NAME_MAX_LEN];

    let eviocgname = (IOC_READ << IOC_DIRSHIFT)
        | (('E' as libc::c_ulong) << IOC_TYPESHIFT)
        | (0x06 << IOC_NRSHIFT)
        | ((device_name.len() as libc::c_ulong) << IOC_SIZESHIFT);

    ioctl(
        f.as_raw_fd(),
        eviocgname,
        device_name.as_mut_ptr() as *mut libc::c_ulong,
    )?;

    let len = device_name
        .iter()
        .position(|&b| b == 0)
        .unwrap_or(device_name.len());

    Ok(String::from_utf8_lossy(&device_name[..len]).into())
}

/// Read the event types supported by the specified device using the `EVIOCGBIT` ioctl.
fn read_event_flags(f: &File) -> KbdumpResult<libc::c_ulong> {
    let mut ev_flags: libc::c_ulong = 0;

    let eviocgbit = (IOC_READ << IOC_DIRSHIFT)
        | (('E' as libc::c_ulong) << IOC_TYPESHIFT)
        | (0x20 << IOC_NRSHIFT)
        | ((mem::size_of::<libc::c_ulong>() as libc::c_ulong) << IOC_SIZESHIFT);

    ioctl(
        f.as_raw_fd(),
        eviocgbit,
        (&mut ev_flags) as *mut libc::c_ulong,
    )?;

    Ok(ev_flags)
}

/// Get all character devices from `/dev/input`.
fn find_char_devices() -> KbdumpResult<impl Iterator<Item = PathBuf>> {
    Ok(fs::read_dir(INPUT_DIR)?.filter_map(|entry| {
        let entry = entry.ok()?;
        let file_type = fs::metadata(entry.path()).ok()?.file_type();

        if file_type.is_char_device() {
            Some(entry.path())
        } else {
            None
        }
    }))
}

fn ioctl(fd: RawFd, request: libc::c_ulong, buf: *mut libc::c_ulong) -> KbdumpResult<()> {
    // The request type differs between libc flavours (c_ulong on glibc, c_int on musl).
    let res = unsafe { libc::ioctl(fd, request as _, buf) };

    if res < 0 {
        Err(io::Error::last_os_error().into())
    } else {
        Ok(())
    }
}

/// Check whether the specified `flags` indicate the device is a keyboard.
fn has_keyboard_flags(flags: libc::c_ulong) -> bool {
    const KEYBOARD_FLAGS: libc::c_ulong =
        (1 << EV_SYN) | (1 << EV_KEY) | (1 << EV_MSC) | (1 << EV_REP);

    (flags & KEYBOARD_FLAGS) == KEYBOARD_FLAGS
}
