use std::io::{Read, Write};
use std::process::{Command, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use kbdump::event_codes::KEY_A;

mod support;
use support::{key, stream, PRESS};

#[test]
fn typed_character_reaches_stdout_while_running() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_kbdump"))
        .args(["-f", "ascii"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();

    let mut stdin = child.stdin.take().unwrap();
    let mut stdout = child.stdout.take().unwrap();

    stdin.write_all(&stream(&[key(1, KEY_A, PRESS)])).unwrap();
    stdin.flush().unwrap();

    // stdin stays open, so the dump is still running while we read.
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut buf = [0u8; 1];
        let res = stdout.read_exact(&mut buf).map(|_| buf[0]);
        let _ = tx.send(res);
    });

    let received = rx.recv_timeout(Duration::from_secs(10));

    child.kill().unwrap();
    child.wait().unwrap();
    drop(stdin);

    assert_eq!(received.unwrap().unwrap(), b'a');
}
