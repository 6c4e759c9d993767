// Test code uses unwrap/expect for clarity - panics provide good test failure messages
#![allow(clippy::unwrap_used, clippy::expect_used)]
#![cfg(unix)]

//! End-to-end interactor sessions against `sh` subjects.
//!
//! These tests exercise the real OS plumbing: two pipes, a live child,
//! buffered writes, and the close-write-then-wait teardown.

use std::panic::{catch_unwind, AssertUnwindSafe};

use pretty_assertions::assert_eq;
use verd_harness::{HarnessError, Interactor};
use verd_scan::{ByteClass, Delim, ScanError, Violation};

fn sh(script: &str) -> Interactor {
    Interactor::spawn("sh", ["-c", script]).unwrap()
}

#[test]
fn ping_pong_round_trip() {
    let mut it = sh(r#"read line; if [ "$line" = "PING" ]; then echo PONG; fi"#);

    it.send("PING\n").unwrap();
    it.flush().unwrap();

    let word = it
        .reader()
        .read_word(&ByteClass::UPPERCASE, 4, 4, Delim::NEWLINE, "reply")
        .unwrap();
    assert_eq!(word, b"PONG");

    it.reader().confirm_eof().unwrap();
    it.shutdown().unwrap();
}

#[test]
fn wrong_reply_is_a_grammar_failure_even_though_child_exits_cleanly() {
    let mut it = sh("read line; echo PONX");

    it.send("PING\n").unwrap();
    it.flush().unwrap();

    // Reply alphabet is exactly {P,O,N,G}: the 'X' halts the word at
    // length 3, below the required 4.
    let err = it
        .reader()
        .read_word(&ByteClass::from_bytes(b"PONG"), 4, 4, Delim::NEWLINE, "reply")
        .unwrap_err();
    match err {
        ScanError::Grammar { reason, .. } => assert_eq!(reason, Violation::TooShortWord),
        other => panic!("unexpected error {other:?}"),
    }

    // The data failed, the child did not: shutdown itself succeeds.
    it.shutdown().unwrap();
}

#[test]
fn reads_integers_from_child_output() {
    let mut it = sh(r"printf '42\n-17\n'");
    it.close_input();

    let a = it
        .reader()
        .read_int(0i32, 100, Delim::NEWLINE, "first")
        .unwrap();
    let b = it
        .reader()
        .read_int(-100i64, 100, Delim::NEWLINE, "second")
        .unwrap();
    assert_eq!((a, b), (42, -17));

    it.reader().confirm_eof().unwrap();
    it.shutdown().unwrap();
}

#[test]
fn child_observes_eof_after_close_input() {
    // `cat` terminates only when its stdin closes; without the
    // close-write-first teardown this test would hang.
    let mut it = sh("cat");
    it.send("73\n").unwrap();
    it.flush().unwrap();
    it.close_input();

    let v = it
        .reader()
        .read_int(0i32, 100, Delim::NEWLINE, "echoed")
        .unwrap();
    assert_eq!(v, 73);

    it.reader().confirm_eof().unwrap();
    it.shutdown().unwrap();
}

#[test]
fn abnormal_exit_is_reported_by_shutdown() {
    let mut it = sh("exit 2");
    it.reader().confirm_eof().unwrap();

    let err = it.shutdown().unwrap_err();
    match err {
        HarnessError::AbnormalExit { status, .. } => assert_eq!(status.code(), Some(2)),
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn abnormal_exit_panics_on_plain_disposal() {
    let mut it = sh("exit 3");
    it.reader().confirm_eof().unwrap();

    let result = catch_unwind(AssertUnwindSafe(move || drop(it)));
    let panic = result.unwrap_err();
    let msg = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .unwrap_or_default();
    assert!(msg.contains("child exited abnormally"), "unexpected panic: {msg}");
}

#[test]
fn clean_exit_disposes_quietly() {
    let mut it = sh("true");
    it.reader().confirm_eof().unwrap();
    drop(it);
}

#[test]
fn spawn_failure_is_an_os_error() {
    let err = Interactor::spawn("/nonexistent/subject", ["x"]).unwrap_err();
    assert!(matches!(err, HarnessError::Spawn { .. }));
}

#[test]
fn send_after_close_input_fails() {
    let mut it = sh("cat >/dev/null");
    it.close_input();
    let err = it.send("late\n").unwrap_err();
    assert!(matches!(err, HarnessError::Input { .. }));

    it.reader().confirm_eof().unwrap();
    it.shutdown().unwrap();
}

#[test]
fn multi_turn_session() {
    // The subject doubles each number it receives, three turns.
    let mut it = sh(r#"for _ in 1 2 3; do read n; echo $((n * 2)); done"#);

    for n in [3i32, 10, 21] {
        it.send(format!("{n}\n")).unwrap();
        it.flush().unwrap();
        let doubled = it
            .reader()
            .read_int(0i32, 100, Delim::NEWLINE, "doubled value")
            .unwrap();
        assert_eq!(doubled, n * 2);
    }

    it.reader().confirm_eof().unwrap();
    it.shutdown().unwrap();
}
