// Test code uses unwrap/expect for clarity - panics provide good test failure messages
#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Full checker flows: a realistic grammar driven over real files,
//! asserting the `CheckError` classification the driver would act on.

use std::io::Write as _;
use std::path::Path;

use verdc::{ByteClass, CheckError, CheckResult, Delim, TokenReader, Violation};

/// Grammar of a toy problem: line 1 is `n k` (1..=100, 0..=1000000000),
/// line 2 is `n` space-separated uppercase moves of length 1..=10.
fn validate(path: &Path) -> CheckResult {
    let mut r = TokenReader::from_path(path)?;
    let n = r.read_int(1i32, 100, Delim::SPACE, "n")?;
    r.read_int(0i64, 1_000_000_000, Delim::NEWLINE, "k")?;
    for i in 0..n {
        let context = format!("move {} of {n}", i + 1);
        let delim = if i + 1 < n { Delim::SPACE } else { Delim::NEWLINE };
        r.read_word(&ByteClass::UPPERCASE, 1, 10, delim, &context)?;
    }
    r.confirm_eof()?;
    Ok(())
}

fn write_case(content: &[u8]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content).unwrap();
    file
}

#[test]
fn conforming_case_passes() {
    let file = write_case(b"3 1000000000\nUP DOWN LEFT\n");
    validate(file.path()).unwrap();
}

#[test]
fn missing_final_newline_is_a_grammar_failure() {
    let file = write_case(b"1 5\nUP");
    let err = validate(file.path()).unwrap_err();
    assert!(err.is_grammar());
}

#[test]
fn trailing_garbage_fails_eof_confirmation() {
    let file = write_case(b"1 5\nUP\n \n");
    let err = validate(file.path()).unwrap_err();
    assert!(err.is_grammar());
    assert!(err.to_string().contains("not an EOF"));
}

#[test]
fn double_space_separator_is_rejected() {
    let file = write_case(b"2 5\nUP  DOWN\n");
    let err = validate(file.path()).unwrap_err();
    assert!(err.is_grammar());
}

#[test]
fn lowercase_move_is_rejected_with_context() {
    let file = write_case(b"2 5\nUP down\n");
    let err = validate(file.path()).unwrap_err();
    let CheckError::Scan(verdc::ScanError::Grammar {
        context, reason, ..
    }) = err
    else {
        panic!("expected a grammar scan error");
    };
    assert_eq!(context, "move 2 of 2");
    assert_eq!(reason, Violation::TooShortWord);
}

#[test]
fn out_of_range_k_names_the_bounds() {
    let file = write_case(b"1 1000000001\nUP\n");
    let err = validate(file.path()).unwrap_err();
    assert!(err
        .to_string()
        .contains("integer 1000000001 out of range [0,1000000000]"));
}

#[test]
fn missing_file_is_not_a_grammar_failure() {
    let err = validate(Path::new("/nonexistent/case.txt")).unwrap_err();
    assert!(!err.is_grammar());
}
