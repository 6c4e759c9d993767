//! Strict token reader over a streaming byte source.
//!
//! A [`TokenReader`] owns one byte source (file, stdin, or a child
//! process's stdout), a display name for diagnostics, and a line/column
//! position that advances per delivered byte. Callers describe a grammar
//! as an ordered sequence of [`read_word`](TokenReader::read_word) /
//! [`read_int`](TokenReader::read_int) calls; any deviation from the
//! expected token shape, bounds, or delimiter is an error.
//!
//! # Lifecycle
//!
//! Unopened -> Open (on bind) -> Closed. The only path to Closed is
//! [`confirm_eof`](TokenReader::confirm_eof): every validation pass must
//! prove it consumed the entire input. Dropping a reader that is still
//! Open panics. Two deliberate exceptions keep the failure path clean:
//!
//! - a failed `confirm_eof` releases the source before returning the
//!   error, so disposal does not report the same defect twice;
//! - any scan error likewise releases the source, since the outcome
//!   protocol is fail-fast and the reader is unusable after a violation.
//!
//! # Blocking
//!
//! All reads are synchronous and blocking. A source that never produces
//! the next byte (a hung child process) blocks indefinitely; there is no
//! timeout primitive here.

use std::io::{BufRead, BufReader, ErrorKind, Read};
use std::path::Path;

use crate::bounds::ScanInt;
use crate::byte_class::ByteClass;
use crate::delim::Delim;
use crate::error::{ScanError, Violation};
use crate::position::{NewlineMode, Position};

/// Strict scanner over one owned byte source.
pub struct TokenReader {
    /// `Some` while Open; `None` when Unopened or Closed.
    source: Option<Box<dyn BufRead>>,
    /// Display name used in diagnostics (file path, `<stdin>`, program name).
    name: String,
    pos: Position,
    /// One byte of pushback, used by CR-LF normalization.
    pending: Option<u8>,
    mode: NewlineMode,
}

impl TokenReader {
    /// Create an Open reader over an arbitrary source.
    pub fn new(name: impl Into<String>, source: impl Read + 'static) -> Self {
        Self {
            source: Some(Box::new(BufReader::new(source))),
            name: name.into(),
            pos: Position::start(),
            pending: None,
            mode: NewlineMode::Exact,
        }
    }

    /// Create an Unopened reader; use [`bind`](Self::bind) to open it.
    pub fn unbound() -> Self {
        Self {
            source: None,
            name: String::new(),
            pos: Position::start(),
            pending: None,
            mode: NewlineMode::Exact,
        }
    }

    /// Open a file, naming the reader after its path.
    ///
    /// Open failure is an OS-resource error, not a data defect.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ScanError> {
        let path = path.as_ref();
        let name = path.display().to_string();
        let file = std::fs::File::open(path).map_err(|source| ScanError::Io {
            name: name.clone(),
            source,
        })?;
        Ok(Self::new(name, file))
    }

    /// Open the process's standard input, named `<stdin>`.
    pub fn stdin() -> Self {
        Self::new("<stdin>", std::io::stdin())
    }

    /// Select how carriage returns are treated. Defaults to
    /// [`NewlineMode::Exact`].
    pub fn with_newline_mode(mut self, mode: NewlineMode) -> Self {
        self.mode = mode;
        self
    }

    /// Bind a new source, transitioning to Open.
    ///
    /// Rebinding while already Open is permitted as an explicit reset:
    /// the previous source is released silently and the position restarts.
    /// The [`NewlineMode`] is reader configuration, not source state, and
    /// carries over to the new source.
    pub fn bind(&mut self, name: impl Into<String>, source: impl Read + 'static) {
        self.source = Some(Box::new(BufReader::new(source)));
        self.name = name.into();
        self.pos = Position::start();
        self.pending = None;
    }

    /// `true` while a source is bound and EOF has not been confirmed.
    pub fn is_open(&self) -> bool {
        self.source.is_some()
    }

    /// Diagnostic display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Position of the most recently delivered byte.
    pub fn position(&self) -> Position {
        self.pos
    }

    // ─── Byte delivery ──────────────────────────────────────────────────

    /// Deliver the next byte, or `None` at end of stream.
    ///
    /// Applies CR-LF normalization per the reader's [`NewlineMode`] and
    /// advances the position for each delivered byte. On an I/O failure
    /// the source is released and the error returned.
    fn next_byte(&mut self) -> Result<Option<u8>, ScanError> {
        match self.next_byte_inner() {
            Ok(byte) => Ok(byte),
            Err(err) => {
                self.source = None;
                Err(err)
            }
        }
    }

    fn next_byte_inner(&mut self) -> Result<Option<u8>, ScanError> {
        let raw = match self.pending.take() {
            Some(b) => Some(b),
            None => self.read_raw()?,
        };
        let byte = if self.mode == NewlineMode::NormalizeCrlf && raw == Some(b'\r') {
            match self.read_raw()? {
                // CR directly followed by LF collapses to one newline.
                Some(b'\n') => Some(b'\n'),
                other => {
                    self.pending = other;
                    Some(b'\r')
                }
            }
        } else {
            raw
        };
        if let Some(b) = byte {
            self.pos.advance(b);
        }
        Ok(byte)
    }

    /// One byte straight from the source, `None` at end of stream.
    fn read_raw(&mut self) -> Result<Option<u8>, ScanError> {
        let Some(source) = self.source.as_mut() else {
            // Reading from an Unopened or Closed reader is a validator-author
            // bug, not an input defect; fail loudly like the drop guard does.
            panic!("{}: read from a reader with no bound source", self.name);
        };
        let mut buf = [0u8; 1];
        loop {
            match source.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(source) => {
                    return Err(ScanError::Io {
                        name: self.name.clone(),
                        source,
                    })
                }
            }
        }
    }

    /// Build a grammar violation at the current position and release the
    /// source (the outcome protocol is fail-fast; the reader is done).
    fn grammar(&mut self, kind: &'static str, context: &str, reason: Violation) -> ScanError {
        self.source = None;
        ScanError::Grammar {
            name: self.name.clone(),
            line: self.pos.line(),
            col: self.pos.col(),
            kind,
            context: context.to_string(),
            reason,
        }
    }

    // ─── Word scanning ──────────────────────────────────────────────────

    /// Read a bounded word and require `delim` to terminate it.
    ///
    /// A byte belongs to the word iff it is in `class`; scanning halts at
    /// the first byte outside the set (end of stream counts, as
    /// [`Delim::Eof`]). Checks, in order: the halted word must be at
    /// least `min_len` bytes; the `(max_len + 1)`-th in-class byte fails
    /// before the delimiter is even examined; the halting byte must equal
    /// `delim` exactly.
    ///
    /// `context` names the logical field for diagnostics.
    pub fn read_word(
        &mut self,
        class: &ByteClass,
        min_len: usize,
        max_len: usize,
        delim: Delim,
        context: &str,
    ) -> Result<Vec<u8>, ScanError> {
        let (word, found) = self.read_word_any(class, min_len, max_len, context)?;
        if found == delim {
            Ok(word)
        } else {
            Err(self.grammar("word", context, Violation::UnexpectedDelimiter))
        }
    }

    /// [`read_word`](Self::read_word) without the delimiter assertion:
    /// returns the observed delimiter so the caller can branch on it
    /// (array element vs. section terminator).
    pub fn read_word_any(
        &mut self,
        class: &ByteClass,
        min_len: usize,
        max_len: usize,
        context: &str,
    ) -> Result<(Vec<u8>, Delim), ScanError> {
        let mut word = Vec::new();
        loop {
            match self.next_byte()? {
                Some(b) if class.contains(b) => {
                    if word.len() == max_len {
                        return Err(self.grammar("word", context, Violation::TooLongWord));
                    }
                    word.push(b);
                }
                halt => {
                    if word.len() < min_len {
                        return Err(self.grammar("word", context, Violation::TooShortWord));
                    }
                    return Ok((word, Delim::from_byte(halt)));
                }
            }
        }
    }

    // ─── Integer scanning ───────────────────────────────────────────────

    /// Read a strictly canonical decimal integer in `[lo, hi]` and
    /// require `delim` to terminate it.
    ///
    /// Accepted grammar: optional single `-`, then either the lone digit
    /// `0` or a nonzero digit followed by more digits. Leading zeros,
    /// leading `+`, `-0`, and empty tokens are all rejected. Overflow is
    /// detected from the width's precomputed thresholds before the
    /// arithmetic that would wrap.
    pub fn read_int<T: ScanInt>(
        &mut self,
        lo: T,
        hi: T,
        delim: Delim,
        context: &str,
    ) -> Result<T, ScanError> {
        let (value, found) = self.read_int_any(lo, hi, context)?;
        if found == delim {
            Ok(value)
        } else {
            Err(self.grammar(T::KIND, context, Violation::UnexpectedDelimiter))
        }
    }

    /// [`read_int`](Self::read_int) without the delimiter assertion:
    /// returns the observed delimiter for the caller to branch on.
    pub fn read_int_any<T: ScanInt>(
        &mut self,
        lo: T,
        hi: T,
        context: &str,
    ) -> Result<(T, Delim), ScanError> {
        let (mut value, negative) = match self.next_byte()? {
            Some(b'-') => match self.next_byte()? {
                Some(d @ b'1'..=b'9') => (T::from_digit_neg(d - b'0'), true),
                _ => return Err(self.grammar(T::KIND, context, Violation::NotAnInteger)),
            },
            // A lone zero: whatever follows is the delimiter. "007" style
            // padding is thereby rejected, since the second '0' is not a
            // delimiter the grammar can expect.
            Some(b'0') => {
                let halt = Delim::from_byte(self.next_byte()?);
                return self.check_range(T::from_digit(0), lo, hi, halt, context);
            }
            Some(d @ b'1'..=b'9') => (T::from_digit(d - b'0'), false),
            _ => return Err(self.grammar(T::KIND, context, Violation::NotAnInteger)),
        };
        loop {
            match self.next_byte()? {
                Some(d @ b'0'..=b'9') => {
                    let d = d - b'0';
                    let overflow = if negative {
                        value < T::MIN_PREFIX || (value == T::MIN_PREFIX && d > T::MIN_LAST_DIGIT)
                    } else {
                        value > T::MAX_PREFIX || (value == T::MAX_PREFIX && d > T::MAX_LAST_DIGIT)
                    };
                    if overflow {
                        return Err(self.grammar(T::KIND, context, Violation::IntegerOverflow));
                    }
                    value = if negative {
                        value.push_digit_neg(d)
                    } else {
                        value.push_digit(d)
                    };
                }
                halt => return self.check_range(value, lo, hi, Delim::from_byte(halt), context),
            }
        }
    }

    fn check_range<T: ScanInt>(
        &mut self,
        value: T,
        lo: T,
        hi: T,
        halt: Delim,
        context: &str,
    ) -> Result<(T, Delim), ScanError> {
        if lo <= value && value <= hi {
            Ok((value, halt))
        } else {
            Err(self.grammar(
                T::KIND,
                context,
                Violation::OutOfRange {
                    value: value.widen(),
                    lo: lo.widen(),
                    hi: hi.widen(),
                },
            ))
        }
    }

    // ─── End of stream ──────────────────────────────────────────────────

    /// Confirm the source is exhausted and transition to Closed.
    ///
    /// Reads one more byte. If the stream has ended, the source is
    /// released and the reader is Closed. If a byte remains, the source
    /// is released (so disposal does not report the defect twice) and a
    /// "not an EOF" error is returned.
    pub fn confirm_eof(&mut self) -> Result<(), ScanError> {
        match self.next_byte()? {
            None => {
                self.source = None;
                Ok(())
            }
            Some(_) => {
                self.source = None;
                Err(ScanError::NotEof {
                    name: self.name.clone(),
                    line: self.pos.line(),
                    col: self.pos.col(),
                })
            }
        }
    }
}

impl std::fmt::Debug for TokenReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenReader")
            .field("name", &self.name)
            .field("open", &self.source.is_some())
            .field("pos", &self.pos)
            .field("mode", &self.mode)
            .finish()
    }
}

impl Drop for TokenReader {
    /// Loud disposal contract: a reader abandoned while Open means the
    /// validator never proved it consumed the entire input.
    fn drop(&mut self) {
        if self.source.is_some() && !std::thread::panicking() {
            panic!("{}: call confirm_eof() before disposing the reader", self.name);
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "tests panic on unexpected state for clear failure messages"
)]
mod tests {
    use super::TokenReader;
    use crate::{ByteClass, Delim, NewlineMode, ScanError, Violation};
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn reader(bytes: &[u8]) -> TokenReader {
        TokenReader::new("<test>", Cursor::new(bytes.to_vec()))
    }

    fn grammar_reason(err: &ScanError) -> &Violation {
        match err {
            ScanError::Grammar { reason, .. } => reason,
            other => panic!("expected grammar error, got {other:?}"),
        }
    }

    // === Word scanning ===

    #[test]
    fn word_halts_at_delimiter_and_returns_bytes() {
        let mut r = reader(b"1234 ");
        let word = r
            .read_word(&ByteClass::DECIMAL_DIGITS, 1, 5, Delim::SPACE, "token")
            .unwrap();
        assert_eq!(word, b"1234");
        r.confirm_eof().unwrap();
    }

    #[test]
    fn word_any_reports_observed_delimiter() {
        let mut r = reader(b"1234 ");
        let (word, delim) = r
            .read_word_any(&ByteClass::DECIMAL_DIGITS, 1, 5, "token")
            .unwrap();
        assert_eq!(word.len(), 4);
        assert_eq!(delim, Delim::SPACE);
        r.confirm_eof().unwrap();
    }

    #[test]
    fn too_long_word_fails_before_delimiter_is_inspected() {
        // Six digits against max 5: the sixth in-class byte is fatal even
        // though a conforming delimiter follows.
        let mut r = reader(b"123456 ");
        let err = r
            .read_word(&ByteClass::DECIMAL_DIGITS, 1, 5, Delim::SPACE, "token")
            .unwrap_err();
        assert_eq!(*grammar_reason(&err), Violation::TooLongWord);
    }

    #[test]
    fn too_long_word_even_with_wrong_delimiter_after() {
        // Same input, expected delimiter deliberately wrong: still the
        // length violation, proving the delimiter was never examined.
        let mut r = reader(b"123456 ");
        let err = r
            .read_word(&ByteClass::DECIMAL_DIGITS, 1, 5, Delim::NEWLINE, "token")
            .unwrap_err();
        assert_eq!(*grammar_reason(&err), Violation::TooLongWord);
    }

    #[test]
    fn too_short_word() {
        let mut r = reader(b"ab \n");
        let err = r
            .read_word(&ByteClass::LOWERCASE, 3, 10, Delim::SPACE, "name")
            .unwrap_err();
        assert_eq!(*grammar_reason(&err), Violation::TooShortWord);
    }

    #[test]
    fn empty_word_allowed_when_min_is_zero() {
        let mut r = reader(b"\n");
        let word = r
            .read_word(&ByteClass::LOWERCASE, 0, 10, Delim::NEWLINE, "name")
            .unwrap();
        assert_eq!(word, b"");
        r.confirm_eof().unwrap();
    }

    #[test]
    fn unexpected_delimiter_on_word() {
        let mut r = reader(b"abc\n");
        let err = r
            .read_word(&ByteClass::LOWERCASE, 1, 10, Delim::SPACE, "name")
            .unwrap_err();
        assert_eq!(*grammar_reason(&err), Violation::UnexpectedDelimiter);
    }

    #[test]
    fn eof_is_a_delimiter() {
        let mut r = reader(b"abc");
        let word = r
            .read_word(&ByteClass::LOWERCASE, 1, 10, Delim::Eof, "name")
            .unwrap();
        assert_eq!(word, b"abc");
        r.confirm_eof().unwrap();
    }

    #[test]
    fn word_of_exactly_max_length_is_accepted() {
        let mut r = reader(b"12345\n");
        let word = r
            .read_word(&ByteClass::DECIMAL_DIGITS, 1, 5, Delim::NEWLINE, "token")
            .unwrap();
        assert_eq!(word, b"12345");
        r.confirm_eof().unwrap();
    }

    // === Integer scanning: accepted grammar ===

    #[test]
    fn reads_plain_integers() {
        let mut r = reader(b"42 -17 0\n");
        assert_eq!(r.read_int(0i32, 100, Delim::SPACE, "a").unwrap(), 42);
        assert_eq!(r.read_int(-100i32, 0, Delim::SPACE, "b").unwrap(), -17);
        assert_eq!(r.read_int(0i32, 100, Delim::NEWLINE, "c").unwrap(), 0);
        r.confirm_eof().unwrap();
    }

    #[test]
    fn reads_width_extremes() {
        let mut r = reader(b"2147483647 -2147483648\n");
        assert_eq!(
            r.read_int(i32::MIN, i32::MAX, Delim::SPACE, "max").unwrap(),
            i32::MAX
        );
        assert_eq!(
            r.read_int(i32::MIN, i32::MAX, Delim::NEWLINE, "min").unwrap(),
            i32::MIN
        );
        r.confirm_eof().unwrap();

        let mut r = reader(b"9223372036854775807 -9223372036854775808\n");
        assert_eq!(
            r.read_int(i64::MIN, i64::MAX, Delim::SPACE, "max").unwrap(),
            i64::MAX
        );
        assert_eq!(
            r.read_int(i64::MIN, i64::MAX, Delim::NEWLINE, "min").unwrap(),
            i64::MIN
        );
        r.confirm_eof().unwrap();
    }

    #[test]
    fn int_any_reports_observed_delimiter() {
        let mut r = reader(b"7 8\n");
        let (v, d) = r.read_int_any(0i32, 10, "a").unwrap();
        assert_eq!((v, d), (7, Delim::SPACE));
        let (v, d) = r.read_int_any(0i32, 10, "b").unwrap();
        assert_eq!((v, d), (8, Delim::NEWLINE));
        r.confirm_eof().unwrap();
    }

    // === Integer scanning: rejected grammar ===

    #[test]
    fn rejects_leading_zero() {
        let mut r = reader(b"007\n");
        let err = r.read_int(0i32, 100, Delim::NEWLINE, "n").unwrap_err();
        // The lone '0' parses; the second '0' is an unexpected delimiter.
        assert_eq!(*grammar_reason(&err), Violation::UnexpectedDelimiter);
    }

    #[test]
    fn rejects_leading_plus() {
        let mut r = reader(b"+5\n");
        let err = r.read_int(0i32, 100, Delim::NEWLINE, "n").unwrap_err();
        assert_eq!(*grammar_reason(&err), Violation::NotAnInteger);
    }

    #[test]
    fn rejects_negative_zero() {
        let mut r = reader(b"-0\n");
        let err = r.read_int(-100i32, 100, Delim::NEWLINE, "n").unwrap_err();
        assert_eq!(*grammar_reason(&err), Violation::NotAnInteger);
    }

    #[test]
    fn rejects_empty_token() {
        let mut r = reader(b"\n");
        let err = r.read_int(0i32, 100, Delim::NEWLINE, "n").unwrap_err();
        assert_eq!(*grammar_reason(&err), Violation::NotAnInteger);
    }

    #[test]
    fn rejects_lone_minus() {
        let mut r = reader(b"- 1\n");
        let err = r.read_int(-10i32, 10, Delim::SPACE, "n").unwrap_err();
        assert_eq!(*grammar_reason(&err), Violation::NotAnInteger);
    }

    #[test]
    fn rejects_embedded_non_digit() {
        let mut r = reader(b"12a\n");
        let err = r.read_int(0i32, 100, Delim::NEWLINE, "n").unwrap_err();
        assert_eq!(*grammar_reason(&err), Violation::UnexpectedDelimiter);
    }

    // === Integer scanning: overflow ===

    #[test]
    fn one_digit_past_i32_max_overflows() {
        // i32::MAX followed by one extra digit: never wraps, never truncates.
        let mut r = reader(b"21474836470\n");
        let err = r
            .read_int(i32::MIN, i32::MAX, Delim::NEWLINE, "n")
            .unwrap_err();
        assert_eq!(*grammar_reason(&err), Violation::IntegerOverflow);
    }

    #[test]
    fn i32_max_plus_one_overflows() {
        let mut r = reader(b"2147483648\n");
        let err = r
            .read_int(i32::MIN, i32::MAX, Delim::NEWLINE, "n")
            .unwrap_err();
        assert_eq!(*grammar_reason(&err), Violation::IntegerOverflow);
    }

    #[test]
    fn i32_min_minus_one_overflows() {
        let mut r = reader(b"-2147483649\n");
        let err = r
            .read_int(i32::MIN, i32::MAX, Delim::NEWLINE, "n")
            .unwrap_err();
        assert_eq!(*grammar_reason(&err), Violation::IntegerOverflow);
    }

    #[test]
    fn i64_max_plus_one_overflows() {
        let mut r = reader(b"9223372036854775808\n");
        let err = r
            .read_int(i64::MIN, i64::MAX, Delim::NEWLINE, "n")
            .unwrap_err();
        assert_eq!(*grammar_reason(&err), Violation::IntegerOverflow);
    }

    #[test]
    fn i64_min_minus_one_overflows() {
        let mut r = reader(b"-9223372036854775809\n");
        let err = r
            .read_int(i64::MIN, i64::MAX, Delim::NEWLINE, "n")
            .unwrap_err();
        assert_eq!(*grammar_reason(&err), Violation::IntegerOverflow);
    }

    #[test]
    fn value_in_width_but_out_of_declared_bounds() {
        let mut r = reader(b"12\n");
        let err = r.read_int(1i32, 10, Delim::NEWLINE, "n").unwrap_err();
        assert_eq!(
            *grammar_reason(&err),
            Violation::OutOfRange {
                value: 12,
                lo: 1,
                hi: 10
            }
        );
    }

    // === Positions in diagnostics ===

    #[test]
    fn error_position_points_at_offending_byte() {
        let mut r = reader(b"1 x\n");
        r.read_int(0i32, 9, Delim::SPACE, "a").unwrap();
        let err = r.read_int(0i32, 9, Delim::NEWLINE, "b").unwrap_err();
        match err {
            ScanError::Grammar { line, col, .. } => assert_eq!((line, col), (1, 3)),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn error_position_tracks_lines() {
        let mut r = reader(b"1\n2\nx\n");
        r.read_int(0i32, 9, Delim::NEWLINE, "a").unwrap();
        r.read_int(0i32, 9, Delim::NEWLINE, "b").unwrap();
        let err = r.read_int(0i32, 9, Delim::NEWLINE, "c").unwrap_err();
        match err {
            ScanError::Grammar { line, col, .. } => assert_eq!((line, col), (3, 1)),
            other => panic!("unexpected error {other:?}"),
        }
    }

    // === End-of-stream confirmation and lifecycle ===

    #[test]
    fn confirm_eof_at_true_eof_closes_the_reader() {
        let mut r = reader(b"");
        assert!(r.is_open());
        r.confirm_eof().unwrap();
        assert!(!r.is_open());
    }

    #[test]
    fn confirm_eof_with_unread_byte_fails_and_releases_source() {
        let mut r = reader(b"1\nextra");
        r.read_int(0i32, 9, Delim::NEWLINE, "a").unwrap();
        let err = r.confirm_eof().unwrap_err();
        assert!(matches!(err, ScanError::NotEof { .. }));
        // Source released: dropping r now must not panic again.
        assert!(!r.is_open());
    }

    #[test]
    fn dropping_an_open_reader_panics() {
        let result = std::panic::catch_unwind(|| {
            let r = reader(b"unconsumed");
            drop(r);
        });
        let panic = result.unwrap_err();
        let msg = panic
            .downcast_ref::<String>()
            .map(String::as_str)
            .unwrap_or_default();
        assert!(msg.contains("confirm_eof"), "unexpected panic: {msg}");
    }

    #[test]
    fn failed_scan_releases_source_for_quiet_disposal() {
        let mut r = reader(b"x\n");
        let _ = r.read_int(0i32, 9, Delim::NEWLINE, "n").unwrap_err();
        assert!(!r.is_open());
    }

    #[test]
    fn bind_resets_position_and_reopens() {
        let mut r = reader(b"1\n");
        r.read_int(0i32, 9, Delim::NEWLINE, "a").unwrap();
        r.confirm_eof().unwrap();
        assert!(!r.is_open());

        r.bind("<second>", Cursor::new(b"5\n".to_vec()));
        assert!(r.is_open());
        assert_eq!(r.name(), "<second>");
        assert_eq!(r.read_int(0i32, 9, Delim::NEWLINE, "a").unwrap(), 5);
        r.confirm_eof().unwrap();
    }

    #[test]
    fn bind_keeps_the_newline_mode() {
        let mut r = reader(b"1\r\n").with_newline_mode(NewlineMode::NormalizeCrlf);
        r.read_int(0i32, 9, Delim::NEWLINE, "a").unwrap();
        r.confirm_eof().unwrap();

        // The mode is reader configuration: the second source gets the
        // same CR-LF collapsing as the first.
        r.bind("<second>", Cursor::new(b"2\r\n".to_vec()));
        assert_eq!(r.read_int(0i32, 9, Delim::NEWLINE, "a").unwrap(), 2);
        r.confirm_eof().unwrap();
    }

    #[test]
    fn unbound_reader_drops_quietly() {
        let r = TokenReader::unbound();
        assert!(!r.is_open());
        drop(r);
    }

    // === Newline handling ===

    #[test]
    fn crlf_collapses_to_one_newline_when_normalizing() {
        let mut r = reader(b"7\r\n8\r\n").with_newline_mode(NewlineMode::NormalizeCrlf);
        assert_eq!(r.read_int(0i32, 9, Delim::NEWLINE, "a").unwrap(), 7);
        assert_eq!(r.read_int(0i32, 9, Delim::NEWLINE, "b").unwrap(), 8);
        r.confirm_eof().unwrap();
    }

    #[test]
    fn lone_cr_passes_through_when_normalizing() {
        let mut r = reader(b"7\r8\n").with_newline_mode(NewlineMode::NormalizeCrlf);
        let (v, d) = r.read_int_any(0i32, 9, "a").unwrap();
        assert_eq!((v, d), (7, Delim::Byte(b'\r')));
        assert_eq!(r.read_int(0i32, 9, Delim::NEWLINE, "b").unwrap(), 8);
        r.confirm_eof().unwrap();
    }

    #[test]
    fn exact_mode_delivers_cr_verbatim() {
        let mut r = reader(b"7\r\n");
        let err = r.read_int(0i32, 9, Delim::NEWLINE, "a").unwrap_err();
        assert_eq!(*grammar_reason(&err), Violation::UnexpectedDelimiter);
    }

    #[test]
    fn crlf_counts_as_one_position_advance() {
        let mut r = reader(b"a\r\nb\n").with_newline_mode(NewlineMode::NormalizeCrlf);
        r.read_word(&ByteClass::LOWERCASE, 1, 1, Delim::NEWLINE, "a")
            .unwrap();
        let err = r
            .read_word(&ByteClass::UPPERCASE, 1, 1, Delim::NEWLINE, "b")
            .unwrap_err();
        // 'b' is lowercase: rejected at line 2, column 1.
        match err {
            ScanError::Grammar { line, col, reason, .. } => {
                assert_eq!((line, col), (2, 1));
                assert_eq!(reason, Violation::TooShortWord);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    // === File sources ===

    #[test]
    fn from_path_reads_a_real_file() {
        use std::io::Write as _;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"3 1 4\n").unwrap();

        let mut r = TokenReader::from_path(file.path()).unwrap();
        for (i, expected) in [3i32, 1, 4].into_iter().enumerate() {
            let v = r
                .read_int(0i32, 9, Delim::array(i, 3), &format!("element {} of 3", i + 1))
                .unwrap();
            assert_eq!(v, expected);
        }
        r.confirm_eof().unwrap();
    }

    #[test]
    fn from_path_missing_file_is_io_error() {
        let err = TokenReader::from_path("/nonexistent/input.txt").unwrap_err();
        assert!(matches!(err, ScanError::Io { .. }));
        assert!(!err.is_grammar());
    }

    // === Property tests ===

    mod roundtrip {
        use super::super::TokenReader;
        use crate::Delim;
        use proptest::prelude::*;
        use std::io::Cursor;

        #[allow(clippy::unwrap_used, reason = "property failure panics with the input")]
        fn read_back_i32(text: &str) -> i32 {
            let mut r = TokenReader::new("<prop>", Cursor::new(format!("{text}\n").into_bytes()));
            let v = r.read_int(i32::MIN, i32::MAX, Delim::NEWLINE, "value").unwrap();
            r.confirm_eof().unwrap();
            v
        }

        #[allow(clippy::unwrap_used, reason = "property failure panics with the input")]
        fn read_back_i64(text: &str) -> i64 {
            let mut r = TokenReader::new("<prop>", Cursor::new(format!("{text}\n").into_bytes()));
            let v = r.read_int(i64::MIN, i64::MAX, Delim::NEWLINE, "value").unwrap();
            r.confirm_eof().unwrap();
            v
        }

        proptest! {
            #[test]
            fn every_i32_roundtrips_through_canonical_decimal(v in any::<i32>()) {
                prop_assert_eq!(read_back_i32(&v.to_string()), v);
            }

            #[test]
            fn every_i64_roundtrips_through_canonical_decimal(v in any::<i64>()) {
                prop_assert_eq!(read_back_i64(&v.to_string()), v);
            }

            #[test]
            fn appending_a_digit_to_i64_extremes_overflows(d in 0u8..=9) {
                for extreme in [i64::MAX.to_string(), i64::MIN.to_string()] {
                    let text = format!("{extreme}{d}\n");
                    let mut r = TokenReader::new("<prop>", Cursor::new(text.into_bytes()));
                    let err = r.read_int(i64::MIN, i64::MAX, Delim::NEWLINE, "value");
                    prop_assert!(err.is_err());
                }
            }
        }
    }
}
