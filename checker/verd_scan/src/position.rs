//! Line/column tracking for scan diagnostics.
//!
//! The position advances once per byte actually delivered to the scanner.
//! Column resets to 1 on the byte immediately after a newline, so a
//! delimiter `\n` itself is reported on the line it terminates.

/// How the reader treats carriage returns in the raw stream.
///
/// Validators normally run on byte-exact data (`Exact`). When the source
/// may use foreign line endings (for example, submissions produced on
/// Windows), `NormalizeCrlf` collapses a `\r` directly followed by `\n`
/// into a single newline byte before the scanner sees it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NewlineMode {
    /// Deliver every byte verbatim.
    #[default]
    Exact,
    /// Collapse `\r\n` into `\n`. A lone `\r` passes through unchanged.
    NormalizeCrlf,
}

/// (line, column) of the most recently delivered byte.
///
/// Starts at `(0, 0)` with a synthetic preceding newline, so the first
/// delivered byte lands at `(1, 1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Position {
    line: u32,
    col: u32,
    /// Last byte delivered; drives the column reset after a newline.
    last: u8,
}

impl Position {
    /// Position before any byte has been read.
    pub fn start() -> Self {
        Self {
            line: 0,
            col: 0,
            last: b'\n',
        }
    }

    /// Record one delivered byte.
    #[inline]
    pub fn advance(&mut self, byte: u8) {
        if self.last == b'\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        self.last = byte;
    }

    /// 1-based line of the last delivered byte (0 before the first read).
    #[inline]
    pub fn line(&self) -> u32 {
        self.line
    }

    /// 1-based column of the last delivered byte (0 before the first read).
    #[inline]
    pub fn col(&self) -> u32 {
        self.col
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

#[cfg(test)]
mod tests {
    use super::Position;
    use pretty_assertions::assert_eq;

    #[test]
    fn first_byte_lands_at_one_one() {
        let mut pos = Position::start();
        pos.advance(b'a');
        assert_eq!((pos.line(), pos.col()), (1, 1));
    }

    #[test]
    fn column_increments_within_a_line() {
        let mut pos = Position::start();
        for b in *b"abc" {
            pos.advance(b);
        }
        assert_eq!((pos.line(), pos.col()), (1, 3));
    }

    #[test]
    fn newline_is_reported_on_the_line_it_terminates() {
        let mut pos = Position::start();
        for b in *b"ab\n" {
            pos.advance(b);
        }
        assert_eq!((pos.line(), pos.col()), (1, 3));
    }

    #[test]
    fn column_resets_after_newline() {
        let mut pos = Position::start();
        for b in *b"ab\nc" {
            pos.advance(b);
        }
        assert_eq!((pos.line(), pos.col()), (2, 1));
    }

    #[test]
    fn consecutive_newlines_each_open_a_line() {
        let mut pos = Position::start();
        for b in *b"\n\n\nx" {
            pos.advance(b);
        }
        assert_eq!((pos.line(), pos.col()), (4, 1));
    }
}
