//! Token delimiters.
//!
//! Every scan call names the single byte expected to terminate the token.
//! End-of-stream is a first-class delimiter: a grammar's final token is
//! typically terminated by `Delim::NEWLINE`, and the end of the stream
//! after it is confirmed by
//! [`TokenReader::confirm_eof`](crate::TokenReader::confirm_eof).

/// The byte that halted a token scan.
///
/// `Eof` is a distinct sentinel rather than a reserved byte value: all 256
/// byte values are valid stream content.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Delim {
    /// A concrete byte terminated the token.
    Byte(u8),
    /// The source ended.
    Eof,
}

impl Delim {
    /// A single space, the mid-sequence separator.
    pub const SPACE: Delim = Delim::Byte(b' ');

    /// A single newline, the line/section terminator.
    pub const NEWLINE: Delim = Delim::Byte(b'\n');

    /// Delimiter for element `i` of an `n`-element space-separated,
    /// newline-terminated sequence: space between elements, newline after
    /// the last.
    #[inline]
    pub fn array(i: usize, n: usize) -> Delim {
        if i + 1 < n {
            Delim::SPACE
        } else {
            Delim::NEWLINE
        }
    }

    pub(crate) fn from_byte(byte: Option<u8>) -> Delim {
        match byte {
            Some(b) => Delim::Byte(b),
            None => Delim::Eof,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Delim;
    use pretty_assertions::assert_eq;

    #[test]
    fn array_separates_with_space_and_terminates_with_newline() {
        let n = 3;
        assert_eq!(Delim::array(0, n), Delim::SPACE);
        assert_eq!(Delim::array(1, n), Delim::SPACE);
        assert_eq!(Delim::array(2, n), Delim::NEWLINE);
    }

    #[test]
    fn array_of_one_terminates_immediately() {
        assert_eq!(Delim::array(0, 1), Delim::NEWLINE);
    }

    #[test]
    fn eof_is_distinct_from_every_byte() {
        for b in 0u8..=255 {
            assert_ne!(Delim::Eof, Delim::Byte(b));
        }
    }
}
