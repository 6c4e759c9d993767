//! Fixed 256-entry byte membership sets for the word scanner.
//!
//! A [`ByteClass`] answers "does byte `b` belong to this token?" in O(1).
//! Classes are built once (usually as `const` items) and reused across
//! tokens, rather than rebuilt per scan call.

/// A set of byte values, backed by a 256-bit bitmap.
///
/// Construction is `const`, so grammar authors can define their alphabet
/// next to the grammar:
///
/// ```
/// use verd_scan::ByteClass;
///
/// const MOVES: ByteClass = ByteClass::from_bytes(b"UDLR");
/// assert!(MOVES.contains(b'U'));
/// assert!(!MOVES.contains(b'X'));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ByteClass {
    /// One bit per byte value: `bits[b >> 6] & (1 << (b & 63))`.
    bits: [u64; 4],
}

/// Size assertion: a ByteClass is exactly 32 bytes and cheap to copy.
const _: () = assert!(std::mem::size_of::<ByteClass>() == 32);

impl ByteClass {
    /// The empty class (no byte is a member).
    pub const EMPTY: ByteClass = ByteClass { bits: [0; 4] };

    /// `A`-`Z`.
    pub const UPPERCASE: ByteClass = ByteClass::from_bytes(b"ABCDEFGHIJKLMNOPQRSTUVWXYZ");

    /// `a`-`z`.
    pub const LOWERCASE: ByteClass = ByteClass::from_bytes(b"abcdefghijklmnopqrstuvwxyz");

    /// `A`-`Z` and `a`-`z`.
    pub const ALPHABETIC: ByteClass =
        ByteClass::from_bytes(b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz");

    /// `A`-`Z`, `a`-`z`, and `0`-`9`.
    pub const ALPHANUMERIC: ByteClass =
        ByteClass::from_bytes(b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789");

    /// `0`-`9`.
    pub const DECIMAL_DIGITS: ByteClass = ByteClass::from_bytes(b"0123456789");

    /// Build a class containing exactly the bytes of `alphabet`.
    ///
    /// Duplicates are harmless. The byte string is the full definition;
    /// there is no range or negation syntax.
    pub const fn from_bytes(alphabet: &[u8]) -> Self {
        let mut bits = [0u64; 4];
        let mut i = 0;
        while i < alphabet.len() {
            let b = alphabet[i];
            bits[(b >> 6) as usize] |= 1u64 << (b & 63);
            i += 1;
        }
        Self { bits }
    }

    /// Returns `true` if `byte` is a member of this class.
    #[inline]
    pub const fn contains(&self, byte: u8) -> bool {
        self.bits[(byte >> 6) as usize] & (1u64 << (byte & 63)) != 0
    }

    /// Returns a class containing the members of both `self` and `other`.
    pub const fn union(&self, other: &ByteClass) -> ByteClass {
        ByteClass {
            bits: [
                self.bits[0] | other.bits[0],
                self.bits[1] | other.bits[1],
                self.bits[2] | other.bits[2],
                self.bits[3] | other.bits[3],
            ],
        }
    }

    /// Number of member bytes.
    pub const fn len(&self) -> u32 {
        self.bits[0].count_ones()
            + self.bits[1].count_ones()
            + self.bits[2].count_ones()
            + self.bits[3].count_ones()
    }

    /// Returns `true` if no byte is a member.
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::ByteClass;
    use pretty_assertions::assert_eq;

    #[test]
    fn from_bytes_contains_exactly_its_alphabet() {
        let class = ByteClass::from_bytes(b"abc");
        for b in 0u8..=255 {
            assert_eq!(class.contains(b), b == b'a' || b == b'b' || b == b'c');
        }
    }

    #[test]
    fn empty_contains_nothing() {
        for b in 0u8..=255 {
            assert!(!ByteClass::EMPTY.contains(b));
        }
        assert!(ByteClass::EMPTY.is_empty());
    }

    #[test]
    fn duplicates_are_harmless() {
        assert_eq!(
            ByteClass::from_bytes(b"aaa"),
            ByteClass::from_bytes(b"a")
        );
    }

    #[test]
    fn decimal_digits_matches_is_ascii_digit() {
        for b in 0u8..=255 {
            assert_eq!(ByteClass::DECIMAL_DIGITS.contains(b), b.is_ascii_digit());
        }
    }

    #[test]
    fn alphanumeric_is_union_of_alphabetic_and_digits() {
        let union = ByteClass::ALPHABETIC.union(&ByteClass::DECIMAL_DIGITS);
        assert_eq!(union, ByteClass::ALPHANUMERIC);
    }

    #[test]
    fn uppercase_and_lowercase_partition_alphabetic() {
        for b in 0u8..=255 {
            assert_eq!(
                ByteClass::ALPHABETIC.contains(b),
                ByteClass::UPPERCASE.contains(b) || ByteClass::LOWERCASE.contains(b)
            );
        }
        assert_eq!(ByteClass::UPPERCASE.len(), 26);
        assert_eq!(ByteClass::LOWERCASE.len(), 26);
    }

    #[test]
    fn high_bytes_are_representable() {
        let class = ByteClass::from_bytes(&[0x00, 0x7F, 0x80, 0xFF]);
        assert!(class.contains(0x00));
        assert!(class.contains(0x7F));
        assert!(class.contains(0x80));
        assert!(class.contains(0xFF));
        assert_eq!(class.len(), 4);
    }
}
