//! Per-width decimal overflow thresholds for the integer scanner.
//!
//! The scanner accumulates digits into a signed value and must detect
//! overflow *before* performing the multiply-add that would wrap. For a
//! width whose maximum is `...XY` (prefix `...X`, last digit `Y`), an
//! incoming digit `d` overflows iff the accumulated value already exceeds
//! the prefix, or equals it and `d > Y`. The negative side uses its own
//! prefix/last-digit pair because two's-complement minima have one more
//! unit of magnitude than the maxima.
//!
//! Both supported widths share one automaton
//! ([`TokenReader::read_int`](crate::TokenReader::read_int)); the constants
//! below are the only per-width divergence.

mod sealed {
    pub trait Sealed {}
    impl Sealed for i32 {}
    impl Sealed for i64 {}
}

/// A signed integer width the strict scanner can read.
///
/// Implemented for `i32` and `i64`. Sealed: the threshold constants are
/// load-bearing and must be derived from the width's decimal expansion,
/// not supplied by downstream code.
pub trait ScanInt: sealed::Sealed + Copy + PartialOrd + std::fmt::Display {
    /// Diagnostic label for this width ("int" / "long").
    const KIND: &'static str;

    /// `MAX / 10`: accumulated value above which any further digit overflows.
    const MAX_PREFIX: Self;
    /// `MAX % 10`: largest digit that may follow an accumulation of `MAX_PREFIX`.
    const MAX_LAST_DIGIT: u8;
    /// `MIN / 10` (negative): value below which any further digit overflows.
    const MIN_PREFIX: Self;
    /// Magnitude of `MIN % 10`: largest digit that may follow `MIN_PREFIX`.
    const MIN_LAST_DIGIT: u8;

    /// The value of a single leading digit.
    fn from_digit(digit: u8) -> Self;

    /// Negated value of a single leading digit.
    fn from_digit_neg(digit: u8) -> Self;

    /// `self * 10 + digit`. Caller must have ruled out overflow.
    fn push_digit(self, digit: u8) -> Self;

    /// `self * 10 - digit`. Caller must have ruled out overflow.
    fn push_digit_neg(self, digit: u8) -> Self;

    /// Widen to `i64` for range-violation diagnostics.
    fn widen(self) -> i64;
}

impl ScanInt for i32 {
    const KIND: &'static str = "int";

    const MAX_PREFIX: i32 = 214_748_364;
    const MAX_LAST_DIGIT: u8 = 7;
    const MIN_PREFIX: i32 = -214_748_364;
    const MIN_LAST_DIGIT: u8 = 8;

    #[inline]
    fn from_digit(digit: u8) -> i32 {
        i32::from(digit)
    }

    #[inline]
    fn from_digit_neg(digit: u8) -> i32 {
        -i32::from(digit)
    }

    #[inline]
    fn push_digit(self, digit: u8) -> i32 {
        self * 10 + i32::from(digit)
    }

    #[inline]
    fn push_digit_neg(self, digit: u8) -> i32 {
        self * 10 - i32::from(digit)
    }

    #[inline]
    fn widen(self) -> i64 {
        i64::from(self)
    }
}

impl ScanInt for i64 {
    const KIND: &'static str = "long";

    const MAX_PREFIX: i64 = 922_337_203_685_477_580;
    const MAX_LAST_DIGIT: u8 = 7;
    const MIN_PREFIX: i64 = -922_337_203_685_477_580;
    const MIN_LAST_DIGIT: u8 = 8;

    #[inline]
    fn from_digit(digit: u8) -> i64 {
        i64::from(digit)
    }

    #[inline]
    fn from_digit_neg(digit: u8) -> i64 {
        -i64::from(digit)
    }

    #[inline]
    fn push_digit(self, digit: u8) -> i64 {
        self * 10 + i64::from(digit)
    }

    #[inline]
    fn push_digit_neg(self, digit: u8) -> i64 {
        self * 10 - i64::from(digit)
    }

    #[inline]
    fn widen(self) -> i64 {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::ScanInt;
    use pretty_assertions::assert_eq;

    // The thresholds are the decimal expansions of the type extremes with
    // the last digit split off. Re-derive them here so a typo in the
    // constants cannot survive.

    #[test]
    fn i32_thresholds_match_type_extremes() {
        assert_eq!(<i32 as ScanInt>::MAX_PREFIX, i32::MAX / 10);
        assert_eq!(i32::from(<i32 as ScanInt>::MAX_LAST_DIGIT), i32::MAX % 10);
        assert_eq!(<i32 as ScanInt>::MIN_PREFIX, i32::MIN / 10);
        assert_eq!(-i32::from(<i32 as ScanInt>::MIN_LAST_DIGIT), i32::MIN % 10);
    }

    #[test]
    fn i64_thresholds_match_type_extremes() {
        assert_eq!(<i64 as ScanInt>::MAX_PREFIX, i64::MAX / 10);
        assert_eq!(i64::from(<i64 as ScanInt>::MAX_LAST_DIGIT), i64::MAX % 10);
        assert_eq!(<i64 as ScanInt>::MIN_PREFIX, i64::MIN / 10);
        assert_eq!(-i64::from(<i64 as ScanInt>::MIN_LAST_DIGIT), i64::MIN % 10);
    }

    #[test]
    fn push_digit_reaches_the_extremes_without_wrapping() {
        let max = <i32 as ScanInt>::MAX_PREFIX.push_digit(<i32 as ScanInt>::MAX_LAST_DIGIT);
        assert_eq!(max, i32::MAX);
        let min = <i32 as ScanInt>::MIN_PREFIX.push_digit_neg(<i32 as ScanInt>::MIN_LAST_DIGIT);
        assert_eq!(min, i32::MIN);

        let max = <i64 as ScanInt>::MAX_PREFIX.push_digit(<i64 as ScanInt>::MAX_LAST_DIGIT);
        assert_eq!(max, i64::MAX);
        let min = <i64 as ScanInt>::MIN_PREFIX.push_digit_neg(<i64 as ScanInt>::MIN_LAST_DIGIT);
        assert_eq!(min, i64::MIN);
    }
}
