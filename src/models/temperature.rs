use std::fmt;

use crate::error::RecordError;

/// Fixed-point temperature in tenths of a degree.
///
/// Parsing works directly on the decimal digits, so no binary floating point
/// is involved between the input text and the stored integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Tenths(pub i64);

impl Tenths {
    pub fn value(self) -> i64 {
        self.0
    }

    /// Parse decimal text such as `-12.3` into tenths.
    ///
    /// Accepts an optional leading `-`, integer digits, and an optional `.`
    /// followed by fractional digits; at least one digit is required.
    /// Extra fractional digits round half away from zero.
    pub fn parse(text: &str) -> std::result::Result<Self, RecordError> {
        let invalid = || RecordError::InvalidTemperature(text.to_string());
        let out_of_range = || RecordError::TemperatureOutOfRange(text.to_string());

        let bytes = text.as_bytes();
        let (negative, mut pos) = match bytes.first() {
            Some(b'-') => (true, 1),
            _ => (false, 0),
        };

        let mut whole: i64 = 0;
        let mut digits = 0usize;
        while let Some(&b) = bytes.get(pos) {
            if !b.is_ascii_digit() {
                break;
            }
            whole = whole
                .checked_mul(10)
                .and_then(|w| w.checked_add(i64::from(b - b'0')))
                .ok_or_else(out_of_range)?;
            digits += 1;
            pos += 1;
        }

        let mut tenth: i64 = 0;
        let mut round_up = false;
        if bytes.get(pos) == Some(&b'.') {
            pos += 1;
            let mut fraction_digits = 0usize;
            while let Some(&b) = bytes.get(pos) {
                if !b.is_ascii_digit() {
                    break;
                }
                match fraction_digits {
                    0 => tenth = i64::from(b - b'0'),
                    // Only the hundredths digit decides rounding: any tail is
                    // either exactly half (rounds away) or above it.
                    1 => round_up = b >= b'5',
                    _ => {}
                }
                fraction_digits += 1;
                pos += 1;
            }
            digits += fraction_digits;
        }

        if digits == 0 || pos != bytes.len() {
            return Err(invalid());
        }

        let magnitude = whole
            .checked_mul(10)
            .and_then(|m| m.checked_add(tenth))
            .and_then(|m| m.checked_add(i64::from(round_up)))
            .ok_or_else(out_of_range)?;

        Ok(Tenths(if negative { -magnitude } else { magnitude }))
    }

    /// `floor(sum / count + 0.5)` with exact integer arithmetic.
    ///
    /// Half boundaries round toward positive infinity for both signs, so a
    /// mean of -7.5 tenths becomes -7. Returns `None` when `count` is zero.
    pub fn rounded_mean(sum: i128, count: u64) -> Option<Self> {
        if count == 0 {
            return None;
        }
        let count = i128::from(count);
        let quotient = sum.div_euclid(count);
        let remainder = sum.rem_euclid(count);
        let bump = if remainder * 2 >= count { 1 } else { 0 };
        i64::try_from(quotient + bump).ok().map(Tenths)
    }
}

/// Renders as `[-]whole.fraction`, with a sign only for negative values.
impl fmt::Display for Tenths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let abs = self.0.unsigned_abs();
        if self.0 < 0 {
            f.write_str("-")?;
        }
        write!(f, "{}.{}", abs / 10, abs % 10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_one_decimal() {
        assert_eq!(Tenths::parse("12.3").unwrap(), Tenths(123));
        assert_eq!(Tenths::parse("-0.7").unwrap(), Tenths(-7));
        assert_eq!(Tenths::parse("-12.0").unwrap(), Tenths(-120));
        assert_eq!(Tenths::parse("0.0").unwrap(), Tenths(0));
        assert_eq!(Tenths::parse("-0.0").unwrap(), Tenths(0));
    }

    #[test]
    fn test_parse_without_fraction() {
        assert_eq!(Tenths::parse("5").unwrap(), Tenths(50));
        assert_eq!(Tenths::parse("-5").unwrap(), Tenths(-50));
        assert_eq!(Tenths::parse("5.").unwrap(), Tenths(50));
        assert_eq!(Tenths::parse(".5").unwrap(), Tenths(5));
    }

    #[test]
    fn test_parse_rounds_half_away_from_zero() {
        assert_eq!(Tenths::parse("1.05").unwrap(), Tenths(11));
        assert_eq!(Tenths::parse("-1.05").unwrap(), Tenths(-11));
        assert_eq!(Tenths::parse("1.04999").unwrap(), Tenths(10));
        assert_eq!(Tenths::parse("0.25").unwrap(), Tenths(3));
        assert_eq!(Tenths::parse("-0.04").unwrap(), Tenths(0));
        assert_eq!(Tenths::parse("9.99").unwrap(), Tenths(100));
    }

    #[test]
    fn test_parse_rejects_invalid_text() {
        let rejected = [
            "", "-", ".", "-.", "abc", "notanumber", "1.2.3", "+1.0", " 1.0", "1.0 ", "1e3", "nan",
            "--1",
        ];
        for text in rejected {
            assert!(
                matches!(Tenths::parse(text), Err(RecordError::InvalidTemperature(_))),
                "expected '{}' to be rejected",
                text
            );
        }
    }

    #[test]
    fn test_parse_rejects_overflow() {
        assert!(matches!(
            Tenths::parse("99999999999999999999"),
            Err(RecordError::TemperatureOutOfRange(_))
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(Tenths(123).to_string(), "12.3");
        assert_eq!(Tenths(-7).to_string(), "-0.7");
        assert_eq!(Tenths(0).to_string(), "0.0");
        assert_eq!(Tenths(-100).to_string(), "-10.0");
        assert_eq!(Tenths(5).to_string(), "0.5");
        assert_eq!(Tenths(i64::MIN).to_string(), "-922337203685477580.8");
    }

    #[test]
    fn test_rounded_mean_half_up() {
        assert_eq!(Tenths::rounded_mean(-3, 2), Some(Tenths(-1)));
        assert_eq!(Tenths::rounded_mean(3, 2), Some(Tenths(2)));
        assert_eq!(Tenths::rounded_mean(-15, 2), Some(Tenths(-7)));
        assert_eq!(Tenths::rounded_mean(15, 2), Some(Tenths(8)));
        assert_eq!(Tenths::rounded_mean(80, 2), Some(Tenths(40)));
    }

    #[test]
    fn test_rounded_mean_non_half() {
        assert_eq!(Tenths::rounded_mean(10, 3), Some(Tenths(3)));
        assert_eq!(Tenths::rounded_mean(-10, 3), Some(Tenths(-3)));
        assert_eq!(Tenths::rounded_mean(20, 3), Some(Tenths(7)));
        assert_eq!(Tenths::rounded_mean(-20, 3), Some(Tenths(-7)));
    }

    #[test]
    fn test_rounded_mean_empty() {
        assert_eq!(Tenths::rounded_mean(0, 0), None);
    }
}
