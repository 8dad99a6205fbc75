/*!
Lexer for duration strings such as `"300ms"`, `"1h30m"` or `"-1.5s"`.

A duration string is an optional sign followed by a sequence of decimal
numbers, each with an optional fraction and a mandatory unit suffix. The
accepted units are `ns`, `us` (or `µs`, `μs`), `ms`, `s`, `m` and `h`. The
string `"0"` is accepted without a unit.
*/

use core::fmt::{self, Display};

const NANOSECOND: u64 = 1;
const MICROSECOND: u64 = 1_000 * NANOSECOND;
const MILLISECOND: u64 = 1_000 * MICROSECOND;
const SECOND: u64 = 1_000 * MILLISECOND;
const MINUTE: u64 = 60 * SECOND;
const HOUR: u64 = 60 * MINUTE;

/// The largest magnitude a duration can have, which is only reachable by
/// negative durations.
const LIMIT: u64 = 1 << 63;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationError {
    /// The string was empty, or was only a sign
    Empty,

    /// A number in the string had no digits
    InvalidNumber,

    /// A number wasn't followed by a unit
    MissingUnit,

    /// A number was followed by a suffix that isn't a known unit
    UnknownUnit,

    /// The duration doesn't fit in 64 bits of nanoseconds
    Overflow,
}

impl Display for DurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DurationError::Empty => "empty duration",
            DurationError::InvalidNumber => "invalid number in duration",
            DurationError::MissingUnit => "missing unit in duration",
            DurationError::UnknownUnit => "unknown unit in duration",
            DurationError::Overflow => "duration out of range",
        })
    }
}

impl core::error::Error for DurationError {}

fn unit(suffix: &str) -> Option<u64> {
    Some(match suffix {
        "ns" => NANOSECOND,
        "us" | "\u{00b5}s" | "\u{03bc}s" => MICROSECOND,
        "ms" => MILLISECOND,
        "s" => SECOND,
        "m" => MINUTE,
        "h" => HOUR,
        _ => return None,
    })
}

/// Split off the leading run of ascii digits
#[inline]
fn split_digits(input: &str) -> (&str, &str) {
    let len = input.bytes().take_while(u8::is_ascii_digit).count();
    input.split_at(len)
}

/// Digits of a fraction past this many are below a nanosecond for every unit
const FRACTION_DIGITS: usize = 19;

/// `0.fraction * unit`, truncated to whole nanoseconds
fn scale_fraction(fraction: &str, unit: u64) -> u64 {
    let (numerator, denominator) = fraction
        .bytes()
        .take(FRACTION_DIGITS)
        .fold((0u128, 1u128), |(numerator, denominator), digit| {
            (numerator * 10 + u128::from(digit - b'0'), denominator * 10)
        });

    // Always less than `unit`
    (numerator * u128::from(unit) / denominator) as u64
}

/// Parse a duration string into a signed number of nanoseconds.
pub fn parse(input: &str) -> Result<i64, DurationError> {
    let (negative, mut rest) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };

    if rest == "0" {
        return Ok(0);
    }

    if rest.is_empty() {
        return Err(DurationError::Empty);
    }

    let mut total: u64 = 0;

    while !rest.is_empty() {
        let (whole, tail) = split_digits(rest);
        let (fraction, tail) = match tail.strip_prefix('.') {
            Some(tail) => split_digits(tail),
            None => ("", tail),
        };

        if whole.is_empty() && fraction.is_empty() {
            return Err(DurationError::InvalidNumber);
        }

        let suffix_len = tail
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(tail.len());
        let (suffix, tail) = tail.split_at(suffix_len);

        if suffix.is_empty() {
            return Err(DurationError::MissingUnit);
        }

        let unit = unit(suffix).ok_or(DurationError::UnknownUnit)?;

        let whole = whole
            .bytes()
            .try_fold(0u64, |acc, digit| {
                acc.checked_mul(10)?.checked_add(u64::from(digit - b'0'))
            })
            .ok_or(DurationError::Overflow)?;

        let mut value = whole.checked_mul(unit).ok_or(DurationError::Overflow)?;

        if !fraction.is_empty() {
            value = value
                .checked_add(scale_fraction(fraction, unit))
                .ok_or(DurationError::Overflow)?;
        }

        total = total.checked_add(value).ok_or(DurationError::Overflow)?;
        if total > LIMIT {
            return Err(DurationError::Overflow);
        }

        rest = tail;
    }

    match negative {
        true => Ok((total as i64).wrapping_neg()),
        false => i64::try_from(total).map_err(|_| DurationError::Overflow),
    }
}
