/*!
Converters from raw [`Literal`] arguments to typed values.

Each converter accepts a fixed set of literal kinds and fails with the
uniform [`Mismatch`] error for everything else. None of them distinguish
between a literal of the wrong kind and a literal with a bad value.
*/

use chrono::{DateTime, TimeDelta, Utc};
use routeargs_literal::{Literal, duration as lexer};

use crate::{Mismatch, Timestamp};

/// The unit used for numeric duration arguments when no other is given.
#[inline]
#[must_use]
pub fn default_unit() -> TimeDelta {
    TimeDelta::milliseconds(1)
}

/// Convert a float to an integer, rounding toward zero. Fails if the float
/// is non-finite or out of the range of `i64`.
fn truncate(value: f64) -> Option<i64> {
    // `i64::MAX as f64` rounds up to 2^63, so the upper bound is exclusive.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;

    let value = value.trunc();
    (value.is_finite() && (-LIMIT..LIMIT).contains(&value)).then_some(value as i64)
}

pub fn int(literal: &Literal) -> Result<i64, Mismatch> {
    match *literal {
        Literal::Int(value) => Ok(value),
        Literal::Float(value) => truncate(value).ok_or(Mismatch),
        _ => Err(Mismatch),
    }
}

pub fn float(literal: &Literal) -> Result<f64, Mismatch> {
    match *literal {
        Literal::Float(value) => Ok(value),
        Literal::Int(value) => Ok(value as f64),
        _ => Err(Mismatch),
    }
}

pub fn string(literal: &Literal) -> Result<String, Mismatch> {
    match literal {
        Literal::String(value) => Ok(value.clone()),
        _ => Err(Mismatch),
    }
}

/**
Convert a duration argument. Ints and floats are multiplied by `unit`; floats
are multiplied in floating point and then truncated to whole nanoseconds.
Strings are parsed as duration expressions, like `"1h30m"`, and ignore the
unit entirely.
*/
pub fn duration(literal: &Literal, unit: TimeDelta) -> Result<TimeDelta, Mismatch> {
    let nanoseconds = match *literal {
        Literal::Int(value) => unit
            .num_nanoseconds()
            .and_then(|unit| unit.checked_mul(value))
            .ok_or(Mismatch)?,
        Literal::Float(value) => {
            let unit = unit.num_nanoseconds().ok_or(Mismatch)?;
            truncate(value * unit as f64).ok_or(Mismatch)?
        }
        Literal::String(ref value) => lexer::parse(value).map_err(|_| Mismatch)?,
        _ => return Err(Mismatch),
    };

    Ok(TimeDelta::nanoseconds(nanoseconds))
}

/**
Convert a timestamp argument. Numbers are seconds since the Unix epoch, with
the fractional part of a float becoming the sub-second component; strings are
parsed as RFC 3339, keeping their offset.
*/
pub fn timestamp(literal: &Literal) -> Result<Timestamp, Mismatch> {
    let utc = match *literal {
        Literal::Int(seconds) => DateTime::<Utc>::from_timestamp(seconds, 0),
        Literal::Float(value) => {
            let seconds = value.floor();
            let fraction = ((value - seconds) * 1e9) as u32;

            truncate(seconds)
                .and_then(|seconds| DateTime::<Utc>::from_timestamp(seconds, fraction.min(999_999_999)))
        }
        Literal::String(ref value) => {
            return DateTime::parse_from_rfc3339(value).map_err(|_| Mismatch);
        }
        _ => None,
    };

    utc.map(|utc| utc.fixed_offset()).ok_or(Mismatch)
}

/// Accept a string argument only if it's exactly one of `options`.
pub fn option(literal: &Literal, options: &[&str]) -> Result<String, Mismatch> {
    match literal {
        Literal::String(value) if options.contains(&value.as_str()) => Ok(value.clone()),
        _ => Err(Mismatch),
    }
}

/// Accept any int, float or string argument as it is.
pub fn mixed(literal: &Literal) -> Result<Literal, Mismatch> {
    match literal {
        Literal::Int(_) | Literal::Float(_) | Literal::String(_) => Ok(literal.clone()),
        Literal::Bool(_) | Literal::List(_) => Err(Mismatch),
    }
}

/// Convert every literal in `literals`, in order, stopping at the first
/// failure.
pub fn collect<T>(
    literals: &[Literal],
    convert: impl FnMut(&Literal) -> Result<T, Mismatch>,
) -> Result<Vec<T>, Mismatch> {
    literals.iter().map(convert).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{FixedOffset, TimeZone};

    #[test]
    fn ints() {
        assert_eq!(int(&Literal::Int(42)), Ok(42));
        assert_eq!(int(&Literal::Float(3.0)), Ok(3));
        assert_eq!(int(&Literal::Float(-3.9)), Ok(-3));
        assert_eq!(int(&Literal::Float(f64::NAN)), Err(Mismatch));
        assert_eq!(int(&Literal::Float(f64::INFINITY)), Err(Mismatch));
        assert_eq!(int(&Literal::Float(1e19)), Err(Mismatch));
        assert_eq!(int(&Literal::Float(-9_223_372_036_854_775_808.0)), Ok(i64::MIN));
        assert_eq!(int(&Literal::from("42")), Err(Mismatch));
        assert_eq!(int(&Literal::Bool(true)), Err(Mismatch));
    }

    #[test]
    fn floats() {
        assert_eq!(float(&Literal::Int(3)), Ok(3.0));
        assert_eq!(float(&Literal::Float(3.5)), Ok(3.5));
        assert_eq!(float(&Literal::from("3.5")), Err(Mismatch));
    }

    #[test]
    fn strings() {
        assert_eq!(string(&Literal::from("foo")), Ok("foo".to_owned()));
        assert_eq!(string(&Literal::Int(1)), Err(Mismatch));
        assert_eq!(string(&Literal::List(Vec::new())), Err(Mismatch));
    }

    #[test]
    fn durations() {
        let second = TimeDelta::seconds(1);

        assert_eq!(duration(&Literal::Int(12), default_unit()), Ok(TimeDelta::milliseconds(12)));
        assert_eq!(duration(&Literal::Int(12), second), Ok(TimeDelta::seconds(12)));
        assert_eq!(
            duration(&Literal::Float(3.14), second),
            Ok(TimeDelta::nanoseconds(3_140_000_000))
        );
        assert_eq!(
            duration(&Literal::from("1m"), second),
            Ok(TimeDelta::minutes(1))
        );
        assert_eq!(
            duration(&Literal::from("-1.5s"), default_unit()),
            Ok(TimeDelta::milliseconds(-1500))
        );

        assert_eq!(duration(&Literal::Int(i64::MAX), second), Err(Mismatch));
        assert_eq!(duration(&Literal::Float(f64::NAN), second), Err(Mismatch));
        assert_eq!(duration(&Literal::from("12"), second), Err(Mismatch));
        assert_eq!(duration(&Literal::Bool(false), second), Err(Mismatch));
    }

    #[test]
    fn timestamps() {
        let utc = FixedOffset::east_opt(0).unwrap();

        assert_eq!(
            timestamp(&Literal::Int(1_511_277_065)),
            Ok(utc.timestamp_opt(1_511_277_065, 0).unwrap())
        );

        let fractional = timestamp(&Literal::Float(1_511_277_065.42)).unwrap();
        assert_eq!(fractional.timestamp(), 1_511_277_065);
        assert!((fractional.timestamp_subsec_nanos() as i64 - 420_000_000).abs() < 1_000);

        let parsed = timestamp(&Literal::from("3000-12-18T09:36:18+09:00")).unwrap();
        assert_eq!(parsed.offset(), &FixedOffset::east_opt(9 * 3600).unwrap());
        assert_eq!(
            parsed,
            FixedOffset::east_opt(9 * 3600)
                .unwrap()
                .with_ymd_and_hms(3000, 12, 18, 9, 36, 18)
                .unwrap()
        );

        assert_eq!(timestamp(&Literal::from("yesterday")), Err(Mismatch));
        assert_eq!(timestamp(&Literal::Float(f64::INFINITY)), Err(Mismatch));
        assert_eq!(timestamp(&Literal::Bool(true)), Err(Mismatch));
    }

    #[test]
    fn options() {
        let colors = ["red", "green", "blue"];

        assert_eq!(option(&Literal::from("red"), &colors), Ok("red".to_owned()));
        assert_eq!(option(&Literal::from("cyan"), &colors), Err(Mismatch));
        assert_eq!(option(&Literal::from("Red"), &colors), Err(Mismatch));
        assert_eq!(option(&Literal::Int(0), &colors), Err(Mismatch));
    }

    #[test]
    fn mixed_literals() {
        assert_eq!(mixed(&Literal::Int(1)), Ok(Literal::Int(1)));
        assert_eq!(mixed(&Literal::Float(1.0)), Ok(Literal::Float(1.0)));
        assert_eq!(mixed(&Literal::from("x")), Ok(Literal::from("x")));
        assert_eq!(mixed(&Literal::Bool(true)), Err(Mismatch));
        assert_eq!(mixed(&Literal::List(Vec::new())), Err(Mismatch));
    }

    #[test]
    fn collections() {
        let literals = [Literal::Int(1), Literal::Float(2.0), Literal::Int(3)];
        assert_eq!(collect(&literals, int), Ok(vec![1, 2, 3]));
        assert_eq!(collect(&[], int), Ok(Vec::new()));

        let literals = [Literal::Int(1), Literal::from("two")];
        assert_eq!(collect(&literals, int), Err(Mismatch));
    }
}
