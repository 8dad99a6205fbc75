/*!
Rendering of definitions as argument signatures, like
`int, duration(1s), ["auth"|"ip"]`. These are meant for humans: error
messages, listings, and logs.
*/

use core::fmt::{self, Display};

use chrono::TimeDelta;
use joinery::JoinableIterator;
use lazy_format::lazy_format;

use crate::definition::{Decorator, Definition, DurationUnit, Enumeration, Sequence, Slot};

fn slot_name(slot: &Slot<'_>) -> &'static str {
    match *slot {
        Slot::Int(_) => "int",
        Slot::Float(_) => "float",
        Slot::String(_) => "string",
        Slot::Duration(_) => "duration",
        Slot::Timestamp(_) => "time",
        Slot::Mixed(_) => "any",
    }
}

fn element_name(sequence: &Sequence<'_>) -> &'static str {
    match *sequence {
        Sequence::Int(_) => "int",
        Sequence::Float(_) => "float",
        Sequence::String(_) => "string",
        Sequence::Duration(_) => "duration",
        Sequence::Timestamp(_) => "time",
        Sequence::Mixed(_) => "any",
    }
}

/// Print a duration unit in the largest suffix that divides it evenly
fn unit_name(unit: TimeDelta) -> impl Display {
    const SUFFIXES: [(i64, &str); 6] = [
        (3_600_000_000_000, "h"),
        (60_000_000_000, "m"),
        (1_000_000_000, "s"),
        (1_000_000, "ms"),
        (1_000, "us"),
        (1, "ns"),
    ];

    let (count, suffix) = match unit.num_nanoseconds() {
        Some(0) => (0, "s"),
        Some(nanoseconds) => SUFFIXES
            .iter()
            .find(|&&(size, _)| nanoseconds % size == 0)
            .map_or((nanoseconds, "ns"), |&(size, suffix)| (nanoseconds / size, suffix)),
        None => (unit.num_seconds(), "s"),
    };

    lazy_format!("{count}{suffix}")
}

fn choices<'a>(options: &'a [&'a str]) -> impl Display + 'a {
    options
        .iter()
        .map(|option| lazy_format!("{option:?}"))
        .join_with('|')
}

impl Display for Definition<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Definition::Scalar(ref slot) => f.write_str(slot_name(slot)),
            Definition::Sequence(ref sequence) => write!(f, "{}...", element_name(sequence)),
            Definition::Enum(Enumeration { ref target, options }) => match target.is_many() {
                true => write!(f, "({})...", choices(options)),
                false => write!(f, "{}", choices(options)),
            },
            Definition::Duration(DurationUnit { ref target, unit }) => {
                let repeat = if target.is_many() { "..." } else { "" };
                write!(f, "duration({}){repeat}", unit_name(unit))
            }
            Definition::Optional(ref inner) => write!(f, "[{inner}]"),
            Definition::Invalid(Decorator::Enum) => f.write_str("<invalid enum>"),
            Definition::Invalid(Decorator::Duration) => f.write_str("<invalid duration>"),
            Definition::Unsupported(type_name) => write!(f, "<unsupported {type_name}>"),
        }
    }
}

/// Render a list of definitions as a comma separated signature.
pub fn signature<'a>(definitions: &'a [Definition<'_>]) -> impl Display + 'a {
    definitions.iter().join_with(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{
        Timestamp,
        definition::{duration, enumeration, optional},
    };

    #[test]
    fn scalars() {
        let mut number = 0i64;
        let mut ratio = 0.0f64;
        let mut text = String::new();
        let mut color = String::new();

        let definitions = [
            Definition::from(&mut number),
            Definition::from(&mut ratio),
            Definition::from(&mut text),
            enumeration(&mut color, &["red", "green", "blue"]),
        ];

        assert_eq!(
            signature(&definitions).to_string(),
            r#"int, float, string, "red"|"green"|"blue""#
        );
    }

    #[test]
    fn decorated() {
        let mut window = TimeDelta::zero();
        let mut timeout = TimeDelta::zero();
        let mut lookup = String::new();
        let mut delays = Vec::<TimeDelta>::new();

        let definitions = [
            duration(&mut window, TimeDelta::seconds(1)),
            optional(Definition::from(&mut timeout)),
            optional(enumeration(&mut lookup, &["auth", "ip"])),
            duration(&mut delays, TimeDelta::minutes(10)),
        ];

        assert_eq!(
            signature(&definitions).to_string(),
            r#"duration(1s), [duration], ["auth"|"ip"], duration(10m)..."#
        );
    }

    #[test]
    fn sequences() {
        let mut names = Vec::<String>::new();
        assert_eq!(Definition::from(&mut names).to_string(), "string...");

        let mut times = Vec::<Timestamp>::new();
        assert_eq!(Definition::from(&mut times).to_string(), "time...");

        let mut modes = Vec::<String>::new();
        assert_eq!(
            enumeration(&mut modes, &["a", "b"]).to_string(),
            r#"("a"|"b")..."#
        );
    }

    #[test]
    fn units() {
        assert_eq!(unit_name(TimeDelta::milliseconds(1)).to_string(), "1ms");
        assert_eq!(unit_name(TimeDelta::milliseconds(1500)).to_string(), "1500ms");
        assert_eq!(unit_name(TimeDelta::hours(2)).to_string(), "2h");
        assert_eq!(unit_name(TimeDelta::nanoseconds(7)).to_string(), "7ns");
        assert_eq!(unit_name(TimeDelta::zero()).to_string(), "0s");
    }

    #[test]
    fn broken() {
        let mut number = 0i64;

        assert_eq!(
            enumeration(&mut number, &["a"]).to_string(),
            "<invalid enum>"
        );
        assert_eq!(
            Definition::Invalid(Decorator::Duration).to_string(),
            "<invalid duration>"
        );
        assert_eq!(
            Definition::Unsupported("u8").to_string(),
            "<unsupported u8>"
        );
    }
}
