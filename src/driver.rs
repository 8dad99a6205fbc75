use routeargs_literal::Literal;
use tracing::{debug, trace};

use crate::{
    Arguments, CaptureError, Mismatch, Reason, convert,
    definition::{Definition, DurationUnit, Enumeration, Sequence, Slot, Target},
    validate::{Position, Verdict, validate},
};

/// How much of the argument list a definition consumed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bound {
    One,
    Rest,
}

fn store_slot(slot: Slot<'_>, literal: &Literal) -> Result<(), Mismatch> {
    match slot {
        Slot::Int(target) => *target = convert::int(literal)?,
        Slot::Float(target) => *target = convert::float(literal)?,
        Slot::String(target) => *target = convert::string(literal)?,
        Slot::Duration(target) => *target = convert::duration(literal, convert::default_unit())?,
        Slot::Timestamp(target) => *target = convert::timestamp(literal)?,
        Slot::Mixed(target) => *target = convert::mixed(literal)?,
    }

    Ok(())
}

fn store_sequence(sequence: Sequence<'_>, rest: &[Literal]) -> Result<(), Mismatch> {
    match sequence {
        Sequence::Int(target) => *target = convert::collect(rest, convert::int)?,
        Sequence::Float(target) => *target = convert::collect(rest, convert::float)?,
        Sequence::String(target) => *target = convert::collect(rest, convert::string)?,
        Sequence::Duration(target) => {
            let unit = convert::default_unit();
            *target = convert::collect(rest, |literal| convert::duration(literal, unit))?
        }
        Sequence::Timestamp(target) => *target = convert::collect(rest, convert::timestamp)?,
        Sequence::Mixed(target) => *target = convert::collect(rest, convert::mixed)?,
    }

    Ok(())
}

/// Store one or all of `rest` into `target`
fn store_target<T>(
    target: Target<'_, T>,
    rest: &[Literal],
    mut converter: impl FnMut(&Literal) -> Result<T, Mismatch>,
) -> Result<Bound, Mismatch> {
    match target {
        Target::Single(target) => {
            *target = converter(rest.first().ok_or(Mismatch)?)?;
            Ok(Bound::One)
        }
        Target::Many(target) => {
            *target = convert::collect(rest, converter)?;
            Ok(Bound::Rest)
        }
    }
}

/// Convert and store arguments for a definition that has already passed
/// validation. `rest` starts at the argument for this definition.
fn bind(definition: Definition<'_>, rest: &[Literal]) -> Result<Bound, Mismatch> {
    match definition {
        Definition::Scalar(slot) => {
            store_slot(slot, rest.first().ok_or(Mismatch)?)?;
            Ok(Bound::One)
        }
        Definition::Sequence(sequence) => {
            store_sequence(sequence, rest)?;
            Ok(Bound::Rest)
        }
        Definition::Enum(Enumeration { target, options }) => {
            store_target(target, rest, |literal| convert::option(literal, options))
        }
        Definition::Duration(DurationUnit { target, unit }) => {
            store_target(target, rest, |literal| convert::duration(literal, unit))
        }
        Definition::Optional(inner) => bind(*inner, rest),

        // Rejected by validation
        Definition::Invalid(_) | Definition::Unsupported(_) => Err(Mismatch),
    }
}

/**
Capture `arguments` into `definitions`.

Definitions are matched positionally with the arguments, from left to right.
Each definition is checked against its position before anything is written to
it, and the first definition that fails a check or fails to convert its
argument aborts the whole capture. Destinations of earlier definitions will
have already been written in that case, so callers should treat every
destination as meaningless after an error.

See [`capture!`][crate::capture!] for a more convenient way to call this.

```
use routeargs::{Definition, capture, enumeration, literals};

let mut status = 0i64;
let mut mode = String::new();

capture(
    [
        Definition::from(&mut status),
        enumeration(&mut mode, &["strict", "lenient"]),
    ],
    &literals![404, "strict"],
)
.unwrap();

assert_eq!(status, 404);
assert_eq!(mode, "strict");
```
*/
pub fn capture<'a, 'b>(
    definitions: impl IntoIterator<Item = Definition<'a>>,
    arguments: impl Into<Arguments<'b>>,
) -> Result<(), CaptureError> {
    let fail = |error: CaptureError| {
        debug!(%error, "capture failed");
        error
    };

    let arguments = arguments.into().resolve().map_err(fail)?;

    let mut definitions = definitions.into_iter().enumerate().peekable();
    let mut after_optional = false;
    let mut count = 0;

    while let Some((index, definition)) = definitions.next() {
        count = index + 1;

        let rest = arguments.get(index..).unwrap_or_default();
        let position = Position {
            index,
            remaining: rest.len(),
            last: definitions.peek().is_none(),
            after_optional,
            in_optional: false,
        };

        if validate(&definition, position).map_err(fail)? == Verdict::Skip {
            trace!(index, %definition, "no argument for optional definition");
            continue;
        }

        trace!(index, %definition, "binding definition");

        let optional = matches!(definition, Definition::Optional(_));

        let bound = bind(definition, rest).map_err(|Mismatch| {
            if let Some(literal) = rest.first() {
                debug!(index, %literal, kind = literal.kind(), "argument did not convert");
            }

            fail(Reason::Mismatch { index }.into())
        })?;

        match bound {
            Bound::One => after_optional |= optional,
            Bound::Rest => return Ok(()),
        }
    }

    if count < arguments.len() {
        return Err(fail(
            Reason::TooManyArguments {
                expected: count,
                got: arguments.len(),
            }
            .into(),
        ));
    }

    Ok(())
}
