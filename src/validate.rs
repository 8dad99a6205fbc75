//! Structural checks run on each definition before it's bound to arguments.

use crate::{
    CaptureError, Reason,
    definition::{Decorator, Definition},
};

/// Where a definition sits in a capture call, relative to the arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Index of this definition
    pub index: usize,

    /// Number of arguments not yet consumed by earlier definitions
    pub remaining: usize,

    /// True if this is the final definition
    pub last: bool,

    /// True if some earlier optional definition received a value
    pub after_optional: bool,

    /// True while checking the definition wrapped in an optional
    pub in_optional: bool,
}

/// What the driver should do with a definition that passed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Bind the definition to the arguments
    Bind,

    /// The definition is an optional with no argument left; leave it alone
    Skip,
}

fn single(position: Position) -> Result<Verdict, Reason> {
    let index = position.index;

    if position.after_optional {
        Err(Reason::RequiredAfterOptional { index })
    } else if position.remaining == 0 {
        Err(Reason::MissingArgument { index })
    } else {
        Ok(Verdict::Bind)
    }
}

fn variadic(position: Position) -> Result<Verdict, Reason> {
    let index = position.index;

    if position.in_optional {
        Err(Reason::OptionalSequence { index })
    } else if !position.last {
        Err(Reason::VariadicNotLast { index })
    } else {
        Ok(Verdict::Bind)
    }
}

/// Check that `definition` can be bound at `position`.
pub fn validate(definition: &Definition<'_>, position: Position) -> Result<Verdict, CaptureError> {
    let index = position.index;

    match *definition {
        Definition::Unsupported(type_name) => {
            Err(CaptureError::UnsupportedDefinition { type_name })
        }
        Definition::Invalid(Decorator::Enum) => Err(Reason::InvalidEnum { index }.into()),
        Definition::Invalid(Decorator::Duration) => Err(Reason::InvalidDuration { index }.into()),
        Definition::Optional(ref inner) => {
            if inner.is_variadic() {
                Err(Reason::OptionalSequence { index }.into())
            } else if position.remaining == 0 {
                Ok(Verdict::Skip)
            } else {
                validate(
                    inner,
                    Position {
                        after_optional: false,
                        in_optional: true,
                        ..position
                    },
                )
            }
        }
        ref definition if definition.is_variadic() => Ok(variadic(position)?),
        _ => Ok(single(position)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::definition::{enumeration, optional};

    fn at(index: usize, remaining: usize, last: bool) -> Position {
        Position {
            index,
            remaining,
            last,
            after_optional: false,
            in_optional: false,
        }
    }

    #[test]
    fn scalars() {
        let mut value = 0i64;
        let definition = Definition::from(&mut value);

        assert_eq!(validate(&definition, at(0, 1, true)), Ok(Verdict::Bind));
        assert_eq!(
            validate(&definition, at(2, 0, true)),
            Err(Reason::MissingArgument { index: 2 }.into())
        );
        assert_eq!(
            validate(
                &definition,
                Position {
                    after_optional: true,
                    ..at(1, 1, true)
                }
            ),
            Err(Reason::RequiredAfterOptional { index: 1 }.into())
        );
    }

    #[test]
    fn sequences() {
        let mut values = Vec::<String>::new();
        let definition = Definition::from(&mut values);

        assert_eq!(validate(&definition, at(0, 0, true)), Ok(Verdict::Bind));
        assert_eq!(
            validate(
                &definition,
                Position {
                    after_optional: true,
                    ..at(3, 2, true)
                }
            ),
            Ok(Verdict::Bind)
        );
        assert_eq!(
            validate(&definition, at(0, 3, false)),
            Err(Reason::VariadicNotLast { index: 0 }.into())
        );
    }

    #[test]
    fn optionals() {
        let mut value = String::new();
        let definition = optional(&mut value);

        assert_eq!(validate(&definition, at(1, 0, true)), Ok(Verdict::Skip));
        assert_eq!(
            validate(
                &definition,
                Position {
                    after_optional: true,
                    ..at(1, 1, false)
                }
            ),
            Ok(Verdict::Bind)
        );
    }

    #[test]
    fn optional_sequences() {
        let mut values = Vec::<String>::new();
        let definition = optional(enumeration(&mut values, &["a"]));

        assert_eq!(
            validate(&definition, at(1, 0, true)),
            Err(Reason::OptionalSequence { index: 1 }.into())
        );
        assert_eq!(
            validate(&definition, at(1, 2, true)),
            Err(Reason::OptionalSequence { index: 1 }.into())
        );
    }

    #[test]
    fn invalid_definitions() {
        let mut value = 0i64;

        assert_eq!(
            validate(&enumeration(&mut value, &["a"]), at(0, 1, true)),
            Err(Reason::InvalidEnum { index: 0 }.into())
        );
        assert_eq!(
            validate(&Definition::Invalid(Decorator::Duration), at(4, 1, true)),
            Err(Reason::InvalidDuration { index: 4 }.into())
        );
        assert_eq!(
            validate(&Definition::Unsupported("u8"), at(0, 1, true)),
            Err(CaptureError::UnsupportedDefinition { type_name: "u8" })
        );
    }
}
