/*!
Capture definitions: the destinations that [`capture`][crate::capture] writes
into, and the decorators that modify how they're matched.

Definitions are built with [`From`] (from a mutable reference to a supported
destination type) or with the [`enumeration`], [`duration`] and [`optional`]
builders. None of these ever fail: a decorator applied to a destination it
doesn't support produces an [`Invalid`][Definition::Invalid] definition,
which is only rejected once it's actually used in a capture.
*/

use core::any::{Any, TypeId, type_name};

use chrono::{DateTime, FixedOffset, TimeDelta};
use routeargs_literal::Literal;

/// The timestamp type captured by [`Slot::Timestamp`]. Timestamps parsed
/// from RFC 3339 strings retain their offset; numeric timestamps are UTC.
pub type Timestamp = DateTime<FixedOffset>;

/// A destination for a single captured value
#[derive(Debug)]
pub enum Slot<'a> {
    Int(&'a mut i64),
    Float(&'a mut f64),
    String(&'a mut String),

    /// Numeric arguments are interpreted as milliseconds. Use [`duration`]
    /// for a different unit.
    Duration(&'a mut TimeDelta),
    Timestamp(&'a mut Timestamp),

    /// Any int, float or string, preserving its kind
    Mixed(&'a mut Literal),
}

/// A destination for all of the remaining arguments. A sequence must always
/// be the last definition in a capture.
#[derive(Debug)]
pub enum Sequence<'a> {
    Int(&'a mut Vec<i64>),
    Float(&'a mut Vec<f64>),
    String(&'a mut Vec<String>),
    Duration(&'a mut Vec<TimeDelta>),
    Timestamp(&'a mut Vec<Timestamp>),
    Mixed(&'a mut Vec<Literal>),
}

/// The destination of a decorated definition, which can either be a single
/// value or a sequence of them.
#[derive(Debug)]
pub enum Target<'a, T> {
    Single(&'a mut T),
    Many(&'a mut Vec<T>),
}

impl<T> Target<'_, T> {
    #[inline]
    #[must_use]
    pub const fn is_many(&self) -> bool {
        matches!(*self, Target::Many(_))
    }
}

/// A string definition restricted to a fixed set of options
#[derive(Debug)]
pub struct Enumeration<'a> {
    pub target: Target<'a, String>,
    pub options: &'a [&'a str],
}

/// A duration definition with a custom unit for numeric arguments
#[derive(Debug)]
pub struct DurationUnit<'a> {
    pub target: Target<'a, TimeDelta>,
    pub unit: TimeDelta,
}

/// The decorator that produced an [`Invalid`][Definition::Invalid]
/// definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decorator {
    Enum,
    Duration,
}

/// A single capture definition. See the [module docs][self] for how these
/// are constructed.
#[derive(Debug)]
pub enum Definition<'a> {
    Scalar(Slot<'a>),
    Sequence(Sequence<'a>),
    Enum(Enumeration<'a>),
    Duration(DurationUnit<'a>),
    Optional(Box<Definition<'a>>),

    /// A decorator was applied to a destination it doesn't support
    Invalid(Decorator),

    /// [`Definition::dynamic`] was given a type that isn't a known
    /// destination. Contains the name of that type.
    Unsupported(&'static str),
}

impl<'a> Definition<'a> {
    /// True if this definition consumes all of the remaining arguments,
    /// looking through any `Optional` layers.
    #[must_use]
    pub fn is_variadic(&self) -> bool {
        match *self {
            Definition::Sequence(_) => true,
            Definition::Enum(Enumeration { ref target, .. }) => target.is_many(),
            Definition::Duration(DurationUnit { ref target, .. }) => target.is_many(),
            Definition::Optional(ref inner) => inner.is_variadic(),
            Definition::Scalar(_) | Definition::Invalid(_) | Definition::Unsupported(_) => false,
        }
    }

    /**
    Create a definition from a type-erased destination. This is the escape
    hatch for code that only has a `dyn Any`; a destination of a type that
    isn't supported produces an [`Unsupported`][Definition::Unsupported]
    definition, and capturing with it fails with
    [`UnsupportedDefinitionType`][crate::ErrorKind::UnsupportedDefinitionType].
    */
    pub fn dynamic(target: &'a mut dyn Any) -> Self {
        let id = (*target).type_id();

        macro_rules! downcast {
            ($($type:ty => $wrap:ident :: $variant:ident,)*) => {$(
                if id == TypeId::of::<$type>() {
                    return match target.downcast_mut::<$type>() {
                        Some(target) => Definition::from($wrap::$variant(target)),
                        None => Definition::Unsupported(type_name::<$type>()),
                    };
                }
            )*};
        }

        downcast! {
            i64 => Slot::Int,
            f64 => Slot::Float,
            String => Slot::String,
            TimeDelta => Slot::Duration,
            Timestamp => Slot::Timestamp,
            Literal => Slot::Mixed,
            Vec<i64> => Sequence::Int,
            Vec<f64> => Sequence::Float,
            Vec<String> => Sequence::String,
            Vec<TimeDelta> => Sequence::Duration,
            Vec<Timestamp> => Sequence::Timestamp,
            Vec<Literal> => Sequence::Mixed,
        }

        Definition::Unsupported(dynamic_type_name(id))
    }
}

/// `dyn Any` can't tell us the name of the type behind it, so for the error
/// message we settle for recognizing a few likely mistakes.
fn dynamic_type_name(id: TypeId) -> &'static str {
    macro_rules! names {
        ($($type:ty),*) => {$(
            if id == TypeId::of::<$type>() {
                return type_name::<$type>();
            }
        )*};
    }

    names!(i8, i16, i32, u8, u16, u32, u64, usize, isize, f32, bool, &'static str, Vec<i32>);

    "unknown type"
}

macro_rules! from_destination {
    ($($type:ty => $wrap:ident :: $variant:ident,)*) => {$(
        impl<'a> From<&'a mut $type> for Definition<'a> {
            #[inline]
            fn from(target: &'a mut $type) -> Self {
                Definition::from($wrap::$variant(target))
            }
        }
    )*};
}

from_destination! {
    i64 => Slot::Int,
    f64 => Slot::Float,
    String => Slot::String,
    TimeDelta => Slot::Duration,
    Timestamp => Slot::Timestamp,
    Literal => Slot::Mixed,
    Vec<i64> => Sequence::Int,
    Vec<f64> => Sequence::Float,
    Vec<String> => Sequence::String,
    Vec<TimeDelta> => Sequence::Duration,
    Vec<Timestamp> => Sequence::Timestamp,
    Vec<Literal> => Sequence::Mixed,
}

impl<'a> From<Slot<'a>> for Definition<'a> {
    #[inline]
    fn from(slot: Slot<'a>) -> Self {
        Definition::Scalar(slot)
    }
}

impl<'a> From<Sequence<'a>> for Definition<'a> {
    #[inline]
    fn from(sequence: Sequence<'a>) -> Self {
        Definition::Sequence(sequence)
    }
}

/**
Restrict a string definition (or a sequence of strings) to the given options.
Arguments must match one of the options exactly, including case.

Applying `enumeration` to an [`optional`] definition produces the same
definition as wrapping the enumeration in [`optional`]. Applying it to
anything other than a `String` or `Vec<String>` produces an
[`Invalid`][Definition::Invalid] definition.
*/
pub fn enumeration<'a>(
    definition: impl Into<Definition<'a>>,
    options: &'a [&'a str],
) -> Definition<'a> {
    match definition.into() {
        Definition::Scalar(Slot::String(target)) => Definition::Enum(Enumeration {
            target: Target::Single(target),
            options,
        }),
        Definition::Sequence(Sequence::String(target)) => Definition::Enum(Enumeration {
            target: Target::Many(target),
            options,
        }),
        Definition::Optional(inner) => optional(enumeration(*inner, options)),
        _ => Definition::Invalid(Decorator::Enum),
    }
}

/**
Use `unit` for numeric arguments of a duration definition (or a sequence of
durations), instead of the default of one millisecond. Duration strings, like
`"12s"`, are unaffected by the unit.

Like [`enumeration`], this commutes with [`optional`], and produces an
[`Invalid`][Definition::Invalid] definition when applied to anything other
than a `TimeDelta` or `Vec<TimeDelta>`.
*/
pub fn duration<'a>(definition: impl Into<Definition<'a>>, unit: TimeDelta) -> Definition<'a> {
    match definition.into() {
        Definition::Scalar(Slot::Duration(target)) => Definition::Duration(DurationUnit {
            target: Target::Single(target),
            unit,
        }),
        Definition::Sequence(Sequence::Duration(target)) => Definition::Duration(DurationUnit {
            target: Target::Many(target),
            unit,
        }),
        Definition::Optional(inner) => optional(duration(*inner, unit)),
        _ => Definition::Invalid(Decorator::Duration),
    }
}

/// Make a definition optional. If there's no argument left for it, the
/// destination keeps whatever value it had before the capture. Only other
/// optionals, or a final sequence, may follow an optional that got a value.
pub fn optional<'a>(definition: impl Into<Definition<'a>>) -> Definition<'a> {
    Definition::Optional(Box::new(definition.into()))
}
