#![no_std]

/*!
Low-level implementation of route arguments. Provides the untyped [`Literal`]
values that a route definition passes to its filters and predicates, a parser
for argument lists written in route-definition syntax, and the lexer for
duration strings. No type conversion happens here; usually this is too low
level to use directly.
*/

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod duration;
pub mod parser;

use alloc::{string::String, vec::Vec};
use core::fmt::{self, Display, Write};

pub use parser::{Call, ParseError, ParseErrorKind, parse_arguments, parse_call};

#[doc(hidden)]
pub use alloc::vec::Vec as __Vec;

/**
A single, raw argument taken from a route definition.

Route definitions are untyped: `localRatelimit(20, "1m", "auth")` hands its
filter an [`Int`][Literal::Int], then two [`String`][Literal::String]s, and
it's up to the filter to decide what those mean. Regular expressions
(`/^foo$/`) are carried as strings. [`Bool`][Literal::Bool] and
[`List`][Literal::List] exist so that a route can express values which a
filter is expected to reject.
*/
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
    String(String),
    Bool(bool),
    List(Vec<Literal>),
}

impl Literal {
    /// A short name for the dynamic kind of this literal, suitable for
    /// diagnostics.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Literal::Int(_) => "int",
            Literal::Float(_) => "float",
            Literal::String(_) => "string",
            Literal::Bool(_) => "bool",
            Literal::List(_) => "list",
        }
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Literal::String(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

/// Print a literal the way it would be written in a route definition.
impl Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Int(value) => write!(f, "{value}"),
            Literal::Float(value) => write!(f, "{value:?}"),
            Literal::String(value) => write!(f, "{value:?}"),
            Literal::Bool(value) => write!(f, "{value}"),
            Literal::List(items) => {
                f.write_char('[')?;

                let mut items = items.iter();
                if let Some(item) = items.next() {
                    write!(f, "{item}")?;
                    items.try_for_each(|item| write!(f, ", {item}"))?;
                }

                f.write_char(']')
            }
        }
    }
}

macro_rules! from_primitive {
    ($($type:ty => $variant:ident $(as $cast:ty)?,)*) => {
        $(
            impl From<$type> for Literal {
                #[inline]
                fn from(value: $type) -> Self {
                    Literal::$variant(value $(as $cast)?)
                }
            }
        )*
    };
}

from_primitive! {
    i64 => Int,
    i32 => Int as i64,
    u32 => Int as i64,
    f64 => Float,
    f32 => Float as f64,
    bool => Bool,
    String => String,
    Vec<Literal> => List,
}

impl From<&str> for Literal {
    #[inline]
    fn from(value: &str) -> Self {
        Literal::String(value.into())
    }
}

/**
Build a `Vec<Literal>` from a list of plain values, converting each with
[`Literal::from`]:

```
use routeargs_literal::{Literal, literals};

let args = literals![42, 3.0, "foo"];
assert_eq!(args[1], Literal::Float(3.0));
```
*/
#[macro_export]
macro_rules! literals {
    ($($value:expr),* $(,)?) => {
        $crate::__Vec::<$crate::Literal>::from([$($crate::Literal::from($value)),*])
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    use alloc::{string::ToString, vec};

    #[test]
    fn kinds() {
        let kinds: Vec<&str> = literals![1, 2.5, "foo", true, Vec::<Literal>::new()]
            .iter()
            .map(Literal::kind)
            .collect();

        assert_eq!(kinds, ["int", "float", "string", "bool", "list"]);
    }

    #[test]
    fn display() {
        assert_eq!(Literal::Int(-3).to_string(), "-3");
        assert_eq!(Literal::Float(3.0).to_string(), "3.0");
        assert_eq!(Literal::from("say \"hi\"").to_string(), r#""say \"hi\"""#);
        assert_eq!(Literal::Bool(false).to_string(), "false");
        assert_eq!(
            Literal::List(vec![Literal::Int(1), Literal::List(vec![]), Literal::from("x")]).to_string(),
            r#"[1, [], "x"]"#
        );
    }
}
