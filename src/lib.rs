/*!
Typed capture of positional route arguments.

A route definition hands each of its filters and predicates an untyped list
of arguments: `localRatelimit(20, "1m", "auth")` is just an int and two
strings. `routeargs` matches a list like that against an ordered list of
typed destinations, converting every argument along the way, and reports a
single class of error when the two don't line up.

```
use chrono::TimeDelta;
use routeargs::{Choice, choice, duration, literals, optional};

#[derive(Debug, PartialEq, Choice)]
enum Lookup {
    Auth,
    Ip,
}

let mut max_hits = 0i64;
let mut window = TimeDelta::zero();
let mut lookup = String::from("ip");

routeargs::capture!(
    &mut max_hits,
    duration(&mut window, TimeDelta::seconds(1)),
    choice::<Lookup>(optional(&mut lookup)),
    &literals![20, "1m"],
)
.unwrap();

assert_eq!(max_hits, 20);
assert_eq!(window, TimeDelta::minutes(1));
assert_eq!(lookup, "ip");
```

# Definitions

Each [`Definition`] exclusively borrows its destination for the duration of
the capture. Plain destinations (`&mut i64`, `&mut String`, `&mut Vec<f64>`,
and so on) convert directly with [`From`]; the [`enumeration`], [`duration`]
and [`optional`] builders decorate them. Sequence destinations, like
`Vec<String>`, collect every remaining argument, and must come last.

Arguments are converted according to the destination type:

- `i64` accepts ints, and floats (truncated toward zero)
- `f64` accepts floats and ints
- `String` accepts strings
- [`TimeDelta`][chrono::TimeDelta] accepts duration strings like `"1h30m"`,
  or numbers, which are multiplied by the unit (one millisecond by default)
- [`Timestamp`] accepts RFC 3339 strings, or numbers of seconds since the
  Unix epoch
- [`Literal`] accepts any int, float or string as it is
*/

// Lets `#[derive(Choice)]` refer to `::routeargs` from inside this crate
extern crate self as routeargs;

mod arguments;
mod choice;
pub mod convert;
pub mod definition;
mod driver;
mod error;
mod usage;
pub mod validate;

pub use arguments::Arguments;
pub use choice::{Choice, choice};
pub use definition::{Definition, Timestamp, duration, enumeration, optional};
pub use driver::capture;
pub use error::{CaptureError, ErrorKind, Mismatch, Reason};
pub use routeargs_literal::{Literal, literals};
pub use usage::signature;

/**
Capture arguments into a list of definitions. The last argument to the macro
is always the raw [`Arguments`]; every argument before it is converted into
a [`Definition`] with [`Definition::from`], so plain `&mut` destinations can
be passed directly.

```
use routeargs::{Literal, capture, literals, optional};

let mut status = 0i64;
let mut reason = String::from("default");

capture!(&mut status, optional(&mut reason), &literals![404]).unwrap();

assert_eq!(status, 404);
assert_eq!(reason, "default");

// Non-list arguments are always an error
let error = capture!(&mut status, &Literal::Int(1)).unwrap_err();
assert!(error.is_invalid_arguments());
```
*/
#[macro_export]
macro_rules! capture {
    (@collect [$($definitions:expr,)*] $arguments:expr $(,)?) => {
        $crate::capture(
            {
                let definitions: ::std::vec::Vec<$crate::Definition<'_>> =
                    ::std::vec![$($crate::Definition::from($definitions)),*];
                definitions
            },
            $arguments,
        )
    };

    (@collect [$($definitions:expr,)*] $definition:expr, $($rest:tt)+) => {
        $crate::capture!(@collect [$($definitions,)* $definition,] $($rest)+)
    };

    ($($input:tt)+) => {
        $crate::capture!(@collect [] $($input)+)
    };
}
