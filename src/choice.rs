/*!
Enums whose variants name the options of an enumerated argument.

Rather than spelling out the options of an [`enumeration`] by hand and then
matching on the captured string, a fieldless enum can
[`#[derive(Choice)]`][derive@Choice], and [`choice`] builds the definition
from its options:

```
use routeargs::{Choice, capture, choice, literals};

#[derive(Debug, PartialEq, Choice)]
enum Lookup {
    Auth,
    #[choice(rename = "ip")]
    RemoteAddress,
}

let mut lookup = String::new();
capture([choice::<Lookup>(&mut lookup)], &literals!["ip"]).unwrap();

assert_eq!(Lookup::from_option(&lookup), Some(Lookup::RemoteAddress));
```
*/

use crate::definition::{Definition, enumeration};

pub use routeargs_derive::Choice;

pub trait Choice: Sized {
    /// The accepted spelling of every variant, in declaration order
    const OPTIONS: &'static [&'static str];

    fn from_option(option: &str) -> Option<Self>;

    fn option(&self) -> &'static str;
}

/// Create an [`enumeration`] over the options of `T`. Applying this to an
/// [`optional`][crate::optional] definition works the same way as it does
/// for [`enumeration`].
#[inline]
pub fn choice<'a, T: Choice>(definition: impl Into<Definition<'a>>) -> Definition<'a> {
    enumeration(definition, T::OPTIONS)
}
