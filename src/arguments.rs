use routeargs_literal::Literal;

use crate::{CaptureError, Reason};

/**
The raw arguments passed to [`capture`][crate::capture]. These are always
the trailing position of a capture call, and can be:

- absent, which is the same as an empty list,
- a list of literals, either as a slice or a [`Literal::List`], or
- any other literal, which is always rejected.
*/
#[derive(Debug, Clone, Copy)]
pub enum Arguments<'a> {
    Absent,
    List(&'a [Literal]),
    Other(&'a Literal),
}

impl<'a> Arguments<'a> {
    /// Get the list of raw arguments, or fail if the arguments aren't a list.
    pub fn resolve(self) -> Result<&'a [Literal], CaptureError> {
        match self {
            Arguments::Absent => Ok(&[]),
            Arguments::List(list) => Ok(list),
            Arguments::Other(_) => Err(Reason::ArgumentsShape.into()),
        }
    }
}

impl<'a> From<&'a [Literal]> for Arguments<'a> {
    #[inline]
    fn from(list: &'a [Literal]) -> Self {
        Arguments::List(list)
    }
}

impl<'a, const N: usize> From<&'a [Literal; N]> for Arguments<'a> {
    #[inline]
    fn from(list: &'a [Literal; N]) -> Self {
        Arguments::List(list)
    }
}

impl<'a> From<&'a Vec<Literal>> for Arguments<'a> {
    #[inline]
    fn from(list: &'a Vec<Literal>) -> Self {
        Arguments::List(list)
    }
}

impl<'a> From<&'a Literal> for Arguments<'a> {
    #[inline]
    fn from(literal: &'a Literal) -> Self {
        match literal {
            Literal::List(list) => Arguments::List(list),
            other => Arguments::Other(other),
        }
    }
}

impl<'a, T> From<Option<T>> for Arguments<'a>
where
    T: Into<Arguments<'a>>,
{
    #[inline]
    fn from(arguments: Option<T>) -> Self {
        arguments.map_or(Arguments::Absent, Into::into)
    }
}

impl From<()> for Arguments<'_> {
    #[inline]
    fn from((): ()) -> Self {
        Arguments::Absent
    }
}
