/*!
Errors reported by [`capture`][crate::capture].

Every failure to match arguments against definitions is an
[`InvalidArguments`][CaptureError::InvalidArguments] error, regardless of
whether the definitions were shaped wrong or the arguments were. The attached
[`Reason`] exists for diagnostics; callers deciding what to do with an error
should only look at [`CaptureError::kind`].
 */

/// The two classes of capture failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The arguments couldn't be captured with the given definitions. This
    /// is a route configuration error.
    InvalidArguments,

    /// A definition isn't one of the known destination or decorator shapes.
    /// This is a programming error in the filter or predicate.
    UnsupportedDefinitionType,
}

/// What, specifically, went wrong in an
/// [`InvalidArguments`][CaptureError::InvalidArguments] error. Indexes are
/// positions in the list of definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Reason {
    #[error("last argument must be a list of arguments or absent")]
    ArgumentsShape,

    #[error("argument {index} has the wrong type or value")]
    Mismatch { index: usize },

    #[error("missing required argument {index}")]
    MissingArgument { index: usize },

    #[error("expected at most {expected} arguments, got {got}")]
    TooManyArguments { expected: usize, got: usize },

    #[error("variadic must be the last arg (definition {index})")]
    VariadicNotLast { index: usize },

    #[error("variadic can't be optional (definition {index})")]
    OptionalSequence { index: usize },

    #[error("expecting optional or vararg after an optional (definition {index})")]
    RequiredAfterOptional { index: usize },

    #[error("invalid enum definition {index}")]
    InvalidEnum { index: usize },

    #[error("invalid duration definition {index}")]
    InvalidDuration { index: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CaptureError {
    #[error("invalid args: {0}")]
    InvalidArguments(#[from] Reason),

    #[error("not supported capture type: {type_name}")]
    UnsupportedDefinition { type_name: &'static str },
}

impl CaptureError {
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            CaptureError::InvalidArguments(_) => ErrorKind::InvalidArguments,
            CaptureError::UnsupportedDefinition { .. } => ErrorKind::UnsupportedDefinitionType,
        }
    }

    #[inline]
    #[must_use]
    pub const fn reason(&self) -> Option<Reason> {
        match *self {
            CaptureError::InvalidArguments(reason) => Some(reason),
            CaptureError::UnsupportedDefinition { .. } => None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_invalid_arguments(&self) -> bool {
        matches!(self.kind(), ErrorKind::InvalidArguments)
    }
}

/// A single value failed to convert. Converters don't distinguish why; the
/// driver turns this into [`Reason::Mismatch`] with the position attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, thiserror::Error)]
#[error("argument has the wrong type or value")]
pub struct Mismatch;
