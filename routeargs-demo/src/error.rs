use routeargs::{CaptureError, Timestamp};

/// Failure to create a filter or predicate from its route arguments
#[derive(Debug, thiserror::Error)]
pub enum CreateError {
    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error("invalid regular expression")]
    Regex(#[from] regex::Error),

    #[error("empty time interval: {from} is not before {to}")]
    EmptyInterval { from: Timestamp, to: Timestamp },

    #[error("time window is too large")]
    WindowTooLarge,
}

impl CreateError {
    /// True if the route itself is at fault, rather than the code that
    /// built the definitions
    pub fn is_route_error(&self) -> bool {
        match self {
            CreateError::Capture(error) => error.is_invalid_arguments(),
            CreateError::Regex(_) | CreateError::EmptyInterval { .. } | CreateError::WindowTooLarge => {
                true
            }
        }
    }
}
