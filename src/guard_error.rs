use std::fmt;

use crate::InstanceId;

#[derive(Debug, Clone, PartialEq)]
pub enum GuardError {
    /// The candidate reference no longer points at a live instance.
    InvalidArgument { type_name: &'static str },
    /// Produced only by [`RegisterOutcome::into_result`](crate::RegisterOutcome::into_result);
    /// registration itself reports duplicates as an outcome.
    DuplicateInstance {
        canonical: InstanceId,
        candidate: InstanceId,
    },
}

impl fmt::Display for GuardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuardError::InvalidArgument { type_name } => {
                write!(f, "invalid candidate for guard of {type_name}")
            }
            GuardError::DuplicateInstance {
                canonical,
                candidate,
            } => write!(
                f,
                "instance {candidate} rejected, {canonical} is already canonical"
            ),
        }
    }
}

impl std::error::Error for GuardError {}
