use crate::{InstanceId, RegisterOutcome};

/// Events emitted by a guard during operations.
///
/// These events are passed to the tracing callback set via `set_trace_callback`.
/// The `Clone` derive allows callbacks to store or forward events if needed.
///
/// # Examples
///
/// ```rust
/// use singleton_guard::GuardEvent;
///
/// let event = GuardEvent::Current { label: "game_manager", found: false };
/// assert_eq!(event.to_string(), "current { label: game_manager, found: false }");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum GuardEvent {
    /// A live candidate was presented to the guard.
    Register {
        /// Label of the guard (type name unless configured otherwise)
        label: &'static str,
        /// How the guard resolved the candidate
        outcome: RegisterOutcome,
    },

    /// A dead candidate reference was refused.
    InvalidCandidate { label: &'static str },

    /// An instance asked to leave the slot.
    Unregister {
        label: &'static str,
        instance: InstanceId,
        /// Whether the instance was canonical and the slot got cleared
        cleared: bool,
    },

    /// The canonical instance was looked up.
    Current { label: &'static str, found: bool },
}

impl GuardEvent {
    pub fn label(&self) -> &'static str {
        match self {
            GuardEvent::Register { label, .. }
            | GuardEvent::InvalidCandidate { label }
            | GuardEvent::Unregister { label, .. }
            | GuardEvent::Current { label, .. } => label,
        }
    }
}

impl std::fmt::Display for GuardEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GuardEvent::Register { label, outcome } => {
                write!(f, "register {{ label: {}, outcome: {} }}", label, outcome)
            }
            GuardEvent::InvalidCandidate { label } => {
                write!(f, "invalid candidate {{ label: {} }}", label)
            }
            GuardEvent::Unregister {
                label,
                instance,
                cleared,
            } => write!(
                f,
                "unregister {{ label: {}, instance: {}, cleared: {} }}",
                label, instance, cleared
            ),
            GuardEvent::Current { label, found } => {
                write!(f, "current {{ label: {}, found: {} }}", label, found)
            }
        }
    }
}
