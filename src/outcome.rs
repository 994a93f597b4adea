//! Registration outcomes and instance identity.

use std::fmt;
use std::sync::{Arc, Weak};

use crate::GuardError;

/// Opaque identity of an instance, derived from its allocation address.
///
/// Two ids compare equal exactly when they name the same allocation, so every
/// clone of one `Arc<T>` (and every `Weak<T>` downgraded from it) shares an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(usize);

impl InstanceId {
    /// Identity of the value behind `instance`.
    pub fn of<T>(instance: &Arc<T>) -> Self {
        Self(Arc::as_ptr(instance) as *const () as usize)
    }

    /// Identity of the allocation `instance` points at.
    ///
    /// Only meaningful for a `Weak` that was downgraded from an `Arc`; a
    /// `Weak::new()` has no allocation and yields a sentinel address.
    pub fn of_weak<T>(instance: &Weak<T>) -> Self {
        Self(instance.as_ptr() as *const () as usize)
    }

    /// Raw address backing this id.
    pub fn as_usize(self) -> usize {
        self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Result of presenting a candidate to a guard.
///
/// `Rejected` is an expected outcome, not a failure: it tells the caller that
/// the candidate lost to an existing canonical instance and must be torn down
/// by whoever owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// The slot was empty; the candidate is now canonical.
    Adopted(InstanceId),

    /// The candidate already was the canonical instance. Nothing changed.
    AlreadyCanonical(InstanceId),

    /// A different instance is canonical. The slot is unchanged.
    Rejected {
        /// The instance that keeps the slot.
        canonical: InstanceId,
        /// The instance the caller has to dispose of.
        candidate: InstanceId,
    },
}

impl RegisterOutcome {
    /// Identity of the candidate that was presented.
    pub fn candidate(&self) -> InstanceId {
        match *self {
            RegisterOutcome::Adopted(id) | RegisterOutcome::AlreadyCanonical(id) => id,
            RegisterOutcome::Rejected { candidate, .. } => candidate,
        }
    }

    /// Identity of the canonical instance after the call.
    pub fn canonical(&self) -> InstanceId {
        match *self {
            RegisterOutcome::Adopted(id) | RegisterOutcome::AlreadyCanonical(id) => id,
            RegisterOutcome::Rejected { canonical, .. } => canonical,
        }
    }

    pub fn is_adopted(&self) -> bool {
        matches!(self, RegisterOutcome::Adopted(_))
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, RegisterOutcome::Rejected { .. })
    }

    /// `true` when the candidate is canonical after the call.
    pub fn is_canonical(&self) -> bool {
        !self.is_rejected()
    }

    /// Converts a rejection into [`GuardError::DuplicateInstance`] for callers
    /// that treat a duplicate as a hard failure.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use singleton_guard::{GuardApi, GuardError, SingletonGuard};
    /// use std::sync::Arc;
    ///
    /// let guard = SingletonGuard::<&str>::new();
    /// let first = Arc::new("first");
    /// let second = Arc::new("second");
    ///
    /// assert!(guard.register(&first).into_result().is_ok());
    /// assert!(matches!(
    ///     guard.register(&second).into_result(),
    ///     Err(GuardError::DuplicateInstance { .. })
    /// ));
    /// ```
    pub fn into_result(self) -> Result<InstanceId, GuardError> {
        match self {
            RegisterOutcome::Adopted(id) | RegisterOutcome::AlreadyCanonical(id) => Ok(id),
            RegisterOutcome::Rejected {
                canonical,
                candidate,
            } => Err(GuardError::DuplicateInstance {
                canonical,
                candidate,
            }),
        }
    }
}

impl fmt::Display for RegisterOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegisterOutcome::Adopted(id) => write!(f, "adopted {id}"),
            RegisterOutcome::AlreadyCanonical(id) => write!(f, "already canonical {id}"),
            RegisterOutcome::Rejected {
                canonical,
                candidate,
            } => write!(f, "rejected {candidate} (canonical {canonical})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_shared_by_clones_and_weak() {
        let a = Arc::new(1u8);
        let a2 = a.clone();
        let weak = Arc::downgrade(&a);

        assert_eq!(InstanceId::of(&a), InstanceId::of(&a2));
        assert_eq!(InstanceId::of(&a), InstanceId::of_weak(&weak));
    }

    #[test]
    fn test_id_differs_between_allocations() {
        let a = Arc::new(7u32);
        let b = Arc::new(7u32);
        assert_ne!(InstanceId::of(&a), InstanceId::of(&b));
    }

    #[test]
    fn test_id_display_is_hex() {
        let a = Arc::new(0u64);
        let id = InstanceId::of(&a);
        assert_eq!(id.to_string(), format!("{:#x}", id.as_usize()));
        assert!(id.to_string().starts_with("0x"));
    }

    #[test]
    fn test_outcome_predicates() {
        let a = InstanceId(0x10);
        let b = InstanceId(0x20);

        let adopted = RegisterOutcome::Adopted(a);
        assert!(adopted.is_adopted());
        assert!(adopted.is_canonical());
        assert!(!adopted.is_rejected());

        let again = RegisterOutcome::AlreadyCanonical(a);
        assert!(!again.is_adopted());
        assert!(again.is_canonical());

        let rejected = RegisterOutcome::Rejected {
            canonical: a,
            candidate: b,
        };
        assert!(rejected.is_rejected());
        assert!(!rejected.is_canonical());
        assert_eq!(rejected.candidate(), b);
        assert_eq!(rejected.canonical(), a);
    }

    #[test]
    fn test_outcome_display() {
        let a = InstanceId(0x10);
        let b = InstanceId(0x20);

        assert_eq!(RegisterOutcome::Adopted(a).to_string(), "adopted 0x10");
        assert_eq!(
            RegisterOutcome::AlreadyCanonical(a).to_string(),
            "already canonical 0x10"
        );
        assert_eq!(
            RegisterOutcome::Rejected {
                canonical: a,
                candidate: b
            }
            .to_string(),
            "rejected 0x20 (canonical 0x10)"
        );
    }

    #[test]
    fn test_into_result() {
        let a = InstanceId(0x10);
        let b = InstanceId(0x20);

        assert_eq!(RegisterOutcome::Adopted(a).into_result(), Ok(a));
        assert_eq!(RegisterOutcome::AlreadyCanonical(a).into_result(), Ok(a));
        assert_eq!(
            RegisterOutcome::Rejected {
                canonical: a,
                candidate: b
            }
            .into_result(),
            Err(GuardError::DuplicateInstance {
                canonical: a,
                candidate: b
            })
        );
    }
}
