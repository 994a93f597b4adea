//! Scoped registration handles.
//!
//! A [`Claim`] folds the construct/destroy contract into one value: it holds the
//! canonical instance and releases the slot when it goes out of scope.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use crate::{GuardApi, InstanceId};

/// Canonical instance bound to its guard for the lifetime of the handle.
///
/// Only the claim that adopted the instance releases the slot on drop. A claim
/// obtained for an instance that was already canonical is a plain borrow of the
/// role, so dropping it leaves the slot alone.
#[must_use = "dropping a Claim releases the canonical slot"]
pub struct Claim<'g, G: GuardApi> {
    guard: &'g G,
    instance: Arc<G::Target>,
    owner: bool,
}

impl<'g, G: GuardApi> Claim<'g, G> {
    pub(crate) fn new(guard: &'g G, instance: Arc<G::Target>, owner: bool) -> Self {
        Self {
            guard,
            instance,
            owner,
        }
    }

    /// Whether dropping this claim releases the slot.
    pub fn is_owner(&self) -> bool {
        self.owner
    }

    pub fn id(&self) -> InstanceId {
        InstanceId::of(&self.instance)
    }

    /// Shared handle to the canonical instance.
    pub fn instance(&self) -> &Arc<G::Target> {
        &self.instance
    }

    /// Release the slot now and hand back the instance.
    pub fn release(self) -> Arc<G::Target> {
        let instance = Arc::clone(&self.instance);
        drop(self);
        instance
    }
}

impl<G: GuardApi> Deref for Claim<'_, G> {
    type Target = G::Target;

    fn deref(&self) -> &Self::Target {
        &self.instance
    }
}

impl<G: GuardApi> Drop for Claim<'_, G> {
    fn drop(&mut self) {
        if self.owner {
            self.guard.unregister(&self.instance);
        }
    }
}

impl<G: GuardApi> fmt::Debug for Claim<'_, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Claim")
            .field("label", &self.guard.label())
            .field("id", &self.id())
            .field("owner", &self.owner)
            .finish()
    }
}

/// A candidate that lost to an existing canonical instance.
///
/// The guard does not own instances, so the candidate is handed back; dropping
/// the `Rejection` drops the caller's last handle to it.
pub struct Rejection<T> {
    candidate: Arc<T>,
    canonical: InstanceId,
}

impl<T> Rejection<T> {
    pub(crate) fn new(candidate: Arc<T>, canonical: InstanceId) -> Self {
        Self {
            candidate,
            canonical,
        }
    }

    /// Identity of the instance that keeps the slot.
    pub fn canonical(&self) -> InstanceId {
        self.canonical
    }

    pub fn candidate_id(&self) -> InstanceId {
        InstanceId::of(&self.candidate)
    }

    /// Take back the rejected candidate.
    pub fn into_inner(self) -> Arc<T> {
        self.candidate
    }
}

impl<T> fmt::Debug for Rejection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rejection")
            .field("candidate", &self.candidate_id())
            .field("canonical", &self.canonical)
            .finish()
    }
}

impl<T> fmt::Display for Rejection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "instance {} rejected, {} is already canonical",
            self.candidate_id(),
            self.canonical
        )
    }
}

impl<T> std::error::Error for Rejection<T> {}

#[cfg(test)]
mod tests {
    use crate::{GuardApi, InstanceId, SingletonGuard};
    use std::sync::Arc;

    #[derive(Debug, PartialEq)]
    struct Audio {
        volume: u8,
    }

    #[test]
    fn test_claim_releases_on_drop() {
        let guard = SingletonGuard::<Audio>::new();
        let audio = Arc::new(Audio { volume: 3 });

        {
            let claim = guard.claim(audio.clone()).unwrap();
            assert!(claim.is_owner());
            assert_eq!(claim.volume, 3);
            assert!(guard.is_canonical(&audio));
        }

        assert!(!guard.is_occupied());
    }

    #[test]
    fn test_claim_rejection_returns_candidate() {
        let guard = SingletonGuard::<Audio>::new();
        let first = Arc::new(Audio { volume: 1 });
        let second = Arc::new(Audio { volume: 2 });

        let _claim = guard.claim(first.clone()).unwrap();
        let rejection = guard.claim(second.clone()).unwrap_err();

        assert_eq!(rejection.canonical(), InstanceId::of(&first));
        assert_eq!(rejection.candidate_id(), InstanceId::of(&second));

        let returned = rejection.into_inner();
        assert!(Arc::ptr_eq(&returned, &second));
        assert!(guard.is_canonical(&first));
    }

    #[test]
    fn test_non_owner_claim_keeps_slot() {
        let guard = SingletonGuard::<Audio>::new();
        let audio = Arc::new(Audio { volume: 5 });

        let owner = guard.claim(audio.clone()).unwrap();
        let borrowed = guard.claim(audio.clone()).unwrap();
        assert!(!borrowed.is_owner());

        drop(borrowed);
        assert!(guard.is_canonical(&audio));

        drop(owner);
        assert!(!guard.is_occupied());
    }

    #[test]
    fn test_release_hands_back_instance() {
        let guard = SingletonGuard::<Audio>::new();
        let audio = Arc::new(Audio { volume: 9 });

        let claim = guard.claim(audio.clone()).unwrap();
        let released = claim.release();

        assert!(Arc::ptr_eq(&released, &audio));
        assert!(guard.current().is_none());
    }

    #[test]
    fn test_rejection_display() {
        let guard = SingletonGuard::<Audio>::new();
        let first = Arc::new(Audio { volume: 1 });
        let second = Arc::new(Audio { volume: 2 });

        let _claim = guard.claim(first.clone()).unwrap();
        let rejection = guard.claim(second.clone()).unwrap_err();

        assert_eq!(
            rejection.to_string(),
            format!(
                "instance {} rejected, {} is already canonical",
                InstanceId::of(&second),
                InstanceId::of(&first)
            )
        );
    }
}
