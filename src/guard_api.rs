//! Core trait defining guard behavior.
//!
//! This module provides the `GuardApi` trait with default implementations for
//! registration, release, lookup, and tracing of the canonical instance.
//!
//! A guard owns one slot for one designated type. The first live candidate
//! presented to an empty slot becomes canonical; every other candidate is
//! rejected until the canonical instance leaves the slot again.

use std::sync::{Arc, Mutex, Weak};

use crate::{Claim, GuardError, GuardEvent, InstanceId, RegisterOutcome, Rejection};

/// Storage for the canonical instance.
///
/// `None` is the empty slot. The slot holds a `Weak`, so the guard never keeps
/// the canonical instance alive; a `Weak` whose value was dropped reads as empty.
pub type Slot<T> = Mutex<Option<Weak<T>>>;

/// Storage for the trace callback.
///
/// Note: the `define_guard!` macro declares its statics with this type.
pub type TraceCallback = Mutex<Option<Arc<dyn Fn(&GuardEvent) + Send + Sync>>>;

/// Core trait defining guard behavior.
///
/// Provides default implementations for all guard operations, requiring only
/// two accessor methods (`slot` and `trace`) to be implemented by the implementor.
pub trait GuardApi {
    /// The designated owner type.
    type Target: Send + Sync + 'static;

    // -------------------------------------------------------------------------------------------------
    // Tracing
    // -------------------------------------------------------------------------------------------------

    /// Access the trace callback storage.
    fn trace(&self) -> &TraceCallback;

    /// Name used in log records and trace events.
    fn label(&self) -> &'static str {
        std::any::type_name::<Self::Target>()
    }

    /// Set a tracing callback for guard operations.
    ///
    /// The callback is invoked once for every register, unregister, and current call.
    ///
    /// # Lock Poisoning Recovery
    ///
    /// If the trace lock is poisoned, this method recovers by extracting the inner value.
    ///
    /// # Reentrancy
    ///
    /// Neither the slot lock nor the trace lock is held while the callback runs,
    /// so the callback may call back into the same guard. Events it triggers are
    /// delivered recursively.
    fn set_trace_callback(&self, callback: impl Fn(&GuardEvent) + Send + Sync + 'static) {
        let mut guard = self.trace().lock().unwrap_or_else(|p| p.into_inner());
        *guard = Some(Arc::new(callback));
    }

    /// Clear the tracing callback.
    ///
    /// Does not touch the slot.
    fn clear_trace_callback(&self) {
        let mut guard = self.trace().lock().unwrap_or_else(|p| p.into_inner());
        *guard = None;
    }

    /// Emit `event` through the current callback, if any.
    ///
    /// # Panics
    ///
    /// If the callback itself panics, the panic propagates to the caller. The
    /// callback is cloned out of the trace lock before it runs, so a panic poisons
    /// neither lock.
    fn emit_event(&self, event: &GuardEvent) {
        let callback = self
            .trace()
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clone();
        if let Some(callback) = callback {
            callback(event);
        }
    }

    // -------------------------------------------------------------------------------------------------
    // Slot
    // -------------------------------------------------------------------------------------------------

    /// Access the slot storage.
    fn slot(&self) -> &Slot<Self::Target>;

    /// Present `candidate` for the canonical role.
    ///
    /// Returns [`RegisterOutcome::Adopted`] when the slot was empty,
    /// [`RegisterOutcome::AlreadyCanonical`] when `candidate` already holds it, and
    /// [`RegisterOutcome::Rejected`] when another live instance does. A rejected
    /// candidate must be torn down by the caller; the guard never drops it.
    ///
    /// An `Arc` is always a live reference, so this cannot fail.
    ///
    /// # Lock Poisoning Recovery
    ///
    /// If the slot lock is poisoned, this method recovers. The slot is written in
    /// a single assignment, so it is never observed half-updated.
    fn register(&self, candidate: &Arc<Self::Target>) -> RegisterOutcome {
        let outcome = resolve(self.slot(), InstanceId::of(candidate), || {
            Arc::downgrade(candidate)
        });
        announce(self, outcome);
        outcome
    }

    /// Present a non-owning `candidate` for the canonical role.
    ///
    /// Same resolution as [`register`](GuardApi::register).
    ///
    /// # Errors
    ///
    /// - [`GuardError::InvalidArgument`] when `candidate` no longer points at a live
    ///   instance (including `Weak::new()`). The slot is left untouched.
    fn register_weak(&self, candidate: &Weak<Self::Target>) -> Result<RegisterOutcome, GuardError> {
        if candidate.strong_count() == 0 {
            log::warn!("{}: refusing dead candidate reference", self.label());
            self.emit_event(&GuardEvent::InvalidCandidate {
                label: self.label(),
            });
            return Err(GuardError::InvalidArgument {
                type_name: std::any::type_name::<Self::Target>(),
            });
        }

        let outcome = resolve(self.slot(), InstanceId::of_weak(candidate), || {
            candidate.clone()
        });
        announce(self, outcome);
        Ok(outcome)
    }

    /// Release the slot if `instance` is canonical.
    ///
    /// Returns `true` when the slot was cleared. Releasing an instance that is not
    /// canonical (for example a rejected duplicate) is a no-op returning `false`.
    fn unregister(&self, instance: &Arc<Self::Target>) -> bool {
        release(self, InstanceId::of(instance))
    }

    /// Release the slot if `instance` points at the canonical allocation.
    ///
    /// Works after the instance has already been dropped, which lets a value
    /// holding a `Weak` to itself release the slot from its own `Drop`.
    fn unregister_weak(&self, instance: &Weak<Self::Target>) -> bool {
        if instance.ptr_eq(&Weak::new()) {
            return false;
        }
        release(self, InstanceId::of_weak(instance))
    }

    /// Retrieve the canonical instance.
    ///
    /// Returns `None` when the slot is empty or the canonical instance has been
    /// dropped. Never changes the slot.
    fn current(&self) -> Option<Arc<Self::Target>> {
        let current = self
            .slot()
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .as_ref()
            .and_then(Weak::upgrade);

        self.emit_event(&GuardEvent::Current {
            label: self.label(),
            found: current.is_some(),
        });

        current
    }

    /// Identity of the canonical instance, if a live one exists.
    fn current_id(&self) -> Option<InstanceId> {
        live_id(self.slot())
    }

    /// Check whether `instance` is the canonical instance.
    fn is_canonical(&self, instance: &Arc<Self::Target>) -> bool {
        live_id(self.slot()) == Some(InstanceId::of(instance))
    }

    /// Check whether a live canonical instance exists.
    fn is_occupied(&self) -> bool {
        live_id(self.slot()).is_some()
    }

    /// Register `candidate` and tie its canonical role to the returned handle.
    ///
    /// On success the [`Claim`] releases the slot when dropped. On rejection the
    /// candidate comes back inside the [`Rejection`] so the caller can dispose of it.
    fn claim(&self, candidate: Arc<Self::Target>) -> Result<Claim<'_, Self>, Rejection<Self::Target>>
    where
        Self: Sized,
    {
        match self.register(&candidate) {
            RegisterOutcome::Adopted(_) => Ok(Claim::new(self, candidate, true)),
            RegisterOutcome::AlreadyCanonical(_) => Ok(Claim::new(self, candidate, false)),
            RegisterOutcome::Rejected { canonical, .. } => Err(Rejection::new(candidate, canonical)),
        }
    }
}

/// Run the three-way decision under the slot lock.
///
/// `downgrade` is only called when the candidate is adopted.
fn resolve<T>(
    slot: &Slot<T>,
    candidate: InstanceId,
    downgrade: impl FnOnce() -> Weak<T>,
) -> RegisterOutcome {
    let mut slot = slot.lock().unwrap_or_else(|p| p.into_inner());

    let canonical = slot
        .as_ref()
        .filter(|w| w.strong_count() > 0)
        .map(InstanceId::of_weak);

    match canonical {
        None => {
            if slot.is_some() {
                log::debug!("canonical instance was dropped without unregistering; slot reused");
            }
            *slot = Some(downgrade());
            RegisterOutcome::Adopted(candidate)
        }
        Some(canonical) if canonical == candidate => RegisterOutcome::AlreadyCanonical(candidate),
        Some(canonical) => RegisterOutcome::Rejected {
            canonical,
            candidate,
        },
    }
}

fn announce<G: GuardApi + ?Sized>(guard: &G, outcome: RegisterOutcome) {
    let label = guard.label();
    match outcome {
        RegisterOutcome::Adopted(id) => log::debug!("{label}: adopted canonical instance {id}"),
        RegisterOutcome::AlreadyCanonical(id) => {
            log::debug!("{label}: instance {id} is already canonical")
        }
        RegisterOutcome::Rejected {
            canonical,
            candidate,
        } => log::warn!(
            "{label}: instance already exists ({canonical}), rejecting candidate {candidate}"
        ),
    }
    guard.emit_event(&GuardEvent::Register { label, outcome });
}

fn release<G: GuardApi + ?Sized>(guard: &G, instance: InstanceId) -> bool {
    let cleared = {
        let mut slot = guard.slot().lock().unwrap_or_else(|p| p.into_inner());
        let is_canonical = slot
            .as_ref()
            .is_some_and(|w| InstanceId::of_weak(w) == instance);
        if is_canonical {
            *slot = None;
        }
        is_canonical
    };

    if cleared {
        log::debug!("{}: released canonical instance {instance}", guard.label());
    }
    guard.emit_event(&GuardEvent::Unregister {
        label: guard.label(),
        instance,
        cleared,
    });

    cleared
}

fn live_id<T>(slot: &Slot<T>) -> Option<InstanceId> {
    slot.lock()
        .unwrap_or_else(|p| p.into_inner())
        .as_ref()
        .filter(|w| w.strong_count() > 0)
        .map(InstanceId::of_weak)
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
