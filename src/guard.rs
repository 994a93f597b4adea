//! An owned, explicitly passed guard.
//!
//! [`SingletonGuard`] keeps its slot and trace callback inline, so a guard can be
//! created per scene, per test, or as a plain `static`:
//!
//! ```rust
//! use singleton_guard::{GuardApi, SingletonGuard};
//! use std::sync::Arc;
//!
//! struct GameManager;
//!
//! static MANAGERS: SingletonGuard<GameManager> = SingletonGuard::named("game_manager");
//!
//! let manager = Arc::new(GameManager);
//! assert!(MANAGERS.register(&manager).is_adopted());
//! assert!(MANAGERS.is_canonical(&manager));
//! ```

use std::fmt;
use std::sync::Mutex;

use crate::{GuardApi, Slot, TraceCallback};

/// At most one canonical instance of `T`, first writer wins.
///
/// All operations come from [`GuardApi`].
pub struct SingletonGuard<T> {
    label: Option<&'static str>,
    slot: Slot<T>,
    trace: TraceCallback,
}

impl<T> SingletonGuard<T> {
    /// Empty guard labelled with the type name of `T`.
    pub const fn new() -> Self {
        Self {
            label: None,
            slot: Mutex::new(None),
            trace: Mutex::new(None),
        }
    }

    /// Empty guard with a custom label for log records and trace events.
    pub const fn named(label: &'static str) -> Self {
        Self {
            label: Some(label),
            slot: Mutex::new(None),
            trace: Mutex::new(None),
        }
    }
}

impl<T> Default for SingletonGuard<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send + Sync + 'static> GuardApi for SingletonGuard<T> {
    type Target = T;

    fn slot(&self) -> &Slot<T> {
        &self.slot
    }

    fn trace(&self) -> &TraceCallback {
        &self.trace
    }

    fn label(&self) -> &'static str {
        self.label.unwrap_or_else(std::any::type_name::<T>)
    }
}

impl<T: Send + Sync + 'static> fmt::Debug for SingletonGuard<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SingletonGuard")
            .field("label", &self.label())
            .field("canonical", &self.current_id())
            .finish()
    }
}
