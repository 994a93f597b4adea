//! # Singleton Guard
//!
//! Enforces "at most one canonical instance of a designated type" at
//! construction time, with first-writer-wins resolution of duplicates.
//!
//! The host environment owns instances. It presents each new instance to a guard
//! and tears down whatever the guard rejects; the guard only records identity.
//!
//! ## Quick Start
//!
//! ```rust
//! use singleton_guard::{GuardApi, RegisterOutcome, SingletonGuard};
//! use std::sync::Arc;
//!
//! struct GameManager;
//!
//! let guard = SingletonGuard::<GameManager>::new();
//!
//! let first = Arc::new(GameManager);
//! let duplicate = Arc::new(GameManager);
//!
//! assert!(guard.register(&first).is_adopted());
//! match guard.register(&duplicate) {
//!     RegisterOutcome::Rejected { .. } => drop(duplicate),
//!     _ => unreachable!(),
//! }
//!
//! guard.unregister(&first);
//! assert!(guard.current().is_none());
//! ```
//!
//! ## Features
//!
//! - **Thread-safe**: the adopt/reject decision runs under a single lock
//! - **Non-owning**: the slot holds a `Weak`, so the guard never extends a lifetime
//! - **Scoped claims**: [`Claim`] releases the slot when it goes out of scope
//! - **Process-wide guards**: [`define_guard!`] declares a named, isolated static guard
//! - **Tracing support**: a callback receives a [`GuardEvent`] per operation, and
//!   the `log` facade records adoptions and rejections
//!
//! ## Main Operations
//!
//! All provided by [`GuardApi`]:
//!
//! - [`GuardApi::register`] - Present an instance for the canonical role
//! - [`GuardApi::register_weak`] - Same, from a non-owning reference
//! - [`GuardApi::unregister`] - Release the slot held by an instance
//! - [`GuardApi::current`] - Retrieve the canonical instance
//! - [`GuardApi::claim`] - Register and release on drop
//! - [`GuardApi::set_trace_callback`] - Set up tracing for guard operations

mod claim;
mod guard;
mod guard_api;
mod guard_error;
mod guard_event;
mod macros;
mod outcome;

pub use claim::{Claim, Rejection};
pub use guard::SingletonGuard;
pub use guard_api::{GuardApi, Slot, TraceCallback};
pub use guard_error::GuardError;
pub use guard_event::GuardEvent;
pub use outcome::{InstanceId, RegisterOutcome};
