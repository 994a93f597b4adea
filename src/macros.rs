//! Macros for creating process-wide guards.
//!
//! This module provides a macro-based approach to declare a named, isolated,
//! thread-safe guard backed by module-private statics.

/// Creates a complete process-wide guard with a single macro invocation.
///
/// The macro generates a module containing:
/// - Slot static (hidden)
/// - Trace callback static (hidden)
/// - An `Api` struct that implements `GuardApi`, labelled with the module name
/// - Free functions delegating to it
///
/// Types named in the invocation are resolved from the enclosing module.
///
/// # Examples
///
/// ```rust
/// use singleton_guard::define_guard;
/// use std::sync::Arc;
///
/// pub struct GameManager {
///     pub level: u32,
/// }
///
/// define_guard!(game_manager, GameManager);
///
/// fn main() {
///     let first = Arc::new(GameManager { level: 1 });
///     let second = Arc::new(GameManager { level: 2 });
///
///     assert!(game_manager::register(&first).is_adopted());
///     assert!(game_manager::register(&second).is_rejected());
///     assert_eq!(game_manager::current().map(|m| m.level), Some(1));
/// }
/// ```
///
/// # Multiple Guards
///
/// Each invocation owns its own slot, even for the same type:
///
/// ```rust
/// use singleton_guard::define_guard;
/// use std::sync::Arc;
///
/// pub struct Window;
///
/// define_guard!(main_window, Window);
/// define_guard!(debug_window, Window);
///
/// fn main() {
///     let main = Arc::new(Window);
///     let debug = Arc::new(Window);
///
///     assert!(main_window::register(&main).is_adopted());
///     assert!(debug_window::register(&debug).is_adopted());
/// }
/// ```
///
/// # Trait-Based Usage
///
/// The `API` static is available when a `&impl GuardApi` is needed:
///
/// ```rust
/// use singleton_guard::{define_guard, GuardApi};
/// use std::sync::Arc;
///
/// pub struct Audio;
///
/// define_guard!(audio, Audio);
///
/// fn main() {
///     let mixer = Arc::new(Audio);
///     let claim = audio::API.claim(mixer).unwrap();
///     assert_eq!(audio::API.label(), "audio");
///     drop(claim);
///     assert!(audio::current().is_none());
/// }
/// ```
#[macro_export]
macro_rules! define_guard {
    ($name:ident, $target:ty) => {
        pub mod $name {
            #[allow(unused_imports)]
            use super::*;
            use std::sync::{Arc, Mutex, Weak};

            // Slot for the canonical instance (module-private)
            static SLOT: $crate::Slot<$target> = Mutex::new(None);

            // Trace callback storage (module-private)
            static TRACE: $crate::TraceCallback = Mutex::new(None);

            /// Zero-sized type that implements the guard API.
            ///
            /// All guard operations are provided by the `GuardApi` trait's
            /// default implementations. This struct only provides access to the statics.
            pub struct Api;

            impl $crate::GuardApi for Api {
                type Target = $target;

                fn slot(&self) -> &$crate::Slot<$target> {
                    &SLOT
                }

                fn trace(&self) -> &$crate::TraceCallback {
                    &TRACE
                }

                fn label(&self) -> &'static str {
                    stringify!($name)
                }
            }

            /// The guard itself; borrows of it live for `'static`.
            pub static API: Api = Api;

            // Free functions for ergonomic usage - they delegate to API

            /// Present a candidate for the canonical role.
            pub fn register(candidate: &Arc<$target>) -> $crate::RegisterOutcome {
                use $crate::GuardApi;
                API.register(candidate)
            }

            /// Present a non-owning candidate for the canonical role.
            pub fn register_weak(
                candidate: &Weak<$target>,
            ) -> Result<$crate::RegisterOutcome, $crate::GuardError> {
                use $crate::GuardApi;
                API.register_weak(candidate)
            }

            /// Release the slot if `instance` is canonical.
            pub fn unregister(instance: &Arc<$target>) -> bool {
                use $crate::GuardApi;
                API.unregister(instance)
            }

            /// Release the slot if `instance` points at the canonical allocation.
            pub fn unregister_weak(instance: &Weak<$target>) -> bool {
                use $crate::GuardApi;
                API.unregister_weak(instance)
            }

            /// Retrieve the canonical instance.
            pub fn current() -> Option<Arc<$target>> {
                use $crate::GuardApi;
                API.current()
            }

            /// Identity of the canonical instance.
            pub fn current_id() -> Option<$crate::InstanceId> {
                use $crate::GuardApi;
                API.current_id()
            }

            /// Check whether `instance` is canonical.
            pub fn is_canonical(instance: &Arc<$target>) -> bool {
                use $crate::GuardApi;
                API.is_canonical(instance)
            }

            /// Register `candidate` and release it when the claim is dropped.
            pub fn claim(
                candidate: Arc<$target>,
            ) -> Result<$crate::Claim<'static, Api>, $crate::Rejection<$target>> {
                use $crate::GuardApi;
                API.claim(candidate)
            }

            /// Set a tracing callback for guard operations.
            pub fn set_trace_callback(
                callback: impl Fn(&$crate::GuardEvent) + Send + Sync + 'static,
            ) {
                use $crate::GuardApi;
                API.set_trace_callback(callback)
            }

            /// Clear the tracing callback.
            pub fn clear_trace_callback() {
                use $crate::GuardApi;
                API.clear_trace_callback()
            }
        }
    };
}
