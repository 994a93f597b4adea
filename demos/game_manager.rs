//! Game manager example for singleton-guard.
//!
//! Demonstrates:
//! - A host that presents every new object to a guard on creation
//! - Tearing down rejected duplicates on the host side
//! - Releasing the slot from the object's own teardown
//!
//! Run with: `cargo run --example game_manager`

use singleton_guard::{define_guard, RegisterOutcome};
use std::sync::{Arc, Weak};

/// Scene object that must exist at most once.
pub struct GameManager {
    spawn_order: u32,
    this: Weak<GameManager>,
}

define_guard!(game_manager, GameManager);

impl GameManager {
    fn new(spawn_order: u32) -> Arc<Self> {
        Arc::new_cyclic(|this| GameManager {
            spawn_order,
            this: this.clone(),
        })
    }
}

impl Drop for GameManager {
    fn drop(&mut self) {
        let released = game_manager::unregister_weak(&self.this);
        println!(
            "   [destroy] manager #{} (released slot: {})",
            self.spawn_order, released
        );
    }
}

/// Stand-in for the engine's object list.
struct World {
    live: Vec<Arc<GameManager>>,
}

impl World {
    /// Creation hook: register, and destroy the object again if it lost.
    fn spawn_manager(&mut self, spawn_order: u32) {
        let manager = GameManager::new(spawn_order);
        match game_manager::register(&manager) {
            RegisterOutcome::Adopted(id) => {
                println!("   [awake] manager #{spawn_order} is canonical ({id})");
                self.live.push(manager);
            }
            RegisterOutcome::AlreadyCanonical(id) => {
                println!("   [awake] manager #{spawn_order} was already canonical ({id})");
                self.live.push(manager);
            }
            RegisterOutcome::Rejected {
                canonical,
                candidate,
            } => {
                println!(
                    "   [awake] instance already exists ({canonical}), destroying {candidate}"
                );
                drop(manager);
            }
        }
    }
}

fn main() {
    println!("=== singleton-guard: Game Manager ===\n");

    let mut world = World { live: Vec::new() };

    // -------------------------------------------------------------------------
    // 1. First scene load spawns a manager
    // -------------------------------------------------------------------------
    println!("1. Loading first scene...");
    world.spawn_manager(1);

    // -------------------------------------------------------------------------
    // 2. Additive scene loads bring their own managers
    // -------------------------------------------------------------------------
    println!("\n2. Loading additive scenes...");
    world.spawn_manager(2);
    world.spawn_manager(3);

    let current = game_manager::current().map(|m| m.spawn_order);
    println!("   Canonical manager: {:?}", current);
    println!("   Live managers: {}", world.live.len());

    // -------------------------------------------------------------------------
    // 3. Unloading everything frees the slot
    // -------------------------------------------------------------------------
    println!("\n3. Unloading all scenes...");
    world.live.clear();
    println!("   Canonical manager: {:?}", game_manager::current_id());

    // -------------------------------------------------------------------------
    // 4. A new session gets a new manager
    // -------------------------------------------------------------------------
    println!("\n4. Starting a new session...");
    world.spawn_manager(4);
    println!(
        "   Canonical manager: {:?}",
        game_manager::current().map(|m| m.spawn_order)
    );

    println!("\n=== Example completed successfully! ===");
}
