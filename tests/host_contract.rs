//! Integration tests for the host lifecycle contract.
//!
//! A tiny stand-in for an engine scene: objects are spawned, announce themselves
//! on creation, and are despawned by the scene when the guard rejects them.

use singleton_guard::{define_guard, GuardApi, RegisterOutcome, SingletonGuard};
use std::sync::{Arc, Weak};

pub struct GameManager {
    pub score: u32,
    this: Weak<GameManager>,
}

define_guard!(managers, GameManager);

impl GameManager {
    fn spawn(score: u32) -> Arc<Self> {
        Arc::new_cyclic(|this| GameManager {
            score,
            this: this.clone(),
        })
    }
}

impl Drop for GameManager {
    fn drop(&mut self) {
        // Strong count is already zero here; the allocation is still identifiable.
        managers::unregister_weak(&self.this);
    }
}

/// Minimal scene that owns its objects and destroys rejected ones.
#[derive(Default)]
struct Scene {
    objects: Vec<Arc<GameManager>>,
    destroyed: usize,
}

impl Scene {
    fn instantiate(&mut self, score: u32) -> RegisterOutcome {
        let object = GameManager::spawn(score);
        let outcome = managers::register(&object);
        if outcome.is_rejected() {
            drop(object);
            self.destroyed += 1;
        } else {
            self.objects.push(object);
        }
        outcome
    }

    fn unload(&mut self) {
        self.objects.clear();
    }
}

#[test]
fn test_scene_lifecycle() {
    let mut scene = Scene::default();

    assert!(scene.instantiate(10).is_adopted());
    assert!(scene.instantiate(20).is_rejected());
    assert!(scene.instantiate(30).is_rejected());

    assert_eq!(scene.objects.len(), 1);
    assert_eq!(scene.destroyed, 2);
    assert_eq!(managers::current().map(|m| m.score), Some(10));

    // Destroying rejected duplicates must not have released the slot.
    assert!(managers::is_canonical(&scene.objects[0]));

    scene.unload();
    assert!(managers::current_id().is_none());

    // The next scene gets a fresh canonical manager.
    let mut next = Scene::default();
    assert!(next.instantiate(40).is_adopted());
    assert_eq!(managers::current().map(|m| m.score), Some(40));
    next.unload();
}

#[test]
fn test_scoped_guard_per_scene() {
    struct Level {
        guard: SingletonGuard<u32>,
    }

    let level = Level {
        guard: SingletonGuard::named("level_spawner"),
    };

    let spawner = Arc::new(1u32);
    let claim = level.guard.claim(spawner.clone()).unwrap();

    let rejection = level.guard.claim(Arc::new(2u32)).unwrap_err();
    assert_eq!(*rejection.into_inner(), 2);

    assert_eq!(*claim, 1);
    drop(claim);
    assert!(level.guard.current().is_none());
}
