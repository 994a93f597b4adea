//! Scoped claim example for singleton-guard.
//!
//! Demonstrates:
//! - Holding the canonical role through a `Claim` handle
//! - Getting a rejected candidate back from a `Rejection`
//! - Handing the role over by dropping the claim
//!
//! Run with: `cargo run --example scoped_claim`

use singleton_guard::{GuardApi, SingletonGuard};
use std::sync::Arc;

#[derive(Debug)]
struct AudioDevice {
    name: String,
}

fn open(name: &str) -> Arc<AudioDevice> {
    Arc::new(AudioDevice {
        name: name.to_string(),
    })
}

fn main() {
    println!("=== singleton-guard: Scoped Claim ===\n");

    let devices = SingletonGuard::<AudioDevice>::named("audio_device");

    // -------------------------------------------------------------------------
    // 1. Claim the device
    // -------------------------------------------------------------------------
    println!("1. Claiming the speakers...");
    let speakers = match devices.claim(open("speakers")) {
        Ok(claim) => claim,
        Err(rejection) => {
            eprintln!("   Unexpected: {rejection}");
            return;
        }
    };
    println!("   Claimed {} ({})", speakers.name, speakers.id());

    // -------------------------------------------------------------------------
    // 2. A second device is turned away
    // -------------------------------------------------------------------------
    println!("\n2. Trying to claim headphones as well...");
    match devices.claim(open("headphones")) {
        Ok(_) => println!("   Unexpected: headphones claimed"),
        Err(rejection) => {
            println!("   {rejection}");
            let headphones = rejection.into_inner();
            println!("   Closing {} ourselves", headphones.name);
        }
    }

    // -------------------------------------------------------------------------
    // 3. Hand over
    // -------------------------------------------------------------------------
    println!("\n3. Releasing the speakers...");
    let released = speakers.release();
    println!("   Released {}, slot occupied: {}", released.name, devices.is_occupied());

    let headphones = devices.claim(open("headphones"));
    println!(
        "   Headphones claimed: {}",
        headphones.as_ref().map(|c| c.name.as_str()).unwrap_or("no")
    );

    println!("\n=== Example completed successfully! ===");
}
