//! Process-wide guard example for singleton-guard.
//!
//! Demonstrates:
//! - Declaring a static guard with `SingletonGuard::named`
//! - Racing threads where exactly one candidate wins
//! - Observing guard activity through the trace callback
//!
//! Run with: `cargo run --example process_wide_guard`

use singleton_guard::{GuardApi, GuardEvent, SingletonGuard};
use std::sync::{Arc, Barrier};
use std::thread;

struct Telemetry {
    worker: usize,
}

static TELEMETRY: SingletonGuard<Telemetry> = SingletonGuard::named("telemetry");

fn main() {
    println!("=== singleton-guard: Process-Wide Guard ===\n");

    TELEMETRY.set_trace_callback(|event: &GuardEvent| {
        println!("   [trace] {event}");
    });

    // -------------------------------------------------------------------------
    // 1. Several workers race to become the telemetry sink
    // -------------------------------------------------------------------------
    println!("1. Spawning workers...");
    let workers = 4;
    let barrier = Arc::new(Barrier::new(workers));

    let handles: Vec<_> = (0..workers)
        .map(|worker| {
            let barrier = barrier.clone();
            thread::spawn(move || {
                let sink = Arc::new(Telemetry { worker });
                barrier.wait();
                let outcome = TELEMETRY.register(&sink);
                (worker, outcome.is_adopted(), sink)
            })
        })
        .collect();

    let results: Vec<_> = handles
        .into_iter()
        .filter_map(|handle| handle.join().ok())
        .collect();

    // -------------------------------------------------------------------------
    // 2. Report the winner
    // -------------------------------------------------------------------------
    println!("\n2. Results...");
    for (worker, adopted, _) in &results {
        println!("   worker {worker}: {}", if *adopted { "adopted" } else { "rejected" });
    }
    if let Some(sink) = TELEMETRY.current() {
        println!("   Telemetry sink belongs to worker {}", sink.worker);
    }

    TELEMETRY.clear_trace_callback();
    println!("\n=== Example completed successfully! ===");
}
