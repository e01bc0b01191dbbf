//! # Assertion / Trust-on-First-Verify Demo
//!
//! Demonstrates how a principal asserts its identity and how a receiver
//! bootstraps trust in that identity on first successful verification.
//!
//! ## Run
//!
//! ```bash
//! cargo run --example assertion_demo
//! ```

use oracle_core::Principal;
use rand::rngs::OsRng;

fn main() {
    println!("=== oracle-core: Assertion Demo ===\n");

    let alice = Principal::new(&mut OsRng).expect("failed to generate Alice");
    let bob = Principal::new(&mut OsRng).expect("failed to generate Bob");
    println!("Alice: {}", alice.nickname());
    println!("Bob:   {}", bob.nickname());
    println!();

    println!("Step 1: Alice produces a signed assertion of her identity...");
    let assertion = alice.assert(&mut OsRng).expect("failed to build assertion");
    println!("  {}", assertion.body_string());
    println!();

    println!("Step 2: Before verifying, Bob does not know Alice...");
    match bob.peer(&alice.nickname()) {
        Ok(_) => println!("  [FAILED] Bob already had Alice as a peer!"),
        Err(_) => println!("  [OK] Bob has no record of Alice yet"),
    }
    println!();

    println!("Step 3: Bob verifies the assertion...");
    let trusted = bob.verify_assertion(&assertion).expect("verification errored");
    println!("  Verified: {trusted}");
    let learned = bob.peer(&alice.nickname()).expect("Alice should now be a known peer");
    println!("  Bob now trusts: {}", learned.nickname());
    println!();

    println!("Step 4: Re-verifying the same assertion is idempotent...");
    bob.verify_assertion(&assertion).expect("re-verification errored");
    println!("  Bob still knows exactly {} peer(s)", bob.peer_nicknames().len());
    println!();

    println!("=== Example Complete ===");
}
