//! # Peer Management Demo
//!
//! Demonstrates adding peers, looking them up by nickname, and the
//! idempotent behavior of repeated adds.
//!
//! ## Run
//!
//! ```bash
//! cargo run --example peer_demo
//! ```

use oracle_core::Principal;
use rand::rngs::OsRng;

fn main() {
    println!("=== oracle-core: Peer Management Demo ===\n");

    let alice = Principal::new(&mut OsRng).expect("failed to generate Alice");
    let bob = Principal::new(&mut OsRng).expect("failed to generate Bob");
    let carol = Principal::new(&mut OsRng).expect("failed to generate Carol");

    println!("Step 1: Alice adds Bob and Carol as peers...");
    alice.add_peer(bob.as_peer().unwrap()).expect("failed to add Bob");
    alice.add_peer(carol.as_peer().unwrap()).expect("failed to add Carol");
    println!("  Known peers: {:?}", alice.peer_nicknames());
    println!();

    println!("Step 2: Adding Bob again is a no-op...");
    match alice.add_peer(bob.as_peer().unwrap()) {
        Ok(()) => println!("  [FAILED] duplicate add was accepted!"),
        Err(e) => println!("  [OK] duplicate add rejected: {e}"),
    }
    println!("  Known peers: {:?}", alice.peer_nicknames());
    println!();

    println!("Step 3: Looking up a peer by nickname...");
    let found = alice.peer(&bob.nickname()).expect("Bob should be known");
    println!("  Found peer with public key: {}", found.to_hex());
    println!();

    println!("Step 4: Looking up an unknown nickname fails...");
    match alice.peer("nobody-here") {
        Ok(_) => println!("  [FAILED] found a peer that was never added!"),
        Err(e) => println!("  [OK] lookup failed as expected: {e}"),
    }
    println!();

    println!("=== Example Complete ===");
}
