//! # Identity Creation Example
//!
//! Demonstrates creating a new identity and persisting it to a byte buffer.
//!
//! ## Run
//!
//! ```bash
//! cargo run --example identity_creation
//! ```

use oracle_core::Principal;
use rand::rngs::OsRng;

fn main() {
    println!("=== oracle-core: Identity Creation Example ===\n");

    println!("Step 1: Generating new identity...");
    let alice = Principal::new(&mut OsRng).expect("failed to generate identity");
    println!("  Nickname: {}", alice.nickname());

    let peer = alice.as_peer().expect("failed to derive public identity");
    println!("  Public key (hex): {}", peer.to_hex());
    println!();

    println!("Step 2: Saving identity to a buffer...");
    let mut buf = Vec::new();
    alice.save(&mut buf).expect("failed to save identity");
    println!("  Saved {} bytes", buf.len());
    println!();

    println!("Step 3: Loading identity back...");
    let reloaded = oracle_core::Principal::load_from(buf.as_slice()).expect("failed to load identity");
    println!("  Nickname: {}", reloaded.nickname());

    if reloaded.nickname() == alice.nickname() {
        println!("  [OK] reloaded identity matches the original");
    } else {
        println!("  [FAILED] reloaded identity differs");
    }
    println!();

    println!("=== Example Complete ===");
}
