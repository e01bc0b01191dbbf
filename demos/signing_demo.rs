//! # Digital Signature Demo
//!
//! Demonstrates Ed25519 signatures over the digest rule
//! `SHA-256(ephemeral-pub || body || nonce)`.
//!
//! ## Run
//!
//! ```bash
//! cargo run --example signing_demo
//! ```

use oracle_core::Principal;
use rand::rngs::OsRng;

fn main() {
    println!("=== oracle-core: Digital Signature Demo ===\n");

    println!("Step 1: Generating an identity...");
    let alice = Principal::new(&mut OsRng).expect("failed to generate identity");
    println!("  Alice: {}", alice.nickname());
    println!();

    println!("Step 2: Signing a message...");
    let message = b"This message was sent by me and has not been tampered with.";
    let mut plain = alice
        .compose("integrity check", message.to_vec())
        .expect("failed to compose message");
    alice.sign(&mut OsRng, &mut plain).expect("failed to sign message");
    println!("  Message: \"{}\"", String::from_utf8_lossy(message));
    println!("  Signature (hex): {}", hex::encode(plain.sig.unwrap()));
    println!();

    println!("Step 3: Verifying the signature...");
    let alice_peer = alice.as_peer().expect("failed to derive public identity");
    if alice.verify(&plain, &alice_peer) {
        println!("  [OK] signature is valid!");
    } else {
        println!("  [FAILED] signature verification failed!");
    }
    println!();

    println!("Step 4: Forgery detection...");
    let mut tampered = plain.clone();
    tampered.body[0] ^= 0xFF;
    if alice.verify(&tampered, &alice_peer) {
        println!("  [FAILED] tampered message was accepted!");
    } else {
        println!("  [OK] tampered message rejected!");
    }

    let bob = Principal::new(&mut OsRng).expect("failed to generate second identity");
    let bob_peer = bob.as_peer().expect("failed to derive Bob's public identity");
    if alice.verify(&plain, &bob_peer) {
        println!("  [FAILED] signature verified against the wrong public key!");
    } else {
        println!("  [OK] signature correctly rejected under the wrong public key!");
    }
    println!();

    println!("=== Example Complete ===");
}
