//! # Encryption Demo
//!
//! Demonstrates hybrid (ephemeral-static ECDH + ChaCha20-Poly1305)
//! encryption between two principals.
//!
//! ## Run
//!
//! ```bash
//! cargo run --example encryption_demo
//! ```

use oracle_core::Principal;
use rand::rngs::OsRng;

fn main() {
    println!("=== oracle-core: Hybrid Encryption Demo ===\n");

    println!("Step 1: Generating identities for Alice and Bob...");
    let alice = Principal::new(&mut OsRng).expect("failed to generate Alice");
    let bob = Principal::new(&mut OsRng).expect("failed to generate Bob");
    println!("  Alice: {}", alice.nickname());
    println!("  Bob:   {}", bob.nickname());
    println!();

    println!("Step 2: Alice composes and seals a message for Bob...");
    let bob_peer = bob.as_peer().expect("failed to derive Bob's public identity");
    let message = b"It was the best of times, it was the worst of times";
    let plain = alice
        .compose("A Tale of Two Cities", message.to_vec())
        .expect("failed to compose message");
    let sealed = alice
        .encrypt(&mut OsRng, &plain, &bob_peer)
        .expect("failed to seal message");

    println!("  Ciphertext length: {} bytes (plaintext: {} bytes)", sealed.body.len(), message.len());
    println!("  Ephemeral public key (hex): {}", hex::encode(sealed.ephemeral_pub));
    println!();

    println!("Step 3: Bob opens the message...");
    let opened = bob.decrypt(&sealed).expect("failed to open message");
    println!("  Decrypted: \"{}\"", opened.body_string());
    println!("  Headers: {:?}", opened.headers);

    if opened.body == message {
        println!("  [OK] message decrypted successfully!");
    } else {
        println!("  [FAILED] decryption produced the wrong plaintext!");
    }
    println!();

    println!("Step 4: Tamper detection (AEAD integrity)...");
    let mut tampered = sealed;
    if !tampered.body.is_empty() {
        tampered.body[0] ^= 0xFF;
    }
    match bob.decrypt(&tampered) {
        Ok(_) => println!("  [FAILED] tampered ciphertext was accepted!"),
        Err(e) => println!("  [OK] tampered ciphertext rejected: {e}"),
    }
    println!();

    println!("=== Example Complete ===");
}
