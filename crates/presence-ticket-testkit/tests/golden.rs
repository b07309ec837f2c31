//! Golden test vectors for cross-implementation verification.
//!
//! Every issuer of presence tickets must produce identical:
//! - public key (hex and base64)
//! - msg bytes (`event[32] || user[32]`)
//! - signature (deterministic Ed25519)
//!
//! and must accept a key in either the Sui bech32 export or plain base64.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use ed25519_dalek::{Signature, SigningKey, Verifier, VerifyingKey};
use presence_ticket_core::{
    load_authority_key, verify_ticket, AuthorityKeypair, Issuer, TicketEnvelope, TicketSigner,
};
use presence_ticket_testkit::vectors::{expected_message, invalid_secrets};
use presence_ticket_testkit::{key_vectors, ticket_vectors};

#[test]
fn test_key_vectors_match_dalek() {
    for v in key_vectors() {
        let dalek = SigningKey::from_bytes(&v.seed).verifying_key();
        assert_eq!(hex::encode(dalek.to_bytes()), v.public_key_hex, "{}", v.name);
        assert_eq!(STANDARD.encode(dalek.to_bytes()), v.public_key_base64, "{}", v.name);
    }
}

#[test]
fn test_both_encodings_load_same_key() {
    for v in key_vectors() {
        let from_bech32 = load_authority_key(v.sui_private_key).unwrap();
        let from_base64 = load_authority_key(v.base64_secret).unwrap();

        assert_eq!(from_bech32.public_key(), from_base64.public_key(), "{}", v.name);
        assert_eq!(from_bech32.sign(b"check-in"), from_base64.sign(b"check-in"), "{}", v.name);
        assert_eq!(from_bech32.public_key().to_hex(), v.public_key_hex);
    }
}

#[test]
fn test_export_reproduces_vectors() {
    for v in key_vectors() {
        let keypair = AuthorityKeypair::from_seed(&v.seed);
        assert_eq!(keypair.to_bech32(), v.sui_private_key, "{}", v.name);
        assert_eq!(keypair.to_base64(), v.base64_secret, "{}", v.name);
    }
}

#[test]
fn test_ticket_vectors() {
    for v in ticket_vectors() {
        let keypair = AuthorityKeypair::from_seed(&v.seed);
        let ticket = Issuer::new(&keypair).issue_for(v.event, v.user).unwrap();
        let envelope = TicketEnvelope::from_ticket(&ticket);

        assert_eq!(envelope.msg, v.msg_base64, "{}", v.name);
        assert_eq!(ticket.signature.to_hex(), v.signature_hex, "{}", v.name);

        let msg = expected_message(&v);
        verify_ticket(&keypair.public_key(), &ticket, &msg.event, &msg.user).unwrap();
    }
}

#[test]
fn test_ticket_vectors_verify_with_dalek() {
    for v in ticket_vectors() {
        let verifying: VerifyingKey = SigningKey::from_bytes(&v.seed).verifying_key();
        let msg = STANDARD.decode(v.msg_base64).unwrap();
        let sig_bytes: [u8; 64] = hex::decode(v.signature_hex).unwrap().try_into().unwrap();

        verifying
            .verify(&msg, &Signature::from_bytes(&sig_bytes))
            .unwrap_or_else(|e| panic!("{}: {}", v.name, e));
    }
}

#[test]
fn test_invalid_secrets() {
    for case in invalid_secrets() {
        let err = load_authority_key(case.secret).unwrap_err();
        assert_eq!(err.kind(), case.kind, "{}", case.name);
        if !case.secret.trim().is_empty() {
            assert!(!err.to_string().contains(case.secret.trim()), "{}", case.name);
        }
    }
}

#[test]
fn test_print_vectors() {
    // Run with --nocapture to export for other implementations.
    let json = presence_ticket_testkit::vectors::vectors_json();
    println!("{}", serde_json::to_string_pretty(&json).unwrap());
}
