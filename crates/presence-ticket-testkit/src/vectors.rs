//! Golden test vectors for deterministic verification.
//!
//! Ed25519 signing is deterministic, so a fixed seed and message always
//! produce the same signature. These vectors pin the key formats, the
//! canonical message layout and the signatures, so any other issuer or
//! verifier can be checked against them byte for byte.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Serialize;

use presence_ticket_core::{
    load_authority_key, AuthorityKeypair, CheckInMessage, Issuer, KeyErrorKind, ObjectId,
    SuiAddress, TicketSigner,
};

/// One authority key in both accepted secret encodings.
#[derive(Debug, Clone, Serialize)]
pub struct KeyVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Ed25519 seed.
    #[serde(serialize_with = "hex_bytes")]
    pub seed: [u8; 32],
    /// Public key, hex.
    pub public_key_hex: &'static str,
    /// Public key, standard base64 (the `/api/admin-pubkey` form).
    pub public_key_base64: &'static str,
    /// Sui bech32 export of the seed.
    pub sui_private_key: &'static str,
    /// Standard base64 of the bare seed.
    pub base64_secret: &'static str,
}

/// A ticket issued for a fixed `(seed, event, user)`.
#[derive(Debug, Clone, Serialize)]
pub struct TicketVector {
    pub name: &'static str,
    #[serde(serialize_with = "hex_bytes")]
    pub seed: [u8; 32],
    pub event: &'static str,
    pub user: &'static str,
    /// Expected `msg`, standard base64.
    pub msg_base64: &'static str,
    /// Expected signature, hex.
    pub signature_hex: &'static str,
}

/// A secret that must fail to load, and how.
#[derive(Debug, Clone)]
pub struct InvalidSecret {
    pub name: &'static str,
    pub secret: &'static str,
    pub kind: KeyErrorKind,
}

fn hex_bytes<S: serde::Serializer>(bytes: &[u8; 32], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&hex::encode(bytes))
}

const SEQUENTIAL_SEED: [u8; 32] = [
    0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e,
    0x0f, 0x10, 0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17, 0x18, 0x19, 0x1a, 0x1b, 0x1c, 0x1d,
    0x1e, 0x1f,
];

const EVENT_AA: &str = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
const USER_BB: &str = "0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";
const USER_CC: &str = "0xcccccccccccccccccccccccccccccccccccccccccccccccccccccccccccccccc";

const MSG_AA_BB: &str = "qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqq7u7u7u7u7u7u7u7u7u7u7u7u7u7u7u7u7u7u7u7u7uw==";

/// Get all key vectors.
pub fn key_vectors() -> Vec<KeyVector> {
    vec![
        KeyVector {
            name: "repeated 0x42 seed",
            seed: [0x42; 32],
            public_key_hex: "2152f8d19b791d24453242e15f2eab6cb7cffa7b6a5ed30097960e069881db12",
            public_key_base64: "IVL40Zt5HSRFMkLhXy6rbLfP+ntqXtMAl5YOBpiB2xI=",
            sui_private_key: "suiprivkey1qppyysjzgfpyysjzgfpyysjzgfpyysjzgfpyysjzgfpyysjzgfpyy458zla",
            base64_secret: "QkJCQkJCQkJCQkJCQkJCQkJCQkJCQkJCQkJCQkJCQkI=",
        },
        KeyVector {
            name: "repeated 0x01 seed",
            seed: [0x01; 32],
            public_key_hex: "8a88e3dd7409f195fd52db2d3cba5d72ca6709bf1d94121bf3748801b40f6f5c",
            public_key_base64: "iojj3XQJ8ZX9UtstPLpdcspnCb8dlBIb83SIAbQPb1w=",
            sui_private_key: "suiprivkey1qqqszqgpqyqszqgpqyqszqgpqyqszqgpqyqszqgpqyqszqgpqyqszasa5uj",
            base64_secret: "AQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQE=",
        },
        KeyVector {
            name: "sequential seed",
            seed: SEQUENTIAL_SEED,
            public_key_hex: "03a107bff3ce10be1d70dd18e74bc09967e4d6309ba50d5f1ddc8664125531b8",
            public_key_base64: "A6EHv/POEL4dcN0Y50vAmWfk1jCbpQ1fHdyGZBJVMbg=",
            sui_private_key: "suiprivkey1qqqqzqsrqszsvpcgpy9qkrqdpc83qygjzv2p29shrqv35xcur50p74yefn7",
            base64_secret: "AAECAwQFBgcICQoLDA0ODxAREhMUFRYXGBkaGxwdHh8=",
        },
    ]
}

/// Get all ticket vectors.
pub fn ticket_vectors() -> Vec<TicketVector> {
    vec![
        TicketVector {
            name: "event aa, user bb",
            seed: [0x42; 32],
            event: EVENT_AA,
            user: USER_BB,
            msg_base64: MSG_AA_BB,
            signature_hex: "71f5e3dc7631a3bf823c522cc93d1056c33ba96772b28f0c196f12b27b6d12f2c47ea431a6579102a19c04fa39b7d3efa3e94aac285b074442cff1361fa26007",
        },
        TicketVector {
            name: "event aa, user cc",
            seed: [0x42; 32],
            event: EVENT_AA,
            user: USER_CC,
            msg_base64: "qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqrMzMzMzMzMzMzMzMzMzMzMzMzMzMzMzMzMzMzMzMzMzA==",
            signature_hex: "d62db840dd9348757a355e2cce251970dba6a3f3e1ec6200b874b091513d64decdee965b918aa6a2078d073160e4112c5eab98b044a4c11364ac353022b7900b",
        },
        TicketVector {
            name: "0x01 authority",
            seed: [0x01; 32],
            event: EVENT_AA,
            user: USER_BB,
            msg_base64: MSG_AA_BB,
            signature_hex: "747d754ed157c057fcc3331da5c0550ea88e827973add4693ad84fc519530f4f768f6ffd14391b91586c33d122226e6af022a1ea71978de9f139cc08a74eb304",
        },
        TicketVector {
            name: "sequential authority",
            seed: SEQUENTIAL_SEED,
            event: EVENT_AA,
            user: USER_BB,
            msg_base64: MSG_AA_BB,
            signature_hex: "fa99128d7467fe7862e13629c926e33696b247061fba2732e64c5e46e74b3a24ab91edff62e4ca030a99b1d2ccd2c29569e589a07370fc10107171965e05f807",
        },
    ]
}

/// Secrets that must be rejected.
pub fn invalid_secrets() -> Vec<InvalidSecret> {
    vec![
        InvalidSecret {
            name: "empty",
            secret: "",
            kind: KeyErrorKind::NotConfigured,
        },
        InvalidSecret {
            name: "whitespace",
            secret: "  \n",
            kind: KeyErrorKind::NotConfigured,
        },
        InvalidSecret {
            name: "secp256k1 flag",
            secret: "suiprivkey1q9pyysjzgfpyysjzgfpyysjzgfpyysjzgfpyysjzgfpyysjzgfpyy0tjau2",
            kind: KeyErrorKind::Misconfigured,
        },
        InvalidSecret {
            name: "31-byte bech32 payload",
            secret: "suiprivkey1qppyysjzgfpyysjzgfpyysjzgfpyysjzgfpyysjzgfpyysjzgfpqjf4evj",
            kind: KeyErrorKind::Misconfigured,
        },
        InvalidSecret {
            name: "bad bech32 checksum",
            secret: "suiprivkey1qppyysjzgfpyysjzgfpyysjzgfpyysjzgfpyysjzgfpyysjzgfpyy458zlq",
            kind: KeyErrorKind::Misconfigured,
        },
        InvalidSecret {
            name: "base64 of 16 bytes",
            secret: "QkJCQkJCQkJCQkJCQkJCQg==",
            kind: KeyErrorKind::Misconfigured,
        },
        InvalidSecret {
            name: "not base64",
            secret: "not a key!",
            kind: KeyErrorKind::Misconfigured,
        },
    ]
}

/// Recompute a ticket vector with the library.
///
/// Returns `(msg_base64, signature_hex)`.
pub fn issue_from_vector(vector: &TicketVector) -> (String, String) {
    let keypair = AuthorityKeypair::from_seed(&vector.seed);
    let ticket = Issuer::new(&keypair)
        .issue_for(vector.event, vector.user)
        .expect("vector identifiers are valid");
    (STANDARD.encode(&ticket.message), ticket.signature.to_hex())
}

/// Check every vector against the library.
///
/// Returns `(name, matches, detail)` per vector.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    let keys = key_vectors().into_iter().map(|v| {
        let pk = AuthorityKeypair::from_seed(&v.seed).public_key();
        let from_bech32 = load_authority_key(v.sui_private_key).map(|k| k.public_key());
        let from_base64 = load_authority_key(v.base64_secret).map(|k| k.public_key());

        let matches = pk.to_hex() == v.public_key_hex
            && pk.to_base64() == v.public_key_base64
            && from_bech32 == Ok(pk)
            && from_base64 == Ok(pk);
        (v.name.to_string(), matches, pk.to_hex())
    });

    let tickets = ticket_vectors().into_iter().map(|v| {
        let (msg, sig) = issue_from_vector(&v);
        let matches = msg == v.msg_base64 && sig == v.signature_hex;
        (v.name.to_string(), matches, sig)
    });

    keys.chain(tickets).collect()
}

/// The canonical message a ticket vector should sign.
pub fn expected_message(vector: &TicketVector) -> CheckInMessage {
    CheckInMessage::new(
        ObjectId::parse(vector.event).expect("vector event is valid"),
        SuiAddress::parse(vector.user).expect("vector user is valid"),
    )
}

/// All vectors as JSON, for checking other implementations.
pub fn vectors_json() -> serde_json::Value {
    serde_json::json!({
        "keys": key_vectors(),
        "tickets": ticket_vectors(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_vectors_match() {
        for (name, matches, detail) in verify_all_vectors() {
            assert!(matches, "vector '{}' mismatched: {}", name, detail);
        }
    }

    #[test]
    fn test_expected_message_matches_msg_base64() {
        for vector in ticket_vectors() {
            assert_eq!(
                STANDARD.encode(expected_message(&vector).encode()),
                vector.msg_base64,
                "vector '{}'",
                vector.name
            );
        }
    }

    #[test]
    fn test_invalid_secrets_rejected_with_kind() {
        for case in invalid_secrets() {
            let err = load_authority_key(case.secret).unwrap_err();
            assert_eq!(err.kind(), case.kind, "case '{}'", case.name);
        }
    }

    #[test]
    fn test_json_export_shape() {
        let json = vectors_json();
        assert_eq!(json["keys"].as_array().unwrap().len(), key_vectors().len());
        assert_eq!(
            json["keys"][0]["seed"],
            serde_json::Value::String("42".repeat(32))
        );
        assert_eq!(json["tickets"][0]["event"], EVENT_AA);
    }
}
