//! Ticket issuance.
//!
//! A [`Ticket`] is the authority's signature together with the exact bytes it
//! signed. The ledger program receives both and recomputes nothing from
//! human-readable fields.

use tracing::debug;

use crate::canonical::CheckInMessage;
use crate::crypto::{Ed25519PublicKey, Ed25519Signature, TicketSigner};
use crate::error::ValidationError;
use crate::types::{ObjectId, SuiAddress};

/// A signed check-in authorization. Bearer data, immutable once issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub signature: Ed25519Signature,
    pub message: Vec<u8>,
}

impl Ticket {
    pub fn new(signature: Ed25519Signature, message: Vec<u8>) -> Self {
        Self { signature, message }
    }

    /// Check the signature against an authority public key.
    ///
    /// This is only the cryptographic half of what the ledger enforces; see
    /// [`crate::validation::verify_ticket`] for the binding checks.
    pub fn verify_signature(&self, authority: &Ed25519PublicKey) -> bool {
        authority.verify(&self.message, &self.signature).is_ok()
    }
}

/// Signs check-in messages with an injected authority signer.
///
/// Stateless apart from the borrowed signer, so any number of issuers may
/// share one keypair across threads.
pub struct Issuer<'a, S: TicketSigner> {
    signer: &'a S,
}

impl<'a, S: TicketSigner> Issuer<'a, S> {
    pub fn new(signer: &'a S) -> Self {
        Self { signer }
    }

    /// The public key tickets from this issuer verify against.
    pub fn public_key(&self) -> Ed25519PublicKey {
        self.signer.public_key()
    }

    /// Issue a ticket for already-validated identifiers.
    pub fn issue(&self, event: &ObjectId, user: &SuiAddress) -> Ticket {
        let message = CheckInMessage::new(*event, *user).encode();
        let signature = self.signer.sign(&message);
        debug!(event = %event, user = %user, "issued check-in ticket");
        Ticket { signature, message }
    }

    /// Validate textual identifiers, then issue.
    ///
    /// Both identifiers are parsed before the signer is touched, so invalid
    /// input never reaches the key.
    pub fn issue_for(&self, event_id: &str, user_address: &str) -> Result<Ticket, ValidationError> {
        let (event, user) = parse_request(event_id, user_address)?;
        Ok(self.issue(&event, &user))
    }
}

/// Validate an `(event_id, user_address)` pair as received from a client.
pub fn parse_request(
    event_id: &str,
    user_address: &str,
) -> Result<(ObjectId, SuiAddress), ValidationError> {
    let event = ObjectId::parse(event_id).map_err(|e| e.for_field("event_id"))?;
    let user = SuiAddress::parse(user_address).map_err(|e| e.for_field("user_address"))?;
    Ok((event, user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::AuthorityKeypair;
    use std::cell::Cell;

    /// Wraps a keypair and counts signing calls.
    struct CountingSigner {
        inner: AuthorityKeypair,
        calls: Cell<usize>,
    }

    impl TicketSigner for CountingSigner {
        fn sign(&self, message: &[u8]) -> Ed25519Signature {
            self.calls.set(self.calls.get() + 1);
            self.inner.sign(message)
        }

        fn public_key(&self) -> Ed25519PublicKey {
            self.inner.public_key()
        }
    }

    fn hex_id(byte: u8) -> String {
        format!("0x{}", hex::encode([byte; 32]))
    }

    #[test]
    fn test_issue_twice_same_message_both_valid() {
        let keypair = AuthorityKeypair::from_seed(&[0x42; 32]);
        let issuer = Issuer::new(&keypair);

        let t1 = issuer.issue_for(&hex_id(0xaa), &hex_id(0xbb)).unwrap();
        let t2 = issuer.issue_for(&hex_id(0xaa), &hex_id(0xbb)).unwrap();

        assert_eq!(t1.message, t2.message);
        assert!(t1.verify_signature(&keypair.public_key()));
        assert!(t2.verify_signature(&keypair.public_key()));
    }

    #[test]
    fn test_ticket_does_not_cover_other_user() {
        let keypair = AuthorityKeypair::from_seed(&[0x42; 32]);
        let issuer = Issuer::new(&keypair);
        let ticket = issuer.issue_for(&hex_id(0xaa), &hex_id(0xbb)).unwrap();

        let other = CheckInMessage::new(
            ObjectId::from_bytes([0xaa; 32]),
            SuiAddress::from_bytes([0xcc; 32]),
        )
        .encode();
        assert_ne!(ticket.message, other);
        assert!(keypair
            .public_key()
            .verify(&other, &ticket.signature)
            .is_err());
    }

    #[test]
    fn test_invalid_event_rejected_before_signing() {
        let signer = CountingSigner {
            inner: AuthorityKeypair::generate(),
            calls: Cell::new(0),
        };
        let issuer = Issuer::new(&signer);

        let err = issuer.issue_for("0xaaaa", &hex_id(0xbb)).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidIdentifier {
                field: "event_id",
                ..
            }
        ));
        assert_eq!(signer.calls.get(), 0);

        let err = issuer.issue_for(&hex_id(0xaa), "").unwrap_err();
        assert_eq!(err, ValidationError::Missing("user_address"));
        assert_eq!(signer.calls.get(), 0);

        issuer.issue_for(&hex_id(0xaa), &hex_id(0xbb)).unwrap();
        assert_eq!(signer.calls.get(), 1);
    }

    #[test]
    fn test_issued_message_is_canonical_encoding() {
        let keypair = AuthorityKeypair::generate();
        let issuer = Issuer::new(&keypair);
        let event = ObjectId::from_bytes([0x01; 32]);
        let user = SuiAddress::from_bytes([0x02; 32]);

        let ticket = issuer.issue(&event, &user);
        assert_eq!(ticket.message, CheckInMessage::new(event, user).encode());
        assert_eq!(issuer.public_key(), keypair.public_key());
    }
}
