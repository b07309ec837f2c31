//! The checks a ticket must pass on the ledger.
//!
//! `check_in_secure(event, signature, msg, clock)` accepts a ticket when:
//!
//! 1. `msg` decodes as a `CheckInMsg`;
//! 2. `signature` is a valid Ed25519 signature over `msg` by the trusted
//!    authority key stored in the program;
//! 3. the decoded event id is the event object passed in the same call;
//! 4. the decoded user is the transaction sender.
//!
//! Replay protection lives in the event object's state on the ledger and is
//! not modelled here. This module lets the issuing side (and tests) confirm
//! that what it produces would be accepted.

use crate::canonical::CheckInMessage;
use crate::crypto::Ed25519PublicKey;
use crate::error::VerifyError;
use crate::issuer::Ticket;
use crate::types::{ObjectId, SuiAddress};

/// Verify a ticket as the ledger would for `(event, sender)`.
///
/// Returns the decoded message on success.
pub fn verify_ticket(
    authority: &Ed25519PublicKey,
    ticket: &Ticket,
    event: &ObjectId,
    sender: &SuiAddress,
) -> Result<CheckInMessage, VerifyError> {
    let message = CheckInMessage::decode(&ticket.message)?;

    authority.verify(&ticket.message, &ticket.signature)?;

    if message.event != *event {
        return Err(VerifyError::EventMismatch {
            bound: message.event,
            presented: *event,
        });
    }

    if message.user != *sender {
        return Err(VerifyError::UserMismatch {
            bound: message.user,
            presented: *sender,
        });
    }

    Ok(message)
}
