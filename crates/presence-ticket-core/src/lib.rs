//! # Presence Ticket Core
//!
//! Primitives for signed attendance check-in: an authority signs a
//! `(event, user)` pair off-chain, the user redeems the ticket on-chain from
//! their own wallet, and the ledger program verifies it.
//!
//! This crate contains no networking and no persistent storage. The one
//! external seam is [`WalletAgent`], the boundary to whatever holds the
//! user's key and submits transactions.
//!
//! ## Key Types
//!
//! - [`ObjectId`] / [`SuiAddress`] - Normalized 32-byte identifiers
//! - [`CheckInMessage`] - The canonical 64-byte signed fact
//! - [`AuthorityKeypair`] - The issuing key, loaded via [`load_authority_key`]
//! - [`Issuer`] / [`Ticket`] - Issuance and the resulting bearer ticket
//! - [`TicketEnvelope`] / [`TicketLink`] - Transport forms
//! - [`TransactionAssembler`] - Builds `check_in_secure` calls
//!
//! ## Canonicalization
//!
//! Messages are BCS-encoded exactly as the ledger program encodes them. See
//! the [`canonical`] module.

pub mod assembler;
pub mod authority;
pub mod canonical;
pub mod carrier;
pub mod crypto;
pub mod error;
pub mod issuer;
pub mod types;
pub mod validation;

pub use assembler::{submit, CallArg, MoveCall, Submission, TransactionAssembler, WalletAgent};
pub use authority::{load_authority_key, load_authority_key_from_env, SecretEncoding, SECRET_ENV_VAR};
pub use canonical::{check_in_bytes, CheckInMessage, CHECK_IN_MESSAGE_LEN};
pub use carrier::{TicketEnvelope, TicketLink};
pub use crypto::{AuthorityKeypair, Ed25519PublicKey, Ed25519Signature, TicketSigner};
pub use error::{
    IssueError, KeyError, KeyErrorKind, SubmissionError, TransportError, ValidationError,
    VerifyError,
};
pub use issuer::{parse_request, Issuer, Ticket};
pub use types::{ObjectId, SuiAddress};
pub use validation::verify_ticket;
