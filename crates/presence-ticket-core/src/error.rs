//! Error types for presence ticket operations.

use thiserror::Error;

use crate::types::{ObjectId, SuiAddress};

/// Whether a key failure means "nobody set a key" or "somebody set a bad one".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyErrorKind {
    NotConfigured,
    Misconfigured,
}

/// Errors raised while loading the authority signing key.
///
/// Messages describe the failure class only and never echo the secret.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeyError {
    #[error("authority key not configured")]
    NotConfigured,

    #[error("authority key is not valid bech32: {0}")]
    InvalidBech32(&'static str),

    #[error("authority key has unexpected bech32 prefix, expected \"suiprivkey\"")]
    UnexpectedPrefix,

    #[error("authority key is not valid base64")]
    InvalidBase64,

    #[error("authority key is not valid UTF-8")]
    InvalidEncoding,

    #[error("authority key must use the ED25519 scheme, found {0}")]
    UnsupportedScheme(&'static str),

    #[error("authority key has unknown scheme flag {0:#04x}")]
    UnknownScheme(u8),

    #[error("authority key has invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}

impl KeyError {
    /// Classify this error for operational diagnosis.
    pub fn kind(&self) -> KeyErrorKind {
        match self {
            KeyError::NotConfigured => KeyErrorKind::NotConfigured,
            _ => KeyErrorKind::Misconfigured,
        }
    }
}

/// Caller-supplied input failed structural checks.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing {0}")]
    Missing(&'static str),

    #[error("invalid {field}: {reason}")]
    InvalidIdentifier { field: &'static str, reason: String },

    #[error("invalid {field}: {reason}")]
    InvalidArgument { field: &'static str, reason: String },
}

impl ValidationError {
    /// Attach the request field name to an identifier parse failure.
    pub fn for_field(self, field: &'static str) -> Self {
        match self {
            ValidationError::InvalidIdentifier { reason, .. } => {
                ValidationError::InvalidIdentifier { field, reason }
            }
            ValidationError::Missing(_) => ValidationError::Missing(field),
            other => other,
        }
    }
}

/// A ticket could not be recovered from its transport form.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("missing ticket field: {0}")]
    MissingField(&'static str),

    #[error("ticket field {field} is not valid base64")]
    InvalidBase64 { field: &'static str },

    #[error("ticket signature must be 64 bytes, got {0}")]
    InvalidSignatureLength(usize),

    #[error("check-in message must be {expected} bytes, got {actual}")]
    InvalidMessageLength { expected: usize, actual: usize },

    #[error("malformed BCS value: {0}")]
    MalformedBcs(&'static str),

    #[error("invalid ticket link: {0}")]
    InvalidLink(String),

    #[error("invalid event in ticket link: {0}")]
    InvalidEvent(ValidationError),
}

/// The wallet agent or the ledger rejected a submitted call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("wallet not connected")]
    WalletNotConnected,

    #[error("rejected by wallet: {0}")]
    RejectedByWallet(String),

    #[error("transaction failed on ledger: {0}")]
    ExecutionFailed(String),
}

/// Outcome of the ledger-side check a ticket must pass.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VerifyError {
    #[error("malformed ticket: {0}")]
    Malformed(#[from] TransportError),

    #[error("signature verification failed")]
    Signature,

    #[error("invalid public key")]
    InvalidPublicKey,

    #[error("ticket bound to event {bound}, presented for {presented}")]
    EventMismatch { bound: ObjectId, presented: ObjectId },

    #[error("ticket bound to user {bound}, presented by {presented}")]
    UserMismatch { bound: SuiAddress, presented: SuiAddress },
}

/// Errors surfaced by the issuance path.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IssueError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Configuration(#[from] KeyError),
}

impl IssueError {
    /// True when the caller, not the service, caused the failure.
    pub fn is_client_error(&self) -> bool {
        matches!(self, IssueError::Validation(_))
    }
}
