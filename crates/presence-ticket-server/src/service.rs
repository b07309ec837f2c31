//! The issuance service: the authority key plus the operations served over
//! HTTP.
//!
//! The key is loaded once at start-up. A missing or broken key does not stop
//! the server; every key-dependent request reports the failure instead, and
//! `/health` shows which one it is.

use presence_ticket_core::{
    load_authority_key, load_authority_key_from_env, AuthorityKeypair, Ed25519PublicKey,
    IssueError, Issuer, KeyError, KeyErrorKind, Ticket, TicketSigner,
};
use serde::Serialize;
use tracing::{info, warn};

/// Outcome of loading the authority key.
#[derive(Debug)]
pub enum AuthorityState {
    Ready(AuthorityKeypair),
    Unavailable(KeyError),
}

/// Readiness as reported by `/health`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorityStatus {
    Ready,
    NotConfigured,
    Misconfigured,
}

impl AuthorityState {
    fn from_result(result: Result<AuthorityKeypair, KeyError>) -> Self {
        match result {
            Ok(keypair) => {
                info!(public_key = %keypair.public_key().to_base64(), "authority key loaded");
                AuthorityState::Ready(keypair)
            }
            Err(e) => {
                warn!(error = %e, "authority key unavailable");
                AuthorityState::Unavailable(e)
            }
        }
    }

    pub fn status(&self) -> AuthorityStatus {
        match self {
            AuthorityState::Ready(_) => AuthorityStatus::Ready,
            AuthorityState::Unavailable(e) => match e.kind() {
                KeyErrorKind::NotConfigured => AuthorityStatus::NotConfigured,
                KeyErrorKind::Misconfigured => AuthorityStatus::Misconfigured,
            },
        }
    }

    fn keypair(&self) -> Result<&AuthorityKeypair, KeyError> {
        match self {
            AuthorityState::Ready(keypair) => Ok(keypair),
            AuthorityState::Unavailable(e) => Err(e.clone()),
        }
    }
}

/// Issues tickets with the configured authority key.
#[derive(Debug)]
pub struct TicketService {
    authority: AuthorityState,
}

impl TicketService {
    /// Build from an already-loaded keypair.
    pub fn new(keypair: AuthorityKeypair) -> Self {
        Self {
            authority: AuthorityState::Ready(keypair),
        }
    }

    /// Build from the textual secret; `None` means the variable is unset.
    pub fn from_secret(secret: Option<&str>) -> Self {
        let result = match secret {
            Some(secret) => load_authority_key(secret),
            None => Err(KeyError::NotConfigured),
        };
        Self {
            authority: AuthorityState::from_result(result),
        }
    }

    /// Build from `ADMIN_SECRET_KEY`.
    pub fn from_env() -> Self {
        Self {
            authority: AuthorityState::from_result(load_authority_key_from_env()),
        }
    }

    pub fn authority_status(&self) -> AuthorityStatus {
        self.authority.status()
    }

    /// The public key to provision on-chain.
    pub fn public_key(&self) -> Result<Ed25519PublicKey, KeyError> {
        Ok(self.authority.keypair()?.public_key())
    }

    /// Validate the identifiers, then sign.
    ///
    /// Bad input is reported even when no key is configured.
    pub fn issue(&self, event_id: &str, user_address: &str) -> Result<Ticket, IssueError> {
        let (event, user) = presence_ticket_core::parse_request(event_id, user_address)?;
        let keypair = self.authority.keypair()?;
        Ok(Issuer::new(keypair).issue(&event, &user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use presence_ticket_core::{CheckInMessage, ObjectId, SuiAddress, ValidationError};

    const EVENT: &str = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
    const USER: &str = "0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";

    #[test]
    fn test_issue_with_key() {
        let service = TicketService::new(AuthorityKeypair::from_seed(&[0x42; 32]));
        let ticket = service.issue(EVENT, USER).unwrap();

        let expected = CheckInMessage::new(
            ObjectId::from_bytes([0xaa; 32]),
            SuiAddress::from_bytes([0xbb; 32]),
        );
        assert_eq!(ticket.message, expected.encode());
        assert!(ticket.verify_signature(&service.public_key().unwrap()));
        assert_eq!(service.authority_status(), AuthorityStatus::Ready);
    }

    #[test]
    fn test_unset_secret_is_not_configured() {
        let service = TicketService::from_secret(None);
        assert_eq!(service.authority_status(), AuthorityStatus::NotConfigured);
        assert_eq!(
            service.issue(EVENT, USER).unwrap_err(),
            IssueError::Configuration(KeyError::NotConfigured)
        );
        assert_eq!(service.public_key().unwrap_err(), KeyError::NotConfigured);
    }

    #[test]
    fn test_garbage_secret_is_misconfigured() {
        let service = TicketService::from_secret(Some("definitely not a key"));
        assert_eq!(service.authority_status(), AuthorityStatus::Misconfigured);
        assert!(!service.issue(EVENT, USER).unwrap_err().is_client_error());
    }

    #[test]
    fn test_validation_reported_before_configuration() {
        let service = TicketService::from_secret(None);
        let err = service.issue("", USER).unwrap_err();
        assert_eq!(
            err,
            IssueError::Validation(ValidationError::Missing("event_id"))
        );
        assert!(err.is_client_error());
    }

    #[test]
    fn test_status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&AuthorityStatus::NotConfigured).unwrap(),
            "\"not_configured\""
        );
    }
}
