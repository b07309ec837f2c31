//! Ticket transport forms.
//!
//! Tickets move from the issuer to the device that redeems them as JSON
//! (`{ signature, msg }`, standard base64) or as a shareable link whose query
//! carries `event`, `signature` and `msg`. A link can be rendered as a QR code
//! and opened on another device; the ticket is bearer data.
//!
//! Nothing here verifies a signature. Decoding only guarantees the bytes
//! that come out are the bytes that went in.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::crypto::{Ed25519Signature, SIGNATURE_LENGTH};
use crate::error::TransportError;
use crate::issuer::Ticket;
use crate::types::ObjectId;

/// Query parameter names used in ticket links.
pub mod params {
    pub const EVENT: &str = "event";
    pub const EVENT_ALIAS: &str = "event_id";
    pub const SIGNATURE: &str = "signature";
    pub const MSG: &str = "msg";
}

/// JSON wire form of a ticket, as returned by the issuance endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketEnvelope {
    pub signature: String,
    pub msg: String,
}

impl TicketEnvelope {
    /// Encode a ticket for transport.
    pub fn from_ticket(ticket: &Ticket) -> Self {
        Self {
            signature: STANDARD.encode(ticket.signature.as_bytes()),
            msg: STANDARD.encode(&ticket.message),
        }
    }

    /// Recover the ticket bytes.
    pub fn to_ticket(&self) -> Result<Ticket, TransportError> {
        decode_parts(&self.signature, &self.msg)
    }
}

impl From<&Ticket> for TicketEnvelope {
    fn from(ticket: &Ticket) -> Self {
        Self::from_ticket(ticket)
    }
}

impl TryFrom<&TicketEnvelope> for Ticket {
    type Error = TransportError;

    fn try_from(envelope: &TicketEnvelope) -> Result<Self, Self::Error> {
        envelope.to_ticket()
    }
}

fn decode_parts(signature: &str, msg: &str) -> Result<Ticket, TransportError> {
    if signature.is_empty() {
        return Err(TransportError::MissingField(params::SIGNATURE));
    }
    if msg.is_empty() {
        return Err(TransportError::MissingField(params::MSG));
    }

    let sig_bytes = STANDARD
        .decode(signature)
        .map_err(|_| TransportError::InvalidBase64 {
            field: params::SIGNATURE,
        })?;
    let message = STANDARD
        .decode(msg)
        .map_err(|_| TransportError::InvalidBase64 { field: params::MSG })?;

    let len = sig_bytes.len();
    let sig: [u8; SIGNATURE_LENGTH] = sig_bytes
        .try_into()
        .map_err(|_| TransportError::InvalidSignatureLength(len))?;

    Ok(Ticket::new(Ed25519Signature(sig), message))
}

/// What a scanned or clicked link carries.
///
/// A link may name only an event (sharing an event page) or an event plus a
/// full ticket. A ticket with only one of `signature`/`msg` is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TicketLink {
    pub event: Option<ObjectId>,
    pub ticket: Option<Ticket>,
}

impl TicketLink {
    pub fn new(event: ObjectId, ticket: Ticket) -> Self {
        Self {
            event: Some(event),
            ticket: Some(ticket),
        }
    }

    /// Build the shareable URL under `origin`.
    pub fn to_url(&self, origin: &str) -> Result<Url, TransportError> {
        let mut url = Url::parse(origin).map_err(|e| TransportError::InvalidLink(e.to_string()))?;
        url.set_path("/");
        url.set_query(None);
        {
            let mut query = url.query_pairs_mut();
            if let Some(event) = &self.event {
                query.append_pair(params::EVENT, &event.to_hex());
            }
            if let Some(ticket) = &self.ticket {
                let envelope = TicketEnvelope::from_ticket(ticket);
                query.append_pair(params::SIGNATURE, &envelope.signature);
                query.append_pair(params::MSG, &envelope.msg);
            }
        }
        Ok(url)
    }

    /// Parse a full link.
    pub fn from_url(link: &str) -> Result<Self, TransportError> {
        let url = Url::parse(link).map_err(|e| TransportError::InvalidLink(e.to_string()))?;
        Self::from_query(url.query().unwrap_or(""))
    }

    /// Parse just the query component (without the leading `?`).
    pub fn from_query(query: &str) -> Result<Self, TransportError> {
        let mut event = None;
        let mut event_alias = None;
        let mut signature = None;
        let mut msg = None;

        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                params::EVENT => event = Some(value.into_owned()),
                params::EVENT_ALIAS => event_alias = Some(value.into_owned()),
                params::SIGNATURE => signature = Some(value.into_owned()),
                params::MSG => msg = Some(value.into_owned()),
                _ => {}
            }
        }

        let event = event
            .or(event_alias)
            .filter(|s| !s.is_empty())
            .map(|s| ObjectId::parse(&s).map_err(TransportError::InvalidEvent))
            .transpose()?;

        let signature = signature.filter(|s| !s.is_empty());
        let msg = msg.filter(|s| !s.is_empty());

        let ticket = match (signature, msg) {
            (Some(signature), Some(msg)) => Some(decode_parts(&signature, &msg)?),
            (None, None) => None,
            (Some(_), None) => return Err(TransportError::MissingField(params::MSG)),
            (None, Some(_)) => return Err(TransportError::MissingField(params::SIGNATURE)),
        };

        Ok(Self { event, ticket })
    }
}
