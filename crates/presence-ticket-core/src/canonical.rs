//! Canonical BCS encoding for check-in messages.
//!
//! The ledger program recomputes the signed bytes from its own Move structs:
//!
//! ```text
//! struct ID has copy, drop, store { bytes: address }
//! struct CheckInMsg has copy, drop, store { event_id: ID, user: address }
//! ```
//!
//! BCS writes struct fields back to back in declaration order and an
//! `address` as its 32 raw bytes, so the wrapper struct adds nothing and the
//! message is `event_id || user`, 64 bytes. Both sides must agree on this
//! byte-for-byte or every signature check fails on-chain.

use serde::{Deserialize, Serialize};

use crate::error::TransportError;
use crate::types::{ObjectId, SuiAddress, ADDRESS_LENGTH};

/// Encoded length of a [`CheckInMessage`].
pub const CHECK_IN_MESSAGE_LEN: usize = ADDRESS_LENGTH * 2;

/// The fact "(event, user) may check in", as bound by the authority signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CheckInMessage {
    pub event: ObjectId,
    pub user: SuiAddress,
}

impl CheckInMessage {
    pub fn new(event: ObjectId, user: SuiAddress) -> Self {
        Self { event, user }
    }

    /// Encode to the canonical BCS bytes.
    pub fn encode(&self) -> Vec<u8> {
        check_in_bytes(&self.event, &self.user)
    }

    /// Decode canonical bytes produced by [`CheckInMessage::encode`].
    pub fn decode(bytes: &[u8]) -> Result<Self, TransportError> {
        if bytes.len() != CHECK_IN_MESSAGE_LEN {
            return Err(TransportError::InvalidMessageLength {
                expected: CHECK_IN_MESSAGE_LEN,
                actual: bytes.len(),
            });
        }

        let mut event = [0u8; ADDRESS_LENGTH];
        let mut user = [0u8; ADDRESS_LENGTH];
        event.copy_from_slice(&bytes[..ADDRESS_LENGTH]);
        user.copy_from_slice(&bytes[ADDRESS_LENGTH..]);

        Ok(Self {
            event: ObjectId(event),
            user: SuiAddress(user),
        })
    }
}

/// Encode the check-in message for `(event, user)`.
pub fn check_in_bytes(event: &ObjectId, user: &SuiAddress) -> Vec<u8> {
    let mut buf = Vec::with_capacity(CHECK_IN_MESSAGE_LEN);
    // ID { bytes: address }
    buf.extend_from_slice(event.as_bytes());
    // user: address
    buf.extend_from_slice(user.as_bytes());
    buf
}

/// Append a ULEB128-encoded length, as BCS prefixes sequences.
pub fn encode_uleb128(buf: &mut Vec<u8>, mut n: u64) {
    loop {
        let byte = (n & 0x7f) as u8;
        n >>= 7;
        if n == 0 {
            buf.push(byte);
            return;
        }
        buf.push(byte | 0x80);
    }
}

/// Encode a Move `vector<u8>`.
pub fn encode_byte_vector(bytes: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(bytes.len() + 2);
    encode_uleb128(&mut buf, bytes.len() as u64);
    buf.extend_from_slice(bytes);
    buf
}

/// Decode a Move `vector<u8>`, requiring the input to hold exactly one.
pub fn decode_byte_vector(bytes: &[u8]) -> Result<&[u8], TransportError> {
    let mut len: u64 = 0;
    let mut shift = 0u32;
    let mut consumed = 0usize;

    loop {
        let byte = *bytes
            .get(consumed)
            .ok_or(TransportError::MalformedBcs("truncated length prefix"))?;
        consumed += 1;
        if shift >= 63 && byte > 1 {
            return Err(TransportError::MalformedBcs("length prefix overflow"));
        }
        len |= u64::from(byte & 0x7f) << shift;
        if byte & 0x80 == 0 {
            break;
        }
        shift += 7;
    }

    let body = &bytes[consumed..];
    if body.len() as u64 != len {
        return Err(TransportError::MalformedBcs("length prefix does not match body"));
    }
    Ok(body)
}

/// Encode a Move `String` (UTF-8 bytes as a `vector<u8>`).
pub fn encode_string(s: &str) -> Vec<u8> {
    encode_byte_vector(s.as_bytes())
}

/// Encode a Move `u64` (little-endian, fixed width).
pub fn encode_u64(n: u64) -> Vec<u8> {
    n.to_le_bytes().to_vec()
}
