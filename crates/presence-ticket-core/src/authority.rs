//! Authority key loading.
//!
//! The issuing process receives its Ed25519 secret from the environment in
//! one of two encodings:
//!
//! - `suiprivkey1...`: the Sui CLI export, bech32 over `flag || secret`
//!   where the flag names the signature scheme;
//! - plain standard base64 of the 32-byte secret, with no scheme flag.
//!
//! The key is loaded once and injected wherever tickets are signed.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use bech32::{Bech32, Hrp};
use std::env::VarError;

use crate::crypto::{AuthorityKeypair, SECRET_KEY_LENGTH};
use crate::error::KeyError;

/// Environment variable holding the authority secret.
pub const SECRET_ENV_VAR: &str = "ADMIN_SECRET_KEY";

/// Human-readable part of a Sui bech32 private key.
pub const SUI_PRIVATE_KEY_PREFIX: &str = "suiprivkey";

const SUI_PRIVATE_KEY_HRP: Hrp = Hrp::parse_unchecked(SUI_PRIVATE_KEY_PREFIX);

/// Scheme flags used by Sui key encodings.
mod flags {
    pub const ED25519: u8 = 0x00;
    pub const SECP256K1: u8 = 0x01;
    pub const SECP256R1: u8 = 0x02;
}

/// The two accepted textual encodings of the authority secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretEncoding {
    /// `suiprivkey1...`, carries a scheme flag and a checksum.
    Bech32,
    /// Standard base64 of the bare secret.
    Base64,
}

impl SecretEncoding {
    /// Decide which decoder a secret belongs to.
    ///
    /// Bech32 strings are recognised by their human-readable part and
    /// separator, case-insensitively; everything else is treated as base64.
    pub fn classify(secret: &str) -> Self {
        let bytes = secret.as_bytes();
        let hrp_len = SUI_PRIVATE_KEY_PREFIX.len();
        if bytes.len() > hrp_len
            && bytes[..hrp_len].eq_ignore_ascii_case(SUI_PRIVATE_KEY_PREFIX.as_bytes())
            && bytes[hrp_len] == b'1'
        {
            SecretEncoding::Bech32
        } else {
            SecretEncoding::Base64
        }
    }
}

/// Load the authority keypair from its textual secret.
///
/// An empty or whitespace-only secret is reported as
/// [`KeyError::NotConfigured`]; anything else that fails to decode is a
/// misconfiguration.
pub fn load_authority_key(secret: &str) -> Result<AuthorityKeypair, KeyError> {
    let secret = secret.trim();
    if secret.is_empty() {
        return Err(KeyError::NotConfigured);
    }

    let seed = match SecretEncoding::classify(secret) {
        SecretEncoding::Bech32 => decode_bech32(secret)?,
        SecretEncoding::Base64 => decode_base64(secret)?,
    };

    Ok(AuthorityKeypair::from_seed(&seed))
}

/// Load the authority keypair from [`SECRET_ENV_VAR`].
///
/// An unset variable is [`KeyError::NotConfigured`]; a value that is set but
/// not UTF-8 is a misconfiguration.
pub fn load_authority_key_from_env() -> Result<AuthorityKeypair, KeyError> {
    load_from_var(std::env::var(SECRET_ENV_VAR))
}

fn load_from_var(var: Result<String, VarError>) -> Result<AuthorityKeypair, KeyError> {
    match var {
        Ok(secret) => load_authority_key(&secret),
        Err(VarError::NotPresent) => Err(KeyError::NotConfigured),
        Err(VarError::NotUnicode(_)) => Err(KeyError::InvalidEncoding),
    }
}

fn decode_bech32(secret: &str) -> Result<[u8; SECRET_KEY_LENGTH], KeyError> {
    let (hrp, data) = bech32::decode(secret).map_err(|e| match e {
        bech32::DecodeError::Checksum(_) => KeyError::InvalidBech32("checksum mismatch"),
        _ => KeyError::InvalidBech32("malformed string"),
    })?;

    if hrp != SUI_PRIVATE_KEY_HRP {
        return Err(KeyError::UnexpectedPrefix);
    }

    let (flag, key) = data.split_first().ok_or(KeyError::InvalidLength {
        expected: SECRET_KEY_LENGTH + 1,
        actual: 0,
    })?;

    match *flag {
        flags::ED25519 => {}
        flags::SECP256K1 => return Err(KeyError::UnsupportedScheme("Secp256k1")),
        flags::SECP256R1 => return Err(KeyError::UnsupportedScheme("Secp256r1")),
        other => return Err(KeyError::UnknownScheme(other)),
    }

    key.try_into().map_err(|_| KeyError::InvalidLength {
        expected: SECRET_KEY_LENGTH + 1,
        actual: data.len(),
    })
}

fn decode_base64(secret: &str) -> Result<[u8; SECRET_KEY_LENGTH], KeyError> {
    let bytes = STANDARD
        .decode(secret)
        .map_err(|_| KeyError::InvalidBase64)?;

    let actual = bytes.len();
    bytes.try_into().map_err(|_| KeyError::InvalidLength {
        expected: SECRET_KEY_LENGTH,
        actual,
    })
}

impl AuthorityKeypair {
    /// Export as a Sui `suiprivkey1...` string.
    pub fn to_bech32(&self) -> String {
        let mut payload = Vec::with_capacity(SECRET_KEY_LENGTH + 1);
        payload.push(flags::ED25519);
        payload.extend_from_slice(&self.seed());
        // 33 bytes is far below the bech32 length limit
        bech32::encode::<Bech32>(SUI_PRIVATE_KEY_HRP, &payload)
            .expect("fixed-size key payload always encodes")
    }

    /// Export as standard base64 of the bare secret.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.seed())
    }
}
