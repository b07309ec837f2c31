//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use presence_ticket_core::assembler::memory::SimulatedWallet;
use presence_ticket_core::{
    AuthorityKeypair, Ed25519PublicKey, Issuer, ObjectId, SuiAddress, Ticket, TicketSigner,
    TransactionAssembler,
};

/// Package id the fixtures pretend `event_manager` is deployed at.
pub const PACKAGE_ID: ObjectId = ObjectId::from_bytes([0x0f; 32]);

/// A test fixture with an authority keypair and an assembler.
pub struct TestFixture {
    pub keypair: AuthorityKeypair,
    pub assembler: TransactionAssembler,
}

impl TestFixture {
    /// Create a new test fixture with a random keypair.
    pub fn new() -> Self {
        Self {
            keypair: AuthorityKeypair::generate(),
            assembler: TransactionAssembler::new(PACKAGE_ID),
        }
    }

    /// Create with a deterministic keypair from seed.
    pub fn with_seed(seed: [u8; 32]) -> Self {
        Self {
            keypair: AuthorityKeypair::from_seed(&seed),
            assembler: TransactionAssembler::new(PACKAGE_ID),
        }
    }

    /// Get the keypair's public key.
    pub fn public_key(&self) -> Ed25519PublicKey {
        self.keypair.public_key()
    }

    /// An issuer over this fixture's key.
    pub fn issuer(&self) -> Issuer<'_, AuthorityKeypair> {
        Issuer::new(&self.keypair)
    }

    /// Issue a ticket for `(event, user)`.
    pub fn ticket(&self, event: &ObjectId, user: &SuiAddress) -> Ticket {
        self.issuer().issue(event, user)
    }

    /// A wallet for `user` whose simulated ledger trusts this fixture's key.
    pub fn wallet(&self, user: SuiAddress) -> SimulatedWallet {
        SimulatedWallet::new(user, self.public_key())
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// An event id made of one repeated byte.
pub fn event(byte: u8) -> ObjectId {
    ObjectId::from_bytes([byte; 32])
}

/// A user address made of one repeated byte.
pub fn user(byte: u8) -> SuiAddress {
    SuiAddress::from_bytes([byte; 32])
}

/// Distinct users for multi-attendee tests.
pub fn attendees(count: usize) -> Vec<SuiAddress> {
    (0..count)
        .map(|i| {
            let mut bytes = [0u8; 32];
            bytes[..8].copy_from_slice(&(i as u64 + 1).to_be_bytes());
            SuiAddress::from_bytes(bytes)
        })
        .collect()
}
