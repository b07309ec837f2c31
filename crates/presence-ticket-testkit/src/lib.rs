//! # Presence Ticket Testkit
//!
//! Testing utilities for presence tickets.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Fixed keys and tickets with expected bytes for cross-implementation checks
//! - **Generators**: Proptest strategies for identifiers, keys and tickets
//! - **Fixtures**: An authority, an assembler and simulated wallets for end-to-end scenarios
//!
//! ## Golden Vectors
//!
//! ```rust
//! use presence_ticket_testkit::vectors::verify_all_vectors;
//!
//! for (name, matches, detail) in verify_all_vectors() {
//!     assert!(matches, "{}: {}", name, detail);
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use presence_ticket_testkit::generators::{ticket_from_params, TicketParams};
//!
//! proptest! {
//!     #[test]
//!     fn issuance_is_deterministic(params: TicketParams) {
//!         prop_assert_eq!(ticket_from_params(&params), ticket_from_params(&params));
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use presence_ticket_testkit::fixtures::{event, user, TestFixture};
//!
//! let fixture = TestFixture::new();
//! let ticket = fixture.ticket(&event(0xaa), &user(0xbb));
//! assert!(ticket.verify_signature(&fixture.public_key()));
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{attendees, TestFixture, PACKAGE_ID};
pub use generators::{ticket_from_params, TicketParams};
pub use vectors::{key_vectors, ticket_vectors, verify_all_vectors, KeyVector, TicketVector};
