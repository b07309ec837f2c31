//! Transaction assembly for the `event_manager` ledger program.
//!
//! The assembler only builds calls. Signing and submission belong to the
//! user's wallet, reached through the [`WalletAgent`] trait.

use async_trait::async_trait;
use std::fmt;
use tracing::{info, warn};

use crate::canonical::{encode_byte_vector, encode_string, encode_u64};
use crate::error::{SubmissionError, ValidationError};
use crate::issuer::Ticket;
use crate::types::{ObjectId, SuiAddress};

/// Module holding the check-in entry points.
pub const MODULE: &str = "event_manager";

/// Entry point that redeems a ticket.
pub const CHECK_IN_FUNCTION: &str = "check_in_secure";

/// Entry point that creates a shared event object.
pub const CREATE_EVENT_FUNCTION: &str = "create_event";

/// Struct minted as proof of attendance.
pub const ATTENDANCE_NFT_STRUCT: &str = "AttendanceNFT";

/// A single argument to a Move call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallArg {
    /// A shared object, by id.
    SharedObject { id: ObjectId, mutable: bool },
    /// A BCS-encoded pure value.
    Pure(Vec<u8>),
}

/// A Move call ready to hand to a wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveCall {
    pub package: ObjectId,
    pub module: &'static str,
    pub function: &'static str,
    pub arguments: Vec<CallArg>,
    pub sender: Option<SuiAddress>,
}

impl MoveCall {
    /// `package::module::function`
    pub fn target(&self) -> String {
        format!("{}::{}::{}", self.package, self.module, self.function)
    }

    /// Set the sender explicitly so the transaction is fully formed.
    pub fn with_sender(mut self, sender: SuiAddress) -> Self {
        self.sender = Some(sender);
        self
    }
}

impl fmt::Display for MoveCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({} args)", self.target(), self.arguments.len())
    }
}

/// Builds calls into a deployed `event_manager` package.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionAssembler {
    package: ObjectId,
}

impl TransactionAssembler {
    pub fn new(package: ObjectId) -> Self {
        Self { package }
    }

    pub fn package(&self) -> ObjectId {
        self.package
    }

    /// Build `check_in_secure(&mut Event, vector<u8>, vector<u8>, &Clock)`.
    ///
    /// The argument order is fixed by the program. A reordered call is not
    /// rejected at assembly time; it just fails the on-chain signature check.
    pub fn check_in(&self, event: &ObjectId, ticket: &Ticket) -> MoveCall {
        MoveCall {
            package: self.package,
            module: MODULE,
            function: CHECK_IN_FUNCTION,
            arguments: vec![
                CallArg::SharedObject {
                    id: *event,
                    mutable: true,
                },
                CallArg::Pure(encode_byte_vector(ticket.signature.as_bytes())),
                CallArg::Pure(encode_byte_vector(&ticket.message)),
                CallArg::SharedObject {
                    id: ObjectId::CLOCK,
                    mutable: false,
                },
            ],
            sender: None,
        }
    }

    /// Build `create_event(String, String, u64)`.
    pub fn create_event(
        &self,
        name: &str,
        location: &str,
        max_capacity: u64,
    ) -> Result<MoveCall, ValidationError> {
        let name = name.trim();
        let location = location.trim();

        if name.is_empty() {
            return Err(ValidationError::Missing("name"));
        }
        if location.is_empty() {
            return Err(ValidationError::Missing("location"));
        }
        if max_capacity == 0 {
            return Err(ValidationError::InvalidArgument {
                field: "max_capacity",
                reason: "must be greater than zero".into(),
            });
        }

        Ok(MoveCall {
            package: self.package,
            module: MODULE,
            function: CREATE_EVENT_FUNCTION,
            arguments: vec![
                CallArg::Pure(encode_string(name)),
                CallArg::Pure(encode_string(location)),
                CallArg::Pure(encode_u64(max_capacity)),
            ],
            sender: None,
        })
    }

    /// Struct tag for querying a user's attendance receipts.
    pub fn attendance_nft_type(&self) -> String {
        format!("{}::{}::{}", self.package, MODULE, ATTENDANCE_NFT_STRUCT)
    }
}

/// Result of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// Transaction digest reported by the wallet.
    pub digest: String,
    /// Objects created by the transaction, in ledger order.
    pub created: Vec<ObjectId>,
}

/// The user's wallet: holds the private key and submits transactions.
#[async_trait]
pub trait WalletAgent: Send + Sync {
    /// The connected account, if any.
    fn active_account(&self) -> Option<SuiAddress>;

    /// Ask the wallet to authorize, sign and execute a call.
    async fn sign_and_execute(&self, call: MoveCall) -> Result<Submission, SubmissionError>;
}

/// Hand a call to the wallet exactly once.
///
/// The sender is set to the wallet's active account. Failures are returned
/// unchanged; resubmitting a consumed ticket would fail the same way.
pub async fn submit<W: WalletAgent + ?Sized>(
    wallet: &W,
    call: MoveCall,
) -> Result<Submission, SubmissionError> {
    let sender = wallet
        .active_account()
        .ok_or(SubmissionError::WalletNotConnected)?;
    let call = call.with_sender(sender);
    let target = call.target();

    info!(%target, %sender, "submitting transaction to wallet");
    match wallet.sign_and_execute(call).await {
        Ok(submission) => {
            info!(%target, digest = %submission.digest, "transaction executed");
            Ok(submission)
        }
        Err(e) => {
            warn!(%target, error = %e, "transaction rejected");
            Err(e)
        }
    }
}

/// An in-process wallet backed by a simulated ledger, for tests and demos.
pub mod memory {
    use super::*;
    use std::collections::HashSet;
    use tokio::sync::Mutex;

    use crate::canonical::decode_byte_vector;
    use crate::crypto::{Ed25519PublicKey, Ed25519Signature, SIGNATURE_LENGTH};
    use crate::validation::verify_ticket;

    #[derive(Default)]
    struct LedgerState {
        checked_in: HashSet<(ObjectId, SuiAddress)>,
        submitted: Vec<MoveCall>,
        next_object: u64,
    }

    /// A wallet whose "ledger" enforces what `check_in_secure` enforces:
    /// the authority signature, the event/user binding and one check-in per
    /// `(event, user)`.
    pub struct SimulatedWallet {
        account: Option<SuiAddress>,
        authority: Ed25519PublicKey,
        state: Mutex<LedgerState>,
    }

    impl SimulatedWallet {
        pub fn new(account: SuiAddress, authority: Ed25519PublicKey) -> Self {
            Self {
                account: Some(account),
                authority,
                state: Mutex::new(LedgerState::default()),
            }
        }

        /// A wallet with no connected account.
        pub fn disconnected(authority: Ed25519PublicKey) -> Self {
            Self {
                account: None,
                authority,
                state: Mutex::new(LedgerState::default()),
            }
        }

        /// Every call the wallet was asked to execute, accepted or not.
        pub async fn submitted(&self) -> Vec<MoveCall> {
            self.state.lock().await.submitted.clone()
        }

        /// Whether `user` has checked in to `event`.
        pub async fn is_checked_in(&self, event: &ObjectId, user: &SuiAddress) -> bool {
            self.state.lock().await.checked_in.contains(&(*event, *user))
        }

        fn decode_check_in(call: &MoveCall) -> Result<(ObjectId, Ticket), SubmissionError> {
            let fail = |reason: &str| SubmissionError::ExecutionFailed(reason.to_string());

            let (event, sig, msg) = match call.arguments.as_slice() {
                [CallArg::SharedObject {
                    id: event,
                    mutable: true,
                }, CallArg::Pure(sig), CallArg::Pure(msg), CallArg::SharedObject {
                    id: clock,
                    mutable: false,
                }] if *clock == ObjectId::CLOCK => (*event, sig, msg),
                _ => return Err(fail("argument type mismatch")),
            };

            let sig = decode_byte_vector(sig).map_err(|e| fail(&e.to_string()))?;
            let msg = decode_byte_vector(msg).map_err(|e| fail(&e.to_string()))?;
            let sig: [u8; SIGNATURE_LENGTH] =
                sig.try_into().map_err(|_| fail("invalid signature length"))?;

            Ok((event, Ticket::new(Ed25519Signature(sig), msg.to_vec())))
        }
    }

    #[async_trait]
    impl WalletAgent for SimulatedWallet {
        fn active_account(&self) -> Option<SuiAddress> {
            self.account
        }

        async fn sign_and_execute(&self, call: MoveCall) -> Result<Submission, SubmissionError> {
            let sender = call.sender.ok_or(SubmissionError::WalletNotConnected)?;
            let mut state = self.state.lock().await;
            state.submitted.push(call.clone());
            state.next_object += 1;
            let digest = format!("{:064x}", state.next_object);

            match call.function {
                CHECK_IN_FUNCTION => {
                    let (event, ticket) = Self::decode_check_in(&call)?;
                    let message = verify_ticket(&self.authority, &ticket, &event, &sender)
                        .map_err(|e| SubmissionError::ExecutionFailed(e.to_string()))?;

                    if !state.checked_in.insert((message.event, message.user)) {
                        return Err(SubmissionError::ExecutionFailed(
                            "already checked in".to_string(),
                        ));
                    }

                    let mut nft = [0u8; 32];
                    nft[24..].copy_from_slice(&state.next_object.to_be_bytes());
                    Ok(Submission {
                        digest,
                        created: vec![ObjectId(nft)],
                    })
                }
                CREATE_EVENT_FUNCTION => {
                    let mut id = [0u8; 32];
                    id[24..].copy_from_slice(&state.next_object.to_be_bytes());
                    Ok(Submission {
                        digest,
                        created: vec![ObjectId(id)],
                    })
                }
                other => Err(SubmissionError::ExecutionFailed(format!(
                    "unknown function {}",
                    other
                ))),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::memory::SimulatedWallet;
    use super::*;
    use crate::crypto::{AuthorityKeypair, TicketSigner};
    use crate::issuer::Issuer;

    fn package() -> ObjectId {
        ObjectId::from_bytes([0x0f; 32])
    }

    fn setup() -> (AuthorityKeypair, ObjectId, SuiAddress, Ticket) {
        let keypair = AuthorityKeypair::from_seed(&[0x42; 32]);
        let event = ObjectId::from_bytes([0xaa; 32]);
        let user = SuiAddress::from_bytes([0xbb; 32]);
        let ticket = Issuer::new(&keypair).issue(&event, &user);
        (keypair, event, user, ticket)
    }

    #[test]
    fn test_check_in_argument_order() {
        let (_, event, _, ticket) = setup();
        let call = TransactionAssembler::new(package()).check_in(&event, &ticket);

        assert_eq!(
            call.target(),
            format!("{}::event_manager::check_in_secure", package())
        );
        assert_eq!(call.arguments.len(), 4);
        assert_eq!(
            call.arguments[0],
            CallArg::SharedObject {
                id: event,
                mutable: true
            }
        );
        assert_eq!(
            call.arguments[1],
            CallArg::Pure(encode_byte_vector(ticket.signature.as_bytes()))
        );
        assert_eq!(
            call.arguments[2],
            CallArg::Pure(encode_byte_vector(&ticket.message))
        );
        assert_eq!(
            call.arguments[3],
            CallArg::SharedObject {
                id: ObjectId::CLOCK,
                mutable: false
            }
        );
        assert_eq!(call.sender, None);
    }

    #[test]
    fn test_create_event_validation() {
        let assembler = TransactionAssembler::new(package());
        assert_eq!(
            assembler.create_event("  ", "Hall A", 10).unwrap_err(),
            ValidationError::Missing("name")
        );
        assert_eq!(
            assembler.create_event("Meetup", "", 10).unwrap_err(),
            ValidationError::Missing("location")
        );
        assert!(assembler.create_event("Meetup", "Hall A", 0).is_err());

        let call = assembler.create_event(" Meetup ", "Hall A", 100).unwrap();
        assert_eq!(call.function, CREATE_EVENT_FUNCTION);
        assert_eq!(call.arguments[0], CallArg::Pure(encode_string("Meetup")));
        assert_eq!(call.arguments[2], CallArg::Pure(encode_u64(100)));
    }

    #[test]
    fn test_attendance_nft_type() {
        let assembler = TransactionAssembler::new(package());
        assert!(assembler
            .attendance_nft_type()
            .ends_with("::event_manager::AttendanceNFT"));
    }

    #[tokio::test]
    async fn test_submit_sets_sender_and_checks_in_once() {
        let (keypair, event, user, ticket) = setup();
        let wallet = SimulatedWallet::new(user, keypair.public_key());
        let call = TransactionAssembler::new(package()).check_in(&event, &ticket);

        let first = submit(&wallet, call.clone()).await.unwrap();
        assert_eq!(first.created.len(), 1);
        assert!(wallet.is_checked_in(&event, &user).await);

        // A second valid ticket for the same pair is harmless: the ledger refuses it.
        let again = Issuer::new(&keypair).issue(&event, &user);
        let second_call = TransactionAssembler::new(package()).check_in(&event, &again);
        let err = submit(&wallet, second_call).await.unwrap_err();
        assert_eq!(
            err,
            SubmissionError::ExecutionFailed("already checked in".into())
        );

        let submitted = wallet.submitted().await;
        assert_eq!(submitted.len(), 2);
        assert_eq!(submitted[0].sender, Some(user));
    }

    #[tokio::test]
    async fn test_ticket_for_someone_else_fails_on_ledger() {
        let (keypair, event, _, ticket) = setup();
        let thief = SuiAddress::from_bytes([0xcc; 32]);
        let wallet = SimulatedWallet::new(thief, keypair.public_key());
        let call = TransactionAssembler::new(package()).check_in(&event, &ticket);

        let err = submit(&wallet, call).await.unwrap_err();
        assert!(matches!(err, SubmissionError::ExecutionFailed(_)));
        assert!(!wallet.is_checked_in(&event, &thief).await);
    }

    #[tokio::test]
    async fn test_reordered_arguments_fail_on_ledger() {
        let (keypair, event, user, ticket) = setup();
        let wallet = SimulatedWallet::new(user, keypair.public_key());
        let mut call = TransactionAssembler::new(package()).check_in(&event, &ticket);
        call.arguments.swap(1, 2);

        assert!(submit(&wallet, call).await.is_err());
        assert!(!wallet.is_checked_in(&event, &user).await);
    }

    #[tokio::test]
    async fn test_disconnected_wallet() {
        let (keypair, event, _, ticket) = setup();
        let wallet = SimulatedWallet::disconnected(keypair.public_key());
        let call = TransactionAssembler::new(package()).check_in(&event, &ticket);

        assert_eq!(
            submit(&wallet, call).await.unwrap_err(),
            SubmissionError::WalletNotConnected
        );
        assert!(wallet.submitted().await.is_empty());
    }

    #[tokio::test]
    async fn test_create_event_returns_created_object() {
        let keypair = AuthorityKeypair::generate();
        let organizer = SuiAddress::from_bytes([0x01; 32]);
        let wallet = SimulatedWallet::new(organizer, keypair.public_key());
        let call = TransactionAssembler::new(package())
            .create_event("Meetup", "Hall A", 50)
            .unwrap();

        let submission = submit(&wallet, call).await.unwrap();
        assert_eq!(submission.created.len(), 1);
        assert_eq!(submission.digest.len(), 64);
    }
}
