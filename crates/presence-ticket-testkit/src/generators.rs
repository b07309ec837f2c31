//! Proptest generators for property-based testing.

use proptest::prelude::*;

use presence_ticket_core::{
    AuthorityKeypair, Ed25519PublicKey, Issuer, ObjectId, SuiAddress, Ticket, TicketSigner,
};

/// Generate a random keypair.
pub fn keypair() -> impl Strategy<Value = AuthorityKeypair> {
    any::<[u8; 32]>().prop_map(|seed| AuthorityKeypair::from_seed(&seed))
}

/// Generate a random Ed25519PublicKey.
pub fn public_key() -> impl Strategy<Value = Ed25519PublicKey> {
    keypair().prop_map(|kp| kp.public_key())
}

/// Generate a random ObjectId.
pub fn object_id() -> impl Strategy<Value = ObjectId> {
    any::<[u8; 32]>().prop_map(ObjectId::from_bytes)
}

/// Generate a random SuiAddress.
pub fn sui_address() -> impl Strategy<Value = SuiAddress> {
    any::<[u8; 32]>().prop_map(SuiAddress::from_bytes)
}

/// Render 32 bytes in any accepted textual spelling: with or without a
/// `0x`/`0X` prefix, each digit in random case.
pub fn address_spelling(bytes: [u8; 32]) -> impl Strategy<Value = String> {
    let digits = hex::encode(bytes);
    (
        prop_oneof![Just(""), Just("0x"), Just("0X")],
        prop::collection::vec(any::<bool>(), digits.len()),
    )
        .prop_map(move |(prefix, upper)| {
            let body: String = digits
                .chars()
                .zip(upper)
                .map(|(c, up)| if up { c.to_ascii_uppercase() } else { c })
                .collect();
            format!("{}{}", prefix, body)
        })
}

/// Generate identifier text that is never a valid address.
pub fn invalid_identifier() -> impl Strategy<Value = String> {
    prop_oneof![
        // too short or too long
        "(0x)?[0-9a-f]{1,63}".prop_map(String::from),
        "(0x)?[0-9a-f]{65,80}".prop_map(String::from),
        // right length, one non-hex digit
        ("[0-9a-f]{63}", "[g-z]").prop_map(|(hex, bad)| format!("{}{}", hex, bad)),
    ]
}

/// Parameters for issuing a ticket.
#[derive(Debug, Clone)]
pub struct TicketParams {
    pub keypair: AuthorityKeypair,
    pub event: ObjectId,
    pub user: SuiAddress,
}

impl Arbitrary for TicketParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (keypair(), object_id(), sui_address())
            .prop_map(|(keypair, event, user)| TicketParams {
                keypair,
                event,
                user,
            })
            .boxed()
    }
}

/// Issue a ticket from parameters.
pub fn ticket_from_params(params: &TicketParams) -> Ticket {
    Issuer::new(&params.keypair).issue(&params.event, &params.user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use presence_ticket_core::{verify_ticket, TicketEnvelope, TicketLink};

    proptest! {
        #[test]
        fn test_issue_deterministic(params: TicketParams) {
            let t1 = ticket_from_params(&params);
            let t2 = ticket_from_params(&params);
            prop_assert_eq!(t1, t2);
        }

        #[test]
        fn test_spellings_normalize(
            (bytes, text) in any::<[u8; 32]>().prop_flat_map(|b| (Just(b), address_spelling(b))),
        ) {
            prop_assert_eq!(*ObjectId::parse(&text).unwrap().as_bytes(), bytes);
            prop_assert_eq!(*SuiAddress::parse(&text).unwrap().as_bytes(), bytes);
        }

        #[test]
        fn test_invalid_identifiers_rejected(text in invalid_identifier()) {
            prop_assert!(ObjectId::parse(&text).is_err());
        }

        #[test]
        fn test_issued_ticket_verifies_for_bound_pair_only(
            params in any::<TicketParams>(),
            other in sui_address(),
        ) {
            prop_assume!(other != params.user);
            let ticket = ticket_from_params(&params);
            let pk = params.keypair.public_key();

            prop_assert!(verify_ticket(&pk, &ticket, &params.event, &params.user).is_ok());
            prop_assert!(verify_ticket(&pk, &ticket, &params.event, &other).is_err());
        }

        #[test]
        fn test_transport_preserves_ticket(params: TicketParams) {
            let ticket = ticket_from_params(&params);

            let envelope = TicketEnvelope::from_ticket(&ticket);
            prop_assert_eq!(envelope.to_ticket().unwrap(), ticket.clone());

            let url = TicketLink::new(params.event, ticket.clone())
                .to_url("https://checkin.example")
                .unwrap();
            let link = TicketLink::from_url(url.as_str()).unwrap();
            prop_assert_eq!(link.event, Some(params.event));
            prop_assert_eq!(link.ticket, Some(ticket));
        }
    }
}
