//! End-to-end tests across the whole core: chain events in, fills out.
//!
//! These drive the engine exclusively through the event adapter — the way
//! the real system does — and verify the venue-level properties: solvency,
//! conservation, partial fills, time priority, confidentiality round-trip,
//! and replay protection.

use darkswap_engine::{EventAdapter, EventOutcome, SwapEngine};
use darkswap_envelope::{EngineSecret, OrderPayload, seal};
use darkswap_types::{
    Amount, AssetId, ChainEvent, DarkswapError, EngineConfig, Envelope, EventId, UserId,
};

const ALICE: UserId = UserId([1; 20]);
const BOB: UserId = UserId([2; 20]);
const CAROL: UserId = UserId([3; 20]);
const TOKEN_X: AssetId = AssetId([0xaa; 20]);
const TOKEN_Y: AssetId = AssetId([0xbb; 20]);

/// Helper: a venue driven purely by chain events.
struct Venue {
    adapter: EventAdapter,
    next_event: u8,
}

impl Venue {
    fn new() -> Self {
        let engine = SwapEngine::new(EngineSecret::generate(), EngineConfig::default());
        Self {
            adapter: EventAdapter::new(engine),
            next_event: 0,
        }
    }

    fn next_event_id(&mut self) -> EventId {
        self.next_event += 1;
        EventId::new([self.next_event; 32], 0)
    }

    fn deposit(&mut self, user: UserId, asset: AssetId, amount: u128) {
        let id = self.next_event_id();
        self.adapter
            .handle(
                id,
                ChainEvent::Deposit {
                    user,
                    asset,
                    amount: Amount::new(amount),
                },
            )
            .expect("deposit should apply");
    }

    fn seal_intent(
        &self,
        user: UserId,
        give: AssetId,
        give_amount: u128,
        take: AssetId,
        take_amount: u128,
    ) -> Envelope {
        let payload = OrderPayload {
            user,
            give_asset: give,
            give_amount: Amount::new(give_amount),
            take_asset: take,
            take_amount: Amount::new(take_amount),
        };
        seal(&payload, &self.adapter.engine().public_key()).expect("seal should succeed")
    }

    fn submit(
        &mut self,
        user: UserId,
        give: AssetId,
        give_amount: u128,
        take: AssetId,
        take_amount: u128,
    ) -> EventOutcome {
        let envelope = self.seal_intent(user, give, give_amount, take, take_amount);
        let id = self.next_event_id();
        self.adapter
            .handle(id, ChainEvent::SwapSubmitted { user, envelope })
            .expect("submission should be accepted")
    }

    fn balance(&self, user: UserId, asset: AssetId) -> Amount {
        self.adapter.engine().balance_of(user, asset)
    }
}

// =============================================================================
// Test: the canonical partial-fill scenario, driven end to end
// =============================================================================
#[test]
fn e2e_partial_fill_example() {
    let mut venue = Venue::new();
    venue.deposit(ALICE, TOKEN_X, 10);
    venue.deposit(BOB, TOKEN_Y, 4);

    // Alice: give 10 X, take 10 Y. No counterparty yet — no fills.
    let outcome = venue.submit(ALICE, TOKEN_X, 10, TOKEN_Y, 10);
    let EventOutcome::Matched { fills, .. } = outcome else {
        panic!("swap submission must run a pass");
    };
    assert!(fills.is_empty());

    // Bob: give 4 Y, take 4 X. Crosses Alice for a 4/4 fill.
    let outcome = venue.submit(BOB, TOKEN_Y, 4, TOKEN_X, 4);
    let EventOutcome::Matched { fills, .. } = outcome else {
        panic!("swap submission must run a pass");
    };
    assert_eq!(fills.len(), 1);
    assert_eq!(fills[0].maker_user, ALICE);
    assert_eq!(fills[0].taker_user, BOB);
    assert_eq!(fills[0].maker_amount, Amount::new(4));
    assert_eq!(fills[0].taker_amount, Amount::new(4));

    // Bob is fully filled and gone; Alice rests with 6/6.
    let orders = venue.adapter.engine().open_orders();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].user, ALICE);
    assert_eq!(orders[0].give_amount, Amount::new(6));
    assert_eq!(orders[0].take_amount, Amount::new(6));

    assert_eq!(venue.balance(ALICE, TOKEN_X), Amount::new(6));
    assert_eq!(venue.balance(ALICE, TOKEN_Y), Amount::new(4));
    assert_eq!(venue.balance(BOB, TOKEN_X), Amount::new(4));
    assert_eq!(venue.balance(BOB, TOKEN_Y), Amount::ZERO);
}

// =============================================================================
// Test: time priority — the earliest order picks the affordable taker
// =============================================================================
#[test]
fn e2e_priority_goes_to_earliest_affordable_pair() {
    let mut venue = Venue::new();
    venue.deposit(ALICE, TOKEN_X, 10);
    venue.deposit(CAROL, TOKEN_Y, 10);
    // Bob never deposits: his order is unaffordable.

    venue.submit(ALICE, TOKEN_X, 10, TOKEN_Y, 10);
    venue.submit(BOB, TOKEN_Y, 10, TOKEN_X, 10);
    let outcome = venue.submit(CAROL, TOKEN_Y, 10, TOKEN_X, 10);

    let EventOutcome::Matched { fills, .. } = outcome else {
        panic!("swap submission must run a pass");
    };
    assert_eq!(fills.len(), 1);
    assert_eq!(fills[0].maker_user, ALICE);
    assert_eq!(fills[0].taker_user, CAROL);

    // Bob's insolvent order stays open.
    let orders = venue.adapter.engine().open_orders();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].user, BOB);
}

// =============================================================================
// Test: conservation across deposits, swaps, and withdrawals
// =============================================================================
#[test]
fn e2e_supply_is_conserved_through_a_full_session() {
    let mut venue = Venue::new();
    venue.deposit(ALICE, TOKEN_X, 100);
    venue.deposit(BOB, TOKEN_Y, 50);

    venue.submit(ALICE, TOKEN_X, 60, TOKEN_Y, 30);
    venue.submit(BOB, TOKEN_Y, 30, TOKEN_X, 60);

    // Per-asset totals unchanged by matching.
    let total_x = venue.balance(ALICE, TOKEN_X).raw() + venue.balance(BOB, TOKEN_X).raw();
    let total_y = venue.balance(ALICE, TOKEN_Y).raw() + venue.balance(BOB, TOKEN_Y).raw();
    assert_eq!(total_x, 100);
    assert_eq!(total_y, 50);

    // Everyone can withdraw exactly what they hold; one unit more fails.
    let alice_y = venue.balance(ALICE, TOKEN_Y);
    let id = venue.next_event_id();
    venue
        .adapter
        .handle(
            id,
            ChainEvent::Withdraw {
                user: ALICE,
                asset: TOKEN_Y,
                amount: alice_y,
            },
        )
        .unwrap();
    let id = venue.next_event_id();
    let err = venue
        .adapter
        .handle(
            id,
            ChainEvent::Withdraw {
                user: ALICE,
                asset: TOKEN_Y,
                amount: Amount::new(1),
            },
        )
        .unwrap_err();
    assert!(matches!(err, DarkswapError::InsufficientBalance { .. }));
}

// =============================================================================
// Test: replayed events never double-apply
// =============================================================================
#[test]
fn e2e_replayed_events_are_rejected() {
    let mut venue = Venue::new();
    let id = EventId::new([0xee; 32], 7);
    let event = ChainEvent::Deposit {
        user: ALICE,
        asset: TOKEN_X,
        amount: Amount::new(100),
    };

    venue.adapter.handle(id, event.clone()).unwrap();
    let err = venue.adapter.handle(id, event).unwrap_err();
    assert!(matches!(err, DarkswapError::DuplicateEvent(replayed) if replayed == id));
    assert_eq!(venue.balance(ALICE, TOKEN_X), Amount::new(100));

    // Same for a swap submission: the order is not inserted twice.
    venue.deposit(BOB, TOKEN_Y, 5);
    let envelope = venue.seal_intent(BOB, TOKEN_Y, 5, TOKEN_X, 5);
    let swap_id = EventId::new([0xdd; 32], 0);
    let event = ChainEvent::SwapSubmitted {
        user: BOB,
        envelope,
    };
    venue.adapter.handle(swap_id, event.clone()).unwrap();
    let err = venue.adapter.handle(swap_id, event).unwrap_err();
    assert!(matches!(err, DarkswapError::DuplicateEvent(_)));
    // Inserted once, not twice.
    assert_eq!(venue.adapter.engine().open_orders().len(), 1);
}

// =============================================================================
// Test: a bad submission rejects that submission only
// =============================================================================
#[test]
fn e2e_bad_submission_does_not_poison_the_book() {
    let mut venue = Venue::new();
    venue.deposit(ALICE, TOKEN_X, 10);
    venue.deposit(BOB, TOKEN_Y, 10);
    venue.submit(ALICE, TOKEN_X, 10, TOKEN_Y, 10);

    // Garbage envelope → rejected, nothing else changes.
    let id = venue.next_event_id();
    let err = venue
        .adapter
        .handle(
            id,
            ChainEvent::SwapSubmitted {
                user: BOB,
                envelope: Envelope::from_bytes(vec![0u8; 64]),
            },
        )
        .unwrap_err();
    assert!(matches!(err, DarkswapError::DecryptionFailed));
    assert_eq!(venue.adapter.engine().open_orders().len(), 1);

    // Mismatched payer → rejected too.
    let envelope = venue.seal_intent(CAROL, TOKEN_Y, 10, TOKEN_X, 10);
    let id = venue.next_event_id();
    let err = venue
        .adapter
        .handle(id, ChainEvent::SwapSubmitted { user: BOB, envelope })
        .unwrap_err();
    assert!(matches!(err, DarkswapError::UserMismatch { .. }));

    // A well-formed submission from Bob still settles against Alice.
    let outcome = venue.submit(BOB, TOKEN_Y, 10, TOKEN_X, 10);
    let EventOutcome::Matched { fills, .. } = outcome else {
        panic!("swap submission must run a pass");
    };
    assert_eq!(fills.len(), 1);
    assert!(venue.adapter.engine().open_orders().is_empty());
}

// =============================================================================
// Test: multi-party chained settlement in one submission's pass
// =============================================================================
#[test]
fn e2e_one_submission_can_fill_against_multiple_makers() {
    let mut venue = Venue::new();
    venue.deposit(ALICE, TOKEN_Y, 5);
    venue.deposit(BOB, TOKEN_Y, 5);
    venue.deposit(CAROL, TOKEN_X, 10);

    venue.submit(ALICE, TOKEN_Y, 5, TOKEN_X, 5);
    venue.submit(BOB, TOKEN_Y, 5, TOKEN_X, 5);
    let outcome = venue.submit(CAROL, TOKEN_X, 10, TOKEN_Y, 10);

    let EventOutcome::Matched { fills, .. } = outcome else {
        panic!("swap submission must run a pass");
    };
    assert_eq!(fills.len(), 2);
    assert!(venue.adapter.engine().open_orders().is_empty());
    assert_eq!(venue.balance(CAROL, TOKEN_Y), Amount::new(10));
    assert_eq!(venue.balance(ALICE, TOKEN_X), Amount::new(5));
    assert_eq!(venue.balance(BOB, TOKEN_X), Amount::new(5));
}
