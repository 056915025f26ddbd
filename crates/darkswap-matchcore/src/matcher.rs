//! The match pass: a deterministic scan for crossable bilateral pairs.
//!
//! ## Algorithm
//!
//! An O(n²) pairwise scan — a deliberate choice, not an oversight: this is
//! a bilateral swap matcher (each order names the exact pair it wants, no
//! price levels or intermediate routing), books stay small, and the naive
//! scan makes the fairness contract trivially auditable.
//!
//! 1. Walk the book from the earliest open order `A` (outer index `i`)
//! 2. For each later order `B`: crossable iff `A` gives what `B` takes and
//!    takes what `B` gives
//! 3. Fill each side by the minimum of what it offers and what the other
//!    side wants
//! 4. Solvency is checked against the **working ledger** — fills applied
//!    earlier in the same pass count. An insolvent pair is skipped, the
//!    scan continues
//! 5. Two atomic transfers move the fills, amounts shrink, and any order
//!    with a zero amount is removed; the vacated index is re-tested
//! 6. After a match at `i` the inner scan restarts; `i` only advances when
//!    no match is found for it
//!
//! Earlier-submitted orders are always the outer candidate first — that
//! priority of opportunity is the fairness contract.
//!
//! ## Purity
//!
//! Inputs are snapshots; the pass clones them and returns a
//! [`PassOutcome`] the caller commits wholesale. A half-matched book is
//! never observable from outside.

use chrono::Utc;
use darkswap_ledger::Ledger;
use darkswap_types::{Fill, FillId, PassId};

use crate::OrderBook;

/// The result of one match pass: the shrunk book, the settled ledger, and
/// every executed fill, in execution order.
#[derive(Debug, Clone)]
pub struct PassOutcome {
    pub book: OrderBook,
    pub ledger: Ledger,
    pub fills: Vec<Fill>,
}

/// Run one full match pass over snapshots of the book and ledger.
///
/// Deterministic: the same snapshots produce the same fills, including
/// their [`FillId`]s.
#[must_use]
pub fn run_pass(pass: PassId, book: &OrderBook, ledger: &Ledger) -> PassOutcome {
    let mut book = book.clone();
    let mut ledger = ledger.clone();
    let mut fills: Vec<Fill> = Vec::new();
    let mut fill_seq: u64 = 0;

    let mut i = 0;
    while i < book.len() {
        let mut matched = false;

        let mut j = i + 1;
        while j < book.len() {
            // Indexing is safe: i < j < book.len() and the book only
            // shrinks after this point within one iteration.
            let order_a = &book.orders()[i];
            let order_b = &book.orders()[j];

            if !order_a.crosses(order_b) {
                j += 1;
                continue;
            }

            // Each side fills the smaller of what it offers and what the
            // counterparty wants.
            let fill_a = order_a.give_amount.min(order_b.take_amount);
            let fill_b = order_b.give_amount.min(order_a.take_amount);

            let solvent_a = ledger.balance_of(order_a.user, order_a.give_asset) >= fill_a;
            let solvent_b = ledger.balance_of(order_b.user, order_b.give_asset) >= fill_b;
            if !solvent_a || !solvent_b {
                tracing::debug!(
                    maker = %order_a.id,
                    taker = %order_b.id,
                    solvent_a,
                    solvent_b,
                    "skipping insolvent pair"
                );
                j += 1;
                continue;
            }

            let maker = order_a.clone();
            let taker = order_b.clone();

            // Both legs must land or neither; the solvency precheck makes
            // failure unreachable short of u128 overflow, and the
            // checkpoint keeps even that case atomic.
            let checkpoint = ledger.clone();
            let applied = ledger
                .transfer(maker.user, taker.user, maker.give_asset, fill_a)
                .and_then(|()| ledger.transfer(taker.user, maker.user, taker.give_asset, fill_b));
            if let Err(err) = applied {
                tracing::warn!(maker = %maker.id, taker = %taker.id, %err, "fill transfer failed");
                ledger = checkpoint;
                j += 1;
                continue;
            }

            let fill = Fill {
                id: FillId::deterministic(pass.0, fill_seq),
                pass,
                sequence: fill_seq,
                maker_order: maker.id,
                taker_order: taker.id,
                maker_user: maker.user,
                taker_user: taker.user,
                maker_asset: maker.give_asset,
                taker_asset: taker.give_asset,
                maker_amount: fill_a,
                taker_amount: fill_b,
                executed_at: Utc::now(),
            };
            tracing::debug!(
                fill = %fill.id,
                maker = %fill.maker_user,
                taker = %fill.taker_user,
                maker_amount = %fill.maker_amount,
                taker_amount = %fill.taker_amount,
                "executed fill"
            );
            fills.push(fill);
            fill_seq += 1;

            // Shrink both orders; min() bounds each reduction.
            book.set_amounts(
                i,
                maker.give_amount.saturating_sub(fill_a),
                maker.take_amount.saturating_sub(fill_b),
            );
            book.set_amounts(
                j,
                taker.give_amount.saturating_sub(fill_b),
                taker.take_amount.saturating_sub(fill_a),
            );

            // Remove fully filled orders, higher index first so the lower
            // one stays valid. Every successful match zeroes at least one
            // amount, so the book strictly shrinks and the pass terminates.
            let taker_filled = book.orders()[j].is_filled();
            let maker_filled = book.orders()[i].is_filled();
            if taker_filled {
                book.remove_at(j);
            }
            if maker_filled {
                book.remove_at(i);
            }

            matched = true;
            break;
        }

        // On a match, re-examine position i: either the maker is still
        // open with reduced amounts, or the next order slid into its slot.
        if !matched {
            i += 1;
        }
    }

    tracing::info!(
        %pass,
        fills = fills.len(),
        open_orders = book.len(),
        "match pass complete"
    );

    PassOutcome { book, ledger, fills }
}

#[cfg(test)]
mod tests {
    use super::*;
    use darkswap_types::{Amount, AssetId, Order, UserId};

    const TOKEN_X: AssetId = AssetId([0xaa; 20]);
    const TOKEN_Y: AssetId = AssetId([0xbb; 20]);
    const ALICE: UserId = UserId([1; 20]);
    const BOB: UserId = UserId([2; 20]);

    fn funded_ledger(entries: &[(UserId, AssetId, u128)]) -> Ledger {
        let mut ledger = Ledger::new();
        for &(user, asset, amount) in entries {
            ledger.credit(user, asset, Amount::new(amount)).unwrap();
        }
        ledger
    }

    #[test]
    fn partial_fill_shrinks_maker_and_removes_taker() {
        // A: give 10 X, take 10 Y.  B: give 4 Y, take 4 X.
        let mut book = OrderBook::new();
        book.insert(Order::open(ALICE, TOKEN_X, 10, TOKEN_Y, 10, 0));
        book.insert(Order::open(BOB, TOKEN_Y, 4, TOKEN_X, 4, 1));
        let ledger = funded_ledger(&[(ALICE, TOKEN_X, 10), (BOB, TOKEN_Y, 4)]);

        let outcome = run_pass(PassId(1), &book, &ledger);

        assert_eq!(outcome.fills.len(), 1);
        let fill = &outcome.fills[0];
        assert_eq!(fill.maker_amount, Amount::new(4));
        assert_eq!(fill.taker_amount, Amount::new(4));
        assert_eq!(fill.maker_user, ALICE);
        assert_eq!(fill.taker_user, BOB);

        // B fully filled and gone; A shrunk to give 6 / take 6.
        assert_eq!(outcome.book.len(), 1);
        let rest = &outcome.book.orders()[0];
        assert_eq!(rest.user, ALICE);
        assert_eq!(rest.give_amount, Amount::new(6));
        assert_eq!(rest.take_amount, Amount::new(6));

        // Balances moved both ways.
        assert_eq!(outcome.ledger.balance_of(ALICE, TOKEN_X), Amount::new(6));
        assert_eq!(outcome.ledger.balance_of(ALICE, TOKEN_Y), Amount::new(4));
        assert_eq!(outcome.ledger.balance_of(BOB, TOKEN_X), Amount::new(4));
        assert_eq!(outcome.ledger.balance_of(BOB, TOKEN_Y), Amount::ZERO);
    }

    #[test]
    fn exact_cross_removes_both() {
        let mut book = OrderBook::new();
        book.insert(Order::open(ALICE, TOKEN_X, 10, TOKEN_Y, 5, 0));
        book.insert(Order::open(BOB, TOKEN_Y, 5, TOKEN_X, 10, 1));
        let ledger = funded_ledger(&[(ALICE, TOKEN_X, 10), (BOB, TOKEN_Y, 5)]);

        let outcome = run_pass(PassId(1), &book, &ledger);

        assert_eq!(outcome.fills.len(), 1);
        assert!(outcome.book.is_empty());
        assert_eq!(outcome.ledger.balance_of(ALICE, TOKEN_Y), Amount::new(5));
        assert_eq!(outcome.ledger.balance_of(BOB, TOKEN_X), Amount::new(10));
    }

    #[test]
    fn no_cross_leaves_book_untouched() {
        // Same direction, never crossable.
        let mut book = OrderBook::new();
        book.insert(Order::open(ALICE, TOKEN_X, 10, TOKEN_Y, 10, 0));
        book.insert(Order::open(BOB, TOKEN_X, 4, TOKEN_Y, 4, 1));
        let ledger = funded_ledger(&[(ALICE, TOKEN_X, 10), (BOB, TOKEN_X, 4)]);

        let outcome = run_pass(PassId(1), &book, &ledger);

        assert!(outcome.fills.is_empty());
        assert_eq!(outcome.book.orders(), book.orders());
        assert_eq!(outcome.ledger.balance_of(ALICE, TOKEN_X), Amount::new(10));
    }

    #[test]
    fn insolvent_pair_is_skipped_not_fatal() {
        // Alice never deposited; her cross with Bob must be skipped, and
        // the pass still completes with an empty fill list.
        let mut book = OrderBook::new();
        book.insert(Order::open(ALICE, TOKEN_X, 10, TOKEN_Y, 10, 0));
        book.insert(Order::open(BOB, TOKEN_Y, 10, TOKEN_X, 10, 1));
        let ledger = funded_ledger(&[(BOB, TOKEN_Y, 10)]);

        let outcome = run_pass(PassId(1), &book, &ledger);

        assert!(outcome.fills.is_empty());
        assert_eq!(outcome.book.len(), 2);
    }

    #[test]
    fn earlier_order_gets_priority_of_opportunity() {
        // A (earliest) crosses both B and C; only C's owner can pay.
        let carol = UserId([3; 20]);
        let mut book = OrderBook::new();
        book.insert(Order::open(ALICE, TOKEN_X, 10, TOKEN_Y, 10, 0));
        book.insert(Order::open(BOB, TOKEN_Y, 10, TOKEN_X, 10, 1));
        book.insert(Order::open(carol, TOKEN_Y, 10, TOKEN_X, 10, 2));
        let ledger = funded_ledger(&[(ALICE, TOKEN_X, 10), (carol, TOKEN_Y, 10)]);

        let outcome = run_pass(PassId(1), &book, &ledger);

        assert_eq!(outcome.fills.len(), 1);
        assert_eq!(outcome.fills[0].maker_user, ALICE);
        assert_eq!(outcome.fills[0].taker_user, carol);
        // Bob's unaffordable order remains open.
        assert_eq!(outcome.book.len(), 1);
        assert_eq!(outcome.book.orders()[0].user, BOB);
    }

    #[test]
    fn working_ledger_reflects_earlier_fills_in_same_pass() {
        // Alice has exactly 10 X. Her first order consumes it all; her
        // second, identical order must then be skipped as insolvent.
        let carol = UserId([3; 20]);
        let mut book = OrderBook::new();
        book.insert(Order::open(ALICE, TOKEN_X, 10, TOKEN_Y, 10, 0));
        book.insert(Order::open(ALICE, TOKEN_X, 10, TOKEN_Y, 10, 1));
        book.insert(Order::open(BOB, TOKEN_Y, 10, TOKEN_X, 10, 2));
        book.insert(Order::open(carol, TOKEN_Y, 10, TOKEN_X, 10, 3));
        let ledger = funded_ledger(&[
            (ALICE, TOKEN_X, 10),
            (BOB, TOKEN_Y, 10),
            (carol, TOKEN_Y, 10),
        ]);

        let outcome = run_pass(PassId(1), &book, &ledger);

        assert_eq!(outcome.fills.len(), 1);
        // Alice's second order and one counterparty stay open.
        assert_eq!(outcome.book.len(), 2);
        assert_eq!(outcome.ledger.balance_of(ALICE, TOKEN_X), Amount::ZERO);
    }

    #[test]
    fn chained_partial_fills_within_one_pass() {
        // A gives 10 X for 10 Y; B and C each give 5 Y for 5 X. A should
        // fill against both in one pass, oldest counterparty first.
        let carol = UserId([3; 20]);
        let mut book = OrderBook::new();
        book.insert(Order::open(ALICE, TOKEN_X, 10, TOKEN_Y, 10, 0));
        book.insert(Order::open(BOB, TOKEN_Y, 5, TOKEN_X, 5, 1));
        book.insert(Order::open(carol, TOKEN_Y, 5, TOKEN_X, 5, 2));
        let ledger = funded_ledger(&[
            (ALICE, TOKEN_X, 10),
            (BOB, TOKEN_Y, 5),
            (carol, TOKEN_Y, 5),
        ]);

        let outcome = run_pass(PassId(1), &book, &ledger);

        assert_eq!(outcome.fills.len(), 2);
        assert_eq!(outcome.fills[0].taker_user, BOB);
        assert_eq!(outcome.fills[1].taker_user, carol);
        assert!(outcome.book.is_empty());
        assert_eq!(outcome.ledger.balance_of(ALICE, TOKEN_Y), Amount::new(10));
        assert_eq!(outcome.ledger.balance_of(BOB, TOKEN_X), Amount::new(5));
        assert_eq!(outcome.ledger.balance_of(carol, TOKEN_X), Amount::new(5));
    }

    #[test]
    fn pass_is_deterministic_including_fill_ids() {
        let mut book = OrderBook::new();
        book.insert(Order::open(ALICE, TOKEN_X, 10, TOKEN_Y, 10, 0));
        book.insert(Order::open(BOB, TOKEN_Y, 10, TOKEN_X, 10, 1));
        let ledger = funded_ledger(&[(ALICE, TOKEN_X, 10), (BOB, TOKEN_Y, 10)]);

        let first = run_pass(PassId(7), &book, &ledger);
        let second = run_pass(PassId(7), &book, &ledger);

        assert_eq!(first.fills.len(), second.fills.len());
        for (a, b) in first.fills.iter().zip(&second.fills) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.maker_amount, b.maker_amount);
            assert_eq!(a.taker_amount, b.taker_amount);
        }
    }

    #[test]
    fn inputs_are_untouched_snapshots() {
        let mut book = OrderBook::new();
        book.insert(Order::open(ALICE, TOKEN_X, 10, TOKEN_Y, 10, 0));
        book.insert(Order::open(BOB, TOKEN_Y, 10, TOKEN_X, 10, 1));
        let ledger = funded_ledger(&[(ALICE, TOKEN_X, 10), (BOB, TOKEN_Y, 10)]);

        let _ = run_pass(PassId(1), &book, &ledger);

        assert_eq!(book.len(), 2);
        assert_eq!(ledger.balance_of(ALICE, TOKEN_X), Amount::new(10));
        assert_eq!(ledger.balance_of(BOB, TOKEN_Y), Amount::new(10));
    }

    #[test]
    fn conservation_holds_across_a_pass() {
        let mut book = OrderBook::new();
        book.insert(Order::open(ALICE, TOKEN_X, 10, TOKEN_Y, 10, 0));
        book.insert(Order::open(BOB, TOKEN_Y, 4, TOKEN_X, 4, 1));
        let ledger = funded_ledger(&[(ALICE, TOKEN_X, 10), (BOB, TOKEN_Y, 4)]);

        let outcome = run_pass(PassId(1), &book, &ledger);

        for asset in [TOKEN_X, TOKEN_Y] {
            assert_eq!(
                outcome.ledger.total_supply(asset).unwrap(),
                ledger.total_supply(asset).unwrap()
            );
        }
    }
}
