//! The straight-line Preflight → Preclaim → Apply state machine
//! (`spec.md` §4.7, design note §9: "model as explicit stage returns").
//! `submit` is the external boundary named in `spec.md` §6.3.

use serde_json::Value;

use crate::engine::common::{self, tx_str};
use crate::engine::config::EngineConfig;
use crate::engine::result::{EngineResult, ResultCode};
use crate::engine::transactions::{batch, dispatch};
use crate::ledger::store::{ScratchView, TransactionalView, View};

/// Load the submitting account and check its `Sequence`/`TicketSequence`
/// against the view, shared by the outer pipeline and by each `Batch` inner
/// (`spec.md` §4.7/§4.8).
pub(crate) fn check_tx_sequence(tx: &Value, view: &dyn View) -> Result<(), ResultCode> {
    let address = tx_str(tx, "Account").ok_or(ResultCode::TemMalformed)?;
    let account = common::read_account(view, address)?.ok_or(ResultCode::TerNoAccount)?;
    common::check_sequence(tx, view, &account)
}

/// Submit one transaction against `view` under `config`. Always returns an
/// `EngineResult`; never panics on a live input (`spec.md` §7).
///
/// Stages, in order:
/// 1. Preflight — stateless shape validation; `Tem*` only.
/// 2. Preclaim — read-only against `view`; `Tef*`/`Ter*`/`Tec*` or pass.
/// 3. Charge the fee and consume the sequence/ticket — this always lands
///    once Preclaim has passed, regardless of what Apply goes on to do.
/// 4. Apply, inside a nested [`ScratchView`] so a `Tec*` outcome rolls back
///    only the transaction's own mutations, keeping the fee/sequence charge
///    from step 3 (`spec.md` §8.1: "For class Tec, only the fee and the
///    owner's sequence differ").
pub fn submit(tx: &Value, view: &mut dyn TransactionalView, config: &EngineConfig) -> EngineResult {
    let Some(transaction_type) = tx_str(tx, "TransactionType") else {
        return EngineResult::from_code(ResultCode::TemMalformed);
    };
    let Some(transactor) = dispatch(transaction_type) else {
        return EngineResult::from_code(ResultCode::TemMalformed);
    };

    if let Err(code) = transactor.preflight(tx, config) {
        log::debug!("{transaction_type} rejected at preflight: {code}");
        return EngineResult::from_code(code);
    }

    if let Err(code) = check_tx_sequence(tx, view) {
        log::debug!("{transaction_type} rejected on sequence check: {code}");
        return EngineResult::from_code(code);
    }

    if let Err(code) = transactor.preclaim(tx, view, config) {
        log::debug!("{transaction_type} rejected at preclaim: {code}");
        return EngineResult::from_code(code);
    }

    let fee = common::tx_native_drops(tx, "Fee").unwrap_or(config.base_fee);
    if let Err(code) = common::charge_fee_and_consume_sequence(tx, view, fee) {
        log::warn!("{transaction_type} failed its always-applied fee/sequence charge: {code}");
        return EngineResult::from_code(code);
    }

    // `Batch` is the one transaction type whose `apply` produces more than
    // a single result code: the engine boundary reports the outer code
    // plus the per-inner codes (`spec.md` §7). Every other type runs
    // through the generic `Transactor` dispatch.
    let (code, inner_results) = if transaction_type == "Batch" {
        let mut scratch = ScratchView::new(view);
        let (code, inner_codes) = batch::apply_batch(tx, &mut scratch, config);
        if code.success() {
            scratch.commit();
        } else {
            scratch.abandon();
        }
        (code, Some(inner_codes))
    } else {
        let mut scratch = ScratchView::new(view);
        let code = transactor.apply(tx, &mut scratch, config);
        if code.success() {
            scratch.commit();
        } else {
            scratch.abandon();
        }
        (code, None)
    };

    log::debug!("{transaction_type} applied with result {code}");
    EngineResult { code, message: None, inner_results }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ledger::objects::AccountRoot;
    use crate::ledger::store::MemoryStore;
    use serde_json::json;

    const ALICE: &str = "rMBzp8CgpE441cp5PVyA9rpVV7oT8hP3ys";
    const BOB: &str = "rvYAfWj5gh67oV6fW32ZzP3Aw4Eubs59B";

    fn config() -> EngineConfig {
        EngineConfig { base_fee: 10, reserve_base: 10_000_000, reserve_increment: 2_000_000, ..Default::default() }
    }

    #[test]
    fn successful_payment_charges_fee_and_advances_sequence() {
        let mut store = MemoryStore::new();
        {
            let mut view = crate::ledger::store::MemoryTransactionalView::new(&mut store);
            common::write_account(&mut view, &AccountRoot::new(ALICE, 100_000_000)).unwrap();
            common::write_account(&mut view, &AccountRoot::new(BOB, 20_000_000)).unwrap();
            view.commit();
        }
        let tx = json!({
            "TransactionType": "Payment",
            "Account": ALICE,
            "Destination": BOB,
            "Amount": "5000000",
            "Sequence": 1,
            "Fee": "10",
        });
        let mut view = crate::ledger::store::MemoryTransactionalView::new(&mut store);
        let result = submit(&tx, &mut view, &config());
        assert_eq!(result.code, ResultCode::TesSuccess);
        assert!(result.success());
        assert!(result.applied());
        view.commit();

        let alice = common::read_account(&store, ALICE).unwrap().unwrap();
        assert_eq!(alice.sequence, 2);
        assert_eq!(alice.balance, 100_000_000 - 5_000_000 - 10);
    }

    #[test]
    fn tec_outcome_keeps_the_fee_and_sequence_but_rolls_back_the_mutation() {
        let mut store = MemoryStore::new();
        {
            let mut view = crate::ledger::store::MemoryTransactionalView::new(&mut store);
            common::write_account(&mut view, &AccountRoot::new(ALICE, 20_000_000)).unwrap();
            view.commit();
        }
        let carol = "rU4ArSyPfzfTW8RJiiJvuj1FTsi2seLjp7";
        let tx = json!({
            "TransactionType": "Payment",
            "Account": ALICE,
            "Destination": carol,
            "Amount": "1",
            "Sequence": 1,
            "Fee": "10",
        });
        let mut view = crate::ledger::store::MemoryTransactionalView::new(&mut store);
        let result = submit(&tx, &mut view, &config());
        assert_eq!(result.code, ResultCode::TecNoDstInsufXrp);
        assert!(!result.success());
        assert!(result.applied());
        view.commit();

        let alice = common::read_account(&store, ALICE).unwrap().unwrap();
        assert_eq!(alice.sequence, 2);
        assert_eq!(alice.balance, 20_000_000 - 10);
        assert!(!common::account_keylet(carol).ok().map(|k| store.exists(&k)).unwrap_or(false));
    }

    #[test]
    fn malformed_transaction_type_is_rejected_before_any_mutation() {
        let mut store = MemoryStore::new();
        let tx = json!({ "TransactionType": "NotARealType", "Account": ALICE });
        let mut view = crate::ledger::store::MemoryTransactionalView::new(&mut store);
        let result = submit(&tx, &mut view, &config());
        assert_eq!(result.code, ResultCode::TemMalformed);
        assert!(!result.applied());
    }

    #[test]
    fn wrong_sequence_is_rejected_at_preclaim_without_charging_a_fee() {
        let mut store = MemoryStore::new();
        {
            let mut view = crate::ledger::store::MemoryTransactionalView::new(&mut store);
            common::write_account(&mut view, &AccountRoot::new(ALICE, 100_000_000)).unwrap();
            common::write_account(&mut view, &AccountRoot::new(BOB, 20_000_000)).unwrap();
            view.commit();
        }
        let tx = json!({
            "TransactionType": "Payment",
            "Account": ALICE,
            "Destination": BOB,
            "Amount": "1",
            "Sequence": 99,
            "Fee": "10",
        });
        let mut view = crate::ledger::store::MemoryTransactionalView::new(&mut store);
        let result = submit(&tx, &mut view, &config());
        assert_eq!(result.code, ResultCode::TerPreSeq);
        view.commit();
        let alice = common::read_account(&store, ALICE).unwrap().unwrap();
        assert_eq!(alice.sequence, 1);
        assert_eq!(alice.balance, 100_000_000);
    }
}
