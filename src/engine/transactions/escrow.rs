//! `EscrowCreate`/`EscrowFinish`/`EscrowCancel`: native XRP locked until a
//! time-based release window opens (`spec.md` §3.3). Crypto-condition
//! fulfillment verification is out of scope (`DESIGN.md`): `EscrowFinish`
//! releases on `FinishAfter` alone, never on a `Condition`/`Fulfillment`
//! pair, matching [`crate::ledger::objects::Escrow::can_finish`].

use serde_json::Value;

use crate::engine::common::{self, tx_str, tx_u32};
use crate::engine::config::EngineConfig;
use crate::engine::result::ResultCode;
use crate::engine::transactions::Transactor;
use crate::ledger::directory::DirectoryNode;
use crate::ledger::objects::Escrow;
use crate::ledger::store::{TransactionalView, View};

pub struct EscrowCreate;

impl Transactor for EscrowCreate {
    fn preflight(&self, tx: &Value, _config: &EngineConfig) -> Result<(), ResultCode> {
        let account = tx_str(tx, "Account").ok_or(ResultCode::TemMalformed)?;
        let destination = tx_str(tx, "Destination").ok_or(ResultCode::TemDstNeeded)?;
        if account == destination {
            return Err(ResultCode::TemDstIsSrc);
        }
        common::tx_native_drops(tx, "Amount").ok_or(ResultCode::TemBadAmount)?;
        let finish_after = tx_u32(tx, "FinishAfter");
        let cancel_after = tx_u32(tx, "CancelAfter");
        if finish_after.is_none() && cancel_after.is_none() {
            return Err(ResultCode::TemMalformed);
        }
        if let (Some(finish), Some(cancel)) = (finish_after, cancel_after) {
            if cancel <= finish {
                return Err(ResultCode::TemBadExpiration);
            }
        }
        Ok(())
    }

    fn preclaim(&self, tx: &Value, view: &dyn View, config: &EngineConfig) -> Result<(), ResultCode> {
        let account = tx_str(tx, "Account").ok_or(ResultCode::TemMalformed)?;
        let destination = tx_str(tx, "Destination").ok_or(ResultCode::TemDstNeeded)?;
        common::read_account(view, account)?.ok_or(ResultCode::TerNoAccount)?;
        if common::read_account(view, destination)?.is_none() {
            return Err(ResultCode::TecNoDst);
        }
        let amount = common::tx_native_drops(tx, "Amount").ok_or(ResultCode::TemBadAmount)?;
        let root = common::read_account(view, account)?.ok_or(ResultCode::TerNoAccount)?;
        let reserve = root.reserve(config.reserve_base, config.reserve_increment) + config.reserve_increment;
        if root.balance < amount.saturating_add(reserve) {
            return Err(ResultCode::TecInsufficientReserve);
        }
        Ok(())
    }

    fn apply(
        &self,
        tx: &Value,
        view: &mut dyn TransactionalView,
        config: &EngineConfig,
    ) -> ResultCode {
        let Some(account) = tx_str(tx, "Account") else { return ResultCode::TefFailure };
        let Some(destination) = tx_str(tx, "Destination") else { return ResultCode::TefFailure };
        let Some(sequence) = tx_u32(tx, "Sequence") else { return ResultCode::TefFailure };
        let Some(amount) = common::tx_native_drops(tx, "Amount") else { return ResultCode::TemBadAmount };

        let mut root = match common::read_account(view, account) {
            Ok(Some(root)) => root,
            Ok(None) => return ResultCode::TerNoAccount,
            Err(code) => return code,
        };
        let Some(new_balance) = root.balance.checked_sub(amount) else {
            return ResultCode::TecInsufficientReserve;
        };
        let reserve_after_create =
            root.reserve(config.reserve_base, config.reserve_increment) + config.reserve_increment;
        if new_balance < reserve_after_create {
            return ResultCode::TecInsufficientReserve;
        }

        let escrow_keylet = match common::escrow_keylet(account, sequence) {
            Ok(keylet) => keylet,
            Err(code) => return code,
        };
        let owner_dir = match common::account_owner_dir_keylet(account) {
            Ok(keylet) => keylet,
            Err(code) => return code,
        };
        let owner_node = match DirectoryNode::insert(view, &owner_dir, escrow_keylet) {
            Ok(node) => node,
            Err(_) => return ResultCode::TecDirFull,
        };

        let escrow = Escrow {
            account: account.into(),
            destination: destination.into(),
            amount,
            condition: tx_str(tx, "Condition").map(Into::into),
            cancel_after: tx_u32(tx, "CancelAfter"),
            finish_after: tx_u32(tx, "FinishAfter"),
            owner_node,
        };
        let bytes = match escrow.to_bytes() {
            Ok(bytes) => bytes,
            Err(_) => return ResultCode::TefFailure,
        };
        if view.write(&escrow_keylet, bytes).is_err() {
            return ResultCode::TefFailure;
        }

        root.balance = new_balance;
        root.owner_count = root.owner_count.saturating_add(1);
        match common::write_account(view, &root) {
            Ok(()) => ResultCode::TesSuccess,
            Err(code) => code,
        }
    }
}

/// Shared by `EscrowFinish`/`EscrowCancel`: load the escrow, check that it
/// belongs to `owner`, remove it from the owner directory and decrement
/// `owner`'s owner count.
fn take_escrow(
    owner: &str,
    offer_sequence: u32,
    view: &mut dyn TransactionalView,
) -> Result<Escrow, ResultCode> {
    let escrow_keylet = common::escrow_keylet(owner, offer_sequence)?;
    if !view.exists(&escrow_keylet) {
        return Err(ResultCode::TecNoTarget);
    }
    let bytes = view.read(&escrow_keylet).map_err(|_| ResultCode::TefFailure)?;
    let escrow = Escrow::from_bytes(&bytes).map_err(|_| ResultCode::TefFailure)?;
    if escrow.account != owner {
        return Err(ResultCode::TecNoPermission);
    }
    view.delete(&escrow_keylet).map_err(|_| ResultCode::TefFailure)?;
    let dir = common::account_owner_dir_keylet(owner)?;
    let _ = DirectoryNode::remove(view, &dir, &escrow_keylet);
    Ok(escrow)
}

pub struct EscrowFinish;

impl Transactor for EscrowFinish {
    fn preflight(&self, tx: &Value, _config: &EngineConfig) -> Result<(), ResultCode> {
        tx_str(tx, "Account").ok_or(ResultCode::TemMalformed)?;
        tx_str(tx, "Owner").ok_or(ResultCode::TemMalformed)?;
        tx_u32(tx, "OfferSequence").ok_or(ResultCode::TemBadSequence)?;
        Ok(())
    }

    fn preclaim(&self, tx: &Value, view: &dyn View, config: &EngineConfig) -> Result<(), ResultCode> {
        let account = tx_str(tx, "Account").ok_or(ResultCode::TemMalformed)?;
        let owner = tx_str(tx, "Owner").ok_or(ResultCode::TemMalformed)?;
        let sequence = tx_u32(tx, "OfferSequence").ok_or(ResultCode::TemBadSequence)?;
        common::read_account(view, account)?.ok_or(ResultCode::TerNoAccount)?;
        let escrow_keylet = common::escrow_keylet(owner, sequence)?;
        if !view.exists(&escrow_keylet) {
            return Err(ResultCode::TecNoTarget);
        }
        let bytes = view.read(&escrow_keylet).map_err(|_| ResultCode::TefFailure)?;
        let escrow = Escrow::from_bytes(&bytes).map_err(|_| ResultCode::TefFailure)?;
        if !escrow.can_finish(config.ledger_close_time) {
            return Err(ResultCode::TecNoPermission);
        }
        Ok(())
    }

    fn apply(
        &self,
        tx: &Value,
        view: &mut dyn TransactionalView,
        config: &EngineConfig,
    ) -> ResultCode {
        let Some(owner) = tx_str(tx, "Owner") else { return ResultCode::TefFailure };
        let Some(sequence) = tx_u32(tx, "OfferSequence") else { return ResultCode::TefFailure };

        let escrow = match take_escrow(owner, sequence, view) {
            Ok(escrow) => escrow,
            Err(code) => return code,
        };
        if !escrow.can_finish(config.ledger_close_time) {
            return ResultCode::TecNoPermission;
        }

        let mut owner_root = match common::read_account(view, owner) {
            Ok(Some(root)) => root,
            Ok(None) => return ResultCode::TerNoAccount,
            Err(code) => return code,
        };
        owner_root.owner_count = owner_root.owner_count.saturating_sub(1);
        if let Err(code) = common::write_account(view, &owner_root) {
            return code;
        }

        match common::read_account(view, &escrow.destination) {
            Ok(Some(mut dest)) => {
                dest.balance = match dest.balance.checked_add(escrow.amount) {
                    Some(balance) => balance,
                    None => return ResultCode::TecInternal,
                };
                match common::write_account(view, &dest) {
                    Ok(()) => ResultCode::TesSuccess,
                    Err(code) => code,
                }
            }
            Ok(None) => {
                if escrow.amount < config.reserve_base {
                    return ResultCode::TecNoDstInsufXrp;
                }
                let new_account = crate::ledger::objects::AccountRoot::new(&escrow.destination, escrow.amount);
                match common::write_account(view, &new_account) {
                    Ok(()) => ResultCode::TesSuccess,
                    Err(code) => code,
                }
            }
            Err(code) => code,
        }
    }
}

pub struct EscrowCancel;

impl Transactor for EscrowCancel {
    fn preflight(&self, tx: &Value, _config: &EngineConfig) -> Result<(), ResultCode> {
        tx_str(tx, "Account").ok_or(ResultCode::TemMalformed)?;
        tx_str(tx, "Owner").ok_or(ResultCode::TemMalformed)?;
        tx_u32(tx, "OfferSequence").ok_or(ResultCode::TemBadSequence)?;
        Ok(())
    }

    fn preclaim(&self, tx: &Value, view: &dyn View, config: &EngineConfig) -> Result<(), ResultCode> {
        let account = tx_str(tx, "Account").ok_or(ResultCode::TemMalformed)?;
        let owner = tx_str(tx, "Owner").ok_or(ResultCode::TemMalformed)?;
        let sequence = tx_u32(tx, "OfferSequence").ok_or(ResultCode::TemBadSequence)?;
        common::read_account(view, account)?.ok_or(ResultCode::TerNoAccount)?;
        let escrow_keylet = common::escrow_keylet(owner, sequence)?;
        if !view.exists(&escrow_keylet) {
            return Err(ResultCode::TecNoTarget);
        }
        let bytes = view.read(&escrow_keylet).map_err(|_| ResultCode::TefFailure)?;
        let escrow = Escrow::from_bytes(&bytes).map_err(|_| ResultCode::TefFailure)?;
        if !escrow.can_cancel(config.ledger_close_time) {
            return Err(ResultCode::TecNoPermission);
        }
        Ok(())
    }

    fn apply(
        &self,
        tx: &Value,
        view: &mut dyn TransactionalView,
        config: &EngineConfig,
    ) -> ResultCode {
        let Some(owner) = tx_str(tx, "Owner") else { return ResultCode::TefFailure };
        let Some(sequence) = tx_u32(tx, "OfferSequence") else { return ResultCode::TefFailure };

        let escrow = match take_escrow(owner, sequence, view) {
            Ok(escrow) => escrow,
            Err(code) => return code,
        };
        if !escrow.can_cancel(config.ledger_close_time) {
            return ResultCode::TecNoPermission;
        }

        let mut owner_root = match common::read_account(view, owner) {
            Ok(Some(root)) => root,
            Ok(None) => return ResultCode::TerNoAccount,
            Err(code) => return code,
        };
        owner_root.balance = match owner_root.balance.checked_add(escrow.amount) {
            Some(balance) => balance,
            None => return ResultCode::TecInternal,
        };
        owner_root.owner_count = owner_root.owner_count.saturating_sub(1);
        match common::write_account(view, &owner_root) {
            Ok(()) => ResultCode::TesSuccess,
            Err(code) => code,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ledger::objects::AccountRoot;
    use crate::ledger::store::{MemoryStore, MemoryTransactionalView};
    use serde_json::json;

    const ALICE: &str = "rMBzp8CgpE441cp5PVyA9rpVV7oT8hP3ys";
    const BOB: &str = "rvYAfWj5gh67oV6fW32ZzP3Aw4Eubs59B";

    fn config() -> EngineConfig {
        EngineConfig { base_fee: 10, reserve_base: 10_000_000, reserve_increment: 2_000_000, ledger_close_time: 1000, ..Default::default() }
    }

    fn fund(store: &mut MemoryStore) {
        let mut view = MemoryTransactionalView::new(store);
        common::write_account(&mut view, &AccountRoot::new(ALICE, 100_000_000)).unwrap();
        common::write_account(&mut view, &AccountRoot::new(BOB, 20_000_000)).unwrap();
        view.commit();
    }

    #[test]
    fn create_locks_balance_and_charges_reserve() {
        let mut store = MemoryStore::new();
        fund(&mut store);
        let tx = json!({
            "Account": ALICE, "Destination": BOB, "Amount": "10000000",
            "Sequence": 1, "FinishAfter": 500,
        });
        let mut view = MemoryTransactionalView::new(&mut store);
        assert_eq!(EscrowCreate.apply(&tx, &mut view, &config()), ResultCode::TesSuccess);
        view.commit();
        let alice = common::read_account(&store, ALICE).unwrap().unwrap();
        assert_eq!(alice.balance, 100_000_000 - 10_000_000);
        assert_eq!(alice.owner_count, 1);
    }

    #[test]
    fn finish_before_finish_after_is_rejected_at_preclaim() {
        let mut store = MemoryStore::new();
        fund(&mut store);
        let create_tx = json!({
            "Account": ALICE, "Destination": BOB, "Amount": "10000000",
            "Sequence": 1, "FinishAfter": 5000,
        });
        {
            let mut view = MemoryTransactionalView::new(&mut store);
            EscrowCreate.apply(&create_tx, &mut view, &config());
            view.commit();
        }
        let finish_tx = json!({ "Account": BOB, "Owner": ALICE, "OfferSequence": 1 });
        let err = EscrowFinish.preclaim(&finish_tx, &store, &config()).unwrap_err();
        assert_eq!(err, ResultCode::TecNoPermission);
    }

    #[test]
    fn finish_after_the_window_releases_to_destination() {
        let mut store = MemoryStore::new();
        fund(&mut store);
        let create_tx = json!({
            "Account": ALICE, "Destination": BOB, "Amount": "10000000",
            "Sequence": 1, "FinishAfter": 500,
        });
        {
            let mut view = MemoryTransactionalView::new(&mut store);
            EscrowCreate.apply(&create_tx, &mut view, &config());
            view.commit();
        }
        let finish_tx = json!({ "Account": BOB, "Owner": ALICE, "OfferSequence": 1 });
        let mut view = MemoryTransactionalView::new(&mut store);
        assert_eq!(EscrowFinish.apply(&finish_tx, &mut view, &config()), ResultCode::TesSuccess);
        view.commit();
        let bob = common::read_account(&store, BOB).unwrap().unwrap();
        assert_eq!(bob.balance, 20_000_000 + 10_000_000);
        let alice = common::read_account(&store, ALICE).unwrap().unwrap();
        assert_eq!(alice.owner_count, 0);
    }

    #[test]
    fn cancel_before_cancel_after_is_rejected() {
        let mut store = MemoryStore::new();
        fund(&mut store);
        let create_tx = json!({
            "Account": ALICE, "Destination": BOB, "Amount": "10000000",
            "Sequence": 1, "FinishAfter": 500, "CancelAfter": 600_000,
        });
        {
            let mut view = MemoryTransactionalView::new(&mut store);
            EscrowCreate.apply(&create_tx, &mut view, &config());
            view.commit();
        }
        let cancel_tx = json!({ "Account": ALICE, "Owner": ALICE, "OfferSequence": 1 });
        let err = EscrowCancel.preclaim(&cancel_tx, &store, &config()).unwrap_err();
        assert_eq!(err, ResultCode::TecNoPermission);
    }
}
