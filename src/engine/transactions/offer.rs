//! `OfferCreate`/`OfferCancel`: resting-order object lifecycle only. This
//! core does not cross offers against a live order book — no matching
//! engine, no `BookDirectory` indexing — so every `OfferCreate` either
//! creates an un-crossed resting `Offer` or is rejected; `OfferCancel`
//! simply removes one (`DESIGN.md`).

use serde_json::Value;

use crate::engine::common::{self, tx_str, tx_u32};
use crate::engine::config::EngineConfig;
use crate::engine::result::ResultCode;
use crate::engine::transactions::Transactor;
use crate::ledger::directory::DirectoryNode;
use crate::ledger::objects::offer::OfferAmount;
use crate::ledger::objects::{AccountRoot, Offer};
use crate::ledger::store::{TransactionalView, View};

pub struct OfferCreate;

fn same_asset(a: &OfferAmount, b: &OfferAmount) -> bool {
    match (a, b) {
        (OfferAmount::Native(_), OfferAmount::Native(_)) => true,
        (
            OfferAmount::Issued { currency: c1, issuer: i1, .. },
            OfferAmount::Issued { currency: c2, issuer: i2, .. },
        ) => c1 == c2 && i1 == i2,
        _ => false,
    }
}

/// Remove account's resting offer at `sequence`, if any. Silent no-op if
/// it doesn't exist — both `OfferCancel` and an `OfferCreate` carrying a
/// redundant `OfferSequence` rely on this being idempotent.
fn cancel_offer(
    account: &str,
    sequence: u32,
    view: &mut dyn TransactionalView,
    root: &mut AccountRoot,
) -> Result<(), ResultCode> {
    let offer_keylet = common::offer_keylet(account, sequence)?;
    if !view.exists(&offer_keylet) {
        return Ok(());
    }
    view.delete(&offer_keylet).map_err(|_| ResultCode::TefFailure)?;
    let owner_dir = common::account_owner_dir_keylet(account)?;
    let _ = DirectoryNode::remove(view, &owner_dir, &offer_keylet);
    root.owner_count = root.owner_count.saturating_sub(1);
    Ok(())
}

impl Transactor for OfferCreate {
    fn preflight(&self, tx: &Value, _config: &EngineConfig) -> Result<(), ResultCode> {
        tx_str(tx, "Account").ok_or(ResultCode::TemMalformed)?;
        let pays = common::parse_amount(tx, "TakerPays")?;
        let gets = common::parse_amount(tx, "TakerGets")?;
        if same_asset(&pays, &gets) {
            return Err(ResultCode::TemRedundant);
        }
        Ok(())
    }

    fn preclaim(&self, tx: &Value, view: &dyn View, config: &EngineConfig) -> Result<(), ResultCode> {
        let account = tx_str(tx, "Account").ok_or(ResultCode::TemMalformed)?;
        if let Some(expiration) = tx_u32(tx, "Expiration") {
            if config.ledger_close_time >= expiration {
                return Err(ResultCode::TecExpired);
            }
        }
        let root = common::read_account(view, account)?.ok_or(ResultCode::TerNoAccount)?;
        let reserve = root.reserve(config.reserve_base, config.reserve_increment) + config.reserve_increment;
        if root.balance < reserve {
            return Err(ResultCode::TecInsufReserveOffer);
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
        let Some(sequence) = tx_u32(tx, "Sequence") else { return ResultCode::TefFailure };
        let pays = match common::parse_amount(tx, "TakerPays") {
            Ok(amount) => amount,
            Err(code) => return code,
        };
        let gets = match common::parse_amount(tx, "TakerGets") {
            Ok(amount) => amount,
            Err(code) => return code,
        };

        let mut root = match common::read_account(view, account) {
            Ok(Some(root)) => root,
            Ok(None) => return ResultCode::TerNoAccount,
            Err(code) => return code,
        };

        // An OfferCreate carrying `OfferSequence` first cancels that prior
        // resting offer of the same account.
        if let Some(prior_sequence) = tx_u32(tx, "OfferSequence") {
            if let Err(code) = cancel_offer(account, prior_sequence, view, &mut root) {
                return code;
            }
        }

        let offer_keylet = match common::offer_keylet(account, sequence) {
            Ok(keylet) => keylet,
            Err(code) => return code,
        };
        let owner_dir = match common::account_owner_dir_keylet(account) {
            Ok(keylet) => keylet,
            Err(code) => return code,
        };
        let owner_node = match DirectoryNode::insert(view, &owner_dir, offer_keylet) {
            Ok(node) => node,
            Err(_) => return ResultCode::TecDirFull,
        };

        let offer = Offer {
            account: account.into(),
            sequence,
            taker_pays: pays,
            taker_gets: gets,
            book_directory: "0".repeat(64),
            book_node: 0,
            owner_node,
            expiration: tx_u32(tx, "Expiration"),
            flags: tx_u32(tx, "Flags").unwrap_or(0),
        };
        let bytes = match offer.to_bytes() {
            Ok(bytes) => bytes,
            Err(_) => return ResultCode::TefFailure,
        };
        if view.write(&offer_keylet, bytes).is_err() {
            return ResultCode::TefFailure;
        }

        root.owner_count = root.owner_count.saturating_add(1);
        let reserve = root.reserve(config.reserve_base, config.reserve_increment);
        if root.balance < reserve {
            return ResultCode::TecInsufReserveOffer;
        }
        match common::write_account(view, &root) {
            Ok(()) => ResultCode::TesSuccess,
            Err(code) => code,
        }
    }
}

pub struct OfferCancel;

impl Transactor for OfferCancel {
    fn preflight(&self, tx: &Value, _config: &EngineConfig) -> Result<(), ResultCode> {
        tx_str(tx, "Account").ok_or(ResultCode::TemMalformed)?;
        let sequence = tx_u32(tx, "OfferSequence").ok_or(ResultCode::TemBadSequence)?;
        if sequence == 0 {
            return Err(ResultCode::TemBadSequence);
        }
        Ok(())
    }

    fn preclaim(&self, tx: &Value, view: &dyn View, _config: &EngineConfig) -> Result<(), ResultCode> {
        let account = tx_str(tx, "Account").ok_or(ResultCode::TemMalformed)?;
        common::read_account(view, account)?.ok_or(ResultCode::TerNoAccount)?;
        Ok(())
    }

    fn apply(
        &self,
        tx: &Value,
        view: &mut dyn TransactionalView,
        _config: &EngineConfig,
    ) -> ResultCode {
        let Some(account) = tx_str(tx, "Account") else { return ResultCode::TefFailure };
        let Some(sequence) = tx_u32(tx, "OfferSequence") else { return ResultCode::TefFailure };
        let mut root = match common::read_account(view, account) {
            Ok(Some(root)) => root,
            Ok(None) => return ResultCode::TerNoAccount,
            Err(code) => return code,
        };
        if let Err(code) = cancel_offer(account, sequence, view, &mut root) {
            return code;
        }
        match common::write_account(view, &root) {
            Ok(()) => ResultCode::TesSuccess,
            Err(code) => code,
        }
    }
}
