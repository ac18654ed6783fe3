//! `TrustSet`: create, update, or delete the `RippleState` trust line
//! between `Account` and `LimitAmount.issuer`. `QualityIn`/`QualityOut` and
//! the no-ripple/freeze flag bits are out of scope (`DESIGN.md`); only the
//! limit itself is modelled.

use core::convert::TryFrom;

use serde_json::Value;

use crate::core::binarycodec::types::AccountId;
use crate::engine::common::{self, tx_str};
use crate::engine::config::EngineConfig;
use crate::engine::result::ResultCode;
use crate::engine::transactions::Transactor;
use crate::ledger::directory::DirectoryNode;
use crate::ledger::keylet;
use crate::ledger::objects::RippleState;
use crate::ledger::store::{TransactionalView, View};

const LOW_RESERVE: u32 = 0x0001_0000;
const HIGH_RESERVE: u32 = 0x0002_0000;

fn limit_amount(tx: &Value) -> Result<(alloc::string::String, alloc::string::String, alloc::string::String), ResultCode> {
    let limit = tx.get("LimitAmount").ok_or(ResultCode::TemMalformed)?;
    let value = limit.get("value").and_then(Value::as_str).ok_or(ResultCode::TemBadLimit)?;
    let currency = limit.get("currency").and_then(Value::as_str).ok_or(ResultCode::TemBadCurrency)?;
    let issuer = limit.get("issuer").and_then(Value::as_str).ok_or(ResultCode::TemBadIssuer)?;
    Ok((value.into(), currency.into(), issuer.into()))
}

pub struct TrustSet;

impl Transactor for TrustSet {
    fn preflight(&self, tx: &Value, _config: &EngineConfig) -> Result<(), ResultCode> {
        let account = tx_str(tx, "Account").ok_or(ResultCode::TemMalformed)?;
        let (value, _currency, issuer) = limit_amount(tx)?;
        if account == issuer {
            return Err(ResultCode::TemDstIsSrc);
        }
        let limit: f64 = value.parse().map_err(|_| ResultCode::TemBadLimit)?;
        if limit < 0.0 {
            return Err(ResultCode::TemBadLimit);
        }
        Ok(())
    }

    fn preclaim(&self, tx: &Value, view: &dyn View, _config: &EngineConfig) -> Result<(), ResultCode> {
        let account = tx_str(tx, "Account").ok_or(ResultCode::TemMalformed)?;
        let (_value, _currency, issuer) = limit_amount(tx)?;
        AccountId::try_from(issuer.as_str()).map_err(|_| ResultCode::TemBadIssuer)?;
        common::read_account(view, account)?.ok_or(ResultCode::TerNoAccount)?;
        Ok(())
    }

    fn apply(
        &self,
        tx: &Value,
        view: &mut dyn TransactionalView,
        config: &EngineConfig,
    ) -> ResultCode {
        let Some(account) = tx_str(tx, "Account") else { return ResultCode::TefFailure };
        let (value, currency, issuer) = match limit_amount(tx) {
            Ok(parts) => parts,
            Err(code) => return code,
        };
        let Ok(src_account) = AccountId::try_from(account) else { return ResultCode::TemInvalidFlag };
        let Ok(dst_account) = AccountId::try_from(issuer.as_str()) else {
            return ResultCode::TemInvalidFlag;
        };
        let currency_bytes = match common::currency_bytes(&currency) {
            Ok(bytes) => bytes,
            Err(code) => return code,
        };
        let line_keylet = match keylet::line(src_account.as_ref(), dst_account.as_ref(), &currency_bytes)
        {
            Ok(keylet) => keylet,
            Err(_) => return ResultCode::TemMalformed,
        };
        let is_low = keylet::is_low_account(src_account.as_ref(), dst_account.as_ref());

        let mut root = match common::read_account(view, account) {
            Ok(Some(root)) => root,
            Ok(None) => return ResultCode::TerNoAccount,
            Err(code) => return code,
        };

        let exists = view.exists(&line_keylet);
        let mut line = if exists {
            match view.read(&line_keylet).ok().and_then(|b| RippleState::from_bytes(&b).ok()) {
                Some(line) => line,
                None => return ResultCode::TefFailure,
            }
        } else {
            let (low, high) = if is_low { (account, issuer.as_str()) } else { (issuer.as_str(), account) };
            RippleState::new(low, high, &currency)
        };

        if is_low {
            line.low_limit = value.clone();
        } else {
            line.high_limit = value.clone();
        }

        let reserve_bit = if is_low { LOW_RESERVE } else { HIGH_RESERVE };
        let already_reserved = line.flags & reserve_bit != 0;
        let wants_reserve = value != "0";

        if line.is_deletable() && exists {
            if let Err(code) = view.delete(&line_keylet).map_err(|_| ResultCode::TefFailure) {
                return code;
            }
            let dir = match common::account_owner_dir_keylet(account) {
                Ok(keylet) => keylet,
                Err(code) => return code,
            };
            let _ = DirectoryNode::remove(view, &dir, &line_keylet);
            if already_reserved {
                root.owner_count = root.owner_count.saturating_sub(1);
            }
            if let Err(code) = common::write_account(view, &root) {
                return code;
            }
            return ResultCode::TesSuccess;
        }

        if wants_reserve && !already_reserved {
            let reserve =
                root.reserve(config.reserve_base, config.reserve_increment) + config.reserve_increment;
            if root.balance < reserve {
                return ResultCode::TecNoLineInsufReserve;
            }
            line.flags |= reserve_bit;
            root.owner_count = root.owner_count.saturating_add(1);
        }

        let owner_dir = match common::account_owner_dir_keylet(account) {
            Ok(keylet) => keylet,
            Err(code) => return code,
        };
        if !exists {
            let node = match DirectoryNode::insert(view, &owner_dir, line_keylet) {
                Ok(node) => node,
                Err(_) => return ResultCode::TecDirFull,
            };
            if is_low {
                line.low_node = node;
            } else {
                line.high_node = node;
            }
        }

        let bytes = match line.to_bytes() {
            Ok(bytes) => bytes,
            Err(_) => return ResultCode::TefFailure,
        };
        if let Err(_) = view.write(&line_keylet, bytes) {
            return ResultCode::TefFailure;
        }
        match common::write_account(view, &root) {
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
        EngineConfig::default()
    }

    #[test]
    fn creates_a_line_on_first_trust_set() {
        let mut store = MemoryStore::new();
        {
            let mut view = MemoryTransactionalView::new(&mut store);
            common::write_account(&mut view, &AccountRoot::new(ALICE, 100_000_000)).unwrap();
            view.commit();
        }
        let tx = json!({
            "Account": ALICE,
            "LimitAmount": { "currency": "USD", "value": "1000", "issuer": BOB },
        });
        let mut view = MemoryTransactionalView::new(&mut store);
        let code = TrustSet.apply(&tx, &mut view, &config());
        assert_eq!(code, ResultCode::TesSuccess);
        view.commit();
        let root = common::read_account(&store, ALICE).unwrap().unwrap();
        assert_eq!(root.owner_count, 1);
    }

    #[test]
    fn zeroing_a_fresh_line_deletes_it() {
        let mut store = MemoryStore::new();
        {
            let mut view = MemoryTransactionalView::new(&mut store);
            common::write_account(&mut view, &AccountRoot::new(ALICE, 100_000_000)).unwrap();
            view.commit();
        }
        let create_tx = json!({
            "Account": ALICE,
            "LimitAmount": { "currency": "USD", "value": "1000", "issuer": BOB },
        });
        {
            let mut view = MemoryTransactionalView::new(&mut store);
            TrustSet.apply(&create_tx, &mut view, &config());
            view.commit();
        }
        let delete_tx = json!({
            "Account": ALICE,
            "LimitAmount": { "currency": "USD", "value": "0", "issuer": BOB },
        });
        let mut view = MemoryTransactionalView::new(&mut store);
        let code = TrustSet.apply(&delete_tx, &mut view, &config());
        assert_eq!(code, ResultCode::TesSuccess);
        view.commit();
        let root = common::read_account(&store, ALICE).unwrap().unwrap();
        assert_eq!(root.owner_count, 0);
    }
}
