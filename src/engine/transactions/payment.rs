//! `Payment`: a direct transfer of native XRP or one issued-currency trust
//! line, `Account` to `Destination`. Rippling through intermediate trust
//! lines and `Paths`/`SendMax` partial-payment pathfinding are out of scope
//! for this core (`DESIGN.md`): an issued-currency Payment moves value
//! along a single pre-existing trust line between the two parties.

use core::convert::TryFrom;

use serde_json::Value;

use crate::core::binarycodec::types::AccountId;
use crate::engine::common::{self, tx_str};
use crate::engine::config::EngineConfig;
use crate::engine::result::ResultCode;
use crate::engine::transactions::Transactor;
use crate::ledger::keylet;
use crate::ledger::objects::offer::OfferAmount;
use crate::ledger::objects::RippleState;
use crate::ledger::store::{TransactionalView, View};

pub struct Payment;

impl Transactor for Payment {
    fn preflight(&self, tx: &Value, _config: &EngineConfig) -> Result<(), ResultCode> {
        let account = tx_str(tx, "Account").ok_or(ResultCode::TemMalformed)?;
        let destination = tx_str(tx, "Destination").ok_or(ResultCode::TemDstNeeded)?;
        if account == destination {
            return Err(ResultCode::TemDstIsSrc);
        }
        common::parse_amount(tx, "Amount")?;
        Ok(())
    }

    fn preclaim(&self, tx: &Value, view: &dyn View, _config: &EngineConfig) -> Result<(), ResultCode> {
        let account = tx_str(tx, "Account").ok_or(ResultCode::TemMalformed)?;
        let destination = tx_str(tx, "Destination").ok_or(ResultCode::TemDstNeeded)?;
        let amount = common::parse_amount(tx, "Amount")?;

        match amount {
            OfferAmount::Native(_) => Ok(()),
            OfferAmount::Issued { currency, .. } => {
                let dest_account = AccountId::try_from(destination)
                    .map_err(|_| ResultCode::TemInvalidFlag)?;
                let src_account =
                    AccountId::try_from(account).map_err(|_| ResultCode::TemInvalidFlag)?;
                let currency_bytes = common::currency_bytes(&currency)?;
                let line_keylet =
                    keylet::line(src_account.as_ref(), dest_account.as_ref(), &currency_bytes)
                        .map_err(|_| ResultCode::TemMalformed)?;
                if !view.exists(&line_keylet) {
                    return Err(ResultCode::TecNoLine);
                }
                Ok(())
            }
        }
    }

    fn apply(
        &self,
        tx: &Value,
        view: &mut dyn TransactionalView,
        config: &EngineConfig,
    ) -> ResultCode {
        let Some(account) = tx_str(tx, "Account") else { return ResultCode::TefFailure };
        let Some(destination) = tx_str(tx, "Destination") else { return ResultCode::TefFailure };
        let amount = match common::parse_amount(tx, "Amount") {
            Ok(amount) => amount,
            Err(code) => return code,
        };

        match amount {
            OfferAmount::Native(drops) => apply_native(account, destination, drops, view, config),
            OfferAmount::Issued { value, currency, .. } => {
                apply_issued(account, destination, &value, &currency, view)
            }
        }
    }
}

fn apply_native(
    account: &str,
    destination: &str,
    drops: u64,
    view: &mut dyn TransactionalView,
    config: &EngineConfig,
) -> ResultCode {
    let mut source = match common::read_account(view, account) {
        Ok(Some(root)) => root,
        Ok(None) => return ResultCode::TerNoAccount,
        Err(code) => return code,
    };
    let Some(new_source_balance) = source.balance.checked_sub(drops) else {
        return ResultCode::TecUnfundedPayment;
    };
    if new_source_balance < source.reserve(config.reserve_base, config.reserve_increment) {
        return ResultCode::TecUnfundedPayment;
    }

    match common::read_account(view, destination) {
        Ok(Some(mut dest_account)) => {
            source.balance = new_source_balance;
            dest_account.balance = match dest_account.balance.checked_add(drops) {
                Some(balance) => balance,
                None => return ResultCode::TecInternal,
            };
            if let Err(code) = common::write_account(view, &source) {
                return code;
            }
            if let Err(code) = common::write_account(view, &dest_account) {
                return code;
            }
            ResultCode::TesSuccess
        }
        Ok(None) => {
            // Account creation: only a plain drops Payment that at least
            // covers the base reserve may fund a brand new account.
            if drops < config.reserve_base {
                return ResultCode::TecNoDstInsufXrp;
            }
            source.balance = new_source_balance;
            if let Err(code) = common::write_account(view, &source) {
                return code;
            }
            let new_account = crate::ledger::objects::AccountRoot::new(destination, drops);
            match common::write_account(view, &new_account) {
                Ok(()) => ResultCode::TesSuccess,
                Err(code) => code,
            }
        }
        Err(code) => code,
    }
}

fn apply_issued(
    account: &str,
    destination: &str,
    value: &str,
    currency: &str,
    view: &mut dyn TransactionalView,
) -> ResultCode {
    let Ok(src_account) = AccountId::try_from(account) else { return ResultCode::TemInvalidFlag };
    let Ok(dest_account) = AccountId::try_from(destination) else {
        return ResultCode::TemInvalidFlag;
    };
    let currency_bytes = match common::currency_bytes(currency) {
        Ok(bytes) => bytes,
        Err(code) => return code,
    };
    let line_keylet = match keylet::line(src_account.as_ref(), dest_account.as_ref(), &currency_bytes)
    {
        Ok(keylet) => keylet,
        Err(_) => return ResultCode::TemMalformed,
    };
    if !view.exists(&line_keylet) {
        return ResultCode::TecNoLine;
    }
    let bytes = match view.read(&line_keylet) {
        Ok(bytes) => bytes,
        Err(_) => return ResultCode::TefFailure,
    };
    let mut line = match RippleState::from_bytes(&bytes) {
        Ok(line) => line,
        Err(_) => return ResultCode::TefFailure,
    };
    let delta: f64 = match value.parse() {
        Ok(delta) => delta,
        Err(_) => return ResultCode::TemBadAmount,
    };
    let current: f64 = line.balance.parse().unwrap_or(0.0);
    // Sign convention: positive balance is low-account-owed-by-high-account
    // (`spec.md` §3.3); the source account's payment moves the balance
    // toward its own side exactly when it is the high account.
    let is_source_low = keylet::is_low_account(src_account.as_ref(), dest_account.as_ref());
    let signed_delta = if is_source_low { -delta } else { delta };
    line.balance = format_amount(current + signed_delta);
    match line.to_bytes() {
        Ok(bytes) => match view.write(&line_keylet, bytes) {
            Ok(()) => ResultCode::TesSuccess,
            Err(_) => ResultCode::TefFailure,
        },
        Err(_) => ResultCode::TefFailure,
    }
}

fn format_amount(amount: f64) -> alloc::string::String {
    let mut s = alloc::format!("{amount}");
    if s.ends_with(".0") {
        s.truncate(s.len() - 2);
    }
    s
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
        EngineConfig { base_fee: 10, reserve_base: 10_000_000, reserve_increment: 2_000_000, ..Default::default() }
    }

    #[test]
    fn native_payment_to_existing_destination_moves_drops() {
        let mut store = MemoryStore::new();
        {
            let mut view = MemoryTransactionalView::new(&mut store);
            common::write_account(&mut view, &AccountRoot::new(ALICE, 100_000_000)).unwrap();
            common::write_account(&mut view, &AccountRoot::new(BOB, 20_000_000)).unwrap();
            view.commit();
        }
        let tx = json!({
            "Account": ALICE,
            "Destination": BOB,
            "Amount": "5000000",
        });
        let mut view = MemoryTransactionalView::new(&mut store);
        let code = Payment.apply(&tx, &mut view, &config());
        assert_eq!(code, ResultCode::TesSuccess);
        view.commit();
        let bob = common::read_account(&store, BOB).unwrap().unwrap();
        assert_eq!(bob.balance, 25_000_000);
    }

    #[test]
    fn native_payment_below_reserve_to_new_destination_fails() {
        let mut store = MemoryStore::new();
        {
            let mut view = MemoryTransactionalView::new(&mut store);
            common::write_account(&mut view, &AccountRoot::new(ALICE, 100_000_000)).unwrap();
            view.commit();
        }
        let carol = "rU4ArSyPfzfTW8RJiiJvuj1FTsi2seLjp7";
        let tx = json!({ "Account": ALICE, "Destination": carol, "Amount": "1" });
        let mut view = MemoryTransactionalView::new(&mut store);
        let code = Payment.apply(&tx, &mut view, &config());
        assert_eq!(code, ResultCode::TecNoDstInsufXrp);
    }

    #[test]
    fn issued_payment_without_a_line_is_rejected_at_preclaim() {
        let mut store = MemoryStore::new();
        {
            let mut view = MemoryTransactionalView::new(&mut store);
            common::write_account(&mut view, &AccountRoot::new(ALICE, 100_000_000)).unwrap();
            common::write_account(&mut view, &AccountRoot::new(BOB, 20_000_000)).unwrap();
            view.commit();
        }
        let tx = json!({
            "Account": ALICE,
            "Destination": BOB,
            "Amount": { "currency": "USD", "value": "10", "issuer": BOB },
        });
        let err = Payment.preclaim(&tx, &store, &config()).unwrap_err();
        assert_eq!(err, ResultCode::TecNoLine);
    }
}
