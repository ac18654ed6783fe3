//! `AccountSet`: this core supports only the `SetFlag`/`ClearFlag`
//! account-flag toggle (`asf*` → `lsf*` on `AccountRoot.flags`); the
//! email-hash/domain/messaging-key metadata fields are out of scope
//! (`DESIGN.md`).

use serde_json::Value;

use crate::engine::common::{self, tx_str, tx_u32};
use crate::engine::config::EngineConfig;
use crate::engine::result::ResultCode;
use crate::engine::transactions::Transactor;
use crate::ledger::store::{TransactionalView, View};

/// `asf` flag numbers this core recognizes, mapped to their `lsf` bit on
/// `AccountRoot` (values match the protocol's real `asfRequireDestTag` = 1,
/// `asfRequireAuth` = 2, `asfDisallowXRP` = 3, `asfDisableMaster` = 4,
/// `asfDefaultRipple` = 8).
fn lsf_bit_for_asf(asf: u32) -> Option<u32> {
    match asf {
        1 => Some(0x0002_0000), // lsfRequireDestTag
        2 => Some(0x0004_0000), // lsfRequireAuth
        3 => Some(0x0008_0000), // lsfDisallowXRP
        4 => Some(0x0010_0000), // lsfDisableMaster
        8 => Some(0x0080_0000), // lsfDefaultRipple
        _ => None,
    }
}

pub struct AccountSet;

impl Transactor for AccountSet {
    fn preflight(&self, tx: &Value, _config: &EngineConfig) -> Result<(), ResultCode> {
        tx_str(tx, "Account").ok_or(ResultCode::TemMalformed)?;
        let set_flag = tx_u32(tx, "SetFlag");
        let clear_flag = tx_u32(tx, "ClearFlag");
        if set_flag.is_some() && clear_flag.is_some() {
            return Err(ResultCode::TemInvalidFlag);
        }
        if let Some(flag) = set_flag.or(clear_flag) {
            lsf_bit_for_asf(flag).ok_or(ResultCode::TemInvalidFlag)?;
        }
        Ok(())
    }

    fn preclaim(&self, _tx: &Value, _view: &dyn View, _config: &EngineConfig) -> Result<(), ResultCode> {
        Ok(())
    }

    fn apply(
        &self,
        tx: &Value,
        view: &mut dyn TransactionalView,
        _config: &EngineConfig,
    ) -> ResultCode {
        let Some(account) = tx_str(tx, "Account") else { return ResultCode::TefFailure };
        let mut root = match common::read_account(view, account) {
            Ok(Some(root)) => root,
            Ok(None) => return ResultCode::TerNoAccount,
            Err(code) => return code,
        };

        if let Some(flag) = tx_u32(tx, "SetFlag") {
            if let Some(bit) = lsf_bit_for_asf(flag) {
                root.flags |= bit;
            }
        }
        if let Some(flag) = tx_u32(tx, "ClearFlag") {
            if let Some(bit) = lsf_bit_for_asf(flag) {
                root.flags &= !bit;
            }
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

    #[test]
    fn set_flag_then_clear_flag_round_trips() {
        let mut store = MemoryStore::new();
        {
            let mut view = MemoryTransactionalView::new(&mut store);
            common::write_account(&mut view, &AccountRoot::new(ALICE, 20_000_000)).unwrap();
            view.commit();
        }
        {
            let mut view = MemoryTransactionalView::new(&mut store);
            let tx = json!({ "Account": ALICE, "SetFlag": 2 });
            assert_eq!(AccountSet.apply(&tx, &mut view, &EngineConfig::default()), ResultCode::TesSuccess);
            view.commit();
        }
        let root = common::read_account(&store, ALICE).unwrap().unwrap();
        assert_eq!(root.flags & 0x0004_0000, 0x0004_0000);
        {
            let mut view = MemoryTransactionalView::new(&mut store);
            let tx = json!({ "Account": ALICE, "ClearFlag": 2 });
            assert_eq!(AccountSet.apply(&tx, &mut view, &EngineConfig::default()), ResultCode::TesSuccess);
            view.commit();
        }
        let root = common::read_account(&store, ALICE).unwrap().unwrap();
        assert_eq!(root.flags & 0x0004_0000, 0);
    }

    #[test]
    fn unknown_flag_number_is_rejected_at_preflight() {
        let tx = json!({ "Account": ALICE, "SetFlag": 99 });
        assert_eq!(
            AccountSet.preflight(&tx, &EngineConfig::default()).unwrap_err(),
            ResultCode::TemInvalidFlag
        );
    }
}
