//! `Escrow` (`spec.md` §3.3): native XRP locked until a release condition.
//! This core's `EscrowFinish`/`EscrowCancel` transactors support only the
//! time-based release windows (`FinishAfter`/`CancelAfter`); crypto-condition
//! fulfillment verification is not implemented (recorded in `DESIGN.md`).

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use serde_json::{json, Value};

use crate::ledger::exceptions::LedgerResult;
use crate::ledger::objects::{decode_object, encode_object, string_field, u32_field};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Escrow {
    pub account: String,
    pub destination: String,
    pub amount: u64,
    pub condition: Option<String>,
    pub cancel_after: Option<u32>,
    pub finish_after: Option<u32>,
    pub owner_node: u64,
}

impl Escrow {
    pub fn from_bytes(bytes: &[u8]) -> LedgerResult<Self> {
        let value = decode_object(bytes)?;
        Ok(Escrow {
            account: string_field(&value, "Account")?,
            destination: string_field(&value, "Destination")?,
            amount: string_field(&value, "Amount")?.parse().map_err(|_| {
                crate::ledger::exceptions::LedgerException::Malformed("bad Amount".into())
            })?,
            condition: value.get("Condition").and_then(Value::as_str).map(str::to_string),
            cancel_after: value.get("CancelAfter").and_then(Value::as_u64).map(|v| v as u32),
            finish_after: value.get("FinishAfter").and_then(Value::as_u64).map(|v| v as u32),
            owner_node: string_field(&value, "OwnerNode")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(0),
        })
    }

    pub fn to_bytes(&self) -> LedgerResult<Vec<u8>> {
        let mut value = json!({
            "LedgerEntryType": "Escrow",
            "Account": self.account,
            "Destination": self.destination,
            "Amount": self.amount.to_string(),
            "OwnerNode": self.owner_node.to_string(),
        });
        if let Some(condition) = &self.condition {
            value["Condition"] = json!(condition);
        }
        if let Some(cancel_after) = self.cancel_after {
            value["CancelAfter"] = json!(cancel_after);
        }
        if let Some(finish_after) = self.finish_after {
            value["FinishAfter"] = json!(finish_after);
        }
        encode_object(value)
    }

    /// `true` once `ledger_close_time` has passed `finish_after`, the
    /// earliest the escrow may be released to its destination.
    pub fn can_finish(&self, ledger_close_time: u32) -> bool {
        self.finish_after.map_or(true, |after| ledger_close_time > after)
    }

    /// `true` once `ledger_close_time` has passed `cancel_after`, the
    /// earliest the escrow may be returned to its source.
    pub fn can_cancel(&self, ledger_close_time: u32) -> bool {
        self.cancel_after.map_or(false, |after| ledger_close_time > after)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const ALICE: &str = "rMBzp8CgpE441cp5PVyA9rpVV7oT8hP3ys";
    const BOB: &str = "rvYAfWj5gh67oV6fW32ZzP3Aw4Eubs59B";

    #[test]
    fn round_trips_through_the_object_codec() {
        let escrow = Escrow {
            account: ALICE.to_string(),
            destination: BOB.to_string(),
            amount: 10_000_000,
            condition: None,
            cancel_after: Some(600_000_000),
            finish_after: Some(500_000_000),
            owner_node: 0,
        };
        let bytes = escrow.to_bytes().unwrap();
        let decoded = Escrow::from_bytes(&bytes).unwrap();
        assert_eq!(decoded, escrow);
    }

    #[test]
    fn finish_and_cancel_windows_are_distinct() {
        let escrow = Escrow {
            account: ALICE.to_string(),
            destination: BOB.to_string(),
            amount: 1,
            condition: None,
            cancel_after: Some(100),
            finish_after: Some(50),
            owner_node: 0,
        };
        assert!(!escrow.can_finish(40));
        assert!(escrow.can_finish(60));
        assert!(!escrow.can_cancel(60));
        assert!(escrow.can_cancel(150));
    }
}
