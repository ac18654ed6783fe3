//! `RippleState` (trust line, `spec.md` §3.3). Sign convention: a positive
//! `balance` means the low account owes the high account.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use serde_json::{json, Value};

use crate::ledger::exceptions::{LedgerException, LedgerResult};
use crate::ledger::objects::{decode_object, encode_object, field, string_field, u32_field};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RippleState {
    pub low_account: String,
    pub high_account: String,
    pub currency: String,
    /// Signed balance in the issued currency's decimal string form, always
    /// from the low account's point of view.
    pub balance: String,
    pub low_limit: String,
    pub high_limit: String,
    pub flags: u32,
    pub low_node: u64,
    pub high_node: u64,
}

impl RippleState {
    pub fn new(low_account: &str, high_account: &str, currency: &str) -> Self {
        RippleState {
            low_account: low_account.to_string(),
            high_account: high_account.to_string(),
            currency: currency.to_string(),
            balance: "0".to_string(),
            low_limit: "0".to_string(),
            high_limit: "0".to_string(),
            flags: 0,
            low_node: 0,
            high_node: 0,
        }
    }

    /// A trust line is deletable once both limits and the balance are zero
    /// and no reservation-holding flag (e.g. `lsfLowReserve`/`lsfHighReserve`)
    /// remains set (`spec.md` §3.3).
    pub fn is_deletable(&self) -> bool {
        const LOW_RESERVE: u32 = 0x0001_0000;
        const HIGH_RESERVE: u32 = 0x0002_0000;
        self.balance == "0"
            && self.low_limit == "0"
            && self.high_limit == "0"
            && self.flags & (LOW_RESERVE | HIGH_RESERVE) == 0
    }

    pub fn from_bytes(bytes: &[u8]) -> LedgerResult<Self> {
        let value = decode_object(bytes)?;
        let balance_field = field(&value, "Balance")?;
        let balance = balance_field
            .get("value")
            .and_then(Value::as_str)
            .ok_or_else(|| LedgerException::Malformed("Balance.value missing".into()))?
            .to_string();
        let currency = balance_field
            .get("currency")
            .and_then(Value::as_str)
            .ok_or_else(|| LedgerException::Malformed("Balance.currency missing".into()))?
            .to_string();
        let low_limit_field = field(&value, "LowLimit")?;
        let high_limit_field = field(&value, "HighLimit")?;
        Ok(RippleState {
            low_account: low_limit_field
                .get("issuer")
                .and_then(Value::as_str)
                .ok_or_else(|| LedgerException::Malformed("LowLimit.issuer missing".into()))?
                .to_string(),
            high_account: high_limit_field
                .get("issuer")
                .and_then(Value::as_str)
                .ok_or_else(|| LedgerException::Malformed("HighLimit.issuer missing".into()))?
                .to_string(),
            currency,
            balance,
            low_limit: low_limit_field
                .get("value")
                .and_then(Value::as_str)
                .unwrap_or("0")
                .to_string(),
            high_limit: high_limit_field
                .get("value")
                .and_then(Value::as_str)
                .unwrap_or("0")
                .to_string(),
            flags: u32_field(&value, "Flags")?,
            low_node: string_field(&value, "LowNode")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(0),
            high_node: string_field(&value, "HighNode")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(0),
        })
    }

    pub fn to_bytes(&self) -> LedgerResult<Vec<u8>> {
        let value = json!({
            "LedgerEntryType": "RippleState",
            "Flags": self.flags,
            "Balance": {
                "value": self.balance,
                "currency": self.currency,
                "issuer": "rrrrrrrrrrrrrrrrrrrrBZbvji",
            },
            "LowLimit": {
                "value": self.low_limit,
                "currency": self.currency,
                "issuer": self.low_account,
            },
            "HighLimit": {
                "value": self.high_limit,
                "currency": self.currency,
                "issuer": self.high_account,
            },
            "LowNode": self.low_node.to_string(),
            "HighNode": self.high_node.to_string(),
        });
        encode_object(value)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const ALICE: &str = "rMBzp8CgpE441cp5PVyA9rpVV7oT8hP3ys";
    const BOB: &str = "rvYAfWj5gh67oV6fW32ZzP3Aw4Eubs59B";

    #[test]
    fn round_trips_through_the_object_codec() {
        let mut line = RippleState::new(ALICE, BOB, "USD");
        line.balance = "12.5".to_string();
        line.low_limit = "1000".to_string();
        let bytes = line.to_bytes().unwrap();
        let decoded = RippleState::from_bytes(&bytes).unwrap();
        assert_eq!(decoded, line);
    }

    #[test]
    fn fresh_line_is_deletable() {
        let line = RippleState::new(ALICE, BOB, "USD");
        assert!(line.is_deletable());
    }

    #[test]
    fn funded_line_is_not_deletable() {
        let mut line = RippleState::new(ALICE, BOB, "USD");
        line.balance = "1".to_string();
        assert!(!line.is_deletable());
    }
}
