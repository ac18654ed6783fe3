//! `NFTokenOffer` (`spec.md` §4.4, ledger-entry-type `NFTokenOffer`): a
//! resting buy or sell offer against one NFToken.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use serde_json::{json, Value};

use crate::ledger::exceptions::{LedgerException, LedgerResult};
use crate::ledger::objects::{decode_object, encode_object, string_field, u32_field};

/// `lsfSellNFToken`: set iff this is a sell offer rather than a buy offer.
pub const SELL_NFTOKEN_FLAG: u32 = 0x0000_0001;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NFTokenOffer {
    pub account: String,
    pub nftoken_id: [u8; 32],
    pub amount: u64,
    pub owner: Option<String>,
    pub destination: Option<String>,
    pub expiration: Option<u32>,
    pub flags: u32,
    pub owner_node: u64,
}

impl NFTokenOffer {
    pub fn is_sell_offer(&self) -> bool {
        self.flags & SELL_NFTOKEN_FLAG != 0
    }

    pub fn from_bytes(bytes: &[u8]) -> LedgerResult<Self> {
        let value = decode_object(bytes)?;
        let nftoken_id_hex = string_field(&value, "NFTokenID")?;
        let nftoken_id_bytes = hex::decode(&nftoken_id_hex)
            .map_err(|_| LedgerException::Malformed("NFTokenID is not hex".into()))?;
        let mut nftoken_id = [0u8; 32];
        if nftoken_id_bytes.len() != 32 {
            return Err(LedgerException::Malformed("NFTokenID is not 32 bytes".into()));
        }
        nftoken_id.copy_from_slice(&nftoken_id_bytes);

        Ok(NFTokenOffer {
            account: string_field(&value, "Account")?,
            nftoken_id,
            amount: string_field(&value, "Amount")?
                .parse()
                .map_err(|_| LedgerException::Malformed("bad Amount".into()))?,
            owner: value.get("Owner").and_then(Value::as_str).map(str::to_string),
            destination: value.get("Destination").and_then(Value::as_str).map(str::to_string),
            expiration: value.get("Expiration").and_then(Value::as_u64).map(|v| v as u32),
            flags: u32_field(&value, "Flags").unwrap_or(0),
            owner_node: string_field(&value, "OwnerNode")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(0),
        })
    }

    pub fn to_bytes(&self) -> LedgerResult<Vec<u8>> {
        let mut value = json!({
            "LedgerEntryType": "NFTokenOffer",
            "Account": self.account,
            "NFTokenID": hex::encode_upper(self.nftoken_id),
            "Amount": self.amount.to_string(),
            "Flags": self.flags,
            "OwnerNode": self.owner_node.to_string(),
        });
        if let Some(owner) = &self.owner {
            value["Owner"] = json!(owner);
        }
        if let Some(destination) = &self.destination {
            value["Destination"] = json!(destination);
        }
        if let Some(expiration) = self.expiration {
            value["Expiration"] = json!(expiration);
        }
        encode_object(value)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const ALICE: &str = "rMBzp8CgpE441cp5PVyA9rpVV7oT8hP3ys";

    #[test]
    fn round_trips_a_sell_offer() {
        let offer = NFTokenOffer {
            account: ALICE.to_string(),
            nftoken_id: [9u8; 32],
            amount: 1_000_000,
            owner: None,
            destination: None,
            expiration: None,
            flags: SELL_NFTOKEN_FLAG,
            owner_node: 0,
        };
        let bytes = offer.to_bytes().unwrap();
        let decoded = NFTokenOffer::from_bytes(&bytes).unwrap();
        assert_eq!(decoded, offer);
        assert!(decoded.is_sell_offer());
    }
}
