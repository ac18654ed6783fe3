//! `Offer` (`spec.md` §3.3, ledger-entry-type `0x006F`): a resting order in
//! an order book.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use serde_json::{json, Value};

use crate::ledger::exceptions::LedgerResult;
use crate::ledger::objects::{decode_object, encode_object, string_field, u32_field};

/// Either side of an `Offer`'s `TakerPays`/`TakerGets`: native drops or an
/// issued-currency amount, carried as the same JSON shapes the wire codec
/// already accepts (`spec.md` §6.2).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OfferAmount {
    Native(u64),
    Issued { value: String, currency: String, issuer: String },
}

impl OfferAmount {
    pub(crate) fn to_json(&self) -> Value {
        match self {
            OfferAmount::Native(drops) => json!(drops.to_string()),
            OfferAmount::Issued { value, currency, issuer } => {
                json!({ "value": value, "currency": currency, "issuer": issuer })
            }
        }
    }

    pub(crate) fn from_json(value: &Value) -> LedgerResult<Self> {
        if let Some(drops) = value.as_str() {
            return Ok(OfferAmount::Native(drops.parse().map_err(|_| {
                crate::ledger::exceptions::LedgerException::Malformed("bad drops amount".into())
            })?));
        }
        Ok(OfferAmount::Issued {
            value: value
                .get("value")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            currency: value
                .get("currency")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            issuer: value
                .get("issuer")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Offer {
    pub account: String,
    pub sequence: u32,
    pub taker_pays: OfferAmount,
    pub taker_gets: OfferAmount,
    pub book_directory: String,
    pub book_node: u64,
    pub owner_node: u64,
    pub expiration: Option<u32>,
    pub flags: u32,
}

impl Offer {
    pub fn from_bytes(bytes: &[u8]) -> LedgerResult<Self> {
        let value = decode_object(bytes)?;
        Ok(Offer {
            account: string_field(&value, "Account")?,
            sequence: u32_field(&value, "Sequence")?,
            taker_pays: OfferAmount::from_json(
                value.get("TakerPays").unwrap_or(&Value::Null),
            )?,
            taker_gets: OfferAmount::from_json(
                value.get("TakerGets").unwrap_or(&Value::Null),
            )?,
            book_directory: string_field(&value, "BookDirectory").unwrap_or_default(),
            book_node: string_field(&value, "BookNode")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(0),
            owner_node: string_field(&value, "OwnerNode")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(0),
            expiration: value.get("Expiration").and_then(Value::as_u64).map(|v| v as u32),
            flags: u32_field(&value, "Flags").unwrap_or(0),
        })
    }

    pub fn to_bytes(&self) -> LedgerResult<Vec<u8>> {
        let mut value = json!({
            "LedgerEntryType": "Offer",
            "Account": self.account,
            "Sequence": self.sequence,
            "TakerPays": self.taker_pays.to_json(),
            "TakerGets": self.taker_gets.to_json(),
            "BookDirectory": self.book_directory,
            "BookNode": self.book_node.to_string(),
            "OwnerNode": self.owner_node.to_string(),
            "Flags": self.flags,
        });
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
    fn round_trips_native_for_native() {
        let offer = Offer {
            account: ALICE.to_string(),
            sequence: 1752792,
            taker_pays: OfferAmount::Native(15_000_000_000),
            taker_gets: OfferAmount::Native(1),
            book_directory: "0".repeat(64),
            book_node: 0,
            owner_node: 0,
            expiration: Some(595640108),
            flags: 0,
        };
        let bytes = offer.to_bytes().unwrap();
        let decoded = Offer::from_bytes(&bytes).unwrap();
        assert_eq!(decoded, offer);
    }
}
