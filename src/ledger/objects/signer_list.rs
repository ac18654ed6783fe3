//! `SignerList` (`spec.md` §3.3): an account's multi-signing quorum. XRPL
//! only ever gives an account one signer list, at the fixed sub-index the
//! `signer_list` keylet (§4.4) always derives.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use serde_json::{json, Value};

use crate::ledger::exceptions::LedgerResult;
use crate::ledger::objects::{decode_object, encode_object, string_field, u32_field};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignerEntry {
    pub account: String,
    pub weight: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignerList {
    pub account: String,
    pub signer_quorum: u32,
    pub signer_entries: Vec<SignerEntry>,
    pub owner_node: u64,
}

impl SignerList {
    pub fn from_bytes(bytes: &[u8]) -> LedgerResult<Self> {
        let value = decode_object(bytes)?;
        let entries = value
            .get("SignerEntries")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        let mut signer_entries = Vec::with_capacity(entries.len());
        for entry in entries {
            let inner = entry
                .get("SignerEntry")
                .ok_or_else(|| crate::ledger::exceptions::LedgerException::Malformed("missing SignerEntry".into()))?;
            signer_entries.push(SignerEntry {
                account: inner
                    .get("Account")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                weight: inner.get("SignerWeight").and_then(Value::as_u64).unwrap_or(0) as u16,
            });
        }
        Ok(SignerList {
            account: string_field(&value, "Account")?,
            signer_quorum: u32_field(&value, "SignerQuorum")?,
            signer_entries,
            owner_node: string_field(&value, "OwnerNode")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(0),
        })
    }

    pub fn to_bytes(&self) -> LedgerResult<Vec<u8>> {
        let entries: Vec<Value> = self
            .signer_entries
            .iter()
            .map(|entry| {
                json!({ "SignerEntry": { "Account": entry.account, "SignerWeight": entry.weight } })
            })
            .collect();
        let value = json!({
            "LedgerEntryType": "SignerList",
            "Account": self.account,
            "SignerQuorum": self.signer_quorum,
            "SignerEntries": entries,
            "OwnerNode": self.owner_node.to_string(),
        });
        encode_object(value)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn round_trips_through_the_object_codec() {
        let list = SignerList {
            account: "rMBzp8CgpE441cp5PVyA9rpVV7oT8hP3ys".to_string(),
            signer_quorum: 2,
            signer_entries: alloc::vec![
                SignerEntry { account: "rvYAfWj5gh67oV6fW32ZzP3Aw4Eubs59B".to_string(), weight: 1 },
            ],
            owner_node: 0,
        };
        let bytes = list.to_bytes().unwrap();
        assert_eq!(SignerList::from_bytes(&bytes).unwrap(), list);
    }
}
