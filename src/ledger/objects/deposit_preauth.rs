//! `DepositPreauth` (`spec.md` §3.3): records that `owner` has preauthorized
//! `authorized` to send it funds while Deposit Authorization is enabled.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use serde_json::json;

use crate::ledger::exceptions::LedgerResult;
use crate::ledger::objects::{decode_object, encode_object, string_field};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepositPreauth {
    pub account: String,
    pub authorize: String,
    pub owner_node: u64,
}

impl DepositPreauth {
    pub fn from_bytes(bytes: &[u8]) -> LedgerResult<Self> {
        let value = decode_object(bytes)?;
        Ok(DepositPreauth {
            account: string_field(&value, "Account")?,
            authorize: string_field(&value, "Authorize")?,
            owner_node: string_field(&value, "OwnerNode")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(0),
        })
    }

    pub fn to_bytes(&self) -> LedgerResult<Vec<u8>> {
        let value = json!({
            "LedgerEntryType": "DepositPreauth",
            "Account": self.account,
            "Authorize": self.authorize,
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
        let entry = DepositPreauth {
            account: "rMBzp8CgpE441cp5PVyA9rpVV7oT8hP3ys".to_string(),
            authorize: "rvYAfWj5gh67oV6fW32ZzP3Aw4Eubs59B".to_string(),
            owner_node: 0,
        };
        let bytes = entry.to_bytes().unwrap();
        assert_eq!(DepositPreauth::from_bytes(&bytes).unwrap(), entry);
    }
}
