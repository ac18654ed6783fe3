//! `Ticket` (`spec.md` §3.3, §4.7): a pre-reserved sequence number a
//! transaction may consume via `TicketSequence` instead of its account's
//! ordinary `Sequence`.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use serde_json::json;

use crate::ledger::exceptions::LedgerResult;
use crate::ledger::objects::{decode_object, encode_object, string_field, u32_field};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub account: String,
    pub ticket_sequence: u32,
    pub owner_node: u64,
}

impl Ticket {
    pub fn from_bytes(bytes: &[u8]) -> LedgerResult<Self> {
        let value = decode_object(bytes)?;
        Ok(Ticket {
            account: string_field(&value, "Account")?,
            ticket_sequence: u32_field(&value, "TicketSequence")?,
            owner_node: string_field(&value, "OwnerNode")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(0),
        })
    }

    pub fn to_bytes(&self) -> LedgerResult<Vec<u8>> {
        let value = json!({
            "LedgerEntryType": "Ticket",
            "Account": self.account,
            "TicketSequence": self.ticket_sequence,
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
        let ticket = Ticket {
            account: "rMBzp8CgpE441cp5PVyA9rpVV7oT8hP3ys".to_string(),
            ticket_sequence: 42,
            owner_node: 0,
        };
        let bytes = ticket.to_bytes().unwrap();
        assert_eq!(Ticket::from_bytes(&bytes).unwrap(), ticket);
    }
}
