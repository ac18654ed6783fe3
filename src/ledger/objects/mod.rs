//! Typed projections over raw ledger-object bytes (Component F).
//!
//! Every object in this module round-trips through the real wire codec
//! (§4.3's `STObject`), not a bespoke internal format: `to_bytes` builds a
//! `serde_json::Value` field map and hands it to
//! [`crate::core::binarycodec::types::STObject::try_from_value`];
//! `from_bytes` does the reverse through `STObject::from_bytes` /
//! `to_value`. This keeps a ledger entry's on-disk bytes byte-identical to
//! what the reference protocol would store at the same keylet, matching
//! `spec.md` §6.1's byte-for-byte requirement for stored objects as well as
//! wire transactions.
//!
//! [`crate::ledger::nftoken_page`] is the exception: its chain bookkeeping
//! is internal store detail (see that module's doc comment) and is not
//! re-projected here.

pub mod account_root;
pub mod deposit_preauth;
pub mod escrow;
pub mod nftoken_offer;
pub mod offer;
pub mod ripple_state;
pub mod signer_list;
pub mod ticket;

pub use account_root::AccountRoot;
pub use deposit_preauth::DepositPreauth;
pub use escrow::Escrow;
pub use nftoken_offer::NFTokenOffer;
pub use offer::Offer;
pub use ripple_state::RippleState;
pub use signer_list::SignerList;
pub use ticket::Ticket;

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use serde_json::Value;

use crate::core::binarycodec::types::STObject;
use crate::core::definitions::get_ledger_entry_type_name;
use crate::ledger::exceptions::{LedgerException, LedgerResult};

/// Serialize a ledger-object field map through the real object codec.
pub(crate) fn encode_object(value: Value) -> LedgerResult<Vec<u8>> {
    let object = STObject::try_from_value(value, false)?;
    Ok(object.as_ref().to_vec())
}

/// Parse a ledger object's raw bytes back into its field map.
pub(crate) fn decode_object(bytes: &[u8]) -> LedgerResult<Value> {
    let object = STObject::from_bytes(bytes)?;
    Ok(object.to_value()?)
}

fn field<'a>(value: &'a Value, name: &str) -> LedgerResult<&'a Value> {
    value
        .get(name)
        .ok_or_else(|| LedgerException::Malformed(alloc::format!("missing field {name}")))
}

fn string_field(value: &Value, name: &str) -> LedgerResult<String> {
    field(value, name)?
        .as_str()
        .map(|s| s.to_string())
        .ok_or_else(|| LedgerException::Malformed(alloc::format!("{name} is not a string")))
}

fn u32_field(value: &Value, name: &str) -> LedgerResult<u32> {
    field(value, name)?
        .as_u64()
        .map(|v| v as u32)
        .ok_or_else(|| LedgerException::Malformed(alloc::format!("{name} is not a u32")))
}

/// A typed-projection dispatch analogous to Component D's object codec, but
/// over the ledger-entry-type discriminant: reports `UnknownLedgerEntryType`
/// rather than silently skipping, per `spec.md` §4.6.
pub fn ledger_entry_type_name(type_code: &i16) -> LedgerResult<&String> {
    get_ledger_entry_type_name(type_code).ok_or(LedgerException::UnknownLedgerEntryType(*type_code))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn unknown_ledger_entry_type_is_an_error() {
        assert_eq!(
            ledger_entry_type_name(&-12345),
            Err(LedgerException::UnknownLedgerEntryType(-12345))
        );
    }
}
