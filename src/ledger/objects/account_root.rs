//! `AccountRoot` (`spec.md` §3.3, ledger-entry-type `0x0061`): the entry
//! every other engine computation (fee, reserve, sequence, ticket
//! consumption) reads and mutates.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::convert::TryFrom;
use serde_json::{json, Value};

use crate::core::binarycodec::types::AccountId;
use crate::ledger::exceptions::{LedgerException, LedgerResult};
use crate::ledger::objects::{decode_object, encode_object, string_field, u32_field};

/// Typed projection over one `AccountRoot` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRoot {
    pub account: String,
    pub balance: u64,
    pub sequence: u32,
    pub owner_count: u32,
    pub flags: u32,
    pub minted_nftokens: u32,
    pub burned_nftokens: u32,
    /// `spec.md` §3.3: the account authorized to mint NFTokens on this
    /// account's behalf (`NFTokenMinter`), distinct from the issuing
    /// account itself.
    pub minter: Option<String>,
    /// Cross-currency transfer rate (billionths, `1_000_000_000` = no fee).
    /// Encoded for completeness; no transactor in this core charges it,
    /// since `Payment` only moves value along a single trust line
    /// (`payment.rs` doc comment) rather than rippling through one.
    pub transfer_rate: Option<u32>,
    /// Decimal-place rounding hint for this issuer's offers. Encoded for
    /// completeness; unused by `OfferCreate`, which does not cross offers
    /// against a book (`offer.rs` doc comment).
    pub tick_size: Option<u8>,
}

impl AccountRoot {
    /// A freshly funded account: sequence starts at 1, everything else at
    /// zero until the owner acquires reserve-charging objects.
    pub fn new(account: &str, balance: u64) -> Self {
        AccountRoot {
            account: account.to_string(),
            balance,
            sequence: 1,
            owner_count: 0,
            flags: 0,
            minted_nftokens: 0,
            burned_nftokens: 0,
            minter: None,
            transfer_rate: None,
            tick_size: None,
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> LedgerResult<Self> {
        let value = decode_object(bytes)?;
        Self::from_value(&value)
    }

    fn from_value(value: &Value) -> LedgerResult<Self> {
        let account = string_field(value, "Account")?;
        let balance = string_field(value, "Balance")?
            .parse::<u64>()
            .map_err(|_| LedgerException::Malformed("Balance is not a drops integer".into()))?;
        Ok(AccountRoot {
            account,
            balance,
            sequence: u32_field(value, "Sequence")?,
            owner_count: u32_field(value, "OwnerCount")?,
            flags: u32_field(value, "Flags")?,
            minted_nftokens: value.get("MintedNFTokens").and_then(Value::as_u64).unwrap_or(0) as u32,
            burned_nftokens: value.get("BurnedNFTokens").and_then(Value::as_u64).unwrap_or(0) as u32,
            minter: value.get("NFTokenMinter").and_then(Value::as_str).map(str::to_string),
            transfer_rate: value.get("TransferRate").and_then(Value::as_u64).map(|v| v as u32),
            tick_size: value.get("TickSize").and_then(Value::as_u64).map(|v| v as u8),
        })
    }

    pub fn to_bytes(&self) -> LedgerResult<Vec<u8>> {
        // Validate the classic-address shape the same way the encode path
        // for every other AccountID-typed field would, so a malformed
        // address is caught here rather than deep inside the codec.
        AccountId::try_from(self.account.as_str())?;
        let mut value = json!({
            "LedgerEntryType": "AccountRoot",
            "Account": self.account,
            "Balance": self.balance.to_string(),
            "Sequence": self.sequence,
            "OwnerCount": self.owner_count,
            "Flags": self.flags,
        });
        if self.minted_nftokens != 0 {
            value["MintedNFTokens"] = json!(self.minted_nftokens);
        }
        if self.burned_nftokens != 0 {
            value["BurnedNFTokens"] = json!(self.burned_nftokens);
        }
        if let Some(minter) = &self.minter {
            value["NFTokenMinter"] = json!(minter);
        }
        if let Some(transfer_rate) = self.transfer_rate {
            value["TransferRate"] = json!(transfer_rate);
        }
        if let Some(tick_size) = self.tick_size {
            value["TickSize"] = json!(tick_size);
        }
        encode_object(value)
    }

    /// The reserve this account must retain: `reserve_base +
    /// owner_count * reserve_increment` (`spec.md` §4.7).
    pub fn reserve(&self, reserve_base: u64, reserve_increment: u64) -> u64 {
        reserve_base + self.owner_count as u64 * reserve_increment
    }
}
