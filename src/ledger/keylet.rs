//! Keylet derivation: a keylet is `{type, key}`, a typed 32-byte index for
//! a ledger object. Every key is a domain-separated SHA512Half (the same
//! truncated-hash primitive the keypairs module already uses to derive
//! account IDs from public keys, see
//! `core::keypairs::utils::sha512_first_half`) over a namespace byte plus
//! object-specific inputs.

use alloc::string::ToString;
use alloc::vec::Vec;

use crate::core::definitions::get_ledger_entry_type_code;
use crate::core::keypairs::utils::sha512_first_half;
use crate::ledger::exceptions::{LedgerException, LedgerResult};

/// A typed, content-addressed key identifying one ledger object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Keylet {
    pub ledger_entry_type: i16,
    pub key: [u8; 32],
}

impl Keylet {
    fn new(entry_type_name: &str, parts: &[&[u8]]) -> LedgerResult<Self> {
        let ledger_entry_type = *get_ledger_entry_type_code(entry_type_name)
            .ok_or_else(|| LedgerException::Malformed(entry_type_name.to_string()))?;
        let mut buf: Vec<u8> = Vec::new();
        buf.extend_from_slice(&ledger_entry_type.to_be_bytes());
        for part in parts {
            buf.extend_from_slice(part);
        }
        Ok(Keylet {
            ledger_entry_type,
            key: sha512_first_half(&buf),
        })
    }
}

/// The `AccountRoot` keylet for a given 20-byte AccountID.
pub fn account(account_id: &[u8]) -> LedgerResult<Keylet> {
    Keylet::new("AccountRoot", &[account_id])
}

/// The owner directory root keylet for a given AccountID.
pub fn owner_dir(account_id: &[u8]) -> LedgerResult<Keylet> {
    Keylet::new("DirectoryNode", &[account_id])
}

/// The `Offer` keylet for `(account, sequence)`.
pub fn offer(account_id: &[u8], sequence: u32) -> LedgerResult<Keylet> {
    Keylet::new("Offer", &[account_id, &sequence.to_be_bytes()])
}

/// The trust-line (`RippleState`) keylet. `IsLowAccount` is decided by raw
/// byte comparison of the two 20-byte account IDs; the ordering is baked
/// into the hash so both callers derive the same key regardless of which
/// side they hold.
pub fn line(account_a: &[u8], account_b: &[u8], currency: &[u8]) -> LedgerResult<Keylet> {
    let (low, high) = if account_a < account_b {
        (account_a, account_b)
    } else {
        (account_b, account_a)
    };
    Keylet::new("RippleState", &[low, high, currency])
}

/// `true` iff `candidate` is the low account of the `(a, b)` pair under the
/// raw byte-comparison ordering rule.
pub fn is_low_account(candidate: &[u8], other: &[u8]) -> bool {
    candidate < other
}

/// The `Ticket` keylet for `(account, ticket_sequence)`.
pub fn ticket(account_id: &[u8], ticket_sequence: u32) -> LedgerResult<Keylet> {
    Keylet::new("Ticket", &[account_id, &ticket_sequence.to_be_bytes()])
}

/// The `SignerList` keylet for an account (XRPL only ever has one signer
/// list per account, at a fixed sub-index of zero).
pub fn signer_list(account_id: &[u8]) -> LedgerResult<Keylet> {
    Keylet::new("SignerList", &[account_id, &0u32.to_be_bytes()])
}

/// The `Escrow` keylet for `(account, sequence)`.
pub fn escrow(account_id: &[u8], sequence: u32) -> LedgerResult<Keylet> {
    Keylet::new("Escrow", &[account_id, &sequence.to_be_bytes()])
}

/// The `DepositPreauth` keylet for `(owner, authorized)`.
pub fn deposit_preauth(owner: &[u8], authorized: &[u8]) -> LedgerResult<Keylet> {
    Keylet::new("DepositPreauth", &[owner, authorized])
}

/// 12-byte "page-min" prefix: the high 96 bits of an NFTokenID, the value
/// that places a token within its owner's page chain.
pub fn nftoken_page_min_of(nftoken_id: &[u8; 32]) -> [u8; 12] {
    let mut out = [0u8; 12];
    out.copy_from_slice(&nftoken_id[0..12]);
    out
}

/// All-ones page-min: the top-of-chain sentinel (`NFTokenPageMax`).
pub const NFTOKEN_PAGE_MIN_MAX: [u8; 12] = [0xFF; 12];

/// The `NFTokenPage` keylet for `account_id || page_min`.
pub fn nftoken_page(account_id: &[u8], page_min: &[u8; 12]) -> LedgerResult<Keylet> {
    let ledger_entry_type = *get_ledger_entry_type_code("NFTokenPage")
        .ok_or_else(|| LedgerException::Malformed("NFTokenPage".to_string()))?;
    let mut key = [0u8; 32];
    key[0..20].copy_from_slice(account_id);
    key[20..32].copy_from_slice(page_min);
    Ok(Keylet { ledger_entry_type, key })
}

/// The top-of-chain `NFTokenPage` keylet for an account (all-ones page-min).
pub fn nftoken_page_max(account_id: &[u8]) -> LedgerResult<Keylet> {
    nftoken_page(account_id, &NFTOKEN_PAGE_MIN_MAX)
}

/// The `NFTokenOffer` keylet for `(account, sequence)`.
pub fn nftoken_offer(account_id: &[u8], sequence: u32) -> LedgerResult<Keylet> {
    Keylet::new("NFTokenOffer", &[account_id, &sequence.to_be_bytes()])
}

#[cfg(test)]
mod test {
    use super::*;

    const ALICE: [u8; 20] = [1u8; 20];
    const BOB: [u8; 20] = [2u8; 20];

    #[test]
    fn account_keylet_is_deterministic() {
        let a = account(&ALICE).unwrap();
        let b = account(&ALICE).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, account(&BOB).unwrap());
    }

    #[test]
    fn line_keylet_is_symmetric_in_account_order() {
        let currency = [3u8; 20];
        let ab = line(&ALICE, &BOB, &currency).unwrap();
        let ba = line(&BOB, &ALICE, &currency).unwrap();
        assert_eq!(ab, ba);
        assert!(is_low_account(&ALICE, &BOB));
        assert!(!is_low_account(&BOB, &ALICE));
    }

    #[test]
    fn nftoken_page_max_uses_all_ones_min() {
        let keylet = nftoken_page_max(&ALICE).unwrap();
        assert_eq!(&keylet.key[20..32], &NFTOKEN_PAGE_MIN_MAX);
        assert_eq!(&keylet.key[0..20], &ALICE);
    }

    #[test]
    fn offer_keylet_varies_with_sequence() {
        let a = offer(&ALICE, 1).unwrap();
        let b = offer(&ALICE, 2).unwrap();
        assert_ne!(a, b);
    }
}
