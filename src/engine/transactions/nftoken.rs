//! `NFTokenMint`/`NFTokenBurn`/`NFTokenCreateOffer`/`NFTokenCancelOffer`/
//! `NFTokenAcceptOffer` (`spec.md` §3.3/§4.5): non-fungible tokens, stored in
//! the owner's [`crate::ledger::nftoken_page`] chain and traded through
//! resting [`crate::ledger::objects::NFTokenOffer`] entries.
//!
//! `NFTokenID` construction follows the public protocol layout (XLS-20):
//! `[Flags:2][TransferFee:2][Issuer:20][scrambled Taxon:4][Sequence:4]`,
//! 32 bytes. The taxon is XORed with a cipher derived from the minted
//! sequence number so that tokens minted in the same taxon do not sort
//! contiguously by `NFTokenID` alone (`DESIGN.md`).

use serde_json::Value;

use crate::engine::common::{self, tx_str, tx_u32};
use crate::engine::config::EngineConfig;
use crate::engine::result::ResultCode;
use crate::engine::transactions::Transactor;
use crate::ledger::directory::DirectoryNode;
use crate::ledger::nftoken_page::{self, NFToken};
use crate::ledger::objects::NFTokenOffer;
use crate::ledger::store::{TransactionalView, View};

use crate::ledger::objects::nftoken_offer::SELL_NFTOKEN_FLAG;

/// Scramble a taxon with the XLS-20 cipher so sequentially minted tokens in
/// one taxon don't sort contiguously by `NFTokenID`.
fn scramble_taxon(taxon: u32, minted_sequence: u32) -> u32 {
    let cipher = (minted_sequence as u64)
        .wrapping_mul(384_160_001)
        .wrapping_add(2459) as u32;
    taxon ^ cipher
}

fn build_nftoken_id(flags: u16, transfer_fee: u16, issuer: &[u8; 20], taxon: u32, minted_sequence: u32) -> [u8; 32] {
    let mut id = [0u8; 32];
    id[0..2].copy_from_slice(&flags.to_be_bytes());
    id[2..4].copy_from_slice(&transfer_fee.to_be_bytes());
    id[4..24].copy_from_slice(issuer);
    id[24..28].copy_from_slice(&scramble_taxon(taxon, minted_sequence).to_be_bytes());
    id[28..32].copy_from_slice(&minted_sequence.to_be_bytes());
    id
}

fn nftoken_flags(tx: &Value) -> u16 {
    tx_u32(tx, "Flags").unwrap_or(0) as u16
}

pub struct NFTokenMint;

impl Transactor for NFTokenMint {
    fn preflight(&self, tx: &Value, _config: &EngineConfig) -> Result<(), ResultCode> {
        tx_str(tx, "Account").ok_or(ResultCode::TemMalformed)?;
        tx_u32(tx, "NFTokenTaxon").ok_or(ResultCode::TemMalformed)?;
        if let Some(fee) = tx_u32(tx, "TransferFee") {
            if fee > 50_000 {
                return Err(ResultCode::TemBadFee);
            }
        }
        Ok(())
    }

    fn preclaim(&self, tx: &Value, view: &dyn View, _config: &EngineConfig) -> Result<(), ResultCode> {
        let account = tx_str(tx, "Account").ok_or(ResultCode::TemMalformed)?;
        common::read_account(view, account)?.ok_or(ResultCode::TerNoAccount)?;
        Ok(())
    }

    fn apply(&self, tx: &Value, view: &mut dyn TransactionalView, config: &EngineConfig) -> ResultCode {
        let Some(account) = tx_str(tx, "Account") else { return ResultCode::TefFailure };
        let Some(taxon) = tx_u32(tx, "NFTokenTaxon") else { return ResultCode::TefFailure };
        let transfer_fee = tx_u32(tx, "TransferFee").unwrap_or(0) as u16;
        let flags = nftoken_flags(tx);

        let mut root = match common::read_account(view, account) {
            Ok(Some(root)) => root,
            Ok(None) => return ResultCode::TerNoAccount,
            Err(code) => return code,
        };
        let account_bytes = match common::account_id_bytes(account) {
            Ok(bytes) => bytes,
            Err(code) => return code,
        };

        let minted_sequence = root.minted_nftokens;
        let nftoken_id = build_nftoken_id(flags, transfer_fee, &account_bytes, taxon, minted_sequence);

        let page_count_before = match nftoken_page::page_count(view, &account_bytes) {
            Ok(count) => count,
            Err(_) => return ResultCode::TefFailure,
        };
        let uri = tx_str(tx, "URI").map(|uri| uri.as_bytes().to_vec());
        if nftoken_page::insert(view, &account_bytes, NFToken { token_id: nftoken_id, uri }).is_err() {
            return ResultCode::TecNoSuitableNftokenPage;
        }
        let page_count_after = match nftoken_page::page_count(view, &account_bytes) {
            Ok(count) => count,
            Err(_) => return ResultCode::TefFailure,
        };

        root.minted_nftokens = root.minted_nftokens.saturating_add(1);
        if page_count_after > page_count_before {
            root.owner_count = root.owner_count.saturating_add(1);
        }
        match common::write_account(view, &root) {
            Ok(()) => ResultCode::TesSuccess,
            Err(code) => code,
        }
    }
}

pub struct NFTokenBurn;

impl Transactor for NFTokenBurn {
    fn preflight(&self, tx: &Value, _config: &EngineConfig) -> Result<(), ResultCode> {
        tx_str(tx, "Account").ok_or(ResultCode::TemMalformed)?;
        tx_str(tx, "NFTokenID").ok_or(ResultCode::TemMalformed)?;
        Ok(())
    }

    fn preclaim(&self, tx: &Value, view: &dyn View, _config: &EngineConfig) -> Result<(), ResultCode> {
        let account = tx_str(tx, "Account").ok_or(ResultCode::TemMalformed)?;
        common::read_account(view, account)?.ok_or(ResultCode::TerNoAccount)?;
        Ok(())
    }

    fn apply(&self, tx: &Value, view: &mut dyn TransactionalView, _config: &EngineConfig) -> ResultCode {
        let Some(account) = tx_str(tx, "Account") else { return ResultCode::TefFailure };
        let Some(nftoken_id_hex) = tx_str(tx, "NFTokenID") else { return ResultCode::TefFailure };
        let Ok(nftoken_id_bytes) = hex::decode(nftoken_id_hex) else { return ResultCode::TemMalformed };
        if nftoken_id_bytes.len() != 32 {
            return ResultCode::TemMalformed;
        }
        let mut nftoken_id = [0u8; 32];
        nftoken_id.copy_from_slice(&nftoken_id_bytes);

        // This core burns a token out of the submitting account's own page
        // chain; an issuer burning a token currently held by a different
        // account (via `lsfBurnable`) is out of scope (`DESIGN.md`).
        let account_bytes = match common::account_id_bytes(account) {
            Ok(bytes) => bytes,
            Err(code) => return code,
        };
        let page_count_before = match nftoken_page::page_count(view, &account_bytes) {
            Ok(count) => count,
            Err(_) => return ResultCode::TefFailure,
        };
        match nftoken_page::remove(view, &account_bytes, &nftoken_id) {
            Ok(Some(_)) => {}
            Ok(None) => return ResultCode::TecNoEntry,
            Err(_) => return ResultCode::TefFailure,
        }
        let page_count_after = match nftoken_page::page_count(view, &account_bytes) {
            Ok(count) => count,
            Err(_) => return ResultCode::TefFailure,
        };

        let mut root = match common::read_account(view, account) {
            Ok(Some(root)) => root,
            Ok(None) => return ResultCode::TerNoAccount,
            Err(code) => return code,
        };
        if page_count_after < page_count_before {
            root.owner_count = root.owner_count.saturating_sub(1);
        }
        root.burned_nftokens = root.burned_nftokens.saturating_add(1);
        match common::write_account(view, &root) {
            Ok(()) => ResultCode::TesSuccess,
            Err(code) => code,
        }
    }
}

pub struct NFTokenCreateOffer;

impl Transactor for NFTokenCreateOffer {
    fn preflight(&self, tx: &Value, _config: &EngineConfig) -> Result<(), ResultCode> {
        tx_str(tx, "Account").ok_or(ResultCode::TemMalformed)?;
        tx_str(tx, "NFTokenID").ok_or(ResultCode::TemMalformed)?;
        common::tx_native_drops(tx, "Amount").ok_or(ResultCode::TemBadAmount)?;
        Ok(())
    }

    fn preclaim(&self, tx: &Value, view: &dyn View, _config: &EngineConfig) -> Result<(), ResultCode> {
        let account = tx_str(tx, "Account").ok_or(ResultCode::TemMalformed)?;
        common::read_account(view, account)?.ok_or(ResultCode::TerNoAccount)?;
        if let Some(destination) = tx_str(tx, "Destination") {
            common::read_account(view, destination)?.ok_or(ResultCode::TecNoDst)?;
        }
        Ok(())
    }

    fn apply(&self, tx: &Value, view: &mut dyn TransactionalView, config: &EngineConfig) -> ResultCode {
        let Some(account) = tx_str(tx, "Account") else { return ResultCode::TefFailure };
        let Some(sequence) = tx_u32(tx, "Sequence") else { return ResultCode::TefFailure };
        let Some(nftoken_id_hex) = tx_str(tx, "NFTokenID") else { return ResultCode::TefFailure };
        let Ok(nftoken_id_bytes) = hex::decode(nftoken_id_hex) else { return ResultCode::TemMalformed };
        if nftoken_id_bytes.len() != 32 {
            return ResultCode::TemMalformed;
        }
        let mut nftoken_id = [0u8; 32];
        nftoken_id.copy_from_slice(&nftoken_id_bytes);
        let Some(amount) = common::tx_native_drops(tx, "Amount") else { return ResultCode::TemBadAmount };
        let is_sell = nftoken_flags(tx) as u32 & SELL_NFTOKEN_FLAG != 0;

        let mut root = match common::read_account(view, account) {
            Ok(Some(root)) => root,
            Ok(None) => return ResultCode::TerNoAccount,
            Err(code) => return code,
        };
        if is_sell {
            let account_bytes = match common::account_id_bytes(account) {
                Ok(bytes) => bytes,
                Err(code) => return code,
            };
            match nftoken_page::find(view, &account_bytes, &nftoken_id) {
                Ok(Some(_)) => {}
                Ok(None) => return ResultCode::TecNoPermission,
                Err(_) => return ResultCode::TefFailure,
            }
        }

        let reserve = root.reserve(config.reserve_base, config.reserve_increment) + config.reserve_increment;
        if root.balance < reserve {
            return ResultCode::TecInsufficientReserve;
        }

        let offer_keylet = match common::nftoken_offer_keylet(account, sequence) {
            Ok(keylet) => keylet,
            Err(code) => return code,
        };
        let owner_dir = match common::account_owner_dir_keylet(account) {
            Ok(keylet) => keylet,
            Err(code) => return code,
        };
        let owner_node = match DirectoryNode::insert(view, &owner_dir, offer_keylet) {
            Ok(node) => node,
            Err(_) => return ResultCode::TecDirFull,
        };

        let offer = NFTokenOffer {
            account: account.into(),
            nftoken_id,
            amount,
            owner: None,
            destination: tx_str(tx, "Destination").map(Into::into),
            expiration: tx_u32(tx, "Expiration"),
            flags: nftoken_flags(tx) as u32,
            owner_node,
        };
        let bytes = match offer.to_bytes() {
            Ok(bytes) => bytes,
            Err(_) => return ResultCode::TefFailure,
        };
        if view.write(&offer_keylet, bytes).is_err() {
            return ResultCode::TefFailure;
        }

        root.owner_count = root.owner_count.saturating_add(1);
        match common::write_account(view, &root) {
            Ok(()) => ResultCode::TesSuccess,
            Err(code) => code,
        }
    }
}

pub struct NFTokenCancelOffer;

impl Transactor for NFTokenCancelOffer {
    fn preflight(&self, tx: &Value, _config: &EngineConfig) -> Result<(), ResultCode> {
        tx_str(tx, "Account").ok_or(ResultCode::TemMalformed)?;
        let offers = tx.get("NFTokenOffers").and_then(Value::as_array).ok_or(ResultCode::TemMalformed)?;
        if offers.is_empty() || offers.iter().any(|entry| entry.as_str().is_none()) {
            return Err(ResultCode::TemMalformed);
        }
        Ok(())
    }

    fn preclaim(&self, tx: &Value, view: &dyn View, _config: &EngineConfig) -> Result<(), ResultCode> {
        let account = tx_str(tx, "Account").ok_or(ResultCode::TemMalformed)?;
        common::read_account(view, account)?.ok_or(ResultCode::TerNoAccount)?;
        Ok(())
    }

    fn apply(&self, tx: &Value, view: &mut dyn TransactionalView, _config: &EngineConfig) -> ResultCode {
        let Some(account) = tx_str(tx, "Account") else { return ResultCode::TefFailure };
        let Some(offers) = tx.get("NFTokenOffers").and_then(Value::as_array) else {
            return ResultCode::TefFailure;
        };

        for entry in offers {
            let Some(hex_index) = entry.as_str() else { return ResultCode::TemMalformed };
            let (keylet, offer) = match resolve_offer(view, hex_index) {
                Ok(pair) => pair,
                Err(ResultCode::TecNoEntry) => continue,
                Err(code) => return code,
            };
            if offer.account != account && offer.owner.as_deref() != Some(account) {
                return ResultCode::TecNoPermission;
            }
            if let Err(code) = remove_offer(view, &keylet, &offer) {
                return code;
            }
        }
        ResultCode::TesSuccess
    }
}

pub struct NFTokenAcceptOffer;

impl Transactor for NFTokenAcceptOffer {
    fn preflight(&self, tx: &Value, _config: &EngineConfig) -> Result<(), ResultCode> {
        tx_str(tx, "Account").ok_or(ResultCode::TemMalformed)?;
        let sell = tx_str(tx, "NFTokenSellOffer");
        let buy = tx_str(tx, "NFTokenBuyOffer");
        if sell.is_none() && buy.is_none() {
            return Err(ResultCode::TemMalformed);
        }
        Ok(())
    }

    fn preclaim(&self, tx: &Value, view: &dyn View, _config: &EngineConfig) -> Result<(), ResultCode> {
        let account = tx_str(tx, "Account").ok_or(ResultCode::TemMalformed)?;
        common::read_account(view, account)?.ok_or(ResultCode::TerNoAccount)?;
        Ok(())
    }

    fn apply(&self, tx: &Value, view: &mut dyn TransactionalView, _config: &EngineConfig) -> ResultCode {
        let Some(account) = tx_str(tx, "Account") else { return ResultCode::TefFailure };

        // Offers are identified by the hex-encoded index of their own
        // `NFTokenOffer` ledger entry, matching how the real protocol
        // addresses resting NFToken offers (`spec.md` §4.5 edge cases) —
        // the same keylet `NFTokenCreateOffer::apply` derived from
        // `(creator, sequence)` when the offer was made.
        let sell = match tx_str(tx, "NFTokenSellOffer") {
            Some(hex_index) => match resolve_offer(view, hex_index) {
                Ok(pair) => Some(pair),
                Err(code) => return code,
            },
            None => None,
        };
        let buy = match tx_str(tx, "NFTokenBuyOffer") {
            Some(hex_index) => match resolve_offer(view, hex_index) {
                Ok(pair) => Some(pair),
                Err(code) => return code,
            },
            None => None,
        };

        let (seller, buyer, nftoken_id, amount) = match (&sell, &buy) {
            (Some((_, sell)), Some((_, buy))) => {
                if sell.nftoken_id != buy.nftoken_id {
                    return ResultCode::TecNftokenBuySellMismatch;
                }
                (sell.account.clone(), buy.account.clone(), sell.nftoken_id, sell.amount)
            }
            (Some((_, sell)), None) => (sell.account.clone(), account.to_string(), sell.nftoken_id, sell.amount),
            (None, Some((_, buy))) => (account.to_string(), buy.account.clone(), buy.nftoken_id, buy.amount),
            (None, None) => return ResultCode::TemMalformed,
        };
        if seller == buyer {
            return ResultCode::TecCantAcceptOwnNftokenOffer;
        }

        let seller_bytes = match common::account_id_bytes(&seller) {
            Ok(bytes) => bytes,
            Err(code) => return code,
        };
        match nftoken_page::remove(view, &seller_bytes, &nftoken_id) {
            Ok(Some(token)) => {
                let buyer_bytes = match common::account_id_bytes(&buyer) {
                    Ok(bytes) => bytes,
                    Err(code) => return code,
                };
                if nftoken_page::insert(view, &buyer_bytes, token).is_err() {
                    return ResultCode::TecNoSuitableNftokenPage;
                }
            }
            Ok(None) => return ResultCode::TecNoPermission,
            Err(_) => return ResultCode::TefFailure,
        }

        if let Some((keylet, offer)) = &sell {
            if let Err(code) = remove_offer(view, keylet, offer) {
                return code;
            }
        }
        if let Some((keylet, offer)) = &buy {
            if let Err(code) = remove_offer(view, keylet, offer) {
                return code;
            }
        }

        let mut seller_root = match common::read_account(view, &seller) {
            Ok(Some(root)) => root,
            Ok(None) => return ResultCode::TerNoAccount,
            Err(code) => return code,
        };
        seller_root.balance = match seller_root.balance.checked_add(amount) {
            Some(balance) => balance,
            None => return ResultCode::TecInternal,
        };
        if let Err(code) = common::write_account(view, &seller_root) {
            return code;
        }

        let mut buyer_root = match common::read_account(view, &buyer) {
            Ok(Some(root)) => root,
            Ok(None) => return ResultCode::TerNoAccount,
            Err(code) => return code,
        };
        buyer_root.balance = match buyer_root.balance.checked_sub(amount) {
            Some(balance) => balance,
            None => return ResultCode::TecInsufficientReserve,
        };
        match common::write_account(view, &buyer_root) {
            Ok(()) => ResultCode::TesSuccess,
            Err(code) => code,
        }
    }
}

/// Resolve an `NFTokenOffer` and its own keylet from the hex-encoded index
/// the transaction names it by.
fn resolve_offer(
    view: &dyn View,
    hex_index: &str,
) -> Result<(crate::ledger::keylet::Keylet, NFTokenOffer), ResultCode> {
    let bytes = hex::decode(hex_index).map_err(|_| ResultCode::TemMalformed)?;
    if bytes.len() != 32 {
        return Err(ResultCode::TemMalformed);
    }
    let mut key = [0u8; 32];
    key.copy_from_slice(&bytes);
    let ledger_entry_type = *crate::core::definitions::get_ledger_entry_type_code("NFTokenOffer")
        .ok_or(ResultCode::TemMalformed)?;
    let keylet = crate::ledger::keylet::Keylet { ledger_entry_type, key };
    if !view.exists(&keylet) {
        return Err(ResultCode::TecNoEntry);
    }
    let bytes = view.read(&keylet).map_err(|_| ResultCode::TefFailure)?;
    let offer = NFTokenOffer::from_bytes(&bytes).map_err(|_| ResultCode::TefFailure)?;
    Ok((keylet, offer))
}

/// Remove `offer`'s ledger entry (already known at `keylet`) from storage
/// and from its creator's owner directory, and give back the reserve slot.
fn remove_offer(
    view: &mut dyn TransactionalView,
    keylet: &crate::ledger::keylet::Keylet,
    offer: &NFTokenOffer,
) -> Result<(), ResultCode> {
    view.delete(keylet).map_err(|_| ResultCode::TefFailure)?;
    let owner_dir = common::account_owner_dir_keylet(&offer.account)?;
    let _ = DirectoryNode::remove(view, &owner_dir, keylet);
    let mut root = common::read_account(view, &offer.account)?.ok_or(ResultCode::TerNoAccount)?;
    root.owner_count = root.owner_count.saturating_sub(1);
    common::write_account(view, &root)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ledger::objects::AccountRoot;
    use crate::ledger::store::{MemoryStore, MemoryTransactionalView};
    use serde_json::json;

    const ALICE: &str = "rMBzp8CgpE441cp5PVyA9rpVV7oT8hP3ys";
    const BOB: &str = "rvYAfWj5gh67oV6fW32ZzP3Aw4Eubs59B";

    fn config() -> EngineConfig {
        EngineConfig { base_fee: 10, reserve_base: 10_000_000, reserve_increment: 2_000_000, ..Default::default() }
    }

    fn fund(store: &mut MemoryStore, address: &str, balance: u64) {
        let mut view = MemoryTransactionalView::new(store);
        common::write_account(&mut view, &AccountRoot::new(address, balance)).unwrap();
        view.commit();
    }

    #[test]
    fn mint_increments_minted_count_and_owner_count_on_new_page() {
        let mut store = MemoryStore::new();
        fund(&mut store, ALICE, 100_000_000);
        let tx = json!({ "Account": ALICE, "NFTokenTaxon": 0 });
        let mut view = MemoryTransactionalView::new(&mut store);
        assert_eq!(NFTokenMint.apply(&tx, &mut view, &config()), ResultCode::TesSuccess);
        view.commit();
        let alice = common::read_account(&store, ALICE).unwrap().unwrap();
        assert_eq!(alice.minted_nftokens, 1);
        assert_eq!(alice.owner_count, 1);
    }

    #[test]
    fn taxon_scrambling_differs_by_minted_sequence() {
        let id_0 = build_nftoken_id(0, 0, &[9u8; 20], 7, 0);
        let id_1 = build_nftoken_id(0, 0, &[9u8; 20], 7, 1);
        assert_ne!(&id_0[24..28], &id_1[24..28]);
        assert_eq!(&id_0[28..32], &0u32.to_be_bytes());
        assert_eq!(&id_1[28..32], &1u32.to_be_bytes());
    }

    #[test]
    fn burn_by_owner_decrements_owner_count_when_last_page_empties() {
        let mut store = MemoryStore::new();
        fund(&mut store, ALICE, 100_000_000);
        let mint_tx = json!({ "Account": ALICE, "NFTokenTaxon": 0 });
        {
            let mut view = MemoryTransactionalView::new(&mut store);
            NFTokenMint.apply(&mint_tx, &mut view, &config());
            view.commit();
        }
        let account_bytes = common::account_id_bytes(ALICE).unwrap();
        assert_eq!(nftoken_page::page_count(&store, &account_bytes).unwrap(), 1);

        // The first mint for a fresh account always derives this exact id:
        // taxon 0, minted sequence 0, no flags/fee set.
        let nftoken_id = build_nftoken_id(0, 0, &account_bytes, 0, 0);
        let burn_tx = json!({ "Account": ALICE, "NFTokenID": hex::encode_upper(nftoken_id) });
        let mut view = MemoryTransactionalView::new(&mut store);
        assert_eq!(NFTokenBurn.apply(&burn_tx, &mut view, &config()), ResultCode::TesSuccess);
        view.commit();
        let alice = common::read_account(&store, ALICE).unwrap().unwrap();
        assert_eq!(alice.burned_nftokens, 1);
        assert_eq!(alice.owner_count, 0);
    }

    #[test]
    fn create_offer_requires_destination_account_to_exist() {
        let mut store = MemoryStore::new();
        fund(&mut store, ALICE, 100_000_000);
        let tx = json!({
            "Account": ALICE, "NFTokenID": hex::encode_upper([1u8; 32]),
            "Amount": "1000000", "Sequence": 1, "Destination": BOB,
        });
        let err = NFTokenCreateOffer.preclaim(&tx, &store, &config()).unwrap_err();
        assert_eq!(err, ResultCode::TecNoDst);
    }
}
