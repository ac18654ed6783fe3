//! Shared helpers every `Transactor` and the pipeline itself lean on:
//! reading/writing `AccountRoot`, the fee/sequence/reserve arithmetic of
//! `spec.md` §4.7, and small JSON field accessors over the submitted
//! transaction `Value`.

use core::convert::TryFrom;
use serde_json::Value;

use crate::core::binarycodec::types::serialized_type::Buffered;
use crate::core::binarycodec::types::{AccountId, Currency};
use crate::engine::config::EngineConfig;
use crate::engine::result::ResultCode;
use crate::ledger::exceptions::LedgerException;
use crate::ledger::keylet::{self, Keylet};
use crate::ledger::objects::offer::OfferAmount;
use crate::ledger::objects::AccountRoot;
use crate::ledger::store::{TransactionalView, View};

pub fn tx_str<'a>(tx: &'a Value, field: &str) -> Option<&'a str> {
    tx.get(field).and_then(Value::as_str)
}

pub fn tx_u32(tx: &Value, field: &str) -> Option<u32> {
    tx.get(field).and_then(Value::as_u64).map(|v| v as u32)
}

/// Parse a plain drops string (`spec.md` §3.2 Amount.Native): no decimal
/// point, no sign, at most 10^17.
pub fn tx_native_drops(tx: &Value, field: &str) -> Option<u64> {
    tx_str(tx, field)?.parse::<u64>().ok().filter(|drops| *drops <= 100_000_000_000_000_000)
}

fn account_id(address: &str) -> Result<AccountId, ResultCode> {
    AccountId::try_from(address).map_err(|_| ResultCode::TemInvalidFlag)
}

pub fn account_keylet(address: &str) -> Result<Keylet, ResultCode> {
    keylet::account(account_id(address)?.as_ref()).map_err(|_| ResultCode::TemMalformed)
}

/// The 20-byte AccountID wire encoding of a classic address, for callers
/// that need to build a keylet `account_keylet` doesn't cover directly
/// (`Offer`, `Escrow`, `NFTokenOffer`, trust-line keylets).
pub fn account_id_bytes(address: &str) -> Result<[u8; 20], ResultCode> {
    account_id(address)?.as_ref().try_into().map_err(|_| ResultCode::TemMalformed)
}

pub fn offer_keylet(address: &str, sequence: u32) -> Result<Keylet, ResultCode> {
    keylet::offer(&account_id_bytes(address)?, sequence).map_err(|_| ResultCode::TemMalformed)
}

pub fn escrow_keylet(address: &str, sequence: u32) -> Result<Keylet, ResultCode> {
    keylet::escrow(&account_id_bytes(address)?, sequence).map_err(|_| ResultCode::TemMalformed)
}

pub fn nftoken_offer_keylet(address: &str, sequence: u32) -> Result<Keylet, ResultCode> {
    keylet::nftoken_offer(&account_id_bytes(address)?, sequence).map_err(|_| ResultCode::TemMalformed)
}

/// Load an `AccountRoot` by classic address. Absence is not itself an
/// error here — callers distinguish "doesn't exist" with their own result
/// code (`terNO_ACCOUNT` for a missing source, `tecNO_DST` for a missing
/// destination, etc).
pub fn read_account(view: &dyn View, address: &str) -> Result<Option<AccountRoot>, ResultCode> {
    let keylet = account_keylet(address)?;
    if !view.exists(&keylet) {
        return Ok(None);
    }
    let bytes = view.read(&keylet).map_err(|_| ResultCode::TefFailure)?;
    AccountRoot::from_bytes(&bytes).map(Some).map_err(|_| ResultCode::TefFailure)
}

pub fn write_account(
    view: &mut dyn TransactionalView,
    root: &AccountRoot,
) -> Result<(), ResultCode> {
    let keylet = account_keylet(&root.account)?;
    let bytes = root.to_bytes().map_err(|_| ResultCode::TefFailure)?;
    view.write(&keylet, bytes).map_err(|_| ResultCode::TefFailure)
}

/// Which sequence source a transaction consumes (`spec.md` §4.7).
pub enum SequenceSource {
    Ordinary,
    Ticket(u32),
}

pub fn sequence_source(tx: &Value) -> SequenceSource {
    match tx_u32(tx, "TicketSequence") {
        Some(ticket) => SequenceSource::Ticket(ticket),
        None => SequenceSource::Ordinary,
    }
}

/// Preclaim-time sequence/ticket validation, shared by every transactor
/// and by the Batch outer (`spec.md` §4.7/§4.8). Does not mutate.
pub fn check_sequence(
    tx: &Value,
    view: &dyn View,
    account: &AccountRoot,
) -> Result<(), ResultCode> {
    match sequence_source(tx) {
        SequenceSource::Ordinary => {
            let submitted = tx_u32(tx, "Sequence").ok_or(ResultCode::TemMalformed)?;
            if submitted < account.sequence {
                Err(ResultCode::TefPastSeq)
            } else if submitted > account.sequence {
                Err(ResultCode::TerPreSeq)
            } else {
                Ok(())
            }
        }
        SequenceSource::Ticket(ticket_sequence) => {
            let ticket_keylet =
                keylet::ticket(account_id(&account.account)?.as_ref(), ticket_sequence)
                    .map_err(|_| ResultCode::TemMalformed)?;
            if !view.exists(&ticket_keylet) {
                return Err(ResultCode::TerPreSeq);
            }
            Ok(())
        }
    }
}

/// Charge `fee` against `account` and consume its sequence/ticket, always —
/// this always lands once Preclaim has passed, whether the transaction's
/// own effect later succeeds (`tes`) or is rolled back (`tec`).
pub fn charge_fee_and_consume_sequence(
    tx: &Value,
    view: &mut dyn TransactionalView,
    fee: u64,
) -> Result<(), ResultCode> {
    let address = tx_str(tx, "Account").ok_or(ResultCode::TemMalformed)?;
    let mut account = read_account(view, address)?.ok_or(ResultCode::TerNoAccount)?;
    account.balance = account.balance.checked_sub(fee).ok_or(ResultCode::TerInsufFeeB)?;

    match sequence_source(tx) {
        SequenceSource::Ordinary => {
            account.sequence = account.sequence.checked_add(1).ok_or(ResultCode::TefFailure)?;
        }
        SequenceSource::Ticket(ticket_sequence) => {
            let ticket_keylet = keylet::ticket(account_id(address)?.as_ref(), ticket_sequence)
                .map_err(|_| ResultCode::TemMalformed)?;
            view.delete(&ticket_keylet).map_err(|_| ResultCode::TefFailure)?;
            account.owner_count = account.owner_count.saturating_sub(1);
            let owner_dir = account_owner_dir_keylet(address)?;
            crate::ledger::directory::DirectoryNode::remove(view, &owner_dir, &ticket_keylet)
                .map_err(|_| ResultCode::TefFailure)?;
        }
    }
    write_account(view, &account)
}

pub fn account_owner_dir_keylet(address: &str) -> Result<Keylet, ResultCode> {
    keylet::owner_dir(account_id(address)?.as_ref()).map_err(|_| ResultCode::TemMalformed)
}

/// `spec.md` §4.7: an `Apply` path must not reduce an account's balance
/// below its current reserve unless the resulting code is
/// `tecINSUFFICIENT_RESERVE`.
pub fn has_spendable_balance(
    account: &AccountRoot,
    config: &EngineConfig,
    amount: u64,
) -> bool {
    let reserve = account.reserve(config.reserve_base, config.reserve_increment);
    account.balance >= reserve.saturating_add(amount)
}

pub fn ledger_exception_to_result(error: LedgerException) -> ResultCode {
    match error {
        LedgerException::NotFound => ResultCode::TerNoAccount,
        LedgerException::DirectoryFull => ResultCode::TecDirFull,
        LedgerException::NoSuitableNftokenPage => ResultCode::TecNoSuitableNftokenPage,
        _ => ResultCode::TefFailure,
    }
}

/// Parse a tx field holding an Amount JSON shape (`spec.md` §6.2): a plain
/// drops string, or an issued-currency object.
pub fn parse_amount(tx: &Value, field: &str) -> Result<OfferAmount, ResultCode> {
    let value = tx.get(field).ok_or(ResultCode::TemMalformed)?;
    OfferAmount::from_json(value).map_err(|_| ResultCode::TemBadAmount)
}

/// The 20-byte wire encoding of a 3-letter ISO or 40-hex currency code
/// (`spec.md` §4.2), used to derive a `RippleState` keylet.
pub fn currency_bytes(code: &str) -> Result<[u8; 20], ResultCode> {
    let currency = Currency::try_from(code).map_err(|_| ResultCode::TemBadCurrency)?;
    currency.get_buffer().try_into().map_err(|_| ResultCode::TemBadCurrency)
}
