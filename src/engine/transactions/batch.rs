//! The `Batch` outer transaction (`spec.md` §4.8): runs a list of inner
//! transactions against one ledger view under one of four atomicity modes
//! named by the outer transaction's `Flags`. Each inner pays a zero `Fee`
//! (the outer transaction's own fee covers the whole batch) but still
//! consumes its submitter's `Sequence`/`TicketSequence` exactly like a
//! standalone submission would, via the same
//! [`common::charge_fee_and_consume_sequence`] helper `engine::pipeline`
//! uses for the outer transaction, called here with `fee = 0`.
//!
//! `engine::pipeline::submit` special-cases `"Batch"` to call
//! [`apply_batch`] directly rather than going through the generic
//! `Transactor::apply`, since a batch's outcome is a vector of inner codes
//! as well as one outer code. `Batch` still implements `Transactor` so it
//! sits in the dispatch table alongside every other type; its own `apply`
//! just discards the inner vector.

use alloc::vec::Vec;

use serde_json::Value;

use crate::engine::common::{self, tx_str, tx_u32};
use crate::engine::config::EngineConfig;
use crate::engine::pipeline::check_tx_sequence;
use crate::engine::result::ResultCode;
use crate::engine::transactions::{dispatch, Transactor};
use crate::ledger::store::{ScratchView, TransactionalView, View};

/// Every inner transaction must run, and if any fails the whole batch
/// (including every inner's fee/sequence charge) rolls back.
pub const TF_ALL_OR_NOTHING: u32 = 0x0001_0000;
/// Run inners in order; the batch keeps the first one whose result class is
/// `tes` and discards every other inner's own mutation.
pub const TF_ONLY_ONE: u32 = 0x0002_0000;
/// Run inners in order, keeping every `tes` result, stopping as soon as one
/// fails.
pub const TF_UNTIL_FAILURE: u32 = 0x0004_0000;
/// Run every inner regardless of any other inner's outcome.
pub const TF_INDEPENDENT: u32 = 0x0008_0000;
/// Set on each inner transaction's own `Flags`, marking it ineligible for
/// standalone submission outside a batch.
pub const TF_INNER_BATCH_TXN: u32 = 0x4000_0000;
/// `spec.md` §4.8: at most 8 batch signers may authorize a batch's inners.
pub const MAX_BATCH_SIGNERS: usize = 8;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    AllOrNothing,
    OnlyOne,
    UntilFailure,
    Independent,
}

fn batch_mode(tx: &Value) -> Result<Mode, ResultCode> {
    let flags = tx_u32(tx, "Flags").unwrap_or(0);
    let candidates = [
        (TF_ALL_OR_NOTHING, Mode::AllOrNothing),
        (TF_ONLY_ONE, Mode::OnlyOne),
        (TF_UNTIL_FAILURE, Mode::UntilFailure),
        (TF_INDEPENDENT, Mode::Independent),
    ];
    let mut found = None;
    for (bit, mode) in candidates {
        if flags & bit != 0 {
            if found.is_some() {
                return Err(ResultCode::TemInvalidFlag);
            }
            found = Some(mode);
        }
    }
    found.ok_or(ResultCode::TemInvalidFlag)
}

fn raw_transactions(tx: &Value) -> Result<&Vec<Value>, ResultCode> {
    tx.get("RawTransactions")
        .and_then(Value::as_array)
        .filter(|inners| !inners.is_empty())
        .ok_or(ResultCode::TemMalformed)
}

/// Every inner must name a known `TransactionType`, carry `tfInnerBatchTxn`
/// on its own `Flags`, and since the outer transaction's own fee covers the
/// whole batch, pay a literal zero `Fee` and carry no `SigningPubKey` of its
/// own (`spec.md` §4.8) — checked up front so a malformed inner rejects the
/// whole batch before any fee lands, regardless of mode.
fn validate_inner_shapes(inners: &[Value]) -> Result<(), ResultCode> {
    for inner in inners {
        let transaction_type = tx_str(inner, "TransactionType").ok_or(ResultCode::TemMalformed)?;
        if dispatch(transaction_type).is_none() {
            return Err(ResultCode::TemMalformed);
        }
        if tx_u32(inner, "Flags").unwrap_or(0) & TF_INNER_BATCH_TXN == 0 {
            return Err(ResultCode::TemInvalidFlag);
        }
        if tx_str(inner, "Fee") != Some("0") {
            return Err(ResultCode::TemMalformed);
        }
        if tx_str(inner, "SigningPubKey") != Some("") {
            return Err(ResultCode::TemMalformed);
        }
    }
    Ok(())
}

/// The classic addresses named in `tx`'s `"BatchSigners"` array, each
/// wrapped the way `SignerEntries`/`SignerEntry` wrap (`spec.md` §4.8 names
/// the field; the wrapper shape follows the `SignerList` convention this
/// codec already uses elsewhere for an `STArray` of `STObject`).
fn batch_signer_accounts(tx: &Value) -> Result<Vec<&str>, ResultCode> {
    let Some(signers) = tx.get("BatchSigners") else {
        return Ok(Vec::new());
    };
    let signers = signers.as_array().ok_or(ResultCode::TemMalformed)?;
    let mut accounts = Vec::with_capacity(signers.len());
    for signer in signers {
        let inner = signer.get("BatchSigner").ok_or(ResultCode::TemMalformed)?;
        accounts.push(tx_str(inner, "Account").ok_or(ResultCode::TemMalformed)?);
    }
    Ok(accounts)
}

/// `spec.md` §4.8: 0..8 optional batch signers authorize inners submitted by
/// an account other than the outer `Account`. Duplicate signers, a signer
/// equal to the outer account, more than 8 signers, or an inner account that
/// is neither the outer account nor an authorized signer are all preflight
/// rejects. Returns the signer count for the fee-sufficiency check.
fn validate_batch_signers(tx: &Value, account: &str, inners: &[Value]) -> Result<usize, ResultCode> {
    let signers = batch_signer_accounts(tx)?;
    if signers.len() > MAX_BATCH_SIGNERS {
        return Err(ResultCode::TemMalformed);
    }
    for (i, signer) in signers.iter().enumerate() {
        if *signer == account || signers[..i].contains(signer) {
            return Err(ResultCode::TemMalformed);
        }
    }
    for inner in inners {
        let inner_account = tx_str(inner, "Account").ok_or(ResultCode::TemMalformed)?;
        if inner_account != account && !signers.contains(&inner_account) {
            return Err(ResultCode::TemMalformed);
        }
    }
    Ok(signers.len())
}

/// `spec.md` §4.8: the outer fee must equal `(num_signers + 2) * base_fee +
/// base_fee * num_inner`; anything less (including an unparseable `Fee`) is
/// `telINSUF_FEE_P`.
fn check_outer_fee(tx: &Value, config: &EngineConfig, num_signers: usize, num_inners: usize) -> Result<(), ResultCode> {
    let required = (num_signers as u64 + 2) * config.base_fee + num_inners as u64 * config.base_fee;
    let fee = common::tx_native_drops(tx, "Fee").ok_or(ResultCode::TelInsufFeeP)?;
    if fee < required {
        return Err(ResultCode::TelInsufFeeP);
    }
    Ok(())
}

/// Preflight → sequence check → Preclaim → charge a zero fee and consume
/// the sequence → Apply, for one inner transaction. The fee/sequence charge
/// lands directly on `view`, so it survives even when the caller discards
/// the apply mutation (`apply` runs in its own nested [`ScratchView`]).
fn run_inner(inner: &Value, view: &mut dyn TransactionalView, config: &EngineConfig) -> ResultCode {
    let Some(transaction_type) = tx_str(inner, "TransactionType") else {
        return ResultCode::TemMalformed;
    };
    let Some(transactor) = dispatch(transaction_type) else {
        return ResultCode::TemMalformed;
    };

    if let Err(code) = transactor.preflight(inner, config) {
        return code;
    }
    if let Err(code) = check_tx_sequence(inner, view) {
        return code;
    }
    if let Err(code) = transactor.preclaim(inner, view, config) {
        return code;
    }
    if let Err(code) = common::charge_fee_and_consume_sequence(inner, view, 0) {
        return code;
    }

    let mut scratch = ScratchView::new(view);
    let code = transactor.apply(inner, &mut scratch, config);
    if code.success() {
        scratch.commit();
    } else {
        scratch.abandon();
    }
    code
}

fn apply_all_or_nothing(
    inners: &[Value],
    view: &mut dyn TransactionalView,
    config: &EngineConfig,
) -> (ResultCode, Vec<ResultCode>) {
    let mut scratch = ScratchView::new(view);
    let mut codes = Vec::with_capacity(inners.len());
    for inner in inners {
        let code = run_inner(inner, &mut scratch, config);
        let failed = !code.success();
        codes.push(code);
        if failed {
            // The whole scratch unwinds, inner charges included, but the
            // outer transaction's own fee/sequence charge already landed a
            // level up in `pipeline::submit` — the outer code is
            // `tesSUCCESS` regardless (`spec.md` §8.2.5).
            scratch.abandon();
            return (ResultCode::TesSuccess, codes);
        }
    }
    scratch.commit();
    (ResultCode::TesSuccess, codes)
}

fn apply_only_one(
    inners: &[Value],
    view: &mut dyn TransactionalView,
    config: &EngineConfig,
) -> (ResultCode, Vec<ResultCode>) {
    let mut codes = Vec::with_capacity(inners.len());
    let mut kept_one = false;
    for inner in inners {
        let code = run_inner(inner, view, config);
        let succeeded = code.success();
        codes.push(code);
        if succeeded {
            kept_one = true;
            break;
        }
    }
    let outer = if kept_one { ResultCode::TesSuccess } else { ResultCode::TecBatchFailure };
    (outer, codes)
}

fn apply_until_failure(
    inners: &[Value],
    view: &mut dyn TransactionalView,
    config: &EngineConfig,
) -> (ResultCode, Vec<ResultCode>) {
    let mut codes = Vec::with_capacity(inners.len());
    for inner in inners {
        let code = run_inner(inner, view, config);
        let succeeded = code.success();
        codes.push(code);
        if !succeeded {
            break;
        }
    }
    (ResultCode::TesSuccess, codes)
}

fn apply_independent(
    inners: &[Value],
    view: &mut dyn TransactionalView,
    config: &EngineConfig,
) -> (ResultCode, Vec<ResultCode>) {
    let codes = inners.iter().map(|inner| run_inner(inner, view, config)).collect();
    (ResultCode::TesSuccess, codes)
}

/// Run every inner transaction of `tx` against `view` under its declared
/// atomicity mode. Returns the outer result code plus each inner's own
/// code, in list order (`spec.md` §7).
pub(crate) fn apply_batch(
    tx: &Value,
    view: &mut dyn TransactionalView,
    config: &EngineConfig,
) -> (ResultCode, Vec<ResultCode>) {
    let mode = match batch_mode(tx) {
        Ok(mode) => mode,
        Err(code) => return (code, Vec::new()),
    };
    let inners = match raw_transactions(tx) {
        Ok(inners) => inners,
        Err(code) => return (code, Vec::new()),
    };
    if let Err(code) = validate_inner_shapes(inners) {
        return (code, Vec::new());
    }

    match mode {
        Mode::AllOrNothing => apply_all_or_nothing(inners, view, config),
        Mode::OnlyOne => apply_only_one(inners, view, config),
        Mode::UntilFailure => apply_until_failure(inners, view, config),
        Mode::Independent => apply_independent(inners, view, config),
    }
}

pub struct Batch;

impl Transactor for Batch {
    fn preflight(&self, tx: &Value, config: &EngineConfig) -> Result<(), ResultCode> {
        let account = tx_str(tx, "Account").ok_or(ResultCode::TemMalformed)?;
        batch_mode(tx)?;
        let inners = raw_transactions(tx)?;
        validate_inner_shapes(inners)?;
        let num_signers = validate_batch_signers(tx, account, inners)?;
        check_outer_fee(tx, config, num_signers, inners.len())
    }

    fn preclaim(&self, tx: &Value, view: &dyn View, _config: &EngineConfig) -> Result<(), ResultCode> {
        let account = tx_str(tx, "Account").ok_or(ResultCode::TemMalformed)?;
        common::read_account(view, account)?.ok_or(ResultCode::TerNoAccount)?;
        Ok(())
    }

    fn apply(&self, tx: &Value, view: &mut dyn TransactionalView, config: &EngineConfig) -> ResultCode {
        apply_batch(tx, view, config).0
    }
}
