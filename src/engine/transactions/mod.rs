//! The `Transactor` trait (`spec.md` §4.7) and the dispatch table from a
//! transaction's `TransactionType` name to its implementation. Each
//! transactor's `preflight`/`preclaim` report a rejection as a `ResultCode`
//! directly (always one of `tem`/`tef`/`ter`/`tec`); `apply` cannot itself
//! be rejected after Preclaim passes, so it returns the final code outright
//! rather than a `Result`.

pub mod account_set;
pub mod batch;
pub mod escrow;
pub mod nftoken;
pub mod offer;
pub mod payment;
pub mod trust_set;

use serde_json::Value;

use crate::engine::config::EngineConfig;
use crate::engine::result::ResultCode;
use crate::ledger::store::{TransactionalView, View};

/// One transaction type's business logic, run by the pipeline in
/// `engine::pipeline::submit` between the always-applied fee/sequence
/// charge and the final commit.
pub trait Transactor {
    /// Stateless, signature/shape validation. May fail only with a `Tem*`
    /// code (`spec.md` §4.7).
    fn preflight(&self, tx: &Value, config: &EngineConfig) -> Result<(), ResultCode>;

    /// Read-only validation against the current ledger view: account
    /// existence, fee/reserve sufficiency, sequence, and type-specific
    /// preconditions. May fail with `Tef*`, `Ter*`, or `Tec*`.
    fn preclaim(&self, tx: &Value, view: &dyn View, config: &EngineConfig) -> Result<(), ResultCode>;

    /// Mutate `view`. Returns the final result code; a `Tec*` code here
    /// means the pipeline rolls back everything `apply` wrote (but keeps the
    /// already-charged fee and advanced sequence).
    fn apply(
        &self,
        tx: &Value,
        view: &mut dyn TransactionalView,
        config: &EngineConfig,
    ) -> ResultCode;
}

/// Resolve a `TransactionType` name to its `Transactor`. `None` for any
/// type outside the illustrative set this core implements (`spec.md` §1).
pub fn dispatch(transaction_type: &str) -> Option<&'static dyn Transactor> {
    match transaction_type {
        "Payment" => Some(&payment::Payment),
        "AccountSet" => Some(&account_set::AccountSet),
        "TrustSet" => Some(&trust_set::TrustSet),
        "OfferCreate" => Some(&offer::OfferCreate),
        "OfferCancel" => Some(&offer::OfferCancel),
        "EscrowCreate" => Some(&escrow::EscrowCreate),
        "EscrowFinish" => Some(&escrow::EscrowFinish),
        "EscrowCancel" => Some(&escrow::EscrowCancel),
        "NFTokenMint" => Some(&nftoken::NFTokenMint),
        "NFTokenBurn" => Some(&nftoken::NFTokenBurn),
        "NFTokenCreateOffer" => Some(&nftoken::NFTokenCreateOffer),
        "NFTokenCancelOffer" => Some(&nftoken::NFTokenCancelOffer),
        "NFTokenAcceptOffer" => Some(&nftoken::NFTokenAcceptOffer),
        "Batch" => Some(&batch::Batch),
        _ => None,
    }
}
