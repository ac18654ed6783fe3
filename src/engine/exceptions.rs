//! Errors the engine can raise outside the classified result-code contract
//! (`spec.md` §7): these surface only from the submission boundary's own
//! plumbing (decoding the transaction envelope, resolving the dispatch
//! table), never from `Transactor::preflight`/`preclaim`/`apply`, which
//! report outcomes as [`crate::engine::result::ResultCode`] instead.

use thiserror_no_std::Error;

#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum EngineException {
    #[error("ledger store error: {0}")]
    Ledger(#[from] crate::ledger::exceptions::LedgerException),
    #[error("binary codec error: {0}")]
    BinaryCodec(#[from] crate::core::exceptions::XRPLCoreException),
}

#[cfg(feature = "std")]
impl alloc::error::Error for EngineException {}

pub type EngineExceptionResult<T> = core::result::Result<T, EngineException>;
