//! Errors raised by the keylet-addressed store, directory paging and the
//! NFTokenPage chain (Component E/F).

use thiserror_no_std::Error;

#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum LedgerException {
    #[error("keylet not found")]
    NotFound,
    #[error("ledger object is malformed: {0}")]
    Malformed(alloc::string::String),
    #[error("unknown ledger entry type code {0}")]
    UnknownLedgerEntryType(i16),
    #[error("no suitable NFToken page could hold this token")]
    NoSuitableNftokenPage,
    #[error("NFTokenPage chain is corrupt: {0}")]
    CorruptPageChain(alloc::string::String),
    #[error("directory is full")]
    DirectoryFull,
    #[error("binary codec error: {0}")]
    BinaryCodec(#[from] crate::core::exceptions::XRPLCoreException),
}

#[cfg(feature = "std")]
impl alloc::error::Error for LedgerException {}

pub type LedgerResult<T> = core::result::Result<T, LedgerException>;
