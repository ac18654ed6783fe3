#![no_std]
#![allow(dead_code)]

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::string::{String, ToString};
use thiserror_no_std::Error;

pub mod constants;
pub mod core;
pub mod engine;
pub mod ledger;
pub mod macros;
pub mod utils;

pub use crate::core::exceptions::{XRPLCoreException, XRPLCoreResult};

/// Errors surfaced while moving values through `serde_json`, shared by the
/// binary codec's JSON-shape dispatch and the engine's submission boundary.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum XRPLSerdeJsonError {
    #[error("serde_json error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),
    #[error("expected a value for field `{0}`")]
    InvalidNoneError(String),
    #[error("expected JSON type `{expected}`, found `{found}`")]
    UnexpectedValueType {
        expected: String,
        found: serde_json::Value,
    },
}

impl PartialEq for XRPLSerdeJsonError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::SerdeJsonError(a), Self::SerdeJsonError(b)) => a.to_string() == b.to_string(),
            (Self::InvalidNoneError(a), Self::InvalidNoneError(b)) => a == b,
            (
                Self::UnexpectedValueType { expected: ea, found: fa },
                Self::UnexpectedValueType { expected: eb, found: fb },
            ) => ea == eb && fa == fb,
            _ => false,
        }
    }
}

#[cfg(feature = "std")]
impl alloc::error::Error for XRPLSerdeJsonError {}
