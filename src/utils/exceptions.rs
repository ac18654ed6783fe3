//! Exceptions for invalid XRP Ledger amount and currency-code data.
//!
//! [`XRPAmountRangeException`] is distinct from
//! [`crate::utils::xrpl_conversion::XRPRangeException`]: the latter is
//! returned by the drops/XRP conversion helpers, this one by the typed
//! Amount codec's own range checks.

use alloc::string::String;

use crate::core::binarycodec::exceptions::XRPLBinaryCodecException;

#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum XRPAmountRangeException {
    InvalidXRPAmountTooSmall { min: String, found: String },
    InvalidXRPAmountTooLarge { max: u64, found: u64 },
    InvalidDropsAmountTooLarge { max: String, found: String },
    InvalidMantissa { min: u64, max: u64, found: u64 },
    InvalidExponent { min: i32, max: i32, found: i32 },
    InvalidPrecision { max: u32, found: u32 },
    InvalidDecimalFormat { found: String },
    DecimalError(rust_decimal::Error),
}

#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ISOCodeException {
    InvalidISOCode,
    InvalidISOLength,
    InvalidXRPBytes,
    UnsupportedCurrencyRepresentation,
    HexError(hex::FromHexError),
    BinaryCodecError(XRPLBinaryCodecException),
}

impl From<rust_decimal::Error> for XRPAmountRangeException {
    fn from(err: rust_decimal::Error) -> Self {
        XRPAmountRangeException::DecimalError(err)
    }
}

impl From<hex::FromHexError> for ISOCodeException {
    fn from(err: hex::FromHexError) -> Self {
        ISOCodeException::HexError(err)
    }
}

impl From<XRPLBinaryCodecException> for ISOCodeException {
    fn from(err: XRPLBinaryCodecException) -> Self {
        ISOCodeException::BinaryCodecError(err)
    }
}

impl core::fmt::Display for XRPAmountRangeException {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            XRPAmountRangeException::InvalidXRPAmountTooSmall { min, found } => {
                write!(f, "XRP amount {found} is below the minimum of {min} drops")
            }
            XRPAmountRangeException::InvalidXRPAmountTooLarge { max, found } => {
                write!(f, "XRP amount {found} exceeds the maximum of {max} drops")
            }
            XRPAmountRangeException::InvalidDropsAmountTooLarge { max, found } => {
                write!(f, "drops amount {found} exceeds the maximum of {max}")
            }
            XRPAmountRangeException::InvalidMantissa { min, max, found } => write!(
                f,
                "issued amount mantissa {found} outside of the range [{min}, {max})"
            ),
            XRPAmountRangeException::InvalidExponent { min, max, found } => write!(
                f,
                "issued amount exponent {found} outside of the range [{min}, {max}]"
            ),
            XRPAmountRangeException::InvalidPrecision { max, found } => write!(
                f,
                "issued amount has {found} significant digits, exceeding the maximum of {max}"
            ),
            XRPAmountRangeException::InvalidDecimalFormat { found } => {
                write!(f, "'{found}' is not a valid decimal amount")
            }
            XRPAmountRangeException::DecimalError(err) => write!(f, "{err}"),
        }
    }
}

impl core::fmt::Display for ISOCodeException {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            ISOCodeException::InvalidISOCode => write!(f, "invalid ISO currency code"),
            ISOCodeException::InvalidISOLength => write!(f, "invalid ISO currency code length"),
            ISOCodeException::InvalidXRPBytes => {
                write!(f, "the literal currency code 'XRP' cannot be hex-encoded")
            }
            ISOCodeException::UnsupportedCurrencyRepresentation => {
                write!(f, "unsupported currency code representation")
            }
            ISOCodeException::HexError(err) => write!(f, "{err}"),
            ISOCodeException::BinaryCodecError(err) => write!(f, "{err}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for XRPAmountRangeException {}

#[cfg(feature = "std")]
impl std::error::Error for ISOCodeException {}
