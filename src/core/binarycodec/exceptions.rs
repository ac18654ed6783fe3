//! General XRPL Binary Codec Exceptions.

use crate::core::binarycodec::types::exceptions::XRPLTypeException;

#[derive(Debug, Clone, PartialEq)]
pub enum XRPLBinaryCodecException {
    UnexpectedParserSkipOverflow { max: usize, found: usize },
    UnexpectedLengthPrefixRange { min: usize, max: usize },
    UnexpectedTypeCodeRange { min: usize, max: usize },
    UnexpectedFieldCodeRange { min: usize, max: usize },
    UnexpectedFieldIdByteRange { min: usize, max: usize },
    UnexpectedParserEmpty,
    MaxDepthExceeded { max: usize },
    UnsupportedCurrencyRepresentation,
    UnknownFieldName,
    InvalidReadFromBytesValue,
    InvalidVariableLengthTooLarge { max: usize },
    InvalidHashLength { expected: usize, found: usize },
    DuplicateField { field: alloc::string::String },
    UnknownType { found: alloc::string::String },
    UnexpectedEndMarker,
    HexError(hex::FromHexError),
    XRPLTypeError(alloc::boxed::Box<XRPLTypeException>),
}

impl From<hex::FromHexError> for XRPLBinaryCodecException {
    fn from(err: hex::FromHexError) -> Self {
        XRPLBinaryCodecException::HexError(err)
    }
}

impl From<XRPLTypeException> for XRPLBinaryCodecException {
    fn from(err: XRPLTypeException) -> Self {
        XRPLBinaryCodecException::XRPLTypeError(alloc::boxed::Box::new(err))
    }
}

#[cfg(feature = "std")]
impl alloc::error::Error for XRPLBinaryCodecException {}

impl core::fmt::Display for XRPLBinaryCodecException {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "XRPLBinaryCodecException: {:?}", self)
    }
}
