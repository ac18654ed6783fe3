//! Codec for serializing and deserializing a hash
//! field with a width of 160 bits (20 bytes).
//!
//! See Hash Fields:
//! `<https://xrpl.org/serialization.html#hash-fields>`

use crate::core::binarycodec::binary_wrappers::binary_parser::BinaryParser;
use crate::core::binarycodec::exceptions::XRPLBinaryCodecException;
use crate::core::binarycodec::types::hash::Hash;
use crate::core::binarycodec::types::serialized_type::Buffered;
use crate::core::binarycodec::types::serialized_type::Serializable;
use alloc::string::String;
use alloc::string::ToString;
use alloc::vec::Vec;
use core::convert::TryFrom;
use serde::Deserialize;

/// Codec for serializing and deserializing a hash field
/// with a width of 160 bits (20 bytes).
///
/// See Hash Fields:
/// `<https://xrpl.org/serialization.html#hash-fields>`
#[derive(Debug, Deserialize, Clone)]
#[serde(try_from = "&str")]
pub struct Hash160(Vec<u8>);

const _HASH160_LENGTH: usize = 20;

impl Hash for Hash160 {
    fn get_length() -> usize {
        _HASH160_LENGTH
    }
}

impl Serializable for Hash160 {
    fn new(buffer: Option<&[u8]>) -> Result<Self, XRPLBinaryCodecException> {
        Ok(Hash160(<dyn Hash>::make::<Hash160>(buffer)?))
    }

    fn from_parser(
        parser: &mut BinaryParser,
        length: Option<usize>,
    ) -> Result<Hash160, XRPLBinaryCodecException> {
        Ok(Hash160(<dyn Hash>::parse::<Hash160>(parser, length)?))
    }
}

impl Buffered for Hash160 {
    fn get_buffer(&self) -> &[u8] {
        &self.0
    }
}

impl serde::Serialize for Hash160 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&hex::encode_upper(self.get_buffer()))
    }
}

impl TryFrom<&str> for Hash160 {
    type Error = XRPLBinaryCodecException;

    /// Construct a Hash object from a hex string.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Hash160::new(Some(&hex::decode(value)?))
    }
}

// TODO ToString on Bufferred does not work.
impl ToString for Hash160 {
    fn to_string(&self) -> String {
        hex::encode(self.get_buffer())
    }
}
