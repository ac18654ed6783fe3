//! Growable byte sink used to encode typed fields into the canonical
//! binary format.

use alloc::vec;
use alloc::vec::Vec;

use crate::core::binarycodec::binary_wrappers::utils::MAX_DOUBLE_BYTE_LENGTH;
use crate::core::binarycodec::binary_wrappers::utils::MAX_LENGTH_VALUE;
use crate::core::binarycodec::binary_wrappers::utils::MAX_SECOND_BYTE_VALUE;
use crate::core::binarycodec::binary_wrappers::utils::MAX_SINGLE_BYTE_LENGTH;
use crate::core::binarycodec::exceptions::XRPLBinaryCodecException;
use crate::core::definitions::FieldInstance;
use crate::utils::ToBytes;

/// Serializes JSON to XRPL binary format. A thin `Vec<u8>`-backed sink;
/// `Serializer` below is an extension trait adding the field-aware write
/// helpers.
pub type BinarySerializer = Vec<u8>;

/// Helper function for length-prefixed fields including
/// Blob types and some AccountID types. Calculates the
/// prefix of variable length bytes.
///
/// The length of the prefix is 1-3 bytes depending on the
/// length of the contents:
/// Content length <= 192 bytes: prefix is 1 byte
/// 192 bytes < Content length <= 12480 bytes: prefix is 2 bytes
/// 12480 bytes < Content length <= 918744 bytes: prefix is 3 bytes
///
/// See Length Prefixing: https://xrpl.org/serialization.html#length-prefixing
fn _encode_variable_length_prefix(length: &usize) -> Result<Vec<u8>, XRPLBinaryCodecException> {
    if length <= &MAX_SINGLE_BYTE_LENGTH {
        Ok(vec![*length as u8])
    } else if *length < MAX_DOUBLE_BYTE_LENGTH {
        let b_length = *length - MAX_SINGLE_BYTE_LENGTH - 1;
        let val_a = (b_length >> 8) + (MAX_SINGLE_BYTE_LENGTH + 1);
        let val_b = b_length & 0xFF;

        Ok(vec![val_a as u8, val_b as u8])
    } else if *length <= MAX_LENGTH_VALUE {
        let b_length = *length - MAX_DOUBLE_BYTE_LENGTH;
        let val_a = (MAX_SECOND_BYTE_VALUE + 1) + (b_length >> 16);
        let val_b = (b_length >> 8) & 0xFF;
        let val_c = b_length & 0xFF;

        Ok(vec![val_a as u8, val_b as u8, val_c as u8])
    } else {
        Err(XRPLBinaryCodecException::InvalidVariableLengthTooLarge {
            max: MAX_LENGTH_VALUE,
        })
    }
}

pub trait Serializer {
    /// Write a variable length encoded value to the BinarySerializer.
    fn write_length_encoded(&mut self, value: &[u8]);

    /// Write a field ID followed by its value, applying the VL length
    /// prefix when the field calls for it. `is_unl_modify_workaround`
    /// reproduces the historical quirk where `UNLModify`'s `Account`
    /// field is written without its usual VL prefix.
    fn write_field_and_value(
        &mut self,
        field: FieldInstance,
        value: &[u8],
        is_unl_modify_workaround: bool,
    );
}

impl Serializer for BinarySerializer {
    fn write_length_encoded(&mut self, value: &[u8]) {
        let length_prefix = _encode_variable_length_prefix(&value.len())
            .expect("value length already validated against the wire ceiling");

        self.extend_from_slice(&length_prefix);
        self.extend_from_slice(value);
    }

    fn write_field_and_value(
        &mut self,
        field: FieldInstance,
        value: &[u8],
        is_unl_modify_workaround: bool,
    ) {
        self.extend_from_slice(&field.header.to_bytes());

        if field.is_vl_encoded && !is_unl_modify_workaround {
            self.write_length_encoded(value);
        } else {
            self.extend_from_slice(value);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_encode_variable_length_prefix_boundaries() {
        assert_eq!(vec![192], _encode_variable_length_prefix(&192).unwrap());
        assert_eq!(vec![193, 0], _encode_variable_length_prefix(&193).unwrap());
        assert_eq!(
            vec![241, 0, 0],
            _encode_variable_length_prefix(&12481).unwrap()
        );
        assert!(_encode_variable_length_prefix(&(MAX_LENGTH_VALUE + 1)).is_err());
    }
}
