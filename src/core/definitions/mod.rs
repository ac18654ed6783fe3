//! The field registry (Component A): a static, process-wide table mapping
//! field names to their `(type_code, field_code)` header, serialization
//! type and wire flags. Built once from an embedded `definitions.json` and
//! never mutated afterwards.

pub mod types;

pub use self::types::*;

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::utils::ToBytes;

/// Minimum value a type code or field code may take on the wire.
pub const CODE_MIN_VALUE: i16 = 1;
/// Maximum value a type code or field code may take on the wire.
pub const CODE_MAX_VALUE: i16 = u8::MAX as i16;

/// Simultaneous storage of a field's type code and field code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldHeader {
    pub type_code: i16,
    pub field_code: i16,
}

impl core::fmt::Display for FieldHeader {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{}_{}", self.type_code, self.field_code)
    }
}

impl ToBytes for FieldHeader {
    /// Encode the field ID per the 1-3 byte scheme of the binary codec's
    /// field-ID rules.
    fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        let type_code = self.type_code;
        let field_code = self.field_code;

        if type_code < 16 {
            if field_code < 16 {
                bytes.push(((type_code << 4) | field_code) as u8);
            } else {
                bytes.push((type_code << 4) as u8);
                bytes.push(field_code as u8);
            }
        } else if field_code < 16 {
            bytes.push(field_code as u8);
            bytes.push(type_code as u8);
        } else {
            bytes.push(0);
            bytes.push(type_code as u8);
            bytes.push(field_code as u8);
        }

        bytes
    }
}

/// Model object for field info metadata from the "fields" section of
/// `definitions.json`.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FieldInfo {
    /// Sort order position for fields sharing the same type code.
    pub nth: i16,
    #[serde(rename = "isVLEncoded")]
    pub is_vl_encoded: bool,
    pub is_serialized: bool,
    pub is_signing_field: bool,
    /// The name of this field's serialization type, e.g. `UInt32`.
    pub r#type: String,
}

/// A field, fully resolved against the type table: name, header, ordinal
/// and the wire flags needed to serialize or skip it.
#[derive(Debug, Clone)]
pub struct FieldInstance {
    pub nth: i16,
    pub is_vl_encoded: bool,
    pub is_serialized: bool,
    pub is_signing: bool,
    pub associated_type: String,
    pub name: String,
    pub header: FieldHeader,
    /// `(type_code << 16) | field_code`, used for canonical ordering.
    pub ordinal: i32,
}

impl FieldInstance {
    pub fn new(field_info: &FieldInfo, field_name: &str, field_header: FieldHeader) -> Self {
        FieldInstance {
            nth: field_info.nth,
            is_vl_encoded: field_info.is_vl_encoded,
            is_serialized: field_info.is_serialized,
            is_signing: field_info.is_signing_field,
            name: field_name.to_string(),
            ordinal: (field_header.type_code as i32) << 16 | field_info.nth as i32,
            header: field_header,
            associated_type: field_info.r#type.to_string(),
        }
    }
}
