//! Field-ID test fixtures.
//!
//! A handful of well-known fields, each paired with the field-ID hex its own
//! `(type_code, nth)` pair in `definitions.json` produces under the nibble-
//! packing scheme in `field_id_codec.rs` — computed from this crate's own
//! embedded field registry rather than an external corpus, since no such
//! corpus ships with this crate.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

#[derive(Debug, Clone)]
pub struct FieldTest {
    pub type_name: String,
    pub name: String,
    pub nth_of_type: i16,
    pub r#type: i16,
    pub expected_hex: String,
}

/// Field-ID fixtures for the one-byte encoding (`type_code < 16 && field_code
/// < 16`), the common case for the fields every transaction carries.
pub fn load_field_tests() -> Vec<FieldTest> {
    vec![
        FieldTest {
            type_name: "UInt16".into(),
            name: "TransactionType".into(),
            nth_of_type: 2,
            r#type: 1,
            expected_hex: "12".into(),
        },
        FieldTest {
            type_name: "UInt32".into(),
            name: "Flags".into(),
            nth_of_type: 2,
            r#type: 2,
            expected_hex: "22".into(),
        },
        FieldTest {
            type_name: "UInt32".into(),
            name: "Sequence".into(),
            nth_of_type: 4,
            r#type: 2,
            expected_hex: "24".into(),
        },
        FieldTest {
            type_name: "Amount".into(),
            name: "Amount".into(),
            nth_of_type: 1,
            r#type: 6,
            expected_hex: "61".into(),
        },
        FieldTest {
            type_name: "Amount".into(),
            name: "Fee".into(),
            nth_of_type: 8,
            r#type: 6,
            expected_hex: "68".into(),
        },
        FieldTest {
            type_name: "AccountID".into(),
            name: "Account".into(),
            nth_of_type: 1,
            r#type: 8,
            expected_hex: "81".into(),
        },
        FieldTest {
            type_name: "AccountID".into(),
            name: "Destination".into(),
            nth_of_type: 3,
            r#type: 8,
            expected_hex: "83".into(),
        },
    ]
}
