//! Top-level exports for types used in binary_codec.

pub mod account_id;
pub mod amount;
pub mod blob;
pub mod currency;
pub mod exceptions;
pub mod hash;
pub mod issue;
pub mod paths;
pub mod serialized_type;
pub(crate) mod test_cases;
pub mod utils;
pub mod vector256;
pub mod xchain_bridge;

use core::convert::TryFrom;
use core::convert::TryInto;
use core::fmt::Debug;
use core::fmt::Display;
use core::iter::FromIterator;

pub use self::account_id::AccountId;
pub use self::amount::Amount;
pub use self::blob::Blob;
pub use self::currency::Currency;
pub use self::hash::Hash;
pub use self::hash::Hash128;
pub use self::hash::Hash160;
pub use self::hash::Hash256;
pub use self::issue::Issue;
pub use self::paths::Path;
pub use self::paths::PathSet;
pub use self::paths::PathStep;
pub use self::vector256::Vector256;
pub use self::xchain_bridge::XChainBridge;

use crate::core::binarycodec::binary_wrappers::Serialization;
use crate::core::definitions::get_field_instance;
use crate::core::definitions::get_transaction_result_code;
use crate::core::definitions::get_ledger_entry_type_code;
use crate::core::definitions::get_ledger_entry_type_name;
use crate::core::definitions::get_transaction_result_name;
use crate::core::definitions::get_transaction_type_code;
use crate::core::definitions::get_transaction_type_name;
use crate::core::definitions::FieldInstance;
use crate::core::exceptions::XRPLCoreResult;
use crate::core::BinaryParser;
use alloc::borrow::Cow;
use alloc::borrow::ToOwned;
use alloc::format;
use alloc::string::String;
use alloc::string::ToString;
use alloc::vec;
use alloc::vec::Vec;
use amount::IssuedCurrency;
use exceptions::XRPLTypeException;
use serde::Deserialize;
use serde_json::Map;
use serde_json::Value;

use super::BinarySerializer;
use crate::core::addresscodec::is_valid_xaddress;
use crate::core::addresscodec::xaddress_to_classic_address;
use crate::core::binarycodec::binary_wrappers::binary_parser::{Parser, MAX_NESTING_DEPTH};
use crate::core::binarycodec::types::serialized_type::{Buffered, Serializable};
use crate::core::binarycodec::exceptions::XRPLBinaryCodecException as DecodeException;

const ACCOUNT: &str = "Account";
const SOURCE_TAG: &str = "SourceTag";
const DESTINATION: &str = "Destination";
const DESTINATION_TAG: &str = "DestinationTag";
const UNL_MODIFY_TX_TYPE: &str = "0066";
const ST_OBJECT: &str = "STObject";
const OBJECT_END_MARKER_BYTES: [u8; 1] = [0xE1];
const ARRAY_END_MARKER: [u8; 1] = [0xF1];

#[derive(Debug)]
pub enum XRPLTypes {
    AccountID(AccountId),
    Amount(Amount),
    Blob(Blob),
    Currency(Currency),
    Hash128(Hash128),
    Hash160(Hash160),
    Hash256(Hash256),
    Issue(Issue),
    Path(Path),
    PathSet(PathSet),
    PathStep(PathStep),
    Vector256(Vector256),
    STArray(STArray),
    STObject(STObject),
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    XChainBridge(XChainBridge),
    Unknown,
}

impl XRPLTypes {
    pub fn from_value(name: &str, value: Value) -> XRPLCoreResult<XRPLTypes> {
        let mut value = value;
        if value.is_null() {
            value = Value::Number(0.into());
        }
        if let Some(value) = value.as_str() {
            match name {
                "AccountID" => Ok(XRPLTypes::AccountID(Self::type_from_str(value)?)),
                "Amount" => Ok(XRPLTypes::Amount(Self::type_from_str(value)?)),
                "Blob" => Ok(XRPLTypes::Blob(Self::type_from_str(value)?)),
                "Currency" => Ok(XRPLTypes::Currency(Self::type_from_str(value)?)),
                "Hash128" => Ok(XRPLTypes::Hash128(Self::type_from_str(value)?)),
                "Hash160" => Ok(XRPLTypes::Hash160(Self::type_from_str(value)?)),
                "Hash256" => Ok(XRPLTypes::Hash256(Self::type_from_str(value)?)),
                "XChainClaimID" => Ok(XRPLTypes::Hash256(Self::type_from_str(value)?)),
                "UInt8" => Ok(XRPLTypes::UInt8(
                    value
                        .parse::<u8>()
                        .map_err(XRPLTypeException::ParseIntError)?,
                )),
                "UInt16" => Ok(XRPLTypes::UInt16(
                    value
                        .parse::<u16>()
                        .map_err(XRPLTypeException::ParseIntError)?,
                )),
                "UInt32" => Ok(XRPLTypes::UInt32(
                    value
                        .parse::<u32>()
                        .map_err(XRPLTypeException::ParseIntError)?,
                )),
                "UInt64" => Ok(XRPLTypes::UInt64(
                    value
                        .parse::<u64>()
                        .map_err(XRPLTypeException::ParseIntError)?,
                )),
                _ => Err(exceptions::XRPLTypeException::UnknownXRPLType.into()),
            }
        } else if let Some(value) = value.as_u64() {
            match name {
                "UInt8" => Ok(XRPLTypes::UInt8(value as u8)),
                "UInt16" => Ok(XRPLTypes::UInt16(value as u16)),
                "UInt32" => Ok(XRPLTypes::UInt32(value as u32)),
                "UInt64" => Ok(XRPLTypes::UInt64(value)),
                _ => Err(exceptions::XRPLTypeException::UnknownXRPLType.into()),
            }
        } else if let Some(value) = value.as_object() {
            match name {
                "Amount" => Ok(XRPLTypes::Amount(Self::amount_from_map(value.to_owned())?)),
                "STObject" => Ok(XRPLTypes::STObject(STObject::try_from_value(
                    Value::Object(value.to_owned()),
                    false,
                )?)),
                "XChainBridge" => Ok(XRPLTypes::XChainBridge(XChainBridge::try_from(
                    Value::Object(value.to_owned()),
                )?)),
                _ => Err(exceptions::XRPLTypeException::UnknownXRPLType.into()),
            }
        } else if let Some(value) = value.as_array() {
            match name {
                "STArray" => Ok(XRPLTypes::STArray(STArray::try_from_value(Value::Array(
                    value.to_owned(),
                ))?)),
                _ => Err(exceptions::XRPLTypeException::UnknownXRPLType.into()),
            }
        } else {
            Err(exceptions::XRPLTypeException::UnknownXRPLType.into())
        }
    }

    fn type_from_str<'a, T>(value: &'a str) -> XRPLCoreResult<T>
    where
        T: TryFrom<&'a str>,
        <T as TryFrom<&'a str>>::Error: Display,
    {
        value
            .try_into()
            .map_err(|_| XRPLTypeException::TryFromStrError.into())
    }

    fn amount_from_map<T>(value: Map<String, Value>) -> XRPLCoreResult<T>
    where
        T: TryFrom<IssuedCurrency>,
        <T as TryFrom<IssuedCurrency>>::Error: Display,
    {
        match IssuedCurrency::try_from(Value::Object(value)) {
            Ok(value) => value
                .try_into()
                .map_err(|_| XRPLTypeException::TryFromIssuedCurrencyError.into()),
            Err(error) => Err(error),
        }
    }
}

impl From<XRPLTypes> for SerializedType {
    fn from(val: XRPLTypes) -> Self {
        match val {
            XRPLTypes::AccountID(account_id) => SerializedType::from(account_id),
            XRPLTypes::Amount(amount) => SerializedType::from(amount),
            XRPLTypes::Blob(blob) => SerializedType::from(blob),
            XRPLTypes::Currency(currency) => SerializedType::from(currency),
            XRPLTypes::Hash128(hash128) => SerializedType::from(hash128),
            XRPLTypes::Hash160(hash160) => SerializedType::from(hash160),
            XRPLTypes::Hash256(hash256) => SerializedType::from(hash256),
            XRPLTypes::Path(path) => SerializedType::from(path),
            XRPLTypes::PathSet(path_set) => SerializedType::from(path_set),
            XRPLTypes::PathStep(path_step) => SerializedType::from(path_step),
            XRPLTypes::Vector256(vector256) => SerializedType::from(vector256),
            XRPLTypes::STArray(st_array) => st_array.0,
            XRPLTypes::STObject(st_object) => st_object.0,
            XRPLTypes::UInt8(value) => SerializedType(value.to_be_bytes().to_vec()),
            XRPLTypes::UInt16(value) => SerializedType(value.to_be_bytes().to_vec()),
            XRPLTypes::UInt32(value) => SerializedType(value.to_be_bytes().to_vec()),
            XRPLTypes::UInt64(value) => SerializedType(value.to_be_bytes().to_vec()),
            XRPLTypes::XChainBridge(x_chain_bridge) => SerializedType::from(x_chain_bridge),
            XRPLTypes::Issue(issue) => SerializedType::from(issue),
            XRPLTypes::Unknown => SerializedType(vec![]),
        }
    }
}

/// Contains a serialized buffer of a Serializer type.
#[derive(Debug, Deserialize, Clone)]
pub struct SerializedType(Vec<u8>);

/// Class for serializing and deserializing Lists of objects.
///
/// See Array Fields:
/// `<https://xrpl.org/serialization.html#array-fields>`
#[derive(Debug)]
pub struct STArray(SerializedType);

impl STArray {
    /// Create a SerializedArray from a serde_json::Value.
    ///
    /// ```
    /// use xrpl_ledger_core::core::binarycodec::types::STArray;
    /// use serde_json::Value;
    /// use hex::ToHex;
    ///
    /// let array_end_marker = [0xF1];
    /// let memo = r#"{
    ///     "Memo": {
    ///         "MemoType": "687474703A2F2F6578616D706C652E636F6D2F6D656D6F2F67656E65726963",
    ///         "MemoData": "72656E74"
    ///     }
    /// }"#;
    /// let memo_hex = "EA7C1F687474703A2F2F6578616D706C652E636F6D2F6D656D6F2F67656E657269637D0472656E74E1";
    /// let expected_json = Value::Array(vec![serde_json::from_str(memo).unwrap(), serde_json::from_str(memo).unwrap()]);
    /// let expected_hex = memo_hex.to_owned() + memo_hex + &array_end_marker.to_vec().encode_hex_upper::<String>();
    /// let st_array = STArray::try_from_value(expected_json).unwrap();
    /// let actual_hex = hex::encode_upper(st_array.as_ref());
    ///
    /// assert_eq!(actual_hex, expected_hex);
    /// ```
    pub fn try_from_value(value: Value) -> XRPLCoreResult<Self> {
        if let Some(array) = value.as_array() {
            if !array.is_empty() && array.iter().filter(|v| v.is_object()).count() != array.len() {
                Err(exceptions::XRPLSerializeArrayException::ExpectedObjectArray.into())
            } else {
                let mut serializer = BinarySerializer::new();
                for object in array {
                    let obj = match object {
                        Value::Object(map) => map,
                        _ => {
                            return Err(
                                exceptions::XRPLSerializeArrayException::ExpectedObjectArray.into(),
                            )
                        }
                    };
                    let transaction = STObject::try_from_value(Value::Object(obj.clone()), false)?;
                    serializer.append(transaction.as_ref().to_vec().as_mut());
                }
                serializer.append(ARRAY_END_MARKER.to_vec().as_mut());
                Ok(STArray(serializer.into()))
            }
        } else {
            Err(exceptions::XRPLSerializeArrayException::ExpectedArray.into())
        }
    }
}

impl XRPLType for STArray {
    type Error = XRPLTypeException;

    fn new(buffer: Option<&[u8]>) -> XRPLCoreResult<Self, Self::Error> {
        if let Some(data) = buffer {
            Ok(STArray(SerializedType(data.to_vec())))
        } else {
            Ok(STArray(SerializedType(vec![])))
        }
    }
}

impl AsRef<[u8]> for STArray {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}

/// Class for serializing/deserializing Indexmaps of objects.
///
/// See Object Fields:
/// `<https://xrpl.org/serialization.html#object-fields>`
#[derive(Debug)]
pub struct STObject(SerializedType);

impl STObject {
    /// Create a SerializedMap from a serde_json::Value.
    ///
    /// ```
    /// use xrpl_ledger_core::core::binarycodec::types::STObject;
    ///
    /// let expected_json = r#"{
    ///     "Account": "raD5qJMAShLeHZXf9wjUmo6vRK4arj9cF3",
    ///     "Fee": "10",
    ///     "Flags": 0,
    ///     "Sequence": 103929,
    ///     "SigningPubKey": "028472865AF4CB32AA285834B57576B7290AA8C31B459047DB27E16F418D6A7166",
    ///     "TakerGets": {
    ///         "value": "1694.768",
    ///         "currency": "ILS",
    ///         "issuer": "rNPRNzBB92BVpAhhZr4iXDTveCgV5Pofm9"
    ///     },
    ///     "TakerPays": "98957503520",
    ///     "TransactionType": "OfferCreate",
    ///     "TxnSignature": "304502202ABE08D5E78D1E74A4C18F2714F64E87B8BD57444AFA5733109EB3C077077520022100DB335EE97386E4C0591CAC024D50E9230D8F171EEB901B5E5E4BD6D1E0AEF98C"
    /// }"#;
    ///
    /// let buffer = "120007220000000024000195F964400000170A53AC2065D5460561E\
    ///     C9DE000000000000000000000000000494C53000000000092D70596\
    ///     8936C419CE614BF264B5EEB1CEA47FF468400000000000000A73210\
    ///     28472865AF4CB32AA285834B57576B7290AA8C31B459047DB27E16F\
    ///     418D6A71667447304502202ABE08D5E78D1E74A4C18F2714F64E87B\
    ///     8BD57444AFA5733109EB3C077077520022100DB335EE97386E4C059\
    ///     1CAC024D50E9230D8F171EEB901B5E5E4BD6D1E0AEF98C811439408\
    ///     A69F0895E62149CFCC006FB89FA7D1E6E5D";
    /// let value = serde_json::from_str(expected_json).unwrap();
    /// let serialized_map = STObject::try_from_value(value, false).unwrap();
    /// let hex = hex::encode_upper(serialized_map.as_ref());
    /// assert_eq!(hex, buffer);
    /// ```
    pub fn try_from_value(value: Value, signing_only: bool) -> XRPLCoreResult<Self> {
        let object = match value {
            Value::Object(map) => map,
            _ => return Err(exceptions::XRPLSerializeMapException::ExpectedObject.into()),
        };
        let mut serializer = BinarySerializer::new();
        let mut value_xaddress_handled = Map::new();
        for (field, value) in &object {
            if let Some(value) = value.as_str() {
                if is_valid_xaddress(value) {
                    let handled_xaddress = handle_xaddress(field.into(), value.into())?;
                    if let Some(handled_tag) = handled_xaddress.get(SOURCE_TAG) {
                        if let Some(object_tag) = object.get(SOURCE_TAG) {
                            if handled_tag != object_tag {
                                return Err(
                                    exceptions::XRPLSerializeMapException::AccountMismatchingTags
                                        .into(),
                                );
                            }
                        }
                    }
                    if let Some(handled_tag) = handled_xaddress.get(DESTINATION_TAG) {
                        if let Some(object_tag) = object.get(DESTINATION_TAG) {
                            if handled_tag != object_tag {
                                return Err(
                                    exceptions::XRPLSerializeMapException::DestinationMismatchingTags.into()
                                );
                            }
                        }
                    }
                    value_xaddress_handled.extend(handled_xaddress);
                } else if field == "TransactionType" {
                    let transaction_type_code = match get_transaction_type_code(value) {
                        Some(code) => code,
                        None => {
                            return Err(
                                exceptions::XRPLSerializeMapException::UnknownTransactionType(
                                    value.to_string(),
                                )
                                .into(),
                            )
                        }
                    };
                    value_xaddress_handled.insert(
                        field.to_owned(),
                        Value::Number(transaction_type_code.to_owned().into()),
                    );
                } else if field == "TransactionResult" {
                    let transaction_result_code =
                        match get_transaction_result_code(value) {
                            Some(code) => code,
                            None => return Err(
                                exceptions::XRPLSerializeMapException::UnknownTransactionResult(
                                    value.to_string(),
                                )
                                .into(),
                            ),
                        };
                    value_xaddress_handled.insert(
                        field.to_owned(),
                        Value::Number(transaction_result_code.to_owned().into()),
                    );
                } else if field == "LedgerEntryType" {
                    let ledger_entry_type_code = match get_ledger_entry_type_code(value) {
                        Some(code) => code,
                        None => {
                            return Err(
                                exceptions::XRPLSerializeMapException::UnknownLedgerEntryType(
                                    value.to_string(),
                                )
                                .into(),
                            )
                        }
                    };
                    value_xaddress_handled.insert(
                        field.to_owned(),
                        Value::Number(ledger_entry_type_code.to_owned().into()),
                    );
                } else {
                    value_xaddress_handled
                        .insert(field.to_owned(), Value::String(value.to_owned()));
                }
            } else {
                value_xaddress_handled.insert(field.to_owned(), value.clone());
            }
        }

        let mut sorted_keys: Vec<FieldInstance> = Vec::new();
        for (field, _) in &value_xaddress_handled {
            let field_instance = get_field_instance(field);
            if let Some(field_instance) = field_instance {
                if value_xaddress_handled.contains_key(&field_instance.name)
                    && field_instance.is_serialized
                {
                    sorted_keys.push(field_instance);
                }
            }
        }
        sorted_keys.sort_by_key(|k| k.ordinal);
        if signing_only {
            sorted_keys.retain(|k| k.is_signing);
        }
        let mut is_unl_modify = false;

        for field_instance in &sorted_keys {
            let associated_value = value_xaddress_handled.get(&field_instance.name).ok_or(
                exceptions::XRPLTypeException::MissingField(field_instance.name.clone()),
            )?;
            let associated_value = XRPLTypes::from_value(
                &field_instance.associated_type,
                associated_value.to_owned(),
            )?;
            let associated_value: SerializedType = associated_value.into();
            if field_instance.name == "TransactionType"
                && associated_value.to_string() == UNL_MODIFY_TX_TYPE
            {
                is_unl_modify = true;
            }
            let is_unl_modify_workaround = field_instance.name == "Account" && is_unl_modify;

            serializer.write_field_and_value(
                field_instance.to_owned(),
                associated_value.as_ref(),
                is_unl_modify_workaround,
            );
            if field_instance.associated_type == ST_OBJECT {
                serializer.append(OBJECT_END_MARKER_BYTES.to_vec().as_mut());
            }
        }

        Ok(STObject(serializer.into()))
    }
}

impl XRPLType for STObject {
    type Error = XRPLTypeException;

    fn new(buffer: Option<&[u8]>) -> XRPLCoreResult<Self, Self::Error> {
        if let Some(data) = buffer {
            Ok(STObject(SerializedType(data.to_vec())))
        } else {
            Ok(STObject(SerializedType(vec![])))
        }
    }
}

impl AsRef<[u8]> for STObject {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}

impl STObject {
    /// Decode canonical wire bytes into their JSON field map. Parsing
    /// mirrors encoding exactly, field by field. Validates that the buffer
    /// is a well-formed top-level object (no trailing end marker) and
    /// returns its typed projection as a `serde_json::Value`.
    pub fn from_bytes(bytes: &[u8]) -> XRPLCoreResult<Self> {
        let mut parser = BinaryParser::from(bytes.to_vec());
        decode_object(&mut parser, 0)?;
        Ok(STObject(SerializedType(bytes.to_vec())))
    }

    /// Decode this object's wire bytes back into a `serde_json::Value`.
    pub fn to_value(&self) -> XRPLCoreResult<Value> {
        let mut parser = BinaryParser::from(self.0.as_ref().to_vec());
        Ok(Value::Object(decode_object(&mut parser, 0)?))
    }
}

impl STArray {
    /// Decode this array's wire bytes back into a `serde_json::Value::Array`.
    pub fn to_value(&self) -> XRPLCoreResult<Value> {
        let mut parser = BinaryParser::from(self.0.as_ref().to_vec());
        Ok(Value::Array(decode_array(&mut parser, 0)?))
    }
}

/// Decode a nested or top-level STObject's fields. At `depth == 0` (the
/// top-level transaction/ledger-object buffer) there is no terminating
/// `ObjectEndMarker`; at any deeper level, a `0xE1` byte ends the object.
fn decode_object(parser: &mut BinaryParser, depth: usize) -> XRPLCoreResult<Map<String, Value>> {
    if depth > MAX_NESTING_DEPTH {
        return Err(DecodeException::MaxDepthExceeded { max: MAX_NESTING_DEPTH }.into());
    }
    let mut map = Map::new();
    loop {
        if depth > 0 && parser.peek() == Some(OBJECT_END_MARKER_BYTES[0]) {
            parser.skip_bytes(1)?;
            break;
        }
        if !parser.has_more() {
            if depth > 0 {
                return Err(DecodeException::UnexpectedEndMarker.into());
            }
            break;
        }
        let field = parser.read_field().map_err(XRPLCoreException::from)?;
        if map.contains_key(&field.name) {
            return Err(DecodeException::DuplicateField { field: field.name.clone() }.into());
        }
        let value = decode_field_value(parser, &field, depth)?;
        let value = rename_coded_field(&field.name, value);
        map.insert(field.name.clone(), value);
    }
    Ok(map)
}

/// Undo the name-to-code substitution `STObject::try_from_value` applies on
/// encode for `TransactionType`/`TransactionResult`/`LedgerEntryType`, so
/// decoding produces the same string values the JSON side expects.
fn rename_coded_field(field_name: &str, value: Value) -> Value {
    let code = match value.as_u64() {
        Some(code) => code as i16,
        None => return value,
    };
    let name = match field_name {
        "TransactionType" => get_transaction_type_name(&code),
        "TransactionResult" => get_transaction_result_name(&code),
        "LedgerEntryType" => get_ledger_entry_type_name(&code),
        _ => return value,
    };
    match name {
        Some(name) => Value::String(name.clone()),
        None => value,
    }
}

/// Decode an STArray's elements, each a single-field wrapper object (e.g.
/// `{"Memo": {...}}`), terminated by the `0xF1` array end marker.
fn decode_array(parser: &mut BinaryParser, depth: usize) -> XRPLCoreResult<Vec<Value>> {
    if depth > MAX_NESTING_DEPTH {
        return Err(DecodeException::MaxDepthExceeded { max: MAX_NESTING_DEPTH }.into());
    }
    let mut items = Vec::new();
    let mut seen = Vec::new();
    loop {
        if parser.peek() == Some(ARRAY_END_MARKER[0]) {
            parser.skip_bytes(1)?;
            break;
        }
        if !parser.has_more() {
            return Err(DecodeException::UnexpectedEndMarker.into());
        }
        let field = parser.read_field().map_err(XRPLCoreException::from)?;
        if seen.contains(&field.name) {
            return Err(DecodeException::DuplicateField { field: field.name.clone() }.into());
        }
        seen.push(field.name.clone());
        let value = decode_field_value(parser, &field, depth + 1)?;
        let mut wrapper = Map::new();
        wrapper.insert(field.name.clone(), value);
        items.push(Value::Object(wrapper));
    }
    Ok(items)
}

/// Decode a single field's value given its resolved [`FieldInstance`],
/// dispatching on the field's serialization type exactly as
/// `XRPLTypes::from_value` dispatches in the opposite (encode) direction.
fn decode_field_value(
    parser: &mut BinaryParser,
    field: &FieldInstance,
    depth: usize,
) -> XRPLCoreResult<Value> {
    let vl_length = if field.is_vl_encoded {
        Some(parser.read_variable_length().map_err(XRPLCoreException::from)?)
    } else {
        None
    };
    match field.associated_type.as_str() {
        "UInt8" => Ok(Value::Number(parser.read_uint8().map_err(XRPLCoreException::from)?.into())),
        "UInt16" => Ok(Value::Number(parser.read_uint16().map_err(XRPLCoreException::from)?.into())),
        "UInt32" => Ok(Value::Number(parser.read_uint32().map_err(XRPLCoreException::from)?.into())),
        "UInt64" => {
            let raw = parser.read(8).map_err(XRPLCoreException::from)?;
            let mut buf = [0u8; 8];
            buf.copy_from_slice(&raw);
            Ok(Value::String(format!("{:x}", u64::from_be_bytes(buf))))
        }
        "Hash128" => {
            let hash = Hash128::from_parser(parser, vl_length).map_err(XRPLCoreException::from)?;
            Ok(Value::String(hex::encode_upper(hash.get_buffer())))
        }
        "Hash160" => {
            let hash = Hash160::from_parser(parser, vl_length).map_err(XRPLCoreException::from)?;
            Ok(Value::String(hex::encode_upper(hash.get_buffer())))
        }
        "Hash256" => {
            let hash = Hash256::from_parser(parser, vl_length).map_err(XRPLCoreException::from)?;
            Ok(Value::String(hex::encode_upper(hash.get_buffer())))
        }
        "AccountID" => {
            let account = AccountId::from_parser(parser, vl_length).map_err(XRPLCoreException::from)?;
            Ok(Value::String(account.to_string()))
        }
        "Amount" => {
            let amount = Amount::from_parser(parser, vl_length).map_err(XRPLCoreException::from)?;
            serde_json::to_value(&amount).map_err(|e| {
                XRPLCoreException::SerdeJsonError(crate::XRPLSerdeJsonError::SerdeJsonError(e))
            })
        }
        "Blob" => {
            let blob = Blob::from_parser(parser, vl_length).map_err(XRPLCoreException::from)?;
            Ok(Value::String(hex::encode_upper(blob.as_ref())))
        }
        "Currency" => {
            let currency = Currency::from_parser(parser, vl_length).map_err(XRPLCoreException::from)?;
            Ok(Value::String(currency.to_string()))
        }
        "Issue" => {
            let issue = Issue::from_parser(parser, vl_length).map_err(XRPLCoreException::from)?;
            Ok(Value::String(hex::encode_upper(issue.get_buffer())))
        }
        "PathSet" => {
            let path_set = PathSet::from_parser(parser, vl_length).map_err(XRPLCoreException::from)?;
            serde_json::to_value(&path_set).map_err(|e| {
                XRPLCoreException::SerdeJsonError(crate::XRPLSerdeJsonError::SerdeJsonError(e))
            })
        }
        "Vector256" => {
            let num_bytes = vl_length.unwrap_or_else(|| parser.len());
            let num_hashes = num_bytes / 32;
            let mut hashes = Vec::with_capacity(num_hashes);
            for _ in 0..num_hashes {
                let hash = Hash256::from_parser(parser, None).map_err(XRPLCoreException::from)?;
                hashes.push(Value::String(hex::encode_upper(hash.get_buffer())));
            }
            Ok(Value::Array(hashes))
        }
        "STObject" => Ok(Value::Object(decode_object(parser, depth + 1)?)),
        "STArray" => Ok(Value::Array(decode_array(parser, depth + 1)?)),
        other => Err(DecodeException::UnknownType { found: other.to_string() }.into()),
    }
}

fn handle_xaddress(field: Cow<str>, xaddress: Cow<str>) -> XRPLCoreResult<Map<String, Value>> {
    let (classic_address, tag, _is_test_net) = xaddress_to_classic_address(&xaddress)?;
    if let Some(tag) = tag {
        if field == DESTINATION {
            let tag_name = DESTINATION_TAG;
            Ok(Map::from_iter(vec![
                (field.to_string(), Value::String(classic_address)),
                (tag_name.to_string(), Value::Number(tag.into())),
            ]))
        } else if field == ACCOUNT {
            let tag_name = SOURCE_TAG;
            Ok(Map::from_iter(vec![
                (field.to_string(), Value::String(classic_address)),
                (tag_name.to_string(), Value::Number(tag.into())),
            ]))
        } else {
            Err(exceptions::XRPLSerializeMapException::DisallowedTag {
                field: field.to_string(),
            }
            .into())
        }
    } else {
        Ok(Map::from_iter(vec![(
            field.to_string(),
            Value::String(classic_address),
        )]))
    }
}

/// An XRPL Type will implement this trait.
///
/// # Examples
///
/// ## Basic usage
///
/// ```
/// use xrpl_ledger_core::core::binarycodec::types::XRPLType;
/// use xrpl_ledger_core::core::binarycodec::exceptions::XRPLBinaryCodecException;
/// use xrpl_ledger_core::core::exceptions::XRPLCoreResult;
///
/// pub struct Example(Vec<u8>);
///
/// impl XRPLType for Example {
///     type Error = XRPLBinaryCodecException;
///
///     fn new(buffer: Option<&[u8]>) -> XRPLCoreResult<Self, Self::Error> {
///         if let Some(data) = buffer {
///             Ok(Example(data.to_vec()))
///         } else {
///             Ok(Example(vec![]))
///         }
///     }
/// }
/// ```
pub trait XRPLType {
    /// Error type for implementing type.
    type Error;

    /// Create a new instance of a type.
    fn new(buffer: Option<&[u8]>) -> XRPLCoreResult<Self, Self::Error>
    where
        Self: Sized;
}

/// Converter for transforming a BinaryParser into a type.
///
/// # Examples
///
/// ## Basic usage
///
/// ```
/// use xrpl_ledger_core::core::binarycodec::types::TryFromParser;
/// use xrpl_ledger_core::core::binarycodec::BinaryParser;
/// use xrpl_ledger_core::core::Parser;
/// use xrpl_ledger_core::core::exceptions::{XRPLCoreResult, XRPLCoreException};
///
/// pub struct Example(Vec<u8>);
///
/// impl TryFromParser for Example {
///     type Error = XRPLCoreException;
///
///     fn from_parser(
///         parser: &mut BinaryParser,
///         _length: Option<usize>,
///     ) -> XRPLCoreResult<Example, Self::Error> {
///         Ok(Example(parser.read(42)?))
///     }
/// }
/// ```
pub trait TryFromParser {
    /// Error type for implementing type.
    type Error;

    /// Construct a type from a BinaryParser.
    fn from_parser(
        parser: &mut BinaryParser,
        length: Option<usize>,
    ) -> XRPLCoreResult<Self, Self::Error>
    where
        Self: Sized;
}

impl Display for SerializedType {
    /// Get the hex representation of the SerializedType bytes.
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{}", hex::encode_upper(self.0.as_slice()))
    }
}

impl From<Vec<u8>> for SerializedType {
    /// Create a SerializedType from a Vec<u8>.
    fn from(buffer: Vec<u8>) -> Self {
        SerializedType(buffer)
    }
}

impl AsRef<[u8]> for SerializedType {
    /// Get a reference of the byte representation.
    fn as_ref(&self) -> &[u8] {
        self.0.as_slice()
    }
}

impl<T> From<T> for SerializedType
where
    T: XRPLType + AsRef<[u8]>,
{
    /// Create a serialized type from an XRPLType.
    fn from(instance: T) -> Self {
        SerializedType(instance.as_ref().to_vec())
    }
}

#[cfg(test)]
mod decode_test {
    use super::*;

    #[test]
    fn object_roundtrips_through_decode() {
        let json = r#"{
            "Account": "raD5qJMAShLeHZXf9wjUmo6vRK4arj9cF3",
            "Fee": "10",
            "Flags": 0,
            "Sequence": 103929,
            "SigningPubKey": "028472865AF4CB32AA285834B57576B7290AA8C31B459047DB27E16F418D6A7166",
            "TakerGets": {
                "value": "1694.768",
                "currency": "ILS",
                "issuer": "rNPRNzBB92BVpAhhZr4iXDTveCgV5Pofm9"
            },
            "TakerPays": "98957503520",
            "TransactionType": "OfferCreate",
            "TxnSignature": "304502202ABE08D5E78D1E74A4C18F2714F64E87B8BD57444AFA5733109EB3C077077520022100DB335EE97386E4C0591CAC024D50E9230D8F171EEB901B5E5E4BD6D1E0AEF98C"
        }"#;
        let value: Value = serde_json::from_str(json).unwrap();
        let encoded = STObject::try_from_value(value.clone(), false).unwrap();
        let decoded = STObject::from_bytes(encoded.as_ref()).unwrap();
        let decoded_value = decoded.to_value().unwrap();

        assert_eq!(decoded_value["Sequence"], 103929);
        assert_eq!(decoded_value["TransactionType"], "OfferCreate");
        assert_eq!(decoded_value["Fee"], "10");
        assert_eq!(decoded_value["TakerGets"]["currency"], "ILS");

        let re_encoded = STObject::try_from_value(decoded_value, false).unwrap();
        assert_eq!(encoded.as_ref(), re_encoded.as_ref());
    }

    #[test]
    fn memo_array_roundtrips_through_decode() {
        let memo = r#"{
            "Memo": {
                "MemoType": "687474703A2F2F6578616D706C652E636F6D2F6D656D6F2F67656E65726963",
                "MemoData": "72656E74"
            }
        }"#;
        let json = Value::Array(alloc::vec![
            serde_json::from_str(memo).unwrap(),
            serde_json::from_str(memo).unwrap(),
        ]);
        let encoded = STArray::try_from_value(json).unwrap();
        let mut parser = BinaryParser::from(encoded.as_ref().to_vec());
        let decoded = decode_array(&mut parser, 0).unwrap();

        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[0]["Memo"]["MemoData"], "72656E74");
    }

    #[test]
    fn duplicate_field_in_object_is_malformed() {
        let mut parser = BinaryParser::from(alloc::vec![0x24, 0, 0, 0, 1, 0x24, 0, 0, 0, 2]);
        assert!(decode_object(&mut parser, 0).is_err());
    }
}
