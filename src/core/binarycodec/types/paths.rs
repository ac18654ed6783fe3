//! Codec for serializing and deserializing PathSet fields.
//!
//! See PathSet Fields:
//! `<https://xrpl.org/serialization.html#pathset-fields>`

use alloc::string::String;
use alloc::string::ToString;
use alloc::vec;
use alloc::vec::Vec;
use core::convert::TryFrom;

use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::constants::ACCOUNT_ID_LENGTH;
use crate::core::binarycodec::binary_wrappers::binary_parser::{BinaryParser, Parser};
use crate::core::binarycodec::exceptions::XRPLBinaryCodecException;
use crate::core::binarycodec::types::account_id::AccountId;
use crate::core::binarycodec::types::currency::{Currency, CURRENCY_CODE_LENGTH};
use crate::core::binarycodec::types::exceptions::XRPLTypeException;
use crate::core::binarycodec::types::serialized_type::Buffered;
use crate::core::binarycodec::types::serialized_type::Serializable;

const _TYPE_ACCOUNT: u8 = 0x01;
const _TYPE_CURRENCY: u8 = 0x10;
const _TYPE_ISSUER: u8 = 0x20;

const _PATHSET_END_BYTE: u8 = 0x00;
const _PATH_SEPARATOR_BYTE: u8 = 0xFF;

/// A single step of a payment path: an optional intermediate account, an
/// optional currency redenomination, and/or an optional issuer change.
#[derive(Debug, Clone)]
pub struct PathStep(Vec<u8>);

impl Serializable for PathStep {
    /// Construct a PathStep from its raw `[type_byte, ...fields]` encoding.
    fn new(buffer: Option<&[u8]>) -> Result<Self, XRPLBinaryCodecException> {
        Ok(PathStep(buffer.unwrap_or(&[_PATHSET_END_BYTE]).to_vec()))
    }

    fn from_parser(
        parser: &mut BinaryParser,
        _length: Option<usize>,
    ) -> Result<PathStep, XRPLBinaryCodecException> {
        let data_type = parser.read_uint8()?;
        let mut value_bytes: Vec<u8> = vec![data_type];

        if data_type & _TYPE_ACCOUNT != 0 {
            value_bytes.extend_from_slice(&parser.read(ACCOUNT_ID_LENGTH)?);
        }
        if data_type & _TYPE_CURRENCY != 0 {
            value_bytes.extend_from_slice(&parser.read(CURRENCY_CODE_LENGTH)?);
        }
        if data_type & _TYPE_ISSUER != 0 {
            value_bytes.extend_from_slice(&parser.read(ACCOUNT_ID_LENGTH)?);
        }

        PathStep::new(Some(&value_bytes))
    }
}

impl Buffered for PathStep {
    fn get_buffer(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<&Map<String, Value>> for PathStep {
    type Error = XRPLTypeException;

    /// Construct a PathStep from its `{account, currency, issuer}` JSON form.
    fn try_from(value: &Map<String, Value>) -> Result<Self, Self::Error> {
        let mut data_type = 0x00;
        let mut value_bytes: Vec<u8> = vec![];

        if let Some(account) = value.get("account").and_then(Value::as_str) {
            value_bytes.extend_from_slice(
                AccountId::try_from(account)
                    .map_err(|_| XRPLTypeException::TryFromStrError)?
                    .get_buffer(),
            );
            data_type |= _TYPE_ACCOUNT;
        }
        if let Some(currency) = value.get("currency").and_then(Value::as_str) {
            value_bytes.extend_from_slice(
                Currency::try_from(currency)
                    .map_err(|_| XRPLTypeException::TryFromStrError)?
                    .get_buffer(),
            );
            data_type |= _TYPE_CURRENCY;
        }
        if let Some(issuer) = value.get("issuer").and_then(Value::as_str) {
            value_bytes.extend_from_slice(
                AccountId::try_from(issuer)
                    .map_err(|_| XRPLTypeException::TryFromStrError)?
                    .get_buffer(),
            );
            data_type |= _TYPE_ISSUER;
        }

        let mut buffer = vec![data_type];
        buffer.extend_from_slice(&value_bytes);
        PathStep::new(Some(&buffer)).map_err(|_| XRPLTypeException::TryFromStrError)
    }
}

impl Serialize for PathStep {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut parser = BinaryParser::from(self.get_buffer());
        let data_type = parser
            .read_uint8()
            .map_err(serde::ser::Error::custom)?;
        let mut map = Map::new();

        if data_type & _TYPE_ACCOUNT != 0 {
            let account =
                AccountId::from_parser(&mut parser, None).map_err(serde::ser::Error::custom)?;
            map.insert("account".to_string(), Value::String(account.to_string()));
        }
        if data_type & _TYPE_CURRENCY != 0 {
            let currency =
                Currency::from_parser(&mut parser, None).map_err(serde::ser::Error::custom)?;
            map.insert("currency".to_string(), Value::String(currency.to_string()));
        }
        if data_type & _TYPE_ISSUER != 0 {
            let issuer =
                AccountId::from_parser(&mut parser, None).map_err(serde::ser::Error::custom)?;
            map.insert("issuer".to_string(), Value::String(issuer.to_string()));
        }

        Value::Object(map).serialize(serializer)
    }
}

/// A single payment path: an ordered list of [`PathStep`]s.
#[derive(Debug, Clone)]
pub struct Path(Vec<PathStep>);

impl Path {
    pub fn steps(&self) -> &[PathStep] {
        &self.0
    }
}

impl TryFrom<&[Value]> for Path {
    type Error = XRPLTypeException;

    fn try_from(value: &[Value]) -> Result<Self, Self::Error> {
        let mut steps = Vec::with_capacity(value.len());
        for step in value {
            let step = step
                .as_object()
                .ok_or(XRPLTypeException::UnexpectedJSONType)?;
            steps.push(PathStep::try_from(step)?);
        }
        Ok(Path(steps))
    }
}

impl Serialize for Path {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for step in &self.0 {
            seq.serialize_element(step)?;
        }
        seq.end()
    }
}

/// A set of alternative payment paths, as carried by the `Paths` field of
/// cross-currency payments and offers.
///
/// See PathSet Fields:
/// `<https://xrpl.org/serialization.html#pathset-fields>`
#[derive(Debug, Clone)]
pub struct PathSet(Vec<Path>);

impl PathSet {
    pub fn paths(&self) -> &[Path] {
        &self.0
    }
}

impl Serializable for PathSet {
    fn new(buffer: Option<&[u8]>) -> Result<Self, XRPLBinaryCodecException> {
        match buffer {
            Some(bytes) => {
                let mut parser = BinaryParser::from(bytes);
                PathSet::from_parser(&mut parser, None)
            }
            None => Ok(PathSet(vec![])),
        }
    }

    fn from_parser(
        parser: &mut BinaryParser,
        _length: Option<usize>,
    ) -> Result<PathSet, XRPLBinaryCodecException> {
        let mut paths = Vec::new();
        let mut current = Vec::new();

        loop {
            if !parser.has_more() {
                break;
            }
            match parser.peek() {
                Some(_PATHSET_END_BYTE) => {
                    parser.skip_bytes(1)?;
                    paths.push(Path(current));
                    break;
                }
                Some(_PATH_SEPARATOR_BYTE) => {
                    parser.skip_bytes(1)?;
                    paths.push(Path(core::mem::take(&mut current)));
                }
                _ => {
                    current.push(PathStep::from_parser(parser, None)?);
                }
            }
        }

        Ok(PathSet(paths))
    }
}

impl Buffered for PathSet {
    /// PathSet is self-delimited rather than length-prefixed; callers encode
    /// it via [`PathSet::to_bytes`] instead of the generic `Buffered` buffer.
    fn get_buffer(&self) -> &[u8] {
        &[]
    }
}

impl PathSet {
    /// Encode this PathSet to its wire form, including path separators and
    /// the terminating end byte.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buffer = Vec::new();
        for (index, path) in self.0.iter().enumerate() {
            if index > 0 {
                buffer.push(_PATH_SEPARATOR_BYTE);
            }
            for step in path.steps() {
                buffer.extend_from_slice(step.get_buffer());
            }
        }
        buffer.push(_PATHSET_END_BYTE);
        buffer
    }
}

impl TryFrom<Value> for PathSet {
    type Error = XRPLTypeException;

    /// Construct a PathSet from its JSON form: an array of arrays of
    /// `{account, currency, issuer}` path step objects.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let outer = value.as_array().ok_or(XRPLTypeException::UnexpectedJSONType)?;
        let mut paths = Vec::with_capacity(outer.len());
        for path in outer {
            let steps = path.as_array().ok_or(XRPLTypeException::UnexpectedJSONType)?;
            paths.push(Path::try_from(steps.as_slice())?);
        }
        Ok(PathSet(paths))
    }
}

impl Serialize for PathSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for path in &self.0 {
            seq.serialize_element(path)?;
        }
        seq.end()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use alloc::vec;
    use serde_json::json;

    #[test]
    fn test_pathset_roundtrip_single_account_step() {
        let json = json!([[{"account": "rPEPPER7kfTD9w2To4CQk6UCfuHM9c6GDY"}]]);
        let path_set = PathSet::try_from(json.clone()).unwrap();
        let bytes = path_set.to_bytes();

        let mut parser = BinaryParser::from(bytes.clone());
        let decoded = PathSet::from_parser(&mut parser, None).unwrap();
        assert!(!parser.has_more());

        let redecoded = serde_json::to_value(&decoded).unwrap();
        assert_eq!(json, redecoded);
    }

    #[test]
    fn test_pathset_multiple_paths_separator() {
        let json = json!([
            [{"currency": "USD", "issuer": "rPEPPER7kfTD9w2To4CQk6UCfuHM9c6GDY"}],
            [{"account": "rPEPPER7kfTD9w2To4CQk6UCfuHM9c6GDY"}]
        ]);
        let path_set = PathSet::try_from(json).unwrap();
        let bytes = path_set.to_bytes();
        assert!(bytes.contains(&_PATH_SEPARATOR_BYTE));
        assert_eq!(Some(&_PATHSET_END_BYTE), bytes.last());
    }

    #[test]
    fn test_empty_pathstep_new_defaults_to_end_byte() {
        let step = PathStep::new(None).unwrap();
        assert_eq!(vec![_PATHSET_END_BYTE], step.get_buffer());
    }
}
