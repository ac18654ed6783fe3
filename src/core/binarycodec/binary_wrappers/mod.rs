//! Wrapper classes around byte buffers used for
//! serialization and deserialization.
pub mod binary_parser;
pub mod binary_serializer;
pub(crate) mod utils;

pub use binary_parser::{BinaryParser, Parser, MAX_NESTING_DEPTH};
pub use binary_serializer::{BinarySerializer, Serializer};
