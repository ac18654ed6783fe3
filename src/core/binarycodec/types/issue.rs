//! Codec for an Issue: a currency code paired with its issuer, used by
//! ledger objects such as RippleState and Offer book directories that
//! reference a currency without an accompanying value.

use alloc::string::ToString;
use alloc::vec::Vec;

use crate::core::binarycodec::binary_wrappers::binary_parser::BinaryParser;
use crate::core::binarycodec::exceptions::XRPLBinaryCodecException;
use crate::core::binarycodec::types::currency::Currency;
use crate::core::binarycodec::types::serialized_type::Buffered;
use crate::core::binarycodec::types::serialized_type::Serializable;

/// A currency code together with its issuer, or the bare "XRP" currency
/// code with no issuer.
#[derive(Debug, Clone)]
pub struct Issue(Vec<u8>);

impl Serializable for Issue {
    fn new(buffer: Option<&[u8]>) -> Result<Self, XRPLBinaryCodecException> {
        Ok(Issue(buffer.unwrap_or_default().to_vec()))
    }

    fn from_parser(
        parser: &mut BinaryParser,
        length: Option<usize>,
    ) -> Result<Self, XRPLBinaryCodecException> {
        let currency = Currency::from_parser(parser, length)?;
        let mut bytes = currency.get_buffer().to_vec();

        if currency.to_string() == "XRP" {
            Ok(Issue(bytes))
        } else {
            let issuer = parser.read(20)?;
            bytes.extend_from_slice(&issuer);
            Ok(Issue(bytes))
        }
    }
}

impl Buffered for Issue {
    fn get_buffer(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const USD_ISSUE: &str =
        "0000000000000000000000005553440000000000B5F762798A53D543A014CAF8B297CFF8F2F937E8";
    const XRP_ISSUE: &str = "0000000000000000000000000000000000000000";

    #[test]
    fn test_from_parser_issued() {
        let mut parser = BinaryParser::from(hex::decode(USD_ISSUE).unwrap());
        let issue = Issue::from_parser(&mut parser, None).unwrap();
        assert_eq!(hex::decode(USD_ISSUE).unwrap(), issue.get_buffer());
        assert!(!parser.has_more());
    }

    #[test]
    fn test_from_parser_native() {
        let mut parser = BinaryParser::from(hex::decode(XRP_ISSUE).unwrap());
        let issue = Issue::from_parser(&mut parser, None).unwrap();
        assert_eq!(hex::decode(XRP_ISSUE).unwrap(), issue.get_buffer());
        assert!(!parser.has_more());
    }
}
