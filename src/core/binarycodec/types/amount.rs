//! Codec for serializing and deserializing Amount fields.
//!
//! See Amount Fields:
//! `<https://xrpl.org/serialization.html#amount-fields>`
//!
//! An Amount is either native (XRP, 8 bytes: a 64-bit drops value) or issued
//! (48 bytes: an 8-byte packed value, a 20-byte currency code and a 20-byte
//! issuer AccountID). The top two bits of the first byte discriminate the
//! four classes (positive/negative, native/issued).

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::convert::TryFrom;

use serde::de::Error as DeError;
use serde::ser::Error as SerError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::core::addresscodec::{decode_classic_address, encode_classic_address, is_valid_classic_address};
use crate::core::binarycodec::binary_wrappers::binary_parser::{BinaryParser, Parser};
use crate::core::binarycodec::exceptions::XRPLBinaryCodecException;
use crate::core::binarycodec::types::currency::Currency;
use crate::core::binarycodec::types::serialized_type::{Buffered, Serializable};
use crate::core::exceptions::{XRPLCoreException, XRPLCoreResult};
use crate::utils::exceptions::XRPAmountRangeException;

/// Number of bytes on the wire for a native (XRP) amount.
pub const NATIVE_AMOUNT_BYTE_LENGTH: usize = 8;
/// Number of bytes on the wire for an issued-currency amount.
pub const ISSUED_AMOUNT_BYTE_LENGTH: usize = 48;

/// Inclusive lower bound of an issued amount's normalized exponent.
pub const MIN_IOU_EXPONENT: i32 = -96;
/// Inclusive upper bound of an issued amount's normalized exponent.
pub const MAX_IOU_EXPONENT: i32 = 80;
/// Maximum number of significant decimal digits an issued amount may carry.
pub const MAX_IOU_PRECISION: u32 = 16;
/// Inclusive lower bound of a normalized, non-zero issued mantissa.
pub const MIN_MANTISSA: u64 = 1_000_000_000_000_000;
/// Exclusive upper bound of a normalized, non-zero issued mantissa.
pub const MAX_MANTISSA: u64 = 10_000_000_000_000_000;
/// Maximum number of drops a native amount may hold.
pub const MAX_DROPS: u64 = 100_000_000_000_000_000;

const NOT_XRP_BIT: u8 = 0x80;
const POS_SIGN_BIT: u8 = 0x40;
const MANTISSA_MASK: u64 = (1u64 << 54) - 1;
const EXPONENT_BIAS: i32 = 97;
const ZERO_ISSUED_VALUE: u64 = 0x8000000000000000;

/// A currency amount as it appears on the JSON side of an issued-currency
/// object: `{"value": "...", "currency": "...", "issuer": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuedCurrency {
    pub value: String,
    pub currency: String,
    pub issuer: String,
}

impl TryFrom<Value> for IssuedCurrency {
    type Error = XRPLCoreException;

    fn try_from(value: Value) -> XRPLCoreResult<Self> {
        serde_json::from_value(value).map_err(|_| {
            XRPLCoreException::XRPLBinaryCodecError(
                XRPLBinaryCodecException::UnsupportedCurrencyRepresentation,
            )
        })
    }
}

/// Codec for serializing and deserializing Amount fields (native XRP or
/// issued currency).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Amount(Vec<u8>);

impl Amount {
    /// `true` iff this is a native (XRP) amount, i.e. `NOT_XRP_BIT` is clear.
    pub fn is_native(&self) -> bool {
        self.0.first().map(|b| b & NOT_XRP_BIT == 0).unwrap_or(true)
    }

    /// `true` iff the amount is non-negative (drops are always non-negative
    /// on the wire; for issued amounts this reads the sign bit).
    pub fn is_positive(&self) -> bool {
        if self.is_native() {
            true
        } else {
            self.value_u64() & (1u64 << 62) != 0
        }
    }

    fn value_u64(&self) -> u64 {
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&self.0[0..8]);
        u64::from_be_bytes(bytes)
    }

    /// Native drops value. Only meaningful when [`Amount::is_native`].
    pub fn drops(&self) -> u64 {
        self.value_u64() & !((NOT_XRP_BIT as u64 | POS_SIGN_BIT as u64) << 56)
    }

    /// `true` iff this issued amount is the exact zero sentinel.
    pub fn is_issued_zero(&self) -> bool {
        !self.is_native() && self.value_u64() == ZERO_ISSUED_VALUE
    }

    /// Normalized mantissa of an issued amount (0 for the zero sentinel).
    pub fn mantissa(&self) -> u64 {
        if self.is_issued_zero() {
            0
        } else {
            self.value_u64() & MANTISSA_MASK
        }
    }

    /// Normalized exponent of an issued amount (0 for the zero sentinel).
    pub fn exponent(&self) -> i32 {
        if self.is_issued_zero() {
            0
        } else {
            (((self.value_u64() >> 54) & 0xFF) as i32) - EXPONENT_BIAS
        }
    }

    /// Currency code of an issued amount.
    pub fn currency(&self) -> XRPLCoreResult<Currency> {
        Currency::new(Some(&self.0[8..28])).map_err(XRPLCoreException::from)
    }

    /// Issuer AccountID bytes of an issued amount.
    pub fn issuer_bytes(&self) -> &[u8] {
        &self.0[28..48]
    }

    /// Decimal string value of this amount (drops for native, the decoded
    /// mantissa/exponent rendering for issued), matching the canonical JSON
    /// encoding used elsewhere in the codec.
    pub fn value_string(&self) -> String {
        if self.is_native() {
            self.drops().to_string()
        } else if self.is_issued_zero() {
            "0".to_string()
        } else {
            format_decimal(self.mantissa(), self.exponent(), !self.is_positive())
        }
    }
}

/// Render a normalized (mantissa, exponent, sign) triple back into a
/// minimal decimal string (no exponent notation, no trailing zeros).
fn format_decimal(mantissa: u64, exponent: i32, negative: bool) -> String {
    if mantissa == 0 {
        return "0".to_string();
    }
    let digits = mantissa.to_string();
    let ndigits = digits.len() as i32;
    let point = ndigits + exponent;
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    if point <= 0 {
        out.push_str("0.");
        for _ in 0..(-point) {
            out.push('0');
        }
        out.push_str(&digits);
    } else if (point as usize) >= digits.len() {
        out.push_str(&digits);
        for _ in 0..(point as usize - digits.len()) {
            out.push('0');
        }
    } else {
        out.push_str(&digits[..point as usize]);
        out.push('.');
        out.push_str(&digits[point as usize..]);
    }
    if out.contains('.') {
        while out.ends_with('0') {
            out.pop();
        }
        if out.ends_with('.') {
            out.pop();
        }
    }
    out
}

/// Parsed components of a decimal literal: sign, the significant digits as
/// an integer, how many significant digits there are, the number of digits
/// that appeared after the decimal point, and any explicit exponent.
struct ParsedDecimal {
    negative: bool,
    mantissa: u64,
    precision: u32,
    frac_digits: i32,
    exp: i32,
}

fn parse_decimal(input: &str) -> Result<ParsedDecimal, XRPAmountRangeException> {
    let invalid = || XRPAmountRangeException::InvalidDecimalFormat {
        found: input.to_string(),
    };

    let mut chars = input.chars().peekable();
    let mut negative = false;
    match chars.peek() {
        Some('-') => {
            negative = true;
            chars.next();
        }
        Some('+') => {
            chars.next();
        }
        _ => {}
    }

    let mut int_part = String::new();
    while let Some(&c) = chars.peek() {
        if c.is_ascii_digit() {
            int_part.push(c);
            chars.next();
        } else {
            break;
        }
    }

    let mut frac_part = String::new();
    if let Some(&'.') = chars.peek() {
        chars.next();
        while let Some(&c) = chars.peek() {
            if c.is_ascii_digit() {
                frac_part.push(c);
                chars.next();
            } else {
                break;
            }
        }
    }

    if int_part.is_empty() && frac_part.is_empty() {
        return Err(invalid());
    }

    let mut exp: i32 = 0;
    if let Some(&c) = chars.peek() {
        if c == 'e' || c == 'E' {
            chars.next();
            let mut exp_neg = false;
            match chars.peek() {
                Some('-') => {
                    exp_neg = true;
                    chars.next();
                }
                Some('+') => {
                    chars.next();
                }
                _ => {}
            }
            let mut exp_digits = String::new();
            while let Some(&c2) = chars.peek() {
                if c2.is_ascii_digit() {
                    exp_digits.push(c2);
                    chars.next();
                } else {
                    break;
                }
            }
            if exp_digits.is_empty() {
                return Err(invalid());
            }
            exp = exp_digits.parse::<i32>().map_err(|_| invalid())?;
            if exp_neg {
                exp = -exp;
            }
        }
    }

    if chars.next().is_some() {
        return Err(invalid());
    }

    let frac_digits = frac_part.len() as i32;
    let digits = format!("{int_part}{frac_part}");
    let trimmed = digits.trim_start_matches('0');
    let (digits_trimmed, precision) = if trimmed.is_empty() {
        ("0", 0u32)
    } else {
        (trimmed, trimmed.len() as u32)
    };

    if precision > MAX_IOU_PRECISION {
        return Err(XRPAmountRangeException::InvalidPrecision {
            max: MAX_IOU_PRECISION,
            found: precision,
        });
    }

    let mantissa: u64 = if digits_trimmed == "0" {
        0
    } else {
        digits_trimmed.parse().map_err(|_| invalid())?
    };

    Ok(ParsedDecimal {
        negative,
        mantissa,
        precision,
        frac_digits,
        exp,
    })
}

/// Pack a non-zero, normalized issued amount into its 8-byte wire value.
fn pack_issued_value(negative: bool, mantissa: u64, exponent: i32) -> Result<u64, XRPAmountRangeException> {
    if !(MIN_MANTISSA..MAX_MANTISSA).contains(&mantissa) {
        return Err(XRPAmountRangeException::InvalidMantissa {
            min: MIN_MANTISSA,
            max: MAX_MANTISSA,
            found: mantissa,
        });
    }
    if exponent < MIN_IOU_EXPONENT || exponent > MAX_IOU_EXPONENT {
        return Err(XRPAmountRangeException::InvalidExponent {
            min: MIN_IOU_EXPONENT,
            max: MAX_IOU_EXPONENT,
            found: exponent,
        });
    }
    let mut value: u64 = 1u64 << 63;
    if !negative {
        value |= 1u64 << 62;
    }
    let biased_exponent = (exponent + EXPONENT_BIAS) as u64;
    value |= biased_exponent << 54;
    value |= mantissa & MANTISSA_MASK;
    Ok(value)
}

/// Normalize a parsed non-zero decimal literal into (mantissa, exponent)
/// within the valid issued-amount range.
fn normalize_issued(parsed: &ParsedDecimal) -> Result<(u64, i32), XRPAmountRangeException> {
    let shift = MAX_IOU_PRECISION - parsed.precision;
    let mantissa = parsed.mantissa.checked_mul(10u64.pow(shift)).ok_or(
        XRPAmountRangeException::InvalidPrecision {
            max: MAX_IOU_PRECISION,
            found: parsed.precision,
        },
    )?;
    let exponent = parsed.exp - parsed.frac_digits - shift as i32;
    Ok((mantissa, exponent))
}

fn encode_issued(
    value: &str,
    currency: &Currency,
    issuer_bytes: &[u8],
) -> Result<Vec<u8>, XRPLCoreException> {
    let parsed = parse_decimal(value)?;
    let mut bytes = Vec::with_capacity(ISSUED_AMOUNT_BYTE_LENGTH);

    if parsed.mantissa == 0 {
        bytes.extend_from_slice(&ZERO_ISSUED_VALUE.to_be_bytes());
    } else {
        let (mantissa, exponent) = normalize_issued(&parsed)?;
        let packed = pack_issued_value(parsed.negative, mantissa, exponent)?;
        bytes.extend_from_slice(&packed.to_be_bytes());
    }
    bytes.extend_from_slice(currency.get_buffer());
    bytes.extend_from_slice(issuer_bytes);
    Ok(bytes)
}

fn encode_native(value: &str) -> Result<Vec<u8>, XRPAmountRangeException> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(XRPAmountRangeException::InvalidDecimalFormat {
            found: value.to_string(),
        });
    }
    let drops: u64 = value.parse().map_err(|_| XRPAmountRangeException::InvalidDropsAmountTooLarge {
        max: MAX_DROPS.to_string(),
        found: value.to_string(),
    })?;
    if drops > MAX_DROPS {
        return Err(XRPAmountRangeException::InvalidDropsAmountTooLarge {
            max: MAX_DROPS.to_string(),
            found: value.to_string(),
        });
    }
    let mut bytes = drops.to_be_bytes();
    bytes[0] |= POS_SIGN_BIT;
    Ok(bytes.to_vec())
}

impl TryFrom<&str> for Amount {
    type Error = XRPAmountRangeException;

    /// Construct a native (XRP) Amount from its decimal drops string.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Ok(Amount(encode_native(value)?))
    }
}

impl TryFrom<IssuedCurrency> for Amount {
    type Error = XRPLCoreException;

    /// Construct an issued-currency Amount from its JSON representation.
    fn try_from(issued: IssuedCurrency) -> XRPLCoreResult<Self> {
        let currency = Currency::try_from(issued.currency.as_str())?;
        let issuer_bytes = if is_valid_classic_address(&issued.issuer) {
            decode_classic_address(&issued.issuer)?
        } else {
            hex::decode(&issued.issuer)?
        };
        Ok(Amount(encode_issued(&issued.value, &currency, &issuer_bytes)?))
    }
}

impl Serializable for Amount {
    fn new(buffer: Option<&[u8]>) -> Result<Self, XRPLBinaryCodecException> {
        match buffer {
            Some(bytes) if bytes.len() == NATIVE_AMOUNT_BYTE_LENGTH => Ok(Amount(bytes.to_vec())),
            Some(bytes) if bytes.len() == ISSUED_AMOUNT_BYTE_LENGTH => Ok(Amount(bytes.to_vec())),
            Some(bytes) => Err(XRPLBinaryCodecException::InvalidHashLength {
                expected: ISSUED_AMOUNT_BYTE_LENGTH,
                found: bytes.len(),
            }),
            None => Ok(Amount([POS_SIGN_BIT; NATIVE_AMOUNT_BYTE_LENGTH].to_vec())),
        }
    }

    fn from_parser(
        parser: &mut BinaryParser,
        _length: Option<usize>,
    ) -> Result<Self, XRPLBinaryCodecException> {
        let first_byte = parser
            .peek()
            .ok_or(XRPLBinaryCodecException::UnexpectedParserEmpty)?;
        let length = if first_byte & NOT_XRP_BIT == 0 {
            NATIVE_AMOUNT_BYTE_LENGTH
        } else {
            ISSUED_AMOUNT_BYTE_LENGTH
        };
        let bytes = parser.read(length)?;
        Amount::new(Some(&bytes))
    }
}

impl Buffered for Amount {
    fn get_buffer(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for Amount {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if self.is_native() {
            serializer.serialize_str(&self.value_string())
        } else {
            let currency = self.currency().map_err(|e| S::Error::custom(format!("{e}")))?;
            let issuer =
                encode_classic_address(self.issuer_bytes()).map_err(|e| S::Error::custom(format!("{e}")))?;
            let mut map = serde_json::Map::new();
            map.insert("value".into(), Value::String(self.value_string()));
            map.insert("currency".into(), Value::String(currency.to_string()));
            map.insert("issuer".into(), Value::String(issuer));
            Value::Object(map).serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        if let Some(drops) = value.as_str() {
            Amount::try_from(drops).map_err(|e| DeError::custom(format!("{e}")))
        } else if value.is_object() {
            let issued = IssuedCurrency::try_from(value).map_err(|e| DeError::custom(format!("{e}")))?;
            Amount::try_from(issued).map_err(|e| DeError::custom(format!("{e}")))
        } else {
            Err(DeError::custom("expected a drops string or issued-currency object"))
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn native_zero_roundtrips() {
        let amount = Amount::try_from("0").unwrap();
        assert_eq!("4000000000000000", hex::encode(amount.as_ref()));
        assert_eq!("0", amount.value_string());
    }

    #[test]
    fn native_one_roundtrips() {
        let amount = Amount::try_from("1").unwrap();
        assert_eq!("4000000000000001", hex::encode(amount.as_ref()));
    }

    #[test]
    fn native_one_million_roundtrips() {
        let amount = Amount::try_from("1000000").unwrap();
        assert_eq!("40000000000f4240", hex::encode(amount.as_ref()));
    }

    #[test]
    fn native_rejects_over_max_drops() {
        assert!(Amount::try_from("100000000000000001").is_err());
    }

    #[test]
    fn native_rejects_decimal_input() {
        assert!(Amount::try_from("1.5").is_err());
    }

    #[test]
    fn issued_one_usd_matches_known_vector() {
        let currency = Currency::try_from("USD").unwrap();
        let issuer = decode_classic_address("rvYAfWj5gh67oV6fW32ZzP3Aw4Eubs59B").unwrap();
        let bytes = encode_issued("1", &currency, &issuer).unwrap();
        assert_eq!(
            "d4838d7ea4c6800000000000000000000000000055534400000000\
             00a20b3c85f482532a9578dbb3950b85ca06594d1",
            hex::encode(&bytes)
        );
    }

    #[test]
    fn issued_currency_rejects_xrp() {
        let issued = IssuedCurrency {
            value: "1".into(),
            currency: "XRP".into(),
            issuer: "rvYAfWj5gh67oV6fW32ZzP3Aw4Eubs59B".into(),
        };
        assert!(Amount::try_from(issued).is_err());
    }

    #[test]
    fn issued_zero_is_sentinel() {
        let currency = Currency::try_from("USD").unwrap();
        let issuer = decode_classic_address("rvYAfWj5gh67oV6fW32ZzP3Aw4Eubs59B").unwrap();
        let bytes = encode_issued("0", &currency, &issuer).unwrap();
        let mut value = [0u8; 8];
        value.copy_from_slice(&bytes[0..8]);
        assert_eq!(ZERO_ISSUED_VALUE, u64::from_be_bytes(value));
    }

    #[test]
    fn adjusted_exponent_edge_1e95_is_accepted() {
        let parsed = parse_decimal("1e95").unwrap();
        let (_, exponent) = normalize_issued(&parsed).unwrap();
        assert_eq!(MAX_IOU_EXPONENT, exponent);
    }

    #[test]
    fn precision_over_sixteen_digits_is_rejected() {
        assert!(parse_decimal("12345678901234567").is_err());
    }
}
