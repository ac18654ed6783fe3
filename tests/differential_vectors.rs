//! Byte-for-byte fixtures against the literal values `spec.md` §8.2/§8.3
//! call out by name: XRP-amount encoding, IOU-amount encoding (value,
//! currency code, and issuer AccountID all checked against one known wire
//! encoding), and currency-code strictness on the encode path.

use core::convert::TryFrom;

use xrpl_ledger_core::core::binarycodec::types::account_id::AccountId;
use xrpl_ledger_core::core::binarycodec::types::amount::{Amount, IssuedCurrency};
use xrpl_ledger_core::core::binarycodec::types::currency::Currency;
use xrpl_ledger_core::core::binarycodec::types::serialized_type::Buffered;

#[test]
fn xrp_amount_encodes_to_the_literal_drops_fixtures() {
    assert_eq!(hex::encode(Amount::try_from("0").unwrap().get_buffer()), "4000000000000000");
    assert_eq!(hex::encode(Amount::try_from("1").unwrap().get_buffer()), "4000000000000001");
    assert_eq!(hex::encode(Amount::try_from("1000000").unwrap().get_buffer()), "40000000000f4240");
}

#[test]
fn xrp_amount_beyond_max_drops_is_out_of_range() {
    assert!(Amount::try_from("100000000000000001").is_err());
}

#[test]
fn iou_amount_encodes_to_the_literal_one_usd_fixture() {
    let issued = IssuedCurrency {
        value: "1".into(),
        currency: "USD".into(),
        issuer: "rvYAfWj5gh67oV6fW32ZzP3Aw4Eubs59B".into(),
    };
    let amount = Amount::try_from(issued).unwrap();
    assert_eq!(
        hex::encode(amount.get_buffer()),
        "d4838d7ea4c680000000000000000000000000005553440000000000\
0a20b3c85f482532a9578dbb3950b85ca06594d1"
    );
}

#[test]
fn the_literal_one_usd_fixture_decomposes_into_header_currency_and_issuer() {
    // Same fixture as above, split at its three field boundaries (8 bytes
    // of packed mantissa/exponent, 20 bytes of currency code, 20 bytes of
    // issuer AccountID) and checked against each field's own codec
    // independently, so a failure here localizes to one specific codec.
    let currency = Currency::try_from("USD").unwrap();
    assert_eq!(hex::encode(currency.get_buffer()), "0000000000000000000000005553440000000000");

    let issuer = AccountId::try_from("rvYAfWj5gh67oV6fW32ZzP3Aw4Eubs59B").unwrap();
    assert_eq!(hex::encode(issuer.get_buffer()), "0a20b3c85f482532a9578dbb3950b85ca06594d1");
}

#[test]
fn currency_code_xrp_is_rejected_on_the_encode_path() {
    assert!(Currency::try_from("XRP").is_err());
}
