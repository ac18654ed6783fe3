//! Classified result codes (`spec.md` §4.7, §6.5): every engine outcome is
//! one of a closed set of codes, each belonging to exactly one class by its
//! three-character prefix. `ResultCode::class` derives the class from the
//! canonical name string rather than hand-duplicating the mapping, so the
//! totality property of `spec.md` §8.2.8 holds for any name this type can
//! produce by construction.

use alloc::string::{String, ToString};
use core::fmt;

/// The six result classes named in `spec.md` §4.7.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultClass {
    /// `tes`: applied, success.
    Tes,
    /// `tec`: applied, fee claimed, the transaction's own effect rolled back.
    Tec,
    /// `tef`: final, no fee charged, will never succeed if retried as-is.
    Tef,
    /// `ter`: retryable, no fee charged.
    Ter,
    /// `tem`: malformed, final.
    Tem,
    /// `tel`: local to the submitting server, final.
    Tel,
}

macro_rules! result_codes {
    ($($variant:ident => $name:literal),+ $(,)?) => {
        /// A canonical, by-name transaction result code.
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        #[non_exhaustive]
        pub enum ResultCode {
            $($variant),+
        }

        impl ResultCode {
            /// The canonical wire/JSON name, e.g. `"tesSUCCESS"`.
            pub fn name(&self) -> &'static str {
                match self {
                    $(ResultCode::$variant => $name),+
                }
            }
        }
    };
}

result_codes! {
    TesSuccess => "tesSUCCESS",

    TecClaim => "tecCLAIM",
    TecDirFull => "tecDIR_FULL",
    TecInsufficientReserve => "tecINSUFFICIENT_RESERVE",
    TecInsufReserveLine => "tecINSUF_RESERVE_LINE",
    TecInsufReserveOffer => "tecINSUF_RESERVE_OFFER",
    TecNoDst => "tecNO_DST",
    TecNoDstInsufXrp => "tecNO_DST_INSUF_XRP",
    TecNoLine => "tecNO_LINE",
    TecNoLineRedundant => "tecNO_LINE_REDUNDANT",
    TecNoLineInsufReserve => "tecNO_LINE_INSUF_RESERVE",
    TecNoAuth => "tecNO_AUTH",
    TecNoIssuer => "tecNO_ISSUER",
    TecPathDry => "tecPATH_DRY",
    TecPathPartial => "tecPATH_PARTIAL",
    TecUnfunded => "tecUNFUNDED",
    TecUnfundedAdd => "tecUNFUNDED_ADD",
    TecUnfundedOffer => "tecUNFUNDED_OFFER",
    TecUnfundedPayment => "tecUNFUNDED_PAYMENT",
    TecFrozen => "tecFROZEN",
    TecNoTarget => "tecNO_TARGET",
    TecNoPermission => "tecNO_PERMISSION",
    TecNoEntry => "tecNO_ENTRY",
    TecOwners => "tecOWNERS",
    TecExpired => "tecEXPIRED",
    TecDuplicate => "tecDUPLICATE",
    TecKilled => "tecKILLED",
    TecHasObligations => "tecHAS_OBLIGATIONS",
    TecTooSoon => "tecTOO_SOON",
    TecInternal => "tecINTERNAL",
    TecInvariantFailed => "tecINVARIANT_FAILED",
    TecDstTagNeeded => "tecDST_TAG_NEEDED",
    TecNoSuitableNftokenPage => "tecNO_SUITABLE_NFTOKEN_PAGE",
    TecNftokenBuySellMismatch => "tecNFTOKEN_BUY_SELL_MISMATCH",
    TecNftokenOfferTypeMismatch => "tecNFTOKEN_OFFER_TYPE_MISMATCH",
    TecCantAcceptOwnNftokenOffer => "tecCANT_ACCEPT_OWN_NFTOKEN_OFFER",
    TecBatchFailure => "tecBATCH_FAILURE",

    TefFailure => "tefFAILURE",
    TefAlready => "tefALREADY",
    TefBadAuth => "tefBAD_AUTH",
    TefBadSignature => "tefBAD_SIGNATURE",
    TefCreated => "tefCREATED",
    TefMaxLedger => "tefMAX_LEDGER",
    TefNoAuthRequired => "tefNO_AUTH_REQUIRED",
    TefPastSeq => "tefPAST_SEQ",
    TefWrongPrior => "tefWRONG_PRIOR",
    TefInvariantFailed => "tefINVARIANT_FAILED",

    TerRetry => "terRETRY",
    TerFundsSpent => "terFUNDS_SPENT",
    TerInsufFeeB => "terINSUF_FEE_B",
    TerNoAccount => "terNO_ACCOUNT",
    TerNoAuth => "terNO_AUTH",
    TerNoLine => "terNO_LINE",
    TerOwners => "terOWNERS",
    TerPreSeq => "terPRE_SEQ",
    TerNoRipple => "terNO_RIPPLE",
    TerQueued => "terQUEUED",

    TemMalformed => "temMALFORMED",
    TemBadAmount => "temBAD_AMOUNT",
    TemBadCurrency => "temBAD_CURRENCY",
    TemBadExpiration => "temBAD_EXPIRATION",
    TemBadFee => "temBAD_FEE",
    TemBadIssuer => "temBAD_ISSUER",
    TemBadLimit => "temBAD_LIMIT",
    TemBadOffer => "temBAD_OFFER",
    TemBadSequence => "temBAD_SEQUENCE",
    TemBadSignature => "temBAD_SIGNATURE",
    TemDstIsSrc => "temDST_IS_SRC",
    TemDstNeeded => "temDST_NEEDED",
    TemInvalid => "temINVALID",
    TemInvalidFlag => "temINVALID_FLAG",
    TemRedundant => "temREDUNDANT",
    TemDisabled => "temDISABLED",
    TemCannotPreauthSelf => "temCANNOT_PREAUTH_SELF",

    TelLocalError => "telLOCAL_ERROR",
    TelFailedProcessing => "telFAILED_PROCESSING",
    TelInsufFeeP => "telINSUF_FEE_P",
}

impl ResultCode {
    /// The class this code belongs to, derived from its name's
    /// three-character prefix (`spec.md` §8.2.8: total over any name of
    /// length ≥ 3 this type can produce).
    pub fn class(&self) -> ResultClass {
        match &self.name()[0..3] {
            "tes" => ResultClass::Tes,
            "tec" => ResultClass::Tec,
            "tef" => ResultClass::Tef,
            "ter" => ResultClass::Ter,
            "tem" => ResultClass::Tem,
            "tel" => ResultClass::Tel,
            other => unreachable!("result code name with unclassified prefix {other}"),
        }
    }

    /// `true` iff this code's class is `Tes`.
    pub fn success(&self) -> bool {
        self.class() == ResultClass::Tes
    }

    /// `true` iff the transaction's fee was charged: classes `Tes`/`Tec`.
    pub fn applied(&self) -> bool {
        matches!(self.class(), ResultClass::Tes | ResultClass::Tec)
    }
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The external result of one `submit` call (`spec.md` §6.3, §7).
#[derive(Debug, Clone, PartialEq)]
pub struct EngineResult {
    pub code: ResultCode,
    pub message: Option<String>,
    /// Populated only for a `Batch` outer transaction: the per-inner result
    /// codes in list order (`spec.md` §7, "the batch result reports the
    /// outer code and, optionally, the per-inner code vector").
    pub inner_results: Option<alloc::vec::Vec<ResultCode>>,
}

impl EngineResult {
    pub fn from_code(code: ResultCode) -> Self {
        EngineResult { code, message: None, inner_results: None }
    }

    pub fn with_message(code: ResultCode, message: &str) -> Self {
        EngineResult { code, message: Some(message.to_string()), inner_results: None }
    }

    pub fn success(&self) -> bool {
        self.code.success()
    }

    pub fn applied(&self) -> bool {
        self.code.applied()
    }
}
