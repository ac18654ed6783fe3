//! `EngineConfig` (`spec.md` §6.3): the parameters a caller supplies at the
//! `submit` boundary. Parsing these out of a configuration *file* is an
//! external-collaborator concern (`spec.md` §1); this struct only models
//! the values the engine itself consumes.

/// Protocol parameters for one ledger's worth of transaction processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Base fee in drops charged per transaction (and per Batch inner).
    pub base_fee: u64,
    /// Reserve drops every account must retain regardless of owned objects.
    pub reserve_base: u64,
    /// Additional reserve drops charged per owned reserve-bearing object.
    pub reserve_increment: u64,
    /// The ledger sequence this transaction is being applied against; used
    /// for `Expiration`/`CancelAfter`/`FinishAfter` comparisons.
    pub ledger_sequence: u32,
    /// The close time of `ledger_sequence`, used for Escrow time windows.
    pub ledger_close_time: u32,
    /// Test-only escape hatch: skip cryptographic signature checks in
    /// Preflight. Never set outside test harnesses.
    pub skip_signature_verification: bool,
}

impl Default for EngineConfig {
    /// Mainnet-typical defaults: a base fee of 10 drops, a 10 XRP account
    /// reserve and a 2 XRP per-object increment.
    fn default() -> Self {
        EngineConfig {
            base_fee: 10,
            reserve_base: 10_000_000,
            reserve_increment: 2_000_000,
            ledger_sequence: 1,
            ledger_close_time: 0,
            skip_signature_verification: false,
        }
    }
}
