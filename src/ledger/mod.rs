//! The keylet-addressed ledger store (Component E) and the typed
//! projections over raw ledger-object bytes (Component F).
//!
//! `keylet` derives the content-addressed keys every other submodule reads
//! and writes by; `store` is the `View`/`TransactionalView` boundary the
//! engine consumes; `directory` is the paginated owner index those views
//! walk; `nftoken_page` is the fixed-capacity NFToken page chain, which
//! doubles as its own Component-F typed view since its on-disk shape is
//! entirely internal bookkeeping (see its module doc); `objects` holds the
//! typed projections over the real wire-format ledger entries (AccountRoot,
//! RippleState, Offer, Escrow, Ticket, SignerList, DepositPreauth).

pub mod directory;
pub mod exceptions;
pub mod keylet;
pub mod nftoken_page;
pub mod objects;
pub mod store;

pub use exceptions::{LedgerException, LedgerResult};
pub use keylet::Keylet;
pub use store::{DirectoryStep, MemoryStore, ScratchView, TransactionalView, View};
