//! The keylet-addressed store: `View` is the read-only surface Preflight
//! and Preclaim see; `TransactionalView` adds the queue-then-commit
//! mutation surface Apply uses.
//!
//! The only concrete implementation shipped here is an in-memory store
//! (`MemoryStore`); a real node's database/SQL backend is an external
//! collaborator out of scope for this core.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::ledger::exceptions::{LedgerException, LedgerResult};
use crate::ledger::keylet::Keylet;

/// What a directory-walk visitor returns after inspecting one entry.
pub enum DirectoryStep {
    Continue,
    Stop,
}

/// Read-only surface over ledger state: `exists`/`read` plus the directory
/// walk every owner-indexed lookup (NFToken pages, book/owner directories)
/// is built on.
pub trait View {
    fn exists(&self, keylet: &Keylet) -> bool;
    fn read(&self, keylet: &Keylet) -> LedgerResult<Vec<u8>>;

    /// Visit every entry keylet listed in the directory rooted at
    /// `dir_keylet`, in page order, stopping early if `visitor` asks to.
    /// Sees a stable snapshot taken at the start of the walk.
    fn dir_for_each(
        &self,
        dir_keylet: &Keylet,
        visitor: &mut dyn FnMut(&Keylet) -> LedgerResult<DirectoryStep>,
    ) -> LedgerResult<()>;
}

/// The transactional scratch view `Apply` mutates: queues writes/deletes
/// until `commit`, or discards them on `abandon`. No cached pointer survives
/// a commit boundary — every read goes back through the store.
pub trait TransactionalView: View {
    fn write(&mut self, keylet: &Keylet, bytes: Vec<u8>) -> LedgerResult<()>;
    fn delete(&mut self, keylet: &Keylet) -> LedgerResult<()>;
    fn commit(&mut self);
    fn abandon(&mut self);
}

/// A simple in-memory ledger store keyed by [`Keylet`], with
/// copy-on-write transactional scratch semantics.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    objects: BTreeMap<Keylet, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self { objects: BTreeMap::new() }
    }
}

impl View for MemoryStore {
    fn exists(&self, keylet: &Keylet) -> bool {
        self.objects.contains_key(keylet)
    }

    fn read(&self, keylet: &Keylet) -> LedgerResult<Vec<u8>> {
        self.objects.get(keylet).cloned().ok_or(LedgerException::NotFound)
    }

    fn dir_for_each(
        &self,
        dir_keylet: &Keylet,
        visitor: &mut dyn FnMut(&Keylet) -> LedgerResult<DirectoryStep>,
    ) -> LedgerResult<()> {
        let dir = crate::ledger::directory::DirectoryNode::read(self, dir_keylet)?;
        for entry in dir.entries() {
            match visitor(entry)? {
                DirectoryStep::Continue => {}
                DirectoryStep::Stop => break,
            }
        }
        Ok(())
    }
}

/// A pending mutation queued against a [`MemoryStore`] until `commit`.
#[derive(Debug, Clone)]
enum PendingOp {
    Write(Vec<u8>),
    Delete,
}

/// Transactional scratch view over a [`MemoryStore`]: reads fall through to
/// the base store unless shadowed by a pending write, so mutations within a
/// single Apply are visible to subsequent reads within the same Apply.
pub struct MemoryTransactionalView<'a> {
    base: &'a mut MemoryStore,
    pending: BTreeMap<Keylet, PendingOp>,
}

impl<'a> MemoryTransactionalView<'a> {
    pub fn new(base: &'a mut MemoryStore) -> Self {
        Self { base, pending: BTreeMap::new() }
    }
}

impl<'a> View for MemoryTransactionalView<'a> {
    fn exists(&self, keylet: &Keylet) -> bool {
        match self.pending.get(keylet) {
            Some(PendingOp::Write(_)) => true,
            Some(PendingOp::Delete) => false,
            None => self.base.exists(keylet),
        }
    }

    fn read(&self, keylet: &Keylet) -> LedgerResult<Vec<u8>> {
        match self.pending.get(keylet) {
            Some(PendingOp::Write(bytes)) => Ok(bytes.clone()),
            Some(PendingOp::Delete) => Err(LedgerException::NotFound),
            None => self.base.read(keylet),
        }
    }

    fn dir_for_each(
        &self,
        dir_keylet: &Keylet,
        visitor: &mut dyn FnMut(&Keylet) -> LedgerResult<DirectoryStep>,
    ) -> LedgerResult<()> {
        let dir = crate::ledger::directory::DirectoryNode::read(self, dir_keylet)?;
        for entry in dir.entries() {
            match visitor(entry)? {
                DirectoryStep::Continue => {}
                DirectoryStep::Stop => break,
            }
        }
        Ok(())
    }
}

impl<'a> TransactionalView for MemoryTransactionalView<'a> {
    fn write(&mut self, keylet: &Keylet, bytes: Vec<u8>) -> LedgerResult<()> {
        self.pending.insert(*keylet, PendingOp::Write(bytes));
        Ok(())
    }

    fn delete(&mut self, keylet: &Keylet) -> LedgerResult<()> {
        self.pending.insert(*keylet, PendingOp::Delete);
        Ok(())
    }

    fn commit(&mut self) {
        for (keylet, op) in core::mem::take(&mut self.pending) {
            match op {
                PendingOp::Write(bytes) => {
                    self.base.objects.insert(keylet, bytes);
                }
                PendingOp::Delete => {
                    self.base.objects.remove(&keylet);
                }
            }
        }
    }

    fn abandon(&mut self) {
        self.pending.clear();
    }
}

/// A transactional scratch view nested over any `TransactionalView`,
/// including another scratch view. The engine pipeline uses this to give a
/// `Transactor::apply` call its own rollback boundary distinct from the
/// base view's: the base view carries the fee and sequence mutations that
/// always land once Preclaim passes, while a nested `ScratchView` carries
/// the transaction-specific mutations that are discarded wholesale if
/// `apply` fails with a `tec` code. Committing a `ScratchView` replays its
/// pending writes/deletes onto the base view's own pending set rather than
/// touching storage directly, so nothing is visible outside the base
/// view's eventual `commit`.
pub struct ScratchView<'a> {
    base: &'a mut dyn TransactionalView,
    pending: BTreeMap<Keylet, PendingOp>,
}

impl<'a> ScratchView<'a> {
    pub fn new(base: &'a mut dyn TransactionalView) -> Self {
        Self { base, pending: BTreeMap::new() }
    }
}

impl<'a> View for ScratchView<'a> {
    fn exists(&self, keylet: &Keylet) -> bool {
        match self.pending.get(keylet) {
            Some(PendingOp::Write(_)) => true,
            Some(PendingOp::Delete) => false,
            None => self.base.exists(keylet),
        }
    }

    fn read(&self, keylet: &Keylet) -> LedgerResult<Vec<u8>> {
        match self.pending.get(keylet) {
            Some(PendingOp::Write(bytes)) => Ok(bytes.clone()),
            Some(PendingOp::Delete) => Err(LedgerException::NotFound),
            None => self.base.read(keylet),
        }
    }

    fn dir_for_each(
        &self,
        dir_keylet: &Keylet,
        visitor: &mut dyn FnMut(&Keylet) -> LedgerResult<DirectoryStep>,
    ) -> LedgerResult<()> {
        let dir = crate::ledger::directory::DirectoryNode::read(self, dir_keylet)?;
        for entry in dir.entries() {
            match visitor(entry)? {
                DirectoryStep::Continue => {}
                DirectoryStep::Stop => break,
            }
        }
        Ok(())
    }
}

impl<'a> TransactionalView for ScratchView<'a> {
    fn write(&mut self, keylet: &Keylet, bytes: Vec<u8>) -> LedgerResult<()> {
        self.pending.insert(*keylet, PendingOp::Write(bytes));
        Ok(())
    }

    fn delete(&mut self, keylet: &Keylet) -> LedgerResult<()> {
        self.pending.insert(*keylet, PendingOp::Delete);
        Ok(())
    }

    fn commit(&mut self) {
        for (keylet, op) in core::mem::take(&mut self.pending) {
            match op {
                PendingOp::Write(bytes) => {
                    let _ = self.base.write(&keylet, bytes);
                }
                PendingOp::Delete => {
                    let _ = self.base.delete(&keylet);
                }
            }
        }
    }

    fn abandon(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ledger::keylet;

    #[test]
    fn transactional_view_shadows_base_until_commit() {
        let mut store = MemoryStore::new();
        let keylet = keylet::account(&[9u8; 20]).unwrap();
        {
            let mut view = MemoryTransactionalView::new(&mut store);
            assert!(!view.exists(&keylet));
            view.write(&keylet, alloc::vec![1, 2, 3]).unwrap();
            assert!(view.exists(&keylet));
            view.commit();
        }
        assert!(store.exists(&keylet));
        assert_eq!(store.read(&keylet).unwrap(), alloc::vec![1, 2, 3]);
    }

    #[test]
    fn abandon_discards_pending_writes() {
        let mut store = MemoryStore::new();
        let keylet = keylet::account(&[9u8; 20]).unwrap();
        {
            let mut view = MemoryTransactionalView::new(&mut store);
            view.write(&keylet, alloc::vec![1]).unwrap();
            view.abandon();
        }
        assert!(!store.exists(&keylet));
    }

    #[test]
    fn scratch_view_commits_into_base_without_touching_storage() {
        let mut store = MemoryStore::new();
        let keylet = keylet::account(&[9u8; 20]).unwrap();
        let mut base = MemoryTransactionalView::new(&mut store);
        {
            let mut scratch = ScratchView::new(&mut base);
            scratch.write(&keylet, alloc::vec![7]).unwrap();
            scratch.commit();
        }
        assert!(!store.exists(&keylet));
        base.commit();
        assert!(store.exists(&keylet));
    }

    #[test]
    fn scratch_view_abandon_leaves_base_pending_untouched() {
        let mut store = MemoryStore::new();
        let fee_keylet = keylet::account(&[1u8; 20]).unwrap();
        let scratch_keylet = keylet::account(&[2u8; 20]).unwrap();
        let mut base = MemoryTransactionalView::new(&mut store);
        base.write(&fee_keylet, alloc::vec![1]).unwrap();
        {
            let mut scratch = ScratchView::new(&mut base);
            scratch.write(&scratch_keylet, alloc::vec![2]).unwrap();
            scratch.abandon();
        }
        base.commit();
        assert!(store.exists(&fee_keylet));
        assert!(!store.exists(&scratch_keylet));
    }
}
