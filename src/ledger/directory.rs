//! Paginated owner index ("DirectoryNode"). Each page holds up to
//! [`MAX_DIR_PAGE_ENTRIES`] entry keylets (the keys of every
//! reserve-charging object an account owns, or the offers resting at one
//! order-book price) and chains to the next page by a deterministic page
//! keylet, the same pattern [`crate::ledger::nftoken_page`] uses to chain
//! NFTokenPage entries.
//!
//! The on-disk encoding here is a compact internal format (entry count,
//! then each entry's ledger-entry-type and 32-byte key, then an optional
//! next-page pointer) rather than the full `DirectoryNode` object's field
//! set: the directory's wire bytes are an internal store detail, not part
//! of the binary-codec differential-vector surface, so this crate does not
//! carry the extra indirection of round-tripping it through the object
//! codec.

use alloc::vec::Vec;

use crate::core::keypairs::utils::sha512_first_half;
use crate::ledger::exceptions::{LedgerException, LedgerResult};
use crate::ledger::keylet::Keylet;
use crate::ledger::store::{TransactionalView, View};

/// Maximum number of entries held directly on one directory page before a
/// new page is chained on. Matches rippled's `dirNodeMaxEntries`.
pub const MAX_DIR_PAGE_ENTRIES: usize = 32;

fn page_keylet(root: &Keylet, page_index: u64) -> Keylet {
    if page_index == 0 {
        return *root;
    }
    let mut buf = Vec::with_capacity(40);
    buf.extend_from_slice(&root.key);
    buf.extend_from_slice(&page_index.to_be_bytes());
    Keylet {
        ledger_entry_type: root.ledger_entry_type,
        key: sha512_first_half(&buf),
    }
}

fn encode_page(entries: &[Keylet], next_page_index: Option<u64>) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(4 + entries.len() * 34 + 9);
    bytes.extend_from_slice(&(entries.len() as u32).to_be_bytes());
    for entry in entries {
        bytes.extend_from_slice(&entry.ledger_entry_type.to_be_bytes());
        bytes.extend_from_slice(&entry.key);
    }
    match next_page_index {
        Some(idx) => {
            bytes.push(1);
            bytes.extend_from_slice(&idx.to_be_bytes());
        }
        None => bytes.push(0),
    }
    bytes
}

fn decode_page(bytes: &[u8]) -> LedgerResult<(Vec<Keylet>, Option<u64>)> {
    if bytes.len() < 4 {
        return Err(LedgerException::Malformed("directory page too short".into()));
    }
    let count = u32::from_be_bytes(bytes[0..4].try_into().unwrap()) as usize;
    let mut offset = 4;
    let mut entries = Vec::with_capacity(count);
    for _ in 0..count {
        if bytes.len() < offset + 34 {
            return Err(LedgerException::Malformed("directory page truncated".into()));
        }
        let ledger_entry_type =
            i16::from_be_bytes(bytes[offset..offset + 2].try_into().unwrap());
        let mut key = [0u8; 32];
        key.copy_from_slice(&bytes[offset + 2..offset + 34]);
        entries.push(Keylet { ledger_entry_type, key });
        offset += 34;
    }
    let has_next = *bytes.get(offset).ok_or_else(|| {
        LedgerException::Malformed("directory page missing next-page marker".into())
    })?;
    offset += 1;
    let next = if has_next == 1 {
        if bytes.len() < offset + 8 {
            return Err(LedgerException::Malformed("directory page truncated next pointer".into()));
        }
        Some(u64::from_be_bytes(bytes[offset..offset + 8].try_into().unwrap()))
    } else {
        None
    };
    Ok((entries, next))
}

/// An in-memory snapshot of an owner directory's full entry list, taken at
/// the start of a walk: callers must not rely on seeing concurrent
/// mutations mid-iteration.
pub struct DirectoryNode {
    entries: Vec<Keylet>,
}

impl DirectoryNode {
    /// Read and flatten the full page chain rooted at `root`. An absent
    /// root page is treated as an empty directory (an account with no
    /// reserve-charging objects has no owner directory entry yet).
    pub fn read(view: &dyn View, root: &Keylet) -> LedgerResult<Self> {
        let mut entries = Vec::new();
        let mut page_index = 0u64;
        loop {
            let keylet = page_keylet(root, page_index);
            if !view.exists(&keylet) {
                break;
            }
            let bytes = view.read(&keylet)?;
            let (page_entries, next) = decode_page(&bytes)?;
            entries.extend(page_entries);
            match next {
                Some(idx) => page_index = idx,
                None => break,
            }
        }
        Ok(DirectoryNode { entries })
    }

    pub fn entries(&self) -> &[Keylet] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append `entry` to the directory rooted at `root`, creating new pages
    /// as needed. Returns the page index the entry landed on (used as the
    /// object's `owner_node`/`book_node` field).
    pub fn insert(
        view: &mut dyn TransactionalView,
        root: &Keylet,
        entry: Keylet,
    ) -> LedgerResult<u64> {
        let mut page_index = 0u64;
        loop {
            let keylet = page_keylet(root, page_index);
            let (mut entries, next) = if view.exists(&keylet) {
                decode_page(&view.read(&keylet)?)?
            } else {
                (Vec::new(), None)
            };

            if entries.len() < MAX_DIR_PAGE_ENTRIES {
                entries.push(entry);
                view.write(&keylet, encode_page(&entries, next))?;
                return Ok(page_index);
            }

            match next {
                Some(idx) => page_index = idx,
                None => {
                    let new_index = page_index + 1;
                    view.write(&keylet, encode_page(&entries, Some(new_index)))?;
                    let new_keylet = page_keylet(root, new_index);
                    view.write(&new_keylet, encode_page(&[entry], None))?;
                    return Ok(new_index);
                }
            }
        }
    }

    /// Remove `entry` from the directory rooted at `root`. Returns `true`
    /// if it was found and removed. An emptied non-root page is unlinked
    /// and deleted; the root page is kept (possibly empty) so the owner's
    /// directory keylet remains stable for future inserts.
    pub fn remove(
        view: &mut dyn TransactionalView,
        root: &Keylet,
        entry: &Keylet,
    ) -> LedgerResult<bool> {
        let mut page_index = 0u64;
        let mut prev_index: Option<u64> = None;
        loop {
            let keylet = page_keylet(root, page_index);
            if !view.exists(&keylet) {
                return Ok(false);
            }
            let (mut entries, next) = decode_page(&view.read(&keylet)?)?;
            if let Some(pos) = entries.iter().position(|e| e == entry) {
                entries.remove(pos);
                if entries.is_empty() && page_index != 0 {
                    view.delete(&keylet)?;
                    if let Some(prev_idx) = prev_index {
                        let prev_keylet = page_keylet(root, prev_idx);
                        let (prev_entries, _) = decode_page(&view.read(&prev_keylet)?)?;
                        view.write(&prev_keylet, encode_page(&prev_entries, next))?;
                    }
                } else {
                    view.write(&keylet, encode_page(&entries, next))?;
                }
                return Ok(true);
            }
            match next {
                Some(idx) => {
                    prev_index = Some(page_index);
                    page_index = idx;
                }
                None => return Ok(false),
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ledger::store::MemoryStore;

    fn keylet_n(n: u8) -> Keylet {
        Keylet { ledger_entry_type: 111, key: [n; 32] }
    }

    #[test]
    fn insert_and_read_round_trips() {
        let mut store = MemoryStore::new();
        let root = keylet_n(0);
        {
            let mut view = crate::ledger::store::MemoryTransactionalView::new(&mut store);
            DirectoryNode::insert(&mut view, &root, keylet_n(1)).unwrap();
            DirectoryNode::insert(&mut view, &root, keylet_n(2)).unwrap();
            view.commit();
        }
        let dir = DirectoryNode::read(&store, &root).unwrap();
        assert_eq!(dir.len(), 2);
        assert_eq!(dir.entries(), &[keylet_n(1), keylet_n(2)]);
    }

    #[test]
    fn overflowing_a_page_chains_a_new_one() {
        let mut store = MemoryStore::new();
        let root = keylet_n(0);
        {
            let mut view = crate::ledger::store::MemoryTransactionalView::new(&mut store);
            for i in 0..(MAX_DIR_PAGE_ENTRIES as u8 + 1) {
                DirectoryNode::insert(&mut view, &root, keylet_n(i.wrapping_add(10))).unwrap();
            }
            view.commit();
        }
        let dir = DirectoryNode::read(&store, &root).unwrap();
        assert_eq!(dir.len(), MAX_DIR_PAGE_ENTRIES + 1);
    }

    #[test]
    fn remove_deletes_emptied_non_root_pages() {
        let mut store = MemoryStore::new();
        let root = keylet_n(0);
        {
            let mut view = crate::ledger::store::MemoryTransactionalView::new(&mut store);
            for i in 0..(MAX_DIR_PAGE_ENTRIES as u8 + 1) {
                DirectoryNode::insert(&mut view, &root, keylet_n(i.wrapping_add(10))).unwrap();
            }
            view.commit();
        }
        let overflow_entry = keylet_n((MAX_DIR_PAGE_ENTRIES as u8).wrapping_add(10));
        {
            let mut view = crate::ledger::store::MemoryTransactionalView::new(&mut store);
            assert!(DirectoryNode::remove(&mut view, &root, &overflow_entry).unwrap());
            view.commit();
        }
        let dir = DirectoryNode::read(&store, &root).unwrap();
        assert_eq!(dir.len(), MAX_DIR_PAGE_ENTRIES);
        assert!(!store.exists(&page_keylet(&root, 1)));
    }
}
