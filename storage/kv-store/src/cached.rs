// Copyright © Atlas Foundation
// SPDX-License-Identifier: Apache-2.0

use crate::{prefix_successor, KVEntry, KVStore};
use std::{
    cmp::Ordering,
    collections::BTreeMap,
    iter::Peekable,
    ops::Bound::{Excluded, Included, Unbounded},
};

/// A copy-on-write overlay over a read-only parent store.
///
/// Reads fall through to the parent unless the key was written or
/// deleted in the overlay; writes and deletes are buffered privately.
/// Consuming the overlay with [`into_write_set`](Self::into_write_set)
/// yields the buffered changes for an atomic [`WriteSet::apply`] against
/// the parent; dropping the overlay instead discards every change.
///
/// This is the isolation primitive used for finalization dispatch: a
/// downstream handler runs against the overlay, and its effects become
/// visible all at once or not at all.
pub struct CachedKVStore<'a> {
    parent: &'a dyn KVStore,
    overlay: BTreeMap<Vec<u8>, Option<Vec<u8>>>,
}

impl<'a> CachedKVStore<'a> {
    pub fn new(parent: &'a dyn KVStore) -> Self {
        Self {
            parent,
            overlay: BTreeMap::new(),
        }
    }

    /// Consumes the overlay into the set of buffered writes, in key
    /// order.
    pub fn into_write_set(self) -> WriteSet {
        WriteSet {
            writes: self.overlay.into_iter().collect(),
        }
    }

    fn overlay_range<'b>(
        &'b self,
        prefix: &[u8],
        reverse: bool,
    ) -> Box<dyn Iterator<Item = (&'b Vec<u8>, &'b Option<Vec<u8>>)> + 'b> {
        let lower = Included(prefix.to_vec());
        let upper = match prefix_successor(prefix) {
            Some(end) => Excluded(end),
            None => Unbounded,
        };
        let range = self.overlay.range((lower, upper));
        if reverse {
            Box::new(range.rev())
        } else {
            Box::new(range)
        }
    }
}

impl KVStore for CachedKVStore<'_> {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        match self.overlay.get(key) {
            Some(slot) => slot.clone(),
            None => self.parent.get(key),
        }
    }

    fn set(&mut self, key: Vec<u8>, value: Vec<u8>) {
        self.overlay.insert(key, Some(value));
    }

    fn delete(&mut self, key: &[u8]) {
        self.overlay.insert(key.to_vec(), None);
    }

    fn has(&self, key: &[u8]) -> bool {
        match self.overlay.get(key) {
            Some(slot) => slot.is_some(),
            None => self.parent.has(key),
        }
    }

    fn iter_prefix<'b>(&'b self, prefix: &[u8]) -> Box<dyn Iterator<Item = KVEntry> + 'b> {
        Box::new(MergedIter {
            parent: self.parent.iter_prefix(prefix).peekable(),
            overlay: self.overlay_range(prefix, false).peekable(),
            reverse: false,
        })
    }

    fn iter_prefix_rev<'b>(&'b self, prefix: &[u8]) -> Box<dyn Iterator<Item = KVEntry> + 'b> {
        Box::new(MergedIter {
            parent: self.parent.iter_prefix_rev(prefix).peekable(),
            overlay: self.overlay_range(prefix, true).peekable(),
            reverse: true,
        })
    }
}

/// Ordered merge of the parent's entries with the overlay's buffered
/// slots. On a key collision the overlay wins; a buffered delete hides
/// the parent entry entirely.
struct MergedIter<'a> {
    parent: Peekable<Box<dyn Iterator<Item = KVEntry> + 'a>>,
    overlay: Peekable<Box<dyn Iterator<Item = (&'a Vec<u8>, &'a Option<Vec<u8>>)> + 'a>>,
    reverse: bool,
}

impl Iterator for MergedIter<'_> {
    type Item = KVEntry;

    fn next(&mut self) -> Option<KVEntry> {
        loop {
            let take_parent = match (self.parent.peek(), self.overlay.peek()) {
                (None, None) => return None,
                (Some(_), None) => true,
                (None, Some(_)) => false,
                (Some((parent_key, _)), Some((overlay_key, _))) => {
                    let ord = parent_key.as_slice().cmp(overlay_key.as_slice());
                    let ord = if self.reverse { ord.reverse() } else { ord };
                    match ord {
                        Ordering::Less => true,
                        Ordering::Greater => false,
                        Ordering::Equal => {
                            // shadowed by the overlay
                            self.parent.next();
                            false
                        },
                    }
                },
            };
            if take_parent {
                if let Some(entry) = self.parent.next() {
                    return Some(entry);
                }
            } else if let Some((key, slot)) = self.overlay.next() {
                if let Some(value) = slot {
                    return Some((key.clone(), value.clone()));
                }
                // buffered delete; nothing to yield
            }
        }
    }
}

/// Changes buffered by a [`CachedKVStore`], ready to be merged into the
/// parent store. `None` entries are deletes.
#[derive(Clone, Debug, Default)]
pub struct WriteSet {
    writes: Vec<(Vec<u8>, Option<Vec<u8>>)>,
}

impl WriteSet {
    pub fn len(&self) -> usize {
        self.writes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    /// Merges the buffered changes into `store`.
    pub fn apply(self, store: &mut dyn KVStore) {
        for (key, slot) in self.writes {
            match slot {
                Some(value) => store.set(key, value),
                None => store.delete(&key),
            }
        }
    }
}
