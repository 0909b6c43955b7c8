use std::{
    collections::BTreeMap,
    time::{Duration, Instant},
};

use bytes::BytesMut;

use crate::header::{Datagram, FragmentIndex};

/// Fragments buffered for one sequence number.
#[derive(Debug)]
pub(super) struct PartialMessage {
    total_fragments: u16,
    fragments: BTreeMap<FragmentIndex, Datagram>,
    last_seen: Instant,
    complete: bool,
}

impl PartialMessage {
    pub(super) fn new(total_fragments: u16, now: Instant) -> Self {
        Self {
            total_fragments,
            fragments: BTreeMap::new(),
            last_seen: now,
            complete: false,
        }
    }

    /// Store `datagram` at `index`, returning `true` when it replaced an
    /// earlier fragment with the same index.
    pub(super) fn record(&mut self, index: FragmentIndex, datagram: Datagram, now: Instant) -> bool {
        self.last_seen = now;
        self.fragments.insert(index, datagram).is_some()
    }

    pub(super) fn total_fragments(&self) -> u16 { self.total_fragments }

    pub(super) fn received(&self) -> usize { self.fragments.len() }

    pub(super) fn buffered_bytes(&self) -> usize {
        self.fragments.values().map(|fragment| fragment.payload().len()).sum()
    }

    pub(super) fn is_complete(&self) -> bool { self.complete }

    pub(super) fn mark_complete(&mut self) { self.complete = true; }

    pub(super) fn is_stale(&self, now: Instant, timeout: Duration) -> bool {
        now.saturating_duration_since(self.last_seen) > timeout
    }

    /// Join fragment zero's header bytes with every payload in index order.
    ///
    /// Returns `None` while any index in `0..total_fragments` is missing.
    pub(super) fn concatenate(&self) -> Option<BytesMut> {
        let first = self.fragments.get(&FragmentIndex::zero())?;
        let mut buffer = BytesMut::with_capacity(first.header_bytes().len() + self.buffered_bytes());
        buffer.extend_from_slice(first.header_bytes());

        for index in 0..self.total_fragments {
            let fragment = self.fragments.get(&FragmentIndex::new(index))?;
            buffer.extend_from_slice(fragment.payload());
        }

        Some(buffer)
    }
}
