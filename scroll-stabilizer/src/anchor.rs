use core::fmt;

use crate::{HostError, ScrollHost};

/// The element a pointer went down on, and where it sat in the viewport at that moment.
#[derive(Clone, PartialEq, Eq)]
pub struct PendingAnchor<N> {
    pub node: N,
    pub offset_before: i64,
}

impl<N: fmt::Debug> fmt::Debug for PendingAnchor<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingAnchor")
            .field("node", &self.node)
            .field("offset_before", &self.offset_before)
            .finish()
    }
}

/// Keeps a clicked element under the cursor when the click changes layout above it.
///
/// The flow for one click is:
/// 1. `capture` on pointerdown records the anchor and opens the mutation watch.
/// 2. `on_mutation` only flags the anchor dirty; nothing is measured there.
/// 3. `queue_settle` on click schedules exactly one settle microtask.
/// 4. `begin_settle` (from the microtask) closes the watch and hands back the anchor to restore,
///    if layout actually changed.
#[derive(Clone, Debug)]
pub struct AnchorCompensator<N> {
    pending: Option<PendingAnchor<N>>,
    watching: bool,
    dirty: bool,
    applied: bool,
    settle_queued: bool,
}

impl<N: Clone + PartialEq> AnchorCompensator<N> {
    pub fn new() -> Self {
        Self {
            pending: None,
            watching: false,
            dirty: false,
            applied: false,
            settle_queued: false,
        }
    }

    pub fn pending(&self) -> Option<&PendingAnchor<N>> {
        self.pending.as_ref()
    }

    /// Whether the adapter should forward subtree mutations.
    pub fn is_watching(&self) -> bool {
        self.watching
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn has_queued_settle(&self) -> bool {
        self.settle_queued
    }

    pub(crate) fn capture<H: ScrollHost<Node = N>>(
        &mut self,
        host: &H,
        target: &N,
    ) -> Result<(), HostError> {
        let node = host.anchor_for(target);
        let offset_before = host.node_offset(&node)?;
        self.pending = Some(PendingAnchor {
            node,
            offset_before,
        });
        self.applied = false;
        self.dirty = false;
        self.watching = true;
        strace!(offset_before, "AnchorCompensator::capture");
        Ok(())
    }

    pub(crate) fn on_mutation(&mut self) {
        if self.watching && !self.applied {
            self.dirty = true;
        }
    }

    pub(crate) fn queue_settle(&mut self) {
        self.settle_queued = true;
    }

    /// Consumes the queued settle. Runs at most once per captured click: the second call for the
    /// same click returns `None` without touching anything.
    pub(crate) fn begin_settle(&mut self) -> Option<PendingAnchor<N>> {
        if !core::mem::take(&mut self.settle_queued) {
            return None;
        }
        if self.applied {
            return None;
        }
        self.applied = true;
        self.watching = false;
        let anchor = self.pending.take();
        if !core::mem::take(&mut self.dirty) {
            return None;
        }
        anchor
    }

    /// Drops every in-flight part of the click: anchor, watch, dirty flag, queued settle.
    pub(crate) fn reset(&mut self) {
        self.pending = None;
        self.watching = false;
        self.dirty = false;
        self.settle_queued = false;
    }
}

impl<N: Clone + PartialEq> Default for AnchorCompensator<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Scroll offset that puts an anchor back at its captured viewport position.
///
/// `delta` is how far the anchor moved (`after - before`); moving the scroll offset by the same
/// amount cancels it. Negative results mean the container lacks room above the content.
pub fn compensated_offset(current: u64, delta: i64) -> i64 {
    (current as i64).saturating_add(delta)
}
