use crate::{Edge, SlackSize};

/// A lightweight, serializable snapshot of one stabilizer's state.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StabilizerSnapshot {
    pub edge: Edge,
    pub slack: SlackSize,
    /// Present only while a scroll burst pins the container height.
    pub locked_max_height_px: Option<u32>,
    pub click_hold_until_ms: u64,
    pub last_scroll_offset: u64,
    pub pending_offscreen_collapse: bool,
    pub has_pending_anchor: bool,
    pub anchor_dirty: bool,
}

impl StabilizerSnapshot {
    /// Collapsed, unlocked, no hold window, nothing pending.
    pub fn is_baseline(&self) -> bool {
        self.slack == SlackSize::Collapsed
            && self.locked_max_height_px.is_none()
            && self.click_hold_until_ms == 0
            && !self.pending_offscreen_collapse
            && !self.has_pending_anchor
    }
}
