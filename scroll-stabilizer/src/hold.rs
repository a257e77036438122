use crate::{HostError, ScrollHost};

/// A short window after a pointer interaction during which automatic collapse and locking are
/// refused, so the DOM churn caused by the click settles first.
#[derive(Clone, Copy, Debug)]
pub struct ClickHoldWindow {
    hold_ms: u64,
    until_ms: u64,
}

impl ClickHoldWindow {
    pub fn new(hold_ms: u64) -> Self {
        Self { hold_ms, until_ms: 0 }
    }

    pub fn arm(&mut self, now_ms: u64) {
        self.until_ms = now_ms.saturating_add(self.hold_ms);
    }

    pub fn clear(&mut self) {
        self.until_ms = 0;
    }

    pub fn is_active(&self, now_ms: u64) -> bool {
        now_ms < self.until_ms
    }

    pub fn until_ms(&self) -> u64 {
        self.until_ms
    }

    /// Whether the content (excluding the spacer) overflows the visible height.
    ///
    /// Slack is only worth expanding when it does; otherwise there is nothing to scroll and the
    /// spacer would only add empty room.
    pub fn slack_needed<H: ScrollHost>(host: &H, slack_px: u32) -> Result<bool, HostError> {
        let visible = host.viewport_size()? as u64;
        let content = host.content_size()?.saturating_sub(slack_px as u64);
        Ok(content > visible)
    }
}
