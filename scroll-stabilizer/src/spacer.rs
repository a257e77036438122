use crate::{Edge, HostError, ScrollHost, SlackSize};

/// Result of a spacer size write.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct SlackChange {
    pub changed: bool,
    /// Set when the edge strategy also moved the scroll offset (start edge).
    pub scroll_written: Option<u64>,
}

/// The binary-size spacer at one edge of the container.
#[derive(Clone, Debug)]
pub struct SlackSpacer {
    edge: Edge,
    size: SlackSize,
    fade_ms: u64,
    fade_off_at: Option<u64>,
}

impl SlackSpacer {
    pub fn new(edge: Edge, fade_ms: u64) -> Self {
        Self {
            edge,
            size: SlackSize::Collapsed,
            fade_ms,
            fade_off_at: None,
        }
    }

    pub fn size(&self) -> SlackSize {
        self.size
    }

    pub fn px(&self) -> u32 {
        self.size.px()
    }

    pub fn is_expanded(&self) -> bool {
        self.size.is_expanded()
    }

    /// Pending fade-off deadline, if a pulse is in flight.
    pub fn fade_deadline(&self) -> Option<u64> {
        self.fade_off_at
    }

    /// Writes the collapsed size without any pulse or offset compensation.
    ///
    /// Used once at attach time so the host starts from a known baseline.
    pub(crate) fn write_baseline<H: ScrollHost>(&mut self, host: &mut H) -> Result<(), HostError> {
        self.size = SlackSize::Collapsed;
        host.write_slack(0)
    }

    /// Accepts only the two sanctioned pixel values; anything else is ignored.
    pub(crate) fn set_px<H: ScrollHost>(
        &mut self,
        host: &mut H,
        px: u32,
        pulse_at: Option<u64>,
    ) -> Result<SlackChange, HostError> {
        let Some(size) = SlackSize::from_px(px) else {
            swarn!(px, "SlackSpacer: rejected intermediate size");
            return Ok(SlackChange::default());
        };
        self.set(host, size, pulse_at)
    }

    /// Applies `size` through the edge strategy.
    ///
    /// With `pulse_at = Some(now_ms)` the scrollbar fade pulse is (re)started.
    pub(crate) fn set<H: ScrollHost>(
        &mut self,
        host: &mut H,
        size: SlackSize,
        pulse_at: Option<u64>,
    ) -> Result<SlackChange, HostError> {
        if self.size == size {
            return Ok(SlackChange::default());
        }
        let old = self.size.px();
        let scroll_written = apply_size_delta(self.edge, host, old, size.px())?;
        self.size = size;
        strace!(edge = ?self.edge, px = size.px(), "SlackSpacer::set");

        if let Some(now_ms) = pulse_at {
            self.pulse(host, now_ms);
        }
        Ok(SlackChange {
            changed: true,
            scroll_written,
        })
    }

    fn pulse<H: ScrollHost>(&mut self, host: &mut H, now_ms: u64) {
        if let Err(err) = host.set_scrollbar_fade(true) {
            swarn!(error = %err, "SlackSpacer: fade pulse failed");
            return;
        }
        self.fade_off_at = Some(now_ms.saturating_add(self.fade_ms));
    }

    /// Ends the fade pulse once its deadline has passed. Returns `true` when it fired.
    pub(crate) fn tick<H: ScrollHost>(&mut self, host: &mut H, now_ms: u64) -> bool {
        match self.fade_off_at {
            Some(at) if now_ms >= at => {
                self.fade_off_at = None;
                if let Err(err) = host.set_scrollbar_fade(false) {
                    swarn!(error = %err, "SlackSpacer: fade removal failed");
                }
                true
            }
            _ => false,
        }
    }

    /// Drops any pending pulse and clears the fade flag immediately.
    pub(crate) fn cancel_fade<H: ScrollHost>(&mut self, host: &mut H) {
        if self.fade_off_at.take().is_some() {
            let _ = host.set_scrollbar_fade(false);
        }
    }
}

/// Writes the size variable; a start-edge spacer also shifts the scroll offset by the size delta
/// so that the content below it stays put.
fn apply_size_delta<H: ScrollHost>(
    edge: Edge,
    host: &mut H,
    old_px: u32,
    new_px: u32,
) -> Result<Option<u64>, HostError> {
    match edge {
        Edge::End => {
            host.write_slack(new_px)?;
            Ok(None)
        }
        Edge::Start => {
            let current = host.scroll_offset()?;
            host.write_slack(new_px)?;
            let target = if new_px > old_px {
                current.saturating_add((new_px - old_px) as u64)
            } else {
                current.saturating_sub((old_px - new_px) as u64)
            };
            let applied = host.set_scroll_offset(target)?;
            Ok((applied != current).then_some(applied))
        }
    }
}
