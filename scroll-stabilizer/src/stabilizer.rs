use core::fmt;

use crate::anchor::compensated_offset;
use crate::spacer::SlackChange;
use crate::{
    AnchorCompensator, ClickHoldWindow, Edge, HostError, InputVerdict, NavKey,
    OffscreenCollapseWatcher, ScrollDirection, ScrollHost, ScrollLockGate, SlackSize, SlackSpacer,
    StabilizerOptions, StabilizerSnapshot, TargetRole,
};

/// A headless scroll stabilizer for one container.
///
/// This type is UI-agnostic: it holds no UI objects beyond the [`ScrollHost`] it drives, and the
/// adapter feeds it events plus `tick(now_ms)` for timers.
///
/// Event entry points never fail. Host errors are logged and the step becomes a no-op; since every
/// decision is recomputed from live geometry, the next event heals a missed update.
///
/// Ordering contract for clicks on a start-edge stabilizer: deliver `on_pointer_down`, let the
/// application mutate the DOM (forwarding `on_mutation`), deliver `on_click`, then call
/// `run_microtasks` before returning to the event loop.
pub struct Stabilizer<H: ScrollHost> {
    host: H,
    edge: Edge,
    options: StabilizerOptions,
    spacer: SlackSpacer,
    gate: ScrollLockGate,
    watcher: OffscreenCollapseWatcher,
    hold: ClickHoldWindow,
    anchor: Option<AnchorCompensator<H::Node>>,
    last_scroll_offset: u64,
    /// Offset written by the last programmatic scroll; the matching scroll event is swallowed.
    echo: Option<u64>,
    last_touch_y: Option<i64>,
}

impl<H: ScrollHost> Stabilizer<H> {
    pub fn new(mut host: H, edge: Edge, options: StabilizerOptions) -> Self {
        let mut spacer = SlackSpacer::new(edge, options.scrollbar_fade_ms);
        if let Err(err) = spacer.write_baseline(&mut host) {
            swarn!(error = %err, "Stabilizer::new: baseline slack write failed");
        }
        let last_scroll_offset = host.scroll_offset().unwrap_or(0);
        sdebug!(?edge, ?options, "Stabilizer::new");
        Self {
            host,
            edge,
            spacer,
            gate: ScrollLockGate::new(options.stop_delay_ms),
            watcher: OffscreenCollapseWatcher::new(edge),
            hold: ClickHoldWindow::new(options.click_hold_ms),
            anchor: edge.compensates_anchor().then(AnchorCompensator::new),
            last_scroll_offset,
            echo: None,
            last_touch_y: None,
            options,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn edge(&self) -> Edge {
        self.edge
    }

    pub fn options(&self) -> &StabilizerOptions {
        &self.options
    }

    pub fn slack(&self) -> SlackSize {
        self.spacer.size()
    }

    pub fn is_locked(&self) -> bool {
        self.gate.is_locked()
    }

    pub fn is_holding(&self, now_ms: u64) -> bool {
        self.hold.is_active(now_ms)
    }

    pub fn last_scroll_offset(&self) -> u64 {
        self.last_scroll_offset
    }

    pub fn anchor(&self) -> Option<&AnchorCompensator<H::Node>> {
        self.anchor.as_ref()
    }

    /// Whether subtree mutations should be forwarded via [`Stabilizer::on_mutation`].
    pub fn observes_mutations(&self) -> bool {
        self.anchor.as_ref().is_some_and(|a| a.is_watching())
    }

    pub fn has_pending_microtask(&self) -> bool {
        self.anchor.as_ref().is_some_and(|a| a.has_queued_settle())
    }

    /// The earliest timer deadline, so the adapter knows when to call [`Stabilizer::tick`].
    pub fn next_deadline(&self) -> Option<u64> {
        match (self.gate.unlock_deadline(), self.spacer.fade_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn snapshot(&self) -> StabilizerSnapshot {
        StabilizerSnapshot {
            edge: self.edge,
            slack: self.spacer.size(),
            locked_max_height_px: self.gate.locked_px(),
            click_hold_until_ms: self.hold.until_ms(),
            last_scroll_offset: self.last_scroll_offset,
            pending_offscreen_collapse: self.watcher.is_pending(),
            has_pending_anchor: self.anchor.as_ref().is_some_and(|a| a.pending().is_some()),
            anchor_dirty: self.anchor.as_ref().is_some_and(|a| a.is_dirty()),
        }
    }

    /// Pixel-level size request. Only `0` and [`crate::EXPANDED_SLACK_PX`] are honored.
    ///
    /// An expand request is a no-op while the content fits in the container.
    pub fn request_slack_px(&mut self, px: u32, now_ms: u64) -> bool {
        if SlackSize::from_px(px) == Some(SlackSize::Expanded) {
            match ClickHoldWindow::slack_needed(&self.host, self.spacer.px()) {
                Ok(true) => {}
                Ok(false) => return false,
                Err(err) => {
                    swarn!(error = %err, "request_slack_px: geometry unavailable");
                    return false;
                }
            }
        }
        let res = self.spacer.set_px(&mut self.host, px, Some(now_ms));
        self.finish_slack_change(res)
    }

    // --- pointer -------------------------------------------------------------------------------

    pub fn on_pointer_down(&mut self, target: &H::Node, now_ms: u64) {
        self.hold_click(target, now_ms);

        let Some(anchor) = self.anchor.as_mut() else {
            return;
        };
        match self.host.target_role(target) {
            TargetRole::TabControl | TargetRole::Outside | TargetRole::Spacer => return,
            TargetRole::Content | TargetRole::OptedOut => {}
        }
        match anchor.capture(&self.host, target) {
            Ok(()) => self.hold.arm(now_ms),
            Err(err) => {
                swarn!(error = %err, "anchor capture failed");
            }
        }
    }

    pub fn on_click(&mut self, target: &H::Node, now_ms: u64) {
        self.hold_click(target, now_ms);
        if let Some(anchor) = self.anchor.as_mut() {
            anchor.queue_settle();
        }
    }

    /// Runs the queued settle step, if any. Must be called right after the click dispatch
    /// returns; deferring it to a timer makes the correction visible as a separate jump.
    pub fn run_microtasks(&mut self, now_ms: u64) {
        let Some(anchor) = self.anchor.as_mut() else {
            return;
        };
        let Some(pending) = anchor.begin_settle() else {
            return;
        };
        if !self.host.is_connected(&pending.node) {
            strace!("anchor detached; skipping compensation");
            return;
        }
        if let Err(err) = self.compensate(pending.offset_before, &pending.node, now_ms) {
            swarn!(error = %err, "anchor compensation failed");
        }
    }

    /// Forwards a subtree mutation notification. Only flags state; never measures.
    pub fn on_mutation(&mut self) {
        if let Some(anchor) = self.anchor.as_mut() {
            anchor.on_mutation();
        }
    }

    fn compensate(
        &mut self,
        offset_before: i64,
        node: &H::Node,
        now_ms: u64,
    ) -> Result<(), HostError> {
        let after = self.host.node_offset(node)?;
        let delta = after.saturating_sub(offset_before);
        if delta == 0 {
            return Ok(());
        }

        let mut desired = compensated_offset(self.host.scroll_offset()?, delta);
        if desired < 0 && !self.spacer.is_expanded() {
            // Not enough room above the content: grow the spacer first. The start-edge strategy
            // shifts the offset along with it, so re-read before applying the delta.
            let res = self
                .spacer
                .set(&mut self.host, SlackSize::Expanded, Some(now_ms));
            self.finish_slack_change(res);
            desired = compensated_offset(self.host.scroll_offset()?, delta);
        }
        let before = self.host.scroll_offset()?;
        let applied = self.host.set_scroll_offset(desired.max(0) as u64)?;
        if applied == before {
            self.resync_scroll_offset();
        } else {
            self.note_programmatic_scroll(applied);
        }
        sdebug!(delta, applied, "anchor compensated");
        Ok(())
    }

    /// Click-hold handling shared by pointerdown and click.
    fn hold_click(&mut self, target: &H::Node, now_ms: u64) {
        match self.host.target_role(target) {
            TargetRole::TabControl | TargetRole::Outside | TargetRole::Spacer => return,
            TargetRole::OptedOut => {
                self.collapse(now_ms);
                return;
            }
            TargetRole::Content => {}
        }

        let needed = match ClickHoldWindow::slack_needed(&self.host, self.spacer.px()) {
            Ok(needed) => needed,
            Err(err) => {
                swarn!(error = %err, "hold_click: geometry unavailable");
                return;
            }
        };
        if !needed {
            // Content fits: never expand. Collapse only when that cannot be seen.
            if self.watcher.is_on_screen(&self.host).unwrap_or(true) {
                return;
            }
            self.watcher.set_pending(false);
            self.collapse(now_ms);
            return;
        }

        self.hold.arm(now_ms);
        let res = self
            .spacer
            .set(&mut self.host, SlackSize::Expanded, Some(now_ms));
        self.finish_slack_change(res);
    }

    // --- scroll input --------------------------------------------------------------------------

    /// Handles a native scroll notification; the offset is read from the host.
    pub fn on_scroll(&mut self, now_ms: u64) {
        let offset = match self.host.scroll_offset() {
            Ok(offset) => offset,
            Err(err) => {
                swarn!(error = %err, "on_scroll: offset unavailable");
                return;
            }
        };
        if self.echo.take() == Some(offset) {
            return;
        }

        let direction = ScrollDirection::between(self.last_scroll_offset, offset);
        let toward_danger = direction.is_some_and(|d| self.edge.is_toward_danger(d));
        if toward_danger {
            if self.is_guarding() {
                return;
            }
            if self.collapse_if_offscreen_away(now_ms) {
                // The collapse already resynced the offset.
                self.start_scroll_burst(now_ms);
                return;
            }
        }
        if direction.is_none() {
            return;
        }
        self.last_scroll_offset = offset;
        self.start_scroll_burst(now_ms);
        self.retry_offscreen_collapse(now_ms);
    }

    /// Handles a wheel/trackpad delta (positive = forward).
    pub fn on_wheel(&mut self, delta: i64, now_ms: u64) -> InputVerdict {
        self.directional_input(delta, now_ms)
    }

    pub fn on_touch_start(&mut self, y: i64, now_ms: u64) {
        self.last_touch_y = Some(y);
        self.start_scroll_burst(now_ms);
    }

    /// Handles a touch move; dragging the finger up scrolls the content forward.
    pub fn on_touch_move(&mut self, y: i64, now_ms: u64) -> InputVerdict {
        let last = self.last_touch_y.replace(y).unwrap_or(y);
        let content_delta = last.saturating_sub(y);
        self.directional_input(content_delta, now_ms)
    }

    pub fn on_key_down(&mut self, key: NavKey, now_ms: u64) -> InputVerdict {
        let delta = match key.direction() {
            ScrollDirection::Forward => 1,
            ScrollDirection::Backward => -1,
        };
        self.directional_input(delta, now_ms)
    }

    fn directional_input(&mut self, delta: i64, now_ms: u64) -> InputVerdict {
        if self.edge.is_toward_danger_delta(delta) {
            self.collapse_if_offscreen_away(now_ms);
            if self.is_guarding() {
                strace!(delta, "blocked input toward visible spacer");
                return InputVerdict::Block;
            }
        }
        self.start_scroll_burst(now_ms);
        InputVerdict::Allow
    }

    /// The spacer is expanded and visible, so danger-direction movement must not happen.
    fn is_guarding(&self) -> bool {
        self.spacer.is_expanded() && self.watcher.is_on_screen(&self.host).unwrap_or(false)
    }

    fn start_scroll_burst(&mut self, now_ms: u64) {
        if let Err(err) = self.gate.lock(&mut self.host, &self.hold, now_ms) {
            swarn!(error = %err, "lock failed");
        }
        self.gate.restart_debounce(now_ms);
    }

    // --- timers --------------------------------------------------------------------------------

    /// Fires every timer whose deadline is `<= now_ms`.
    pub fn tick(&mut self, now_ms: u64) {
        if self.gate.tick(&mut self.host, now_ms) {
            self.request_offscreen_collapse(now_ms);
        }
        self.spacer.tick(&mut self.host, now_ms);
    }

    // --- collapse ------------------------------------------------------------------------------

    /// Asks for a collapse that waits until the spacer is out of view.
    pub fn request_offscreen_collapse(&mut self, now_ms: u64) {
        self.watcher.set_pending(true);
        self.retry_offscreen_collapse(now_ms);
    }

    fn retry_offscreen_collapse(&mut self, now_ms: u64) {
        if self.watcher.take_ready(&self.host) {
            self.collapse(now_ms);
        }
    }

    /// Collapses an expanded spacer that has fully left the view on its own side.
    ///
    /// Refused inside the click-hold window. Returns `true` when it collapsed.
    pub fn collapse_if_offscreen_away(&mut self, now_ms: u64) -> bool {
        if !self.spacer.is_expanded() || self.hold.is_active(now_ms) {
            return false;
        }
        match self.watcher.is_offscreen_away(&self.host) {
            Ok(true) => {}
            Ok(false) => return false,
            Err(err) => {
                strace!(error = %err, "offscreen check failed");
                return false;
            }
        }
        self.watcher.set_pending(false);
        self.collapse(now_ms)
    }

    fn collapse(&mut self, now_ms: u64) -> bool {
        let res = self
            .spacer
            .set(&mut self.host, SlackSize::Collapsed, Some(now_ms));
        self.finish_slack_change(res)
    }

    fn finish_slack_change(&mut self, res: Result<SlackChange, HostError>) -> bool {
        match res {
            Ok(change) => {
                if let Some(offset) = change.scroll_written {
                    self.note_programmatic_scroll(offset);
                } else if change.changed {
                    self.resync_scroll_offset();
                }
                change.changed
            }
            Err(err) => {
                swarn!(error = %err, "slack write failed");
                false
            }
        }
    }

    /// Only for writes that moved the offset; an unmoved offset fires no scroll event.
    fn note_programmatic_scroll(&mut self, offset: u64) {
        self.echo = Some(offset);
        self.last_scroll_offset = offset;
    }

    fn resync_scroll_offset(&mut self) {
        if let Ok(offset) = self.host.scroll_offset() {
            self.last_scroll_offset = offset;
        }
    }

    // --- reset ---------------------------------------------------------------------------------

    /// Returns to baseline immediately: hold window expired, timers cancelled, nothing pending,
    /// height unpinned, spacer collapsed.
    pub fn force_off(&mut self) {
        self.hold.clear();
        self.watcher.set_pending(false);
        self.gate.reset(&mut self.host);
        self.spacer.cancel_fade(&mut self.host);
        if let Some(anchor) = self.anchor.as_mut() {
            anchor.reset();
        }
        self.last_touch_y = None;
        self.echo = None;
        let res = self.spacer.set(&mut self.host, SlackSize::Collapsed, None);
        self.finish_slack_change(res);
        self.resync_scroll_offset();
        sdebug!(edge = ?self.edge, "Stabilizer::force_off");
    }
}

impl<H: ScrollHost> fmt::Debug for Stabilizer<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stabilizer")
            .field("edge", &self.edge)
            .field("options", &self.options)
            .field("spacer", &self.spacer)
            .field("gate", &self.gate)
            .field("watcher", &self.watcher)
            .field("hold", &self.hold)
            .field("last_scroll_offset", &self.last_scroll_offset)
            .field("echo", &self.echo)
            .finish_non_exhaustive()
    }
}
