use crate::{ClickHoldWindow, HostError, ScrollHost};

/// Pins the container's rendered height for the duration of a scroll burst.
///
/// A burst is any run of scroll inputs separated by less than `stop_delay_ms`; the pin is
/// released by [`ScrollLockGate::tick`] once input goes quiet.
#[derive(Clone, Debug)]
pub struct ScrollLockGate {
    stop_delay_ms: u64,
    locked_px: Option<u32>,
    unlock_at: Option<u64>,
}

impl ScrollLockGate {
    pub fn new(stop_delay_ms: u64) -> Self {
        Self {
            stop_delay_ms,
            locked_px: None,
            unlock_at: None,
        }
    }

    pub fn is_locked(&self) -> bool {
        self.locked_px.is_some()
    }

    pub fn locked_px(&self) -> Option<u32> {
        self.locked_px
    }

    pub fn unlock_deadline(&self) -> Option<u64> {
        self.unlock_at
    }

    /// Reads the rendered height once and pins it.
    ///
    /// No-op while already locked, inside the click-hold window, or when the container has no
    /// rendered height.
    pub(crate) fn lock<H: ScrollHost>(
        &mut self,
        host: &mut H,
        hold: &ClickHoldWindow,
        now_ms: u64,
    ) -> Result<(), HostError> {
        if self.locked_px.is_some() {
            return Ok(());
        }
        if hold.is_active(now_ms) {
            return Ok(());
        }
        let h = host.viewport_size()?;
        if h == 0 {
            return Ok(());
        }
        host.pin_max_height(Some(h))?;
        self.locked_px = Some(h);
        strace!(px = h, "ScrollLockGate::lock");
        Ok(())
    }

    /// Releases the pin. Returns `true` if the gate was locked, in which case the caller must ask
    /// the offscreen watcher to re-check.
    pub(crate) fn unlock<H: ScrollHost>(&mut self, host: &mut H) -> bool {
        if self.locked_px.is_none() {
            return false;
        }
        if let Err(err) = host.pin_max_height(None) {
            swarn!(error = %err, "ScrollLockGate: failed to release pin");
        }
        self.locked_px = None;
        strace!("ScrollLockGate::unlock");
        true
    }

    /// Restarts the trailing debounce.
    pub(crate) fn restart_debounce(&mut self, now_ms: u64) {
        self.unlock_at = Some(now_ms.saturating_add(self.stop_delay_ms));
    }

    /// Fires the debounce if due. Returns `true` when a pin was actually released.
    pub(crate) fn tick<H: ScrollHost>(&mut self, host: &mut H, now_ms: u64) -> bool {
        match self.unlock_at {
            Some(at) if now_ms >= at => {
                self.unlock_at = None;
                self.unlock(host)
            }
            _ => false,
        }
    }

    /// Cancels the debounce and drops the pin without any follow-up collapse request.
    pub(crate) fn reset<H: ScrollHost>(&mut self, host: &mut H) {
        self.unlock_at = None;
        if self.locked_px.take().is_some() {
            let _ = host.pin_max_height(None);
        }
    }
}
