use crate::{Edge, HostError, ScrollHost};

/// Decides from live geometry when the spacer can shrink without the user seeing it.
#[derive(Clone, Copy, Debug)]
pub struct OffscreenCollapseWatcher {
    edge: Edge,
    pending: bool,
}

impl OffscreenCollapseWatcher {
    pub fn new(edge: Edge) -> Self {
        Self {
            edge,
            pending: false,
        }
    }

    /// A collapse was requested while the spacer was still visible.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub(crate) fn set_pending(&mut self, pending: bool) {
        self.pending = pending;
    }

    pub fn is_on_screen<H: ScrollHost>(&self, host: &H) -> Result<bool, HostError> {
        let spacer = host.spacer_span()?;
        let container = host.container_span()?;
        Ok(self.edge.is_on_screen(spacer, container))
    }

    pub fn is_offscreen_away<H: ScrollHost>(&self, host: &H) -> Result<bool, HostError> {
        let spacer = host.spacer_span()?;
        let container = host.container_span()?;
        Ok(self.edge.is_offscreen_away(spacer, container))
    }

    /// Returns `true` when a pending collapse may run now.
    ///
    /// Geometry failures keep the request pending; the next scroll tick retries.
    pub(crate) fn take_ready<H: ScrollHost>(&mut self, host: &H) -> bool {
        if !self.pending {
            return false;
        }
        match self.is_on_screen(host) {
            Ok(false) => {
                self.pending = false;
                true
            }
            Ok(true) => false,
            Err(err) => {
                strace!(error = %err, "OffscreenCollapseWatcher: retry deferred");
                false
            }
        }
    }
}
