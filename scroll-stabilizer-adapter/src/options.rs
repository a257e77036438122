use alloc::string::String;

use scroll_stabilizer::StabilizerOptions;

/// Configuration for [`crate::StabilizerSet::attach`].
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`; missing fields fall
/// back to the defaults.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AttachOptions {
    pub stabilizer: StabilizerOptions,
    /// Matches tab controls. Clicks on them never arm the hold window, and inside a panel they
    /// force every stabilizer registered for that panel back to baseline.
    pub tab_selector: String,
    /// Matches the host panels that own tab strips.
    pub panel_selector: String,
    /// Registers the container with the [`crate::TabForceOffRegistry`] on attach.
    pub enable_force_off_on_tabs: bool,
}

impl AttachOptions {
    pub fn new() -> Self {
        Self {
            stabilizer: StabilizerOptions::new(),
            tab_selector: String::from("[role=\"tab\"]"),
            panel_selector: String::from(".admin-panel, .member-panel"),
            enable_force_off_on_tabs: true,
        }
    }

    pub fn with_stabilizer(mut self, stabilizer: StabilizerOptions) -> Self {
        self.stabilizer = stabilizer;
        self
    }

    pub fn with_stop_delay_ms(mut self, stop_delay_ms: u64) -> Self {
        self.stabilizer.stop_delay_ms = stop_delay_ms;
        self
    }

    pub fn with_click_hold_ms(mut self, click_hold_ms: u64) -> Self {
        self.stabilizer.click_hold_ms = click_hold_ms;
        self
    }

    pub fn with_scrollbar_fade_ms(mut self, scrollbar_fade_ms: u64) -> Self {
        self.stabilizer.scrollbar_fade_ms = scrollbar_fade_ms;
        self
    }

    pub fn with_tab_selector(mut self, tab_selector: impl Into<String>) -> Self {
        self.tab_selector = tab_selector.into();
        self
    }

    pub fn with_panel_selector(mut self, panel_selector: impl Into<String>) -> Self {
        self.panel_selector = panel_selector.into();
        self
    }

    pub fn with_force_off_on_tabs(mut self, enabled: bool) -> Self {
        self.enable_force_off_on_tabs = enabled;
        self
    }
}

impl Default for AttachOptions {
    fn default() -> Self {
        Self::new()
    }
}
