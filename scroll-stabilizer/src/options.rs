/// Timing configuration for [`crate::Stabilizer`].
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`; missing fields fall
/// back to the defaults.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StabilizerOptions {
    /// Quiet period after the last scroll input before the height pin is released.
    pub stop_delay_ms: u64,
    /// How long after a pointer interaction automatic collapse and locking are refused.
    pub click_hold_ms: u64,
    /// Duration of the scrollbar fade pulse that follows every slack size change.
    pub scrollbar_fade_ms: u64,
}

impl StabilizerOptions {
    pub fn new() -> Self {
        Self {
            stop_delay_ms: 180,
            click_hold_ms: 250,
            scrollbar_fade_ms: 160,
        }
    }

    pub fn with_stop_delay_ms(mut self, stop_delay_ms: u64) -> Self {
        self.stop_delay_ms = stop_delay_ms;
        self
    }

    pub fn with_click_hold_ms(mut self, click_hold_ms: u64) -> Self {
        self.click_hold_ms = click_hold_ms;
        self
    }

    pub fn with_scrollbar_fade_ms(mut self, scrollbar_fade_ms: u64) -> Self {
        self.scrollbar_fade_ms = scrollbar_fade_ms;
        self
    }
}

impl Default for StabilizerOptions {
    fn default() -> Self {
        Self::new()
    }
}
