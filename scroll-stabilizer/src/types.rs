/// The only non-zero spacer size. Together with `0` it forms the complete set of sizes a spacer
/// can ever take.
pub const EXPANDED_SLACK_PX: u32 = 4000;

/// Which edge of the scroll container hosts the spacer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Edge {
    /// Spacer is the first child (top-anchored). Guards scrolling backward and compensates the
    /// clicked element's position.
    Start,
    /// Spacer is the last child (bottom-anchored). Guards scrolling forward.
    End,
}

impl Edge {
    /// The direction in which scrolling would reveal the spacer.
    pub fn danger_direction(self) -> ScrollDirection {
        match self {
            Self::Start => ScrollDirection::Backward,
            Self::End => ScrollDirection::Forward,
        }
    }

    pub fn is_toward_danger(self, direction: ScrollDirection) -> bool {
        direction == self.danger_direction()
    }

    /// Classifies a signed content delta (positive = forward, like a wheel `deltaY`).
    pub fn is_toward_danger_delta(self, delta: i64) -> bool {
        ScrollDirection::from_delta(delta).is_some_and(|d| self.is_toward_danger(d))
    }

    /// Whether this edge runs anchor compensation after clicks.
    pub fn compensates_anchor(self) -> bool {
        matches!(self, Self::Start)
    }

    /// The spacer intersects the container's visible box.
    ///
    /// Both spans are half-open; a zero-height spacer is never on screen, and a spacer whose edge
    /// exactly touches the container's edge is not on screen either.
    pub fn is_on_screen(self, spacer: Span, container: Span) -> bool {
        !spacer.is_empty() && spacer.start < container.end && spacer.end > container.start
    }

    /// The spacer has fully passed the container's edge on the side it lives on.
    ///
    /// Touching counts as passed, so this is the exact complement of "partially visible" for a
    /// spacer sitting beyond the guarded edge.
    pub fn is_offscreen_away(self, spacer: Span, container: Span) -> bool {
        match self {
            Self::Start => spacer.end <= container.start,
            Self::End => spacer.start >= container.end,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollDirection {
    Forward,
    Backward,
}

impl ScrollDirection {
    pub fn from_delta(delta: i64) -> Option<Self> {
        match delta {
            0 => None,
            d if d > 0 => Some(Self::Forward),
            _ => Some(Self::Backward),
        }
    }

    pub fn between(from: u64, to: u64) -> Option<Self> {
        match to.cmp(&from) {
            core::cmp::Ordering::Greater => Some(Self::Forward),
            core::cmp::Ordering::Less => Some(Self::Backward),
            core::cmp::Ordering::Equal => None,
        }
    }
}

/// The two sanctioned spacer sizes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SlackSize {
    #[default]
    Collapsed,
    Expanded,
}

impl SlackSize {
    pub fn px(self) -> u32 {
        match self {
            Self::Collapsed => 0,
            Self::Expanded => EXPANDED_SLACK_PX,
        }
    }

    /// Maps a pixel value back to a size; anything but `0` or [`EXPANDED_SLACK_PX`] is rejected.
    pub fn from_px(px: u32) -> Option<Self> {
        match px {
            0 => Some(Self::Collapsed),
            EXPANDED_SLACK_PX => Some(Self::Expanded),
            _ => None,
        }
    }

    pub fn is_expanded(self) -> bool {
        self == Self::Expanded
    }
}

/// A half-open interval on the scroll axis, in viewport coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    pub start: i64,
    pub end: i64, // exclusive
}

impl Span {
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    pub fn from_len(start: i64, len: u64) -> Self {
        Self {
            start,
            end: start.saturating_add(len as i64),
        }
    }

    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start).max(0) as u64
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// What the adapter should do with the native input event it just forwarded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputVerdict {
    /// Let the platform scroll.
    Allow,
    /// Cancel the event (`preventDefault` + `stopPropagation` on the web).
    Block,
}

impl InputVerdict {
    pub fn is_blocked(self) -> bool {
        self == Self::Block
    }
}

/// Keys that scroll a focused container.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavKey {
    ArrowUp,
    ArrowDown,
    PageUp,
    PageDown,
    Home,
    End,
    Space,
}

impl NavKey {
    /// Parses a DOM `KeyboardEvent.key` (or `.code`) value.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(Self::ArrowUp),
            "ArrowDown" => Some(Self::ArrowDown),
            "PageUp" => Some(Self::PageUp),
            "PageDown" => Some(Self::PageDown),
            "Home" => Some(Self::Home),
            "End" => Some(Self::End),
            " " | "Space" | "Spacebar" => Some(Self::Space),
            _ => None,
        }
    }

    pub fn direction(self) -> ScrollDirection {
        match self {
            Self::ArrowUp | Self::PageUp | Self::Home => ScrollDirection::Backward,
            Self::ArrowDown | Self::PageDown | Self::End | Self::Space => ScrollDirection::Forward,
        }
    }
}

/// How a pointer target relates to a stabilized container.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetRole {
    /// Not inside the container.
    Outside,
    /// The spacer itself (or something inside it).
    Spacer,
    /// A tab control; tab switches are handled by force-off, not by the hold window.
    TabControl,
    /// Inside a section that opted out of slack.
    OptedOut,
    /// Regular content.
    Content,
}
