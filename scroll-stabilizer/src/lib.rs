//! A headless scroll stabilizer that keeps clicked controls from drifting.
//!
//! When an action inside a scroll container grows or shrinks sibling content, the control the
//! user acted on (or the viewport itself) must not jump. This crate solves that with a spacer at
//! one edge of the container whose size is strictly binary (collapsed or
//! [`EXPANDED_SLACK_PX`]), a height pin during scroll bursts, a short click-hold window, and, for
//! start-edge containers, a one-shot anchor correction after clicks.
//!
//! For document-level glue (attach, tab force-off, styling), see the `scroll-stabilizer-adapter`
//! crate.
//!
//! It is UI-agnostic. A UI layer is expected to provide:
//! - geometry and style writes through [`ScrollHost`]
//! - input events (pointer, click, scroll, wheel, touch, keys, mutations)
//! - `tick(now_ms)` calls at [`Stabilizer::next_deadline`]
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod anchor;
mod error;
mod hold;
mod host;
mod lock;
mod offscreen;
mod options;
mod spacer;
mod stabilizer;
mod state;
mod types;


pub use anchor::{AnchorCompensator, PendingAnchor, compensated_offset};
pub use error::HostError;
pub use hold::ClickHoldWindow;
pub use host::ScrollHost;
pub use lock::ScrollLockGate;
pub use offscreen::OffscreenCollapseWatcher;
pub use options::StabilizerOptions;
pub use spacer::SlackSpacer;
pub use stabilizer::Stabilizer;
pub use state::StabilizerSnapshot;
pub use types::{
    EXPANDED_SLACK_PX, Edge, InputVerdict, NavKey, ScrollDirection, SlackSize, Span, TargetRole,
};
