//! Document glue for the `scroll-stabilizer` crate.
//!
//! The `scroll-stabilizer` crate is UI-agnostic and holds the per-container state machine. This
//! crate binds it to a DOM-like [`Document`]:
//!
//! - Attaching to containers, idempotently, with the spacer element and shared style rule
//! - A [`ScrollHost`](scroll_stabilizer::ScrollHost) implementation over the document
//! - Shared [`Controller`] handles for event listeners
//! - Forcing stabilizers off when a tab control in their panel is clicked
//! - [`sim::SimDocument`], an in-memory document for tests and headless runs
//!
//! Event listener wiring stays with the UI layer: it forwards pointer, click, scroll, wheel,
//! touch, key and mutation events to the [`Controller`], and calls `tick` at its deadlines.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod attach;
mod controller;
mod document;
mod error;
mod host;
mod key;
mod options;
mod registry;
pub mod sim;
pub mod style;

#[cfg(test)]
mod tests;

pub use attach::StabilizerSet;
pub use controller::Controller;
pub use document::{Document, Placement};
pub use error::AttachError;
pub use host::DomHost;
pub use key::NodeKey;
pub use options::AttachOptions;
pub use registry::{TabForceOffRegistry, TabListener};
