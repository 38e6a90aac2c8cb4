//! A headless, scroll-driven element visibility tracker.
//!
//! For browser bindings (DOM geometry, `requestAnimationFrame`, scroll/resize listeners), see the
//! `hunt-web` crate.
//!
//! Register elements with [`VisibilityTracker::track`] and get an enter callback when an element
//! scrolls into the viewport and a leave callback when it scrolls out again. One-shot elements
//! are dropped after their first full cycle; persistent ones toggle for as long as the tracker
//! lives.
//!
//! It is UI-agnostic. A host layer is expected to provide:
//! - per-element layout geometry ([`LayoutNode`])
//! - viewport height and scroll offset ([`Viewport`])
//! - a "next frame" hook ([`FrameScheduler`]), and a call to [`VisibilityTracker::evaluate`] when
//!   that frame arrives
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod element;
mod error;
pub mod geometry;
mod host;
mod options;
mod tracker;
mod types;

#[cfg(test)]
mod tests;

pub use element::TrackedElement;
pub use error::TrackError;
pub use geometry::{ElementMetrics, LayoutNode};
pub use host::{FrameScheduler, Viewport};
pub use options::{
    Callback, DEFAULT_OFFSET, DEFAULT_PERSIST, ResolvedConfig, TrackOptions, apply_defaults,
};
pub use tracker::VisibilityTracker;
pub use types::{Metrics, Targets, Visibility};
