//! Multi-tab terminal application host.
//!
//! [`host`] holds the synchronous core: a page registry with cyclic
//! navigation, a widget registry for the status bar, geometry tracking and
//! the [`Compositor`](host::Compositor) that routes events and composes the
//! screen. [`tui`] drives a compositor from a real terminal.

pub mod config;
pub mod demo;
pub mod error;
pub mod host;
pub mod tui;

pub use error::HostError;
pub use host::{Command, Compositor, Context, Event, Page};
