//! Multi-tab host core.
//!
//! Pages, widgets, geometry, navigation and key bindings, tied together by
//! the [`Compositor`]. Everything here is synchronous and single-threaded;
//! the async loop that feeds it lives in [`crate::tui`].

pub mod command;
pub mod compositor;
pub mod event;
pub mod geometry;
pub mod keymap;
pub mod navigation;
pub mod page;
pub mod pages;
pub mod theme;
pub mod widgets;

pub use command::Command;
pub use compositor::Compositor;
pub use event::Event;
pub use geometry::Geometry;
pub use keymap::{KeyAction, KeyBindings, KeyChord, NavigationKeyPolicy};
pub use navigation::{Direction, Navigator};
pub use page::{Context, Page};
pub use pages::{PageEntry, PageRegistry};
pub use widgets::WidgetRegistry;
