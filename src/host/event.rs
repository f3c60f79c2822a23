//! Events routed by the compositor.
//!
//! Terminal input (`Key`, `Mouse`, `Resize`) and the periodic `Tick` come
//! from the host loop. The remaining variants are requests: pages emit them
//! through [`Command::Emit`](super::Command::Emit) and external producers
//! send them through a host handle. Requests are applied by the compositor
//! and never reach a page.

use std::any::Any;
use std::fmt;

use ratatui::crossterm::event::{KeyEvent, MouseEvent};

use super::page::Page;

pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// A mouse event occurred.
    Mouse(MouseEvent),
    /// Terminal was resized to (width, height).
    Resize(u16, u16),
    /// Periodic tick, delivered to every page.
    Tick,
    /// Add or update a status bar widget.
    SetWidget { name: String, value: String },
    /// Remove a status bar widget.
    RemoveWidget { name: String },
    /// Make the page with this id active.
    SwitchTo(String),
    /// Move to the next page (wrapping).
    NextPage,
    /// Move to the previous page (wrapping).
    PreviousPage,
    /// Register a new page.
    AddPage {
        id: String,
        title: String,
        model: Box<dyn Page>,
    },
    /// Remove the page with this id.
    RemovePage(String),
    /// Application-defined payload, forwarded to the active page.
    Custom(Box<dyn Any + Send>),
}

impl Event {
    pub fn set_widget(name: impl Into<String>, value: impl Into<String>) -> Self {
        Event::SetWidget {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn add_page(id: impl Into<String>, title: impl Into<String>, model: impl Page + 'static) -> Self {
        Event::AddPage {
            id: id.into(),
            title: title.into(),
            model: Box::new(model),
        }
    }

    pub fn custom<T: Any + Send>(payload: T) -> Self {
        Event::Custom(Box::new(payload))
    }

    /// Borrow a `Custom` payload as `T`, if this is one.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Event::Custom(payload) => payload.downcast_ref::<T>(),
            _ => None,
        }
    }

    /// Whether the compositor handles this event itself instead of routing
    /// it to a page.
    pub fn is_request(&self) -> bool {
        matches!(
            self,
            Event::SetWidget { .. }
                | Event::RemoveWidget { .. }
                | Event::SwitchTo(_)
                | Event::NextPage
                | Event::PreviousPage
                | Event::AddPage { .. }
                | Event::RemovePage(_)
        )
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Key(key) => f.debug_tuple("Key").field(key).finish(),
            Event::Mouse(mouse) => f.debug_tuple("Mouse").field(mouse).finish(),
            Event::Resize(w, h) => f.debug_tuple("Resize").field(w).field(h).finish(),
            Event::Tick => write!(f, "Tick"),
            Event::SetWidget { name, value } => f
                .debug_struct("SetWidget")
                .field("name", name)
                .field("value", value)
                .finish(),
            Event::RemoveWidget { name } => {
                f.debug_struct("RemoveWidget").field("name", name).finish()
            }
            Event::SwitchTo(id) => f.debug_tuple("SwitchTo").field(id).finish(),
            Event::NextPage => write!(f, "NextPage"),
            Event::PreviousPage => write!(f, "PreviousPage"),
            Event::AddPage { id, title, .. } => f
                .debug_struct("AddPage")
                .field("id", id)
                .field("title", title)
                .finish_non_exhaustive(),
            Event::RemovePage(id) => f.debug_tuple("RemovePage").field(id).finish(),
            Event::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}
