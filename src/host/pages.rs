//! Ordered page registry.
//!
//! Insertion order is both the tab bar order and the cyclic navigation
//! order. The registry owns each page's current model; the active index is
//! kept in range by the embedded [`Navigator`].

use std::fmt;

use super::navigation::{Direction, Navigator};
use super::page::{Page, Vacant};
use crate::error::HostError;

/// A registered page: identity, tab title and current model.
pub struct PageEntry {
    id: String,
    title: String,
    model: Box<dyn Page>,
}

impl PageEntry {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn model(&self) -> &dyn Page {
        self.model.as_ref()
    }

    pub(crate) fn model_mut(&mut self) -> &mut dyn Page {
        self.model.as_mut()
    }
}

impl fmt::Debug for PageEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageEntry")
            .field("id", &self.id)
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}

/// Pages in insertion order plus the active index.
#[derive(Debug, Default)]
pub struct PageRegistry {
    entries: Vec<PageEntry>,
    nav: Navigator,
}

impl PageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a page. The first page added becomes active.
    pub fn add(
        &mut self,
        id: impl Into<String>,
        title: impl Into<String>,
        model: Box<dyn Page>,
    ) -> Result<(), HostError> {
        let id = id.into();
        if self.position(&id).is_some() {
            return Err(HostError::DuplicateId { id });
        }
        self.entries.push(PageEntry {
            id,
            title: title.into(),
            model,
        });
        self.nav.page_added(self.entries.len());
        Ok(())
    }

    /// Remove a page, returning its entry.
    pub fn remove(&mut self, id: &str) -> Result<PageEntry, HostError> {
        let index = self.position(id).ok_or_else(|| HostError::NotFound { id: id.into() })?;
        let entry = self.entries.remove(index);
        self.nav.page_removed(index, self.entries.len());
        Ok(entry)
    }

    pub fn get(&self, id: &str) -> Option<&PageEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// All pages in tab order.
    pub fn all(&self) -> &[PageEntry] {
        &self.entries
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the active page, `None` when there are no pages.
    pub fn active_index(&self) -> Option<usize> {
        if self.entries.is_empty() {
            None
        } else {
            Some(self.nav.active())
        }
    }

    pub fn active(&self) -> Option<&PageEntry> {
        self.active_index().and_then(|i| self.entries.get(i))
    }

    /// Make `id` active. Succeeds without change if it already is.
    pub fn switch_to(&mut self, id: &str) -> Result<bool, HostError> {
        let index = self.position(id).ok_or_else(|| HostError::NotFound { id: id.into() })?;
        Ok(self.nav.select(index, self.entries.len()))
    }

    pub fn next(&mut self) -> bool {
        self.nav.step(Direction::Next, self.entries.len())
    }

    pub fn previous(&mut self) -> bool {
        self.nav.step(Direction::Previous, self.entries.len())
    }

    pub fn step(&mut self, direction: Direction) -> bool {
        self.nav.step(direction, self.entries.len())
    }

    /// Commit the model produced by handling an event.
    ///
    /// Does nothing if the page has been removed in the meantime.
    pub fn replace_model(&mut self, id: &str, model: Box<dyn Page>) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) {
            entry.model = model;
        }
    }

    /// Move a page's model out for updating, leaving a placeholder behind.
    pub(crate) fn take_model(&mut self, id: &str) -> Option<Box<dyn Page>> {
        let entry = self.entries.iter_mut().find(|e| e.id == id)?;
        Some(std::mem::replace(&mut entry.model, Box::new(Vacant)))
    }

    pub(crate) fn entries_mut(&mut self) -> impl Iterator<Item = &mut PageEntry> {
        self.entries.iter_mut()
    }
}
