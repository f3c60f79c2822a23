//! The page capability set and the read-only context pages receive.

use super::command::Command;
use super::event::Event;
use super::geometry::Geometry;
use super::widgets::WidgetRegistry;

/// A sub-application hosted in one tab.
///
/// Pages have value semantics from the host's point of view: `update`
/// consumes the current model and returns the model that replaces it, which
/// may be a different type entirely. Pages never touch the registries
/// directly; they ask for changes by returning `Command::Emit` with a
/// request event.
pub trait Page: Send {
    /// Called once when the host starts, or when the page is added to a
    /// running host.
    fn init(&mut self, ctx: &Context<'_>) -> Command {
        let _ = ctx;
        Command::None
    }

    /// Handle an event routed to this page.
    fn update(self: Box<Self>, event: &Event, ctx: &Context<'_>) -> (Box<dyn Page>, Command);

    /// Render the page body. Lines beyond `ctx.content_size()` are clipped.
    fn render(&self, ctx: &Context<'_>) -> String;
}

/// Read-only view of host state handed to pages.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    size: Geometry,
    content: Geometry,
    widgets: &'a WidgetRegistry,
}

impl<'a> Context<'a> {
    pub fn new(size: Geometry, content: Geometry, widgets: &'a WidgetRegistry) -> Self {
        Self {
            size,
            content,
            widgets,
        }
    }

    /// Full terminal size.
    pub fn size(&self) -> Geometry {
        self.size
    }

    /// Area available to the page body once the bars are drawn.
    pub fn content_size(&self) -> Geometry {
        self.content
    }

    /// Current value of a status bar widget.
    pub fn widget(&self, name: &str) -> Option<&'a str> {
        self.widgets.get(name)
    }

    pub fn widgets(&self) -> &'a WidgetRegistry {
        self.widgets
    }
}

/// Stand-in held by a registry slot while its model is being updated.
pub(crate) struct Vacant;

impl Page for Vacant {
    fn update(self: Box<Self>, _event: &Event, _ctx: &Context<'_>) -> (Box<dyn Page>, Command) {
        (self, Command::None)
    }

    fn render(&self, _ctx: &Context<'_>) -> String {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_exposes_geometry_and_widgets() {
        let mut widgets = WidgetRegistry::new();
        widgets.add("clock", "10:00");
        let ctx = Context::new(Geometry::new(80, 24), Geometry::new(80, 22), &widgets);

        assert_eq!(ctx.size(), Geometry::new(80, 24));
        assert_eq!(ctx.content_size(), Geometry::new(80, 22));
        assert_eq!(ctx.widget("clock"), Some("10:00"));
        assert_eq!(ctx.widget("battery"), None);
        assert_eq!(ctx.widgets().len(), 1);
    }

    #[test]
    fn vacant_renders_nothing() {
        let widgets = WidgetRegistry::new();
        let ctx = Context::new(Geometry::default(), Geometry::default(), &widgets);
        let page: Box<dyn Page> = Box::new(Vacant);
        assert_eq!(page.render(&ctx), "");
        let (page, cmd) = page.update(&Event::Tick, &ctx);
        assert!(cmd.is_none());
        assert_eq!(page.render(&ctx), "");
    }
}
