//! Event routing and screen composition.
//!
//! The compositor owns every registry. On each event it either applies a
//! host-level change (resize, navigation, requests) or forwards the event
//! to the active page and commits the model the page hands back. Rendering
//! stacks the tab bar, the active page body and the widget bar.

use ratatui::Frame;
use ratatui::crossterm::event::KeyEvent;
use ratatui::layout::{Constraint, Layout};
use ratatui::text::Line;
use ratatui::widgets::{Paragraph, Tabs};
use unicode_width::UnicodeWidthChar;

use super::command::Command;
use super::event::Event;
use super::geometry::Geometry;
use super::keymap::{KeyAction, KeyBindings, NavigationKeyPolicy};
use super::navigation::Direction;
use super::page::{Context, Page};
use super::pages::PageRegistry;
use super::theme;
use super::widgets::WidgetRegistry;
use crate::error::HostError;

/// Rows taken by the tab bar.
pub const TAB_BAR_ROWS: u16 = 1;
/// Rows taken by the widget bar.
pub const WIDGET_BAR_ROWS: u16 = 1;

/// Top-level host state: pages, widgets, geometry and key bindings.
#[derive(Debug, Default)]
pub struct Compositor {
    pages: PageRegistry,
    widgets: WidgetRegistry,
    geometry: Geometry,
    keys: KeyBindings,
    broadcast_ticks: bool,
    started: bool,
}

impl Compositor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key_bindings(keys: KeyBindings) -> Self {
        Self {
            keys,
            ..Self::default()
        }
    }

    pub fn pages(&self) -> &PageRegistry {
        &self.pages
    }

    pub fn widgets(&self) -> &WidgetRegistry {
        &self.widgets
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn key_bindings(&self) -> &KeyBindings {
        &self.keys
    }

    pub fn key_bindings_mut(&mut self) -> &mut KeyBindings {
        &mut self.keys
    }

    /// Id of the active page.
    pub fn active_id(&self) -> Option<&str> {
        self.pages.active().map(|p| p.id())
    }

    /// Register a page.
    ///
    /// Before `init` has run the returned command is always `None`; after
    /// that the new page is initialized immediately and its startup command
    /// is returned.
    pub fn add_page(
        &mut self,
        id: impl Into<String>,
        title: impl Into<String>,
        model: Box<dyn Page>,
    ) -> Result<Command, HostError> {
        let id = id.into();
        self.pages.add(id.clone(), title, model)?;
        tracing::debug!(page = %id, count = self.pages.len(), "Page added");
        if !self.started {
            return Ok(Command::None);
        }
        let ctx = context(self.geometry, &self.widgets);
        let cmd = self
            .pages
            .entries_mut()
            .find(|e| e.id() == id)
            .map(|e| e.model_mut().init(&ctx))
            .unwrap_or_default();
        Ok(cmd)
    }

    pub fn remove_page(&mut self, id: &str) -> Result<(), HostError> {
        self.pages.remove(id)?;
        tracing::debug!(page = %id, active = ?self.active_id(), "Page removed");
        Ok(())
    }

    pub fn switch_to(&mut self, id: &str) -> Result<(), HostError> {
        if self.pages.switch_to(id)? {
            tracing::debug!(page = %id, "Switched page");
        }
        Ok(())
    }

    pub fn next_page(&mut self) {
        self.navigate(Direction::Next);
    }

    pub fn previous_page(&mut self) {
        self.navigate(Direction::Previous);
    }

    pub fn add_widget(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.widgets.add(name, value);
    }

    pub fn update_widget(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.widgets.update(name, value);
    }

    pub fn remove_widget(&mut self, name: &str) {
        self.widgets.remove(name);
    }

    /// Deliver `Tick` to every page instead of only the active one.
    pub fn set_broadcast_ticks(&mut self, enabled: bool) {
        self.broadcast_ticks = enabled;
    }

    pub fn broadcast_ticks(&self) -> bool {
        self.broadcast_ticks
    }

    /// Initialize every registered page, returning their startup commands.
    ///
    /// Only the first call does anything; pages added later are initialized
    /// by `add_page`.
    pub fn init(&mut self) -> Command {
        if self.started {
            tracing::debug!("Compositor already initialized");
            return Command::None;
        }
        self.started = true;
        let ctx = context(self.geometry, &self.widgets);
        Command::batch(
            self.pages
                .entries_mut()
                .map(|entry| entry.model_mut().init(&ctx))
                .collect::<Vec<_>>(),
        )
    }

    /// Route one event and return the resulting command.
    pub fn update(&mut self, event: Event) -> Command {
        if event.is_request() {
            tracing::debug!(?event, "Applying host request");
        }
        match event {
            Event::Resize(width, height) => {
                self.geometry.resize(width, height);
                tracing::debug!(width, height, "Terminal resized");
                if self.geometry.is_empty() {
                    tracing::debug!("No drawable area until the next resize");
                }
                self.forward(&Event::Resize(width, height))
            }
            Event::Key(key) => self.handle_key(key),
            Event::Tick if self.broadcast_ticks => self.broadcast(&Event::Tick),
            Event::Tick => self.forward(&Event::Tick),
            Event::SetWidget { name, value } => {
                self.widgets.update(name, value);
                Command::None
            }
            Event::RemoveWidget { name } => {
                self.widgets.remove(&name);
                Command::None
            }
            Event::SwitchTo(id) => {
                if let Err(e) = self.switch_to(&id) {
                    tracing::warn!("Ignoring switch request: {}", e);
                }
                Command::None
            }
            Event::NextPage => {
                self.next_page();
                Command::None
            }
            Event::PreviousPage => {
                self.previous_page();
                Command::None
            }
            Event::AddPage { id, title, model } => {
                self.add_page(id, title, model).unwrap_or_else(|e| {
                    tracing::warn!("Ignoring add request: {}", e);
                    Command::None
                })
            }
            Event::RemovePage(id) => {
                if let Err(e) = self.remove_page(&id) {
                    tracing::warn!("Ignoring remove request: {}", e);
                }
                Command::None
            }
            other => self.forward(&other),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Command {
        match self.keys.resolve(&key) {
            Some(KeyAction::Quit) => Command::Quit,
            Some(action) => {
                let direction = match action {
                    KeyAction::PreviousPage => Direction::Previous,
                    _ => Direction::Next,
                };
                self.navigate(direction);
                match self.keys.policy() {
                    NavigationKeyPolicy::Consume => Command::None,
                    NavigationKeyPolicy::Forward => self.forward(&Event::Key(key)),
                }
            }
            None => self.forward(&Event::Key(key)),
        }
    }

    fn navigate(&mut self, direction: Direction) {
        if self.pages.step(direction) {
            tracing::debug!(?direction, active = ?self.active_id(), "Navigated");
        }
    }

    /// Deliver an event to the active page.
    fn forward(&mut self, event: &Event) -> Command {
        match self.active_id().map(str::to_owned) {
            Some(id) => self.dispatch(&id, event),
            None => Command::None,
        }
    }

    /// Deliver an event to every page, in tab order.
    fn broadcast(&mut self, event: &Event) -> Command {
        let ids: Vec<String> = self.pages.all().iter().map(|p| p.id().to_owned()).collect();
        Command::batch(
            ids.iter()
                .map(|id| self.dispatch(id, event))
                .collect::<Vec<_>>(),
        )
    }

    fn dispatch(&mut self, id: &str, event: &Event) -> Command {
        let Some(model) = self.pages.take_model(id) else {
            return Command::None;
        };
        tracing::trace!(page = %id, ?event, "Routing event");
        let ctx = context(self.geometry, &self.widgets);
        let (model, cmd) = model.update(event, &ctx);
        self.pages.replace_model(id, model);
        cmd
    }

    /// Compose the full screen as plain text, one line per row.
    ///
    /// The active tab is shown as `[title]`. Each line is clipped to the
    /// terminal width and the page body is padded so the widget bar always
    /// sits on the last row.
    pub fn view(&self) -> String {
        let Geometry { width, height } = self.geometry;
        if height == 0 {
            return String::new();
        }

        let mut lines: Vec<String> = Vec::with_capacity(height as usize);
        lines.push(fit_width(&self.tab_bar_text(), width));

        let content = self.content_geometry();
        let body = self.active_body();
        let mut body_lines = body.lines();
        for _ in 0..content.height {
            lines.push(fit_width(body_lines.next().unwrap_or(""), width));
        }

        if height > TAB_BAR_ROWS {
            lines.push(fit_width(&self.widgets.render(), width));
        }
        lines.join("\n")
    }

    /// Draw the composed screen into a ratatui frame.
    pub fn draw(&self, frame: &mut Frame) {
        let chunks = Layout::vertical([
            Constraint::Length(TAB_BAR_ROWS),
            Constraint::Min(0),
            Constraint::Length(WIDGET_BAR_ROWS),
        ])
        .split(frame.area());

        let titles: Vec<Line> = self
            .pages
            .all()
            .iter()
            .map(|p| Line::from(p.title().to_owned()))
            .collect();
        let tabs = Tabs::new(titles)
            .select(self.pages.active_index())
            .style(theme::TAB_INACTIVE)
            .highlight_style(theme::TAB_ACTIVE)
            .divider(theme::TAB_DIVIDER);
        frame.render_widget(tabs, chunks[0]);

        frame.render_widget(Paragraph::new(self.active_body()), chunks[1]);

        let bar = Paragraph::new(self.widgets.render()).style(theme::WIDGET_BAR);
        frame.render_widget(bar, chunks[2]);
    }

    fn tab_bar_text(&self) -> String {
        let active = self.pages.active_index();
        self.pages
            .all()
            .iter()
            .enumerate()
            .map(|(i, p)| {
                if Some(i) == active {
                    format!("[{}]", p.title())
                } else {
                    format!(" {} ", p.title())
                }
            })
            .collect::<Vec<_>>()
            .join(theme::TAB_DIVIDER)
    }

    fn content_geometry(&self) -> Geometry {
        self.geometry.shrink_rows(TAB_BAR_ROWS + WIDGET_BAR_ROWS)
    }

    fn active_body(&self) -> String {
        match self.pages.active() {
            Some(page) => {
                let ctx = context(self.geometry, &self.widgets);
                page.model().render(&ctx)
            }
            None => String::new(),
        }
    }
}

fn context(size: Geometry, widgets: &WidgetRegistry) -> Context<'_> {
    Context::new(
        size,
        size.shrink_rows(TAB_BAR_ROWS + WIDGET_BAR_ROWS),
        widgets,
    )
}

/// Clip `text` to at most `width` display columns.
fn fit_width(text: &str, width: u16) -> String {
    let max = width as usize;
    let mut used = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max {
            break;
        }
        used += w;
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::{KeyCode, KeyEventKind, KeyEventState, KeyModifiers};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn key_event(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::empty(),
        })
    }

    fn ctrl_right() -> Event {
        key_event(KeyCode::Right, KeyModifiers::CONTROL)
    }

    /// Counts the events it sees and echoes them in its body.
    struct Recorder {
        name: &'static str,
        seen: Arc<AtomicUsize>,
        last: String,
    }

    impl Recorder {
        fn new(name: &'static str) -> (Self, Arc<AtomicUsize>) {
            let seen = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    name,
                    seen: seen.clone(),
                    last: String::new(),
                },
                seen,
            )
        }
    }

    impl Page for Recorder {
        fn init(&mut self, _ctx: &Context<'_>) -> Command {
            Command::emit(Event::set_widget(self.name, "ready"))
        }

        fn update(self: Box<Self>, event: &Event, ctx: &Context<'_>) -> (Box<dyn Page>, Command) {
            self.seen.fetch_add(1, Ordering::SeqCst);
            let last = match event {
                Event::Key(key) => format!("{:?}", key.code),
                Event::Resize(..) => format!("{}x{}", ctx.size().width, ctx.size().height),
                Event::Tick => "tick".into(),
                _ => "other".into(),
            };
            let cmd = if last == "Char('e')" {
                Command::emit(Event::set_widget("echo", self.name))
            } else {
                Command::None
            };
            (Box::new(Recorder { last, ..*self }), cmd)
        }

        fn render(&self, _ctx: &Context<'_>) -> String {
            format!("{}:{}", self.name, self.last)
        }
    }

    fn host(names: &[&'static str]) -> (Compositor, Vec<Arc<AtomicUsize>>) {
        let mut compositor = Compositor::new();
        let mut counters = Vec::new();
        for name in names {
            let (recorder, seen) = Recorder::new(name);
            compositor.add_page(*name, name.to_uppercase(), Box::new(recorder)).unwrap();
            counters.push(seen);
        }
        (compositor, counters)
    }

    #[test]
    fn navigation_key_never_reaches_page() {
        let (mut compositor, seen) = host(&["a", "b"]);
        let cmd = compositor.update(ctrl_right());
        assert!(cmd.is_none());
        assert_eq!(compositor.active_id(), Some("b"));
        assert_eq!(seen[0].load(Ordering::SeqCst), 0);
        assert_eq!(seen[1].load(Ordering::SeqCst), 0);
    }

    #[test]
    fn other_keys_reach_active_page_once_and_commit_model() {
        let (mut compositor, seen) = host(&["a", "b"]);
        compositor.update(Event::Resize(30, 5));
        compositor.update(key_event(KeyCode::Char('x'), KeyModifiers::empty()));

        assert_eq!(seen[0].load(Ordering::SeqCst), 2);
        assert_eq!(seen[1].load(Ordering::SeqCst), 0);
        assert!(compositor.view().contains("a:Char('x')"));
    }

    #[test]
    fn page_command_propagates_unchanged() {
        let (mut compositor, _) = host(&["a"]);
        let cmd = compositor.update(key_event(KeyCode::Char('e'), KeyModifiers::empty()));
        match cmd {
            Command::Emit(Event::SetWidget { name, value }) => {
                assert_eq!(name, "echo");
                assert_eq!(value, "a");
            }
            other => panic!("Expected Emit(SetWidget), got: {:?}", other),
        }
    }

    #[test]
    fn forward_policy_delivers_key_to_new_page() {
        let (mut compositor, seen) = host(&["a", "b"]);
        compositor
            .key_bindings_mut()
            .set_policy(NavigationKeyPolicy::Forward);
        compositor.update(ctrl_right());
        assert_eq!(compositor.active_id(), Some("b"));
        assert_eq!(seen[0].load(Ordering::SeqCst), 0);
        assert_eq!(seen[1].load(Ordering::SeqCst), 1);
    }

    #[test]
    fn quit_key_returns_quit() {
        let (mut compositor, seen) = host(&["a"]);
        let cmd = compositor.update(key_event(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(cmd.is_quit());
        assert_eq!(seen[0].load(Ordering::SeqCst), 0);
    }

    #[test]
    fn resize_updates_geometry_and_reaches_page() {
        let (mut compositor, seen) = host(&["a"]);
        compositor.update(Event::Resize(40, 10));
        assert_eq!(compositor.geometry(), Geometry::new(40, 10));
        assert_eq!(seen[0].load(Ordering::SeqCst), 1);
        assert!(compositor.view().contains("a:40x10"));
    }

    #[test]
    fn resize_round_trip_leaves_registries_alone() {
        let (mut compositor, _) = host(&["a", "b"]);
        compositor.add_widget("time", "10:00");
        compositor.update(Event::Resize(40, 10));
        let before = compositor.view();

        compositor.update(Event::Resize(0, 0));
        assert_eq!(compositor.view(), "");
        compositor.update(Event::Resize(40, 10));

        assert_eq!(compositor.pages().len(), 2);
        assert_eq!(compositor.widgets().render(), "10:00");
        assert_eq!(compositor.active_id(), Some("a"));
        // The recorder echoes the last resize, which is the same geometry again
        assert_eq!(compositor.view(), before);
    }

    #[test]
    fn tick_reaches_active_page_only() {
        let (mut compositor, seen) = host(&["a", "b", "c"]);
        compositor.next_page();
        compositor.update(Event::Tick);
        assert_eq!(seen[0].load(Ordering::SeqCst), 0);
        assert_eq!(seen[1].load(Ordering::SeqCst), 1);
        assert_eq!(seen[2].load(Ordering::SeqCst), 0);
        assert!(compositor.view().contains("b:tick"));
    }

    #[test]
    fn broadcast_ticks_reach_every_page() {
        let (mut compositor, seen) = host(&["a", "b", "c"]);
        compositor.set_broadcast_ticks(true);
        compositor.update(Event::Tick);
        for counter in &seen {
            assert_eq!(counter.load(Ordering::SeqCst), 1);
        }
    }

    #[test]
    fn init_runs_once() {
        let (mut compositor, _) = host(&["a", "b"]);
        let first = compositor.init();
        assert!(!first.is_none());
        assert!(compositor.init().is_none());
    }

    #[test]
    fn requests_are_applied_not_forwarded() {
        let (mut compositor, seen) = host(&["a", "b"]);
        compositor.update(Event::set_widget("clock", "10:00"));
        compositor.update(Event::SwitchTo("b".into()));
        compositor.update(Event::NextPage);
        compositor.update(Event::PreviousPage);
        compositor.update(Event::SwitchTo("missing".into()));
        compositor.update(Event::RemoveWidget { name: "nope".into() });

        assert_eq!(compositor.widgets().get("clock"), Some("10:00"));
        assert_eq!(compositor.active_id(), Some("b"));
        assert_eq!(seen[0].load(Ordering::SeqCst), 0);
        assert_eq!(seen[1].load(Ordering::SeqCst), 0);
    }

    #[test]
    fn add_page_after_init_runs_page_init() {
        let (mut compositor, _) = host(&["a"]);
        let startup = compositor.init();
        assert!(matches!(startup, Command::Emit(Event::SetWidget { .. })));

        let (recorder, _) = Recorder::new("late");
        let cmd = compositor.update(Event::add_page("late", "Late", recorder));
        assert!(matches!(cmd, Command::Emit(Event::SetWidget { ref name, .. }) if name == "late"));
        assert_eq!(compositor.pages().len(), 2);

        let (dup, _) = Recorder::new("dup");
        let cmd = compositor.update(Event::add_page("late", "Again", dup));
        assert!(cmd.is_none());
        assert_eq!(compositor.pages().len(), 2);
    }

    #[test]
    fn init_batches_all_pages() {
        let (mut compositor, _) = host(&["a", "b"]);
        match compositor.init() {
            Command::Batch(cmds) => assert_eq!(cmds.len(), 2),
            other => panic!("Expected Batch, got: {:?}", other),
        }
    }

    #[test]
    fn remove_request_reclamps_active() {
        let (mut compositor, _) = host(&["a", "b", "c"]);
        compositor.update(Event::RemovePage("a".into()));
        assert_eq!(compositor.active_id(), Some("b"));
        compositor.update(Event::RemovePage("zzz".into()));
        assert_eq!(compositor.pages().len(), 2);
    }

    #[test]
    fn view_layout() {
        let (mut compositor, _) = host(&["a", "b"]);
        compositor.add_widget("time", "10:00");
        compositor.add_widget("battery", "92%");
        compositor.update(Event::Resize(20, 4));

        let view = compositor.view();
        let lines: Vec<&str> = view.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "[A]| B ");
        assert_eq!(lines[1], "a:20x4");
        assert_eq!(lines[2], "");
        assert_eq!(lines[3], "10:00 | 92%");
    }

    #[test]
    fn view_clips_to_width() {
        let (mut compositor, _) = host(&["alpha", "beta"]);
        compositor.add_widget("status", "a very long widget value");
        compositor.update(Event::Resize(6, 3));

        let view = compositor.view();
        for line in view.lines() {
            assert!(line.chars().count() <= 6, "line too wide: {:?}", line);
        }
        assert!(view.starts_with("[ALPHA"));
    }

    #[test]
    fn view_degenerate_geometry() {
        let (mut compositor, _) = host(&["a"]);
        assert_eq!(compositor.view(), "");

        compositor.update(Event::Resize(10, 1));
        assert_eq!(compositor.view(), "[A]");

        compositor.update(Event::Resize(0, 3));
        assert_eq!(compositor.view(), "\n\n");
    }

    #[test]
    fn view_without_pages() {
        let mut compositor = Compositor::new();
        compositor.update(Event::Resize(10, 3));
        compositor.update(key_event(KeyCode::Char('x'), KeyModifiers::empty()));
        compositor.update(ctrl_right());
        assert_eq!(compositor.view(), "\n\n");
    }

    #[test]
    fn fit_width_counts_display_columns() {
        assert_eq!(fit_width("hello", 3), "hel");
        assert_eq!(fit_width("日本語", 4), "日本");
        assert_eq!(fit_width("abc", 0), "");
    }

    #[test]
    fn draw_renders_into_buffer() {
        use ratatui::backend::TestBackend;
        use ratatui::Terminal;

        let (mut compositor, _) = host(&["a", "b"]);
        compositor.add_widget("time", "10:00");
        compositor.update(Event::Resize(20, 4));

        let mut terminal = Terminal::new(TestBackend::new(20, 4)).unwrap();
        terminal.draw(|frame| compositor.draw(frame)).unwrap();

        let buffer = terminal.backend().buffer();
        let row = |y: u16| -> String {
            (0..20).map(|x| buffer[(x, y)].symbol().to_string()).collect()
        };
        assert!(row(0).contains('A'));
        assert!(row(0).contains('B'));
        assert!(row(1).starts_with("a:20x4"));
        assert!(row(3).starts_with("10:00"));
    }
}
