//! Demo pages.
//!
//! Each page exercises a different part of the page contract: replacing its
//! model on update, emitting requests, running tasks, reading geometry and
//! widgets, and adding or removing pages at runtime.

use std::collections::VecDeque;
use std::time::Duration;

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::host::{Command, Context, Event, KeyChord, Page};

/// Simple counter. Publishes its value to the `count` widget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counter {
    count: i64,
}

impl Counter {
    pub fn count(&self) -> i64 {
        self.count
    }
}

impl Page for Counter {
    fn update(self: Box<Self>, event: &Event, _ctx: &Context<'_>) -> (Box<dyn Page>, Command) {
        let Event::Key(key) = event else {
            return (self, Command::None);
        };
        let count = match key.code {
            KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('+') => self.count + 1,
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('-') => self.count - 1,
            KeyCode::Char('0') => 0,
            _ => return (self, Command::None),
        };
        let cmd = Command::emit(Event::set_widget("count", format!("count {}", count)));
        (Box::new(Counter { count }), cmd)
    }

    fn render(&self, _ctx: &Context<'_>) -> String {
        format!(
            "Count: {}\n\n+ / k / Up     increment\n- / j / Down   decrement\n0              reset",
            self.count
        )
    }
}

/// Describe a key event as a chord string, e.g. `ctrl+x`.
pub fn describe_key(key: &KeyEvent) -> String {
    KeyChord {
        key: key.code,
        ctrl: key.modifiers.contains(KeyModifiers::CONTROL),
        alt: key.modifiers.contains(KeyModifiers::ALT),
        shift: key.modifiers.contains(KeyModifiers::SHIFT),
        meta: key.modifiers.contains(KeyModifiers::SUPER)
            || key.modifiers.contains(KeyModifiers::META),
    }
    .to_string()
}

/// Log of recent key presses. Enter starts a background job.
#[derive(Debug, Clone)]
pub struct KeyLog {
    entries: VecDeque<String>,
    capacity: usize,
    jobs: u32,
}

impl KeyLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            jobs: 0,
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    fn push(&mut self, entry: String) {
        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }
}

impl Page for KeyLog {
    fn update(mut self: Box<Self>, event: &Event, _ctx: &Context<'_>) -> (Box<dyn Page>, Command) {
        let Event::Key(key) = event else {
            return (self, Command::None);
        };
        self.push(describe_key(key));

        let cmd = match key.code {
            KeyCode::Enter => {
                self.jobs += 1;
                let job = self.jobs;
                Command::batch([
                    Command::emit(Event::set_widget("job", format!("job {} running", job))),
                    Command::task(move || {
                        std::thread::sleep(Duration::from_millis(500));
                        Some(Event::set_widget("job", format!("job {} done", job)))
                    }),
                ])
            }
            KeyCode::Char('x') if key.modifiers.is_empty() => {
                self.entries.clear();
                Command::emit(Event::RemoveWidget { name: "job".into() })
            }
            _ => Command::None,
        };
        (self, cmd)
    }

    fn render(&self, ctx: &Context<'_>) -> String {
        let rows = ctx.content_size().height as usize;
        let header = "Enter: run job   x: clear";
        if rows <= 1 {
            return header.to_string();
        }
        let skip = self.entries.len().saturating_sub(rows - 1);
        std::iter::once(header)
            .chain(self.entries.iter().skip(skip).map(String::as_str))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Geometry and widget inspector. `n` opens a scratch tab.
#[derive(Debug, Clone, Copy, Default)]
pub struct About {
    resizes: u32,
    opened: u32,
}

impl Page for About {
    fn update(self: Box<Self>, event: &Event, _ctx: &Context<'_>) -> (Box<dyn Page>, Command) {
        match event {
            Event::Resize(..) => (
                Box::new(About {
                    resizes: self.resizes + 1,
                    ..*self
                }),
                Command::None,
            ),
            Event::Key(key) if key.code == KeyCode::Char('n') && key.modifiers.is_empty() => {
                let opened = self.opened + 1;
                let id = format!("scratch-{}", opened);
                let title = format!("Scratch {}", opened);
                let cmd = Command::batch([
                    Command::emit(Event::add_page(id.clone(), title, Scratch::new(id.clone()))),
                    Command::emit(Event::SwitchTo(id)),
                ]);
                (Box::new(About { opened, ..*self }), cmd)
            }
            _ => (self, Command::None),
        }
    }

    fn render(&self, ctx: &Context<'_>) -> String {
        let size = ctx.size();
        let content = ctx.content_size();
        let mut lines = vec![
            format!("Terminal  {}x{}", size.width, size.height),
            format!("Content   {}x{}", content.width, content.height),
            format!("Resizes   {}", self.resizes),
            String::new(),
            "Widgets:".to_string(),
        ];
        lines.extend(
            ctx.widgets()
                .iter()
                .map(|(name, value)| format!("  {:<8} {}", name, value)),
        );
        lines.push(String::new());
        lines.push("n: open a scratch tab".to_string());
        lines.join("\n")
    }
}

/// Free-typing tab opened from About. Esc closes it.
#[derive(Debug, Clone, Default)]
pub struct Scratch {
    id: String,
    text: String,
}

impl Scratch {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: String::new(),
        }
    }
}

impl Page for Scratch {
    fn update(mut self: Box<Self>, event: &Event, _ctx: &Context<'_>) -> (Box<dyn Page>, Command) {
        let Event::Key(key) = event else {
            return (self, Command::None);
        };
        match key.code {
            KeyCode::Esc => {
                let cmd = Command::emit(Event::RemovePage(self.id.clone()));
                return (self, cmd);
            }
            KeyCode::Enter => self.text.push('\n'),
            KeyCode::Backspace => {
                self.text.pop();
            }
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.text.push(ch)
            }
            _ => {}
        }
        (self, Command::None)
    }

    fn render(&self, _ctx: &Context<'_>) -> String {
        format!("{}_\n\nEsc: close this tab", self.text)
    }
}
