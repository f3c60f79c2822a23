//! Side-effect descriptors returned from `init` and `update`.
//!
//! The core never runs a command. The host loop interprets them: `Emit`
//! re-injects an event into the event stream, `Task` runs a closure off the
//! event loop and injects the event it produces.

use std::fmt;

use super::event::Event;

/// Work for the host loop to perform after an update.
#[derive(Default)]
pub enum Command {
    /// Nothing to do.
    #[default]
    None,
    /// Stop the host loop.
    Quit,
    /// Several commands, executed in order.
    Batch(Vec<Command>),
    /// Feed an event back into the event stream.
    Emit(Event),
    /// Run a blocking closure; its event (if any) is fed back when it finishes.
    Task(Box<dyn FnOnce() -> Option<Event> + Send>),
}

impl Command {
    pub fn none() -> Self {
        Command::None
    }

    pub fn quit() -> Self {
        Command::Quit
    }

    pub fn emit(event: Event) -> Self {
        Command::Emit(event)
    }

    pub fn task<F>(task: F) -> Self
    where
        F: FnOnce() -> Option<Event> + Send + 'static,
    {
        Command::Task(Box::new(task))
    }

    /// Combine commands, dropping `None`s.
    ///
    /// Collapses to `None` when nothing is left and to the single command
    /// when only one is left.
    pub fn batch(cmds: impl IntoIterator<Item = Command>) -> Self {
        let mut cmds: Vec<Command> = cmds.into_iter().filter(|c| !c.is_none()).collect();
        match cmds.len() {
            0 => Command::None,
            1 => cmds.pop().unwrap_or_default(),
            _ => Command::Batch(cmds),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Command::None)
    }

    /// Whether executing this command stops the host loop.
    pub fn is_quit(&self) -> bool {
        match self {
            Command::Quit => true,
            Command::Batch(cmds) => cmds.iter().any(Command::is_quit),
            _ => false,
        }
    }

    /// Stable variant name for tracing.
    pub fn type_name(&self) -> &'static str {
        match self {
            Command::None => "None",
            Command::Quit => "Quit",
            Command::Batch(_) => "Batch",
            Command::Emit(_) => "Emit",
            Command::Task(_) => "Task",
        }
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::None => write!(f, "None"),
            Command::Quit => write!(f, "Quit"),
            Command::Batch(cmds) => f.debug_tuple("Batch").field(cmds).finish(),
            Command::Emit(event) => f.debug_tuple("Emit").field(event).finish(),
            Command::Task(_) => write!(f, "Task(..)"),
        }
    }
}
