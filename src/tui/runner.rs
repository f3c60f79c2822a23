use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crate::error::HostError;
use crate::host::{Command, Compositor};

use super::event::{EventHandler, HostHandle};

/// Whether the loop keeps going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Drives a [`Compositor`] from an [`EventHandler`].
///
/// One event is routed and its command interpreted before the next event
/// is taken, so the compositor is only ever touched by this loop.
pub struct Runner {
    compositor: Compositor,
    events: EventHandler,
}

impl Runner {
    pub fn new(compositor: Compositor, events: EventHandler) -> Self {
        Self { compositor, events }
    }

    pub fn handle(&self) -> HostHandle {
        self.events.handle()
    }

    pub fn compositor(&self) -> &Compositor {
        &self.compositor
    }

    /// Interpret a command. Must be called from inside a tokio runtime.
    pub fn execute(&self, cmd: Command) -> Flow {
        match cmd {
            Command::None => Flow::Continue,
            Command::Quit => Flow::Quit,
            Command::Batch(cmds) => {
                for cmd in cmds {
                    if self.execute(cmd) == Flow::Quit {
                        return Flow::Quit;
                    }
                }
                Flow::Continue
            }
            Command::Emit(event) => {
                self.handle().send(event);
                Flow::Continue
            }
            Command::Task(task) => {
                let handle = self.handle();
                tokio::task::spawn_blocking(move || {
                    if let Some(event) = task() {
                        handle.send(event);
                    }
                });
                Flow::Continue
            }
        }
    }

    /// Run until a `Quit` command or until the event source closes.
    ///
    /// Initializes the pages first, then loops: routing events and calling
    /// `draw` every `render_rate`. Returns the compositor in its final state.
    pub async fn run<F>(mut self, render_rate: Duration, mut draw: F) -> Result<Compositor, HostError>
    where
        F: FnMut(&Compositor) -> io::Result<()>,
    {
        let startup = self.compositor.init();
        tracing::debug!(command = startup.type_name(), pages = self.compositor.pages().len(), "Host started");
        if self.execute(startup) == Flow::Quit {
            return Ok(self.compositor);
        }

        let mut render_interval = tokio::time::interval(render_rate);

        loop {
            tokio::select! {
                maybe_event = self.events.next() => {
                    let Some(event) = maybe_event else {
                        break;
                    };
                    let cmd = self.compositor.update(event);
                    if self.execute(cmd) == Flow::Quit {
                        tracing::debug!("Quit requested");
                        break;
                    }
                }
                _ = render_interval.tick() => {
                    draw(&self.compositor)?;
                }
            }
        }

        Ok(self.compositor)
    }
}

/// Apply a command without an event loop.
///
/// Emitted events are routed straight away, in the order a running loop
/// would deliver them. Tasks are dropped. Used for headless rendering.
pub fn settle(compositor: &mut Compositor, cmd: Command) -> Flow {
    let mut pending = VecDeque::from([cmd]);
    while let Some(cmd) = pending.pop_front() {
        match cmd {
            Command::None => {}
            Command::Quit => return Flow::Quit,
            Command::Batch(cmds) => pending.extend(cmds),
            Command::Emit(event) => pending.push_back(compositor.update(event)),
            Command::Task(_) => tracing::debug!("Dropping task in headless mode"),
        }
    }
    Flow::Continue
}
