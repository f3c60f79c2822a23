mod event;
mod runner;
mod terminal;

use std::time::Duration;

pub use event::{EventHandler, HostHandle};
pub use runner::{settle, Flow, Runner};
pub use terminal::TerminalSession;

use crate::error::HostError;
use crate::host::{Compositor, Event};

/// Timing for the interactive loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// How often `Event::Tick` is delivered to pages.
    pub tick_rate: Duration,
    /// How often the screen is redrawn.
    pub render_rate: Duration,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            tick_rate: Duration::from_millis(250), // 4Hz
            render_rate: Duration::from_millis(50), // 20fps
        }
    }
}

/// Launch the interactive host.
///
/// Creates a tokio runtime, takes over the terminal, seeds the compositor
/// with the current terminal size and runs until a quit command. `on_start`
/// runs inside the runtime with a handle for spawning external producers.
/// The terminal is restored on exit (including on panic).
pub fn launch<F>(compositor: Compositor, options: RunOptions, on_start: F) -> Result<Compositor, HostError>
where
    F: FnOnce(&HostHandle),
{
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let mut session = TerminalSession::enter();
        let size = session.size()?;

        let events = EventHandler::new(options.tick_rate);
        let handle = events.handle();
        handle.send(Event::Resize(size.width, size.height));
        on_start(&handle);

        Runner::new(compositor, events)
            .run(options.render_rate, |compositor| session.draw(compositor))
            .await
    })
}
