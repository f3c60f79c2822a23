use std::time::Duration;

use crossterm::event::{EventStream, KeyEventKind};
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::host::Event;

/// Cloneable sender into the host's single event stream.
///
/// External producers (a clock updater, a background job) use this to
/// request widget or page changes; the requests are applied in order by the
/// one task that owns the compositor.
#[derive(Debug, Clone)]
pub struct HostHandle {
    tx: mpsc::UnboundedSender<Event>,
}

impl HostHandle {
    /// Queue an event. Returns `false` once the host has shut down.
    pub fn send(&self, event: Event) -> bool {
        self.tx.send(event).is_ok()
    }

    pub fn set_widget(&self, name: impl Into<String>, value: impl Into<String>) -> bool {
        self.send(Event::set_widget(name, value))
    }

    pub fn remove_widget(&self, name: impl Into<String>) -> bool {
        self.send(Event::RemoveWidget { name: name.into() })
    }

    pub fn switch_to(&self, id: impl Into<String>) -> bool {
        self.send(Event::SwitchTo(id.into()))
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Async event source that multiplexes terminal input and the tick timer
/// using `tokio::select!`.
///
/// Spawns a background tokio task that reads from crossterm's `EventStream`
/// and a tick interval, sending everything through an mpsc channel shared
/// with every [`HostHandle`].
pub struct EventHandler {
    tx: mpsc::UnboundedSender<Event>,
    rx: mpsc::UnboundedReceiver<Event>,
    _task: Option<JoinHandle<()>>,
}

impl EventHandler {
    /// Start reading terminal events, sending `Event::Tick` every `tick_rate`.
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let event_tx = tx.clone();

        let task = tokio::spawn(async move {
            let mut reader = EventStream::new();
            let mut tick_interval = tokio::time::interval(tick_rate);

            loop {
                let tick_delay = tick_interval.tick();
                let crossterm_event = reader.next();

                tokio::select! {
                    maybe_event = crossterm_event => {
                        let event = match maybe_event {
                            Some(Ok(crossterm::event::Event::Key(key))) if key.kind == KeyEventKind::Press => {
                                Event::Key(key)
                            }
                            Some(Ok(crossterm::event::Event::Mouse(mouse))) => Event::Mouse(mouse),
                            Some(Ok(crossterm::event::Event::Resize(w, h))) => Event::Resize(w, h),
                            Some(Ok(_)) => continue,
                            Some(Err(e)) => {
                                tracing::warn!("Terminal event error: {}", e);
                                continue;
                            }
                            // Stream ended
                            None => return,
                        };
                        if event_tx.send(event).is_err() {
                            return;
                        }
                    }
                    _ = tick_delay => {
                        if event_tx.send(Event::Tick).is_err() {
                            return;
                        }
                    }
                }
            }
        });

        Self {
            tx,
            rx,
            _task: Some(task),
        }
    }

    /// An event source fed only through handles, with no terminal reader.
    pub fn detached() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx, _task: None }
    }

    pub fn handle(&self) -> HostHandle {
        HostHandle {
            tx: self.tx.clone(),
        }
    }

    /// Wait for the next event.
    ///
    /// The handler holds a sender itself, so this only returns `None` after
    /// [`EventHandler::close`].
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }

    /// Stop accepting events. Already queued events are still delivered.
    pub fn close(&mut self) {
        self.rx.close();
    }
}
