//! Demo application wired into the `tabhost` binary.

pub mod pages;

use std::time::Duration;

use chrono::Local;

use crate::error::HostError;
use crate::host::{Compositor, KeyBindings};
use crate::tui::HostHandle;

pub use pages::{About, Counter, KeyLog, Scratch};

/// Build the demo compositor: three pages plus the clock and help widgets.
pub fn build(bindings: KeyBindings) -> Result<Compositor, HostError> {
    let help = format!("{} / {} switch tabs", bindings.previous(), bindings.next());
    let mut compositor = Compositor::with_key_bindings(bindings);

    compositor.add_page("counter", "Counter", Box::new(Counter::default()))?;
    compositor.add_page("keys", "Key Log", Box::new(KeyLog::new(256)))?;
    compositor.add_page("about", "About", Box::new(About::default()))?;

    compositor.add_widget("clock", clock_now());
    compositor.add_widget("help", help);
    Ok(compositor)
}

fn clock_now() -> String {
    Local::now().format("%H:%M:%S").to_string()
}

/// Keep the `clock` widget current until the host shuts down.
pub fn spawn_clock(handle: HostHandle) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(1));
        loop {
            interval.tick().await;
            if !handle.set_widget("clock", clock_now()) {
                tracing::debug!("Host closed, stopping clock");
                return;
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::Event;

    #[test]
    fn build_registers_pages_in_order() {
        let compositor = build(KeyBindings::default()).unwrap();
        let ids: Vec<&str> = compositor.pages().all().iter().map(|p| p.id()).collect();
        assert_eq!(ids, vec!["counter", "keys", "about"]);
        assert_eq!(compositor.active_id(), Some("counter"));
        assert!(compositor.widgets().get("clock").is_some());
        assert_eq!(
            compositor.widgets().get("help"),
            Some("ctrl+left / ctrl+right switch tabs")
        );
    }

    #[test]
    fn demo_view_shows_tabs_and_widgets() {
        let mut compositor = build(KeyBindings::default()).unwrap();
        compositor.update(Event::Resize(60, 8));
        let view = compositor.view();
        assert!(view.starts_with("[Counter]| Key Log | About "));
        assert!(view.contains("Count: 0"));
        assert!(view.lines().last().unwrap().contains("switch tabs"));
    }
}
