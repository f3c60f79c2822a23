//! Styles for the ratatui draw path.

use ratatui::style::{Color, Modifier, Style};

/// Style for the currently active tab label.
pub const TAB_ACTIVE: Style = Style::new()
    .fg(Color::Yellow)
    .add_modifier(Modifier::BOLD);

/// Style for inactive tab labels.
pub const TAB_INACTIVE: Style = Style::new().fg(Color::Gray);

/// Divider between tab labels.
pub const TAB_DIVIDER: &str = "|";

/// Style for the widget bar at the bottom.
pub const WIDGET_BAR: Style = Style::new().fg(Color::Black).bg(Color::DarkGray);
