//! Terminal geometry tracking.

/// Terminal dimensions in cells.
///
/// Starts out as zero until the first resize notification arrives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Geometry {
    pub width: u16,
    pub height: u16,
}

impl Geometry {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Whether either dimension is zero (nothing can be drawn).
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Replace both dimensions from a resize notification.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    /// Geometry left after reserving `rows` lines for bars.
    pub fn shrink_rows(&self, rows: u16) -> Geometry {
        Geometry {
            width: self.width,
            height: self.height.saturating_sub(rows),
        }
    }
}
