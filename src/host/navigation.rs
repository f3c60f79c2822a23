//! Active-page index state machine.
//!
//! Holds only the index; the page registry passes in the current length on
//! every transition. Whenever at least one page exists the index satisfies
//! `0 <= active < len`.

/// Relative navigation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// Tracks which page is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Navigator {
    active: usize,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently active index. Meaningless while there are no pages.
    pub fn active(&self) -> usize {
        self.active
    }

    /// Jump to `index`. Returns whether the active page changed.
    ///
    /// Out-of-range indices leave the state untouched.
    pub fn select(&mut self, index: usize, len: usize) -> bool {
        if index >= len || index == self.active {
            return false;
        }
        self.active = index;
        true
    }

    /// Step one page in `direction`, wrapping at either end.
    ///
    /// No-op with zero or one page.
    pub fn step(&mut self, direction: Direction, len: usize) -> bool {
        if len <= 1 {
            return false;
        }
        self.active = match direction {
            Direction::Next => (self.active + 1) % len,
            Direction::Previous => {
                if self.active == 0 {
                    len - 1
                } else {
                    self.active - 1
                }
            }
        };
        true
    }

    pub fn next(&mut self, len: usize) -> bool {
        self.step(Direction::Next, len)
    }

    pub fn previous(&mut self, len: usize) -> bool {
        self.step(Direction::Previous, len)
    }

    /// A page was appended; `len` is the new page count.
    pub fn page_added(&mut self, len: usize) {
        if len == 1 {
            self.active = 0;
        }
    }

    /// The page at `removed` was taken out; `len` is the new page count.
    ///
    /// Pages before the active one shift it down so the same page stays
    /// active. Removing the active page hands focus to the page that
    /// followed it, or to the new last page when it was last.
    pub fn page_removed(&mut self, removed: usize, len: usize) {
        if len == 0 {
            self.active = 0;
        } else if removed < self.active {
            self.active -= 1;
        } else if self.active >= len {
            self.active = len - 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_wraps_around() {
        let mut nav = Navigator::new();
        assert!(nav.next(3));
        assert!(nav.next(3));
        assert_eq!(nav.active(), 2);
        assert!(nav.next(3));
        assert_eq!(nav.active(), 0);
    }

    #[test]
    fn previous_wraps_around() {
        let mut nav = Navigator::new();
        assert!(nav.previous(3));
        assert_eq!(nav.active(), 2);
        nav.previous(3);
        assert_eq!(nav.active(), 1);
    }

    #[test]
    fn cyclic_closure() {
        for len in 1..6 {
            for start in 0..len {
                let mut nav = Navigator::new();
                nav.select(start, len);
                for _ in 0..len {
                    nav.next(len);
                }
                assert_eq!(nav.active(), start, "next x{} from {}", len, start);
                for _ in 0..len {
                    nav.previous(len);
                }
                assert_eq!(nav.active(), start, "previous x{} from {}", len, start);
            }
        }
    }

    #[test]
    fn step_is_noop_with_one_or_zero_pages() {
        let mut nav = Navigator::new();
        assert!(!nav.next(0));
        assert!(!nav.previous(1));
        assert_eq!(nav.active(), 0);
    }

    #[test]
    fn select_rejects_out_of_range_and_same() {
        let mut nav = Navigator::new();
        assert!(!nav.select(0, 3));
        assert!(!nav.select(3, 3));
        assert!(nav.select(2, 3));
        assert_eq!(nav.active(), 2);
    }

    #[test]
    fn removing_active_middle_moves_to_follower() {
        // [a, b, c] with b active; remove b -> [a, c], c active at index 1
        let mut nav = Navigator::new();
        nav.select(1, 3);
        nav.page_removed(1, 2);
        assert_eq!(nav.active(), 1);
    }

    #[test]
    fn removing_active_last_falls_back() {
        let mut nav = Navigator::new();
        nav.select(2, 3);
        nav.page_removed(2, 2);
        assert_eq!(nav.active(), 1);
    }

    #[test]
    fn removing_before_active_keeps_same_page() {
        let mut nav = Navigator::new();
        nav.select(2, 3);
        nav.page_removed(0, 2);
        assert_eq!(nav.active(), 1);
    }

    #[test]
    fn removing_after_active_is_stable() {
        let mut nav = Navigator::new();
        nav.select(1, 4);
        nav.page_removed(3, 3);
        assert_eq!(nav.active(), 1);
    }

    #[test]
    fn removing_last_page_resets() {
        let mut nav = Navigator::new();
        nav.page_removed(0, 0);
        assert_eq!(nav.active(), 0);
        nav.page_added(1);
        assert_eq!(nav.active(), 0);
    }
}
