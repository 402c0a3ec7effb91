//! Pagination cursor types.

use super::PAGE_SIZE;

/// Specifying the phases of the list fetch.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ListPhase {
    Idle,
    Loading,
    Loaded,
    Errored,
}

/// Specifying navigation relative to the current page.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Direction {
    Next,
    Previous,
}

/// Current page, server total and the request bookkeeping used to reject
/// stale list responses.
///
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Pagination {
    pub current_page: u32,
    pub total_count: u64,
    pub phase: ListPhase,
    /// Sequence number of the most recently issued list request.
    pub latest_request: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Pagination {
            current_page: 1,
            total_count: 0,
            phase: ListPhase::Idle,
            latest_request: 0,
        }
    }
}

impl Pagination {
    /// Cursor starting on `page`, clamped to the first page.
    ///
    pub fn at_page(page: u32) -> Self {
        Pagination {
            current_page: page.max(1),
            ..Pagination::default()
        }
    }

    /// Last page holding posts, derived from the server total.
    ///
    pub fn last_page(&self) -> u32 {
        let pages = (self.total_count + PAGE_SIZE as u64 - 1) / PAGE_SIZE as u64;
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    /// Page a navigation lands on. Never goes below the first page.
    ///
    pub fn target(&self, direction: Option<Direction>) -> u32 {
        match direction {
            Some(Direction::Next) => self.current_page.saturating_add(1),
            Some(Direction::Previous) => self.current_page.saturating_sub(1).max(1),
            None => self.current_page,
        }
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.last_page()
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    /// Whether a response tagged with `request` is still the one to apply.
    ///
    pub fn is_latest(&self, request: u64) -> bool {
        request == self.latest_request
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_page_rounds_up() {
        let mut pagination = Pagination::default();
        assert_eq!(pagination.last_page(), 0);
        for (total, last) in [(1, 1), (2, 1), (3, 2), (4, 2), (5, 3)] {
            pagination.total_count = total;
            assert_eq!(pagination.last_page(), last);
        }
    }

    #[test]
    fn previous_is_clamped() {
        let pagination = Pagination::default();
        assert_eq!(pagination.target(Some(Direction::Previous)), 1);
        assert!(!pagination.has_previous());

        let pagination = Pagination::at_page(3);
        assert_eq!(pagination.target(Some(Direction::Previous)), 2);
        assert_eq!(pagination.target(Some(Direction::Next)), 4);
        assert_eq!(pagination.target(None), 3);
    }

    #[test]
    fn at_page_never_below_one() {
        assert_eq!(Pagination::at_page(0).current_page, 1);
    }

    #[test]
    fn has_next() {
        let pagination = Pagination {
            total_count: 3,
            ..Pagination::default()
        };
        assert!(pagination.has_next());
        let pagination = Pagination {
            current_page: 2,
            ..pagination
        };
        assert!(!pagination.has_next());
    }
}
