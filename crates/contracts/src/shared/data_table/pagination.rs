use super::DataTableError;
use serde::{Deserialize, Serialize};

/// Maximum number of numbered page buttons shown at once
const PAGE_BUTTONS: usize = 3;

/// Pagination window supplied by the caller
///
/// `page` is 1-based. The caller is the source of truth, so the window never
/// rejects an out-of-range page: every derived value goes through
/// [`PaginationWindow::current_page`], which clamps into `[1, page_count]`.
/// Deserialization goes through [`PaginationWindow::new`], so a zero
/// per-page is rejected on the wire too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawPaginationWindow")]
pub struct PaginationWindow {
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPaginationWindow {
    #[serde(default)]
    page: usize,
    per_page: usize,
    #[serde(default)]
    total: usize,
}

impl TryFrom<RawPaginationWindow> for PaginationWindow {
    type Error = DataTableError;

    fn try_from(raw: RawPaginationWindow) -> Result<Self, Self::Error> {
        Self::new(raw.page, raw.per_page, raw.total)
    }
}

impl PaginationWindow {
    /// Creates a window, clamping `page == 0` to the first page.
    pub fn new(page: usize, per_page: usize, total: usize) -> Result<Self, DataTableError> {
        if per_page == 0 {
            return Err(DataTableError::InvalidPerPage(per_page));
        }
        Ok(Self {
            page: page.max(1),
            per_page,
            total,
        })
    }

    /// Rows per page as used by every derived value. Fields are public, so
    /// a literal with `per_page == 0` is read as one row per page.
    fn size(&self) -> usize {
        self.per_page.max(1)
    }

    /// `max(1, ceil(total / per_page))`
    pub fn page_count(&self) -> usize {
        self.total.div_ceil(self.size()).max(1)
    }

    pub fn current_page(&self) -> usize {
        self.clamp(self.page)
    }

    /// Clamps an arbitrary page request into `[1, page_count]`.
    pub fn clamp(&self, page: usize) -> usize {
        page.clamp(1, self.page_count())
    }

    /// Zero-based offset of the first row of the current page
    pub fn offset(&self) -> usize {
        (self.current_page() - 1) * self.size()
    }

    /// Returns `(from, to)` for the "Showing X to Y of Z" line.
    ///
    /// Both are 0 when there are no records at all.
    pub fn range(&self) -> (usize, usize) {
        if self.total == 0 {
            return (0, 0);
        }
        let page = self.current_page();
        let size = self.size();
        let from = (page - 1) * size + 1;
        let to = (page * size).min(self.total);
        (from, to)
    }

    /// Page numbers for the button strip, keeping the current page centered
    /// when possible.
    pub fn page_numbers(&self) -> Vec<usize> {
        let count = self.page_count();
        if count <= PAGE_BUTTONS {
            return (1..=count).collect();
        }

        let current = self.current_page();
        let start = if current == 1 {
            1
        } else if current == count {
            count - PAGE_BUTTONS + 1
        } else {
            current - 1
        };
        (start..start + PAGE_BUTTONS).collect()
    }

    pub fn has_previous(&self) -> bool {
        self.current_page() > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page() < self.page_count()
    }
}
