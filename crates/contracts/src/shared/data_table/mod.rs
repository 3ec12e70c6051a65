//! Contracts for the paginated/sortable/filterable list pages
//!
//! Everything the data browser exchanges with the remote list endpoint lives
//! here: the pagination window, the single-column sort state, filter
//! declarations and values, the list query itself and the settings document
//! for a table.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use contracts::shared::data_table::{ListQuery, PaginationWindow, SortDirection};
//!
//! let window = PaginationWindow::new(2, 25, 130)?;
//! let query = ListQuery::new(window.current_page(), window.per_page)
//!     .with_sort("created_at", SortDirection::Desc);
//! let url = format!("/api/tickets?{}", query.to_query_string()?);
//! ```

mod error;
mod filter;
mod pagination;
mod query;
mod settings;
mod sort;

pub use error::DataTableError;
pub use filter::{FilterDeclaration, FilterOption, FilterValues};
pub use pagination::PaginationWindow;
pub use query::{ListPage, ListQuery};
pub use settings::DataTableSettings;
pub use sort::{next_sort, SortDirection, SortState};
