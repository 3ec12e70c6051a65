//! Generic list page component state: selection, sorting, search, filters,
//! pagination and bulk/row actions over caller-supplied rows.

pub mod actions;
pub mod api;
pub mod browser;
pub mod busy;
pub mod column;
pub mod reactive;
pub mod search;
pub mod selection;

pub use actions::{BulkAction, RowAction, RowActionOutcome};
pub use browser::{
    run_bulk_action, run_bulk_action_with, BodyState, BrowserEvent, DataBrowser,
    DataBrowserCallbacks, PaginationView, PendingBulkAction,
};
pub use column::{Column, ColumnKind, DisplayColumn, ACTIONS_COLUMN_ID, SELECT_COLUMN_ID};
pub use reactive::DataBrowserHandle;
pub use search::{DebounceState, SearchDebounce};
pub use selection::{HeaderCheckboxState, Selection};
