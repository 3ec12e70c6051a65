use contracts::shared::data_table::SortDirection;
use std::cmp::Ordering;
use std::rc::Rc;

/// Id of the injected row-selection checkbox column
pub const SELECT_COLUMN_ID: &str = "__select";
/// Id of the injected per-row actions column
pub const ACTIONS_COLUMN_ID: &str = "__actions";

pub type CellFn<T> = Rc<dyn Fn(&T) -> String>;
pub type CompareFn<T> = Rc<dyn Fn(&T, &T) -> Ordering>;

/// Caller-declared column
///
/// The cell renderer is the only way the browser looks into a row. Local
/// sorting uses the comparator if one is given, otherwise a case-insensitive
/// comparison of the rendered cells.
pub struct Column<T> {
    pub id: String,
    pub header: String,
    pub sortable: bool,
    /// Width hint in pixels
    pub size: Option<u32>,
    cell: CellFn<T>,
    compare: Option<CompareFn<T>>,
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            header: self.header.clone(),
            sortable: self.sortable,
            size: self.size,
            cell: self.cell.clone(),
            compare: self.compare.clone(),
        }
    }
}

impl<T> Column<T> {
    pub fn new(
        id: impl Into<String>,
        header: impl Into<String>,
        cell: impl Fn(&T) -> String + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            header: header.into(),
            sortable: false,
            size: None,
            cell: Rc::new(cell),
            compare: None,
        }
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn size(mut self, px: u32) -> Self {
        self.size = Some(px);
        self
    }

    /// Comparator used for local sorting; marks the column sortable.
    pub fn compare_with(mut self, compare: impl Fn(&T, &T) -> Ordering + 'static) -> Self {
        self.compare = Some(Rc::new(compare));
        self.sortable = true;
        self
    }

    pub fn render_cell(&self, row: &T) -> String {
        (self.cell)(row)
    }

    pub fn compare(&self, a: &T, b: &T) -> Ordering {
        match &self.compare {
            Some(compare) => compare(a, b),
            None => self.sort_key(a).cmp(&self.sort_key(b)),
        }
    }

    pub(crate) fn has_comparator(&self) -> bool {
        self.compare.is_some()
    }

    /// Key for the default comparison: the rendered cell, lowercased
    pub(crate) fn sort_key(&self, row: &T) -> String {
        self.render_cell(row).to_lowercase()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Selection,
    Data,
    Actions,
}

/// Header model for one rendered column, synthetic columns included
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayColumn {
    pub id: String,
    pub header: String,
    pub kind: ColumnKind,
    pub sortable: bool,
    pub size: Option<u32>,
    /// Active sort direction when this column is the sorted one
    pub sort: Option<SortDirection>,
}

impl DisplayColumn {
    pub(crate) fn selection() -> Self {
        Self {
            id: SELECT_COLUMN_ID.to_string(),
            header: String::new(),
            kind: ColumnKind::Selection,
            sortable: false,
            size: Some(40),
            sort: None,
        }
    }

    pub(crate) fn actions() -> Self {
        Self {
            id: ACTIONS_COLUMN_ID.to_string(),
            header: String::new(),
            kind: ColumnKind::Actions,
            sortable: false,
            size: Some(60),
            sort: None,
        }
    }

    pub(crate) fn data<T>(column: &Column<T>, sort: Option<SortDirection>) -> Self {
        Self {
            id: column.id.clone(),
            header: column.header.clone(),
            kind: ColumnKind::Data,
            sortable: column.sortable,
            size: column.size,
            sort,
        }
    }

    /// Header indicator text: ▲/▼ on the sorted column, ⇅ on other sortable ones
    pub fn sort_indicator(&self) -> &'static str {
        match (self.sortable, self.sort) {
            (_, Some(direction)) => direction.indicator(),
            (true, None) => " ⇅",
            (false, None) => "",
        }
    }
}
