//! Tabular data browser
//!
//! Owns the client-side state of a list page (row selection, sort state,
//! debounced search text, busy flags) and turns user actions into
//! [`BrowserEvent`]s. The data itself always comes from the caller: every
//! event is a request for the caller to fetch or mutate, after which the new
//! rows and pagination are pushed back through the `set_*` methods.
//!
//! ```rust,ignore
//! let mut browser = DataBrowser::new(columns, PaginationWindow::new(1, 25, 0)?)
//!     .with_row_id(|ticket: &Ticket, _| ticket.id.to_string())
//!     .with_search("")
//!     .with_callbacks(DataBrowserCallbacks::new().on_page_change(move |page| load(page)));
//!
//! let event = browser.go_to_page(2);
//! browser.emit(event);
//! ```

use super::actions::{BulkAction, BulkHandler, RowAction, RowActionOutcome};
use super::busy::BusyState;
use super::column::{Column, DisplayColumn};
use super::search::SearchDebounce;
use super::selection::{HeaderCheckboxState, Selection};
use contracts::shared::data_table::{
    next_sort, DataTableError, DataTableSettings, FilterDeclaration, FilterValues, ListPage,
    ListQuery, PaginationWindow, SortDirection, SortState,
};
use std::cell::{Cell, RefCell};
use std::cmp::Reverse;
use std::collections::HashSet;
use std::rc::Rc;

pub type RowIdFn<T> = Rc<dyn Fn(&T, usize) -> String>;

/// Request emitted towards the caller's data source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserEvent {
    PageChange(usize),
    PerPageChange(usize),
    SearchChange(String),
    /// `value` is the empty string when the filter was cleared
    FilterChange { filter_id: String, value: String },
    SortChange {
        sort_by: Option<String>,
        direction: Option<SortDirection>,
    },
}

/// Caller callbacks, one per [`BrowserEvent`] variant
#[derive(Clone, Default)]
pub struct DataBrowserCallbacks {
    on_page_change: Option<Rc<dyn Fn(usize)>>,
    on_per_page_change: Option<Rc<dyn Fn(usize)>>,
    on_search_change: Option<Rc<dyn Fn(String)>>,
    on_filter_change: Option<Rc<dyn Fn(String, String)>>,
    on_sort_change: Option<Rc<dyn Fn(Option<String>, Option<SortDirection>)>>,
}

impl DataBrowserCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_page_change(mut self, f: impl Fn(usize) + 'static) -> Self {
        self.on_page_change = Some(Rc::new(f));
        self
    }

    pub fn on_per_page_change(mut self, f: impl Fn(usize) + 'static) -> Self {
        self.on_per_page_change = Some(Rc::new(f));
        self
    }

    pub fn on_search_change(mut self, f: impl Fn(String) + 'static) -> Self {
        self.on_search_change = Some(Rc::new(f));
        self
    }

    pub fn on_filter_change(mut self, f: impl Fn(String, String) + 'static) -> Self {
        self.on_filter_change = Some(Rc::new(f));
        self
    }

    pub fn on_sort_change(
        mut self,
        f: impl Fn(Option<String>, Option<SortDirection>) + 'static,
    ) -> Self {
        self.on_sort_change = Some(Rc::new(f));
        self
    }

    /// Invokes the matching callback. Returns false when none is registered.
    pub fn dispatch(&self, event: &BrowserEvent) -> bool {
        let dispatched = match event {
            BrowserEvent::PageChange(page) => self.on_page_change.as_ref().map(|f| f(*page)),
            BrowserEvent::PerPageChange(per_page) => {
                self.on_per_page_change.as_ref().map(|f| f(*per_page))
            }
            BrowserEvent::SearchChange(value) => {
                self.on_search_change.as_ref().map(|f| f(value.clone()))
            }
            BrowserEvent::FilterChange { filter_id, value } => self
                .on_filter_change
                .as_ref()
                .map(|f| f(filter_id.clone(), value.clone())),
            BrowserEvent::SortChange { sort_by, direction } => self
                .on_sort_change
                .as_ref()
                .map(|f| f(sort_by.clone(), *direction)),
        };
        dispatched.is_some()
    }
}

/// What the table body shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyState {
    Rows,
    /// No rows and not busy: the configured empty-state message
    Empty(String),
    /// No rows while busy: only the busy overlay
    Busy,
}

/// Everything the pagination bar needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationView {
    pub current_page: usize,
    pub page_count: usize,
    pub per_page: usize,
    pub total: usize,
    pub from: usize,
    pub to: usize,
    pub page_numbers: Vec<usize>,
    pub can_previous: bool,
    pub can_next: bool,
    /// Controls are not clickable while busy
    pub disabled: bool,
    pub per_page_options: Vec<usize>,
}

/// Bulk action that has been started and still has to run
pub struct PendingBulkAction<T> {
    pub action_id: String,
    pub rows: Vec<T>,
    handler: Option<BulkHandler<T>>,
    settle_owed: Rc<Cell<bool>>,
}

impl<T> PendingBulkAction<T> {
    pub async fn execute(self) -> Result<(), String> {
        match self.handler {
            Some(handler) => handler(self.rows).await,
            None => Ok(()),
        }
    }
}

pub struct DataBrowser<T> {
    rows: Vec<T>,
    columns: Vec<Column<T>>,
    get_row_id: Option<RowIdFn<T>>,
    pagination: PaginationWindow,
    sort: Option<SortState>,
    filters: Vec<FilterDeclaration>,
    filter_values: FilterValues,
    /// Last value committed to / supplied by the caller
    search_value: String,
    search: Option<SearchDebounce>,
    selection: Selection,
    busy: BusyState,
    /// Set when a bulk run ended while the browser was borrowed
    bulk_settle_owed: Rc<Cell<bool>>,
    bulk_actions: Vec<BulkAction<T>>,
    row_actions: Vec<RowAction<T>>,
    settings: DataTableSettings,
    callbacks: DataBrowserCallbacks,
}

impl<T> DataBrowser<T> {
    pub fn new(columns: Vec<Column<T>>, pagination: PaginationWindow) -> Self {
        Self {
            rows: Vec::new(),
            columns,
            get_row_id: None,
            pagination,
            sort: None,
            filters: Vec::new(),
            filter_values: FilterValues::new(),
            search_value: String::new(),
            search: None,
            selection: Selection::new(),
            busy: BusyState::default(),
            bulk_settle_owed: Rc::new(Cell::new(false)),
            bulk_actions: Vec::new(),
            row_actions: Vec::new(),
            settings: DataTableSettings::default(),
            callbacks: DataBrowserCallbacks::default(),
        }
    }

    /// Empty browser on the first page at the table's default page size.
    pub fn from_settings(
        columns: Vec<Column<T>>,
        settings: DataTableSettings,
    ) -> Result<Self, DataTableError> {
        settings.validate()?;
        let pagination = settings.initial_window()?;
        Ok(Self::new(columns, pagination).with_settings(settings))
    }

    pub fn with_rows(mut self, rows: Vec<T>) -> Self {
        self.set_rows(rows);
        self
    }

    pub fn with_settings(mut self, settings: DataTableSettings) -> Self {
        if let Some(search) = &self.search {
            self.search = Some(SearchDebounce::new(
                search.text(),
                u64::from(settings.search_debounce_ms),
            ));
        }
        self.settings = settings;
        self
    }

    /// Row identity. Without it rows are identified by their position on the
    /// current page, so a selection does not follow a row across page loads.
    pub fn with_row_id(mut self, get_row_id: impl Fn(&T, usize) -> String + 'static) -> Self {
        self.get_row_id = Some(Rc::new(get_row_id));
        self
    }

    /// Enables the search box with the caller's current value.
    pub fn with_search(mut self, value: impl Into<String>) -> Self {
        let value = value.into();
        self.search = Some(SearchDebounce::new(
            value.clone(),
            u64::from(self.settings.search_debounce_ms),
        ));
        self.search_value = value;
        self
    }

    pub fn with_filters(mut self, filters: Vec<FilterDeclaration>, values: FilterValues) -> Self {
        self.filters = filters;
        self.filter_values = values;
        self
    }

    pub fn with_sort(mut self, sort: Option<SortState>) -> Self {
        self.set_sorting(sort);
        self
    }

    pub fn with_bulk_actions(mut self, actions: Vec<BulkAction<T>>) -> Self {
        self.bulk_actions = actions;
        self
    }

    pub fn with_row_actions(mut self, actions: Vec<RowAction<T>>) -> Self {
        self.row_actions = actions;
        self
    }

    pub fn with_callbacks(mut self, callbacks: DataBrowserCallbacks) -> Self {
        self.callbacks = callbacks;
        self
    }

    // ---- caller-driven updates ----

    /// Replaces the rows after a refresh. Selected ids that are no longer
    /// present are dropped.
    pub fn set_rows(&mut self, rows: Vec<T>) {
        self.catch_up_bulk_settle();
        self.rows = rows;
        let present: HashSet<String> = self.row_ids().into_iter().collect();
        self.selection.retain_present(&present);
    }

    pub fn apply_page(&mut self, page: ListPage<T>) {
        self.pagination.total = page.total;
        self.set_rows(page.items);
    }

    pub fn set_pagination(&mut self, pagination: PaginationWindow) {
        self.pagination = pagination;
    }

    /// Sort state supplied by the caller. A sort on an unknown or
    /// non-sortable column is dropped.
    pub fn set_sorting(&mut self, sort: Option<SortState>) {
        self.sort = match sort {
            Some(state) if !self.is_sortable(&state.column) => {
                log::warn!("Ignoring sort on non-sortable column: {}", state.column);
                None
            }
            other => other,
        };
    }

    pub fn set_filter_values(&mut self, values: FilterValues) {
        self.filter_values = values;
    }

    /// Search value changed by the caller, not by typing. Never echoed back
    /// through `SearchChange`.
    pub fn set_search_value(&mut self, value: impl Into<String>) {
        let value = value.into();
        if let Some(search) = self.search.as_mut() {
            search.external_update(value.clone());
        }
        self.search_value = value;
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.busy.loading = loading;
    }

    pub fn set_processing(&mut self, processing: bool) {
        self.busy.processing = processing;
    }

    pub fn set_bulk_actions(&mut self, actions: Vec<BulkAction<T>>) {
        self.bulk_actions = actions;
    }

    pub fn set_row_actions(&mut self, actions: Vec<RowAction<T>>) {
        self.row_actions = actions;
    }

    // ---- pagination ----

    pub fn go_to_page(&mut self, page: usize) -> Option<BrowserEvent> {
        if self.is_busy() {
            log::debug!("Page change to {} ignored while busy", page);
            return None;
        }
        let target = self.pagination.clamp(page);
        if target == self.pagination.current_page() {
            return None;
        }
        self.pagination.page = target;
        Some(self.event(BrowserEvent::PageChange(target)))
    }

    pub fn previous_page(&mut self) -> Option<BrowserEvent> {
        let current = self.pagination.current_page();
        self.go_to_page(current.saturating_sub(1))
    }

    pub fn next_page(&mut self) -> Option<BrowserEvent> {
        let current = self.pagination.current_page();
        self.go_to_page(current + 1)
    }

    pub fn first_page(&mut self) -> Option<BrowserEvent> {
        self.go_to_page(1)
    }

    pub fn last_page(&mut self) -> Option<BrowserEvent> {
        let last = self.pagination.page_count();
        self.go_to_page(last)
    }

    /// Only values from the configured per-page options are accepted.
    pub fn change_per_page(&mut self, per_page: usize) -> Option<BrowserEvent> {
        if self.is_busy() {
            log::debug!("Per-page change ignored while busy");
            return None;
        }
        if !self.settings.per_page_options.contains(&per_page) {
            log::warn!("Ignoring unsupported per-page value: {}", per_page);
            return None;
        }
        if per_page == self.pagination.per_page {
            return None;
        }
        self.pagination.per_page = per_page;
        self.pagination.page = 1;
        Some(self.event(BrowserEvent::PerPageChange(per_page)))
    }

    // ---- search ----

    /// Text shown in the search box, `None` when search is disabled
    pub fn search_text(&self) -> Option<&str> {
        self.search.as_ref().map(SearchDebounce::text)
    }

    pub fn search(&self) -> Option<&SearchDebounce> {
        self.search.as_ref()
    }

    /// Local keystroke. Returns the time at which [`Self::poll_search`]
    /// should be called.
    pub fn input_search(&mut self, value: impl Into<String>, now: u64) -> Option<u64> {
        let search = self.search.as_mut()?;
        Some(search.input(value, now))
    }

    /// Commits the typed search once its quiet period has elapsed.
    ///
    /// The committed value is trimmed, the same way the list query sends it.
    pub fn poll_search(&mut self, now: u64) -> Option<BrowserEvent> {
        let typed = self.search.as_mut()?.poll(now)?;
        let value = typed.trim();
        if value == self.search_value.trim() {
            return None;
        }
        let value = value.to_string();
        self.search_value = value.clone();
        self.pagination.page = 1;
        Some(self.event(BrowserEvent::SearchChange(value)))
    }

    // ---- filters ----

    /// Selects `value` in a filter; the empty string clears it.
    pub fn change_filter(&mut self, filter_id: &str, value: &str) -> Option<BrowserEvent> {
        let Some(declaration) = self.filters.iter().find(|f| f.id == filter_id) else {
            log::warn!("Unknown filter: {}", filter_id);
            return None;
        };
        if !declaration.accepts(value) {
            log::warn!("Filter {} does not accept value {:?}", filter_id, value);
            return None;
        }
        if self.filter_values.get(filter_id).unwrap_or("") == value {
            return None;
        }
        self.filter_values.set(filter_id, value);
        self.pagination.page = 1;
        Some(self.event(BrowserEvent::FilterChange {
            filter_id: filter_id.to_string(),
            value: value.to_string(),
        }))
    }

    // ---- sorting ----

    pub fn toggle_sort(&mut self, column_id: &str) -> Option<BrowserEvent> {
        if self.is_busy() {
            log::debug!("Sort change ignored while busy");
            return None;
        }
        if !self.is_sortable(column_id) {
            log::warn!("Column is not sortable: {}", column_id);
            return None;
        }
        self.sort = next_sort(self.sort.as_ref(), column_id);
        let (sort_by, direction) = match &self.sort {
            Some(state) => (Some(state.column.clone()), Some(state.direction)),
            None => (None, None),
        };
        Some(self.event(BrowserEvent::SortChange { sort_by, direction }))
    }

    fn is_sortable(&self, column_id: &str) -> bool {
        self.columns
            .iter()
            .any(|column| column.id == column_id && column.sortable)
    }

    // ---- selection ----

    fn id_of(&self, row: &T, index: usize) -> String {
        match &self.get_row_id {
            Some(get_row_id) => get_row_id(row, index),
            None => index.to_string(),
        }
    }

    pub fn row_ids(&self) -> Vec<String> {
        self.visible_rows().into_iter().map(|(id, _)| id).collect()
    }

    pub fn find_row(&self, row_id: &str) -> Option<&T> {
        self.rows
            .iter()
            .enumerate()
            .find(|(index, row)| self.id_of(row, *index) == row_id)
            .map(|(_, row)| row)
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn is_selected(&self, row_id: &str) -> bool {
        self.selection.contains(row_id)
    }

    pub fn toggle_row(&mut self, row_id: &str) -> bool {
        if self.is_busy() || self.find_row(row_id).is_none() {
            return false;
        }
        self.selection.toggle(row_id);
        true
    }

    pub fn set_all_selected(&mut self, selected: bool) -> bool {
        if self.is_busy() {
            return false;
        }
        if selected {
            let ids = self.row_ids();
            self.selection.select_all(ids.iter().map(String::as_str));
        } else {
            self.selection.clear();
        }
        true
    }

    /// Header checkbox click: selects every row unless all are selected already.
    pub fn toggle_all(&mut self) -> bool {
        let all_selected = self.header_checkbox() == HeaderCheckboxState::Checked;
        self.set_all_selected(!all_selected)
    }

    pub fn header_checkbox(&self) -> HeaderCheckboxState {
        self.selection.header_state(&self.row_ids())
    }

    // ---- bulk actions ----

    pub fn bulk_actions(&self) -> &[BulkAction<T>] {
        &self.bulk_actions
    }

    pub fn bulk_actions_enabled(&self) -> bool {
        !self.selection.is_empty() && !self.busy().bulk_in_flight
    }

    /// Ends a bulk action: clears the selection and the busy flag, whatever
    /// the handler's outcome was.
    pub fn settle_bulk_action(&mut self) {
        self.selection.clear();
        self.busy.bulk_in_flight = false;
        self.bulk_settle_owed.set(false);
    }

    /// Applies a settle that was deferred because the browser was borrowed
    /// when its bulk run ended. Until then the run already counts as over in
    /// [`Self::busy`].
    pub fn catch_up_bulk_settle(&mut self) {
        if self.bulk_settle_owed.get() {
            log::debug!("Applying deferred bulk action settle");
            self.settle_bulk_action();
        }
    }

    // ---- row actions ----

    /// Actions shown in the menu of `row`
    pub fn row_actions_for(&self, row: &T) -> Vec<&RowAction<T>> {
        self.row_actions
            .iter()
            .filter(|action| action.is_visible(row))
            .collect()
    }

    pub fn row_action(&self, action_id: &str) -> Option<&RowAction<T>> {
        self.row_actions.iter().find(|action| action.id == action_id)
    }

    pub fn trigger_row_action(&self, row_id: &str, action_id: &str) -> RowActionOutcome {
        let Some(row) = self.find_row(row_id) else {
            log::warn!("Row action {} on unknown row {}", action_id, row_id);
            return RowActionOutcome::Ignored;
        };
        match self.row_action(action_id) {
            Some(action) => action.trigger(row),
            None => {
                log::warn!("Unknown row action: {}", action_id);
                RowActionOutcome::Ignored
            }
        }
    }

    // ---- view model ----

    pub fn is_busy(&self) -> bool {
        self.busy().is_busy()
    }

    pub fn busy(&self) -> BusyState {
        BusyState {
            bulk_in_flight: self.busy.bulk_in_flight && !self.bulk_settle_owed.get(),
            ..self.busy
        }
    }

    pub fn pagination(&self) -> &PaginationWindow {
        &self.pagination
    }

    pub fn sort(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    pub fn filters(&self) -> &[FilterDeclaration] {
        &self.filters
    }

    pub fn filter_values(&self) -> &FilterValues {
        &self.filter_values
    }

    pub fn settings(&self) -> &DataTableSettings {
        &self.settings
    }

    pub fn callbacks(&self) -> &DataBrowserCallbacks {
        &self.callbacks
    }

    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    /// Selection column, caller columns, then the actions column when any
    /// row action exists.
    pub fn display_columns(&self) -> Vec<DisplayColumn> {
        let mut columns = Vec::with_capacity(self.columns.len() + 2);
        columns.push(DisplayColumn::selection());
        for column in &self.columns {
            let sort = self
                .sort
                .as_ref()
                .filter(|state| state.is_on(&column.id))
                .map(|state| state.direction);
            columns.push(DisplayColumn::data(column, sort));
        }
        if !self.row_actions.is_empty() {
            columns.push(DisplayColumn::actions());
        }
        columns
    }

    /// Rows with their ids, in display order. With manual sorting this is the
    /// order the caller supplied; otherwise a stable local sort is applied.
    pub fn visible_rows(&self) -> Vec<(String, &T)> {
        let mut rows: Vec<(String, &T)> = self
            .rows
            .iter()
            .enumerate()
            .map(|(index, row)| (self.id_of(row, index), row))
            .collect();

        if self.settings.manual_sorting {
            return rows;
        }
        let Some(sort) = &self.sort else {
            return rows;
        };
        let Some(column) = self.columns.iter().find(|c| c.id == sort.column) else {
            return rows;
        };
        if column.has_comparator() {
            rows.sort_by(|(_, a), (_, b)| {
                let cmp = column.compare(a, b);
                match sort.direction {
                    SortDirection::Asc => cmp,
                    SortDirection::Desc => cmp.reverse(),
                }
            });
        } else {
            // Each cell is rendered once instead of once per comparison.
            match sort.direction {
                SortDirection::Asc => rows.sort_by_cached_key(|(_, row)| column.sort_key(row)),
                SortDirection::Desc => {
                    rows.sort_by_cached_key(|(_, row)| Reverse(column.sort_key(row)))
                }
            }
        }
        rows
    }

    pub fn cell(&self, row: &T, column_id: &str) -> Option<String> {
        self.columns
            .iter()
            .find(|column| column.id == column_id)
            .map(|column| column.render_cell(row))
    }

    pub fn body(&self) -> BodyState {
        if !self.rows.is_empty() {
            BodyState::Rows
        } else if self.is_busy() {
            BodyState::Busy
        } else {
            BodyState::Empty(self.settings.empty_message.clone())
        }
    }

    pub fn pagination_view(&self) -> PaginationView {
        let disabled = self.is_busy();
        let (from, to) = self.pagination.range();
        PaginationView {
            current_page: self.pagination.current_page(),
            page_count: self.pagination.page_count(),
            per_page: self.pagination.per_page,
            total: self.pagination.total,
            from,
            to,
            page_numbers: self.pagination.page_numbers(),
            can_previous: self.pagination.has_previous() && !disabled,
            can_next: self.pagination.has_next() && !disabled,
            disabled,
            per_page_options: self.settings.per_page_options.clone(),
        }
    }

    /// Query for the remote list endpoint reflecting the current state
    pub fn list_query(&self) -> ListQuery {
        ListQuery::new(self.pagination.current_page(), self.pagination.per_page)
            .with_sort_state(self.sort.as_ref())
            .with_search(&self.search_value)
            .with_filters(&self.filter_values)
    }

    /// Dispatches an event to the registered callbacks.
    pub fn emit(&self, event: Option<BrowserEvent>) -> bool {
        match event {
            Some(event) => self.callbacks.dispatch(&event),
            None => false,
        }
    }

    fn event(&self, event: BrowserEvent) -> BrowserEvent {
        log::debug!("Data browser event: {:?}", event);
        event
    }
}

impl<T: Clone> DataBrowser<T> {
    /// Selected rows in display order
    pub fn selected_rows(&self) -> Vec<T> {
        self.visible_rows()
            .into_iter()
            .filter(|(id, _)| self.selection.contains(id))
            .map(|(_, row)| row.clone())
            .collect()
    }

    /// Marks a bulk action as in flight and captures the selected rows.
    ///
    /// Returns `None` without touching any state when nothing is selected,
    /// the action is unknown or another bulk action is still running.
    pub fn start_bulk_action(&mut self, action_id: &str) -> Option<PendingBulkAction<T>> {
        self.catch_up_bulk_settle();
        if self.busy.bulk_in_flight {
            log::warn!("Bulk action {} ignored: another one is running", action_id);
            return None;
        }
        if self.selection.is_empty() {
            log::debug!("Bulk action {} ignored: nothing selected", action_id);
            return None;
        }
        let Some(action) = self.bulk_actions.iter().find(|a| a.id == action_id) else {
            log::warn!("Unknown bulk action: {}", action_id);
            return None;
        };
        let handler = action.handler_fn();
        let rows = self.selected_rows();
        self.busy.bulk_in_flight = true;
        log::debug!("Bulk action {} on {} rows", action_id, rows.len());
        Some(PendingBulkAction {
            action_id: action_id.to_string(),
            rows,
            handler,
            settle_owed: self.bulk_settle_owed.clone(),
        })
    }
}

/// Runs a bulk action end to end.
///
/// Returns `None` when the action did not start, otherwise the handler's
/// result. Selection and busy state are reset when the returned future
/// completes or is dropped, whether the handler succeeded or not.
pub async fn run_bulk_action<T: Clone>(
    browser: &RefCell<DataBrowser<T>>,
    action_id: &str,
) -> Option<Result<(), String>> {
    run_bulk_action_with(browser, action_id, || {}).await
}

/// Same as [`run_bulk_action`], calling `notify` after the action starts and
/// after it settles.
pub async fn run_bulk_action_with<T: Clone, F: Fn()>(
    browser: &RefCell<DataBrowser<T>>,
    action_id: &str,
    notify: F,
) -> Option<Result<(), String>> {
    let pending = browser.borrow_mut().start_bulk_action(action_id)?;
    let _settle = SettleGuard {
        browser,
        settle_owed: pending.settle_owed.clone(),
        notify: &notify,
    };
    notify();
    Some(pending.execute().await)
}

struct SettleGuard<'a, T, F: Fn()> {
    browser: &'a RefCell<DataBrowser<T>>,
    settle_owed: Rc<Cell<bool>>,
    notify: &'a F,
}

impl<T, F: Fn()> Drop for SettleGuard<'_, T, F> {
    fn drop(&mut self) {
        match self.browser.try_borrow_mut() {
            Ok(mut browser) => browser.settle_bulk_action(),
            Err(_) => {
                log::warn!("Data browser borrowed when bulk action ended; settle deferred");
                self.settle_owed.set(true);
            }
        }
        (self.notify)();
    }
}
