//! Leptos glue for [`DataBrowser`]
//!
//! The browser lives in a local `StoredValue`; a revision signal is bumped
//! after every mutation so that views reading through
//! [`DataBrowserHandle::with`] re-run. Callbacks are dispatched only after the
//! browser borrow is released, so a callback may freely call back into the
//! handle (e.g. `set_loading(true)` before starting a fetch).
//!
//! Browser clock and timers are only touched by [`DataBrowserHandle::input_search`]
//! and [`DataBrowserHandle::run_bulk_action`]; the `*_at` and
//! [`DataBrowserHandle::execute_bulk_action`] variants take the time or the
//! executor from the caller.
//!
//! ```rust,ignore
//! let table = DataBrowserHandle::new(browser);
//! view! {
//!     <input
//!         prop:value=move || table.with(|b| b.search_text().unwrap_or_default().to_string())
//!         on:input=move |ev| table.input_search(event_target_value(&ev))
//!     />
//! }
//! ```

use super::actions::{BulkAction, RowActionOutcome};
use super::browser::{run_bulk_action_with, BrowserEvent, DataBrowser};
use contracts::shared::data_table::{FilterValues, ListPage, PaginationWindow, SortState};
use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

type SharedBrowser<T> = Rc<RefCell<DataBrowser<T>>>;

fn now_ms() -> u64 {
    js_sys::Date::now() as u64
}

/// Runs `op`, bumps the revision and dispatches the resulting event.
fn apply<T, R>(
    browser: &SharedBrowser<T>,
    revision: RwSignal<u64>,
    op: impl FnOnce(&mut DataBrowser<T>) -> (Option<BrowserEvent>, R),
) -> R {
    let (event, result, callbacks) = {
        let mut browser = browser.borrow_mut();
        browser.catch_up_bulk_settle();
        let (event, result) = op(&mut browser);
        (event, result, browser.callbacks().clone())
    };
    revision.update(|r| *r += 1);
    if let Some(event) = event {
        callbacks.dispatch(&event);
    }
    result
}

pub struct DataBrowserHandle<T: 'static> {
    browser: StoredValue<SharedBrowser<T>, LocalStorage>,
    search_timer: StoredValue<Option<Timeout>, LocalStorage>,
    revision: RwSignal<u64>,
}

impl<T: 'static> Clone for DataBrowserHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for DataBrowserHandle<T> {}

impl<T: Clone + 'static> DataBrowserHandle<T> {
    pub fn new(browser: DataBrowser<T>) -> Self {
        Self {
            browser: StoredValue::new_local(Rc::new(RefCell::new(browser))),
            search_timer: StoredValue::new_local(None),
            revision: RwSignal::new(0),
        }
    }

    fn shared(&self) -> SharedBrowser<T> {
        self.browser.get_value()
    }

    /// Number of mutations so far, read without subscribing
    pub fn revision(&self) -> u64 {
        self.revision.get_untracked()
    }

    /// Reads the browser, subscribing the current reactive scope to changes.
    pub fn with<R>(&self, f: impl FnOnce(&DataBrowser<T>) -> R) -> R {
        self.revision.track();
        let browser = self.shared();
        let browser = browser.borrow();
        f(&browser)
    }

    fn emit(&self, op: impl FnOnce(&mut DataBrowser<T>) -> Option<BrowserEvent>) {
        apply(&self.shared(), self.revision, |b| (op(b), ()));
    }

    fn mutate(&self, op: impl FnOnce(&mut DataBrowser<T>)) {
        apply(&self.shared(), self.revision, |b| {
            op(b);
            (None, ())
        });
    }

    pub fn go_to_page(&self, page: usize) {
        self.emit(|b| b.go_to_page(page));
    }

    pub fn previous_page(&self) {
        self.emit(|b| b.previous_page());
    }

    pub fn next_page(&self) {
        self.emit(|b| b.next_page());
    }

    pub fn first_page(&self) {
        self.emit(|b| b.first_page());
    }

    pub fn last_page(&self) {
        self.emit(|b| b.last_page());
    }

    pub fn change_per_page(&self, per_page: usize) {
        self.emit(|b| b.change_per_page(per_page));
    }

    pub fn change_filter(&self, filter_id: &str, value: &str) {
        self.emit(|b| b.change_filter(filter_id, value));
    }

    pub fn toggle_sort(&self, column_id: &str) {
        self.emit(|b| b.toggle_sort(column_id));
    }

    pub fn toggle_row(&self, row_id: &str) {
        self.mutate(|b| {
            b.toggle_row(row_id);
        });
    }

    pub fn toggle_all(&self) {
        self.mutate(|b| {
            b.toggle_all();
        });
    }

    /// Keystroke in the search box. (Re)arms the debounce timer; dropping the
    /// previous `Timeout` cancels it.
    pub fn input_search(&self, value: String) {
        let now = now_ms();
        let Some(deadline) = self.input_search_at(value, now) else {
            return;
        };

        let handle = *self;
        let delay = u32::try_from(deadline.saturating_sub(now)).unwrap_or(u32::MAX);
        let timeout = Timeout::new(delay, move || {
            // The timer only fires once the deadline has passed.
            handle.poll_search_at(now_ms().max(deadline));
        });
        self.search_timer.set_value(Some(timeout));
    }

    /// Keystroke at `now` without arming a timer. Returns the deadline to
    /// poll at.
    pub fn input_search_at(&self, value: String, now: u64) -> Option<u64> {
        apply(&self.shared(), self.revision, |b| {
            (None, b.input_search(value, now))
        })
    }

    pub fn poll_search_at(&self, now: u64) {
        self.emit(|b| b.poll_search(now));
    }

    pub fn set_search_value(&self, value: String) {
        self.search_timer.set_value(None);
        self.mutate(|b| b.set_search_value(value));
    }

    pub fn set_rows(&self, rows: Vec<T>) {
        self.mutate(|b| b.set_rows(rows));
    }

    pub fn apply_page(&self, page: ListPage<T>) {
        self.mutate(|b| b.apply_page(page));
    }

    pub fn set_pagination(&self, pagination: PaginationWindow) {
        self.mutate(|b| b.set_pagination(pagination));
    }

    pub fn set_sorting(&self, sort: Option<SortState>) {
        self.mutate(|b| b.set_sorting(sort));
    }

    pub fn set_filter_values(&self, values: FilterValues) {
        self.mutate(|b| b.set_filter_values(values));
    }

    pub fn set_loading(&self, loading: bool) {
        self.mutate(|b| b.set_loading(loading));
    }

    pub fn set_processing(&self, processing: bool) {
        self.mutate(|b| b.set_processing(processing));
    }

    pub fn set_bulk_actions(&self, actions: Vec<BulkAction<T>>) {
        self.mutate(|b| b.set_bulk_actions(actions));
    }

    /// Starts a bulk action in the background. Handler errors are logged; the
    /// selection and busy state are reset either way.
    pub fn run_bulk_action(&self, action_id: String) {
        let handle = *self;
        leptos::task::spawn_local(async move {
            match handle.execute_bulk_action(&action_id).await {
                Some(Err(e)) => log::error!("Bulk action {} failed: {}", action_id, e),
                Some(Ok(())) => log::debug!("Bulk action {} completed", action_id),
                None => {}
            }
        });
    }

    /// Runs a bulk action on the current task, bumping the revision when it
    /// starts and when it settles.
    pub async fn execute_bulk_action(&self, action_id: &str) -> Option<Result<(), String>> {
        let browser = self.shared();
        let revision = self.revision;
        let notify = move || revision.update(|r| *r += 1);
        run_bulk_action_with(browser.as_ref(), action_id, notify).await
    }

    /// Navigation outcomes are returned to the host, which owns routing.
    ///
    /// The handler runs after the browser borrow is released.
    pub fn trigger_row_action(&self, row_id: &str, action_id: &str) -> RowActionOutcome {
        let browser = self.shared();
        let found = {
            let browser = browser.borrow();
            let row = browser.find_row(row_id).cloned();
            let action = browser.row_action(action_id).cloned();
            row.zip(action)
        };
        match found {
            Some((row, action)) => action.trigger(&row),
            None => {
                log::warn!("Row action {} on row {} not found", action_id, row_id);
                RowActionOutcome::Ignored
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data_table::{Column, DataBrowserCallbacks};
    use std::cell::Cell;

    #[derive(Debug, Clone, PartialEq)]
    struct Ticket {
        id: u32,
        subject: String,
    }

    fn tickets() -> Vec<Ticket> {
        ["Printer jammed", "VPN drops", "Mailbox full"]
            .iter()
            .zip(1u32..)
            .map(|(subject, id)| Ticket {
                id,
                subject: subject.to_string(),
            })
            .collect()
    }

    fn browser(callbacks: DataBrowserCallbacks) -> DataBrowser<Ticket> {
        let columns =
            vec![Column::new("subject", "Subject", |t: &Ticket| t.subject.clone()).sortable()];
        DataBrowser::new(columns, PaginationWindow::new(1, 10, 25).unwrap())
            .with_row_id(|t: &Ticket, _| t.id.to_string())
            .with_rows(tickets())
            .with_search("")
            .with_callbacks(callbacks)
    }

    #[test]
    fn test_search_commits_through_handle() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let handle = DataBrowserHandle::new(browser(
            DataBrowserCallbacks::new().on_search_change(move |v| sink.borrow_mut().push(v)),
        ));

        assert_eq!(handle.input_search_at("vpn".to_string(), 1_000), Some(1_300));
        handle.poll_search_at(1_200);
        assert!(seen.borrow().is_empty());

        handle.poll_search_at(1_300);
        assert_eq!(*seen.borrow(), vec!["vpn".to_string()]);
        assert_eq!(handle.with(|b| b.list_query().search), Some("vpn".to_string()));
    }

    #[test]
    fn test_external_search_value_suppresses_pending_commit() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let handle = DataBrowserHandle::new(browser(
            DataBrowserCallbacks::new().on_search_change(move |v| sink.borrow_mut().push(v)),
        ));

        handle.input_search_at("vpn".to_string(), 0);
        handle.set_search_value("printer".to_string());
        handle.poll_search_at(10_000);

        assert!(seen.borrow().is_empty());
        assert_eq!(
            handle.with(|b| b.search_text().map(str::to_string)),
            Some("printer".to_string())
        );
    }

    #[test]
    fn test_callback_can_call_back_into_handle() {
        let slot: Rc<Cell<Option<DataBrowserHandle<Ticket>>>> = Rc::new(Cell::new(None));
        let pages = Rc::new(RefCell::new(Vec::new()));
        let callbacks = DataBrowserCallbacks::new().on_page_change({
            let slot = slot.clone();
            let pages = pages.clone();
            move |page| {
                pages.borrow_mut().push(page);
                if let Some(handle) = slot.get() {
                    handle.set_loading(true);
                }
            }
        });
        let handle = DataBrowserHandle::new(browser(callbacks));
        slot.set(Some(handle));

        handle.go_to_page(2);
        assert_eq!(*pages.borrow(), vec![2]);
        assert!(handle.with(|b| b.is_busy()));

        // Pagination is disabled while the page loads.
        handle.go_to_page(3);
        assert_eq!(*pages.borrow(), vec![2]);
    }

    #[test]
    fn test_every_mutation_bumps_revision() {
        let handle = DataBrowserHandle::new(browser(DataBrowserCallbacks::new()));
        let start = handle.revision();
        handle.toggle_row("2");
        handle.set_loading(true);
        assert_eq!(handle.revision(), start + 2);
        assert!(handle.with(|b| b.is_selected("2")));
    }

    #[tokio::test]
    async fn test_bulk_action_bumps_revision_on_start_and_settle() {
        let observed = Rc::new(Cell::new(None));
        let slot: Rc<Cell<Option<DataBrowserHandle<Ticket>>>> = Rc::new(Cell::new(None));
        let handle = DataBrowserHandle::new(browser(DataBrowserCallbacks::new()));
        slot.set(Some(handle));

        let action = BulkAction::new("close", "Close selected").handler({
            let slot = slot.clone();
            let observed = observed.clone();
            move |rows: Vec<Ticket>| {
                let slot = slot.clone();
                let observed = observed.clone();
                async move {
                    if let Some(handle) = slot.get() {
                        let busy = handle.with(|b| b.is_busy());
                        observed.set(Some((rows.len(), handle.revision(), busy)));
                    }
                    Err::<(), String>("Server error: 500".to_string())
                }
            }
        });
        handle.set_bulk_actions(vec![action]);
        handle.toggle_all();
        let start = handle.revision();

        let outcome = handle.execute_bulk_action("close").await;
        assert_eq!(outcome, Some(Err("Server error: 500".to_string())));
        assert_eq!(observed.get(), Some((3, start + 1, true)));
        assert_eq!(handle.revision(), start + 2);
        assert!(handle.with(|b| b.selection().is_empty() && !b.is_busy()));
    }
}
