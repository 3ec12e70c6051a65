use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

pub type BulkActionFuture = Pin<Box<dyn Future<Output = Result<(), String>>>>;
pub type BulkHandler<T> = Rc<dyn Fn(Vec<T>) -> BulkActionFuture>;
pub type RowHandler<T> = Rc<dyn Fn(&T)>;
pub type RowHref<T> = Rc<dyn Fn(&T) -> String>;
pub type RowPredicate<T> = Rc<dyn Fn(&T) -> bool>;

/// Operation applied to every selected row at once
pub struct BulkAction<T> {
    pub id: String,
    pub label: String,
    handler: Option<BulkHandler<T>>,
}

impl<T> Clone for BulkAction<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            label: self.label.clone(),
            handler: self.handler.clone(),
        }
    }
}

impl<T: 'static> BulkAction<T> {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            handler: None,
        }
    }

    pub fn handler<F, Fut>(mut self, handler: F) -> Self
    where
        F: Fn(Vec<T>) -> Fut + 'static,
        Fut: Future<Output = Result<(), String>> + 'static,
    {
        self.handler = Some(Rc::new(move |rows: Vec<T>| -> BulkActionFuture {
            Box::pin(handler(rows))
        }));
        self
    }
}

impl<T> BulkAction<T> {
    pub fn has_handler(&self) -> bool {
        self.handler.is_some()
    }

    pub(crate) fn handler_fn(&self) -> Option<BulkHandler<T>> {
        self.handler.clone()
    }
}

/// What a row action click resolved to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowActionOutcome {
    /// The host should navigate to this URL
    Navigate(String),
    /// The action handler ran
    Handled,
    /// Neither a navigation target nor a handler is set, or the action is hidden
    Ignored,
}

/// Operation scoped to one row, shown in the row's action menu
pub struct RowAction<T> {
    pub id: String,
    pub label: String,
    href: Option<RowHref<T>>,
    handler: Option<RowHandler<T>>,
    visible: Option<RowPredicate<T>>,
}

impl<T> Clone for RowAction<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            label: self.label.clone(),
            href: self.href.clone(),
            handler: self.handler.clone(),
            visible: self.visible.clone(),
        }
    }
}

impl<T> RowAction<T> {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            href: None,
            handler: None,
            visible: None,
        }
    }

    pub fn href(mut self, href: impl Fn(&T) -> String + 'static) -> Self {
        self.href = Some(Rc::new(href));
        self
    }

    pub fn handler(mut self, handler: impl Fn(&T) + 'static) -> Self {
        self.handler = Some(Rc::new(handler));
        self
    }

    pub fn visible_when(mut self, predicate: impl Fn(&T) -> bool + 'static) -> Self {
        self.visible = Some(Rc::new(predicate));
        self
    }

    pub fn is_visible(&self, row: &T) -> bool {
        self.visible.as_ref().map_or(true, |visible| visible(row))
    }

    pub fn href_for(&self, row: &T) -> Option<String> {
        self.href.as_ref().map(|href| href(row))
    }

    /// Runs the action for `row`. A navigation target wins over a handler.
    pub fn trigger(&self, row: &T) -> RowActionOutcome {
        if !self.is_visible(row) {
            return RowActionOutcome::Ignored;
        }
        if let Some(url) = self.href_for(row) {
            return RowActionOutcome::Navigate(url);
        }
        match &self.handler {
            Some(handler) => {
                handler(row);
                RowActionOutcome::Handled
            }
            None => RowActionOutcome::Ignored,
        }
    }
}
