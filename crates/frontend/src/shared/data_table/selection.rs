use std::collections::HashSet;

/// State of the "select all" checkbox in the table header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderCheckboxState {
    Unchecked,
    Checked,
    /// Some but not all rows are selected
    Indeterminate,
}

/// Selected row ids
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: HashSet<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn toggle(&mut self, id: &str) {
        if !self.ids.remove(id) {
            self.ids.insert(id.to_string());
        }
    }

    pub fn select_all<'a>(&mut self, ids: impl IntoIterator<Item = &'a str>) {
        self.ids.extend(ids.into_iter().map(str::to_string));
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Drops every id that is not in `present`.
    pub fn retain_present(&mut self, present: &HashSet<String>) {
        self.ids.retain(|id| present.contains(id));
    }

    pub fn header_state(&self, row_ids: &[String]) -> HeaderCheckboxState {
        if row_ids.is_empty() {
            return HeaderCheckboxState::Unchecked;
        }
        let selected = row_ids.iter().filter(|id| self.ids.contains(*id)).count();
        if selected == 0 {
            HeaderCheckboxState::Unchecked
        } else if selected == row_ids.len() {
            HeaderCheckboxState::Checked
        } else {
            HeaderCheckboxState::Indeterminate
        }
    }
}
