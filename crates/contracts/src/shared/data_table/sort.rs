use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    /// Sort indicator for a column header
    pub fn indicator(&self) -> &'static str {
        match self {
            SortDirection::Asc => " ▲",
            SortDirection::Desc => " ▼",
        }
    }
}

/// Single active sort. Multi-column sort is not supported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub column: String,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(column: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column: column.into(),
            direction,
        }
    }

    pub fn is_on(&self, column: &str) -> bool {
        self.column == column
    }
}

/// Next sort state after a click on the `clicked` column header.
///
/// On the same column the cycle is none → asc → desc → none. Clicking another
/// column always starts over at ascending on that column.
pub fn next_sort(current: Option<&SortState>, clicked: &str) -> Option<SortState> {
    match current {
        Some(state) if state.is_on(clicked) => match state.direction {
            SortDirection::Asc => Some(SortState::new(clicked, SortDirection::Desc)),
            SortDirection::Desc => None,
        },
        _ => Some(SortState::new(clicked, SortDirection::Asc)),
    }
}
