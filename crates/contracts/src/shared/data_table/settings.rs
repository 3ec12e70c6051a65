use super::{DataTableError, PaginationWindow};
use serde::{Deserialize, Serialize};

fn default_search_debounce_ms() -> u32 {
    300
}

fn default_per_page_options() -> Vec<usize> {
    vec![10, 25, 50, 100]
}

fn default_per_page() -> usize {
    25
}

fn default_manual_sorting() -> bool {
    true
}

fn default_empty_message() -> String {
    "No results found.".to_string()
}

/// Per-table settings, stored as JSON alongside the other form settings
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DataTableSettings {
    /// Quiet period before a typed search is committed
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u32,
    #[serde(default = "default_per_page_options")]
    pub per_page_options: Vec<usize>,
    /// Page size of a freshly opened table; one of `per_page_options`
    #[serde(default = "default_per_page")]
    pub default_per_page: usize,
    /// When true the rows are sorted by the data source, never locally
    #[serde(default = "default_manual_sorting")]
    pub manual_sorting: bool,
    #[serde(default = "default_empty_message")]
    pub empty_message: String,
}

impl Default for DataTableSettings {
    fn default() -> Self {
        Self {
            search_debounce_ms: default_search_debounce_ms(),
            per_page_options: default_per_page_options(),
            default_per_page: default_per_page(),
            manual_sorting: default_manual_sorting(),
            empty_message: default_empty_message(),
        }
    }
}

impl DataTableSettings {
    /// Parses and validates a settings document. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, DataTableError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), DataTableError> {
        if self.per_page_options.is_empty() {
            return Err(DataTableError::InvalidSettings(
                "per_page_options must not be empty".to_string(),
            ));
        }
        if self.per_page_options.contains(&0) {
            return Err(DataTableError::InvalidSettings(
                "per_page_options must not contain 0".to_string(),
            ));
        }
        if self.default_per_page == 0 {
            return Err(DataTableError::InvalidPerPage(self.default_per_page));
        }
        if !self.per_page_options.contains(&self.default_per_page) {
            return Err(DataTableError::InvalidSettings(format!(
                "default_per_page {} is not one of per_page_options",
                self.default_per_page
            )));
        }
        Ok(())
    }

    /// First page of an empty table at the default page size.
    pub fn initial_window(&self) -> Result<PaginationWindow, DataTableError> {
        PaginationWindow::new(1, self.default_per_page, 0)
    }
}
