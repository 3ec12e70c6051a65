use thiserror::Error;

/// Errors raised while building data table contracts
#[derive(Error, Debug)]
pub enum DataTableError {
    #[error("Invalid per-page value: {0}")]
    InvalidPerPage(usize),

    #[error("Invalid table settings: {0}")]
    InvalidSettings(String),

    #[error("Failed to parse table settings: {0}")]
    SettingsParse(#[from] serde_json::Error),

    #[error("Failed to encode list query: {0}")]
    QueryEncode(serde_qs::Error),

    #[error("Failed to decode list query: {0}")]
    QueryDecode(serde_qs::Error),
}
