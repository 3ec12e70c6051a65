use super::{DataTableError, DataTableSettings, FilterValues, SortDirection, SortState};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Parameters sent to a remote list endpoint
///
/// Serialized as `page=2&perPage=25&sortBy=subject&sortDirection=asc&search=...&filter[status]=open`.
/// Unset sort, blank search and empty filters are omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    #[serde(default)]
    pub page: usize,
    #[serde(default)]
    pub per_page: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_direction: Option<SortDirection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub filter: BTreeMap<String, String>,
}

impl ListQuery {
    pub fn new(page: usize, per_page: usize) -> Self {
        Self {
            page,
            per_page,
            sort_by: None,
            sort_direction: None,
            search: None,
            filter: BTreeMap::new(),
        }
    }

    pub fn with_sort(mut self, column: impl Into<String>, direction: SortDirection) -> Self {
        self.sort_by = Some(column.into());
        self.sort_direction = Some(direction);
        self
    }

    pub fn with_sort_state(self, sort: Option<&SortState>) -> Self {
        match sort {
            Some(state) => self.with_sort(state.column.clone(), state.direction),
            None => self,
        }
    }

    /// Blank (whitespace-only) search text is not sent.
    pub fn with_search(mut self, search: &str) -> Self {
        let trimmed = search.trim();
        self.search = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self
    }

    pub fn with_filters(mut self, filters: &FilterValues) -> Self {
        self.filter = filters.to_map();
        self
    }

    pub fn sort(&self) -> Option<SortState> {
        match (&self.sort_by, self.sort_direction) {
            (Some(column), Some(direction)) => Some(SortState::new(column.clone(), direction)),
            _ => None,
        }
    }

    pub fn to_query_string(&self) -> Result<String, DataTableError> {
        serde_qs::to_string(self).map_err(DataTableError::QueryEncode)
    }

    /// Decodes a host URL query. A missing or zero `page` means the first
    /// page; a missing or zero `perPage` falls back to the table's default.
    pub fn from_query_string(
        query: &str,
        settings: &DataTableSettings,
    ) -> Result<Self, DataTableError> {
        let mut parsed: Self = serde_qs::from_str(query.trim_start_matches('?'))
            .map_err(DataTableError::QueryDecode)?;
        parsed.page = parsed.page.max(1);
        if parsed.per_page == 0 {
            parsed.per_page = settings.default_per_page;
        }
        parsed.filter.retain(|_, v| !v.is_empty());
        Ok(parsed)
    }
}

/// One page of records as returned by a list endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListPage<T> {
    pub items: Vec<T>,
    pub total: usize,
}

impl<T> ListPage<T> {
    pub fn new(items: Vec<T>, total: usize) -> Self {
        Self { items, total }
    }

    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_query_string() {
        let query = ListQuery::new(2, 25);
        assert_eq!(query.to_query_string().unwrap(), "page=2&perPage=25");
    }

    #[test]
    fn test_blank_search_and_empty_filters_are_elided() {
        let filters = FilterValues::new().with("status", "").with("priority", "high");
        let query = ListQuery::new(1, 10).with_search("   ").with_filters(&filters);

        assert_eq!(query.search, None);
        assert_eq!(query.filter.len(), 1);

        let encoded = query.to_query_string().unwrap();
        assert!(!encoded.contains("search"));
        assert!(!encoded.contains("status"));
        assert!(encoded.contains("priority"));
    }

    #[test]
    fn test_sort_is_sent_as_pair() {
        let query = ListQuery::new(1, 10).with_sort("created_at", SortDirection::Desc);
        let encoded = query.to_query_string().unwrap();
        assert!(encoded.contains("sortBy=created_at"));
        assert!(encoded.contains("sortDirection=desc"));
        assert_eq!(
            query.sort(),
            Some(SortState::new("created_at", SortDirection::Desc))
        );
    }

    #[test]
    fn test_decodes_host_query_string() {
        let query = ListQuery::from_query_string(
            "?page=3&perPage=50&sortBy=subject&sortDirection=asc&search=printer",
            &DataTableSettings::default(),
        )
        .unwrap();
        assert_eq!(query.page, 3);
        assert_eq!(query.per_page, 50);
        assert_eq!(query.search.as_deref(), Some("printer"));
        assert_eq!(query.sort(), Some(SortState::new("subject", SortDirection::Asc)));
        assert!(query.filter.is_empty());
    }

    #[test]
    fn test_decode_failure_is_reported() {
        let settings = DataTableSettings::default();
        let err = ListQuery::from_query_string("page=abc&perPage=10", &settings).unwrap_err();
        assert!(matches!(err, DataTableError::QueryDecode(_)));
    }

    #[test]
    fn test_missing_paging_falls_back_to_settings() {
        let settings = DataTableSettings {
            default_per_page: 50,
            ..DataTableSettings::default()
        };
        let query = ListQuery::from_query_string("search=vpn", &settings).unwrap();
        assert_eq!(query.page, 1);
        assert_eq!(query.per_page, 50);

        let query = ListQuery::from_query_string("page=0&perPage=0", &settings).unwrap();
        assert_eq!((query.page, query.per_page), (1, 50));
    }
}
