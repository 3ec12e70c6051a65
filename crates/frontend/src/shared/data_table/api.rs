//! Client for paginated list endpoints

use contracts::shared::data_table::{ListPage, ListQuery};
use gloo_net::http::Request;
use serde::de::DeserializeOwned;

/// Appends the encoded list query to `endpoint`.
pub fn list_url(endpoint: &str, query: &ListQuery) -> Result<String, String> {
    let query_string = query.to_query_string().map_err(|e| e.to_string())?;
    let separator = if endpoint.contains('?') { '&' } else { '?' };
    Ok(format!("{}{}{}", endpoint, separator, query_string))
}

/// Fetches one page of records from a list endpoint.
pub async fn fetch_list_page<T: DeserializeOwned>(
    endpoint: &str,
    query: &ListQuery,
) -> Result<ListPage<T>, String> {
    let url = list_url(endpoint, query)?;
    log::debug!("Loading list page: {}", url);

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if response.status() != 200 {
        return Err(format!("Server error: {}", response.status()));
    }

    response
        .json::<ListPage<T>>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}
