//! Listing URL construction for the character endpoint.

use serde::{Deserialize, Serialize};

use crate::state::{Gender, Status};

pub const DEFAULT_API_BASE: &str = "https://rickandmortyapi.com/api";

/// Filters applied to the character listing. Empty values are not sent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryFilter {
    pub name: String,
    pub status: Option<Status>,
    pub gender: Option<Gender>,
}

pub fn listing_endpoint(base: &str) -> String {
    format!("{}/character", base.trim_end_matches('/'))
}

/// Build the first-page URL: parameters in `name`, `status`, `gender` order,
/// percent-encoded, joined with `&`, never a dangling separator.
pub fn build_query_url(base: &str, filter: &QueryFilter) -> String {
    let mut params: Vec<(&str, String)> = Vec::new();
    if !filter.name.is_empty() {
        params.push(("name", urlencoding::encode(&filter.name).into_owned()));
    }
    if let Some(status) = filter.status {
        params.push(("status", status.query_value().to_string()));
    }
    if let Some(gender) = filter.gender {
        params.push(("gender", gender.query_value().to_string()));
    }

    let endpoint = listing_endpoint(base);
    if params.is_empty() {
        return endpoint;
    }
    let query = params
        .into_iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&");
    format!("{endpoint}?{query}")
}
