//! Paginated list envelope and list options

use crate::satellite::resource::ListQuery;
use serde::{Deserialize, Deserializer, Serialize};

/// Sort order reported back by the server
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sort {
    #[serde(default)]
    pub by: Option<String>,
    #[serde(default)]
    pub order: Option<String>,
}

/// One page of a collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "S: Deserialize<'de>"))]
pub struct ListResult<S> {
    #[serde(default, deserialize_with = "lenient_u64")]
    pub total: Option<u64>,
    /// Number of records matching the search
    #[serde(default, deserialize_with = "lenient_u64")]
    pub subtotal: Option<u64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub page: Option<u64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub per_page: Option<u64>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub sort: Option<Sort>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default = "Vec::new", deserialize_with = "null_as_empty")]
    pub results: Vec<S>,
}

/// Error bodies may carry `"results": null`
fn null_as_empty<'de, D, S>(deserializer: D) -> Result<Vec<S>, D::Error>
where
    D: Deserializer<'de>,
    S: Deserialize<'de>,
{
    Ok(Option::<Vec<S>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Katello sends some pagination numbers as strings
fn lenient_u64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(u64),
        String(String),
    }

    match Option::<NumberOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrString::Number(n)) => Ok(Some(n)),
        Some(NumberOrString::String(s)) if s.is_empty() => Ok(None),
        Some(NumberOrString::String(s)) => s
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("expected a number, got {s:?}"))),
    }
}

/// Pagination, ordering and scoping for list calls
///
/// Unset options are not sent, leaving the server's defaults in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    /// Ordering expression, e.g. `name DESC`
    pub order: Option<String>,
    /// Free-text search expression
    pub search: Option<String>,
    /// Return all records, ignoring pagination
    pub full_result: Option<bool>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    /// Organization context for the request
    pub organization_id: Option<u64>,
    /// Location context for the request
    pub location_id: Option<u64>,
}

impl ListOptions {
    pub fn page(page: u64, per_page: u64) -> Self {
        Self {
            page: Some(page),
            per_page: Some(per_page),
            ..Self::default()
        }
    }
}

impl ListQuery for ListOptions {
    fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();

        let mut push = |key: &str, value: Option<String>| {
            if let Some(value) = value {
                query.push((key.to_string(), value));
            }
        };

        push("page", self.page.map(|v| v.to_string()));
        push("per_page", self.per_page.map(|v| v.to_string()));
        push("order", self.order.clone());
        push("search", self.search.clone());
        push("full_result", self.full_result.map(|v| v.to_string()));
        push("sort_by", self.sort_by.clone());
        push("sort_order", self.sort_order.clone());
        push("organization_id", self.organization_id.map(|v| v.to_string()));
        push("location_id", self.location_id.map(|v| v.to_string()));

        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OrganizationSummary;
    use serde_json::json;

    #[test]
    fn pagination_only() {
        let query = ListOptions::page(2, 50).to_query();
        assert_eq!(
            query,
            vec![
                ("page".to_string(), "2".to_string()),
                ("per_page".to_string(), "50".to_string()),
            ]
        );
    }

    #[test]
    fn default_sends_nothing() {
        assert!(ListOptions::default().to_query().is_empty());
    }

    #[test]
    fn scoping_and_search() {
        let options = ListOptions {
            search: Some("name ~ Dev".to_string()),
            organization_id: Some(1),
            location_id: Some(2),
            full_result: Some(true),
            ..ListOptions::default()
        };
        let query = options.to_query();
        assert!(query.contains(&("search".to_string(), "name ~ Dev".to_string())));
        assert!(query.contains(&("organization_id".to_string(), "1".to_string())));
        assert!(query.contains(&("location_id".to_string(), "2".to_string())));
        assert!(query.contains(&("full_result".to_string(), "true".to_string())));
        assert_eq!(query.len(), 4);
    }

    #[test]
    fn metadata_accepts_strings_and_numbers() {
        let list: ListResult<serde_json::Value> = serde_json::from_value(json!({
            "total": 3,
            "subtotal": 1,
            "page": "1",
            "per_page": "20",
            "search": null,
            "sort": {"by": "name", "order": "asc"},
            "results": [{"id": 1}]
        }))
        .unwrap();
        assert_eq!(list.page, Some(1));
        assert_eq!(list.per_page, Some(20));
        assert_eq!(list.total, Some(3));
        assert_eq!(list.results.len(), 1);
    }

    #[test]
    fn null_results_decode_as_empty() {
        let list: ListResult<OrganizationSummary> = serde_json::from_value(json!({
            "total": 0,
            "error": "boom",
            "results": null
        }))
        .unwrap();
        assert!(list.results.is_empty());
        assert_eq!(list.error.as_deref(), Some("boom"));
        assert_eq!(list.total, Some(0));
    }

    #[test]
    fn missing_results_decode_as_empty() {
        let list: ListResult<OrganizationSummary> =
            serde_json::from_value(json!({"total": 0})).unwrap();
        assert!(list.results.is_empty());
    }

    #[test]
    fn metadata_rejects_garbage() {
        let result: Result<ListResult<serde_json::Value>, _> =
            serde_json::from_value(json!({"page": "first", "results": []}));
        assert!(result.is_err());
    }
}
