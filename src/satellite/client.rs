//! Satellite Client
//!
//! Main client for interacting with the Satellite API. It owns a
//! [`Transport`] and hands out typed [`Resources`] views, one per kind.

use super::error::{ApiError, ApiResult, Response};
use super::http::HttpTransport;
use super::resource::{envelope, ListQuery, Listable, Payload, ResourceKind};
use super::transport::{ApiRequest, Method, Transport};
use crate::config::ConnectionSettings;
use crate::models::{Filter, ListResult, Organization, Role};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;

/// Main Satellite client
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct SatelliteClient {
    transport: Arc<dyn Transport>,
}

impl SatelliteClient {
    /// Create a client talking HTTP to the configured server
    pub fn new(settings: &ConnectionSettings) -> Result<Self, ApiError> {
        let http = HttpTransport::new(settings)?;
        Ok(Self::with_transport(http))
    }

    /// Create a client on top of any transport
    pub fn with_transport<T: Transport + 'static>(transport: T) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    pub fn from_shared(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Typed operations for any resource kind
    pub fn resources<K: ResourceKind>(&self) -> Resources<'_, K> {
        Resources {
            client: self,
            _kind: PhantomData,
        }
    }

    pub fn organizations(&self) -> Resources<'_, Organization> {
        self.resources()
    }

    pub fn roles(&self) -> Resources<'_, Role> {
        self.resources()
    }

    pub fn filters(&self) -> Resources<'_, Filter> {
        self.resources()
    }

    /// Send a request and decode the JSON response body into `T`
    pub async fn execute<T: DeserializeOwned>(&self, request: ApiRequest) -> ApiResult<T> {
        let response = self.execute_no_content(request).await?;

        match serde_json::from_str::<T>(&response.body) {
            Ok(value) => Ok((value, response)),
            Err(e) => {
                tracing::warn!("Failed to decode {} response: {}", response.status, e);
                Err(ApiError::Response {
                    message: format!("failed to decode response body: {e}"),
                    response,
                })
            }
        }
    }

    /// Send a request, check its status and return the response without decoding
    pub async fn execute_no_content(&self, request: ApiRequest) -> Result<Response, ApiError> {
        let response = self.transport.execute(request).await?;
        check_response(response)
    }
}

/// Turn a non-success response into [`ApiError::Response`]
fn check_response(response: Response) -> Result<Response, ApiError> {
    if response.is_success() {
        return Ok(response);
    }

    let message = error_message(&response.body).unwrap_or_else(|| {
        response
            .status
            .canonical_reason()
            .unwrap_or("unknown status")
            .to_string()
    });

    Err(ApiError::Response { response, message })
}

/// Pull a human-readable message out of an error body.
///
/// Foreman answers `{"error": {"message": ..}}` or
/// `{"error": {"full_messages": [..]}}`, Katello `{"displayMessage": ..}`.
fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;

    if let Some(error) = value.get("error") {
        if let Some(messages) = error.get("full_messages").and_then(|v| v.as_array()) {
            let joined = messages
                .iter()
                .filter_map(|m| m.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            if !joined.is_empty() {
                return Some(joined);
            }
        }
        if let Some(message) = error.get("message").and_then(|v| v.as_str()) {
            return Some(message.to_string());
        }
        if let Some(message) = error.as_str() {
            return Some(message.to_string());
        }
    }

    value
        .get("displayMessage")
        .or_else(|| value.get("message"))
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}

/// Typed CRUD operations for one resource kind
pub struct Resources<'a, K> {
    client: &'a SatelliteClient,
    _kind: PhantomData<fn() -> K>,
}

impl<K: ResourceKind> Resources<'_, K> {
    /// Create a new resource; the server assigns its ID
    pub async fn create(&self, payload: &K::Create) -> ApiResult<K> {
        payload.validate()?;

        let body = envelope(K::ENVELOPE, payload)?;
        let request = ApiRequest::new(Method::Post, K::PATH.build(None)).with_body(body);
        self.client.execute(request).await
    }

    /// Get a single resource by its ID
    pub async fn get(&self, id: u64) -> ApiResult<K> {
        let request = ApiRequest::new(Method::Get, K::PATH.build(Some(id)));
        self.client.execute(request).await
    }

    /// Update a resource and return the server's full representation
    pub async fn update(&self, id: u64, payload: &K::Update) -> ApiResult<K> {
        payload.validate()?;

        let body = envelope(K::ENVELOPE, payload)?;
        let request = ApiRequest::new(Method::Put, K::PATH.build(Some(id))).with_body(body);
        self.client.execute(request).await
    }

    /// Delete a resource by its ID
    pub async fn delete(&self, id: u64) -> Result<Response, ApiError> {
        let request = ApiRequest::new(Method::Delete, K::PATH.build(Some(id)));
        self.client.execute_no_content(request).await
    }
}

impl<K: Listable> Resources<'_, K> {
    /// List the collection; `None` uses the server's defaults
    pub async fn list(&self, options: Option<&K::ListOptions>) -> ApiResult<ListResult<K::Summary>> {
        let query = options.map(|o| o.to_query()).unwrap_or_default();
        let request = ApiRequest::new(Method::Get, K::PATH.build(None)).with_query(query);
        self.client.execute(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderMap;
    use reqwest::StatusCode;

    fn response(status: u16, body: &str) -> Response {
        Response::new(StatusCode::from_u16(status).unwrap(), HeaderMap::new(), body)
    }

    #[test]
    fn success_passes_through() {
        let checked = check_response(response(204, "")).unwrap();
        assert_eq!(checked.status, StatusCode::NO_CONTENT);
    }

    #[test]
    fn foreman_error_message() {
        let err = check_response(response(
            404,
            r#"{"error":{"message":"Resource role not found by id '5'"}}"#,
        ))
        .unwrap_err();
        assert!(err.is_not_found());
        match err {
            ApiError::Response { message, .. } => {
                assert_eq!(message, "Resource role not found by id '5'")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn foreman_validation_messages_are_joined() {
        let body = r#"{"error":{"id":null,"errors":{"name":["has already been taken"]},
            "full_messages":["Name has already been taken","Label is invalid"]}}"#;
        assert_eq!(
            error_message(body).as_deref(),
            Some("Name has already been taken; Label is invalid")
        );
    }

    #[test]
    fn katello_display_message() {
        let body = r#"{"displayMessage":"Couldn't find organization '99'","errors":["x"]}"#;
        assert_eq!(
            error_message(body).as_deref(),
            Some("Couldn't find organization '99'")
        );
    }

    #[test]
    fn falls_back_to_reason_phrase() {
        let err = check_response(response(502, "<html>bad gateway</html>")).unwrap_err();
        match err {
            ApiError::Response { message, response } => {
                assert_eq!(message, "Bad Gateway");
                assert_eq!(response.body, "<html>bad gateway</html>");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
