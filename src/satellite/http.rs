//! HTTP transport for Satellite REST API calls

use super::error::{ApiError, Response};
use super::transport::{ApiRequest, Transport};
use crate::config::ConnectionSettings;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use url::Url;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Sanitize response body for logging
/// Truncates long responses and strips control characters
pub(crate) fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let mut end = MAX_LOG_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... [truncated, {} bytes total]", &body[..end], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| c.is_control(), "")
}

/// [`Transport`] over `reqwest`, with HTTP basic auth and JSON bodies
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
    username: Option<String>,
    password: Option<String>,
}

impl HttpTransport {
    /// Create a transport for the given server
    pub fn new(settings: &ConnectionSettings) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .user_agent(concat!("satctl/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(settings.timeout)
            .danger_accept_invalid_certs(settings.insecure)
            .build()
            .map_err(|e| ApiError::transport("failed to create HTTP client", e))?;

        if settings.insecure {
            tracing::warn!("TLS certificate verification disabled for {}", settings.url);
        }

        Ok(Self {
            client,
            base_url: settings.url.clone(),
            username: settings.username.clone(),
            password: settings.password.clone(),
        })
    }

    /// Join an absolute API path and query onto the base URL.
    /// Any path on the base URL (e.g. a reverse-proxy prefix) is kept.
    fn url_for(&self, request: &ApiRequest) -> Result<Url, ApiError> {
        let raw = format!(
            "{}{}",
            self.base_url.as_str().trim_end_matches('/'),
            request.path
        );
        let mut url = Url::parse(&raw)
            .map_err(|e| ApiError::transport(format!("invalid request URL {raw}"), e))?;

        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&request.query);
        }

        Ok(url)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: ApiRequest) -> Result<Response, ApiError> {
        let url = self.url_for(&request)?;
        tracing::debug!("{} {}", request.method, url);

        let mut builder = self.client.request(request.method.into(), url);

        if let Some(username) = &self.username {
            builder = builder.basic_auth(username, self.password.as_deref());
        }

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::transport("failed to send request", e))?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::transport("failed to read response body", e))?;

        if !status.is_success() {
            // Security: Only log sanitized/truncated error body to avoid leaking sensitive data
            tracing::error!("API error: {} - {}", status, sanitize_for_log(&body));
        }

        Ok(Response::new(status, headers, body))
    }
}

/// Format an API error for display
/// Security: Keeps messages short and free of raw response bodies
pub fn format_api_error(error: &ApiError) -> String {
    match error {
        ApiError::Argument { field, reason } => format!("Invalid argument {field}: {reason}."),
        ApiError::Transport { message, .. } => {
            format!("{}. Check the server URL and your network connection.", capitalize(message))
        }
        ApiError::Response { response, message } => {
            let hint = match response.status.as_u16() {
                401 => "Authentication failed. Check your username and SATELLITE_PASSWORD.",
                403 => "Permission denied. Check the roles assigned to your user.",
                404 => "Resource not found.",
                409 => "Resource conflict. The resource may already exist.",
                422 => "The server rejected the request.",
                429 => "Rate limit exceeded. Please try again later.",
                500..=599 => "Satellite server error. Please try again.",
                200..=299 => "Unexpected response from server.",
                _ => "Request failed.",
            };

            let detail = message
                .chars()
                .filter(|c| !c.is_control())
                .take(120)
                .collect::<String>();

            if detail.is_empty() {
                hint.to_string()
            } else {
                format!("{hint} ({detail})")
            }
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
