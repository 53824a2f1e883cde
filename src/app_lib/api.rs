//! HTTP helpers for the catalog JSON API with consistent error handling.
//! Feature clients build endpoints and send requests through [`ApiClient`] so
//! status handling and error sanitizing stay in one place. The client only
//! attaches a bearer token handed to it by the session; it never stores one.

use super::{
    config::AppConfig,
    errors::{AppError, FieldErrors},
    user_agent,
};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;
use url::Url;

/// Maximum number of error body characters surfaced to the UI.
const MAX_ERROR_CHARS: usize = 200;

/// Shared JSON client bound to the configured API base URL.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    bearer: Option<SecretString>,
}

impl ApiClient {
    /// # Errors
    /// Returns `AppError::Config` if the base URL is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let mut builder = Client::builder().user_agent(user_agent());
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|err| AppError::Config(format!("Failed to build HTTP client: {err}")))?;

        let base_url = Url::parse(config.api_base_url.trim())
            .map_err(|err| AppError::Config(format!("Invalid API base URL: {err}")))?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::Config(format!(
                "Invalid API base URL: {}",
                config.api_base_url
            )));
        }

        Ok(Self {
            http,
            base_url,
            bearer: None,
        })
    }

    /// Returns a copy of this client that sends `Authorization: Bearer` with
    /// every request when a token is given.
    #[must_use]
    pub fn with_bearer(&self, token: Option<SecretString>) -> Self {
        Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            bearer: token,
        }
    }

    #[must_use]
    pub fn has_bearer(&self) -> bool {
        self.bearer.is_some()
    }

    /// Builds an endpoint URL from path segments and query pairs. Segments and
    /// query values are percent-encoded.
    ///
    /// # Errors
    /// Returns `AppError::Config` when the base URL cannot carry a path.
    pub fn endpoint(&self, segments: &[&str], query: &[(&str, String)]) -> Result<Url, AppError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| AppError::Config("API base URL cannot carry a path".to_string()))?
            .pop_if_empty()
            .extend(segments);

        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(key, value)| (*key, value.as_str())));
        }

        Ok(url)
    }

    /// Fetches JSON from `url`.
    ///
    /// # Errors
    /// Network, HTTP and decoding failures are returned as `AppError`.
    pub async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, AppError> {
        debug!(method = "GET", %url, "sending request");
        let response = self.send(self.http.get(url)).await?;
        handle_json_response(response).await
    }

    /// Posts a JSON body and parses a JSON response.
    ///
    /// # Errors
    /// Network, HTTP and decoding failures are returned as `AppError`.
    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T, AppError> {
        debug!(method = "POST", %url, "sending request");
        let payload = encode(body)?;
        let response = self.send(json_body(self.http.post(url), payload)).await?;
        handle_json_response(response).await
    }

    /// Puts a JSON body and parses a JSON response.
    ///
    /// # Errors
    /// Network, HTTP and decoding failures are returned as `AppError`.
    pub async fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T, AppError> {
        debug!(method = "PUT", %url, "sending request");
        let payload = encode(body)?;
        let response = self.send(json_body(self.http.put(url), payload)).await?;
        handle_json_response(response).await
    }

    /// Sends a DELETE and expects an empty response body.
    ///
    /// # Errors
    /// Network and HTTP failures are returned as `AppError`.
    pub async fn delete(&self, url: Url) -> Result<(), AppError> {
        debug!(method = "DELETE", %url, "sending request");
        let response = self.send(self.http.delete(url)).await?;
        handle_empty_response(response).await
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, AppError> {
        let builder = match &self.bearer {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        };
        builder.send().await.map_err(map_request_error)
    }
}

fn encode<B: Serialize>(body: &B) -> Result<String, AppError> {
    serde_json::to_string(body)
        .map_err(|err| AppError::Serialization(format!("Failed to encode request: {err}")))
}

fn json_body(builder: RequestBuilder, payload: String) -> RequestBuilder {
    builder
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body(payload)
}

/// Maps transport errors into user-facing `AppError` variants with timeout detection.
fn map_request_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::Timeout("Request timed out. Please try again.".to_string())
    } else {
        AppError::Network(format!("Unable to reach the server: {err}"))
    }
}

/// Parses JSON responses and surfaces HTTP errors with sanitized bodies.
async fn handle_json_response<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    if response.status().is_success() {
        response
            .json::<T>()
            .await
            .map_err(|err| AppError::Parse(format!("Failed to decode response: {err}")))
    } else {
        Err(error_from_response(response).await)
    }
}

/// Handles empty responses and returns sanitized HTTP errors when needed.
async fn handle_empty_response(response: Response) -> Result<(), AppError> {
    if response.status().is_success() {
        Ok(())
    } else {
        Err(error_from_response(response).await)
    }
}

#[derive(Deserialize)]
struct ValidationBody {
    errors: Map<String, Value>,
}

async fn error_from_response(response: Response) -> AppError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    if status == StatusCode::BAD_REQUEST {
        if let Some(errors) = parse_field_errors(&body) {
            return AppError::Validation(errors);
        }
    }

    AppError::Http {
        status: status.as_u16(),
        message: sanitize_body(&body),
    }
}

/// Extracts the `errors` field map of a validation response, if present.
fn parse_field_errors(body: &str) -> Option<FieldErrors> {
    let parsed: ValidationBody = serde_json::from_str(body).ok()?;
    let entries: Vec<(String, String)> = parsed
        .errors
        .into_iter()
        .map(|(field, message)| {
            let message = match message {
                Value::String(text) => text,
                other => other.to_string(),
            };
            (field, message)
        })
        .collect();

    if entries.is_empty() {
        None
    } else {
        Some(FieldErrors::new(entries))
    }
}

/// Sanitizes HTTP error bodies for user-facing messages by trimming and truncating.
fn sanitize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}
