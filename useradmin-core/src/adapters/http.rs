//! Users REST API client
//!
//! | Operation | Method | Path              |
//! |-----------|--------|-------------------|
//! | List      | GET    | `/api/users`      |
//! | Create    | POST   | `/api/users`      |
//! | Update    | PUT    | `/api/users/{id}` |
//! | Delete    | DELETE | `/api/users/{id}` |

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::Deserialize;

use crate::domain::result::{Error, Result};
use crate::domain::{User, UserId, UserPayload};
use crate::ports::UsersApi;

/// Base path of the users resource on the API host
pub const USERS_PATH: &str = "/api/users";

pub const FETCH_FAILED: &str = "Failed to fetch users";
pub const OPERATION_FAILED: &str = "Operation failed";
pub const DELETE_FAILED: &str = "Failed to delete user";

/// Error body some endpoints send with a non-2xx status
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// HTTP client for the users resource
#[derive(Debug, Clone)]
pub struct HttpUsersApi {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl HttpUsersApi {
    /// Create a client for the API served at `base_url` (scheme + host, no path)
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        if base_url.trim().is_empty() {
            return Err(Error::Config("Users API base URL cannot be empty".to_string()));
        }
        let base_url = base_url.trim().trim_end_matches('/');
        Url::parse(base_url)
            .map_err(|e| Error::Config(format!("Invalid users API base URL '{}': {}", base_url, e)))?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}{}", self.base_url, USERS_PATH)
    }

    /// `/api/users/{id}` with the id percent-encoded as one path segment
    fn member_url(&self, id: &UserId) -> Result<Url> {
        let mut url = Url::parse(&self.collection_url())
            .map_err(|e| Error::Config(format!("Invalid users API URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| Error::Config(format!("Users API URL has no path: {}", self.base_url)))?
            .push(id.as_str());
        Ok(url)
    }

    /// Map reqwest transport failures to user-facing errors
    fn map_request_error(&self, error: reqwest::Error) -> Error {
        if error.is_timeout() {
            Error::transport(format!(
                "Connection timed out after {} seconds",
                self.timeout.as_secs()
            ))
        } else if error.is_connect() {
            Error::transport(format!("Unable to connect to {}", self.base_url))
        } else {
            Error::transport(format!("Request failed: {}", error))
        }
    }
}

/// Pull the most specific message out of a failed mutation response
///
/// Tries a JSON `{message}` body first, then the raw text, then `fallback`.
async fn server_message(response: Response, fallback: &str) -> String {
    let text = response.text().await.unwrap_or_default();
    extract_message(&text).unwrap_or_else(|| fallback.to_string())
}

fn extract_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody { message: Some(message) }) if !message.trim().is_empty() => Some(message),
        Ok(_) => None,
        Err(_) => Some(body.to_string()),
    }
}

#[async_trait]
impl UsersApi for HttpUsersApi {
    async fn list(&self) -> Result<Vec<User>> {
        let url = self.collection_url();
        tracing::debug!(%url, "GET users");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::server(status.as_u16(), FETCH_FAILED));
        }

        response
            .json::<Vec<User>>()
            .await
            .map_err(|e| Error::transport(format!("Failed to parse users response: {}", e)))
    }

    async fn create(&self, payload: &UserPayload) -> Result<()> {
        let url = self.collection_url();
        tracing::debug!(%url, "POST user");

        let response = self
            .client
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let message = server_message(response, OPERATION_FAILED).await;
            return Err(Error::server(status.as_u16(), message));
        }
        Ok(())
    }

    async fn update(&self, id: &UserId, payload: &UserPayload) -> Result<()> {
        let url = self.member_url(id)?;
        tracing::debug!(%url, "PUT user");

        let response = self
            .client
            .put(url)
            .json(payload)
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let message = server_message(response, OPERATION_FAILED).await;
            return Err(Error::server(status.as_u16(), message));
        }
        Ok(())
    }

    async fn delete(&self, id: &UserId) -> Result<()> {
        let url = self.member_url(id)?;
        tracing::debug!(%url, "DELETE user");

        let response = self
            .client
            .delete(url)
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::server(status.as_u16(), DELETE_FAILED));
        }
        Ok(())
    }
}
