//! connection::cloud
//!
//! Production `CliConnection` binding against the Cloud Controller v3 API.
//!
//! # Design
//!
//! This module implements the `CliConnection` trait for a real Cloud
//! Foundry target. It uses:
//! - The Cloud Controller REST API for lookups and `curl`-style requests
//! - The `cf` binary (as a subprocess) for every other CLI command
//!
//! `curl` argument vectors are the CLI's authenticated request helper:
//! `["curl", "/v3/apps/GUID", "-X", "PATCH", "-d", BODY]` becomes a direct
//! HTTP request against the configured target, carrying the session token
//! from the CLI's config file.
//!
//! # Authentication
//!
//! The session token is read from the CLI's `config.json` (see
//! [`crate::config`]); there is no token acquisition or refresh here. A 401
//! response surfaces as `ConnectionError::AuthFailed` and the user is
//! expected to `cf login` again.
//!
//! # Example
//!
//! ```ignore
//! use renamify::config::CfConfig;
//! use renamify::connection::cloud::CloudConnection;
//! use renamify::connection::CliConnection;
//!
//! let config = CfConfig::load()?;
//! let conn = CloudConnection::from_config(&config)?;
//! let app = conn.get_app("myapp").await?;
//! ```

use std::process::{Command, Stdio};

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Method, Response, StatusCode};
use serde::Deserialize;

use super::traits::{Application, CliConnection, ConnectionError};
use crate::config::CfConfig;
use crate::ui;

/// User-Agent header value for API requests.
const USER_AGENT_VALUE: &str = "renamify-plugin";

/// Cloud Controller connection.
///
/// Implements the `CliConnection` trait using the Cloud Controller v3 API
/// and the `cf` binary.
pub struct CloudConnection {
    /// HTTP client for API requests
    client: Client,
    /// Cloud Controller API base URL
    api_base: String,
    /// Authorization header value for the current session
    token: String,
}

// Custom Debug to avoid exposing the session token.
impl std::fmt::Debug for CloudConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudConnection")
            .field("api_base", &self.api_base)
            .field("has_token", &!self.token.is_empty())
            .finish()
    }
}

/// A parsed `curl`-style request.
#[derive(Debug, Clone, PartialEq, Eq)]
struct CurlRequest {
    /// API path, e.g. `/v3/apps/abc-123`
    path: String,
    /// HTTP method
    method: String,
    /// Request body, if any
    body: Option<String>,
}

/// Cloud Controller v3 error body.
#[derive(Debug, Deserialize)]
struct CloudControllerErrors {
    #[serde(default)]
    errors: Vec<CloudControllerError>,
}

#[derive(Debug, Deserialize)]
struct CloudControllerError {
    #[serde(default)]
    title: String,
    #[serde(default)]
    detail: String,
}

/// Response shape for `GET /v3/apps`.
#[derive(Debug, Deserialize)]
struct AppListResponse {
    resources: Vec<AppResource>,
}

#[derive(Debug, Deserialize)]
struct AppResource {
    guid: String,
    name: String,
}

impl CloudConnection {
    /// Create a connection from the CLI's configuration.
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` if the config carries no token, or
    /// `NetworkError` if the HTTP client cannot be built.
    pub fn from_config(config: &CfConfig) -> Result<Self, ConnectionError> {
        if config.access_token.trim().is_empty() {
            return Err(ConnectionError::AuthRequired);
        }

        let client = Client::builder()
            .danger_accept_invalid_certs(config.ssl_disabled)
            .build()
            .map_err(|e| ConnectionError::NetworkError(e.to_string()))?;

        Ok(Self {
            client,
            api_base: config.target.trim_end_matches('/').to_string(),
            token: config.authorization_header(),
        })
    }

    /// Create a connection against an explicit target.
    ///
    /// Used by tests to point at a local server.
    pub fn new(api_base: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    /// Get the API base URL.
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Build common headers for API requests.
    fn headers(&self) -> Result<HeaderMap, ConnectionError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&self.token).map_err(|_| {
                ConnectionError::AuthFailed("token contains invalid header characters".into())
            })?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        Ok(headers)
    }

    /// Build a URL for an API path.
    fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path.trim_start_matches('/'))
    }

    /// Issue a request against the Cloud Controller and return the response
    /// body as lines.
    async fn api_request(&self, request: &CurlRequest) -> Result<Vec<String>, ConnectionError> {
        let method = Method::from_bytes(request.method.as_bytes()).map_err(|_| {
            ConnectionError::CommandFailed {
                command: "curl".into(),
                message: format!("invalid HTTP method '{}'", request.method),
            }
        })?;

        let url = self.api_url(&request.path);
        ui::trace(format!("{} {}", request.method, url));
        if let Some(ref body) = request.body {
            ui::trace(format!("request body: {}", body));
        }

        let mut builder = self.client.request(method, &url).headers(self.headers()?);
        if let Some(ref body) = request.body {
            builder = builder.body(body.clone());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ConnectionError::NetworkError(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            let text = response
                .text()
                .await
                .map_err(|e| ConnectionError::NetworkError(e.to_string()))?;
            ui::trace(format!("response body: {}", text));
            Ok(text.lines().map(str::to_string).collect())
        } else {
            Err(Self::handle_error_response(response, status).await)
        }
    }

    /// Map an error response from the Cloud Controller.
    async fn handle_error_response(response: Response, status: StatusCode) -> ConnectionError {
        // Try to get a message from the v3 error body.
        let message = match response.json::<CloudControllerErrors>().await {
            Ok(body) => body
                .errors
                .first()
                .map(|e| {
                    if e.detail.is_empty() {
                        e.title.clone()
                    } else {
                        e.detail.clone()
                    }
                })
                .unwrap_or_else(|| "Unknown error".to_string()),
            Err(_) => "Unknown error".to_string(),
        };

        match status {
            StatusCode::UNAUTHORIZED => {
                ConnectionError::AuthFailed("Invalid or expired token".into())
            }
            StatusCode::FORBIDDEN => {
                ConnectionError::AuthFailed(format!("Permission denied: {}", message))
            }
            StatusCode::NOT_FOUND => ConnectionError::NotFound(message),
            _ if status.is_server_error() => ConnectionError::ApiError {
                status: status.as_u16(),
                message: format!("Cloud Controller error: {}", message),
            },
            _ => ConnectionError::ApiError {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// Run a `cf` subprocess.
    ///
    /// With `capture` set, stdout is collected and returned as lines;
    /// otherwise the child inherits the terminal and the returned lines are
    /// empty.
    fn run_cf(&self, args: &[String], capture: bool) -> Result<Vec<String>, ConnectionError> {
        let command = args.first().cloned().unwrap_or_default();
        let mut cmd = Command::new("cf");
        cmd.args(args);

        if capture {
            let output = cmd
                .stdin(Stdio::null())
                .output()
                .map_err(|e| ConnectionError::CommandFailed {
                    command: command.clone(),
                    message: e.to_string(),
                })?;

            if !output.status.success() {
                let stderr = String::from_utf8_lossy(&output.stderr);
                return Err(ConnectionError::CommandFailed {
                    command,
                    message: if stderr.trim().is_empty() {
                        format!("exit status {}", output.status.code().unwrap_or(-1))
                    } else {
                        stderr.trim().to_string()
                    },
                });
            }

            Ok(String::from_utf8_lossy(&output.stdout)
                .lines()
                .map(str::to_string)
                .collect())
        } else {
            let status = cmd.status().map_err(|e| ConnectionError::CommandFailed {
                command: command.clone(),
                message: e.to_string(),
            })?;

            if !status.success() {
                return Err(ConnectionError::CommandFailed {
                    command,
                    message: format!("exit status {}", status.code().unwrap_or(-1)),
                });
            }

            Ok(Vec::new())
        }
    }
}

/// Parse a `curl`-style argument vector into a request.
///
/// Recognizes `-X`/`--request` for the method and `-d`/`--data` for the
/// body; the first bare argument is the path. The method defaults to GET,
/// or POST when a body is present, matching `cf curl`.
fn parse_curl_args(args: &[String]) -> Result<CurlRequest, ConnectionError> {
    let mut path: Option<String> = None;
    let mut method: Option<String> = None;
    let mut body: Option<String> = None;

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-X" | "--request" => {
                method = Some(iter.next().cloned().ok_or_else(|| {
                    ConnectionError::CommandFailed {
                        command: "curl".into(),
                        message: "missing value for -X".into(),
                    }
                })?);
            }
            "-d" | "--data" => {
                body = Some(iter.next().cloned().ok_or_else(|| {
                    ConnectionError::CommandFailed {
                        command: "curl".into(),
                        message: "missing value for -d".into(),
                    }
                })?);
            }
            other if !other.starts_with('-') => {
                path = Some(other.to_string());
            }
            other => {
                return Err(ConnectionError::CommandFailed {
                    command: "curl".into(),
                    message: format!("unsupported option '{}'", other),
                });
            }
        }
    }

    let path = path.ok_or_else(|| ConnectionError::CommandFailed {
        command: "curl".into(),
        message: "missing request path".into(),
    })?;

    let method = method.unwrap_or_else(|| {
        if body.is_some() {
            "POST".to_string()
        } else {
            "GET".to_string()
        }
    });

    Ok(CurlRequest { path, method, body })
}

#[async_trait]
impl CliConnection for CloudConnection {
    async fn get_app(&self, name: &str) -> Result<Application, ConnectionError> {
        let url = self.api_url("/v3/apps");
        ui::trace(format!("GET {}?names={}", url, name));

        let response = self
            .client
            .get(&url)
            .headers(self.headers()?)
            .query(&[("names", name), ("per_page", "1")])
            .send()
            .await
            .map_err(|e| ConnectionError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::handle_error_response(response, status).await);
        }

        let list: AppListResponse =
            response
                .json()
                .await
                .map_err(|e| ConnectionError::ApiError {
                    status: status.as_u16(),
                    message: format!("Failed to parse response: {}", e),
                })?;

        list.resources
            .into_iter()
            .next()
            .map(|r| Application {
                guid: r.guid,
                name: r.name,
            })
            .ok_or_else(|| ConnectionError::NotFound(format!("App '{}' not found", name)))
    }

    async fn cli_command(&self, args: &[String]) -> Result<Vec<String>, ConnectionError> {
        if args.first().map(String::as_str) == Some("curl") {
            let request = parse_curl_args(args)?;
            let lines = self.api_request(&request).await?;
            for line in &lines {
                ui::print(line);
            }
            Ok(lines)
        } else {
            self.run_cf(args, false)
        }
    }

    async fn cli_command_without_output(
        &self,
        args: &[String],
    ) -> Result<Vec<String>, ConnectionError> {
        if args.first().map(String::as_str) == Some("curl") {
            let request = parse_curl_args(args)?;
            self.api_request(&request).await
        } else {
            self.run_cf(args, true)
        }
    }
}
