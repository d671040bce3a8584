//! connection::traits
//!
//! CliConnection trait definition for interacting with the Cloud Foundry
//! platform through the CLI's capabilities.
//!
//! # Design
//!
//! The `CliConnection` trait is async because every operation involves
//! network I/O. All methods return `Result` to handle API and command
//! failures gracefully.
//!
//! The trait is deliberately narrow: it covers only the capabilities the
//! rename workflow needs (lookup-by-name, run a command visibly, run a
//! command silently). Production binds to the Cloud Controller API; tests
//! bind to [`crate::connection::mock::MockConnection`].
//!
//! # Example
//!
//! ```ignore
//! use renamify::connection::{CliConnection, ConnectionError};
//!
//! async fn show_guid(conn: &dyn CliConnection) -> Result<(), ConnectionError> {
//!     let app = conn.get_app("myapp").await?;
//!     println!("{} -> {}", app.name, app.guid);
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use thiserror::Error;

/// Errors from connection operations.
///
/// These error types map to common failure modes when talking to the
/// Cloud Controller API or running CLI commands.
#[derive(Debug, Clone, Error)]
pub enum ConnectionError {
    /// Authentication is required but not available.
    #[error("authentication required; run 'cf login' first")]
    AuthRequired,

    /// Authentication failed (invalid token, expired, insufficient permissions).
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// The requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Network or connection error.
    #[error("network error: {0}")]
    NetworkError(String),

    /// A CLI command exited nonzero or could not be run.
    #[error("command '{command}' failed: {message}")]
    CommandFailed {
        /// The command that was run (first token)
        command: String,
        /// Failure detail
        message: String,
    },
}

/// An application record returned from the platform.
///
/// Fetched once per invocation, read, and discarded; nothing is cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Application {
    /// Opaque application identifier
    pub guid: String,
    /// Current application name
    pub name: String,
}

/// The connection capability supplied by the surrounding CLI.
///
/// All network-backed operations flow through this trait. Implementations
/// must be `Send + Sync` to allow use across async tasks.
///
/// # Error Handling
///
/// All methods return `Result<T, ConnectionError>`. Callers in this plugin
/// treat every error as fatal: print it and exit nonzero.
#[async_trait]
pub trait CliConnection: Send + Sync {
    /// Look up an application by its current name.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no application with that name exists
    /// - `AuthRequired` / `AuthFailed` if the session is not usable
    async fn get_app(&self, name: &str) -> Result<Application, ConnectionError>;

    /// Run a CLI command with visible terminal output.
    ///
    /// The user sees the command's output directly. The returned lines are
    /// a capture of the same output where the implementation can provide
    /// one, and may be empty otherwise.
    async fn cli_command(&self, args: &[String]) -> Result<Vec<String>, ConnectionError>;

    /// Run a CLI command without visible terminal output.
    ///
    /// Output is captured and returned as lines; nothing is shown to the
    /// user. `curl`-style argument vectors are routed through the CLI's
    /// authenticated request helper.
    async fn cli_command_without_output(
        &self,
        args: &[String],
    ) -> Result<Vec<String>, ConnectionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_error_display() {
        assert_eq!(
            format!("{}", ConnectionError::AuthRequired),
            "authentication required; run 'cf login' first"
        );
        assert_eq!(
            format!("{}", ConnectionError::AuthFailed("expired token".into())),
            "authentication failed: expired token"
        );
        assert_eq!(
            format!("{}", ConnectionError::NotFound("App 'myapp' not found".into())),
            "not found: App 'myapp' not found"
        );
        assert_eq!(
            format!(
                "{}",
                ConnectionError::ApiError {
                    status: 422,
                    message: "name must be unique".into()
                }
            ),
            "API error: 422 - name must be unique"
        );
        assert_eq!(
            format!("{}", ConnectionError::NetworkError("connection refused".into())),
            "network error: connection refused"
        );
        assert_eq!(
            format!(
                "{}",
                ConnectionError::CommandFailed {
                    command: "app".into(),
                    message: "exit status 1".into()
                }
            ),
            "command 'app' failed: exit status 1"
        );
    }

    #[test]
    fn application_equality() {
        let a = Application {
            guid: "abc-123".into(),
            name: "myapp".into(),
        };
        assert_eq!(a.clone(), a);
    }
}
