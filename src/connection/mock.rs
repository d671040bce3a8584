//! connection::mock
//!
//! Mock connection implementation for deterministic testing.
//!
//! # Design
//!
//! The mock connection provides a deterministic implementation of the
//! `CliConnection` trait for use in tests. It stores applications in
//! memory, records every operation for verification, and allows
//! configuring failure scenarios per operation.
//!
//! # Example
//!
//! ```
//! use renamify::connection::mock::MockConnection;
//! use renamify::connection::{Application, CliConnection};
//!
//! # tokio_test::block_on(async {
//! let conn = MockConnection::with_apps(vec![Application {
//!     guid: "abc-123".to_string(),
//!     name: "myapp".to_string(),
//! }]);
//!
//! let app = conn.get_app("myapp").await.unwrap();
//! assert_eq!(app.guid, "abc-123");
//!
//! // Unknown names are NotFound
//! assert!(conn.get_app("other").await.is_err());
//! # });
//! ```

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::traits::{Application, CliConnection, ConnectionError};

/// Mock connection for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping; clones share state.
#[derive(Debug, Clone, Default)]
pub struct MockConnection {
    /// Internal state shared across clones.
    inner: Arc<Mutex<MockConnectionInner>>,
}

/// Internal mutable state.
#[derive(Debug, Default)]
struct MockConnectionInner {
    /// Stored applications by name.
    apps: HashMap<String, Application>,
    /// Operation to fail on (for testing error paths).
    fail_on: Option<FailOn>,
    /// Recorded operations for verification.
    operations: Vec<MockOperation>,
}

/// Configuration for which operation should fail.
#[derive(Debug, Clone)]
pub enum FailOn {
    /// Fail get_app with the given error.
    GetApp(ConnectionError),
    /// Fail cli_command with the given error.
    CliCommand(ConnectionError),
    /// Fail cli_command_without_output with the given error.
    CliCommandWithoutOutput(ConnectionError),
}

/// Recorded operation for test verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockOperation {
    GetApp { name: String },
    CliCommand { args: Vec<String> },
    CliCommandWithoutOutput { args: Vec<String> },
}

impl MockConnection {
    /// Create a new empty mock connection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock connection with pre-existing applications.
    pub fn with_apps(apps: Vec<Application>) -> Self {
        let apps_map: HashMap<String, Application> =
            apps.into_iter().map(|a| (a.name.clone(), a)).collect();

        Self {
            inner: Arc::new(Mutex::new(MockConnectionInner {
                apps: apps_map,
                fail_on: None,
                operations: Vec::new(),
            })),
        }
    }

    /// Configure the mock to fail on a specific operation.
    ///
    /// # Example
    ///
    /// ```
    /// use renamify::connection::mock::{FailOn, MockConnection};
    /// use renamify::connection::ConnectionError;
    ///
    /// let conn = MockConnection::new()
    ///     .fail_on(FailOn::GetApp(ConnectionError::NotFound("App 'x' not found".into())));
    /// ```
    pub fn fail_on(self, fail_on: FailOn) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.fail_on = Some(fail_on);
        }
        self
    }

    /// Get all recorded operations.
    ///
    /// Useful for verifying exactly which capabilities were invoked, in
    /// what order, and with what arguments.
    pub fn operations(&self) -> Vec<MockOperation> {
        self.inner.lock().unwrap().operations.clone()
    }

    /// Look up a stored application by name without recording an operation.
    pub fn stored_app(&self, name: &str) -> Option<Application> {
        self.inner.lock().unwrap().apps.get(name).cloned()
    }

    /// Apply a successful PATCH to the stored app set.
    ///
    /// Mirrors the platform's behavior: `/v3/apps/{guid}` with a
    /// `{"name": ...}` body renames the app, so a later lookup under the
    /// new name succeeds.
    fn apply_patch(inner: &mut MockConnectionInner, args: &[String]) {
        let path = match args.iter().skip(1).find(|a| !a.starts_with('-')) {
            Some(p) => p.clone(),
            None => return,
        };
        let guid = match path.strip_prefix("/v3/apps/") {
            Some(g) => g.to_string(),
            None => return,
        };
        let body = match args.iter().position(|a| a == "-d") {
            Some(i) => match args.get(i + 1) {
                Some(b) => b.clone(),
                None => return,
            },
            None => return,
        };
        let new_name = match serde_json::from_str::<serde_json::Value>(&body) {
            Ok(v) => match v.get("name").and_then(|n| n.as_str()) {
                Some(n) => n.to_string(),
                None => return,
            },
            Err(_) => return,
        };

        let old_name = inner
            .apps
            .values()
            .find(|a| a.guid == guid)
            .map(|a| a.name.clone());
        if let Some(old_name) = old_name {
            if let Some(mut app) = inner.apps.remove(&old_name) {
                app.name = new_name.clone();
                inner.apps.insert(new_name, app);
            }
        }
    }
}

#[async_trait]
impl CliConnection for MockConnection {
    async fn get_app(&self, name: &str) -> Result<Application, ConnectionError> {
        let mut inner = self.inner.lock().unwrap();
        inner.operations.push(MockOperation::GetApp {
            name: name.to_string(),
        });

        if let Some(FailOn::GetApp(err)) = &inner.fail_on {
            return Err(err.clone());
        }

        inner
            .apps
            .get(name)
            .cloned()
            .ok_or_else(|| ConnectionError::NotFound(format!("App '{}' not found", name)))
    }

    async fn cli_command(&self, args: &[String]) -> Result<Vec<String>, ConnectionError> {
        let mut inner = self.inner.lock().unwrap();
        inner.operations.push(MockOperation::CliCommand {
            args: args.to_vec(),
        });

        if let Some(FailOn::CliCommand(err)) = &inner.fail_on {
            return Err(err.clone());
        }

        Ok(Vec::new())
    }

    async fn cli_command_without_output(
        &self,
        args: &[String],
    ) -> Result<Vec<String>, ConnectionError> {
        let mut inner = self.inner.lock().unwrap();
        inner.operations.push(MockOperation::CliCommandWithoutOutput {
            args: args.to_vec(),
        });

        if let Some(FailOn::CliCommandWithoutOutput(err)) = &inner.fail_on {
            return Err(err.clone());
        }

        if args.first().map(String::as_str) == Some("curl") {
            Self::apply_patch(&mut inner, args);
        }

        Ok(Vec::new())
    }
}
