//! connection
//!
//! Abstraction for the CLI connection capability.
//!
//! # Architecture
//!
//! The `CliConnection` trait defines the narrow interface this plugin needs
//! from the surrounding platform: look up an application by name, run a CLI
//! command with visible output, and run one with output suppressed. The
//! rename workflow depends only on the trait, never on a concrete binding.
//!
//! # Modules
//!
//! - `traits`: Core `CliConnection` trait, `Application` record, errors
//! - [`cloud`]: Production binding against the Cloud Controller v3 API
//! - [`mock`]: Recording mock implementation for deterministic testing
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
//! # });
//! ```

pub mod cloud;
pub mod mock;
mod traits;

pub use traits::*;
