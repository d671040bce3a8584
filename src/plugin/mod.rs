//! plugin
//!
//! Host plugin contract: the `Plugin` trait and the process entry helper.
//!
//! # Lifecycle
//!
//! The host starts the plugin binary in two situations:
//!
//! 1. **Install time**: invoked with the `SendMetadata` argument to harvest
//!    the metadata descriptor. No connection is constructed and no command
//!    runs; the descriptor is printed as JSON and the process exits 0.
//! 2. **Per user command**: invoked with the raw argument list the user
//!    typed. A connection is built from the CLI's config and the plugin's
//!    [`Plugin::run`] is dispatched once.
//!
//! Any error from dispatch is printed to stdout and the process exits with
//! status -1; the host maps that to a failed command.
//!
//! # Example
//!
//! ```ignore
//! use renamify::plugin;
//! use renamify::renamer::RenamerPlugin;
//!
//! #[tokio::main]
//! async fn main() {
//!     plugin::start(&RenamerPlugin).await;
//! }
//! ```

mod metadata;

pub use metadata::{Command, PluginMetadata, Usage, VersionType};

use anyhow::Result;
use async_trait::async_trait;

use crate::config::CfConfig;
use crate::connection::cloud::CloudConnection;
use crate::connection::CliConnection;
use crate::ui;

/// Argument the host passes at install time to harvest metadata.
const SEND_METADATA: &str = "SendMetadata";

/// The contract a plugin implements for the host.
///
/// Implementations are stateless value types; the host constructs the
/// connection and passes it to every dispatch.
#[async_trait]
pub trait Plugin: Send + Sync {
    /// Entry point for a user command.
    ///
    /// `args[0]` is the command name the user typed, followed by any
    /// additional arguments. Dispatch may be invoked with arguments that
    /// belong to another command or to the host's own lifecycle;
    /// implementations must treat an unrecognized first argument as a
    /// silent no-op rather than an error.
    async fn run(&self, connection: &dyn CliConnection, args: &[String]) -> Result<()>;

    /// Static metadata descriptor for discovery and help.
    ///
    /// Must be pure: identical on every call, no side effects, and no use
    /// of the connection.
    fn metadata(&self) -> PluginMetadata;
}

/// Run a plugin as a host-managed process.
///
/// Reads the process arguments, handles the install-time metadata
/// handshake, and otherwise builds a [`CloudConnection`] from the CLI's
/// config and dispatches to the plugin. Exits the process with status -1
/// on any failure.
pub async fn start(plugin: &dyn Plugin) {
    let args: Vec<String> = std::env::args().skip(1).collect();
    start_with_args(plugin, args).await;
}

/// `start` with an explicit argument list.
async fn start_with_args(plugin: &dyn Plugin, args: Vec<String>) {
    if args.first().map(String::as_str) == Some(SEND_METADATA) {
        match serde_json::to_string(&plugin.metadata()) {
            Ok(json) => println!("{}", json),
            Err(e) => fatal(e),
        }
        return;
    }

    // Nothing to dispatch; tolerate bare invocations from the host.
    if args.is_empty() {
        return;
    }

    let config = match CfConfig::load() {
        Ok(config) => config,
        Err(e) => fatal(e),
    };

    let connection = match CloudConnection::from_config(&config) {
        Ok(connection) => connection,
        Err(e) => fatal(e),
    };

    if let Err(e) = plugin.run(&connection, &args).await {
        // Surface the full error chain on stdout, then exit nonzero.
        fatal(format!("{:#}", e));
    }
}

/// Print an error to stdout and exit with the host's failure status.
fn fatal(message: impl std::fmt::Display) -> ! {
    ui::error(message);
    std::process::exit(-1);
}
