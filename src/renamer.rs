//! renamer
//!
//! The renamify command adapter and rename workflow.
//!
//! # Workflow
//!
//! `cf renamify APP_NAME` runs a strict linear sequence, fatal on any error:
//!
//! 1. Compute the new name: the input name plus `-potato`
//! 2. Resolve the app by name through the connection
//! 3. PATCH `/v3/apps/{guid}` with `{"name": "<new-name>"}` via the
//!    CLI's silent request helper
//! 4. Run the visible `app <new-name>` listing so the user sees the result
//!
//! There is no rollback: if the PATCH lands but the listing fails, the app
//! stays renamed and only the confirmation is lost.

use anyhow::Result;
use async_trait::async_trait;

use crate::connection::CliConnection;
use crate::plugin::{Command, Plugin, PluginMetadata, Usage, VersionType};
use crate::ui;

/// The subcommand this plugin contributes.
pub const COMMAND_NAME: &str = "renamify";

/// Suffix appended to the app name.
pub const NAME_SUFFIX: &str = "-potato";

/// The renamify plugin.
///
/// Zero-field value type: the adapter carries no state between
/// invocations.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenamerPlugin;

#[async_trait]
impl Plugin for RenamerPlugin {
    async fn run(&self, connection: &dyn CliConnection, args: &[String]) -> Result<()> {
        if args.first().map(String::as_str) != Some(COMMAND_NAME) {
            // Host dispatch may carry unrelated arguments; stay silent.
            return Ok(());
        }

        // Argument count is deliberately unchecked: the host guarantees the
        // command name is followed by the user's arguments.
        let app_name = &args[1];
        rename_app(connection, app_name).await
    }

    fn metadata(&self) -> PluginMetadata {
        PluginMetadata {
            name: "RenamerPlugin".to_string(),
            version: VersionType {
                major: 1,
                minor: 0,
                build: 0,
            },
            min_cli_version: VersionType {
                major: 6,
                minor: 7,
                build: 0,
            },
            commands: vec![Command {
                name: COMMAND_NAME.to_string(),
                help_text: "Append '-potato' to an app name, because potatoes are awesome!"
                    .to_string(),
                usage_details: Usage {
                    usage: "cf renamify APP_NAME".to_string(),
                },
            }],
        }
    }
}

/// Rename an app by appending [`NAME_SUFFIX`] to its name.
///
/// Errors from the connection are surfaced verbatim; the caller prints
/// them and exits.
pub async fn rename_app(connection: &dyn CliConnection, app_name: &str) -> Result<()> {
    let new_name = format!("{}{}", app_name, NAME_SUFFIX);

    ui::print(format!("Renaming app '{}' to '{}'\n", app_name, new_name));

    let app = connection.get_app(app_name).await?;

    let path = format!("/v3/apps/{}", app.guid);
    // Fixed body shape; the name is not escaped.
    let body = format!(r#"{{"name": "{}"}}"#, new_name);

    connection
        .cli_command_without_output(&[
            "curl".to_string(),
            path,
            "-X".to_string(),
            "PATCH".to_string(),
            "-d".to_string(),
            body,
        ])
        .await?;

    ui::print("Renamed your app!\n");

    connection
        .cli_command(&["app".to_string(), new_name])
        .await?;

    Ok(())
}
