//! plugin::metadata
//!
//! Descriptor types for the host plugin contract.
//!
//! # Design
//!
//! The host discovers a plugin's commands by harvesting a static metadata
//! descriptor at install time. The JSON field names here match the contract
//! the CLI defines, so the serialized form is what the host expects.
//!
//! The descriptor is static data: building and serializing it must never
//! touch the connection or perform I/O.

use serde::{Deserialize, Serialize};

/// Plugin metadata descriptor.
///
/// Returned by [`crate::plugin::Plugin::metadata`] and serialized to JSON
/// for the host at install time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginMetadata {
    /// Plugin name, shown in `cf plugins`. Should contain no spaces.
    #[serde(rename = "Name")]
    pub name: String,

    /// Plugin version.
    #[serde(rename = "Version")]
    pub version: VersionType,

    /// Minimum CLI version the plugin supports.
    #[serde(rename = "MinCliVersion")]
    pub min_cli_version: VersionType,

    /// Commands this plugin contributes.
    #[serde(rename = "Commands")]
    pub commands: Vec<Command>,
}

/// A semantic version triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionType {
    #[serde(rename = "Major")]
    pub major: u32,
    #[serde(rename = "Minor")]
    pub minor: u32,
    #[serde(rename = "Build")]
    pub build: u32,
}

impl std::fmt::Display for VersionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.build)
    }
}

/// A command descriptor: name and help surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    /// The subcommand name, e.g. `renamify` for `cf renamify`.
    #[serde(rename = "Name")]
    pub name: String,

    /// One-line help shown by `cf help`.
    #[serde(rename = "HelpText")]
    pub help_text: String,

    /// Usage details shown by `cf help <command>`.
    #[serde(rename = "UsageDetails")]
    pub usage_details: Usage,
}

/// Usage string for a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    #[serde(rename = "Usage")]
    pub usage: String,
}
