//! Renamify - A Cloud Foundry CLI plugin that renames apps
//!
//! Renamify adds a single command to the cf CLI: `cf renamify APP_NAME`
//! renames a deployed application by appending `-potato` to its name.
//!
//! # Architecture
//!
//! The codebase follows a thin layered layout:
//!
//! - [`plugin`] - Host plugin contract (metadata descriptor, process entry)
//! - [`renamer`] - The renamify command adapter and rename workflow
//! - [`connection`] - Abstraction for the CLI connection capability
//! - [`config`] - cf CLI configuration file loading
//! - [`ui`] - Output utilities
//!
//! # Behavior Notes
//!
//! 1. Dispatch with an unrecognized first argument is a silent no-op: the
//!    host may invoke the entry point during its own lifecycle (e.g.
//!    metadata harvesting) and an error there would break installation.
//! 2. All failures are printed to stdout and terminate the process with a
//!    nonzero status. There is no retry and no rollback.

pub mod config;
pub mod connection;
pub mod plugin;
pub mod renamer;
pub mod ui;
