//! Plugin process entry.
//!
//! The host starts this binary once at install time to harvest metadata
//! and once per user command to dispatch; `plugin::start` handles both.

use renamify::plugin;
use renamify::renamer::RenamerPlugin;

#[tokio::main]
async fn main() {
    plugin::start(&RenamerPlugin).await;
}
