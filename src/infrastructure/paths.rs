//! Path utilities for the Zellij sandbox environment.
//!
//! Inside the plugin sandbox the host filesystem is mounted under `/host`,
//! pointing at the cwd of the last focused terminal (or where Zellij was
//! started). This module centralizes where the plugin keeps its data.

use std::path::PathBuf;

/// Returns the data directory for Stockdeck output (trace files).
///
/// Resolves to `/host/.local/share/zellij/stockdeck` in the sandbox, which
/// typically maps to `~/.local/share/zellij/stockdeck` when Zellij was
/// started from the user's home directory.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("stockdeck")
}
