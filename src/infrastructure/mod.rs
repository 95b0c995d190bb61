//! Infrastructure utilities for the plugin sandbox.
//!
//! # Modules
//!
//! - [`paths`]: Data directory resolution under the `/host` mount

pub mod paths;

pub use paths::get_data_dir;
