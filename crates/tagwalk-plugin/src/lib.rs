//! Plugin system for tagwalk.
//!
//! This crate provides the capability traits implemented by convention plugins:
//! - [`Plugin`]: Base trait for all plugins
//! - [`CommitConvention`]: Classifies commits into typed sections
//! - [`TypeTable`]: The runtime-configurable type vocabulary

mod convention;
mod error;
mod plugin;
mod types;

pub use convention::{ALL_SECTIONS, CommitConvention, has_breaking_line};
pub use error::{PluginError, PluginResult};
pub use plugin::Plugin;
pub use types::TypeTable;
