//! Metadata shared by every convention.

/// Identifies a convention implementation.
pub trait Plugin: Send + Sync {
    /// Name used to select the plugin in configuration (`"basic"`, ...).
    fn name(&self) -> &'static str;

    /// Version of the crate providing the plugin.
    fn version(&self) -> &'static str;

    /// One-line summary shown in help output.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns `name@version`, as written to logs.
    fn identity(&self) -> String {
        format!("{}@{}", self.name(), self.version())
    }
}
