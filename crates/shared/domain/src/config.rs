use serde::Deserialize;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level configuration shared by the schema, the catalog and the CLI.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlotmarkConfigInner {
    pub schema: SchemaConfig,
    pub logging: LoggingConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct PlotmarkConfig {
    #[serde(flatten, default)]
    inner: Arc<PlotmarkConfigInner>,
}

impl Deref for PlotmarkConfig {
    type Target = PlotmarkConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for PlotmarkConfig {
    fn deref_mut(&mut self) -> &mut PlotmarkConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// How a `null` default on a descriptor that does not accept `null` is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NullDefaultPolicy {
    /// Reject the declaration.
    #[default]
    Reject,
    /// Accept the declaration; instances start out with `null`, assignments still validate.
    Permit,
}

/// Schema engine knobs.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    pub null_defaults: NullDefaultPolicy,
    /// Buffer size for asynchronous signal subscriptions.
    pub signal_capacity: usize,
}

/// Logging output settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Minimum level: `error`, `warn`, `info`, `debug` or `trace`.
    pub level: String,
    /// Extra filter directives (e.g., `pmark_schema=debug`).
    pub filter: Option<String>,
    /// Directory for rolling log files; console only when unset.
    pub directory: Option<PathBuf>,
    pub json: bool,
}

// --- Default ---

impl Default for SchemaConfig {
    fn default() -> Self {
        Self { null_defaults: NullDefaultPolicy::Reject, signal_capacity: 64 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), filter: None, directory: None, json: false }
    }
}
