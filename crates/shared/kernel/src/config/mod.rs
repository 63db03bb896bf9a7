use config::{Config, Environment, File, Map};
use pmark_domain::config::PlotmarkConfig;
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::Path;
use tracing::info;

/// Prefix of environment overrides (e.g., `PMARK__SCHEMA__NULL_DEFAULTS=permit`).
pub const ENV_PREFIX: &str = "PMARK";
const ENV_SEPARATOR: &str = "__";

/// Custom error type for config loading.
#[pmark_derive::pmark_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// A reusable configuration loader that combines file-based settings with environment overrides.
///
/// This function implements a layered configuration strategy:
/// 1. **File**: when `path` is given, settings are read from it (TOML, JSON or YAML, by
///    extension). The file must exist.
/// 2. **Environment Overrides**: values from environment variables prefixed with `PMARK__`
///    are overlaid. Nested structures are accessed using double underscores
///    (e.g., `PMARK__LOGGING__LEVEL` maps to `logging.level`).
///
/// Without a path, only the environment is consulted and `T`'s serde defaults fill the
/// rest.
///
/// # Errors
/// This function will return an error if:
/// * The specified configuration file cannot be found or parsed.
/// * The merged content does not match the structure of type `T`.
///
/// # Example
/// ```rust
/// use pmark_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct AppConfig {
///     port: u16,
/// }
///
/// let cfg: AppConfig = load_config(Some("config/local.toml")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    layered(path.as_ref().map(AsRef::as_ref), None)
}

/// [`load_config`] specialised to the workspace configuration.
pub fn load_plotmark_config(path: Option<impl AsRef<Path>>) -> Result<PlotmarkConfig, ConfigError> {
    load_config(path)
}

fn layered<T>(path: Option<&Path>, env: Option<Map<String, String>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let mut builder = Config::builder();
    if let Some(path) = path {
        info!("Loading config from {}", path.display());
        builder = builder.add_source(File::from(path).required(true));
    }
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator(ENV_SEPARATOR)
            .separator(ENV_SEPARATOR)
            .convert_case(config::Case::Snake)
            .source(env),
    );

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
