//! Facade crate for Plotmark.
//! Re-exports the domain, kernel, schema and signal crates and assembles the annotation
//! catalog. Keep this crate thin: it composes other crates, it does not implement logic.
//!
//! ## Usage
//! ```rust
//! use pmark::domain::config::PlotmarkConfig;
//!
//! let catalog = pmark::init(&PlotmarkConfig::default()).unwrap();
//! assert!(catalog.schema().model("HTMLLabel").is_ok());
//! ```

pub use pmark_annotations as annotations;
pub use pmark_domain as domain;
pub use pmark_kernel as kernel;
pub use pmark_schema as schema;
pub use pmark_signals as signals;

use pmark_annotations::{AnnotationError, Catalog};
use pmark_domain::config::PlotmarkConfig;
use pmark_schema::Schema;

/// Builds a schema from the `schema` configuration section and installs the catalog.
///
/// # Errors
/// Returns an error if the signal capacity is invalid or a catalog declaration fails.
pub fn init(config: &PlotmarkConfig) -> Result<Catalog, AnnotationError> {
    let schema = Schema::new(config.schema.clone())?;
    tracing::debug!(null_defaults = ?config.schema.null_defaults, "Schema created");
    Catalog::install(schema)
}
