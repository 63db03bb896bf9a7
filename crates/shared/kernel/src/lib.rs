//! Kernel utilities shared across slices.
//! Keep this crate lightweight; today it only owns configuration loading.
//!
//! ## Config loading
//! ```rust,no_run
//! use pmark_kernel::config::load_plotmark_config;
//!
//! let cfg = load_plotmark_config(Some("pmark.toml")).unwrap_or_default();
//! println!("null defaults: {:?}", cfg.schema.null_defaults);
//! ```
pub mod config;

pub use pmark_domain as domain;
