//! # Domain Types
//!
//! Pure types shared by the schema engine, the annotation catalog and the CLI: named
//! enumerations, descriptor flags, deprecation records and configuration structs.
//! Keep it lean: no I/O and no validation logic beyond trivial helpers.

pub mod config;
pub mod deprecation;
pub mod enums;
pub mod flags;
