//! Export core modules shared across CLI and tests.

#[cfg(feature = "excel")]
pub mod excel_core;
