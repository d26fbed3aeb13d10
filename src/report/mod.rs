//! Renderers for evaluation results.
//!
//! - [`terminal`] — colored summary box and per-status tables; respects
//!   `--verbose` / `--quiet`. Also lists the effective rule set.
//! - JSON output is a plain `serde_json` dump of
//!   [`PackageVerdict`](crate::models::PackageVerdict) and lives in `main`.

pub mod terminal;
