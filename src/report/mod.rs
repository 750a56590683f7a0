//! Report renderers for submission outcomes.
//!
//! - [`terminal`] — colored summary box and per-target table; respects
//!   `--verbose` / `--quiet`.
//!
//! JSON output is rendered directly in `main` via `serde_json`.

pub mod terminal;
