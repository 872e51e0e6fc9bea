//! Integration test harness for the role directory workspace.
//!
//! All tests live under `tests/`; see `tests/main.rs`.
