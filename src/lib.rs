//! Test-only root package; see `tests/` for cross-crate integration tests.
