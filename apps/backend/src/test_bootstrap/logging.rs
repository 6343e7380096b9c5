//! Logging bootstrap for unit tests.
//!
//! Integration tests call `backend_test_support::logging::init()` from their
//! own support module; unit tests get the same behavior via the `ctor` hook
//! in lib.rs.

pub fn init() {
    backend_test_support::logging::init();
}
