//! End-to-End Integration Tests
//!
//! These tests drive the complete directory stack (service, membership
//! index, role store) over the in-tree storage engines.

mod common;
mod membership;
mod role_crud;
mod scenario;
