//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//!
//! Why manual mocks instead of mockall?
//! - Repositories that aggregate over products (collection counts, cart
//!   item summaries) need to share state, which is awkward with expectations
//! - Manual mocks are more explicit and easier to debug
//! - We control exactly what they return without macro magic
//!
//! The services accept unsized repositories, so the same mocks back both the
//! service tests and the HTTP tests built on axum-test.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
