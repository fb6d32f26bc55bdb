//! Shared infrastructure for the simulation core tests.

pub mod harness;

pub use harness::{TestContext, inst};
