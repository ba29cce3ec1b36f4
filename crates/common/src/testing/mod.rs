//! Reusable test doubles for the auth stack
//!
//! Exposed as a normal module so downstream crates can use the same mocks in
//! their own tests.

pub mod mocks;

pub use mocks::{MockCredentialStore, MockIdentityApi};
