//! Test support for symassert and its users.
//!
//! - **mocks**: an in-memory `Frontend` with scripted packages and
//!   directories
//! - **fixtures**: an authoritative package (`remotepkg`) and a local mirror
//!   (`localpkg`) with matching and deliberately mismatching declarations
//!
//! # Usage
//!
//! ```ignore
//! use symassert::testing::fixtures;
//!
//! let (frontend, loader) = fixtures::frontend_and_loader();
//! let mut from = PathProvider::new(loader.clone())
//!     .with_default_owner(fixtures::REMOTE_LOCAL);
//! from.load(fixtures::REMOTE_LOCAL)?;
//! ```

pub mod fixtures;
pub mod mocks;

pub use mocks::MockFrontend;
