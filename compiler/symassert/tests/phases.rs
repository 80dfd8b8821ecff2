// Test code uses unwrap/expect for clarity - panics provide good test failure messages
#![allow(clippy::unwrap_used, clippy::expect_used)]

//! End-to-end tests over the `remotepkg` / `localpkg` fixtures.
//!
//! # Organization
//!
//! - `common/` - Provider setup shared by the phases
//! - `load/` - Providers and the shared load cache
//! - `resolve/` - Symbol resolution across two providers
//! - `compare/` - Match and mismatch tables over resolved pairs
//!
//! # Running Phase Tests
//!
//! ```bash
//! cargo test -p symassert --test phases
//!
//! # Run specific phase
//! cargo test -p symassert --test phases compare
//! ```

#[path = "phases/common/mod.rs"]
mod common;

#[path = "phases/load/mod.rs"]
mod load;

#[path = "phases/resolve/mod.rs"]
mod resolve;

#[path = "phases/compare/mod.rs"]
mod compare;
