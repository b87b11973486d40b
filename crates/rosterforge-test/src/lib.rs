//! Shared test fixtures for RosterForge crates.
//!
//! This crate provides data builders and pure checking functions for tests.
//! It depends only on `rosterforge-core` so every other crate can use it as
//! a dev-dependency.
//!
//! - [`workforce`] - employee histories and workforce builders
//! - [`baseline`] - naive round-robin assignment for fairness comparisons
//! - [`invariants`] - roster invariant checks
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! rosterforge-test = { workspace = true }
//! ```

pub mod baseline;
pub mod invariants;
pub mod workforce;

pub use baseline::{round_robin_baseline, spread_of};
pub use invariants::{assert_roster_invariants, roster_violations};
pub use workforce::{
    abc_histories, abc_workforce, history, month, profile, rotating_histories, workforce,
};
