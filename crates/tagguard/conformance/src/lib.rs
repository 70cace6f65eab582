//! Tagguard Conformance Suite
//!
//! Verifies the engine's invariants against a ruleset. Each invariant is
//! an independent, self-contained check returning a result record, so an
//! operator can run the suite against a candidate ruleset document before
//! rolling it out.
//!
//! Run with: `cargo test -p tagguard-conformance`

#![deny(unsafe_code)]
#![warn(rust_2018_idioms)]

pub mod invariants;

pub use invariants::{all_passed, run_all, InvariantResult};
