//! Caseflow Core - shared domain types for the caseflow workflow engine.
//!
//! This crate provides:
//! - Case records as they move through pipeline stages
//! - The outbox retention store (cases held for a configurable window
//!   after leaving the pipeline)
//! - Seed fixtures for demos and tests
//!
//! Everything here is plain data plus one async store; the moving parts
//! (simulation, streaming) live in `caseflow-sim` and `caseflow-stream`.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod case;
mod outbox;

pub use case::{CasePriority, CaseRecord, CaseStatus, seed_cases};
pub use outbox::Outbox;
