//! # lcx-core — Foundational Types for the LCX Stack
//!
//! The bedrock of the Level Crossing Control Stack. Every other crate in the
//! workspace depends on `lcx-core`; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** `ActorId` wraps the caller
//!    identity — no bare UUIDs or strings for identifiers.
//!
//! 2. **UTC-only timestamps.** `Timestamp` enforces UTC with Z suffix and
//!    seconds precision; non-UTC inputs are rejected at construction.
//!
//! 3. **The clock is a seam.** Time enters the system through the `Clock`
//!    trait only, so expiry logic is testable with a `ManualClock` and the
//!    production path uses `SystemClock`.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `lcx-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod identity;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use identity::ActorId;
pub use temporal::{Clock, ManualClock, SystemClock, TimeError, Timestamp};
