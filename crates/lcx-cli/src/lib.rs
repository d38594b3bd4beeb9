//! # lcx-cli — Level Crossing Command-Line Interface
//!
//! Operator toolchain for the LCX Stack: validate crossing configuration
//! files and replay scripted operation sequences against a deterministic
//! clock, reporting the emitted notifications and the audit ledger.
//!
//! ## Subcommands
//!
//! - `validate` — Structural checks on a crossing configuration file
//! - `replay` — Drive a crossing from a YAML operation script
//!
//! ## Crate Policy
//!
//! - CLI construction (argument parsing) is separated from business logic.
//! - Handler functions delegate to `lcx-control` — no crossing semantics
//!   live here.

pub mod replay;
pub mod validate;
