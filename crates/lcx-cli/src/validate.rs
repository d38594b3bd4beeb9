//! # Validate Subcommand
//!
//! Structural checks on a crossing configuration file, without constructing
//! a crossing: a configuration that passes here is one `Crossing::new` will
//! accept as-is.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use lcx_control::CrossingConfig;

/// Arguments for the validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the crossing configuration YAML.
    pub config: PathBuf,
}

/// Parse the configuration and report every structural problem found.
pub fn run(args: ValidateArgs) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(&args.config)
        .with_context(|| format!("reading {}", args.config.display()))?;
    let config: CrossingConfig = serde_yaml::from_str(&raw)
        .with_context(|| format!("parsing {}", args.config.display()))?;

    let problems = check(&config);
    if problems.is_empty() {
        println!(
            "{}: ok ({} lanes, capacity {}, validity {}s)",
            args.config.display(),
            config.lanes,
            config.max_capacity_per_lane,
            config.validity_time_secs
        );
        return Ok(());
    }
    for problem in &problems {
        eprintln!("{}: {}", args.config.display(), problem);
    }
    anyhow::bail!("{} problem(s) found", problems.len());
}

/// The structural problems a configuration can carry. A crossing built from
/// a flagged configuration is legal but inert (no lane to queue in, no room
/// to register, or no usable grant).
fn check(config: &CrossingConfig) -> Vec<String> {
    let mut problems = Vec::new();
    if config.lanes == 0 {
        problems.push("crossing has no lanes".to_string());
    }
    if config.max_capacity_per_lane == 0 {
        problems.push("lanes have zero registration capacity".to_string());
    }
    if config.validity_time_secs == 0 {
        problems.push("permission validity window is zero seconds".to_string());
    }
    problems
}
