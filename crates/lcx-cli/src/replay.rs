//! # Replay Subcommand
//!
//! Drives a crossing from a YAML operation script over a deterministic
//! clock. Actors are named in the script and resolved to generated
//! identities on first use; administrator-only steps run as whoever holds
//! the capability at that point. Rejected steps are reported and do not
//! abort the replay — the script decides whether to resubmit, the same way
//! an external caller would.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Args;
use serde::Deserialize;

use lcx_control::{Crossing, CrossingConfig};
use lcx_core::{ActorId, ManualClock, Timestamp};

/// Arguments for the replay subcommand.
#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// Crossing configuration YAML; the reference deployment if omitted.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Operation script YAML.
    pub script: PathBuf,
}

/// A replay script: an optional clock start plus the operation sequence.
#[derive(Debug, Deserialize)]
pub struct Script {
    /// Clock start as an ISO8601 UTC timestamp. Defaults to the current
    /// time, which makes the run reproducible only if given explicitly.
    pub start: Option<String>,
    /// Operations, applied in order.
    pub steps: Vec<Step>,
}

/// One scripted operation. Mirrors the crossing's public surface, plus
/// `advance_clock` to step the manual clock between operations.
#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    AddLane { capacity: u32 },
    SetMaxCapacity { lane: usize, value: u32 },
    SetValidityTime { secs: u64 },
    TrainComing,
    TrainGone,
    NoTrainUpdate,
    TryToEnterLane { actor: String, lane: usize },
    RequestPermission { actor: String },
    CarEnter { actor: String },
    CarLeave { lane: usize, actor: String },
    TransferAdministration { actor: String },
    AdvanceClock { secs: u64 },
}

/// Load the script (and configuration, if given), run it, and print the
/// emitted notifications and the audit ledger.
pub fn run(args: ReplayArgs) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_yaml::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?
        }
        None => CrossingConfig::default(),
    };
    let raw = std::fs::read_to_string(&args.script)
        .with_context(|| format!("reading {}", args.script.display()))?;
    let script: Script =
        serde_yaml::from_str(&raw).with_context(|| format!("parsing {}", args.script.display()))?;

    let start = match &script.start {
        Some(s) => Timestamp::parse(s).with_context(|| format!("script start {s:?}"))?,
        None => Timestamp::now(),
    };

    let mut harness = Harness::new(&config, start);
    for (index, step) in script.steps.iter().enumerate() {
        harness.apply(index, step);
    }
    harness.report();
    Ok(())
}

/// A crossing under script control, with the actor-name table and the
/// shared manual clock.
struct Harness {
    crossing: Crossing,
    clock: Arc<ManualClock>,
    actors: HashMap<String, ActorId>,
}

impl Harness {
    fn new(config: &CrossingConfig, start: Timestamp) -> Self {
        let clock = Arc::new(ManualClock::starting_at(start));
        let admin = ActorId::new();
        let mut actors = HashMap::new();
        actors.insert("admin".to_string(), admin);
        Self {
            crossing: Crossing::with_clock(admin, config, clock.clone()),
            clock,
            actors,
        }
    }

    /// The identity a script name refers to, created on first use.
    fn actor(&mut self, name: &str) -> ActorId {
        *self
            .actors
            .entry(name.to_string())
            .or_insert_with(ActorId::new)
    }

    /// Apply one step; a rejection is logged and the replay continues.
    fn apply(&mut self, index: usize, step: &Step) {
        // Administrator-only steps run as the current capability holder, so
        // a scripted transfer hands the rest of the script to the successor.
        let admin = self.crossing.administrator();
        let result = match step {
            Step::AddLane { capacity } => self.crossing.add_lane(admin, *capacity).map(|_| ()),
            Step::SetMaxCapacity { lane, value } => {
                self.crossing.set_max_capacity_of_lane(admin, *lane, *value)
            }
            Step::SetValidityTime { secs } => self.crossing.set_validity_time(admin, *secs),
            Step::TrainComing => self.crossing.train_coming(admin),
            Step::TrainGone => self.crossing.train_gone(admin),
            Step::NoTrainUpdate => self.crossing.no_train_update(admin),
            Step::TryToEnterLane { actor, lane } => {
                let vehicle = self.actor(actor);
                self.crossing.try_to_enter_lane(vehicle, *lane)
            }
            Step::RequestPermission { actor } => {
                let vehicle = self.actor(actor);
                self.crossing.request_permission(vehicle)
            }
            Step::CarEnter { actor } => {
                let vehicle = self.actor(actor);
                self.crossing.car_enter(vehicle)
            }
            Step::CarLeave { lane, actor } => {
                let vehicle = self.actor(actor);
                self.crossing.car_leave(admin, *lane, vehicle)
            }
            Step::TransferAdministration { actor } => {
                let successor = self.actor(actor);
                self.crossing.transfer_administration(admin, successor)
            }
            Step::AdvanceClock { secs } => {
                self.clock.advance_secs(*secs);
                Ok(())
            }
        };
        match result {
            Ok(()) => tracing::info!(index, ?step, "applied"),
            Err(error) => tracing::warn!(index, ?step, %error, "rejected"),
        }
    }

    /// Print actor identities, notifications, and the audit ledger.
    fn report(&self) {
        println!("actors:");
        let mut names: Vec<_> = self.actors.iter().collect();
        names.sort_by(|a, b| a.0.cmp(b.0));
        for (name, id) in names {
            println!("  {name}: {id}");
        }
        println!("events:");
        for event in self.crossing.events() {
            println!("  {event}");
        }
        println!("ledger:");
        for (index, entry) in self.crossing.ledger().entries().iter().enumerate() {
            println!("  {index}: {entry}");
        }
    }
}
