//! Multi-core execution harness.
//!
//! Each core runs on its own OS thread and takes the shared [`BusLock`] for
//! its entire script. Scripts therefore never interleave at instruction
//! level, and each core's transcript block is contiguous. Which core goes
//! first is up to the scheduler.

use std::io;
use std::thread;

use thiserror::Error;

use crate::execute::{run_script, ScriptFault, ScriptReport};
use crate::{BusLock, Core, HarnessConfig, Notice, Script, TranscriptEntry};

/// Failure of a harness run.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// The OS refused to start a worker thread.
    #[error("failed to spawn worker for core {core_id}")]
    Spawn {
        /// One-based core identifier.
        core_id: usize,
        /// Underlying spawn failure.
        #[source]
        source: io::Error,
    },
    /// A worker thread panicked before finishing its script.
    #[error("worker for core {core_id} panicked")]
    WorkerPanicked {
        /// One-based core identifier.
        core_id: usize,
    },
    /// A script stopped on a non-guarded fault.
    #[error("core {core_id}: {source}")]
    Script {
        /// One-based core identifier.
        core_id: usize,
        /// Fault that stopped the script.
        #[source]
        source: ScriptFault,
        /// Reports of the cores that finished, plus the full bus transcript.
        partial: HarnessReport,
    },
}

/// First failure seen while joining, before the partial report exists.
enum Failure {
    Spawn { core_id: usize, source: io::Error },
    Panicked { core_id: usize },
    Script { core_id: usize, source: ScriptFault },
}

impl Failure {
    fn into_error(self, partial: HarnessReport) -> HarnessError {
        match self {
            Self::Spawn { core_id, source } => HarnessError::Spawn { core_id, source },
            Self::Panicked { core_id } => HarnessError::WorkerPanicked { core_id },
            Self::Script { core_id, source } => HarnessError::Script {
                core_id,
                source,
                partial,
            },
        }
    }
}

/// Final state of one core after its script finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreReport {
    /// One-based core identifier.
    pub core_id: usize,
    /// The core as its script left it.
    pub core: Core,
    /// Script accounting.
    pub script: ScriptReport,
}

/// Result of a completed harness run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessReport {
    /// Per-core results ordered by core id.
    pub cores: Vec<CoreReport>,
    /// Every notice recorded on the bus, in lock order.
    pub transcript: Vec<TranscriptEntry>,
}

impl HarnessReport {
    /// Looks up the report for `core_id`.
    #[must_use]
    pub fn core(&self, core_id: usize) -> Option<&CoreReport> {
        self.cores.iter().find(|report| report.core_id == core_id)
    }
}

/// A set of cores bound to scripts, serialized on one bus.
#[derive(Debug, Default)]
pub struct Harness {
    bus: BusLock,
    slots: Vec<(Core, Script)>,
}

impl Harness {
    /// Creates an empty harness on the given bus.
    #[must_use]
    pub const fn new(bus: BusLock) -> Self {
        Self {
            bus,
            slots: Vec::new(),
        }
    }

    /// Creates `config.cores` identical cores, each bound to a copy of
    /// `script`, on a fresh bus.
    #[must_use]
    pub fn with_config(config: &HarnessConfig, script: &Script) -> Self {
        let mut harness = Self::new(BusLock::new());
        for _ in 0..config.cores {
            harness.add_core(Core::with_config(&config.core), script.clone());
        }
        harness
    }

    /// Binds `core` to `script` and returns its one-based core id.
    pub fn add_core(&mut self, core: Core, script: Script) -> usize {
        self.slots.push((core, script));
        self.slots.len()
    }

    /// Number of cores bound so far.
    #[must_use]
    pub fn core_count(&self) -> usize {
        self.slots.len()
    }

    /// The shared bus handle.
    #[must_use]
    pub const fn bus(&self) -> &BusLock {
        &self.bus
    }

    /// Spawns one worker per core and waits for all of them.
    ///
    /// Every worker is joined even when an earlier one failed. A spawn
    /// failure wins; otherwise the first failure in core-id order is
    /// returned. A script fault carries the reports of the cores that did
    /// finish.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] when a worker cannot be spawned, panics, or
    /// its script stops on a non-guarded fault.
    pub fn run(self) -> Result<HarnessReport, HarnessError> {
        let Self { bus, slots } = self;
        let mut workers = Vec::with_capacity(slots.len());
        let mut spawn_error = None;

        for (core_id, (core, script)) in (1..).zip(slots) {
            let worker_bus = bus.clone();
            let spawned = thread::Builder::new()
                .name(format!("core-{core_id}"))
                .spawn(move || run_worker(&worker_bus, core_id, core, &script));
            match spawned {
                Ok(handle) => workers.push((core_id, handle)),
                Err(source) => {
                    spawn_error = Some(Failure::Spawn { core_id, source });
                    break;
                }
            }
        }

        let mut cores = Vec::with_capacity(workers.len());
        let mut first_failure = spawn_error;
        for (core_id, handle) in workers {
            match handle.join() {
                Ok(Ok(report)) => cores.push(report),
                Ok(Err(source)) => {
                    first_failure.get_or_insert(Failure::Script { core_id, source });
                }
                Err(_) => {
                    first_failure.get_or_insert(Failure::Panicked { core_id });
                }
            }
        }

        let report = HarnessReport {
            cores,
            transcript: bus.transcript(),
        };
        match first_failure {
            Some(failure) => Err(failure.into_error(report)),
            None => Ok(report),
        }
    }
}

fn run_worker(
    bus: &BusLock,
    core_id: usize,
    mut core: Core,
    script: &Script,
) -> Result<CoreReport, ScriptFault> {
    let mut guard = bus.acquire();
    guard.record(core_id, Notice::CoreStarted { core_id });
    let report = run_script(&mut core, script, &mut guard, core_id)?;
    drop(guard);

    Ok(CoreReport {
        core_id,
        core,
        script: report,
    })
}
