//! Simulation session: owns the backend, the signal memory and every handle.
//!
//! A session is the unit of ownership of the bridge. Handles are created only
//! through it and addressed by `SignalId`, signal memory is the session's own arena,
//! and the write gate is created per session. Dropping (or finalizing) the session
//! releases all of them together.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, warn};

use crate::common::{ConstructionError, Result, SignalAddr, SignalId, SimError};
use crate::config::{SessionConfig, SignalDecl, SignalTable};
use crate::events::{CallbackId, ChangeSet, PendingEventQueue};
use crate::namespace::{self, SignalNamespace};
use crate::signal::{Access, SignalHandle, SignalMemory, WriteGate};
use crate::stats::SessionStats;

use super::coordinator::{StepContext, StepCoordinator};
use super::model::RtlModel;
use super::phase::{Phase, StepState};

/// Source of session tags carried by every `SignalId`.
static NEXT_SESSION: AtomicU64 = AtomicU64::new(0);

/// One simulation of one design.
pub struct Session<M: RtlModel> {
    tag: u64,
    model: M,
    memory: SignalMemory,
    handles: Vec<SignalHandle>,
    namespace: SignalNamespace,
    by_addr: HashMap<SignalAddr, SignalId>,
    change_set: ChangeSet,
    queue: PendingEventQueue,
    coordinator: StepCoordinator,
    gate: WriteGate,
    config: SessionConfig,
    stats: SessionStats,
    time: u64,
}

impl<M: RtlModel> fmt::Debug for Session<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("tag", &self.tag)
            .field("model", &self.model.name())
            .field("signals", &self.handles.len())
            .field("memory_len", &self.memory.len())
            .field("state", &self.coordinator.state())
            .field("write_gate_open", &self.gate.is_open())
            .field("pending", &self.queue.len())
            .field("time", &self.time)
            .finish_non_exhaustive()
    }
}

impl<M: RtlModel> Session<M> {
    /// Creates a session over `model`, which evaluates its design inside `memory`.
    pub fn new(model: M, memory: SignalMemory, config: SessionConfig) -> Self {
        let gate = WriteGate::new();
        let tag = NEXT_SESSION.fetch_add(1, Ordering::Relaxed);
        debug!(tag, model = model.name(), memory_len = memory.len(), "session created");
        Self {
            tag,
            model,
            memory,
            handles: Vec::new(),
            namespace: SignalNamespace::new(),
            by_addr: HashMap::new(),
            change_set: ChangeSet::new(),
            queue: PendingEventQueue::new(),
            coordinator: StepCoordinator::new(gate.clone()),
            gate,
            config,
            stats: SessionStats::default(),
            time: 0,
        }
    }

    /// Registers a scalar signal under the dotted `path`.
    ///
    /// The new handle's change cache is stored immediately, so the first evaluation
    /// compares against the value at registration time. Registering the same path
    /// again with an identical layout returns the existing handle.
    ///
    /// # Errors
    ///
    /// [`SimError::Shape`] for widths above the scalar limit, and
    /// [`SimError::Construction`] for zero widths, storage outside signal memory,
    /// malformed paths, path conflicts, or a re-registration with a different layout.
    pub fn register_signal(
        &mut self,
        path: &str,
        addr: SignalAddr,
        bit_width: u32,
        is_signed: bool,
        access: Access,
    ) -> Result<SignalId> {
        self.register_shaped(path, addr, bit_width, is_signed, access, &[])
    }

    /// Registers one record of a generated signal table.
    ///
    /// # Errors
    ///
    /// As [`register_signal`](Self::register_signal), plus [`SimError::Shape`] when
    /// the record's `type_width` describes an array.
    pub fn register_decl(&mut self, decl: &SignalDecl) -> Result<SignalId> {
        self.register_shaped(
            &decl.path,
            decl.offset,
            decl.bit_width,
            decl.signed,
            decl.access(),
            &decl.type_width,
        )
    }

    /// Registers every record of a JSON signal table, in order.
    ///
    /// Stops at the first failing record; records before it stay registered.
    ///
    /// # Errors
    ///
    /// [`SimError::Config`] for malformed JSON, otherwise as
    /// [`register_decl`](Self::register_decl).
    pub fn register_table(&mut self, json: &str) -> Result<Vec<SignalId>> {
        let table = SignalTable::from_json(json)?;
        table
            .signals
            .iter()
            .map(|decl| self.register_decl(decl))
            .collect()
    }

    fn register_shaped(
        &mut self,
        path: &str,
        addr: SignalAddr,
        bit_width: u32,
        is_signed: bool,
        access: Access,
        type_width: &[usize],
    ) -> Result<SignalId> {
        let segments = namespace::split_path(path)?;
        namespace::check_scalar(path, type_width)?;
        let mut handle = SignalHandle::new(
            access,
            addr,
            bit_width,
            is_signed,
            path,
            self.gate.clone(),
            &self.memory,
        )?;

        if let Some(existing) = self.namespace.lookup(&segments) {
            return if self.handles[existing.index()].same_layout(&handle) {
                Ok(existing)
            } else {
                Err(ConstructionError::DuplicateSignal {
                    path: path.to_owned(),
                }
                .into())
            };
        }

        let id = SignalId::new(self.tag, self.handles.len());
        self.namespace.register(&segments, id, type_width)?;
        handle.cache_store(&self.memory);
        let _ = self.by_addr.entry(addr).or_insert(id);
        self.handles.push(handle);
        debug!(signal = path, %addr, bit_width, is_signed, ?access, "signal registered");
        Ok(id)
    }

    /// Index of `id` in this session, if it was issued here.
    fn slot(&self, id: SignalId) -> Result<usize> {
        if id.session() == self.tag && id.index() < self.handles.len() {
            Ok(id.index())
        } else {
            Err(SimError::UnknownSignal(id))
        }
    }

    fn handle(&self, id: SignalId) -> Result<&SignalHandle> {
        Ok(&self.handles[self.slot(id)?])
    }

    /// The handle behind `id`.
    ///
    /// # Errors
    ///
    /// [`SimError::UnknownSignal`] for an id of another session.
    pub fn signal(&self, id: SignalId) -> Result<&SignalHandle> {
        self.handle(id)
    }

    /// Looks up a signal by dotted path.
    pub fn lookup(&self, path: &str) -> Option<SignalId> {
        self.namespace.lookup_dotted(path)
    }

    /// The signal namespace.
    pub const fn namespace(&self) -> &SignalNamespace {
        &self.namespace
    }

    /// Physical name of a signal.
    ///
    /// # Errors
    ///
    /// [`SimError::UnknownSignal`] for an id of another session.
    pub fn name(&self, id: SignalId) -> Result<&str> {
        Ok(self.handle(id)?.name())
    }

    /// Reads the current value of a signal.
    ///
    /// # Errors
    ///
    /// [`SimError::UnknownSignal`] for an id of another session.
    pub fn read(&self, id: SignalId) -> Result<i128> {
        Ok(self.handle(id)?.read(&self.memory))
    }

    /// Writes a signal.
    ///
    /// # Errors
    ///
    /// [`SimError::Capability`] for read-only signals or while the write gate is
    /// closed, [`SimError::Range`] for values that do not fit, and
    /// [`SimError::UnknownSignal`] for an id of another session.
    pub fn write(&mut self, id: SignalId, value: i128) -> Result<()> {
        let handle = &self.handles[self.slot(id)?];
        match handle.write(&mut self.memory, value) {
            Ok(()) => {
                self.stats.writes += 1;
                Ok(())
            }
            Err(err) => {
                self.stats.writes_rejected += 1;
                Err(err)
            }
        }
    }

    /// Registers `callback` to be queued on the next change of a signal.
    ///
    /// Adds the signal to the change set. On its first insertion the change cache is
    /// refreshed, so only changes from now on trigger callbacks.
    ///
    /// # Errors
    ///
    /// [`SimError::UnknownSignal`] for an id of another session.
    pub fn wait(&mut self, id: SignalId, callback: CallbackId) -> Result<()> {
        let slot = self.slot(id)?;
        let handle = &mut self.handles[slot];
        handle.push_callback(callback);
        if self.change_set.insert(id) {
            handle.cache_store(&self.memory);
        }
        Ok(())
    }

    /// Runs the backend to the next phase boundary.
    ///
    /// # Returns
    ///
    /// The boundary reached, or `None` exactly once when simulation has ended.
    ///
    /// # Errors
    ///
    /// [`SimError::SequenceExhausted`] after the end of simulation until
    /// [`reset`](Self::reset), and [`SimError::EventQueue`] if the pending event
    /// queue cannot grow.
    pub fn advance_one_phase(&mut self) -> Result<Option<Phase>> {
        let mut cx = StepContext {
            model: &mut self.model,
            memory: &mut self.memory,
            handles: &mut self.handles,
            change_set: &self.change_set,
            queue: &mut self.queue,
            by_addr: &self.by_addr,
            config: &self.config,
            stats: &mut self.stats,
        };
        let phase = self.coordinator.advance(&mut cx)?;
        if phase == Some(Phase::EndOfStep) {
            debug!(step = self.stats.steps, time = self.time, "step complete");
        }
        Ok(phase)
    }

    /// Advances until the current step ends.
    ///
    /// Pending events accumulate in the queue; nothing is dispatched.
    ///
    /// # Returns
    ///
    /// `true` if the step reached `EndOfStep`, `false` if simulation ended first.
    ///
    /// # Errors
    ///
    /// As [`advance_one_phase`](Self::advance_one_phase).
    pub fn run_step(&mut self) -> Result<bool> {
        loop {
            match self.advance_one_phase()? {
                Some(Phase::EndOfStep) => return Ok(true),
                Some(_) => {}
                None => return Ok(false),
            }
        }
    }

    /// Aborts any open step, reopens writes and clears the pending event queue.
    pub fn reset(&mut self) {
        let dropped = self.queue.len();
        self.coordinator.reset(&mut self.model, &mut self.queue);
        self.stats.resets += 1;
        debug!(dropped, resets = self.stats.resets, "session reset");
    }

    /// Reopens writes without aborting the phase sequence.
    pub fn set_write_only(&mut self) {
        self.coordinator.set_write_only();
    }

    /// Takes every pending callback, oldest first, leaving the queue empty.
    pub fn drain_pending_events(&mut self) -> Vec<CallbackId> {
        self.queue.drain()
    }

    /// Number of callbacks waiting to be drained.
    pub fn pending_len(&self) -> usize {
        self.queue.len()
    }

    /// Position in the phase sequence.
    pub const fn state(&self) -> StepState {
        self.coordinator.state()
    }

    /// Returns `true` while writes are permitted.
    pub fn write_gate_open(&self) -> bool {
        self.gate.is_open()
    }

    /// Handles currently checked for changes.
    pub const fn change_set(&self) -> &ChangeSet {
        &self.change_set
    }

    /// Simulation time stamp kept for the driver.
    pub const fn time(&self) -> u64 {
        self.time
    }

    /// Sets the simulation time stamp. Time never moves backwards.
    pub fn set_time(&mut self, time: u64) {
        if time < self.time {
            warn!(now = self.time, requested = time, "ignoring backwards time");
            return;
        }
        self.time = time;
    }

    /// Session counters.
    pub const fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Session configuration.
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The backend.
    pub const fn model(&self) -> &M {
        &self.model
    }

    /// The backend, mutably (e.g. to configure it between steps).
    pub const fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// Signal memory, as the backend sees it.
    pub const fn memory(&self) -> &SignalMemory {
        &self.memory
    }

    /// Signal memory, mutably. Writes through it bypass the capability checks.
    pub const fn memory_mut(&mut self) -> &mut SignalMemory {
        &mut self.memory
    }

    /// Tears the session down, returning the backend and the final statistics.
    ///
    /// Pending events are discarded and every handle is released with the memory.
    pub fn finalize(mut self) -> (M, SessionStats) {
        if self.coordinator.state().in_progress() {
            self.model.reset_eval();
        }
        let dropped = self.queue.len();
        if dropped > 0 {
            debug!(dropped, "discarding pending events at teardown");
        }
        debug!(model = self.model.name(), "session finalized\n{}", self.stats);
        (self.model, self.stats)
    }
}
