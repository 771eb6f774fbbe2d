use rtlbridge_core::{Access, Session, SessionConfig, SignalId, SignalMemory};

use super::models::{CounterLayout, CounterModel};

/// Installs a fmt subscriber that writes through the test harness.
///
/// Safe to call from every test; only the first call installs it.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Signal ids of [`counter_session`].
#[derive(Clone, Copy, Debug)]
pub struct CounterIds {
    pub clk: SignalId,
    pub rst: SignalId,
    pub en: SignalId,
    pub count: SignalId,
    pub next: SignalId,
}

/// A session over an 8-bit counter with every port registered under `top`.
pub fn counter_session(config: SessionConfig) -> (Session<CounterModel>, CounterIds) {
    init_tracing();
    let mut memory = SignalMemory::default();
    let layout = CounterLayout::allocate(&mut memory);
    let mut sim = Session::new(CounterModel::new(layout), memory, config);

    let mut reg = |path: &str, addr, width, access| {
        sim.register_signal(path, addr, width, false, access)
            .unwrap_or_else(|e| panic!("register {path}: {e}"))
    };
    let ids = CounterIds {
        clk: reg("top.clk", layout.clk, 1, Access::ReadWrite),
        rst: reg("top.rst", layout.rst, 1, Access::ReadWrite),
        en: reg("top.en", layout.en, 1, Access::ReadWrite),
        count: reg("top.count", layout.count, 8, Access::ReadOnly),
        next: reg("top.next", layout.next, 8, Access::ReadOnly),
    };
    (sim, ids)
}

/// Runs one full clock cycle: raise the clock at `CombUpdateDone`, let it settle,
/// run to `EndOfStep`, then reopen writes and drop the clock for the next step.
pub fn clock_cycle(sim: &mut Session<CounterModel>, ids: CounterIds) {
    use rtlbridge_core::Phase;

    assert_eq!(sim.advance_one_phase().unwrap(), Some(Phase::CombUpdateDone));
    sim.write(ids.clk, 1).unwrap();
    assert_eq!(sim.advance_one_phase().unwrap(), Some(Phase::CombUpdateDone));
    assert_eq!(
        sim.advance_one_phase().unwrap(),
        Some(Phase::BeforeEdge { clock: Some(ids.clk) })
    );
    assert_eq!(sim.advance_one_phase().unwrap(), Some(Phase::EndOfStep));
    sim.set_write_only();
    sim.write(ids.clk, 0).unwrap();
}
