use rtlbridge_core::{RtlModel, SignalAddr, SignalMemory};

/// Storage of the counter's ports.
#[derive(Clone, Copy, Debug)]
pub struct CounterLayout {
    pub clk: SignalAddr,
    pub rst: SignalAddr,
    pub en: SignalAddr,
    pub count: SignalAddr,
    pub next: SignalAddr,
}

impl CounterLayout {
    pub fn allocate(memory: &mut SignalMemory) -> Self {
        Self {
            clk: memory.allocate(1),
            rst: memory.allocate(1),
            en: memory.allocate(1),
            count: memory.allocate(1),
            next: memory.allocate(1),
        }
    }
}

/// 8-bit counter clocked on the rising edge of `clk`.
///
/// `next` is the combinational successor of `count`; the register takes it on each
/// edge unless `rst` is high. With a limit set, the model finishes once `count`
/// reaches it.
#[derive(Debug)]
pub struct CounterModel {
    layout: CounterLayout,
    last_clk: u8,
    limit: Option<u8>,
    done: bool,
    pub comb_evals: usize,
    pub edge_evals: usize,
    pub aborted: usize,
}

impl CounterModel {
    pub fn new(layout: CounterLayout) -> Self {
        Self {
            layout,
            last_clk: 0,
            limit: None,
            done: false,
            comb_evals: 0,
            edge_evals: 0,
            aborted: 0,
        }
    }

    /// Finishes simulation on the edge that brings `count` to `limit`.
    pub fn set_limit(&mut self, limit: u8) {
        self.limit = Some(limit);
    }

    /// Clears the finish request and the limit, so simulation can continue.
    pub fn rearm(&mut self) {
        self.done = false;
        self.limit = None;
    }
}

impl RtlModel for CounterModel {
    fn name(&self) -> &str {
        "counter"
    }

    fn eval_comb(&mut self, memory: &mut SignalMemory) {
        self.comb_evals += 1;
        if memory.read_u8(self.layout.clk) & 1 == 0 {
            self.last_clk = 0;
        }
        let count = memory.read_u8(self.layout.count);
        let next = if memory.read_u8(self.layout.en) & 1 == 1 {
            count.wrapping_add(1)
        } else {
            count
        };
        memory.write_u8(self.layout.next, next);
    }

    fn pending_edge(&mut self, memory: &SignalMemory) -> Option<SignalAddr> {
        let clk = memory.read_u8(self.layout.clk) & 1;
        if clk == 1 && self.last_clk == 0 {
            return Some(self.layout.clk);
        }
        self.last_clk = clk;
        None
    }

    fn eval_edge(&mut self, memory: &mut SignalMemory, clock: SignalAddr) {
        assert_eq!(clock, self.layout.clk);
        self.edge_evals += 1;
        self.last_clk = memory.read_u8(self.layout.clk) & 1;
        let count = if memory.read_u8(self.layout.rst) & 1 == 1 {
            0
        } else {
            memory.read_u8(self.layout.next)
        };
        memory.write_u8(self.layout.count, count);
        if self.limit.is_some_and(|limit| count >= limit) {
            self.done = true;
        }
    }

    fn reset_eval(&mut self) {
        self.aborted += 1;
    }

    fn finished(&self) -> bool {
        self.done
    }
}

/// Purely combinational design: `y = a ^ b` over 16-bit ports, no clock.
#[derive(Debug)]
pub struct XorModel {
    pub a: SignalAddr,
    pub b: SignalAddr,
    pub y: SignalAddr,
}

impl XorModel {
    pub fn allocate(memory: &mut SignalMemory) -> Self {
        Self {
            a: memory.allocate(2),
            b: memory.allocate(2),
            y: memory.allocate(2),
        }
    }
}

impl RtlModel for XorModel {
    fn eval_comb(&mut self, memory: &mut SignalMemory) {
        let a = memory.read_uint(self.a, 2);
        let b = memory.read_uint(self.b, 2);
        memory.write_uint(self.y, 2, a ^ b);
    }

    fn pending_edge(&mut self, _memory: &SignalMemory) -> Option<SignalAddr> {
        None
    }

    fn eval_edge(&mut self, _memory: &mut SignalMemory, _clock: SignalAddr) {}
}
