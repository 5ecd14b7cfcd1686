//! Shared test infrastructure for pi-led integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use pi_led::{ChannelMap, Clock, Level, Operation, OperationSequence, PinDriver, PinError, PinId};

// ============================================================================
// Sample configurations
// ============================================================================

pub const SAMPLE_CONFIG: &str = "
[MyFirstLED]
w = 15

[Colored]
r = 2
g = 3
b = 4
";

pub fn sample_map() -> ChannelMap {
    ChannelMap::parse(SAMPLE_CONFIG).unwrap()
}

/// Single LED with channels a, b, c on pins 1, 2, 3.
pub fn abc_map() -> ChannelMap {
    ChannelMap::parse("[Strip]\na = 1\nb = 2\nc = 3\n").unwrap()
}

// ============================================================================
// Mock pin driver
// ============================================================================

/// Mock driver that records every write. Clones share the same log.
#[derive(Clone, Default)]
pub struct MockPins {
    writes: Arc<Mutex<Vec<(PinId, Level)>>>,
    configured: Arc<Mutex<Vec<PinId>>>,
    failing: Option<PinId>,
}

impl MockPins {
    pub fn new() -> Self {
        Self::default()
    }

    /// Driver whose writes to `pin` fail and are not recorded.
    pub fn failing_on(pin: PinId) -> Self {
        Self {
            failing: Some(pin),
            ..Self::default()
        }
    }

    pub fn writes(&self) -> Vec<(PinId, Level)> {
        self.writes.lock().clone()
    }

    pub fn configured(&self) -> Vec<PinId> {
        self.configured.lock().clone()
    }

    pub fn clear(&self) {
        self.writes.lock().clear();
    }

    /// Last level written to each pin.
    pub fn levels(&self) -> HashMap<PinId, Level> {
        self.writes.lock().iter().copied().collect()
    }
}

impl PinDriver for MockPins {
    fn configure_as_output(&mut self, pin: PinId) -> Result<(), PinError> {
        self.configured.lock().push(pin);
        Ok(())
    }

    fn set(&mut self, pin: PinId, level: Level) -> Result<(), PinError> {
        if self.failing == Some(pin) {
            return Err(PinError::new(pin, std::io::Error::other("write refused")));
        }
        self.writes.lock().push((pin, level));
        Ok(())
    }
}

// ============================================================================
// Mock clock
// ============================================================================

/// Clock that never blocks and counts what the player asked for.
#[derive(Clone, Default)]
pub struct MockClock {
    yields: Arc<AtomicUsize>,
    sleeps: Arc<Mutex<Vec<Duration>>>,
}

impl MockClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn yields(&self) -> usize {
        self.yields.load(Ordering::SeqCst)
    }

    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().clone()
    }
}

impl Clock for MockClock {
    fn sleep(&self, duration: Duration) {
        self.sleeps.lock().push(duration);
    }

    fn yield_now(&self) {
        self.yields.fetch_add(1, Ordering::SeqCst);
    }
}

// ============================================================================
// Helpers
// ============================================================================

pub fn on(pin: u8) -> Operation {
    Operation::On(PinId(pin))
}

pub fn off(pin: u8) -> Operation {
    Operation::Off(PinId(pin))
}

pub fn pause_ms(ms: u64) -> Operation {
    Operation::Pause(Duration::from_millis(ms))
}

pub fn sequence(ops: &[Operation]) -> OperationSequence {
    let mut builder = OperationSequence::builder();
    for op in ops {
        builder.push(*op).unwrap();
    }
    builder.build()
}
