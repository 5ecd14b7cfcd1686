//! Pattern player: replays the active sequence against the outputs forever.
//!
//! Provides [`Player`], which walks the sequence published in a
//! [`PatternBuffer`] one operation per [`step`](Player::step), and
//! [`run_player`], the blocking loop around it.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::buffer::PatternBuffer;
use crate::driver::{OutputBank, PinDriver};
use crate::sequence::OperationSequence;
use crate::time::Clock;
use crate::types::{Level, Operation, PinId};

// Upper bound on how long an idle player goes without checking `closing`.
const IDLE_WAIT: Duration = Duration::from_millis(100);

/// Executes the active sequence one operation at a time.
///
/// Holds its own `Arc` to the sequence it is walking. Before every step it
/// reloads the buffer; if a different sequence has been installed since the
/// previous step it switches to it and starts over at the first operation.
///
/// # Type Parameters
/// * `D` - Pin driver type
/// * `C` - Clock used for pauses and yields
pub struct Player<D: PinDriver, C: Clock> {
    buffer: Arc<PatternBuffer>,
    outputs: Arc<OutputBank<D>>,
    clock: C,
    sequence: Arc<OperationSequence>,
    cursor: usize,
}

impl<D: PinDriver, C: Clock> Player<D, C> {
    /// Creates a player positioned at the start of the active sequence.
    pub fn new(buffer: Arc<PatternBuffer>, outputs: Arc<OutputBank<D>>, clock: C) -> Self {
        let sequence = buffer.load();
        Self {
            buffer,
            outputs,
            clock,
            sequence,
            cursor: 0,
        }
    }

    /// Executes one operation and returns it.
    ///
    /// * `On`/`Off` write the pin; a driver failure is logged and skipped.
    /// * `Pause` blocks for its duration.
    /// * `End` rewinds to the first operation.
    ///
    /// Static sequences yield the thread after every operation, and once
    /// more at `End`, so a pause-free pattern cannot monopolize a core.
    pub fn step(&mut self) -> Operation {
        let latest = self.buffer.load();
        if !Arc::ptr_eq(&latest, &self.sequence) {
            self.sequence = latest;
            self.cursor = 0;
        }

        let operation = self.sequence.get(self.cursor);
        let is_static = self.sequence.is_static();

        match operation {
            Operation::End => {
                self.cursor = 0;
                if is_static {
                    self.clock.yield_now();
                }
                return operation;
            }
            Operation::On(pin) => self.write(pin, Level::High),
            Operation::Off(pin) => self.write(pin, Level::Low),
            Operation::Pause(duration) => self.clock.sleep(duration),
        }

        self.cursor += 1;
        if is_static {
            self.clock.yield_now();
        }
        operation
    }

    fn write(&self, pin: PinId, level: Level) {
        if let Err(err) = self.outputs.set(pin, level) {
            tracing::warn!(%err, "pin write failed, continuing");
        }
    }

    /// Steps until `closing` is set. Checked once per step.
    ///
    /// While the sequence has nothing but `End` the thread parks until the
    /// next install instead of spinning.
    pub fn run(&mut self, closing: &AtomicBool) {
        tracing::debug!("player started");
        while !closing.load(Ordering::Acquire) {
            if self.sequence.is_empty()
                && !self.buffer.wait_for_install(&self.sequence, IDLE_WAIT)
            {
                continue;
            }
            self.step();
        }
        tracing::debug!("player stopped");
    }

    /// Index of the next operation to execute.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The sequence the player is currently walking.
    pub fn sequence(&self) -> &Arc<OperationSequence> {
        &self.sequence
    }
}

impl<D, C> Player<D, C>
where
    D: PinDriver + 'static,
    C: Clock + Send + 'static,
{
    /// Runs the player on a dedicated thread until `closing` is set.
    pub fn spawn(mut self, closing: Arc<AtomicBool>) -> std::io::Result<JoinHandle<()>> {
        std::thread::Builder::new()
            .name("player".into())
            .spawn(move || self.run(&closing))
    }
}

/// Blocks executing the active sequence of `buffer` until `closing` is set.
pub fn run_player<D: PinDriver, C: Clock>(
    buffer: Arc<PatternBuffer>,
    outputs: Arc<OutputBank<D>>,
    clock: C,
    closing: &AtomicBool,
) {
    Player::new(buffer, outputs, clock).run(closing);
}
