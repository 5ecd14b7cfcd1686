//! Shared state handed to the player, the input loop and the signal handler.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::buffer::PatternBuffer;
use crate::config::ChannelMap;
use crate::driver::{OutputBank, PinDriver};
use crate::error::PinError;
use crate::player::Player;
use crate::session::Session;
use crate::time::Clock;

/// Everything the running sequencer shares between threads.
///
/// Cloning is cheap: every field is reference-counted.
pub struct Context<D: PinDriver> {
    map: Arc<ChannelMap>,
    buffer: Arc<PatternBuffer>,
    outputs: Arc<OutputBank<D>>,
    closing: Arc<AtomicBool>,
}

impl<D: PinDriver> Clone for Context<D> {
    fn clone(&self) -> Self {
        Self {
            map: Arc::clone(&self.map),
            buffer: Arc::clone(&self.buffer),
            outputs: Arc::clone(&self.outputs),
            closing: Arc::clone(&self.closing),
        }
    }
}

impl<D: PinDriver> Context<D> {
    /// Wraps `driver` for `map` with an idle pattern installed.
    pub fn new(map: ChannelMap, driver: D) -> Self {
        Self {
            map: Arc::new(map),
            buffer: Arc::new(PatternBuffer::new()),
            outputs: Arc::new(OutputBank::new(driver)),
            closing: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Configures every mapped pin as an output, driven low.
    pub fn configure_outputs(&self) -> Result<(), PinError> {
        self.outputs.configure_all(self.map.pins())
    }

    /// Creates a player over this context's buffer and outputs.
    pub fn player<C: Clock>(&self, clock: C) -> Player<D, C> {
        Player::new(Arc::clone(&self.buffer), Arc::clone(&self.outputs), clock)
    }

    /// Creates an input session starting at the default LED.
    pub fn session(&self) -> Session<D> {
        Session::new(self.clone())
    }

    /// Sets the closing flag and drives every mapped pin low.
    ///
    /// Idempotent: pins are switched off by the first call only, and no pin
    /// write reaches the driver afterwards. Returns whether this call did it.
    pub fn shut_down(&self) -> bool {
        self.closing.store(true, Ordering::Release);
        self.buffer.wake_all();
        let first = self.outputs.shut_down(self.map.pins());
        if first {
            tracing::info!("all outputs off");
        }
        first
    }

    /// Returns true once shutdown has begun.
    pub fn is_closing(&self) -> bool {
        self.closing.load(Ordering::Acquire)
    }

    /// The channel map.
    pub fn map(&self) -> &Arc<ChannelMap> {
        &self.map
    }

    /// The active-sequence handle.
    pub fn buffer(&self) -> &Arc<PatternBuffer> {
        &self.buffer
    }

    /// The shared output bank.
    pub fn outputs(&self) -> &Arc<OutputBank<D>> {
        &self.outputs
    }

    /// The closing flag observed by the player and the input loop.
    pub fn closing(&self) -> &Arc<AtomicBool> {
        &self.closing
    }
}
