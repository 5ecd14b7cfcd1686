//! Input loop: one pattern line in, one installed sequence out.

use std::io::{self, BufRead};

use crate::compiler::compile;
use crate::context::Context;
use crate::driver::PinDriver;
use crate::error::CompileError;
use crate::types::LedId;

/// The writer side of the sequencer.
///
/// Remembers which LED the previous line left selected, so a line such as
/// `R 1s r` keeps addressing the LED chosen by an earlier `Colored:`.
pub struct Session<D: PinDriver> {
    context: Context<D>,
    current_led: LedId,
}

impl<D: PinDriver> Session<D> {
    /// Creates a session starting at the default LED.
    pub fn new(context: Context<D>) -> Self {
        let current_led = context.map().default_led();
        Self {
            context,
            current_led,
        }
    }

    /// Switches every pin off, compiles `line` and installs the result.
    ///
    /// # Errors
    /// * `TooLong` - The previous sequence and LED selection stay in effect
    pub fn handle_line(&mut self, line: &str) -> Result<(), CompileError> {
        self.context.outputs().all_off(self.context.map().pins());

        let compiled = compile(line, self.context.map(), self.current_led)?;
        self.current_led = compiled.current_led;
        self.context.buffer().install(compiled.sequence);
        Ok(())
    }

    /// Reads lines from `reader` until end of input or shutdown, then shuts
    /// down.
    ///
    /// Compile failures are logged and do not stop the loop.
    pub fn run<R: BufRead>(&mut self, mut reader: R) -> io::Result<()> {
        let mut line = String::new();

        while !self.context.is_closing() {
            line.clear();
            match reader.read_line(&mut line) {
                Ok(0) => {
                    tracing::info!("end of input");
                    break;
                }
                Ok(_) => {}
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == io::ErrorKind::InvalidData => {
                    tracing::warn!(%err, "skipping unreadable line");
                    continue;
                }
                Err(err) => {
                    self.context.shut_down();
                    return Err(err);
                }
            }

            let pattern = line.trim_end_matches(['\n', '\r']);
            if let Err(err) = self.handle_line(pattern) {
                tracing::warn!(%err, pattern, "pattern rejected, keeping previous");
            }
        }

        self.context.shut_down();
        Ok(())
    }

    /// LED that the next line starts with.
    pub fn current_led(&self) -> LedId {
        self.current_led
    }

    /// The shared context.
    pub fn context(&self) -> &Context<D> {
        &self.context
    }
}
