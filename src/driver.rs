//! Output pin drivers and the shared output bank.
//!
//! Provides the [`PinDriver`] trait for hardware abstraction, two drivers
//! ([`SysfsGpio`] for Linux GPIO and [`DryRunPins`] for machines without
//! GPIO), and [`OutputBank`], which serializes access to a driver between the
//! player, the input loop and the shutdown handler.

use std::path::{Path, PathBuf};
use std::time::Duration;

use parking_lot::Mutex;

use crate::error::PinError;
use crate::types::{Level, PinId};

/// Trait for abstracting digital output hardware.
///
/// Implement this for your GPIO backend to let the player drive it.
pub trait PinDriver: Send {
    /// Prepares `pin` for output. Called once per pin before playback.
    fn configure_as_output(&mut self, pin: PinId) -> Result<(), PinError>;

    /// Drives `pin` to `level`.
    fn set(&mut self, pin: PinId, level: Level) -> Result<(), PinError>;
}

struct BankState<D> {
    driver: D,
    sealed: bool,
}

/// A pin driver shared by every thread that writes outputs.
///
/// Once [`shut_down`](Self::shut_down) has driven every pin low the bank is
/// sealed and later writes are dropped, so a player still finishing its
/// current step cannot turn an LED back on.
pub struct OutputBank<D: PinDriver> {
    state: Mutex<BankState<D>>,
}

impl<D: PinDriver> OutputBank<D> {
    /// Wraps `driver`.
    pub fn new(driver: D) -> Self {
        Self {
            state: Mutex::new(BankState {
                driver,
                sealed: false,
            }),
        }
    }

    /// Configures every pin as an output and drives it low.
    ///
    /// # Errors
    /// Returns the first pin that could not be configured.
    pub fn configure_all(&self, pins: impl IntoIterator<Item = PinId>) -> Result<(), PinError> {
        let mut state = self.state.lock();
        for pin in pins {
            state.driver.configure_as_output(pin)?;
            state.driver.set(pin, Level::Low)?;
        }
        Ok(())
    }

    /// Drives one pin. A no-op once the bank is sealed.
    pub fn set(&self, pin: PinId, level: Level) -> Result<(), PinError> {
        let mut state = self.state.lock();
        if state.sealed {
            return Ok(());
        }
        state.driver.set(pin, level)
    }

    /// Drives every given pin low, logging failures and carrying on.
    pub fn all_off(&self, pins: impl IntoIterator<Item = PinId>) {
        let mut state = self.state.lock();
        if state.sealed {
            return;
        }
        drive_low(&mut state.driver, pins);
    }

    /// Drives every given pin low and seals the bank.
    ///
    /// Only the first call has any effect; returns whether this call did it.
    pub fn shut_down(&self, pins: impl IntoIterator<Item = PinId>) -> bool {
        let mut state = self.state.lock();
        if state.sealed {
            return false;
        }
        drive_low(&mut state.driver, pins);
        state.sealed = true;
        true
    }

    /// Returns true after [`shut_down`](Self::shut_down).
    pub fn is_sealed(&self) -> bool {
        self.state.lock().sealed
    }
}

fn drive_low<D: PinDriver>(driver: &mut D, pins: impl IntoIterator<Item = PinId>) {
    for pin in pins {
        if let Err(err) = driver.set(pin, Level::Low) {
            tracing::warn!(%err, "failed to switch pin off");
        }
    }
}

/// Default sysfs GPIO root on Linux.
pub const SYSFS_GPIO_ROOT: &str = "/sys/class/gpio";

// udev may need a moment to fix permissions on a freshly exported pin.
const EXPORT_RETRIES: u32 = 10;
const EXPORT_RETRY_DELAY: Duration = Duration::from_millis(10);

/// Linux sysfs GPIO driver.
///
/// Exports pins on demand through `<root>/export` and writes
/// `<root>/gpioN/direction` and `<root>/gpioN/value`.
#[derive(Debug, Clone)]
pub struct SysfsGpio {
    root: PathBuf,
}

impl SysfsGpio {
    /// Driver rooted at `/sys/class/gpio`.
    pub fn new() -> Self {
        Self::with_root(SYSFS_GPIO_ROOT)
    }

    /// Driver rooted at `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Sysfs root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn pin_dir(&self, pin: PinId) -> PathBuf {
        self.root.join(format!("gpio{}", pin))
    }
}

impl Default for SysfsGpio {
    fn default() -> Self {
        Self::new()
    }
}

impl PinDriver for SysfsGpio {
    fn configure_as_output(&mut self, pin: PinId) -> Result<(), PinError> {
        let dir = self.pin_dir(pin);
        if !dir.exists() {
            std::fs::write(self.root.join("export"), pin.to_string())
                .map_err(|e| PinError::new(pin, e))?;
        }

        let direction = dir.join("direction");
        let mut attempt = 0;
        loop {
            match std::fs::write(&direction, "out") {
                Ok(()) => break,
                Err(_) if attempt + 1 < EXPORT_RETRIES => {
                    attempt += 1;
                    std::thread::sleep(EXPORT_RETRY_DELAY);
                }
                Err(e) => return Err(PinError::new(pin, e)),
            }
        }

        tracing::debug!(%pin, "configured as output");
        Ok(())
    }

    fn set(&mut self, pin: PinId, level: Level) -> Result<(), PinError> {
        std::fs::write(self.pin_dir(pin).join("value"), level.as_sysfs())
            .map_err(|e| PinError::new(pin, e))
    }
}

/// Driver that only logs. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunPins;

impl PinDriver for DryRunPins {
    fn configure_as_output(&mut self, pin: PinId) -> Result<(), PinError> {
        tracing::info!(%pin, "dry run: configure as output");
        Ok(())
    }

    fn set(&mut self, pin: PinId, level: Level) -> Result<(), PinError> {
        tracing::debug!(%pin, ?level, "dry run: set");
        Ok(())
    }
}
