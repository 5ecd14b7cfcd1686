//! Core value types shared by the compiler, the player and the drivers.

use core::fmt;
use core::time::Duration;

/// Highest pin number accepted by the configuration (BCM numbering on a
/// 40-pin Raspberry Pi header).
pub const MAX_PIN: u8 = 27;

/// A physical output pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PinId(pub u8);

impl fmt::Display for PinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u8> for PinId {
    fn from(pin: u8) -> Self {
        PinId(pin)
    }
}

/// Output level of a pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    /// Active level, LED channel lit.
    High,

    /// Inactive level, LED channel dark.
    Low,
}

impl Level {
    /// Value written to a sysfs `value` file.
    pub fn as_sysfs(self) -> &'static str {
        match self {
            Level::High => "1",
            Level::Low => "0",
        }
    }
}

/// Index of an LED section within a [`ChannelMap`](crate::ChannelMap).
///
/// LEDs are numbered in the order they appear in the configuration file, so
/// `LedId(0)` is always the default LED.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LedId(pub usize);

impl From<usize> for LedId {
    fn from(id: usize) -> Self {
        LedId(id)
    }
}

impl From<LedId> for usize {
    fn from(id: LedId) -> Self {
        id.0
    }
}

/// A single step of a compiled pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Drive the pin to the active level.
    On(PinId),

    /// Drive the pin to the inactive level.
    Off(PinId),

    /// Hold every output as it is for the given time.
    Pause(Duration),

    /// End of the sequence. The player wraps back to the first operation.
    End,
}

impl Operation {
    /// Returns the pin and level this operation writes, if any.
    #[inline]
    pub fn transition(&self) -> Option<(PinId, Level)> {
        match *self {
            Operation::On(pin) => Some((pin, Level::High)),
            Operation::Off(pin) => Some((pin, Level::Low)),
            Operation::Pause(_) | Operation::End => None,
        }
    }

    /// Returns true for [`Operation::Pause`].
    #[inline]
    pub fn is_pause(&self) -> bool {
        matches!(self, Operation::Pause(_))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::On(pin) => write!(f, "on({})", pin),
            Operation::Off(pin) => write!(f, "off({})", pin),
            Operation::Pause(duration) => write!(f, "pause({:?})", duration),
            Operation::End => write!(f, "end"),
        }
    }
}

/// Sequence construction errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceError {
    /// Sequence capacity exceeded.
    CapacityExceeded,
}

impl fmt::Display for SequenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequenceError::CapacityExceeded => {
                write!(f, "sequence capacity exceeded")
            }
        }
    }
}

impl std::error::Error for SequenceError {}
