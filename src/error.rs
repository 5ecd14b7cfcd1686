//! Error types for configuration loading and pattern compilation.

use std::path::PathBuf;
use thiserror::Error;

use crate::types::{PinId, SequenceError};

/// Errors that can occur while loading the channel map.
///
/// All of them are fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("failed to read config file '{path}': {source}")]
    ReadFile {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid INI/TOML
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// No LED section at all
    #[error("config defines no LED sections")]
    NoLeds,

    /// A top-level key that is not a `[section]`
    #[error("'{led}' is not an LED section")]
    NotASection {
        /// Offending key.
        led: String,
    },

    /// Channel key is not exactly one letter
    #[error("LED '{led}': channel '{channel}' must be a single letter")]
    InvalidChannel {
        /// LED section name.
        led: String,
        /// Offending key.
        channel: String,
    },

    /// Same channel letter twice in one LED (case-insensitive)
    #[error("LED '{led}': channel '{channel}' defined more than once")]
    DuplicateChannel {
        /// LED section name.
        led: String,
        /// Lowercased channel letter.
        channel: char,
    },

    /// Pin value is not an integer
    #[error("LED '{led}': pin for channel '{channel}' is not an integer")]
    InvalidPin {
        /// LED section name.
        led: String,
        /// Channel letter.
        channel: char,
    },

    /// Pin value outside 0..=27
    #[error("LED '{led}': pin {pin} for channel '{channel}' is out of range 0..={max}")]
    PinOutOfRange {
        /// LED section name.
        led: String,
        /// Channel letter.
        channel: char,
        /// Rejected value.
        pin: i64,
        /// Highest accepted pin.
        max: u8,
    },

    /// Pin assigned to two channels
    #[error("pin {pin} is used by both {first} and {second}")]
    DuplicatePin {
        /// The shared pin.
        pin: PinId,
        /// First user, as `LED.channel`.
        first: String,
        /// Second user, as `LED.channel`.
        second: String,
    },
}

impl ConfigError {
    /// Create a read file error.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::ReadFile {
            path: path.into(),
            source,
        }
    }
}

/// Errors that can occur while compiling one pattern line.
///
/// Scoped to that line: the previously installed sequence keeps running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CompileError {
    /// More operations than fit in a sequence
    #[error("pattern too long: more than {capacity} operations")]
    TooLong {
        /// Sequence capacity, including the terminator.
        capacity: usize,
    },
}

impl From<SequenceError> for CompileError {
    fn from(err: SequenceError) -> Self {
        match err {
            SequenceError::CapacityExceeded => CompileError::TooLong {
                capacity: crate::sequence::SEQUENCE_CAPACITY,
            },
        }
    }
}

/// A failed pin write or setup.
///
/// Non-fatal during playback: the failed operation is skipped.
#[derive(Debug, Error)]
#[error("pin {pin}: {source}")]
pub struct PinError {
    /// The pin that could not be driven.
    pub pin: PinId,
    /// Underlying I/O error.
    #[source]
    pub source: std::io::Error,
}

impl PinError {
    /// Create a pin error.
    pub fn new(pin: PinId, source: std::io::Error) -> Self {
        Self { pin, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    fn mock_io_err() -> std::io::Error {
        std::io::Error::new(std::io::ErrorKind::NotFound, "mock")
    }

    #[test]
    fn read_file_display_names_the_path() {
        let err = ConfigError::read_file("/home/pi/.pi-led.ini", mock_io_err());
        let msg = err.to_string();
        assert!(msg.contains("failed to read config file"), "got: {msg}");
        assert!(msg.contains("/home/pi/.pi-led.ini"), "got: {msg}");
        assert!(err.source().is_some());
    }

    #[test]
    fn duplicate_pin_display() {
        let err = ConfigError::DuplicatePin {
            pin: PinId(4),
            first: "Colored.b".to_string(),
            second: "Spare.x".to_string(),
        };
        assert_eq!(err.to_string(), "pin 4 is used by both Colored.b and Spare.x");
        assert!(err.source().is_none());
    }

    #[test]
    fn capacity_error_converts_to_too_long() {
        let err = CompileError::from(SequenceError::CapacityExceeded);
        assert_eq!(err, CompileError::TooLong { capacity: 1000 });
        assert_eq!(err.to_string(), "pattern too long: more than 1000 operations");
    }
}
