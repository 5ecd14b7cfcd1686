#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`ChannelMap`**: LED sections, each mapping channel letters to pins, loaded from the config file
//! - **`Operation`**: A single step of a pattern (`On`, `Off`, `Pause` or the `End` sentinel)
//! - **`OperationSequence`**: A bounded, `End`-terminated list of operations plus its static flag
//! - **`compile`**: Turns one line of pattern text into an `OperationSequence`
//! - **`PatternBuffer`**: Atomically swappable handle to the active sequence
//! - **`Player`**: Replays the active sequence against the outputs, forever
//! - **`Session`**: The input loop feeding compiled lines into the buffer
//! - **`PinDriver`**: Trait to implement for your GPIO hardware
//! - **`Clock`**: Trait abstracting sleeps and yields for the player
//!
//! The player and the input loop run on separate threads and share nothing
//! but the [`Context`]: the pattern buffer, the output bank and a closing flag.

pub mod buffer;
pub mod compiler;
pub mod config;
pub mod context;
pub mod driver;
pub mod error;
pub mod player;
pub mod sequence;
pub mod session;
pub mod time;
pub mod types;

pub use buffer::PatternBuffer;
pub use compiler::{Compiled, compile};
pub use config::{ChannelMap, DEFAULT_CONFIG_FILE, Led, default_config_path};
pub use context::Context;
pub use driver::{DryRunPins, OutputBank, PinDriver, SYSFS_GPIO_ROOT, SysfsGpio};
pub use error::{CompileError, ConfigError, PinError};
pub use player::{Player, run_player};
pub use sequence::{OperationSequence, SEQUENCE_CAPACITY, SequenceBuilder};
pub use session::Session;
pub use time::{Clock, DurationUnit, ThreadClock, parse_duration};
pub use types::{LedId, Level, MAX_PIN, Operation, PinId, SequenceError};
