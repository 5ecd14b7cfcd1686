//! Pattern compiler: one line of text to one operation sequence.
//!
//! A line is split on whitespace and every token is classified on its own:
//!
//! | Token          | Meaning                                                  |
//! |----------------|----------------------------------------------------------|
//! | `Colored:`     | select the LED named `Colored` for the following tokens  |
//! | `250`, `3s`    | pause; units `h`, `min`, `s`, `ms`, `µs`, `ns`, default ms |
//! | `RgB`          | per letter: uppercase turns the channel on, lowercase off |
//! | `-`            | turn every channel of the current LED off                |
//!
//! Unknown LEDs, unknown channels and any other token are skipped.

use core::time::Duration;

use crate::config::{ChannelMap, Led};
use crate::error::CompileError;
use crate::sequence::{OperationSequence, SequenceBuilder};
use crate::time::parse_duration;
use crate::types::{LedId, Operation};

/// Result of compiling one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compiled {
    /// The compiled operations, terminated by `End`.
    pub sequence: OperationSequence,

    /// LED selected after the last token; the next line starts from here.
    pub current_led: LedId,
}

impl Compiled {
    /// Returns true if the sequence contains no pause.
    pub fn is_static(&self) -> bool {
        self.sequence.is_static()
    }
}

/// Shape of a single whitespace-delimited token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    SelectLed(&'a str),
    Pause(Duration),
    Channels(&'a str),
    AllOff,
    Unknown,
}

impl<'a> Token<'a> {
    fn classify(token: &'a str) -> Self {
        if token == "-" {
            return Token::AllOff;
        }

        if let Some(name) = token.strip_suffix(':') {
            let leading_alpha = name.chars().next().is_some_and(char::is_alphabetic);
            if leading_alpha && !name.contains(':') {
                return Token::SelectLed(name);
            }
            return Token::Unknown;
        }

        if token.starts_with(|c: char| c.is_ascii_digit()) {
            return parse_duration(token).map_or(Token::Unknown, Token::Pause);
        }

        if token.chars().all(char::is_alphabetic) {
            return Token::Channels(token);
        }

        Token::Unknown
    }
}

/// Compiles `line` against `map`, starting with `current_led` selected.
///
/// Pure: performs no I/O and touches no pin.
///
/// # Errors
/// * `TooLong` - The line expands to more operations than a sequence holds
pub fn compile(line: &str, map: &ChannelMap, current_led: LedId) -> Result<Compiled, CompileError> {
    let mut builder = OperationSequence::builder();
    let mut current = current_led;

    for raw in line.split_whitespace() {
        match Token::classify(raw) {
            Token::SelectLed(name) => match map.find(name) {
                Some(id) => current = id,
                None => tracing::trace!(led = name, "unknown LED selector ignored"),
            },
            Token::Pause(duration) => builder.push(Operation::Pause(duration))?,
            Token::Channels(letters) => {
                if let Some(led) = map.led(current) {
                    push_channels(&mut builder, led, letters)?;
                }
            }
            Token::AllOff => {
                if let Some(led) = map.led(current) {
                    for pin in led.pins() {
                        builder.push(Operation::Off(pin))?;
                    }
                }
            }
            Token::Unknown => tracing::trace!(token = raw, "unrecognized token ignored"),
        }
    }

    Ok(Compiled {
        sequence: builder.build(),
        current_led: current,
    })
}

fn push_channels(
    builder: &mut SequenceBuilder,
    led: &Led,
    letters: &str,
) -> Result<(), CompileError> {
    for letter in letters.chars() {
        let Some(pin) = led.pin(letter) else {
            tracing::trace!(led = led.name(), channel = %letter, "unknown channel ignored");
            continue;
        };

        let operation = if letter.is_uppercase() {
            Operation::On(pin)
        } else {
            Operation::Off(pin)
        };
        builder.push(operation)?;
    }
    Ok(())
}
