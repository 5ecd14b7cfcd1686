//! Channel map loading and validation.
//!
//! The configuration is an INI-style file where every section is an LED and
//! every key inside it maps a single channel letter to a pin:
//!
//! ```ini
//! [MyFirstLED]
//! w = 15
//!
//! [Colored]
//! r = 2
//! g = 3
//! b = 4
//! ```
//!
//! This subset of INI is also valid TOML, so the file is parsed with `toml`
//! (order-preserving) and then validated. Section order matters: the first
//! section is the default LED, and channel order is the order used by the
//! `-` (all off) token.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::types::{LedId, MAX_PIN, PinId};

/// File name of the configuration in the user's home directory.
pub const DEFAULT_CONFIG_FILE: &str = ".pi-led.ini";

/// Returns `~/.pi-led.ini`, or `./.pi-led.ini` if the home directory cannot
/// be determined.
pub fn default_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_CONFIG_FILE)
}

/// One LED section: a name and its channels in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Led {
    name: String,
    channels: Vec<(char, PinId)>,
}

impl Led {
    /// Section name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Channels as `(lowercase letter, pin)` in file order.
    pub fn channels(&self) -> &[(char, PinId)] {
        &self.channels
    }

    /// Looks up a channel, ignoring case.
    pub fn pin(&self, channel: char) -> Option<PinId> {
        let channel = channel.to_ascii_lowercase();
        self.channels
            .iter()
            .find(|(c, _)| *c == channel)
            .map(|(_, pin)| *pin)
    }

    /// Pins of this LED in channel order.
    pub fn pins(&self) -> impl Iterator<Item = PinId> + '_ {
        self.channels.iter().map(|(_, pin)| *pin)
    }
}

/// Validated mapping from LED name to channels to pins.
///
/// Immutable once loaded. Every pin belongs to exactly one channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelMap {
    leds: Vec<Led>,
}

impl ChannelMap {
    /// Reads and validates a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::parse(&content)
    }

    /// Parses and validates configuration text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let table: toml::Table = toml::from_str(content)?;

        let mut leds = Vec::with_capacity(table.len());
        let mut owners: HashMap<PinId, String> = HashMap::new();

        for (name, section) in table {
            let toml::Value::Table(entries) = section else {
                return Err(ConfigError::NotASection { led: name });
            };

            let mut channels: Vec<(char, PinId)> = Vec::with_capacity(entries.len());
            for (key, value) in entries {
                let channel = parse_channel(&name, &key)?;
                if channels.iter().any(|(c, _)| *c == channel) {
                    return Err(ConfigError::DuplicateChannel { led: name, channel });
                }

                let pin = parse_pin(&name, channel, &value)?;
                let owner = format!("{}.{}", name, channel);
                if let Some(first) = owners.insert(pin, owner.clone()) {
                    return Err(ConfigError::DuplicatePin {
                        pin,
                        first,
                        second: owner,
                    });
                }

                channels.push((channel, pin));
            }

            leds.push(Led { name, channels });
        }

        if leds.is_empty() {
            return Err(ConfigError::NoLeds);
        }

        Ok(Self { leds })
    }

    /// The LED selected before any `name:` token, i.e. the first section.
    pub fn default_led(&self) -> LedId {
        LedId(0)
    }

    /// Finds an LED by its exact section name.
    pub fn find(&self, name: &str) -> Option<LedId> {
        self.leds.iter().position(|led| led.name == name).map(LedId)
    }

    /// Returns the LED with the given id.
    pub fn led(&self, id: LedId) -> Option<&Led> {
        self.leds.get(id.0)
    }

    /// All LEDs in file order.
    pub fn leds(&self) -> &[Led] {
        &self.leds
    }

    /// Every configured pin, LED by LED in file order.
    pub fn pins(&self) -> impl Iterator<Item = PinId> + '_ {
        self.leds.iter().flat_map(Led::pins)
    }
}

fn parse_channel(led: &str, key: &str) -> Result<char, ConfigError> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => Ok(c.to_ascii_lowercase()),
        _ => Err(ConfigError::InvalidChannel {
            led: led.to_string(),
            channel: key.to_string(),
        }),
    }
}

fn parse_pin(led: &str, channel: char, value: &toml::Value) -> Result<PinId, ConfigError> {
    let Some(raw) = value.as_integer() else {
        return Err(ConfigError::InvalidPin {
            led: led.to_string(),
            channel,
        });
    };

    match u8::try_from(raw) {
        Ok(pin) if pin <= MAX_PIN => Ok(PinId(pin)),
        _ => Err(ConfigError::PinOutOfRange {
            led: led.to_string(),
            channel,
            pin: raw,
            max: MAX_PIN,
        }),
    }
}
