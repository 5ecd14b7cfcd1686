//! Time abstraction for the player and duration literals for the compiler.

use core::time::Duration;

/// Trait for abstracting how the player waits.
///
/// The player never measures time itself; it only suspends for the length of
/// a pause and gives up the processor between operations of a static pattern.
pub trait Clock {
    /// Blocks the calling thread for `duration`.
    fn sleep(&self, duration: Duration);

    /// Gives other threads a chance to run.
    fn yield_now(&self);
}

/// [`Clock`] backed by the operating system scheduler.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadClock;

impl Clock for ThreadClock {
    #[inline]
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }

    #[inline]
    fn yield_now(&self) {
        std::thread::yield_now();
    }
}

/// Unit suffix accepted after the digits of a pause token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationUnit {
    Hours,
    Minutes,
    Seconds,
    Millis,
    Micros,
    Nanos,
}

impl DurationUnit {
    /// Unit used when a pause token carries no suffix.
    pub const DEFAULT: DurationUnit = DurationUnit::Millis;

    /// Parses a unit suffix. Suffixes are case-sensitive.
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "h" => Some(DurationUnit::Hours),
            "min" => Some(DurationUnit::Minutes),
            "s" => Some(DurationUnit::Seconds),
            "ms" => Some(DurationUnit::Millis),
            "µs" => Some(DurationUnit::Micros),
            "ns" => Some(DurationUnit::Nanos),
            _ => None,
        }
    }

    /// Builds a duration of `amount` units, or `None` on overflow.
    pub fn duration(self, amount: u64) -> Option<Duration> {
        match self {
            DurationUnit::Hours => amount.checked_mul(3600).map(Duration::from_secs),
            DurationUnit::Minutes => amount.checked_mul(60).map(Duration::from_secs),
            DurationUnit::Seconds => Some(Duration::from_secs(amount)),
            DurationUnit::Millis => Some(Duration::from_millis(amount)),
            DurationUnit::Micros => Some(Duration::from_micros(amount)),
            DurationUnit::Nanos => Some(Duration::from_nanos(amount)),
        }
    }
}

/// Parses a pause literal such as `250`, `3s` or `15µs`.
///
/// Returns `None` when the token is not `<digits><unit>?` or the amount does
/// not fit in a [`Duration`].
pub fn parse_duration(token: &str) -> Option<Duration> {
    let split = token
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(token.len());
    let (digits, suffix) = token.split_at(split);
    if digits.is_empty() {
        return None;
    }

    let unit = if suffix.is_empty() {
        DurationUnit::DEFAULT
    } else {
        DurationUnit::from_suffix(suffix)?
    };

    let amount: u64 = digits.parse().ok()?;
    unit.duration(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_unit_scales_the_amount() {
        assert_eq!(parse_duration("2h"), Some(Duration::from_secs(7200)));
        assert_eq!(parse_duration("3min"), Some(Duration::from_secs(180)));
        assert_eq!(parse_duration("4s"), Some(Duration::from_secs(4)));
        assert_eq!(parse_duration("5ms"), Some(Duration::from_millis(5)));
        assert_eq!(parse_duration("6µs"), Some(Duration::from_micros(6)));
        assert_eq!(parse_duration("7ns"), Some(Duration::from_nanos(7)));
    }

    #[test]
    fn missing_unit_means_milliseconds() {
        assert_eq!(parse_duration("100"), Some(Duration::from_millis(100)));
        assert_eq!(parse_duration("0"), Some(Duration::ZERO));
    }

    #[test]
    fn units_are_case_sensitive() {
        assert_eq!(parse_duration("5MS"), None);
        assert_eq!(parse_duration("5H"), None);
        assert_eq!(parse_duration("5us"), None);
    }

    #[test]
    fn rejects_malformed_literals() {
        assert_eq!(parse_duration(""), None);
        assert_eq!(parse_duration("ms"), None);
        assert_eq!(parse_duration("5 ms"), None);
        assert_eq!(parse_duration("1.5s"), None);
        assert_eq!(parse_duration("-5"), None);
    }

    #[test]
    fn overflow_is_rejected() {
        assert_eq!(parse_duration("99999999999999999999"), None);
        assert_eq!(parse_duration(&format!("{}h", u64::MAX)), None);
        assert_eq!(
            parse_duration(&format!("{}s", u64::MAX)),
            Some(Duration::from_secs(u64::MAX))
        );
    }
}
