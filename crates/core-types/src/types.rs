// In crates/core-types/src/types.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{Error, Result};

/// A market symbol as understood by the upstream price source (e.g. "BTC-USD").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol(pub String);

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One daily OHLCV bar.
///
/// A `Bar` always carries defined prices; rows with gaps are resolved by the
/// price source before a `Bar` is built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl Bar {
    /// Builds a bar, rejecting non-finite or non-positive closes.
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: u64) -> Result<Self> {
        if !close.is_finite() || close <= 0.0 {
            return Err(Error::InvalidBar {
                date,
                reason: format!("close must be a positive finite number, got {}", close),
            });
        }
        for (name, value) in [("open", open), ("high", high), ("low", low)] {
            if !value.is_finite() {
                return Err(Error::InvalidBar {
                    date,
                    reason: format!("{} is not finite", name),
                });
            }
        }
        Ok(Self { date, open, high, low, close, volume })
    }

    /// Seconds since the Unix epoch at midnight UTC of the bar's date.
    pub fn epoch_seconds(&self) -> i64 {
        self.date.and_time(chrono::NaiveTime::MIN).and_utc().timestamp()
    }
}

/// The discrete crossover signal for a single bar.
///
/// Also used as the directional position (long/flat/short), since a position
/// is just the previous bar's signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Signal {
    Short,
    #[default]
    Flat,
    Long,
}

impl Signal {
    pub fn value(self) -> i8 {
        match self {
            Signal::Short => -1,
            Signal::Flat => 0,
            Signal::Long => 1,
        }
    }

    pub fn is_flat(self) -> bool {
        self == Signal::Flat
    }
}

impl TryFrom<i64> for Signal {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        match value {
            -1 => Ok(Signal::Short),
            0 => Ok(Signal::Flat),
            1 => Ok(Signal::Long),
            other => Err(Error::InvalidSignal(other)),
        }
    }
}

// Signals travel as plain integers so the chart client can compare against 1/-1.
impl Serialize for Signal {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_i8(self.value())
    }
}

impl<'de> Deserialize<'de> for Signal {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = i64::deserialize(deserializer)?;
        Signal::try_from(raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn epoch_seconds_is_midnight_utc() {
        let bar = Bar::new(date(2024, 1, 2), 1.0, 1.0, 1.0, 1.0, 0).unwrap();
        assert_eq!(bar.epoch_seconds(), 1_704_153_600);
    }

    #[test]
    fn rejects_missing_close() {
        let err = Bar::new(date(2024, 1, 2), 1.0, 1.0, 1.0, f64::NAN, 0).unwrap_err();
        assert!(matches!(err, Error::InvalidBar { .. }));
    }

    #[test]
    fn signal_serializes_as_integer() {
        let json = serde_json::to_string(&[Signal::Short, Signal::Flat, Signal::Long]).unwrap();
        assert_eq!(json, "[-1,0,1]");
        let back: Vec<Signal> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vec![Signal::Short, Signal::Flat, Signal::Long]);
    }

    #[test]
    fn signal_rejects_out_of_range_values() {
        assert_eq!(Signal::try_from(2), Err(Error::InvalidSignal(2)));
    }
}
