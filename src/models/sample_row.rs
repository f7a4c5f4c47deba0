use crate::errors::AppError;
use crate::models::Channel;
use serde::Serialize;
use std::fmt;

/// Rolling retention slot: 1 is today, 31 the oldest retained day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct DaySlot(u32);

impl DaySlot {
    pub const TODAY: DaySlot = DaySlot(1);
    pub const OLDEST: DaySlot = DaySlot(31);
    pub const COUNT: u32 = 31;

    pub fn new(n: u32) -> Result<Self, AppError> {
        if (1..=Self::COUNT).contains(&n) {
            Ok(Self(n))
        } else {
            Err(AppError::InvalidSlot(n))
        }
    }

    pub fn get(&self) -> u32 {
        self.0
    }

    /// Every slot from today to the oldest one.
    pub fn all() -> impl DoubleEndedIterator<Item = DaySlot> {
        (1..=Self::COUNT).map(DaySlot)
    }
}

impl fmt::Display for DaySlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One combined measurement: all three channels for one hour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub hour: u32,
    pub day_of_month: u32,
    pub temperature: f64,
    pub pressure: f64,
    pub humidity: f64,
}

impl Sample {
    pub fn new(
        hour: u32,
        day_of_month: u32,
        temperature: f64,
        pressure: f64,
        humidity: f64,
    ) -> Result<Self, AppError> {
        if hour > 23 {
            return Err(AppError::InvalidHour(hour));
        }
        if !(1..=31).contains(&day_of_month) {
            return Err(AppError::InvalidDay(day_of_month));
        }
        let sample = Self {
            hour,
            day_of_month,
            temperature,
            pressure,
            humidity,
        };
        sample.check_finite()?;
        Ok(sample)
    }

    /// NaN and infinities cannot be aggregated nor written to a backup.
    pub fn check_finite(&self) -> Result<(), AppError> {
        for (channel, value) in [
            (Channel::Temperature, self.temperature),
            (Channel::Pressure, self.pressure),
            (Channel::Humidity, self.humidity),
        ] {
            if !value.is_finite() {
                return Err(AppError::InvalidValue {
                    channel: channel.as_str(),
                    value,
                });
            }
        }
        Ok(())
    }
}

/// Running max/min/average of one channel within a day slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChannelStats {
    pub max: f64,
    pub min: f64,
    pub avg: f64,
}

impl ChannelStats {
    pub fn new(max: f64, min: f64, avg: f64) -> Self {
        Self { max, min, avg }
    }

    pub fn is_consistent(&self) -> bool {
        self.min <= self.avg && self.avg <= self.max
    }
}

/// One persisted row of the `weather` table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleRow {
    pub id: i64,           // ⇔ weather.id (insertion order)
    pub hour: u32,         // ⇔ weather.hour (0-23)
    pub day_of_month: u32, // ⇔ weather.day_of_month (1-31)
    pub day_slot: u32,     // ⇔ weather.day_slot (1 = today)
    pub temperature: f64,
    pub pressure: f64,
    pub humidity: f64,
    pub temp_stats: ChannelStats,
    pub press_stats: ChannelStats,
    pub humid_stats: ChannelStats,
}

impl SampleRow {
    /// True when every stored value, aggregates included, is a finite number.
    pub fn is_finite(&self) -> bool {
        [
            self.temperature,
            self.pressure,
            self.humidity,
            self.temp_stats.max,
            self.temp_stats.min,
            self.temp_stats.avg,
            self.press_stats.max,
            self.press_stats.min,
            self.press_stats.avg,
            self.humid_stats.max,
            self.humid_stats.min,
            self.humid_stats.avg,
        ]
        .iter()
        .all(|v| v.is_finite())
    }

    /// Everything except the row id, which is assigned by the store.
    pub fn same_content(&self, other: &SampleRow) -> bool {
        self.hour == other.hour
            && self.day_of_month == other.day_of_month
            && self.day_slot == other.day_slot
            && self.temperature == other.temperature
            && self.pressure == other.pressure
            && self.humidity == other.humidity
            && self.temp_stats == other.temp_stats
            && self.press_stats == other.press_stats
            && self.humid_stats == other.humid_stats
    }
}
