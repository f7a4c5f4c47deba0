use crate::errors::AppError;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One of the three environment sensors the station samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Temperature, // °C
    Pressure,    // mbar
    Humidity,    // % rH
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Temperature, Channel::Pressure, Channel::Humidity];

    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Temperature => "temperature",
            Channel::Pressure => "pressure",
            Channel::Humidity => "humidity",
        }
    }

    /// Accepts the full name or the one-letter code used in backups (`t`, `p`, `h`).
    pub fn parse(s: &str) -> Result<Self, AppError> {
        match s.trim().to_lowercase().as_str() {
            "temperature" | "temp" | "t" => Ok(Channel::Temperature),
            "pressure" | "press" | "p" => Ok(Channel::Pressure),
            "humidity" | "humid" | "h" => Ok(Channel::Humidity),
            other => Err(AppError::InvalidChannel(other.to_string())),
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Channel::Temperature => 0,
            Channel::Pressure => 1,
            Channel::Humidity => 2,
        }
    }
}

/// A single sensor change event as delivered by the sensor source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorReading {
    pub channel: Channel,
    pub value: f64,
    pub at: NaiveDateTime,
}

impl SensorReading {
    pub fn new(channel: Channel, value: f64, at: NaiveDateTime) -> Self {
        Self { channel, value, at }
    }

    pub fn check_finite(&self) -> Result<(), AppError> {
        if self.value.is_finite() {
            Ok(())
        } else {
            Err(AppError::InvalidValue {
                channel: self.channel.as_str(),
                value: self.value,
            })
        }
    }
}

/// Round to two decimal places (half away from zero).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
