//! Formatting utilities used for CLI outputs.

use crate::config::Config;
use crate::models::{DisplayUnits, PressureUnit, TemperatureUnit};

/// Configured display units, with optional per-command overrides.
pub fn display_units(
    cfg: &Config,
    temp: Option<TemperatureUnit>,
    press: Option<PressureUnit>,
) -> DisplayUnits {
    DisplayUnits {
        temperature: temp.unwrap_or(cfg.temperature_unit),
        pressure: press.unwrap_or(cfg.pressure_unit),
    }
}

/// "today", "yesterday" or "N days ago" for a retention slot.
pub fn slot_label(slot: u32) -> String {
    match slot {
        1 => "today".to_string(),
        2 => "yesterday".to_string(),
        n => format!("{} days ago", n - 1),
    }
}

pub fn hour_label(hour: u32) -> String {
    format!("{:02}:00", hour)
}
