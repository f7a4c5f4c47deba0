//! Display units. The store always holds °C, mbar and % rH; conversion
//! happens only when values are shown to the user.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
    Kelvin,
}

impl TemperatureUnit {
    pub fn convert(&self, celsius: f64) -> f64 {
        match self {
            TemperatureUnit::Celsius => celsius,
            TemperatureUnit::Fahrenheit => celsius * 1.8 + 32.0,
            TemperatureUnit::Kelvin => celsius + 273.15,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
            TemperatureUnit::Kelvin => "K",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PressureUnit {
    #[default]
    Mbar,
    Psi,
    Atm,
    Torr,
    Kpa,
    Hpa,
    Mmhg,
    Inhg,
}

impl PressureUnit {
    pub fn convert(&self, mbar: f64) -> f64 {
        match self {
            PressureUnit::Mbar | PressureUnit::Hpa => mbar,
            PressureUnit::Psi => mbar * 0.014_503_789_114_91,
            PressureUnit::Atm => mbar * 0.000_986_923_266_716,
            PressureUnit::Torr | PressureUnit::Mmhg => mbar * 0.750_061_682_704_2,
            PressureUnit::Kpa => mbar * 0.1,
            PressureUnit::Inhg => mbar * 0.029_530_1,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            PressureUnit::Mbar => "mbar",
            PressureUnit::Psi => "psi",
            PressureUnit::Atm => "atm",
            PressureUnit::Torr => "Torr",
            PressureUnit::Kpa => "kPa",
            PressureUnit::Hpa => "hPa",
            PressureUnit::Mmhg => "mmHg",
            PressureUnit::Inhg => "inHg",
        }
    }

    /// Decimal places that make sense for the unit's magnitude.
    pub fn precision(&self) -> usize {
        match self {
            PressureUnit::Mbar | PressureUnit::Hpa | PressureUnit::Torr | PressureUnit::Mmhg => 1,
            PressureUnit::Kpa | PressureUnit::Inhg => 2,
            PressureUnit::Psi => 3,
            PressureUnit::Atm => 4,
        }
    }
}

/// Unit pair used by every human-readable view.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisplayUnits {
    pub temperature: TemperatureUnit,
    pub pressure: PressureUnit,
}

impl DisplayUnits {
    pub fn fmt_temp(&self, celsius: f64) -> String {
        format!(
            "{:.1} {}",
            self.temperature.convert(celsius),
            self.temperature.symbol()
        )
    }

    pub fn fmt_press(&self, mbar: f64) -> String {
        format!(
            "{:.prec$} {}",
            self.pressure.convert(mbar),
            self.pressure.symbol(),
            prec = self.pressure.precision()
        )
    }

    pub fn fmt_humid(&self, percent: f64) -> String {
        format!("{percent:.1} %")
    }
}
