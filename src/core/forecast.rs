/// Pressure-only outlook shown next to today's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Forecast {
    Rain,
    Cloudy { night: bool },
    Clear { night: bool },
}

impl Forecast {
    /// `< 995` mbar rain, `< 1025` mbar cloudy, clear above.
    pub fn from_pressure(mbar: f64, hour: u32) -> Self {
        let night = !(6..=19).contains(&hour);
        if mbar < 995.0 {
            Forecast::Rain
        } else if mbar < 1025.0 {
            Forecast::Cloudy { night }
        } else {
            Forecast::Clear { night }
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Forecast::Rain => "🌧️  rain",
            Forecast::Cloudy { night: false } => "⛅ clouds and sun",
            Forecast::Cloudy { night: true } => "☁️  clouds and moon",
            Forecast::Clear { night: false } => "☀️  sunny",
            Forecast::Clear { night: true } => "🌙 clear night",
        }
    }
}
