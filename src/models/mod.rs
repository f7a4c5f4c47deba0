pub mod channel;
pub mod sample_row;
pub mod units;

pub use channel::{Channel, SensorReading, round2};
pub use sample_row::{ChannelStats, DaySlot, Sample, SampleRow};
pub use units::{DisplayUnits, PressureUnit, TemperatureUnit};
