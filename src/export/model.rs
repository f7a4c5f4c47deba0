// src/export/model.rs

use crate::models::{ChannelStats, SampleRow};
use serde::{Deserialize, Serialize};

/// JSON backup record, keyed by the short field codes of the backup format.
///
/// The humidity minimum is written as `mih`; files produced by the Android
/// app used `minh`, which is still accepted on read.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct BackupRecord {
    pub ts: u32,
    pub ds: u32,
    pub dn: u32,
    pub t: f64,
    pub p: f64,
    pub h: f64,
    pub mat: f64,
    pub mit: f64,
    pub avt: f64,
    pub map: f64,
    pub mip: f64,
    pub avp: f64,
    pub mah: f64,
    #[serde(alias = "minh")]
    pub mih: f64,
    pub avh: f64,
}

impl From<&SampleRow> for BackupRecord {
    fn from(r: &SampleRow) -> Self {
        Self {
            ts: r.hour,
            ds: r.day_of_month,
            dn: r.day_slot,
            t: r.temperature,
            p: r.pressure,
            h: r.humidity,
            mat: r.temp_stats.max,
            mit: r.temp_stats.min,
            avt: r.temp_stats.avg,
            map: r.press_stats.max,
            mip: r.press_stats.min,
            avp: r.press_stats.avg,
            mah: r.humid_stats.max,
            mih: r.humid_stats.min,
            avh: r.humid_stats.avg,
        }
    }
}

impl From<BackupRecord> for SampleRow {
    fn from(b: BackupRecord) -> Self {
        SampleRow {
            id: 0,
            hour: b.ts,
            day_of_month: b.ds,
            day_slot: b.dn,
            temperature: b.t,
            pressure: b.p,
            humidity: b.h,
            temp_stats: ChannelStats::new(b.mat, b.mit, b.avt),
            press_stats: ChannelStats::new(b.map, b.mip, b.avp),
            humid_stats: ChannelStats::new(b.mah, b.mih, b.avh),
        }
    }
}

/// Header of the CSV export, one column per stored field.
pub(crate) const CSV_HEADERS: [&str; 15] = [
    "Timestamp",
    "Datestamp",
    "Daynumber",
    "Temperature",
    "Pressure",
    "Humidity",
    "MaxTemperature",
    "MinTemperature",
    "AverageTemperature",
    "MaxPressure",
    "MinPressure",
    "AveragePressure",
    "MaxHumidity",
    "MinHumidity",
    "AverageHumidity",
];

/// Row of the CSV export in column order.
pub(crate) fn row_to_record(r: &SampleRow) -> [String; 15] {
    [
        r.hour.to_string(),
        r.day_of_month.to_string(),
        r.day_slot.to_string(),
        r.temperature.to_string(),
        r.pressure.to_string(),
        r.humidity.to_string(),
        r.temp_stats.max.to_string(),
        r.temp_stats.min.to_string(),
        r.temp_stats.avg.to_string(),
        r.press_stats.max.to_string(),
        r.press_stats.min.to_string(),
        r.press_stats.avg.to_string(),
        r.humid_stats.max.to_string(),
        r.humid_stats.min.to_string(),
        r.humid_stats.avg.to_string(),
    ]
}
