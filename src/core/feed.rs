//! Sensor event feed: `channel,value[,timestamp]` lines, `#` comments allowed.

use crate::errors::{AppError, AppResult};
use crate::models::{Channel, SensorReading};
use chrono::{DateTime, Local, NaiveDateTime};
use std::io::Read;

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

/// Parse a local timestamp given on the command line.
pub fn parse_at(raw: &str) -> AppResult<NaiveDateTime> {
    parse_timestamp(raw).ok_or_else(|| AppError::InvalidTimestamp(raw.to_string()))
}

/// Read every event of a feed. Lines without a timestamp are stamped `now`.
pub fn read_feed<R: Read>(input: R, now: NaiveDateTime) -> AppResult<Vec<SensorReading>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(input);

    let mut out = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record?;
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(i + 1);

        if record.len() < 2 {
            return Err(AppError::InvalidFeed {
                line,
                reason: "expected `channel,value[,timestamp]`".into(),
            });
        }

        let channel = Channel::parse(&record[0]).map_err(|e| AppError::InvalidFeed {
            line,
            reason: e.to_string(),
        })?;

        let value: f64 = record[1].parse().map_err(|_| AppError::InvalidFeed {
            line,
            reason: format!("not a number: {}", &record[1]),
        })?;
        if !value.is_finite() {
            return Err(AppError::InvalidFeed {
                line,
                reason: format!("not a finite value: {value}"),
            });
        }

        let at = match record.get(2).filter(|s| !s.is_empty()) {
            Some(raw) => parse_timestamp(raw).ok_or_else(|| AppError::InvalidFeed {
                line,
                reason: format!("invalid timestamp: {raw}"),
            })?,
            None => now,
        };

        out.push(SensorReading::new(channel, value, at));
    }

    Ok(out)
}
