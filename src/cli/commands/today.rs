use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::forecast::Forecast;
use crate::core::sampler::LiveValues;
use crate::core::views::{Extremes, today_summary};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::{Channel, DisplayUnits};
use crate::utils::colors::{colorize_max, colorize_min, missing};
use crate::utils::formatting::{display_units, hour_label};
use chrono::{Local, Timelike};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Today {
        temp_unit,
        press_unit,
    } = cmd
    {
        let mut pool = DbPool::open(&cfg.database)?;
        print_today(
            &mut pool,
            &LiveValues::default(),
            display_units(cfg, *temp_unit, *press_unit),
        )?;
    }
    Ok(())
}

pub(crate) fn print_today(
    pool: &mut DbPool,
    live: &LiveValues,
    units: DisplayUnits,
) -> AppResult<()> {
    let summary = today_summary(pool, live)?;

    println!("\n📅 Today ({} hourly samples)", summary.samples);

    for channel in Channel::ALL {
        let fmt = |v: f64| match channel {
            Channel::Temperature => units.fmt_temp(v),
            Channel::Pressure => units.fmt_press(v),
            Channel::Humidity => units.fmt_humid(v),
        };
        let now = live
            .get(channel)
            .or_else(|| summary.latest.as_ref().map(|r| stored_value(r, channel)));

        println!(
            "  {:<12} now {:>14}   {}",
            channel.as_str(),
            now.map(&fmt).unwrap_or_else(missing),
            fmt_extremes(summary.get(channel), &fmt)
        );
    }

    if let Some(latest) = &summary.latest {
        println!("  last sample  {}", hour_label(latest.hour));
    }

    let pressure = live
        .pressure
        .or_else(|| summary.latest.as_ref().map(|r| r.pressure));
    if let Some(mbar) = pressure.filter(|p| *p > 0.0) {
        let forecast = Forecast::from_pressure(mbar, Local::now().hour());
        println!("  forecast     {}", forecast.describe());
    }
    println!();
    Ok(())
}

fn stored_value(row: &crate::models::SampleRow, channel: Channel) -> f64 {
    match channel {
        Channel::Temperature => row.temperature,
        Channel::Pressure => row.pressure,
        Channel::Humidity => row.humidity,
    }
}

fn fmt_extremes(ext: Option<Extremes>, fmt: impl Fn(f64) -> String) -> String {
    match ext {
        Some(e) => format!(
            "max {}  min {}",
            colorize_max(&fmt(e.max)),
            colorize_min(&fmt(e.min))
        ),
        None => missing(),
    }
}
