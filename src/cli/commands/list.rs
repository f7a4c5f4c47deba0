use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::views::{day_series, month_overview};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::{ChannelStats, DaySlot, DisplayUnits, SampleRow};
use crate::utils::colors::{colorize_max, colorize_min};
use crate::ui::messages::header;
use crate::utils::formatting::{display_units, hour_label, slot_label};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List {
        slot,
        month,
        temp_unit,
        press_unit,
    } = cmd
    {
        let units = display_units(cfg, *temp_unit, *press_unit);
        let mut pool = DbPool::open(&cfg.database)?;

        if *month {
            let days = month_overview(&mut pool)?;
            if days.is_empty() {
                println!("No samples recorded yet.");
                return Ok(());
            }
            print_month(&days, &units);
        } else {
            let slot = DaySlot::new(*slot)?;
            let rows = day_series(&mut pool, slot)?;
            if rows.is_empty() {
                println!("No samples for {} (slot {}).", slot_label(slot.get()), slot);
                return Ok(());
            }
            print_day(slot, &rows, &units);
        }
    }
    Ok(())
}

fn print_day(slot: DaySlot, rows: &[SampleRow], units: &DisplayUnits) {
    println!();
    header(format!(
        "Day {} ({}, slot {})",
        rows[0].day_of_month,
        slot_label(slot.get()),
        slot
    ));

    let mut table = Table::new(vec![
        Column::left("Hour", 5),
        Column::right("Temperature", 12),
        Column::right("Pressure", 14),
        Column::right("Humidity", 9),
    ]);
    for r in rows {
        table.add_row(vec![
            hour_label(r.hour),
            units.fmt_temp(r.temperature),
            units.fmt_press(r.pressure),
            units.fmt_humid(r.humidity),
        ]);
    }
    print!("{}", table.render());

    // the last row carries the day's aggregates
    if let Some(last) = rows.last() {
        println!();
        print_stats("Temperature", &last.temp_stats, |v| units.fmt_temp(v));
        print_stats("Pressure", &last.press_stats, |v| units.fmt_press(v));
        print_stats("Humidity", &last.humid_stats, |v| units.fmt_humid(v));
    }
}

fn print_stats(label: &str, stats: &ChannelStats, fmt: impl Fn(f64) -> String) {
    println!(
        "{:<12} max {}  min {}  avg {}",
        label,
        colorize_max(&fmt(stats.max)),
        colorize_min(&fmt(stats.min)),
        fmt(stats.avg)
    );
}

fn print_month(days: &[SampleRow], units: &DisplayUnits) {
    println!();
    header("Last recorded days");

    let mut table = Table::new(vec![
        Column::left("Day", 12),
        Column::right("Last", 5),
        Column::right("T max", 10),
        Column::right("T min", 10),
        Column::right("T avg", 10),
        Column::right("P avg", 14),
        Column::right("H max", 8),
        Column::right("H min", 8),
    ]);

    for d in days {
        table.add_row(vec![
            format!("{:>2} ({})", d.day_of_month, d.day_slot),
            hour_label(d.hour),
            colorize_max(&units.fmt_temp(d.temp_stats.max)),
            colorize_min(&units.fmt_temp(d.temp_stats.min)),
            units.fmt_temp(d.temp_stats.avg),
            units.fmt_press(d.press_stats.avg),
            colorize_max(&units.fmt_humid(d.humid_stats.max)),
            colorize_min(&units.fmt_humid(d.humid_stats.min)),
        ]);
    }
    print!("{}", table.render());
}
