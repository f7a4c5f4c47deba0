use crate::db::pool::DbPool;
use crate::db::queries;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use std::fs;

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_kb = (file_size as f64) / 1024.0;

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.1} KB", CYAN, RESET, file_kb);

    //
    // 2) TOTAL ROWS
    //
    let count = queries::count_rows(&pool.conn)?;
    println!("{}• Total rows:{} {}{}{}", CYAN, RESET, GREEN, count, RESET);

    //
    // 3) RECORDED DAY SLOTS
    //
    let slots = queries::recorded_slots(&pool.conn)?;
    let fmt_slots = if slots.is_empty() {
        format!("{GREY}--{RESET}")
    } else {
        format!(
            "{} (slots {}..{})",
            slots.len(),
            slots.first().copied().unwrap_or(1),
            slots.last().copied().unwrap_or(1)
        )
    };
    println!("{}• Recorded days:{} {}", CYAN, RESET, fmt_slots);

    //
    // 4) LAST SAMPLE + ROLLOVER LATCH
    //
    match queries::last_row(&pool.conn)? {
        Some(r) => println!(
            "{}• Last sample:{} {:02}:00 on day {} (slot {})",
            CYAN, RESET, r.hour, r.day_of_month, r.day_slot
        ),
        None => println!("{}• Last sample:{} {GREY}--{RESET}", CYAN, RESET),
    }

    let latch = queries::get_meta(&pool.conn, crate::core::retention::LAST_SHIFT_KEY)?
        .unwrap_or_else(|| format!("{GREY}--{RESET}"));
    println!("{}• Last shift:{} {}", CYAN, RESET, latch);

    println!();
    Ok(())
}
