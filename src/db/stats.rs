use crate::db::queries;
use crate::db::schema::SchemaRegistry;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, RESET, YELLOW, colorize_optional};
use rusqlite::Connection;
use std::fs;

pub fn print_replica_info(
    conn: &Connection,
    db_path: &str,
    registry: &SchemaRegistry,
) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) ROW COUNTS
    //
    println!("{}• Tables:{}", CYAN, RESET);
    for table in registry.tables() {
        let count = queries::count_rows(conn, table)?;
        println!("    {:<12} {}{}{}", table.name, GREEN, count, RESET);
    }

    //
    // 3) TIMESHEET DATE RANGE
    //
    let first: Option<String> =
        conn.query_row("SELECT MIN(datestring) FROM timesheet", [], |row| {
            row.get(0)
        })?;
    let last: Option<String> =
        conn.query_row("SELECT MAX(datestring) FROM timesheet", [], |row| {
            row.get(0)
        })?;

    println!("{}• Timesheet range:{}", CYAN, RESET);
    println!("    from: {}", colorize_optional(first.as_deref()));
    println!("    to:   {}", colorize_optional(last.as_deref()));

    //
    // 4) TOTAL BOOKED TIME
    //
    let booked: Option<i64> = conn.query_row("SELECT SUM(timestring) FROM timesheet", [], |row| {
        row.get(0)
    })?;
    if let Some(total) = booked {
        println!("{}• Booked time:{} {}{}{}", CYAN, RESET, GREEN, total, RESET);
    }

    println!();
    Ok(())
}
