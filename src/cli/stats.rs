use anyhow::Result;

use haven::config::HavenConfig;

/// Display journal statistics in the terminal.
pub fn stats(config: &HavenConfig) -> Result<()> {
    let db_path = config.resolved_db_path();
    let conn = haven::db::open_database(&db_path)?;

    let response = haven::journal::stats::journal_stats(&conn, Some(&db_path))?;

    println!("Journal Statistics");
    println!("{}", "=".repeat(40));
    println!("  Total entries:       {}", response.total_entries);
    println!("  With labels:         {}", response.labeled_entries);
    println!();

    println!("By Type:");
    for t in &response.by_type {
        println!("  {:<12} {}", t.name, t.entries);
    }
    println!();

    println!("Database size:         {} bytes", response.db_size_bytes);

    if let Some(ref oldest) = response.oldest_entry {
        println!("Oldest entry:          {oldest}");
    }
    if let Some(ref newest) = response.newest_entry {
        println!("Newest entry:          {newest}");
    }

    Ok(())
}
