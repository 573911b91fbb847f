//! CLI `doctor` command: run database diagnostics and print a health report.

use anyhow::{Context, Result};

use haven::config::HavenConfig;
use haven::db;
use haven::seed::{data, FileVersionStore, SeedVersionStore};

/// Run database diagnostics and print a health report.
pub fn doctor(config: &HavenConfig) -> Result<()> {
    let db_path = config.resolved_db_path();

    if !db_path.exists() {
        println!("Database: not found at {}", db_path.display());
        println!("Run `haven seed` to initialize.");
        return Ok(());
    }

    let file_size = std::fs::metadata(&db_path).map(|m| m.len()).unwrap_or(0);

    let conn = db::open_database(&db_path).context("failed to open database (may be corrupt)")?;
    let report = db::check_database_health(&conn).context("failed to run health check")?;

    let seed_path = config.resolved_seed_state_path();
    let applied = FileVersionStore::new(&seed_path).load();

    println!("Haven Health Report");
    println!("===================");
    println!();
    println!("Database:          {}", db_path.display());
    println!("File size:         {}", format_bytes(file_size));
    println!("Schema version:    {}", report.schema_version);
    println!();
    println!("Reference data:");
    println!("  Seed state:      {}", seed_path.display());
    match &applied {
        Ok(version) => println!("  Applied:         v{version}"),
        Err(e) => println!("  Applied:         unreadable ({e})"),
    }
    println!("  Bundled:         v{}", data::VERSION);
    if matches!(applied, Ok(v) if v < data::VERSION) {
        println!("  Status:          behind, the next open will upgrade it");
    }
    println!();
    println!("Row counts:");
    println!("  Entry types:     {}", report.entry_type_count);
    println!("  Labels:          {}", report.label_count);
    println!("  Entries:         {}", report.entry_count);
    println!();
    if report.integrity_ok {
        println!("Integrity check:   PASSED");
    } else {
        println!("Integrity check:   FAILED ({})", report.integrity_details);
    }
    if report.foreign_key_violations > 0 {
        println!("Foreign keys:      {} violation(s)", report.foreign_key_violations);
    }

    if !report.integrity_ok {
        println!();
        println!("Recovery steps:");
        println!("  1. Restore from a backup: cp backup.db {}", db_path.display());
        println!("  2. Or move the database aside and run `haven seed` to start fresh");
    }

    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
