use anyhow::{bail, Result};
use chrono::{Local, Timelike};

use haven::journal::labeling::DayPart;
use haven::service::Haven;

/// Print time-of-day label suggestions for an entry type.
pub async fn suggest(haven: &Haven, type_name: &str, hour: Option<u32>) -> Result<()> {
    let hour = hour.unwrap_or_else(|| Local::now().hour());
    if hour >= 24 {
        bail!("hour must be between 0 and 23, got {hour}");
    }

    let entry_type = super::entry_type(haven, type_name).await?;
    let suggestions = haven.suggest_labels(entry_type.id, hour).await?;
    let (start, end) = DayPart::from_hour(hour).window();

    println!("Suggested {} labels for {hour:02}:00 (window {start:02}-{end:02})", entry_type.name);
    for (rank, label) in suggestions.iter().enumerate() {
        println!("  {}. {}", rank + 1, label.name);
    }
    if suggestions.is_empty() {
        println!("  (no labels)");
    }
    Ok(())
}
