use anyhow::Result;

use haven::journal::types::EntryTypeIcon;
use haven::service::Haven;

/// Print the numeric total of an entry type for one local day.
pub async fn total(haven: &Haven, type_name: &str, date: Option<&str>) -> Result<()> {
    let entry_type = super::entry_type(haven, type_name).await?;
    let date = super::parse_date(date)?;
    let total = haven.daily_total(entry_type.id, date).await?;

    let unit = match entry_type.icon() {
        EntryTypeIcon::Hydration => " oz",
        EntryTypeIcon::Sleep => " hours",
        _ => "",
    };
    println!("{} on {date}: {}{unit}", entry_type.name, super::format_amount(total));
    Ok(())
}
