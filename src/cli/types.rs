use anyhow::Result;

use haven::service::Haven;

/// List enabled entry types, optionally enabling or disabling one first.
pub async fn types(haven: &Haven, enable: Option<&str>, disable: Option<&str>) -> Result<()> {
    if let Some(name) = enable {
        let entry_type = super::entry_type(haven, name).await?;
        haven.set_entry_type_enabled(entry_type.id, true).await?;
    }
    if let Some(name) = disable {
        let entry_type = super::entry_type(haven, name).await?;
        haven.set_entry_type_enabled(entry_type.id, false).await?;
    }

    let types = haven.subscribe_entry_types().borrow().clone();
    println!("Entry Types");
    println!("{}", "=".repeat(40));
    for t in &types {
        let icon = t.icon();
        println!(
            "  {} {:<12} {}",
            icon.glyph(),
            t.name,
            t.prompt.as_deref().unwrap_or("")
        );
    }
    if types.is_empty() {
        println!("  (none enabled)");
    }
    Ok(())
}
