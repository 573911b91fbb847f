use anyhow::Result;

use haven::journal::labeling::{filter_labels, partition_labels};
use haven::service::Haven;

/// Show the labels of one entry type, split into content labels and the
/// single-choice group.
pub async fn labels(haven: &Haven, type_name: &str, search: Option<&str>) -> Result<()> {
    let entry_type = super::entry_type(haven, type_name).await?;
    let labels = haven.labels_for_entry_type(entry_type.id).await?;
    let parts = partition_labels(&labels, &haven.config().suggestions.single_choice_group);

    println!("{} labels", entry_type.name);
    println!("{}", "=".repeat(40));
    let shown = filter_labels(&parts.content, search.unwrap_or(""));
    for label in &shown {
        println!("  [{:>3}] {}", label.id, label.name);
    }
    if shown.is_empty() {
        println!("  (no matches)");
    }

    if let Some(group) = parts.single_choice {
        println!();
        println!("{} (pick one):", group.root.name);
        for option in &group.options {
            println!("  [{:>3}] {}", option.id, option.name);
        }
    }
    Ok(())
}
