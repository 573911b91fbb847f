use anyhow::{Context, Result};

use haven::journal::labeling::{partition_labels, LabelSelection};
use haven::journal::summary::entry_summary;
use haven::service::Haven;

pub struct LogArgs<'a> {
    pub type_name: &'a str,
    pub labels: &'a [String],
    pub single: Option<&'a str>,
    pub value: Option<f64>,
    pub notes: Option<String>,
    pub at: Option<String>,
}

/// Log one entry from label names and an optional value.
pub async fn log(haven: &Haven, args: LogArgs<'_>) -> Result<()> {
    let entry_type = super::entry_type(haven, args.type_name).await?;
    let labels = haven.labels_for_entry_type(entry_type.id).await?;
    let parts = partition_labels(&labels, &haven.config().suggestions.single_choice_group);

    let mut selection = LabelSelection::new();
    for name in args.labels {
        let label = super::find_label(&parts.content, name)?;
        if !selection.is_selected(label.id) {
            selection.toggle(label.id);
        }
    }
    if let Some(name) = args.single {
        let options = parts
            .single_choice
            .as_ref()
            .map(|g| g.options.as_slice())
            .unwrap_or_default();
        selection.choose_single(super::find_label(options, name)?.id);
    }

    let mut entry = selection.to_new_entry(entry_type.id);
    entry.numeric_value = args.value;
    entry.notes = args.notes;
    entry.timestamp = args.at;

    let id = haven.save_entry(entry).await.context("failed to save entry")?;
    let saved = haven.entry(id).await?;
    println!("Saved entry #{id} at {}: {}", saved.timestamp, entry_summary(&saved));
    Ok(())
}
