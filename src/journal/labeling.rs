//! Label selection and time-of-day suggestions for the logging workflow.
//!
//! An entry type's labels split into selectable content labels and at most
//! one single-choice group: a root label (named in config, "Meal Source" by
//! default) whose children are mutually exclusive.

use rusqlite::Connection;

use super::frequency::label_frequency;
use super::queries::labels_for_entry_type;
use super::types::{Label, NewEntry};
use crate::error::{HavenError, Result};

/// Fixed hour-of-day buckets used to rank suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPart {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl DayPart {
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            6..=11 => Self::Morning,
            12..=16 => Self::Afternoon,
            17..=20 => Self::Evening,
            _ => Self::Night,
        }
    }

    /// `(hour_start, hour_end)` with `hour_end` exclusive. Night wraps midnight.
    pub fn window(self) -> (u32, u32) {
        match self {
            Self::Morning => (6, 12),
            Self::Afternoon => (12, 17),
            Self::Evening => (17, 21),
            Self::Night => (21, 6),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SingleChoiceGroup {
    pub root: Label,
    pub options: Vec<Label>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartitionedLabels {
    pub content: Vec<Label>,
    pub single_choice: Option<SingleChoiceGroup>,
}

/// Split labels into content labels and the single-choice group rooted at
/// the root label named `group_root_name`. Input order is preserved.
pub fn partition_labels(labels: &[Label], group_root_name: &str) -> PartitionedLabels {
    let root = labels
        .iter()
        .find(|l| l.parent_id.is_none() && l.name == group_root_name)
        .cloned();

    let Some(root) = root else {
        return PartitionedLabels { content: labels.to_vec(), single_choice: None };
    };

    let (options, content): (Vec<Label>, Vec<Label>) = labels
        .iter()
        .filter(|l| l.id != root.id)
        .cloned()
        .partition(|l| l.parent_id == Some(root.id));

    PartitionedLabels { content, single_choice: Some(SingleChoiceGroup { root, options }) }
}

/// Content labels most used around `hour`, best first.
///
/// With history in the window, the ranked ids that resolve to content labels
/// are returned in rank order, possibly none. Only an empty window falls back
/// to the first `limit` content labels in sort order.
pub fn suggest_labels(
    conn: &Connection,
    entry_type_id: i64,
    hour: u32,
    limit: usize,
    group_root_name: &str,
) -> Result<Vec<Label>> {
    if hour >= 24 {
        return Err(HavenError::InvalidInput(format!("hour must be in 0..24, got {hour}")));
    }
    let labels = labels_for_entry_type(conn, entry_type_id)?;
    let content = partition_labels(&labels, group_root_name).content;

    let (hour_start, hour_end) = DayPart::from_hour(hour).window();
    let ranked = label_frequency(conn, entry_type_id, hour_start, hour_end, limit)?;

    let suggestions: Vec<Label> = ranked
        .iter()
        .filter_map(|f| content.iter().find(|l| l.id == f.label_id).cloned())
        .collect();

    tracing::debug!(
        entry_type_id,
        hour,
        ranked = ranked.len(),
        resolved = suggestions.len(),
        "label suggestions"
    );

    if ranked.is_empty() {
        return Ok(content.into_iter().take(limit).collect());
    }
    Ok(suggestions)
}

/// Case-insensitive substring search over label names. A blank query matches all.
pub fn filter_labels<'a>(labels: &'a [Label], query: &str) -> Vec<&'a Label> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return labels.iter().collect();
    }
    labels
        .iter()
        .filter(|l| l.name.to_lowercase().contains(&query))
        .collect()
}

/// In-progress label choice for one entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelSelection {
    selected: Vec<i64>,
    single_choice: Option<i64>,
}

impl LabelSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip a content label. Returns whether it is now selected.
    pub fn toggle(&mut self, label_id: i64) -> bool {
        if let Some(pos) = self.selected.iter().position(|&id| id == label_id) {
            self.selected.remove(pos);
            false
        } else {
            self.selected.push(label_id);
            true
        }
    }

    /// Choose a single-choice option, replacing any earlier choice.
    /// Choosing the current option clears it.
    pub fn choose_single(&mut self, label_id: i64) {
        self.single_choice = if self.single_choice == Some(label_id) { None } else { Some(label_id) };
    }

    pub fn is_selected(&self, label_id: i64) -> bool {
        self.selected.contains(&label_id)
    }

    pub fn single_choice(&self) -> Option<i64> {
        self.single_choice
    }

    /// Content labels in selection order.
    pub fn selected(&self) -> &[i64] {
        &self.selected
    }

    /// A single-choice option alone is not enough to save.
    pub fn can_save(&self, numeric_value: Option<f64>) -> bool {
        !self.selected.is_empty() || numeric_value.is_some()
    }

    /// Every label to link: content labels then the single choice, deduplicated.
    pub fn label_ids(&self) -> Vec<i64> {
        let mut ids = self.selected.clone();
        if let Some(id) = self.single_choice {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        ids
    }

    pub fn clear(&mut self) {
        self.selected.clear();
        self.single_choice = None;
    }

    pub fn to_new_entry(&self, entry_type_id: i64) -> NewEntry {
        NewEntry {
            entry_type_id,
            label_ids: self.selected.clone(),
            single_choice_label_id: self.single_choice,
            ..Default::default()
        }
    }
}
