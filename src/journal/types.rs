//! Record types for the reference taxonomy and the journal.
//!
//! Defines [`EntryType`], [`Label`], [`Tag`] (reference data), [`NewEntry`]
//! (write request), [`EntryWithDetails`] (feed read model) and
//! [`LabelFrequency`] (aggregator output), plus [`EntryTypeIcon`].

use serde::{Deserialize, Serialize};

/// Source kind written for entries created by the user.
pub const SOURCE_LOG: &str = "log";

/// A loggable kind of event (Food, Sleep, ...), matching the `entry_type` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryType {
    pub id: i64,
    pub name: String,
    pub measurement_type_id: i64,
    pub prompt: Option<String>,
    /// Raw icon key as stored; resolve with [`EntryTypeIcon::from_key`].
    pub icon: Option<String>,
    pub is_enabled: bool,
    pub is_default: bool,
    pub sort_order: i32,
}

impl EntryType {
    pub fn icon(&self) -> EntryTypeIcon {
        EntryTypeIcon::from_key(self.icon.as_deref())
    }
}

/// A selectable label, matching the `label` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub id: i64,
    pub entry_type_id: i64,
    pub name: String,
    /// Root labels have no parent; children belong to a single-choice group.
    pub parent_id: Option<i64>,
    pub category_id: Option<i64>,
    pub is_default: bool,
    pub is_enabled: bool,
    pub sort_order: i32,
    pub seed_version: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    pub tag_group: String,
    pub seed_version: u32,
}

/// Everything needed to write one entry and its label links.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewEntry {
    pub entry_type_id: i64,
    /// Content labels selected by the user.
    pub label_ids: Vec<i64>,
    /// Chosen child of the single-choice group, if any.
    pub single_choice_label_id: Option<i64>,
    /// Present for numeric entry types (hours slept, ounces drunk).
    pub numeric_value: Option<f64>,
    pub notes: Option<String>,
    /// ISO 8601 with offset. `None` means "now" in local time.
    pub timestamp: Option<String>,
}

/// An entry joined with its type and label names, as shown in the feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryWithDetails {
    pub id: i64,
    pub entry_type_id: i64,
    pub entry_type_name: String,
    pub entry_type_icon: Option<String>,
    pub source_type: String,
    pub timestamp: String,
    pub created_at: String,
    pub numeric_value: Option<f64>,
    pub notes: Option<String>,
    /// Comma-separated label names, `None` when the entry has no labels.
    pub label_names: Option<String>,
}

impl EntryWithDetails {
    pub fn icon(&self) -> EntryTypeIcon {
        EntryTypeIcon::from_key(self.entry_type_icon.as_deref())
    }
}

/// One row of [`crate::journal::frequency::label_frequency`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LabelFrequency {
    pub label_id: i64,
    pub count: u32,
}

/// Icon shown next to an entry type. Unknown keys fall back to [`EntryTypeIcon::Generic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryTypeIcon {
    Food,
    Emotion,
    Hydration,
    Sleep,
    Symptom,
    Activity,
    Generic,
}

impl EntryTypeIcon {
    /// Resolve a stored icon key. Never fails: new entry types without a
    /// matching icon render with the generic one.
    pub fn from_key(key: Option<&str>) -> Self {
        match key {
            Some("food") => Self::Food,
            Some("emotion") => Self::Emotion,
            Some("hydration") => Self::Hydration,
            Some("sleep") => Self::Sleep,
            Some("symptom") => Self::Symptom,
            Some("activity") => Self::Activity,
            _ => Self::Generic,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Emotion => "emotion",
            Self::Hydration => "hydration",
            Self::Sleep => "sleep",
            Self::Symptom => "symptom",
            Self::Activity => "activity",
            Self::Generic => "generic",
        }
    }

    /// Terminal glyph for the CLI.
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Food => "🍽",
            Self::Emotion => "🙂",
            Self::Hydration => "💧",
            Self::Sleep => "🌙",
            Self::Symptom => "🤒",
            Self::Activity => "🧩",
            Self::Generic => "🎹",
        }
    }
}

impl std::fmt::Display for EntryTypeIcon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
