//! First-person one-line summaries for feed entries ("I slept 7.5 hours").

use super::types::{EntryTypeIcon, EntryWithDetails};

/// A summary split into a plain lead-in and an emphasized remainder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryParts {
    pub prefix: String,
    pub emphasis: String,
}

impl SummaryParts {
    fn new(prefix: &str, emphasis: impl Into<String>) -> Self {
        Self { prefix: prefix.to_string(), emphasis: emphasis.into() }
    }

    pub fn full(&self) -> String {
        format!("{}{}", self.prefix, self.emphasis)
    }
}

pub fn entry_summary_parts(entry: &EntryWithDetails) -> SummaryParts {
    let labels = entry.label_names.as_deref();
    match entry.icon() {
        EntryTypeIcon::Sleep => SummaryParts::new("I slept ", format!("{} hours", format_number(entry.numeric_value))),
        EntryTypeIcon::Hydration => SummaryParts::new("I drank ", format!("{} oz", format_number(entry.numeric_value))),
        EntryTypeIcon::Food => SummaryParts::new("I ate ", labels.unwrap_or("something")),
        EntryTypeIcon::Emotion => SummaryParts::new("I felt ", labels.unwrap_or("something")),
        EntryTypeIcon::Symptom => SummaryParts::new("I experienced ", labels.unwrap_or("something")),
        EntryTypeIcon::Activity => activity_parts(labels),
        EntryTypeIcon::Generic => SummaryParts::new("", "Logged entry"),
    }
}

pub fn entry_summary(entry: &EntryWithDetails) -> String {
    entry_summary_parts(entry).full()
}

/// Whole numbers drop the fraction; a missing value renders as an em dash.
fn format_number(value: Option<f64>) -> String {
    match value {
        None => "\u{2014}".to_string(),
        Some(v) if v.fract() == 0.0 && v.abs() < 1e15 => format!("{}", v as i64),
        Some(v) => v.to_string(),
    }
}

// A single activity reads as a verb phrase ("I hiked"); several as a list.
fn activity_parts(labels: Option<&str>) -> SummaryParts {
    match labels {
        None => SummaryParts::new("I did ", "something"),
        Some(names) if names.contains(", ") => SummaryParts::new("I did ", names),
        Some(name) => SummaryParts::new("I ", name.to_lowercase()),
    }
}
