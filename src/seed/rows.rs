//! Typed reference-data records and their table bindings.
//!
//! Each record type knows its table, its column list and how to bind itself to
//! a prepared `INSERT OR IGNORE` statement. The migrator only ever talks to the
//! [`SeedRow`] trait.

use rusqlite::{params, Statement};

/// A reference-data record that can be written by the generic seed routine.
pub trait SeedRow {
    /// Target table.
    const TABLE: &'static str;
    /// Column names in the order [`SeedRow::execute`] binds them.
    const COLUMNS: &'static [&'static str];

    /// Seed release that introduced this row.
    fn seed_version(&self) -> u32;

    /// Execute `stmt` with this row's values. Returns the number of rows
    /// actually inserted (0 when the primary key already existed).
    fn execute(&self, stmt: &mut Statement<'_>) -> rusqlite::Result<usize>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasurementKindSeed {
    pub id: i64,
    pub name: &'static str,
    pub display_name: &'static str,
    pub seed_version: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategorySeed {
    pub id: i64,
    pub name: &'static str,
    pub seed_version: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntryTypeSeed {
    pub id: i64,
    pub name: &'static str,
    pub measurement_type_id: i64,
    pub prompt: Option<&'static str>,
    pub icon: Option<&'static str>,
    pub is_enabled: bool,
    pub is_default: bool,
    pub sort_order: i32,
    pub seed_version: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelSeed {
    pub id: i64,
    pub entry_type_id: i64,
    pub name: &'static str,
    pub parent_id: Option<i64>,
    pub category_id: Option<i64>,
    pub is_default: bool,
    pub is_enabled: bool,
    pub sort_order: i32,
    pub seed_version: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TagSeed {
    pub id: i64,
    pub name: &'static str,
    pub tag_group: &'static str,
    pub seed_version: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelTagSeed {
    pub label_id: i64,
    pub tag_id: i64,
    pub seed_version: u32,
}

impl SeedRow for MeasurementKindSeed {
    const TABLE: &'static str = "measurement_type";
    const COLUMNS: &'static [&'static str] = &["id", "name", "display_name"];

    fn seed_version(&self) -> u32 {
        self.seed_version
    }

    fn execute(&self, stmt: &mut Statement<'_>) -> rusqlite::Result<usize> {
        stmt.execute(params![self.id, self.name, self.display_name])
    }
}

impl SeedRow for CategorySeed {
    const TABLE: &'static str = "category";
    const COLUMNS: &'static [&'static str] = &["id", "name"];

    fn seed_version(&self) -> u32 {
        self.seed_version
    }

    fn execute(&self, stmt: &mut Statement<'_>) -> rusqlite::Result<usize> {
        stmt.execute(params![self.id, self.name])
    }
}

impl SeedRow for EntryTypeSeed {
    const TABLE: &'static str = "entry_type";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "name",
        "measurement_type_id",
        "prompt",
        "icon",
        "is_enabled",
        "is_default",
        "sort_order",
    ];

    fn seed_version(&self) -> u32 {
        self.seed_version
    }

    fn execute(&self, stmt: &mut Statement<'_>) -> rusqlite::Result<usize> {
        stmt.execute(params![
            self.id,
            self.name,
            self.measurement_type_id,
            self.prompt,
            self.icon,
            self.is_enabled,
            self.is_default,
            self.sort_order,
        ])
    }
}

impl SeedRow for LabelSeed {
    const TABLE: &'static str = "label";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "entry_type_id",
        "name",
        "parent_id",
        "category_id",
        "is_default",
        "is_enabled",
        "sort_order",
        "seed_version",
    ];

    fn seed_version(&self) -> u32 {
        self.seed_version
    }

    fn execute(&self, stmt: &mut Statement<'_>) -> rusqlite::Result<usize> {
        stmt.execute(params![
            self.id,
            self.entry_type_id,
            self.name,
            self.parent_id,
            self.category_id,
            self.is_default,
            self.is_enabled,
            self.sort_order,
            self.seed_version,
        ])
    }
}

impl SeedRow for TagSeed {
    const TABLE: &'static str = "tag";
    const COLUMNS: &'static [&'static str] = &["id", "name", "tag_group", "seed_version"];

    fn seed_version(&self) -> u32 {
        self.seed_version
    }

    fn execute(&self, stmt: &mut Statement<'_>) -> rusqlite::Result<usize> {
        stmt.execute(params![self.id, self.name, self.tag_group, self.seed_version])
    }
}

impl SeedRow for LabelTagSeed {
    const TABLE: &'static str = "label_tag";
    const COLUMNS: &'static [&'static str] = &["label_id", "tag_id", "seed_version"];

    fn seed_version(&self) -> u32 {
        self.seed_version
    }

    fn execute(&self, stmt: &mut Statement<'_>) -> rusqlite::Result<usize> {
        stmt.execute(params![self.label_id, self.tag_id, self.seed_version])
    }
}
