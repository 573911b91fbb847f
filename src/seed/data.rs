//! Static reference data, one ordered table per entity.
//!
//! Rows are append-only across releases: a new release adds rows with a higher
//! `seed_version` and bumps [`VERSION`]. Existing rows are never edited, since
//! stores that already hold them would not pick up the change.

use super::rows::{
    CategorySeed, EntryTypeSeed, LabelSeed, LabelTagSeed, MeasurementKindSeed, TagSeed,
};
use super::SeedSet;

/// Latest reference-data release.
pub const VERSION: u32 = 3;

pub const FOOD: i64 = 1;
pub const EMOTION: i64 = 2;
pub const HYDRATION: i64 = 3;
pub const SLEEP: i64 = 4;
pub const SYMPTOM: i64 = 5;
pub const ACTIVITY: i64 = 6;

/// Name of the food root label whose children form the single-choice group.
pub const MEAL_SOURCE: &str = "Meal Source";

/// The full seed release shipped with this binary.
pub const SEED: SeedSet<'static> = SeedSet {
    version: VERSION,
    measurement_kinds: MEASUREMENT_KINDS,
    categories: CATEGORIES,
    entry_types: ENTRY_TYPES,
    labels: LABELS,
    tags: TAGS,
    label_tags: LABEL_TAGS,
};

const fn kind(id: i64, name: &'static str, display_name: &'static str) -> MeasurementKindSeed {
    MeasurementKindSeed { id, name, display_name, seed_version: 1 }
}

const fn category(id: i64, name: &'static str) -> CategorySeed {
    CategorySeed { id, name, seed_version: 1 }
}

const fn entry_type(
    id: i64,
    name: &'static str,
    measurement_type_id: i64,
    prompt: &'static str,
    icon: &'static str,
) -> EntryTypeSeed {
    EntryTypeSeed {
        id,
        name,
        measurement_type_id,
        prompt: Some(prompt),
        icon: Some(icon),
        is_enabled: true,
        is_default: true,
        sort_order: id as i32,
        seed_version: 1,
    }
}

const fn label(
    id: i64,
    entry_type_id: i64,
    name: &'static str,
    sort_order: i32,
    seed_version: u32,
) -> LabelSeed {
    LabelSeed {
        id,
        entry_type_id,
        name,
        parent_id: None,
        category_id: None,
        is_default: true,
        is_enabled: true,
        sort_order,
        seed_version,
    }
}

const fn child(parent: i64, seed: LabelSeed) -> LabelSeed {
    LabelSeed { parent_id: Some(parent), ..seed }
}

const fn in_category(category_id: i64, seed: LabelSeed) -> LabelSeed {
    LabelSeed { category_id: Some(category_id), ..seed }
}

const fn tag(id: i64, name: &'static str, tag_group: &'static str, seed_version: u32) -> TagSeed {
    TagSeed { id, name, tag_group, seed_version }
}

const fn link(label_id: i64, tag_id: i64, seed_version: u32) -> LabelTagSeed {
    LabelTagSeed { label_id, tag_id, seed_version }
}

pub const MEASUREMENT_KINDS: &[MeasurementKindSeed] = &[
    kind(1, "numeric", "Enter a number"),
    kind(2, "label_select", "Select one or more"),
    kind(3, "label_select_severity", "Select and rate severity"),
    kind(4, "label_category_select", "Select by category"),
];

pub const CATEGORIES: &[CategorySeed] = &[
    category(1, "Connect"),
    category(2, "Move"),
    category(3, "Reflect"),
    category(4, "Breathe"),
    category(5, "Nourish"),
    category(6, "Create"),
    category(7, "Ground"),
    category(8, "Structure"),
];

pub const ENTRY_TYPES: &[EntryTypeSeed] = &[
    entry_type(FOOD, "Food", 2, "What did you eat?", "food"),
    entry_type(EMOTION, "Emotion", 2, "How are you feeling?", "emotion"),
    entry_type(HYDRATION, "Hydration", 1, "How much did you drink?", "hydration"),
    entry_type(SLEEP, "Sleep", 1, "How many hours did you sleep?", "sleep"),
    entry_type(SYMPTOM, "Symptom", 3, "What are you experiencing?", "symptom"),
    entry_type(ACTIVITY, "Activity", 4, "What did you do?", "activity"),
];

pub const LABELS: &[LabelSeed] = &[
    // v1: food, flat
    label(1, FOOD, "Cheese", 1, 1),
    label(2, FOOD, "Bread", 2, 1),
    label(3, FOOD, "Rice", 3, 1),
    label(4, FOOD, "Chicken", 4, 1),
    label(5, FOOD, "Eggs", 5, 1),
    label(6, FOOD, "Milk", 6, 1),
    label(7, FOOD, "Yogurt", 7, 1),
    label(8, FOOD, "Pasta", 8, 1),
    label(9, FOOD, "Beef", 9, 1),
    label(10, FOOD, "Fish", 10, 1),
    label(11, FOOD, "Tofu", 11, 1),
    label(12, FOOD, "Salad", 12, 1),
    label(13, FOOD, "Fruit", 13, 1),
    label(14, FOOD, "Vegetables", 14, 1),
    label(15, FOOD, "Coffee", 15, 1),
    label(16, FOOD, "Tea", 16, 1),
    label(17, FOOD, "Soup", 17, 1),
    label(18, FOOD, "Pizza", 18, 1),
    label(19, FOOD, "Chocolate", 19, 1),
    label(20, FOOD, "Ice Cream", 20, 1),
    label(21, FOOD, "Nuts", 21, 1),
    label(22, FOOD, "Beans", 22, 1),
    label(23, FOOD, "Oats", 23, 1),
    label(24, FOOD, "Soda", 24, 1),
    label(25, FOOD, "Alcohol", 25, 1),
    // v2: meal source group (root before children)
    label(26, FOOD, MEAL_SOURCE, 100, 2),
    child(26, label(27, FOOD, "Home Cooked", 1, 2)),
    child(26, label(28, FOOD, "Eating Out", 2, 2)),
    // v3: emotion
    label(30, EMOTION, "Calm", 1, 3),
    label(31, EMOTION, "Happy", 2, 3),
    label(32, EMOTION, "Grateful", 3, 3),
    label(33, EMOTION, "Anxious", 4, 3),
    label(34, EMOTION, "Sad", 5, 3),
    label(35, EMOTION, "Irritable", 6, 3),
    label(36, EMOTION, "Tired", 7, 3),
    // v3: symptom
    label(40, SYMPTOM, "Headache", 1, 3),
    label(41, SYMPTOM, "Bloating", 2, 3),
    label(42, SYMPTOM, "Nausea", 3, 3),
    label(43, SYMPTOM, "Fatigue", 4, 3),
    label(44, SYMPTOM, "Cramps", 5, 3),
    // v3: activity, by category
    in_category(1, label(50, ACTIVITY, "Called a friend", 1, 3)),
    in_category(2, label(51, ACTIVITY, "Walked", 2, 3)),
    in_category(2, label(52, ACTIVITY, "Hiked", 3, 3)),
    in_category(3, label(53, ACTIVITY, "Journaled", 4, 3)),
    in_category(4, label(54, ACTIVITY, "Meditated", 5, 3)),
    in_category(5, label(55, ACTIVITY, "Cooked a meal", 6, 3)),
    in_category(6, label(56, ACTIVITY, "Drew", 7, 3)),
    in_category(7, label(57, ACTIVITY, "Went outside", 8, 3)),
    in_category(8, label(58, ACTIVITY, "Made a plan", 9, 3)),
];

pub const TAGS: &[TagSeed] = &[
    tag(1, "dairy", "food", 1),
    tag(2, "gluten", "food", 1),
    tag(3, "FODMAP", "food", 1),
    tag(4, "caffeine", "food", 1),
    tag(5, "sugar", "food", 1),
    tag(6, "alcohol", "food", 1),
    tag(7, "processed", "food", 1),
    tag(8, "high protein", "food", 1),
    tag(9, "digestive", "symptom", 3),
    tag(10, "pain", "symptom", 3),
];

pub const LABEL_TAGS: &[LabelTagSeed] = &[
    link(1, 1, 1),
    link(1, 3, 1),
    link(2, 2, 1),
    link(4, 8, 1),
    link(5, 8, 1),
    link(6, 1, 1),
    link(6, 3, 1),
    link(7, 1, 1),
    link(7, 3, 1),
    link(8, 2, 1),
    link(9, 8, 1),
    link(10, 8, 1),
    link(15, 4, 1),
    link(16, 4, 1),
    link(18, 2, 1),
    link(18, 1, 1),
    link(18, 7, 1),
    link(19, 5, 1),
    link(19, 4, 1),
    link(20, 1, 1),
    link(20, 5, 1),
    link(22, 3, 1),
    link(22, 8, 1),
    link(23, 2, 1),
    link(24, 5, 1),
    link(24, 4, 1),
    link(25, 6, 1),
    link(40, 10, 3),
    link(41, 9, 3),
    link(42, 9, 3),
    link(44, 10, 3),
];
