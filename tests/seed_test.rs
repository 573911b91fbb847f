mod helpers;

use haven::error::HavenError;
use haven::seed::rows::{LabelTagSeed, TagSeed};
use haven::seed::{self, apply_seed, data, MemoryVersionStore, SeedSet, SeedVersionStore};
use rusqlite::Connection;

fn snapshot(conn: &Connection) -> Vec<(String, i64)> {
    ["measurement_type", "category", "entry_type", "label", "tag", "label_tag"]
        .iter()
        .map(|t| (t.to_string(), helpers::count(conn, t)))
        .collect()
}

#[test]
fn second_run_is_a_no_op() {
    let mut conn = helpers::test_db();
    let v = apply_seed(&mut conn, &data::SEED, 0).unwrap();
    let after_first = snapshot(&conn);

    let v2 = apply_seed(&mut conn, &data::SEED, v).unwrap();

    assert_eq!(v, v2);
    assert_eq!(snapshot(&conn), after_first);
}

#[test]
fn replaying_a_release_over_itself_changes_nothing() {
    // A crash between commit and persisting the version replays the same rows.
    let mut conn = helpers::test_db();
    apply_seed(&mut conn, &data::SEED, 0).unwrap();
    let before = snapshot(&conn);

    apply_seed(&mut conn, &data::SEED, 0).unwrap();

    assert_eq!(snapshot(&conn), before);
}

#[test]
fn upgrade_from_v1_adds_exactly_the_newer_rows() {
    let mut conn = helpers::test_db();
    let v1 = SeedSet { version: 1, ..data::SEED };
    assert_eq!(apply_seed(&mut conn, &v1, 0).unwrap(), 1);

    let v1_labels = data::LABELS.iter().filter(|l| l.seed_version == 1).count() as i64;
    assert_eq!(helpers::count(&conn, "label"), v1_labels);
    let meal_source: i64 = conn
        .query_row("SELECT COUNT(*) FROM label WHERE name = ?1", [data::MEAL_SOURCE], |r| r.get(0))
        .unwrap();
    assert_eq!(meal_source, 0);

    assert_eq!(apply_seed(&mut conn, &data::SEED, 1).unwrap(), data::VERSION);

    let newer_labels = data::LABELS.iter().filter(|l| l.seed_version > 1).count() as i64;
    assert_eq!(helpers::count(&conn, "label"), v1_labels + newer_labels);
    assert_eq!(helpers::count(&conn, "label"), data::LABELS.len() as i64);
    assert_eq!(helpers::count(&conn, "tag"), data::TAGS.len() as i64);
    assert_eq!(helpers::count(&conn, "label_tag"), data::LABEL_TAGS.len() as i64);
}

#[test]
fn upgrade_skips_rows_at_or_below_the_applied_version() {
    let mut conn = helpers::test_db();
    apply_seed(&mut conn, &SeedSet { version: 2, ..data::SEED }, 0).unwrap();
    // A v1 label the user removed stays removed after the v3 upgrade.
    conn.execute("DELETE FROM label_tag WHERE label_id = 24", []).unwrap();
    conn.execute("DELETE FROM label WHERE id = 24", []).unwrap();

    apply_seed(&mut conn, &data::SEED, 2).unwrap();

    let present: i64 = conn
        .query_row("SELECT COUNT(*) FROM label WHERE id = 24", [], |r| r.get(0))
        .unwrap();
    assert_eq!(present, 0);
    let emotion: i64 = conn
        .query_row("SELECT COUNT(*) FROM label WHERE entry_type_id = ?1", [data::EMOTION], |r| r.get(0))
        .unwrap();
    assert_eq!(emotion, 7);
}

#[test]
fn failed_release_rolls_back_and_keeps_version() {
    // INSERT OR IGNORE does not cover foreign keys, so a dangling link aborts.
    let bad_links = [LabelTagSeed { label_id: 9_999, tag_id: 1, seed_version: 1 }];
    let bad = SeedSet { version: 1, label_tags: &bad_links, ..data::SEED };

    let mut conn = helpers::test_db();
    let store = MemoryVersionStore::new(0);
    let err = seed::seed_on_open(&mut conn, &bad, &store).unwrap_err();

    assert!(matches!(err, HavenError::Database(_)));
    assert_eq!(store.load().unwrap(), 0);
    assert!(snapshot(&conn).iter().all(|(_, n)| *n == 0));

    // The next open with a good release succeeds from scratch.
    assert_eq!(seed::seed_on_open(&mut conn, &data::SEED, &store).unwrap(), data::VERSION);
    assert_eq!(store.load().unwrap(), data::VERSION);
}

#[test]
fn conflicting_unique_rows_are_ignored_not_fatal() {
    let tags = [
        TagSeed { id: 1, name: "dairy", tag_group: "food", seed_version: 1 },
        TagSeed { id: 2, name: "dairy", tag_group: "food", seed_version: 1 },
    ];
    let seed = SeedSet { version: 1, labels: &[], tags: &tags, label_tags: &[], ..data::SEED };

    let mut conn = helpers::test_db();
    apply_seed(&mut conn, &seed, 0).unwrap();
    assert_eq!(helpers::count(&conn, "tag"), 1);
}

#[test]
fn seed_on_open_is_idempotent_across_opens() {
    let mut conn = helpers::test_db();
    let store = MemoryVersionStore::new(0);

    seed::seed_on_open(&mut conn, &data::SEED, &store).unwrap();
    let first = snapshot(&conn);
    seed::seed_on_open(&mut conn, &data::SEED, &store).unwrap();

    assert_eq!(snapshot(&conn), first);
    assert_eq!(store.get(), data::VERSION);
}
