mod helpers;

use haven::error::HavenError;
use haven::journal::frequency::label_frequency;
use haven::journal::labeling::suggest_labels;
use haven::journal::types::LabelFrequency;
use haven::seed::data;
use rusqlite::Connection;

const CHEESE: i64 = 1;
const BREAD: i64 = 2;
const RICE: i64 = 3;
const CHICKEN: i64 = 4;
const HOME_COOKED: i64 = 27;

fn log_many(conn: &Connection, n: usize, timestamp: &str, label: i64) {
    for _ in 0..n {
        helpers::insert_entry(conn, data::FOOD, timestamp, &[label]);
    }
}

fn freq(label_id: i64, count: u32) -> LabelFrequency {
    LabelFrequency { label_id, count }
}

#[test]
fn wrapped_window_merges_both_halves() {
    let conn = helpers::seeded_db();
    log_many(&conn, 3, "2026-02-13T22:00:00-05:00", CHEESE);
    log_many(&conn, 4, "2026-02-14T02:00:00-05:00", CHEESE);
    log_many(&conn, 5, "2026-02-13T23:00:00-05:00", BREAD);

    let ranked = label_frequency(&conn, data::FOOD, 21, 6, 10).unwrap();

    assert_eq!(ranked, [freq(CHEESE, 7), freq(BREAD, 5)]);
}

#[test]
fn merged_ranking_is_truncated_to_limit() {
    let conn = helpers::seeded_db();
    log_many(&conn, 3, "2026-02-13T22:00:00-05:00", CHEESE);
    log_many(&conn, 4, "2026-02-14T02:00:00-05:00", CHEESE);
    log_many(&conn, 5, "2026-02-13T23:00:00-05:00", BREAD);
    log_many(&conn, 2, "2026-02-14T04:00:00-05:00", CHICKEN);
    log_many(&conn, 1, "2026-02-14T03:00:00-05:00", RICE);

    // Chicken only appears after midnight and is cut by the merged limit.
    let ranked = label_frequency(&conn, data::FOOD, 21, 6, 2).unwrap();
    assert_eq!(ranked, [freq(CHEESE, 7), freq(BREAD, 5)]);

    let ranked = label_frequency(&conn, data::FOOD, 21, 6, 3).unwrap();
    assert_eq!(ranked, [freq(CHEESE, 7), freq(BREAD, 5), freq(CHICKEN, 2)]);
}

#[test]
fn plain_window_excludes_end_hour_and_other_types() {
    let conn = helpers::seeded_db();
    log_many(&conn, 2, "2026-02-14T06:00:00-05:00", CHEESE);
    log_many(&conn, 1, "2026-02-14T11:59:00-05:00", BREAD);
    log_many(&conn, 9, "2026-02-14T12:00:00-05:00", RICE);
    helpers::insert_entry(&conn, data::EMOTION, "2026-02-14T08:00:00-05:00", &[30]);

    let ranked = label_frequency(&conn, data::FOOD, 6, 12, 10).unwrap();

    assert_eq!(ranked, [freq(CHEESE, 2), freq(BREAD, 1)]);
}

#[test]
fn hour_comes_from_the_stored_local_time() {
    let conn = helpers::seeded_db();
    // 08:00 local regardless of the offset it was logged in.
    log_many(&conn, 1, "2026-02-14T08:00:00+09:00", CHEESE);
    log_many(&conn, 1, "2026-02-14T08:30", BREAD);

    let ranked = label_frequency(&conn, data::FOOD, 8, 9, 10).unwrap();
    assert_eq!(ranked.len(), 2);
}

#[test]
fn suggestions_follow_rank_and_drop_single_choice_labels() {
    let conn = helpers::seeded_db();
    log_many(&conn, 5, "2026-02-14T08:00:00-05:00", HOME_COOKED);
    log_many(&conn, 2, "2026-02-14T09:00:00-05:00", BREAD);
    log_many(&conn, 1, "2026-02-14T10:00:00-05:00", CHEESE);

    let suggestions = suggest_labels(&conn, data::FOOD, 9, 6, data::MEAL_SOURCE).unwrap();

    let names: Vec<&str> = suggestions.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, ["Bread", "Cheese"]);
}

#[test]
fn suggestions_fall_back_to_first_labels_when_window_is_empty() {
    let conn = helpers::seeded_db();
    // Evening history does not count toward a morning suggestion.
    log_many(&conn, 3, "2026-02-14T19:00:00-05:00", RICE);

    let suggestions = suggest_labels(&conn, data::FOOD, 7, 6, data::MEAL_SOURCE).unwrap();

    let names: Vec<&str> = suggestions.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, ["Cheese", "Bread", "Rice", "Chicken", "Eggs", "Milk"]);
}

#[test]
fn night_suggestions_use_the_wrapped_window() {
    let conn = helpers::seeded_db();
    log_many(&conn, 2, "2026-02-14T01:00:00-05:00", RICE);
    log_many(&conn, 1, "2026-02-13T22:00:00-05:00", CHEESE);

    let suggestions = suggest_labels(&conn, data::FOOD, 23, 6, data::MEAL_SOURCE).unwrap();

    let ids: Vec<i64> = suggestions.iter().map(|l| l.id).collect();
    assert_eq!(ids, [RICE, CHEESE]);
}

#[test]
fn history_of_only_single_choice_labels_suggests_nothing() {
    let conn = helpers::seeded_db();
    log_many(&conn, 3, "2026-02-14T08:00:00-05:00", HOME_COOKED);

    let ranked = label_frequency(&conn, data::FOOD, 6, 12, 6).unwrap();
    assert_eq!(ranked, [freq(HOME_COOKED, 3)]);

    let suggestions = suggest_labels(&conn, data::FOOD, 8, 6, data::MEAL_SOURCE).unwrap();
    assert!(suggestions.is_empty(), "{suggestions:?}");
}

#[test]
fn suggestion_hour_out_of_range_is_invalid() {
    let conn = helpers::seeded_db();
    for hour in [24, 30] {
        let result = suggest_labels(&conn, data::FOOD, hour, 6, data::MEAL_SOURCE);
        assert!(matches!(result, Err(HavenError::InvalidInput(_))), "hour {hour} accepted");
    }
}
