//! Critical integration tests for the split invariants and delete rules.

use crate::db::{
    Database, DbError, HistoryRepository, LoggedExercise, LoggedSet, SplitRepository,
    SqliteDatabase,
};

async fn setup_db() -> SqliteDatabase {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database");
    db.migrate().await.expect("Migration should succeed");
    db
}

async fn default_count(db: &SqliteDatabase) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM splits WHERE is_default = 1")
        .fetch_one(db.pool())
        .await
        .expect("Query should succeed")
}

async fn favorite_count(db: &SqliteDatabase) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM splits WHERE is_favorite = 1")
        .fetch_one(db.pool())
        .await
        .expect("Query should succeed")
}

#[tokio::test(flavor = "multi_thread")]
async fn set_default_keeps_exactly_one_default() {
    let db = setup_db().await;
    let splits = db.splits();

    let a = splits.add("A").await.unwrap();
    let b = splits.add("B").await.unwrap();
    let c = splits.add("C").await.unwrap();

    splits.set_default(a, true).await.expect("Set should succeed");
    assert_eq!(default_count(&db).await, 1);

    // Moving the default clears the old holder in the same transaction.
    splits.set_default(b, true).await.expect("Set should succeed");
    assert_eq!(default_count(&db).await, 1);
    assert_eq!(splits.get_default().await.unwrap().map(|s| s.id), Some(b));

    splits.set_default(c, true).await.expect("Set should succeed");
    splits.set_default(a, true).await.expect("Set should succeed");
    assert_eq!(default_count(&db).await, 1);
    assert_eq!(splits.get_default().await.unwrap().map(|s| s.id), Some(a));
}

#[tokio::test(flavor = "multi_thread")]
async fn unsetting_default_promotes_another_split() {
    let db = setup_db().await;
    let splits = db.splits();

    let a = splits.add("A").await.unwrap();
    let b = splits.add("B").await.unwrap();

    splits.set_default(a, true).await.unwrap();
    let changed = splits.set_default(a, false).await.expect("Unset should succeed");
    assert!(changed);

    // Never zero defaults while splits exist.
    assert_eq!(default_count(&db).await, 1);
    assert_eq!(splits.get_default().await.unwrap().map(|s| s.id), Some(b));
}

#[tokio::test(flavor = "multi_thread")]
async fn unsetting_only_default_with_no_other_split_fails() {
    let db = setup_db().await;
    let splits = db.splits();

    let only = splits.add("Only").await.unwrap();
    splits.set_default(only, true).await.unwrap();

    let result = splits.set_default(only, false).await;
    assert!(matches!(result, Err(DbError::Constraint { .. })));

    // State unchanged: the split is still the default.
    assert_eq!(default_count(&db).await, 1);
    assert_eq!(splits.get_default().await.unwrap().map(|s| s.id), Some(only));
}

#[tokio::test(flavor = "multi_thread")]
async fn set_default_missing_split_changes_nothing() {
    let db = setup_db().await;
    let splits = db.splits();

    let a = splits.add("A").await.unwrap();
    splits.set_default(a, true).await.unwrap();

    assert!(!splits.set_default(999, true).await.unwrap());

    // The bad id must not have disturbed the current default.
    assert_eq!(default_count(&db).await, 1);
    assert_eq!(splits.get_default().await.unwrap().map(|s| s.id), Some(a));
}

#[tokio::test(flavor = "multi_thread")]
async fn toggle_favorite_keeps_at_most_one() {
    let db = setup_db().await;
    let splits = db.splits();

    let a = splits.add("A").await.unwrap();
    let b = splits.add("B").await.unwrap();

    splits.toggle_favorite(a).await.expect("Toggle should succeed");
    assert_eq!(favorite_count(&db).await, 1);

    // Favoriting B steals the flag from A.
    splits.toggle_favorite(b).await.expect("Toggle should succeed");
    assert_eq!(favorite_count(&db).await, 1);
    assert_eq!(splits.get_favorite().await.unwrap().map(|s| s.id), Some(b));

    // Toggling the current favorite clears it; zero favorites is legal.
    splits.toggle_favorite(b).await.expect("Toggle should succeed");
    assert_eq!(favorite_count(&db).await, 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn toggle_favorite_missing_split_returns_false() {
    let db = setup_db().await;
    assert!(!db.splits().toggle_favorite(999).await.unwrap());
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_split_cascades_to_days_and_entries() {
    let db = setup_db().await;
    let splits = db.splits();

    let split_id = splits.add("Push Pull Legs").await.unwrap();
    let push = splits.add_day(split_id, 0, "Push").await.unwrap();
    let pull = splits.add_day(split_id, 1, "Pull").await.unwrap();
    splits.add_day_exercise(push, "Bench Press", 0).await.unwrap();
    splits.add_day_exercise(pull, "Barbell Row", 0).await.unwrap();

    assert!(splits.delete(split_id).await.unwrap());

    let days: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM split_days")
        .fetch_one(db.pool())
        .await
        .unwrap();
    let entries: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM split_day_exercises")
        .fetch_one(db.pool())
        .await
        .unwrap();
    assert_eq!(days, 0);
    assert_eq!(entries, 0);

    // The shared exercise rows are not owned by the split tree.
    let exercises: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM exercises")
        .fetch_one(db.pool())
        .await
        .unwrap();
    assert_eq!(exercises, 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_split_retains_logged_history() {
    let db = setup_db().await;
    let splits = db.splits();

    let split_id = splits.add("Strength").await.unwrap();
    db.history()
        .save(
            split_id,
            "2024-06-10",
            &[LoggedExercise {
                name: "Squat".to_string(),
                sets: vec![LoggedSet {
                    weight: "100".to_string(),
                    reps: "5".to_string(),
                }],
            }],
            true,
        )
        .await
        .expect("Save should succeed");

    assert!(splits.delete(split_id).await.expect("Delete should succeed"));

    // History outlives the split it was logged against.
    let record = db
        .history()
        .get("2024-06-10", split_id, 0)
        .await
        .expect("Get should succeed");
    assert!(record.is_some());
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_split_does_not_touch_default_flag_elsewhere() {
    let db = setup_db().await;
    let splits = db.splits();

    let a = splits.add("A").await.unwrap();
    let b = splits.add("B").await.unwrap();
    splits.set_default(a, true).await.unwrap();

    // Deleting the default is allowed; blocking it is caller policy.
    // The repository performs the delete and the table is left with
    // zero defaults until the caller reassigns.
    assert!(splits.delete(a).await.unwrap());
    assert_eq!(default_count(&db).await, 0);

    splits.set_default(b, true).await.unwrap();
    assert_eq!(default_count(&db).await, 1);
}
