//! Tests for domain model serialization.

use crate::db::{LoggedExercise, LoggedSet, Split, WorkoutHistory};

fn sample_exercises() -> Vec<LoggedExercise> {
    vec![
        LoggedExercise {
            name: "Squat".to_string(),
            sets: vec![
                LoggedSet {
                    weight: "100".to_string(),
                    reps: "5".to_string(),
                },
                LoggedSet {
                    weight: "110".to_string(),
                    reps: "3".to_string(),
                },
            ],
        },
        LoggedExercise {
            name: "Romanian Deadlift".to_string(),
            sets: vec![LoggedSet {
                weight: "80".to_string(),
                reps: "8".to_string(),
            }],
        },
    ]
}

#[test]
fn logged_exercises_round_trip_through_json() {
    let exercises = sample_exercises();
    let json = serde_json::to_string(&exercises).expect("Serialize should succeed");
    let parsed: Vec<LoggedExercise> =
        serde_json::from_str(&json).expect("Deserialize should succeed");
    assert_eq!(parsed, exercises);
}

#[test]
fn logged_exercise_document_shape_is_stable() {
    // The stored document is the external contract for history rows; its
    // field names must not drift.
    let json = serde_json::to_string(&sample_exercises()[0]).expect("Serialize should succeed");
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["name"], "Squat");
    assert_eq!(value["sets"][0]["weight"], "100");
    assert_eq!(value["sets"][0]["reps"], "5");
}

#[test]
fn split_serializes_flags_as_booleans() {
    let split = Split {
        id: 1,
        name: "Push Pull Legs".to_string(),
        order_index: 1,
        is_favorite: true,
        is_default: false,
        created_at: "2024-06-01 10:00:00".to_string(),
    };
    let value = serde_json::to_value(&split).expect("Serialize should succeed");
    assert_eq!(value["is_favorite"], true);
    assert_eq!(value["is_default"], false);
}

#[test]
fn workout_history_round_trips() {
    let record = WorkoutHistory {
        id: 7,
        date: "2024-06-10".to_string(),
        split_id: 1,
        day_of_week: 0,
        exercises: sample_exercises(),
        use_metric: true,
        created_at: "2024-06-10 18:30:00".to_string(),
    };
    let json = serde_json::to_string(&record).expect("Serialize should succeed");
    let parsed: WorkoutHistory = serde_json::from_str(&json).expect("Deserialize should succeed");
    assert_eq!(parsed, record);
}
