//! Tests for database error types.

use crate::db::{DbError, DbResult};

#[test]
fn not_found_error_displays_correctly() {
    let err = DbError::NotFound {
        entity_type: "Split".to_string(),
        id: "42".to_string(),
    };
    assert_eq!(err.to_string(), "Entity not found: Split with id '42'");
}

#[test]
fn constraint_error_displays_correctly() {
    let err = DbError::Constraint {
        message: "cannot unset the only default split".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Constraint violation: cannot unset the only default split"
    );
}

#[test]
fn validation_error_displays_correctly() {
    let err = DbError::Validation {
        message: "Invalid workout date '10/06/2024'".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Validation error: Invalid workout date '10/06/2024'"
    );
}

#[test]
fn database_error_displays_correctly() {
    let err = DbError::Database {
        message: "disk I/O error".to_string(),
    };
    assert_eq!(err.to_string(), "Database error: disk I/O error");
}

#[test]
fn migration_error_displays_correctly() {
    let err = DbError::Migration {
        message: "Failed to add splits.order_index".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Migration error: Failed to add splits.order_index"
    );
}

#[test]
fn connection_error_displays_correctly() {
    let err = DbError::Connection {
        message: "unable to open database file".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Connection error: unable to open database file"
    );
}

#[test]
fn db_result_works_with_question_mark() {
    fn inner() -> DbResult<i64> {
        Err(DbError::Validation {
            message: "nope".to_string(),
        })
    }

    fn outer() -> DbResult<i64> {
        let v = inner()?;
        Ok(v)
    }

    assert!(outer().is_err());
}
