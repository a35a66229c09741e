//! Domain models for the workout database.
//!
//! These models are storage-agnostic and represent the core entities
//! used throughout the application.

use serde::{Deserialize, Serialize};

/// Integer row id assigned by the database.
pub type Id = i64;

/// Days are numbered 0 = Monday .. 6 = Sunday, matching the order the
/// app renders a training week. Stored and returned verbatim.
pub type DayOfWeek = i64;

/// A named weekly workout template.
///
/// `order_index` controls display order (lower first, creation time
/// descending as tiebreak). At most one split is the favorite; exactly one
/// is the default whenever any split exists. Both flags are maintained by
/// repository logic, not by schema constraints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Split {
    pub id: Id,
    pub name: String,
    pub order_index: i64,
    pub is_favorite: bool,
    pub is_default: bool,
    pub created_at: String,
}

/// One weekday's exercise list within a split. Owned by its split and
/// removed with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitDay {
    pub id: Id,
    pub split_id: Id,
    pub day_of_week: DayOfWeek,
    pub name: String,
    pub created_at: String,
}

/// An exercise entry within a split day, as returned by the nested split
/// fetch. `id` is the join-row id, which is what the update/delete
/// day-exercise operations take.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayExercise {
    pub id: Id,
    pub name: String,
    pub order_index: i64,
}

/// A split day with its ordered exercises.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayWithExercises {
    pub id: Id,
    pub day_of_week: DayOfWeek,
    pub name: String,
    pub exercises: Vec<DayExercise>,
}

/// A split with its days (ordered by weekday) and their exercises
/// (ordered by order_index).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitWithDays {
    pub id: Id,
    pub name: String,
    pub order_index: i64,
    pub is_favorite: bool,
    pub is_default: bool,
    pub created_at: String,
    pub days: Vec<DayWithExercises>,
}

/// A named movement, optionally linked to a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: Id,
    pub name: String,
    pub collection_id: Option<Id>,
    pub created_at: String,
}

/// A user-defined grouping of exercises. Deleting a collection unlinks
/// its exercises, it never deletes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub id: Id,
    pub name: String,
    pub created_at: String,
}

/// A user-defined grouping of splits. Independent lifecycle from
/// [`Collection`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitCollection {
    pub id: Id,
    pub name: String,
    pub created_at: String,
}

/// One performed set inside a logged workout. Weight and reps are kept as
/// the strings the user entered; the record-level unit flag says how the
/// weights should be read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggedSet {
    pub weight: String,
    pub reps: String,
}

/// One exercise inside a logged workout, with the sets actually performed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggedExercise {
    pub name: String,
    pub sets: Vec<LoggedSet>,
}

/// A completed-workout snapshot for one calendar day.
///
/// The exercise list is stored as a self-contained JSON document rather
/// than rows referencing the split template, so history stays stable when
/// templates are later edited or deleted. `use_metric` records the unit
/// the weights were entered in; conversion happens at read time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutHistory {
    pub id: Id,
    pub date: String,
    pub split_id: Id,
    pub day_of_week: DayOfWeek,
    pub exercises: Vec<LoggedExercise>,
    pub use_metric: bool,
    pub created_at: String,
}
