//! Repository traits for data access abstraction.
//!
//! These traits define the contract for data access, allowing different
//! storage backends to be swapped without changing business logic.

use crate::db::{
    DbResult,
    models::{
        Collection, DayOfWeek, Exercise, Id, LoggedExercise, Split, SplitCollection,
        SplitWithDays, WorkoutHistory,
    },
};

/// Repository for splits, their days and day exercises.
pub trait SplitRepository {
    /// Create a new split at the end of the display order. Returns its id.
    /// Name uniqueness is the caller's concern.
    async fn add(&self, name: &str) -> DbResult<Id>;

    /// Rename a split and set its favorite flag. Does not touch the
    /// default flag. Returns false when the id does not exist.
    async fn update(&self, id: Id, name: &str, is_favorite: bool) -> DbResult<bool>;

    /// Set or clear the default flag, preserving the single-default
    /// invariant. Clearing the only default promotes another split first;
    /// with no other split the call fails with a constraint error.
    async fn set_default(&self, id: Id, is_default: bool) -> DbResult<bool>;

    /// Flip the favorite flag. Favoriting clears every other favorite;
    /// unfavoriting the current favorite leaves zero favorites.
    async fn toggle_favorite(&self, id: Id) -> DbResult<bool>;

    /// Delete a split and, via cascade, its days and day exercises.
    /// Performs the delete unconditionally; blocking deletion of the
    /// default split is caller policy. Logged history is retained.
    async fn delete(&self, id: Id) -> DbResult<bool>;

    /// Set a split's order_index directly. Callers renumber the full
    /// sequence to avoid duplicate ranks.
    async fn update_order(&self, id: Id, order: i64) -> DbResult<bool>;

    /// All splits, ordered by order_index ascending then creation time
    /// descending.
    async fn list(&self) -> DbResult<Vec<Split>>;

    /// The current favorite split, if any.
    async fn get_favorite(&self) -> DbResult<Option<Split>>;

    /// The current default split, if any.
    async fn get_default(&self) -> DbResult<Option<Split>>;

    /// A split with its days and their exercises. Fails with NotFound when
    /// the split does not exist; a split without days yields an empty vec.
    async fn get_with_days(&self, id: Id) -> DbResult<SplitWithDays>;

    /// Add a day to a split. At most one day per (split, weekday) is the
    /// intended shape; callers check before inserting.
    async fn add_day(&self, split_id: Id, day_of_week: DayOfWeek, name: &str) -> DbResult<Id>;

    /// Reassign a day's weekday and name.
    async fn update_day(&self, id: Id, day_of_week: DayOfWeek, name: &str) -> DbResult<bool>;

    /// Delete a day and, via cascade, its day exercises.
    async fn delete_day(&self, id: Id) -> DbResult<bool>;

    /// Add an exercise entry to a day at the given order. Always creates a
    /// brand-new exercise row, never reuses one by name; each entry stays
    /// independently editable. Returns the join-row id.
    async fn add_day_exercise(&self, split_day_id: Id, name: &str, order: i64) -> DbResult<Id>;

    /// Rename the linked exercise row and reposition the entry. Takes the
    /// join-row id; returns false when it does not exist.
    async fn update_day_exercise(&self, id: Id, name: &str, order: i64) -> DbResult<bool>;

    /// Remove an exercise entry from its day. Only the join row is
    /// deleted; the underlying exercise row is left behind.
    async fn delete_day_exercise(&self, id: Id) -> DbResult<bool>;
}

/// Repository for exercise collections.
pub trait CollectionRepository {
    /// Create a new collection. Returns its id.
    async fn add(&self, name: &str) -> DbResult<Id>;

    /// All collections.
    async fn list(&self) -> DbResult<Vec<Collection>>;

    /// Rename a collection.
    async fn update(&self, id: Id, name: &str) -> DbResult<bool>;

    /// Delete a collection. Linked exercises are unlinked, not deleted.
    async fn delete(&self, id: Id) -> DbResult<bool>;
}

/// Repository for split collections.
pub trait SplitCollectionRepository {
    /// Create a new split collection. Returns its id.
    async fn add(&self, name: &str) -> DbResult<Id>;

    /// All split collections.
    async fn list(&self) -> DbResult<Vec<SplitCollection>>;

    /// Rename a split collection.
    async fn update(&self, id: Id, name: &str) -> DbResult<bool>;

    /// Delete a split collection.
    async fn delete(&self, id: Id) -> DbResult<bool>;
}

/// Repository for standalone exercises.
pub trait ExerciseRepository {
    /// Create a new exercise. Returns its id.
    async fn add(&self, name: &str) -> DbResult<Id>;

    /// All exercises.
    async fn list(&self) -> DbResult<Vec<Exercise>>;

    /// Rename an exercise.
    async fn update(&self, id: Id, name: &str) -> DbResult<bool>;

    /// Delete an exercise. Day entries referencing it are cascade-removed.
    async fn delete(&self, id: Id) -> DbResult<bool>;
}

/// Repository for completed-workout snapshots.
pub trait HistoryRepository {
    /// Record a completed workout for a calendar date. The weekday is
    /// derived from the date (Monday = 0). Re-logging the same
    /// (date, split, weekday) replaces the earlier snapshot.
    async fn save(
        &self,
        split_id: Id,
        date: &str,
        exercises: &[LoggedExercise],
        use_metric: bool,
    ) -> DbResult<()>;

    /// Look up the snapshot for (date, split, weekday). None means no
    /// workout was logged that day, which is a normal outcome.
    async fn get(
        &self,
        date: &str,
        split_id: Id,
        day_of_week: DayOfWeek,
    ) -> DbResult<Option<WorkoutHistory>>;

    /// Delete all logged history.
    async fn clear(&self) -> DbResult<()>;
}

/// Combined database interface.
pub trait Database {
    type Splits<'a>: SplitRepository
    where
        Self: 'a;
    type Collections<'a>: CollectionRepository
    where
        Self: 'a;
    type SplitCollections<'a>: SplitCollectionRepository
    where
        Self: 'a;
    type Exercises<'a>: ExerciseRepository
    where
        Self: 'a;
    type History<'a>: HistoryRepository
    where
        Self: 'a;

    /// Create missing tables and apply pending additive migrations.
    async fn migrate(&self) -> DbResult<()>;

    /// Drop all managed tables and re-create the empty schema.
    async fn reset(&self) -> DbResult<()>;

    /// Get the split repository.
    fn splits(&self) -> Self::Splits<'_>;

    /// Get the collection repository.
    fn collections(&self) -> Self::Collections<'_>;

    /// Get the split collection repository.
    fn split_collections(&self) -> Self::SplitCollections<'_>;

    /// Get the exercise repository.
    fn exercises(&self) -> Self::Exercises<'_>;

    /// Get the workout history repository.
    fn history(&self) -> Self::History<'_>;
}
