//! Diesel schema for task persistence.

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Storage-assigned task identifier.
        id -> Int8,
        /// Task title.
        #[max_length = 250]
        title -> Varchar,
        /// Task description.
        description -> Text,
        /// Task lifecycle status.
        #[max_length = 20]
        status -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Completion timestamp, set while the task is completed.
        completed_at -> Nullable<Timestamptz>,
    }
}
