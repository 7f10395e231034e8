//! Diesel schema for task persistence.

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Internal task identifier.
        id -> Uuid,
        /// Task title.
        title -> Text,
        /// Optional free-text description.
        description -> Nullable<Text>,
        /// Task status in canonical string form.
        #[max_length = 20]
        status -> Varchar,
        /// Task priority in canonical string form.
        #[max_length = 20]
        priority -> Varchar,
        /// Optional advisory owner reference.
        user_id -> Nullable<Text>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
