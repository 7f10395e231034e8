//! Diesel schema for user persistence.

diesel::table! {
    /// User records.
    users (id) {
        /// Internal user identifier.
        id -> Uuid,
        /// Display name.
        name -> Text,
        /// Unique email address.
        #[max_length = 320]
        email -> Varchar,
        /// Optional avatar URL.
        avatar -> Nullable<Text>,
        /// Account status in canonical string form.
        #[max_length = 20]
        status -> Varchar,
        /// Free-text role.
        role -> Text,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
