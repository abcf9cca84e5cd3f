//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. When a
//! migration changes the schema, regenerate them with `diesel print-schema`
//! or update them by hand.

diesel::table! {
    /// Registered accounts.
    ///
    /// `username` carries a unique constraint; blank usernames and digests
    /// are rejected by `CHECK` constraints.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique login name.
        username -> Text,
        /// Salted bcrypt digest. Never selected outside credential lookups.
        password_digest -> Text,
        /// Optional profile image URL.
        image_url -> Nullable<Text>,
        /// Optional biography.
        bio -> Nullable<Text>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Recipes owned by a single user.
    ///
    /// `owner_id` references `users.id` with `ON DELETE CASCADE`.
    recipes (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Owning user.
        owner_id -> Uuid,
        /// Non-blank title.
        title -> Text,
        /// Instructions of at least 50 characters once trimmed.
        instructions -> Text,
        /// Optional preparation time.
        minutes_to_complete -> Nullable<Int4>,
        /// Insertion timestamp; listing order.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(recipes -> users (owner_id));

diesel::allow_tables_to_appear_in_same_query!(recipes, users);
