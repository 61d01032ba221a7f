//! Diesel table definitions for the registry schema.
//!
//! Must match `migrations/` exactly.

diesel::table! {
    /// Registered bots, one row per `bot_id`.
    bots (id) {
        /// Surrogate key; breaks `created_at` ties in listings.
        id -> Int8,
        bot_id -> Text,
        owner_id -> Text,
        store_name -> Text,
        owner_username -> Text,
        is_blacklisted -> Bool,
        created_at -> Timestamptz,
    }
}
