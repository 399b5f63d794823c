//! Diesel schema definitions.

diesel::table! {
    kv_items (key) {
        key -> Text,
        value -> Text,
        updated_at -> Timestamp,
    }
}
