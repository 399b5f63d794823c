//! Database models.

use diesel::prelude::*;

use crate::schema::kv_items;

/// Stored key-value item.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = kv_items)]
#[diesel(primary_key(key))]
pub struct KvItemRow {
    pub key: String,
    pub value: String,
    pub updated_at: chrono::NaiveDateTime,
}

/// New key-value item for insertion.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = kv_items)]
pub struct NewKvItem<'a> {
    pub key: &'a str,
    pub value: &'a str,
    pub updated_at: chrono::NaiveDateTime,
}
