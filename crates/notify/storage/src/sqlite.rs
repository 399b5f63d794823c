//! SQLite storage implementation.

use color_eyre::eyre::WrapErr as _;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;

use crate::models::*;
use crate::schema::*;
use crate::traits::*;

type SqlitePool = Pool<ConnectionManager<SqliteConnection>>;

/// SQLite-based storage.
#[derive(Clone)]
pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    /// Create a new SQLite storage from a database path.
    pub fn new(database_url: &str) -> color_eyre::eyre::Result<Self> {
        let manager = ConnectionManager::<SqliteConnection>::new(database_url);
        let pool = Pool::builder()
            .max_size(4)
            .build(manager)
            .wrap_err("failed to create connection pool")?;

        Ok(Self { pool })
    }

    /// Create a private in-memory database with migrations applied.
    ///
    /// Every pooled connection to `:memory:` is its own database, so the pool
    /// holds exactly one connection that never expires.
    pub fn in_memory() -> color_eyre::eyre::Result<Self> {
        let manager = ConnectionManager::<SqliteConnection>::new(":memory:");
        let pool = Pool::builder()
            .max_size(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .build(manager)
            .wrap_err("failed to create in-memory pool")?;

        let storage = Self { pool };
        storage.run_migrations()?;
        Ok(storage)
    }

    /// Run migrations.
    pub fn run_migrations(&self) -> color_eyre::eyre::Result<()> {
        use diesel_migrations::MigrationHarness as _;

        let mut conn = self
            .pool
            .get()
            .wrap_err("failed to get connection for migrations")?;

        conn.run_pending_migrations(crate::MIGRATIONS)
            .map_err(|e| color_eyre::eyre::eyre!("migration failed: {}", e))?;

        Ok(())
    }

    /// Run a query on a pooled connection off the async runtime.
    async fn with_conn<T, F>(&self, f: F) -> color_eyre::eyre::Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut SqliteConnection) -> color_eyre::eyre::Result<T> + Send + 'static,
    {
        let pool = self.pool.clone();

        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get().wrap_err("failed to get database connection")?;
            f(&mut conn)
        })
        .await
        .wrap_err("storage task failed")?
    }
}

impl KeyValueStore for SqliteStorage {
    async fn get_item(&self, key: &str) -> color_eyre::eyre::Result<Option<String>> {
        let key = key.to_owned();

        self.with_conn(move |conn| {
            let row: Option<KvItemRow> = kv_items::table
                .filter(kv_items::key.eq(&key))
                .select(KvItemRow::as_select())
                .first(conn)
                .optional()
                .wrap_err_with(|| format!("failed to read {key}"))?;

            Ok(row.map(|row| row.value))
        })
        .await
    }

    async fn set_item(&self, key: &str, value: &str) -> color_eyre::eyre::Result<()> {
        let key = key.to_owned();
        let value = value.to_owned();

        self.with_conn(move |conn| {
            let now = chrono::Utc::now().naive_utc();
            let item = NewKvItem {
                key: &key,
                value: &value,
                updated_at: now,
            };

            diesel::insert_into(kv_items::table)
                .values(&item)
                .on_conflict(kv_items::key)
                .do_update()
                .set((kv_items::value.eq(&value), kv_items::updated_at.eq(now)))
                .execute(conn)
                .wrap_err_with(|| format!("failed to write {key}"))?;

            tracing::debug!(key = %key, bytes = value.len(), "stored item");
            Ok(())
        })
        .await
    }

    async fn remove_item(&self, key: &str) -> color_eyre::eyre::Result<()> {
        let key = key.to_owned();

        self.with_conn(move |conn| {
            let removed = diesel::delete(kv_items::table.filter(kv_items::key.eq(&key)))
                .execute(conn)
                .wrap_err_with(|| format!("failed to remove {key}"))?;

            tracing::debug!(key = %key, removed, "removed item");
            Ok(())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_remove() {
        let storage = SqliteStorage::in_memory().unwrap();

        assert_eq!(storage.get_item("notifications").await.unwrap(), None);

        storage.set_item("notifications", "[]").await.unwrap();
        storage.set_item("notifications", "[1]").await.unwrap();
        assert_eq!(
            storage.get_item("notifications").await.unwrap().as_deref(),
            Some("[1]")
        );

        storage.remove_item("notifications").await.unwrap();
        assert_eq!(storage.get_item("notifications").await.unwrap(), None);

        // removing twice is fine
        storage.remove_item("notifications").await.unwrap();
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let storage = SqliteStorage::in_memory().unwrap();

        storage.set_item("a", "1").await.unwrap();
        storage.set_item("b", "2").await.unwrap();
        storage.remove_item("a").await.unwrap();

        assert_eq!(storage.get_item("a").await.unwrap(), None);
        assert_eq!(storage.get_item("b").await.unwrap().as_deref(), Some("2"));
    }
}
