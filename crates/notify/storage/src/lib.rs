//! Notify Storage Layer
//!
//! Key-value persistence and the notification history built on top of it.

mod history;
mod memory;
mod models;
mod schema;
mod sqlite;
mod traits;

pub use history::*;
pub use memory::MemoryStorage;
pub use models::*;
pub use sqlite::SqliteStorage;
pub use traits::*;

use diesel_migrations::{EmbeddedMigrations, embed_migrations};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");
