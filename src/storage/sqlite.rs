//! SQLite item repository.
//!
//! Name uniqueness is a `UNIQUE` column constraint; violations are reported
//! as `InventoryError::DuplicateItem`. rusqlite is blocking, so every call
//! runs on tokio's blocking pool against a single shared connection.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::{ffi, params, Connection, ErrorCode, OptionalExtension};
use tracing::debug;

use crate::error::{InventoryError, Result};
use crate::models::{InventoryItem, ItemChanges, NewItem};
use crate::storage::ItemRepository;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS inventory_items (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL UNIQUE,
    description TEXT
);
"#;

#[derive(Debug, Clone)]
pub struct SqliteRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteRepository {
    /// Opens (or creates) the database file and runs migrations.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|e| {
            InventoryError::Storage(format!(
                "Failed to open database at {}: {}",
                path.display(),
                e
            ))
        })?;
        debug!("Opened item database at {}", path.display());
        Self::with_connection(conn)
    }

    /// Private database that disappears with the repository.
    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)
            .map_err(|e| InventoryError::Storage(format!("Failed to run migrations: {}", e)))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    async fn run<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut conn = conn
                .lock()
                .map_err(|_| InventoryError::Internal("database lock poisoned".to_string()))?;
            f(&mut conn)
        })
        .await
        .map_err(|e| InventoryError::Internal(format!("database task failed: {}", e)))?
    }
}

fn read_item(conn: &Connection, id: i64) -> rusqlite::Result<Option<InventoryItem>> {
    conn.query_row(
        "SELECT id, name, description FROM inventory_items WHERE id = ?1",
        params![id],
        |row| {
            Ok(InventoryItem {
                id: row.get(0)?,
                name: row.get(1)?,
                description: row.get(2)?,
            })
        },
    )
    .optional()
}

/// Maps unique-constraint failures to `DuplicateItem`. Other constraint
/// failures stay storage errors.
fn translate(err: rusqlite::Error) -> InventoryError {
    match &err {
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.code == ErrorCode::ConstraintViolation
                && failure.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            InventoryError::DuplicateItem
        }
        _ => InventoryError::from(err),
    }
}

#[async_trait]
impl ItemRepository for SqliteRepository {
    async fn create(&self, item: NewItem) -> Result<InventoryItem> {
        self.run(move |conn| {
            conn.execute(
                "INSERT INTO inventory_items (name, description) VALUES (?1, ?2)",
                params![item.name, item.description],
            )
            .map_err(translate)?;

            Ok(InventoryItem {
                id: conn.last_insert_rowid(),
                name: item.name,
                description: item.description,
            })
        })
        .await
    }

    async fn get(&self, id: i64) -> Result<Option<InventoryItem>> {
        self.run(move |conn| Ok(read_item(conn, id)?)).await
    }

    async fn update(&self, id: i64, changes: ItemChanges) -> Result<Option<InventoryItem>> {
        self.run(move |conn| {
            let tx = conn.transaction()?;

            let Some(mut item) = read_item(&tx, id)? else {
                return Ok(None);
            };
            item.apply(changes);

            tx.execute(
                "UPDATE inventory_items SET name = ?1, description = ?2 WHERE id = ?3",
                params![item.name, item.description, item.id],
            )
            .map_err(translate)?;
            tx.commit()?;

            Ok(Some(item))
        })
        .await
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        self.run(move |conn| {
            let removed = conn.execute("DELETE FROM inventory_items WHERE id = ?1", params![id])?;
            Ok(removed > 0)
        })
        .await
    }
}
