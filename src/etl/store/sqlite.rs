//! SQLite entity store
//!
//! One `entities(kind, id, body)` table holds every entity as a JSON document.
//! Derived collections are answered with `json_extract` over the foreign-key
//! field, so reverse lists are never stored.

use std::path::Path;
use std::sync::{Arc, Mutex};

use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;

use super::{EntityStore, WriteOp};
use crate::error::StoreError;
use crate::identity::EntityId;

/// Storage for projected entities
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Create or open the database
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let conn = Connection::open(db_path)?;

        // WAL keeps readers off the writer's lock; synchronous=NORMAL is safe with WAL
        conn.execute_batch(
            "PRAGMA journal_mode=WAL;
             PRAGMA synchronous=NORMAL;
             PRAGMA cache_size=-64000;
             PRAGMA temp_store=MEMORY;
             PRAGMA busy_timeout=5000;",
        )?;

        Self::init(conn)
    }

    /// Private in-memory database, mostly for tests
    pub fn in_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS entities (
                kind TEXT NOT NULL,
                id TEXT NOT NULL,
                body TEXT NOT NULL,
                PRIMARY KEY (kind, id)
            );",
        )?;

        tracing::info!(target: "bondline::etl::store::sqlite", "Entity store initialized");

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, StoreError> {
        self.conn
            .lock()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))
    }
}

fn parse_body(kind: &str, id: &str, body: &str) -> Result<Value, StoreError> {
    serde_json::from_str(body).map_err(|source| StoreError::Decode {
        kind: kind.to_string(),
        id: id.to_string(),
        source,
    })
}

impl EntityStore for SqliteStore {
    fn get(&self, kind: &str, id: &EntityId) -> Result<Option<Value>, StoreError> {
        let conn = self.lock()?;
        let body: Option<String> = conn
            .query_row(
                "SELECT body FROM entities WHERE kind = ?1 AND id = ?2",
                params![kind, id.as_str()],
                |row| row.get(0),
            )
            .optional()?;

        body.map(|body| parse_body(kind, id.as_str(), &body))
            .transpose()
    }

    fn find_by_field(
        &self,
        kind: &str,
        field: &str,
        value: &str,
    ) -> Result<Vec<Value>, StoreError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare_cached(
            "SELECT id, body FROM entities
             WHERE kind = ?1 AND json_extract(body, ?2) = ?3
             ORDER BY id",
        )?;
        let path = format!("$.{field}");
        let rows = stmt.query_map(params![kind, path, value], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut bodies = Vec::new();
        for row in rows {
            let (id, body) = row?;
            bodies.push(parse_body(kind, &id, &body)?);
        }
        Ok(bodies)
    }

    fn count(&self, kind: &str) -> Result<usize, StoreError> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM entities WHERE kind = ?1",
            params![kind],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    fn apply(&self, ops: &[WriteOp]) -> Result<(), StoreError> {
        if ops.is_empty() {
            return Ok(());
        }

        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        {
            let mut upsert = tx.prepare_cached(
                "INSERT INTO entities (kind, id, body) VALUES (?1, ?2, ?3)
                 ON CONFLICT(kind, id) DO UPDATE SET body = excluded.body",
            )?;
            let mut remove = tx.prepare_cached("DELETE FROM entities WHERE kind = ?1 AND id = ?2")?;

            for op in ops {
                match op {
                    WriteOp::Upsert { kind, id, body } => {
                        upsert.execute(params![kind, id.as_str(), body.to_string()])?;
                    }
                    WriteOp::Remove { kind, id } => {
                        remove.execute(params![kind, id.as_str()])?;
                    }
                }
            }
        }
        tx.commit()?;

        tracing::trace!(
            target: "bondline::etl::store::sqlite",
            ops = ops.len(),
            "Applied writes"
        );

        Ok(())
    }
}
