use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, params};
use twenty48_utils::store::KeyValueStore;

/// Key-value store in a single SQLite file.
///
/// Schema:
/// - kv(namespace TEXT, meta_key TEXT, meta_value TEXT, PRIMARY KEY(namespace, meta_key))
pub struct SqliteStore {
    path: PathBuf,
    namespace: String,
    conn: Connection,
}

impl SqliteStore {
    /// Create or open the database at `path`, ensure schema exists.
    pub fn open<P: AsRef<Path>>(path: P, namespace: impl Into<String>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let conn = Connection::open(&path)
            .with_context(|| format!("failed to open {}", path.display()))?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS kv (
                namespace TEXT NOT NULL,
                meta_key TEXT NOT NULL,
                meta_value TEXT NOT NULL,
                PRIMARY KEY (namespace, meta_key)
            );
            "#,
        )?;
        Ok(Self {
            path,
            namespace: namespace.into(),
            conn,
        })
    }

    fn read(&self, key: &str) -> Result<Option<String>, rusqlite::Error> {
        self.conn
            .query_row(
                "SELECT meta_value FROM kv WHERE namespace = ?1 AND meta_key = ?2",
                params![self.namespace, key],
                |row| row.get::<_, String>(0),
            )
            .optional()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Option<String> {
        match self.read(key) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("failed to read {key} from {}: {err}", self.path.display());
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO kv (namespace, meta_key, meta_value) VALUES (?1, ?2, ?3)
                 ON CONFLICT(namespace, meta_key) DO UPDATE SET meta_value=excluded.meta_value",
                params![self.namespace, key, value],
            )
            .with_context(|| format!("failed to write {key} to {}", self.path.display()))?;
        Ok(())
    }
}
