pub mod bookings;
pub mod models;
pub mod queries;
pub mod schema;

use anyhow::{Context, Result, bail};
use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use std::sync::Mutex;
use tracing::info;

/// Document store for users, properties and bookings.
///
/// Each collection holds JSON bodies keyed by id, mirroring how records were
/// kept before the move to SQLite, so legacy field shapes survive until a
/// migration rewrites them.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open (creating if needed) the database at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::init(conn, true)?.opened(path)
    }

    /// Open a database that must already exist and carry our schema. Used by
    /// batch jobs, where a mistyped path should fail instead of migrating an
    /// empty or unrelated file.
    pub fn open_existing(path: &Path) -> Result<Self> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .with_context(|| format!("Cannot open database at {}", path.display()))?;
        if !schema::is_initialized(&conn)? {
            bail!("{} is not a RentNest database (no schema_version table)", path.display());
        }
        Self::init(conn, true)?.opened(path)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init(conn, false)
    }

    fn init(conn: Connection, wal: bool) -> Result<Self> {
        // WAL mode for concurrent reads
        if wal {
            conn.pragma_update(None, "journal_mode", "WAL")?;
        }
        conn.pragma_update(None, "foreign_keys", "ON")?;

        schema::run(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn opened(self, path: &Path) -> Result<Self> {
        info!("Database opened at {}", path.display());
        Ok(self)
    }

    pub fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|e| anyhow::anyhow!("DB lock poisoned: {}", e))?;
        f(&conn)
    }

    pub fn with_conn_mut<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T>,
    {
        let mut conn = self
            .conn
            .lock()
            .map_err(|e| anyhow::anyhow!("DB lock poisoned: {}", e))?;
        f(&mut conn)
    }
}
