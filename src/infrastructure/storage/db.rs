use crate::domain::error::SignAidError;
use crate::domain::records::Record;
use crate::domain::traits::{RecordFilter, Repository};
use async_trait::async_trait;
use std::path::Path;
use tokio_rusqlite::{params, Connection};

pub async fn init_database(db_path: &Path) -> Result<Connection, SignAidError> {
    let db = Connection::open(db_path.to_path_buf()).await?;
    create_schema(&db).await?;
    Ok(db)
}

async fn create_schema(db: &Connection) -> Result<(), SignAidError> {
    db.call(|conn| {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS records (
                collection TEXT NOT NULL,
                id TEXT NOT NULL,
                data TEXT NOT NULL,
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL,
                PRIMARY KEY (collection, id)
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_records_updated ON records(updated_at)",
            [],
        )?;

        Ok::<_, rusqlite::Error>(())
    })
    .await?;

    Ok(())
}

/// SQLite-backed record store
///
/// Every record type shares one table keyed by `(collection, id)`; the record
/// itself is stored as JSON.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub async fn open(db_path: &Path) -> Result<Self, SignAidError> {
        Ok(Self::new(init_database(db_path).await?))
    }

    pub async fn open_in_memory() -> Result<Self, SignAidError> {
        let conn = Connection::open_in_memory().await?;
        create_schema(&conn).await?;
        Ok(Self::new(conn))
    }

    /// Number of stored records in a collection
    pub async fn count(&self, collection: &'static str) -> Result<usize, SignAidError> {
        let count: i64 = self
            .conn
            .call(move |conn| {
                conn.query_row(
                    "SELECT COUNT(*) FROM records WHERE collection = ?",
                    params![collection],
                    |row| row.get(0),
                )
            })
            .await?;

        Ok(count as usize)
    }
}

#[async_trait]
impl<T: Record> Repository<T> for SqliteStore {
    async fn get(&self, id: &str) -> Result<Option<T>, SignAidError> {
        use rusqlite::OptionalExtension;

        let collection = T::COLLECTION;
        let id = id.to_string();
        let data: Option<String> = self
            .conn
            .call(move |conn| {
                conn.query_row(
                    "SELECT data FROM records WHERE collection = ? AND id = ?",
                    params![collection, id],
                    |row| row.get(0),
                )
                .optional()
            })
            .await?;

        match data {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn put(&self, record: &T) -> Result<(), SignAidError> {
        let collection = T::COLLECTION;
        let id = record.id().to_string();
        let data = serde_json::to_string(record)?;
        let now = chrono::Utc::now().timestamp();

        self.conn
            .call(move |conn| {
                conn.execute(
                    "INSERT INTO records (collection, id, data, created_at, updated_at)
                     VALUES (?, ?, ?, ?, ?)
                     ON CONFLICT(collection, id) DO UPDATE SET
                        data = excluded.data,
                        updated_at = excluded.updated_at",
                    params![collection, id, data, now, now],
                )
            })
            .await?;

        Ok(())
    }

    async fn find(&self, filter: RecordFilter<'_, T>) -> Result<Vec<T>, SignAidError> {
        let collection = T::COLLECTION;
        let rows: Vec<String> = self
            .conn
            .call(move |conn| {
                let mut stmt =
                    conn.prepare("SELECT data FROM records WHERE collection = ? ORDER BY rowid")?;
                let rows = stmt
                    .query_map(params![collection], |row| row.get::<_, String>(0))?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok::<_, rusqlite::Error>(rows)
            })
            .await?;

        let mut matches = Vec::new();
        for json in rows {
            let record: T = serde_json::from_str(&json)?;
            if filter(&record) {
                matches.push(record);
            }
        }

        Ok(matches)
    }
}
