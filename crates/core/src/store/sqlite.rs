//! SQLite-backed lottery store implementation.

use std::path::Path;
use std::sync::Mutex;

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use super::{LotteryStore, StoreError};
use crate::ticket::{RecurrenceLimit, Ticket};

const RECURRENCE_LIMIT_KEY: &str = "recurrence_limit";
const POOL_SAVED_AT_KEY: &str = "pool_saved_at";

const KIND_WINNING: &str = "winning";
const KIND_POOL: &str = "pool";

/// SQLite-backed lottery store.
pub struct SqliteLotteryStore {
    conn: Mutex<Connection>,
}

impl SqliteLotteryStore {
    /// Create a new SQLite lottery store, creating the database file and tables if needed.
    pub fn new(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(|e| StoreError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory SQLite lottery store (useful for testing).
    pub fn in_memory() -> Result<Self, StoreError> {
        let conn =
            Connection::open_in_memory().map_err(|e| StoreError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn initialize_schema(conn: &Connection) -> Result<(), StoreError> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS settings (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS tickets (
                kind TEXT NOT NULL,
                position INTEGER NOT NULL,
                ticket TEXT NOT NULL,
                saved_at TEXT NOT NULL,
                PRIMARY KEY (kind, position)
            );
            "#,
        )
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>, StoreError> {
        conn.query_row(
            "SELECT value FROM settings WHERE key = ?",
            params![key],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| StoreError::Database(e.to_string()))
    }

    fn put_setting(conn: &Connection, key: &str, value: &str) -> Result<(), StoreError> {
        conn.execute(
            "INSERT INTO settings (key, value, updated_at) VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, Utc::now().to_rfc3339()],
        )
        .map_err(|e| StoreError::Database(e.to_string()))?;
        Ok(())
    }

    fn decode_ticket(json: &str) -> Result<Ticket, StoreError> {
        serde_json::from_str(json).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    fn encode_ticket(ticket: &Ticket) -> Result<String, StoreError> {
        serde_json::to_string(ticket).map_err(|e| StoreError::Serialization(e.to_string()))
    }
}

impl LotteryStore for SqliteLotteryStore {
    fn load_recurrence_limit(&self) -> Result<Option<u8>, StoreError> {
        let conn = self.conn.lock().unwrap();

        Self::get_setting(&conn, RECURRENCE_LIMIT_KEY)?
            .map(|value| {
                value.parse::<u8>().map_err(|e| {
                    StoreError::Serialization(format!("bad recurrence limit {:?}: {}", value, e))
                })
            })
            .transpose()
    }

    fn save_recurrence_limit(&self, limit: RecurrenceLimit) -> Result<(), StoreError> {
        let conn = self.conn.lock().unwrap();
        Self::put_setting(&conn, RECURRENCE_LIMIT_KEY, &limit.get().to_string())
    }

    fn load_winning_ticket(&self) -> Result<Option<Ticket>, StoreError> {
        let conn = self.conn.lock().unwrap();

        let json: Option<String> = conn
            .query_row(
                "SELECT ticket FROM tickets WHERE kind = ? AND position = 0",
                params![KIND_WINNING],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| StoreError::Database(e.to_string()))?;

        json.as_deref().map(Self::decode_ticket).transpose()
    }

    fn save_winning_ticket(&self, ticket: &Ticket) -> Result<(), StoreError> {
        let conn = self.conn.lock().unwrap();
        let json = Self::encode_ticket(ticket)?;

        conn.execute(
            "INSERT OR REPLACE INTO tickets (kind, position, ticket, saved_at) VALUES (?, 0, ?, ?)",
            params![KIND_WINNING, json, Utc::now().to_rfc3339()],
        )
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    fn load_pool(&self) -> Result<Option<Vec<Ticket>>, StoreError> {
        let conn = self.conn.lock().unwrap();

        // A pool saved empty still leaves its timestamp behind
        if Self::get_setting(&conn, POOL_SAVED_AT_KEY)?.is_none() {
            return Ok(None);
        }

        let mut stmt = conn
            .prepare("SELECT ticket FROM tickets WHERE kind = ? ORDER BY position ASC")
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let rows = stmt
            .query_map(params![KIND_POOL], |row| row.get::<_, String>(0))
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let mut tickets = Vec::new();
        for row_result in rows {
            let json = row_result.map_err(|e| StoreError::Database(e.to_string()))?;
            tickets.push(Self::decode_ticket(&json)?);
        }

        Ok(Some(tickets))
    }

    fn save_pool(&self, tickets: &[Ticket]) -> Result<(), StoreError> {
        let mut conn = self.conn.lock().unwrap();
        let now = Utc::now().to_rfc3339();

        let tx = conn
            .transaction()
            .map_err(|e| StoreError::Database(e.to_string()))?;

        tx.execute("DELETE FROM tickets WHERE kind = ?", params![KIND_POOL])
            .map_err(|e| StoreError::Database(e.to_string()))?;

        {
            let mut stmt = tx
                .prepare(
                    "INSERT INTO tickets (kind, position, ticket, saved_at) VALUES (?, ?, ?, ?)",
                )
                .map_err(|e| StoreError::Database(e.to_string()))?;

            for (position, ticket) in tickets.iter().enumerate() {
                let json = Self::encode_ticket(ticket)?;
                stmt.execute(params![KIND_POOL, position as i64, json, now])
                    .map_err(|e| StoreError::Database(e.to_string()))?;
            }
        }

        Self::put_setting(&tx, POOL_SAVED_AT_KEY, &now)?;

        tx.commit()
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }
}
