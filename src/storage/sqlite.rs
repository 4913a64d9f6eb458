//! SQLite persona storage
//!
//! One `personas` table; ids come from `AUTOINCREMENT`. The `sqlite` calls
//! block, so each statement runs on tokio's blocking pool with the connection
//! mutex held for that statement only.

use async_trait::async_trait;
use log::{debug, error};
use ::sqlite::{Connection, State};
use std::sync::{Arc, Mutex};

use super::{NewPersona, PersonaRecord, PersonaStore, StoreError, StoreResult};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS personas (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL,
        persona_type TEXT NOT NULL,
        timestamp TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_personas_user_id ON personas(user_id);
";

#[derive(Clone)]
pub struct SqliteStore {
    connection: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open (or create) the database file and make sure the schema exists
    pub fn open(path: &str) -> StoreResult<Self> {
        let connection = ::sqlite::open(path)?;
        connection.execute(SCHEMA)?;
        debug!("SQLite schema ready at {path}");
        Ok(SqliteStore {
            connection: Arc::new(Mutex::new(connection)),
        })
    }

    /// Run `f` against the connection on the blocking pool
    async fn with_connection<T, F>(&self, f: F) -> StoreResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> StoreResult<T> + Send + 'static,
    {
        let connection = Arc::clone(&self.connection);
        tokio::task::spawn_blocking(move || {
            let connection = connection
                .lock()
                .map_err(|_| StoreError::Task("connection mutex poisoned".to_string()))?;
            f(&connection)
        })
        .await
        .map_err(|e| StoreError::Task(e.to_string()))?
    }

    fn insert(connection: &Connection, persona: &NewPersona) -> StoreResult<i64> {
        let mut statement = connection.prepare(
            "INSERT INTO personas (user_id, persona_type, timestamp) VALUES (?, ?, ?)",
        )?;
        statement.bind((1, persona.user_id))?;
        statement.bind((2, persona.persona_type.as_str()))?;
        statement.bind((3, persona.timestamp.as_str()))?;
        while statement.next()? != State::Done {}

        let mut statement = connection.prepare("SELECT last_insert_rowid() AS id")?;
        match statement.next()? {
            State::Row => Ok(statement.read::<i64, _>("id")?),
            State::Done => Err(StoreError::CorruptRow("no row id after insert".to_string())),
        }
    }

    fn select_by_user(connection: &Connection, user_id: i64) -> StoreResult<Vec<PersonaRecord>> {
        let mut statement = connection.prepare(
            "SELECT id, user_id, persona_type, timestamp FROM personas \
             WHERE user_id = ? ORDER BY id",
        )?;
        statement.bind((1, user_id))?;

        let mut records = Vec::new();
        while let State::Row = statement.next()? {
            records.push(PersonaRecord {
                id: statement.read::<i64, _>("id")?,
                user_id: statement.read::<i64, _>("user_id")?,
                persona_type: statement.read::<String, _>("persona_type")?,
                timestamp: statement.read::<String, _>("timestamp")?,
            });
        }
        Ok(records)
    }
}

#[async_trait]
impl PersonaStore for SqliteStore {
    async fn save_persona(&self, persona: NewPersona) -> StoreResult<PersonaRecord> {
        self.with_connection(move |connection| {
            let id = Self::insert(connection, &persona)?;
            Ok(persona.into_record(id))
        })
        .await
    }

    async fn personas_by_user(&self, user_id: i64) -> StoreResult<Vec<PersonaRecord>> {
        let listed = self
            .with_connection(move |connection| Self::select_by_user(connection, user_id))
            .await;
        match listed {
            Ok(records) => Ok(records),
            Err(e) => {
                error!("Failed to list personas for user {user_id}: {e}");
                Ok(Vec::new())
            }
        }
    }

    fn backend_name(&self) -> &'static str {
        "sqlite"
    }
}
