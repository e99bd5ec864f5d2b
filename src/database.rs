//! # SQLite persistence
//!
//! Reminder storage backed by a single SQLite connection. Timestamps are stored as
//! unix milliseconds in UTC.
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 2.0.0: Reminders keyed to a target message and chat, `ReminderStore` implementation
//! - 1.0.0: Initial schema

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use log::info;
use sqlite::{Connection, State, Statement};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::core::ReminderError;
use crate::features::reminders::{NewReminder, Reminder, ReminderId, ReminderStore};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS reminders (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        due_at INTEGER NOT NULL,
        message_id INTEGER NOT NULL,
        chat_id INTEGER NOT NULL,
        created_at INTEGER NOT NULL,
        updated_at INTEGER NOT NULL
    );
    CREATE INDEX IF NOT EXISTS reminders_message_id ON reminders (message_id);
    CREATE INDEX IF NOT EXISTS reminders_chat_id ON reminders (chat_id);
";

const SELECT_COLUMNS: &str = "SELECT id, due_at, message_id, chat_id, created_at FROM reminders";

#[derive(Clone)]
pub struct Database {
    connection: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open (or create) the database at `path` and apply the schema
    ///
    /// `":memory:"` gives a private in-memory database.
    pub async fn new(path: &str) -> Result<Self, ReminderError> {
        let connection = Connection::open(path)?;
        connection.execute(SCHEMA)?;
        info!("Opened reminder database at {path}");

        Ok(Database {
            connection: Arc::new(Mutex::new(connection)),
        })
    }
}

fn to_millis(at: DateTime<Utc>) -> i64 {
    at.timestamp_millis()
}

fn from_millis(millis: i64) -> Result<DateTime<Utc>, ReminderError> {
    Utc.timestamp_millis_opt(millis).single().ok_or_else(|| {
        ReminderError::Storage(anyhow::anyhow!("Invalid timestamp in database: {millis}"))
    })
}

// Discord snowflakes fit in 64 bits; SQLite integers are signed, so the bits are
// stored as-is and reinterpreted on the way out.
fn id_to_column(id: u64) -> i64 {
    id as i64
}

fn id_from_column(value: i64) -> u64 {
    value as u64
}

fn read_reminder(statement: &Statement<'_>) -> Result<Reminder, ReminderError> {
    Ok(Reminder {
        id: ReminderId(statement.read::<i64, _>("id")?),
        due_at: from_millis(statement.read::<i64, _>("due_at")?)?,
        created_at: from_millis(statement.read::<i64, _>("created_at")?)?,
        target_message_id: id_from_column(statement.read::<i64, _>("message_id")?),
        target_chat_id: id_from_column(statement.read::<i64, _>("chat_id")?),
    })
}

#[async_trait]
impl ReminderStore for Database {
    async fn create(&self, reminder: NewReminder) -> Result<ReminderId, ReminderError> {
        let connection = self.connection.lock().await;
        let created_at = to_millis(reminder.created_at);

        let mut statement = connection.prepare(
            "INSERT INTO reminders (due_at, message_id, chat_id, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?)",
        )?;
        statement.bind((1, to_millis(reminder.due_at)))?;
        statement.bind((2, id_to_column(reminder.target_message_id)))?;
        statement.bind((3, id_to_column(reminder.target_chat_id)))?;
        statement.bind((4, created_at))?;
        statement.bind((5, created_at))?;
        statement.next()?;

        let mut last_id = connection.prepare("SELECT last_insert_rowid() AS id")?;
        if let State::Row = last_id.next()? {
            Ok(ReminderId(last_id.read::<i64, _>("id")?))
        } else {
            Err(ReminderError::Storage(anyhow::anyhow!(
                "Insert did not produce a row id"
            )))
        }
    }

    async fn get(&self, id: ReminderId) -> Result<Option<Reminder>, ReminderError> {
        let connection = self.connection.lock().await;
        let mut statement = connection.prepare(format!("{SELECT_COLUMNS} WHERE id = ?"))?;
        statement.bind((1, id.0))?;

        if let State::Row = statement.next()? {
            Ok(Some(read_reminder(&statement)?))
        } else {
            Ok(None)
        }
    }

    async fn list_all(&self) -> Result<Vec<Reminder>, ReminderError> {
        let connection = self.connection.lock().await;
        let mut statement = connection.prepare(format!("{SELECT_COLUMNS} ORDER BY due_at, id"))?;

        let mut reminders = Vec::new();
        while let State::Row = statement.next()? {
            reminders.push(read_reminder(&statement)?);
        }
        Ok(reminders)
    }

    async fn delete(&self, id: ReminderId) -> Result<(), ReminderError> {
        let connection = self.connection.lock().await;
        let mut statement = connection.prepare("DELETE FROM reminders WHERE id = ?")?;
        statement.bind((1, id.0))?;
        statement.next()?;
        Ok(())
    }
}
