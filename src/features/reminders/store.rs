//! Reminder store trait
//!
//! Durable CRUD over reminder records. The SQLite implementation lives in
//! `crate::database`.

use async_trait::async_trait;

use super::model::{NewReminder, Reminder, ReminderId};
use crate::core::ReminderError;

#[async_trait]
pub trait ReminderStore: Send + Sync {
    /// Persist a new reminder and return its assigned id
    async fn create(&self, reminder: NewReminder) -> Result<ReminderId, ReminderError>;

    /// Fetch a reminder, `None` if it no longer exists
    async fn get(&self, id: ReminderId) -> Result<Option<Reminder>, ReminderError>;

    /// Every stored reminder
    async fn list_all(&self) -> Result<Vec<Reminder>, ReminderError>;

    async fn delete(&self, id: ReminderId) -> Result<(), ReminderError>;
}
