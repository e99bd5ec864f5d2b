//! Test doubles for the reminder store, notifier and clock

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use super::clock::Clock;
use super::model::{NewReminder, Reminder, ReminderId};
use super::notifier::{Acknowledgement, Notifier};
use super::scheduler::SchedulerContext;
use super::store::ReminderStore;
use crate::core::ReminderError;

/// Fixed wall-clock origin used by every test
pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

/// Clock whose wall time advances with tokio's clock
///
/// Under `#[tokio::test(start_paused = true)]` tokio's clock only moves when
/// the runtime is idle or `tokio::time::advance` is called, so timers and
/// `now()` stay in lockstep.
pub struct PausedClock {
    origin_wall: DateTime<Utc>,
    origin: tokio::time::Instant,
}

impl PausedClock {
    pub fn new(origin_wall: DateTime<Utc>) -> Self {
        Self {
            origin_wall,
            origin: tokio::time::Instant::now(),
        }
    }
}

impl Clock for PausedClock {
    fn now(&self) -> DateTime<Utc> {
        let elapsed = tokio::time::Instant::now() - self.origin;
        self.origin_wall + chrono::Duration::from_std(elapsed).unwrap()
    }
}

#[derive(Default)]
pub struct MemoryStore {
    next_id: AtomicI64,
    rows: Mutex<BTreeMap<ReminderId, Reminder>>,
    fail_list: AtomicBool,
    fail_delete: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, reminder: NewReminder) -> ReminderId {
        let id = ReminderId(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        self.rows
            .lock()
            .unwrap()
            .insert(id, reminder.with_id(id));
        id
    }

    pub fn contains(&self, id: ReminderId) -> bool {
        self.rows.lock().unwrap().contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn fail_list(&self) {
        self.fail_list.store(true, Ordering::SeqCst);
    }

    pub fn fail_delete(&self) {
        self.fail_delete.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl ReminderStore for MemoryStore {
    async fn create(&self, reminder: NewReminder) -> Result<ReminderId, ReminderError> {
        Ok(self.insert(reminder))
    }

    async fn get(&self, id: ReminderId) -> Result<Option<Reminder>, ReminderError> {
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Reminder>, ReminderError> {
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(ReminderError::Storage(anyhow::anyhow!("database is locked")));
        }
        Ok(self.rows.lock().unwrap().values().cloned().collect())
    }

    async fn delete(&self, id: ReminderId) -> Result<(), ReminderError> {
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(ReminderError::Storage(anyhow::anyhow!("database is locked")));
        }
        self.rows.lock().unwrap().remove(&id);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub chat_id: u64,
    pub reply_to: u64,
    pub text: String,
}

/// Notifier that records everything and can be told to fail deliveries
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<SentMessage>>,
    acks: Mutex<Vec<(u64, u64, Acknowledgement)>>,
    failing_chats: Mutex<Vec<u64>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn acks(&self) -> Vec<(u64, u64, Acknowledgement)> {
        self.acks.lock().unwrap().clone()
    }

    /// Make every delivery to `chat_id` fail
    pub fn fail_chat(&self, chat_id: u64) {
        self.failing_chats.lock().unwrap().push(chat_id);
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(
        &self,
        chat_id: u64,
        reply_to_message_id: u64,
        text: &str,
    ) -> Result<(), ReminderError> {
        if self.failing_chats.lock().unwrap().contains(&chat_id) {
            return Err(ReminderError::Delivery(anyhow::anyhow!(
                "Missing Permissions"
            )));
        }
        self.sent.lock().unwrap().push(SentMessage {
            chat_id,
            reply_to: reply_to_message_id,
            text: text.to_string(),
        });
        Ok(())
    }

    async fn acknowledge(
        &self,
        chat_id: u64,
        message_id: u64,
        ack: Acknowledgement,
    ) -> Result<(), ReminderError> {
        self.acks.lock().unwrap().push((chat_id, message_id, ack));
        Ok(())
    }
}

/// Store, notifier and paused clock wired into a scheduler context
pub struct Harness {
    pub store: Arc<MemoryStore>,
    pub notifier: Arc<RecordingNotifier>,
    pub clock: Arc<PausedClock>,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            store: Arc::new(MemoryStore::new()),
            notifier: Arc::new(RecordingNotifier::new()),
            clock: Arc::new(PausedClock::new(epoch())),
        }
    }

    pub fn context(&self) -> SchedulerContext {
        SchedulerContext {
            store: self.store.clone(),
            notifier: self.notifier.clone(),
            clock: self.clock.clone(),
        }
    }

    /// Insert a reminder created `created_ago` before now and due `due_in` from now
    pub fn seed(
        &self,
        created_ago: chrono::Duration,
        due_in: chrono::Duration,
        chat_id: u64,
        message_id: u64,
    ) -> ReminderId {
        let now = self.clock.now();
        self.store.insert(NewReminder {
            due_at: now + due_in,
            created_at: now - created_ago,
            target_message_id: message_id,
            target_chat_id: chat_id,
        })
    }
}
