//! # Feature: Reminder Scheduler
//!
//! Turns persisted due times into exactly one delivered notification per reminder.
//! A single timer loop drains a min-heap of `(due_at, id)` entries; handles arm new
//! reminders by pushing onto it. At startup, `reconcile` fires everything that came
//! due while the bot was offline and arms the rest.
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 2.0.0: Heap-driven timer loop, startup reconciliation, injected store/notifier/clock
//! - 1.0.0: Initial polling scheduler

use dashmap::DashSet;
use log::{debug, error, info, warn};
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinSet;

use super::clock::Clock;
use super::duration::notification_text;
use super::model::{Reminder, ReminderId};
use super::notifier::Notifier;
use super::store::ReminderStore;
use crate::core::ReminderError;
use chrono::{DateTime, Utc};

/// Collaborators the scheduler depends on
#[derive(Clone)]
pub struct SchedulerContext {
    pub store: Arc<dyn ReminderStore>,
    pub notifier: Arc<dyn Notifier>,
    pub clock: Arc<dyn Clock>,
}

/// Outcome of a startup reconciliation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Reminders already due, fired as catch-up
    pub overdue: usize,
    /// Reminders still in the future, armed
    pub future: usize,
    /// Catch-up fires that delivered and deleted successfully
    pub delivered: usize,
    /// Catch-up fires that failed; these stay stored for the next start
    pub failed: Vec<ReminderId>,
    /// Future reminders that could not be armed
    pub arm_failures: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct ArmedReminder {
    due_at: DateTime<Utc>,
    id: ReminderId,
}

struct Shared {
    ctx: SchedulerContext,
    /// Ids with a pending or running fire
    armed: DashSet<ReminderId>,
}

impl Shared {
    async fn fire(&self, id: ReminderId, is_catch_up: bool) -> Result<(), ReminderError> {
        let reminder = self
            .ctx
            .store
            .get(id)
            .await?
            .ok_or(ReminderError::NotFound(id))?;

        // Counted from creation, not from the due time
        let elapsed = self.ctx.clock.now() - reminder.created_at;
        let text = notification_text(elapsed, is_catch_up);

        self.ctx
            .notifier
            .send(reminder.target_chat_id, reminder.target_message_id, &text)
            .await?;
        self.ctx.store.delete(id).await?;

        info!(
            "⏰ Delivered reminder {} to chat {}{}",
            id,
            reminder.target_chat_id,
            if is_catch_up { " (catch-up)" } else { "" }
        );
        Ok(())
    }

    /// Fire a claimed reminder, release the claim, and log the outcome
    async fn fire_claimed(&self, id: ReminderId, is_catch_up: bool) -> Result<(), ReminderError> {
        let result = self.fire(id, is_catch_up).await;
        self.armed.remove(&id);
        if let Err(e) = &result {
            error!("Failed to fire reminder {id}: {e}");
        }
        result
    }
}

/// Cheap, clone-able handle to the scheduler
#[derive(Clone)]
pub struct ReminderScheduler {
    shared: Arc<Shared>,
    queue: mpsc::UnboundedSender<ArmedReminder>,
}

/// The timer loop; spawn [`SchedulerLoop::run`] once per process
pub struct SchedulerLoop {
    shared: Arc<Shared>,
    queue: mpsc::UnboundedReceiver<ArmedReminder>,
    pending: BinaryHeap<Reverse<ArmedReminder>>,
}

impl ReminderScheduler {
    pub fn new(ctx: SchedulerContext) -> (Self, SchedulerLoop) {
        let shared = Arc::new(Shared {
            ctx,
            armed: DashSet::new(),
        });
        let (tx, rx) = mpsc::unbounded_channel();

        let handle = Self {
            shared: Arc::clone(&shared),
            queue: tx,
        };
        let timer_loop = SchedulerLoop {
            shared,
            queue: rx,
            pending: BinaryHeap::new(),
        };
        (handle, timer_loop)
    }

    /// Schedule a stored reminder to fire at its due time
    ///
    /// Returns once the reminder is queued. A due time that has already passed
    /// fires on the loop's next turn.
    pub async fn arm(&self, id: ReminderId) -> Result<(), ReminderError> {
        let reminder = self
            .shared
            .ctx
            .store
            .get(id)
            .await?
            .ok_or(ReminderError::NotFound(id))?;
        self.arm_reminder(&reminder)
    }

    fn arm_reminder(&self, reminder: &Reminder) -> Result<(), ReminderError> {
        let id = reminder.id;
        if !self.shared.armed.insert(id) {
            return Err(ReminderError::AlreadyArmed(id));
        }

        let entry = ArmedReminder {
            due_at: reminder.due_at,
            id,
        };
        if self.queue.send(entry).is_err() {
            self.shared.armed.remove(&id);
            return Err(ReminderError::SchedulerStopped);
        }

        debug!("Armed reminder {} for {}", id, reminder.due_at);
        Ok(())
    }

    /// Deliver a reminder now and delete it
    ///
    /// Fails with `NotFound` if the reminder is gone, including when it has
    /// already been fired. Delivery and storage errors propagate unchanged and
    /// leave the record in place.
    pub async fn fire(&self, id: ReminderId, is_catch_up: bool) -> Result<(), ReminderError> {
        self.shared.fire(id, is_catch_up).await
    }

    /// Startup pass: catch up on overdue reminders and arm the rest
    ///
    /// Completes once every catch-up fire has settled. Only a failure to list
    /// the stored reminders is returned as an error; individual fire and arm
    /// failures are logged and reported.
    pub async fn reconcile(&self) -> Result<ReconcileReport, ReminderError> {
        let now = self.shared.ctx.clock.now();
        let reminders = self.shared.ctx.store.list_all().await?;

        let (overdue, future): (Vec<Reminder>, Vec<Reminder>) =
            reminders.into_iter().partition(|r| r.is_overdue(now));

        info!(
            "🔁 Reconciling reminders: {} overdue, {} upcoming",
            overdue.len(),
            future.len()
        );

        let mut report = ReconcileReport {
            overdue: overdue.len(),
            future: future.len(),
            ..Default::default()
        };

        let mut catch_up = JoinSet::new();
        for reminder in &overdue {
            let id = reminder.id;
            if !self.shared.armed.insert(id) {
                warn!("Reminder {id} already has a pending fire, skipping catch-up");
                report.failed.push(id);
                continue;
            }
            let shared = Arc::clone(&self.shared);
            catch_up.spawn(async move { (id, shared.fire_claimed(id, true).await) });
        }

        for reminder in &future {
            if let Err(e) = self.arm_reminder(reminder) {
                error!("Failed to arm reminder {}: {e}", reminder.id);
                report.arm_failures += 1;
            }
        }

        while let Some(joined) = catch_up.join_next().await {
            match joined {
                Ok((_, Ok(()))) => report.delivered += 1,
                Ok((id, Err(_))) => report.failed.push(id),
                Err(e) => error!("Catch-up task panicked: {e}"),
            }
        }

        report.failed.sort();
        info!(
            "✅ Reconciliation complete: {} caught up, {} failed, {} armed",
            report.delivered,
            report.failed.len(),
            report.future - report.arm_failures
        );
        Ok(report)
    }

    /// Number of reminders with a pending or in-flight fire
    pub fn armed_count(&self) -> usize {
        self.shared.armed.len()
    }
}

impl SchedulerLoop {
    /// Run until every [`ReminderScheduler`] handle is dropped and nothing is pending
    pub async fn run(mut self) {
        info!("Reminder scheduler started");
        let mut open = true;

        loop {
            let next_due = self.pending.peek().map(|Reverse(entry)| entry.due_at);

            match next_due {
                None if !open => break,
                None => match self.queue.recv().await {
                    Some(entry) => self.pending.push(Reverse(entry)),
                    None => open = false,
                },
                Some(due_at) => {
                    let delay = (due_at - self.shared.ctx.clock.now())
                        .to_std()
                        .unwrap_or(Duration::ZERO);

                    tokio::select! {
                        _ = tokio::time::sleep(delay) => self.dispatch_due(),
                        received = self.queue.recv(), if open => match received {
                            Some(entry) => self.pending.push(Reverse(entry)),
                            None => open = false,
                        },
                    }
                }
            }
        }

        info!("Reminder scheduler stopped");
    }

    /// Spawn a fire for every entry whose due time has been reached
    fn dispatch_due(&mut self) {
        let now = self.shared.ctx.clock.now();

        while let Some(Reverse(entry)) = self.pending.peek().copied() {
            if entry.due_at > now {
                break;
            }
            self.pending.pop();

            let shared = Arc::clone(&self.shared);
            tokio::spawn(async move {
                let _ = shared.fire_claimed(entry.id, false).await;
            });
        }
    }
}
