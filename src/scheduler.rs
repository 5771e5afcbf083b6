//! # Delivery Scheduler Module
//!
//! Runs one delayed continuation per chat on the tokio timer. Waiting never
//! blocks the dispatcher, so other chats keep being served while an order
//! is being prepared.
//!
//! # Lifecycle
//!
//! - `schedule` spawns the task; a task already pending for the same chat is
//!   aborted and replaced
//! - when the delay elapses the task removes its own entry, then runs the
//!   continuation, so a late `cancel` cannot interrupt a delivery in flight
//! - `cancel` aborts a task that has not fired yet

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};
use teloxide::types::ChatId;
use tokio::task::JoinHandle;
use tracing::debug;

struct PendingDelivery {
    ticket: u64,
    ready_at: DateTime<Utc>,
    handle: JoinHandle<()>,
}

#[derive(Default)]
struct SchedulerInner {
    next_ticket: u64,
    pending: HashMap<ChatId, PendingDelivery>,
}

/// Cancellable delayed tasks keyed by chat
#[derive(Clone, Default)]
pub struct DeliveryScheduler {
    inner: Arc<Mutex<SchedulerInner>>,
}

impl DeliveryScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, SchedulerInner> {
        // The map stays consistent even if a holder panicked
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Run `task` for `chat_id` once `delay` has elapsed
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&self, chat_id: ChatId, delay: Duration, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut inner = self.lock();
        inner.next_ticket += 1;
        let ticket = inner.next_ticket;

        let ready_at = Utc::now()
            + chrono::Duration::from_std(delay).unwrap_or_else(|_| chrono::Duration::zero());

        // The entry is inserted before the lock is released, so the task
        // cannot try to remove itself before it is registered.
        let scheduler = self.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            scheduler.finish(chat_id, ticket);
            task.await;
        });

        if let Some(previous) = inner.pending.insert(
            chat_id,
            PendingDelivery {
                ticket,
                ready_at,
                handle,
            },
        ) {
            debug!(chat_id = %chat_id, "Replacing pending delivery");
            previous.handle.abort();
        }

        debug!(chat_id = %chat_id, ready_at = %ready_at, "Delivery scheduled");
    }

    fn finish(&self, chat_id: ChatId, ticket: u64) {
        let mut inner = self.lock();
        if inner
            .pending
            .get(&chat_id)
            .is_some_and(|pending| pending.ticket == ticket)
        {
            inner.pending.remove(&chat_id);
        }
    }

    /// Abort the pending delivery of `chat_id`
    ///
    /// Returns `true` if a delivery was pending.
    pub fn cancel(&self, chat_id: ChatId) -> bool {
        match self.lock().pending.remove(&chat_id) {
            Some(pending) => {
                pending.handle.abort();
                debug!(chat_id = %chat_id, "Pending delivery cancelled");
                true
            }
            None => false,
        }
    }

    pub fn is_pending(&self, chat_id: ChatId) -> bool {
        self.lock().pending.contains_key(&chat_id)
    }

    /// When the pending delivery of `chat_id` is due
    pub fn ready_at(&self, chat_id: ChatId) -> Option<DateTime<Utc>> {
        self.lock().pending.get(&chat_id).map(|pending| pending.ready_at)
    }

    pub fn pending_count(&self) -> usize {
        self.lock().pending.len()
    }
}
