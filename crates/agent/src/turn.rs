//! The turn controller — one visitor submission in, one reply out.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use chrono::Utc;
use folio_config::AppConfig;
use folio_core::agent::{AssistantState, SubmitPolicy};
use folio_core::catalog::ResponseCatalog;
use folio_core::classifier::TopicKey;
use folio_core::event::{DomainEvent, EventBus};
use folio_core::message::{Conversation, ConversationId, Message};
use folio_core::responder::{Reply, Responder};
use serde::Serialize;
use tokio::sync::{Mutex, RwLock, broadcast};
use tracing::{debug, info, warn};

use crate::responder::ScriptedResponder;

/// What a completed turn produced.
#[derive(Debug, Clone, Serialize)]
pub struct TurnOutcome {
    pub topic: TopicKey,
    pub user_message: Message,
    pub reply: Message,
}

/// Drives one conversation.
///
/// Each accepted submission appends the visitor's message right away, then
/// waits for its turn. Turns are served FIFO, so replies land in the order
/// the questions were asked. `composing` stays on while any turn is pending.
pub struct TurnController {
    conversation_id: ConversationId,
    conversation: RwLock<Conversation>,
    responder: Arc<dyn Responder>,
    catalog: Arc<ResponseCatalog>,
    event_bus: Arc<EventBus>,
    reply_delay: Duration,
    policy: SubmitPolicy,
    /// Held for the delay + reply part of a turn; tokio's mutex is fair.
    turn_lock: Mutex<()>,
    /// Composing events are published while holding this lock, so on/off
    /// events go out in the same order the flag changes.
    pending: StdMutex<Pending>,
    completed: AtomicU64,
}

impl TurnController {
    /// Open a new conversation seeded with the catalog's greeting.
    pub fn new(
        responder: Arc<dyn Responder>,
        catalog: Arc<ResponseCatalog>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        let conversation = Conversation::new(catalog.seed_greeting());
        event_bus.publish(DomainEvent::ConversationStarted {
            conversation_id: conversation.id.to_string(),
            timestamp: Utc::now(),
        });
        Self {
            conversation_id: conversation.id.clone(),
            conversation: RwLock::new(conversation),
            responder,
            catalog,
            event_bus,
            reply_delay: Duration::from_millis(1000),
            policy: SubmitPolicy::Queue,
            turn_lock: Mutex::new(()),
            pending: StdMutex::new(Pending::default()),
            completed: AtomicU64::new(0),
        }
    }

    /// A scripted controller configured from `AppConfig`.
    pub fn from_config(
        config: &AppConfig,
        catalog: Arc<ResponseCatalog>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        let responder = Arc::new(ScriptedResponder::new(catalog.clone()));
        Self::new(responder, catalog, event_bus)
            .with_reply_delay(config.assistant.reply_delay())
            .with_policy(config.assistant.submit_policy)
    }

    /// Set the simulated latency before each reply.
    pub fn with_reply_delay(mut self, delay: Duration) -> Self {
        self.reply_delay = delay;
        self
    }

    /// Set how overlapping submissions are handled.
    pub fn with_policy(mut self, policy: SubmitPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn conversation_id(&self) -> &ConversationId {
        &self.conversation_id
    }

    /// Snapshot of the transcript in insertion order.
    pub async fn transcript(&self) -> Vec<Message> {
        self.conversation.read().await.messages().to_vec()
    }

    pub fn is_composing(&self) -> bool {
        self.pending().composing
    }

    pub fn state(&self) -> AssistantState {
        let pending = self.pending();
        AssistantState {
            composing: pending.composing,
            pending_turns: pending.turns,
            turns_completed: self.completed.load(Ordering::SeqCst),
        }
    }

    /// Subscribe to conversation events. The bus may be shared with other
    /// conversations; filter on `conversation_id`.
    pub fn subscribe(&self) -> broadcast::Receiver<Arc<DomainEvent>> {
        self.event_bus.subscribe()
    }

    /// Run one turn.
    ///
    /// Blank or whitespace-only input is ignored and returns `None` without
    /// touching the transcript. Under [`SubmitPolicy::RejectWhileComposing`]
    /// a submission made while a reply is pending is ignored the same way.
    ///
    /// Dropping the returned future mid-turn leaves the user message without
    /// a reply; callers that may be cancelled should spawn it.
    pub async fn submit(&self, raw_input: &str) -> Option<TurnOutcome> {
        if raw_input.trim().is_empty() {
            debug!("Ignoring blank submission");
            return None;
        }

        if !self.begin_pending() {
            debug!("Ignoring submission while composing");
            return None;
        }
        let _pending = PendingGuard { controller: self };

        let conversation_id = self.conversation_id.to_string();
        let user_message = self.conversation.write().await.append_user(raw_input);
        self.event_bus.publish(DomainEvent::MessageAppended {
            conversation_id: conversation_id.clone(),
            message: user_message.clone(),
        });
        self.raise_composing();

        let _turn = self.turn_lock.lock().await;
        let started = tokio::time::Instant::now();

        tokio::time::sleep(self.reply_delay).await;

        let reply = match self.responder.respond(raw_input).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(
                    conversation_id = %conversation_id,
                    responder = self.responder.name(),
                    "Responder failed, using default reply: {e}"
                );
                Reply {
                    topic: TopicKey::Default,
                    text: self.catalog.reply(TopicKey::Default).to_string(),
                }
            }
        };

        let reply_message = self
            .conversation
            .write()
            .await
            .append_assistant(reply.text.as_str());
        self.event_bus.publish(DomainEvent::MessageAppended {
            conversation_id: conversation_id.clone(),
            message: reply_message.clone(),
        });
        self.completed.fetch_add(1, Ordering::SeqCst);

        let duration_ms = started.elapsed().as_millis() as u64;
        info!(
            conversation_id = %conversation_id,
            topic = %reply.topic,
            message_len = raw_input.len(),
            duration_ms,
            "Turn completed"
        );
        self.event_bus.publish(DomainEvent::TurnCompleted {
            conversation_id,
            topic: reply.topic,
            duration_ms,
            timestamp: Utc::now(),
        });

        Some(TurnOutcome {
            topic: reply.topic,
            user_message,
            reply: reply_message,
        })
    }

    fn lock_pending(&self) -> std::sync::MutexGuard<'_, Pending> {
        self.pending.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn pending(&self) -> Pending {
        *self.lock_pending()
    }

    /// Claim a pending-turn slot. Returns false when the policy rejects the
    /// submission.
    fn begin_pending(&self) -> bool {
        let mut pending = self.lock_pending();
        if pending.turns > 0 && self.policy == SubmitPolicy::RejectWhileComposing {
            return false;
        }
        pending.turns += 1;
        true
    }

    /// Turn composing on once the user message is in the transcript.
    fn raise_composing(&self) {
        let mut pending = self.lock_pending();
        if pending.turns > 0 && !pending.composing {
            pending.composing = true;
            self.publish_composing(true);
        }
    }

    /// Release a slot, lowering composing with the last one.
    fn end_pending(&self) {
        let mut pending = self.lock_pending();
        pending.turns = pending.turns.saturating_sub(1);
        if pending.turns == 0 && pending.composing {
            pending.composing = false;
            self.publish_composing(false);
        }
    }

    fn publish_composing(&self, composing: bool) {
        self.event_bus.publish(DomainEvent::ComposingChanged {
            conversation_id: self.conversation_id.to_string(),
            composing,
            timestamp: Utc::now(),
        });
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Pending {
    turns: usize,
    composing: bool,
}

/// Releases a pending-turn slot even if the turn future is dropped mid-delay.
struct PendingGuard<'a> {
    controller: &'a TurnController,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.controller.end_pending();
    }
}
