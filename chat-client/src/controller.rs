//! Drives a [`ChatSession`] against a live relay.
//!
//! Each submitted question runs on its own task; results come back through an
//! mpsc channel and are applied in the order they arrive.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::{
    relay_client::RelayClient,
    session::{ChatSession, Completion, PendingAsk},
};

pub struct ChatController {
    client: Arc<RelayClient>,
    session: ChatSession,
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
}

impl ChatController {
    pub fn new(client: RelayClient) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            client: Arc::new(client),
            session: ChatSession::new(),
            tx,
            rx,
        }
    }

    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut ChatSession {
        &mut self.session
    }

    /// Startup probe: relay liveness plus the topic list. Neither outcome
    /// blocks input.
    pub async fn mount(&mut self) {
        let (health, topics) = tokio::join!(self.client.health(), self.client.topics());

        match &health {
            Ok(h) => debug!(service = %h.service, version = %h.version, "relay online"),
            Err(e) => warn!(error = %e, "relay health check failed"),
        }
        if let Err(e) = &topics {
            warn!(error = %e, "topic list unavailable, using fallback");
        }

        self.session.set_relay_online(health.is_ok());
        self.session.set_topics(topics);
    }

    /// Submits the current input. Returns the ticket, or `None` for blank input.
    pub fn submit(&mut self) -> Option<u64> {
        let pending = self.session.submit()?;
        let ticket = pending.ticket;
        self.dispatch(pending);
        Some(ticket)
    }

    fn dispatch(&self, pending: PendingAsk) {
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();

        tokio::spawn(async move {
            let PendingAsk {
                ticket,
                question,
                topic,
            } = pending;
            debug!(ticket, "ask sent");

            let result = client.ask(&question, topic.as_deref()).await;
            if let Err(e) = &result {
                warn!(ticket, error = %e, "ask failed");
            }

            // Receiver lives as long as the controller.
            let _ = tx.send(Completion {
                ticket,
                topic,
                result,
            });
        });
    }

    /// Waits for the next finished ask and applies it. Returns its ticket.
    ///
    /// Pends forever while nothing is in flight.
    pub async fn next_completion(&mut self) -> u64 {
        if !self.session.is_loading() {
            std::future::pending::<()>().await;
        }
        // `self.tx` keeps the channel open, so `recv` only yields `Some`.
        let Some(completion) = self.rx.recv().await else {
            return std::future::pending().await;
        };
        let ticket = completion.ticket;
        debug!(ticket, ok = completion.result.is_ok(), "ask completed");
        self.session.complete(completion);
        ticket
    }
}
