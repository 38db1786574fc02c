//! Chat client state container.
//!
//! [`ChatSession`] owns everything the UI renders: transcript, input line,
//! selected topic, topic list, relay status and the loading indicator. It does
//! no I/O; [`crate::controller::ChatController`] feeds it results.

use crate::relay_client::{AskReply, ClientError, TopicEntry};
use crate::transcript::{Message, Transcript};

/// Topics offered when the relay's list cannot be fetched.
pub fn fallback_topics() -> Vec<TopicEntry> {
    [
        ("docker", "Docker and Containers"),
        ("aws", "AWS - Basic Services"),
        ("cicd", "CI/CD and GitHub Actions"),
        ("kubernetes", "Kubernetes"),
    ]
    .into_iter()
    .map(|(id, name)| TopicEntry {
        id: id.to_string(),
        name: name.to_string(),
        description: String::new(),
    })
    .collect()
}

/// Canned questions offered as one-click examples.
pub const EXAMPLE_QUESTIONS: &[(&str, &str)] = &[
    ("What is Docker and what is it used for?", "Docker and Containers"),
    ("What is the difference between EC2 and Lambda?", "AWS - Basic Services"),
    ("How do I build a CI/CD pipeline with GitHub Actions?", "CI/CD and GitHub Actions"),
    ("What are pods and deployments in Kubernetes?", "Kubernetes"),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RelayStatus {
    Unknown,
    Online,
    Offline,
}

/// One outgoing question, produced by [`ChatSession::submit`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingAsk {
    /// Correlation number, unique within the session.
    pub ticket: u64,
    pub question: String,
    pub topic: Option<String>,
}

/// Result of a [`PendingAsk`], handed back to [`ChatSession::complete`].
#[derive(Debug)]
pub struct Completion {
    pub ticket: u64,
    pub topic: Option<String>,
    pub result: Result<AskReply, ClientError>,
}

#[derive(Debug)]
pub struct ChatSession {
    transcript: Transcript,
    input: String,
    selected_topic: Option<String>,
    topics: Vec<TopicEntry>,
    relay: RelayStatus,
    in_flight: usize,
    next_ticket: u64,
    /// Messages hidden below the view; 0 means anchored to the newest.
    scroll_back: usize,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            transcript: Transcript::new(),
            input: String::new(),
            selected_topic: None,
            topics: fallback_topics(),
            relay: RelayStatus::Unknown,
            in_flight: 0,
            next_ticket: 1,
            scroll_back: 0,
        }
    }

    /* --------------------- Mount --------------------- */

    /// Records the advisory liveness probe. Offline never blocks input.
    pub fn set_relay_online(&mut self, online: bool) {
        self.relay = if online {
            RelayStatus::Online
        } else {
            RelayStatus::Offline
        };
    }

    /// Installs the fetched topic list, or the fallback on failure/empty list.
    pub fn set_topics(&mut self, fetched: Result<Vec<TopicEntry>, ClientError>) {
        self.topics = match fetched {
            Ok(list) if !list.is_empty() => list,
            _ => fallback_topics(),
        };
    }

    /* --------------------- Input --------------------- */

    /// Sets (or, with `None`, unsets) the topic for the next question.
    pub fn select_topic(&mut self, topic: Option<&str>) {
        self.selected_topic = topic
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);
    }

    pub fn set_input(&mut self, text: &str) {
        self.input = text.to_string();
    }

    /// Same state as typing `question` and picking `topic` by hand.
    pub fn ask_example(&mut self, question: &str, topic: Option<&str>) {
        self.set_input(question);
        self.select_topic(topic);
    }

    /// Turns the current input into a user message and an outgoing ask.
    ///
    /// Returns `None` (and changes nothing) for blank input. Never waits for
    /// earlier asks: overlapping submissions are allowed.
    pub fn submit(&mut self) -> Option<PendingAsk> {
        let question = self.input.trim().to_string();
        if question.is_empty() {
            return None;
        }

        let topic = self.selected_topic.clone();
        self.push(Message::user(question.clone(), topic.clone().unwrap_or_default()));
        self.input.clear();
        self.in_flight += 1;

        let ticket = self.next_ticket;
        self.next_ticket += 1;

        Some(PendingAsk {
            ticket,
            question,
            topic,
        })
    }

    /// Appends the answer (or the fixed failure text) for a finished ask.
    ///
    /// Completions are applied in arrival order, which may differ from
    /// submission order. A completion arriving after [`ChatSession::clear`]
    /// lands in the fresh transcript.
    pub fn complete(&mut self, completion: Completion) {
        self.in_flight = self.in_flight.saturating_sub(1);

        let topic = completion.topic.unwrap_or_default();
        let message = match completion.result {
            Ok(reply) => Message::assistant(reply.answer, topic, reply.timestamp),
            Err(_) => Message::failure(topic),
        };
        self.push(message);
    }

    /// Discards the conversation and the topic selection.
    pub fn clear(&mut self) {
        self.transcript.reset();
        self.selected_topic = None;
        self.scroll_back = 0;
    }

    /* --------------------- Scrolling --------------------- */

    pub fn scroll_up(&mut self, by: usize) {
        let max = self.transcript.len().saturating_sub(1);
        self.scroll_back = (self.scroll_back + by).min(max);
    }

    pub fn scroll_down(&mut self, by: usize) {
        self.scroll_back = self.scroll_back.saturating_sub(by);
    }

    /* --------------------- Accessors --------------------- */

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn selected_topic(&self) -> Option<&str> {
        self.selected_topic.as_deref()
    }

    pub fn topics(&self) -> &[TopicEntry] {
        &self.topics
    }

    pub fn relay_status(&self) -> RelayStatus {
        self.relay
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn scroll_back(&self) -> usize {
        self.scroll_back
    }

    // Every transcript mutation re-anchors the view to the newest message.
    fn push(&mut self, message: Message) {
        self.transcript.push(message);
        self.scroll_back = 0;
    }
}
