//! Session-scoped, append-only chat transcript.

use chrono::{DateTime, Utc};

/// Text of the message every fresh transcript starts with.
pub const GREETING: &str = "Hi! I'm your cloud study assistant. Pick a topic or ask me anything \
about Cloud Computing, DevOps and AWS.";

/// Text appended when a question could not be answered.
pub const REQUEST_FAILED: &str =
    "Sorry, I couldn't get an answer right now. Please check that the relay is running and try again.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// One entry of the transcript. It has no identity beyond its position.
#[derive(Clone, Debug, PartialEq)]
pub struct Message {
    pub role: Role,
    pub content: String,
    /// Topic the question was tagged with; empty when none.
    pub topic: String,
    pub timestamp: DateTime<Utc>,
    /// Set on assistant messages that stand in for a failed request.
    pub is_error: bool,
}

impl Message {
    pub fn user(content: impl Into<String>, topic: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            topic: topic.into(),
            timestamp: Utc::now(),
            is_error: false,
        }
    }

    pub fn assistant(
        content: impl Into<String>,
        topic: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            topic: topic.into(),
            timestamp: at,
            is_error: false,
        }
    }

    pub fn failure(topic: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: REQUEST_FAILED.to_string(),
            topic: topic.into(),
            timestamp: Utc::now(),
            is_error: true,
        }
    }

    fn greeting() -> Self {
        Self::assistant(GREETING, "", Utc::now())
    }
}

/// Ordered message list. Mutated only through [`Transcript::push`] and
/// [`Transcript::reset`].
#[derive(Clone, Debug)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

impl Transcript {
    /// A transcript holding only the greeting.
    pub fn new() -> Self {
        Self {
            messages: vec![Message::greeting()],
        }
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Drops everything and starts over from the greeting.
    pub fn reset(&mut self) {
        self.messages.clear();
        self.messages.push(Message::greeting());
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// `true` when the transcript holds nothing but the greeting.
    pub fn is_fresh(&self) -> bool {
        matches!(
            self.messages.as_slice(),
            [only] if only.content == GREETING && only.role == Role::Assistant
        )
    }
}
