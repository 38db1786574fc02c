//! Plain-text rendering of a [`ChatSession`].
//!
//! Everything here is pure: functions take the session and return a `String`.

use std::fmt::Write;

use colored::Colorize;

use crate::{
    session::{ChatSession, EXAMPLE_QUESTIONS, RelayStatus},
    transcript::{Message, Role},
};

/// Number of messages shown at once.
pub const VIEW_HEIGHT: usize = 12;

/// Messages currently in view: the newest `VIEW_HEIGHT`, shifted back by the
/// session's scroll offset.
pub fn visible(session: &ChatSession) -> &[Message] {
    let all = session.transcript().messages();
    let end = all.len().saturating_sub(session.scroll_back());
    let start = end.saturating_sub(VIEW_HEIGHT);
    &all[start..end]
}

pub fn message(m: &Message) -> String {
    let time = m.timestamp.format("%H:%M").to_string().dimmed();
    let who = match m.role {
        Role::User => "you".cyan().bold(),
        Role::Assistant if m.is_error => "assistant".red().bold(),
        Role::Assistant => "assistant".green().bold(),
    };
    let tag = if m.topic.is_empty() {
        String::new()
    } else {
        format!(" [{}]", m.topic).yellow().to_string()
    };
    let body = if m.is_error {
        m.content.red().to_string()
    } else {
        m.content.clone()
    };
    format!("{time} {who}{tag}\n{body}\n")
}

pub fn status_line(session: &ChatSession) -> String {
    let relay = match session.relay_status() {
        RelayStatus::Online => "relay online".green(),
        RelayStatus::Offline => "relay offline".red(),
        RelayStatus::Unknown => "relay ?".dimmed(),
    };
    let topic = session.selected_topic().unwrap_or("no topic");
    let mut line = format!("{relay} | topic: {topic}");
    if session.is_loading() {
        let _ = write!(line, " | {}", format!("thinking ({})...", session.in_flight()).yellow());
    }
    if session.scroll_back() > 0 {
        let _ = write!(line, " | scrolled back {}", session.scroll_back());
    }
    line
}

pub fn screen(session: &ChatSession) -> String {
    let mut out = String::new();
    for m in visible(session) {
        out.push_str(&message(m));
        out.push('\n');
    }
    out.push_str(&status_line(session));
    out
}

pub fn topics(session: &ChatSession) -> String {
    let mut out = String::from("Topics:\n");
    for (i, t) in session.topics().iter().enumerate() {
        let _ = write!(out, "  {}. {}", i + 1, t.name.bold());
        if !t.description.is_empty() {
            let _ = write!(out, " - {}", t.description.dimmed());
        }
        out.push('\n');
    }
    out
}

pub fn examples() -> String {
    let mut out = String::from("Examples:\n");
    for (i, (q, topic)) in EXAMPLE_QUESTIONS.iter().enumerate() {
        let _ = writeln!(out, "  {}. {q} {}", i + 1, format!("[{topic}]").dimmed());
    }
    out
}

pub const HELP: &str = "\
/topics          list topics
/topic <n|none>  select a topic for the next questions
/examples        list example questions
/example <n>     ask an example question
/clear           start a new conversation
/up, /down       scroll the conversation
/quit            exit";
