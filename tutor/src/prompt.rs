//! Prompt builder: fixed instructional preamble + optional topic + question.

/// Instructions prepended to every student question.
pub const PREAMBLE: &str = "You are an educational assistant specialized in Cloud Computing, DevOps and AWS.
Answer in a clear, didactic and practical way.

GUIDELINES:
1. Explain technical concepts in accessible terms
2. Use practical examples whenever possible
3. If the question is very broad, focus on the main points
4. Mention good practices when relevant
5. Use markdown formatting for readability";

/// Builds the prompt sent upstream for one question.
///
/// A blank `topic` is the same as no topic. Question and topic are inserted
/// verbatim, without escaping.
///
/// # Example
/// ```
/// use tutor::prompt::build_prompt;
/// let p = build_prompt("What is a pod?", Some("Kubernetes"));
/// assert!(p.contains("Topic: Kubernetes"));
/// assert!(p.contains("Student question: What is a pod?"));
/// assert!(p.ends_with("Answer:"));
/// ```
pub fn build_prompt(question: &str, topic: Option<&str>) -> String {
    let mut out = String::with_capacity(PREAMBLE.len() + question.len() + 64);
    out.push_str(PREAMBLE);

    if let Some(topic) = topic.filter(|t| !t.trim().is_empty()) {
        out.push_str("\n\nTopic: ");
        out.push_str(topic);
    }

    out.push_str("\n\nStudent question: ");
    out.push_str(question);
    out.push_str("\n\nAnswer:");
    out
}
