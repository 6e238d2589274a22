//! Bounds the conversation history forwarded upstream.

use adal_types::{Message, Role};

/// Default number of trailing messages forwarded to the completion endpoint.
pub const DEFAULT_HISTORY_WINDOW: usize = 20;

/// Return the tail of `messages` that is sent upstream.
///
/// At most `max_messages` entries are kept, and any leading assistant entries
/// of that tail are dropped so the forwarded conversation opens with a user
/// turn. A `max_messages` of zero is treated as one.
pub fn window(messages: &[Message], max_messages: usize) -> &[Message] {
    let max = max_messages.max(1);
    let start = messages.len().saturating_sub(max);
    let tail = &messages[start..];
    let first_user = tail
        .iter()
        .position(|m| m.role == Role::User)
        .unwrap_or(tail.len());
    &tail[first_user..]
}

/// Content of the final message, or `""` when there is none.
pub fn last_content(messages: &[Message]) -> &str {
    messages.last().map(|m| m.content.as_str()).unwrap_or("")
}

#[cfg(test)]
mod test {
    use super::*;

    fn convo(n: usize) -> Vec<Message> {
        let mut out = vec![Message::assistant("greeting")];
        for i in 0..n {
            out.push(Message::user(format!("q{i}")));
            out.push(Message::assistant(format!("a{i}")));
        }
        out
    }

    #[test]
    fn seeded_greeting_is_not_forwarded() {
        let mut msgs = convo(0);
        msgs.push(Message::user("hello"));
        assert_eq!(window(&msgs, DEFAULT_HISTORY_WINDOW), &[Message::user("hello")]);
    }

    #[test]
    fn long_history_is_truncated_to_window() {
        let mut msgs = convo(30);
        msgs.push(Message::user("latest"));
        let w = window(&msgs, 5);
        assert!(w.len() <= 5);
        assert_eq!(w.first().map(|m| m.role), Some(Role::User));
        assert_eq!(last_content(w), "latest");
    }

    #[test]
    fn assistant_only_history_is_empty() {
        let msgs = convo(0);
        assert!(window(&msgs, 10).is_empty());
        assert!(window(&[], 10).is_empty());
    }

    #[test]
    fn zero_window_keeps_last_message() {
        let msgs = vec![Message::user("a"), Message::user("b")];
        assert_eq!(window(&msgs, 0), &[Message::user("b")]);
    }

    #[test]
    fn last_content_of_empty_is_empty() {
        assert_eq!(last_content(&[]), "");
    }
}
