//! Floating chat widget state.
//!
//! The widget owns the transcript for one conversation. Visibility
//! (open/closed) is tracked independently of the message flow, which moves
//! through [`Phase::Greeted`] → [`Phase::Sending`] → [`Phase::AwaitingInput`].
//!
//! A turn can be driven in one call with [`ChatWidget::send`], or split into
//! [`ChatWidget::begin_turn`] / [`ChatWidget::finish_turn`] by an event loop
//! that performs the request itself. While a turn is in flight further
//! submissions are ignored.

use adal_types::{ChatRequest, Message};
use tracing::{debug, warn};

use crate::transport::{ChatTransport, ServerReply, TransportError};

pub const GREETING: &str = "👋 Hi! I'm Adal AI Assistant. I can help you explore models, datasets, and answer questions about the platform. How can I assist you today?";

/// Shown when a reply arrives without any text.
pub const EMPTY_REPLY: &str = "I couldn't generate a response.";

pub const ERROR_PREFIX: &str = "Sorry, I encountered an error. ";

pub static QUICK_QUESTIONS: [&str; 4] = [
    "What models are trending?",
    "How do I create a Space?",
    "Tell me about datasets",
    "What is Adal?",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Closed,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Only the seeded greeting is present.
    Greeted,
    AwaitingInput,
    /// A request is in flight.
    Sending,
}

pub struct ChatWidget<T> {
    transport: T,
    visibility: Visibility,
    messages: Vec<Message>,
    input: String,
    loading: bool,
    input_focused: bool,
    scroll_anchor: usize,
}

impl<T: ChatTransport> ChatWidget<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            visibility: Visibility::Closed,
            messages: vec![Message::assistant(GREETING)],
            input: String::new(),
            loading: false,
            input_focused: false,
            scroll_anchor: 0,
        }
    }

    // ── Visibility ───────────────────────────────────────────────────────────

    /// Show the widget and move focus to the text input.
    pub fn open(&mut self) {
        self.visibility = Visibility::Open;
        self.input_focused = true;
    }

    pub fn close(&mut self) {
        self.visibility = Visibility::Closed;
        self.input_focused = false;
    }

    pub fn toggle(&mut self) {
        match self.visibility {
            Visibility::Open => self.close(),
            Visibility::Closed => self.open(),
        }
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_open(&self) -> bool {
        self.visibility == Visibility::Open
    }

    pub fn input_focused(&self) -> bool {
        self.input_focused
    }

    // ── Transcript ───────────────────────────────────────────────────────────

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Index of the entry the transcript view should be scrolled to.
    pub fn scroll_anchor(&self) -> usize {
        self.scroll_anchor
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn phase(&self) -> Phase {
        if self.loading {
            Phase::Sending
        } else if self.messages.len() == 1 {
            Phase::Greeted
        } else {
            Phase::AwaitingInput
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        !self.loading && !self.input.trim().is_empty()
    }

    /// Shortcut questions, offered only before the first turn.
    pub fn quick_questions(&self) -> &'static [&'static str] {
        if self.messages.len() == 1 {
            &QUICK_QUESTIONS
        } else {
            &[]
        }
    }

    fn push(&mut self, message: Message) {
        self.messages.push(message);
        self.scroll_anchor = self.messages.len() - 1;
    }

    // ── Turns ────────────────────────────────────────────────────────────────

    /// Start a turn from the current input.
    ///
    /// Returns the request to send, or `None` when the input is blank or a
    /// turn is already in flight. On success the user message is appended,
    /// the input is cleared and the widget enters [`Phase::Sending`].
    pub fn begin_turn(&mut self) -> Option<ChatRequest> {
        if !self.can_submit() {
            debug!(loading = self.loading, "submission ignored");
            return None;
        }
        let content = std::mem::take(&mut self.input);
        self.push(Message::user(content));
        self.loading = true;
        Some(ChatRequest {
            messages: self.messages.clone(),
        })
    }

    /// Complete the in-flight turn with the transport outcome.
    ///
    /// Appends exactly one assistant message: the reply text, the
    /// [`EMPTY_REPLY`] placeholder, or a message describing the error.
    /// Ignored when no turn is in flight.
    pub fn finish_turn(&mut self, outcome: Result<ServerReply, TransportError>) {
        if !self.loading {
            warn!("finish_turn called with no turn in flight");
            return;
        }
        let content = match outcome {
            Ok(reply) => reply_text(reply),
            Err(e) => {
                warn!(error = %e, details = ?e.details(), "chat request failed");
                error_text(&e)
            }
        };
        self.push(Message::assistant(content));
        self.loading = false;
    }

    /// Submit the current input and wait for the reply.
    ///
    /// Returns `false` if the submission was rejected.
    pub async fn send(&mut self) -> bool {
        let Some(request) = self.begin_turn() else {
            return false;
        };
        let outcome = self.transport.send(&request).await;
        self.finish_turn(outcome);
        true
    }

    /// Fill the input with quick question `index` and start a turn with it.
    pub fn select_quick_question(&mut self, index: usize) -> Option<ChatRequest> {
        let question = self.quick_questions().get(index)?;
        self.set_input(*question);
        self.begin_turn()
    }

    /// [`select_quick_question`](Self::select_quick_question) followed by the request.
    pub async fn ask_quick_question(&mut self, index: usize) -> bool {
        let Some(request) = self.select_quick_question(index) else {
            return false;
        };
        let outcome = self.transport.send(&request).await;
        self.finish_turn(outcome);
        true
    }
}

fn reply_text(reply: ServerReply) -> String {
    reply
        .response
        .filter(|r| !r.is_empty())
        .unwrap_or_else(|| EMPTY_REPLY.to_owned())
}

/// Assistant message shown for a failed request.
pub fn error_text(error: &TransportError) -> String {
    let detail = match error.details() {
        Some(details) => format!("Details: {details}"),
        None => {
            let message = error.to_string();
            if message.is_empty() {
                "Please try again.".to_owned()
            } else {
                message
            }
        }
    };
    format!("{ERROR_PREFIX}{detail}")
}

// ── Tests ────────────────────────────────────────────────────────────────────
