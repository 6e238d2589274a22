//! Client side of the Adal assistant: the chat widget state machine and the
//! transport it uses to reach `POST /api/claude`.

pub mod transport;
pub mod widget;

pub use transport::{ChatTransport, DEFAULT_ENDPOINT, HttpTransport, ServerReply, TransportError};
pub use widget::{ChatWidget, EMPTY_REPLY, GREETING, Phase, QUICK_QUESTIONS, Visibility};
