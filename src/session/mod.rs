//! Conversational file exchange
//!
//! This module models the chat dialogue that collects a rating sheet and a
//! game sheet, and the transports that carry it.

pub mod conversation;
pub mod transport;

// Re-export commonly used types
pub use conversation::{
    file_size_ok, ChatEvent, Conversation, ConversationConfig, ConversationState, Document,
    OutgoingDocument, Reply, DEFAULT_MAX_FILE_SIZE_MB,
};
pub use transport::{run_conversation, ChatTransport, ConsoleTransport};
