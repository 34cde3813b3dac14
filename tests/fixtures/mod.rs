//! Test fixtures and mock implementations for integration testing

#![allow(dead_code)]

use async_trait::async_trait;
use elo_ladder::error::Result;
use elo_ladder::session::{ChatEvent, ChatTransport, Document, Reply};
use elo_ladder::types::GameRecord;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Mock transport that replays scripted events and captures replies
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    events: VecDeque<ChatEvent>,
    sent_replies: Arc<Mutex<Vec<Reply>>>,
}

impl ScriptedTransport {
    pub fn new(events: Vec<ChatEvent>) -> Self {
        Self {
            events: events.into(),
            sent_replies: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get all sent replies (for testing)
    pub fn get_sent_replies(&self) -> Vec<Reply> {
        self.sent_replies
            .lock()
            .map(|replies| replies.clone())
            .unwrap_or_default()
    }

    /// Count replies carrying a document
    pub fn count_documents(&self) -> usize {
        self.get_sent_replies()
            .iter()
            .filter(|reply| matches!(reply, Reply::Document(_)))
            .count()
    }
}

#[async_trait]
impl ChatTransport for ScriptedTransport {
    async fn next_event(&mut self) -> Result<Option<ChatEvent>> {
        Ok(self.events.pop_front())
    }

    async fn send(&mut self, reply: Reply) -> Result<()> {
        if let Ok(mut replies) = self.sent_replies.lock() {
            replies.push(reply);
        }
        Ok(())
    }
}

/// Upload event for an in-memory CSV sheet
pub fn upload(file_name: &str, csv: &str) -> ChatEvent {
    ChatEvent::Document(Document::new(file_name, csv.as_bytes().to_vec()))
}

/// Three-game tournament shared by the integration tests:
/// Марк beats Александр, Регина draws Александр, Регина beats Марк.
pub fn reference_tournament() -> Vec<GameRecord> {
    vec![
        GameRecord::new("Марк", "Александр", 1.0, 0.0),
        GameRecord::new("Регина", "Александр", 0.5, 0.5),
        GameRecord::new("Регина", "Марк", 1.0, 0.0),
    ]
}

pub const REFERENCE_GAME_SHEET: &str = "Игрок 1,Игрок 2,Очки 1,Очки 2\n\
                                        Марк,Александр,1,0\n\
                                        Регина,Александр,0.5,0.5\n\
                                        Регина,Марк,1,0\n";
