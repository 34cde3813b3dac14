//! Two-step rating conversation
//!
//! A conversation collects a rating sheet, then a game sheet, and answers with
//! the recalculated rating sheet. Any input the current state does not expect
//! sends the conversation back to waiting for a rating sheet.

use crate::error::{LadderError, Result};
use crate::rating::{EloConfig, EloRatingCalculator, RatingEngine};
use crate::sheet;
use crate::types::Participant;
use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

const GREETING: &str = "Привет! Пришли файл с текущим рейтингом.\n\n\
     Если ранее уже считал рейтинг - можешь переслать итоговый файл.\n\n\
     Начать заново: /start\n\nФормат данных должен быть такой.";
const RATING_FILE_ACCEPTED: &str =
    "Файл получил. Теперь пришли файл с результатами турнира.\n\nФормат данных должен быть такой.";
const RESULT_READY: &str = "Готово. Результат в файле";
const FILE_TOO_LARGE: &str = "Слишком большой файл. Пришли другой.";
const FALLBACK: &str =
    "Что-то не то прислал. Давай начнем заново. Пришли файл с текущим рейтингом.";

/// Default upload limit in megabytes
pub const DEFAULT_MAX_FILE_SIZE_MB: u64 = 5;

/// Check an upload size against a limit in megabytes. Empty files never pass.
pub fn file_size_ok(size_bytes: u64, limit_mb: u64) -> bool {
    if size_bytes == 0 {
        return false;
    }

    size_bytes as f64 / (1024.0 * 1024.0) <= limit_mb as f64
}

/// Step of the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConversationState {
    AwaitRatingFile,
    AwaitGameFile,
}

impl std::fmt::Display for ConversationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConversationState::AwaitRatingFile => write!(f, "AwaitRatingFile"),
            ConversationState::AwaitGameFile => write!(f, "AwaitGameFile"),
        }
    }
}

/// An uploaded file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Document {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Input delivered by a chat transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    /// The `/start` command
    Start,
    Document(Document),
    Text(String),
}

/// File sent back to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingDocument {
    pub file_name: String,
    pub caption: String,
    pub bytes: Vec<u8>,
}

/// Output for a chat transport to deliver
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Document(OutgoingDocument),
}

/// Conversation settings passed in by the service
#[derive(Debug, Clone)]
pub struct ConversationConfig {
    pub max_file_size_mb: u64,
    pub rating: EloConfig,
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            max_file_size_mb: DEFAULT_MAX_FILE_SIZE_MB,
            rating: EloConfig::default(),
        }
    }
}

/// State machine for one chat
#[derive(Debug)]
pub struct Conversation {
    config: ConversationConfig,
    state: ConversationState,
    known_participants: Option<Vec<Participant>>,
}

impl Conversation {
    pub fn new(config: ConversationConfig) -> Result<Self> {
        config.rating.validate()?;

        Ok(Self {
            config,
            state: ConversationState::AwaitRatingFile,
            known_participants: None,
        })
    }

    pub fn state(&self) -> ConversationState {
        self.state
    }

    /// Advance the conversation with one event and return the replies to send
    pub fn handle(&mut self, event: ChatEvent) -> Vec<Reply> {
        info!("Handling {} in state {}", event_kind(&event), self.state);

        match (self.state, event) {
            (_, ChatEvent::Start) => self.on_start(),
            (ConversationState::AwaitRatingFile, ChatEvent::Document(document)) => {
                self.on_rating_file(document)
            }
            (ConversationState::AwaitGameFile, ChatEvent::Document(document)) => {
                self.on_game_file(document)
            }
            (_, ChatEvent::Text(_)) => self.fallback(),
        }
    }

    fn on_start(&mut self) -> Vec<Reply> {
        self.reset();
        match sheet::example_rating_sheet() {
            Ok(bytes) => vec![Reply::Document(OutgoingDocument {
                file_name: "example_current_rating_file.csv".to_string(),
                caption: GREETING.to_string(),
                bytes,
            })],
            Err(e) => error_reply(e),
        }
    }

    fn on_rating_file(&mut self, document: Document) -> Vec<Reply> {
        if let Err(e) = self.check_size(&document) {
            warn!("Rejected rating file '{}': {}", document.file_name, e);
            return vec![Reply::Text(FILE_TOO_LARGE.to_string())];
        }

        let participants = match sheet::read_participants(document.bytes.as_slice()) {
            Ok(participants) => participants,
            Err(e) => return error_reply(e),
        };
        info!(
            "Accepted rating file '{}' with {} participants",
            document.file_name,
            participants.len()
        );

        let example = match sheet::example_game_sheet() {
            Ok(bytes) => bytes,
            Err(e) => return error_reply(e),
        };

        self.known_participants = Some(participants);
        self.state = ConversationState::AwaitGameFile;

        vec![Reply::Document(OutgoingDocument {
            file_name: "example_game_record_file.csv".to_string(),
            caption: RATING_FILE_ACCEPTED.to_string(),
            bytes: example,
        })]
    }

    fn on_game_file(&mut self, document: Document) -> Vec<Reply> {
        if let Err(e) = self.check_size(&document) {
            warn!("Rejected game file '{}': {}", document.file_name, e);
            return vec![Reply::Text(FILE_TOO_LARGE.to_string())];
        }

        match self.compute(&document) {
            Ok(result) => {
                self.reset();
                vec![Reply::Document(result)]
            }
            // Stay put so a corrected game file can be sent
            Err(e) => error_reply(e),
        }
    }

    fn compute(&self, document: &Document) -> Result<OutgoingDocument> {
        let games = sheet::read_game_records(document.bytes.as_slice())?;
        let known = self.known_participants.clone().unwrap_or_default();

        let calculator = EloRatingCalculator::new(self.config.rating.clone())?;
        let mut engine = RatingEngine::with_calculator(calculator, known);
        let participants = engine.evaluate(&games);

        Ok(OutgoingDocument {
            file_name: sheet::output_file_name(&Local::now()),
            caption: RESULT_READY.to_string(),
            bytes: sheet::participants_to_bytes(&participants)?,
        })
    }

    fn fallback(&mut self) -> Vec<Reply> {
        self.reset();
        vec![Reply::Text(FALLBACK.to_string())]
    }

    fn check_size(&self, document: &Document) -> Result<()> {
        if file_size_ok(document.size(), self.config.max_file_size_mb) {
            Ok(())
        } else {
            Err(LadderError::FileTooLarge {
                size_bytes: document.size(),
                limit_mb: self.config.max_file_size_mb,
            }
            .into())
        }
    }

    fn reset(&mut self) {
        self.state = ConversationState::AwaitRatingFile;
        self.known_participants = None;
    }
}

fn event_kind(event: &ChatEvent) -> &'static str {
    match event {
        ChatEvent::Start => "start command",
        ChatEvent::Document(_) => "document",
        ChatEvent::Text(_) => "text message",
    }
}

fn error_reply(e: anyhow::Error) -> Vec<Reply> {
    error!("Exception while handling an update: {:#}", e);
    vec![Reply::Text(format!("Не удалось обработать файл: {:#}", e))]
}
