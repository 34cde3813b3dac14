//! Chat transports that feed a conversation
//!
//! A transport turns incoming messages into `ChatEvent`s and delivers the
//! resulting `Reply`s. The console transport reads commands line by line and
//! saves outgoing documents into a directory.

use crate::error::Result;
use crate::session::conversation::{ChatEvent, Conversation, Document, Reply};
use anyhow::Context;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Lines};
use tracing::{debug, info, warn};

/// Trait defining the interface for delivering chat messages
#[async_trait]
pub trait ChatTransport: Send {
    /// Wait for the next event, `None` once the chat is closed
    async fn next_event(&mut self) -> Result<Option<ChatEvent>>;

    /// Deliver a reply to the user
    async fn send(&mut self, reply: Reply) -> Result<()>;
}

/// Drive a conversation until the transport closes
pub async fn run_conversation<T>(transport: &mut T, conversation: &mut Conversation) -> Result<()>
where
    T: ChatTransport + ?Sized,
{
    let mut handled = 0u64;

    while let Some(event) = transport.next_event().await? {
        for reply in conversation.handle(event) {
            transport.send(reply).await?;
        }
        handled += 1;
    }

    info!("Conversation closed after {} events", handled);
    Ok(())
}

/// Line-based transport for terminals
///
/// `/start` restarts the conversation, `/file <path>` uploads a file and any
/// other line is sent as text.
pub struct ConsoleTransport<R, W> {
    lines: Lines<R>,
    output: W,
    output_dir: PathBuf,
}

impl ConsoleTransport<BufReader<tokio::io::Stdin>, tokio::io::Stdout> {
    /// Console transport over the process stdin and stdout
    pub fn stdio(output_dir: impl Into<PathBuf>) -> Self {
        Self::new(
            BufReader::new(tokio::io::stdin()),
            tokio::io::stdout(),
            output_dir,
        )
    }
}

impl<R, W> ConsoleTransport<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(input: R, output: W, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            lines: input.lines(),
            output,
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn into_output(self) -> W {
        self.output
    }

    async fn write_line(&mut self, line: &str) -> Result<()> {
        self.output.write_all(line.as_bytes()).await?;
        self.output.write_all(b"\n").await?;
        self.output.flush().await?;
        Ok(())
    }
}

#[async_trait]
impl<R, W> ChatTransport for ConsoleTransport<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn next_event(&mut self) -> Result<Option<ChatEvent>> {
        loop {
            let Some(line) = self.lines.next_line().await? else {
                return Ok(None);
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if line == "/start" {
                return Ok(Some(ChatEvent::Start));
            }

            if let Some(path) = line.strip_prefix("/file ") {
                let path = Path::new(path.trim());
                match tokio::fs::read(path).await {
                    Ok(bytes) => {
                        debug!("Uploading '{}' ({} bytes)", path.display(), bytes.len());
                        let file_name = path
                            .file_name()
                            .map(|name| name.to_string_lossy().into_owned())
                            .unwrap_or_default();
                        return Ok(Some(ChatEvent::Document(Document::new(file_name, bytes))));
                    }
                    Err(e) => {
                        warn!("Failed to read '{}': {}", path.display(), e);
                        self.write_line(&format!("Не удалось прочитать {}: {}", path.display(), e))
                            .await?;
                        continue;
                    }
                }
            }

            return Ok(Some(ChatEvent::Text(line.to_string())));
        }
    }

    async fn send(&mut self, reply: Reply) -> Result<()> {
        match reply {
            Reply::Text(text) => self.write_line(&text).await,
            Reply::Document(document) => {
                tokio::fs::create_dir_all(&self.output_dir)
                    .await
                    .with_context(|| {
                        format!("Failed to create {}", self.output_dir.display())
                    })?;
                let path = self.output_dir.join(&document.file_name);
                tokio::fs::write(&path, &document.bytes)
                    .await
                    .with_context(|| format!("Failed to write {}", path.display()))?;

                info!("Saved document to {}", path.display());
                self.write_line(&format!("{}\n[{}]", document.caption, path.display()))
                    .await
            }
        }
    }
}
