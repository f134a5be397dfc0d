use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use quiz_core::{GeneratedQuiz, HistoryEntry, HistoryId, QuizDetail};
use quiz_logging::quiz_debug;

use crate::{ApiError, QuizApi};

enum ClientCommand {
    FetchHistory,
    GenerateQuiz { url: String },
    FetchQuiz { id: HistoryId },
}

/// Result of one backend call, delivered back to the UI thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    HistoryFetched(Result<Vec<HistoryEntry>, ApiError>),
    QuizGenerated(Result<GeneratedQuiz, ApiError>),
    QuizFetched {
        id: HistoryId,
        result: Result<QuizDetail, ApiError>,
    },
}

/// Runs backend calls on a background tokio runtime.
///
/// Requests are fire-and-forget; results are polled with [`ClientHandle::try_recv`].
/// The worker thread exits once the handle is dropped.
pub struct ClientHandle {
    cmd_tx: mpsc::Sender<ClientCommand>,
    event_rx: mpsc::Receiver<ClientEvent>,
}

impl ClientHandle {
    pub fn new(api: Arc<dyn QuizApi>) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::Builder::new()
            .name("quiz-client".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let api = api.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        let event = handle_command(api.as_ref(), command).await;
                        let _ = event_tx.send(event);
                    });
                }
                quiz_debug!("client command channel closed");
            })?;

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn fetch_history(&self) {
        self.send(ClientCommand::FetchHistory);
    }

    pub fn generate_quiz(&self, url: impl Into<String>) {
        self.send(ClientCommand::GenerateQuiz { url: url.into() });
    }

    pub fn fetch_quiz(&self, id: impl Into<HistoryId>) {
        self.send(ClientCommand::FetchQuiz { id: id.into() });
    }

    pub fn try_recv(&self) -> Option<ClientEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<ClientEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    fn send(&self, command: ClientCommand) {
        let _ = self.cmd_tx.send(command);
    }
}

async fn handle_command(api: &dyn QuizApi, command: ClientCommand) -> ClientEvent {
    match command {
        ClientCommand::FetchHistory => ClientEvent::HistoryFetched(api.history().await),
        ClientCommand::GenerateQuiz { url } => {
            ClientEvent::QuizGenerated(api.generate_quiz(&url).await)
        }
        ClientCommand::FetchQuiz { id } => {
            let result = api.quiz(&id).await;
            ClientEvent::QuizFetched { id, result }
        }
    }
}
