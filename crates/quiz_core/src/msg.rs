use crate::{ErrorValue, GeneratedQuiz, HistoryEntry, HistoryId, QuizDetail};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The view was shown for the first time.
    Started,
    /// User edited the URL input box.
    InputChanged(String),
    /// User pressed Enter / Send.
    InputSubmitted,
    /// Backend answered a generation request.
    QuizGenerated(Result<GeneratedQuiz, ErrorValue>),
    /// Backend answered a history listing request.
    HistoryLoaded(Result<Vec<HistoryEntry>, ErrorValue>),
    /// User picked an entry in the history panel.
    HistorySelected { id: HistoryId },
    /// Backend answered a detail request for a history entry.
    HistoryItemLoaded {
        id: HistoryId,
        result: Result<QuizDetail, ErrorValue>,
    },
    /// User dismissed the error line.
    ErrorDismissed,
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
