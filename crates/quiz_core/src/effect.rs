use crate::HistoryId;

/// Side effects requested by [`crate::update`]; executed by the app's effect runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchHistory,
    GenerateQuiz { url: String },
    FetchQuiz { id: HistoryId },
}
