//! Turns backend quiz payloads into chat message text.

use crate::{GeneratedQuiz, QuizDetail, QuizQuestion};

const OPTION_SEPARATOR: &str = " | ";

/// Text for the assistant message that answers a generation request.
pub fn format_generated_quiz(quiz: &GeneratedQuiz) -> String {
    let mut text = String::new();
    if let Some(title) = quiz.title.as_deref().filter(|t| !t.is_empty()) {
        text.push_str(&format!("Title: {title}\n\n"));
    }
    if quiz.quiz.is_empty() {
        text.push_str("No quiz returned.");
        return text;
    }
    let blocks: Vec<String> = quiz
        .quiz
        .iter()
        .enumerate()
        .map(|(idx, q)| {
            format!(
                "{}Explanation: {}\n",
                question_block(idx, q),
                q.explanation.as_deref().unwrap_or_default()
            )
        })
        .collect();
    text.push_str(&blocks.join("\n"));
    text
}

/// Intro message shown before a stored quiz, if the entry kept its article text.
pub fn format_history_intro(detail: &QuizDetail) -> Option<String> {
    detail
        .full_text
        .as_deref()
        .filter(|text| !text.is_empty())
        .map(|text| format!("Extracted article text:\n\n{text}"))
}

/// Quiz text for a stored history entry. Explanations are not shown here.
pub fn format_history_quiz(detail: &QuizDetail) -> String {
    match detail.quiz.as_deref() {
        Some(questions) if !questions.is_empty() => questions
            .iter()
            .enumerate()
            .map(|(idx, q)| question_block(idx, q))
            .collect::<Vec<_>>()
            .join("\n"),
        _ => "No quiz".to_string(),
    }
}

fn question_block(idx: usize, q: &QuizQuestion) -> String {
    format!(
        "{}. {}\nOptions: {}\nAnswer: {}\n",
        idx + 1,
        q.question,
        q.options.join(OPTION_SEPARATOR),
        q.answer
    )
}
