//! Data returned by the quiz backend.
//!
//! Only the fields the client displays are modelled; anything else in a
//! response is ignored during deserialization.

use std::fmt;

use serde::{Deserialize, Serialize};

pub type HistoryId = String;

/// One question of a generated quiz.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
}

/// Response of `POST /generate_quiz`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GeneratedQuiz {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub quiz: Vec<QuizQuestion>,
}

/// Summary row of `GET /history`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: HistoryId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub date_generated: Option<String>,
}

/// Response of `GET /quiz/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QuizDetail {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, alias = "fullText")]
    pub full_text: Option<String>,
    #[serde(default)]
    pub quiz: Option<Vec<QuizQuestion>>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<QuizQuestion>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<QuizQuestion>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Opaque failure value shown to the user as-is.
///
/// The backend's error shape is undocumented, so the body is kept as raw JSON
/// and only ever serialized back for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorValue(serde_json::Value);

impl ErrorValue {
    pub fn from_body(body: serde_json::Value) -> Self {
        Self(body)
    }

    pub fn from_message(message: impl Into<String>) -> Self {
        Self(serde_json::Value::String(message.into()))
    }

    pub fn as_json(&self) -> &serde_json::Value {
        &self.0
    }
}

impl fmt::Display for ErrorValue {
    /// Compact JSON, so plain messages render quoted.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
