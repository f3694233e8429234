use serde::{Deserialize, Serialize};
use std::fmt;

/// Explanation used when the source record does not carry one.
pub const DEFAULT_EXPLANATION: &str = "No explanation provided.";

//
// ─── RAW RECORD ────────────────────────────────────────────────────────────────
//

/// Raw question shape supplied by a question source.
///
/// Text is expected to be already decoded of markup entities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub question: String,
    pub correct_answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl QuestionRecord {
    #[must_use]
    pub fn new(question: impl Into<String>, correct_answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            correct_answer: correct_answer.into(),
            explanation: None,
        }
    }

    #[must_use]
    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(explanation.into());
        self
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A single true/false quiz item. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    text: String,
    correct_answer: String,
    explanation: String,
}

impl Question {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        correct_answer: impl Into<String>,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            correct_answer: correct_answer.into(),
            explanation: explanation.into(),
        }
    }

    /// Prompt shown to the player.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Either `"True"` or `"False"`, compared case-sensitively.
    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }
}

impl From<QuestionRecord> for Question {
    fn from(record: QuestionRecord) -> Self {
        let explanation = record
            .explanation
            .unwrap_or_else(|| DEFAULT_EXPLANATION.to_string());
        Self::new(record.question, record.correct_answer, explanation)
    }
}

//
// ─── ANSWER ────────────────────────────────────────────────────────────────────
//

/// The two answers a player can give.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Answer {
    True,
    False,
}

impl Answer {
    /// Exact literal compared against `Question::correct_answer`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Answer::True => "True",
            Answer::False => "False",
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
