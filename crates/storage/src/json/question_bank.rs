use std::borrow::Cow;
use std::fs;
use std::path::PathBuf;

use trivia_core::model::QuestionRecord;

use crate::repository::{QuestionSource, StorageError};

#[derive(Debug, Clone)]
enum BankSource {
    File(PathBuf),
    Embedded(&'static str),
}

/// Question records stored as a JSON array, either on disk or compiled in.
#[derive(Debug, Clone)]
pub struct JsonQuestionBank {
    source: BankSource,
}

impl JsonQuestionBank {
    /// Read records from the file at `path` on every call to `records`.
    #[must_use]
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            source: BankSource::File(path.into()),
        }
    }

    /// Read records from a string baked into the binary.
    #[must_use]
    pub fn embedded(json: &'static str) -> Self {
        Self {
            source: BankSource::Embedded(json),
        }
    }
}

impl QuestionSource for JsonQuestionBank {
    fn records(&self) -> Result<Vec<QuestionRecord>, StorageError> {
        let json: Cow<'_, str> = match &self.source {
            BankSource::File(path) => Cow::Owned(fs::read_to_string(path)?),
            BankSource::Embedded(json) => Cow::Borrowed(*json),
        };
        serde_json::from_str(&json).map_err(|err| StorageError::Serialization(err.to_string()))
    }
}
