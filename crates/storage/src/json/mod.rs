use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::repository::{LeaderboardRepository, Storage, StorageError};

mod leaderboard_repo;
mod question_bank;

pub use question_bank::JsonQuestionBank;

/// Leaderboard persisted as a single JSON document.
///
/// Every save rewrites the whole file. Nothing locks it, so two processes
/// writing at once lose one of the updates.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage {
    /// Build a `Storage` backed by a JSON file at `path`.
    #[must_use]
    pub fn json_file(path: impl Into<PathBuf>) -> Self {
        let leaderboard: Arc<dyn LeaderboardRepository> = Arc::new(JsonFileRepository::new(path));
        Self { leaderboard }
    }
}

/// Serialize with four-space indentation.
pub(crate) fn to_pretty_json<T: Serialize>(value: &T) -> Result<Vec<u8>, StorageError> {
    let mut out = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
    value
        .serialize(&mut ser)
        .map_err(|err| StorageError::Serialization(err.to_string()))?;
    Ok(out)
}
