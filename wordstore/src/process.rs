use async_trait::async_trait;
use dictionary::{Dictionary, DictionaryError, Entry};
use thiserror::Error;

use crate::model::Word;
use crate::parser::{parse_word, Parsed};
use crate::storage::Storage;

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("No data found for the given word: {0}")]
    NotFound(String),
    #[error("Malformed dictionary response: {0}")]
    Malformed(String),
    #[error("Dictionary lookup failed: {0}")]
    Fetch(DictionaryError),
    #[error("Failed to persist the word: {0}")]
    Storage(#[from] sqlx::Error),
}

/// The external lookup collaborator. `None` means the source has no data
/// for the word.
#[async_trait]
pub trait WordSource {
    async fn fetch(&self, word: &str) -> Result<Option<Vec<Entry>>, DictionaryError>;
}

#[async_trait]
impl WordSource for Dictionary {
    async fn fetch(&self, word: &str) -> Result<Option<Vec<Entry>>, DictionaryError> {
        self.lookup(word).await
    }
}

/// Fetches a word from the source, maps the response onto the entity model
/// and commits new words atomically. A word that is already stored is a
/// no-op success returning the stored record.
pub async fn process(
    source: &impl WordSource,
    storage: &Storage,
    word: &str,
) -> Result<Word, ProcessError> {
    let response = source.fetch(word).await.map_err(ProcessError::Fetch)?;
    let entries = match response {
        Some(entries) if !entries.is_empty() => entries,
        _ => return Err(ProcessError::NotFound(word.to_string())),
    };
    match parse_word(storage, &entries).await? {
        Parsed::Existing(existing) => {
            tracing::info!(word = %existing.word, "word already stored, nothing to do");
            Ok(existing)
        }
        Parsed::New(new_word) => {
            let stored = storage.insert_word(new_word).await?;
            tracing::info!(word = %stored.word, id = stored.id, "stored new word");
            Ok(stored)
        }
    }
}
