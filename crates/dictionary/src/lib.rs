use std::fmt;

mod dictionary_api;
mod response;

pub use response::{DefinitionEntry, Entry, MeaningEntry, PhoneticEntry};

#[derive(Debug)]
pub enum DictionaryError {
    Fetch(reqwest::Error),
    Deserialize(reqwest::Error),
}

impl fmt::Display for DictionaryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DictionaryError::Fetch(error) => write!(f, "request failed: {error}"),
            DictionaryError::Deserialize(error) => {
                write!(f, "unexpected response body: {error}")
            }
        }
    }
}

impl std::error::Error for DictionaryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DictionaryError::Fetch(error) | DictionaryError::Deserialize(error) => Some(error),
        }
    }
}

pub struct Dictionary {
    client: reqwest::Client,
}

impl Dictionary {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Fetches the raw lookup response for a word. `None` means the API has
    /// no data for it.
    pub async fn lookup(&self, word: &str) -> Result<Option<Vec<Entry>>, DictionaryError> {
        dictionary_api::lookup(&self.client, word).await
    }
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::new()
    }
}
