use crate::{DictionaryError, Entry};

const DICTIONARY_API_URL: &'static str = "https://api.dictionaryapi.dev/api/v2/entries/en";

/// Looks a word up in the free dictionary API. A 404 means the word has no
/// data and maps to `None`; any other unsuccessful status is a fetch error.
pub(crate) async fn lookup(
    client: &reqwest::Client,
    word: &str,
) -> Result<Option<Vec<Entry>>, DictionaryError> {
    let res = client
        .get(format!("{DICTIONARY_API_URL}/{word}"))
        .send()
        .await
        .map_err(DictionaryError::Fetch)?;
    if res.status() == reqwest::StatusCode::NOT_FOUND {
        return Ok(None);
    }
    let res = res.error_for_status().map_err(DictionaryError::Fetch)?;
    res.json::<Vec<Entry>>()
        .await
        .map(Some)
        .map_err(DictionaryError::Deserialize)
}
