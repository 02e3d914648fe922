use dictionary::Entry;

use crate::model::{NewDefinition, NewMeaning, NewPhonetic, NewWord, PhoneticRef, Word};
use crate::process::ProcessError;
use crate::storage::Storage;

/// Outcome of mapping a lookup response onto the entity model: either the
/// word was already stored, or a fresh graph ready to be committed.
#[derive(Debug)]
pub enum Parsed {
    Existing(Word),
    New(NewWord),
}

/// Maps a lookup response onto the entity model, deduplicating phonetic
/// transcriptions against storage and within the response itself. Builds the
/// graph without committing anything, so a malformed entry anywhere in the
/// response leaves storage untouched.
pub async fn parse_word(storage: &Storage, entries: &[Entry]) -> Result<Parsed, ProcessError> {
    let first = entries
        .first()
        .ok_or_else(|| ProcessError::Malformed("response contains no entries".to_string()))?;
    let key = first
        .word
        .as_deref()
        .ok_or_else(|| ProcessError::Malformed("entry is missing the word field".to_string()))?;
    if let Some(existing) = storage.find_word(key).await? {
        tracing::debug!(word = %existing.word, "word is already stored");
        return Ok(Parsed::Existing(existing));
    }
    let mut new_word = NewWord {
        word: key.to_string(),
        phonetic: first.phonetic.clone().unwrap_or_default(),
        phonetics: Vec::new(),
        meanings: Vec::new(),
    };
    for entry in entries {
        let phonetics = entry.phonetics.as_ref().ok_or_else(|| {
            ProcessError::Malformed("entry is missing the phonetics field".to_string())
        })?;
        for phonetic in phonetics {
            let text = phonetic.text.as_deref().ok_or_else(|| {
                ProcessError::Malformed("phonetic entry is missing the text field".to_string())
            })?;
            // the same transcription may appear several times within one
            // response, keep a single reference
            if new_word.phonetics.iter().any(|known| known.text() == text) {
                continue;
            }
            let reference = match storage.find_phonetic(text).await? {
                Some(existing) => PhoneticRef::Existing(existing),
                None => PhoneticRef::New(NewPhonetic {
                    phonetic: text.to_string(),
                    audio_url: phonetic.audio.clone(),
                }),
            };
            new_word.phonetics.push(reference);
        }
        let meanings = entry.meanings.as_ref().ok_or_else(|| {
            ProcessError::Malformed("entry is missing the meanings field".to_string())
        })?;
        for meaning in meanings {
            let part_of_speech = meaning.part_of_speech.as_deref().ok_or_else(|| {
                ProcessError::Malformed("meaning is missing the partOfSpeech field".to_string())
            })?;
            let definitions = meaning.definitions.as_ref().ok_or_else(|| {
                ProcessError::Malformed("meaning is missing the definitions field".to_string())
            })?;
            let mut new_meaning = NewMeaning {
                part_of_speech: part_of_speech.to_string(),
                synonyms: meaning.synonyms.clone(),
                antonyms: meaning.antonyms.clone(),
                definitions: Vec::with_capacity(definitions.len()),
            };
            for definition in definitions {
                let text = definition.definition.as_deref().ok_or_else(|| {
                    ProcessError::Malformed(
                        "definition entry is missing the definition field".to_string(),
                    )
                })?;
                new_meaning.definitions.push(NewDefinition {
                    definition: text.to_string(),
                    example: definition.example.clone(),
                    synonyms: definition.synonyms.clone(),
                    antonyms: definition.antonyms.clone(),
                });
            }
            new_word.meanings.push(new_meaning);
        }
    }
    Ok(Parsed::New(new_word))
}
