use serde::Serialize;

/// A stored dictionary word with its full entity graph. Serializes to the
/// nested payload handed to whatever front end asked for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Word {
    pub id: i64,
    /// Unique lexical key. The longest word in the english dictionary is 45
    /// characters, the storage schema enforces that bound.
    pub word: String,
    /// The primary phonetic representation, may be empty.
    pub phonetic: String,
    pub phonetics: Vec<Phonetic>,
    pub meanings: Vec<Meaning>,
}

impl Word {
    pub fn new(
        id: i64,
        word: String,
        phonetic: String,
        phonetics: Vec<Phonetic>,
        meanings: Vec<Meaning>,
    ) -> Self {
        Self {
            id,
            word,
            phonetic,
            phonetics,
            meanings,
        }
    }
}

/// A phonetic transcription. Homophones share a single row, so this is
/// many-to-many with [`Word`] through an association table rather than
/// owned by any one word.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Phonetic {
    pub id: i64,
    pub phonetic: String,
    pub audio_url: Option<String>,
}

impl Phonetic {
    pub fn new(id: i64, phonetic: String, audio_url: Option<String>) -> Self {
        Self {
            id,
            phonetic,
            audio_url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Meaning {
    pub id: i64,
    #[serde(rename = "partOfSpeech")]
    pub part_of_speech: String,
    // synonyms and antonyms are opaque string lists, not references to other
    // stored words
    pub synonyms: Option<Vec<String>>,
    pub antonyms: Option<Vec<String>>,
    pub definitions: Vec<Definition>,
}

impl Meaning {
    pub fn new(
        id: i64,
        part_of_speech: String,
        synonyms: Option<Vec<String>>,
        antonyms: Option<Vec<String>>,
        definitions: Vec<Definition>,
    ) -> Self {
        Self {
            id,
            part_of_speech,
            synonyms,
            antonyms,
            definitions,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Definition {
    pub id: i64,
    pub definition: String,
    pub example: Option<String>,
    pub synonyms: Option<Vec<String>>,
    pub antonyms: Option<Vec<String>>,
}

impl Definition {
    pub fn new(
        id: i64,
        definition: String,
        example: Option<String>,
        synonyms: Option<Vec<String>>,
        antonyms: Option<Vec<String>>,
    ) -> Self {
        Self {
            id,
            definition,
            example,
            synonyms,
            antonyms,
        }
    }
}

/// A parsed word graph that has not been committed yet. Ids are assigned by
/// the storage layer when the whole graph is persisted in one transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct NewWord {
    pub word: String,
    pub phonetic: String,
    pub phonetics: Vec<PhoneticRef>,
    pub meanings: Vec<NewMeaning>,
}

/// Either a stored phonetic row being reused for a new word (homophone) or
/// a transcription seen for the first time.
#[derive(Debug, Clone, PartialEq)]
pub enum PhoneticRef {
    Existing(Phonetic),
    New(NewPhonetic),
}

impl PhoneticRef {
    pub fn text(&self) -> &str {
        match self {
            PhoneticRef::Existing(phonetic) => &phonetic.phonetic,
            PhoneticRef::New(phonetic) => &phonetic.phonetic,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPhonetic {
    pub phonetic: String,
    pub audio_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewMeaning {
    pub part_of_speech: String,
    pub synonyms: Option<Vec<String>>,
    pub antonyms: Option<Vec<String>>,
    pub definitions: Vec<NewDefinition>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewDefinition {
    pub definition: String,
    pub example: Option<String>,
    pub synonyms: Option<Vec<String>>,
    pub antonyms: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn word_serializes_to_the_nested_payload_shape() {
        let word = Word::new(
            1,
            "hello".to_string(),
            "/həˈloʊ/".to_string(),
            vec![Phonetic::new(
                7,
                "/həˈloʊ/".to_string(),
                Some("https://example.com/hello.mp3".to_string()),
            )],
            vec![Meaning::new(
                3,
                "exclamation".to_string(),
                Some(vec!["hi".to_string()]),
                None,
                vec![Definition::new(
                    4,
                    "Used as a greeting.".to_string(),
                    Some("Hello there.".to_string()),
                    None,
                    None,
                )],
            )],
        );
        let value = serde_json::to_value(&word).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 1,
                "word": "hello",
                "phonetic": "/həˈloʊ/",
                "phonetics": [
                    {"id": 7, "phonetic": "/həˈloʊ/", "audio_url": "https://example.com/hello.mp3"}
                ],
                "meanings": [{
                    "id": 3,
                    "partOfSpeech": "exclamation",
                    "synonyms": ["hi"],
                    "antonyms": null,
                    "definitions": [{
                        "id": 4,
                        "definition": "Used as a greeting.",
                        "example": "Hello there.",
                        "synonyms": null,
                        "antonyms": null
                    }]
                }]
            })
        );
    }
}
