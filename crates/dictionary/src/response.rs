use serde::Deserialize;

/// One record of a dictionary lookup response, bundling the phonetics and
/// meanings for a single sense-cluster of a word.
///
/// Every field is optional at this layer: the API omits fields freely and
/// deciding which ones are actually required is the parser's job, not the
/// transport's.
#[derive(Debug, Clone, Deserialize)]
pub struct Entry {
    pub word: Option<String>,
    pub phonetic: Option<String>,
    pub phonetics: Option<Vec<PhoneticEntry>>,
    pub meanings: Option<Vec<MeaningEntry>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhoneticEntry {
    pub text: Option<String>,
    pub audio: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MeaningEntry {
    #[serde(rename = "partOfSpeech")]
    pub part_of_speech: Option<String>,
    pub synonyms: Option<Vec<String>>,
    pub antonyms: Option<Vec<String>>,
    pub definitions: Option<Vec<DefinitionEntry>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DefinitionEntry {
    pub definition: Option<String>,
    pub example: Option<String>,
    pub synonyms: Option<Vec<String>>,
    pub antonyms: Option<Vec<String>>,
}
