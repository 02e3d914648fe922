use std::str::FromStr;

use sqlx::migrate::MigrateDatabase;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::types::Json;
use sqlx::{query, query_as, FromRow, Pool, Sqlite};

use crate::model::{Definition, Meaning, NewWord, Phonetic, PhoneticRef, Word};

const DB_URL: &str = "sqlite://sqlite.db";

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS words(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        word VARCHAR(45) NOT NULL UNIQUE CHECK(length(word) <= 45),
        phonetic TEXT NOT NULL
    );",
    "CREATE TABLE IF NOT EXISTS phonetics(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        phonetic TEXT NOT NULL UNIQUE,
        audio_url TEXT
    );",
    "CREATE TABLE IF NOT EXISTS word_phonetic_association(
        word_id INTEGER NOT NULL REFERENCES words(id) ON DELETE CASCADE,
        phonetic_id INTEGER NOT NULL REFERENCES phonetics(id) ON DELETE CASCADE
    );",
    "CREATE TABLE IF NOT EXISTS meanings(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        word_id INTEGER NOT NULL REFERENCES words(id) ON DELETE CASCADE,
        part_of_speech VARCHAR(30) NOT NULL,
        synonyms TEXT,
        antonyms TEXT
    );",
    "CREATE TABLE IF NOT EXISTS definitions(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        meaning_id INTEGER NOT NULL REFERENCES meanings(id) ON DELETE CASCADE,
        definition TEXT NOT NULL,
        example TEXT,
        synonyms TEXT,
        antonyms TEXT
    );",
];

#[derive(FromRow)]
struct WordRow {
    id: i64,
    word: String,
    phonetic: String,
}

#[derive(FromRow)]
struct PhoneticRow {
    id: i64,
    phonetic: String,
    audio_url: Option<String>,
}

#[derive(FromRow)]
struct MeaningRow {
    id: i64,
    part_of_speech: String,
    synonyms: Option<Json<Vec<String>>>,
    antonyms: Option<Json<Vec<String>>>,
}

#[derive(FromRow)]
struct DefinitionRow {
    id: i64,
    definition: String,
    example: Option<String>,
    synonyms: Option<Json<Vec<String>>>,
    antonyms: Option<Json<Vec<String>>>,
}

pub struct Storage {
    pool: Pool<Sqlite>,
}

impl Storage {
    pub async fn initialize() -> sqlx::Result<Self> {
        if !Sqlite::database_exists(DB_URL).await.unwrap_or(false) {
            Sqlite::create_database(DB_URL).await?;
        }
        Self::connect(DB_URL).await
    }

    pub async fn connect(url: &str) -> sqlx::Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?.foreign_keys(true);
        // a single connection keeps writes serialized and in-memory
        // databases stable across acquires
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;
        for statement in SCHEMA {
            query(statement).execute(&pool).await?;
        }
        Ok(Self { pool })
    }
}

impl Storage {
    pub async fn find_word(&self, word: &str) -> sqlx::Result<Option<Word>> {
        let row: Option<WordRow> =
            query_as("SELECT id, word, phonetic FROM words WHERE word = ?")
                .bind(word)
                .fetch_optional(&self.pool)
                .await?;
        match row {
            Some(row) => Ok(Some(self.load_word(row).await?)),
            None => Ok(None),
        }
    }

    pub async fn find_phonetic(&self, text: &str) -> sqlx::Result<Option<Phonetic>> {
        let row: Option<PhoneticRow> =
            query_as("SELECT id, phonetic, audio_url FROM phonetics WHERE phonetic = ?")
                .bind(text)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(|row| Phonetic::new(row.id, row.phonetic, row.audio_url)))
    }

    /// Persists a parsed word graph in one transaction. Referenced existing
    /// phonetic rows only gain an association, new ones are inserted. On any
    /// failure the transaction rolls back and nothing of the graph remains.
    pub async fn insert_word(&self, new_word: NewWord) -> sqlx::Result<Word> {
        let mut tx = self.pool.begin().await?;
        let word_id = query("INSERT INTO words(word, phonetic) VALUES(?, ?)")
            .bind(&new_word.word)
            .bind(&new_word.phonetic)
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();
        let mut phonetics = Vec::with_capacity(new_word.phonetics.len());
        for phonetic in new_word.phonetics {
            let stored = match phonetic {
                PhoneticRef::Existing(existing) => existing,
                PhoneticRef::New(new) => {
                    let id = query("INSERT INTO phonetics(phonetic, audio_url) VALUES(?, ?)")
                        .bind(&new.phonetic)
                        .bind(&new.audio_url)
                        .execute(&mut *tx)
                        .await?
                        .last_insert_rowid();
                    Phonetic::new(id, new.phonetic, new.audio_url)
                }
            };
            query("INSERT INTO word_phonetic_association(word_id, phonetic_id) VALUES(?, ?)")
                .bind(word_id)
                .bind(stored.id)
                .execute(&mut *tx)
                .await?;
            phonetics.push(stored);
        }
        let mut meanings = Vec::with_capacity(new_word.meanings.len());
        for meaning in new_word.meanings {
            let meaning_id = query(
                "INSERT INTO meanings(word_id, part_of_speech, synonyms, antonyms) VALUES(?, ?, ?, ?)",
            )
            .bind(word_id)
            .bind(&meaning.part_of_speech)
            .bind(meaning.synonyms.as_ref().map(Json))
            .bind(meaning.antonyms.as_ref().map(Json))
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();
            let mut definitions = Vec::with_capacity(meaning.definitions.len());
            for definition in meaning.definitions {
                let id = query(
                    "INSERT INTO definitions(meaning_id, definition, example, synonyms, antonyms) VALUES(?, ?, ?, ?, ?)",
                )
                .bind(meaning_id)
                .bind(&definition.definition)
                .bind(&definition.example)
                .bind(definition.synonyms.as_ref().map(Json))
                .bind(definition.antonyms.as_ref().map(Json))
                .execute(&mut *tx)
                .await?
                .last_insert_rowid();
                definitions.push(Definition::new(
                    id,
                    definition.definition,
                    definition.example,
                    definition.synonyms,
                    definition.antonyms,
                ));
            }
            meanings.push(Meaning::new(
                meaning_id,
                meaning.part_of_speech,
                meaning.synonyms,
                meaning.antonyms,
                definitions,
            ));
        }
        tx.commit().await?;
        Ok(Word::new(
            word_id,
            new_word.word,
            new_word.phonetic,
            phonetics,
            meanings,
        ))
    }

    /// Attempt to remove a word, returns true if the word was removed.
    /// Owned meanings and definitions cascade; shared phonetic rows stay.
    pub async fn remove_word(&self, word: &str) -> sqlx::Result<bool> {
        let result = query("DELETE FROM words WHERE word = ?")
            .bind(word)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn load_word(&self, row: WordRow) -> sqlx::Result<Word> {
        let phonetic_rows: Vec<PhoneticRow> = query_as(
            "SELECT p.id, p.phonetic, p.audio_url FROM phonetics p \
             JOIN word_phonetic_association a ON a.phonetic_id = p.id \
             WHERE a.word_id = ? ORDER BY a.rowid",
        )
        .bind(row.id)
        .fetch_all(&self.pool)
        .await?;
        let meaning_rows: Vec<MeaningRow> = query_as(
            "SELECT id, part_of_speech, synonyms, antonyms FROM meanings \
             WHERE word_id = ? ORDER BY id",
        )
        .bind(row.id)
        .fetch_all(&self.pool)
        .await?;
        let mut meanings = Vec::with_capacity(meaning_rows.len());
        for meaning in meaning_rows {
            let definition_rows: Vec<DefinitionRow> = query_as(
                "SELECT id, definition, example, synonyms, antonyms FROM definitions \
                 WHERE meaning_id = ? ORDER BY id",
            )
            .bind(meaning.id)
            .fetch_all(&self.pool)
            .await?;
            let definitions = definition_rows
                .into_iter()
                .map(|definition| {
                    Definition::new(
                        definition.id,
                        definition.definition,
                        definition.example,
                        definition.synonyms.map(|Json(list)| list),
                        definition.antonyms.map(|Json(list)| list),
                    )
                })
                .collect();
            meanings.push(Meaning::new(
                meaning.id,
                meaning.part_of_speech,
                meaning.synonyms.map(|Json(list)| list),
                meaning.antonyms.map(|Json(list)| list),
                definitions,
            ));
        }
        let phonetics = phonetic_rows
            .into_iter()
            .map(|phonetic| Phonetic::new(phonetic.id, phonetic.phonetic, phonetic.audio_url))
            .collect();
        Ok(Word::new(row.id, row.word, row.phonetic, phonetics, meanings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NewDefinition, NewMeaning, NewPhonetic};

    async fn storage() -> Storage {
        Storage::connect("sqlite::memory:").await.unwrap()
    }

    fn hello() -> NewWord {
        NewWord {
            word: "hello".to_string(),
            phonetic: "/həˈloʊ/".to_string(),
            phonetics: vec![
                PhoneticRef::New(NewPhonetic {
                    phonetic: "/həˈloʊ/".to_string(),
                    audio_url: Some("https://example.com/hello.mp3".to_string()),
                }),
                PhoneticRef::New(NewPhonetic {
                    phonetic: "/hɛˈloʊ/".to_string(),
                    audio_url: None,
                }),
            ],
            meanings: vec![
                NewMeaning {
                    part_of_speech: "exclamation".to_string(),
                    synonyms: Some(vec!["hi".to_string(), "hey".to_string()]),
                    antonyms: None,
                    definitions: vec![
                        NewDefinition {
                            definition: "Used as a greeting.".to_string(),
                            example: Some("Hello there.".to_string()),
                            synonyms: None,
                            antonyms: None,
                        },
                        NewDefinition {
                            definition: "Used to attract attention.".to_string(),
                            example: None,
                            synonyms: None,
                            antonyms: None,
                        },
                    ],
                },
                NewMeaning {
                    part_of_speech: "noun".to_string(),
                    synonyms: None,
                    antonyms: None,
                    definitions: vec![NewDefinition {
                        definition: "An utterance of \"hello\".".to_string(),
                        example: None,
                        synonyms: None,
                        antonyms: None,
                    }],
                },
            ],
        }
    }

    #[tokio::test]
    async fn inserted_word_reads_back_equal() {
        let storage = storage().await;
        let stored = storage.insert_word(hello()).await.unwrap();
        assert_eq!(stored.word, "hello");
        assert_eq!(stored.phonetics.len(), 2);
        assert_eq!(stored.meanings.len(), 2);
        assert_eq!(stored.meanings[0].definitions.len(), 2);
        let found = storage.find_word("hello").await.unwrap().unwrap();
        assert_eq!(found, stored);
    }

    #[tokio::test]
    async fn find_phonetic_looks_up_by_transcription() {
        let storage = storage().await;
        let stored = storage.insert_word(hello()).await.unwrap();
        let phonetic = storage.find_phonetic("/hɛˈloʊ/").await.unwrap().unwrap();
        assert_eq!(phonetic, stored.phonetics[1]);
        assert!(storage.find_phonetic("/zzz/").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_word_key_is_rejected() {
        let storage = storage().await;
        storage.insert_word(hello()).await.unwrap();
        let mut again = hello();
        // fresh transcriptions so only the word key collides
        again.phonetics = vec![];
        let error = storage.insert_word(again).await.unwrap_err();
        assert!(matches!(error, sqlx::Error::Database(_)));
    }

    #[tokio::test]
    async fn failed_insert_leaves_no_partial_graph() {
        let storage = storage().await;
        let mut word = hello();
        word.phonetics.push(PhoneticRef::Existing(Phonetic::new(
            999,
            "/ghost/".to_string(),
            None,
        )));
        assert!(storage.insert_word(word).await.is_err());
        assert!(storage.find_word("hello").await.unwrap().is_none());
        assert!(storage.find_phonetic("/həˈloʊ/").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn remove_word_cascades_but_keeps_phonetics() {
        let storage = storage().await;
        storage.insert_word(hello()).await.unwrap();
        assert!(storage.remove_word("hello").await.unwrap());
        assert!(storage.find_word("hello").await.unwrap().is_none());
        // the transcription stays available for other words
        assert!(storage.find_phonetic("/həˈloʊ/").await.unwrap().is_some());
        assert!(!storage.remove_word("hello").await.unwrap());
    }
}
