use dictionary::Dictionary;
use tracing_subscriber::EnvFilter;

use crate::process::ProcessError;
use crate::storage::Storage;
use crate::utilities::input;

mod model;
mod parser;
mod process;
mod storage;
mod utilities;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();
    let storage = Storage::initialize().await?;

    let dict = Dictionary::new();
    loop {
        let line = input(">> ")?;
        let line = line.trim();
        let mut command_parts = line.split_ascii_whitespace();
        if let Some(command) = command_parts.next() {
            let word = command_parts.collect::<Vec<&str>>().join(" ");
            match command {
                "exit" | "leave" | "quit" | "e" | "q" | "l" => {
                    break;
                }
                "add" | "get" => {
                    add_word(&dict, &storage, &word).await;
                }
                "show" => {
                    show_word(&storage, &word).await?;
                }
                "remove" => {
                    remove_word(&storage, &word).await?;
                }
                _ => {
                    println!("Unknown command {command}.");
                }
            }
        }
    }
    Ok(())
}

async fn add_word(dict: &Dictionary, storage: &Storage, word: &str) {
    match process::process(dict, storage, word).await {
        Ok(stored) => {
            println!("Word: {} added successfully", stored.word);
        }
        Err(error @ ProcessError::NotFound(_)) => {
            println!("{error}");
        }
        Err(error) => {
            tracing::error!(%error, "failed to process the word");
            eprintln!("Failed to add the word: {error}");
        }
    }
}

async fn show_word(storage: &Storage, word: &str) -> anyhow::Result<()> {
    match storage.find_word(word).await? {
        Some(stored) => {
            println!("{}", serde_json::to_string_pretty(&stored)?);
        }
        None => {
            println!("This word is not saved.");
        }
    }
    Ok(())
}

async fn remove_word(storage: &Storage, word: &str) -> anyhow::Result<()> {
    if storage.remove_word(word).await? {
        println!("Deleted the word successfully.");
    } else {
        println!("This word is not saved.");
    }
    Ok(())
}
