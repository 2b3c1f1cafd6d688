use std::io::IsTerminal;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info};

use crate::error::{DictionaryError, ParseError};
use crate::trie::Trie;

const HELP: &str = "\
Commands:
  add <word> <meaning>      (1) Add a word with its meaning
  delete <word>             (2) Delete a word
  search <word>             (3) Search a word
  update <word> <meaning>   (4) Update a word
  suggest [prefix]          List up to 10 words starting with prefix
  count                     Number of stored words
  help                      Show this message
  quit                      Exit";

/// A single line of shell input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add { word: String, meaning: String },
    Delete { word: String },
    Search { word: String },
    Update { word: String, meaning: String },
    Suggest { prefix: String },
    Count,
    Help,
    Quit,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Continue(String),
    Quit,
}

pub fn parse_command(line: &str) -> Result<Command, ParseError> {
    let mut tokens = line.split_whitespace();
    let keyword = tokens.next().unwrap_or_default().to_ascii_lowercase();
    let args: Vec<&str> = tokens.collect();

    let command = match (keyword.as_str(), args.as_slice()) {
        ("add" | "1", [word, meaning]) => Command::Add {
            word: word.to_string(),
            meaning: meaning.to_string(),
        },
        ("add" | "1", _) => return Err(ParseError::Usage("add <word> <meaning>")),
        ("delete" | "2", [word]) => Command::Delete {
            word: word.to_string(),
        },
        ("delete" | "2", _) => return Err(ParseError::Usage("delete <word>")),
        ("search" | "3", [word]) => Command::Search {
            word: word.to_string(),
        },
        ("search" | "3", _) => return Err(ParseError::Usage("search <word>")),
        ("update" | "4", [word, meaning]) => Command::Update {
            word: word.to_string(),
            meaning: meaning.to_string(),
        },
        ("update" | "4", _) => return Err(ParseError::Usage("update <word> <meaning>")),
        ("suggest", []) => Command::Suggest {
            prefix: String::new(),
        },
        ("suggest", [prefix]) => Command::Suggest {
            prefix: prefix.to_string(),
        },
        ("suggest", _) => return Err(ParseError::Usage("suggest [prefix]")),
        ("count", _) => Command::Count,
        ("help" | "?", _) => Command::Help,
        ("quit" | "exit", _) => Command::Quit,
        (other, _) => return Err(ParseError::UnknownCommand(other.to_string())),
    };

    Ok(command)
}

/// Runs `command` against `trie` and renders the reply shown to the user.
pub fn execute(trie: &mut Trie, command: Command) -> Outcome {
    let reply = match command {
        Command::Add { word, meaning } => match trie.insert(&word, &meaning) {
            Ok(_) => "Word added successfully!".to_string(),
            Err(e) => describe(&e).to_string(),
        },
        Command::Delete { word } => match trie.delete(&word) {
            Ok(()) => "Word deleted successfully".to_string(),
            Err(e) => describe(&e).to_string(),
        },
        Command::Search { word } => match trie.search(&word) {
            Ok(meaning) => format!("Meaning: {}", meaning),
            Err(e) => describe(&e).to_string(),
        },
        Command::Update { word, meaning } => match trie.update(&word, &meaning) {
            Ok(()) => "Word updated successfully!".to_string(),
            Err(e) => describe(&e).to_string(),
        },
        Command::Suggest { prefix } => match trie.suggest(&prefix) {
            Ok(suggestions) => render_suggestions(&suggestions),
            Err(e) => describe(&e).to_string(),
        },
        Command::Count => format!("Words stored: {}", trie.len()),
        Command::Help => HELP.to_string(),
        Command::Quit => return Outcome::Quit,
    };

    Outcome::Continue(reply)
}

fn describe(err: &DictionaryError) -> &'static str {
    match err {
        DictionaryError::NotFound(_) => "Word not found",
        DictionaryError::InvalidMeaning(_) | DictionaryError::EmptyMeaning => "Invalid meaning",
        DictionaryError::InvalidWord(_) | DictionaryError::EmptyWord => "Invalid word",
        DictionaryError::WordTooLong(_) => "Word is too long",
    }
}

fn render_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        return "No suggestions".to_string();
    }

    let mut out = String::from("Suggestions:");
    for suggestion in suggestions {
        out.push('\n');
        out.push_str(suggestion);
    }
    out
}

/// Reads commands from stdin until `quit` or end of input.
pub async fn run(trie: &mut Trie) -> anyhow::Result<()> {
    let interactive = std::io::stdin().is_terminal();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    if interactive {
        println!("{}", HELP);
    }

    loop {
        if interactive {
            stdout.write_all(b"> ").await?;
            stdout.flush().await?;
        }

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match parse_command(line) {
            Ok(command) => {
                debug!("Executing command: {:?}", command);
                match execute(trie, command) {
                    Outcome::Continue(reply) => println!("{}", reply),
                    Outcome::Quit => break,
                }
            }
            Err(e) => println!("{}", e),
        }
    }

    info!("Shell exited with {} words stored", trie.len());
    Ok(())
}
