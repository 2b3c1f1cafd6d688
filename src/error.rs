use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DictionaryError {
    #[error("invalid word: {:?}", .0)]
    InvalidWord(String),

    #[error("invalid meaning: {:?}", .0)]
    InvalidMeaning(String),

    #[error("word is {} letters long, the limit is {}", .0, crate::trie::MAX_WORD_LEN)]
    WordTooLong(usize),

    #[error("word must not be empty")]
    EmptyWord,

    #[error("meaning must not be empty")]
    EmptyMeaning,

    #[error("word not found: {}", .0)]
    NotFound(String),
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("unable to read dictionary file '{}': {}", path.display(), source)]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unable to read config file '{}': {}", path.display(), source)]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}", .0)]
    Parse(#[from] serde_json::Error),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid choice: {}", .0)]
    UnknownCommand(String),

    #[error("usage: {}", .0)]
    Usage(&'static str),
}
