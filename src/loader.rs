use std::path::Path;

use tokio::{
    fs::File,
    io::{AsyncBufReadExt, BufReader},
};
use tracing::{debug, info, warn};

use crate::error::LoadError;
use crate::trie::{is_valid, Trie};

/// Line counts from a bulk load.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    pub inserted: usize,
    pub skipped: usize,
}

/// Inserts every `word meaning` line of `text` into `trie`.
pub fn load_str(trie: &mut Trie, text: &str) -> LoadReport {
    let mut report = LoadReport::default();
    for (number, line) in text.lines().enumerate() {
        load_line(trie, &mut report, number + 1, line.as_bytes());
    }
    report
}

/// Reads the dictionary file at `path` line by line, inserting as it goes.
///
/// A read error stops the load early; words inserted before it stay in `trie`.
pub async fn load_file(trie: &mut Trie, path: &Path) -> Result<LoadReport, LoadError> {
    let read_error = |source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).await.map_err(read_error)?;
    let mut lines = BufReader::new(file).split(b'\n');
    let mut report = LoadReport::default();
    let mut number = 0;

    while let Some(line) = lines.next_segment().await.map_err(|source| {
        warn!("Dictionary load interrupted after {} words", report.inserted);
        read_error(source)
    })? {
        number += 1;
        load_line(trie, &mut report, number, &line);
    }

    info!(
        "Loaded {} words from {} ({} lines skipped)",
        report.inserted,
        path.display(),
        report.skipped
    );
    Ok(report)
}

/// Lines that aren't UTF-8, don't hold exactly two whitespace-separated tokens, or whose
/// tokens aren't purely alphabetic are skipped.
fn load_line(trie: &mut Trie, report: &mut LoadReport, number: usize, line: &[u8]) {
    let Ok(line) = std::str::from_utf8(line) else {
        debug!("Skipping line {}: not valid UTF-8", number);
        report.skipped += 1;
        return;
    };

    let mut tokens = line.split_whitespace();
    let (word, meaning) = match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(word), Some(meaning), None) if is_valid(word) && is_valid(meaning) => {
            (word, meaning)
        }
        _ => {
            debug!("Skipping malformed line {}: {:?}", number, line);
            report.skipped += 1;
            return;
        }
    };

    match trie.insert(word, meaning) {
        Ok(replaced) => {
            if let Some(old) = replaced {
                debug!("Line {} replaces meaning of {}: {}", number, word, old);
            }
            report.inserted += 1;
        }
        Err(e) => {
            debug!("Skipping line {}: {}", number, e);
            report.skipped += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_str_skips_malformed_lines() {
        let mut trie = Trie::new();
        let text = "\
apple fruit
banana
cherry red extra
d0g animal

Eagle bird
fig tr33
";

        let report = load_str(&mut trie, text);

        assert_eq!(
            report,
            LoadReport {
                inserted: 2,
                skipped: 5
            }
        );
        assert_eq!(trie.search("apple"), Ok("fruit"));
        assert_eq!(trie.search("eagle"), Ok("bird"));
        assert!(trie.search("banana").is_err());
        assert!(trie.search("cherry").is_err());
        assert!(trie.search("fig").is_err());
        assert_eq!(trie.len(), 2);
    }

    #[test]
    fn test_load_str_later_lines_overwrite() {
        let mut trie = Trie::new();

        load_str(&mut trie, "bat animal\nbat club\n");

        assert_eq!(trie.search("bat"), Ok("club"));
        assert_eq!(trie.len(), 1);
    }

    #[tokio::test]
    async fn test_load_file() {
        let _ = tracing_subscriber::fmt::try_init();

        let path = std::env::temp_dir().join(format!("dictionary-{}.txt", std::process::id()));
        tokio::fs::write(&path, "moon satellite\nsun star\n")
            .await
            .unwrap();

        let mut trie = Trie::new();
        let report = load_file(&mut trie, &path).await.unwrap();
        tokio::fs::remove_file(&path).await.unwrap();

        assert_eq!(report.inserted, 2);
        assert_eq!(trie.suggest("").unwrap(), vec!["moon", "sun"]);
    }

    #[tokio::test]
    async fn test_load_file_skips_non_utf8_line() {
        let path = std::env::temp_dir()
            .join(format!("dictionary-latin1-{}.txt", std::process::id()));
        tokio::fs::write(&path, b"apple fruit\ncaf\xe9 drink\nmoon satellite\n")
            .await
            .unwrap();

        let mut trie = Trie::new();
        let report = load_file(&mut trie, &path).await.unwrap();
        tokio::fs::remove_file(&path).await.unwrap();

        assert_eq!(
            report,
            LoadReport {
                inserted: 2,
                skipped: 1
            }
        );
        assert_eq!(trie.search("apple"), Ok("fruit"));
        assert_eq!(trie.search("moon"), Ok("satellite"));
    }

    #[tokio::test]
    async fn test_load_file_crlf_and_no_trailing_newline() {
        let path = std::env::temp_dir()
            .join(format!("dictionary-crlf-{}.txt", std::process::id()));
        tokio::fs::write(&path, "sun star\r\nrain water").await.unwrap();

        let mut trie = Trie::new();
        let report = load_file(&mut trie, &path).await.unwrap();
        tokio::fs::remove_file(&path).await.unwrap();

        assert_eq!(report.inserted, 2);
        assert_eq!(trie.search("sun"), Ok("star"));
        assert_eq!(trie.search("rain"), Ok("water"));
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let mut trie = Trie::new();
        let path = Path::new("this/path/does/not/exist.txt");

        let err = load_file(&mut trie, path).await.unwrap_err();

        assert!(matches!(err, LoadError::Read { .. }));
        assert!(trie.is_empty());
    }
}
