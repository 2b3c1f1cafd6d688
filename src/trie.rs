use tracing::{debug, trace};

use crate::error::DictionaryError;

/// Maximum number of words returned by [`Trie::suggest`].
pub const SUGGESTION_LIMIT: usize = 10;

/// Longest accepted word. Bounds the recursion depth of deletion and suggestion walks.
pub const MAX_WORD_LEN: usize = 64;

const ALPHABET_SIZE: usize = 26;

/// A node in the trie
#[derive(Debug)]
struct Node {
    // The lowercase letter on the edge leading to this node, `'\0'` for the root
    letter: char,
    // Whether the path from the root to this node spells a stored word
    is_terminal: bool,
    // Empty unless `is_terminal` is set
    meaning: String,
    // One slot per letter, `a` at index 0
    children: [Option<Box<Node>>; ALPHABET_SIZE],
}

impl Node {
    fn new(letter: char) -> Self {
        Node {
            letter,
            is_terminal: false,
            meaning: String::new(),
            children: Default::default(),
        }
    }

    fn has_children(&self) -> bool {
        self.children.iter().any(Option::is_some)
    }

    /// A node can be unlinked by its parent once no word ends at or passes through it.
    fn is_removable(&self) -> bool {
        !self.is_terminal && !self.has_children()
    }
}

/// An in-memory dictionary mapping words over `a-z` to their meanings.
///
/// Words are case-folded on the way in, so `"Dog"` and `"dog"` name the same entry.
#[derive(Debug)]
pub struct Trie {
    root: Node,
    len: usize,
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

impl Trie {
    /// Creates a new, empty trie
    pub fn new() -> Self {
        Trie {
            root: Node::new('\0'),
            len: 0,
        }
    }

    /// Number of stored words.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Stores `word` with `meaning`. If the word already existed, its previous meaning is
    /// replaced and returned.
    ///
    /// Nothing is mutated unless both strings are non-empty and purely alphabetic.
    pub fn insert(
        &mut self,
        word: &str,
        meaning: &str,
    ) -> Result<Option<String>, DictionaryError> {
        check_word(word)?;
        check_meaning(meaning)?;
        if word.is_empty() {
            return Err(DictionaryError::EmptyWord);
        }

        let mut current = &mut self.root;
        for c in word.chars() {
            let c = c.to_ascii_lowercase();
            current = &mut **current.children[slot(c)]
                .get_or_insert_with(|| Box::new(Node::new(c)));
        }

        let previous = std::mem::replace(&mut current.meaning, meaning.to_string());
        let replaced = if current.is_terminal {
            Some(previous)
        } else {
            current.is_terminal = true;
            self.len += 1;
            None
        };
        debug!("Inserted word: {}", word);
        Ok(replaced)
    }

    /// Returns the meaning stored for `word`.
    pub fn search(&self, word: &str) -> Result<&str, DictionaryError> {
        check_word(word)?;
        match self.find(word) {
            Some(node) if node.is_terminal => Ok(&node.meaning),
            _ => Err(DictionaryError::NotFound(word.to_string())),
        }
    }

    /// Replaces the meaning of an existing word. Never creates nodes.
    pub fn update(&mut self, word: &str, new_meaning: &str) -> Result<(), DictionaryError> {
        check_word(word)?;
        check_meaning(new_meaning)?;

        match self.find_mut(word) {
            Some(node) if node.is_terminal => {
                node.meaning = new_meaning.to_string();
                debug!("Updated word: {}", word);
                Ok(())
            }
            _ => Err(DictionaryError::NotFound(word.to_string())),
        }
    }

    /// Removes `word` and prunes every node that no longer leads to a stored word.
    ///
    /// Nodes shared with other words survive. Deleting a word that is only a prefix of
    /// stored words clears nothing and reports [`DictionaryError::NotFound`].
    pub fn delete(&mut self, word: &str) -> Result<(), DictionaryError> {
        check_word(word)?;

        let path: Vec<usize> = word.chars().map(slot).collect();
        // The root's own removability is ignored, it is never unlinked.
        match remove(&mut self.root, &path) {
            Some(_) => {
                self.len -= 1;
                debug!("Deleted word: {}", word);
                Ok(())
            }
            None => Err(DictionaryError::NotFound(word.to_string())),
        }
    }

    /// Returns up to [`SUGGESTION_LIMIT`] stored words starting with `prefix`, in ascending
    /// order. An unknown prefix yields no suggestions and an empty prefix matches every word.
    pub fn suggest(&self, prefix: &str) -> Result<Vec<String>, DictionaryError> {
        check_word(prefix)?;

        let Some(start) = self.find(prefix) else {
            return Ok(Vec::new());
        };

        let mut word = prefix.to_ascii_lowercase();
        let mut suggestions = Vec::new();
        collect(start, &mut word, &mut suggestions);

        suggestions.sort();
        suggestions.truncate(SUGGESTION_LIMIT);
        Ok(suggestions)
    }

    // Callers validate `word` first; `slot` assumes ASCII letters.
    fn find(&self, word: &str) -> Option<&Node> {
        let mut current = &self.root;
        for c in word.chars() {
            current = current.children[slot(c)].as_deref()?;
        }
        Some(current)
    }

    fn find_mut(&mut self, word: &str) -> Option<&mut Node> {
        let mut current = &mut self.root;
        for c in word.chars() {
            current = current.children[slot(c)].as_deref_mut()?;
        }
        Some(current)
    }
}

/// Clears the word at the end of `path` below `node`, unlinking children left empty on
/// the way back up.
///
/// Returns `None` if no word ends there, otherwise whether `node` itself is now removable.
fn remove(node: &mut Node, path: &[usize]) -> Option<bool> {
    match path.split_first() {
        None => {
            if !node.is_terminal {
                return None;
            }
            node.is_terminal = false;
            node.meaning.clear();
        }
        Some((&index, rest)) => {
            let child = node.children[index].as_deref_mut()?;
            if remove(child, rest)? {
                trace!("Pruning node: {}", child.letter);
                node.children[index] = None;
            }
        }
    }
    Some(node.is_removable())
}

/// Depth-first walk pushing every word stored under `node`. `word` holds the path so far.
fn collect(node: &Node, word: &mut String, out: &mut Vec<String>) {
    if node.is_terminal {
        out.push(word.clone());
    }

    for child in node.children.iter().flatten() {
        word.push(child.letter);
        collect(child, word, out);
        word.pop();
    }
}

/// Whether `s` consists only of ASCII letters. The empty string is valid.
pub fn is_valid(s: &str) -> bool {
    s.chars().all(|c| c.is_ascii_alphabetic())
}

fn check_word(word: &str) -> Result<(), DictionaryError> {
    if !is_valid(word) {
        Err(DictionaryError::InvalidWord(word.to_string()))
    } else if word.len() > MAX_WORD_LEN {
        Err(DictionaryError::WordTooLong(word.len()))
    } else {
        Ok(())
    }
}

fn check_meaning(meaning: &str) -> Result<(), DictionaryError> {
    if !is_valid(meaning) {
        Err(DictionaryError::InvalidMeaning(meaning.to_string()))
    } else if meaning.is_empty() {
        Err(DictionaryError::EmptyMeaning)
    } else {
        Ok(())
    }
}

fn slot(c: char) -> usize {
    (c.to_ascii_lowercase() as u8 - b'a') as usize
}
