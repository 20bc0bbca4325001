//! Contains the [`WordTable`], the append-only interner shared between the
//! front end and the evaluator.

use std::{
    collections::HashMap,
    fmt::Display,
    sync::{Arc, RwLock},
};

use thiserror::Error;

/// Is a stable integer handle for an interned word spelling.
///
/// Handles are only meaningful within the [`WordTable`] that produced them.
/// Index 0 is reserved for the empty spelling, so no user word ever interns
/// to 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WordIdx(usize);

impl WordIdx {
    /// Gets the raw index value of the handle.
    #[must_use]
    pub fn get(self) -> usize { self.0 }
}

impl Display for WordIdx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.0) }
}

/// Is an error returned by [`WordTable::spelling_of`] when the given handle
/// does not belong to the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Error)]
#[error("word index {index} is out of range for a table of {len} words")]
pub struct OutOfRangeError {
    /// The offending handle value.
    pub index: usize,

    /// The number of words currently in the table.
    pub len: usize,
}

/// Provides interning for the lex/parse pipeline.
///
/// Both the owned [`WordTable`] and the synchronized [`SharedWordTable`]
/// implement this, so one parse call can take either a private table or a
/// table shared across sessions.
pub trait Interner {
    /// Interns the given spelling, creating a new handle if it is absent.
    fn intern(&mut self, spelling: &str) -> WordIdx;

    /// Looks up the handle of the given spelling without creating it.
    fn lookup(&self, spelling: &str) -> Option<WordIdx>;
}

/// Is a bidirectional, append-only mapping between word spellings and stable
/// integer handles.
///
/// Identical spellings always yield the same handle within one table
/// instance; distinct spellings never collide; words are never removed for
/// the lifetime of the table. The table grows as needed.
#[derive(Debug, Clone)]
pub struct WordTable {
    spellings: Vec<String>,
    indices: HashMap<String, usize>,
}

impl WordTable {
    /// Creates a new table containing only the reserved empty spelling at
    /// index 0.
    #[must_use]
    pub fn new() -> Self {
        let mut table = Self {
            spellings: Vec::new(),
            indices: HashMap::new(),
        };
        table.intern("");
        table
    }

    /// Interns the given spelling, creating a new handle if it is absent.
    ///
    /// Idempotent: the same spelling always returns the same handle.
    pub fn intern(&mut self, spelling: &str) -> WordIdx {
        if let Some(&index) = self.indices.get(spelling) {
            return WordIdx(index);
        }

        let index = self.spellings.len();
        self.spellings.push(spelling.to_owned());
        self.indices.insert(spelling.to_owned(), index);
        WordIdx(index)
    }

    /// Looks up the handle of the given spelling without creating it.
    #[must_use]
    pub fn lookup(&self, spelling: &str) -> Option<WordIdx> {
        self.indices.get(spelling).copied().map(WordIdx)
    }

    /// Gets the spelling of the given handle.
    ///
    /// # Errors
    /// [`OutOfRangeError`] if the handle does not belong to this table.
    pub fn spelling_of(&self, index: WordIdx) -> Result<&str, OutOfRangeError> {
        self.spellings
            .get(index.0)
            .map(String::as_str)
            .ok_or(OutOfRangeError {
                index: index.0,
                len: self.spellings.len(),
            })
    }

    /// Gets the number of words in the table (including the reserved empty
    /// spelling).
    #[must_use]
    pub fn len(&self) -> usize { self.spellings.len() }

    /// Returns `true` if the table contains no words.
    ///
    /// The function never returns `true` in practice since index 0 is always
    /// seeded.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.spellings.is_empty() }
}

impl Default for WordTable {
    fn default() -> Self { Self::new() }
}

impl Interner for WordTable {
    fn intern(&mut self, spelling: &str) -> WordIdx { Self::intern(self, spelling) }

    fn lookup(&self, spelling: &str) -> Option<WordIdx> { Self::lookup(self, spelling) }
}

/// Is an internally-synchronized [`WordTable`] handle that can be shared
/// across many concurrent parse calls.
///
/// All clones refer to the same underlying table, so handles produced by one
/// parse remain valid for every other user of the table.
#[derive(Debug, Clone)]
pub struct SharedWordTable(Arc<RwLock<WordTable>>);

impl SharedWordTable {
    /// Creates a new shared table containing only the reserved empty
    /// spelling.
    #[must_use]
    pub fn new() -> Self { Self(Arc::new(RwLock::new(WordTable::new()))) }

    /// Wraps an existing owned table.
    #[must_use]
    pub fn from_table(table: WordTable) -> Self { Self(Arc::new(RwLock::new(table))) }

    /// Interns the given spelling, creating a new handle if it is absent.
    #[must_use]
    pub fn intern(&self, spelling: &str) -> WordIdx {
        // fast path with the read lock only
        if let Some(index) = self.0.read().unwrap().lookup(spelling) {
            return index;
        }

        self.0.write().unwrap().intern(spelling)
    }

    /// Looks up the handle of the given spelling without creating it.
    #[must_use]
    pub fn lookup(&self, spelling: &str) -> Option<WordIdx> {
        self.0.read().unwrap().lookup(spelling)
    }

    /// Gets the spelling of the given handle as an owned string.
    ///
    /// # Errors
    /// [`OutOfRangeError`] if the handle does not belong to this table.
    pub fn spelling_of(&self, index: WordIdx) -> Result<String, OutOfRangeError> {
        self.0
            .read()
            .unwrap()
            .spelling_of(index)
            .map(str::to_owned)
    }

    /// Gets the number of words in the table.
    #[must_use]
    pub fn len(&self) -> usize { self.0.read().unwrap().len() }

    /// Returns `true` if the table contains no words.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.0.read().unwrap().is_empty() }
}

impl Default for SharedWordTable {
    fn default() -> Self { Self::new() }
}

impl Interner for SharedWordTable {
    fn intern(&mut self, spelling: &str) -> WordIdx { Self::intern(self, spelling) }

    fn lookup(&self, spelling: &str) -> Option<WordIdx> { Self::lookup(self, spelling) }
}
