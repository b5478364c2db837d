//! Leveled chunks of a word in progress.
//!
//! While a word moves through the pipeline it is kept as a sequence of
//! [`Subword`]s. Each chunk is tagged with the level of the stage that
//! produced it, so the final sequence doubles as a trace of how the input
//! became the output:
//!
//! ```text
//! level 0   level 1   level 2
//! "ka"      "n"       "타"
//! ```

use std::fmt;

use smallvec::SmallVec;

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

/// A chunk of a word with the level of the pipeline stage that generated it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Subword {
    /// The chunk's text
    pub word: String,
    /// The pipeline level that produced the chunk (0 = input)
    pub level: usize,
}

impl Subword {
    /// Create a subword.
    pub fn new(word: impl Into<String>, level: usize) -> Self {
        Subword {
            word: word.into(),
            level,
        }
    }
}

impl fmt::Display for Subword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.word, self.level)
    }
}

/// A buffer to build a merged `Vec<Subword>`.
///
/// A builder belongs to a single word's processing. Reuse it across words
/// with [`reset`](Self::reset), which keeps the allocation.
#[derive(Debug, Clone, Default)]
pub struct Builder {
    subwords: SmallVec<[Subword; 8]>,
}

impl Builder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Extend the buffered subwords by the given ones. Levels are taken as-is.
    pub fn append<I>(&mut self, subwords: I)
    where
        I: IntoIterator<Item = Subword>,
    {
        self.subwords.extend(subwords);
    }

    /// Append a single chunk. Empty chunks are skipped.
    pub fn push(&mut self, word: &str, level: usize) {
        if !word.is_empty() {
            self.subwords.push(Subword::new(word, level));
        }
    }

    /// Discard the buffered subwords.
    pub fn reset(&mut self) {
        self.subwords.clear();
    }

    /// Whether nothing is buffered.
    pub fn is_empty(&self) -> bool {
        self.subwords.is_empty()
    }

    /// Build the merged sequence: adjoining subwords of the same level are
    /// concatenated into one. Order is preserved, and an empty buffer gives
    /// an empty result.
    pub fn subwords(&self) -> Vec<Subword> {
        let mut merged: Vec<Subword> = Vec::with_capacity(self.subwords.len());

        for sw in &self.subwords {
            match merged.last_mut() {
                Some(open) if open.level == sw.level => open.word.push_str(&sw.word),
                _ => merged.push(sw.clone()),
            }
        }

        merged
    }
}

/// Concatenates the buffered subwords to assemble the full word.
impl fmt::Display for Builder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for sw in &self.subwords {
            f.write_str(&sw.word)?;
        }
        Ok(())
    }
}
