//! Section-structured input consumed by [`Spec::parse`](crate::spec::Spec::parse).
//!
//! An HGL document is a set of named sections. Every section has one of two
//! shapes:
//!
//! - [`DictSection`] - a flat mapping from keys to one or more values
//!   (e.g. `lang`, `config`, `vars`)
//! - [`ListSection`] - an ordered list of two-column [`Pair`]s
//!   (e.g. `rewrite`, `hangulize`, `test`)
//!
//! The shapes are modelled as the tagged variant [`Section`], so a consumer
//! matches on the tag instead of assuming a section's kind.
//!
//! Reading the textual HGL format is outside this crate. Documents are built
//! programmatically or, with the `serialization` feature, decoded from JSON:
//!
//! ```json
//! {
//!   "lang":      { "dict": { "id": ["ita"], "code": ["it", "ita"] } },
//!   "rewrite":   { "list": [["cc", "c"]] }
//! }
//! ```

use rustc_hash::FxHashMap;

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

/// An ordered two-column entry of a [`ListSection`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serialization",
    serde(from = "(String, String)", into = "(String, String)")
)]
pub struct Pair {
    /// Left column (a pattern, or a test input)
    pub left: String,
    /// Right column (a replacement, or an expected output)
    pub right: String,
}

impl Pair {
    /// Create a pair from its two columns.
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        Pair {
            left: left.into(),
            right: right.into(),
        }
    }
}

impl From<(String, String)> for Pair {
    fn from((left, right): (String, String)) -> Self {
        Pair { left, right }
    }
}

impl From<Pair> for (String, String) {
    fn from(pair: Pair) -> Self {
        (pair.left, pair.right)
    }
}

/// A flat key to values mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialization", serde(transparent))]
pub struct DictSection {
    entries: FxHashMap<String, Vec<String>>,
}

impl DictSection {
    /// Create an empty dictionary section.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the values of `key`, replacing any previous ones.
    pub fn insert<K, I, V>(&mut self, key: K, values: I) -> &mut Self
    where
        K: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.entries
            .insert(key.into(), values.into_iter().map(Into::into).collect());
        self
    }

    /// Builder-style variant of [`insert`](Self::insert).
    pub fn with<K, I, V>(mut self, key: K, values: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.insert(key, values);
        self
    }

    /// The first value of `key`, if any.
    pub fn one(&self, key: &str) -> Option<&str> {
        self.entries
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// All values of `key`, empty when the key is absent.
    pub fn all(&self, key: &str) -> &[String] {
        self.entries.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The whole mapping.
    pub fn map(&self) -> &FxHashMap<String, Vec<String>> {
        &self.entries
    }
}

/// An ordered list of pairs. Declaration order is preserved exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialization", serde(transparent))]
pub struct ListSection {
    pairs: Vec<Pair>,
}

impl ListSection {
    /// Create an empty list section.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pair.
    pub fn push(&mut self, left: impl Into<String>, right: impl Into<String>) -> &mut Self {
        self.pairs.push(Pair::new(left, right));
        self
    }

    /// Builder-style variant of [`push`](Self::push).
    pub fn with(mut self, left: impl Into<String>, right: impl Into<String>) -> Self {
        self.push(left, right);
        self
    }

    /// The pairs in declaration order.
    pub fn array(&self) -> &[Pair] {
        &self.pairs
    }
}

impl<L: Into<String>, R: Into<String>> FromIterator<(L, R)> for ListSection {
    fn from_iter<T: IntoIterator<Item = (L, R)>>(iter: T) -> Self {
        ListSection {
            pairs: iter.into_iter().map(|(l, r)| Pair::new(l, r)).collect(),
        }
    }
}

/// One section of an HGL document.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialization", serde(rename_all = "lowercase"))]
pub enum Section {
    /// Key to values mapping
    Dict(DictSection),
    /// Ordered list of pairs
    List(ListSection),
}

impl Section {
    /// Human-readable name of the section's kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Section::Dict(_) => "dict",
            Section::List(_) => "list",
        }
    }

    /// The dictionary body, if this is a dictionary section.
    pub fn as_dict(&self) -> Option<&DictSection> {
        match self {
            Section::Dict(dict) => Some(dict),
            Section::List(_) => None,
        }
    }

    /// The list body, if this is a list section.
    pub fn as_list(&self) -> Option<&ListSection> {
        match self {
            Section::List(list) => Some(list),
            Section::Dict(_) => None,
        }
    }
}

impl From<DictSection> for Section {
    fn from(dict: DictSection) -> Self {
        Section::Dict(dict)
    }
}

impl From<ListSection> for Section {
    fn from(list: ListSection) -> Self {
        Section::List(list)
    }
}

/// A whole HGL document: section name to section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialization", serde(transparent))]
pub struct Hgl {
    sections: FxHashMap<String, Section>,
}

impl Hgl {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a section.
    pub fn insert(&mut self, name: impl Into<String>, section: impl Into<Section>) -> &mut Self {
        self.sections.insert(name.into(), section.into());
        self
    }

    /// Builder-style variant of [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, section: impl Into<Section>) -> Self {
        self.insert(name, section);
        self
    }

    /// Remove a section, returning it.
    pub fn remove(&mut self, name: &str) -> Option<Section> {
        self.sections.remove(name)
    }

    /// Look up a section by name.
    pub fn get(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Whether the document has no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Decode a document from its JSON form.
    #[cfg(feature = "serialization")]
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
