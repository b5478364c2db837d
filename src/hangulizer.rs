//! The transcription pipeline.
//!
//! A [`Hangulizer`] runs a word through a [`Spec`]:
//!
//! 1. the language's pronouncer, if one is registered, rewrites the input;
//!    the result is the level 0 seed
//! 2. every `rewrite` rule is applied once, in order (level 1)
//! 3. every `hangulize` rule is applied once, in order (level 2); text an
//!    earlier `hangulize` rule produced is never matched again
//! 4. marker characters are removed
//!
//! The word is carried as leveled [`Subword`]s the whole way, so the result
//! comes with a trace of which stage produced which part of it.
//!
//! # Example
//!
//! ```rust
//! use hangulize::prelude::*;
//!
//! let hgl = Hgl::new()
//!     .with("lang", DictSection::new().with("id", ["demo"]))
//!     .with("config", DictSection::new())
//!     .with("rewrite", ListSection::new().with("c", "k"))
//!     .with("hangulize", ListSection::new().with("ka", "카"));
//!
//! let hangulizer = Hangulizer::new(Spec::parse(&hgl)?);
//! assert_eq!(hangulizer.hangulize("ca"), "카");
//! # Ok::<(), hangulize::SpecError>(())
//! ```

use std::fmt;
use std::sync::Arc;

use log::trace;

use crate::error::Stage;
use crate::pronounce::PronouncerRegistry;
use crate::rule::Rule;
use crate::spec::Spec;
use crate::subword::{Builder, Subword};

/// One rule application that changed the word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceStep {
    /// Stage of the rule
    pub stage: Stage,
    /// Index of the rule within its stage
    pub index: usize,
    /// The word after the rule was applied
    pub word: String,
}

impl fmt::Display for TraceStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} #{}: {}", self.stage, self.index, self.word)
    }
}

/// A self-test example whose output did not match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestFailure {
    /// The example input
    pub input: String,
    /// The output the spec expects
    pub expected: String,
    /// The output actually produced
    pub actual: String,
}

impl fmt::Display for TestFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: expected {:?}, got {:?}",
            self.input, self.expected, self.actual
        )
    }
}

/// Error type for builder validation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuilderError {
    /// No spec was provided
    #[error("Spec is required. Use .spec() to set it.")]
    MissingSpec,
}

/// Transcribes words of one language into Hangul.
///
/// A `Hangulizer` is immutable and can be shared between threads; every call
/// uses its own scratch state.
#[derive(Debug, Clone)]
pub struct Hangulizer {
    spec: Arc<Spec>,
    pronouncers: Arc<PronouncerRegistry>,
    keep_markers: bool,
}

impl Hangulizer {
    /// Create a hangulizer with no pronouncers that removes markers.
    pub fn new(spec: Spec) -> Self {
        Hangulizer {
            spec: Arc::new(spec),
            pronouncers: Arc::new(PronouncerRegistry::new()),
            keep_markers: false,
        }
    }

    /// Start configuring a hangulizer.
    pub fn builder() -> HangulizerBuilder {
        HangulizerBuilder::new()
    }

    /// The spec in use.
    pub fn spec(&self) -> &Spec {
        &self.spec
    }

    /// The pronouncers available to this hangulizer.
    pub fn pronouncers(&self) -> &PronouncerRegistry {
        &self.pronouncers
    }

    /// Transcribe a word.
    pub fn hangulize(&self, word: &str) -> String {
        self.subwords(word).into_iter().map(|sw| sw.word).collect()
    }

    /// Transcribe a word, returning the merged leveled chunks of the result.
    ///
    /// Concatenating the chunks gives [`hangulize`](Self::hangulize)'s output.
    pub fn subwords(&self, word: &str) -> Vec<Subword> {
        self.run(word, |_, _| {})
    }

    /// Transcribe a word, recording every rule application that changed it.
    pub fn trace(&self, word: &str) -> Vec<TraceStep> {
        let mut steps = Vec::new();
        self.run(word, |rule, word| {
            steps.push(TraceStep {
                stage: rule.stage(),
                index: rule.index(),
                word: word.to_string(),
            })
        });
        steps
    }

    /// Run the spec's own examples and report the ones that fail.
    pub fn self_test(&self) -> Vec<TestFailure> {
        self.spec
            .test()
            .iter()
            .filter_map(|example| {
                let actual = self.hangulize(&example.left);
                (actual != example.right).then(|| TestFailure {
                    input: example.left.clone(),
                    expected: example.right.clone(),
                    actual,
                })
            })
            .collect()
    }

    /// Apply the language's pronouncer, if one is registered.
    pub fn pronounce(&self, word: &str) -> String {
        let pronouncer = self
            .spec
            .lang()
            .pronounce()
            .and_then(|id| self.pronouncers.get(id));

        match pronouncer {
            Some(pronouncer) => pronouncer.pronounce(word),
            None => word.to_string(),
        }
    }

    fn run<F>(&self, word: &str, mut on_change: F) -> Vec<Subword>
    where
        F: FnMut(&Rule, &str),
    {
        let mut flat = self.pronounce(word);
        let mut builder = Builder::new();
        builder.push(&flat, 0);
        let mut current = builder.subwords();

        for stage in [Stage::Rewrite, Stage::Hangulize] {
            let freeze = stage == Stage::Hangulize;

            for rule in self.spec.rules(stage) {
                builder.reset();
                if rule.apply(&flat, &current, freeze, &mut builder) == 0 {
                    continue;
                }

                let next = builder.to_string();
                current = builder.subwords();
                if next != flat {
                    trace!(
                        "{} rule #{} {:?}: {} -> {}",
                        stage,
                        rule.index(),
                        rule.pattern(),
                        flat,
                        next
                    );
                    on_change(rule, &next);
                    flat = next;
                }
            }
        }

        let config = self.spec.config();
        if self.keep_markers || config.markers().is_empty() {
            return current;
        }

        builder.reset();
        for sw in &current {
            let word: String = sw.word.chars().filter(|&c| !config.is_marker(c)).collect();
            builder.push(&word, sw.level);
        }
        builder.subwords()
    }
}

/// Builder for constructing a [`Hangulizer`] with a fluent API.
///
/// # Example
///
/// ```rust,ignore
/// let hangulizer = Hangulizer::builder()
///     .spec(spec)
///     .pronouncers(registry)
///     .keep_markers(true)
///     .build()?;
/// ```
#[derive(Debug, Default)]
pub struct HangulizerBuilder {
    spec: Option<Spec>,
    pronouncers: Option<Arc<PronouncerRegistry>>,
    keep_markers: bool,
}

impl HangulizerBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the spec to transcribe with.
    pub fn spec(mut self, spec: Spec) -> Self {
        self.spec = Some(spec);
        self
    }

    /// Set the pronouncers to look the language's pronouncer up in.
    pub fn pronouncers(mut self, pronouncers: Arc<PronouncerRegistry>) -> Self {
        self.pronouncers = Some(pronouncers);
        self
    }

    /// Keep marker characters in the output instead of removing them.
    pub fn keep_markers(mut self, keep: bool) -> Self {
        self.keep_markers = keep;
        self
    }

    /// Build the `Hangulizer`.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::MissingSpec`] if no spec was set.
    pub fn build(self) -> Result<Hangulizer, BuilderError> {
        let spec = self.spec.ok_or(BuilderError::MissingSpec)?;

        Ok(Hangulizer {
            spec: Arc::new(spec),
            pronouncers: self.pronouncers.unwrap_or_default(),
            keep_markers: self.keep_markers,
        })
    }
}
