//! Pronunciation plugins.
//!
//! Some scripts cannot be transcribed by rules alone. Japanese kanji, for
//! example, must be turned into kana with a dictionary before any rule can
//! see them. A [`Pronouncer`] does this kind of normalization on the input
//! word before the rule pipeline runs.
//!
//! Pronouncers are looked up by identifier in a [`PronouncerRegistry`]; a
//! language names the one it wants with the `pronounce` field of its `lang`
//! section. A missing pronouncer is not an error, the word simply passes
//! through unchanged.

use std::error::Error;
use std::fmt;
use std::sync::{Arc, OnceLock};

use log::warn;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

/// Normalizes a word before the rule pipeline runs.
///
/// Implementations may keep internal state but must be usable from many
/// threads at once, and must return the input unchanged when nothing applies.
pub trait Pronouncer: Send + Sync {
    /// The identifier languages refer to this pronouncer by.
    fn id(&self) -> &str;

    /// Rewrite `word` into its pronounceable form.
    fn pronounce(&self, word: &str) -> String;
}

/// Error returned when a pronouncer's backing resource can't be built.
pub type InitError = Box<dyn Error + Send + Sync>;

type InitFn<R> = Box<dyn Fn() -> Result<R, InitError> + Send + Sync>;
type PronounceFn<R> = Box<dyn Fn(&R, &str) -> String + Send + Sync>;

/// A pronouncer backed by an expensive resource that is built lazily.
///
/// The resource (a tokenizer, a dictionary, ...) is built at most once, on
/// the first word that `applies` to, even when several threads ask for it at
/// the same time. Words that don't qualify never trigger the build.
///
/// If building the resource fails, the failure is logged once and the
/// pronouncer returns every word unchanged from then on.
///
/// # Example
///
/// ```rust
/// use hangulize::pronounce::{LazyPronouncer, Pronouncer};
///
/// let upper = LazyPronouncer::new(
///     "upper",
///     |word| word.chars().any(|c| c.is_ascii_lowercase()),
///     || Ok(()),
///     |_, word| word.to_ascii_uppercase(),
/// );
///
/// assert_eq!(upper.pronounce("abc"), "ABC");
/// assert_eq!(upper.pronounce("123"), "123");
/// ```
pub struct LazyPronouncer<R> {
    id: String,
    applies: fn(&str) -> bool,
    init: InitFn<R>,
    run: PronounceFn<R>,
    resource: OnceLock<Option<R>>,
}

impl<R: Send + Sync> LazyPronouncer<R> {
    /// Create a lazy pronouncer.
    ///
    /// - `applies` - cheap check whether a word needs the resource at all
    /// - `init` - builds the resource
    /// - `run` - pronounces a qualifying word with the resource
    pub fn new<I, P>(id: impl Into<String>, applies: fn(&str) -> bool, init: I, run: P) -> Self
    where
        I: Fn() -> Result<R, InitError> + Send + Sync + 'static,
        P: Fn(&R, &str) -> String + Send + Sync + 'static,
    {
        LazyPronouncer {
            id: id.into(),
            applies,
            init: Box::new(init),
            run: Box::new(run),
            resource: OnceLock::new(),
        }
    }

    /// Whether the resource has been built (successfully or not).
    pub fn is_initialized(&self) -> bool {
        self.resource.get().is_some()
    }

    fn resource(&self) -> Option<&R> {
        self.resource
            .get_or_init(|| match (self.init)() {
                Ok(resource) => Some(resource),
                Err(err) => {
                    warn!("pronouncer {} is unavailable: {}", self.id, err);
                    None
                }
            })
            .as_ref()
    }
}

impl<R: Send + Sync> Pronouncer for LazyPronouncer<R> {
    fn id(&self) -> &str {
        &self.id
    }

    fn pronounce(&self, word: &str) -> String {
        if !(self.applies)(word) {
            return word.to_string();
        }
        match self.resource() {
            Some(resource) => (self.run)(resource, word),
            None => word.to_string(),
        }
    }
}

impl<R> fmt::Debug for LazyPronouncer<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyPronouncer")
            .field("id", &self.id)
            .field("initialized", &self.resource.get().is_some())
            .finish()
    }
}

/// A thread-safe set of pronouncers keyed by identifier.
#[derive(Default)]
pub struct PronouncerRegistry {
    pronouncers: RwLock<FxHashMap<String, Arc<dyn Pronouncer>>>,
}

impl PronouncerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pronouncer under its own identifier.
    ///
    /// Returns `false`, leaving the registry unchanged, when the identifier is
    /// already taken.
    pub fn register(&self, pronouncer: Arc<dyn Pronouncer>) -> bool {
        let mut pronouncers = self.pronouncers.write();
        let id = pronouncer.id().to_string();
        if pronouncers.contains_key(&id) {
            return false;
        }
        pronouncers.insert(id, pronouncer);
        true
    }

    /// Remove the pronouncer with the given identifier.
    pub fn unregister(&self, id: &str) -> bool {
        self.pronouncers.write().remove(id).is_some()
    }

    /// Look up a pronouncer.
    pub fn get(&self, id: &str) -> Option<Arc<dyn Pronouncer>> {
        self.pronouncers.read().get(id).cloned()
    }

    /// Number of registered pronouncers.
    pub fn len(&self) -> usize {
        self.pronouncers.read().len()
    }

    /// Whether no pronouncer is registered.
    pub fn is_empty(&self) -> bool {
        self.pronouncers.read().is_empty()
    }
}

impl fmt::Debug for PronouncerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pronouncers = self.pronouncers.read();
        f.debug_set().entries(pronouncers.keys()).finish()
    }
}
