//! # hangulize
//!
//! Transcribe words of foreign languages into Hangul.
//!
//! Every language is described by a [`Spec`](spec::Spec): its identity, a
//! little configuration, pattern variables and two ordered lists of rewrite
//! rules. The `rewrite` rules normalize spelling into something close to
//! pronunciation, then the `hangulize` rules map it onto Hangul.
//!
//! Rule patterns are written in a verbose regular expression dialect (see
//! [`verbose`]) so that authors can indent and comment complicated
//! expressions. Rules are compiled once, when the spec is built.
//!
//! ## Example
//!
//! ```rust
//! use hangulize::prelude::*;
//!
//! let hgl = Hgl::new()
//!     .with("lang", DictSection::new().with("id", ["ita"]).with("code", ["it"]))
//!     .with("config", DictSection::new().with("stage", ["draft"]))
//!     .with("vars", DictSection::new().with("vowel", ["a", "e", "i", "o", "u"]))
//!     .with(
//!         "rewrite",
//!         ListSection::new().with(
//!             "
//!             --- a doubled consonant is pronounced once
//!             (<vowel>) c c
//!             ",
//!             "${1}c",
//!         ),
//!     )
//!     .with("hangulize", ListSection::new().with("ca", "카").with("ta", "타"));
//!
//! let hangulizer = Hangulizer::new(Spec::parse(&hgl)?);
//! assert_eq!(hangulizer.hangulize("cacca"), "카카");
//! # Ok::<(), hangulize::SpecError>(())
//! ```
//!
//! ## Provenance
//!
//! Every part of a result is tagged with the stage that produced it:
//!
//! ```rust,ignore
//! for sw in hangulizer.subwords("cacca") {
//!     println!("{} (level {})", sw.word, sw.level);
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod capture;
pub mod error;
pub mod hangulizer;
pub mod hgl;
pub mod pronounce;
pub mod rule;
pub mod spec;
pub mod subword;
pub mod verbose;

mod properties;

pub use error::{Result, SpecError, Stage};

/// Common imports for convenient usage
pub mod prelude {
    pub use crate::error::{SpecError, Stage};
    pub use crate::hangulizer::{
        BuilderError, Hangulizer, HangulizerBuilder, TestFailure, TraceStep,
    };
    pub use crate::hgl::{DictSection, Hgl, ListSection, Pair, Section};
    pub use crate::pronounce::{LazyPronouncer, Pronouncer, PronouncerRegistry};
    pub use crate::rule::Rule;
    pub use crate::spec::{Config, Language, Spec};
    pub use crate::subword::{Builder, Subword};
}
