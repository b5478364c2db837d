//! Error types for building a transcription [`Spec`](crate::spec::Spec).

use std::fmt;

use thiserror::Error;

/// The rule list a rule belongs to.
///
/// Rules are applied in two stages. Every compiled rule remembers its stage so
/// that a failure can point at the exact rule an author has to fix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Normalization rules from the `rewrite` section.
    Rewrite,
    /// Script-mapping rules from the `hangulize` section.
    Hangulize,
}

impl Stage {
    /// The subword level produced by rules of this stage.
    ///
    /// Level 0 is reserved for the untouched (or pronounced) input.
    #[inline]
    pub fn level(self) -> usize {
        match self {
            Stage::Rewrite => 1,
            Stage::Hangulize => 2,
        }
    }

    /// The section name the stage's rules are read from.
    pub fn section(self) -> &'static str {
        match self {
            Stage::Rewrite => "rewrite",
            Stage::Hangulize => "hangulize",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.section())
    }
}

/// Errors that can occur while parsing or compiling a [`Spec`](crate::spec::Spec).
///
/// A spec is either fully valid or not produced at all, so every variant is
/// fatal to construction.
#[derive(Debug, Error)]
pub enum SpecError {
    /// A required section is absent.
    #[error("'{section}' section required")]
    MissingSection {
        /// Name of the missing section
        section: &'static str,
    },

    /// A section exists but has the wrong shape.
    #[error("'{section}' section must be a {expected} section")]
    WrongSectionKind {
        /// Name of the offending section
        section: String,
        /// The expected kind (`dict` or `list`)
        expected: &'static str,
    },

    /// A required field is absent or empty.
    #[error("'{section}' section requires the '{field}' field")]
    MissingField {
        /// Section containing the field
        section: &'static str,
        /// Name of the missing field
        field: &'static str,
    },

    /// A marker is not exactly one character long.
    #[error("marker {marker:?} in 'config' section must be 1-character")]
    InvalidMarker {
        /// The offending marker value
        marker: String,
    },

    /// A rule pattern refers to a variable the `vars` section does not define.
    #[error("{stage} rule #{index} refers to undefined variable <{name}>")]
    UnknownVar {
        /// Stage of the failing rule
        stage: Stage,
        /// Zero-based index of the rule within its stage
        index: usize,
        /// Name of the undefined variable
        name: String,
    },

    /// A rule pattern failed to compile.
    #[error("failed to compile {stage} rule #{index} {pattern:?}")]
    Compile {
        /// Stage of the failing rule
        stage: Stage,
        /// Zero-based index of the rule within its stage
        index: usize,
        /// The verbose pattern text as written by the author
        pattern: String,
        /// The underlying regex error
        #[source]
        source: regex::Error,
    },

    /// The serialized input could not be decoded.
    #[cfg(feature = "serialization")]
    #[error("failed to decode HGL document")]
    Json(#[from] serde_json::Error),
}

/// A specialized `Result` type for spec construction.
pub type Result<T> = std::result::Result<T, SpecError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_levels_are_ordered() {
        assert!(Stage::Rewrite.level() < Stage::Hangulize.level());
        assert!(Stage::Rewrite.level() > 0);
    }

    #[test]
    fn test_error_messages_locate_the_problem() {
        let err = SpecError::MissingSection { section: "lang" };
        assert_eq!(err.to_string(), "'lang' section required");

        let err = SpecError::InvalidMarker {
            marker: "ab".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "marker \"ab\" in 'config' section must be 1-character"
        );

        let err = SpecError::UnknownVar {
            stage: Stage::Hangulize,
            index: 4,
            name: "vowel".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "hangulize rule #4 refers to undefined variable <vowel>"
        );
    }

    #[test]
    fn test_compile_error_keeps_source() {
        use std::error::Error as _;

        let source = regex::Regex::new("(").unwrap_err();
        let err = SpecError::Compile {
            stage: Stage::Rewrite,
            index: 2,
            pattern: "(".to_string(),
            source,
        };
        assert!(err.to_string().starts_with("failed to compile rewrite rule #2"));
        assert!(err.source().is_some());
    }
}
