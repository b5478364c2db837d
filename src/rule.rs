//! Executable rewrite rules.
//!
//! A [`Rule`] pairs a compiled pattern with a replacement template. Rules
//! are compiled once, when the [`Spec`](crate::spec::Spec) is built, and are
//! reused for every word afterwards.
//!
//! # Pattern macros
//!
//! A pattern may refer to a variable of the `vars` section as `<name>`. The
//! reference expands to a non-capturing alternation of the variable's
//! values, so `<vowel>` with `vowel = a, e, i, o, u` becomes
//! `(?:a|e|i|o|u)`. Groups inside the values are made non-capturing as well,
//! so `$1` in a replacement always refers to the rule's own first group.
//!
//! # Replacement templates
//!
//! `$N` and `${N}` insert capture group `N` of the match, and `$$` inserts a
//! literal `$`. Any other text is copied verbatim.

use regex::Regex;
use rustc_hash::FxHashMap;

use crate::capture::{capture_offsets, captured, no_capture, safe_slice};
use crate::error::{Result, SpecError, Stage};
use crate::hgl::Pair;
use crate::subword::{Builder, Subword};
use crate::verbose::strip_verbose;

/// Variable name to ordered alternatives.
pub type Vars = FxHashMap<String, Vec<String>>;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Literal(String),
    Group(usize),
}

/// A parsed replacement template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    source: String,
    pieces: Vec<Piece>,
}

impl Replacement {
    /// Parse a replacement template.
    pub fn parse(source: &str) -> Self {
        let mut pieces = Vec::new();
        let mut literal = String::new();
        let mut rest = source;

        while let Some(at) = rest.find('$') {
            literal.push_str(&rest[..at]);
            let after = &rest[at + 1..];

            if let Some(tail) = after.strip_prefix('$') {
                literal.push('$');
                rest = tail;
                continue;
            }

            let (group, consumed) = match after.strip_prefix('{') {
                Some(braced) => match braced.find('}') {
                    Some(close) => (braced[..close].parse::<usize>().ok(), close + 2),
                    None => (None, 0),
                },
                None => {
                    let digits = after.bytes().take_while(u8::is_ascii_digit).count();
                    (after[..digits].parse::<usize>().ok(), digits)
                }
            };

            match group {
                Some(n) => {
                    if !literal.is_empty() {
                        pieces.push(Piece::Literal(std::mem::take(&mut literal)));
                    }
                    pieces.push(Piece::Group(n));
                    rest = &after[consumed..];
                }
                None => {
                    literal.push('$');
                    rest = after;
                }
            }
        }

        literal.push_str(rest);
        if !literal.is_empty() {
            pieces.push(Piece::Literal(literal));
        }

        Replacement {
            source: source.to_string(),
            pieces,
        }
    }

    /// The template as written.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Expand the template for one match of `subject` described by `offsets`.
    pub fn expand_into(&self, subject: &str, offsets: &[isize], out: &mut String) {
        for piece in &self.pieces {
            match piece {
                Piece::Literal(text) => out.push_str(text),
                Piece::Group(n) => out.push_str(captured(subject, offsets, *n)),
            }
        }
    }
}

/// Expand `<name>` references in an already stripped pattern.
///
/// Named groups (`(?P<name>` and `(?<name>`) and escaped `\<` are not
/// variable references.
pub fn expand_vars(pattern: &str, vars: &Vars, stage: Stage, index: usize) -> Result<String> {
    let mut out = String::with_capacity(pattern.len());
    let mut rest = pattern;

    while let Some(at) = rest.find(&['<', '\\'][..]) {
        out.push_str(&rest[..at]);
        let tail = &rest[at..];

        if tail.starts_with('\\') {
            // Copy the escape and the escaped character as one unit.
            let len = tail[1..].chars().next().map_or(0, char::len_utf8) + 1;
            out.push_str(&tail[..len]);
            rest = &tail[len..];
            continue;
        }

        let name_len = tail[1..]
            .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '-'))
            .unwrap_or(tail.len() - 1);
        let closed = tail[1 + name_len..].starts_with('>');
        let named_group = out.ends_with("(?") || out.ends_with("(?P");

        if name_len == 0 || !closed || named_group {
            out.push('<');
            rest = &tail[1..];
            continue;
        }

        let name = &tail[1..1 + name_len];
        let values = vars.get(name).ok_or_else(|| SpecError::UnknownVar {
            stage,
            index,
            name: name.to_string(),
        })?;

        out.push_str("(?:");
        for (i, value) in values.iter().enumerate() {
            if i > 0 {
                out.push('|');
            }
            out.push_str(&no_capture(value));
        }
        out.push(')');

        rest = &tail[name_len + 2..];
    }

    out.push_str(rest);
    Ok(out)
}

/// A compiled rule: a pattern and its replacement.
#[derive(Debug, Clone)]
pub struct Rule {
    stage: Stage,
    index: usize,
    pattern: String,
    replacement: Replacement,
    regex: Regex,
}

impl Rule {
    /// Compile the rule declared at `index` of `stage`.
    ///
    /// # Errors
    ///
    /// - [`SpecError::UnknownVar`] when the pattern refers to an undefined variable
    /// - [`SpecError::Compile`] when the expanded pattern is not a valid expression
    pub fn compile(stage: Stage, index: usize, pair: &Pair, vars: &Vars) -> Result<Self> {
        let stripped = strip_verbose(&pair.left);
        let expanded = expand_vars(&stripped, vars, stage, index)?;

        let regex = Regex::new(&expanded).map_err(|source| SpecError::Compile {
            stage,
            index,
            pattern: pair.left.clone(),
            source,
        })?;

        Ok(Rule {
            stage,
            index,
            pattern: pair.left.clone(),
            replacement: Replacement::parse(&pair.right),
            regex,
        })
    }

    /// Stage of the rule.
    #[inline]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Zero-based position of the rule within its stage.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// The pattern as written in the source.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The replacement template.
    pub fn replacement(&self) -> &Replacement {
        &self.replacement
    }

    /// The compiled matcher.
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Apply the rule once to a leveled word.
    ///
    /// `word` must be the concatenation of `subwords`. Every non-overlapping
    /// match, scanned left to right, is replaced with the expanded template
    /// and tagged with the rule's stage level. Text between matches keeps
    /// its original levels.
    ///
    /// When `freeze` is set, a match touching text of the rule's own level is
    /// skipped, so output of earlier rules of the same stage is never matched
    /// again.
    ///
    /// Returns the number of replacements made.
    pub fn apply(
        &self,
        word: &str,
        subwords: &[Subword],
        freeze: bool,
        out: &mut Builder,
    ) -> usize {
        let level = self.stage.level();
        let mut offsets = Vec::with_capacity(self.regex.captures_len() * 2);
        let mut expanded = String::new();
        let mut copied = 0;
        let mut replaced = 0;

        for caps in self.regex.captures_iter(word) {
            let Some(m) = caps.get(0) else { continue };

            if freeze && touches_level(subwords, m.start(), m.end(), level) {
                continue;
            }

            copy_span(subwords, copied, m.start(), out);

            capture_offsets(&caps, &mut offsets);
            expanded.clear();
            self.replacement.expand_into(word, &offsets, &mut expanded);
            out.push(&expanded, level);

            copied = m.end();
            replaced += 1;
        }

        copy_span(subwords, copied, word.len(), out);
        replaced
    }
}

/// Copy the part of `subwords` lying in the byte range `start..stop` of their
/// concatenation, keeping each chunk's level.
pub fn copy_span(subwords: &[Subword], start: usize, stop: usize, out: &mut Builder) {
    if start >= stop {
        return;
    }

    let mut offset = 0;
    for sw in subwords {
        let end = offset + sw.word.len();
        if end > start && offset < stop {
            let from = start.max(offset) - offset;
            let to = stop.min(end) - offset;
            out.push(safe_slice(&sw.word, from as isize, to as isize), sw.level);
        }
        if end >= stop {
            break;
        }
        offset = end;
    }
}

/// Whether the byte range `start..stop` overlaps a chunk of `level`.
///
/// An empty range touches a chunk when it lies strictly inside it.
fn touches_level(subwords: &[Subword], start: usize, stop: usize, level: usize) -> bool {
    let mut offset = 0;
    for sw in subwords {
        let end = offset + sw.word.len();
        if sw.level == level {
            let overlaps = if start == stop {
                offset < start && start < end
            } else {
                offset < stop && start < end
            };
            if overlaps {
                return true;
            }
        }
        if end > stop {
            break;
        }
        offset = end;
    }
    false
}
