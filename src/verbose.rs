//! Verbose pattern compiler.
//!
//! Rule authors write patterns the way they would write readable code:
//! indented, spread over many lines and annotated with comments.
//!
//! ```text
//! --- start of word
//!     ^
//! --- a vowel
//!     (
//!         [aeiou]
//!     )
//! --- then a nasal
//!     [mn]
//! --- a literal space between words
//!     \
//! ```
//!
//! Before compiling, everything from a `---` marker to the end of its line is
//! dropped, then all ASCII whitespace is dropped except whitespace escaped
//! with a backslash (`"\ "`), which stays a literal character of the
//! pattern. Other whitespace, such as U+3000 or a no-break space, is an
//! ordinary character.
//!
//! Stripping is idempotent: [`strip_verbose`] applied to its own output
//! returns the same text, so recompiling a stripped pattern yields an
//! equivalent matcher.

use regex::Regex;

/// Marker opening a comment that runs to the end of the line.
pub const COMMENT_MARKER: &str = "---";

/// Remove comments and insignificant whitespace from a verbose pattern.
///
/// # Examples
///
/// ```rust
/// use hangulize::verbose::strip_verbose;
///
/// let stripped = strip_verbose("
///     --- a vowel
///     [aeiou]
///     --- then a space
///     \\ x
/// ");
/// assert_eq!(stripped, "[aeiou]\\ x");
/// ```
pub fn strip_verbose(verbose: &str) -> String {
    let mut stripped = String::with_capacity(verbose.len());

    for (i, line) in verbose.split('\n').enumerate() {
        // Newlines are whitespace; a backslash ending the previous line
        // escapes it.
        if i > 0 && ends_with_escape(&stripped) {
            stripped.push('\n');
        }

        let line = match line.find(COMMENT_MARKER) {
            Some(at) => &line[..at],
            None => line,
        };

        for ch in line.chars() {
            if ch.is_ascii_whitespace() && !ends_with_escape(&stripped) {
                continue;
            }
            stripped.push(ch);
        }
    }

    stripped
}

/// Strip a verbose pattern and compile what remains.
///
/// # Errors
///
/// Returns the regex error when the stripped pattern is not a valid
/// expression. Callers attach the rule's location.
pub fn compile_verbose(verbose: &str) -> Result<Regex, regex::Error> {
    Regex::new(&strip_verbose(verbose))
}

/// Whether `s` ends in an unescaped backslash, i.e. an odd run of them.
fn ends_with_escape(s: &str) -> bool {
    s.bytes().rev().take_while(|&b| b == b'\\').count() % 2 == 1
}
