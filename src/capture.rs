//! Bounds-checked access to regex capture groups.
//!
//! Rule application works on flat offset arrays: group `n` of a match spans
//! `offsets[2n]..offsets[2n + 1]`, and a group that did not participate is
//! recorded as `-1, -1`. None of the helpers here can panic; a negative,
//! reversed, out-of-range or non-boundary span yields `""`.

use regex::Captures;

/// Offset recorded for a group that did not participate in a match.
pub const NO_MATCH: isize = -1;

/// A panic-free `&s[start..stop]`.
///
/// Returns `""` when either offset is negative, the span is empty or
/// reversed, or the span does not fall on character boundaries of `s`.
#[inline]
pub fn safe_slice(s: &str, start: isize, stop: isize) -> &str {
    if start < 0 || stop < 0 || stop - start <= 0 {
        return "";
    }
    s.get(start as usize..stop as usize).unwrap_or("")
}

/// The text captured by group `n`, or `""`.
///
/// # Examples
///
/// ```rust
/// use hangulize::capture::captured;
///
/// let offsets = [0, 5, 1, 3, -1, -1];
/// assert_eq!(captured("hello", &offsets, 1), "el");
/// assert_eq!(captured("hello", &offsets, 2), "");
/// assert_eq!(captured("hello", &offsets, 9), "");
/// ```
#[inline]
pub fn captured<'s>(s: &'s str, offsets: &[isize], n: usize) -> &'s str {
    let i = n * 2;
    match (offsets.get(i), offsets.get(i + 1)) {
        (Some(&start), Some(&stop)) => safe_slice(s, start, stop),
        _ => "",
    }
}

/// Flatten the groups of a match into a `[start0, stop0, start1, ...]`
/// array, writing [`NO_MATCH`] for groups that did not participate.
///
/// `out` is cleared first so one buffer can be reused across matches.
pub fn capture_offsets(captures: &Captures<'_>, out: &mut Vec<isize>) {
    out.clear();
    for group in 0..captures.len() {
        match captures.get(group) {
            Some(m) => {
                out.push(m.start() as isize);
                out.push(m.end() as isize);
            }
            None => {
                out.push(NO_MATCH);
                out.push(NO_MATCH);
            }
        }
    }
}

/// Turn every capturing group of `expr` into a non-capturing one.
///
/// Used when a pattern fragment (a variable's alternative) is embedded into
/// another pattern, so the fragment cannot shift the outer pattern's group
/// numbers. Named groups (`(?P<name>...)` and `(?<name>...)`) lose their
/// name as well. Escaped parentheses, parentheses inside character classes
/// and the other `(?` forms (flags, `(?:`, look-arounds) are left alone.
///
/// ```rust
/// use hangulize::capture::no_capture;
///
/// assert_eq!(no_capture("(a|(b))"), "(?:a|(?:b))");
/// assert_eq!(no_capture("(?P<v>a)(?i)"), "(?:a)(?i)");
/// assert_eq!(no_capture(r"\(x[(]"), r"\(x[(]");
/// ```
pub fn no_capture(expr: &str) -> String {
    let mut out = String::with_capacity(expr.len() + 8);
    let mut rest = expr;
    let mut class_depth = 0usize;

    while let Some(ch) = rest.chars().next() {
        let len = ch.len_utf8();
        match ch {
            '\\' => {
                let escaped = rest[1..].chars().next().map_or(0, char::len_utf8);
                out.push_str(&rest[..1 + escaped]);
                rest = &rest[1 + escaped..];
                continue;
            }
            '[' => {
                class_depth += 1;
                out.push('[');
                rest = &rest[1..];
                // `]` right after `[` or `[^` is a literal member.
                let negated = usize::from(rest.starts_with('^'));
                if rest[negated..].starts_with(']') {
                    out.push_str(&rest[..negated + 1]);
                    rest = &rest[negated + 1..];
                }
                continue;
            }
            ']' if class_depth > 0 => class_depth -= 1,
            '(' if class_depth == 0 => {
                let group = &rest[1..];
                if let Some(body) = named_group_body(group) {
                    out.push_str("(?:");
                    rest = body;
                    continue;
                }
                if !group.starts_with('?') {
                    out.push_str("(?:");
                    rest = group;
                    continue;
                }
            }
            _ => {}
        }
        out.push_str(&rest[..len]);
        rest = &rest[len..];
    }

    out
}

/// The text after the name of a named group opening, `group` being what
/// follows the `(`.
fn named_group_body(group: &str) -> Option<&str> {
    let name = match group.strip_prefix("?P<") {
        Some(name) => name,
        None => group
            .strip_prefix("?<")
            .filter(|name| !name.starts_with(&['=', '!'][..]))?,
    };
    let close = name.find('>')?;
    Some(&name[close + 1..])
}
