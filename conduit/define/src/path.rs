//! Path template utilities.
//!
//! Templates use `:name` segments for placeholders, e.g. `/todos/:id/complete`.
//! A placeholder always spans a whole segment.
//!
//! ## Examples
//!
//! ```
//! use conduit_define::path::{extract_placeholders, match_template, substitute};
//!
//! let template = "/threads/:thread_id/messages/:message_id";
//! assert_eq!(extract_placeholders(template), vec!["thread_id", "message_id"]);
//!
//! let path = substitute(template, &[("thread_id", "t1"), ("message_id", "m 2")]);
//! assert_eq!(path, "/threads/t1/messages/m%202");
//!
//! let captured = match_template(template, &path).unwrap();
//! assert_eq!(captured[1], ("message_id".to_string(), "m 2".to_string()));
//! ```

use std::borrow::Cow;

use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};

/// Characters escaped when a value is substituted into a single path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Returns the placeholder name of a segment, if it is one.
pub(crate) fn placeholder(segment: &str) -> Option<&str> {
    segment.strip_prefix(':')
}

/// Extracts placeholder names from a template, in template order.
///
/// ## Examples
///
/// ```
/// use conduit_define::path::extract_placeholders;
///
/// assert!(extract_placeholders("/todos").is_empty());
/// assert_eq!(extract_placeholders("/todos/:id/complete"), vec!["id"]);
/// ```
pub fn extract_placeholders(template: &str) -> Vec<&str> {
    template.split('/').filter_map(placeholder).collect()
}

/// Returns true if `name` is usable as a placeholder name.
pub fn is_placeholder_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Percent-encodes a value so it occupies exactly one path segment.
///
/// `.` and `..` come back unchanged. URL parsing would resolve them as dot
/// segments, so the client refuses paths containing them.
///
/// ## Examples
///
/// ```
/// use conduit_define::path::encode_segment;
///
/// assert_eq!(encode_segment("abc123"), "abc123");
/// assert_eq!(encode_segment("a/b"), "a%2Fb");
/// ```
pub fn encode_segment(value: &str) -> Cow<'_, str> {
    utf8_percent_encode(value, SEGMENT).into()
}

/// Substitutes placeholder values into a template.
///
/// Each value is percent-encoded as a single segment. Placeholders without
/// a value are left untouched.
pub fn substitute(template: &str, values: &[(&str, &str)]) -> String {
    template
        .split('/')
        .map(|segment| match placeholder(segment) {
            Some(name) => match values.iter().find(|(n, _)| *n == name) {
                Some((_, value)) => encode_segment(value),
                None => Cow::Borrowed(segment),
            },
            None => Cow::Borrowed(segment),
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Matches a concrete path against a template.
///
/// Returns the captured `(name, value)` pairs in template order, with values
/// percent-decoded, or `None` if the path does not fit the template.
pub fn match_template(template: &str, path: &str) -> Option<Vec<(String, String)>> {
    let expected: Vec<&str> = template.split('/').collect();
    let actual: Vec<&str> = path.split('/').collect();
    if expected.len() != actual.len() {
        return None;
    }

    let mut captured = Vec::new();
    for (pattern, segment) in expected.iter().zip(actual.iter()) {
        match placeholder(pattern) {
            Some(name) => {
                if segment.is_empty() {
                    return None;
                }
                let value = percent_decode_str(segment).decode_utf8().ok()?;
                captured.push((name.to_string(), value.into_owned()));
            }
            None if pattern == segment => {}
            None => return None,
        }
    }
    Some(captured)
}

/// Rewrites `:name` placeholders into the `{name}` syntax used by most routers.
///
/// ## Examples
///
/// ```
/// use conduit_define::path::to_native_pattern;
///
/// assert_eq!(to_native_pattern("/todos/:id/complete"), "/todos/{id}/complete");
/// ```
pub fn to_native_pattern(template: &str) -> String {
    template
        .split('/')
        .map(|segment| match placeholder(segment) {
            Some(name) => Cow::Owned(format!("{{{name}}}")),
            None => Cow::Borrowed(segment),
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_no_placeholders() {
        assert!(extract_placeholders("/").is_empty());
        assert!(extract_placeholders("/todos").is_empty());
    }

    #[test]
    fn extract_keeps_template_order() {
        assert_eq!(
            extract_placeholders("/orgs/:org/repos/:repo/issues/:issue"),
            vec!["org", "repo", "issue"]
        );
        assert_eq!(extract_placeholders("/:a/:b"), vec!["a", "b"]);
    }

    #[test]
    fn colon_inside_segment_is_literal() {
        assert!(extract_placeholders("/time/12:30").is_empty());
    }

    #[test]
    fn placeholder_name_rules() {
        assert!(is_placeholder_name("id"));
        assert!(is_placeholder_name("_thread_id2"));
        assert!(!is_placeholder_name(""));
        assert!(!is_placeholder_name("2id"));
        assert!(!is_placeholder_name("todo-id"));
    }

    #[test]
    fn substitute_all_placeholders() {
        assert_eq!(
            substitute("/todos/:id/complete", &[("id", "abc123")]),
            "/todos/abc123/complete"
        );
    }

    #[test]
    fn substitute_missing_value_keeps_placeholder() {
        assert_eq!(substitute("/todos/:id", &[]), "/todos/:id");
    }

    #[test]
    fn substitute_preserves_trailing_slash() {
        assert_eq!(substitute("/todos/:id/", &[("id", "x")]), "/todos/x/");
    }

    #[test]
    fn substitute_encodes_reserved_characters() {
        assert_eq!(
            substitute("/files/:name", &[("name", "a/b?c#d")]),
            "/files/a%2Fb%3Fc%23d"
        );
    }

    #[test]
    fn match_rejects_literal_mismatch() {
        assert!(match_template("/todos/:id", "/users/1").is_none());
        assert!(match_template("/todos/:id", "/todos/1/extra").is_none());
        assert!(match_template("/todos/:id", "/todos/").is_none());
    }

    #[test]
    fn round_trip_recovers_original_values() {
        let template = "/a/:first/b/:second";
        let cases = [
            ("plain", "value"),
            ("with space", "x y"),
            ("slash/inside", "%literal%"),
            ("unicode-é", "?&="),
        ];
        for (first, second) in cases {
            let path = substitute(template, &[("first", first), ("second", second)]);
            let captured = match_template(template, &path).expect("path should match");
            assert_eq!(
                captured,
                vec![
                    ("first".to_string(), first.to_string()),
                    ("second".to_string(), second.to_string()),
                ]
            );
        }
    }

    #[test]
    fn native_pattern_rewrites_every_placeholder() {
        assert_eq!(to_native_pattern("/todos"), "/todos");
        assert_eq!(to_native_pattern("/:a/x/:b"), "/{a}/x/{b}");
    }
}
