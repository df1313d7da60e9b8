//! Immutable views into the text being parsed.

use std::fmt;

/// A span in the source text, in byte offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// The start of the span, inclusive
    pub start: usize,
    /// The end of the span, exclusive
    pub end: usize,
}

/// A non-owning view of a contiguous part of a text buffer.
///
/// Every operation is pure: it returns a new view and never touches the
/// buffer. Counts are clamped to the length of the view, so the derived views
/// are always valid sub-ranges. Offsets are bytes; an offset that would split
/// a multi-byte character is moved forward to the end of that character.
///
/// ```
/// # use parse_comb::Input;
/// let input = Input::new("key = value");
/// assert_eq!(input.take_first(3).as_str(), "key");
/// assert_eq!(input.drop_first(5).trim_front(false).as_str(), "value");
/// assert_eq!(input.drop_first(100).as_str(), "");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Input<'src> {
    source: &'src str,
    start: usize,
    end: usize,
}

impl<'src> Input<'src> {
    /// A view covering the whole of `source`.
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            start: 0,
            end: source.len(),
        }
    }

    /// The text covered by this view.
    pub fn as_str(&self) -> &'src str {
        &self.source[self.start..self.end]
    }

    /// Length of the view in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Byte offset of the start of the view within the whole buffer.
    pub fn offset(&self) -> usize {
        self.start
    }

    pub fn span(&self) -> Span {
        Span {
            start: self.start,
            end: self.end,
        }
    }

    /// The first character of the view, if any.
    pub fn first_char(&self) -> Option<char> {
        self.as_str().chars().next()
    }

    /// Whether `self` is a suffix of `other` within the same buffer.
    pub fn is_suffix_of(&self, other: &Input<'_>) -> bool {
        std::ptr::eq(self.source, other.source)
            && self.end == other.end
            && self.start >= other.start
    }

    /// Everything after the first `n` bytes.
    pub fn drop_first(&self, n: usize) -> Self {
        let at = self.boundary(n);
        Self {
            start: self.start + at,
            ..*self
        }
    }

    /// The first `n` bytes.
    pub fn take_first(&self, n: usize) -> Self {
        let at = self.boundary(n);
        Self {
            end: self.start + at,
            ..*self
        }
    }

    /// The last `n` bytes.
    pub fn take_last(&self, n: usize) -> Self {
        let at = self.boundary(self.len().saturating_sub(n));
        Self {
            start: self.start + at,
            ..*self
        }
    }

    /// Everything before the last `n` bytes.
    pub fn drop_last(&self, n: usize) -> Self {
        let at = self.boundary(self.len().saturating_sub(n));
        Self {
            end: self.start + at,
            ..*self
        }
    }

    /// Strip leading spaces and tabs, and also `\r`/`\n` if `newlines` is set.
    pub fn trim_front(&self, newlines: bool) -> Self {
        let rest = self.as_str().trim_start_matches(|c| is_blank(c, newlines));
        self.drop_first(self.len() - rest.len())
    }

    /// Strip trailing spaces and tabs, and also `\r`/`\n` if `newlines` is set.
    pub fn trim_back(&self, newlines: bool) -> Self {
        let rest = self.as_str().trim_end_matches(|c| is_blank(c, newlines));
        self.take_first(rest.len())
    }

    pub fn trim(&self, newlines: bool) -> Self {
        self.trim_front(newlines).trim_back(newlines)
    }

    /// Exact, case-sensitive byte comparison against the start of the view.
    pub fn is_prefixed_by(&self, literal: &str) -> bool {
        self.as_str().as_bytes().starts_with(literal.as_bytes())
    }

    /// Copy the view into an owned string.
    pub fn materialize(&self) -> String {
        self.as_str().to_owned()
    }

    /// Clamp a relative offset to the view and round it up to a character
    /// boundary.
    fn boundary(&self, n: usize) -> usize {
        let text = self.as_str();
        let mut at = n.min(text.len());
        while !text.is_char_boundary(at) {
            at += 1;
        }
        at
    }
}

impl fmt::Display for Input<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn is_blank(c: char, newlines: bool) -> bool {
    c == ' ' || c == '\t' || (newlines && (c == '\r' || c == '\n'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_are_clamped() {
        let input = Input::new("abc");
        assert_eq!(input.drop_first(5).as_str(), "");
        assert_eq!(input.take_first(5).as_str(), "abc");
        assert_eq!(input.take_last(5).as_str(), "abc");
        assert_eq!(input.drop_last(5).as_str(), "");
        assert_eq!(input.take_last(2).as_str(), "bc");
        assert_eq!(input.drop_last(1).as_str(), "ab");
    }

    #[test]
    fn derived_views_keep_offsets() {
        let input = Input::new("hello world");
        let rest = input.drop_first(6);
        assert_eq!(rest.offset(), 6);
        assert_eq!(rest.span(), Span { start: 6, end: 11 });
        assert!(rest.is_suffix_of(&input));
        assert!(!input.is_suffix_of(&rest));
        assert!(!input.take_first(5).is_suffix_of(&input));
    }

    #[test]
    fn trimming() {
        let input = Input::new(" \t\r\nvalue \n");
        assert_eq!(input.trim_front(false).as_str(), "\r\nvalue \n");
        assert_eq!(input.trim_front(true).as_str(), "value \n");
        assert_eq!(input.trim_back(false).as_str(), " \t\r\nvalue \n");
        assert_eq!(input.trim(true).as_str(), "value");
        assert_eq!(Input::new("  ").trim(false).as_str(), "");
    }

    #[test]
    fn prefix_is_exact() {
        let input = Input::new("True");
        assert!(input.is_prefixed_by("Tr"));
        assert!(input.is_prefixed_by(""));
        assert!(!input.is_prefixed_by("true"));
        assert!(!input.is_prefixed_by("Truer"));
    }

    #[test]
    fn multibyte_offsets_round_up() {
        let input = Input::new("é!");
        assert_eq!(input.drop_first(1).as_str(), "!");
        assert_eq!(input.take_first(1).as_str(), "é");
        assert_eq!(input.take_first(1).materialize(), String::from("é"));
    }
}
