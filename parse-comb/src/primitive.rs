//! The primitive parsers every grammar is built from.

use std::borrow::Cow;

use crate::{
    combinator::Or,
    error::{Error, ParseResult},
    input::Input,
    parser::Parse,
};

/// Matches an exact string. See [`literal`].
#[derive(Debug, Clone)]
pub struct Literal {
    pub expected: Cow<'static, str>,
}

impl Parse for Literal {
    type Output = String;

    fn parse<'src>(&self, input: Input<'src>) -> ParseResult<'src, String> {
        if input.is_prefixed_by(&self.expected) {
            Ok((self.expected.to_string(), input.drop_first(self.expected.len())))
        } else {
            Err(Error::expected(&self.expected))
        }
    }
}

/// Succeeds if the input starts with exactly `expected`, consuming it.
///
/// The comparison is byte-exact and case-sensitive.
pub fn literal(expected: impl Into<Cow<'static, str>>) -> Literal {
    Literal {
        expected: expected.into(),
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AnyChar;

impl Parse for AnyChar {
    type Output = char;

    fn parse<'src>(&self, input: Input<'src>) -> ParseResult<'src, char> {
        match input.first_char() {
            Some(c) => Ok((c, input.drop_first(c.len_utf8()))),
            None => Err(Error::end_of_input()),
        }
    }
}

/// Consumes a single character, failing only at the end of the input.
pub fn any_char() -> AnyChar {
    AnyChar
}

#[derive(Clone, Copy)]
pub struct Satisfy<F> {
    pub predicate: F,
}

impl<F: Fn(char) -> bool> Parse for Satisfy<F> {
    type Output = char;

    fn parse<'src>(&self, input: Input<'src>) -> ParseResult<'src, char> {
        match input.first_char() {
            Some(c) if (self.predicate)(c) => Ok((c, input.drop_first(c.len_utf8()))),
            Some(c) => Err(Error::new(format!("unexpected character '{c}'"))),
            None => Err(Error::end_of_input()),
        }
    }
}

/// Consumes a single character satisfying `predicate`.
pub fn satisfy<F: Fn(char) -> bool>(predicate: F) -> Satisfy<F> {
    Satisfy { predicate }
}

#[derive(Clone, Copy)]
pub struct TakeWhile<F> {
    pub predicate: F,
}

impl<F: Fn(char) -> bool> Parse for TakeWhile<F> {
    type Output = String;

    fn parse<'src>(&self, input: Input<'src>) -> ParseResult<'src, String> {
        let text = input.as_str();
        let len = text
            .char_indices()
            .find(|&(_, c)| !(self.predicate)(c))
            .map_or(text.len(), |(i, _)| i);
        Ok((input.take_first(len).materialize(), input.drop_first(len)))
    }
}

/// Consumes the longest prefix whose characters all satisfy `predicate`.
///
/// Never fails; the prefix may be empty, so don't repeat it with
/// [`many`](Parse::many).
pub fn take_while<F: Fn(char) -> bool>(predicate: F) -> TakeWhile<F> {
    TakeWhile { predicate }
}

/// Consumes the longest prefix none of whose characters satisfy `predicate`.
pub fn take_until<F: Fn(char) -> bool>(predicate: F) -> TakeWhile<impl Fn(char) -> bool + Clone>
where
    F: Clone,
{
    take_while(move |c| !predicate(c))
}

/// Spaces and tabs, possibly none. Newlines are not whitespace here.
pub fn whitespace() -> TakeWhile<fn(char) -> bool> {
    take_while(is_space_or_tab as fn(char) -> bool)
}

fn is_space_or_tab(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// A `\n` or `\r\n` line ending.
pub fn newline() -> Or<Literal, Literal> {
    literal("\n").or(literal("\r\n"))
}

#[derive(Debug, Clone, Copy)]
pub struct End;

impl Parse for End {
    type Output = ();

    fn parse<'src>(&self, input: Input<'src>) -> ParseResult<'src, ()> {
        if input.is_empty() {
            Ok(((), input))
        } else {
            Err(Error::new("expected end of input"))
        }
    }
}

/// Succeeds only when no input is left.
pub fn end() -> End {
    End
}

#[cfg(feature = "regex")]
pub use self::regex::{pattern, Pattern};

#[cfg(feature = "regex")]
mod regex {
    use regex_automata::{meta::Regex, Anchored};

    use super::*;

    /// Matches a regular expression anchored at the start of the input.
    #[derive(Debug, Clone)]
    pub struct Pattern {
        regex: Regex,
        source: String,
    }

    impl Parse for Pattern {
        type Output = String;

        fn parse<'src>(&self, input: Input<'src>) -> ParseResult<'src, String> {
            let search = regex_automata::Input::new(input.as_str()).anchored(Anchored::Yes);
            match self.regex.search_half(&search) {
                Some(end) => {
                    let len = end.offset();
                    Ok((input.take_first(len).materialize(), input.drop_first(len)))
                }
                None => Err(Error::new(format!("expected match for /{}/", self.source))),
            }
        }
    }

    /// Compile `source` into a parser that consumes the leftmost-first match
    /// of the expression at the start of the input.
    ///
    /// ```
    /// # use parse_comb::*;
    /// let ident = pattern(r"[A-Za-z_][A-Za-z0-9_]*").unwrap();
    /// assert_eq!(ident.parse_all("snake_case1").unwrap(), "snake_case1");
    /// assert_eq!(
    ///     ident.parse(Input::new("1up")).unwrap_err().message(),
    ///     "expected match for /[A-Za-z_][A-Za-z0-9_]*/",
    /// );
    /// ```
    pub fn pattern(source: &str) -> Result<Pattern, regex_automata::meta::BuildError> {
        Ok(Pattern {
            regex: Regex::new(source)?,
            source: source.to_owned(),
        })
    }
}
