//! Basic definitions for working with parsers.
//!
//! A parser is anything implementing [`Parse`]: a pure function from an
//! [`Input`] slice to a [`ParseResult`]. The provided methods of [`Parse`]
//! build bigger parsers out of smaller ones, and [`Parser`] erases the
//! resulting type so that a grammar production can be stored, cloned and
//! reused like any other value.

use std::{fmt, rc::Rc};

use crate::{
    combinator::{
        Concat, IgnoreThen, Map, Named, Or, OrEmpty, OrNot, Repeat, Then, ThenIgnore, TryMap,
    },
    error::{Error, ParseResult},
    input::Input,
};

/// A parser producing values of type [`Output`](Parse::Output).
///
/// # Writing a Parser
///
/// Implementing `Parse` by hand means writing the `parse` method: inspect the
/// input, and either fail or return the parsed value together with the
/// unconsumed rest of the input. The rest must be a suffix of the input; a
/// parser can only move forward.
///
/// ```
/// # use parse_comb::*;
/// struct Digit;
///
/// impl Parse for Digit {
///     type Output = u32;
///
///     fn parse<'src>(&self, input: Input<'src>) -> ParseResult<'src, u32> {
///         match input.first_char().and_then(|c| c.to_digit(10)) {
///             Some(d) => Ok((d, input.drop_first(1))),
///             None => Err(Error::new("expected a digit")),
///         }
///     }
/// }
///
/// let (digits, rest) = Digit.many().parse(Input::new("42!")).unwrap();
/// assert_eq!(digits, vec![4, 2]);
/// assert_eq!(rest.as_str(), "!");
/// ```
///
/// Most of the time you don't need to: the [primitives](crate::primitive) and
/// the combinator methods below cover the usual needs.
///
/// ```
/// # use parse_comb::*;
/// let assignment = take_while(|c| c.is_ascii_alphabetic())
///     .then_ignore(whitespace())
///     .then_ignore(literal("="))
///     .then_ignore(whitespace())
///     .then(take_while(|c| c.is_ascii_digit()));
///
/// let (pair, _) = assignment.parse(Input::new("x = 10")).unwrap();
/// assert_eq!(pair, ("x".to_string(), "10".to_string()));
/// ```
pub trait Parse {
    type Output;

    /// Run the parser on `input`.
    fn parse<'src>(&self, input: Input<'src>) -> ParseResult<'src, Self::Output>;

    /// Run the parser on the whole of `src`, requiring all of it to be consumed.
    fn parse_all(&self, src: &str) -> Result<Self::Output, Error> {
        let (value, rest) = self.parse(Input::new(src))?;
        if rest.is_empty() {
            Ok(value)
        } else {
            Err(Error::new("expected end of input"))
        }
    }

    /// Run `self`, then `other` on what is left. Yields both values.
    fn then<P: Parse>(self, other: P) -> Then<Self, P>
    where
        Self: Sized,
    {
        Then {
            parser1: self,
            parser2: other,
        }
    }

    /// Like [`then`](Parse::then), but keeps only the value of `self`.
    fn then_ignore<P: Parse>(self, other: P) -> ThenIgnore<Self, P>
    where
        Self: Sized,
    {
        ThenIgnore {
            parser1: self,
            parser2: other,
        }
    }

    /// Like [`then`](Parse::then), but keeps only the value of `other`.
    fn ignore_then<P: Parse>(self, other: P) -> IgnoreThen<Self, P>
    where
        Self: Sized,
    {
        IgnoreThen {
            parser1: self,
            parser2: other,
        }
    }

    /// Ordered choice: try `self`, and if it fails try `other` on the same
    /// input. The first alternative that succeeds wins.
    fn or<P>(self, other: P) -> Or<Self, P>
    where
        Self: Sized,
        P: Parse<Output = Self::Output>,
    {
        Or {
            parser1: self,
            parser2: other,
        }
    }

    /// Zero or more repetitions. Never fails.
    ///
    /// The parser must not be able to succeed without consuming input.
    fn many(self) -> Repeat<Self>
    where
        Self: Sized,
    {
        Repeat {
            parser: self,
            at_least: 0,
        }
    }

    /// One or more repetitions. Fails only if the first attempt fails.
    ///
    /// The parser must not be able to succeed without consuming input.
    fn at_least_one(self) -> Repeat<Self>
    where
        Self: Sized,
    {
        Repeat {
            parser: self,
            at_least: 1,
        }
    }

    /// Yields `None` without consuming anything if `self` fails.
    fn or_not(self) -> OrNot<Self>
    where
        Self: Sized,
    {
        OrNot { parser: self }
    }

    fn map<U, F>(self, f: F) -> Map<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Output) -> U,
    {
        Map { parser: self, f }
    }

    /// Like [`map`](Parse::map), but `f` may reject the value.
    fn try_map<U, F>(self, f: F) -> TryMap<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Output) -> Result<U, Error>,
    {
        TryMap { parser: self, f }
    }

    /// Sequence two string parsers and join their values.
    fn concat<P>(self, other: P) -> Concat<Self, P>
    where
        Self: Sized + Parse<Output = String>,
        P: Parse<Output = String>,
    {
        Concat {
            parser1: self,
            parser2: other,
        }
    }

    /// Yields the empty string without consuming anything if `self` fails.
    fn or_empty(self) -> OrEmpty<Self>
    where
        Self: Sized + Parse<Output = String>,
    {
        OrEmpty { parser: self }
    }

    /// Name this parser as a grammar production. Named productions are traced
    /// through the `log` crate.
    fn named(self, name: &'static str) -> Named<Self>
    where
        Self: Sized,
    {
        Named { parser: self, name }
    }

    /// Erase the type of this parser.
    fn boxed(self) -> Parser<Self::Output>
    where
        Self: Sized + 'static,
    {
        Parser::new(self)
    }
}

/// A type-erased parser.
///
/// Cloning a `Parser` is cheap and yields an independent parser that behaves
/// the same way; parsers hold no mutable state.
pub struct Parser<T> {
    inner: Rc<dyn Parse<Output = T>>,
}

impl<T> Parser<T> {
    pub fn new(parser: impl Parse<Output = T> + 'static) -> Self {
        Self {
            inner: Rc::new(parser),
        }
    }
}

impl<T> Clone for Parser<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> fmt::Debug for Parser<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser").finish_non_exhaustive()
    }
}

impl<T> Parse for Parser<T> {
    type Output = T;

    fn parse<'src>(&self, input: Input<'src>) -> ParseResult<'src, T> {
        let result = self.inner.parse(input);
        if let Ok((_, rest)) = &result {
            debug_assert!(rest.is_suffix_of(&input), "parser rewound its input");
        }
        result
    }

    fn boxed(self) -> Parser<T>
    where
        Self: Sized + 'static,
    {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::{any_char, literal};

    #[test]
    fn parse_all_requires_empty_rest() {
        let ab = literal("ab");
        assert_eq!(ab.parse_all("ab").unwrap(), "ab");
        assert_eq!(
            ab.parse_all("abc").unwrap_err().message(),
            "expected end of input"
        );
        assert_eq!(ab.parse_all("b").unwrap_err().message(), "expected 'ab'");
    }

    #[test]
    fn boxed_parsers_are_independent_values() {
        let p = literal("x").boxed();
        let q = p.clone();
        let input = Input::new("xx");
        assert_eq!(p.parse(input), q.parse(input));
        let (_, rest) = p.parse(input).unwrap();
        assert_eq!(q.parse(rest).unwrap().1.as_str(), "");
    }

    #[test]
    fn boxing_twice_is_identity() {
        let p = any_char().boxed().boxed();
        let (c, rest) = p.parse(Input::new("yz")).unwrap();
        assert_eq!(c, 'y');
        assert_eq!(rest.as_str(), "z");
    }
}
