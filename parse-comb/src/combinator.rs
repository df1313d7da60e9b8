use crate::{
    error::{Error, ParseResult},
    input::Input,
    parser::Parse,
};

#[derive(Clone, Copy)]
pub struct Map<P, F> {
    pub parser: P,
    pub f: F,
}

impl<U, P, F> Parse for Map<P, F>
where
    P: Parse,
    F: Fn(P::Output) -> U,
{
    type Output = U;

    fn parse<'src>(&self, input: Input<'src>) -> ParseResult<'src, U> {
        let (value, rest) = self.parser.parse(input)?;
        Ok(((self.f)(value), rest))
    }
}

#[derive(Clone, Copy)]
pub struct TryMap<P, F> {
    pub parser: P,
    pub f: F,
}

impl<U, P, F> Parse for TryMap<P, F>
where
    P: Parse,
    F: Fn(P::Output) -> Result<U, Error>,
{
    type Output = U;

    fn parse<'src>(&self, input: Input<'src>) -> ParseResult<'src, U> {
        let (value, rest) = self.parser.parse(input)?;
        Ok(((self.f)(value)?, rest))
    }
}

#[derive(Clone, Copy)]
pub struct Then<P1, P2> {
    pub parser1: P1,
    pub parser2: P2,
}

impl<P1: Parse, P2: Parse> Parse for Then<P1, P2> {
    type Output = (P1::Output, P2::Output);

    fn parse<'src>(&self, input: Input<'src>) -> ParseResult<'src, Self::Output> {
        let (value1, rest) = self.parser1.parse(input)?;
        let (value2, rest) = self.parser2.parse(rest)?;
        Ok(((value1, value2), rest))
    }
}

#[derive(Clone, Copy)]
pub struct ThenIgnore<P1, P2> {
    pub parser1: P1,
    pub parser2: P2,
}

impl<P1: Parse, P2: Parse> Parse for ThenIgnore<P1, P2> {
    type Output = P1::Output;

    fn parse<'src>(&self, input: Input<'src>) -> ParseResult<'src, P1::Output> {
        let (value1, rest) = self.parser1.parse(input)?;
        let (_, rest) = self.parser2.parse(rest)?;
        Ok((value1, rest))
    }
}

#[derive(Clone, Copy)]
pub struct IgnoreThen<P1, P2> {
    pub parser1: P1,
    pub parser2: P2,
}

impl<P1: Parse, P2: Parse> Parse for IgnoreThen<P1, P2> {
    type Output = P2::Output;

    fn parse<'src>(&self, input: Input<'src>) -> ParseResult<'src, P2::Output> {
        let (_, rest) = self.parser1.parse(input)?;
        self.parser2.parse(rest)
    }
}

#[derive(Clone, Copy)]
pub struct Or<P1, P2> {
    pub parser1: P1,
    pub parser2: P2,
}

impl<T, P1, P2> Parse for Or<P1, P2>
where
    P1: Parse<Output = T>,
    P2: Parse<Output = T>,
{
    type Output = T;

    fn parse<'src>(&self, input: Input<'src>) -> ParseResult<'src, T> {
        match self.parser1.parse(input) {
            Ok(success) => Ok(success),
            Err(err1) => self.parser2.parse(input).map_err(|err2| err1.either(err2)),
        }
    }
}

/// Ordered choice over any number of alternatives.
#[derive(Clone)]
pub struct Choice<P> {
    pub parsers: Vec<P>,
}

impl<P: Parse> Parse for Choice<P> {
    type Output = P::Output;

    fn parse<'src>(&self, input: Input<'src>) -> ParseResult<'src, P::Output> {
        let mut error: Option<Error> = None;
        for parser in &self.parsers {
            match parser.parse(input) {
                Ok(success) => return Ok(success),
                Err(err) => {
                    error = Some(match error {
                        Some(prev) => prev.either(err),
                        None => err,
                    })
                }
            }
        }
        Err(error.unwrap_or_else(|| Error::new("no alternatives to choose from")))
    }
}

/// Build an ordered choice from a list of parsers of the same type.
///
/// ```
/// # use parse_comb::*;
/// let digit = choice("0123456789".chars().map(|c| literal(c.to_string())));
/// assert_eq!(digit.parse_all("7").unwrap(), "7");
/// assert_eq!(
///     choice([literal("a"), literal("b")]).parse_all("c").unwrap_err().message(),
///     "expected 'a' or expected 'b'",
/// );
/// ```
pub fn choice<P: Parse>(parsers: impl IntoIterator<Item = P>) -> Choice<P> {
    Choice {
        parsers: parsers.into_iter().collect(),
    }
}

#[derive(Clone, Copy)]
pub struct Repeat<P> {
    pub parser: P,
    pub at_least: usize,
}

impl<P: Parse> Parse for Repeat<P> {
    type Output = Vec<P::Output>;

    fn parse<'src>(&self, input: Input<'src>) -> ParseResult<'src, Vec<P::Output>> {
        let mut values = Vec::new();
        let mut rest = input;
        loop {
            match self.parser.parse(rest) {
                Ok((value, next)) => {
                    debug_assert!(
                        next.offset() > rest.offset(),
                        "repeated parser succeeded without consuming input"
                    );
                    values.push(value);
                    rest = next;
                }
                Err(err) if values.len() < self.at_least => return Err(err),
                Err(_) => return Ok((values, rest)),
            }
        }
    }
}

#[derive(Clone, Copy)]
pub struct OrNot<P> {
    pub parser: P,
}

impl<P: Parse> Parse for OrNot<P> {
    type Output = Option<P::Output>;

    fn parse<'src>(&self, input: Input<'src>) -> ParseResult<'src, Option<P::Output>> {
        match self.parser.parse(input) {
            Ok((value, rest)) => Ok((Some(value), rest)),
            Err(_) => Ok((None, input)),
        }
    }
}

#[derive(Clone, Copy)]
pub struct Concat<P1, P2> {
    pub parser1: P1,
    pub parser2: P2,
}

impl<P1, P2> Parse for Concat<P1, P2>
where
    P1: Parse<Output = String>,
    P2: Parse<Output = String>,
{
    type Output = String;

    fn parse<'src>(&self, input: Input<'src>) -> ParseResult<'src, String> {
        let (mut value1, rest) = self.parser1.parse(input)?;
        let (value2, rest) = self.parser2.parse(rest)?;
        value1.push_str(&value2);
        Ok((value1, rest))
    }
}

#[derive(Clone, Copy)]
pub struct OrEmpty<P> {
    pub parser: P,
}

impl<P: Parse<Output = String>> Parse for OrEmpty<P> {
    type Output = String;

    fn parse<'src>(&self, input: Input<'src>) -> ParseResult<'src, String> {
        match self.parser.parse(input) {
            Ok(success) => Ok(success),
            Err(_) => Ok((String::new(), input)),
        }
    }
}

/// A named grammar production, traced at `trace` level.
#[derive(Clone, Copy)]
pub struct Named<P> {
    pub parser: P,
    pub name: &'static str,
}

impl<P: Parse> Parse for Named<P> {
    type Output = P::Output;

    fn parse<'src>(&self, input: Input<'src>) -> ParseResult<'src, P::Output> {
        log::trace!("{}: enter at offset {}", self.name, input.offset());
        let result = self.parser.parse(input);
        match &result {
            Ok((_, rest)) => log::trace!(
                "{}: matched {} bytes",
                self.name,
                rest.offset() - input.offset()
            ),
            Err(err) => log::trace!("{}: failed: {err}", self.name),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::{any_char, literal, take_while};

    fn digits() -> impl Parse<Output = String> + Clone {
        take_while(|c| c.is_ascii_digit())
    }

    #[test]
    fn sequence_propagates_first_failure() {
        let p = literal("a").then(literal("b"));
        let ((a, b), rest) = p.parse(Input::new("abc")).unwrap();
        assert_eq!((a.as_str(), b.as_str(), rest.as_str()), ("a", "b", "c"));
        assert_eq!(p.parse(Input::new("xb")).unwrap_err().message(), "expected 'a'");
        assert_eq!(p.parse(Input::new("ax")).unwrap_err().message(), "expected 'b'");
    }

    #[test]
    fn keep_left_and_right() {
        let input = Input::new("(1)");
        let left = literal("(").then_ignore(literal("1"));
        let (value, rest) = left.parse(input).unwrap();
        assert_eq!((value.as_str(), rest.as_str()), ("(", ")"));

        let right = literal("(").ignore_then(literal("1")).then_ignore(literal(")"));
        let (value, rest) = right.parse(input).unwrap();
        assert_eq!((value.as_str(), rest.as_str()), ("1", ""));
    }

    #[test]
    fn sequence_is_associative_up_to_nesting() {
        let input = Input::new("abcd");
        let (a, b, c) = (literal("a"), literal("b"), literal("c"));
        let (((x, y), z), rest1) = a.clone().then(b.clone()).then(c.clone()).parse(input).unwrap();
        let ((x2, (y2, z2)), rest2) = a.then(b.then(c)).parse(input).unwrap();
        assert_eq!((x, y, z), (x2, y2, z2));
        assert_eq!(rest1, rest2);
        assert_eq!(rest1.as_str(), "d");
    }

    #[test]
    fn choice_is_first_match() {
        let p = literal("a").or(literal("ab"));
        let (value, rest) = p.parse(Input::new("ab")).unwrap();
        assert_eq!(value, "a");
        assert_eq!(rest.as_str(), "b");
    }

    #[test]
    fn choice_retries_from_the_same_input() {
        let p = literal("a").then_ignore(literal("x")).or(literal("ab"));
        let (value, rest) = p.parse(Input::new("abc")).unwrap();
        assert_eq!(value, "ab");
        assert_eq!(rest.as_str(), "c");
    }

    #[test]
    fn choice_joins_messages() {
        let p = literal("a").or(literal("b")).or(literal("c"));
        assert_eq!(
            p.parse(Input::new("z")).unwrap_err().message(),
            "expected 'a' or expected 'b' or expected 'c'"
        );
        let empty: Choice<crate::primitive::Literal> = choice([]);
        assert!(empty.parse(Input::new("z")).is_err());
    }

    #[test]
    fn many_never_fails() {
        let p = literal("ab").many();
        let (values, rest) = p.parse(Input::new("ababa")).unwrap();
        assert_eq!(values, vec!["ab", "ab"]);
        assert_eq!(rest.as_str(), "a");

        let (values, rest) = p.parse(Input::new("")).unwrap();
        assert!(values.is_empty());
        assert!(rest.is_empty());
    }

    #[test]
    fn at_least_one_fails_only_on_first_attempt() {
        let p = any_char().at_least_one();
        assert_eq!(
            p.parse(Input::new("")).unwrap_err().message(),
            "unexpected end of input"
        );
        let (values, rest) = p.parse(Input::new("xyz")).unwrap();
        assert_eq!(values, vec!['x', 'y', 'z']);
        assert!(rest.is_empty());
    }

    #[test]
    fn or_not_leaves_input_untouched() {
        let p = literal("-").or_not();
        let (value, rest) = p.parse(Input::new("-1")).unwrap();
        assert_eq!((value.as_deref(), rest.as_str()), (Some("-"), "1"));
        let (value, rest) = p.parse(Input::new("1")).unwrap();
        assert_eq!((value, rest.as_str()), (None, "1"));
    }

    #[test]
    fn map_and_try_map() {
        let number = digits().try_map(|s| s.parse::<u32>().map_err(|e| Error::new(e.to_string())));
        let (value, rest) = number.clone().map(|n| n * 2).parse(Input::new("21;")).unwrap();
        assert_eq!((value, rest.as_str()), (42, ";"));
        assert!(number.parse(Input::new(";")).is_err());
        assert_eq!(
            literal("x").map(|s| s.len()).parse(Input::new("y")).unwrap_err(),
            Error::expected("x")
        );
    }

    #[test]
    fn string_shortcuts() {
        let sign = literal("-").or_empty();
        let number = sign.concat(digits());
        assert_eq!(number.parse_all("-12").unwrap(), "-12");
        assert_eq!(number.parse_all("12").unwrap(), "12");
        assert_eq!(
            literal("a").concat(literal("b")).parse(Input::new("ac")).unwrap_err().message(),
            "expected 'b'"
        );
    }

    #[test]
    fn named_is_transparent() {
        let p = literal("a").named("a");
        assert_eq!(p.parse(Input::new("ab")), literal("a").parse(Input::new("ab")));
        assert_eq!(p.parse(Input::new("b")), literal("a").parse(Input::new("b")));
    }
}
