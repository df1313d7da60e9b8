//! Forward-declared parsers for recursive grammars.
//!
//! A grammar production that refers to itself, directly or through other
//! productions, cannot be built bottom-up. Declare it first with
//! [`Recursive::declare`], build the productions that need it from
//! [`Recursive::reference`], then [`define`](Recursive::define) it:
//!
//! ```
//! # use parse_comb::*;
//! // nested := "(" nested* ")"
//! let nested = Recursive::<usize>::declare();
//! nested.define(
//!     literal("(")
//!         .ignore_then(nested.reference().many())
//!         .then_ignore(literal(")"))
//!         .map(|inner| 1 + inner.into_iter().max().unwrap_or(0)),
//! );
//! assert_eq!(nested.parse_all("(()(()))").unwrap(), 3);
//! ```
//!
//! A [`Recursive`] owns its slot and a [`Ref`] only points to it, so a
//! definition can refer back to its own production without creating a
//! reference cycle. Keep the [`Recursive`] (or a clone of it) alive for as long
//! as any parser built from its references is used; the entry point of a
//! grammar is usually the `Recursive` itself.

use std::{
    cell::OnceCell,
    fmt,
    rc::{Rc, Weak},
};

use crate::{
    error::ParseResult,
    input::Input,
    parser::{Parse, Parser},
};

type Slot<T> = OnceCell<Parser<T>>;

/// A single-assignment slot holding a parser, usable before it is defined.
pub struct Recursive<T> {
    slot: Rc<Slot<T>>,
}

impl<T> Recursive<T> {
    /// Declare a production whose parser will be provided later.
    pub fn declare() -> Self {
        Self {
            slot: Rc::new(OnceCell::new()),
        }
    }

    /// Assign the parser of this production.
    ///
    /// # Panics
    /// Panics if the production has already been defined.
    pub fn define(&self, parser: impl Parse<Output = T> + 'static)
    where
        T: 'static,
    {
        self.slot
            .set(parser.boxed())
            .unwrap_or_else(|_| panic!("recursive parser defined twice"));
    }

    pub fn is_defined(&self) -> bool {
        self.slot.get().is_some()
    }

    /// A parser that runs whatever this production is defined as at the time
    /// it runs.
    pub fn reference(&self) -> Ref<T> {
        Ref {
            slot: Rc::downgrade(&self.slot),
        }
    }
}

impl<T> Clone for Recursive<T> {
    fn clone(&self) -> Self {
        Self {
            slot: self.slot.clone(),
        }
    }
}

impl<T> fmt::Debug for Recursive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Recursive")
            .field("defined", &self.is_defined())
            .finish()
    }
}

impl<T> Parse for Recursive<T> {
    type Output = T;

    /// # Panics
    /// Panics if the production has not been defined yet.
    fn parse<'src>(&self, input: Input<'src>) -> ParseResult<'src, T> {
        run(&self.slot, input)
    }
}

/// A reference to a [`Recursive`] production.
pub struct Ref<T> {
    slot: Weak<Slot<T>>,
}

impl<T> Clone for Ref<T> {
    fn clone(&self) -> Self {
        Self {
            slot: self.slot.clone(),
        }
    }
}

impl<T> fmt::Debug for Ref<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ref").finish_non_exhaustive()
    }
}

impl<T> Parse for Ref<T> {
    type Output = T;

    /// # Panics
    /// Panics if the production has not been defined yet, or if every
    /// [`Recursive`] owning it has been dropped.
    fn parse<'src>(&self, input: Input<'src>) -> ParseResult<'src, T> {
        let slot = self
            .slot
            .upgrade()
            .expect("recursive parser used after its declaration was dropped");
        run(&slot, input)
    }
}

fn run<'src, T>(slot: &Slot<T>, input: Input<'src>) -> ParseResult<'src, T> {
    slot.get()
        .expect("recursive parser used before it was defined")
        .parse(input)
}

/// Declare a production, define it in terms of a reference to itself, and
/// return it.
///
/// ```
/// # use parse_comb::*;
/// // list := "[" list* "]"
/// let list = recursive(|list| {
///     literal("[")
///         .ignore_then(list.many())
///         .then_ignore(literal("]"))
///         .map(|items: Vec<usize>| items.len())
/// });
/// assert_eq!(list.parse_all("[[][[]][]]").unwrap(), 3);
/// ```
pub fn recursive<T: 'static, P>(f: impl FnOnce(Ref<T>) -> P) -> Recursive<T>
where
    P: Parse<Output = T> + 'static,
{
    let production = Recursive::declare();
    production.define(f(production.reference()));
    production
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::{literal, take_while};

    #[test]
    fn mutual_recursion() {
        // a := "a" b?   b := "b" a?
        let a = Recursive::<String>::declare();
        let b = Recursive::<String>::declare();
        a.define(
            literal("a")
                .then(b.reference().or_not())
                .map(|(x, rest)| x + &rest.unwrap_or_default()),
        );
        b.define(
            literal("b")
                .then(a.reference().or_not())
                .map(|(x, rest)| x + &rest.unwrap_or_default()),
        );
        assert_eq!(a.parse_all("abab").unwrap(), "abab");
        assert_eq!(b.parse_all("bab").unwrap(), "bab");
        let (value, rest) = a.parse(Input::new("aab")).unwrap();
        assert_eq!((value.as_str(), rest.as_str()), ("a", "ab"));
    }

    #[test]
    fn reference_sees_later_definition() {
        let slot = Recursive::<String>::declare();
        let r = slot.reference();
        assert!(!slot.is_defined());
        slot.define(take_while(|c| c == 'z'));
        assert!(slot.is_defined());
        assert_eq!(r.parse_all("zzz").unwrap(), "zzz");
    }

    #[test]
    fn failures_propagate_through_references() {
        let slot = Recursive::<String>::declare();
        slot.define(literal("x"));
        assert_eq!(
            slot.reference().parse(Input::new("y")).unwrap_err().message(),
            "expected 'x'"
        );
    }

    #[test]
    #[should_panic(expected = "defined twice")]
    fn define_twice_panics() {
        let slot = Recursive::<String>::declare();
        slot.define(literal("x"));
        slot.define(literal("y"));
    }

    #[test]
    #[should_panic(expected = "before it was defined")]
    fn undefined_reference_panics() {
        let slot = Recursive::<String>::declare();
        let _ = slot.reference().parse(Input::new("x"));
    }

    #[test]
    #[should_panic(expected = "declaration was dropped")]
    fn dangling_reference_panics() {
        let r = {
            let slot = Recursive::<String>::declare();
            slot.define(literal("x"));
            slot.reference()
        };
        let _ = r.parse(Input::new("x"));
    }
}
