#![doc=include_str!("../../README.md")]

pub mod combinator;
pub mod error;
pub mod input;
pub mod parser;
pub mod primitive;
pub mod recursive;

pub use crate::{
    combinator::choice,
    error::{Error, ParseResult},
    input::{Input, Span},
    parser::{Parse, Parser},
    primitive::{any_char, end, literal, newline, satisfy, take_until, take_while, whitespace},
    recursive::{recursive, Recursive, Ref},
};

#[cfg(feature = "regex")]
pub use crate::primitive::pattern;
