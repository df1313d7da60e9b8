//! A grammar for simple INI files.
//!
//! ```text
//! [section]
//! key = value
//! other_key=other_value
//! ```
//!
//! Keys and values are ASCII alphanumerics and underscores. Spaces and tabs
//! may surround them, lines end in `\n` or `\r\n`, and blank lines are
//! allowed between entries.

use std::fmt;

use parse_comb::{literal, newline, take_until, take_while, whitespace, Parse, Parser};

/// A `[name]` header and the pairs that follow it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub name: String,
    pub pairs: Vec<(String, String)>,
}

impl Section {
    /// The value of `key`. A key assigned more than once yields its last
    /// value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// A whole INI document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ini {
    pub sections: Vec<Section>,
}

impl Ini {
    /// The first section called `name`.
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.section(section)?.get(key)
    }
}

impl fmt::Display for Ini {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, section) in self.sections.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "[{}]", section.name)?;
            for (key, value) in &section.pairs {
                writeln!(f, "{key}={value}")?;
            }
        }
        Ok(())
    }
}

fn is_word(c: char) -> bool {
    c == '_' || c.is_ascii_alphanumeric()
}

/// `key = value`, followed by any number of line endings.
pub fn pair() -> Parser<(String, String)> {
    let key = whitespace()
        .ignore_then(take_while(is_word))
        .then_ignore(whitespace())
        .then_ignore(literal("="));
    let value = whitespace()
        .ignore_then(take_while(is_word))
        .then_ignore(whitespace());
    key.then(value)
        .then_ignore(newline().many())
        .named("pair")
        .boxed()
}

/// A `[name]` header on its own line, then its pairs.
pub fn section() -> Parser<Section> {
    literal("[")
        .ignore_then(take_until(|c| c == ']'))
        .then_ignore(literal("]"))
        .then_ignore(newline().at_least_one())
        .then(pair().many())
        .map(|(name, pairs)| Section { name, pairs })
        .named("section")
        .boxed()
}

/// Zero or more sections, separated by any number of line endings.
pub fn ini() -> Parser<Ini> {
    section()
        .then_ignore(newline().many())
        .many()
        .map(|sections| Ini { sections })
        .named("ini")
        .boxed()
}
