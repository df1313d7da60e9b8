//! A JSON grammar.
//!
//! `value` is the one recursive production: arrays and objects contain
//! elements, which contain values again. Nesting depth is bounded by the
//! call stack.

use std::{collections::BTreeMap, fmt};

use parse_comb::{
    any_char, choice, literal, recursive, satisfy, take_while, Error, Parse, Parser, Recursive,
    Ref,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Value>),
    Object(BTreeMap<String, Value>),
}

impl Value {
    /// Look up `key` if this is an object.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(members) => members.get(key),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }
}

/// Compact JSON text.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::String(s) => write_string(f, s),
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Object(members) => {
                f.write_str("{")?;
                for (i, (key, value)) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write_string(f, key)?;
                    write!(f, ":{value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

fn write_string(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_str("\"")?;
    for c in s.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if c.is_control() => write!(f, "\\u{:04x}", c as u32)?,
            c => write!(f, "{c}")?,
        }
    }
    f.write_str("\"")
}

fn is_json_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

fn ws() -> impl Parse<Output = String> + Clone {
    take_while(is_json_whitespace)
}

fn digits() -> impl Parse<Output = String> + Clone {
    take_while(|c: char| c.is_ascii_digit())
}

/// An optional minus sign, one or more digits, an optional fraction and an
/// optional exponent. Leading zeros are accepted; values too large for an
/// `f64` are not.
pub fn number() -> Parser<Value> {
    let digit = choice(('0'..='9').map(|d| literal(d.to_string())));
    let fraction = literal(".").concat(digits());
    let exponent = literal("e")
        .or(literal("E"))
        .concat(literal("+").or(literal("-")).or_empty())
        .concat(digit.clone())
        .concat(digits());
    literal("-")
        .or_empty()
        .concat(digit)
        .concat(digits())
        .concat(fraction.or_empty())
        .concat(exponent.or_empty())
        .try_map(|text| match text.parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(Value::Number(n)),
            Ok(_) => Err(Error::new(format!("number out of range '{text}'"))),
            Err(err) => Err(Error::new(format!("invalid number '{text}': {err}"))),
        })
        .named("number")
        .boxed()
}

fn decode_utf16(units: &[u16]) -> Result<String, Error> {
    char::decode_utf16(units.iter().copied())
        .collect::<Result<String, _>>()
        .map_err(|err| Error::new(format!("invalid escape: {err}")))
}

fn escape() -> impl Parse<Output = String> + Clone {
    let hex = satisfy(|c| c.is_ascii_hexdigit()).map(String::from);
    let code_unit = literal("u")
        .ignore_then(hex.clone().concat(hex.clone()).concat(hex.clone()).concat(hex))
        .try_map(|hex| {
            u16::from_str_radix(&hex, 16).map_err(|err| Error::new(format!("invalid escape: {err}")))
        });
    // characters outside the BMP are written as a surrogate pair
    let surrogate_pair = code_unit
        .clone()
        .then_ignore(literal("\\"))
        .then(code_unit.clone())
        .try_map(|(high, low)| decode_utf16(&[high, low]));
    let unicode = surrogate_pair.or(code_unit.try_map(|unit| decode_utf16(&[unit])));
    let simple = any_char().try_map(|c| {
        let unescaped = match c {
            '"' => '"',
            '\\' => '\\',
            '/' => '/',
            'b' => '\u{8}',
            'f' => '\u{c}',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            other => return Err(Error::new(format!("invalid escape '\\{other}'"))),
        };
        Ok(unescaped.to_string())
    });
    literal("\\").ignore_then(unicode.or(simple))
}

/// A double-quoted string with the standard backslash escapes.
pub fn string() -> Parser<String> {
    let plain = satisfy(|c| c != '"' && c != '\\').map(String::from);
    literal("\"")
        .ignore_then(escape().or(plain).many())
        .then_ignore(literal("\""))
        .map(|parts| parts.concat())
        .named("string")
        .boxed()
}

fn boolean() -> Parser<Value> {
    literal("true")
        .map(|_| Value::Bool(true))
        .or(literal("false").map(|_| Value::Bool(false)))
        .boxed()
}

fn null() -> Parser<Value> {
    literal("null").map(|_| Value::Null).boxed()
}

/// Any JSON value, without surrounding whitespace.
pub fn value() -> Recursive<Value> {
    recursive(|value: Ref<Value>| {
        let element = ws().ignore_then(value).then_ignore(ws()).boxed();

        let elements = element
            .clone()
            .then(literal(",").ignore_then(element.clone()).many())
            .map(|(first, rest)| std::iter::once(first).chain(rest).collect::<Vec<_>>());
        let array = literal("[")
            .ignore_then(ws())
            .ignore_then(literal("]"))
            .map(|_| Vec::new())
            .or(literal("[").ignore_then(elements).then_ignore(literal("]")))
            .map(Value::Array)
            .named("array");

        // duplicate keys: the last one wins
        let member = ws()
            .ignore_then(string())
            .then_ignore(ws())
            .then_ignore(literal(":"))
            .then(element);
        let members = member
            .clone()
            .then(literal(",").ignore_then(member).many())
            .map(|(first, rest)| std::iter::once(first).chain(rest).collect::<BTreeMap<_, _>>());
        let object = literal("{")
            .ignore_then(ws())
            .ignore_then(literal("}"))
            .map(|_| BTreeMap::new())
            .or(literal("{").ignore_then(members).then_ignore(literal("}")))
            .map(Value::Object)
            .named("object");

        choice([
            object.boxed(),
            array.boxed(),
            string().map(Value::String).boxed(),
            number(),
            boolean(),
            null(),
        ])
        .named("value")
    })
}

/// A JSON document: a value with optional surrounding whitespace.
pub fn json() -> Parser<Value> {
    ws().ignore_then(value())
        .then_ignore(ws())
        .named("json")
        .boxed()
}
