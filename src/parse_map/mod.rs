mod flags;
mod map;
mod parse_map_builder;
mod rule;

use std::ops::Index;

pub use flags::RegexFlags;
pub use map::ParseMap;
pub use parse_map_builder::{ParseMapBuilder, ParseMapBuilderError};
pub use rule::{Handler, Rule};

/// A value stored by a rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value<V = String> {
    /// The matched text, from a [`Handler::Literal`] rule.
    Text(String),
    /// The output of a [`Handler::Transform`] rule.
    Transformed(V),
}

impl<V> Value<V> {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            Value::Transformed(_) => None,
        }
    }

    pub fn as_transformed(&self) -> Option<&V> {
        match self {
            Value::Text(_) => None,
            Value::Transformed(value) => Some(value),
        }
    }

    pub fn into_transformed(self) -> Option<V> {
        match self {
            Value::Text(_) => None,
            Value::Transformed(value) => Some(value),
        }
    }
}

/// The values found by one successful match, keyed by rule identifier, in table order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbols<V = String> {
    entries: Vec<(String, Value<V>)>,
}

impl<V> Symbols<V> {
    pub fn get(&self, identifier: &str) -> Option<&Value<V>> {
        self.entries
            .iter()
            .find(|(id, _)| id == identifier)
            .map(|(_, value)| value)
    }

    /// The text stored by a `Literal` rule.
    pub fn text(&self, identifier: &str) -> Option<&str> {
        self.get(identifier).and_then(Value::as_text)
    }

    /// The value stored by a `Transform` rule.
    pub fn transformed(&self, identifier: &str) -> Option<&V> {
        self.get(identifier).and_then(Value::as_transformed)
    }

    pub fn identifiers(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(id, _)| id.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value<V>)> + '_ {
        self.entries.iter().map(|(id, value)| (id.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V> Index<&str> for Symbols<V> {
    type Output = Value<V>;

    /// # Panics
    ///
    /// Panics if no rule stored a value under `identifier`.
    fn index(&self, identifier: &str) -> &Value<V> {
        match self.get(identifier) {
            Some(value) => value,
            None => panic!("no symbol named '{}'", identifier),
        }
    }
}

impl<V> IntoIterator for Symbols<V> {
    type Item = (String, Value<V>);
    type IntoIter = std::vec::IntoIter<(String, Value<V>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// The outcome of one successful [`ParseMap::parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult<V = String> {
    symbols: Symbols<V>,
    matched_text: String,
    leading_trim_length: usize,
}

impl<V> MatchResult<V> {
    pub fn symbols(&self) -> &Symbols<V> {
        &self.symbols
    }

    pub fn into_symbols(self) -> Symbols<V> {
        self.symbols
    }

    /// The text matched by the map's full pattern. Excludes stripped whitespace.
    pub fn matched_text(&self) -> &str {
        &self.matched_text
    }

    /// Bytes of leading whitespace stripped before matching. Zero unless the map strips.
    pub fn leading_trim_length(&self) -> usize {
        self.leading_trim_length
    }

    /// How far a caller should advance past the start of the input it passed in.
    pub fn consumed_len(&self) -> usize {
        self.matched_text.len() + self.leading_trim_length
    }
}
