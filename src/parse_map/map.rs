use super::flags::RegexFlags;
use super::parse_map_builder::{ParseMapBuilder, ParseMapBuilderError};
use super::rule::{Handler, Rule};
use super::{MatchResult, Symbols, Value};
use crate::parse_error::ParseMapError;
use log::Level;
use regex::Regex;
use std::fmt;

const TRACE_TARGET: &str = "parsemap";

/// An ordered table of rules, matched as a unit against the start of some input.
///
/// The concatenation of every rule's fragment (the map's _pattern_) must match a prefix of the
/// input. That prefix is then split up by matching each fragment in turn, and every rule that
/// isn't ignored stores a value under its identifier.
///
/// Matching never mutates the map, so one map can be shared freely.
///
/// Fragments use [`regex`] syntax, which has no lookahead or lookbehind. A terminator such as
/// "everything up to `end poem`" has to be written as its own fragment after a body that cannot
/// run past it (for example, a body of indented lines followed by an `end poem\n` fragment).
#[derive(Debug, Clone)]
pub struct ParseMap<V = String> {
    pub(super) name: Option<String>,
    pub(super) pieces: Vec<Piece<V>>,
    pub(super) pattern: String,
    pub(super) regex: Regex,
    pub(super) strip: bool,
    pub(super) flags: RegexFlags,
    pub(super) trace: Option<Level>,
}

/// A rule together with its anchored, compiled fragment.
#[derive(Debug, Clone)]
pub(super) struct Piece<V> {
    pub(super) rule: Rule<V>,
    pub(super) regex: Regex,
}

impl<V> ParseMap<V> {
    /// Construct a map from its rules, with default options. See [`ParseMapBuilder`] for the
    /// rest.
    pub fn new(rules: Vec<Rule<V>>) -> Result<ParseMap<V>, ParseMapBuilderError> {
        ParseMapBuilder::new().rules(rules).build()
    }

    pub fn builder() -> ParseMapBuilder<V> {
        ParseMapBuilder::new()
    }

    /// Match this map against the start of `input`.
    ///
    /// Fails with [`ParseMapError::InputMatch`] if the map does not apply. Any other error means
    /// the table's fragments don't split up what its full pattern matches.
    pub fn parse(&self, input: &str) -> Result<MatchResult<V>, ParseMapError> {
        match self.attempt(input)? {
            Some(result) => Ok(result),
            None => Err(ParseMapError::InputMatch {
                regex: self.pattern.clone(),
                input: input.to_owned(),
            }),
        }
    }

    /// Like [`parse`](ParseMap::parse), but a map that does not apply gives `Ok(None)` instead of
    /// an error.
    pub fn attempt(&self, input: &str) -> Result<Option<MatchResult<V>>, ParseMapError> {
        let (text, leading_trim_length) = if self.strip {
            let trimmed = input.trim_start();
            (trimmed.trim_end(), input.len() - trimmed.len())
        } else {
            (input, 0)
        };

        let matched = match self.regex.find(text) {
            Some(matched) => matched.as_str(),
            None => {
                self.trace(format_args!("{} does not apply", self));
                return Ok(None);
            }
        };

        let mut slots: Vec<Option<Value<V>>> = self.pieces.iter().map(|_| None).collect();
        let mut index = 0;
        for (piece, slot) in self.pieces.iter().zip(slots.iter_mut()) {
            let substring = &matched[index..];
            self.trace(format_args!(
                "checking substring \"{}\" against regex \"{}\"",
                substring.escape_default(),
                piece.rule.fragment().escape_default()
            ));
            let found = match piece.regex.find(substring) {
                Some(found) => found.as_str(),
                None => {
                    return Err(ParseMapError::NoMatch {
                        regex: piece.rule.fragment().to_owned(),
                        substring: substring.to_owned(),
                    })
                }
            };
            match piece.rule.handler() {
                Handler::Ignore => (),
                Handler::Literal => {
                    if slot.is_some() {
                        return Err(ParseMapError::DuplicateToken {
                            identifier: piece.rule.identifier().to_owned(),
                        });
                    }
                    *slot = Some(Value::Text(found.to_owned()));
                }
                Handler::Transform(func) => *slot = Some(Value::Transformed(func(found))),
            }
            index += found.len();
        }

        let mut missing = vec![];
        let mut entries = vec![];
        for (piece, slot) in self.pieces.iter().zip(slots) {
            if piece.rule.handler().is_ignored() {
                continue;
            }
            match slot {
                Some(value) => entries.push((piece.rule.identifier().to_owned(), value)),
                None => missing.push(piece.rule.identifier().to_owned()),
            }
        }
        if !missing.is_empty() {
            return Err(ParseMapError::MissingToken {
                missing,
                regex: self.pattern.clone(),
                input: input.to_owned(),
            });
        }

        self.trace(format_args!(
            "{} matched \"{}\"",
            self,
            matched.escape_default()
        ));
        Ok(Some(MatchResult {
            symbols: Symbols { entries },
            matched_text: matched.to_owned(),
            leading_trim_length,
        }))
    }

    /// Check that this map's full pattern is exactly `regex`. Useful for making sure a table
    /// wasn't missing a piece of a regex that was tested on its own.
    pub fn assert_match(&self, regex: &str) -> Result<(), ParseMapError> {
        if self.pattern == regex {
            Ok(())
        } else {
            Err(ParseMapError::RegexMismatch {
                mapped: self.pattern.clone(),
                raw: regex.to_owned(),
            })
        }
    }

    /// The full pattern: every fragment, concatenated in order. Not anchored.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn rules(&self) -> impl ExactSizeIterator<Item = &Rule<V>> + '_ {
        self.pieces.iter().map(|piece| &piece.rule)
    }

    /// Identifiers of the rules that store a value, in table order.
    pub fn identifiers(&self) -> impl Iterator<Item = &str> + '_ {
        self.rules()
            .filter(|rule| !rule.handler().is_ignored())
            .map(|rule| rule.identifier())
    }

    pub fn strips(&self) -> bool {
        self.strip
    }

    pub fn flags(&self) -> RegexFlags {
        self.flags
    }

    fn trace(&self, args: fmt::Arguments) {
        if let Some(level) = self.trace {
            log::log!(target: TRACE_TARGET, level, "{}", args);
        }
    }
}

impl<V> fmt::Display for ParseMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "/{}/", self.pattern.escape_default()),
        }
    }
}
