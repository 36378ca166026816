use super::flags::RegexFlags;
use super::map::{ParseMap, Piece};
use super::rule::{Handler, Rule};
use log::Level;
use regex::Error as RegexError;
use std::collections::HashSet;
use std::mem;
use thiserror::Error;

/// Construct a parse map.
#[derive(Debug)]
pub struct ParseMapBuilder<V = String> {
    name: Option<String>,
    rules: Vec<Rule<V>>,
    strip: bool,
    flags: RegexFlags,
    trace: Option<Level>,
}

/// Error while constructing a parse map.
#[derive(Debug, Clone, Error)]
pub enum ParseMapBuilderError {
    #[error("a parse map needs at least one rule")]
    EmptyTable,
    #[error("identifier '{0}' is used by more than one rule that is not ignored")]
    DuplicateIdentifier(String),
    #[error(transparent)]
    InvalidRegex(#[from] RegexError),
}

impl<V> Default for ParseMapBuilder<V> {
    fn default() -> ParseMapBuilder<V> {
        ParseMapBuilder::new()
    }
}

impl<V> ParseMapBuilder<V> {
    /// Start building a [`ParseMap`]. Rules are consumed in the order they are added.
    pub fn new() -> ParseMapBuilder<V> {
        ParseMapBuilder {
            name: None,
            rules: vec![],
            strip: false,
            flags: RegexFlags::default(),
            trace: None,
        }
    }

    /// Add a rule whose text is consumed and thrown away.
    pub fn ignore(&mut self, identifier: &str, fragment: &str) -> &mut ParseMapBuilder<V> {
        self.rule(Rule::new(identifier, fragment, Handler::Ignore))
    }

    /// Add a rule whose text is stored as-is.
    pub fn literal(&mut self, identifier: &str, fragment: &str) -> &mut ParseMapBuilder<V> {
        self.rule(Rule::new(identifier, fragment, Handler::Literal))
    }

    /// Add a rule whose text is passed to `func`, and the output stored.
    pub fn transform(
        &mut self,
        identifier: &str,
        fragment: &str,
        func: impl Fn(&str) -> V + Send + Sync + 'static,
    ) -> &mut ParseMapBuilder<V> {
        self.rule(Rule::new(identifier, fragment, Handler::transform(func)))
    }

    pub fn rule(&mut self, rule: Rule<V>) -> &mut ParseMapBuilder<V> {
        self.rules.push(rule);
        self
    }

    pub fn rules(&mut self, rules: impl IntoIterator<Item = Rule<V>>) -> &mut ParseMapBuilder<V> {
        self.rules.extend(rules);
        self
    }

    /// Trim whitespace from both ends of the input before matching. The trimmed prefix still
    /// counts as consumed.
    pub fn strip(&mut self, strip: bool) -> &mut ParseMapBuilder<V> {
        self.strip = strip;
        self
    }

    pub fn flags(&mut self, flags: RegexFlags) -> &mut ParseMapBuilder<V> {
        self.flags = flags;
        self
    }

    /// Name used when displaying the map, for instance in error messages.
    pub fn name(&mut self, name: &str) -> &mut ParseMapBuilder<V> {
        self.name = Some(name.to_owned());
        self
    }

    /// Log every matching step at `level`, through the `log` crate.
    pub fn trace(&mut self, level: Level) -> &mut ParseMapBuilder<V> {
        self.trace = Some(level);
        self
    }

    /// Finish the builder pattern, and construct the ParseMap.
    pub fn build(&mut self) -> Result<ParseMap<V>, ParseMapBuilderError> {
        let rules = mem::take(&mut self.rules);
        if rules.is_empty() {
            return Err(ParseMapBuilderError::EmptyTable);
        }

        let mut seen = HashSet::new();
        for rule in &rules {
            if !rule.handler().is_ignored() && !seen.insert(rule.identifier()) {
                return Err(ParseMapBuilderError::DuplicateIdentifier(
                    rule.identifier().to_owned(),
                ));
            }
        }

        // The full pattern is checked first; the fragments then split up what it matched.
        let pattern = rules.iter().map(|rule| rule.fragment()).collect::<String>();
        let regex = self.flags.compile_anchored(&pattern)?;
        let mut pieces = vec![];
        for rule in rules {
            let regex = self.flags.compile_anchored(rule.fragment())?;
            pieces.push(Piece { rule, regex });
        }

        Ok(ParseMap {
            name: self.name.take(),
            pieces,
            pattern,
            regex,
            strip: self.strip,
            flags: self.flags,
            trace: self.trace,
        })
    }
}
