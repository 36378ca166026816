use crate::parse_error::ParseMapError;
use crate::parse_map::{MatchResult, ParseMap};
use crate::Span;

/// A position within some input, along with the line and column it falls on.
///
/// Lines are counted from the text actually consumed, so they stay accurate at the point where
/// matching stops.
#[derive(Debug, Clone)]
pub struct Cursor<'s> {
    source: &'s str,
    index: usize,
    line: usize,
    line_start: usize,
}

impl<'s> Cursor<'s> {
    pub fn new(source: &'s str) -> Cursor<'s> {
        Cursor::starting_at_line(source, 0)
    }

    /// A cursor whose first line is numbered `line`, for input that continues an earlier chunk.
    pub fn starting_at_line(source: &'s str, line: usize) -> Cursor<'s> {
        Cursor {
            source,
            index: 0,
            line,
            line_start: 0,
        }
    }

    pub fn source(&self) -> &'s str {
        self.source
    }

    pub fn remaining(&self) -> &'s str {
        &self.source[self.index..]
    }

    pub fn offset(&self) -> usize {
        self.index
    }

    /// Zero-indexed.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Column number, counted in bytes. Zero-indexed.
    pub fn column(&self) -> usize {
        self.index - self.line_start
    }

    pub fn is_exhausted(&self) -> bool {
        self.index == self.source.len()
    }

    /// Try `map` at the current position, and move past whatever it consumes.
    ///
    /// Gives `Ok(None)` and stays put if the map does not apply, or if it matches without
    /// consuming anything.
    pub fn attempt<V>(
        &mut self,
        map: &ParseMap<V>,
    ) -> Result<Option<(MatchResult<V>, Span)>, ParseMapError> {
        match map.attempt(self.remaining())? {
            Some(result) if result.consumed_len() > 0 => {
                let start = self.index;
                self.advance(result.consumed_len());
                Ok(Some((result, (start, self.index))))
            }
            _ => Ok(None),
        }
    }

    fn advance(&mut self, len: usize) {
        let consumed = &self.source[self.index..self.index + len];
        if let Some(last_newline) = consumed.rfind('\n') {
            self.line += consumed.matches('\n').count();
            self.line_start = self.index + last_newline + 1;
        }
        self.index += len;
    }
}
