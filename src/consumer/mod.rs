mod cursor;

use crate::parse_error::{ConsumerError, SyntaxError};
use crate::parse_map::{MatchResult, ParseMap, Symbols};
use crate::Span;
use log::Level;
use std::fmt;
use std::sync::Arc;

pub use cursor::Cursor;

const TRACE_TARGET: &str = "parsemap::consumer";
const DEFAULT_HELP: &str = "valid syntax";
const DEFAULT_PREVIEW_LEN: usize = 16;

/// Consumes an entire input by repeatedly applying a list of parse maps.
///
/// At each position the maps are tried in order, and the first one that consumes any input wins,
/// even if a later map would have consumed more. If none of them do, the input has a syntax
/// error.
#[derive(Clone)]
pub struct Consumer<V = String> {
    maps: Vec<ParseMap<V>>,
    help: String,
    format_error: Arc<dyn Fn(&str) -> String + Send + Sync>,
    preview_len: usize,
    trace: Option<Level>,
}

/// One piece of consumed input: what was found, and which map found it.
#[derive(Debug, Clone)]
pub struct Parsed<'c, V = String> {
    pub result: MatchResult<V>,
    pub map: &'c ParseMap<V>,
    /// Position of `map` in the consumer's list.
    pub map_index: usize,
    /// Byte range of the input consumed, including any stripped whitespace.
    pub span: Span,
    /// Line on which `span` starts.
    pub line: usize,
}

impl<'c, V> Parsed<'c, V> {
    pub fn symbols(&self) -> &Symbols<V> {
        self.result.symbols()
    }

    /// Whether this was found by `map` (the very same instance, not an equal one).
    pub fn is_from(&self, map: &ParseMap<V>) -> bool {
        std::ptr::eq(self.map, map)
    }
}

impl<V> Consumer<V> {
    /// A consumer trying `maps` in priority order: earlier maps take precedence.
    pub fn new(maps: Vec<ParseMap<V>>) -> Consumer<V> {
        Consumer {
            maps,
            help: DEFAULT_HELP.to_owned(),
            format_error: Arc::new(|text: &str| text.to_owned()),
            preview_len: DEFAULT_PREVIEW_LEN,
            trace: None,
        }
    }

    /// Description of the accepted syntax, shown in syntax errors.
    pub fn help(mut self, help: &str) -> Consumer<V> {
        self.help = help.to_owned();
        self
    }

    /// Render the offending text of a syntax error. It is passed the text after truncation.
    pub fn format_error(
        mut self,
        format_error: impl Fn(&str) -> String + Send + Sync + 'static,
    ) -> Consumer<V> {
        self.format_error = Arc::new(format_error);
        self
    }

    /// How many characters of the remaining input a syntax error shows.
    pub fn preview_len(mut self, preview_len: usize) -> Consumer<V> {
        self.preview_len = preview_len;
        self
    }

    /// Log each consumed piece, and the failure position, at `level`.
    pub fn trace(mut self, level: Level) -> Consumer<V> {
        self.trace = Some(level);
        self
    }

    pub fn maps(&self) -> &[ParseMap<V>] {
        &self.maps
    }

    /// Consume all of `input`.
    pub fn parse<'c>(&'c self, input: &str) -> Result<Vec<Parsed<'c, V>>, ConsumerError> {
        let mut line = 0;
        self.parse_chunk(input, &mut line)
    }

    /// Consume all of `input`, which must be UTF-8.
    pub fn parse_bytes<'c>(&'c self, input: &[u8]) -> Result<Vec<Parsed<'c, V>>, ConsumerError> {
        let input = std::str::from_utf8(input)?;
        self.parse(input)
    }

    /// Consume all of `input`, a chunk of some larger text. Lines are numbered starting from
    /// `*line`, which is left at the line where consumption stopped.
    pub fn parse_chunk<'c>(
        &'c self,
        input: &str,
        line: &mut usize,
    ) -> Result<Vec<Parsed<'c, V>>, ConsumerError> {
        let mut cursor = Cursor::starting_at_line(input, *line);
        let result = self.consume(&mut cursor);
        *line = cursor.line();
        result
    }

    fn consume<'c>(&'c self, cursor: &mut Cursor) -> Result<Vec<Parsed<'c, V>>, ConsumerError> {
        let mut results = vec![];
        while !cursor.is_exhausted() {
            let line = cursor.line();
            match self.consume_one(cursor)? {
                Some((map_index, result, span)) => {
                    let map = &self.maps[map_index];
                    self.log_event(format_args!(
                        "line {}: {} consumed \"{}\"",
                        line,
                        map,
                        cursor.source()[span.0..span.1].escape_default()
                    ));
                    results.push(Parsed {
                        result,
                        map,
                        map_index,
                        span,
                        line,
                    });
                }
                None => return Err(self.syntax_error(cursor).into()),
            }
        }
        Ok(results)
    }

    fn consume_one(
        &self,
        cursor: &mut Cursor,
    ) -> Result<Option<(usize, MatchResult<V>, Span)>, ConsumerError> {
        for (map_index, map) in self.maps.iter().enumerate() {
            match cursor.attempt(map) {
                Ok(Some((result, span))) => return Ok(Some((map_index, result, span))),
                Ok(None) => (),
                Err(error) => {
                    return Err(ConsumerError::Authoring {
                        map: map.to_string(),
                        offset: cursor.offset(),
                        error,
                    })
                }
            }
        }
        Ok(None)
    }

    fn syntax_error(&self, cursor: &Cursor) -> SyntaxError {
        let preview = cursor
            .remaining()
            .chars()
            .take(self.preview_len)
            .collect::<String>();
        self.log_event(format_args!(
            "line {}: no map applies at byte {}",
            cursor.line(),
            cursor.offset()
        ));
        SyntaxError::new(
            (self.format_error)(&preview),
            &self.help,
            cursor.offset(),
            cursor.line(),
            cursor.column(),
        )
    }

    fn log_event(&self, args: fmt::Arguments) {
        if let Some(level) = self.trace {
            log::log!(target: TRACE_TARGET, level, "{}", args);
        }
    }
}

impl<V> fmt::Debug for Consumer<V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Consumer")
            .field(
                "maps",
                &self.maps.iter().map(|map| map.to_string()).collect::<Vec<_>>(),
            )
            .field("help", &self.help)
            .field("preview_len", &self.preview_len)
            .field("trace", &self.trace)
            .finish()
    }
}
