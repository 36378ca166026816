//! # Parse maps
//!
//! A small lexing toolkit built on [`regex`]. A [`ParseMap`] is an ordered table of rules, each
//! an identifier, a regex fragment, and a [`Handler`] saying what to do with the text the
//! fragment matches. The fragments are concatenated and matched as one pattern against the start
//! of some input; the matched text is then split up fragment by fragment, producing the
//! [`Symbols`] found.
//!
//! A [`Consumer`] lexes a whole input by trying a list of parse maps at each position, in
//! priority order, until the input runs out or no map applies.
//!
//! ```
//! use parsemap::{Consumer, ParseMap};
//!
//! let let_decl: ParseMap = ParseMap::builder()
//!     .name("let")
//!     .ignore("begin", "let[ \t]+")
//!     .literal("identifier", "[a-z]+")
//!     .ignore("assign", "[ \t]*=[ \t]*")
//!     .literal("value", "[^\n]+")
//!     .ignore("end", "\n")
//!     .build()
//!     .unwrap();
//! let blank: ParseMap = ParseMap::builder().ignore("newlines", "\n+").build().unwrap();
//!
//! let consumer = Consumer::new(vec![let_decl, blank]);
//! let parsed = consumer.parse("let x = 5\n\nlet y = 6\n").unwrap();
//! assert_eq!(parsed.len(), 3);
//! assert_eq!(parsed[2].symbols().text("identifier"), Some("y"));
//! ```

mod consumer;
mod parse_error;
mod parse_map;

pub use consumer::{Consumer, Cursor, Parsed};
pub use parse_error::{ConsumerError, ParseMapError, SyntaxError};
pub use parse_map::{
    Handler, MatchResult, ParseMap, ParseMapBuilder, ParseMapBuilderError, RegexFlags, Rule,
    Symbols, Value,
};

/// A start and end byte offset into the input. The start is inclusive and the end exclusive.
pub type Span = (usize, usize);

/// Build a `Vec` of [`Rule`]s from `(identifier, fragment, handler)` triples.
///
/// ```
/// use parsemap::{rules, Handler, ParseMap};
///
/// let map: ParseMap<u32> = ParseMap::new(rules![
///     ("int", "[0-9]+", Handler::transform(|s| s.parse().unwrap_or(0))),
///     ("unit", "[a-z]*", Handler::Literal),
/// ])
/// .unwrap();
/// assert_eq!(map.parse("12km").unwrap().symbols().transformed("int"), Some(&12));
/// ```
#[macro_export]
macro_rules! rules {
    ($(($identifier:expr, $fragment:expr, $handler:expr)),* $(,)?) => {
        vec![$($crate::Rule::new($identifier, $fragment, $handler)),*]
    };
}
