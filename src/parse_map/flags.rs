use regex::{Error as RegexError, Regex, RegexBuilder};

/// Options applied to every regex a parse map compiles: the full pattern and each fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegexFlags {
    pub case_insensitive: bool,
    /// `^` and `$` match at line boundaries. Parse maps anchor with `\A`, so this does not affect
    /// where a match may start.
    pub multi_line: bool,
    pub dot_matches_new_line: bool,
    /// Verbose mode: whitespace in patterns is ignored, and `#` starts a comment.
    pub ignore_whitespace: bool,
    pub unicode: bool,
}

impl Default for RegexFlags {
    fn default() -> RegexFlags {
        RegexFlags {
            case_insensitive: false,
            multi_line: false,
            dot_matches_new_line: false,
            ignore_whitespace: false,
            unicode: true,
        }
    }
}

impl RegexFlags {
    pub fn case_insensitive() -> RegexFlags {
        RegexFlags {
            case_insensitive: true,
            ..RegexFlags::default()
        }
    }

    /// Compile `pattern` so that it only matches at the very start of the haystack.
    pub(crate) fn compile_anchored(&self, pattern: &str) -> Result<Regex, RegexError> {
        // In verbose mode a trailing `#` comment would swallow the closing paren.
        let anchored = if self.ignore_whitespace {
            format!("\\A(?:{}\n)", pattern)
        } else {
            format!("\\A(?:{})", pattern)
        };
        RegexBuilder::new(&anchored)
            .case_insensitive(self.case_insensitive)
            .multi_line(self.multi_line)
            .dot_matches_new_line(self.dot_matches_new_line)
            .ignore_whitespace(self.ignore_whitespace)
            .unicode(self.unicode)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchored() {
        let regex = RegexFlags::default().compile_anchored("b+").unwrap();
        assert!(regex.find("abb").is_none());
        assert_eq!(regex.find("bba").unwrap().as_str(), "bb");
    }

    #[test]
    fn test_multi_line_stays_anchored() {
        let flags = RegexFlags {
            multi_line: true,
            ..RegexFlags::default()
        };
        let regex = flags.compile_anchored("^x").unwrap();
        assert!(regex.find("a\nx").is_none());
        assert!(regex.find("x\na").is_some());
    }

    #[test]
    fn test_case_insensitive() {
        let regex = RegexFlags::case_insensitive()
            .compile_anchored("let")
            .unwrap();
        assert_eq!(regex.find("LeT x").unwrap().as_str(), "LeT");
    }

    #[test]
    fn test_verbose_trailing_comment() {
        let flags = RegexFlags {
            ignore_whitespace: true,
            ..RegexFlags::default()
        };
        let regex = flags.compile_anchored("[a-z]+ # a word").unwrap();
        assert_eq!(regex.find("ab cd").unwrap().as_str(), "ab");
    }
}
