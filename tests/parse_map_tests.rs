#[cfg(test)]
mod parse_map_tests {
    use parsemap::{
        rules, Consumer, Handler, ParseMap, ParseMapBuilderError, ParseMapError, RegexFlags,
        Value,
    };

    fn def_map() -> ParseMap {
        ParseMap::new(rules![
            ("def", "def[ \t]+", Handler::Ignore),
            ("name", "[a-zA-Z_][a-zA-Z0-9_]*", Handler::Literal),
            ("endl", "[ \t]*:[ \t]*\n", Handler::Ignore),
        ])
        .unwrap()
    }

    #[test]
    fn test_def() {
        let result = def_map().parse("def foo:\n").unwrap();
        assert_eq!(result.symbols().identifiers().collect::<Vec<_>>(), vec!["name"]);
        assert_eq!(result.symbols().text("name"), Some("foo"));
        assert_eq!(result.matched_text(), "def foo:\n");
        assert_eq!(result.leading_trim_length(), 0);
    }

    #[test]
    fn test_def_starting_with_digit() {
        match def_map().parse("def 1foo:\n") {
            Err(ParseMapError::InputMatch { regex, input }) => {
                assert_eq!(regex, "def[ \t]+[a-zA-Z_][a-zA-Z0-9_]*[ \t]*:[ \t]*\n");
                assert_eq!(input, "def 1foo:\n");
            }
            other => panic!("expected an input match error, found {:?}", other),
        }
    }

    #[test]
    fn test_transform() {
        let map: ParseMap<i64> = ParseMap::builder()
            .transform("int", "[0-9]+", |s| s.parse().unwrap_or_default())
            .build()
            .unwrap();
        let result = map.parse("42").unwrap();
        assert_eq!(result.symbols()["int"], Value::Transformed(42));
        assert_eq!(result.symbols().text("int"), None);
    }

    #[test]
    fn test_keys_in_table_order() {
        let map: ParseMap<usize> = ParseMap::builder()
            .literal("key", "[a-z]+")
            .ignore("eq", "=")
            .transform("len", "[a-z]*", |s| s.len())
            .ignore("semi", ";")
            .literal("rest", ".*")
            .build()
            .unwrap();
        let result = map.parse("abc=defg;tail").unwrap();
        let symbols = result.symbols();
        assert_eq!(
            symbols.identifiers().collect::<Vec<_>>(),
            map.identifiers().collect::<Vec<_>>()
        );
        assert_eq!(symbols.identifiers().collect::<Vec<_>>(), vec!["key", "len", "rest"]);
        assert_eq!(symbols.text("key"), Some("abc"));
        assert_eq!(symbols.transformed("len"), Some(&4));
        assert_eq!(symbols.text("rest"), Some("tail"));
    }

    #[test]
    fn test_deterministic() {
        let map = def_map();
        let first = map.parse("def   bar :\n").unwrap();
        let second = map.parse("def   bar :\n").unwrap();
        assert_eq!(first, second);
        assert_eq!(first, def_map().parse("def   bar :\n").unwrap());
    }

    #[test]
    fn test_consumption_accounting() {
        let map = def_map();
        let input = "def foo:\ndef bar:\n";
        let first = map.parse(input).unwrap();
        assert_eq!(first.consumed_len(), 9);
        let second = map.parse(&input[first.consumed_len()..]).unwrap();
        assert_eq!(second.symbols().text("name"), Some("bar"));
        assert_eq!(first.consumed_len() + second.consumed_len(), input.len());
    }

    #[test]
    fn test_strip() {
        let map: ParseMap = ParseMap::builder()
            .strip(true)
            .ignore("def", "def[ \t]+")
            .literal("name", "[a-zA-Z_][a-zA-Z0-9_]*")
            .ignore("colon", "[ \t]*:")
            .build()
            .unwrap();
        assert!(map.strips());

        let input = "   def foo:\n";
        let result = map.parse(input).unwrap();
        assert_eq!(result.matched_text(), "def foo:");
        assert_eq!(result.leading_trim_length(), 3);
        assert_eq!(result.consumed_len(), 11);
        assert_eq!(&input[result.consumed_len()..], "\n");
    }

    #[test]
    fn test_strip_trailing_whitespace() {
        let map: ParseMap = ParseMap::builder()
            .strip(true)
            .literal("word", "[a-z]+[ ]*")
            .build()
            .unwrap();
        let result = map.parse("  ab   ").unwrap();
        assert_eq!(result.symbols().text("word"), Some("ab"));
        assert_eq!(result.consumed_len(), 4);
    }

    #[test]
    fn test_match_is_a_prefix() {
        let map: ParseMap = ParseMap::builder().literal("word", "[a-z]+").build().unwrap();
        assert!(matches!(
            map.parse(" ab"),
            Err(ParseMapError::InputMatch { .. })
        ));
        let result = map.parse("ab cd").unwrap();
        assert_eq!(result.matched_text(), "ab");
    }

    #[test]
    fn test_fragments_that_do_not_split_the_match() {
        // The full pattern matches "aab", but the lazy first fragment alone matches nothing,
        // leaving "aab" for a fragment that only matches "ab".
        let map: ParseMap = ParseMap::builder()
            .literal("body", "a*?")
            .ignore("end", "ab")
            .build()
            .unwrap();
        match map.attempt("aab") {
            Err(error @ ParseMapError::NoMatch { .. }) => {
                assert!(error.is_authoring_bug());
                assert_eq!(
                    error,
                    ParseMapError::NoMatch {
                        regex: "ab".to_owned(),
                        substring: "aab".to_owned(),
                    }
                );
            }
            other => panic!("expected a no match error, found {:?}", other),
        }
    }

    #[test]
    fn test_flags() {
        let map: ParseMap = ParseMap::builder()
            .flags(RegexFlags::case_insensitive())
            .ignore("begin", "let ")
            .literal("name", "[a-z]+")
            .build()
            .unwrap();
        assert!(map.flags().case_insensitive);
        assert_eq!(map.parse("LET Foo").unwrap().symbols().text("name"), Some("Foo"));

        let dotall: ParseMap = ParseMap::builder()
            .flags(RegexFlags {
                dot_matches_new_line: true,
                ..RegexFlags::default()
            })
            .literal("block", "<.*>")
            .build()
            .unwrap();
        assert_eq!(
            dotall.parse("<a\nb>").unwrap().symbols().text("block"),
            Some("<a\nb>")
        );

        let verbose: ParseMap = ParseMap::builder()
            .flags(RegexFlags {
                ignore_whitespace: true,
                ..RegexFlags::default()
            })
            .ignore("kw", "let \\s+ # keyword\n")
            .literal("name", "[a-z]+ # name")
            .build()
            .unwrap();
        let result = verbose.parse("let   foo = 1").unwrap();
        assert_eq!(result.symbols().text("name"), Some("foo"));
        assert_eq!(result.matched_text(), "let   foo");
    }

    #[test]
    fn test_construction_errors() {
        assert!(matches!(
            ParseMap::<String>::new(vec![]),
            Err(ParseMapBuilderError::EmptyTable)
        ));
        assert!(matches!(
            ParseMap::<String>::new(rules![
                ("x", "a", Handler::Literal),
                ("x", "b", Handler::Literal),
            ]),
            Err(ParseMapBuilderError::DuplicateIdentifier(_))
        ));
        assert!(matches!(
            ParseMap::<String>::new(rules![("x", "[a", Handler::Literal)]),
            Err(ParseMapBuilderError::InvalidRegex(_))
        ));
    }

    #[test]
    fn test_nested_parse() {
        let args: Consumer = Consumer::new(vec![
            ParseMap::builder().literal("arg", "[a-z0-9]+").build().unwrap(),
            ParseMap::builder().ignore("sep", ",[ ]*").build().unwrap(),
        ]);
        let call: ParseMap<Vec<String>> = ParseMap::builder()
            .literal("func", "[a-z]+")
            .ignore("open", "\\(")
            .transform("args", "[^)]*", move |text| match args.parse(text) {
                Ok(parsed) => parsed
                    .iter()
                    .filter_map(|p| p.symbols().text("arg").map(str::to_owned))
                    .collect(),
                Err(_) => vec![],
            })
            .ignore("close", "\\)")
            .build()
            .unwrap();

        let result = call.parse("max(a, 2,b)").unwrap();
        assert_eq!(result.symbols().text("func"), Some("max"));
        assert_eq!(
            result.symbols().transformed("args"),
            Some(&vec!["a".to_owned(), "2".to_owned(), "b".to_owned()])
        );
    }
}
