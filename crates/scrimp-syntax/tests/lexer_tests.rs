use scrimp_syntax::lexer::{Lexer, Token, tokenize};
use scrimp_syntax::{LexError, ParseOptions};

#[test]
fn test_declaration_tokens() {
    let source = "struct Work { 1: i32 num1 = 0, 2: optional string comment }";
    let tokens: Vec<_> = tokenize(source).unwrap().into_iter().map(|t| t.token).collect();

    assert!(matches!(tokens[0], Token::Struct));
    assert!(matches!(&tokens[1], Token::Identifier(s) if s == "Work"));
    assert!(matches!(tokens[2], Token::LeftBrace));
    assert!(matches!(&tokens[3], Token::Number(s) if s == "1"));
    assert!(matches!(tokens[4], Token::Colon));
    assert!(matches!(&tokens[5], Token::Identifier(s) if s == "i32"));
    assert!(matches!(&tokens[6], Token::Identifier(s) if s == "num1"));
    assert!(matches!(tokens[7], Token::Assign));
    assert!(matches!(&tokens[8], Token::Number(s) if s == "0"));
    assert!(matches!(tokens[9], Token::Comma));
    assert!(matches!(tokens[12], Token::Optional));
    assert!(matches!(tokens.last(), Some(Token::Eof)));
}

#[test]
fn test_generic_type_tokens() {
    let source = "map<string,list<i32>>";
    let tokens: Vec<_> = tokenize(source).unwrap().into_iter().map(|t| t.token).collect();

    assert_eq!(
        tokens,
        vec![
            Token::Map,
            Token::LeftAngle,
            Token::Identifier("string".to_string()),
            Token::Comma,
            Token::List,
            Token::LeftAngle,
            Token::Identifier("i32".to_string()),
            Token::RightAngle,
            Token::RightAngle,
            Token::Eof,
        ]
    );
}

#[test]
fn test_identifier_characters() {
    let tokens = tokenize("_private shared.SharedStruct v2_x").unwrap();

    match &tokens[0].token {
        Token::Identifier(s) => assert_eq!(s, "_private"),
        _ => panic!("Expected identifier token"),
    }
    match &tokens[1].token {
        Token::Identifier(s) => assert_eq!(s, "shared.SharedStruct"),
        _ => panic!("Expected identifier token"),
    }
    match &tokens[2].token {
        Token::Identifier(s) => assert_eq!(s, "v2_x"),
        _ => panic!("Expected identifier token"),
    }
}

#[test]
fn test_keyword_prefix_is_identifier() {
    let tokens = tokenize("structure services mapping").unwrap();

    for token in &tokens[..3] {
        assert!(matches!(token.token, Token::Identifier(_)));
    }
}

#[test]
fn test_comment_styles_mixed() {
    let source = r#"
        # shell style
        // c++ style
        /* c style
           spanning lines */
        /** doc style */
        enum
    "#;
    let tokens: Vec<_> = tokenize(source).unwrap().into_iter().map(|t| t.token).collect();

    assert_eq!(tokens.len(), 3);
    assert!(matches!(&tokens[0], Token::DocComment(s) if s == "/** doc style */"));
    assert!(matches!(tokens[1], Token::Enum));
    assert!(matches!(tokens[2], Token::Eof));
}

#[test]
fn test_doc_comment_span_covers_delimiters() {
    let tokens = tokenize("  /** x */").unwrap();

    assert_eq!(tokens[0].span.start, 2);
    assert_eq!(tokens[0].span.end, 10);
    assert_eq!(tokens[0].span.col, 3);
}

#[test]
fn test_unicode_columns_count_characters() {
    let tokens = tokenize("/* é */ struct").unwrap();

    assert_eq!(tokens[0].span.col, 9);
    assert_eq!(tokens[0].span.start, 9);
}

#[test]
fn test_unterminated_string_reports_start() {
    let err = tokenize("include\n  'shared.thrift").unwrap_err();

    match err {
        LexError::UnterminatedString { span } => {
            assert_eq!(span.line, 2);
            assert_eq!(span.col, 3);
            assert_eq!(span.start, 10);
        }
        other => panic!("Expected UnterminatedString, got {:?}", other),
    }
}

#[test]
fn test_unexpected_character_stops_lexing() {
    let mut lexer = Lexer::new("struct $ A");

    assert!(matches!(lexer.next(), Some(Ok(t)) if t.token == Token::Struct));
    assert!(matches!(lexer.next(), Some(Err(LexError::UnexpectedChar { ch: '$', .. }))));
    assert!(lexer.next().is_none());
}

#[test]
fn test_stream_ends_with_exactly_one_terminator() {
    let results: Vec<_> = Lexer::new("a b c").collect();

    assert_eq!(results.len(), 4);
    assert!(results[..3].iter().all(|r| matches!(r, Ok(t) if t.token != Token::Eof)));
    assert!(matches!(&results[3], Ok(t) if t.token == Token::Eof));
}

#[test]
fn test_strict_number_option() {
    let lenient = Lexer::with_options("1.2.3", &ParseOptions::default()).next();
    let strict = Lexer::with_options("1.2.3", &ParseOptions::new().strict_numbers(true)).next();

    assert!(matches!(lenient, Some(Ok(t)) if t.token == Token::Number("1.2.3".to_string())));
    assert!(matches!(strict, Some(Err(LexError::InvalidNumber { .. }))));
}
