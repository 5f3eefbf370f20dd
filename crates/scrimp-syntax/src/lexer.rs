use crate::error::{LexError, Span};
use crate::options::ParseOptions;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::fmt;

static KEYWORDS: Lazy<HashMap<&'static str, Token>> = Lazy::new(|| {
    let mut m = HashMap::with_capacity(17);
    m.insert("namespace", Token::Namespace);
    m.insert("include", Token::Include);
    m.insert("const", Token::Const);
    m.insert("typedef", Token::Typedef);
    m.insert("enum", Token::Enum);
    m.insert("struct", Token::Struct);
    m.insert("exception", Token::Exception);
    m.insert("service", Token::Service);
    m.insert("extends", Token::Extends);
    m.insert("required", Token::Required);
    m.insert("optional", Token::Optional);
    m.insert("oneway", Token::Oneway);
    m.insert("throws", Token::Throws);
    m.insert("void", Token::Void);
    m.insert("list", Token::List);
    m.insert("set", Token::Set);
    m.insert("map", Token::Map);
    m
});

static STRICT_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?[0-9]+(\.[0-9]+)?$").expect("valid number pattern"));

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Namespace,
    Include,
    Const,
    Typedef,
    Enum,
    Struct,
    Exception,
    Service,
    Extends,
    Required,
    Optional,
    Oneway,
    Throws,
    Void,
    List,
    Set,
    Map,
    LeftBrace,
    RightBrace,
    LeftParen,
    RightParen,
    LeftAngle,
    RightAngle,
    Comma,
    Semicolon,
    Colon,
    Assign,
    Star,
    Identifier(String),
    /// Raw numeric text, e.g. `-12` or `3.14`.
    Number(String),
    /// Raw string literal text including its quotes.
    String(String),
    /// Raw `/** ... */` text including the delimiters.
    DocComment(String),
    Eof,
}

impl Token {
    pub fn display_name(&self) -> String {
        match self {
            Token::Namespace => "keyword 'namespace'".to_string(),
            Token::Include => "keyword 'include'".to_string(),
            Token::Const => "keyword 'const'".to_string(),
            Token::Typedef => "keyword 'typedef'".to_string(),
            Token::Enum => "keyword 'enum'".to_string(),
            Token::Struct => "keyword 'struct'".to_string(),
            Token::Exception => "keyword 'exception'".to_string(),
            Token::Service => "keyword 'service'".to_string(),
            Token::Extends => "keyword 'extends'".to_string(),
            Token::Required => "keyword 'required'".to_string(),
            Token::Optional => "keyword 'optional'".to_string(),
            Token::Oneway => "keyword 'oneway'".to_string(),
            Token::Throws => "keyword 'throws'".to_string(),
            Token::Void => "keyword 'void'".to_string(),
            Token::List => "keyword 'list'".to_string(),
            Token::Set => "keyword 'set'".to_string(),
            Token::Map => "keyword 'map'".to_string(),
            Token::LeftBrace => "'{'".to_string(),
            Token::RightBrace => "'}'".to_string(),
            Token::LeftParen => "'('".to_string(),
            Token::RightParen => "')'".to_string(),
            Token::LeftAngle => "'<'".to_string(),
            Token::RightAngle => "'>'".to_string(),
            Token::Comma => "','".to_string(),
            Token::Semicolon => "';'".to_string(),
            Token::Colon => "':'".to_string(),
            Token::Assign => "'='".to_string(),
            Token::Star => "'*'".to_string(),
            Token::Identifier(s) => format!("identifier '{}'", s),
            Token::Number(s) => format!("number {}", s),
            Token::String(s) => format!("string {}", s),
            Token::DocComment(_) => "doc comment".to_string(),
            Token::Eof => "end of input".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpannedToken {
    pub token: Token,
    pub span: Span,
}

fn punctuation(ch: char) -> Option<Token> {
    let token = match ch {
        '{' => Token::LeftBrace,
        '}' => Token::RightBrace,
        '(' => Token::LeftParen,
        ')' => Token::RightParen,
        '<' => Token::LeftAngle,
        '>' => Token::RightAngle,
        ',' => Token::Comma,
        ';' => Token::Semicolon,
        ':' => Token::Colon,
        '=' => Token::Assign,
        '*' => Token::Star,
        _ => return None,
    };
    Some(token)
}

/// Pull-based scanner. Each call to [`Lexer::next_token`] scans exactly one
/// token; nothing is read ahead of the consumer.
pub struct Lexer<'a> {
    source: &'a str,
    offset: usize,
    line: usize,
    col: usize,
    strict_numbers: bool,
    finished: bool,
    failure: Option<LexError>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self::with_options(source, &ParseOptions::default())
    }

    pub fn with_options(source: &'a str, options: &ParseOptions) -> Self {
        Self {
            source,
            offset: 0,
            line: 1,
            col: 1,
            strict_numbers: options.strict_numbers,
            finished: false,
            failure: None,
        }
    }

    #[inline]
    fn peek(&self) -> Option<char> {
        self.source[self.offset..].chars().next()
    }

    #[inline]
    fn peek_nth(&self, n: usize) -> Option<char> {
        self.source[self.offset..].chars().nth(n)
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        if ch == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        self.offset += ch.len_utf8();
        Some(ch)
    }

    fn bump_while(&mut self, pred: impl Fn(char) -> bool) {
        while let Some(ch) = self.peek() {
            if !pred(ch) {
                break;
            }
            self.bump();
        }
    }

    fn eof_token(&self) -> SpannedToken {
        SpannedToken {
            token: Token::Eof,
            span: Span::new(self.line, self.col, self.offset, self.offset),
        }
    }

    /// Scans the next token. Once the stream has ended every further call
    /// repeats the ending: the same error, or `Eof` after a clean finish.
    pub fn next_token(&mut self) -> Result<SpannedToken, LexError> {
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        if self.finished {
            return Ok(self.eof_token());
        }
        let result = self.scan();
        match &result {
            Ok(SpannedToken { token: Token::Eof, .. }) => self.finished = true,
            Err(err) => {
                self.finished = true;
                self.failure = Some(err.clone());
            }
            Ok(_) => {}
        }
        result
    }

    fn scan(&mut self) -> Result<SpannedToken, LexError> {
        loop {
            let start_line = self.line;
            let start_col = self.col;
            let start = self.offset;
            let span_here = |lexer: &Self| Span::new(start_line, start_col, start, lexer.offset);

            let Some(ch) = self.peek() else {
                return Ok(self.eof_token());
            };

            match ch {
                ' ' | '\t' | '\r' | '\n' => {
                    self.bump();
                }

                '#' => {
                    self.bump_while(|c| c != '\n' && c != '\r');
                }

                '/' => match self.peek_nth(1) {
                    Some('/') => {
                        self.bump_while(|c| c != '\n' && c != '\r');
                    }
                    Some('*') => {
                        if let Some(doc) = self.scan_block_comment(start_line, start_col)? {
                            return Ok(SpannedToken { token: Token::DocComment(doc), span: span_here(self) });
                        }
                    }
                    _ => {
                        self.bump();
                        return Err(LexError::UnexpectedChar { ch, span: span_here(self) });
                    }
                },

                '"' | '\'' => {
                    self.bump();
                    self.bump_while(|c| c != ch);
                    if self.bump().is_none() {
                        return Err(LexError::UnterminatedString { span: span_here(self) });
                    }
                    let text = self.source[start..self.offset].to_string();
                    return Ok(SpannedToken { token: Token::String(text), span: span_here(self) });
                }

                '+' | '-' | '0'..='9' => {
                    self.bump();
                    self.bump_while(|c| c.is_ascii_digit() || c == '.');
                    let text = self.source[start..self.offset].to_string();
                    if self.strict_numbers && !STRICT_NUMBER.is_match(&text) {
                        return Err(LexError::InvalidNumber { text, span: span_here(self) });
                    }
                    return Ok(SpannedToken { token: Token::Number(text), span: span_here(self) });
                }

                _ if ch.is_alphabetic() || ch == '_' => {
                    self.bump_while(|c| c.is_alphanumeric() || c == '_' || c == '.');
                    let ident = &self.source[start..self.offset];
                    let token = KEYWORDS
                        .get(ident)
                        .cloned()
                        .unwrap_or_else(|| Token::Identifier(ident.to_string()));
                    return Ok(SpannedToken { token, span: span_here(self) });
                }

                _ => {
                    self.bump();
                    return match punctuation(ch) {
                        Some(token) => Ok(SpannedToken { token, span: span_here(self) }),
                        None => Err(LexError::UnexpectedChar { ch, span: span_here(self) }),
                    };
                }
            }
        }
    }

    /// Consumes a `/* ... */` comment. Returns the raw text for doc comments
    /// (`/** ... */`, but not the empty `/**/`).
    fn scan_block_comment(&mut self, line: usize, col: usize) -> Result<Option<String>, LexError> {
        let start = self.offset;
        self.bump();
        self.bump();

        if self.peek() == Some('*') && self.peek_nth(1) == Some('/') {
            self.bump();
            self.bump();
            return Ok(None);
        }
        let is_doc = self.peek() == Some('*');

        loop {
            match self.bump() {
                Some('*') if self.peek() == Some('/') => {
                    self.bump();
                    break;
                }
                Some(_) => {}
                None => {
                    return Err(LexError::UnterminatedComment {
                        span: Span::new(line, col, start, self.offset),
                    });
                }
            }
        }

        Ok(is_doc.then(|| self.source[start..self.offset].to_string()))
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<SpannedToken, LexError>;

    /// Yields every token including the final `Eof`, or the first error,
    /// then `None`.
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        Some(self.next_token())
    }
}

impl std::iter::FusedIterator for Lexer<'_> {}

/// Scans the whole input. The returned vector always ends with `Eof`.
pub fn tokenize(input: &str) -> Result<Vec<SpannedToken>, LexError> {
    tokenize_with_options(input, &ParseOptions::default())
}

pub fn tokenize_with_options(input: &str, options: &ParseOptions) -> Result<Vec<SpannedToken>, LexError> {
    let mut tokens = Vec::with_capacity(input.len() / 4);
    for token in Lexer::with_options(input, options) {
        tokens.push(token?);
    }
    Ok(tokens)
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::Namespace => write!(f, "namespace"),
            Token::Include => write!(f, "include"),
            Token::Const => write!(f, "const"),
            Token::Typedef => write!(f, "typedef"),
            Token::Enum => write!(f, "enum"),
            Token::Struct => write!(f, "struct"),
            Token::Exception => write!(f, "exception"),
            Token::Service => write!(f, "service"),
            Token::Extends => write!(f, "extends"),
            Token::Required => write!(f, "required"),
            Token::Optional => write!(f, "optional"),
            Token::Oneway => write!(f, "oneway"),
            Token::Throws => write!(f, "throws"),
            Token::Void => write!(f, "void"),
            Token::List => write!(f, "list"),
            Token::Set => write!(f, "set"),
            Token::Map => write!(f, "map"),
            Token::LeftBrace => write!(f, "{{"),
            Token::RightBrace => write!(f, "}}"),
            Token::LeftParen => write!(f, "("),
            Token::RightParen => write!(f, ")"),
            Token::LeftAngle => write!(f, "<"),
            Token::RightAngle => write!(f, ">"),
            Token::Comma => write!(f, ","),
            Token::Semicolon => write!(f, ";"),
            Token::Colon => write!(f, ":"),
            Token::Assign => write!(f, "="),
            Token::Star => write!(f, "*"),
            Token::Identifier(s) => write!(f, "{}", s),
            Token::Number(s) => write!(f, "{}", s),
            Token::String(s) => write!(f, "{}", s),
            Token::DocComment(s) => write!(f, "{}", s),
            Token::Eof => write!(f, ""),
        }
    }
}
