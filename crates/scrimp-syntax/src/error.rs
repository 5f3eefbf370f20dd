use colored::{ColoredString, Colorize};
use std::fmt;

/// Location of a token or fault in the source text.
///
/// `line` and `col` are 1-based and count characters; `start` and `end` are
/// byte offsets into the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub line: usize,
    pub col: usize,
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(line: usize, col: usize, start: usize, end: usize) -> Self {
        Self { line, col, start, end }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.col)
    }
}

/// Scan faults. Any of these ends the token stream.
#[derive(Debug, Clone, PartialEq)]
pub enum LexError {
    UnexpectedChar { ch: char, span: Span },
    UnterminatedString { span: Span },
    UnterminatedComment { span: Span },
    InvalidNumber { text: String, span: Span },
}

impl LexError {
    pub fn span(&self) -> Span {
        match self {
            LexError::UnexpectedChar { span, .. } => *span,
            LexError::UnterminatedString { span } => *span,
            LexError::UnterminatedComment { span } => *span,
            LexError::InvalidNumber { span, .. } => *span,
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::UnexpectedChar { ch, .. } => {
                write!(f, "unexpected character '{}'", ch.escape_debug())
            }
            LexError::UnterminatedString { .. } => {
                write!(f, "unterminated string literal")
            }
            LexError::UnterminatedComment { .. } => {
                write!(f, "unterminated block comment")
            }
            LexError::InvalidNumber { text, .. } => {
                write!(f, "invalid number: '{}'", text)
            }
        }
    }
}

impl std::error::Error for LexError {}

/// Which monotonic sequence an out-of-order number belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    Field,
    EnumValue,
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexKind::Field => write!(f, "field index"),
            IndexKind::EnumValue => write!(f, "enum value"),
        }
    }
}

/// Everything that can stop a parse. The first fault wins; there is no
/// recovery.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    UnexpectedToken { expected: String, found: String, span: Span },
    IndexOutOfOrder { kind: IndexKind, value: i32, expected: i64, span: Span },
    InvalidInteger { text: String, span: Span },
    TypeTooDeep { limit: usize, span: Span },
    Lex(LexError),
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::UnexpectedToken { span, .. } => *span,
            ParseError::IndexOutOfOrder { span, .. } => *span,
            ParseError::InvalidInteger { span, .. } => *span,
            ParseError::TypeTooDeep { span, .. } => *span,
            ParseError::Lex(e) => e.span(),
        }
    }

    /// Byte offset of the offending token.
    pub fn offset(&self) -> usize {
        self.span().start
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnexpectedToken { expected, found, span } => {
                write!(f, "expected {}, found {} at {}", expected, found, span)
            }
            ParseError::IndexOutOfOrder { kind, value, expected, span } => {
                write!(
                    f,
                    "{} {} is out of order, expected at least {} at {}",
                    kind, value, expected, span
                )
            }
            ParseError::InvalidInteger { text, span } => {
                write!(f, "invalid integer '{}' at {}", text, span)
            }
            ParseError::TypeTooDeep { limit, span } => {
                write!(f, "type nesting exceeds the limit of {} at {}", limit, span)
            }
            ParseError::Lex(e) => write!(f, "{} at {}", e, e.span()),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Lex(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError::Lex(err)
    }
}

/// A parse error paired with the source it came from, for rendering.
pub struct Diagnostic<'a> {
    source: &'a str,
    error: &'a ParseError,
}

impl<'a> Diagnostic<'a> {
    pub fn new(source: &'a str, error: &'a ParseError) -> Self {
        Self { source, error }
    }

    fn error_label(&self) -> &'static str {
        match self.error {
            ParseError::Lex(_) => "lexical error",
            _ => "parse error",
        }
    }

    fn message(&self) -> String {
        match self.error {
            ParseError::Lex(e) => e.to_string(),
            ParseError::UnexpectedToken { expected, found, .. } => {
                format!("expected {}, found {}", expected, found)
            }
            ParseError::IndexOutOfOrder { kind, value, expected, .. } => {
                format!("{} {} is out of order, expected at least {}", kind, value, expected)
            }
            ParseError::InvalidInteger { text, .. } => format!("invalid integer '{}'", text),
            ParseError::TypeTooDeep { limit, .. } => {
                format!("type nesting exceeds the limit of {}", limit)
            }
        }
    }

    /// Underline width in characters, at least one.
    fn caret_len(&self, span: Span) -> usize {
        self.source
            .get(span.start..span.end)
            .map(|text| text.lines().next().unwrap_or("").chars().count())
            .unwrap_or(0)
            .max(1)
    }

    /// Renders the error without colour codes.
    pub fn format_plain(&self) -> String {
        self.render(false)
    }

    /// Renders the error with ANSI colours (honours `NO_COLOR` via `colored`).
    pub fn format_error(&self) -> String {
        self.render(true)
    }

    fn render(&self, color: bool) -> String {
        let paint = |text: &str, style: fn(&str) -> ColoredString| -> String {
            if color { style(text).to_string() } else { text.to_string() }
        };

        let span = self.error.span();
        let mut output = String::new();

        output.push_str(&format!("{}: {}\n", paint("error", red), self.message()));
        output.push_str(&format!("  {} line {}:{}\n", paint("-->", blue), span.line, span.col));
        output.push_str(&format!("   {}\n", paint("|", blue)));

        let lines: Vec<&str> = self.source.lines().collect();
        if span.line > 0 && span.line <= lines.len() {
            let line_content = lines[span.line - 1];
            let width = (span.line + 1).to_string().len().max(2);

            output.push_str(&format!(
                " {: >width$} {} {}\n",
                span.line,
                paint("|", blue),
                line_content,
                width = width
            ));

            // tabs are echoed as tabs so the caret lines up with the source
            let padding: String = line_content
                .chars()
                .take(span.col.saturating_sub(1))
                .map(|ch| if ch == '\t' { '\t' } else { ' ' })
                .collect();

            output.push_str(&format!(
                " {: >width$} {} {}{} {}\n",
                "",
                paint("|", blue),
                padding,
                paint(&"^".repeat(self.caret_len(span)), red),
                self.error_label(),
                width = width
            ));
        }

        output.push_str(&format!("   {}", paint("|", blue)));
        output
    }
}

fn red(text: &str) -> ColoredString {
    text.red().bold()
}

fn blue(text: &str) -> ColoredString {
    text.blue().bold()
}

impl fmt::Display for Diagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_plain())
    }
}
