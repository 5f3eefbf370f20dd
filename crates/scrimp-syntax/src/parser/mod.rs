mod declarations;
mod fields;

use crate::ast::*;
use crate::error::{ParseError, Span};
use crate::lexer::{Lexer, SpannedToken, Token};
use crate::options::ParseOptions;
use tracing::{debug, trace};

/// Recursive-descent parser for IDL documents.
///
/// Pulls tokens from a [`Lexer`] one at a time with a single token of
/// lookahead. Doc comments never reach the grammar: they are folded into a
/// pending buffer that the next declaration claims with
/// [`Parser::take_doc_text`]. Use the free function [`parse()`] for a
/// convenient entry point.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    peeked: Option<SpannedToken>,
    doc_text: String,
    pub(super) options: ParseOptions,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        Self::with_options(source, ParseOptions::default())
    }

    pub fn with_options(source: &'a str, options: ParseOptions) -> Self {
        Self {
            lexer: Lexer::with_options(source, &options),
            peeked: None,
            doc_text: String::new(),
            options,
        }
    }

    /// Fetches the next substantive token, absorbing doc comments on the way.
    fn grab(&mut self) -> Result<SpannedToken, ParseError> {
        loop {
            let st = self.lexer.next_token()?;
            match st.token {
                Token::DocComment(raw) => {
                    let body = raw
                        .strip_prefix("/**")
                        .and_then(|s| s.strip_suffix("*/"))
                        .unwrap_or(raw.as_str());
                    self.doc_text.push_str(body.trim_matches([' ', '\t', '\r', '\n']));
                }
                token => {
                    trace!(token = %token.display_name(), line = st.span.line, col = st.span.col, "token");
                    return Ok(SpannedToken { token, span: st.span });
                }
            }
        }
    }

    pub(super) fn peek_spanned(&mut self) -> Result<&SpannedToken, ParseError> {
        let st = match self.peeked.take() {
            Some(st) => st,
            None => self.grab()?,
        };
        Ok(&*self.peeked.insert(st))
    }

    #[inline]
    pub(super) fn peek(&mut self) -> Result<&Token, ParseError> {
        Ok(&self.peek_spanned()?.token)
    }

    #[inline]
    pub(super) fn advance(&mut self) -> Result<SpannedToken, ParseError> {
        match self.peeked.take() {
            Some(st) => Ok(st),
            None => self.grab(),
        }
    }

    /// Consumes the next token if it equals `kind`.
    pub(super) fn take_if(&mut self, kind: Token) -> Result<bool, ParseError> {
        if *self.peek()? == kind {
            self.advance()?;
            return Ok(true);
        }
        Ok(false)
    }

    pub(super) fn expect(&mut self, expected: Token) -> Result<Span, ParseError> {
        let st = self.advance()?;
        if st.token == expected {
            Ok(st.span)
        } else {
            Err(Self::unexpected(&expected.display_name(), &st.token, st.span))
        }
    }

    pub(super) fn expect_identifier(&mut self) -> Result<(String, Span), ParseError> {
        match self.advance()? {
            SpannedToken { token: Token::Identifier(name), span } => Ok((name, span)),
            SpannedToken { token, span } => Err(Self::unexpected("identifier", &token, span)),
        }
    }

    /// Skips one optional `,` or `;`.
    pub(super) fn skip_separator(&mut self) -> Result<(), ParseError> {
        if matches!(self.peek()?, Token::Comma | Token::Semicolon) {
            self.advance()?;
        }
        Ok(())
    }

    pub(super) fn unexpected(expected: &str, found: &Token, span: Span) -> ParseError {
        ParseError::UnexpectedToken {
            expected: expected.to_string(),
            found: found.display_name(),
            span,
        }
    }

    /// Hands the pending doc text to the caller and empties the buffer.
    pub(super) fn take_doc_text(&mut self) -> String {
        std::mem::take(&mut self.doc_text)
    }

    pub(super) fn clear_doc_text(&mut self) {
        self.doc_text.clear();
    }

    /// Parses the whole input: header statements, then declarations, then
    /// end of input.
    pub fn parse_document(mut self) -> Result<Document, ParseError> {
        let mut doc = Document::new();

        loop {
            if self.take_if(Token::Namespace)? {
                self.accept_document_doc_text(&mut doc);
                self.parse_namespace(&mut doc)?;
            } else if self.take_if(Token::Include)? {
                self.accept_document_doc_text(&mut doc);
                self.parse_include(&mut doc)?;
            } else {
                break;
            }
        }

        loop {
            let SpannedToken { token, span } = self.advance()?;
            match token {
                Token::Const => {
                    let constant = self.parse_const()?;
                    debug!(kind = "const", name = %constant.name, "parsed declaration");
                    doc.consts.push(constant);
                }
                Token::Typedef => {
                    let typedef = self.parse_typedef()?;
                    debug!(kind = "typedef", name = %typedef.name, "parsed declaration");
                    doc.typedefs.push(typedef);
                }
                Token::Enum => {
                    let en = self.parse_enum()?;
                    debug!(kind = "enum", name = %en.name, members = en.members.len(), "parsed declaration");
                    doc.enums.push(en);
                }
                Token::Struct => {
                    let st = self.parse_struct()?;
                    debug!(kind = "struct", name = %st.name, fields = st.fields.len(), "parsed declaration");
                    doc.structs.push(st);
                }
                Token::Exception => {
                    let ex = self.parse_struct()?;
                    debug!(kind = "exception", name = %ex.name, fields = ex.fields.len(), "parsed declaration");
                    doc.exceptions.push(ex);
                }
                Token::Service => {
                    let service = self.parse_service()?;
                    debug!(
                        kind = "service",
                        name = %service.name,
                        functions = service.functions.len(),
                        "parsed declaration"
                    );
                    doc.services.push(service);
                }
                Token::Eof => break,
                other => {
                    return Err(Self::unexpected(
                        "'const', 'typedef', 'enum', 'struct', 'exception', 'service' or end of input",
                        &other,
                        span,
                    ));
                }
            }
            // misplaced comments must not reach the next declaration
            self.clear_doc_text();
        }

        debug!(
            namespaces = doc.namespaces.len(),
            includes = doc.includes.len(),
            consts = doc.consts.len(),
            typedefs = doc.typedefs.len(),
            enums = doc.enums.len(),
            structs = doc.structs.len(),
            exceptions = doc.exceptions.len(),
            services = doc.services.len(),
            "parsed document"
        );

        Ok(doc)
    }

    /// The first header statement with a doc comment documents the file.
    fn accept_document_doc_text(&mut self, doc: &mut Document) {
        if doc.doc_text.is_empty() {
            doc.doc_text = self.take_doc_text();
        } else {
            self.clear_doc_text();
        }
    }

    fn parse_namespace(&mut self, doc: &mut Document) -> Result<(), ParseError> {
        let scope = match self.advance()? {
            SpannedToken { token: Token::Identifier(scope), .. } => scope,
            SpannedToken { token: Token::Star, .. } => "*".to_string(),
            SpannedToken { token, span } => {
                return Err(Self::unexpected("namespace scope or '*'", &token, span));
            }
        };
        let (name, _) = self.expect_identifier()?;

        debug!(scope = %scope, namespace = %name, "parsed namespace");
        doc.namespaces.insert(scope, name);
        Ok(())
    }

    fn parse_include(&mut self, doc: &mut Document) -> Result<(), ParseError> {
        let path = match self.advance()? {
            SpannedToken { token: Token::String(raw), .. } => {
                raw.trim_matches(|c| c == '"' || c == '\'').to_string()
            }
            SpannedToken { token, span } => {
                return Err(Self::unexpected("string literal", &token, span));
            }
        };

        debug!(path = %path, "parsed include");
        doc.includes.push(path);
        Ok(())
    }
}

/// Parses IDL source text into a [`Document`] with default options.
///
/// Parsing stops at the first fault; no partial document is returned.
pub fn parse(source: &str) -> Result<Document, ParseError> {
    Parser::new(source).parse_document()
}

pub fn parse_with_options(source: &str, options: ParseOptions) -> Result<Document, ParseError> {
    Parser::with_options(source, options).parse_document()
}
