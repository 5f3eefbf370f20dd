//! Field lists, type signatures, literals and index rules.
//!
//! The same field-list grammar serves struct and exception bodies, function
//! arguments and throws clauses.

use super::Parser;
use crate::ast::Field;
use crate::error::{IndexKind, ParseError, Span};
use crate::lexer::{SpannedToken, Token};
use smallvec::SmallVec;

impl Parser<'_> {
    /// Parses fields up to (not including) the closing `}` or `)`.
    pub(super) fn parse_field_list(&mut self) -> Result<Vec<Field>, ParseError> {
        let mut fields = Vec::new();
        let mut expected: i64 = 1;

        while let Some(field) = self.parse_field(expected)? {
            expected = i64::from(field.index) + 1;
            fields.push(field);
        }

        Ok(fields)
    }

    fn parse_field(&mut self, expected: i64) -> Result<Option<Field>, ParseError> {
        let (at_end, has_index, span) = {
            let st = self.peek_spanned()?;
            (
                matches!(st.token, Token::RightBrace | Token::RightParen),
                matches!(st.token, Token::Number(_)),
                st.span,
            )
        };
        if at_end {
            return Ok(None);
        }

        let index = if has_index {
            let st = self.advance()?;
            self.expect(Token::Colon)?;
            Self::explicit_index(st, expected, IndexKind::Field)?
        } else {
            Self::implicit_index(expected, span)?
        };

        let doc_text = self.take_doc_text();
        let required = if self.take_if(Token::Required)? {
            true
        } else {
            self.take_if(Token::Optional)?;
            false
        };
        let field_type = self.parse_type()?;
        let (name, _) = self.expect_identifier()?;
        let default_value = if self.take_if(Token::Assign)? {
            Some(self.parse_const_value()?)
        } else {
            None
        };
        self.skip_separator()?;

        Ok(Some(Field { index, name, field_type, default_value, required, doc_text }))
    }

    /// Parses a type signature into its canonical string form.
    pub(super) fn parse_type(&mut self) -> Result<String, ParseError> {
        self.parse_type_at(0)
    }

    fn parse_type_at(&mut self, depth: usize) -> Result<String, ParseError> {
        let SpannedToken { token, span } = self.advance()?;
        let container = match token {
            Token::Identifier(name) => return Ok(name),
            Token::List => "list",
            Token::Set => "set",
            Token::Map => "map",
            other => return Err(Self::unexpected("type", &other, span)),
        };

        if depth >= self.options.max_type_depth {
            return Err(ParseError::TypeTooDeep { limit: self.options.max_type_depth, span });
        }

        self.expect(Token::LeftAngle)?;
        let mut args: SmallVec<[String; 2]> = SmallVec::new();
        args.push(self.parse_type_at(depth + 1)?);
        if container == "map" {
            self.expect(Token::Comma)?;
            args.push(self.parse_type_at(depth + 1)?);
        }
        self.expect(Token::RightAngle)?;

        Ok(format!("{}<{}>", container, args.join(",")))
    }

    /// A numeric or string literal, kept as raw text.
    pub(super) fn parse_const_value(&mut self) -> Result<String, ParseError> {
        match self.advance()? {
            SpannedToken { token: Token::Number(text) | Token::String(text), .. } => Ok(text),
            SpannedToken { token, span } => {
                Err(Self::unexpected("number or string literal", &token, span))
            }
        }
    }

    /// Converts an explicit index or enum value and checks it against the
    /// running expectation. Equal is allowed, lower is not.
    pub(super) fn explicit_index(
        st: SpannedToken,
        expected: i64,
        kind: IndexKind,
    ) -> Result<i32, ParseError> {
        let text = match st.token {
            Token::Number(text) => text,
            other => return Err(Self::unexpected("integer", &other, st.span)),
        };
        let value: i32 = text
            .parse()
            .map_err(|_| ParseError::InvalidInteger { text: text.clone(), span: st.span })?;

        if i64::from(value) < expected {
            return Err(ParseError::IndexOutOfOrder { kind, value, expected, span: st.span });
        }
        Ok(value)
    }

    /// The next index in sequence, if it still fits in an `i32`.
    pub(super) fn implicit_index(expected: i64, span: Span) -> Result<i32, ParseError> {
        i32::try_from(expected).map_err(|_| ParseError::InvalidInteger {
            text: expected.to_string(),
            span,
        })
    }
}
