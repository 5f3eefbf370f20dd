//! Declaration parsing: const, typedef, enum, struct/exception, service.
//!
//! Each routine is entered just after its keyword has been consumed.

use super::Parser;
use crate::ast::*;
use crate::error::{IndexKind, ParseError};
use crate::lexer::Token;

impl Parser<'_> {
    pub(super) fn parse_const(&mut self) -> Result<Constant, ParseError> {
        let doc_text = self.take_doc_text();
        let field_type = self.parse_type()?;
        let (name, _) = self.expect_identifier()?;
        self.expect(Token::Assign)?;
        let value = self.parse_const_value()?;

        Ok(Constant { name, field_type, value, doc_text })
    }

    pub(super) fn parse_typedef(&mut self) -> Result<Typedef, ParseError> {
        let doc_text = self.take_doc_text();
        let field_type = self.parse_type()?;
        let (name, _) = self.expect_identifier()?;

        Ok(Typedef { name, field_type, doc_text })
    }

    pub(super) fn parse_enum(&mut self) -> Result<Enum, ParseError> {
        let (name, _) = self.expect_identifier()?;
        let mut en = Enum {
            name,
            members: Vec::new(),
            doc_text: self.take_doc_text(),
        };
        self.expect(Token::LeftBrace)?;

        let mut expected: i64 = 1;
        while matches!(self.peek()?, Token::Identifier(_)) {
            let (member, span) = self.expect_identifier()?;
            let value = if self.take_if(Token::Assign)? {
                let st = self.advance()?;
                Self::explicit_index(st, expected, IndexKind::EnumValue)?
            } else {
                Self::implicit_index(expected, span)?
            };

            en.insert(member, value);
            expected = i64::from(value) + 1;
            self.skip_separator()?;
        }
        self.expect(Token::RightBrace)?;

        Ok(en)
    }

    /// Body of both `struct` and `exception`.
    pub(super) fn parse_struct(&mut self) -> Result<Struct, ParseError> {
        let (name, _) = self.expect_identifier()?;
        let doc_text = self.take_doc_text();
        self.expect(Token::LeftBrace)?;
        let fields = self.parse_field_list()?;
        self.expect(Token::RightBrace)?;

        Ok(Struct { name, fields, doc_text })
    }

    pub(super) fn parse_service(&mut self) -> Result<Service, ParseError> {
        let (name, _) = self.expect_identifier()?;
        let doc_text = self.take_doc_text();

        let extends = if self.take_if(Token::Extends)? {
            Some(self.expect_identifier()?.0)
        } else {
            None
        };

        self.expect(Token::LeftBrace)?;
        let mut functions = Vec::new();
        while !self.take_if(Token::RightBrace)? {
            functions.push(self.parse_function()?);
            self.skip_separator()?;
        }

        Ok(Service { name, extends, functions, doc_text })
    }

    fn parse_function(&mut self) -> Result<Function, ParseError> {
        let doc_text = self.take_doc_text();
        let oneway = self.take_if(Token::Oneway)?;

        let return_type = if self.take_if(Token::Void)? {
            "void".to_string()
        } else {
            self.parse_type()?
        };
        let (name, _) = self.expect_identifier()?;

        self.expect(Token::LeftParen)?;
        let fields = self.parse_field_list()?;
        self.expect(Token::RightParen)?;

        let throws = if self.take_if(Token::Throws)? {
            self.expect(Token::LeftParen)?;
            let throws = self.parse_field_list()?;
            self.expect(Token::RightParen)?;
            throws
        } else {
            Vec::new()
        };

        // comments inside the signature belong to nobody
        self.clear_doc_text();

        Ok(Function { name, oneway, return_type, fields, throws, doc_text })
    }
}
