//! # Scrimp Syntax
//!
//! Lexer, parser and document model for a Thrift-like interface definition
//! language.
//!
//! ## Overview
//!
//! - **Lexer**: pull-based scanner producing [`SpannedToken`]s on demand
//! - **Parser**: recursive descent with one token of lookahead
//! - **Document**: namespaces, includes, consts, typedefs, enums, structs,
//!   exceptions and services, in declaration order
//! - **Errors**: fail-fast [`ParseError`] values carrying a [`Span`]
//!
//! ## Architecture
//!
//! ```text
//! Source text
//!     ↓
//! Lexer (next_token, on demand)
//!     ↓
//! Parser (peek / advance, doc comments folded into a pending buffer)
//!     ↓
//! Document
//! ```
//!
//! ## Example
//!
//! ```rust
//! use scrimp_syntax::parse;
//!
//! let source = r#"
//!     namespace * tutorial
//!
//!     /** A point on the plane. */
//!     struct Point {
//!         1: required i32 x
//!         2: required i32 y
//!     }
//! "#;
//!
//! let doc = parse(source).expect("valid document");
//! assert_eq!(doc.namespaces["*"], "tutorial");
//! assert_eq!(doc.structs[0].doc_text, "A point on the plane.");
//! assert_eq!(doc.structs[0].fields[1].index, 2);
//! ```
//!
//! ## Grammar Overview
//!
//! ```text
//! Document:   Header* Definition* EOF
//! Header:     'namespace' (Identifier | '*') Identifier
//!           | 'include' String
//! Definition: 'const' Type Identifier '=' Literal
//!           | 'typedef' Type Identifier
//!           | 'enum' Identifier '{' (Identifier ('=' Integer)? Sep?)* '}'
//!           | ('struct' | 'exception') Identifier '{' Field* '}'
//!           | 'service' Identifier ('extends' Identifier)? '{' (Function Sep?)* '}'
//! Function:   'oneway'? ('void' | Type) Identifier '(' Field* ')'
//!             ('throws' '(' Field* ')')?
//! Field:      (Integer ':')? ('required' | 'optional')? Type Identifier
//!             ('=' Literal)? Sep?
//! Type:       Identifier | 'list' '<' Type '>' | 'set' '<' Type '>'
//!           | 'map' '<' Type ',' Type '>'
//! Sep:        ',' | ';'
//! ```
//!
//! ## Error Handling
//!
//! ```rust
//! use scrimp_syntax::{parse, Diagnostic};
//!
//! let source = "struct A {\n  1: i32 a\n  1: i32 b\n}";
//! let err = parse(source).unwrap_err();
//! assert_eq!(err.span().line, 3);
//! println!("{}", Diagnostic::new(source, &err));
//! ```

pub mod ast;
pub mod error;
pub mod lexer;
pub mod options;
pub mod parser;

pub use ast::*;
pub use error::{Diagnostic, IndexKind, LexError, ParseError, Span};
pub use lexer::{Lexer, SpannedToken, Token, tokenize, tokenize_with_options};
pub use options::ParseOptions;
pub use parser::{Parser, parse, parse_with_options};
