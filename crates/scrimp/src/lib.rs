//! Front-end for a Thrift-like IDL.
//!
//! Parses one source unit into a [`Document`] for a downstream generator.
//! Reading files and resolving `include` targets is left to the caller: call
//! [`parse`] once per unit.

pub use scrimp_syntax::{
    Constant, Diagnostic, Document, Enum, EnumMember, Field, Function, IndexKind, LexError,
    ParseError, ParseOptions, Service, Span, Struct, Typedef, parse, parse_with_options,
};
pub use scrimp_syntax;

pub mod prelude {
    pub use crate::{Diagnostic, Document, ParseError, ParseOptions, parse, parse_with_options};
}
