//! Parser configuration.
//!
//! [`ParseOptions`] toggles the stricter behaviours that the grammar itself
//! leaves open. [`ParseOptions::default()`] keeps the lenient historical
//! behaviour:
//!
//! | Setting | Default |
//! |---------|---------|
//! | `strict_numbers` | `false` |
//! | `max_type_depth` | `64` |

/// Default nesting limit for `list<...>`, `set<...>` and `map<...>`.
pub const DEFAULT_MAX_TYPE_DEPTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Reject numeric literals that are not `[+-]digits[.digits]` while
    /// scanning. When off, text like `1.2.3` is accepted as a literal and
    /// only fails where an integer is required.
    pub strict_numbers: bool,
    /// Maximum nesting of container types in a type signature.
    pub max_type_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            strict_numbers: false,
            max_type_depth: DEFAULT_MAX_TYPE_DEPTH,
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strict_numbers(mut self, strict: bool) -> Self {
        self.strict_numbers = strict;
        self
    }

    pub fn max_type_depth(mut self, depth: usize) -> Self {
        self.max_type_depth = depth;
        self
    }
}
