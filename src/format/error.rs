//! Format string compilation errors

/// Reasons a format string fails to compile.
///
/// Raised only at compile time; a mask that compiled never fails to apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// A group is left open, or a closing bracket has no opening one
    UnbalancedBrackets { position: usize },
    /// A `[` inside `[...]` or a `{` inside `{...}`
    NestedBrackets { position: usize },
    /// A symbol inside `[...]` with no built-in or custom notation
    UnknownSymbol(char),
    /// An ellipsis whose preceding symbol has no resolvable type
    DanglingEllipsis,
}

impl std::fmt::Display for FormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnbalancedBrackets { position } => {
                write!(f, "malformed format: unbalanced bracket at {}", position)
            }
            Self::NestedBrackets { position } => {
                write!(f, "malformed format: nested bracket at {}", position)
            }
            Self::UnknownSymbol(ch) => {
                write!(f, "malformed format: no notation for symbol '{}'", ch)
            }
            Self::DanglingEllipsis => {
                write!(f, "malformed format: ellipsis has no preceding value type")
            }
        }
    }
}

impl std::error::Error for FormatError {}
