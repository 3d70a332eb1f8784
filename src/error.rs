//! Error classification shared by every error type in the crate.

use std::fmt;

/// Coarse category of a failure, independent of which component raised it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Palette source missing or malformed
    Palette,
    /// Catalog lookup failed
    Index,
    /// Prototype parse failed
    Prototype,
    /// Raw sprite parse failed or its data is inconsistent
    Sprite,
    /// Split-orientation merge failed
    Merge,
    /// The critter redirect retry also failed
    RecursionExhausted,
    /// A null handle or absent frame was passed to the registry
    InvalidInput,
    /// A handle unknown to the registry was used
    Corrupted,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Palette => "palette",
            ErrorKind::Index => "index",
            ErrorKind::Prototype => "prototype",
            ErrorKind::Sprite => "sprite",
            ErrorKind::Merge => "merge",
            ErrorKind::RecursionExhausted => "recursion exhausted",
            ErrorKind::InvalidInput => "invalid input",
            ErrorKind::Corrupted => "corrupted",
        };
        f.write_str(name)
    }
}
