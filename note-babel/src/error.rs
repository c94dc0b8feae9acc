//! Error types for format and block operations

use crate::blocks::BlockId;
use std::fmt;

/// Errors that can occur during format and block operations
#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    /// Format not found in registry
    FormatNotFound(String),
    /// Error during parsing
    ParseError(String),
    /// Error during serialization
    SerializationError(String),
    /// Format does not support the requested operation
    NotSupported(String),
    /// A block kind name outside the known set
    InvalidBlockKind(String),
    /// An editor action referenced a block that is not in the document
    BlockNotFound(BlockId),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::FormatNotFound(name) => write!(f, "Format '{name}' not found"),
            FormatError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            FormatError::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            FormatError::NotSupported(msg) => write!(f, "Operation not supported: {msg}"),
            FormatError::InvalidBlockKind(kind) => write!(f, "Invalid block kind '{kind}'"),
            FormatError::BlockNotFound(id) => write!(f, "Block {id} not found"),
        }
    }
}

impl std::error::Error for FormatError {}
