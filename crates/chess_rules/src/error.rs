//! Error types for chess rules
//!
//! Raised when user-supplied piece fields or board coordinates fail to parse.

use thiserror::Error;

/// Errors that can occur while validating rules input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RulesError {
    /// Piece type outside Pawn, Knight, Bishop, Rook, Queen, King
    #[error("\"{0}\" is not a valid piece type")]
    InvalidPieceKind(String),

    /// Color other than white or black
    #[error("\"{0}\" is not a valid color")]
    InvalidColor(String),

    /// Coordinate that is not a file a-h followed by a rank 1-8
    #[error("\"{0}\" is not a valid board coordinate (expected a1..h8)")]
    InvalidSquare(String),

    /// Move query issued without a coordinate
    #[error("a board coordinate is required")]
    MissingCoordinate,
}

/// Result type alias for rules operations
pub type RulesResult<T> = Result<T, RulesError>;
