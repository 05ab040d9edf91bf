//! Chess rules used by the pieces API
//!
//! Pure functions and value types with no I/O:
//!
//! - [`types`] - piece kinds, colors and board squares with validating parsers
//! - [`moves`] - knight geometry and the move calculator behind the moves endpoint
//! - [`error`] - parse and validation errors

pub mod error;
pub mod moves;
pub mod types;

pub use error::{RulesError, RulesResult};
pub use moves::{knight_destinations, legal_moves};
pub use types::{File, PieceColor, PieceKind, Rank, Square};
