//! Engine error types.

use thiserror::Error;

use crate::core::CardId;

/// Errors surfaced to the host.
///
/// These cover integration mistakes only. In-game anomalies a player
/// can cause (clicking a locked board, re-clicking a face-up card,
/// clicking after completion) are deliberate no-ops, not errors.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineError {
    /// Flip request for a position that was never dealt.
    #[error("{card} is not on the board ({cells} cells)")]
    InvalidCardReference { card: CardId, cells: usize },

    /// The catalog cannot fill the requested board.
    #[error("board needs {required} symbols but the catalog holds {available}")]
    InsufficientSymbols { required: usize, available: usize },

    /// Flip request before any deal.
    #[error("no session is active, call start_game first")]
    NoActiveSession,
}

pub type Result<T> = std::result::Result<T, EngineError>;
