//! Card identity and face state.
//!
//! A `Card` is one tile on the board. Cards are created in bulk when a
//! session is dealt and discarded wholesale when the next deal replaces
//! them - they never move between sessions.

use serde::{Deserialize, Serialize};

use crate::catalog::SymbolId;

/// Board position identifier for a dealt card.
///
/// Positions run `0..cells` in reading order and stay fixed for the
/// whole session. The ID says nothing about the symbol - the two cards
/// of a pair have unrelated IDs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(pub u16);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Get the ID as a board index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Face state of a single card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardState {
    /// Face down and selectable.
    #[default]
    FaceDown,
    /// Face up, waiting for its partner or for the unflip timer.
    FaceUp,
    /// Permanently revealed. Matched cards never flip back.
    Matched,
}

/// One tile on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Fixed board position.
    pub id: CardId,

    /// The symbol shown when face up.
    pub symbol: SymbolId,

    /// Current face state.
    pub state: CardState,
}

impl Card {
    /// Create a face-down card.
    #[must_use]
    pub const fn new(id: CardId, symbol: SymbolId) -> Self {
        Self {
            id,
            symbol,
            state: CardState::FaceDown,
        }
    }

    /// Is this card currently face down?
    #[must_use]
    pub const fn is_face_down(self) -> bool {
        matches!(self.state, CardState::FaceDown)
    }

    /// Is this card face up but not yet matched?
    #[must_use]
    pub const fn is_face_up(self) -> bool {
        matches!(self.state, CardState::FaceUp)
    }

    /// Has this card's pair been found?
    #[must_use]
    pub const fn is_matched(self) -> bool {
        matches!(self.state, CardState::Matched)
    }
}
