//! Session state: one play-through from deal to completion.
//!
//! `GameSession` owns the board and all per-game counters. It enforces
//! the board invariants (at most one unmatched pair face up, matched
//! cards never flip back); the engine layers timers, scoring, and
//! notifications on top.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::card::{Card, CardId, CardState};
use super::config::Difficulty;

/// Lifecycle phase of a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Dealt but untouched. The clock starts on the first flip.
    #[default]
    Idle,
    /// At least one flip has happened and the clock is running.
    Running,
    /// All pairs found. Terminal: only a new deal replaces the session.
    Complete,
}

impl SessionPhase {
    /// Is this the terminal phase?
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, SessionPhase::Complete)
    }
}

/// State for a single game of memory.
///
/// Built by the deal, mutated only through the engine, and replaced
/// wholesale by the next deal - sessions are never partially reset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    difficulty: Difficulty,
    phase: SessionPhase,
    cards: Vec<Card>,
    /// Face-up unmatched cards, oldest first. Holds at most two.
    selection: SmallVec<[CardId; 2]>,
    locked: bool,
    moves: u32,
    score: u32,
    matched_pairs: u32,
    total_pairs: u32,
    elapsed_seconds: u32,
}

impl GameSession {
    pub(crate) fn new(difficulty: Difficulty, cards: Vec<Card>, total_pairs: u32) -> Self {
        debug_assert_eq!(cards.len(), total_pairs as usize * 2);

        Self {
            difficulty,
            phase: SessionPhase::Idle,
            cards,
            selection: SmallVec::new(),
            locked: false,
            moves: 0,
            score: 0,
            matched_pairs: 0,
            total_pairs,
            elapsed_seconds: 0,
        }
    }

    /// Difficulty this session was dealt at.
    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Is the board locked while a mismatch is on display?
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Have all pairs been found?
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Completed pair comparisons so far.
    #[must_use]
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Match points accumulated so far (excludes completion bonuses).
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Pairs found so far.
    #[must_use]
    pub fn matched_pairs(&self) -> u32 {
        self.matched_pairs
    }

    /// Pairs on the board.
    #[must_use]
    pub fn total_pairs(&self) -> u32 {
        self.total_pairs
    }

    /// Seconds since the first flip, frozen at completion.
    #[must_use]
    pub fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    /// All cards in board order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Look up a card by ID.
    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id.index())
    }

    /// Face-up unmatched cards, oldest first.
    #[must_use]
    pub fn selection(&self) -> &[CardId] {
        &self.selection
    }

    /// The pending pair, once two cards are up.
    #[must_use]
    pub fn selected_pair(&self) -> Option<[CardId; 2]> {
        match self.selection.as_slice() {
            &[first, second] => Some([first, second]),
            _ => None,
        }
    }

    /// Capture the public view of this session.
    #[must_use]
    pub fn snapshot(&self, high_score: u32) -> SessionSnapshot {
        SessionSnapshot {
            difficulty: self.difficulty,
            phase: self.phase,
            locked: self.locked,
            cards: self.cards.clone(),
            selection: self.selection.to_vec(),
            moves: self.moves,
            score: self.score,
            matched_pairs: self.matched_pairs,
            total_pairs: self.total_pairs,
            elapsed_seconds: self.elapsed_seconds,
            high_score,
        }
    }

    pub(crate) fn pair_matches(&self, a: CardId, b: CardId) -> bool {
        self.cards[a.index()].symbol == self.cards[b.index()].symbol
    }

    pub(crate) fn start_clock(&mut self) {
        debug_assert_eq!(self.phase, SessionPhase::Idle);
        self.phase = SessionPhase::Running;
    }

    pub(crate) fn flip_up(&mut self, id: CardId) {
        debug_assert!(self.cards[id.index()].is_face_down());
        debug_assert!(self.selection.len() < 2);

        self.cards[id.index()].state = CardState::FaceUp;
        self.selection.push(id);
    }

    pub(crate) fn record_match(&mut self, points: u32) {
        debug_assert_eq!(self.selection.len(), 2);

        for id in std::mem::take(&mut self.selection) {
            self.cards[id.index()].state = CardState::Matched;
        }
        self.moves += 1;
        self.matched_pairs += 1;
        self.score += points;

        if self.matched_pairs == self.total_pairs {
            self.phase = SessionPhase::Complete;
        }
    }

    pub(crate) fn record_mismatch(&mut self) {
        debug_assert_eq!(self.selection.len(), 2);

        self.moves += 1;
        self.locked = true;
    }

    pub(crate) fn unflip_selection(&mut self) {
        for id in std::mem::take(&mut self.selection) {
            self.cards[id.index()].state = CardState::FaceDown;
        }
        self.locked = false;
    }

    pub(crate) fn tick(&mut self) {
        self.elapsed_seconds += 1;
    }
}

/// Read-only view of a session, handed to observers and hosts.
///
/// Snapshots are plain values: serialize them, diff them, or render
/// them without touching the engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Difficulty this session was dealt at.
    pub difficulty: Difficulty,

    /// Current lifecycle phase.
    pub phase: SessionPhase,

    /// Is the board locked while a mismatch is on display?
    pub locked: bool,

    /// All cards in board order.
    pub cards: Vec<Card>,

    /// Face-up unmatched cards, oldest first.
    pub selection: Vec<CardId>,

    /// Completed pair comparisons so far.
    pub moves: u32,

    /// Match points accumulated so far.
    pub score: u32,

    /// Pairs found so far.
    pub matched_pairs: u32,

    /// Pairs on the board.
    pub total_pairs: u32,

    /// Seconds since the first flip.
    pub elapsed_seconds: u32,

    /// Best final score on record when the snapshot was taken.
    pub high_score: u32,
}

impl SessionSnapshot {
    /// Look up a card by ID.
    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id.index())
    }

    /// Number of face-up unmatched cards.
    #[must_use]
    pub fn face_up_count(&self) -> usize {
        self.cards.iter().filter(|c| c.is_face_up()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SymbolId;

    /// Unshuffled board: pair k sits at positions 2k and 2k+1.
    fn dealt(pairs: u16) -> GameSession {
        let mut cards = Vec::new();
        for pair in 0..pairs {
            cards.push(Card::new(CardId::new(pair * 2), SymbolId::new(pair)));
            cards.push(Card::new(CardId::new(pair * 2 + 1), SymbolId::new(pair)));
        }
        GameSession::new(Difficulty::Easy, cards, pairs as u32)
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = dealt(2);

        assert_eq!(session.phase(), SessionPhase::Idle);
        assert!(!session.is_locked());
        assert!(!session.is_complete());
        assert_eq!(session.moves(), 0);
        assert_eq!(session.score(), 0);
        assert_eq!(session.matched_pairs(), 0);
        assert_eq!(session.total_pairs(), 2);
        assert_eq!(session.elapsed_seconds(), 0);
        assert!(session.cards().iter().all(|c| c.is_face_down()));
        assert!(session.selection().is_empty());
    }

    #[test]
    fn test_match_flow() {
        let mut session = dealt(2);

        session.start_clock();
        assert_eq!(session.phase(), SessionPhase::Running);

        session.flip_up(CardId::new(0));
        assert_eq!(session.selection(), &[CardId::new(0)]);
        assert!(session.selected_pair().is_none());

        session.flip_up(CardId::new(1));
        let pair = session.selected_pair().unwrap();
        assert!(session.pair_matches(pair[0], pair[1]));

        session.record_match(10);
        assert_eq!(session.moves(), 1);
        assert_eq!(session.matched_pairs(), 1);
        assert_eq!(session.score(), 10);
        assert!(session.selection().is_empty());
        assert!(session.card(CardId::new(0)).unwrap().is_matched());
        assert!(session.card(CardId::new(1)).unwrap().is_matched());
        assert!(!session.is_complete());
    }

    #[test]
    fn test_mismatch_and_unflip() {
        let mut session = dealt(2);
        session.start_clock();

        session.flip_up(CardId::new(0));
        session.flip_up(CardId::new(2));
        let pair = session.selected_pair().unwrap();
        assert!(!session.pair_matches(pair[0], pair[1]));

        session.record_mismatch();
        assert!(session.is_locked());
        assert_eq!(session.moves(), 1);
        assert!(session.card(CardId::new(0)).unwrap().is_face_up());

        session.unflip_selection();
        assert!(!session.is_locked());
        assert!(session.selection().is_empty());
        assert!(session.card(CardId::new(0)).unwrap().is_face_down());
        assert!(session.card(CardId::new(2)).unwrap().is_face_down());
        assert_eq!(session.moves(), 1);
    }

    #[test]
    fn test_last_match_completes() {
        let mut session = dealt(2);
        session.start_clock();

        session.flip_up(CardId::new(0));
        session.flip_up(CardId::new(1));
        session.record_match(10);

        session.flip_up(CardId::new(2));
        session.flip_up(CardId::new(3));
        session.record_match(10);

        assert!(session.is_complete());
        assert_eq!(session.phase(), SessionPhase::Complete);
        assert_eq!(session.matched_pairs(), session.total_pairs());
        assert_eq!(session.score(), 20);
    }

    #[test]
    fn test_tick_accumulates() {
        let mut session = dealt(1);
        session.start_clock();

        session.tick();
        session.tick();
        session.tick();

        assert_eq!(session.elapsed_seconds(), 3);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut session = dealt(2);
        session.start_clock();
        session.flip_up(CardId::new(0));
        session.tick();

        let snapshot = session.snapshot(150);

        assert_eq!(snapshot.phase, SessionPhase::Running);
        assert_eq!(snapshot.cards.len(), 4);
        assert_eq!(snapshot.selection, vec![CardId::new(0)]);
        assert_eq!(snapshot.elapsed_seconds, 1);
        assert_eq!(snapshot.high_score, 150);
        assert_eq!(snapshot.face_up_count(), 1);
        assert!(snapshot.card(CardId::new(0)).unwrap().is_face_up());
    }

    #[test]
    fn test_snapshot_serde() {
        let mut session = dealt(2);
        session.start_clock();
        session.flip_up(CardId::new(0));

        let snapshot = session.snapshot(0);
        let json = serde_json::to_string(&snapshot).unwrap();
        let restored: SessionSnapshot = serde_json::from_str(&json).unwrap();

        assert_eq!(snapshot, restored);
    }
}
