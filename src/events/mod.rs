//! Engine notifications for presentation layers.
//!
//! The engine knows nothing about rendering, sound, or celebration. It
//! emits `EngineEvent`s at each moment a presentation layer might react
//! to, plus a full `SessionSnapshot` after every state change. Hosts
//! implement `EngineObserver` with whichever hooks they care about.

use serde::{Deserialize, Serialize};

use crate::core::{CardId, Difficulty, SessionSnapshot};

/// Something a presentation layer might react to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineEvent {
    /// A card turned face up.
    CardFlipped { card: CardId },

    /// The pending pair matched and stays revealed.
    PairMatched { cards: [CardId; 2], points: u32 },

    /// The pending pair did not match; the board is locked until the
    /// unflip timer fires.
    PairMissed { cards: [CardId; 2] },

    /// A missed pair went back face down and the board unlocked.
    CardsUnflipped { cards: [CardId; 2] },

    /// One second of play time elapsed.
    ClockTick { elapsed_seconds: u32 },

    /// The last pair was found.
    SessionCompleted { summary: CompletionSummary },
}

/// Final stats for a completed session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionSummary {
    /// Difficulty the session was dealt at.
    pub difficulty: Difficulty,

    /// Match points plus time and moves bonuses, rounded.
    pub final_score: u32,

    /// Seconds from first flip to last match.
    pub elapsed_seconds: u32,

    /// Pair comparisons used.
    pub moves: u32,

    /// Best score on record, after this session was considered.
    pub high_score: u32,

    /// Did this session set the record?
    pub new_high_score: bool,
}

/// Receiver for engine notifications.
///
/// Every method has an empty default body, so observers implement only
/// the hooks they need.
pub trait EngineObserver {
    /// Full snapshot after every state mutation, including clock ticks
    /// and scheduled unflips.
    fn state_changed(&mut self, _snapshot: &SessionSnapshot) {}

    /// Fine-grained event stream, emitted before `state_changed`.
    fn event(&mut self, _event: &EngineEvent) {}

    /// The session just completed. Also emitted as
    /// `EngineEvent::SessionCompleted`.
    fn session_completed(&mut self, _summary: &CompletionSummary) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    struct SilentObserver;

    impl EngineObserver for SilentObserver {}

    #[test]
    fn test_default_hooks_are_noops() {
        let mut observer = SilentObserver;

        observer.event(&EngineEvent::ClockTick { elapsed_seconds: 1 });
        observer.session_completed(&CompletionSummary {
            difficulty: Difficulty::Easy,
            final_score: 226,
            elapsed_seconds: 40,
            moves: 8,
            high_score: 226,
            new_high_score: true,
        });
    }

    #[test]
    fn test_event_serde() {
        let event = EngineEvent::PairMatched {
            cards: [CardId::new(3), CardId::new(9)],
            points: 20,
        };

        let json = serde_json::to_string(&event).unwrap();
        let restored: EngineEvent = serde_json::from_str(&json).unwrap();

        assert_eq!(event, restored);
    }
}
