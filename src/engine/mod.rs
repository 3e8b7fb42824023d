//! The memory-match engine.
//!
//! ## State machine
//!
//! ```text
//! Idle --first flip--> Running --last match--> Complete
//!                      Running --mismatch--> Running (locked)
//!                      Running (locked) --unflip timer--> Running
//! ```
//!
//! Flips on a locked or completed board, re-flips of face-up cards, and
//! flips of matched cards are defined no-ops reported as
//! `FlipOutcome::Ignored`. Only integration mistakes (unknown card id,
//! undersized catalog, no session) are errors.
//!
//! ## Timers
//!
//! The engine owns two cancellable timers obtained from its `Scheduler`:
//! the mismatch unflip and the once-per-tick clock. `start_game` retires
//! both before touching any state, and `timer_fired` ignores handles
//! that match nothing, so a stale callback can never mutate a fresh
//! session.

use crate::catalog::{SymbolCatalog, SymbolId};
use crate::clock::{Scheduler, TimerHandle};
use crate::core::{
    Card, CardId, CardState, DeckRng, Difficulty, EngineConfig, GameSession, SessionPhase,
    SessionSnapshot,
};
use crate::events::{CompletionSummary, EngineEvent, EngineObserver};
use crate::store::ScoreStore;

pub mod error;

pub use error::{EngineError, Result};

/// What a `flip` call did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum FlipOutcome {
    /// The call was a defined no-op; nothing changed.
    Ignored,

    /// First card of a pair turned face up.
    FirstUp { card: CardId },

    /// Second card matched the first; both stay revealed.
    Matched { cards: [CardId; 2], points: u32 },

    /// Second card did not match; the board is locked until the unflip
    /// timer fires.
    Missed { cards: [CardId; 2] },

    /// The match was the last one. The session is complete.
    Completed {
        cards: [CardId; 2],
        points: u32,
        summary: CompletionSummary,
    },
}

impl FlipOutcome {
    /// Did this call change any state?
    #[must_use]
    pub const fn has_update(self) -> bool {
        !matches!(self, FlipOutcome::Ignored)
    }
}

/// What a `timer_fired` call did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TimerOutcome {
    /// The handle matched no pending timer.
    Ignored,

    /// The mismatched pair went back face down and the board unlocked.
    CardsUnflipped,

    /// One second of play time elapsed.
    ClockTicked,
}

impl TimerOutcome {
    /// Did this call change any state?
    #[must_use]
    pub const fn has_update(self) -> bool {
        !matches!(self, TimerOutcome::Ignored)
    }
}

/// The memory-match engine.
///
/// Owns the deck, the flip state machine, scoring, and the two engine
/// timers. Hosts drive it with `start_game` and `flip`, deliver timer
/// callbacks through `timer_fired`, and read state through
/// `current_state` or an attached observer.
///
/// ## Example
///
/// ```
/// use flipmatch::{Difficulty, InMemoryScoreStore, ManualScheduler, MemoryGameEngine};
///
/// let mut engine = MemoryGameEngine::new(ManualScheduler::new(), InMemoryScoreStore::new())
///     .with_seed(42);
///
/// let snapshot = engine.start_game(Difficulty::Easy).unwrap();
/// assert_eq!(snapshot.cards.len(), 16);
///
/// let first = snapshot.cards[0].id;
/// engine.flip(first).unwrap();
/// assert_eq!(engine.current_state().unwrap().face_up_count(), 1);
/// ```
pub struct MemoryGameEngine<S, P> {
    config: EngineConfig,
    catalog: SymbolCatalog,
    rng: DeckRng,
    scheduler: S,
    store: P,
    session: Option<GameSession>,
    high_score: u32,
    pending_unflip: Option<TimerHandle>,
    pending_tick: Option<TimerHandle>,
    observers: Vec<Box<dyn EngineObserver>>,
}

impl<S: Scheduler, P: ScoreStore> MemoryGameEngine<S, P> {
    /// Create an engine with the default configuration, the built-in
    /// catalog, and an entropy-seeded deal RNG.
    pub fn new(scheduler: S, store: P) -> Self {
        let high_score = store.high_score();

        Self {
            config: EngineConfig::default(),
            catalog: SymbolCatalog::builtin(),
            rng: DeckRng::from_entropy(),
            scheduler,
            store,
            session: None,
            high_score,
            pending_unflip: None,
            pending_tick: None,
            observers: Vec::new(),
        }
    }

    /// Use a fixed seed for reproducible deals.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = DeckRng::new(seed);
        self
    }

    /// Replace the configuration.
    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the symbol catalog.
    #[must_use]
    pub fn with_catalog(mut self, catalog: SymbolCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Attach an observer. Observers stay attached for the engine's
    /// lifetime and are called in subscription order.
    pub fn subscribe<O: EngineObserver + 'static>(&mut self, observer: O) {
        self.observers.push(Box::new(observer));
    }

    /// Deal a fresh session, replacing any session in progress.
    ///
    /// Pending timers from the previous session are cancelled first and
    /// the stored high score is re-read. The clock does not start until
    /// the first flip.
    pub fn start_game(&mut self, difficulty: Difficulty) -> Result<SessionSnapshot> {
        self.cancel_pending_timers();

        let board = self.config.settings(difficulty).board;
        let cells = board.cells();
        let pairs = board.pairs();

        if self.catalog.len() < pairs {
            return Err(EngineError::InsufficientSymbols {
                required: pairs,
                available: self.catalog.len(),
            });
        }

        let mut faces: Vec<SymbolId> = Vec::with_capacity(cells);
        for symbol in self.catalog.symbols().iter().take(pairs) {
            faces.push(symbol.id);
            faces.push(symbol.id);
        }
        self.rng.shuffle(&mut faces);

        let cards: Vec<Card> = faces
            .into_iter()
            .enumerate()
            .map(|(position, symbol)| Card::new(CardId::new(position as u16), symbol))
            .collect();

        self.high_score = self.store.high_score();

        let session = GameSession::new(difficulty, cards, pairs as u32);
        let snapshot = session.snapshot(self.high_score);
        self.session = Some(session);

        log::debug!("dealt {cells} cards at {difficulty} on a {board} board");

        self.notify_state_changed(&snapshot);
        Ok(snapshot)
    }

    /// Flip a card.
    ///
    /// Returns `FlipOutcome::Ignored` for the defined no-ops: the board
    /// is locked or complete, the card is matched, or the card is
    /// already the pending selection. Out-of-range ids and calls before
    /// any deal are errors.
    pub fn flip(&mut self, card: CardId) -> Result<FlipOutcome> {
        let session = match self.session.as_mut() {
            Some(session) => session,
            None => return Err(EngineError::NoActiveSession),
        };

        let cells = session.cards().len();
        if card.index() >= cells {
            return Err(EngineError::InvalidCardReference { card, cells });
        }

        if session.is_complete() || session.is_locked() {
            return Ok(FlipOutcome::Ignored);
        }

        match session.card(card).map(|c| c.state) {
            Some(CardState::FaceDown) => {}
            _ => return Ok(FlipOutcome::Ignored),
        }

        // First flip of the session starts the clock.
        if session.phase() == SessionPhase::Idle {
            session.start_clock();
            let handle = self.scheduler.schedule(self.config.tick_interval);
            self.pending_tick = Some(handle);
        }

        session.flip_up(card);

        let outcome = match session.selected_pair() {
            None => FlipOutcome::FirstUp { card },
            Some([first, second]) => {
                let settings = self.config.settings(session.difficulty());

                if session.pair_matches(first, second) {
                    let points = self.config.scoring.match_points(settings);
                    session.record_match(points);

                    if session.is_complete() {
                        if let Some(handle) = self.pending_tick.take() {
                            self.scheduler.cancel(handle);
                        }

                        let elapsed = session.elapsed_seconds();
                        let moves = session.moves();
                        let final_score = self.config.scoring.final_score(
                            settings,
                            session.score(),
                            elapsed,
                            moves,
                            session.total_pairs(),
                        );

                        let new_high_score = final_score > self.high_score;
                        if new_high_score {
                            self.store.set_high_score(final_score);
                            self.high_score = final_score;
                        }

                        let summary = CompletionSummary {
                            difficulty: session.difficulty(),
                            final_score,
                            elapsed_seconds: elapsed,
                            moves,
                            high_score: self.high_score,
                            new_high_score,
                        };

                        log::debug!(
                            "session complete: {final_score} points in {elapsed}s over {moves} moves"
                        );

                        FlipOutcome::Completed {
                            cards: [first, second],
                            points,
                            summary,
                        }
                    } else {
                        FlipOutcome::Matched {
                            cards: [first, second],
                            points,
                        }
                    }
                } else {
                    session.record_mismatch();
                    let handle = self.scheduler.schedule(self.config.unflip_delay);
                    self.pending_unflip = Some(handle);

                    FlipOutcome::Missed {
                        cards: [first, second],
                    }
                }
            }
        };

        let snapshot = session.snapshot(self.high_score);

        log::trace!("flip {card}: {outcome:?}");

        self.emit(&EngineEvent::CardFlipped { card });
        match outcome {
            FlipOutcome::Matched { cards, points } => {
                self.emit(&EngineEvent::PairMatched { cards, points });
            }
            FlipOutcome::Missed { cards } => {
                self.emit(&EngineEvent::PairMissed { cards });
            }
            FlipOutcome::Completed { cards, points, summary } => {
                self.emit(&EngineEvent::PairMatched { cards, points });
                self.emit(&EngineEvent::SessionCompleted { summary });
            }
            _ => {}
        }
        self.notify_state_changed(&snapshot);
        if let FlipOutcome::Completed { summary, .. } = outcome {
            self.notify_completed(&summary);
        }

        Ok(outcome)
    }

    /// Deliver an elapsed timer.
    ///
    /// Handles that match no pending timer are ignored, so hosts may
    /// deliver late callbacks for cancelled timers without harm.
    pub fn timer_fired(&mut self, handle: TimerHandle) -> TimerOutcome {
        if self.pending_unflip == Some(handle) {
            self.pending_unflip = None;

            let session = match self.session.as_mut() {
                Some(session) => session,
                None => return TimerOutcome::Ignored,
            };

            let pair = session.selected_pair();
            session.unflip_selection();
            let snapshot = session.snapshot(self.high_score);

            if let Some(cards) = pair {
                self.emit(&EngineEvent::CardsUnflipped { cards });
            }
            self.notify_state_changed(&snapshot);
            TimerOutcome::CardsUnflipped
        } else if self.pending_tick == Some(handle) {
            self.pending_tick = None;

            let session = match self.session.as_mut() {
                Some(session) => session,
                None => return TimerOutcome::Ignored,
            };

            session.tick();
            let elapsed = session.elapsed_seconds();
            let snapshot = session.snapshot(self.high_score);

            let next = self.scheduler.schedule(self.config.tick_interval);
            self.pending_tick = Some(next);

            self.emit(&EngineEvent::ClockTick {
                elapsed_seconds: elapsed,
            });
            self.notify_state_changed(&snapshot);
            TimerOutcome::ClockTicked
        } else {
            log::trace!("ignoring stale timer {handle}");
            TimerOutcome::Ignored
        }
    }

    /// Read-only snapshot of the current session, if any.
    #[must_use]
    pub fn current_state(&self) -> Option<SessionSnapshot> {
        self.session
            .as_ref()
            .map(|session| session.snapshot(self.high_score))
    }

    /// The session in progress, if any.
    #[must_use]
    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    /// Best final score on record, as read at the last deal or updated
    /// by a completion since.
    #[must_use]
    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// The engine configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The symbol catalog deals draw from.
    #[must_use]
    pub fn catalog(&self) -> &SymbolCatalog {
        &self.catalog
    }

    /// The scheduler the engine schedules timers on.
    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Mutable access to the scheduler, for hosts that drive it.
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// The score store.
    #[must_use]
    pub fn store(&self) -> &P {
        &self.store
    }

    fn cancel_pending_timers(&mut self) {
        if let Some(handle) = self.pending_unflip.take() {
            self.scheduler.cancel(handle);
        }
        if let Some(handle) = self.pending_tick.take() {
            self.scheduler.cancel(handle);
        }
    }

    fn emit(&mut self, event: &EngineEvent) {
        for observer in &mut self.observers {
            observer.event(event);
        }
    }

    fn notify_state_changed(&mut self, snapshot: &SessionSnapshot) {
        for observer in &mut self.observers {
            observer.state_changed(snapshot);
        }
    }

    fn notify_completed(&mut self, summary: &CompletionSummary) {
        for observer in &mut self.observers {
            observer.session_completed(summary);
        }
    }
}
