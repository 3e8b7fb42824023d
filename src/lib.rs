//! # flipmatch
//!
//! A deterministic memory-matching card game engine.
//!
//! The engine owns the rules: dealing shuffled pairs, the two-card flip
//! cycle, move counting, scoring, and the session clock. Everything
//! host-specific stays outside, so the same core can drive a terminal
//! UI, a web frontend, or a headless test.
//!
//! ## Design Principles
//!
//! 1. **Host-Agnostic**: No rendering, no storage, no real timers.
//!    Hosts inject a `Scheduler`, a `ScoreStore`, and observers.
//!
//! 2. **Deterministic**: Deals run on a seedable RNG. The same seed,
//!    catalog, and input sequence always produce the same session.
//!
//! 3. **Forgiving Input**: Player actions that merely make no sense at
//!    the moment (clicking a matched card, clicking a locked board) are
//!    silent no-ops. Only integration mistakes are errors.
//!
//! ## Modules
//!
//! - `core`: Cards, configuration, sessions, and the deal RNG
//! - `catalog`: The symbols cards show, and the built-in symbol set
//! - `clock`: The `Scheduler` seam and cancellable timer handles
//! - `store`: The `ScoreStore` seam for high-score persistence
//! - `events`: Engine events and the observer trait
//! - `engine`: The `MemoryGameEngine` itself

pub mod core;
pub mod catalog;
pub mod clock;
pub mod store;
pub mod events;
pub mod engine;

// Re-export commonly used types
pub use crate::core::{
    Card, CardId, CardState,
    BoardSpec, Difficulty, DifficultySettings, EngineConfig, ScoringRules,
    DeckRng,
    GameSession, SessionPhase, SessionSnapshot,
};

pub use crate::catalog::{Symbol, SymbolCatalog, SymbolId};

pub use crate::clock::{ManualScheduler, ScheduledTimer, Scheduler, TimerHandle};

pub use crate::store::{InMemoryScoreStore, ScoreStore};

pub use crate::events::{CompletionSummary, EngineEvent, EngineObserver};

pub use crate::engine::{
    EngineError, FlipOutcome, MemoryGameEngine, Result, TimerOutcome,
};
