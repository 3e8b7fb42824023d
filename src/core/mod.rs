//! Core types: cards, configuration, sessions, and the deal RNG.

pub mod card;
pub mod config;
pub mod rng;
pub mod session;

pub use card::{Card, CardId, CardState};
pub use config::{BoardSpec, Difficulty, DifficultySettings, EngineConfig, ScoringRules};
pub use rng::DeckRng;
pub use session::{GameSession, SessionPhase, SessionSnapshot};
