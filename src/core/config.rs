//! Engine configuration types.
//!
//! Hosts configure the engine at startup by providing:
//! - `BoardSpec`: grid dimensions per difficulty
//! - `ScoringRules`: match points and completion bonuses
//! - `EngineConfig`: combines all configuration
//!
//! The engine never hardcodes grid sizes or score weights - defaults
//! match the classic 4x4/6x6/8x8 progression, and every knob can be
//! overridden.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Difficulty level selected at deal time.
///
/// Difficulty picks the board and the score weights via `EngineConfig`;
/// the flip rules are identical on every level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// All difficulties, easiest first.
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        };
        write!(f, "{}", name)
    }
}

/// Grid dimensions for one board.
///
/// The cell count must be even - every card needs a partner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardSpec {
    /// Number of columns.
    pub columns: u16,

    /// Number of rows.
    pub rows: u16,
}

impl BoardSpec {
    /// Create a new board spec.
    ///
    /// Panics if either dimension is zero, if the cell count is odd, or
    /// if the board exceeds the addressable card range.
    pub fn new(columns: u16, rows: u16) -> Self {
        assert!(columns > 0 && rows > 0, "Board dimensions must be non-zero");

        let cells = columns as usize * rows as usize;
        assert!(cells % 2 == 0, "Board must have an even number of cells");
        assert!(
            cells <= usize::from(u16::MAX) + 1,
            "Board exceeds the addressable card range"
        );

        Self { columns, rows }
    }

    /// Create a square board.
    pub fn square(side: u16) -> Self {
        Self::new(side, side)
    }

    /// Total number of cells.
    #[must_use]
    pub const fn cells(self) -> usize {
        self.columns as usize * self.rows as usize
    }

    /// Number of pairs dealt onto this board.
    #[must_use]
    pub const fn pairs(self) -> usize {
        self.cells() / 2
    }
}

impl std::fmt::Display for BoardSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.columns, self.rows)
    }
}

/// Per-difficulty board and score weights.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DifficultySettings {
    /// Grid to deal for this difficulty.
    pub board: BoardSpec,

    /// Multiplier applied to the base match points.
    pub score_multiplier: u32,

    /// Weight applied to each second under par in the time bonus.
    pub time_bonus_weight: f32,
}

impl DifficultySettings {
    /// Create new settings.
    pub fn new(board: BoardSpec, score_multiplier: u32, time_bonus_weight: f32) -> Self {
        Self {
            board,
            score_multiplier,
            time_bonus_weight,
        }
    }
}

/// Scoring weights shared by every difficulty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringRules {
    /// Points per match before the difficulty multiplier.
    pub match_base: u32,

    /// Completions faster than this earn a time bonus.
    pub par_seconds: u32,

    /// Points per unused move in the moves bonus. The move budget is
    /// twice the pair count.
    pub moves_bonus_factor: u32,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            match_base: 10,
            par_seconds: 300,
            moves_bonus_factor: 2,
        }
    }
}

impl ScoringRules {
    /// Points awarded for one match at the given settings.
    #[must_use]
    pub fn match_points(&self, settings: &DifficultySettings) -> u32 {
        self.match_base * settings.score_multiplier
    }

    /// Final score for a completed session.
    ///
    /// `base_score` is the sum of match points; the time and moves
    /// bonuses are floored at zero, so slow or wasteful games simply
    /// earn no bonus. The result is rounded to the nearest point.
    #[must_use]
    pub fn final_score(
        &self,
        settings: &DifficultySettings,
        base_score: u32,
        elapsed_seconds: u32,
        moves: u32,
        total_pairs: u32,
    ) -> u32 {
        let seconds_under_par = self.par_seconds.saturating_sub(elapsed_seconds);
        let time_bonus = seconds_under_par as f32 * settings.time_bonus_weight;

        let move_budget = total_pairs * 2;
        let moves_bonus = move_budget.saturating_sub(moves) * self.moves_bonus_factor;

        (base_score as f32 + time_bonus + moves_bonus as f32).round() as u32
    }
}

/// Complete engine configuration.
///
/// Hosts provide this at startup. `Default` is the classic progression:
/// Easy 4x4 at 1x, Medium 6x6 at 2x, Hard 8x8 at 3x, one-second timers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Settings for Easy deals.
    pub easy: DifficultySettings,

    /// Settings for Medium deals.
    pub medium: DifficultySettings,

    /// Settings for Hard deals.
    pub hard: DifficultySettings,

    /// Scoring weights shared by every difficulty.
    pub scoring: ScoringRules,

    /// How long a mismatched pair stays face up before the unflip.
    pub unflip_delay: Duration,

    /// Interval between clock ticks while a session is running.
    pub tick_interval: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            easy: DifficultySettings::new(BoardSpec::square(4), 1, 0.5),
            medium: DifficultySettings::new(BoardSpec::square(6), 2, 1.0),
            hard: DifficultySettings::new(BoardSpec::square(8), 3, 1.5),
            scoring: ScoringRules::default(),
            unflip_delay: Duration::from_secs(1),
            tick_interval: Duration::from_secs(1),
        }
    }
}

impl EngineConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Settings for a difficulty.
    #[must_use]
    pub fn settings(&self, difficulty: Difficulty) -> &DifficultySettings {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
        }
    }

    /// Board dealt for a difficulty.
    #[must_use]
    pub fn board(&self, difficulty: Difficulty) -> BoardSpec {
        self.settings(difficulty).board
    }

    /// Replace the settings for one difficulty.
    #[must_use]
    pub fn with_settings(mut self, difficulty: Difficulty, settings: DifficultySettings) -> Self {
        match difficulty {
            Difficulty::Easy => self.easy = settings,
            Difficulty::Medium => self.medium = settings,
            Difficulty::Hard => self.hard = settings,
        }
        self
    }

    /// Replace the board for one difficulty, keeping its score weights.
    #[must_use]
    pub fn with_board(mut self, difficulty: Difficulty, board: BoardSpec) -> Self {
        match difficulty {
            Difficulty::Easy => self.easy.board = board,
            Difficulty::Medium => self.medium.board = board,
            Difficulty::Hard => self.hard.board = board,
        }
        self
    }

    /// Replace the scoring weights.
    #[must_use]
    pub fn with_scoring(mut self, scoring: ScoringRules) -> Self {
        self.scoring = scoring;
        self
    }

    /// Set the mismatch review interval.
    #[must_use]
    pub fn with_unflip_delay(mut self, delay: Duration) -> Self {
        self.unflip_delay = delay;
        self
    }

    /// Set the clock tick interval.
    #[must_use]
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_default_is_easy() {
        assert_eq!(Difficulty::default(), Difficulty::Easy);
        assert_eq!(format!("{}", Difficulty::Medium), "Medium");
    }

    #[test]
    fn test_board_spec() {
        let board = BoardSpec::square(4);
        assert_eq!(board.cells(), 16);
        assert_eq!(board.pairs(), 8);
        assert_eq!(format!("{}", board), "4x4");

        let wide = BoardSpec::new(6, 3);
        assert_eq!(wide.cells(), 18);
        assert_eq!(wide.pairs(), 9);
    }

    #[test]
    #[should_panic(expected = "even number of cells")]
    fn test_odd_board_panics() {
        BoardSpec::new(3, 3);
    }

    #[test]
    #[should_panic(expected = "non-zero")]
    fn test_zero_board_panics() {
        BoardSpec::new(0, 4);
    }

    #[test]
    fn test_default_progression() {
        let config = EngineConfig::default();

        assert_eq!(config.board(Difficulty::Easy), BoardSpec::square(4));
        assert_eq!(config.board(Difficulty::Medium), BoardSpec::square(6));
        assert_eq!(config.board(Difficulty::Hard), BoardSpec::square(8));

        assert_eq!(config.settings(Difficulty::Easy).score_multiplier, 1);
        assert_eq!(config.settings(Difficulty::Medium).score_multiplier, 2);
        assert_eq!(config.settings(Difficulty::Hard).score_multiplier, 3);

        assert_eq!(config.unflip_delay, Duration::from_secs(1));
        assert_eq!(config.tick_interval, Duration::from_secs(1));
    }

    #[test]
    fn test_match_points() {
        let config = EngineConfig::default();
        let scoring = config.scoring;

        assert_eq!(scoring.match_points(config.settings(Difficulty::Easy)), 10);
        assert_eq!(scoring.match_points(config.settings(Difficulty::Medium)), 20);
        assert_eq!(scoring.match_points(config.settings(Difficulty::Hard)), 30);
    }

    #[test]
    fn test_final_score_worked_example() {
        // Easy board, all 8 pairs in 8 moves and 40 seconds:
        // 80 base + 260 * 0.5 time bonus + 8 * 2 moves bonus = 226
        let config = EngineConfig::default();
        let easy = config.settings(Difficulty::Easy);

        let final_score = config.scoring.final_score(easy, 80, 40, 8, 8);
        assert_eq!(final_score, 226);
    }

    #[test]
    fn test_final_score_bonuses_floor_at_zero() {
        let config = EngineConfig::default();
        let easy = config.settings(Difficulty::Easy);

        // Slower than par: no time bonus
        let slow = config.scoring.final_score(easy, 80, 400, 8, 8);
        assert_eq!(slow, 80 + 16);

        // Over the move budget: no moves bonus
        let wasteful = config.scoring.final_score(easy, 80, 400, 50, 8);
        assert_eq!(wasteful, 80);
    }

    #[test]
    fn test_config_builders() {
        let config = EngineConfig::new()
            .with_board(Difficulty::Easy, BoardSpec::square(2))
            .with_unflip_delay(Duration::from_millis(500))
            .with_scoring(ScoringRules {
                match_base: 5,
                par_seconds: 60,
                moves_bonus_factor: 1,
            });

        assert_eq!(config.board(Difficulty::Easy), BoardSpec::square(2));
        assert_eq!(config.unflip_delay, Duration::from_millis(500));
        assert_eq!(config.scoring.match_base, 5);

        // Untouched difficulties keep their defaults
        assert_eq!(config.board(Difficulty::Hard), BoardSpec::square(8));
    }

    #[test]
    fn test_with_settings_replaces_whole_entry() {
        let custom = DifficultySettings::new(BoardSpec::new(4, 2), 5, 2.0);
        let config = EngineConfig::new().with_settings(Difficulty::Medium, custom);

        assert_eq!(config.settings(Difficulty::Medium).board.cells(), 8);
        assert_eq!(config.settings(Difficulty::Medium).score_multiplier, 5);
    }
}
