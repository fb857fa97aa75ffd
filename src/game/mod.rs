//! Match state machine
//!
//! A [`Match`] owns everything one screen's game needs: scores, the team
//! currently holding the phrase, the selected category with its phrase pool,
//! and the round clock. Commands are synchronous and report effects through a
//! [`Presenter`]; rejected commands return an error and leave the match as it was.

mod clock;
mod phase;
mod pool;
mod presenter;
mod round;
mod score;

pub use clock::{warning_at, RoundClock, RoundTiming, TickOutcome, Warning};
pub use phase::Command;
pub use pool::PhrasePool;
pub use presenter::{MatchEvent, Presenter};

use crate::config::GameConfig;
use crate::phrases::PhraseBook;
use crate::types::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

pub const STATUS_SELECT_CATEGORY: &str = "Select a category to start!";
pub const STATUS_PRESS_START: &str = "Press Start to begin!";
pub const STATUS_IN_ROUND: &str = "Don't say the word!";

/// Result type for match commands
pub type GameResult<T> = Result<T, GameError>;

/// Errors a match command can produce. None of them are fatal: the match stays
/// in its previous stable phase and accepts corrective input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GameError {
    #[error("{command} is not allowed in phase {phase:?}")]
    InvalidTransition { command: Command, phase: GamePhase },

    #[error("Category {0} has no phrases")]
    EmptyCategory(Category),

    #[error("Invalid duration: {0}")]
    InvalidDuration(String),
}

pub struct Match {
    id: MatchId,
    config: GameConfig,
    book: Arc<PhraseBook>,
    pool: Option<PhrasePool>,
    clock: RoundClock,
    scores: Scores,
    current_team: Team,
    category: Option<Category>,
    phase: GamePhase,
    current_phrase: Option<String>,
    status: String,
    winner: Option<Team>,
    last_outcome: Option<RoundOutcome>,
    rng: StdRng,
}

impl Match {
    /// Create a match seeded from the OS random source
    pub fn new(config: GameConfig, book: Arc<PhraseBook>) -> GameResult<Self> {
        Self::with_rng(config, book, StdRng::from_os_rng())
    }

    /// Create a match with an explicit RNG (deterministic in tests)
    pub fn with_rng(config: GameConfig, book: Arc<PhraseBook>, rng: StdRng) -> GameResult<Self> {
        let clock = RoundClock::new(config.round.clone())?;
        Ok(Self {
            id: ulid::Ulid::new().to_string(),
            config,
            book,
            pool: None,
            clock,
            scores: Scores::default(),
            current_team: Team::One,
            category: None,
            phase: GamePhase::Idle,
            current_phrase: None,
            status: STATUS_SELECT_CATEGORY.to_string(),
            winner: None,
            last_outcome: None,
            rng,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phrase_book(&self) -> &PhraseBook {
        &self.book
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn scores(&self) -> Scores {
        self.scores
    }

    pub fn current_team(&self) -> Team {
        self.current_team
    }

    pub fn category(&self) -> Option<Category> {
        self.category
    }

    pub fn current_phrase(&self) -> Option<&str> {
        self.current_phrase.as_deref()
    }

    pub fn winner(&self) -> Option<Team> {
        self.winner
    }

    pub fn last_outcome(&self) -> Option<&RoundOutcome> {
        self.last_outcome.as_ref()
    }

    pub fn pool(&self) -> Option<&PhrasePool> {
        self.pool.as_ref()
    }

    pub fn clock(&self) -> &RoundClock {
        &self.clock
    }

    pub fn is_round_running(&self) -> bool {
        self.phase == GamePhase::InRound
    }

    /// Snapshot for rendering
    pub fn view(&self) -> MatchView {
        let pre_round = matches!(
            self.phase,
            GamePhase::CategorySelected | GamePhase::RoundEnded
        );
        MatchView {
            match_id: self.id.clone(),
            phase: self.phase,
            phrase: self.current_phrase.clone(),
            team_on_turn: self.current_team,
            scores: self.scores,
            status_text: self.status.clone(),
            category: self.category,
            categories_locked: self.is_round_running(),
            start_enabled: pre_round && self.category.is_some(),
            in_round_controls: self.is_round_running(),
            winner: self.winner,
        }
    }

    /// Draw the next phrase from the active pool
    fn draw_phrase(&mut self, command: Command) -> GameResult<String> {
        let pool = self.pool.as_mut().ok_or(GameError::InvalidTransition {
            command,
            phase: self.phase,
        })?;
        pool.draw(&self.book, &mut self.rng)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub fn test_book() -> Arc<PhraseBook> {
        Arc::new(PhraseBook::new([
            (Category::World, vec!["A", "B", "C"]),
            (Category::Sports, vec!["Goal", "Dribble"]),
        ]))
    }

    pub fn test_match() -> Match {
        Match::with_rng(
            GameConfig::default(),
            test_book(),
            StdRng::seed_from_u64(7),
        )
        .unwrap()
    }

    #[test]
    fn test_new_match_is_idle() {
        let game = test_match();
        let view = game.view();

        assert_eq!(view.phase, GamePhase::Idle);
        assert_eq!(view.scores, Scores::default());
        assert_eq!(view.team_on_turn, Team::One);
        assert_eq!(view.status_text, STATUS_SELECT_CATEGORY);
        assert_eq!(view.phrase_text(), NO_PHRASE);
        assert!(!view.start_enabled);
        assert!(!view.categories_locked);
        assert!(game.pool().is_none());
    }

    #[test]
    fn test_new_rejects_invalid_round_config() {
        let mut config = GameConfig::default();
        config.round.min_duration_ms = -5.0;

        let result = Match::new(config, test_book());
        assert!(matches!(result, Err(GameError::InvalidDuration(_))));
    }
}
