use super::{GameError, GameResult, Match, PhrasePool, Presenter};
use super::{STATUS_PRESS_START, STATUS_SELECT_CATEGORY};
use crate::types::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Commands the presentation layer can issue
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    SelectCategory,
    StartRound,
    GotIt,
    SkipWord,
    Reset,
}

impl Command {
    pub const ALL: [Command; 5] = [
        Command::SelectCategory,
        Command::StartRound,
        Command::GotIt,
        Command::SkipWord,
        Command::Reset,
    ];
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Command::SelectCategory => "select_category",
            Command::StartRound => "start_round",
            Command::GotIt => "got_it",
            Command::SkipWord => "skip_word",
            Command::Reset => "reset",
        };
        f.write_str(name)
    }
}

impl Match {
    /// Check if a command is accepted in a phase
    pub fn is_command_allowed(command: Command, phase: GamePhase) -> bool {
        use GamePhase::*;

        match (command, phase) {
            // Category can change any time a round isn't running, until someone wins
            (Command::SelectCategory, Idle | CategorySelected | RoundEnded) => true,

            (Command::StartRound, CategorySelected | RoundEnded) => true,

            (Command::GotIt | Command::SkipWord, InRound) => true,

            // Reset always works
            (Command::Reset, _) => true,

            _ => false,
        }
    }

    pub fn commands_allowed_in(phase: GamePhase) -> Vec<Command> {
        Command::ALL
            .into_iter()
            .filter(|c| Self::is_command_allowed(*c, phase))
            .collect()
    }

    /// Commands accepted in the current phase
    pub fn valid_commands(&self) -> Vec<Command> {
        Self::commands_allowed_in(self.phase)
    }

    pub(super) fn ensure_allowed(&self, command: Command) -> GameResult<()> {
        if Self::is_command_allowed(command, self.phase) {
            Ok(())
        } else {
            Err(GameError::InvalidTransition {
                command,
                phase: self.phase,
            })
        }
    }

    /// Choose the category for the next round, starting a fresh phrase pool
    pub fn select_category(
        &mut self,
        category: Category,
        presenter: &mut dyn Presenter,
    ) -> GameResult<()> {
        self.ensure_allowed(Command::SelectCategory)?;

        self.category = Some(category);
        self.pool = Some(PhrasePool::new(category));
        self.current_phrase = None;
        self.phase = GamePhase::CategorySelected;
        self.status = STATUS_PRESS_START.to_string();

        tracing::debug!("Category selected: {}", category);
        presenter.render(&self.view());
        Ok(())
    }

    /// Return to a fresh match: 0-0, team 1 on turn, no category, clock stopped
    pub fn reset(&mut self, presenter: &mut dyn Presenter) {
        if self.clock.stop() {
            tracing::info!("Match reset during a running round");
        }

        self.id = ulid::Ulid::new().to_string();
        self.scores = Scores::default();
        self.current_team = Team::One;
        self.category = None;
        self.pool = None;
        self.phase = GamePhase::Idle;
        self.current_phrase = None;
        self.status = STATUS_SELECT_CATEGORY.to_string();
        self.winner = None;
        self.last_outcome = None;

        tracing::info!("Match reset, new match id {}", self.id);
        presenter.render(&self.view());
    }
}
