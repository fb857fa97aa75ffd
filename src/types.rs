use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque ID type for a match (regenerated on reset)
pub type MatchId = String;

/// Placeholder shown where no phrase is visible
pub const NO_PHRASE: &str = "—";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Team {
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2")]
    Two,
}

impl Team {
    pub fn other(self) -> Team {
        match self {
            Team::One => Team::Two,
            Team::Two => Team::One,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Team::One => 1,
            Team::Two => 2,
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Team {}", self.number())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    World,
    Sports,
    Science,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::World, Category::Sports, Category::Science];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::World => "world",
            Category::Sports => "sports",
            Category::Science => "science",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "world" => Ok(Category::World),
            "sports" => Ok(Category::Sports),
            "science" => Ok(Category::Science),
            other => Err(format!("Unknown category: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GamePhase {
    Idle,
    CategorySelected,
    InRound,
    RoundEnded,
    MatchWon,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Scores {
    pub team1: u32,
    pub team2: u32,
}

impl Scores {
    pub fn get(&self, team: Team) -> u32 {
        match team {
            Team::One => self.team1,
            Team::Two => self.team2,
        }
    }
}

/// An audio cue for the presentation layer to play
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ToneCue {
    pub frequency_hz: f64,
    pub duration_secs: f64,
}

/// A warning-phase pulse: screen flash plus beep
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FlashCue {
    pub tone: ToneCue,
    /// How long the flash overlay stays visible
    pub overlay_ms: u64,
    /// Warning intensity in [0, 1]
    pub intensity: f64,
}

/// Result of a finished round
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoundOutcome {
    pub scoring_team: Team,
    pub last_phrase: String,
    pub scores: Scores,
}

/// Everything the presentation layer needs to draw one frame
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchView {
    pub match_id: MatchId,
    pub phase: GamePhase,
    /// Phrase currently in play (None outside a round)
    pub phrase: Option<String>,
    pub team_on_turn: Team,
    pub scores: Scores,
    pub status_text: String,
    pub category: Option<Category>,
    /// Category buttons are locked while a round runs
    pub categories_locked: bool,
    pub start_enabled: bool,
    /// Got it / skip controls shown instead of start
    pub in_round_controls: bool,
    pub winner: Option<Team>,
}

impl MatchView {
    /// Text for the phrase slot
    pub fn phrase_text(&self) -> &str {
        self.phrase.as_deref().unwrap_or(NO_PHRASE)
    }
}
