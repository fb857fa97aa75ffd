use crate::game::{Command, Match, MatchEvent};
use crate::types::*;
use serde::{Deserialize, Serialize};

/// Protocol version sent in the welcome message
pub const PROTOCOL_VERSION: &str = "1.0";

/// Commands from the presentation layer, one per button
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "t", rename_all = "snake_case")]
pub enum ClientMessage {
    SelectCategory { category: Category },
    StartRound,
    GotIt,
    SkipWord,
    ResetGame,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "t", rename_all = "snake_case")]
pub enum ServerMessage {
    Welcome {
        protocol: String,
        view: MatchView,
        /// Categories with at least one phrase
        categories: Vec<Category>,
        valid_commands: Vec<Command>,
        win_score: u32,
        server_now: String,
    },
    /// Fresh frame to draw
    View {
        view: MatchView,
        valid_commands: Vec<Command>,
    },
    Flash {
        cue: FlashCue,
    },
    EndSignal {
        cue: ToneCue,
    },
    RoundEnded {
        outcome: RoundOutcome,
    },
    MatchWon {
        team: Team,
    },
    Error {
        code: String,
        msg: String,
    },
}

impl From<MatchEvent> for ServerMessage {
    fn from(event: MatchEvent) -> Self {
        match event {
            MatchEvent::Render(view) => {
                let valid_commands = Match::commands_allowed_in(view.phase);
                ServerMessage::View {
                    view,
                    valid_commands,
                }
            }
            MatchEvent::Flash(cue) => ServerMessage::Flash { cue },
            MatchEvent::EndSignal(cue) => ServerMessage::EndSignal { cue },
            MatchEvent::RoundEnded(outcome) => ServerMessage::RoundEnded { outcome },
            MatchEvent::MatchWon(team) => ServerMessage::MatchWon { team },
        }
    }
}
