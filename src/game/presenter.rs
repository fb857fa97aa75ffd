use crate::types::*;

/// Collaborator that turns match effects into pixels and sound.
///
/// The match never touches rendering state itself; it only calls these hooks.
pub trait Presenter {
    /// Called after every accepted command and on every tick of a running round
    fn render(&mut self, view: &MatchView);

    /// Warning-phase pulse, at most once per tick
    fn flash(&mut self, cue: &FlashCue);

    /// End-of-round buzzer
    fn end_signal(&mut self, cue: &ToneCue);

    /// Exactly once per finished round
    fn round_ended(&mut self, outcome: &RoundOutcome);

    /// Exactly once when a team reaches the winning score
    fn match_won(&mut self, team: Team);
}

/// A recorded presenter call
#[derive(Debug, Clone, PartialEq)]
pub enum MatchEvent {
    Render(MatchView),
    Flash(FlashCue),
    EndSignal(ToneCue),
    RoundEnded(RoundOutcome),
    MatchWon(Team),
}

/// Buffers events so callers can forward them after releasing the match
impl Presenter for Vec<MatchEvent> {
    fn render(&mut self, view: &MatchView) {
        self.push(MatchEvent::Render(view.clone()));
    }

    fn flash(&mut self, cue: &FlashCue) {
        self.push(MatchEvent::Flash(*cue));
    }

    fn end_signal(&mut self, cue: &ToneCue) {
        self.push(MatchEvent::EndSignal(*cue));
    }

    fn round_ended(&mut self, outcome: &RoundOutcome) {
        self.push(MatchEvent::RoundEnded(outcome.clone()));
    }

    fn match_won(&mut self, team: Team) {
        self.push(MatchEvent::MatchWon(team));
    }
}
