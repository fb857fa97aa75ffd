use super::{Command, GameError, GameResult, Match, Presenter, RoundTiming, STATUS_IN_ROUND};
use crate::types::*;

impl Match {
    /// Start a round at `now_ms` with randomly sampled timing
    pub fn start_round(&mut self, now_ms: u64, presenter: &mut dyn Presenter) -> GameResult<()> {
        self.ensure_allowed(Command::StartRound)?;
        let timing = RoundTiming::sample(now_ms, self.clock.config(), &mut self.rng)?;
        self.start_round_with(timing, presenter)
    }

    /// Start a round with explicit timing
    pub fn start_round_with(
        &mut self,
        timing: RoundTiming,
        presenter: &mut dyn Presenter,
    ) -> GameResult<()> {
        self.ensure_allowed(Command::StartRound)?;
        let category = self.category.ok_or(GameError::InvalidTransition {
            command: Command::StartRound,
            phase: self.phase,
        })?;

        // Draw before touching the clock so an empty category leaves the match untouched
        let phrase = self.draw_phrase(Command::StartRound)?;

        self.clock.start_with(timing);
        self.current_phrase = Some(phrase);
        self.phase = GamePhase::InRound;
        self.status = STATUS_IN_ROUND.to_string();
        self.last_outcome = None;

        tracing::info!(
            "Round started: category={}, team={}, base={:.0}ms, end={:.0}ms",
            category,
            self.current_team.number(),
            timing.base_duration_ms(),
            timing.end_time_ms()
        );
        presenter.render(&self.view());
        Ok(())
    }

    /// The team on turn got their partners to say it: pass a new phrase to the other team
    pub fn got_it(&mut self, presenter: &mut dyn Presenter) -> GameResult<()> {
        self.ensure_allowed(Command::GotIt)?;
        let phrase = self.draw_phrase(Command::GotIt)?;

        self.current_team = self.current_team.other();
        self.current_phrase = Some(phrase);

        presenter.render(&self.view());
        Ok(())
    }

    /// Replace the phrase without passing it on
    pub fn skip_word(&mut self, presenter: &mut dyn Presenter) -> GameResult<()> {
        self.ensure_allowed(Command::SkipWord)?;
        let phrase = self.draw_phrase(Command::SkipWord)?;

        self.current_phrase = Some(phrase);

        presenter.render(&self.view());
        Ok(())
    }

    /// Advance the round clock to `now_ms`. Returns whether the round is still running.
    pub fn tick(&mut self, now_ms: u64, presenter: &mut dyn Presenter) -> bool {
        if !self.is_round_running() {
            return false;
        }

        let outcome = self.clock.tick(now_ms);
        if let Some(cue) = outcome.flash {
            presenter.flash(&cue);
        }

        if outcome.expired {
            self.end_round(presenter);
            false
        } else {
            presenter.render(&self.view());
            true
        }
    }

    /// Time ran out: whoever is not holding the phrase scores
    fn end_round(&mut self, presenter: &mut dyn Presenter) {
        self.clock.stop();

        let scoring_team = self.current_team.other();
        self.scores.award(scoring_team);

        let last_phrase = self.current_phrase.take().unwrap_or_default();
        let outcome = RoundOutcome {
            scoring_team,
            last_phrase,
            scores: self.scores,
        };

        self.phase = GamePhase::RoundEnded;
        self.status = format!(
            "{} scores! Answer: {}",
            scoring_team, outcome.last_phrase
        );
        tracing::info!(
            "Round ended: {} scores, {}-{}",
            scoring_team,
            self.scores.team1,
            self.scores.team2
        );

        presenter.end_signal(&self.clock.config().buzzer);
        presenter.round_ended(&outcome);
        self.last_outcome = Some(outcome);

        if let Some(winner) = self.scores.winner(self.config.win_score) {
            self.phase = GamePhase::MatchWon;
            self.winner = Some(winner);
            self.status = format!("{} wins!", winner);
            tracing::info!("{} wins the match", winner);
            presenter.match_won(winner);
        }

        presenter.render(&self.view());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::game::tests::{test_book, test_match};
    use crate::game::MatchEvent;
    use crate::phrases::PhraseBook;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    fn timing(start_ms: u64) -> RoundTiming {
        RoundTiming::new(start_ms, 60_000.0, 3_000.0).unwrap()
    }

    fn in_round() -> (Match, Vec<MatchEvent>) {
        let mut game = test_match();
        let mut events: Vec<MatchEvent> = Vec::new();
        game.select_category(Category::World, &mut events).unwrap();
        game.start_round_with(timing(0), &mut events).unwrap();
        events.clear();
        (game, events)
    }

    #[test]
    fn test_start_round() {
        let (game, _) = in_round();

        assert_eq!(game.phase(), GamePhase::InRound);
        assert!(game.clock().is_running());
        assert!(["A", "B", "C"].contains(&game.current_phrase().unwrap()));
        assert_eq!(game.pool().unwrap().used().len(), 1);

        let view = game.view();
        assert_eq!(view.status_text, STATUS_IN_ROUND);
        assert!(view.categories_locked);
        assert!(view.in_round_controls);
        assert!(!view.start_enabled);
    }

    #[test]
    fn test_start_round_requires_category() {
        let mut game = test_match();
        let mut events: Vec<MatchEvent> = Vec::new();

        let result = game.start_round(0, &mut events);
        assert_eq!(
            result,
            Err(GameError::InvalidTransition {
                command: Command::StartRound,
                phase: GamePhase::Idle,
            })
        );
        assert!(events.is_empty());
    }

    #[test]
    fn test_start_round_twice_is_rejected() {
        let (mut game, mut events) = in_round();
        let phrase = game.current_phrase().unwrap().to_string();

        assert!(game.start_round_with(timing(500), &mut events).is_err());
        assert_eq!(game.current_phrase(), Some(phrase.as_str()));
        assert_eq!(game.clock().timing().unwrap().start_ms(), 0);
        assert!(events.is_empty());
    }

    #[test]
    fn test_empty_category_aborts_start() {
        let mut game = test_match();
        let mut events: Vec<MatchEvent> = Vec::new();
        game.select_category(Category::Science, &mut events).unwrap();

        let result = game.start_round(0, &mut events);
        assert_eq!(result, Err(GameError::EmptyCategory(Category::Science)));
        assert_eq!(game.phase(), GamePhase::CategorySelected);
        assert!(!game.clock().is_running());
        assert!(game.current_phrase().is_none());
    }

    #[test]
    fn test_sampled_start_uses_configured_range() {
        let mut game = test_match();
        let mut events: Vec<MatchEvent> = Vec::new();
        game.select_category(Category::Sports, &mut events).unwrap();
        game.start_round(1_000, &mut events).unwrap();

        let timing = *game.clock().timing().unwrap();
        assert_eq!(timing.start_ms(), 1_000);
        assert!((45_000.0..90_000.0).contains(&timing.base_duration_ms()));
        assert!((timing.end_time_ms() - timing.base_duration_ms()).abs() <= 5_000.0);
    }

    #[test]
    fn test_got_it_flips_team_and_draws() {
        let (mut game, mut events) = in_round();
        let first = game.current_phrase().unwrap().to_string();

        game.got_it(&mut events).unwrap();

        assert_eq!(game.current_team(), Team::Two);
        assert_ne!(game.current_phrase().unwrap(), first);
        assert_eq!(game.phase(), GamePhase::InRound);
        assert_eq!(game.scores(), Scores::default());
        assert!(matches!(events.as_slice(), [MatchEvent::Render(_)]));
    }

    #[test]
    fn test_skip_keeps_team() {
        let (mut game, mut events) = in_round();
        let first = game.current_phrase().unwrap().to_string();

        game.skip_word(&mut events).unwrap();

        assert_eq!(game.current_team(), Team::One);
        assert_ne!(game.current_phrase().unwrap(), first);
    }

    #[test]
    fn test_got_it_and_skip_outside_round_rejected() {
        let mut game = test_match();
        let mut events: Vec<MatchEvent> = Vec::new();

        assert!(game.got_it(&mut events).is_err());
        assert!(game.skip_word(&mut events).is_err());
        assert_eq!(game.current_team(), Team::One);
        assert!(events.is_empty());
    }

    #[test]
    fn test_commands_never_end_the_round() {
        let (mut game, mut events) = in_round();

        for _ in 0..10 {
            game.got_it(&mut events).unwrap();
            game.skip_word(&mut events).unwrap();
        }

        assert_eq!(game.phase(), GamePhase::InRound);
        assert_eq!(game.clock().timing().unwrap().start_ms(), 0);
        assert!(!events
            .iter()
            .any(|e| matches!(e, MatchEvent::RoundEnded(_) | MatchEvent::EndSignal(_))));
    }

    #[test]
    fn test_tick_before_expiry_renders() {
        let (mut game, mut events) = in_round();

        assert!(game.tick(62_999, &mut events));
        assert_eq!(game.phase(), GamePhase::InRound);
        assert!(matches!(events.last(), Some(MatchEvent::Render(_))));
    }

    #[test]
    fn test_expiry_awards_other_team() {
        let (mut game, mut events) = in_round();
        let phrase = game.current_phrase().unwrap().to_string();

        assert!(!game.tick(63_000, &mut events));

        assert_eq!(game.phase(), GamePhase::RoundEnded);
        assert_eq!(game.scores(), Scores { team1: 0, team2: 1 });
        assert!(game.current_phrase().is_none());
        assert!(!game.clock().is_running());

        let view = game.view();
        assert_eq!(view.status_text, format!("Team 2 scores! Answer: {}", phrase));
        assert!(!view.categories_locked);
        assert!(view.start_enabled);

        let round_ends: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                MatchEvent::RoundEnded(outcome) => Some(outcome),
                _ => None,
            })
            .collect();
        assert_eq!(round_ends.len(), 1);
        assert_eq!(round_ends[0].scoring_team, Team::Two);
        assert_eq!(round_ends[0].last_phrase, phrase);
        assert!(events
            .iter()
            .any(|e| matches!(e, MatchEvent::EndSignal(cue) if cue.frequency_hz == 150.0)));
    }

    #[test]
    fn test_end_signal_precedes_round_end_and_flash_precedes_both() {
        let mut game = test_match();
        let mut events: Vec<MatchEvent> = Vec::new();
        game.select_category(Category::World, &mut events).unwrap();
        game.start_round_with(RoundTiming::new(0, 60_000.0, 0.0).unwrap(), &mut events)
            .unwrap();
        events.clear();

        game.tick(60_000, &mut events);

        assert!(matches!(
            events.as_slice(),
            [
                MatchEvent::Flash(_),
                MatchEvent::EndSignal(_),
                MatchEvent::RoundEnded(_),
                MatchEvent::Render(_)
            ]
        ));
    }

    #[test]
    fn test_holder_after_got_it_gives_point_away() {
        let (mut game, mut events) = in_round();
        game.got_it(&mut events).unwrap();
        assert_eq!(game.current_team(), Team::Two);

        game.tick(63_000, &mut events);
        assert_eq!(game.scores(), Scores { team1: 1, team2: 0 });
        // Team on turn carries over into the next round
        assert_eq!(game.current_team(), Team::Two);
    }

    #[test]
    fn test_next_round_keeps_pool_and_category() {
        let (mut game, mut events) = in_round();
        game.tick(63_000, &mut events);
        assert_eq!(game.pool().unwrap().used().len(), 1);

        game.start_round_with(timing(70_000), &mut events).unwrap();
        assert_eq!(game.category(), Some(Category::World));
        assert_eq!(game.pool().unwrap().used().len(), 2);
    }

    #[test]
    fn test_match_won_at_threshold() {
        let mut game = test_match();
        let mut events: Vec<MatchEvent> = Vec::new();
        game.select_category(Category::Sports, &mut events).unwrap();

        for round in 0..7u64 {
            let start = round * 100_000;
            game.start_round_with(timing(start), &mut events).unwrap();
            assert!(!game.tick(start + 63_000, &mut events));
        }

        assert_eq!(game.phase(), GamePhase::MatchWon);
        assert_eq!(game.scores(), Scores { team1: 0, team2: 7 });
        assert_eq!(game.winner(), Some(Team::Two));
        assert_eq!(game.view().status_text, "Team 2 wins!");

        let wins: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, MatchEvent::MatchWon(_)))
            .collect();
        assert_eq!(wins, vec![&MatchEvent::MatchWon(Team::Two)]);

        let round_ends = events
            .iter()
            .filter(|e| matches!(e, MatchEvent::RoundEnded(_)))
            .count();
        assert_eq!(round_ends, 7);

        // Terminal until reset
        events.clear();
        assert!(game.start_round_with(timing(800_000), &mut events).is_err());
        assert!(game.select_category(Category::World, &mut events).is_err());
        assert!(events.is_empty());

        game.reset(&mut events);
        assert_eq!(game.phase(), GamePhase::Idle);
        assert_eq!(game.winner(), None);
    }

    #[test]
    fn test_no_win_below_threshold() {
        let config = GameConfig {
            win_score: 2,
            ..GameConfig::default()
        };
        let mut game = Match::with_rng(config, test_book(), StdRng::seed_from_u64(1)).unwrap();
        let mut events: Vec<MatchEvent> = Vec::new();
        game.select_category(Category::World, &mut events).unwrap();

        game.start_round_with(timing(0), &mut events).unwrap();
        game.tick(63_000, &mut events);
        assert_eq!(game.phase(), GamePhase::RoundEnded);

        game.start_round_with(timing(100_000), &mut events).unwrap();
        game.tick(163_000, &mut events);
        assert_eq!(game.phase(), GamePhase::MatchWon);
        assert_eq!(game.winner(), Some(Team::Two));
    }

    #[test]
    fn test_round_end_reports_phrase_after_pool_wraps() {
        let book = Arc::new(PhraseBook::new([(Category::World, vec!["Only"])]));
        let mut game =
            Match::with_rng(GameConfig::default(), book, StdRng::seed_from_u64(2)).unwrap();
        let mut events: Vec<MatchEvent> = Vec::new();
        game.select_category(Category::World, &mut events).unwrap();
        game.start_round_with(timing(0), &mut events).unwrap();
        game.skip_word(&mut events).unwrap();
        game.tick(63_000, &mut events);

        assert_eq!(
            game.last_outcome().map(|o| o.last_phrase.as_str()),
            Some("Only")
        );
    }
}
