use crate::types::{Scores, Team};

impl Scores {
    /// Add one point for `team`
    pub fn award(&mut self, team: Team) {
        match team {
            Team::One => self.team1 += 1,
            Team::Two => self.team2 += 1,
        }
    }

    /// First team (in team order) at or past the winning score
    pub fn winner(&self, win_score: u32) -> Option<Team> {
        if self.team1 >= win_score {
            Some(Team::One)
        } else if self.team2 >= win_score {
            Some(Team::Two)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_award_only_touches_one_team() {
        let mut scores = Scores::default();
        scores.award(Team::Two);
        assert_eq!(scores, Scores { team1: 0, team2: 1 });
        scores.award(Team::One);
        assert_eq!(scores.get(Team::One), 1);
        assert_eq!(scores.get(Team::Two), 1);
    }

    #[test]
    fn test_winner_threshold_is_inclusive() {
        assert_eq!(Scores { team1: 6, team2: 6 }.winner(7), None);
        assert_eq!(Scores { team1: 7, team2: 3 }.winner(7), Some(Team::One));
        assert_eq!(Scores { team1: 2, team2: 7 }.winner(7), Some(Team::Two));
    }
}
