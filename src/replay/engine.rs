//! Rating replay engine
//!
//! Folds a full match history into player ratings in a single forward pass.
//! Matches are applied in timestamp order and every rating change is written
//! back before the next match is read, so the result depends on order and
//! cannot be split across matches sharing a player.

use crate::error::LadderError;
use crate::rating::{EloCalculator, ExtendedEloConfig, RatingCalculator};
use crate::replay::validation::{validate_records, ValidatedMatch};
use crate::types::{
    AnnotatedMatch, Leaderboard, MatchRecord, PlayerId, PlayerState, ReplayOutcome, Seat,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Player states keyed by id, iterated in discovery order
#[derive(Debug)]
struct RatingTable {
    initial_rating: f64,
    players: Vec<(PlayerId, PlayerState)>,
    index: HashMap<PlayerId, usize>,
}

impl RatingTable {
    fn new(initial_rating: f64) -> Self {
        Self {
            initial_rating,
            players: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// State for `player_id`, created at the initial rating on first sight
    fn state_mut(&mut self, player_id: &str) -> &mut PlayerState {
        let slot = match self.index.get(player_id) {
            Some(&slot) => slot,
            None => {
                let slot = self.players.len();
                self.players
                    .push((player_id.to_string(), PlayerState::new(self.initial_rating)));
                self.index.insert(player_id.to_string(), slot);
                slot
            }
        };
        &mut self.players[slot].1
    }

    fn rating(&mut self, player_id: &str) -> f64 {
        self.state_mut(player_id).rating
    }

    fn len(&self) -> usize {
        self.players.len()
    }

    fn into_entries(self) -> Vec<(PlayerId, PlayerState)> {
        self.players
    }
}

/// Replays a match history into a leaderboard and annotated match list
#[derive(Clone)]
pub struct ReplayEngine {
    calculator: Arc<dyn RatingCalculator>,
    max_matches: Option<usize>,
}

impl std::fmt::Debug for ReplayEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReplayEngine")
            .field("k_factor", &self.calculator.k_factor())
            .field("initial_rating", &self.calculator.initial_rating())
            .field("max_matches", &self.max_matches)
            .finish()
    }
}

impl Default for ReplayEngine {
    fn default() -> Self {
        Self::new(Arc::new(EloCalculator::default()))
    }
}

impl ReplayEngine {
    /// Create an engine around any rating calculator
    pub fn new(calculator: Arc<dyn RatingCalculator>) -> Self {
        Self {
            calculator,
            max_matches: None,
        }
    }

    /// Create an Elo engine from configuration
    pub fn from_config(config: ExtendedEloConfig) -> Result<Self, LadderError> {
        Ok(Self::new(Arc::new(EloCalculator::new(config)?)))
    }

    /// Reject inputs holding more than `limit` matches
    pub fn with_max_matches(mut self, limit: usize) -> Self {
        self.max_matches = Some(limit);
        self
    }

    pub fn calculator(&self) -> &Arc<dyn RatingCalculator> {
        &self.calculator
    }

    /// Replay the complete history.
    ///
    /// All records are validated before any rating state is created. Records
    /// are ordered by timestamp with a stable sort, so matches sharing a
    /// timestamp are applied in input order.
    pub fn replay(&self, matches: &[MatchRecord]) -> Result<ReplayOutcome, LadderError> {
        if let Some(limit) = self.max_matches {
            if matches.len() > limit {
                warn!(count = matches.len(), limit, "Match history exceeds replay limit");
                return Err(LadderError::TooManyMatches {
                    count: matches.len(),
                    limit,
                });
            }
        }

        let mut ordered = validate_records(matches).map_err(|e| {
            warn!("Rejected match history: {}", e);
            e
        })?;
        ordered.sort_by_key(|m| m.record.timestamp);

        let mut table = self.discover_players(&ordered);
        let mut annotated = Vec::with_capacity(ordered.len());

        for validated in &ordered {
            annotated.push(self.apply_match(&mut table, validated));
        }

        info!(
            matches = annotated.len(),
            players = table.len(),
            "Replayed match history"
        );

        Ok(ReplayOutcome {
            leaderboard: Leaderboard::from_states(table.into_entries()),
            matches: annotated,
        })
    }

    /// Seed every participant at the initial rating.
    ///
    /// Discovery walks the player-one column of the ordered history and then
    /// the player-two column; this order breaks leaderboard ties.
    fn discover_players(&self, ordered: &[ValidatedMatch<'_>]) -> RatingTable {
        let mut table = RatingTable::new(self.calculator.initial_rating());
        for validated in ordered {
            table.state_mut(&validated.record.player1);
        }
        for validated in ordered {
            table.state_mut(&validated.record.player2);
        }
        table
    }

    fn apply_match(&self, table: &mut RatingTable, validated: &ValidatedMatch<'_>) -> AnnotatedMatch {
        let record = validated.record;
        let outcome1 = validated.outcome_for(Seat::Player1);
        let outcome2 = validated.outcome_for(Seat::Player2);

        table.state_mut(&record.player1).record(outcome1);
        table.state_mut(&record.player2).record(outcome2);

        let rating1 = table.rating(&record.player1);
        let rating2 = table.rating(&record.player2);

        let update = self.calculator.rate(rating1, rating2, outcome1);

        table.state_mut(&record.player1).rating = update.player;
        table.state_mut(&record.player2).rating = update.opponent;

        debug!(
            index = validated.index,
            winner = %record.player(validated.winner),
            player1_delta = update.player_delta(rating1),
            player2_delta = update.opponent_delta(rating2),
            "Applied match"
        );

        AnnotatedMatch {
            record: record.clone(),
            player1_rating_before: rating1,
            player2_rating_before: rating2,
        }
    }
}

/// Replay with the default Elo parameters (K = 30, starting rating 1000)
pub fn replay(matches: &[MatchRecord]) -> Result<ReplayOutcome, LadderError> {
    ReplayEngine::default().replay(matches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::{MockRatingCalculator, RatingUpdate};
    use crate::types::Outcome;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    const EPSILON: f64 = 1e-6;

    fn at(minutes: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2021, 3, 1, 18, 0, 0).unwrap() + Duration::minutes(minutes)
    }

    fn game(minutes: i64, player1: &str, player2: &str, winner: &str) -> MatchRecord {
        MatchRecord::new(at(minutes), player1, player2, winner, 21, 17)
    }

    #[test]
    fn test_empty_history() {
        let outcome = replay(&[]).unwrap();
        assert!(outcome.leaderboard.is_empty());
        assert!(outcome.matches.is_empty());
    }

    #[test]
    fn test_two_player_scenario() {
        let outcome = replay(&[game(0, "A", "B", "A"), game(10, "A", "B", "B")]).unwrap();

        let first = &outcome.matches[0];
        assert_eq!(first.player1_rating_before, 1000.0);
        assert_eq!(first.player2_rating_before, 1000.0);

        let second = &outcome.matches[1];
        assert_eq!(second.player1_rating_before, 1015.0);
        assert_eq!(second.player2_rating_before, 985.0);

        let names: Vec<_> = outcome.leaderboard.iter().map(|(id, _)| id.clone()).collect();
        assert_eq!(names, vec!["B", "A"]);

        let a = outcome.leaderboard.get("A").unwrap();
        let b = outcome.leaderboard.get("B").unwrap();
        assert!((b.rating - 1001.292).abs() < 1e-3);
        assert!((a.rating - 998.708).abs() < 1e-3);
        assert_eq!((a.wins, a.losses), (1, 1));
        assert_eq!((b.wins, b.losses), (1, 1));
    }

    #[test]
    fn test_matches_sorted_by_timestamp() {
        let outcome = replay(&[game(10, "A", "B", "B"), game(0, "A", "B", "A")]).unwrap();

        assert_eq!(outcome.matches[0].record.timestamp, at(0));
        assert_eq!(outcome.matches[0].record.winner, "A");
        assert_eq!(outcome.matches[1].player1_rating_before, 1015.0);
    }

    #[test]
    fn test_equal_timestamps_keep_input_order() {
        let forward = replay(&[game(0, "A", "B", "A"), game(0, "A", "B", "B")]).unwrap();
        let reverse = replay(&[game(0, "A", "B", "B"), game(0, "A", "B", "A")]).unwrap();

        assert_eq!(forward.matches[0].record.winner, "A");
        assert_eq!(reverse.matches[0].record.winner, "B");
        assert_eq!(forward.leaderboard.rank_of("B"), Some(1));
        assert_eq!(reverse.leaderboard.rank_of("A"), Some(1));
    }

    #[test]
    fn test_annotation_uses_rating_at_match_time() {
        let outcome = replay(&[
            game(0, "A", "B", "A"),
            game(1, "C", "A", "C"),
            game(2, "B", "C", "B"),
        ])
        .unwrap();

        // A carries the rating from the first match into the second
        assert_eq!(outcome.matches[1].player2_rating_before, 1015.0);
        assert_eq!(outcome.matches[1].player1_rating_before, 1000.0);
        assert_eq!(outcome.matches[2].player1_rating_before, 985.0);
        assert!(outcome.matches[2].player2_rating_before > 1015.0);
    }

    #[test]
    fn test_malformed_record_rejects_whole_replay() {
        let result = replay(&[game(0, "A", "B", "A"), game(1, "A", "B", "Z")]);

        match result {
            Err(LadderError::MalformedRecord { index, .. }) => assert_eq!(index, 1),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_rejection_happens_before_any_rating_math() {
        let mut calculator = MockRatingCalculator::new();
        calculator.expect_initial_rating().return_const(1000.0);
        calculator.expect_rate().never();

        let engine = ReplayEngine::new(Arc::new(calculator));
        let result = engine.replay(&[game(0, "A", "B", "A"), game(1, "B", "B", "B")]);

        assert!(result.is_err());
    }

    #[test]
    fn test_max_matches_guard() {
        let engine = ReplayEngine::default().with_max_matches(1);
        let result = engine.replay(&[game(0, "A", "B", "A"), game(1, "A", "B", "B")]);

        assert_eq!(
            result.unwrap_err(),
            LadderError::TooManyMatches { count: 2, limit: 1 }
        );
        assert!(engine.replay(&[game(0, "A", "B", "A")]).is_ok());
    }

    #[test]
    fn test_engine_delegates_to_calculator() {
        let mut calculator = MockRatingCalculator::new();
        calculator.expect_initial_rating().return_const(1500.0);
        calculator
            .expect_rate()
            .withf(|rating, opponent, outcome| {
                *rating == 1500.0 && *opponent == 1500.0 && *outcome == Outcome::Loser
            })
            .times(1)
            .return_const(RatingUpdate {
                player: 1400.0,
                opponent: 1600.0,
            });

        let engine = ReplayEngine::new(Arc::new(calculator));
        let outcome = engine.replay(&[game(0, "A", "B", "B")]).unwrap();

        assert_eq!(outcome.matches[0].player1_rating_before, 1500.0);
        assert_eq!(outcome.leaderboard.get("B").unwrap().rating, 1600.0);
        assert_eq!(outcome.leaderboard.get("A").unwrap().rating, 1400.0);
    }

    #[test]
    fn test_custom_config() {
        let engine = ReplayEngine::from_config(ExtendedEloConfig::new(20.0, 1200.0)).unwrap();
        let outcome = engine.replay(&[game(0, "A", "B", "A")]).unwrap();

        assert!((outcome.leaderboard.get("A").unwrap().rating - 1210.0).abs() < EPSILON);
        assert!((outcome.leaderboard.get("B").unwrap().rating - 1190.0).abs() < EPSILON);

        assert!(ReplayEngine::from_config(ExtendedEloConfig::new(-1.0, 1000.0)).is_err());
    }

    #[test]
    fn test_leaderboard_ties_follow_discovery_order() {
        // Two independent pairs ending on identical ratings
        let outcome = replay(&[game(0, "A", "B", "A"), game(1, "C", "D", "D")]).unwrap();

        let names: Vec<_> = outcome.leaderboard.iter().map(|(id, _)| id.as_str()).collect();
        // Discovery is A, C, B, D: player-one column first, then player-two
        assert_eq!(names, vec!["A", "D", "C", "B"]);
    }

    #[test]
    fn test_newest_first_view() {
        let outcome = replay(&[game(0, "A", "B", "A"), game(5, "A", "B", "B")]).unwrap();
        let winners: Vec<_> = outcome
            .newest_first()
            .map(|m| m.record.winner.as_str())
            .collect();
        assert_eq!(winners, vec!["B", "A"]);
    }
}
