//! Per-move session state machine for one labyrinth play-through.
//!
//! The session owns the graph, dictionary, path atlas, and player, and
//! advances one command character at a time. Everything it reports back is
//! typed data; turning it into text, color, and blocking pauses is
//! presentation work.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::dictionary::Dictionary;
use crate::graph::{Direction, Graph, StyleSet, VertexId};
use crate::paths::{EmptyPathSetError, HintPath, PathAtlas};
use crate::player::Player;
use crate::scoring::ScoringConfig;

/// Base hold per hint entry; multiplied by the difficulty's help level.
const HINT_HOLD_BASE: Duration = Duration::from_millis(500);

/// Difficulty grades. Harder grades get briefer hints and a smaller help
/// budget; scoring weights do not change with difficulty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    /// Help generosity: easy 3, medium 2, hard 1.
    #[must_use]
    pub const fn help_level(self) -> u32 {
        match self {
            Self::Easy => 3,
            Self::Medium => 2,
            Self::Hard => 1,
        }
    }

    /// How long the presentation layer should hold each hint entry.
    #[must_use]
    pub fn hint_hold(self) -> Duration {
        HINT_HOLD_BASE * self.help_level()
    }

    /// How many help requests one session grants.
    #[must_use]
    pub const fn help_budget(self) -> u32 {
        self.help_level()
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            _ => Err(()),
        }
    }
}

/// Session lifecycle. `Finished` is terminal; there is no separate lost
/// phase, the final framing comes from the score sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    NotStarted,
    Running,
    Finished,
}

/// Typed status payload; the engine never formats user-facing text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    /// Session constructed, waiting for `start`.
    Ready,
    /// Move accepted, word still in progress.
    KeepGoing,
    /// The collected buffer completed a dictionary word.
    WordCompleted { word: String, points: i64 },
    /// Viable prefix, but the exit is no longer reachable; move reverted.
    DeadEnd,
    /// No dictionary word starts with the buffer; move reverted.
    BrokenPrefix { attempted: String },
    /// Move rejected outright; the rest of the command was dropped.
    InvalidMove { symbol: char, penalty: i64 },
    /// Exit reached with a non-negative score.
    Victory { score: i64, shortest_bonus: bool },
    /// Exit reached with a negative score.
    Defeat { score: i64, shortest_bonus: bool },
    /// Help granted; hint paths follow.
    HelpGranted { cost: i64, paths: usize },
    /// The difficulty's help budget is spent.
    HelpExhausted,
    /// Command ignored: the session is not running.
    NotRunning,
}

/// What one command character did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRecord {
    /// The symbol as typed.
    pub symbol: char,
    /// Status after processing it.
    pub status: StatusMessage,
    /// Score after processing it.
    pub score: i64,
}

/// Result of submitting one command line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutcome {
    /// Per-character records, in processing order. Shorter than the command
    /// when a rejection or the finish cut it off.
    pub steps: Vec<StepRecord>,
    /// True when the exit was reached during this command.
    pub ended: bool,
}

/// Result of a help request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HelpOutcome {
    /// Hints granted: show `paths` in order, holding each for `hold`.
    Granted {
        paths: Vec<HintPath>,
        hold: Duration,
        cost: i64,
    },
    /// The help budget for this difficulty is spent. Free.
    Exhausted,
    /// The session is not running.
    NotRunning,
}

/// End-of-run summary for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub difficulty: Difficulty,
    pub score: i64,
    pub accepted_moves: usize,
    pub shortest_edges: usize,
    pub words_found: Vec<String>,
    pub helps_used: u32,
    pub finished: bool,
    pub won: bool,
}

/// One play-through of a labyrinth.
#[derive(Debug, Clone)]
pub struct GameSession {
    graph: Graph,
    dictionary: Dictionary,
    atlas: PathAtlas,
    player: Player,
    difficulty: Difficulty,
    scoring: ScoringConfig,
    phase: GamePhase,
    collected: String,
    message: StatusMessage,
    accepted_moves: usize,
    helps_left: u32,
    words_found: Vec<String>,
}

impl GameSession {
    /// Build a session over a generated labyrinth and loaded dictionary.
    ///
    /// The collected buffer starts seeded with the start vertex's label:
    /// the player stands on that letter before making any move.
    ///
    /// # Errors
    /// `EmptyPathSetError` when the labyrinth admits no valid path.
    pub fn new(
        graph: Graph,
        dictionary: Dictionary,
        difficulty: Difficulty,
        scoring: ScoringConfig,
    ) -> Result<Self, EmptyPathSetError> {
        let atlas = PathAtlas::build(&graph, &dictionary)?;
        let player = Player::new(graph.start(), StyleSet::new());
        let collected = String::from(graph.label(graph.start()));
        Ok(Self {
            graph,
            dictionary,
            atlas,
            player,
            difficulty,
            scoring,
            phase: GamePhase::NotStarted,
            collected,
            message: StatusMessage::Ready,
            accepted_moves: 0,
            helps_left: difficulty.help_budget(),
            words_found: Vec::new(),
        })
    }

    /// Replace the player's display tokens.
    #[must_use]
    pub fn with_player_styles(mut self, styles: StyleSet) -> Self {
        self.player = Player::new(self.player.position(), styles);
        self
    }

    /// Begin play. A no-op unless the session is fresh.
    pub fn start(&mut self) {
        if self.phase == GamePhase::NotStarted {
            self.phase = GamePhase::Running;
        }
    }

    /// Process one command line: direction symbols one at a time, left to
    /// right, stopping early on a rejected move or on reaching the exit.
    pub fn submit(&mut self, input: &str) -> CommandOutcome {
        if self.phase != GamePhase::Running {
            self.message = StatusMessage::NotRunning;
            return CommandOutcome::default();
        }
        let symbols: Vec<char> = input.trim().chars().collect();
        let mut outcome = CommandOutcome::default();
        for (index, &symbol) in symbols.iter().enumerate() {
            let remaining = symbols.len() - index;
            let status = self.apply_symbol(symbol, remaining);
            let rejected = matches!(status, StatusMessage::InvalidMove { .. });
            self.message = status.clone();
            outcome.steps.push(StepRecord {
                symbol,
                status,
                score: self.player.score(),
            });
            if self.phase == GamePhase::Finished {
                outcome.ended = true;
                break;
            }
            if rejected {
                break;
            }
        }
        outcome
    }

    /// One command character. `remaining` counts the character itself plus
    /// everything after it, which scales the rejection penalty.
    fn apply_symbol(&mut self, symbol: char, remaining: usize) -> StatusMessage {
        let old_position = self.player.position();
        let Some(direction) = Direction::from_symbol(symbol) else {
            return self.reject(symbol, remaining);
        };
        if self.player.step(&self.graph, direction).is_err() {
            return self.reject(symbol, remaining);
        }

        let position = self.player.position();
        self.collected.push(self.graph.label(position));

        if self
            .atlas
            .end_is_reachable(&self.dictionary, position, &self.collected)
        {
            self.accepted_moves += 1;
            let mut completed = None;
            if self.dictionary.contains_word(&self.collected) {
                let word = std::mem::take(&mut self.collected);
                let points = self.scoring.word_bonus_per_letter * word.chars().count() as i64;
                self.player.add_score(points);
                self.words_found.push(word.clone());
                completed = Some((word, points));
            }
            if position == self.graph.end() {
                return self.finish();
            }
            match completed {
                Some((word, points)) => StatusMessage::WordCompleted { word, points },
                None => StatusMessage::KeepGoing,
            }
        } else {
            let viable_prefix = self.atlas.prefix_exists(&self.dictionary, &self.collected);
            let attempted = self.collected.clone();
            self.collected.pop();
            self.player.teleport(old_position);
            if viable_prefix {
                self.player.sub_score(self.scoring.dead_end_penalty);
                StatusMessage::DeadEnd
            } else {
                self.player.sub_score(self.scoring.broken_prefix_penalty);
                StatusMessage::BrokenPrefix { attempted }
            }
        }
    }

    fn reject(&mut self, symbol: char, remaining: usize) -> StatusMessage {
        let penalty = self.scoring.invalid_move_penalty * remaining as i64;
        self.player.sub_score(penalty);
        StatusMessage::InvalidMove { symbol, penalty }
    }

    fn finish(&mut self) -> StatusMessage {
        self.phase = GamePhase::Finished;
        let shortest_bonus = self.accepted_moves == self.atlas.shortest_edges();
        if shortest_bonus {
            self.player.add_score(self.scoring.shortest_path_bonus);
        }
        self.collected.clear();
        let score = self.player.score();
        if score >= 0 {
            StatusMessage::Victory {
                score,
                shortest_bonus,
            }
        } else {
            StatusMessage::Defeat {
                score,
                shortest_bonus,
            }
        }
    }

    /// Request the hint sequence. Costs a fixed amount and consumes one
    /// unit of the difficulty's help budget.
    pub fn request_help(&mut self) -> HelpOutcome {
        if self.phase != GamePhase::Running {
            self.message = StatusMessage::NotRunning;
            return HelpOutcome::NotRunning;
        }
        if self.helps_left == 0 {
            self.message = StatusMessage::HelpExhausted;
            return HelpOutcome::Exhausted;
        }
        self.helps_left -= 1;
        let cost = self.scoring.help_cost;
        self.player.sub_score(cost);
        let paths = self.atlas.distinct_paths().to_vec();
        self.message = StatusMessage::HelpGranted {
            cost,
            paths: paths.len(),
        };
        HelpOutcome::Granted {
            paths,
            hold: self.difficulty.hint_hold(),
            cost,
        }
    }

    #[must_use]
    pub const fn phase(&self) -> GamePhase {
        self.phase
    }

    #[must_use]
    pub const fn message(&self) -> &StatusMessage {
        &self.message
    }

    #[must_use]
    pub const fn score(&self) -> i64 {
        self.player.score()
    }

    /// Letters collected toward the next word, start label included.
    #[must_use]
    pub fn collected(&self) -> &str {
        &self.collected
    }

    #[must_use]
    pub const fn position(&self) -> VertexId {
        self.player.position()
    }

    /// Label under the player marker.
    #[must_use]
    pub fn current_label(&self) -> char {
        self.graph.label(self.player.position())
    }

    /// Moves accepted so far, the finishing move included.
    #[must_use]
    pub const fn accepted_moves(&self) -> usize {
        self.accepted_moves
    }

    #[must_use]
    pub const fn helps_left(&self) -> u32 {
        self.helps_left
    }

    #[must_use]
    pub const fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub const fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Mutable graph access for style pass-through only; the structure is
    /// frozen.
    pub fn graph_mut(&mut self) -> &mut Graph {
        &mut self.graph
    }

    #[must_use]
    pub const fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// Distinct hint paths with their highlight groups.
    #[must_use]
    pub fn hint_paths(&self) -> &[HintPath] {
        self.atlas.distinct_paths()
    }

    #[must_use]
    pub const fn shortest_edges(&self) -> usize {
        self.atlas.shortest_edges()
    }

    /// Words completed so far, in play order.
    #[must_use]
    pub fn words_found(&self) -> &[String] {
        &self.words_found
    }

    /// Snapshot for end-of-run reporting; valid at any phase.
    #[must_use]
    pub fn summary(&self) -> SessionSummary {
        let finished = self.phase == GamePhase::Finished;
        SessionSummary {
            difficulty: self.difficulty,
            score: self.player.score(),
            accepted_moves: self.accepted_moves,
            shortest_edges: self.atlas.shortest_edges(),
            words_found: self.words_found.clone(),
            helps_used: self.difficulty.help_budget() - self.helps_left,
            finished,
            won: finished && self.player.score() >= 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;

    /// Five-cell pond board plus one trap cell:
    ///
    /// ```text
    ///     t            <- trap, off every valid route
    ///     |
    /// c - a - t
    /// | \ |
    /// o - d
    /// ```
    ///
    /// Words {cat, cod, at}; valid routes are `cat` (2 edges) and
    /// `cod`+`at` (4 edges).
    fn pond_session(difficulty: Difficulty) -> GameSession {
        let mut builder = GraphBuilder::default();
        let a = builder.add_vertex('c');
        let b = builder.add_vertex('a');
        let d = builder.add_vertex('t');
        let c = builder.add_vertex('o');
        let e = builder.add_vertex('d');
        let trap = builder.add_vertex('t');
        builder.connect_both(a, Direction::East, b).unwrap();
        builder.connect_both(b, Direction::East, d).unwrap();
        builder.connect_both(a, Direction::South, c).unwrap();
        builder.connect_both(b, Direction::South, e).unwrap();
        builder.connect_both(c, Direction::East, e).unwrap();
        builder.connect_both(a, Direction::SouthEast, e).unwrap();
        builder.connect_both(b, Direction::SouthWest, c).unwrap();
        builder.connect_both(b, Direction::North, trap).unwrap();
        let graph = builder.build(a, d).unwrap();
        let dictionary = Dictionary::from_words(["cat", "cod", "at"]);
        let mut session =
            GameSession::new(graph, dictionary, difficulty, ScoringConfig::default()).unwrap();
        session.start();
        session
    }

    #[test]
    fn buffer_is_seeded_with_the_start_label() {
        let session = pond_session(Difficulty::Easy);
        assert_eq!(session.collected(), "c");
        assert_eq!(session.current_label(), 'c');
        assert_eq!(session.message(), &StatusMessage::Ready);
    }

    #[test]
    fn shortest_win_scores_word_and_path_bonus() {
        let mut session = pond_session(Difficulty::Easy);
        let outcome = session.submit("dd");
        assert!(outcome.ended);
        assert_eq!(outcome.steps.len(), 2);
        assert_eq!(outcome.steps[0].status, StatusMessage::KeepGoing);
        assert_eq!(
            outcome.steps[1].status,
            StatusMessage::Victory {
                score: 230,
                shortest_bonus: true
            }
        );
        assert_eq!(session.score(), 230);
        assert_eq!(session.accepted_moves(), 2);
        assert_eq!(session.phase(), GamePhase::Finished);
        assert_eq!(session.words_found(), ["cat"]);
        assert_eq!(session.collected(), "");
    }

    #[test]
    fn commands_are_case_insensitive() {
        let mut session = pond_session(Difficulty::Easy);
        let outcome = session.submit("DD");
        assert!(outcome.ended);
        assert_eq!(session.score(), 230);
    }

    #[test]
    fn longer_win_skips_the_path_bonus() {
        let mut session = pond_session(Difficulty::Easy);
        let first = session.submit("sd");
        assert_eq!(first.steps[0].status, StatusMessage::KeepGoing);
        assert_eq!(
            first.steps[1].status,
            StatusMessage::WordCompleted {
                word: "cod".to_string(),
                points: 30
            }
        );
        assert_eq!(session.collected(), "");

        let second = session.submit("wd");
        assert!(second.ended);
        assert_eq!(
            second.steps[1].status,
            StatusMessage::Victory {
                score: 50,
                shortest_bonus: false
            }
        );
        assert_eq!(session.accepted_moves(), 4);
        assert_eq!(session.words_found(), ["cod", "at"]);
    }

    #[test]
    fn rejected_move_costs_the_remaining_command() {
        let mut session = pond_session(Difficulty::Easy);
        let outcome = session.submit("wdd");
        assert!(!outcome.ended);
        assert_eq!(outcome.steps.len(), 1);
        assert_eq!(
            outcome.steps[0].status,
            StatusMessage::InvalidMove {
                symbol: 'w',
                penalty: 15
            }
        );
        assert_eq!(session.score(), -15);
        assert_eq!(session.phase(), GamePhase::Running);
        assert_eq!(session.accepted_moves(), 0);
    }

    #[test]
    fn unknown_symbols_reject_like_missing_edges() {
        let mut session = pond_session(Difficulty::Easy);
        let outcome = session.submit("xd");
        assert_eq!(outcome.steps.len(), 1);
        assert_eq!(
            outcome.steps[0].status,
            StatusMessage::InvalidMove {
                symbol: 'x',
                penalty: 10
            }
        );
        assert_eq!(session.score(), -10);
    }

    #[test]
    fn broken_prefix_reverts_and_keeps_the_seed() {
        let mut session = pond_session(Difficulty::Easy);
        let outcome = session.submit("c");
        assert_eq!(
            outcome.steps[0].status,
            StatusMessage::BrokenPrefix {
                attempted: "cd".to_string()
            }
        );
        assert_eq!(session.score(), -10);
        assert_eq!(session.collected(), "c");
        assert_eq!(session.position(), session.graph().start());
        assert_eq!(session.accepted_moves(), 0);
    }

    #[test]
    fn word_is_not_awarded_at_a_dead_end() {
        let mut session = pond_session(Difficulty::Easy);
        session.submit("d");
        let outcome = session.submit("w");
        assert_eq!(outcome.steps[0].status, StatusMessage::DeadEnd);
        assert_eq!(session.score(), -5);
        assert_eq!(session.collected(), "ca");
        assert!(session.words_found().is_empty());
    }

    #[test]
    fn dead_end_then_recovery_still_wins() {
        let mut session = pond_session(Difficulty::Easy);
        session.submit("d");
        session.submit("w");
        let outcome = session.submit("d");
        assert!(outcome.ended);
        assert_eq!(
            outcome.steps[0].status,
            StatusMessage::Victory {
                score: 225,
                shortest_bonus: true
            }
        );
    }

    #[test]
    fn deep_deficit_turns_the_finish_into_defeat() {
        let mut session = pond_session(Difficulty::Easy);
        let long_command: String = "w".repeat(50);
        session.submit(&long_command);
        assert_eq!(session.score(), -250);

        let outcome = session.submit("dd");
        assert!(outcome.ended);
        assert_eq!(
            outcome.steps[1].status,
            StatusMessage::Defeat {
                score: -20,
                shortest_bonus: true
            }
        );
        let summary = session.summary();
        assert!(summary.finished);
        assert!(!summary.won);
        assert_eq!(summary.score, -20);
    }

    #[test]
    fn zero_score_still_wins() {
        let mut session = pond_session(Difficulty::Easy);
        session.submit(&"w".repeat(46));
        assert_eq!(session.score(), -230);
        let outcome = session.submit("dd");
        assert_eq!(
            outcome.steps[1].status,
            StatusMessage::Victory {
                score: 0,
                shortest_bonus: true
            }
        );
        assert!(session.summary().won);
    }

    #[test]
    fn help_costs_points_and_consumes_the_budget() {
        let mut session = pond_session(Difficulty::Hard);
        match session.request_help() {
            HelpOutcome::Granted { paths, hold, cost } => {
                assert_eq!(paths.len(), 2);
                assert_eq!(paths[0].group, 0);
                assert_eq!(paths[1].group, 1);
                assert_eq!(hold, Duration::from_millis(500));
                assert_eq!(cost, 30);
            }
            other => panic!("expected granted help, got {other:?}"),
        }
        assert_eq!(session.score(), -30);
        assert_eq!(session.helps_left(), 0);

        assert_eq!(session.request_help(), HelpOutcome::Exhausted);
        assert_eq!(session.score(), -30);
        assert_eq!(session.message(), &StatusMessage::HelpExhausted);
    }

    #[test]
    fn easy_gets_the_longest_hold_and_budget() {
        assert_eq!(Difficulty::Easy.hint_hold(), Duration::from_millis(1500));
        assert_eq!(Difficulty::Medium.hint_hold(), Duration::from_millis(1000));
        assert_eq!(Difficulty::Hard.hint_hold(), Duration::from_millis(500));
        assert_eq!(Difficulty::Easy.help_budget(), 3);
        assert_eq!(Difficulty::Hard.help_budget(), 1);
    }

    #[test]
    fn commands_are_ignored_unless_running() {
        let mut builder = GraphBuilder::default();
        let a = builder.add_vertex('a');
        let t = builder.add_vertex('t');
        builder.connect_both(a, Direction::East, t).unwrap();
        let graph = builder.build(a, t).unwrap();
        let dictionary = Dictionary::from_words(["at"]);
        let mut session = GameSession::new(
            graph,
            dictionary,
            Difficulty::Easy,
            ScoringConfig::default(),
        )
        .unwrap();

        let outcome = session.submit("d");
        assert!(outcome.steps.is_empty());
        assert_eq!(session.message(), &StatusMessage::NotRunning);
        assert_eq!(session.request_help(), HelpOutcome::NotRunning);

        session.start();
        assert!(session.submit("d").ended);
        assert!(session.submit("a").steps.is_empty());
        assert_eq!(session.message(), &StatusMessage::NotRunning);
    }

    #[test]
    fn empty_commands_change_nothing() {
        let mut session = pond_session(Difficulty::Easy);
        let outcome = session.submit("   ");
        assert!(outcome.steps.is_empty());
        assert_eq!(session.score(), 0);
        assert_eq!(session.message(), &StatusMessage::Ready);
    }

    #[test]
    fn difficulty_parses_case_insensitively() {
        assert_eq!("Easy".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert_eq!("HARD".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert!("brutal".parse::<Difficulty>().is_err());
        assert_eq!(Difficulty::Medium.to_string(), "medium");
    }
}
