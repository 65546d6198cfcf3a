//! Wordmaze Game Engine
//!
//! Platform-agnostic core logic for the Wordmaze word-labyrinth puzzle.
//! This crate provides the labeled graph, the word dictionary, path and
//! word validation, and the per-move session state machine, without UI or
//! platform-specific dependencies. Rendering, input handling, and labyrinth
//! generation live with the embedding front-end.

pub mod dictionary;
pub mod graph;
pub mod paths;
pub mod player;
pub mod scoring;
pub mod session;

// Re-export commonly used types
pub use dictionary::Dictionary;
pub use graph::{
    Direction, Graph, GraphBuilder, GraphError, StyleSet, StyleToken, Vertex, VertexId,
};
pub use paths::{
    EmptyPathSetError, HintPath, Path, PathAtlas, decomposes_into_words, dedupe_paths,
    enumerate_valid_paths, shortest_edge_count,
};
pub use player::{InvalidMoveError, Player};
pub use scoring::{ScoringConfig, ScoringError};
pub use session::{
    CommandOutcome, Difficulty, GamePhase, GameSession, HelpOutcome, SessionSummary,
    StatusMessage, StepRecord,
};

/// Trait for abstracting word-list loading.
/// Platform-specific implementations should provide this.
pub trait WordListSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the raw word entries backing the dictionary.
    ///
    /// # Errors
    ///
    /// Returns an error if the word list cannot be read.
    fn load_words(&self) -> Result<Vec<String>, Self::Error>;
}

/// Session construction failures at the engine boundary.
#[derive(Debug, thiserror::Error)]
pub enum SessionInitError<E> {
    /// The word-list collaborator failed; there is nothing to play with.
    #[error("word list failed to load")]
    Load(#[source] E),
    /// The labyrinth breaks the generator contract.
    #[error(transparent)]
    EmptyPaths(#[from] EmptyPathSetError),
}

/// Main engine wiring a word source to session construction.
pub struct GameEngine<W>
where
    W: WordListSource,
{
    words: W,
    scoring: ScoringConfig,
}

impl<W> GameEngine<W>
where
    W: WordListSource,
{
    /// Create an engine with the provided word source and default scoring.
    pub fn new(words: W) -> Self {
        Self {
            words,
            scoring: ScoringConfig::default(),
        }
    }

    /// Replace the scoring weights. Callers validate custom weights before
    /// handing them over.
    #[must_use]
    pub fn with_scoring(mut self, scoring: ScoringConfig) -> Self {
        self.scoring = scoring;
        self
    }

    /// Load and index the word list once.
    ///
    /// # Errors
    ///
    /// Returns the collaborator's error when the list cannot be read.
    pub fn load_dictionary(&self) -> Result<Dictionary, W::Error> {
        Ok(Dictionary::from_words(self.words.load_words()?))
    }

    /// Build a session for one generated labyrinth.
    ///
    /// # Errors
    ///
    /// Returns an error if the word list cannot be read or the labyrinth
    /// admits no valid path.
    pub fn new_session(
        &self,
        graph: Graph,
        difficulty: Difficulty,
    ) -> Result<GameSession, SessionInitError<W::Error>> {
        let dictionary = self.load_dictionary().map_err(SessionInitError::Load)?;
        Ok(GameSession::new(
            graph,
            dictionary,
            difficulty,
            self.scoring.clone(),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;
    use std::io;

    #[derive(Clone, Copy, Default)]
    struct FixtureWords;

    impl WordListSource for FixtureWords {
        type Error = Infallible;

        fn load_words(&self) -> Result<Vec<String>, Self::Error> {
            Ok(vec!["cat".to_string(), "at".to_string()])
        }
    }

    #[derive(Clone, Copy, Default)]
    struct MissingWords;

    impl WordListSource for MissingWords {
        type Error = io::Error;

        fn load_words(&self) -> Result<Vec<String>, Self::Error> {
            Err(io::Error::new(io::ErrorKind::NotFound, "no word list"))
        }
    }

    fn lane() -> Graph {
        let mut builder = Graph::builder();
        let a = builder.add_vertex('c');
        let b = builder.add_vertex('a');
        let c = builder.add_vertex('t');
        builder.connect_both(a, Direction::East, b).unwrap();
        builder.connect_both(b, Direction::East, c).unwrap();
        builder.build(a, c).unwrap()
    }

    #[test]
    fn engine_builds_a_playable_session() {
        let engine = GameEngine::new(FixtureWords);
        let mut session = engine.new_session(lane(), Difficulty::Medium).unwrap();
        assert_eq!(session.difficulty(), Difficulty::Medium);
        session.start();
        let outcome = session.submit("dd");
        assert!(outcome.ended);
        assert_eq!(session.score(), 230);
    }

    #[test]
    fn custom_scoring_flows_into_sessions() {
        let scoring = ScoringConfig {
            word_bonus_per_letter: 1,
            shortest_path_bonus: 0,
            ..ScoringConfig::default()
        };
        scoring.validate().unwrap();
        let engine = GameEngine::new(FixtureWords).with_scoring(scoring);
        let mut session = engine.new_session(lane(), Difficulty::Easy).unwrap();
        session.start();
        session.submit("dd");
        assert_eq!(session.score(), 3);
    }

    #[test]
    fn load_failures_surface_as_init_errors() {
        let engine = GameEngine::new(MissingWords);
        let err = engine.new_session(lane(), Difficulty::Easy).unwrap_err();
        assert!(matches!(err, SessionInitError::Load(_)));
    }

    #[test]
    fn unwinnable_labyrinths_are_refused() {
        let mut builder = Graph::builder();
        let a = builder.add_vertex('x');
        let b = builder.add_vertex('y');
        builder.connect_both(a, Direction::East, b).unwrap();
        let graph = builder.build(a, b).unwrap();

        let engine = GameEngine::new(FixtureWords);
        let err = engine.new_session(graph, Difficulty::Easy).unwrap_err();
        assert!(matches!(err, SessionInitError::EmptyPaths(_)));
    }
}
