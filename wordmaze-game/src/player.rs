//! Player token: current position, signed score, display styles.

use thiserror::Error;

use crate::graph::{Direction, Graph, StyleSet, StyleToken, VertexId};

/// A requested move has no edge out of the current vertex.
///
/// Recoverable by design: the session reports it as a scored penalty and
/// play continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no passage {direction} from the current cell")]
pub struct InvalidMoveError {
    /// The direction that had no edge.
    pub direction: Direction,
}

/// Mutable player state for one play-through.
#[derive(Debug, Clone)]
pub struct Player {
    position: VertexId,
    score: i64,
    styles: StyleSet,
}

impl Player {
    /// Place a player at `position` carrying the given display tokens.
    #[must_use]
    pub fn new(position: VertexId, styles: StyleSet) -> Self {
        Self {
            position,
            score: 0,
            styles,
        }
    }

    /// Current vertex identity.
    #[must_use]
    pub const fn position(&self) -> VertexId {
        self.position
    }

    /// Signed score. Never clamped; it may go and stay negative.
    #[must_use]
    pub const fn score(&self) -> i64 {
        self.score
    }

    /// Display tokens for the presentation layer; opaque to the engine.
    #[must_use]
    pub fn styles(&self) -> &[StyleToken] {
        &self.styles
    }

    /// Move one edge along `direction`.
    ///
    /// # Errors
    /// `InvalidMoveError` when the current vertex has no such edge; the
    /// position is left unchanged.
    pub fn step(&mut self, graph: &Graph, direction: Direction) -> Result<VertexId, InvalidMoveError> {
        match graph.neighbor(self.position, direction) {
            Some(next) => {
                self.position = next;
                Ok(next)
            }
            None => Err(InvalidMoveError { direction }),
        }
    }

    /// Restore a previously observed position. Used by the session to
    /// revert rejected moves; not reachable from player input.
    pub fn teleport(&mut self, position: VertexId) {
        self.position = position;
    }

    /// Add points.
    pub fn add_score(&mut self, amount: i64) {
        self.score += amount;
    }

    /// Subtract points, below zero if need be.
    pub fn sub_score(&mut self, amount: i64) {
        self.score -= amount;
    }
}
