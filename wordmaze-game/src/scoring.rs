//! Score weights consumed by the session state machine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Point values for penalties and bonuses.
///
/// All weights are non-negative magnitudes; the session decides the sign
/// when applying them. Missing fields deserialize to the standard values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Penalty per remaining command character when a move is rejected.
    #[serde(default = "ScoringConfig::default_invalid_move_penalty")]
    pub invalid_move_penalty: i64,
    /// Penalty for a dead end: viable prefix, exit no longer reachable.
    #[serde(default = "ScoringConfig::default_dead_end_penalty")]
    pub dead_end_penalty: i64,
    /// Penalty when no dictionary word starts with the collected buffer.
    #[serde(default = "ScoringConfig::default_broken_prefix_penalty")]
    pub broken_prefix_penalty: i64,
    /// Bonus per letter of a completed word.
    #[serde(default = "ScoringConfig::default_word_bonus_per_letter")]
    pub word_bonus_per_letter: i64,
    /// One-time bonus for finishing in the minimum number of accepted moves.
    #[serde(default = "ScoringConfig::default_shortest_path_bonus")]
    pub shortest_path_bonus: i64,
    /// Flat cost of one help request, the same at every difficulty.
    #[serde(default = "ScoringConfig::default_help_cost")]
    pub help_cost: i64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            invalid_move_penalty: Self::default_invalid_move_penalty(),
            dead_end_penalty: Self::default_dead_end_penalty(),
            broken_prefix_penalty: Self::default_broken_prefix_penalty(),
            word_bonus_per_letter: Self::default_word_bonus_per_letter(),
            shortest_path_bonus: Self::default_shortest_path_bonus(),
            help_cost: Self::default_help_cost(),
        }
    }
}

impl ScoringConfig {
    const fn default_invalid_move_penalty() -> i64 {
        5
    }

    const fn default_dead_end_penalty() -> i64 {
        5
    }

    const fn default_broken_prefix_penalty() -> i64 {
        10
    }

    const fn default_word_bonus_per_letter() -> i64 {
        10
    }

    const fn default_shortest_path_bonus() -> i64 {
        200
    }

    const fn default_help_cost() -> i64 {
        30
    }

    /// Parse a configuration from JSON. Absent fields keep their defaults.
    ///
    /// # Errors
    /// Returns the underlying parse error for malformed JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Check the non-negativity invariant on every weight.
    ///
    /// # Errors
    /// `ScoringError::NegativeWeight` naming the first offending field.
    pub fn validate(&self) -> Result<(), ScoringError> {
        let fields = [
            ("invalid_move_penalty", self.invalid_move_penalty),
            ("dead_end_penalty", self.dead_end_penalty),
            ("broken_prefix_penalty", self.broken_prefix_penalty),
            ("word_bonus_per_letter", self.word_bonus_per_letter),
            ("shortest_path_bonus", self.shortest_path_bonus),
            ("help_cost", self.help_cost),
        ];
        for (field, value) in fields {
            if value < 0 {
                return Err(ScoringError::NegativeWeight { field, value });
            }
        }
        Ok(())
    }
}

/// Raised when scoring weights violate their documented bounds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    #[error("{field} must be non-negative (got {value})")]
    NegativeWeight { field: &'static str, value: i64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_standard_values() {
        let cfg = ScoringConfig::default();
        assert_eq!(cfg.invalid_move_penalty, 5);
        assert_eq!(cfg.dead_end_penalty, 5);
        assert_eq!(cfg.broken_prefix_penalty, 10);
        assert_eq!(cfg.word_bonus_per_letter, 10);
        assert_eq!(cfg.shortest_path_bonus, 200);
        assert_eq!(cfg.help_cost, 30);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn empty_json_yields_defaults() {
        let cfg = ScoringConfig::from_json("{}").unwrap();
        assert_eq!(cfg, ScoringConfig::default());
    }

    #[test]
    fn partial_json_overrides_single_fields() {
        let cfg = ScoringConfig::from_json(r#"{"help_cost": 50}"#).unwrap();
        assert_eq!(cfg.help_cost, 50);
        assert_eq!(cfg.word_bonus_per_letter, 10);
    }

    #[test]
    fn negative_weights_fail_validation() {
        let cfg = ScoringConfig {
            dead_end_penalty: -1,
            ..ScoringConfig::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(ScoringError::NegativeWeight {
                field: "dead_end_penalty",
                value: -1
            })
        );
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(ScoringConfig::from_json("{not json").is_err());
    }
}
