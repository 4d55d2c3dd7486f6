//! Session configuration.
//!
//! The turn core has a single tunable, the defeat limit. The grate's two
//! collision layers are carried alongside so hosts can remap them.
//!
//! # Example
//!
//! ```
//! use mazeturn_core::config::TurnConfig;
//!
//! let config = TurnConfig::from_json(r#"{ "rounds_until_defeat": 12 }"#).unwrap();
//! assert_eq!(config.rounds_until_defeat, 12);
//! assert_eq!(config.grate.ignore_raycast.index(), 2);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::grate::CollisionLayer;

/// Defeat limit used when none is configured.
pub const DEFAULT_ROUNDS_UNTIL_DEFEAT: u32 = 10;

/// Configuration of one game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TurnConfig {
    /// Total turns after which a player turn loses the session.
    pub rounds_until_defeat: u32,
    /// Layers the grate switches its body between.
    pub grate: GrateLayers,
}

impl Default for TurnConfig {
    fn default() -> Self {
        Self {
            rounds_until_defeat: DEFAULT_ROUNDS_UNTIL_DEFEAT,
            grate: GrateLayers::default(),
        }
    }
}

impl TurnConfig {
    /// Creates a config with the given defeat limit and default layers.
    #[must_use]
    pub fn with_rounds(rounds_until_defeat: u32) -> Self {
        Self {
            rounds_until_defeat,
            ..Self::default()
        }
    }

    /// Parses and validates a JSON document. Missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed JSON and
    /// [`ConfigError::InvalidRoundLimit`] when the limit is zero.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the invariants a session relies on.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRoundLimit`] when the limit is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rounds_until_defeat == 0 {
            return Err(ConfigError::InvalidRoundLimit(self.rounds_until_defeat));
        }
        Ok(())
    }
}

/// Collision layers used by the grate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrateLayers {
    /// Layer ignored by the player controller's raycasts.
    pub ignore_raycast: CollisionLayer,
    /// Layer the player controller's raycasts hit.
    pub detect_raycast: CollisionLayer,
}

impl Default for GrateLayers {
    fn default() -> Self {
        Self {
            ignore_raycast: CollisionLayer::IGNORE_RAYCAST,
            detect_raycast: CollisionLayer::DEFAULT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limit_is_ten() {
        let config = TurnConfig::default();
        assert_eq!(config.rounds_until_defeat, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_document_takes_defaults() {
        let config = TurnConfig::from_json("{}").unwrap();
        assert_eq!(config, TurnConfig::default());
    }

    #[test]
    fn layers_can_be_remapped() {
        let config = TurnConfig::from_json(
            r#"{ "grate": { "ignore_raycast": 9, "detect_raycast": 3 } }"#,
        )
        .unwrap();
        assert_eq!(config.grate.ignore_raycast, CollisionLayer::new(9));
        assert_eq!(config.grate.detect_raycast, CollisionLayer::new(3));
        assert_eq!(config.rounds_until_defeat, DEFAULT_ROUNDS_UNTIL_DEFEAT);
    }

    #[test]
    fn zero_limit_is_rejected() {
        let err = TurnConfig::from_json(r#"{ "rounds_until_defeat": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRoundLimit(0)));
        assert!(TurnConfig::with_rounds(0).validate().is_err());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = TurnConfig::from_json("{ rounds").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("malformed configuration"));
    }

    #[test]
    fn negative_limit_is_a_parse_error() {
        let err = TurnConfig::from_json(r#"{ "rounds_until_defeat": -3 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
