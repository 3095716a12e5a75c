//! Sheet configuration
//!
//! Layout constants are configuration, not logic. Checkpoints are given as
//! percentages of the container height and resolved at layout time.

use partial_animation::SpringConfig;
use partial_core::{Checkpoint, CheckpointSet, PositionState, Result, SheetError};
use serde::{Deserialize, Serialize};

/// Configuration for one sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetConfig {
    /// Most expanded checkpoint, percent of container height from the top
    pub min_percent: f32,
    /// Most collapsed checkpoint, percent of container height from the top
    pub max_percent: f32,
    /// Optional intermediate checkpoint
    pub mid_percent: Option<f32>,
    /// Release speed (points per millisecond) above which a release counts as a flick
    pub flick_velocity_threshold: f32,
    /// Duration hint handed to the animation engine
    pub settle_duration_ms: u32,
    /// Visible sheet height at first layout. `None` rests at the most collapsed checkpoint.
    pub initial_visible_height: Option<f32>,
    /// Spring used for the settle animation
    pub spring: SpringConfig,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            min_percent: 5.0,
            max_percent: 85.0,
            mid_percent: None,
            flick_velocity_threshold: 0.4,
            settle_duration_ms: 200,
            initial_visible_height: None,
            spring: SpringConfig::sheet(),
        }
    }
}

impl SheetConfig {
    /// Three-checkpoint layout: top / mid / bottom
    pub fn with_mid(mid_percent: f32) -> Self {
        Self {
            mid_percent: Some(mid_percent),
            ..Default::default()
        }
    }

    /// Check every value the sheet relies on
    pub fn validate(&self) -> Result<()> {
        let in_range = |v: f32| v.is_finite() && (0.0..=100.0).contains(&v);

        if !in_range(self.min_percent) {
            return Err(SheetError::InvalidConfig(format!(
                "min_percent {} must be within 0..=100",
                self.min_percent
            )));
        }
        if !in_range(self.max_percent) {
            return Err(SheetError::InvalidConfig(format!(
                "max_percent {} must be within 0..=100",
                self.max_percent
            )));
        }
        if self.min_percent >= self.max_percent {
            return Err(SheetError::InvalidConfig(format!(
                "min_percent {} must be below max_percent {}",
                self.min_percent, self.max_percent
            )));
        }
        if let Some(mid) = self.mid_percent {
            if !mid.is_finite() || mid <= self.min_percent || mid >= self.max_percent {
                return Err(SheetError::InvalidConfig(format!(
                    "mid_percent {} must lie strictly between {} and {}",
                    mid, self.min_percent, self.max_percent
                )));
            }
        }
        if !self.flick_velocity_threshold.is_finite() || self.flick_velocity_threshold <= 0.0 {
            return Err(SheetError::InvalidConfig(format!(
                "flick_velocity_threshold {} must be positive",
                self.flick_velocity_threshold
            )));
        }
        if !self.spring.is_valid() {
            return Err(SheetError::InvalidConfig(format!(
                "spring parameters must be positive: {:?}",
                self.spring
            )));
        }
        if let Some(visible) = self.initial_visible_height {
            if !visible.is_finite() || visible < 0.0 {
                return Err(SheetError::InvalidConfig(format!(
                    "initial_visible_height {visible} must be a non-negative number"
                )));
            }
        }
        Ok(())
    }

    /// Resolve checkpoint percentages against a container height
    pub fn checkpoints(&self, container_height: f32) -> Result<CheckpointSet> {
        if !container_height.is_finite() || container_height <= 0.0 {
            return Err(SheetError::InvalidContainerHeight(container_height));
        }
        let resolve = |percent: f32| container_height * percent / 100.0;

        let mut checkpoints = vec![Checkpoint::new(PositionState::Top, resolve(self.min_percent))];
        if let Some(mid) = self.mid_percent {
            checkpoints.push(Checkpoint::new(PositionState::Mid, resolve(mid)));
        }
        checkpoints.push(Checkpoint::new(
            PositionState::Bottom,
            resolve(self.max_percent),
        ));

        CheckpointSet::new(checkpoints)
    }

    /// Offset the sheet starts at, already clamped into the checkpoint range
    pub fn initial_offset(&self, checkpoints: &CheckpointSet, container_height: f32) -> f32 {
        match self.initial_visible_height {
            Some(visible) => checkpoints.clamp(container_height - visible),
            None => checkpoints.max(),
        }
    }

    /// Duration hint in seconds
    pub fn settle_duration(&self) -> f32 {
        self.settle_duration_ms as f32 / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_checkpoints() {
        let config = SheetConfig::default();
        config.validate().unwrap();

        let checkpoints = config.checkpoints(800.0).unwrap();
        assert_eq!(checkpoints.len(), 2);
        assert_eq!(checkpoints.min(), 40.0);
        assert_eq!(checkpoints.max(), 680.0);
        assert_eq!(config.initial_offset(&checkpoints, 800.0), 680.0);
    }

    #[test]
    fn test_mid_checkpoint() {
        let config = SheetConfig::with_mid(50.0);
        let checkpoints = config.checkpoints(1000.0).unwrap();
        let offsets: Vec<f32> = checkpoints.iter().map(|c| c.offset).collect();
        assert_eq!(offsets, vec![50.0, 500.0, 850.0]);
        assert_eq!(checkpoints.state_for(500.0), PositionState::Mid);
    }

    #[test]
    fn test_initial_visible_height_is_clamped() {
        let config = SheetConfig {
            initial_visible_height: Some(500.0),
            ..Default::default()
        };
        let checkpoints = config.checkpoints(800.0).unwrap();
        assert_eq!(config.initial_offset(&checkpoints, 800.0), 300.0);

        let tall = SheetConfig {
            initial_visible_height: Some(5000.0),
            ..Default::default()
        };
        assert_eq!(tall.initial_offset(&checkpoints, 800.0), 40.0);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let inverted = SheetConfig {
            min_percent: 90.0,
            max_percent: 10.0,
            ..Default::default()
        };
        assert!(matches!(
            inverted.validate(),
            Err(SheetError::InvalidConfig(_))
        ));

        let equal = SheetConfig {
            min_percent: 40.0,
            max_percent: 40.0,
            ..Default::default()
        };
        assert!(equal.validate().is_err());

        assert!(SheetConfig::with_mid(90.0).validate().is_err());
        assert!(SheetConfig::with_mid(5.0).validate().is_err());

        let zero_threshold = SheetConfig {
            flick_velocity_threshold: 0.0,
            ..Default::default()
        };
        assert!(zero_threshold.validate().is_err());

        let bad_spring = SheetConfig {
            spring: SpringConfig::new(200.0, 30.0, 0.0),
            ..Default::default()
        };
        assert!(bad_spring.validate().is_err());

        let over = SheetConfig {
            max_percent: 120.0,
            ..Default::default()
        };
        assert!(over.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_container_height() {
        let config = SheetConfig::default();
        assert_eq!(
            config.checkpoints(0.0),
            Err(SheetError::InvalidContainerHeight(0.0))
        );
        assert!(config.checkpoints(f32::NAN).is_err());
    }

    #[test]
    fn test_parse_from_toml() {
        let config: SheetConfig = toml::from_str(
            r#"
            min_percent = 10.0
            mid_percent = 45.0
            flick_velocity_threshold = 0.6

            [spring]
            stiffness = 300.0
            damping = 25.0
            mass = 1.0
            "#,
        )
        .unwrap();

        assert_eq!(config.min_percent, 10.0);
        assert_eq!(config.max_percent, 85.0);
        assert_eq!(config.mid_percent, Some(45.0));
        assert_eq!(config.spring, SpringConfig::new(300.0, 25.0, 1.0));
        assert_eq!(config.settle_duration_ms, 200);
        config.validate().unwrap();
    }
}
