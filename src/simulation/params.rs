//! Simulation parameters and construction-time validation.

use ndarray::Array1;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::brain::{Activation, Topology};
use super::evolution::SelectionPolicy;

/// Errors raised when validating simulation parameters.
///
/// Every variant is a configuration mistake that must be rejected before
/// the first tick, never discovered mid-run.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Population size of zero.
    #[error("population_size must be positive")]
    ZeroPopulation,
    /// Elitism outside `1..=population_size`.
    #[error("elitism {elitism} must lie between 1 and population size {population_size}")]
    ElitismOutOfRange {
        /// Configured elitism count.
        elitism: usize,
        /// Configured population size.
        population_size: usize,
    },
    /// Mutation rate outside `[0, 1]`.
    #[error("mutation_rate {0} must lie within [0, 1]")]
    MutationRateOutOfRange(f32),
    /// No sensors configured.
    #[error("at least one sensor is required")]
    ZeroSensors,
    /// Network input width differs from the sensor count.
    #[error("network expects {inputs} inputs but {sensors} sensors are attached")]
    SensorInputMismatch {
        /// Declared network input count.
        inputs: usize,
        /// Configured sensor count.
        sensors: usize,
    },
    /// Network output width is not speed + turn.
    #[error("network must drive speed and turn, got {0} outputs")]
    BadOutputCount(usize),
    /// Hidden stack with zero layers or zero units.
    #[error("hidden layers and hidden units must both be positive")]
    DegenerateHiddenStack,
    /// A length, speed or duration that must be strictly positive.
    #[error("{0} must be positive")]
    NonPositive(&'static str),
    /// Playfield too small for its boundary margin.
    #[error("playfield must be larger than twice the boundary margin")]
    DegeneratePlayfield,
}

/// Simulation parameters, fixed for the lifetime of an arena.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Params {
    /// Number of agents per generation.
    pub population_size: usize,
    /// Number of top agents eligible as parents each generation.
    pub elitism: usize,
    /// Per-gene probability of replacement during mutation.
    pub mutation_rate: f32,
    /// Parent selection strategy.
    pub selection: SelectionPolicy,
    /// Spawn position shared by every agent.
    pub start_pos: Array1<f32>,
    /// Agent body radius.
    pub body_size: f32,
    /// Distance covered per second at full speed output.
    pub base_speed: f32,
    /// Number of ray sensors per agent.
    pub sensor_count: usize,
    /// Total angular spread of the sensor fan in radians.
    pub field_of_view: f32,
    /// Maximum sensing distance.
    pub sensor_range: f32,
    /// Network shape; inputs must match the sensor count.
    pub topology: Topology,
    /// Activation applied at every layer.
    pub activation: Activation,
    /// Position of the navigation target.
    pub target_pos: Array1<f32>,
    /// Capture distance beyond the body radius.
    pub capture_margin: f32,
    /// Playfield width.
    pub field_width: f32,
    /// Playfield height.
    pub field_height: f32,
    /// Inner margin of the playfield; crossing it is fatal.
    pub boundary_margin: f32,
    /// Simulated seconds an agent may live per generation.
    pub survival_timeout: f32,
}

impl Params {
    /// Checks every construction-time constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::ZeroPopulation);
        }
        if self.elitism == 0 || self.elitism > self.population_size {
            return Err(ConfigError::ElitismOutOfRange {
                elitism: self.elitism,
                population_size: self.population_size,
            });
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(ConfigError::MutationRateOutOfRange(self.mutation_rate));
        }
        if self.sensor_count == 0 {
            return Err(ConfigError::ZeroSensors);
        }
        if self.topology.inputs != self.sensor_count {
            return Err(ConfigError::SensorInputMismatch {
                inputs: self.topology.inputs,
                sensors: self.sensor_count,
            });
        }
        if self.topology.outputs != 2 {
            return Err(ConfigError::BadOutputCount(self.topology.outputs));
        }
        if self.topology.hidden_layers == 0 || self.topology.hidden_units == 0 {
            return Err(ConfigError::DegenerateHiddenStack);
        }
        for (value, name) in [
            (self.body_size, "body_size"),
            (self.base_speed, "base_speed"),
            (self.sensor_range, "sensor_range"),
            (self.capture_margin, "capture_margin"),
            (self.survival_timeout, "survival_timeout"),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive(name));
            }
        }
        if self.field_width <= 2.0 * self.boundary_margin
            || self.field_height <= 2.0 * self.boundary_margin
        {
            return Err(ConfigError::DegeneratePlayfield);
        }
        Ok(())
    }

    /// Saves the parameters to a JSON file.
    pub fn save_to_file(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Loads and validates parameters from a JSON file.
    pub fn load_from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let json = std::fs::read_to_string(path)?;
        let params: Self = serde_json::from_str(&json)?;
        params.validate()?;
        Ok(params)
    }
}
