//! # Wayfinder - Neuroevolution Navigation Simulation
//!
//! A population of agents, each steered by a small feedforward neural
//! network, evolves through a generational genetic algorithm to travel from
//! a fixed start to a fixed target without touching the obstacles in
//! between.
//!
//! ## Features
//!
//! - Ray sensors with nearest-obstacle arbitration across overlapping
//!   obstacles
//! - Dense bias-free networks (tanh or logistic) with a flat-genome codec
//! - Truncation and roulette-wheel parent selection, uniform crossover,
//!   replacement mutation
//! - Deterministic tick loop with a rayon-parallel agent batch
//! - Validated, JSON round-trippable configuration
//!
//! ## Core Modules
//!
//! - [`simulation::agent`] - Agent movement, perception and fitness
//! - [`simulation::brain`] - Neural network and genome codec
//! - [`simulation::evolution`] - Genetic algorithm engine
//! - [`simulation::arena`] - Per-tick orchestration
//!
//! Rendering, windowing and input handling live outside this crate; the
//! arena only exposes read-only state for a drawing layer to consume.

/// Core simulation logic and data structures.
pub mod simulation {
    /// Agent behavior, state, and lifecycle.
    pub mod agent;
    /// Arena orchestrating the per-tick loop.
    pub mod arena;
    /// Neural network brains and the genome codec.
    pub mod brain;
    /// Genetic algorithm engine.
    pub mod evolution;
    /// Geometric primitives for raycasting and distances.
    pub mod geometry;
    /// Obstacle capability and the circle obstacle.
    pub mod obstacle;
    /// Simulation parameters and validation.
    pub mod params;
    /// Ray sensors with nearest-obstacle arbitration.
    pub mod sensor;
}
