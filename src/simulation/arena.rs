//! Arena orchestrating the per-tick simulation loop.
//!
//! One tick is a fixed sequence: obstacles move, every agent acts, updates
//! and scores itself, the death count is reconciled, and a finished
//! generation is replaced. Agents never read each other's state, so the
//! agent batch runs in parallel against the read-only obstacle list.

use rayon::prelude::*;

use super::agent::Agent;
use super::evolution::Evolution;
use super::obstacle::Obstacle;
use super::params::{ConfigError, Params};

/// The simulation arena: obstacle course, target and evolving population.
pub struct Arena {
    params: Params,
    obstacles: Vec<Box<dyn Obstacle>>,
    evolution: Evolution,
    tick: u64,
}

impl Arena {
    /// Creates an arena with a validated configuration and a generation-zero
    /// population.
    pub fn new(params: Params, obstacles: Vec<Box<dyn Obstacle>>) -> Result<Self, ConfigError> {
        params.validate()?;
        let evolution = Evolution::new(&params);
        Ok(Self {
            params,
            obstacles,
            evolution,
            tick: 0,
        })
    }

    /// Advances the simulation by one tick.
    ///
    /// Obstacles move strictly before any agent updates, so every agent
    /// perceives this tick's obstacle positions, never stale ones.
    pub fn step(&mut self, dt: f32) {
        for obstacle in &mut self.obstacles {
            obstacle.advance(dt);
        }

        let params = &self.params;
        let obstacles = &self.obstacles;
        self.evolution.population.par_iter_mut().for_each(|agent| {
            agent.act(params, dt);
            agent.update(obstacles, params, dt);
            agent.evaluate_fitness(params);
        });

        self.evolution.reconcile_deaths();
        if self.evolution.is_generation_over() {
            self.evolution.advance_generation(&self.params);
        }

        self.tick += 1;
    }

    /// The simulation parameters.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// The obstacle course, read-only.
    pub fn obstacles(&self) -> &[Box<dyn Obstacle>] {
        &self.obstacles
    }

    /// The current population, read-only.
    pub fn agents(&self) -> &[Agent] {
        self.evolution.population.as_slice()
    }

    /// The evolution state.
    pub fn evolution(&self) -> &Evolution {
        &self.evolution
    }

    /// Generation counter.
    pub fn generation(&self) -> u32 {
        self.evolution.generation()
    }

    /// Ticks stepped since construction.
    pub fn tick(&self) -> u64 {
        self.tick
    }
}
