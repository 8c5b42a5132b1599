//! Genetic algorithm engine driving generational replacement.
//!
//! The engine owns the population. When every agent of a generation has
//! died it breeds a full replacement: parents are drawn by the configured
//! selection policy, their brains are flattened to genomes, crossed over
//! gene by gene and mutated by replacement, then rebuilt into fresh agents
//! at the start pose.

use ndarray::Array1;
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::StandardNormal;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::agent::Agent;
use super::brain::NeuralNetwork;
use super::params::Params;

/// Parent selection strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SelectionPolicy {
    /// Uniform draw among the top agents by fitness.
    #[default]
    Truncation,
    /// Fitness-proportionate draw over the whole population.
    ///
    /// Requires a strictly positive total fitness; do not use it when any
    /// agent can score non-positive.
    RouletteWheel,
}

/// Owns the population and runs the selection/crossover/mutation cycle.
#[derive(Debug, Clone)]
pub struct Evolution {
    /// The current generation's agents, `population_size` of them at all
    /// times.
    pub population: Vec<Agent>,
    generation: u32,
    deaths: usize,
    best_fitness: f32,
    target_hits: usize,
}

impl Evolution {
    /// Creates generation zero with fully random brains.
    pub fn new(params: &Params) -> Self {
        let population = (0..params.population_size)
            .map(|_| Agent::random(params))
            .collect();
        Self {
            population,
            generation: 0,
            deaths: 0,
            best_fitness: 0.0,
            target_hits: 0,
        }
    }

    /// Generation counter, strictly increasing.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Deaths recorded in the current generation.
    pub fn deaths(&self) -> usize {
        self.deaths
    }

    /// Best fitness of the most recently completed generation.
    pub fn best_fitness(&self) -> f32 {
        self.best_fitness
    }

    /// Agents that reached the target in the most recently completed
    /// generation.
    pub fn target_hits(&self) -> usize {
        self.target_hits
    }

    /// Recounts the dead after a tick's agent batch. Agents never
    /// resurrect, so the count is exact and needs no shared counter.
    pub fn reconcile_deaths(&mut self) {
        self.deaths = self.population.iter().filter(|a| !a.alive).count();
    }

    /// True once every agent of the current generation has died.
    pub fn is_generation_over(&self) -> bool {
        self.deaths >= self.population.len()
    }

    /// Breeds the next generation and replaces the population wholesale.
    ///
    /// Invoke only when [`Evolution::is_generation_over`] holds. Sorts the
    /// population ascending by fitness, then creates exactly
    /// `population_size` children: two parents each (with replacement,
    /// possibly identical), uniform crossover over their genomes, per-gene
    /// replacement mutation, and a fresh agent around the rebuilt brain.
    pub fn advance_generation(&mut self, params: &Params) {
        self.population
            .sort_by(|a, b| a.fitness.total_cmp(&b.fitness));

        self.best_fitness = self.population.last().map_or(0.0, |a| a.fitness);
        self.target_hits = self.population.iter().filter(|a| a.hit_target).count();

        let cumulative = match params.selection {
            SelectionPolicy::RouletteWheel => Some(self.cumulative_fitness()),
            SelectionPolicy::Truncation => None,
        };

        let mut rng = rand::rng();
        let next_generation: Vec<Agent> = (0..params.population_size)
            .map(|_| {
                let parent_a = self.select_parent(params, cumulative.as_deref(), &mut rng);
                let parent_b = self.select_parent(params, cumulative.as_deref(), &mut rng);
                let mut genome = crossover(
                    &parent_a.brain.to_genome(),
                    &parent_b.brain.to_genome(),
                    &mut rng,
                );
                mutate(&mut genome, params.mutation_rate, &mut rng);
                let brain =
                    NeuralNetwork::from_genome(&genome, params.topology, params.activation);
                Agent::new(brain, params)
            })
            .collect();

        self.population = next_generation;
        self.deaths = 0;
        self.generation += 1;
    }

    fn select_parent<'a>(
        &'a self,
        params: &Params,
        cumulative: Option<&[f32]>,
        rng: &mut impl Rng,
    ) -> &'a Agent {
        match cumulative {
            Some(cumulative) => {
                let draw: f32 = rng.random();
                let index = cumulative
                    .partition_point(|&c| c < draw)
                    .min(self.population.len() - 1);
                &self.population[index]
            }
            None => {
                // truncation: uniform among the top `elitism` by fitness
                let offset = rng.random_range(0..params.elitism);
                &self.population[self.population.len() - 1 - offset]
            }
        }
    }

    /// Cumulative share of total fitness per agent, over the
    /// ascending-sorted population.
    fn cumulative_fitness(&self) -> Vec<f32> {
        let total: f32 = self.population.iter().map(|a| a.fitness).sum();
        assert!(
            total > 0.0,
            "roulette-wheel selection needs a positive total fitness"
        );
        let mut acc = 0.0;
        self.population
            .iter()
            .map(|agent| {
                acc += agent.fitness / total;
                acc
            })
            .collect()
    }
}

/// Uniform crossover: each gene comes from either parent with equal
/// probability, independently of its neighbors.
fn crossover(parent_a: &[f32], parent_b: &[f32], rng: &mut impl Rng) -> Vec<f32> {
    debug_assert_eq!(
        parent_a.len(),
        parent_b.len(),
        "parent genomes differ in length"
    );
    parent_a
        .iter()
        .zip(parent_b)
        .map(|(&gene_a, &gene_b)| {
            if rng.random::<f32>() < 0.5 {
                gene_a
            } else {
                gene_b
            }
        })
        .collect()
}

/// Replacement mutation: each gene is independently swapped for a fresh
/// standard-normal sample with probability `mutation_rate`.
fn mutate(genome: &mut [f32], mutation_rate: f32, rng: &mut impl Rng) {
    if mutation_rate <= 0.0 {
        return;
    }
    let fresh: Array1<f32> = Array1::random(genome.len(), StandardNormal);
    for (gene, &replacement) in genome.iter_mut().zip(fresh.iter()) {
        if rng.random::<f32>() < mutation_rate {
            *gene = replacement;
        }
    }
}
