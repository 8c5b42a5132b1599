//! Headless driver: authors a small obstacle course, then runs the
//! simulation for a bounded number of generations, reporting progress per
//! generation. Drawing belongs to a separate front end; this binary only
//! exercises the core loop.

use ndarray::Array1;

use wayfinder::simulation::arena::Arena;
use wayfinder::simulation::brain::{Activation, Topology};
use wayfinder::simulation::evolution::SelectionPolicy;
use wayfinder::simulation::obstacle::{Circle, Obstacle, Oscillation};
use wayfinder::simulation::params::Params;

/// A course with one static and one vertically oscillating circle between
/// start and target.
fn course() -> Vec<Box<dyn Obstacle>> {
    vec![
        Box::new(Circle::new(1, 300.0, 300.0, 65.0)),
        Box::new(Circle::oscillating(
            2,
            500.0,
            300.0,
            85.0,
            Oscillation {
                min_y: 150.0,
                max_y: 450.0,
                speed: 240.0,
            },
        )),
    ]
}

fn main() {
    let sensor_count = 8;

    let params = Params {
        population_size: 60,
        elitism: 12,
        mutation_rate: 0.05,
        selection: SelectionPolicy::Truncation,
        start_pos: Array1::from_vec(vec![80.0, 300.0]),
        body_size: 10.0,
        base_speed: 360.0,
        sensor_count,
        field_of_view: std::f32::consts::TAU,
        sensor_range: 150.0,
        topology: Topology {
            inputs: sensor_count,
            hidden_layers: 2,
            hidden_units: 8,
            outputs: 2,
        },
        activation: Activation::Tanh,
        target_pos: Array1::from_vec(vec![700.0, 300.0]),
        capture_margin: 10.0,
        field_width: 800.0,
        field_height: 600.0,
        boundary_margin: 10.0,
        survival_timeout: 6.0,
    };

    let mut arena = Arena::new(params, course()).expect("parameters are valid");

    println!("Starting wayfinder neuroevolution");

    let dt = 1.0 / 60.0;
    let max_generations = 40;

    while arena.generation() < max_generations {
        let generation_before = arena.generation();
        arena.step(dt);

        if arena.generation() != generation_before {
            println!(
                "generation {:>3}: best fitness {:.4}, target hits {}",
                generation_before,
                arena.evolution().best_fitness(),
                arena.evolution().target_hits(),
            );
        }
    }
}
