#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use ndarray::Array1;
use wayfinder::simulation::agent::Agent;
use wayfinder::simulation::brain::{Activation, NeuralNetwork, Topology};
use wayfinder::simulation::evolution::SelectionPolicy;
use wayfinder::simulation::obstacle::{Circle, Obstacle};
use wayfinder::simulation::params::Params;

fn create_test_params() -> Params {
    let sensor_count = 4;
    Params {
        population_size: 4,
        elitism: 2,
        mutation_rate: 0.05,
        selection: SelectionPolicy::Truncation,
        start_pos: Array1::from_vec(vec![100.0, 300.0]),
        body_size: 10.0,
        base_speed: 300.0,
        sensor_count,
        field_of_view: std::f32::consts::TAU,
        sensor_range: 100.0,
        topology: Topology {
            inputs: sensor_count,
            hidden_layers: 2,
            hidden_units: 6,
            outputs: 2,
        },
        activation: Activation::Tanh,
        target_pos: Array1::from_vec(vec![700.0, 300.0]),
        capture_margin: 10.0,
        field_width: 800.0,
        field_height: 600.0,
        boundary_margin: 10.0,
        survival_timeout: 6.0,
    }
}

/// An agent whose brain outputs all zeros: it never moves on its own.
fn inert_agent(params: &Params) -> Agent {
    let genome = vec![0.0; params.topology.parameter_count()];
    let brain = NeuralNetwork::from_genome(&genome, params.topology, params.activation);
    Agent::new(brain, params)
}

#[test]
fn test_sensor_fan_covers_the_field_of_view() {
    let params = create_test_params();
    let agent = Agent::random(&params);

    assert_eq!(agent.sensors.len(), params.sensor_count);
    let interval = params.field_of_view / params.sensor_count as f32;
    for (i, sensor) in agent.sensors.iter().enumerate() {
        assert!((sensor.offset() - i as f32 * interval).abs() < 1e-5);
        assert_eq!(sensor.max_range(), params.sensor_range);
    }
}

#[test]
fn test_new_agent_spawns_alive_at_start() {
    let params = create_test_params();
    let agent = Agent::random(&params);

    assert!(agent.alive);
    assert_eq!(agent.pos, params.start_pos);
    assert_eq!(agent.fitness, 0.0);
    assert_eq!(agent.best_distance, f32::INFINITY);
    assert!(!agent.hit_target);
}

#[test]
fn test_inert_agent_stays_put() {
    let params = create_test_params();
    let mut agent = inert_agent(&params);

    agent.act(&params, 0.05);
    assert_eq!(agent.pos, params.start_pos);
    assert_eq!(agent.heading, 0.0);
}

#[test]
fn test_heading_is_recomputed_not_accumulated() {
    let params = create_test_params();
    let mut agent = inert_agent(&params);

    // a previous heading must not persist: turn output 0 means straight ahead
    agent.heading = 1.0;
    agent.act(&params, 0.05);
    assert_eq!(agent.heading, 0.0);
}

#[test]
fn test_update_refreshes_sensor_readings() {
    let params = create_test_params();
    let mut agent = inert_agent(&params);

    // a wall of a circle right of the agent, inside sensor range
    let obstacles: Vec<Box<dyn Obstacle>> =
        vec![Box::new(Circle::new(1, 160.0, 300.0, 20.0))];
    agent.update(&obstacles, &params, 0.05);

    // sensor 0 points along the heading, straight at the circle
    assert!(agent.sensors[0].reading() < params.sensor_range);
    assert!(agent.sensors[0].is_engaged());
}

#[test]
fn test_fitness_rewards_proximity_and_memory_of_best() {
    let params = create_test_params();
    let mut agent = inert_agent(&params);

    // 600 away from the target
    agent.evaluate_fitness(&params);
    let baseline = agent.fitness;
    assert!((agent.best_distance - 600.0).abs() < 1e-3);
    assert!((baseline - (1.0 / 600.0 + 0.5 / 600.0)).abs() < 1e-6);

    // halve the distance: fitness rises, best follows
    agent.pos = Array1::from_vec(vec![400.0, 300.0]);
    agent.evaluate_fitness(&params);
    assert!(agent.fitness > baseline);
    assert!((agent.best_distance - 300.0).abs() < 1e-3);

    // retreat: best distance must not regress
    agent.pos = Array1::from_vec(vec![200.0, 300.0]);
    agent.evaluate_fitness(&params);
    assert!((agent.best_distance - 300.0).abs() < 1e-3);
}

#[test]
fn test_boundary_crossing_is_fatal() {
    let params = create_test_params();
    let mut agent = inert_agent(&params);
    agent.pos = Array1::from_vec(vec![5.0, 300.0]);

    agent.update(&[], &params, 0.05);
    assert!(!agent.alive);
}

#[test]
fn test_obstacle_contact_is_fatal() {
    let params = create_test_params();
    let mut agent = inert_agent(&params);

    let obstacles: Vec<Box<dyn Obstacle>> =
        vec![Box::new(Circle::new(1, 110.0, 300.0, 20.0))];
    agent.update(&obstacles, &params, 0.05);
    assert!(!agent.alive);
    assert!(!agent.hit_target);
}

#[test]
fn test_target_capture_kills_and_scores_the_bonus() {
    let params = create_test_params();
    let mut agent = inert_agent(&params);
    agent.pos = Array1::from_vec(vec![685.0, 300.0]); // 15 away, capture at 20

    agent.update(&[], &params, 0.05);

    assert!(!agent.alive);
    assert!(agent.hit_target);
    // the success bonus is part of the final score
    assert!(agent.fitness > 0.3);
}

#[test]
fn test_survival_timeout_is_fatal() {
    let params = create_test_params();
    let mut agent = inert_agent(&params);

    let ticks = (params.survival_timeout / 0.05).ceil() as usize + 1;
    for _ in 0..ticks {
        agent.update(&[], &params, 0.05);
    }
    assert!(!agent.alive);
}

#[test]
fn test_death_is_terminal_and_freezes_fitness() {
    let params = create_test_params();
    let mut agent = inert_agent(&params);

    let obstacles: Vec<Box<dyn Obstacle>> =
        vec![Box::new(Circle::new(1, 110.0, 300.0, 20.0))];
    agent.update(&obstacles, &params, 0.05);
    assert!(!agent.alive);

    let frozen_fitness = agent.fitness;
    let frozen_age = agent.age;
    for _ in 0..5 {
        agent.act(&params, 0.05);
        agent.update(&obstacles, &params, 0.05);
        agent.evaluate_fitness(&params);
    }

    assert!(!agent.alive);
    assert_eq!(agent.fitness, frozen_fitness);
    assert_eq!(agent.age, frozen_age);
}
