//! Agent behavior, state, and lifecycle.
//!
//! An agent owns one brain and a fixed fan of ray sensors. Each tick it
//! moves on the brain's output, refreshes its sensors against the obstacle
//! course, checks its death conditions and scores its own fitness.

use ndarray::Array1;

use super::brain::NeuralNetwork;
use super::geometry;
use super::obstacle::Obstacle;
use super::params::Params;
use super::sensor::Sensor;

/// Steering authority: the turn output maps onto this many radians to either
/// side of straight ahead.
const MAX_HEADING: f32 = std::f32::consts::FRAC_PI_3;

/// A navigating agent controlled by a neural network.
///
/// Death is terminal: once `alive` goes false nothing sets it back, fitness
/// freezes, and the agent idles until the generation is replaced.
#[derive(Debug, Clone)]
pub struct Agent {
    /// Position in 2D space.
    pub pos: Array1<f32>,
    /// Spawn position, shared by the whole population.
    pub start_pos: Array1<f32>,
    /// Orientation in radians, recomputed from the turn output every tick.
    pub heading: f32,
    /// Whether the agent is still navigating.
    pub alive: bool,
    /// Fitness score, recomputed from scratch while alive.
    pub fitness: f32,
    /// Closest distance to the target seen so far; only ever decreases.
    pub best_distance: f32,
    /// Whether the agent ever reached the target.
    pub hit_target: bool,
    /// Simulated seconds since birth.
    pub age: f32,
    /// Neural network that controls movement.
    pub brain: NeuralNetwork,
    /// Ray sensors, fixed count and spread from construction.
    pub sensors: Vec<Sensor>,
}

impl Agent {
    /// Creates an agent at the configured start pose around the given brain.
    pub fn new(brain: NeuralNetwork, params: &Params) -> Self {
        Self {
            pos: params.start_pos.clone(),
            start_pos: params.start_pos.clone(),
            heading: 0.0,
            alive: true,
            fitness: 0.0,
            best_distance: f32::INFINITY,
            hit_target: false,
            age: 0.0,
            brain,
            sensors: attach_sensors(params),
        }
    }

    /// Creates an agent with a freshly randomized brain.
    pub fn random(params: &Params) -> Self {
        Self::new(
            NeuralNetwork::random(params.topology, params.activation),
            params,
        )
    }

    /// Moves the agent on the brain's output. Only runs while alive.
    ///
    /// Inputs are the previous tick's sensor readings normalized to `[0, 1]`
    /// (1.0 meaning nothing detected). Output 0 drives speed, output 1 is
    /// remapped linearly onto a heading of up to 60 degrees to either side;
    /// the heading is assigned, not accumulated.
    pub fn act(&mut self, params: &Params, dt: f32) {
        if !self.alive {
            return;
        }
        let inputs: Array1<f32> = self.sensors.iter().map(Sensor::normalized_reading).collect();
        let outputs = self.brain.forward(&inputs);
        let speed = outputs[0];
        let turn = outputs[1].clamp(-1.0, 1.0);

        self.heading = turn * MAX_HEADING;
        self.pos[0] += params.base_speed * speed * dt * self.heading.cos();
        self.pos[1] += params.base_speed * speed * dt * self.heading.sin();
    }

    /// Refreshes perception and checks the death conditions.
    ///
    /// All sensors are repositioned and run through their full
    /// test/resolve/disengage protocol against every obstacle before any
    /// death check, so the checks always see this tick's obstacle positions.
    pub fn update(&mut self, obstacles: &[Box<dyn Obstacle>], params: &Params, dt: f32) {
        if !self.alive {
            return;
        }
        self.age += dt;

        for sensor in &mut self.sensors {
            sensor.reposition(&self.pos, self.heading, params.body_size);
        }
        for sensor in &mut self.sensors {
            for obstacle in obstacles {
                match sensor.test_obstacle(obstacle.as_ref()) {
                    Some(point) => sensor.resolve(obstacle.id(), &point),
                    None => sensor.disengage(obstacle.id(), obstacles),
                }
            }
        }

        self.check_death(obstacles, params);
    }

    /// Evaluates the four death triggers, each sufficient on its own:
    /// leaving the inner playfield, touching an obstacle, capturing the
    /// target, or outliving the survival timeout.
    fn check_death(&mut self, obstacles: &[Box<dyn Obstacle>], params: &Params) {
        let margin = params.boundary_margin;
        if self.pos[0] <= margin
            || self.pos[1] <= margin
            || self.pos[0] >= params.field_width - margin
            || self.pos[1] >= params.field_height - margin
        {
            self.alive = false;
            return;
        }

        if obstacles
            .iter()
            .any(|obstacle| obstacle.collides(&self.pos, params.body_size))
        {
            self.alive = false;
            return;
        }

        let target_distance = geometry::distance(&self.pos, &params.target_pos);
        if target_distance <= params.body_size + params.capture_margin {
            self.hit_target = true;
            // final score so the success bonus lands before death freezes it
            self.score(target_distance);
            self.alive = false;
            return;
        }

        if self.age > params.survival_timeout {
            self.alive = false;
        }
    }

    /// Scores the agent on how close it is getting to the target. Only runs
    /// while alive; fitness never changes after death.
    pub fn evaluate_fitness(&mut self, params: &Params) {
        if !self.alive {
            return;
        }
        let distance = geometry::distance(&self.pos, &params.target_pos);
        self.score(distance);
    }

    fn score(&mut self, distance: f32) {
        // the capture margin kills the agent before distance can reach zero,
        // which is what keeps both reciprocals finite
        assert!(distance > 0.0, "fitness evaluated at zero target distance");
        if distance < self.best_distance {
            self.best_distance = distance;
        }
        let target_factor = if self.hit_target { 1.0 } else { 0.0 };
        self.fitness =
            1.0 / distance + 0.5 * (1.0 / self.best_distance) + 0.3 * target_factor;
    }
}

/// Builds the sensor fan: sensor `i` sits at `i * fov / count` from the
/// heading, covering the field of view without duplicating the boundary ray.
fn attach_sensors(params: &Params) -> Vec<Sensor> {
    let interval = params.field_of_view / params.sensor_count as f32;
    (0..params.sensor_count)
        .map(|i| Sensor::new(i as f32 * interval, params.sensor_range))
        .collect()
}
