//! Dense feedforward network used as the agent brain.
//!
//! The network has a fixed shape: one input layer, a uniform stack of hidden
//! layers and one output layer, connected by bias-free weight matrices. All
//! weights can be flattened into a single genome vector and rebuilt from one,
//! which is what the genetic algorithm crosses over and mutates.

use ndarray::{Array1, Array2};
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

/// Shape of a [`NeuralNetwork`]: layer widths, no biases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topology {
    /// Number of input units.
    pub inputs: usize,
    /// Number of hidden layers.
    pub hidden_layers: usize,
    /// Units per hidden layer, uniform across the stack.
    pub hidden_units: usize,
    /// Number of output units.
    pub outputs: usize,
}

impl Topology {
    /// Shapes of the weight matrices in layer order, `(rows, cols)` with
    /// rows = layer outputs and cols = layer inputs.
    pub fn shapes(&self) -> Vec<(usize, usize)> {
        let mut shapes = Vec::with_capacity(self.hidden_layers + 1);
        shapes.push((self.hidden_units, self.inputs));
        for _ in 1..self.hidden_layers {
            shapes.push((self.hidden_units, self.hidden_units));
        }
        shapes.push((self.outputs, self.hidden_units));
        shapes
    }

    /// Total number of weights:
    /// `inputs * hidden + hidden^2 * (layers - 1) + hidden * outputs`.
    pub fn parameter_count(&self) -> usize {
        self.shapes().iter().map(|(rows, cols)| rows * cols).sum()
    }
}

/// Elementwise activation applied after every layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Activation {
    /// Hyperbolic tangent, output in `(-1, 1)`.
    #[default]
    Tanh,
    /// Logistic sigmoid, output in `(0, 1)`.
    Logistic,
}

impl Activation {
    #[inline]
    fn apply(self, z: f32) -> f32 {
        match self {
            Activation::Tanh => z.tanh(),
            Activation::Logistic => 1.0 / (1.0 + (-z).exp()),
        }
    }
}

/// Fixed-shape dense network with a flat-genome codec.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeuralNetwork {
    topology: Topology,
    activation: Activation,
    /// Ordered weight matrices: input→hidden, hidden→hidden, hidden→output.
    weights: Vec<Array2<f32>>,
}

impl NeuralNetwork {
    /// Creates a network with every weight drawn i.i.d. from a standard
    /// normal distribution.
    pub fn random(topology: Topology, activation: Activation) -> Self {
        let weights = topology
            .shapes()
            .iter()
            .map(|&(rows, cols)| Array2::random((rows, cols), StandardNormal))
            .collect();
        Self {
            topology,
            activation,
            weights,
        }
    }

    /// Runs a forward pass.
    ///
    /// Computes `activation(W_i · x)` through every layer. Pure: identical
    /// weights and inputs always give identical outputs.
    ///
    /// # Arguments
    ///
    /// * `inputs` - Input vector; its length must equal the topology's input
    ///   count.
    ///
    /// # Returns
    ///
    /// The output vector, one element per output unit.
    pub fn forward(&self, inputs: &Array1<f32>) -> Array1<f32> {
        assert_eq!(
            inputs.len(),
            self.topology.inputs,
            "input length does not match network inputs"
        );
        let mut output = inputs.clone();
        for weight in &self.weights {
            output = weight.dot(&output);
            output.mapv_inplace(|z| self.activation.apply(z));
        }
        output
    }

    /// Flattens every weight matrix, row-major and in layer order, into a
    /// single genome vector. Lossless inverse of [`NeuralNetwork::from_genome`].
    pub fn to_genome(&self) -> Vec<f32> {
        let mut genome = Vec::with_capacity(self.topology.parameter_count());
        for weight in &self.weights {
            genome.extend(weight.iter().copied());
        }
        genome
    }

    /// Rebuilds a network from a genome vector.
    ///
    /// The genome is sliced by the cumulative element counts of the
    /// topology's shapes and each slice reshaped into its matrix. The genome
    /// length must equal the topology's parameter count; a mismatch is a
    /// logic bug upstream and fails loudly.
    pub fn from_genome(genome: &[f32], topology: Topology, activation: Activation) -> Self {
        assert_eq!(
            genome.len(),
            topology.parameter_count(),
            "genome length does not match the topology's parameter count"
        );
        let mut weights = Vec::with_capacity(topology.hidden_layers + 1);
        let mut start = 0;
        for (rows, cols) in topology.shapes() {
            let stop = start + rows * cols;
            let weight = Array2::from_shape_vec((rows, cols), genome[start..stop].to_vec())
                .expect("genome slice matches the layer shape");
            weights.push(weight);
            start = stop;
        }
        Self {
            topology,
            activation,
            weights,
        }
    }

    /// The network's shape.
    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// The activation used at every layer.
    pub fn activation(&self) -> Activation {
        self.activation
    }

    /// The weight matrices in layer order.
    pub fn weights(&self) -> &[Array2<f32>] {
        &self.weights
    }
}
