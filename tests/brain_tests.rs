#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use ndarray::Array1;
use wayfinder::simulation::brain::{Activation, NeuralNetwork, Topology};

fn create_test_topology() -> Topology {
    Topology {
        inputs: 5,
        hidden_layers: 3,
        hidden_units: 4,
        outputs: 2,
    }
}

#[test]
fn test_parameter_count_matches_layer_shapes() {
    let topology = create_test_topology();

    // inputs*hidden + hidden^2*(layers-1) + hidden*outputs
    let expected = 5 * 4 + 4 * 4 * 2 + 4 * 2;
    assert_eq!(topology.parameter_count(), expected);

    let from_shapes: usize = topology.shapes().iter().map(|(r, c)| r * c).sum();
    assert_eq!(from_shapes, expected);
}

#[test]
fn test_genome_round_trip_is_lossless() {
    let topology = create_test_topology();
    let network = NeuralNetwork::random(topology, Activation::Tanh);

    let genome = network.to_genome();
    assert_eq!(genome.len(), topology.parameter_count());

    let rebuilt = NeuralNetwork::from_genome(&genome, topology, Activation::Tanh);

    for (original, copy) in network.weights().iter().zip(rebuilt.weights()) {
        assert_eq!(original, copy);
    }
    assert_eq!(rebuilt.to_genome(), genome);
}

#[test]
fn test_genome_layout_is_row_major_in_layer_order() {
    let topology = Topology {
        inputs: 2,
        hidden_layers: 1,
        hidden_units: 2,
        outputs: 1,
    };
    let genome: Vec<f32> = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];

    let network = NeuralNetwork::from_genome(&genome, topology, Activation::Tanh);

    let first = &network.weights()[0];
    assert_eq!(first[[0, 0]], 1.0);
    assert_eq!(first[[0, 1]], 2.0);
    assert_eq!(first[[1, 0]], 3.0);
    assert_eq!(first[[1, 1]], 4.0);

    let second = &network.weights()[1];
    assert_eq!(second[[0, 0]], 5.0);
    assert_eq!(second[[0, 1]], 6.0);

    assert_eq!(network.to_genome(), genome);
}

#[test]
fn test_forward_is_deterministic() {
    let topology = create_test_topology();
    let network = NeuralNetwork::random(topology, Activation::Tanh);
    let inputs = Array1::from_vec(vec![0.1, 0.5, 0.9, 0.3, 1.0]);

    let first = network.forward(&inputs);
    let second = network.forward(&inputs);

    assert_eq!(first, second);
}

#[test]
fn test_forward_output_length_and_tanh_bounds() {
    let topology = create_test_topology();
    let network = NeuralNetwork::random(topology, Activation::Tanh);
    let inputs = Array1::from_vec(vec![1.0; 5]);

    let outputs = network.forward(&inputs);
    assert_eq!(outputs.len(), topology.outputs);
    for &value in outputs.iter() {
        assert!(value > -1.0 && value < 1.0);
    }
}

#[test]
fn test_logistic_outputs_stay_in_unit_interval() {
    let topology = create_test_topology();
    let network = NeuralNetwork::random(topology, Activation::Logistic);
    let inputs = Array1::from_vec(vec![1.0; 5]);

    let outputs = network.forward(&inputs);
    for &value in outputs.iter() {
        assert!(value > 0.0 && value < 1.0);
    }
}

#[test]
fn test_zero_genome_gives_zero_tanh_output() {
    let topology = create_test_topology();
    let genome = vec![0.0; topology.parameter_count()];
    let network = NeuralNetwork::from_genome(&genome, topology, Activation::Tanh);

    let outputs = network.forward(&Array1::from_vec(vec![1.0; 5]));
    for &value in outputs.iter() {
        assert_eq!(value, 0.0);
    }
}

#[test]
#[should_panic(expected = "genome length")]
fn test_genome_length_mismatch_fails_loudly() {
    let topology = create_test_topology();
    let genome = vec![0.0; topology.parameter_count() - 1];
    let _ = NeuralNetwork::from_genome(&genome, topology, Activation::Tanh);
}

#[test]
#[should_panic(expected = "input length")]
fn test_wrong_input_length_fails_loudly() {
    let topology = create_test_topology();
    let network = NeuralNetwork::random(topology, Activation::Tanh);
    let _ = network.forward(&Array1::from_vec(vec![1.0; 3]));
}
